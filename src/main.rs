//! CaptureCheck CLI entry point

use std::process::ExitCode;

use clap::Parser;

use capture_check::cli::{
    app::{build_controller, load_merged_config, run_oneshot, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    interactive::run_interactive,
    panel::ConsolePanel,
};
use capture_check::domain::capture::CaptureKind;
use capture_check::domain::config::AppConfig;
use capture_check::domain::duration::Duration;
use capture_check::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let panel = ConsolePanel::new();

    // Build CLI config overrides from args
    let cli_config = AppConfig {
        output_dir: cli
            .output
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        duration: None,
        notify: if cli.notify { Some(true) } else { None },
        cue: if cli.cue { Some(true) } else { None },
        display: None,
    };

    match cli.command {
        // Config management never touches capture devices
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &panel).await {
                panel.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Some(Commands::Mic { duration }) => {
            run_bounded(cli_config, cli.output, duration, CaptureKind::Microphone, &panel).await
        }
        Some(Commands::System { duration }) => {
            run_bounded(cli_config, cli.output, duration, CaptureKind::System, &panel).await
        }
        Some(Commands::Interactive) | None => {
            let config = load_merged_config(cli_config).await;
            let controller = build_controller(&config, cli.output);
            run_interactive(&controller).await
        }
    }
}

/// Run one bounded recording of the given kind
async fn run_bounded(
    cli_config: AppConfig,
    output: Option<std::path::PathBuf>,
    duration_arg: Option<String>,
    kind: CaptureKind,
    panel: &ConsolePanel,
) -> ExitCode {
    let config = load_merged_config(cli_config).await;

    let duration = match duration_arg.as_deref() {
        Some(s) => match s.parse::<Duration>() {
            Ok(d) => d,
            Err(e) => {
                panel.error(&format!("Invalid duration: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => config.duration_or_default(),
    };

    let controller = build_controller(&config, output);
    run_oneshot(&controller, kind, duration).await
}
