//! Application wiring and the one-shot runners

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use tokio::time::{sleep, Duration as TokioDuration};

use crate::application::ports::ConfigStore;
use crate::application::{ControllerEvents, ControllerOptions, SessionController};
use crate::domain::capture::CaptureKind;
use crate::domain::config::AppConfig;
use crate::domain::duration::Duration;
use crate::infrastructure::{
    CpalPermissionProbe, DisplayGrabSource, DownloadsSink, FfmpegEncoderFactory,
    NotifyRustNotifier, PulseMicrophoneSource, RodioAudioCue, XdgConfigStore,
};

use super::panel::ConsolePanel;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// The controller wired to the production adapters
pub type AppController = SessionController<
    CpalPermissionProbe,
    PulseMicrophoneSource,
    DisplayGrabSource,
    FfmpegEncoderFactory,
    DownloadsSink,
    RodioAudioCue,
    NotifyRustNotifier,
>;

/// Load the config file and merge CLI overrides on top
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());
    file_config.merge(cli_config)
}

/// Build the controller over the production adapters, with journal and
/// checklist changes rendered to the terminal as they happen.
pub fn build_controller(config: &AppConfig, output: Option<PathBuf>) -> AppController {
    let options = ControllerOptions {
        enable_cue: config.cue_or_default(),
        enable_notify: config.notify_or_default(),
    };

    SessionController::new(
        CpalPermissionProbe::new(),
        PulseMicrophoneSource::new(),
        DisplayGrabSource::new(
            config.screen().map(String::from),
            config.audio_source().map(String::from),
        ),
        FfmpegEncoderFactory::new(),
        DownloadsSink::from_config(output.or_else(|| config.output_dir())),
        RodioAudioCue::new(),
        NotifyRustNotifier::new(),
        options,
    )
    .with_events(console_events())
}

fn console_events() -> ControllerEvents {
    ControllerEvents {
        on_checklist: Some(Box::new(|index, completed| {
            if completed {
                ConsolePanel::milestone_done(index);
            }
        })),
        on_journal: Some(Box::new(ConsolePanel::print_entry)),
        on_recording_change: None,
    }
}

/// Record one bounded test session and save it.
///
/// Runs the startup probe, starts the kind, shows progress until the
/// duration elapses (or Ctrl+C), then stops and reports the checklist.
pub async fn run_oneshot(
    controller: &AppController,
    kind: CaptureKind,
    duration: Duration,
) -> ExitCode {
    let mut panel = ConsolePanel::new();

    controller.probe_permissions().await;

    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    if controller.start(kind).await.is_err() {
        // The failure is already in the journal output
        return ExitCode::from(EXIT_ERROR);
    }

    let total_ms = duration.as_millis();
    let started = Instant::now();
    panel.show_recording_progress(&format!("Recording {}...", kind));

    loop {
        sleep(TokioDuration::from_millis(100)).await;
        let elapsed = started.elapsed().as_millis() as u64;
        if elapsed >= total_ms || shutdown.is_shutdown() {
            break;
        }
        panel.update_recording_progress(elapsed, total_ms);
    }
    panel.stop_spinner();

    let saved = controller.stop(kind).await;
    panel.checklist(&controller.checklist());

    for path in &saved {
        panel.output(&path.display().to_string());
    }

    if saved.is_empty() {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
