//! Interactive mode: start/stop commands on stdin

use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::domain::capture::CaptureKind;

use super::app::{AppController, EXIT_SUCCESS};
use super::panel::ConsolePanel;

const HELP: &str =
    "Commands: mic, stop-mic, system, stop-system, checklist, help, quit";

/// Run the interactive command loop.
///
/// Each command maps to one of the four recording controls; `checklist`
/// re-renders the milestone list. Ctrl+C or EOF leaves the loop, and
/// any session still running is stopped (and saved) on the way out.
pub async fn run_interactive(controller: &AppController) -> ExitCode {
    let panel = ConsolePanel::new();

    panel.info("Interactive mode.");
    panel.info(HELP);

    controller.probe_permissions().await;
    panel.checklist(&controller.checklist());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(command)) => {
                        if !handle_command(controller, &panel, command.trim()).await {
                            break;
                        }
                    }
                    // EOF or an unreadable stdin both end the loop
                    Ok(None) => break,
                    Err(e) => {
                        panel.error(&format!("Failed to read input: {}", e));
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // Release any capture still running; stop is a no-op otherwise
    controller.stop(CaptureKind::Microphone).await;
    controller.stop(CaptureKind::System).await;

    ExitCode::from(EXIT_SUCCESS)
}

/// Dispatch one command; returns false when the loop should end
async fn handle_command(controller: &AppController, panel: &ConsolePanel, command: &str) -> bool {
    match command {
        "mic" => {
            let _ = controller.start(CaptureKind::Microphone).await;
        }
        "stop-mic" => {
            controller.stop(CaptureKind::Microphone).await;
        }
        "system" => {
            let _ = controller.start(CaptureKind::System).await;
        }
        "stop-system" => {
            controller.stop(CaptureKind::System).await;
        }
        "checklist" => panel.checklist(&controller.checklist()),
        "help" => panel.info(HELP),
        "quit" | "exit" | "q" => return false,
        "" => {}
        other => panel.warn(&format!("Unknown command: {}", other)),
    }
    true
}
