use scansheet::error::{Result, SheetError};
use std::env;
use std::path::Path;
use std::process::{Command, Stdio};

/// Overrides the platform opener, e.g. `SCANSHEET_VIEWER=evince`.
const VIEWER_ENV: &str = "SCANSHEET_VIEWER";

/// Hands `path` to a PDF viewer without waiting for it to exit.
pub(super) fn open_in_viewer(path: &Path) -> Result<()> {
    let mut command = viewer_command(path);
    let program = command.get_program().to_string_lossy().into_owned();

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| SheetError::Viewer(format!("Failed to launch '{}': {}", program, e)))?;

    tracing::debug!(viewer = %program, path = %path.display(), "opened sheet");
    Ok(())
}

fn viewer_command(path: &Path) -> Command {
    if let Ok(viewer) = env::var(VIEWER_ENV) {
        if !viewer.trim().is_empty() {
            let mut command = Command::new(viewer.trim());
            command.arg(path);
            return command;
        }
    }
    platform_command(path)
}

#[cfg(target_os = "macos")]
fn platform_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn platform_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
