use crate::error::{PickError, PickResult};
use anyhow::Result;
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;

/// Hidden argument that turns the process into a clipboard holder.
pub const DAEMON_FLAG: &str = "__treeyank_clipboard_daemon";

// On X11/Wayland the clipboard contents vanish with the process that owns
// them, so a detached copy of ourselves keeps serving the text until another
// program takes the selection over.
#[cfg(target_os = "linux")]
fn run_daemon_mode() -> Result<()> {
    let text = std::io::read_to_string(std::io::stdin())?;

    let mut clipboard = Clipboard::new()?;
    clipboard.set().wait().text(text)?;
    Ok(())
}

/// Checks if the DAEMON_FLAG is present in args. If so, runs in daemon mode.
/// Returns Ok(true) if daemon mode was run, Ok(false) otherwise.
pub fn check_and_run_daemon_if_requested() -> Result<bool> {
    if !std::env::args().any(|a| a == DAEMON_FLAG) {
        return Ok(false);
    }
    #[cfg(target_os = "linux")]
    {
        run_daemon_mode()?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        eprintln!(
            "Warning: {} flag used on non-Linux system. Ignoring.",
            DAEMON_FLAG
        );
    }
    Ok(true)
}

/// Hands `text` to the system clipboard. Called once per run and never retried.
pub fn copy_text_to_clipboard(text: String) -> PickResult<()> {
    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = Clipboard::new().map_err(delivery_error)?;
        clipboard.set_text(text).map_err(delivery_error)?;
    }

    #[cfg(target_os = "linux")]
    {
        use std::io::Write;
        use std::process::{Command, Stdio};

        let exe = std::env::current_exe().map_err(delivery_error)?;
        let mut child = Command::new(exe)
            .arg(DAEMON_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()
            .map_err(delivery_error)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| PickError::ClipboardDelivery("no stdin for clipboard daemon".into()))?;
        stdin.write_all(text.as_bytes()).map_err(delivery_error)?;
        stdin.flush().map_err(delivery_error)?;
    }
    Ok(())
}

fn delivery_error(err: impl std::fmt::Display) -> PickError {
    PickError::ClipboardDelivery(err.to_string())
}
