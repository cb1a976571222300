use super::app_logic::PickerApp;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

/// Blocks until the next terminal event and feeds key presses to the app.
/// Resizes and other events just fall through to a redraw.
pub(super) fn handle_events(app: &mut PickerApp) -> Result<()> {
    if let Event::Key(key_event) = event::read()? {
        if key_event.kind == KeyEventKind::Press {
            app.handle_key(key_event);
        }
    }
    Ok(())
}
