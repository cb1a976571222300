mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

pub use app_logic::PickerApp;
pub use app_state::{Focus, Mode, Status, ViewItem};

pub use self::run_tui::run_tui;

mod run_tui {
    use super::app_logic::PickerApp;
    use super::app_state::Status;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::tree::Tree;
    use anyhow::{Context, Result};
    use crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};
    use std::panic;
    use tracing::{debug, info};

    /// Runs the picker over `tree` until the user finishes or leaves.
    ///
    /// Returns the edited tree on finish and `None` on cancel. The terminal
    /// is restored on every exit path, panics included.
    pub fn run_tui(tree: Tree) -> Result<Option<Tree>> {
        let mut app = PickerApp::new(tree);

        install_panic_hook();
        let mut terminal = init_terminal()?;
        let loop_result = event_loop(&mut terminal, &mut app);
        let restore_result = restore_terminal(&mut terminal);
        loop_result?;
        restore_result?;

        match app.status() {
            Status::Submitted => {
                info!(
                    selected = app.tree().selected_files().len(),
                    "selection submitted"
                );
                Ok(Some(app.into_tree()))
            }
            status => {
                debug!(?status, "picker closed without submitting");
                Ok(None)
            }
        }
    }

    fn event_loop(
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        app: &mut PickerApp,
    ) -> Result<()> {
        while app.status() == Status::Running {
            terminal.draw(|frame| ui_frame(frame, app))?;
            handle_events(app)?;
        }
        Ok(())
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor().map_err(Into::into)
    }

    fn install_panic_hook() {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));
    }
}
