use super::app_state::{Focus, Mode, Status, ViewItem};
use crate::tree::{Tree, filter_rows, flatten, flatten_all};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fold {
    Toggle,
    Expand,
    Collapse,
}

/// Picker state: the tree being edited plus everything needed to route keys.
///
/// The visible rows are never stored; [`PickerApp::view`] derives them from
/// the tree and the current query whenever they are needed. The cursor is an
/// identity and may point at a node the current view does not show; it comes
/// back into view as soon as the filter lets it.
pub struct PickerApp {
    tree: Tree,
    mode: Mode,
    query: String,
    cursor: Option<Focus>,
    status: Status,
    pub(super) scroll_offset: usize,
    pub(super) list_viewport_height: usize,
}

impl PickerApp {
    pub fn new(tree: Tree) -> Self {
        let mut app = PickerApp {
            tree,
            mode: Mode::Navigate,
            query: String::new(),
            cursor: None,
            status: Status::Running,
            scroll_offset: 0,
            list_viewport_height: 0, // Will be updated by ui_renderer
        };
        let first = app.view().first().map(ViewItem::focus);
        app.cursor = first;
        app
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> Option<&Focus> {
        self.cursor.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Rows currently on screen, in order. The "Select All" entry leads the
    /// list in Navigate mode only. Search looks inside collapsed directories.
    pub fn view(&self) -> Vec<ViewItem<'_>> {
        let mut items = Vec::with_capacity(self.tree.len() + 1);
        match self.mode {
            Mode::Navigate => {
                items.push(ViewItem::SelectAll);
                items.extend(flatten(&self.tree).into_iter().map(ViewItem::Row));
            }
            Mode::Search => {
                let rows = filter_rows(flatten_all(&self.tree), &self.query);
                items.extend(rows.into_iter().map(ViewItem::Row));
            }
        }
        items
    }

    pub fn cursor_position(&self, view: &[ViewItem<'_>]) -> Option<usize> {
        let focus = self.cursor.as_ref()?;
        view.iter().position(|item| item.is_focused_by(focus))
    }

    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if self.status != Status::Running {
            return;
        }
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            debug!("interrupt, leaving without submitting");
            self.status = Status::Cancelled;
            return;
        }
        match self.mode {
            Mode::Navigate => self.handle_navigate_mode_input(key_event),
            Mode::Search => self.handle_search_mode_input(key_event),
        }
    }

    fn handle_navigate_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Home => self.move_to_edge(false),
            KeyCode::End => self.move_to_edge(true),
            KeyCode::Char(' ') | KeyCode::Tab => self.toggle_focused(),
            KeyCode::Char('a') => {
                self.tree.toggle_select_all();
            }
            KeyCode::Char('o') => self.fold(Fold::Toggle),
            KeyCode::Right => self.fold(Fold::Expand),
            KeyCode::Left => self.fold(Fold::Collapse),
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.query.clear();
            }
            KeyCode::Enter => self.status = Status::Submitted,
            KeyCode::Esc | KeyCode::Char('q') => self.status = Status::Cancelled,
            _ => {}
        }
    }

    // Letters are query text here, so only non-printable keys keep a command.
    fn handle_search_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => self.leave_search(),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Home => self.move_to_edge(false),
            KeyCode::End => self.move_to_edge(true),
            KeyCode::Tab => self.toggle_focused(),
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Char(c)
                if !key_event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.query.push(c);
            }
            KeyCode::Enter => debug!("finish ignored while searching"),
            _ => {}
        }
    }

    /// Moves to the adjacent row of the current view, clamped at both ends.
    /// A cursor that is not in the view lands on the first row.
    fn move_cursor(&mut self, delta: isize) {
        let next = {
            let view = self.view();
            if view.is_empty() {
                return;
            }
            let target = match self.cursor_position(&view) {
                Some(pos) => pos.saturating_add_signed(delta).min(view.len() - 1),
                None => 0,
            };
            view[target].focus()
        };
        self.cursor = Some(next);
    }

    fn move_to_edge(&mut self, last: bool) {
        let next = {
            let view = self.view();
            let item = if last { view.last() } else { view.first() };
            item.map(ViewItem::focus)
        };
        if next.is_some() {
            self.cursor = next;
        }
    }

    // A hit from search may sit under a folded directory; unfold the way to it.
    fn leave_search(&mut self) {
        self.mode = Mode::Navigate;
        self.query.clear();
        if let Some(Focus::Node(rel_path)) = &self.cursor {
            if let Err(err) = self.tree.reveal(rel_path) {
                debug!(%err, "reveal ignored");
            }
        }
    }

    /// The cursor, but only while its row is part of the current view.
    fn focus_in_view(&self) -> Option<Focus> {
        let view = self.view();
        self.cursor_position(&view).map(|pos| view[pos].focus())
    }

    fn toggle_focused(&mut self) {
        match self.focus_in_view() {
            Some(Focus::SelectAll) => {
                self.tree.toggle_select_all();
            }
            Some(Focus::Node(rel_path)) => {
                if let Err(err) = self.tree.toggle(&rel_path) {
                    debug!(%err, "toggle ignored");
                }
            }
            None => {}
        }
    }

    fn fold(&mut self, action: Fold) {
        let Some(Focus::Node(rel_path)) = self.focus_in_view() else {
            return;
        };
        let Some(node) = self.tree.get(&rel_path) else {
            debug!(rel_path = rel_path.as_str(), "fold ignored for unknown node");
            return;
        };
        let collapsible = node.is_dir() && node.is_expanded();
        let parent = node
            .parent()
            .map(|id| self.tree.node(id).rel_path().to_string());

        let result = match action {
            Fold::Toggle => self.tree.toggle_expanded(&rel_path).map(|_| ()),
            Fold::Expand => self.tree.set_expanded(&rel_path, true),
            Fold::Collapse if collapsible => self.tree.set_expanded(&rel_path, false),
            Fold::Collapse => {
                if let Some(parent) = parent {
                    self.cursor = Some(Focus::Node(parent));
                }
                Ok(())
            }
        };
        if let Err(err) = result {
            debug!(%err, "fold ignored");
        }
    }

    pub(super) fn ensure_cursor_is_visible_in_viewport(
        &mut self,
        cursor_position: Option<usize>,
        num_visible_items: usize,
    ) {
        let list_height = self.list_viewport_height;
        if list_height == 0 || num_visible_items <= list_height {
            self.scroll_offset = 0;
            return;
        }
        if let Some(pos) = cursor_position {
            if pos < self.scroll_offset {
                self.scroll_offset = pos;
            } else if pos >= self.scroll_offset + list_height {
                self.scroll_offset = pos + 1 - list_height;
            }
        }
        self.scroll_offset = self.scroll_offset.min(num_visible_items - list_height);
    }
}
