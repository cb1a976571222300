use crate::tree::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Navigate,
    Search,
}

/// What the cursor is on. Identity, not position: the row list changes
/// shape with every filter edit or fold, the focused node does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    SelectAll,
    Node(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Running,
    Submitted,
    Cancelled,
}

/// One line of the picker: the synthetic "Select All" entry or a tree row.
#[derive(Debug, Clone)]
pub enum ViewItem<'a> {
    SelectAll,
    Row(Row<'a>),
}

impl ViewItem<'_> {
    pub fn focus(&self) -> Focus {
        match self {
            ViewItem::SelectAll => Focus::SelectAll,
            ViewItem::Row(row) => Focus::Node(row.rel_path().to_string()),
        }
    }

    pub fn is_focused_by(&self, focus: &Focus) -> bool {
        match (self, focus) {
            (ViewItem::SelectAll, Focus::SelectAll) => true,
            (ViewItem::Row(row), Focus::Node(rel_path)) => row.rel_path() == rel_path,
            _ => false,
        }
    }
}
