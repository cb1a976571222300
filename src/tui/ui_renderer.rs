use super::app_logic::PickerApp;
use super::app_state::{Mode, ViewItem};
use crate::tree::{Row, SearchFilter, Tree};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::collections::HashSet;

fn draw_help_block(f: &mut Frame, app: &PickerApp, area: Rect) {
    let help_text_lines_content = match app.mode() {
        Mode::Navigate => vec![
            Line::from("↑↓/jk: Move | Space/Tab: Toggle | a: All | o/←/→: Fold"),
            Line::from("/: Search | Enter: Copy selection | q/Esc: Quit"),
        ],
        Mode::Search => vec![
            Line::from("Type to filter | ↑↓: Move | Tab: Toggle"),
            Line::from("Esc: Back to tree (clears search) | Ctrl+C: Quit"),
        ],
    };
    let help_paragraph = Paragraph::new(help_text_lines_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("treeyank"),
    );
    f.render_widget(help_paragraph, area);
}

fn draw_search_input_block(f: &mut Frame, app: &PickerApp, area: Rect) {
    let input_text = format!("/{}", app.query());
    let search_paragraph = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Search"))
        .wrap(Wrap { trim: false });
    f.render_widget(search_paragraph, area);
    f.set_cursor_position(search_cursor_position(area, app.query()));
}

// One cell past the typed text, after the border and the leading `/`,
// pinned to the last cell inside the border when the query runs long.
fn search_cursor_position(area: Rect, query: &str) -> (u16, u16) {
    let typed = u16::try_from(query.chars().count()).unwrap_or(u16::MAX);
    let inner_right = area.right().saturating_sub(2).max(area.x);
    let x = area.x.saturating_add(2).saturating_add(typed).min(inner_right);
    (x, area.y.saturating_add(1))
}

fn checkbox(tree: &Tree, row: &Row<'_>) -> &'static str {
    if row.node.is_selected() {
        "[x] "
    } else if tree.is_partially_selected(row.node) {
        "[-] "
    } else {
        "[ ] "
    }
}

fn tree_line(tree: &Tree, row: &Row<'_>) -> Line<'static> {
    let fold_marker = match (row.node.is_dir(), row.node.is_expanded()) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        (false, _) => "",
    };
    let label_style = if row.node.is_dir() {
        Style::default().fg(Color::Blue)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(row.connector(), Style::default().fg(Color::DarkGray)),
        Span::raw(checkbox(tree, row)),
        Span::raw(fold_marker),
        Span::styled(row.label(), label_style),
    ])
}

/// Search rows show the whole path with the matched characters picked out.
fn search_line(tree: &Tree, row: &Row<'_>, filter: &mut SearchFilter) -> Line<'static> {
    let indices = filter.match_indices(&row.path);
    let mut spans = vec![Span::raw(checkbox(tree, row))];
    spans.extend(highlighted_spans(&row.path, &indices));
    Line::from(spans)
}

fn highlighted_spans(text: &str, match_indices: &[usize]) -> Vec<Span<'static>> {
    let plain = Style::default();
    let matched = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    if match_indices.is_empty() {
        return vec![Span::styled(text.to_string(), plain)];
    }

    let match_set: HashSet<usize> = match_indices.iter().copied().collect();
    let mut spans = Vec::new();
    let mut current_span = String::new();
    let mut current_is_match = false;

    for (byte_idx, ch) in text.char_indices() {
        let is_match = match_set.contains(&byte_idx);
        if is_match != current_is_match && !current_span.is_empty() {
            let style = if current_is_match { matched } else { plain };
            spans.push(Span::styled(std::mem::take(&mut current_span), style));
        }
        current_span.push(ch);
        current_is_match = is_match;
    }
    if !current_span.is_empty() {
        let style = if current_is_match { matched } else { plain };
        spans.push(Span::styled(current_span, style));
    }
    spans
}

fn draw_main_list_block(f: &mut Frame, app: &mut PickerApp, area: Rect) {
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    let (cursor_position, num_visible_items) = {
        let view = app.view();
        (app.cursor_position(&view), view.len())
    };
    app.ensure_cursor_is_visible_in_viewport(cursor_position, num_visible_items);

    let app: &PickerApp = app;
    let tree = app.tree();
    let view = app.view();
    let window_end = (app.scroll_offset + app.list_viewport_height).min(num_visible_items);
    let mut filter = SearchFilter::new(app.query());

    let list_items: Vec<ListItem> = view
        .get(app.scroll_offset..window_end)
        .unwrap_or(&[])
        .iter()
        .map(|item| match item {
            ViewItem::SelectAll => {
                let mark = if tree.is_fully_selected() { "[x] " } else { "[ ] " };
                ListItem::new(Line::from(vec![
                    Span::raw(mark),
                    Span::styled("Select All", Style::default().add_modifier(Modifier::ITALIC)),
                ]))
            }
            ViewItem::Row(row) if app.mode() == Mode::Search => {
                ListItem::new(search_line(tree, row, &mut filter))
            }
            ViewItem::Row(row) => ListItem::new(tree_line(tree, row)),
        })
        .collect();

    let selected_count = tree.selected_files().len();
    let list_title = match app.mode() {
        Mode::Search => format!(
            "Matches: {} | {} selected",
            num_visible_items, selected_count
        ),
        Mode::Navigate => format!("Select files ({} selected)", selected_count),
    };

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state_for_view = ListState::default();
    if let Some(pos) = cursor_position {
        if pos >= app.scroll_offset && pos < window_end {
            list_state_for_view.select(Some(pos - app.scroll_offset));
        }
    }
    f.render_stateful_widget(list_widget, area, &mut list_state_for_view);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut PickerApp) {
    let help_lines = 2;
    let search_input_height = if app.mode() == Mode::Search { 3 } else { 0 };
    let top_block_container_height = (help_lines + 2) + search_input_height;

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(top_block_container_height),
            Constraint::Min(0),
        ])
        .split(frame.area());

    let top_container_area = main_chunks[0];
    let list_area = main_chunks[1];

    let top_content_constraints = if app.mode() == Mode::Search {
        vec![
            Constraint::Length(help_lines + 2),
            Constraint::Length(search_input_height),
        ]
    } else {
        vec![Constraint::Length(help_lines + 2)]
    };
    let top_content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(top_content_constraints)
        .split(top_container_area);

    draw_help_block(frame, app, top_content_chunks[0]);
    if app.mode() == Mode::Search {
        draw_search_input_block(frame, app, top_content_chunks[1]);
    }

    draw_main_list_block(frame, app, list_area);
}
