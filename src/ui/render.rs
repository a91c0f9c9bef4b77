//! UI renderer implementation.
//!
//! [build_lines] is a pure function from session state to styled lines; [render] draws those
//! lines and places the terminal cursor in the search box. Nothing here owns gotry logic.

use crate::app::{Mode, Session};
use crate::config::{Config, Keys, Theme};
use crate::core::{WorkspaceEntry, format_age, gap_to_column, truncate_to_width};

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use std::time::SystemTime;

/// Column at which the age of each entry starts.
pub const AGE_COLUMN: usize = 40;
/// Minimum number of spaces between a name and its age.
pub const MIN_AGE_GAP: usize = 2;

pub const TITLE: &str = "gotry";
pub const SEARCH_PROMPT: &str = "Search: ";

// title, search box, blank
const HEADER_ROWS: usize = 3;
// blank, hints
const FOOTER_ROWS: usize = 2;
const INDENT: &str = "  ";
const SEPARATOR: &str = " · ";

/// Render function which draws the whole picker for the current frame.
pub fn render(frame: &mut Frame, session: &Session, config: &Config) {
    let area = frame.area();
    let lines = build_lines(session, config, SystemTime::now(), area);
    frame.render_widget(Paragraph::new(lines), area);

    if session.mode() == Mode::Normal && area.height > 1 {
        let x = SEARCH_PROMPT.width() + session.search().cursor_column();
        let x = (area.x as usize + x).min(area.right().saturating_sub(1) as usize);
        frame.set_cursor_position(Position::new(x as u16, area.y + 1));
    }
}

/// Builds every line of a frame for `area`.
///
/// The list is windowed so the cursor row is always visible. Ages are computed against `now`.
pub fn build_lines(
    session: &Session,
    config: &Config,
    now: SystemTime,
    area: Rect,
) -> Vec<Line<'static>> {
    let theme = config.theme();
    let mut lines = Vec::with_capacity(area.height as usize);

    lines.push(Line::from(Span::styled(TITLE, theme.title_style())));
    lines.push(Line::from(vec![
        Span::styled(SEARCH_PROMPT, theme.prompt_style()),
        Span::styled(session.query().to_string(), theme.input_style()),
    ]));
    lines.push(Line::default());

    let visible = session.visible();
    if visible.is_empty() {
        lines.push(empty_line(session, theme));
    } else {
        let notice_rows = usize::from(session.notice().is_some());
        let rows = (area.height as usize)
            .saturating_sub(HEADER_ROWS + FOOTER_ROWS + notice_rows)
            .max(1);
        let offset = list_offset(session.cursor(), rows, visible.len());

        for (idx, entry) in visible.iter().enumerate().skip(offset).take(rows) {
            lines.push(entry_line(session, theme, idx, entry, now, area.width as usize));
        }
    }

    lines.push(Line::default());
    lines.push(footer_line(session, theme, config.keys()));
    if let Some(notice) = session.notice() {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            theme.danger_style(),
        )));
    }
    lines
}

/// First visible list index so that `cursor` stays inside a window of `rows`.
pub fn list_offset(cursor: usize, rows: usize, len: usize) -> usize {
    if rows == 0 || len <= rows {
        return 0;
    }
    cursor.saturating_sub(rows - 1).min(len - rows)
}

fn empty_line(session: &Session, theme: &Theme) -> Line<'static> {
    if !session.is_loaded() {
        return Line::from(Span::styled(
            format!("{INDENT}Loading…"),
            theme.dim_style(),
        ));
    }
    if session.query().is_empty() {
        return Line::from(Span::styled(
            format!("{INDENT}No experiments yet. Type a name to create one."),
            theme.dim_style(),
        ));
    }
    Line::from(vec![
        Span::styled(
            format!("{INDENT}No matches. Press enter to create: "),
            theme.dim_style(),
        ),
        Span::styled(session.query().to_string(), theme.entry_style()),
    ])
}

fn entry_line(
    session: &Session,
    theme: &Theme,
    idx: usize,
    entry: &WorkspaceEntry,
    now: SystemTime,
    width: usize,
) -> Line<'static> {
    let is_cursor = idx == session.cursor();
    let is_marked = session.mode() != Mode::Normal && session.is_marked(idx);
    let mut spans = Vec::with_capacity(6);

    let marker = format!(" {} ", theme.cursor_icon());
    if is_cursor {
        spans.push(Span::styled(marker, theme.selection_style()));
    } else {
        spans.push(Span::raw(" ".repeat(marker.width())));
    }

    let icon = if is_marked {
        Span::styled(format!("{} ", theme.marked_icon()), theme.danger_style())
    } else {
        Span::raw(format!("{} ", theme.dir_icon()))
    };
    let used = spans[0].width() + icon.width();
    spans.push(icon);

    let age = format_age(entry.modified(), now);
    let room = width.saturating_sub(used + MIN_AGE_GAP + age.width());
    let name = truncate_to_width(entry.name(), room);

    let label_style = if is_marked {
        theme.marked_style()
    } else if is_cursor {
        theme.selection_style()
    } else {
        theme.entry_style()
    };
    if is_marked {
        spans.push(Span::styled(name.clone(), label_style));
    } else {
        spans.extend(name_spans(entry, &name, theme.dim_style(), label_style));
    }

    let fits = width.saturating_sub(used + name.width() + age.width());
    let gap = gap_to_column(&name, AGE_COLUMN, MIN_AGE_GAP)
        .min(fits)
        .max(MIN_AGE_GAP);
    spans.push(Span::raw(" ".repeat(gap)));
    spans.push(Span::styled(age, theme.dim_style()));
    Line::from(spans)
}

/// Splits a (possibly truncated) name into a dimmed `YYYY-MM-DD-` part and the label.
fn name_spans(
    entry: &WorkspaceEntry,
    shown: &str,
    dim: Style,
    label: Style,
) -> Vec<Span<'static>> {
    let Some(prefix) = entry.date_prefix() else {
        return vec![Span::styled(shown.to_string(), label)];
    };
    // date plus its trailing hyphen
    let split = prefix.len() + 1;
    if shown.len() <= split || !shown.is_char_boundary(split) {
        return vec![Span::styled(shown.to_string(), dim)];
    }
    vec![
        Span::styled(shown[..split].to_string(), dim),
        Span::styled(shown[split..].to_string(), label),
    ]
}

fn footer_line(session: &Session, theme: &Theme, keys: &Keys) -> Line<'static> {
    let key_name = |bindings: &[String], fallback: &'static str| -> String {
        bindings
            .first()
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };

    match session.mode() {
        Mode::Normal => hints(
            theme,
            &[
                (key_name(keys.select(), "enter"), "select".to_string()),
                (key_name(keys.delete(), "ctrl+d"), "delete".to_string()),
                (key_name(keys.cancel(), "esc"), "quit".to_string()),
            ],
        ),
        Mode::Delete => {
            let toggle = key_name(keys.toggle_mark(), "space");
            let cancel = (key_name(keys.cancel(), "esc"), "cancel".to_string());
            let count = session.marked().len();
            if count > 0 {
                hints(
                    theme,
                    &[
                        (toggle, "toggle mark".to_string()),
                        (key_name(keys.select(), "enter"), format!("delete {count}")),
                        cancel,
                    ],
                )
            } else {
                hints(theme, &[(toggle, "mark for deletion".to_string()), cancel])
            }
        }
        Mode::Confirm => Line::from(vec![
            Span::styled("⚠️", theme.danger_style()),
            Span::raw(" Type "),
            Span::styled(crate::app::CONFIRM_TOKEN, theme.danger_style()),
            Span::raw(format!(
                " to confirm deletion ({} items): ",
                session.marked().len()
            )),
            Span::styled(session.confirm_text().to_string(), theme.input_style()),
        ]),
    }
}

fn hints(theme: &Theme, pairs: &[(String, String)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 4);
    for (i, (key, desc)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, theme.hint_desc_style()));
        }
        spans.push(Span::styled(key.clone(), theme.hint_key_style()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(desc.clone(), theme.hint_desc_style()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_cursor_visible() {
        assert_eq!(list_offset(0, 5, 3), 0);
        assert_eq!(list_offset(4, 5, 20), 0);
        assert_eq!(list_offset(5, 5, 20), 1);
        assert_eq!(list_offset(19, 5, 20), 15);
        assert_eq!(list_offset(19, 0, 20), 0);
    }
}
