use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::helpers::{clamp_scroll, panel};
use crate::content::adhkar;
use crate::state::AppState;

/// Render the static adhkar groups as one scrollable column.
pub fn render_adhkar(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = app.theme();
    let mut lines: Vec<Line> = Vec::new();
    for group in adhkar::groups() {
        lines.push(Line::from(Span::styled(
            group.title,
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        )));
        for item in group.items {
            lines.push(Line::from(Span::styled(format!("• {item}"), Style::default().fg(th.text))));
        }
        lines.push(Line::default());
    }
    let scroll = clamp_scroll(&mut app.adhkar_scroll, lines.len());
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(panel("الأذكار", &th));
    f.render_widget(body, area);
}
