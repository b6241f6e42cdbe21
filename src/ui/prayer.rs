use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
};

use super::helpers::panel;
use crate::prayer::countdown::CountdownState;
use crate::prayer::format_time_12h;
use crate::state::AppState;

/// What: Render the prayer-times tab.
///
/// Details:
/// - Left: the six daily times with the next boundary highlighted.
/// - Right: countdown to the next boundary and the Hijri/Gregorian date.
pub fn render_prayer(f: &mut Frame, app: &AppState, area: Rect) {
    let th = app.theme();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let next = app.prayer.next().map(|n| n.name);
    let items: Vec<ListItem> = match app.prayer.schedule() {
        Some(schedule) => schedule
            .iter()
            .map(|(name, t)| {
                let is_next = Some(name) == next;
                let style = if is_next {
                    Style::default()
                        .fg(th.highlight)
                        .bg(th.surface)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(th.text)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(if is_next { "▶ " } else { "  " }, style),
                    Span::styled(format!("{:<8}", name.arabic()), style),
                    Span::styled(format_time_12h(t), style),
                ]))
            })
            .collect(),
        None => vec![ListItem::new(Span::styled(
            "جاري تحميل المواقيت…",
            Style::default().fg(th.subtext),
        ))],
    };
    f.render_widget(List::new(items).block(panel("المواقيت", &th)), cols[0]);

    let title = next.map_or_else(
        || "الصلاة القادمة".to_string(),
        |n| format!("الصلاة القادمة: {}", n.arabic()),
    );
    let countdown_style = match app.prayer.countdown_state() {
        CountdownState::Counting => Style::default().fg(th.highlight).add_modifier(Modifier::BOLD),
        CountdownState::Expired => Style::default().fg(th.yellow),
        CountdownState::Idle => Style::default().fg(th.subtext),
    };
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(app.prayer.countdown_display(), countdown_style)),
        Line::default(),
    ];
    if let Some(day) = app.prayer.calendar() {
        lines.push(Line::from(Span::styled(day.hijri.clone(), Style::default().fg(th.accent))));
        lines.push(Line::from(Span::styled(
            day.gregorian.clone(),
            Style::default().fg(th.subtext),
        )));
    }
    let right = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel(title, &th));
    f.render_widget(right, cols[1]);
}
