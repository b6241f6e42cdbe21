use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::helpers::{clamp_scroll, panel};
use crate::quran::Playback;
use crate::state::AppState;

/// What: Render the Quran reader with its audio bar.
///
/// Details:
/// - The ayah under the recitation cursor is highlighted while audio is active.
/// - The scroll offset is clamped to the rendered lines.
pub fn render_quran(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = app.theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let title = app.quran.current_summary().map_or_else(
        || format!("سورة {}", app.quran.current),
        |s| {
            format!(
                "{}. {} ({}) · {} آية",
                s.number, s.name, s.english_name, s.number_of_ayahs
            )
        },
    );

    let mut lines: Vec<Line> = Vec::new();
    if app.quran.loading || app.quran.text.is_none() {
        lines.push(Line::from(Span::styled(
            "جاري تحميل السورة…",
            Style::default().fg(th.subtext),
        )));
    }
    if let Some(text) = &app.quran.text {
        let active = app.quran.queue.playback() != Playback::Stopped;
        for (i, ayah) in text.ayahs.iter().enumerate() {
            let style = if active && i == app.quran.queue.index() {
                Style::default().fg(th.highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(th.text)
            };
            lines.push(Line::from(Span::styled(
                format!("{} ﴿{}﴾", ayah.text, ayah.number),
                style,
            )));
            if let Some(tr) = &ayah.translation {
                lines.push(Line::from(Span::styled(tr.clone(), Style::default().fg(th.subtext))));
            }
            lines.push(Line::default());
        }
    }
    let scroll = clamp_scroll(&mut app.quran.scroll, lines.len());
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(panel(title, &th));
    f.render_widget(body, rows[0]);

    let state = match app.quran.queue.playback() {
        Playback::Playing => Span::styled("▶ ", Style::default().fg(th.green)),
        Playback::Paused => Span::styled("⏸ ", Style::default().fg(th.yellow)),
        Playback::Stopped => Span::styled("■ ", Style::default().fg(th.subtext)),
    };
    let player = if app.player.is_available() {
        Span::raw("")
    } else {
        Span::styled("  (لا يوجد مشغل صوت)", Style::default().fg(th.red))
    };
    let bar = Paragraph::new(Line::from(vec![
        state,
        Span::styled(app.quran.audio_label(), Style::default().fg(th.text)),
        player,
    ]))
    .block(panel(format!("الترجمة: {}", app.quran.translation), &th));
    f.render_widget(bar, rows[1]);
}
