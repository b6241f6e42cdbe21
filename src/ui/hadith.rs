use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::helpers::{clamp_scroll, panel};
use crate::hadith::EMPTY_PAGE;
use crate::state::AppState;

/// Render the current hadith page.
pub fn render_hadith(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = app.theme();
    let hadith = &mut app.hadith;
    let name = hadith
        .page
        .as_ref()
        .filter(|p| p.book_id == hadith.book_id)
        .map_or_else(|| hadith.book_id.clone(), |p| p.book_name.clone());
    let title = format!("{name} · {}", hadith.range);

    let mut lines: Vec<Line> = Vec::new();
    if hadith.loading {
        lines.push(Line::from(Span::styled(
            "جاري التحميل…",
            Style::default().fg(th.subtext),
        )));
    } else {
        match &hadith.page {
            Some(page) if page.hadiths.is_empty() => {
                lines.push(Line::from(Span::styled(EMPTY_PAGE, Style::default().fg(th.subtext))));
            }
            Some(page) => {
                for h in &page.hadiths {
                    lines.push(Line::from(Span::styled(
                        format!("#{}", h.number),
                        Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
                    )));
                    lines.push(Line::from(Span::styled(h.arab.clone(), Style::default().fg(th.text))));
                    lines.push(Line::default());
                }
            }
            None => lines.push(Line::from(Span::styled(EMPTY_PAGE, Style::default().fg(th.subtext)))),
        }
    }
    let scroll = clamp_scroll(&mut hadith.scroll, lines.len());
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(panel(title, &th));
    f.render_widget(body, area);
}
