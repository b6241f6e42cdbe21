//! Frame rendering for the Noor TUI.
//!
//! The UI reads [`AppState`]; the only writes are scroll offsets clamped to the
//! content that was actually laid out.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};

use crate::state::{AppState, Tab};
use crate::util::ellipsize;

mod adhkar;
mod hadith;
pub mod helpers;
mod modals;
mod prayer;
mod qibla;
mod quran;

/// What: Draw one frame.
///
/// Details:
/// - Layout: tab bar with the location label, the active tab's view, and a one-line
///   status bar. Modals are drawn last on top.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = app.theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
        .collect();
    let label = ellipsize(app.location.label(), 48);
    let place = if app.locating { format!("{label} …") } else { label };
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(th.subtext).bg(th.base))
        .highlight_style(
            Style::default()
                .fg(th.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled("│", Style::default().fg(th.overlay)))
        .block(
            Block::default()
                .title(Span::styled(" نور ", Style::default().fg(th.accent)))
                .title_bottom(Line::from(Span::styled(place, Style::default().fg(th.subtext))).right_aligned())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.overlay)),
        );
    f.render_widget(tabs, chunks[0]);

    match app.tab {
        Tab::Prayer => prayer::render_prayer(f, app, chunks[1]),
        Tab::Qibla => qibla::render_qibla(f, app, chunks[1]),
        Tab::Quran => quran::render_quran(f, app, chunks[1]),
        Tab::Adhkar => adhkar::render_adhkar(f, app, chunks[1]),
        Tab::Hadith => hadith::render_hadith(f, app, chunks[1]),
    }

    let status = app.status.clone().unwrap_or_else(|| key_hint(app.tab).to_string());
    let status_style = if app.status.is_some() {
        Style::default().fg(th.yellow).bg(th.mantle)
    } else {
        Style::default().fg(th.subtext).bg(th.mantle)
    };
    f.render_widget(Paragraph::new(status).style(status_style), chunks[2]);

    modals::render_modals(f, app, area);
}

/// Short key reference for the status bar of `tab`.
const fn key_hint(tab: Tab) -> &'static str {
    match tab {
        Tab::Prayer => "l تحديد الموقع · m إدخال يدوي · r تحديث · ? مساعدة · q خروج",
        Tab::Qibla => "o تفعيل البوصلة · ←/→ تدوير · l تحديد الموقع · q خروج",
        Tab::Quran => "[/] السورة · / بحث · space تشغيل/إيقاف · n/p الآية · t الترجمة",
        Tab::Adhkar => "↑/↓ تمرير · ? مساعدة · q خروج",
        Tab::Hadith => "←/→ الصفحة · b الكتاب · ↑/↓ تمرير",
    }
}
