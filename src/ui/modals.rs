use ratatui::{
    Frame,
    layout::Rect,
    prelude::Position,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::helpers::{centered_rect, panel};
use crate::quran::filter_surahs;
use crate::state::{AppState, ManualField, Modal};
use crate::theme::Theme;

/// Key reference shown by the help dialog.
const HELP_LINES: &[(&str, &str)] = &[
    ("1-5 / Tab", "التنقل بين التبويبات"),
    ("l", "تحديد الموقع تلقائيًا"),
    ("m", "إدخال المدينة والدولة"),
    ("r", "تحديث المواقيت"),
    ("o", "تفعيل البوصلة (القبلة)"),
    ("← / →", "تدوير الاتجاه · صفحات الأحاديث"),
    ("[ / ]", "السورة السابقة / التالية"),
    ("/", "البحث عن سورة"),
    ("space", "تشغيل / إيقاف التلاوة"),
    ("n / p", "الآية التالية / السابقة"),
    ("a", "تشغيل السورة كاملة"),
    ("t", "تغيير الترجمة"),
    ("b", "تغيير كتاب الحديث"),
    ("T", "الوضع الداكن / الفاتح"),
    ("q / Esc", "خروج"),
];

/// What: Draw the open modal, if any, over `area`.
pub fn render_modals(f: &mut Frame, app: &AppState, area: Rect) {
    let th = app.theme();
    match &app.modal {
        Modal::None => {}
        Modal::Alert { message } => {
            let height = u16::try_from(message.lines().count()).unwrap_or(1).saturating_add(4);
            let rect = centered_rect(area.width.saturating_sub(10).min(70), height, area);
            f.render_widget(Clear, rect);
            let mut lines: Vec<Line> = message
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(th.text))))
                .collect();
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Enter / Esc", Style::default().fg(th.subtext))));
            let body = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("تنبيه", &th).border_style(Style::default().fg(th.red)));
            f.render_widget(body, rect);
        }
        Modal::ManualLocation {
            city,
            country,
            field,
        } => render_manual(f, &th, area, city, country, *field),
        Modal::SurahPicker { query, selected } => {
            let rect = centered_rect(60, area.height.saturating_sub(6).max(8), area);
            f.render_widget(Clear, rect);
            let items: Vec<ListItem> = filter_surahs(&app.quran.surahs, query)
                .into_iter()
                .filter_map(|i| app.quran.surahs.get(i))
                .map(|s| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:>3}. ", s.number), Style::default().fg(th.subtext)),
                        Span::styled(s.name.clone(), Style::default().fg(th.text)),
                        Span::styled(
                            format!("  {}", s.english_name),
                            Style::default().fg(th.subtext),
                        ),
                    ]))
                })
                .collect();
            let mut state = ListState::default();
            if !items.is_empty() {
                state.select(Some(*selected));
            }
            let list = List::new(items)
                .block(panel(format!("بحث: {query}"), &th))
                .highlight_style(Style::default().fg(th.base).bg(th.accent))
                .highlight_symbol("> ");
            f.render_stateful_widget(list, rect, &mut state);
        }
        Modal::Help => {
            let height = u16::try_from(HELP_LINES.len()).unwrap_or(u16::MAX).saturating_add(2);
            let rect = centered_rect(56, height, area);
            f.render_widget(Clear, rect);
            let lines: Vec<Line> = HELP_LINES
                .iter()
                .map(|(key, what)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{key:<12}"),
                            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(*what, Style::default().fg(th.text)),
                    ])
                })
                .collect();
            f.render_widget(Paragraph::new(lines).block(panel("المساعدة", &th)), rect);
        }
    }
}

/// Two-field city/country form with the cursor on the focused field.
fn render_manual(
    f: &mut Frame,
    th: &Theme,
    area: Rect,
    city: &str,
    country: &str,
    field: ManualField,
) {
    let rect = centered_rect(50, 7, area);
    f.render_widget(Clear, rect);
    let row = |label: &str, value: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(th.text).bg(th.surface)
        } else {
            Style::default().fg(th.subtext)
        };
        Line::from(vec![
            Span::styled(format!("{label:<8}"), Style::default().fg(th.accent)),
            Span::styled(value.to_string(), style),
        ])
    };
    let lines = vec![
        row("المدينة:", city, field == ManualField::City),
        row("الدولة:", country, field == ManualField::Country),
        Line::default(),
        Line::from(Span::styled(
            "Tab تبديل · Enter بحث · Esc إلغاء",
            Style::default().fg(th.subtext),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("إدخال الموقع", th)), rect);

    let (value, y) = match field {
        ManualField::City => (city, rect.y + 1),
        ManualField::Country => (country, rect.y + 2),
    };
    let width = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
    let right = rect.x + rect.width.saturating_sub(2);
    let x = (rect.x + 1 + 8).saturating_add(width).min(right);
    f.set_cursor_position(Position::new(x, y));
}
