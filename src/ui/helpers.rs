//! Small layout and formatting helpers shared by the views.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use crate::theme::Theme;

/// What: Rectangle of at most `width`×`height` centered in `area`.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

/// Rounded panel with a themed title.
#[must_use]
pub fn panel<'a>(title: impl Into<String>, th: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {} ", title.into()), Style::default().fg(th.accent)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.overlay))
        .style(Style::default().bg(th.base))
}

/// What: Arrow glyph closest to `angle` (degrees clockwise from screen-up).
///
/// Details:
/// - Eight sectors of 45° centered on the arrows.
#[must_use]
pub fn arrow_for_angle(angle: f64) -> &'static str {
    const ARROWS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
    let a = crate::qibla::normalize_degrees(angle + 22.5);
    // `a` is in [0, 360) so the sector index fits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sector = (a / 45.0) as usize % 8;
    ARROWS[sector]
}

/// Clamp a scroll offset to `lines` rows of content; returns the ratatui offset.
pub fn clamp_scroll(scroll: &mut usize, lines: usize) -> u16 {
    *scroll = (*scroll).min(lines.saturating_sub(1));
    u16::try_from(*scroll).unwrap_or(u16::MAX)
}
