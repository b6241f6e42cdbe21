use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Paragraph,
        canvas::{Canvas, Circle, Line as CanvasLine},
    },
};

use super::helpers::{arrow_for_angle, panel};
use crate::state::AppState;

/// What: Render the qibla compass.
///
/// Details:
/// - The needle is drawn at [`crate::qibla::QiblaEngine::needle_angle`], clockwise
///   from screen-up; the `N` marker is rotated by the current heading.
pub fn render_qibla(f: &mut Frame, app: &AppState, area: Rect) {
    let th = app.theme();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let angle = app.qibla.needle_angle();
    let heading = app.qibla.heading().unwrap_or(0.0);
    let has_bearing = app.qibla.bearing().is_some();
    let needle = angle.to_radians();
    let north = (-heading).to_radians();
    let canvas = Canvas::default()
        .block(panel("البوصلة", &th))
        .marker(Marker::Braille)
        .x_bounds([-1.2, 1.2])
        .y_bounds([-1.2, 1.2])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: th.overlay,
            });
            if has_bearing {
                ctx.draw(&CanvasLine::new(
                    0.0,
                    0.0,
                    0.9 * needle.sin(),
                    0.9 * needle.cos(),
                    th.highlight,
                ));
            }
            ctx.print(
                1.1 * north.sin(),
                1.1 * north.cos(),
                Span::styled("N", Style::default().fg(th.red)),
            );
        });
    f.render_widget(canvas, cols[0]);

    let degrees = |v: Option<f64>| v.map_or_else(|| "—".to_string(), |d| format!("{d:.1}°"));
    let tracking = if app.qibla.is_tracking() {
        Span::styled("البوصلة مفعلة", Style::default().fg(th.green))
    } else {
        Span::styled("اضغط o لتفعيل البوصلة", Style::default().fg(th.subtext))
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("اتجاه القبلة: ", Style::default().fg(th.subtext)),
            Span::styled(degrees(app.qibla.bearing()), Style::default().fg(th.text)),
        ]),
        Line::from(vec![
            Span::styled("اتجاه الجهاز: ", Style::default().fg(th.subtext)),
            Span::styled(degrees(app.qibla.heading()), Style::default().fg(th.text)),
        ]),
        Line::from(vec![
            Span::styled("الإبرة: ", Style::default().fg(th.subtext)),
            Span::styled(
                format!("{} {angle:.0}°", arrow_for_angle(angle)),
                Style::default().fg(th.highlight).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        Line::from(tracking),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("القبلة", &th)), cols[1]);
}
