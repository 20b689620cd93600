use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::Frame;

/// Small decorative compass for the title bar.
pub fn render_compass(f: &mut Frame<'_>, area: Rect, animation: f64) {
    if area.width < 4 || area.height < 4 {
        return;
    }

    let size = area.width.min(area.height);
    let square = Rect {
        x: area.x + (area.width - size) / 2,
        y: area.y + (area.height - size) / 2,
        width: size,
        height: size,
    };

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 0.9,
                    color: Color::DarkGray,
                });

                // Cardinal ticks
                for angle in [0.0, std::f64::consts::FRAC_PI_2] {
                    let (sin, cos) = angle.sin_cos();
                    ctx.draw(&CanvasLine {
                        x1: -cos * 0.9,
                        y1: -sin * 0.9,
                        x2: cos * 0.9,
                        y2: sin * 0.9,
                        color: Color::DarkGray,
                    });
                }

                let needle = animation;
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: needle.cos() * 0.8,
                    y2: needle.sin() * 0.8,
                    color: Color::Cyan,
                });

                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 0.08,
                    color: Color::Cyan,
                });
            })
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0]),
        square,
    );
}
