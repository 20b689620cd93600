use antagning_tui::domain::RankedDataset;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::fmt::{group_thousands, percentages};

pub const PIE_TITLE: &str = "5 mest sökta program år HT24";

const SLICE_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Rgb(0, 0, 238),
    Color::Gray,
];

/// Pie chart with its legend below. Each legend row carries the raw count
/// and the slice's share of the total, one decimal.
pub fn render_pie_panel(dataset: &RankedDataset, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(PIE_TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if dataset.is_empty() {
        let paragraph = Paragraph::new("Ingen data tillgänglig")
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    #[allow(clippy::cast_possible_truncation)]
    let legend_height = dataset.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(legend_height)])
        .split(inner);

    render_slices(dataset, f, chunks[0]);
    render_legend(dataset, f, chunks[1]);
}

fn render_slices(dataset: &RankedDataset, f: &mut Frame<'_>, area: Rect) {
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

    let total: u64 = dataset.values.iter().sum();
    let values = dataset.values.clone();

    f.render_widget(
        Canvas::default()
            .paint(move |ctx| {
                // Slices start at twelve o'clock and run clockwise
                let mut start = 0.0_f64;
                for (index, value) in values.iter().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    let frac = if total == 0 {
                        0.0
                    } else {
                        *value as f64 / total as f64
                    };
                    let color = SLICE_COLORS[index % SLICE_COLORS.len()];

                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let spokes = (frac * 120.0).ceil().max(1.0) as usize;
                    for step in 0..=spokes {
                        #[allow(clippy::cast_precision_loss)]
                        let t = start + frac * (step as f64 / spokes as f64);
                        let angle = std::f64::consts::FRAC_PI_2
                            - t * 2.0 * std::f64::consts::PI;
                        ctx.draw(&CanvasLine {
                            x1: 0.0,
                            y1: 0.0,
                            x2: angle.cos(),
                            y2: angle.sin(),
                            color,
                        });
                    }

                    start += frac;
                }

                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 1.0,
                    color: Color::DarkGray,
                });
            })
            .x_bounds([-1.2, 1.2])
            .y_bounds([-1.2, 1.2]),
        square,
    );
}

fn render_legend(dataset: &RankedDataset, f: &mut Frame<'_>, area: Rect) {
    let shares = percentages(&dataset.values);

    let lines: Vec<TextLine<'_>> = dataset
        .labels
        .iter()
        .zip(&dataset.values)
        .zip(&shares)
        .enumerate()
        .map(|(index, ((label, value), share))| {
            TextLine::from(vec![
                Span::styled(
                    "■ ",
                    Style::default().fg(SLICE_COLORS[index % SLICE_COLORS.len()]),
                ),
                Span::raw(format!(
                    "{label}: {} sökande ({share:.1}%)",
                    group_thousands(*value)
                )),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}
