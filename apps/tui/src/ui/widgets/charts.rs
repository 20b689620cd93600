use antagning_tui::domain::RankedDataset;
use ratatui::layout::{Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use super::fmt::group_thousands;

pub const BAR_TITLE: &str = "6 mest sökta kurser år HT24";

/// Horizontal bars so long course names fit without truncation. The scale
/// starts at zero and the single series needs no legend.
pub fn render_bar_panel(dataset: &RankedDataset, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(BAR_TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if dataset.is_empty() {
        let paragraph = Paragraph::new("Ingen data tillgänglig")
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar<'_>> = dataset
        .labels
        .iter()
        .zip(&dataset.values)
        .map(|(label, value)| {
            Bar::default()
                .value(*value)
                .text_value(format!("{} sökande", group_thousands(*value)))
                .label(TextLine::from(label.as_str()))
                .style(Style::default().fg(Color::Cyan))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = dataset.values.iter().copied().max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(1);

    f.render_widget(chart, area);
}
