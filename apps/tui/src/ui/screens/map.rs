use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::state::MSG_SHOWING_PREFIX;
use crate::app::{App, Focus};
use crate::ui::widgets::map_canvas::render_map_panel;

pub fn render_map(app: &mut App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search form
            Constraint::Length(1), // Search status
            Constraint::Min(8),    // Map area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)))
        .to_vec();

    render_search_form(app, f, layout[0]);
    render_search_status(app, f, layout[1]);
    render_map_panel(&app.map, f, layout[2]);
    render_shortcuts(app, f, layout[3]);
}

fn render_search_form(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::SearchField;
    let border_color = if focused { Color::Green } else { Color::DarkGray };

    let block = Block::default()
        .title(" Sök plats ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let cursor = if focused && app.animation_counter.sin() > 0.0 {
        "█"
    } else {
        " "
    };

    let line = TextLine::from(vec![
        Span::styled("> ", Style::default().fg(Color::Green)),
        Span::raw(app.search_input.as_str()),
        Span::styled(cursor, Style::default().fg(Color::Green)),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_search_status(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    if app.searching {
        let throbber = throbber_widgets_tui::Throbber::default()
            .label(app.search_status.clone())
            .style(Style::default().fg(Color::Yellow))
            .throbber_style(Style::default().fg(Color::Cyan))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
            .use_type(throbber_widgets_tui::WhichUse::Spin);
        f.render_stateful_widget(throbber, area, &mut app.throbber);
        return;
    }

    let style = if app.search_status.starts_with(MSG_SHOWING_PREFIX) {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let paragraph = Paragraph::new(app.search_status.as_str()).style(style);
    f.render_widget(paragraph, area);
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let hints = match app.focus {
        Focus::SearchField => "Enter: sök | Tab/Esc: diagram",
        Focus::MapRegion => "Esc eller /: sökfält | Tab: diagram | q: avsluta",
    };

    let paragraph = Paragraph::new(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
    ));
    f.render_widget(paragraph, area);
}
