use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::state::{ChartData, MSG_CHARTS_FAILED, MSG_CHARTS_LOADING};
use crate::app::{App, ChartsStatus};
use crate::cli::CliArgs;
use crate::ui::widgets::charts::render_bar_panel;
use crate::ui::widgets::compass::render_compass;
use crate::ui::widgets::pie::render_pie_panel;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};

pub fn render_charts(app: &mut App, f: &mut Frame<'_>) {
    let layout = build_layout(f);

    render_title_section(app, f, layout[0]);
    render_charts_section(app, f, layout[1]);
    render_status_section(app, f, layout[2]);
    render_shortcuts(f, layout[3]);

    if app.show_help {
        render_help_popup(f);
    }
}

fn build_layout(f: &Frame<'_>) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Title area
            Constraint::Min(10),   // Charts area
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)))
        .to_vec()
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== Antagningsstatistik ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(title_block, area);

    let title_inner = area.inner(Margin::new(1, 1));
    let title_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(title_inner);

    let title_paragraph = Paragraph::new(Text::from(vec![
        TextLine::from(vec![
            Span::styled(
                "Antagning ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "HT24",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        TextLine::from(Span::styled(
            "Mest sökta kurser och program",
            Style::default().fg(Color::Gray),
        )),
    ]))
    .alignment(Alignment::Left);
    f.render_widget(title_paragraph, title_chunks[0]);

    render_compass(f, title_chunks[1], app.animation_counter);
}

fn render_charts_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(charts) = app.charts.as_ref() else {
        render_charts_placeholder(app.charts_status, f, area);
        return;
    };

    let chart_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_bar_panel(&charts.courses, f, chart_split[0]);
    render_pie_panel(&charts.programs, f, chart_split[1]);
}

fn render_charts_placeholder(status: ChartsStatus, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    // Nothing is drawn in the chart area on failure; the status section
    // carries the message.
    let text = match status {
        ChartsStatus::Loading => MSG_CHARTS_LOADING,
        ChartsStatus::Ready | ChartsStatus::Failed => "",
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let (text, style): (String, Style) = match app.charts_status {
        ChartsStatus::Loading => (
            MSG_CHARTS_LOADING.to_string(),
            Style::default().fg(Color::Gray),
        ),
        ChartsStatus::Failed => (
            MSG_CHARTS_FAILED.to_string(),
            Style::default().fg(Color::Red),
        ),
        ChartsStatus::Ready => (ready_status_text(app.charts.as_ref()), Style::default().fg(Color::Green)),
    };

    let paragraph = Paragraph::new(text).style(style).block(status_block);
    f.render_widget(paragraph, area);
}

fn ready_status_text(charts: Option<&ChartData>) -> String {
    charts.map_or_else(String::new, |charts| {
        format!("Hämtad kl {}", charts.fetched_at)
    })
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let hints = Paragraph::new("2/Tab: karta | h: hjälp | q: avsluta")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, area);
}

fn render_help_popup(f: &mut Frame<'_>) {
    let area = centered_rect(70, 60, f.area());
    f.render_widget(ClearWidget, area);

    let block = Block::default()
        .title(" Hjälp ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut text = String::from(
        "Tangenter:\n  1/2 eller Tab  växla mellan diagram och karta\n  Enter          sök plats (kartskärmen)\n  Esc            tillbaka / flytta fokus\n  q              avsluta\n\n",
    );
    text.push_str(&CliArgs::help_text());

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
