use antagning_tui::map::{MapView, MARKER_GLYPH, OSM_ATTRIBUTION};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// Longitude span of the viewport at a given zoom level, slippy-map style:
/// the whole world at zoom 0, halved per level.
fn lon_span(zoom: f64) -> f64 {
    360.0 / zoom.exp2()
}

/// World map canvas with the viewport derived from the map view's center
/// and zoom. The marker, when present, is printed with its popup label.
pub fn render_map_panel(view: &MapView, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Karta ")
        .title_bottom(TextLine::from(OSM_ATTRIBUTION).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let (lat, lon) = view.center;
    let half_lon = lon_span(view.zoom) / 2.0;
    let half_lat = half_lon / 2.0;

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([lon - half_lon, lon + half_lon])
        .y_bounds([lat - half_lat, lat + half_lat])
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::Gray,
            });

            if let Some(marker) = &view.marker {
                ctx.print(
                    marker.lon,
                    marker.lat,
                    TextLine::from(Span::styled(
                        MARKER_GLYPH,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                );

                if marker.popup_open {
                    ctx.print(
                        marker.lon,
                        marker.lat + half_lat * 0.2,
                        TextLine::from(Span::styled(
                            marker.popup.clone(),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        )),
                    );
                }
            }
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_halves_the_span_per_level() {
        let world = lon_span(0.0);
        assert!((world - 360.0).abs() < 1e-9);
        assert!((lon_span(1.0) - 180.0).abs() < 1e-9);
        assert!((lon_span(5.0) - 11.25).abs() < 1e-9);
    }
}
