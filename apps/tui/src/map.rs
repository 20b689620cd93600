//! Map view state: one map for the whole session, at most one marker,
//! repositioned rather than recreated between searches.

use crate::api::Place;

/// Startup viewport, a broad view over Sweden.
pub const DEFAULT_CENTER: (f64, f64) = (62.0, 15.0);
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Viewport used when flying to a search hit.
pub const FOCUS_ZOOM: f64 = 14.0;

/// Flight time in seconds.
pub const FLY_DURATION: f64 = 0.8;

pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap";

/// One glyph for every marker this map will ever pin.
pub const MARKER_GLYPH: &str = "▼";

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub popup: String,
    pub popup_open: bool,
}

impl Marker {
    fn at(place: &Place) -> Self {
        Self {
            lat: place.lat,
            lon: place.lon,
            popup: place.display_name.clone(),
            popup_open: true,
        }
    }

    fn move_to(&mut self, place: &Place) {
        self.lat = place.lat;
        self.lon = place.lon;
        self.popup = place.display_name.clone();
        self.popup_open = true;
    }
}

/// Whether `show` had to create the marker or could reuse the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Created,
    Moved,
}

/// An in-progress animated move of the viewport.
#[derive(Debug, Clone)]
struct Flight {
    from_center: (f64, f64),
    from_zoom: f64,
    to_center: (f64, f64),
    to_zoom: f64,
    elapsed: f64,
}

#[derive(Debug, Clone)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: f64,
    pub marker: Option<Marker>,
    flight: Option<Flight>,
}

impl MapView {
    pub const fn new() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            marker: None,
            flight: None,
        }
    }

    /// Fly to `place` and pin the marker there. The marker is created on the
    /// first successful search and only repositioned afterwards, so its popup
    /// always carries the last geocoded display name. Failed searches never
    /// reach this method; the view keeps its previous state for those.
    pub fn show(&mut self, place: &Place) -> Placement {
        self.flight = Some(Flight {
            from_center: self.center,
            from_zoom: self.zoom,
            to_center: (place.lat, place.lon),
            to_zoom: FOCUS_ZOOM,
            elapsed: 0.0,
        });

        match self.marker.as_mut() {
            Some(marker) => {
                marker.move_to(place);
                Placement::Moved
            }
            None => {
                self.marker = Some(Marker::at(place));
                Placement::Created
            }
        }
    }

    /// Advance an in-progress flight by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        let Some(flight) = self.flight.as_mut() else {
            return;
        };

        flight.elapsed = (flight.elapsed + dt.max(0.0)).min(FLY_DURATION);
        let t = ease(flight.elapsed / FLY_DURATION);

        self.center = (
            lerp(flight.from_center.0, flight.to_center.0, t),
            lerp(flight.from_center.1, flight.to_center.1, t),
        );
        self.zoom = lerp(flight.from_zoom, flight.to_zoom, t);

        if flight.elapsed >= FLY_DURATION {
            self.center = flight.to_center;
            self.zoom = flight.to_zoom;
            self.flight = None;
        }
    }

    pub const fn in_flight(&self) -> bool {
        self.flight.is_some()
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    to.mul_add(t, from * (1.0 - t))
}

fn ease(t: f64) -> f64 {
    t * t * 2.0f64.mul_add(-t, 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(lat: f64, lon: f64, name: &str) -> Place {
        Place {
            lat,
            lon,
            display_name: name.to_string(),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn starts_without_marker() {
        let view = MapView::new();
        assert!(view.marker.is_none());
        assert_eq!(view.center, DEFAULT_CENTER);
        assert!(!view.in_flight());
    }

    #[test]
    fn first_show_creates_the_marker() {
        let mut view = MapView::new();

        let placement = view.show(&place(62.39, 17.31, "Sundsvall, Sweden"));

        assert_eq!(placement, Placement::Created);
        let marker = view.marker.as_ref().expect("marker after first show");
        assert_close(marker.lat, 62.39);
        assert_eq!(marker.popup, "Sundsvall, Sweden");
        assert!(marker.popup_open);
    }

    #[test]
    fn second_show_reuses_the_marker() {
        let mut view = MapView::new();
        view.show(&place(62.39, 17.31, "Sundsvall, Sweden"));

        let placement = view.show(&place(59.33, 18.07, "Stockholm, Sweden"));

        assert_eq!(placement, Placement::Moved);
        let marker = view.marker.as_ref().expect("marker still present");
        assert_close(marker.lat, 59.33);
        assert_close(marker.lon, 18.07);
        assert_eq!(marker.popup, "Stockholm, Sweden");
    }

    #[test]
    fn flight_lands_on_the_target() {
        let mut view = MapView::new();
        view.show(&place(62.39, 17.31, "Sundsvall, Sweden"));
        assert!(view.in_flight());

        view.advance(FLY_DURATION + 0.1);

        assert!(!view.in_flight());
        assert_close(view.center.0, 62.39);
        assert_close(view.center.1, 17.31);
        assert_close(view.zoom, FOCUS_ZOOM);
    }

    #[test]
    fn flight_moves_monotonically_between_endpoints() {
        let mut view = MapView::new();
        view.show(&place(55.6, 13.0, "Malmö, Sweden"));

        view.advance(FLY_DURATION / 2.0);

        assert!(view.in_flight());
        assert!(view.center.0 < DEFAULT_CENTER.0);
        assert!(view.center.0 > 55.6);
        assert!(view.zoom > DEFAULT_ZOOM);
        assert!(view.zoom < FOCUS_ZOOM);
    }

    #[test]
    fn backwards_time_does_not_rewind_a_flight() {
        let mut view = MapView::new();
        view.show(&place(55.6, 13.0, "Malmö, Sweden"));
        view.advance(0.4);
        let mid = view.center;

        view.advance(-1.0);

        assert_eq!(view.center, mid);
    }
}
