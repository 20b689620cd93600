pub mod charts;
pub mod compass;
pub mod fmt;
pub mod map_canvas;
pub mod pie;
pub mod popup;
