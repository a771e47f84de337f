//! Rendering constants to avoid magic numbers throughout the codebase.

/// Opacity of the full-circle track drawn behind the progress ring.
pub const TRACK_OPACITY: f32 = 0.25;

/// Segments used for each round line cap.
pub const CAP_SEGMENTS: usize = 12;

/// Label font size as a fraction of the available width, before `text_factor`.
pub const LABEL_FONT_FRACTION: f32 = 1.0 / 3.0;

/// Label box width as a fraction of the available width.
pub const LABEL_WIDTH_FRACTION: f32 = 1.0 / 1.5;

/// Smallest scale the host may shrink the label to when it does not fit.
pub const LABEL_MIN_SCALE: f32 = 0.5;
