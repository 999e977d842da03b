//! Page coordinate calculations
//!
//! Callers measure positions from the top-left corner of the page in inches or
//! centimeters. PDF user space measures in points from the bottom-left corner.

/// Points per inch in PDF user space
pub const DPI: f64 = 72.0;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Unit of a caller-supplied distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Inches,
    Centimeters,
}

/// Simple length type in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from inches
    pub fn from_inches(inches: f64) -> Self {
        Length(inches)
    }

    /// Create a length from centimeters
    pub fn from_cm(cm: f64) -> Self {
        Length(cm / CM_PER_INCH)
    }

    /// Create a length from a value in the given unit
    pub fn new(value: f64, unit: Unit) -> Self {
        match unit {
            Unit::Inches => Self::from_inches(value),
            Unit::Centimeters => Self::from_cm(value),
        }
    }

    /// Get the value in inches
    pub fn inches(&self) -> f64 {
        self.0
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f64 {
        DPI * self.0
    }
}

/// A page's media box in points: (x_left, y_bottom, x_right, y_top)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    pub x_left: f64,
    pub y_bottom: f64,
    pub x_right: f64,
    pub y_top: f64,
}

impl MediaBox {
    pub fn new(x_left: f64, y_bottom: f64, x_right: f64, y_top: f64) -> Self {
        Self { x_left, y_bottom, x_right, y_top }
    }

    /// US Letter size (8.5" × 11"), used when a page declares no media box
    pub fn letter() -> Self {
        Self::new(0.0, 0.0, 612.0, 792.0)
    }

    pub fn width(&self) -> f64 {
        self.x_right - self.x_left
    }

    pub fn height(&self) -> f64 {
        self.y_top - self.y_bottom
    }

    /// The box as a tuple in PDF array order
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_left, self.y_bottom, self.x_right, self.y_top)
    }
}

impl Default for MediaBox {
    fn default() -> Self {
        Self::letter()
    }
}

/// Convert a distance from the left and top edges into PDF points
///
/// Returns `(x, y)` measured from the bottom-left origin. Values outside the
/// media box are passed through unchanged; the text simply lands off-page.
pub fn to_points(from_left: Length, from_top: Length, media_box: &MediaBox) -> (f64, f64) {
    let x = from_left.pt();
    let y = media_box.y_top - from_top.pt();
    (x, y)
}
