//! The 14 standard PDF fonts
//!
//! These Type1 fonts are guaranteed to render without embedding any font
//! program data, so registering one only needs a small font dictionary.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// One of the 14 standard (base-14) PDF fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Courier,
    CourierBold,
    CourierBoldOblique,
    CourierOblique,
    Helvetica,
    HelveticaBold,
    HelveticaBoldOblique,
    HelveticaOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    /// Every standard font, in key order
    pub const ALL: [StandardFont; 14] = [
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::CourierBoldOblique,
        StandardFont::CourierOblique,
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaBoldOblique,
        StandardFont::HelveticaOblique,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
        StandardFont::TimesBoldItalic,
        StandardFont::Symbol,
        StandardFont::ZapfDingbats,
    ];

    /// Stable lookup key used by callers, e.g. `"timesroman"`
    pub fn key(&self) -> &'static str {
        match self {
            StandardFont::Courier => "courier",
            StandardFont::CourierBold => "courierbold",
            StandardFont::CourierBoldOblique => "courierboldoblique",
            StandardFont::CourierOblique => "courieroblique",
            StandardFont::Helvetica => "helvetica",
            StandardFont::HelveticaBold => "helveticabold",
            StandardFont::HelveticaBoldOblique => "helveticaboldoblique",
            StandardFont::HelveticaOblique => "helveticaoblique",
            StandardFont::TimesRoman => "timesroman",
            StandardFont::TimesBold => "timesbold",
            StandardFont::TimesItalic => "timesitalic",
            StandardFont::TimesBoldItalic => "timesbolditalic",
            StandardFont::Symbol => "symbol",
            StandardFont::ZapfDingbats => "zapfdingbats",
        }
    }

    /// PostScript name written to the font's `/BaseFont` entry
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Name of the font's entry in a page's `/Font` resource table
    ///
    /// Each standard font always registers under its PostScript name, which
    /// keeps one entry per font per page.
    pub fn resource_name(&self) -> &'static str {
        self.base_font()
    }
}

impl FromStr for StandardFont {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StandardFont::ALL
            .iter()
            .copied()
            .find(|font| font.key() == s)
            .ok_or_else(|| Error::UnknownFont(s.to_string()))
    }
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
