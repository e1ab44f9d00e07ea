//! The fixed set of London transit lines this tool can report on.
//!
//! Line names are validated against this allow-list before any network
//! request is made; everything downstream (API path, display name, short
//! code) derives from the enum.

/// A London Underground line (or the DLR) supported by the TfL status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    District,
    Circle,
    Victoria,
    Central,
    Northern,
    Bakerloo,
    HammersmithCity,
    Jubilee,
    Metropolitan,
    Piccadilly,
    WaterlooCity,
    Dlr,
}

impl Line {
    /// Returns a slice containing all supported lines.
    pub fn all() -> &'static [Line] {
        &[
            Line::District,
            Line::Circle,
            Line::Victoria,
            Line::Central,
            Line::Northern,
            Line::Bakerloo,
            Line::HammersmithCity,
            Line::Jubilee,
            Line::Metropolitan,
            Line::Piccadilly,
            Line::WaterlooCity,
            Line::Dlr,
        ]
    }

    /// Returns the identifier used in TfL Unified API URL paths.
    pub fn api_id(&self) -> &'static str {
        match self {
            Line::District => "district",
            Line::Circle => "circle",
            Line::Victoria => "victoria",
            Line::Central => "central",
            Line::Northern => "northern",
            Line::Bakerloo => "bakerloo",
            Line::HammersmithCity => "hammersmith-city",
            Line::Jubilee => "jubilee",
            Line::Metropolitan => "metropolitan",
            Line::Piccadilly => "piccadilly",
            Line::WaterlooCity => "waterloo-city",
            Line::Dlr => "dlr",
        }
    }

    /// Returns the uppercase display name used in the large output format.
    pub fn display_name(&self) -> &'static str {
        match self {
            Line::District => "DISTRICT",
            Line::Circle => "CIRCLE",
            Line::Victoria => "VICTORIA",
            Line::Central => "CENTRAL",
            Line::Northern => "NORTHERN",
            Line::Bakerloo => "BAKERLOO",
            Line::HammersmithCity => "HAMMERSMITH-CITY",
            Line::Jubilee => "JUBILEE",
            Line::Metropolitan => "METROPOLITAN",
            Line::Piccadilly => "PICCADILLY",
            Line::WaterlooCity => "WATERLOO-CITY",
            Line::Dlr => "DLR",
        }
    }

    /// Returns the three-letter code used in the small output format.
    ///
    /// This is the first three letters of the display name, so "DLR" stays
    /// "DLR" and "HAMMERSMITH-CITY" becomes "HAM".
    pub fn short_code(&self) -> &'static str {
        match self {
            Line::District => "DIS",
            Line::Circle => "CIR",
            Line::Victoria => "VIC",
            Line::Central => "CEN",
            Line::Northern => "NOR",
            Line::Bakerloo => "BAK",
            Line::HammersmithCity => "HAM",
            Line::Jubilee => "JUB",
            Line::Metropolitan => "MET",
            Line::Piccadilly => "PIC",
            Line::WaterlooCity => "WAT",
            Line::Dlr => "DLR",
        }
    }

    /// Parses user input into a Line.
    ///
    /// Matching is case-insensitive against the API identifiers
    /// ("district", "hammersmith-city", "dlr", ...).
    ///
    /// Returns `None` if the input doesn't match any supported line.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Line> {
        match s.to_lowercase().trim() {
            "district" => Some(Line::District),
            "circle" => Some(Line::Circle),
            "victoria" => Some(Line::Victoria),
            "central" => Some(Line::Central),
            "northern" => Some(Line::Northern),
            "bakerloo" => Some(Line::Bakerloo),
            "hammersmith-city" => Some(Line::HammersmithCity),
            "jubilee" => Some(Line::Jubilee),
            "metropolitan" => Some(Line::Metropolitan),
            "piccadilly" => Some(Line::Piccadilly),
            "waterloo-city" => Some(Line::WaterlooCity),
            "dlr" => Some(Line::Dlr),
            _ => None,
        }
    }
}
