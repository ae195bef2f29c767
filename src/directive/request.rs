//! Generic transformation request
//!
//! Plain value types describing what the host wants done to an image. They
//! carry no behavior beyond parsing and small predicates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How a requested width or height should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMarker {
    /// Plain value, e.g. `300`
    #[default]
    Exact,
    /// Upper bound the image must fit within, e.g. `300m`
    Maximum,
    /// Area the image must cover, cropping the overflow, e.g. `300c`
    Cover,
}

impl SizeMarker {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Exact => "",
            Self::Maximum => "m",
            Self::Cover => "c",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid size value '{0}': expected digits optionally followed by 'm' or 'c'")]
pub struct ParseSizeError(pub String);

/// Requested width or height, possibly carrying only a marker
///
/// A marker without a number (`"m"`, `"c"`) influences the resize type but
/// does not produce a size option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeValue {
    pub pixels: Option<u32>,
    pub marker: SizeMarker,
}

impl SizeValue {
    pub fn exact(pixels: u32) -> Self {
        Self {
            pixels: Some(pixels),
            marker: SizeMarker::Exact,
        }
    }

    pub fn maximum(pixels: u32) -> Self {
        Self {
            pixels: Some(pixels),
            marker: SizeMarker::Maximum,
        }
    }

    pub fn cover(pixels: u32) -> Self {
        Self {
            pixels: Some(pixels),
            marker: SizeMarker::Cover,
        }
    }

    pub fn marker_only(marker: SizeMarker) -> Self {
        Self {
            pixels: None,
            marker,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.marker == SizeMarker::Exact && self.pixels.is_some()
    }

    pub fn is_maximum(&self) -> bool {
        self.marker == SizeMarker::Maximum
    }

    pub fn is_cover(&self) -> bool {
        self.marker == SizeMarker::Cover
    }
}

impl FromStr for SizeValue {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (digits, marker) = if let Some(rest) = trimmed.strip_suffix('m') {
            (rest, SizeMarker::Maximum)
        } else if let Some(rest) = trimmed.strip_suffix('c') {
            (rest, SizeMarker::Cover)
        } else {
            (trimmed, SizeMarker::Exact)
        };

        if digits.is_empty() {
            if marker == SizeMarker::Exact {
                return Err(ParseSizeError(s.to_string()));
            }
            return Ok(SizeValue::marker_only(marker));
        }

        let pixels = digits
            .parse::<u32>()
            .map_err(|_| ParseSizeError(s.to_string()))?;

        Ok(SizeValue {
            pixels: Some(pixels),
            marker,
        })
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pixels) = self.pixels {
            write!(f, "{}", pixels)?;
        }
        f.write_str(self.marker.suffix())
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Area {
    pub offset_left: f64,
    pub offset_top: f64,
    pub width: f64,
    pub height: f64,
}

impl Area {
    pub fn new(offset_left: f64, offset_top: f64, width: f64, height: f64) -> Self {
        Self {
            offset_left,
            offset_top,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whole-pixel `(width, height)`, truncated toward zero
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    /// Whole-pixel `(left, top)`, truncated toward zero
    pub fn pixel_offset(&self) -> (u32, u32) {
        (self.offset_left as u32, self.offset_top as u32)
    }
}

/// Coordinate space of a focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaUnits {
    /// Coordinates are fractions of the source dimensions
    #[default]
    Relative,
    /// Coordinates are source pixels
    Pixels,
}

/// Region of interest the proxy should keep when cropping
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusArea {
    pub area: Area,
    pub units: AreaUnits,
}

impl FocusArea {
    pub fn relative(area: Area) -> Self {
        Self {
            area,
            units: AreaUnits::Relative,
        }
    }

    pub fn pixels(area: Area) -> Self {
        Self {
            area,
            units: AreaUnits::Pixels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.area.is_empty()
    }
}

/// Transformation request handed to the mapper
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingConfiguration {
    pub width: Option<SizeValue>,
    pub height: Option<SizeValue>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Crop rectangle in source pixels
    pub crop: Option<Area>,
    pub focus_area: Option<FocusArea>,
    pub dpr: Option<f64>,
}

/// Facts about the source asset the mapper needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMetadata {
    /// Source width in pixels, 0 when unknown
    pub width: u32,
    /// Source height in pixels, 0 when unknown
    pub height: u32,
    /// Content fingerprint (SHA-1 hex)
    pub sha1: Option<String>,
}
