//! Processing directive types
//!
//! A [`ProcessingDirective`] is the proxy-agnostic output of the mapper: an
//! ordered list of typed options plus the source fingerprint.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// How the proxy handles the aspect ratio while resizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeType {
    /// Scale to fit within the target, preserving aspect ratio
    Fit,
    /// Scale to cover the target, cropping the overflow
    Fill,
    /// Stretch to the target, ignoring aspect ratio
    Force,
}

impl ResizeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
            Self::Force => "force",
        }
    }
}

impl fmt::Display for ResizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fit" => Ok(ResizeType::Fit),
            "fill" => Ok(ResizeType::Fill),
            "force" => Ok(ResizeType::Force),
            _ => Err(format!("unknown resize type: {}", s)),
        }
    }
}

/// Anchor used by the proxy when cropping or resizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gravity {
    /// Fixed top-left anchor with pixel offsets
    TopLeft { x: u32, y: u32 },
    /// Normalized focus point, both coordinates in `[0, 1]`
    FocusPoint { x: f64, y: f64 },
}

impl Gravity {
    /// Focus-point gravity; coordinates are clamped into `[0, 1]`.
    pub fn focus_point(x: f64, y: f64) -> Self {
        Gravity::FocusPoint {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    pub fn top_left(x: u32, y: u32) -> Self {
        Gravity::TopLeft { x, y }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.5;
    }
    value.clamp(0.0, 1.0)
}

/// A single processing option with its typed arguments
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "option", rename_all = "kebab-case")]
pub enum DirectiveOption {
    ResizeType {
        value: ResizeType,
    },
    Width {
        value: u32,
    },
    Height {
        value: u32,
    },
    MinWidth {
        value: u32,
    },
    MinHeight {
        value: u32,
    },
    Crop {
        width: u32,
        height: u32,
        gravity: Gravity,
    },
    Gravity {
        value: Gravity,
    },
    Dpr {
        value: f64,
    },
}

impl DirectiveOption {
    /// Option name; two options with the same name never coexist in a directive
    pub fn name(&self) -> &'static str {
        match self {
            Self::ResizeType { .. } => "resize-type",
            Self::Width { .. } => "width",
            Self::Height { .. } => "height",
            Self::MinWidth { .. } => "min-width",
            Self::MinHeight { .. } => "min-height",
            Self::Crop { .. } => "crop",
            Self::Gravity { .. } => "gravity",
            Self::Dpr { .. } => "dpr",
        }
    }
}

/// Ordered set of processing options derived from one transformation request
///
/// Options keep the order in which they were pushed. Pushing an option whose
/// name is already present replaces the existing entry in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingDirective {
    options: Vec<DirectiveOption>,
    /// Source fingerprint, metadata only; never serialized into the path
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
}

impl ProcessingDirective {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, option: DirectiveOption) {
        match self
            .options
            .iter_mut()
            .find(|existing| existing.name() == option.name())
        {
            Some(existing) => *existing = option,
            None => self.options.push(option),
        }
    }

    pub fn options(&self) -> &[DirectiveOption] {
        &self.options
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectiveOption> {
        self.options.iter()
    }

    /// Option names in insertion order
    pub fn names(&self) -> Vec<&'static str> {
        self.options.iter().map(DirectiveOption::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&DirectiveOption> {
        self.options.iter().find(|option| option.name() == name)
    }

    pub fn resize_type(&self) -> Option<ResizeType> {
        self.options.iter().find_map(|option| match option {
            DirectiveOption::ResizeType { value } => Some(*value),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn set_hash(&mut self, hash: Option<String>) {
        self.hash = hash;
    }
}
