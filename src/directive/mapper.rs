//! Directive mapper
//!
//! Turns a [`ProcessingConfiguration`] into a [`ProcessingDirective`]. The
//! mapper is a pure function: it performs no validation and no I/O.

use super::focus::{calculate_center, calculate_relative_center};
use super::request::{AreaUnits, FocusArea, ProcessingConfiguration, SizeValue, SourceMetadata};
use super::types::{DirectiveOption, Gravity, ProcessingDirective, ResizeType};

/// Decide the resize type for a request.
///
/// Branches are checked in order and the first match wins: any "maximum"
/// signal selects `fit`, then any "cover" marker selects `fill`, otherwise
/// `force`. A request carrying both kinds of marker therefore yields `fit`.
pub fn resolve_resize_type(config: &ProcessingConfiguration) -> ResizeType {
    if requests_fit(config) {
        ResizeType::Fit
    } else if requests_fill(config) {
        ResizeType::Fill
    } else {
        ResizeType::Force
    }
}

fn requests_fit(config: &ProcessingConfiguration) -> bool {
    let width_marker = config.width.is_some_and(|w| w.is_maximum());
    let height_marker = config.height.is_some_and(|h| h.is_maximum());
    let width_bound = config.max_width.is_some() && !has_exact(config.width);
    let height_bound = config.max_height.is_some() && !has_exact(config.height);

    width_marker || height_marker || width_bound || height_bound
}

fn requests_fill(config: &ProcessingConfiguration) -> bool {
    config.width.is_some_and(|w| w.is_cover()) || config.height.is_some_and(|h| h.is_cover())
}

fn has_exact(value: Option<SizeValue>) -> bool {
    value.is_some_and(|v| v.is_exact())
}

/// Map a transformation request onto a processing directive.
///
/// Options are pushed in this order: resize type, crop, gravity, width,
/// min-width, height, min-height, dpr. Each rule is independent; the
/// source fingerprint is attached as metadata.
pub fn map_directive(
    config: &ProcessingConfiguration,
    source: &SourceMetadata,
) -> ProcessingDirective {
    let mut directive = ProcessingDirective::new();

    directive.push(DirectiveOption::ResizeType {
        value: resolve_resize_type(config),
    });

    if let Some(crop) = &config.crop {
        let (width, height) = crop.pixel_size();
        let (left, top) = crop.pixel_offset();
        directive.push(DirectiveOption::Crop {
            width,
            height,
            gravity: Gravity::top_left(left, top),
        });
    }

    if let Some(focus) = config.focus_area.as_ref().filter(|f| !f.is_empty()) {
        match focus_gravity(focus, source) {
            Some(gravity) => directive.push(DirectiveOption::Gravity { value: gravity }),
            None => tracing::warn!(
                source_width = source.width,
                source_height = source.height,
                "Skipping pixel focus area: source dimensions unknown"
            ),
        }
    }

    if let Some(width) = bound(config.width, config.max_width) {
        directive.push(DirectiveOption::Width { value: width });
    }

    if let Some(min_width) = config.min_width {
        directive.push(DirectiveOption::MinWidth { value: min_width });
    }

    if let Some(height) = bound(config.height, config.max_height) {
        directive.push(DirectiveOption::Height { value: height });
    }

    if let Some(min_height) = config.min_height {
        directive.push(DirectiveOption::MinHeight { value: min_height });
    }

    if let Some(dpr) = config.dpr.filter(|dpr| *dpr > 1.0) {
        directive.push(DirectiveOption::Dpr { value: dpr });
    }

    directive.set_hash(source.sha1.clone());

    tracing::debug!(
        options = ?directive.names(),
        resize_type = %directive.resize_type().unwrap_or(ResizeType::Force),
        "Mapped processing directive"
    );

    directive
}

/// Numeric value of the requested size, falling back to the maximum bound
fn bound(value: Option<SizeValue>, maximum: Option<u32>) -> Option<u32> {
    value.and_then(|v| v.pixels).or(maximum)
}

fn focus_gravity(focus: &FocusArea, source: &SourceMetadata) -> Option<Gravity> {
    let area = &focus.area;
    match focus.units {
        AreaUnits::Relative => Some(Gravity::focus_point(
            calculate_center(area.offset_left, area.width),
            calculate_center(area.offset_top, area.height),
        )),
        AreaUnits::Pixels => {
            let x = calculate_relative_center(area.offset_left, area.width, source.width as f64)?;
            let y = calculate_relative_center(area.offset_top, area.height, source.height as f64)?;
            Some(Gravity::focus_point(x, y))
        }
    }
}
