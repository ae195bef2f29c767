//! Output dimension calculation
//!
//! Pure functions predicting the pixel size imgproxy will return for a task,
//! so the host can record it without fetching the processed image.

use serde::Serialize;

use super::task::ProcessingTask;
use crate::directive::ResizeType;

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImageDimension {
    pub width: u32,
    pub height: u32,
}

impl ImageDimension {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Predict the output dimensions of a task.
    ///
    /// Starts from the crop size (or the source size), then applies the
    /// resize type, the minimum bounds and the device pixel ratio:
    /// - `fit` scales within the bounds, preserving aspect ratio, never enlarging
    /// - `fill` and `force` use both bounds verbatim, or derive the missing
    ///   one from the aspect ratio
    ///
    /// When the source size is unknown the requested bounds are returned.
    ///
    /// # Examples
    /// ```
    /// # use imgproxy_uri::directive::{ProcessingConfiguration, ResizeType, SizeValue};
    /// # use imgproxy_uri::service::{ImageDimension, ProcessingTask, SourceFile};
    /// let file = SourceFile::new("/a.jpg", "image/jpeg").with_dimensions(1200, 800);
    /// let config = ProcessingConfiguration {
    ///     width: Some(SizeValue::maximum(300)),
    ///     ..Default::default()
    /// };
    /// let task = ProcessingTask::new("CropScaleMask", file, config);
    ///
    /// assert_eq!(
    ///     ImageDimension::from_task(&task, ResizeType::Fit),
    ///     ImageDimension::new(300, 200)
    /// );
    /// ```
    pub fn from_task(task: &ProcessingTask, resize_type: ResizeType) -> Self {
        let config = &task.configuration;
        let file = &task.source_file;

        let base = match &config.crop {
            Some(crop) if !crop.is_empty() => crop.pixel_size(),
            _ => (file.width, file.height),
        };

        let target_width = config.width.and_then(|w| w.pixels).or(config.max_width);
        let target_height = config.height.and_then(|h| h.pixels).or(config.max_height);

        let resized = if base.0 == 0 || base.1 == 0 {
            (
                target_width.unwrap_or(base.0),
                target_height.unwrap_or(base.1),
            )
        } else {
            match resize_type {
                ResizeType::Fit => fit_within(base, target_width, target_height),
                ResizeType::Fill | ResizeType::Force => {
                    resize_to(base, target_width, target_height)
                }
            }
        };

        let bounded = apply_minimums(resized, config.min_width, config.min_height);

        let (width, height) = match config.dpr.filter(|dpr| *dpr > 1.0) {
            Some(dpr) => scale_dimensions(bounded, dpr),
            None => bounded,
        };

        Self { width, height }
    }
}

fn fit_within(base: (u32, u32), width: Option<u32>, height: Option<u32>) -> (u32, u32) {
    let scale_w = width.filter(|w| *w > 0).map(|w| w as f64 / base.0 as f64);
    let scale_h = height.filter(|h| *h > 0).map(|h| h as f64 / base.1 as f64);

    let scale = match (scale_w, scale_h) {
        (Some(w), Some(h)) => w.min(h),
        (Some(w), None) => w,
        (None, Some(h)) => h,
        (None, None) => 1.0,
    };

    scale_dimensions(base, scale.min(1.0))
}

fn resize_to(base: (u32, u32), width: Option<u32>, height: Option<u32>) -> (u32, u32) {
    match (width.filter(|w| *w > 0), height.filter(|h| *h > 0)) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => scale_dimensions(base, w as f64 / base.0 as f64),
        (None, Some(h)) => scale_dimensions(base, h as f64 / base.1 as f64),
        (None, None) => base,
    }
}

fn apply_minimums(dims: (u32, u32), min_width: Option<u32>, min_height: Option<u32>) -> (u32, u32) {
    let (width, height) = dims;
    let mut scale: f64 = 1.0;

    if let Some(min_width) = min_width.filter(|mw| width > 0 && *mw > width) {
        scale = scale.max(min_width as f64 / width as f64);
    }
    if let Some(min_height) = min_height.filter(|mh| height > 0 && *mh > height) {
        scale = scale.max(min_height as f64 / height as f64);
    }

    if scale > 1.0 {
        scale_dimensions(dims, scale)
    } else {
        dims
    }
}

/// Scale both sides, keeping unknown (0) sides at 0 and known sides >= 1
fn scale_dimensions(dims: (u32, u32), scale: f64) -> (u32, u32) {
    let scale_side = |side: u32| {
        if side == 0 {
            0
        } else {
            ((side as f64 * scale).round() as u32).max(1)
        }
    };
    (scale_side(dims.0), scale_side(dims.1))
}
