//! Geometry normalization: frame fitting, photo placement, and committing
//! surface gestures back into layer geometry.

use serde::{Deserialize, Serialize};

use crate::event::{DragEnd, TransformEnd};
use crate::PhotoLayer;

/// Width and height in frame-space units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Whether both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned box proposed by the handle overlay mid-gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

/// Initial placement of a newly added photo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// How the frame space is scaled onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageFit {
    /// Frame-space to screen-pixel factor.
    pub scale: f64,
    /// On-screen stage width in pixels.
    pub pixel_width: f64,
    /// On-screen stage height in pixels.
    pub pixel_height: f64,
}

/// Round to the nearest integer with halves going up, so `-2.5` becomes `-2`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Fit a decoded image into the viewport, preserving aspect ratio.
///
/// Landscape images (ratio above 1) take the viewport width; everything else
/// takes the viewport height. Results are rounded to whole units.
#[must_use]
pub fn fit_frame_to_viewport(image: Size, viewport: Size) -> Size {
    let ratio = image.aspect_ratio();
    if ratio > 1.0 {
        Size::new(
            round_half_up(viewport.width),
            round_half_up(viewport.width / ratio),
        )
    } else {
        Size::new(
            round_half_up(viewport.height * ratio),
            round_half_up(viewport.height),
        )
    }
}

/// Centered, aspect-correct placement for a photo of `natural` size in `frame`.
#[must_use]
pub fn place_photo(natural: Size, frame: Size, width_ratio: f64) -> Placement {
    let width = round_half_up(frame.width * width_ratio);
    let height = round_half_up(width * natural.height / natural.width);
    Placement {
        x: round_half_up((frame.width - width) / 2.0),
        y: round_half_up((frame.height - height) / 2.0),
        width,
        height,
    }
}

/// Raise a dimension to `min`. Non-finite values also collapse to `min`.
#[must_use]
pub fn clamp_dimension(value: f64, min: f64) -> f64 {
    if value.is_finite() {
        value.max(min)
    } else {
        min
    }
}

/// Write a drag's final position into the photo. Nothing else changes.
#[must_use]
pub fn commit_drag(photo: &PhotoLayer, end: &DragEnd) -> PhotoLayer {
    PhotoLayer {
        x: end.x,
        y: end.y,
        ..photo.clone()
    }
}

/// Absorb a resize/rotate gesture's scale into the photo's size.
///
/// Position and rotation are taken verbatim from the surface. Each dimension
/// is floored at `min_size`, whatever the scale factors were.
#[must_use]
pub fn commit_transform(photo: &PhotoLayer, end: &TransformEnd, min_size: f64) -> PhotoLayer {
    let raw_width = end.width * end.scale_x;
    let raw_height = end.height * end.scale_y;
    let width = clamp_dimension(raw_width, min_size);
    let height = clamp_dimension(raw_height, min_size);
    if !raw_width.is_finite()
        || !raw_height.is_finite()
        || raw_width < min_size
        || raw_height < min_size
    {
        tracing::debug!(
            layer_id = %photo.id,
            scale_x = end.scale_x,
            scale_y = end.scale_y,
            "Clamped transform commit to minimum size"
        );
    }
    PhotoLayer {
        x: end.x,
        y: end.y,
        width,
        height,
        rotation: end.rotation,
        ..photo.clone()
    }
}

/// Accept `proposed` only if both sides are finite and at least `min_size`.
#[must_use]
pub fn constrain_gesture_box(previous: BoundBox, proposed: BoundBox, min_size: f64) -> BoundBox {
    let usable = |side: f64| side.is_finite() && side >= min_size;
    if usable(proposed.width) && usable(proposed.height) {
        proposed
    } else {
        previous
    }
}

/// Scale the frame space to fit inside the viewport.
#[must_use]
pub fn stage_fit(viewport: Size, frame: Size) -> StageFit {
    let scale = if viewport.is_usable() && frame.is_usable() {
        (viewport.width / frame.width).min(viewport.height / frame.height)
    } else {
        1.0
    };
    StageFit {
        scale,
        pixel_width: round_half_up(frame.width * scale),
        pixel_height: round_half_up(frame.height * scale),
    }
}
