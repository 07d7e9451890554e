//! Layout export - the structured description downstream renderers consume.
//!
//! Field names and the bottom-to-top stack order are a compatibility
//! contract:
//!
//! ```json
//! {
//!   "frameSize": { "w": 1680, "h": 844 },
//!   "stackBottomToTop": [
//!     { "type": "frame", "id": "...", "name": "Frame", "visible": true, "src": "...",
//!       "naturalW": 1680, "naturalH": 844 },
//!     { "type": "photo", "id": "...", "name": "Photo 1", "visible": true, "src": "...",
//!       "x": 504, "y": 86, "width": 672, "height": 672, "rotation": 0,
//!       "naturalW": 500, "naturalH": 500 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::BoothResult;
use crate::geometry::Size;
use crate::{ImageSource, Layer, LayerCollection, LayerId};

/// Frame dimensions in the exported layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    /// Frame width.
    pub w: f64,
    /// Frame height.
    pub h: f64,
}

/// Exported frame entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEntry {
    /// Layer id.
    pub id: LayerId,
    /// Display label.
    pub name: String,
    /// Visibility.
    pub visible: bool,
    /// Image reference.
    pub src: ImageSource,
    /// Logical frame width.
    #[serde(rename = "naturalW")]
    pub natural_w: f64,
    /// Logical frame height.
    #[serde(rename = "naturalH")]
    pub natural_h: f64,
}

/// Exported photo entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoEntry {
    /// Layer id.
    pub id: LayerId,
    /// Display label.
    pub name: String,
    /// Visibility.
    pub visible: bool,
    /// Image reference.
    pub src: ImageSource,
    /// Left edge in frame space.
    pub x: f64,
    /// Top edge in frame space.
    pub y: f64,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Original pixel width.
    #[serde(rename = "naturalW")]
    pub natural_w: f64,
    /// Original pixel height.
    #[serde(rename = "naturalH")]
    pub natural_h: f64,
}

/// One entry of the exported stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StackEntry {
    /// A photo.
    Photo(PhotoEntry),
    /// The frame.
    Frame(FrameEntry),
}

impl StackEntry {
    /// Id of the exported layer.
    #[must_use]
    pub fn id(&self) -> LayerId {
        match self {
            Self::Photo(photo) => photo.id,
            Self::Frame(frame) => frame.id,
        }
    }
}

impl From<&Layer> for StackEntry {
    fn from(layer: &Layer) -> Self {
        match layer {
            Layer::Photo(photo) => Self::Photo(PhotoEntry {
                id: photo.id,
                name: photo.name.clone(),
                visible: photo.visible,
                src: photo.src.clone(),
                x: photo.x,
                y: photo.y,
                width: photo.width,
                height: photo.height,
                rotation: photo.rotation,
                natural_w: photo.natural_w,
                natural_h: photo.natural_h,
            }),
            Layer::Frame(frame) => Self::Frame(FrameEntry {
                id: frame.id,
                name: frame.name.clone(),
                visible: frame.visible,
                src: frame.src.clone(),
                natural_w: frame.natural_w,
                natural_h: frame.natural_h,
            }),
        }
    }
}

/// Snapshot of a composition for later rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDescription {
    /// Frame-space dimensions.
    pub frame_size: FrameSize,
    /// Every layer, hidden ones included, in storage order.
    pub stack_bottom_to_top: Vec<StackEntry>,
}

impl LayoutDescription {
    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BoothResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> BoothResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a layout produced by [`export_layout`].
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the layout shape.
    pub fn from_json(json: &str) -> BoothResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Describe `collection` in a frame space of `frame_size`. Pure.
#[must_use]
pub fn export_layout(collection: &LayerCollection, frame_size: Size) -> LayoutDescription {
    LayoutDescription {
        frame_size: FrameSize {
            w: frame_size.width,
            h: frame_size.height,
        },
        stack_bottom_to_top: collection.iter().map(StackEntry::from).collect(),
    }
}
