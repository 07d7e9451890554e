//! Layers - the frame and the photos stacked on top of it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a layer, stable for the layer's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Create a new unique layer ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a layer ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to decoded image data (object URL, data URI, file path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSource(String);

impl ImageSource {
    /// Wrap an image reference.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    /// The raw reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageSource {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}

impl From<String> for ImageSource {
    fn from(src: String) -> Self {
        Self(src)
    }
}

/// Discriminant of a layer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// The background frame.
    Frame,
    /// A movable photo.
    Photo,
}

/// The background frame. At most one exists; it defines the coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameLayer {
    /// Unique identifier, preserved across frame replacement.
    pub id: LayerId,
    /// Display label.
    pub name: String,
    /// Whether the frame is painted.
    pub visible: bool,
    /// Decoded image reference.
    pub src: ImageSource,
    /// Logical width of the frame space, fixed at load time.
    pub natural_w: f64,
    /// Logical height of the frame space, fixed at load time.
    pub natural_h: f64,
}

/// A photo placed in frame space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoLayer {
    /// Unique identifier.
    pub id: LayerId,
    /// Display label.
    pub name: String,
    /// Whether the photo is painted.
    pub visible: bool,
    /// Decoded image reference.
    pub src: ImageSource,
    /// Left edge in frame space.
    pub x: f64,
    /// Top edge in frame space.
    pub y: f64,
    /// Current display width.
    pub width: f64,
    /// Current display height.
    pub height: f64,
    /// Rotation in degrees about the photo's own center.
    pub rotation: f64,
    /// Original decoded pixel width.
    pub natural_w: f64,
    /// Original decoded pixel height.
    pub natural_h: f64,
}

/// A layer in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Layer {
    /// The background frame.
    Frame(FrameLayer),
    /// A photo.
    Photo(PhotoLayer),
}

impl Layer {
    /// The layer's identifier.
    #[must_use]
    pub fn id(&self) -> LayerId {
        match self {
            Self::Frame(frame) => frame.id,
            Self::Photo(photo) => photo.id,
        }
    }

    /// The layer's variant.
    #[must_use]
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Frame(_) => LayerKind::Frame,
            Self::Photo(_) => LayerKind::Photo,
        }
    }

    /// Display label.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Frame(frame) => &frame.name,
            Self::Photo(photo) => &photo.name,
        }
    }

    /// Whether the layer is painted.
    #[must_use]
    pub fn visible(&self) -> bool {
        match self {
            Self::Frame(frame) => frame.visible,
            Self::Photo(photo) => photo.visible,
        }
    }

    /// Image reference.
    #[must_use]
    pub fn src(&self) -> &ImageSource {
        match self {
            Self::Frame(frame) => &frame.src,
            Self::Photo(photo) => &photo.src,
        }
    }

    /// Copy of this layer with `visible` flipped.
    #[must_use]
    pub fn with_visibility_toggled(&self) -> Self {
        let mut layer = self.clone();
        match &mut layer {
            Self::Frame(frame) => frame.visible = !frame.visible,
            Self::Photo(photo) => photo.visible = !photo.visible,
        }
        layer
    }

    /// The photo payload, if this is a photo.
    #[must_use]
    pub fn as_photo(&self) -> Option<&PhotoLayer> {
        match self {
            Self::Photo(photo) => Some(photo),
            Self::Frame(_) => None,
        }
    }

    /// The frame payload, if this is the frame.
    #[must_use]
    pub fn as_frame(&self) -> Option<&FrameLayer> {
        match self {
            Self::Frame(frame) => Some(frame),
            Self::Photo(_) => None,
        }
    }

    /// Whether this is the frame layer.
    #[must_use]
    pub fn is_frame(&self) -> bool {
        matches!(self, Self::Frame(_))
    }
}
