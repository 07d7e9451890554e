//! The ordered layer collection and its transitions.
//!
//! Storage order is bottom-to-top: index 0 is painted first. Every transition
//! borrows the current collection and returns a new one, so a snapshot handed
//! to a renderer never changes underneath it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::error::{BoothError, BoothResult};
use crate::geometry::{place_photo, Size};
use crate::{FrameLayer, ImageSource, Layer, LayerId, PhotoLayer};

/// Layers in bottom-to-top order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerCollection {
    layers: Vec<Layer>,
}

impl LayerCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from bottom-to-top layers.
    ///
    /// # Errors
    ///
    /// Returns [`BoothError::InvalidCollection`] if ids repeat or more than
    /// one frame is present.
    pub fn from_layers(layers: Vec<Layer>) -> BoothResult<Self> {
        let mut seen = HashSet::with_capacity(layers.len());
        for layer in &layers {
            if !seen.insert(layer.id()) {
                return Err(BoothError::InvalidCollection(format!(
                    "duplicate layer id {}",
                    layer.id()
                )));
            }
        }
        if layers.iter().filter(|l| l.is_frame()).count() > 1 {
            return Err(BoothError::InvalidCollection(
                "more than one frame layer".to_string(),
            ));
        }
        Ok(Self { layers })
    }

    /// All layers, bottom-to-top.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Iterate bottom-to-top.
    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    /// Layer ids, bottom-to-top.
    #[must_use]
    pub fn ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(Layer::id).collect()
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Look up a layer by id.
    #[must_use]
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    /// Storage index of a layer.
    #[must_use]
    pub fn position(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    /// Whether a layer with this id exists.
    #[must_use]
    pub fn contains(&self, id: LayerId) -> bool {
        self.position(id).is_some()
    }

    /// The frame layer, if one has been added.
    #[must_use]
    pub fn frame(&self) -> Option<&FrameLayer> {
        self.layers.iter().find_map(Layer::as_frame)
    }

    /// Number of photo layers.
    #[must_use]
    pub fn photo_count(&self) -> usize {
        self.layers.iter().filter(|l| !l.is_frame()).count()
    }

    /// The frame's natural size, or `fallback` without a frame.
    #[must_use]
    pub fn frame_size_or(&self, fallback: Size) -> Size {
        self.frame()
            .map_or(fallback, |f| Size::new(f.natural_w, f.natural_h))
    }

    /// Add or replace the frame.
    ///
    /// An existing frame keeps its id and storage position; only its image,
    /// size, name and visibility are overwritten. Otherwise a new frame is
    /// appended on top.
    #[must_use]
    pub fn add_frame(
        &self,
        src: ImageSource,
        natural: Size,
        config: &EditorConfig,
    ) -> (Self, LayerId) {
        let existing = self.frame().map(|f| f.id);
        let id = existing.unwrap_or_default();
        let frame = Layer::Frame(FrameLayer {
            id,
            name: config.frame_name.clone(),
            visible: true,
            src,
            natural_w: natural.width,
            natural_h: natural.height,
        });

        let layers = if existing.is_some() {
            tracing::info!(layer_id = %id, "Replacing frame in place");
            self.layers
                .iter()
                .map(|l| if l.is_frame() { frame.clone() } else { l.clone() })
                .collect()
        } else {
            tracing::info!(layer_id = %id, "Adding frame");
            let mut layers = self.layers.clone();
            layers.push(frame);
            layers
        };
        (Self { layers }, id)
    }

    /// Append a new photo centered in `frame` at the configured width ratio.
    ///
    /// `photo_count` is the number of photos already present and drives the
    /// default name.
    #[must_use]
    pub fn add_photo(
        &self,
        src: ImageSource,
        natural: Size,
        frame: Size,
        photo_count: usize,
        config: &EditorConfig,
    ) -> (Self, LayerId) {
        let placement = place_photo(natural, frame, config.photo_width_ratio);
        let photo = PhotoLayer {
            id: LayerId::new(),
            name: config.photo_name(photo_count),
            visible: true,
            src,
            x: placement.x,
            y: placement.y,
            width: placement.width,
            height: placement.height,
            rotation: 0.0,
            natural_w: natural.width,
            natural_h: natural.height,
        };
        let id = photo.id;
        tracing::debug!(
            layer_id = %id,
            name = %photo.name,
            x = photo.x,
            y = photo.y,
            width = photo.width,
            height = photo.height,
            "Adding photo"
        );

        let mut layers = self.layers.clone();
        layers.push(Layer::Photo(photo));
        (Self { layers }, id)
    }

    /// Flip visibility of one layer. Unknown ids leave the collection as is.
    #[must_use]
    pub fn toggle_visibility(&self, id: LayerId) -> Self {
        if !self.contains(id) {
            tracing::debug!(layer_id = %id, "Toggle ignored, unknown layer");
            return self.clone();
        }
        let layers = self
            .layers
            .iter()
            .map(|l| {
                if l.id() == id {
                    l.with_visibility_toggled()
                } else {
                    l.clone()
                }
            })
            .collect();
        Self { layers }
    }

    /// Replace the photo `id` with `update(photo)`.
    ///
    /// Returns `None` when `id` is unknown or names the frame.
    #[must_use]
    pub fn update_photo<F>(&self, id: LayerId, update: F) -> Option<Self>
    where
        F: FnOnce(&PhotoLayer) -> PhotoLayer,
    {
        let index = self.position(id)?;
        let updated = update(self.layers[index].as_photo()?);
        let mut layers = self.layers.clone();
        layers[index] = Layer::Photo(updated);
        Some(Self { layers })
    }

    /// Rebuild the collection in the given bottom-to-top id order.
    ///
    /// Returns `None` unless `order` is a permutation of the current ids.
    #[must_use]
    pub fn reordered(&self, order: &[LayerId]) -> Option<Self> {
        if order.len() != self.layers.len() {
            return None;
        }
        let layers = order
            .iter()
            .map(|id| self.get(*id).cloned())
            .collect::<Option<Vec<_>>>()?;
        Self::from_layers(layers).ok()
    }
}

impl TryFrom<Vec<Layer>> for LayerCollection {
    type Error = BoothError;

    fn try_from(layers: Vec<Layer>) -> BoothResult<Self> {
        Self::from_layers(layers)
    }
}

impl From<LayerCollection> for Vec<Layer> {
    fn from(collection: LayerCollection) -> Self {
        collection.layers
    }
}

impl<'a> IntoIterator for &'a LayerCollection {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
