//! Selection and the transform-handle overlay.

use serde::{Deserialize, Serialize};

use crate::event::ClickTarget;
use crate::geometry::{constrain_gesture_box, BoundBox};
use crate::{Layer, LayerCollection, LayerId};

/// Resize anchors on the handle overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

/// Every anchor the overlay enables.
pub const ALL_ANCHORS: [Anchor; 8] = [
    Anchor::TopLeft,
    Anchor::TopRight,
    Anchor::BottomLeft,
    Anchor::BottomRight,
    Anchor::Left,
    Anchor::Right,
    Anchor::Top,
    Anchor::Bottom,
];

/// The single active layer, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<LayerId>,
}

impl Selection {
    /// Nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected layer id.
    #[must_use]
    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: LayerId) -> bool {
        self.selected == Some(id)
    }

    /// Select `id` if it exists in `collection`; otherwise leave selection alone.
    pub fn select(&mut self, collection: &LayerCollection, id: LayerId) {
        if collection.contains(id) {
            self.selected = Some(id);
        } else {
            tracing::debug!(layer_id = %id, "Select ignored, unknown layer");
        }
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Route a click.
    ///
    /// The frame is not hit-testable on the canvas, so a canvas click on it
    /// behaves like a background click. List rows select any layer, frame
    /// included.
    pub fn handle_click(&mut self, collection: &LayerCollection, target: ClickTarget) {
        match target {
            ClickTarget::Background => self.clear(),
            ClickTarget::Layer(id) => match collection.get(id) {
                Some(layer) if layer.is_frame() => self.clear(),
                Some(_) => self.selected = Some(id),
                None => tracing::debug!(layer_id = %id, "Click ignored, unknown layer"),
            },
            ClickTarget::ListRow(id) => self.select(collection, id),
        }
    }

    /// Drop the selection if it no longer names a layer in `collection`.
    pub fn retain_existing(&mut self, collection: &LayerCollection) {
        if let Some(id) = self.selected {
            if !collection.contains(id) {
                self.selected = None;
            }
        }
    }
}

/// The rotate/resize handle overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleOverlay {
    /// The photo the overlay is attached to, or `None` when detached.
    pub bound_to: Option<LayerId>,
    /// Whether the rotate handle is shown.
    pub rotate_enabled: bool,
    /// Enabled resize anchors.
    pub anchors: [Anchor; 8],
    /// Live minimum box size during a resize.
    pub min_size: f64,
}

impl HandleOverlay {
    /// Attach to the selected layer only when it is a visible photo.
    #[must_use]
    pub fn for_selection(
        selection: &Selection,
        collection: &LayerCollection,
        min_size: f64,
    ) -> Self {
        let bound_to = selection
            .selected()
            .and_then(|id| collection.get(id))
            .and_then(Layer::as_photo)
            .filter(|photo| photo.visible)
            .map(|photo| photo.id);
        Self {
            bound_to,
            rotate_enabled: true,
            anchors: ALL_ANCHORS,
            min_size,
        }
    }

    /// Whether the overlay is attached to anything.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.bound_to.is_some()
    }

    /// Keep `previous` if `proposed` would shrink below the live minimum.
    #[must_use]
    pub fn bound_box(&self, previous: BoundBox, proposed: BoundBox) -> BoundBox {
        constrain_gesture_box(previous, proposed, self.min_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::EditorConfig;

    fn frame_and_photo() -> (LayerCollection, LayerId, LayerId) {
        let config = EditorConfig::default();
        let size = Size::new(800.0, 600.0);
        let (c, frame) = LayerCollection::new().add_frame("blob:f".into(), size, &config);
        let (c, photo) = c.add_photo("blob:p".into(), Size::new(10.0, 10.0), size, 0, &config);
        (c, frame, photo)
    }

    #[test]
    fn test_click_photo_then_background() {
        let (collection, _, photo) = frame_and_photo();
        let mut selection = Selection::new();
        selection.handle_click(&collection, ClickTarget::Layer(photo));
        assert!(selection.is_selected(photo));
        selection.handle_click(&collection, ClickTarget::Background);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_canvas_click_on_frame_clears() {
        let (collection, frame, photo) = frame_and_photo();
        let mut selection = Selection::new();
        selection.select(&collection, photo);
        selection.handle_click(&collection, ClickTarget::Layer(frame));
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_list_row_selects_frame_without_overlay() {
        let (collection, frame, _) = frame_and_photo();
        let mut selection = Selection::new();
        selection.handle_click(&collection, ClickTarget::ListRow(frame));
        assert!(selection.is_selected(frame));

        let overlay = HandleOverlay::for_selection(&selection, &collection, 40.0);
        assert!(!overlay.is_attached());
    }

    #[test]
    fn test_overlay_binds_to_visible_photo_only() {
        let (collection, _, photo) = frame_and_photo();
        let mut selection = Selection::new();
        selection.select(&collection, photo);

        let overlay = HandleOverlay::for_selection(&selection, &collection, 40.0);
        assert_eq!(overlay.bound_to, Some(photo));
        assert!(overlay.rotate_enabled);
        assert_eq!(overlay.anchors.len(), 8);

        let hidden = collection.toggle_visibility(photo);
        assert!(!HandleOverlay::for_selection(&selection, &hidden, 40.0).is_attached());
        assert!(!HandleOverlay::for_selection(&Selection::new(), &collection, 40.0).is_attached());
    }

    #[test]
    fn test_overlay_json_uses_camel_case() {
        let (collection, _, photo) = frame_and_photo();
        let mut selection = Selection::new();
        selection.select(&collection, photo);

        let overlay = HandleOverlay::for_selection(&selection, &collection, 40.0);
        let json = serde_json::to_value(overlay).expect("serialize");
        assert_eq!(json["boundTo"], photo.to_string());
        assert_eq!(json["rotateEnabled"], true);
        assert_eq!(json["minSize"], 40.0);
        assert!(json.get("bound_to").is_none());
    }

    #[test]
    fn test_unknown_ids_leave_selection() {
        let (collection, _, photo) = frame_and_photo();
        let mut selection = Selection::new();
        selection.select(&collection, photo);
        selection.handle_click(&collection, ClickTarget::ListRow(LayerId::new()));
        selection.handle_click(&collection, ClickTarget::Layer(LayerId::new()));
        assert!(selection.is_selected(photo));

        selection.retain_existing(&LayerCollection::new());
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_anchor_names_match_overlay_config() {
        let json = serde_json::to_string(&ALL_ANCHORS).expect("serialize");
        assert_eq!(
            json,
            r#"["top-left","top-right","bottom-left","bottom-right","left","right","top","bottom"]"#
        );
    }
}
