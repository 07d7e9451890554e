//! Read-only views handed to the render pass and the layer list.

use serde::{Deserialize, Serialize};

use crate::ordering::presentation_order;
use crate::selection::Selection;
use crate::{Layer, LayerCollection, LayerId, LayerKind};

/// Layers the render pass paints, bottom-to-top, hidden layers skipped.
pub fn render_stack(collection: &LayerCollection) -> impl Iterator<Item = &Layer> {
    collection.iter().filter(|l| l.visible())
}

/// One row of the layer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRow {
    /// Layer id.
    pub id: LayerId,
    /// Layer variant.
    pub kind: LayerKind,
    /// Position counted from the top, starting at 1.
    pub index_from_top: usize,
    /// Text shown in the row.
    pub label: String,
    /// Whether the eye toggle is on.
    pub visible: bool,
    /// Whether this row is highlighted.
    pub selected: bool,
}

/// Rows in presentation order for the list widget.
#[must_use]
pub fn layer_rows(collection: &LayerCollection, selection: &Selection) -> Vec<LayerRow> {
    presentation_order(collection)
        .enumerate()
        .map(|(i, layer)| LayerRow {
            id: layer.id(),
            kind: layer.kind(),
            index_from_top: i + 1,
            label: match layer.kind() {
                LayerKind::Frame => format!("{} (Frame)", layer.name()),
                LayerKind::Photo => layer.name().to_string(),
            },
            visible: layer.visible(),
            selected: selection.is_selected(layer.id()),
        })
        .collect()
}
