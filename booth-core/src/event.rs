//! Events emitted by the manipulation and reorder surfaces, and the intents
//! the editor applies.

use serde::{Deserialize, Serialize};

use crate::import::{DecodedImage, ImportTicket};
use crate::LayerId;

/// Post-drag state read from the manipulation surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragEnd {
    /// Node left edge after the drag, in frame space.
    pub x: f64,
    /// Node top edge after the drag, in frame space.
    pub y: f64,
}

/// Post-gesture state read from the manipulation surface after a resize or rotate.
///
/// `width`/`height` are the node's unscaled size; the gesture's effect on
/// size lives in `scale_x`/`scale_y` until it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformEnd {
    /// Node left edge.
    pub x: f64,
    /// Node top edge.
    pub y: f64,
    /// Unscaled node width.
    pub width: f64,
    /// Unscaled node height.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Horizontal scale applied by the gesture.
    pub scale_x: f64,
    /// Vertical scale applied by the gesture.
    pub scale_y: f64,
}

/// What a click or tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "id", rename_all = "camelCase")]
pub enum ClickTarget {
    /// A layer's rendered node on the canvas.
    Layer(LayerId),
    /// Empty canvas background.
    Background,
    /// A row in the layer list.
    ListRow(LayerId),
}

/// A completed drag in the layer list, expressed in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    /// The row being dragged.
    pub dragged_id: LayerId,
    /// The row it was dropped onto, if any.
    pub dropped_on_id: Option<LayerId>,
}

/// A user action for the editor to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// A pending image decode finished.
    ImportCompleted {
        /// Ticket returned when the import began.
        ticket: ImportTicket,
        /// The decoded image.
        image: DecodedImage,
    },
    /// A pending image decode failed or the pick was abandoned.
    ImportAbandoned(ImportTicket),
    /// A photo was dragged to a new position.
    Drag {
        /// The dragged layer.
        id: LayerId,
        /// Surface state after the drag.
        end: DragEnd,
    },
    /// A photo was resized or rotated.
    Transform {
        /// The transformed layer.
        id: LayerId,
        /// Surface state after the gesture.
        end: TransformEnd,
    },
    /// A layer-list row was dropped onto another.
    Reorder(ReorderRequest),
    /// A layer's eye toggle was pressed.
    ToggleVisibility(LayerId),
    /// A click or tap.
    Click(ClickTarget),
}
