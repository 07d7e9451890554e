//! Z-order: storage order (bottom-to-top) and the presentation order
//! (top-to-bottom) shown in the layer list.
//!
//! Only storage order is stored. Presentation order is always derived by
//! reversal, and reorders coming from the list are translated back through
//! layer ids rather than indices.

use std::collections::HashMap;

use crate::event::ReorderRequest;
use crate::{Layer, LayerCollection, LayerId};

/// Ids in presentation order: `presentation[i] == storage[n - 1 - i]`.
#[must_use]
pub fn presentation_ids(collection: &LayerCollection) -> Vec<LayerId> {
    collection.iter().rev().map(Layer::id).collect()
}

/// Layers in presentation order.
pub fn presentation_order(collection: &LayerCollection) -> impl Iterator<Item = &Layer> {
    collection.iter().rev()
}

/// Move `items[from]` to `to`, shifting everything in between by one.
///
/// Out-of-range indices leave `items` unchanged.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Apply a list drag: `dragged` takes the presentation slot of `dropped_on`.
///
/// Returns `None` (nothing to commit) when there is no drop target, the
/// target is the dragged row itself, or either id is unknown.
#[must_use]
pub fn reorder(
    collection: &LayerCollection,
    dragged: LayerId,
    dropped_on: Option<LayerId>,
) -> Option<LayerCollection> {
    let Some(dropped_on) = dropped_on else {
        tracing::debug!(layer_id = %dragged, "Reorder ignored, no drop target");
        return None;
    };
    if dragged == dropped_on {
        return None;
    }

    let mut ids = presentation_ids(collection);
    let from = ids.iter().position(|id| *id == dragged);
    let to = ids.iter().position(|id| *id == dropped_on);
    let (Some(from), Some(to)) = (from, to) else {
        tracing::debug!(
            dragged = %dragged,
            dropped_on = %dropped_on,
            "Reorder ignored, unknown layer"
        );
        return None;
    };

    array_move(&mut ids, from, to);
    ids.reverse();

    let by_id: HashMap<LayerId, &Layer> = collection.iter().map(|l| (l.id(), l)).collect();
    let layers = ids
        .iter()
        .map(|id| by_id.get(id).map(|l| (*l).clone()))
        .collect::<Option<Vec<_>>>()?;

    tracing::debug!(
        layer_id = %dragged,
        from,
        to,
        "Reordered layer in presentation order"
    );
    LayerCollection::from_layers(layers).ok()
}

/// [`reorder`] driven by a reorder-surface event.
#[must_use]
pub fn apply_request(
    collection: &LayerCollection,
    request: &ReorderRequest,
) -> Option<LayerCollection> {
    reorder(collection, request.dragged_id, request.dropped_on_id)
}

/// [`reorder`] addressed by presentation indices.
#[must_use]
pub fn reorder_by_index(
    collection: &LayerCollection,
    from: usize,
    to: usize,
) -> Option<LayerCollection> {
    let ids = presentation_ids(collection);
    let dragged = *ids.get(from)?;
    let dropped_on = *ids.get(to)?;
    reorder(collection, dragged, Some(dropped_on))
}
