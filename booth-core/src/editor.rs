//! The editor: owns the current layer snapshot and the selection, and applies
//! user intents as whole-snapshot transitions.

use std::sync::Arc;

use crate::config::EditorConfig;
use crate::error::{BoothError, BoothResult};
use crate::event::{ClickTarget, DragEnd, Intent, ReorderRequest, TransformEnd};
use crate::export::{export_layout, LayoutDescription};
use crate::geometry::{self, fit_frame_to_viewport, Size, StageFit};
use crate::import::{DecodedImage, ImageProvider, ImportKind, ImportTicket, PendingImports};
use crate::ordering;
use crate::selection::{HandleOverlay, Selection};
use crate::surface::SurfaceCommand;
use crate::view::{self, LayerRow};
use crate::{Layer, LayerCollection, LayerId};

/// What applying an intent did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Outcome {
    /// Whether a new layer snapshot was committed.
    pub changed: bool,
    /// Follow-up for the manipulation surface, if any.
    pub surface: Option<SurfaceCommand>,
}

impl Outcome {
    fn noop() -> Self {
        Self::default()
    }

    fn committed() -> Self {
        Self {
            changed: true,
            surface: None,
        }
    }
}

/// Editor state for one composition.
#[derive(Debug, Clone)]
pub struct Editor {
    layers: Arc<LayerCollection>,
    selection: Selection,
    config: EditorConfig,
    viewport: Size,
    imports: PendingImports,
}

impl Editor {
    /// Create an empty editor.
    ///
    /// # Errors
    ///
    /// Returns [`BoothError::InvalidConfig`] if `config` fails
    /// [`EditorConfig::validate`].
    pub fn new(config: EditorConfig) -> BoothResult<Self> {
        config.validate()?;
        Ok(Self::with_checked_config(config))
    }

    fn with_checked_config(config: EditorConfig) -> Self {
        Self {
            layers: Arc::new(LayerCollection::new()),
            selection: Selection::new(),
            viewport: config.viewport,
            config,
            imports: PendingImports::new(),
        }
    }

    /// The current snapshot. Later transitions never modify it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<LayerCollection> {
        Arc::clone(&self.layers)
    }

    /// Borrow the current collection.
    #[must_use]
    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected layer id.
    #[must_use]
    pub fn selected_id(&self) -> Option<LayerId> {
        self.selection.selected()
    }

    /// Editor configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Viewport used to fit new frames.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Record the available viewport size. Degenerate sizes are ignored.
    pub fn set_viewport(&mut self, viewport: Size) {
        if viewport.is_usable() {
            self.viewport = viewport;
        } else {
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                "Ignoring degenerate viewport"
            );
        }
    }

    /// The frame space: the frame's natural size, or the configured fallback.
    #[must_use]
    pub fn frame_size(&self) -> Size {
        self.layers.frame_size_or(self.config.fallback_frame_size)
    }

    /// How the frame space fits on screen at the current viewport.
    #[must_use]
    pub fn stage_fit(&self) -> StageFit {
        geometry::stage_fit(self.viewport, self.frame_size())
    }

    fn commit(&mut self, next: LayerCollection) {
        self.layers = Arc::new(next);
        self.selection.retain_existing(&self.layers);
    }

    /// Start an import. The layer appears when [`Self::complete_import`] runs.
    pub fn begin_import(&mut self, kind: ImportKind) -> ImportTicket {
        let ticket = self.imports.begin(kind);
        tracing::debug!(%ticket, ?kind, "Import started");
        ticket
    }

    /// Number of imports still decoding.
    #[must_use]
    pub fn pending_imports(&self) -> usize {
        self.imports.len()
    }

    /// Insert the layer for a finished decode.
    ///
    /// Frame lookup, photo count and frame size are read now, not when the
    /// import began, so overlapping imports see each other's results.
    ///
    /// # Errors
    ///
    /// Returns [`BoothError::UnknownImport`] if `ticket` is not pending. The
    /// collection is left untouched in that case.
    pub fn complete_import(
        &mut self,
        ticket: ImportTicket,
        image: &DecodedImage,
    ) -> BoothResult<LayerId> {
        let kind = self
            .imports
            .finish(ticket)
            .ok_or(BoothError::UnknownImport(ticket.value()))?;
        let id = match kind {
            ImportKind::Frame => self.add_frame(image),
            ImportKind::Photo => self.add_photo(image),
        };
        tracing::info!(%ticket, layer_id = %id, ?kind, "Import completed");
        Ok(id)
    }

    /// Drop a pending import after a failed decode. Nothing is inserted.
    pub fn abandon_import(&mut self, ticket: ImportTicket) {
        if self.imports.finish(ticket).is_some() {
            tracing::warn!(%ticket, "Import abandoned");
        }
    }

    /// Pick-and-decode in one step with a synchronous provider.
    ///
    /// `handle` is `None` when the picker was dismissed. A cancelled pick or
    /// failed decode leaves the collection unchanged and returns `None`.
    pub fn import_with<P: ImageProvider>(
        &mut self,
        provider: &P,
        kind: ImportKind,
        handle: Option<P::Handle>,
    ) -> Option<LayerId> {
        let Some(handle) = handle else {
            tracing::debug!(?kind, "Image pick cancelled");
            return None;
        };
        let ticket = self.begin_import(kind);
        match provider.decode(handle) {
            Ok(image) => self.complete_import(ticket, &image).ok(),
            Err(e) => {
                tracing::warn!(%ticket, error = %e, "Image decode failed");
                self.abandon_import(ticket);
                None
            }
        }
    }

    /// Add or replace the frame, fitted to the viewport. Clears the selection.
    pub fn add_frame(&mut self, image: &DecodedImage) -> LayerId {
        let natural = fit_frame_to_viewport(image.size(), self.viewport);
        let (next, id) = self.layers.add_frame(image.src.clone(), natural, &self.config);
        self.commit(next);
        self.selection.clear();
        id
    }

    /// Add a photo centered in the frame space and select it.
    pub fn add_photo(&mut self, image: &DecodedImage) -> LayerId {
        let (next, id) = self.layers.add_photo(
            image.src.clone(),
            image.size(),
            self.frame_size(),
            self.layers.photo_count(),
            &self.config,
        );
        self.commit(next);
        self.selection.select(&self.layers, id);
        id
    }

    /// Commit a drag. Returns false for unknown ids and the frame.
    pub fn commit_drag(&mut self, id: LayerId, end: DragEnd) -> bool {
        match self.layers.update_photo(id, |photo| geometry::commit_drag(photo, &end)) {
            Some(next) => {
                tracing::debug!(layer_id = %id, x = end.x, y = end.y, "Committed drag");
                self.commit(next);
                true
            }
            None => false,
        }
    }

    /// Commit a resize/rotate. The returned command resets the node's scale.
    pub fn commit_transform(&mut self, id: LayerId, end: TransformEnd) -> Option<SurfaceCommand> {
        let min = self.config.min_commit_size;
        let next = self
            .layers
            .update_photo(id, |photo| geometry::commit_transform(photo, &end, min))?;
        let photo = next.get(id).and_then(Layer::as_photo)?;
        let command = SurfaceCommand::AbsorbScale {
            id,
            width: photo.width,
            height: photo.height,
        };
        tracing::debug!(
            layer_id = %id,
            width = photo.width,
            height = photo.height,
            rotation = photo.rotation,
            "Committed transform"
        );
        self.commit(next);
        Some(command)
    }

    /// Apply a layer-list drop. Returns false when nothing moved.
    pub fn reorder(&mut self, request: &ReorderRequest) -> bool {
        match ordering::apply_request(&self.layers, request) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    /// Flip a layer's visibility. Returns false for unknown ids.
    pub fn toggle_visibility(&mut self, id: LayerId) -> bool {
        if !self.layers.contains(id) {
            return false;
        }
        let next = self.layers.toggle_visibility(id);
        self.commit(next);
        true
    }

    /// Route a click to the selection.
    pub fn click(&mut self, target: ClickTarget) {
        self.selection.handle_click(&self.layers, target);
    }

    /// Apply any intent.
    pub fn apply(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::ImportCompleted { ticket, image } => {
                match self.complete_import(ticket, &image) {
                    Ok(_) => Outcome::committed(),
                    Err(e) => {
                        tracing::warn!(error = %e, "Ignoring import completion");
                        Outcome::noop()
                    }
                }
            }
            Intent::ImportAbandoned(ticket) => {
                self.abandon_import(ticket);
                Outcome::noop()
            }
            Intent::Drag { id, end } => Outcome {
                changed: self.commit_drag(id, end),
                surface: None,
            },
            Intent::Transform { id, end } => {
                let surface = self.commit_transform(id, end);
                Outcome {
                    changed: surface.is_some(),
                    surface,
                }
            }
            Intent::Reorder(request) => Outcome {
                changed: self.reorder(&request),
                surface: None,
            },
            Intent::ToggleVisibility(id) => Outcome {
                changed: self.toggle_visibility(id),
                surface: None,
            },
            Intent::Click(target) => {
                self.click(target);
                Outcome::noop()
            }
        }
    }

    /// The handle overlay for the current selection.
    #[must_use]
    pub fn overlay(&self) -> HandleOverlay {
        HandleOverlay::for_selection(&self.selection, &self.layers, self.config.min_gesture_size)
    }

    /// Layers to paint, bottom-to-top.
    pub fn render_stack(&self) -> impl Iterator<Item = &Layer> {
        view::render_stack(&self.layers)
    }

    /// Rows for the layer list, top-to-bottom.
    #[must_use]
    pub fn layer_rows(&self) -> Vec<LayerRow> {
        view::layer_rows(&self.layers, &self.selection)
    }

    /// Export the current layout.
    #[must_use]
    pub fn export(&self) -> LayoutDescription {
        let layout = export_layout(&self.layers, self.frame_size());
        tracing::info!(layers = layout.stack_bottom_to_top.len(), "Exported layout");
        layout
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_checked_config(EditorConfig::default())
    }
}
