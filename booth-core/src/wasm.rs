//! WebAssembly bindings for booth-core.
//!
//! The browser editor owns the file picker, image decoding, the drawing
//! surface and the list widget; it forwards their events here and reads back
//! JSON views.

use wasm_bindgen::prelude::*;

use crate::import::IMAGE_ACCEPT_FILTER;
use crate::{
    ClickTarget, DecodedImage, DragEnd, Editor, EditorConfig, ImportKind, ImportTicket, LayerId,
    ReorderRequest, Size, TransformEnd,
};

/// Initialize the booth WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// The `accept` attribute for the frame and photo file inputs.
#[wasm_bindgen(js_name = acceptFilter)]
#[must_use]
pub fn accept_filter() -> String {
    IMAGE_ACCEPT_FILTER.to_string()
}

/// Editor instance for WASM.
#[wasm_bindgen]
pub struct WasmBooth {
    editor: Editor,
}

fn parse_id(id: &str) -> Option<LayerId> {
    LayerId::parse(id).ok()
}

#[wasm_bindgen]
impl WasmBooth {
    /// Create an editor with default configuration.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: Editor::default(),
        }
    }

    /// Create an editor from a (partial) JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error string if the config is malformed or invalid.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<WasmBooth, String> {
        let config = EditorConfig::from_json(json).map_err(|e| e.to_string())?;
        let editor = Editor::new(config).map_err(|e| e.to_string())?;
        Ok(Self { editor })
    }

    /// Report the available viewport size.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.editor.set_viewport(Size::new(width, height));
    }

    /// Start an import of kind `"frame"` or `"photo"` and return its ticket.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown kind.
    #[wasm_bindgen(js_name = beginImport)]
    pub fn begin_import(&mut self, kind: &str) -> Result<u64, String> {
        let kind = match kind {
            "frame" => ImportKind::Frame,
            "photo" => ImportKind::Photo,
            other => return Err(format!("unknown import kind: {other}")),
        };
        Ok(self.editor.begin_import(kind).value())
    }

    /// Finish an import once the image has decoded. Returns the layer id.
    ///
    /// # Errors
    ///
    /// Returns an error string if the dimensions are unusable or the ticket
    /// is not pending. The layer collection is unchanged in both cases.
    #[wasm_bindgen(js_name = completeImport)]
    pub fn complete_import(
        &mut self,
        ticket: u64,
        src: String,
        natural_w: f64,
        natural_h: f64,
    ) -> Result<String, String> {
        let ticket = ImportTicket::from_value(ticket);
        let image = match DecodedImage::new(src, natural_w, natural_h) {
            Ok(image) => image,
            Err(e) => {
                self.editor.abandon_import(ticket);
                return Err(e.to_string());
            }
        };
        self.editor
            .complete_import(ticket, &image)
            .map(|id| id.to_string())
            .map_err(|e| e.to_string())
    }

    /// Drop an import whose decode failed.
    #[wasm_bindgen(js_name = abandonImport)]
    pub fn abandon_import(&mut self, ticket: u64) {
        self.editor.abandon_import(ImportTicket::from_value(ticket));
    }

    /// Commit a drag-end. Returns whether anything changed.
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, id: &str, x: f64, y: f64) -> bool {
        parse_id(id).is_some_and(|id| self.editor.commit_drag(id, DragEnd { x, y }))
    }

    /// Commit a transform-end given as JSON
    /// (`{x, y, width, height, rotation, scaleX, scaleY}`).
    ///
    /// Returns the surface command JSON to apply, or `None` if nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error string if the event JSON is malformed.
    #[wasm_bindgen(js_name = transformEnd)]
    pub fn transform_end(&mut self, id: &str, event_json: &str) -> Result<Option<String>, String> {
        let end: TransformEnd = serde_json::from_str(event_json).map_err(|e| e.to_string())?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self
            .editor
            .commit_transform(id, end)
            .map(|command| serde_json::to_string(&command).unwrap_or_default()))
    }

    /// Apply a layer-list drop. Returns whether the order changed.
    pub fn reorder(&mut self, dragged_id: &str, dropped_on_id: Option<String>) -> bool {
        let Some(dragged_id) = parse_id(dragged_id) else {
            return false;
        };
        let dropped_on_id = dropped_on_id.as_deref().and_then(parse_id);
        self.editor.reorder(&ReorderRequest {
            dragged_id,
            dropped_on_id,
        })
    }

    /// Flip a layer's visibility.
    #[wasm_bindgen(js_name = toggleVisibility)]
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        parse_id(id).is_some_and(|id| self.editor.toggle_visibility(id))
    }

    /// A layer node on the canvas was clicked or tapped.
    #[wasm_bindgen(js_name = clickLayer)]
    pub fn click_layer(&mut self, id: &str) {
        if let Some(id) = parse_id(id) {
            self.editor.click(ClickTarget::Layer(id));
        }
    }

    /// Empty canvas background was clicked.
    #[wasm_bindgen(js_name = clickBackground)]
    pub fn click_background(&mut self) {
        self.editor.click(ClickTarget::Background);
    }

    /// A layer-list row was clicked.
    #[wasm_bindgen(js_name = clickRow)]
    pub fn click_row(&mut self, id: &str) {
        if let Some(id) = parse_id(id) {
            self.editor.click(ClickTarget::ListRow(id));
        }
    }

    /// Selected layer id, if any.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.editor.selected_id().map(|id| id.to_string())
    }

    /// Visible layers bottom-to-top as JSON.
    #[wasm_bindgen(js_name = getRenderStackJson)]
    #[must_use]
    pub fn get_render_stack_json(&self) -> String {
        let stack: Vec<_> = self.editor.render_stack().collect();
        serde_json::to_string(&stack).unwrap_or_default()
    }

    /// Layer-list rows top-to-bottom as JSON.
    #[wasm_bindgen(js_name = getLayerRowsJson)]
    #[must_use]
    pub fn get_layer_rows_json(&self) -> String {
        serde_json::to_string(&self.editor.layer_rows()).unwrap_or_default()
    }

    /// Handle overlay state as JSON.
    #[wasm_bindgen(js_name = getOverlayJson)]
    #[must_use]
    pub fn get_overlay_json(&self) -> String {
        serde_json::to_string(&self.editor.overlay()).unwrap_or_default()
    }

    /// Stage scale and on-screen pixel size as `[scale, width, height]`.
    #[wasm_bindgen(js_name = getStageFit)]
    #[must_use]
    pub fn get_stage_fit(&self) -> Vec<f64> {
        let fit = self.editor.stage_fit();
        vec![fit.scale, fit.pixel_width, fit.pixel_height]
    }

    /// Export the layout description as JSON.
    #[wasm_bindgen(js_name = exportLayoutJson)]
    #[must_use]
    pub fn export_layout_json(&self) -> String {
        self.editor.export().to_json_pretty().unwrap_or_default()
    }
}

impl Default for WasmBooth {
    fn default() -> Self {
        Self::new()
    }
}
