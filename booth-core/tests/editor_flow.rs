//! Editor Flow Integration Tests
//!
//! Drives the editor the way the browser shell does:
//! - Frame and photo imports through tickets
//! - Drag, transform and list reorder commits
//! - Selection and the handle overlay
//! - Layout export

use booth_core::{
    ClickTarget, DecodedImage, DragEnd, Editor, ImageProvider, ImportKind, Intent, LayerKind,
    LayoutDescription, NodeRegistry, ReorderRequest, StackEntry, SurfaceNode, TransformEnd,
};
use booth_core::{BoothError, BoothResult, Layer, LayerId};

fn image(src: &str, w: f64, h: f64) -> DecodedImage {
    DecodedImage::new(src, w, h).expect("valid image")
}

fn photo(editor: &Editor, id: LayerId) -> booth_core::PhotoLayer {
    editor
        .layers()
        .get(id)
        .and_then(Layer::as_photo)
        .cloned()
        .expect("photo layer")
}

/// Provider that decodes fixed-size images, or fails for a "broken" handle.
struct StubProvider;

impl ImageProvider for StubProvider {
    type Handle = &'static str;

    fn decode(&self, handle: Self::Handle) -> BoothResult<DecodedImage> {
        if handle == "broken" {
            return Err(BoothError::ImageDecode("truncated file".to_string()));
        }
        DecodedImage::new(handle, 500.0, 500.0)
    }
}

#[derive(Debug, Default)]
struct KonvaLikeNode {
    width: f64,
    height: f64,
    scale_x: f64,
    scale_y: f64,
}

impl SurfaceNode for KonvaLikeNode {
    fn absorb_scale(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.scale_x = 1.0;
        self.scale_y = 1.0;
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_landscape_frame_fits_viewport_width() {
    let mut editor = Editor::default();
    let ticket = editor.begin_import(ImportKind::Frame);
    editor
        .complete_import(ticket, &image("blob:frame", 1680.0, 844.0))
        .expect("pending");

    let frame = editor.layers().frame().expect("frame");
    assert!((frame.natural_w - 1000.0).abs() < f64::EPSILON);
    // 1000 / (1680 / 844) = 502.38, rounded
    assert!((frame.natural_h - 502.0).abs() < f64::EPSILON);
}

#[test]
fn test_first_photo_placed_at_forty_percent_centered() {
    let mut editor = Editor::default();
    // Frame space of 1680 x 844 is the fallback before any frame exists
    let id = editor.add_photo(&image("blob:p", 500.0, 500.0));
    let placed = photo(&editor, id);

    assert_eq!(placed.name, "Photo 1");
    assert!((placed.width - 672.0).abs() < f64::EPSILON);
    assert!((placed.height - 672.0).abs() < f64::EPSILON);
    assert!((placed.x - 504.0).abs() < f64::EPSILON);
    assert!((placed.y - 86.0).abs() < f64::EPSILON);
    assert!(placed.rotation.abs() < f64::EPSILON);
}

#[test]
fn test_drag_top_photo_onto_frame_row() {
    let mut editor = Editor::default();
    let frame = editor.add_frame(&image("blob:f", 1680.0, 844.0));
    let a = editor.add_photo(&image("blob:a", 100.0, 100.0));
    let b = editor.add_photo(&image("blob:b", 100.0, 100.0));

    let rows: Vec<_> = editor.layer_rows().iter().map(|r| r.id).collect();
    assert_eq!(rows, vec![b, a, frame]);

    assert!(editor.reorder(&ReorderRequest {
        dragged_id: b,
        dropped_on_id: Some(frame),
    }));

    let rows: Vec<_> = editor.layer_rows().iter().map(|r| r.id).collect();
    assert_eq!(rows, vec![a, frame, b]);
    assert_eq!(editor.layers().ids(), vec![b, frame, a]);
}

#[test]
fn test_transform_commit_floors_height() {
    let mut editor = Editor::default();
    let id = editor.add_photo(&image("blob:a", 100.0, 50.0));

    let mut registry = NodeRegistry::new();
    registry.register(
        id,
        KonvaLikeNode {
            width: 100.0,
            height: 50.0,
            scale_x: 2.0,
            scale_y: 0.1,
        },
    );

    let outcome = editor.apply(Intent::Transform {
        id,
        end: TransformEnd {
            x: 40.0,
            y: 60.0,
            width: 100.0,
            height: 50.0,
            rotation: 45.0,
            scale_x: 2.0,
            scale_y: 0.1,
        },
    });
    assert!(outcome.changed);
    let command = outcome.surface.expect("scale reset");
    assert!(registry.apply(&command));

    let committed = photo(&editor, id);
    assert!((committed.width - 200.0).abs() < f64::EPSILON);
    assert!((committed.height - 20.0).abs() < f64::EPSILON);
    assert!((committed.rotation - 45.0).abs() < f64::EPSILON);
    assert!((committed.x - 40.0).abs() < f64::EPSILON);

    let node = registry.get(id).expect("node");
    assert!((node.scale_x - 1.0).abs() < f64::EPSILON);
    assert!((node.scale_y - 1.0).abs() < f64::EPSILON);
    assert!((node.width - 200.0).abs() < f64::EPSILON);
}

#[test]
fn test_repeated_transforms_compose_without_compounding() {
    let mut editor = Editor::default();
    let id = editor.add_photo(&image("blob:a", 100.0, 100.0));
    let start = photo(&editor, id);

    // Surface reports unscaled size after each reset
    let mut width = start.width;
    let mut height = start.height;
    for _ in 0..2 {
        let command = editor
            .commit_transform(
                id,
                TransformEnd {
                    x: 0.0,
                    y: 0.0,
                    width,
                    height,
                    rotation: 0.0,
                    scale_x: 0.5,
                    scale_y: 0.5,
                },
            )
            .expect("committed");
        let booth_core::SurfaceCommand::AbsorbScale {
            width: w,
            height: h,
            ..
        } = command;
        width = w;
        height = h;
    }

    let committed = photo(&editor, id);
    assert!((committed.width - start.width / 4.0).abs() < f64::EPSILON);
    assert!((committed.height - start.height / 4.0).abs() < f64::EPSILON);
}

// ============================================================================
// Import Boundary Tests
// ============================================================================

#[test]
fn test_cancelled_pick_and_failed_decode_change_nothing() {
    let mut editor = Editor::default();
    assert!(editor
        .import_with(&StubProvider, ImportKind::Photo, None)
        .is_none());
    assert!(editor
        .import_with(&StubProvider, ImportKind::Photo, Some("broken"))
        .is_none());
    assert!(editor.layers().is_empty());
    assert_eq!(editor.pending_imports(), 0);

    let id = editor
        .import_with(&StubProvider, ImportKind::Photo, Some("blob:ok"))
        .expect("imported");
    assert_eq!(editor.selected_id(), Some(id));
}

#[test]
fn test_frame_replacement_keeps_id_and_clears_selection() {
    let mut editor = Editor::default();
    let first = editor
        .import_with(&StubProvider, ImportKind::Frame, Some("blob:f1"))
        .expect("frame");
    let p = editor.add_photo(&image("blob:p", 100.0, 100.0));
    assert_eq!(editor.selected_id(), Some(p));

    let second = editor
        .import_with(&StubProvider, ImportKind::Frame, Some("blob:f2"))
        .expect("frame");
    assert_eq!(first, second);
    assert_eq!(editor.selected_id(), None);
    assert_eq!(editor.layers().ids(), vec![first, p]);
    assert_eq!(
        editor.layers().frame().map(|f| f.src.as_str().to_string()),
        Some("blob:f2".to_string())
    );
}

#[test]
fn test_photos_added_before_and_after_frame_use_current_frame_space() {
    let mut editor = Editor::default();
    let before = editor.add_photo(&image("blob:a", 500.0, 500.0));
    editor.add_frame(&image("blob:f", 800.0, 1600.0));
    let after = editor.add_photo(&image("blob:b", 500.0, 500.0));

    // Portrait frame fits the 700 tall viewport: 350 x 700
    assert!((photo(&editor, before).width - 672.0).abs() < f64::EPSILON);
    assert!((photo(&editor, after).width - 140.0).abs() < f64::EPSILON);
    assert_eq!(photo(&editor, after).name, "Photo 2");
}

// ============================================================================
// Selection Tests
// ============================================================================

#[test]
fn test_overlay_follows_selection() {
    let mut editor = Editor::default();
    let frame = editor.add_frame(&image("blob:f", 1680.0, 844.0));
    let p = editor.add_photo(&image("blob:p", 100.0, 100.0));
    assert_eq!(editor.overlay().bound_to, Some(p));

    editor.click(ClickTarget::ListRow(frame));
    assert_eq!(editor.selected_id(), Some(frame));
    assert!(!editor.overlay().is_attached());

    editor.click(ClickTarget::Layer(p));
    assert!(editor.overlay().is_attached());

    editor.toggle_visibility(p);
    assert_eq!(editor.selected_id(), Some(p));
    assert!(!editor.overlay().is_attached());

    editor.click(ClickTarget::Background);
    assert_eq!(editor.selected_id(), None);
}

#[test]
fn test_overlay_rejects_undersized_gesture_boxes() {
    let mut editor = Editor::default();
    editor.add_photo(&image("blob:p", 100.0, 100.0));
    let overlay = editor.overlay();

    let old = booth_core::BoundBox {
        x: 0.0,
        y: 0.0,
        width: 120.0,
        height: 80.0,
        rotation: 0.0,
    };
    let collapsed = booth_core::BoundBox { height: 39.9, ..old };
    assert_eq!(overlay.bound_box(old, collapsed), old);
}

#[test]
fn test_drag_commit_moves_only_target() {
    let mut editor = Editor::default();
    let a = editor.add_photo(&image("blob:a", 100.0, 100.0));
    let b = editor.add_photo(&image("blob:b", 100.0, 100.0));
    let b_before = photo(&editor, b);

    let outcome = editor.apply(Intent::Drag {
        id: a,
        end: DragEnd { x: -15.5, y: 900.0 },
    });
    assert!(outcome.changed);
    assert!(outcome.surface.is_none());

    let moved = photo(&editor, a);
    assert!((moved.x - -15.5).abs() < f64::EPSILON);
    assert!((moved.y - 900.0).abs() < f64::EPSILON);
    assert_eq!(photo(&editor, b), b_before);
}

// ============================================================================
// Export Tests
// ============================================================================

#[test]
fn test_export_roundtrips_through_json() {
    let mut editor = Editor::default();
    let frame = editor.add_frame(&image("blob:f", 1680.0, 844.0));
    let p = editor.add_photo(&image("blob:p", 400.0, 300.0));
    editor.toggle_visibility(frame);

    let json = editor.export().to_json().expect("serialize");
    let layout = LayoutDescription::from_json(&json).expect("parse");

    assert!((layout.frame_size.w - 1000.0).abs() < f64::EPSILON);
    let ids: Vec<_> = layout.stack_bottom_to_top.iter().map(StackEntry::id).collect();
    assert_eq!(ids, vec![frame, p]);
    match &layout.stack_bottom_to_top[0] {
        StackEntry::Frame(entry) => assert!(!entry.visible),
        StackEntry::Photo(_) => panic!("expected frame at bottom"),
    }
    assert_eq!(editor.render_stack().count(), 1);
    assert_eq!(
        editor.render_stack().next().map(Layer::kind),
        Some(LayerKind::Photo)
    );
}
