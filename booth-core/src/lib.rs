//! # Booth Core
//!
//! Layer model for the booth compositor: one background frame, any number of
//! photos dragged, resized and rotated on top of it, and a structured layout
//! export for rendering the final composite elsewhere.
//! Compiles to WASM so the browser editor can drive it directly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   Editor                    │
//! │   intents in ──► snapshot transition ──►    │
//! ├─────────────────────────────────────────────┤
//! │  Layer Model      │  Geometry Normalizer    │
//! │  - Frame / Photo  │  - Frame fit            │
//! │  - Collection     │  - Drag/transform commit│
//! ├─────────────────────────────────────────────┤
//! │  Ordering Engine  │  Selection & Overlay    │
//! │  - Storage order  │  - Click routing        │
//! │  - List reorder   │  - Handle binding       │
//! ├─────────────────────────────────────────────┤
//! │            Export Serializer                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use booth_core::{DecodedImage, Editor, ImportKind};
//!
//! let mut editor = Editor::default();
//!
//! let ticket = editor.begin_import(ImportKind::Photo);
//! let image = DecodedImage::new("blob:photo", 500.0, 500.0).unwrap();
//! let id = editor.complete_import(ticket, &image).unwrap();
//!
//! assert_eq!(editor.selected_id(), Some(id));
//! let layout = editor.export();
//! assert_eq!(layout.stack_bottom_to_top.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collection;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod import;
pub mod layer;
pub mod ordering;
pub mod selection;
pub mod surface;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use collection::LayerCollection;
pub use config::EditorConfig;
pub use editor::{Editor, Outcome};
pub use error::{BoothError, BoothResult};
pub use event::{ClickTarget, DragEnd, Intent, ReorderRequest, TransformEnd};
pub use export::{export_layout, FrameEntry, FrameSize, LayoutDescription, PhotoEntry, StackEntry};
pub use geometry::{BoundBox, Size, StageFit};
#[cfg(feature = "images")]
pub use import::FileImageProvider;
pub use import::{DecodedImage, ImageProvider, ImportKind, ImportTicket};
pub use layer::{FrameLayer, ImageSource, Layer, LayerId, LayerKind, PhotoLayer};
pub use selection::{Anchor, HandleOverlay, Selection};
pub use surface::{NodeRegistry, SurfaceCommand, SurfaceNode};
pub use view::LayerRow;

/// Booth core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
