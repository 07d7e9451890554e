//! Image import boundary.
//!
//! Picking a file returns immediately; the layer only appears once decoding
//! reports natural dimensions. Each pending decode is tracked by an
//! [`ImportTicket`] so several imports can be in flight and complete in any
//! order. There is no cancellation of a running decode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BoothError, BoothResult};
use crate::geometry::Size;
use crate::ImageSource;

/// File filter the browser shell passes to the picker for every import.
pub const IMAGE_ACCEPT_FILTER: &str = "image/*";

/// Which action started the import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// "Add Frame".
    Frame,
    /// "Add Photo".
    Photo,
}

/// Handle for a decode that has not finished yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportTicket(u64);

impl ImportTicket {
    /// Numeric value, for hosts that pass tickets across an FFI boundary.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Rebuild a ticket from its numeric value.
    #[must_use]
    pub const fn from_value(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ImportTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A successfully decoded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedImage {
    /// Reference to the decoded pixels.
    pub src: ImageSource,
    /// Pixel width.
    pub natural_w: f64,
    /// Pixel height.
    pub natural_h: f64,
}

impl DecodedImage {
    /// Build a decoded image, rejecting zero or non-finite dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`BoothError::InvalidImage`] if either dimension is unusable.
    pub fn new(src: impl Into<ImageSource>, natural_w: f64, natural_h: f64) -> BoothResult<Self> {
        if !Size::new(natural_w, natural_h).is_usable() {
            return Err(BoothError::InvalidImage {
                width: natural_w,
                height: natural_h,
            });
        }
        Ok(Self {
            src: src.into(),
            natural_w,
            natural_h,
        })
    }

    /// Natural size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.natural_w, self.natural_h)
    }
}

/// Source of decoded images for a picked file handle.
pub trait ImageProvider {
    /// Whatever the picker hands back for a chosen file.
    type Handle;

    /// Decode `handle` to learn its natural dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or decoded.
    fn decode(&self, handle: Self::Handle) -> BoothResult<DecodedImage>;
}

/// Imports that have started but not yet completed.
#[derive(Debug, Clone, Default)]
pub struct PendingImports {
    next: u64,
    pending: HashMap<ImportTicket, ImportKind>,
}

impl PendingImports {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new in-flight import.
    pub fn begin(&mut self, kind: ImportKind) -> ImportTicket {
        let ticket = ImportTicket(self.next);
        self.next += 1;
        self.pending.insert(ticket, kind);
        ticket
    }

    /// Remove a ticket, returning what it was for.
    pub fn finish(&mut self, ticket: ImportTicket) -> Option<ImportKind> {
        self.pending.remove(&ticket)
    }

    /// Number of imports in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Reads natural dimensions from image files on disk.
#[cfg(feature = "images")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageProvider;

#[cfg(feature = "images")]
impl ImageProvider for FileImageProvider {
    type Handle = std::path::PathBuf;

    fn decode(&self, path: Self::Handle) -> BoothResult<DecodedImage> {
        let (width, height) = image::ImageReader::open(&path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| BoothError::ImageDecode(e.to_string()))?;
        tracing::debug!(path = %path.display(), width, height, "Decoded image header");
        DecodedImage::new(
            path.display().to_string(),
            f64::from(width),
            f64::from(height),
        )
    }
}
