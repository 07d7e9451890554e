//! Editor configuration.
//!
//! Every field has a default, so a host can override only what it needs:
//!
//! ```
//! use booth_core::EditorConfig;
//!
//! let config = EditorConfig::from_json(r#"{"photo_width_ratio": 0.5}"#).unwrap();
//! assert_eq!(config.photo_width_ratio, 0.5);
//! assert_eq!(config.min_commit_size, 20.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BoothError, BoothResult};
use crate::geometry::Size;

/// Frame space used before any frame is loaded.
pub const DEFAULT_FRAME_SIZE: Size = Size::new(1680.0, 844.0);

/// Viewport assumed until the host reports its real size.
pub const DEFAULT_VIEWPORT: Size = Size::new(1000.0, 700.0);

/// Fraction of the frame width a new photo starts at.
pub const DEFAULT_PHOTO_WIDTH_RATIO: f64 = 0.4;

/// Smallest width/height a committed photo may have.
pub const MIN_COMMIT_SIZE: f64 = 20.0;

/// Smallest box the handle overlay accepts mid-gesture.
pub const MIN_GESTURE_SIZE: f64 = 40.0;

/// Tunables for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Frame space used when no frame layer exists.
    pub fallback_frame_size: Size,
    /// Initial viewport size used to fit frames.
    pub viewport: Size,
    /// New photo width as a fraction of frame width.
    pub photo_width_ratio: f64,
    /// Commit-time floor for photo width and height.
    pub min_commit_size: f64,
    /// Live floor for the handle overlay during a resize.
    pub min_gesture_size: f64,
    /// Name given to the frame layer.
    pub frame_name: String,
    /// Prefix for photo names, followed by a space and the 1-based count.
    pub photo_name_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            fallback_frame_size: DEFAULT_FRAME_SIZE,
            viewport: DEFAULT_VIEWPORT,
            photo_width_ratio: DEFAULT_PHOTO_WIDTH_RATIO,
            min_commit_size: MIN_COMMIT_SIZE,
            min_gesture_size: MIN_GESTURE_SIZE,
            frame_name: "Frame".to_string(),
            photo_name_prefix: "Photo".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config over the defaults and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`BoothError::Serialization`] for malformed JSON and
    /// [`BoothError::InvalidConfig`] for inconsistent values.
    pub fn from_json(json: &str) -> BoothResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that sizes are positive and the floors are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`BoothError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> BoothResult<()> {
        if !self.fallback_frame_size.is_usable() {
            return Err(BoothError::InvalidConfig(
                "fallback_frame_size must be positive".to_string(),
            ));
        }
        if !self.viewport.is_usable() {
            return Err(BoothError::InvalidConfig(
                "viewport must be positive".to_string(),
            ));
        }
        if !(self.photo_width_ratio > 0.0 && self.photo_width_ratio <= 1.0) {
            return Err(BoothError::InvalidConfig(format!(
                "photo_width_ratio must be in (0, 1], got {}",
                self.photo_width_ratio
            )));
        }
        if !self.min_commit_size.is_finite() || self.min_commit_size <= 0.0 {
            return Err(BoothError::InvalidConfig(
                "min_commit_size must be positive".to_string(),
            ));
        }
        if self.min_gesture_size.is_nan() || self.min_gesture_size < self.min_commit_size {
            return Err(BoothError::InvalidConfig(format!(
                "min_gesture_size ({}) is below min_commit_size ({})",
                self.min_gesture_size, self.min_commit_size
            )));
        }
        Ok(())
    }

    /// Name for the photo added after `photo_count` existing photos.
    #[must_use]
    pub fn photo_name(&self, photo_count: usize) -> String {
        format!("{} {}", self.photo_name_prefix, photo_count + 1)
    }
}
