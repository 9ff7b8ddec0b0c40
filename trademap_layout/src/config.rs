// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout parameters.

/// The golden ratio, used as the squarify target when no usable ratio exists.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Parameters for [`layout_rect`](crate::layout_rect).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreemapConfig {
    /// Space between a parent's box and its children, on every side.
    pub padding_outer: f64,
    /// Space between sibling boxes.
    pub padding_inner: f64,
    /// Snap every coordinate to whole pixels.
    pub round: bool,
    /// Target aspect ratio for squarified rows.
    ///
    /// `None` uses `width / height` of the layout area. Either way the ratio is
    /// clamped to at least 1.
    pub ratio: Option<f64>,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            padding_outer: 5.0,
            padding_inner: 2.0,
            round: true,
            ratio: None,
        }
    }
}

impl TreemapConfig {
    /// Sets the outer padding.
    #[must_use]
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding;
        self
    }

    /// Sets the inner padding.
    #[must_use]
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding;
        self
    }

    /// Enables or disables pixel rounding.
    #[must_use]
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Fixes the squarify target ratio instead of deriving it from the area.
    #[must_use]
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// The effective squarify ratio for a `width` x `height` area.
    #[must_use]
    pub fn effective_ratio(&self, width: f64, height: f64) -> f64 {
        let ratio = self.ratio.unwrap_or(width / height);
        if ratio.is_finite() {
            ratio.max(1.0)
        } else {
            GOLDEN_RATIO
        }
    }
}

/// Parameters for [`layout_pack`](crate::layout_pack).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackConfig {
    /// Gap kept between sibling circles and around them inside their parent,
    /// in output pixels.
    pub padding: f64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self { padding: 10.0 }
    }
}

impl PackConfig {
    /// Sets the padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}
