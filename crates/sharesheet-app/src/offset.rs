//! Drag offset to layout inset translation.
//!
//! The detail sheet reports its top edge as a vertical offset in device
//! pixels, where `0` is the "fully open" sentinel. Sibling content needs the
//! space covered by the sheet as a bottom inset in density-independent units.

use std::ops::Sub;

use crate::ScreenError;

/// Length in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Px(pub f32);

/// Length in density-independent units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Dp(pub f32);

impl Dp {
    /// Zero inset.
    pub const ZERO: Self = Self(0.0);
}

impl Sub for Px {
    type Output = Px;

    fn sub(self, rhs: Px) -> Px {
        Px(self.0 - rhs.0)
    }
}

/// Visible screen area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    height: Dp,
    density: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { height: Dp(640.0), density: 1.0 }
    }
}

impl Viewport {
    /// Create a viewport `height` tall with `density` pixels per dp.
    pub fn new(height: Dp, density: f32) -> Result<Self, ScreenError> {
        if !density.is_finite() || density <= 0.0 {
            return Err(ScreenError::InvalidDensity(density));
        }
        if !height.0.is_finite() || height.0 < 0.0 {
            return Err(ScreenError::InvalidViewportHeight(height.0));
        }
        Ok(Self { height, density })
    }

    /// Height in density-independent units.
    pub fn height(&self) -> Dp {
        self.height
    }

    /// Pixels per dp.
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Convert dp to pixels.
    pub fn to_px(&self, dp: Dp) -> Px {
        Px(dp.0 * self.density)
    }

    /// Convert pixels to dp.
    pub fn to_dp(&self, px: Px) -> Dp {
        Dp(px.0 / self.density)
    }
}

/// Supplies the current viewport.
///
/// Read on every translation, so a rotated screen is picked up without any
/// invalidation.
pub trait ViewportSource {
    /// Current viewport.
    fn viewport(&self) -> Viewport;
}

impl ViewportSource for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

impl<F> ViewportSource for F
where
    F: Fn() -> Viewport,
{
    fn viewport(&self) -> Viewport {
        self()
    }
}

/// Bottom inset covered by a sheet whose top edge sits at `offset`.
///
/// `0` is the fully-open sentinel and maps to zero without reading the
/// viewport. Any other offset yields `viewport_height - offset` converted to
/// dp. Monotonic decreasing in `offset`.
///
/// The result is not clamped: an offset below the bottom edge of the
/// viewport yields a negative inset, which hosts treat as no inset.
#[allow(clippy::float_cmp)]
pub fn bottom_inset(offset: Px, source: &impl ViewportSource) -> Dp {
    if offset.0 == 0.0 {
        return Dp::ZERO;
    }

    let viewport = source.viewport();
    let screen_height = viewport.to_px(viewport.height());
    viewport.to_dp(screen_height - offset)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn sentinel_skips_viewport() {
        let reads = Cell::new(0);
        let source = || {
            reads.set(reads.get() + 1);
            Viewport::default()
        };

        assert_eq!(bottom_inset(Px(0.0), &source), Dp::ZERO);
        assert_eq!(reads.get(), 0);

        let _ = bottom_inset(Px(10.0), &source);
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn inset_converts_to_dp() {
        let viewport = Viewport::new(Dp(800.0), 2.0).expect("valid viewport");
        // 1600px screen, sheet top at 1000px covers 600px = 300dp
        assert_eq!(bottom_inset(Px(1000.0), &viewport), Dp(300.0));
    }

    #[test]
    fn offset_past_bottom_edge_is_negative() {
        let viewport = Viewport::new(Dp(400.0), 1.0).expect("valid viewport");
        assert_eq!(bottom_inset(Px(400.0), &viewport), Dp::ZERO);
        assert_eq!(bottom_inset(Px(450.0), &viewport), Dp(-50.0));
    }

    #[test]
    fn viewport_reread_after_rotation() {
        let current = Cell::new(Viewport::new(Dp(800.0), 1.0).expect("valid viewport"));
        let source = || current.get();

        assert_eq!(bottom_inset(Px(700.0), &source), Dp(100.0));
        current.set(Viewport::new(Dp(400.0), 1.0).expect("valid viewport"));
        assert_eq!(bottom_inset(Px(300.0), &source), Dp(100.0));
    }

    #[test]
    fn invalid_viewports_rejected() {
        assert_eq!(Viewport::new(Dp(10.0), 0.0), Err(ScreenError::InvalidDensity(0.0)));
        assert!(Viewport::new(Dp(10.0), f32::NAN).is_err());
        assert_eq!(Viewport::new(Dp(-1.0), 1.0), Err(ScreenError::InvalidViewportHeight(-1.0)));
    }

    proptest! {
        #[test]
        fn prop_inset_monotonic_decreasing(
            height in 100f32..2000.0,
            density in 0.5f32..4.0,
            a in 1f32..4000.0,
            b in 1f32..4000.0,
        ) {
            let viewport = Viewport::new(Dp(height), density).expect("valid viewport");
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bottom_inset(Px(lo), &viewport) >= bottom_inset(Px(hi), &viewport));
        }

        #[test]
        fn prop_inset_matches_formula(height in 100f32..2000.0, density in 0.5f32..4.0, v in 1f32..4000.0) {
            let viewport = Viewport::new(Dp(height), density).expect("valid viewport");
            let expected = (height * density - v) / density;
            prop_assert_eq!(bottom_inset(Px(v), &viewport), Dp(expected));
        }
    }
}
