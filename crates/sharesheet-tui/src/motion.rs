//! Sheet geometry and animation.
//!
//! The terminal owns the sheet's gesture system and its animation. Positions
//! are the sheet's top edge in pixels, measured from the top of the screen.
//! One terminal row is [`ROW_DP`] density-independent units at density 1, so
//! pixels and dp coincide.

use std::time::{Duration, Instant};

use sharesheet_app::{Dp, Px, ScreenError, SheetLayout, SheetPhase, Viewport};

/// Height of one terminal row.
pub const ROW_DP: f32 = 16.0;

/// Duration of a full expand or collapse.
pub const ANIMATION: Duration = Duration::from_millis(240);

/// Top edge of the open sheet, as a fraction of the screen height.
const EXPANDED_FRACTION: f32 = 0.35;

/// Rows covered by `inset`, rounded to the nearest row.
pub fn rows_for(inset: Dp) -> u16 {
    (inset.0 / ROW_DP).round().max(0.0) as u16
}

/// Sheet resting positions for a terminal `rows` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    rows: u16,
    peek: Px,
}

impl SheetGeometry {
    /// Geometry for a terminal `rows` tall.
    pub fn new(rows: u16, layout: &SheetLayout) -> Self {
        Self { rows, peek: Px(layout.peek_height_dp) }
    }

    /// Terminal height in rows.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Screen height in pixels.
    pub fn height(&self) -> Px {
        Px(f32::from(self.rows) * ROW_DP)
    }

    /// Viewport reported to the screen.
    pub fn viewport(&self) -> Result<Viewport, ScreenError> {
        Viewport::new(Dp(self.height().0), 1.0)
    }

    /// Top edge of the sheet resting in `phase`.
    ///
    /// Never `0`: the sheet always leaves the top bar row uncovered, so the
    /// fully-open sentinel is not produced by a resting sheet.
    pub fn offset_for(&self, phase: SheetPhase) -> Px {
        let height = self.height().0;
        let top = match phase {
            SheetPhase::Collapsed => height - self.peek.0,
            SheetPhase::Expanded => height * EXPANDED_FRACTION,
        };
        Px(top.max(ROW_DP))
    }
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    from: Px,
    started: Instant,
}

/// Position of the sheet and its animation in flight.
#[derive(Debug, Clone)]
pub struct SheetMotion {
    position: Px,
    target: SheetPhase,
    flight: Option<Flight>,
}

impl SheetMotion {
    /// A sheet resting collapsed.
    pub fn new(geometry: &SheetGeometry) -> Self {
        Self {
            position: geometry.offset_for(SheetPhase::Collapsed),
            target: SheetPhase::Collapsed,
            flight: None,
        }
    }

    /// Current top edge.
    pub fn position(&self) -> Px {
        self.position
    }

    /// Phase the sheet is resting in or moving towards.
    pub fn target(&self) -> SheetPhase {
        self.target
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.flight.is_some()
    }

    /// Start moving towards `target` from the current position.
    pub fn animate(&mut self, target: SheetPhase, now: Instant) {
        tracing::trace!(?target, from = self.position.0, "sheet animation started");
        self.target = target;
        self.flight = Some(Flight { from: self.position, started: now });
    }

    /// Advance the animation to `now`.
    ///
    /// Returns the new position while in flight, and the settled phase once
    /// the animation completes.
    pub fn step(&mut self, geometry: &SheetGeometry, now: Instant) -> (Option<Px>, Option<SheetPhase>) {
        let Some(flight) = self.flight else {
            return (None, None);
        };

        let to = geometry.offset_for(self.target);
        let elapsed = now.saturating_duration_since(flight.started);
        let t = (elapsed.as_secs_f32() / ANIMATION.as_secs_f32()).min(1.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        self.position = Px(flight.from.0 + (to.0 - flight.from.0) * eased);

        if t >= 1.0 {
            self.position = to;
            self.flight = None;
            return (Some(to), Some(self.target));
        }
        (Some(self.position), None)
    }

    /// Jump to the end of the animation in flight.
    ///
    /// Returns the settled phase, or `None` if nothing was in flight.
    pub fn finish(&mut self, geometry: &SheetGeometry) -> Option<SheetPhase> {
        self.flight.take()?;
        self.position = geometry.offset_for(self.target);
        Some(self.target)
    }

    /// Follow a terminal resize. A resting sheet moves to its new resting
    /// position, which is returned.
    pub fn relayout(&mut self, geometry: &SheetGeometry) -> Option<Px> {
        if self.flight.is_some() {
            return None;
        }
        self.position = geometry.offset_for(self.target);
        Some(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(rows: u16) -> SheetGeometry {
        SheetGeometry::new(rows, &SheetLayout::default())
    }

    #[test]
    fn resting_positions() {
        let g = geometry(40);
        assert_eq!(g.height(), Px(640.0));
        assert_eq!(g.offset_for(SheetPhase::Collapsed), Px(580.0));
        assert_eq!(g.offset_for(SheetPhase::Expanded), Px(224.0));
    }

    #[test]
    fn tiny_terminal_keeps_top_row() {
        let g = geometry(2);
        assert_eq!(g.offset_for(SheetPhase::Collapsed), Px(ROW_DP));
        assert_eq!(g.offset_for(SheetPhase::Expanded), Px(ROW_DP));
    }

    #[test]
    fn animation_settles_at_target() {
        let g = geometry(40);
        let t0 = Instant::now();
        let mut motion = SheetMotion::new(&g);

        motion.animate(SheetPhase::Expanded, t0);
        let (mid, settled) = motion.step(&g, t0 + ANIMATION / 2);
        assert!(settled.is_none());
        let mid = mid.map_or(0.0, |p| p.0);
        assert!(mid < 580.0 && mid > 224.0);

        let (end, settled) = motion.step(&g, t0 + ANIMATION);
        assert_eq!(end, Some(Px(224.0)));
        assert_eq!(settled, Some(SheetPhase::Expanded));
        assert!(!motion.is_animating());
        assert_eq!(motion.step(&g, t0 + ANIMATION * 2), (None, None));
    }

    #[test]
    fn finish_snaps() {
        let g = geometry(40);
        let mut motion = SheetMotion::new(&g);
        assert_eq!(motion.finish(&g), None);

        motion.animate(SheetPhase::Expanded, Instant::now());
        assert_eq!(motion.finish(&g), Some(SheetPhase::Expanded));
        assert_eq!(motion.position(), Px(224.0));
    }

    #[test]
    fn relayout_moves_resting_sheet_only() {
        let mut motion = SheetMotion::new(&geometry(40));
        assert_eq!(motion.relayout(&geometry(20)), Some(Px(260.0)));

        motion.animate(SheetPhase::Expanded, Instant::now());
        assert_eq!(motion.relayout(&geometry(30)), None);
    }

    #[test]
    fn rows_round() {
        assert_eq!(rows_for(Dp(0.0)), 0);
        assert_eq!(rows_for(Dp(60.0)), 4);
        assert_eq!(rows_for(Dp(-3.0)), 0);
    }
}
