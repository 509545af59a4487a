//! Viewport state management
//!
//! [`ViewportManager`] is the single writer of [`ViewportState`]. It turns a
//! feasibility result plus the viewport size into a concrete scale and pan,
//! and applies user-driven adjustments. It performs no I/O and knows
//! nothing about when it is called; the controller decides that.

use crate::config::ViewportLimits;
use crate::domain::core::{Point, Size, centered_offset, clamp_lenient};
use crate::domain::feasibility::{FeasibilityResult, RecommendedView};

/// Presentation strategy for the seat map
///
/// `Auto` defers to the estimator's recommendation. Any other value pins
/// the mode until it is explicitly set back to `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Auto,
    Full,
    Zoomed,
    Blocks,
    Simplified,
    List,
}

impl ViewMode {
    /// Returns true for modes that replace the interactive map
    pub fn is_fallback(&self) -> bool {
        matches!(self, ViewMode::Blocks | ViewMode::Simplified | ViewMode::List)
    }
}

impl From<RecommendedView> for ViewMode {
    fn from(view: RecommendedView) -> Self {
        match view {
            RecommendedView::Full => ViewMode::Full,
            RecommendedView::Zoomed => ViewMode::Zoomed,
            RecommendedView::Blocks => ViewMode::Blocks,
            RecommendedView::Simplified => ViewMode::Simplified,
            RecommendedView::List => ViewMode::List,
        }
    }
}

/// Concrete pan/zoom state read by the consuming views
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    /// Width of the viewport the map is drawn into
    pub width: f64,
    /// Height of the viewport the map is drawn into
    pub height: f64,
    pub is_fullscreen: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            width: 0.0,
            height: 0.0,
            is_fullscreen: false,
        }
    }
}

impl ViewportState {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }
}

/// Owner of the viewport state and the pinned view mode
#[derive(Debug, Clone)]
pub struct ViewportManager {
    state: ViewportState,
    /// Mode requested by the user, `Auto` when nothing is pinned
    pinned: ViewMode,
    /// Mode in effect after the last adjustment; never `Auto`
    active: ViewMode,
    feasibility: FeasibilityResult,
    limits: ViewportLimits,
}

impl ViewportManager {
    /// Creates a manager for a seat map that is not available yet
    pub fn new(limits: ViewportLimits) -> Self {
        Self {
            state: ViewportState::default(),
            pinned: ViewMode::Auto,
            active: ViewMode::Full,
            feasibility: FeasibilityResult::safe_default(),
            limits,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Mode in effect; `Auto` is resolved to the recommendation
    pub fn view_mode(&self) -> ViewMode {
        self.active
    }

    /// Mode requested through [`Self::set_view_mode`]
    pub fn pinned_mode(&self) -> ViewMode {
        self.pinned
    }

    pub fn feasibility(&self) -> &FeasibilityResult {
        &self.feasibility
    }

    /// Replaces the feasibility input; call [`Self::adjust_viewport`] afterwards
    pub fn set_feasibility(&mut self, feasibility: FeasibilityResult) {
        self.feasibility = feasibility;
    }

    /// Replaces the viewport size input; call [`Self::adjust_viewport`] afterwards
    pub fn set_viewport_size(&mut self, size: Size) {
        self.state.width = size.width;
        self.state.height = size.height;
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.state.is_fullscreen = fullscreen;
    }

    /// Recomputes mode, scale and centering from the current inputs
    ///
    /// Running it twice without an input change yields the same state.
    pub fn adjust_viewport(&mut self) {
        let mode = self.resolve_mode();
        if mode != self.active {
            tracing::debug!(from = ?self.active, to = ?mode, "view mode changed");
        }
        self.active = mode;
        self.state.scale = self.scale_for(mode);
        self.center_content();
    }

    /// Centers the content at the current scale
    ///
    /// Content that does not fit on an axis is aligned to that axis' origin.
    /// Without content (no map, or an empty one) the pan is reset to zero.
    pub fn center_content(&mut self) {
        let required = self.feasibility.required_size();
        let pan = if required.is_empty() {
            Point::origin()
        } else {
            centered_offset(self.state.size(), required.scaled(self.state.scale))
        };
        self.state.pan_x = pan.x;
        self.state.pan_y = pan.y;
    }

    /// Sets a user-chosen scale, clamped to the manual range, and recenters
    pub fn set_scale(&mut self, scale: f64) {
        self.state.scale = self.clamp_manual(scale);
        self.center_content();
    }

    /// Sets the pan offset as given
    ///
    /// No bounds are applied; callers keep the content visible.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.state.pan_x = x;
        self.state.pan_y = y;
    }

    /// Pins a mode (or un-pins with `Auto`) and re-adjusts
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.pinned = mode;
        self.adjust_viewport();
    }

    /// Scales the content to fit the viewport, never upscaling, and recenters
    pub fn fit_to_screen(&mut self) {
        let required = self.feasibility.required_size();
        let axis = |available: f64, required: f64| {
            if required > 0.0 {
                available / required
            } else {
                1.0
            }
        };

        let fitted = axis(self.state.width, required.width)
            .min(axis(self.state.height, required.height))
            .min(1.0);
        self.state.scale = self.clamp_manual(fitted);
        self.center_content();
    }

    /// Drops manual scale and pan; the pinned mode stays pinned
    pub fn reset_viewport(&mut self) {
        self.adjust_viewport();
    }

    fn resolve_mode(&self) -> ViewMode {
        match self.pinned {
            ViewMode::Auto => self.feasibility.recommended_view.into(),
            pinned => pinned,
        }
    }

    fn scale_for(&self, mode: ViewMode) -> f64 {
        let factor = self.feasibility.scale_factor;
        match mode {
            ViewMode::Auto | ViewMode::Full => {
                clamp_lenient(factor, self.limits.auto_min_scale, self.limits.auto_max_scale)
            }
            ViewMode::Zoomed => factor.max(self.limits.zoomed_min_scale),
            ViewMode::Blocks | ViewMode::Simplified | ViewMode::List => 1.0,
        }
    }

    fn clamp_manual(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.state.scale;
        }
        clamp_lenient(scale, self.limits.min_scale, self.limits.max_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feasibility::InfeasibilityReason;

    fn feasibility(width: f64, height: f64, scale: f64, view: RecommendedView) -> FeasibilityResult {
        let viable = matches!(view, RecommendedView::Full | RecommendedView::Zoomed);
        FeasibilityResult {
            required_width: width,
            required_height: height,
            scale_factor: scale,
            is_viable: viable,
            reason: (!viable).then_some(InfeasibilityReason::TooSmallToRead),
            recommended_view: view,
            ..FeasibilityResult::safe_default()
        }
    }

    fn adjusted(result: FeasibilityResult, width: f64, height: f64) -> ViewportManager {
        let mut manager = ViewportManager::new(ViewportLimits::default());
        manager.set_feasibility(result);
        manager.set_viewport_size(Size::new(width, height));
        manager.adjust_viewport();
        manager
    }

    #[test]
    fn default_state_is_identity() {
        let manager = ViewportManager::new(ViewportLimits::default());
        assert_eq!(*manager.state(), ViewportState::default());
        assert_eq!(manager.pinned_mode(), ViewMode::Auto);
        assert_eq!(manager.view_mode(), ViewMode::Full);
    }

    #[test]
    fn full_mode_centers_fitted_content() {
        let manager = adjusted(feasibility(500.0, 540.0, 1.0, RecommendedView::Full), 1920.0, 880.0);
        let state = manager.state();

        assert_eq!(manager.view_mode(), ViewMode::Full);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.pan_x, 710.0);
        assert_eq!(state.pan_y, 170.0);
    }

    #[test]
    fn full_mode_scale_has_a_floor() {
        let manager = adjusted(feasibility(1000.0, 1000.0, 0.2, RecommendedView::Full), 200.0, 200.0);
        assert_eq!(manager.state().scale, 0.3);
        // 300 wide content in a 200 wide viewport sticks to the origin
        assert_eq!(manager.state().pan(), Point::origin());
    }

    #[test]
    fn zoomed_mode_scale_has_a_floor() {
        let manager = adjusted(feasibility(1000.0, 1000.0, 0.4, RecommendedView::Zoomed), 400.0, 400.0);
        assert_eq!(manager.view_mode(), ViewMode::Zoomed);
        assert_eq!(manager.state().scale, 0.5);

        let manager = adjusted(feasibility(1000.0, 1000.0, 0.55, RecommendedView::Zoomed), 550.0, 550.0);
        assert_eq!(manager.state().scale, 0.55);
    }

    #[test]
    fn fallback_modes_use_unit_scale() {
        for view in [RecommendedView::Blocks, RecommendedView::Simplified, RecommendedView::List] {
            let manager = adjusted(feasibility(2680.0, 2020.0, 0.14, view), 375.0, 467.0);
            assert!(manager.view_mode().is_fallback());
            assert_eq!(manager.state().scale, 1.0);
        }
    }

    #[test]
    fn missing_content_yields_no_pan() {
        let manager = adjusted(FeasibilityResult::safe_default(), 1024.0, 768.0);
        let state = manager.state();
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.pan(), Point::origin());
        assert_eq!(state.size(), Size::new(1024.0, 768.0));
    }

    #[test]
    fn set_scale_clamps_and_recenters() {
        let mut manager = adjusted(feasibility(500.0, 500.0, 1.0, RecommendedView::Full), 1000.0, 1000.0);

        manager.set_scale(5.0);
        assert_eq!(manager.state().scale, 2.0);
        assert_eq!(manager.state().pan(), Point::origin());

        manager.set_scale(0.01);
        assert_eq!(manager.state().scale, 0.1);
        assert_eq!(manager.state().pan(), Point::new(475.0, 475.0));

        manager.set_scale(f64::NAN);
        assert_eq!(manager.state().scale, 0.1);
    }

    #[test]
    fn inverted_limits_do_not_panic() {
        let limits = ViewportLimits {
            min_scale: 2.0,
            max_scale: 0.5,
            auto_min_scale: f64::NAN,
            auto_max_scale: 0.2,
            ..ViewportLimits::default()
        };
        let mut manager = ViewportManager::new(limits);
        manager.set_feasibility(feasibility(500.0, 500.0, 0.8, RecommendedView::Full));
        manager.set_viewport_size(Size::new(1000.0, 1000.0));

        manager.adjust_viewport();
        assert_eq!(manager.state().scale, 0.2);

        manager.set_scale(1.0);
        assert_eq!(manager.state().scale, 0.5);

        manager.fit_to_screen();
        assert_eq!(manager.state().scale, 0.5);
    }

    #[test]
    fn set_pan_is_unbounded() {
        let mut manager = adjusted(feasibility(500.0, 500.0, 1.0, RecommendedView::Full), 1000.0, 1000.0);
        manager.set_pan(-5000.0, 12345.0);
        assert_eq!(manager.state().pan(), Point::new(-5000.0, 12345.0));
    }

    #[test]
    fn pinned_mode_overrides_recommendation_until_auto() {
        let mut manager = adjusted(feasibility(2680.0, 2020.0, 0.14, RecommendedView::List), 375.0, 467.0);
        assert_eq!(manager.view_mode(), ViewMode::List);

        manager.set_view_mode(ViewMode::Full);
        assert_eq!(manager.view_mode(), ViewMode::Full);
        assert_eq!(manager.state().scale, 0.3);

        // a new estimate does not unpin
        manager.set_feasibility(feasibility(2680.0, 2020.0, 0.14, RecommendedView::Blocks));
        manager.adjust_viewport();
        assert_eq!(manager.view_mode(), ViewMode::Full);

        manager.set_view_mode(ViewMode::Auto);
        assert_eq!(manager.pinned_mode(), ViewMode::Auto);
        assert_eq!(manager.view_mode(), ViewMode::Blocks);
        assert_eq!(manager.state().scale, 1.0);
    }

    #[test]
    fn fit_to_screen_never_upscales() {
        let mut manager = adjusted(feasibility(500.0, 250.0, 1.0, RecommendedView::Full), 2000.0, 2000.0);
        manager.set_scale(1.7);
        manager.fit_to_screen();
        assert_eq!(manager.state().scale, 1.0);

        let mut manager = adjusted(feasibility(2000.0, 1000.0, 0.5, RecommendedView::Zoomed), 1000.0, 1000.0);
        manager.fit_to_screen();
        assert_eq!(manager.state().scale, 0.5);
        assert_eq!(manager.state().pan(), Point::new(0.0, 250.0));
    }

    #[test]
    fn reset_discards_manual_changes_but_keeps_pin() {
        let mut manager = adjusted(feasibility(1000.0, 1000.0, 0.4, RecommendedView::Zoomed), 400.0, 400.0);
        manager.set_view_mode(ViewMode::Full);
        let pinned_state = *manager.state();

        manager.set_scale(1.9);
        manager.set_pan(33.0, 44.0);
        manager.reset_viewport();

        assert_eq!(*manager.state(), pinned_state);
        assert_eq!(manager.pinned_mode(), ViewMode::Full);
    }

    #[test]
    fn fullscreen_flag_survives_adjustment() {
        let mut manager = adjusted(feasibility(500.0, 500.0, 1.0, RecommendedView::Full), 1000.0, 1000.0);
        manager.set_fullscreen(true);
        manager.adjust_viewport();
        assert!(manager.state().is_fullscreen);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_view() -> impl Strategy<Value = RecommendedView> {
            prop_oneof![
                Just(RecommendedView::Full),
                Just(RecommendedView::Zoomed),
                Just(RecommendedView::Blocks),
                Just(RecommendedView::Simplified),
                Just(RecommendedView::List),
            ]
        }

        proptest! {
            #[test]
            fn adjust_viewport_is_idempotent(
                width in 0.0..5000.0f64,
                height in 0.0..5000.0f64,
                scale in 0.1..=1.0f64,
                view in arb_view(),
                viewport_width in 0.0..4000.0f64,
                viewport_height in 0.0..4000.0f64,
            ) {
                let mut manager = adjusted(
                    feasibility(width, height, scale, view),
                    viewport_width,
                    viewport_height,
                );
                let first = *manager.state();
                manager.adjust_viewport();
                let second = *manager.state();

                prop_assert_eq!(first.scale.to_bits(), second.scale.to_bits());
                prop_assert_eq!(first.pan_x.to_bits(), second.pan_x.to_bits());
                prop_assert_eq!(first.pan_y.to_bits(), second.pan_y.to_bits());
                prop_assert_eq!(first, second);
            }

            #[test]
            fn pan_is_never_negative_after_centering(
                width in 0.0..5000.0f64,
                height in 0.0..5000.0f64,
                scale in 0.1..=2.0f64,
                viewport_width in 0.0..4000.0f64,
                viewport_height in 0.0..4000.0f64,
            ) {
                let mut manager = adjusted(
                    feasibility(width, height, 1.0, RecommendedView::Full),
                    viewport_width,
                    viewport_height,
                );
                manager.set_scale(scale);
                prop_assert!(manager.state().pan_x >= 0.0);
                prop_assert!(manager.state().pan_y >= 0.0);
            }
        }
    }
}
