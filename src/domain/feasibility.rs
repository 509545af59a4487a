//! Layout feasibility estimation
//!
//! Given a seat map, the device signal and optionally an explicit container
//! size, decide whether the interactive map can be shown at a usable scale
//! and which presentation to fall back to when it cannot.
//!
//! Everything here is a pure function of its inputs. Callers re-run
//! [`compute_feasibility`] whenever any input changes; there is no partial
//! update path.

use std::fmt;

use crate::config::{EngineConfig, FeasibilityThresholds, LayoutConstants};
use crate::domain::core::{Size, clamp_lenient};
use crate::domain::layout::required_size;
use crate::domain::seat_map::{SeatMapDescription, Topology};
use crate::platform::device::{DeviceSignal, DeviceTier};

/// Presentation the estimator recommends for a seat map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendedView {
    /// Full interactive map at its fitted scale
    Full,
    /// Interactive map shown zoomed in, the user pans around it
    Zoomed,
    /// Section block summary
    Blocks,
    /// Simplified section cards
    Simplified,
    /// Flat list of sections
    List,
}

/// Why a layout was judged unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfeasibilityReason {
    TooSmallToRead,
    TooManyOverlaps,
    TooComplexForMobile,
    TooComplexForTablet,
}

impl fmt::Display for InfeasibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InfeasibilityReason::TooSmallToRead => "too small to be legible",
            InfeasibilityReason::TooManyOverlaps => "too many section overlaps",
            InfeasibilityReason::TooComplexForMobile => "too complex for a mobile screen",
            InfeasibilityReason::TooComplexForTablet => "too complex for a tablet",
        };
        f.write_str(text)
    }
}

/// Outcome of a feasibility estimate
///
/// Invariants: `scale_factor` lies within the configured scale-factor range
/// (`[0.1, 1.0]` by default), and a non-viable result always carries a
/// reason and a recommendation other than [`RecommendedView::Full`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityResult {
    pub required_width: f64,
    pub required_height: f64,
    pub has_overlaps: bool,
    pub overlap_count: u32,
    pub scale_factor: f64,
    pub is_viable: bool,
    pub reason: Option<InfeasibilityReason>,
    pub recommended_view: RecommendedView,
}

impl FeasibilityResult {
    /// Result used when no seat map is available yet
    pub fn safe_default() -> Self {
        Self {
            required_width: 0.0,
            required_height: 0.0,
            has_overlaps: false,
            overlap_count: 0,
            scale_factor: 1.0,
            is_viable: true,
            reason: None,
            recommended_view: RecommendedView::Full,
        }
    }

    /// Required dimensions as a size
    pub fn required_size(&self) -> Size {
        Size::new(self.required_width, self.required_height)
    }

    /// Human-readable reason, if the layout is not viable
    pub fn reason_text(&self) -> Option<String> {
        self.reason.map(|reason| reason.to_string())
    }
}

impl Default for FeasibilityResult {
    fn default() -> Self {
        Self::safe_default()
    }
}

/// Space the seat map may occupy
///
/// An explicit container wins; otherwise the screen minus the vertical
/// space reserved for page chrome.
pub fn available_space(
    device: &DeviceSignal,
    container: Option<Size>,
    constants: &LayoutConstants,
) -> Size {
    container.unwrap_or_else(|| device.screen_size().shrink_height(constants.chrome_reserve_height))
}

/// Counts sections that cannot be drawn without colliding or smearing
///
/// Stadiums only have a fixed number of tribune slots around the field, so
/// every cardinal/VIP-tagged section beyond that limit counts once. In any
/// topology a section denser than the seat-unit threshold counts once.
/// Sections are never checked against each other spatially.
pub fn count_overlaps(map: &SeatMapDescription, thresholds: &FeasibilityThresholds) -> u32 {
    let mut overlaps = 0usize;

    if map.topology == Topology::Stadium {
        let tagged = map.sections.iter().filter(|s| s.has_tribune_tag()).count();
        overlaps += tagged.saturating_sub(thresholds.max_tribune_sections);
    }

    overlaps += map
        .sections
        .iter()
        .filter(|s| s.seat_units() > thresholds.dense_section_seat_units)
        .count();

    u32::try_from(overlaps).unwrap_or(u32::MAX)
}

/// Fraction by which `required` must shrink to fit `available`
///
/// Never upscales and always stays within the configured range, even for
/// zero or negative available space. An axis that needs no space imposes
/// no limit.
pub fn scale_factor(required: Size, available: Size, thresholds: &FeasibilityThresholds) -> f64 {
    let axis = |available: f64, required: f64| {
        if required > 0.0 {
            available / required
        } else {
            f64::INFINITY
        }
    };

    // `f64::min` ignores a NaN operand, so the chain ends at 1.0 at worst
    let fitted = axis(available.width, required.width)
        .min(axis(available.height, required.height))
        .min(1.0);

    clamp_lenient(fitted, thresholds.min_scale_factor, thresholds.max_scale_factor)
}

/// Estimates whether `map` can be rendered legibly
///
/// A missing seat map yields [`FeasibilityResult::safe_default`].
///
/// # Example
/// ```rust
/// use seatmap_viewport::config::EngineConfig;
/// use seatmap_viewport::domain::feasibility::{compute_feasibility, RecommendedView};
/// use seatmap_viewport::domain::seat_map::{SeatMapDescription, SectionGeometry, Topology};
/// use seatmap_viewport::platform::{DeviceSignal, ScreenSize};
///
/// let config = EngineConfig::default();
/// let device = DeviceSignal::from_size(ScreenSize::new(375, 667), &config.breakpoints);
/// let map = SeatMapDescription::new(
///     Topology::Stadium,
///     (0..4).map(|i| SectionGeometry::new(format!("T{i}"), 30, 40)).collect(),
/// );
///
/// let result = compute_feasibility(Some(&map), &device, None, &config);
/// assert!(!result.is_viable);
/// assert_eq!(result.recommended_view, RecommendedView::List);
/// ```
pub fn compute_feasibility(
    map: Option<&SeatMapDescription>,
    device: &DeviceSignal,
    container: Option<Size>,
    config: &EngineConfig,
) -> FeasibilityResult {
    let Some(map) = map else {
        return FeasibilityResult::safe_default();
    };

    let thresholds = &config.thresholds;
    let required = required_size(map, &config.layout);
    let available = available_space(device, container, &config.layout);
    let overlap_count = count_overlaps(map, thresholds);
    let scale = scale_factor(required, available, thresholds);

    let verdict = judge(required, overlap_count, scale, device.tier, thresholds);
    if let Err((reason, view)) = verdict {
        tracing::debug!(
            %reason,
            ?view,
            required_width = required.width,
            required_height = required.height,
            scale,
            overlap_count,
            "seat map layout not viable"
        );
    }

    let (is_viable, reason, recommended_view) = match verdict {
        Ok(view) => (true, None, view),
        Err((reason, view)) => (false, Some(reason), view),
    };

    FeasibilityResult {
        required_width: required.width,
        required_height: required.height,
        has_overlaps: overlap_count > 0,
        overlap_count,
        scale_factor: scale,
        is_viable,
        reason,
        recommended_view,
    }
}

/// Ordered decision table; the first matching rule wins
fn judge(
    required: Size,
    overlap_count: u32,
    scale: f64,
    tier: DeviceTier,
    thresholds: &FeasibilityThresholds,
) -> Result<RecommendedView, (InfeasibilityReason, RecommendedView)> {
    if scale < thresholds.legible_scale {
        return Err((InfeasibilityReason::TooSmallToRead, RecommendedView::List));
    }
    if overlap_count > thresholds.max_overlaps {
        return Err((InfeasibilityReason::TooManyOverlaps, RecommendedView::Simplified));
    }

    match tier {
        DeviceTier::Mobile
            if required.width > thresholds.mobile_max_width
                || required.height > thresholds.mobile_max_height =>
        {
            return Err((InfeasibilityReason::TooComplexForMobile, RecommendedView::List));
        }
        DeviceTier::Tablet
            if required.width > thresholds.tablet_max_width
                || required.height > thresholds.tablet_max_height =>
        {
            return Err((InfeasibilityReason::TooComplexForTablet, RecommendedView::Blocks));
        }
        _ => {}
    }

    if scale < thresholds.zoom_scale {
        Ok(RecommendedView::Zoomed)
    } else {
        Ok(RecommendedView::Full)
    }
}
