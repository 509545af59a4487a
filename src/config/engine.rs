use serde::Deserialize;
use thiserror::Error;

/// Geometry constants used to estimate how much room a seat map needs
///
/// The defaults are the empirically tuned values the seat-map views were
/// designed around. Changing them changes every verdict, so they live here
/// rather than inline in the estimator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConstants {
    /// Width and height of one seat cell
    pub cell_size: f64,
    /// Padding added around each section block
    pub section_padding: f64,

    pub stadium_field_width: f64,
    pub stadium_field_height: f64,
    pub stadium_extra_width: f64,
    pub stadium_extra_height: f64,

    pub cinema_screen_width: f64,
    pub cinema_extra_width: f64,
    pub cinema_section_gap: f64,
    pub cinema_extra_height: f64,

    pub theater_stage_width: f64,
    pub theater_extra_width: f64,
    pub theater_section_gap: f64,
    pub theater_extra_height: f64,

    pub concert_stage_width: f64,
    pub concert_stage_height: f64,
    pub concert_extra_width: f64,
    pub concert_extra_height: f64,

    pub generic_gutter: f64,
    pub generic_padding: f64,

    /// Vertical space reserved for page chrome when no container is given
    pub chrome_reserve_height: f64,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            cell_size: 24.0,
            section_padding: 100.0,
            stadium_field_width: 400.0,
            stadium_field_height: 260.0,
            stadium_extra_width: 160.0,
            stadium_extra_height: 120.0,
            cinema_screen_width: 400.0,
            cinema_extra_width: 100.0,
            cinema_section_gap: 100.0,
            cinema_extra_height: 200.0,
            theater_stage_width: 350.0,
            theater_extra_width: 120.0,
            theater_section_gap: 120.0,
            theater_extra_height: 250.0,
            concert_stage_width: 300.0,
            concert_stage_height: 80.0,
            concert_extra_width: 200.0,
            concert_extra_height: 150.0,
            generic_gutter: 20.0,
            generic_padding: 100.0,
            chrome_reserve_height: 200.0,
        }
    }
}

/// Limits that decide whether a layout is usable and which fallback to show
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeasibilityThresholds {
    /// Sections denser than this many seat cells count as one overlap
    pub dense_section_seat_units: u64,
    /// Stadium sections with a cardinal/VIP tag beyond this count overlap
    pub max_tribune_sections: usize,
    /// More overlaps than this make the layout unusable
    pub max_overlaps: u32,
    /// Scale factor below which seats are too small to read
    pub legible_scale: f64,
    /// Scale factor below which a viable layout is shown zoomed
    pub zoom_scale: f64,
    pub mobile_max_width: f64,
    pub mobile_max_height: f64,
    pub tablet_max_width: f64,
    pub tablet_max_height: f64,
    /// Lower bound of the reported scale factor
    pub min_scale_factor: f64,
    /// Upper bound of the reported scale factor
    pub max_scale_factor: f64,
}

impl Default for FeasibilityThresholds {
    fn default() -> Self {
        Self {
            dense_section_seat_units: 500,
            max_tribune_sections: 4,
            max_overlaps: 2,
            legible_scale: 0.3,
            zoom_scale: 0.6,
            mobile_max_width: 600.0,
            mobile_max_height: 400.0,
            tablet_max_width: 1000.0,
            tablet_max_height: 600.0,
            min_scale_factor: 0.1,
            max_scale_factor: 1.0,
        }
    }
}

/// Screen-width breakpoints for device tier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceBreakpoints {
    /// Widths below this are mobile
    pub tablet_min_width: u32,
    /// Widths at or above this are desktop
    pub desktop_min_width: u32,
}

impl Default for DeviceBreakpoints {
    fn default() -> Self {
        Self {
            tablet_min_width: 768,
            desktop_min_width: 1024,
        }
    }
}

/// Scale bounds applied by the viewport state manager
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportLimits {
    /// Smallest scale `set_scale` accepts
    pub min_scale: f64,
    /// Largest scale `set_scale` accepts
    pub max_scale: f64,
    /// Floor of the automatic scale in full/auto mode
    pub auto_min_scale: f64,
    /// Ceiling of the automatic scale in full/auto mode
    pub auto_max_scale: f64,
    /// Floor of the automatic scale in zoomed mode
    pub zoomed_min_scale: f64,
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 2.0,
            auto_min_scale: 0.3,
            auto_max_scale: 1.0,
            zoomed_min_scale: 0.5,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutConstants,
    pub thresholds: FeasibilityThresholds,
    pub breakpoints: DeviceBreakpoints,
    pub viewport: ViewportLimits,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EngineConfig {
    /// Parses a TOML document; missing keys take their default values
    ///
    /// # Example
    /// ```rust
    /// use seatmap_viewport::config::EngineConfig;
    ///
    /// let config = EngineConfig::from_toml_str("[layout]\ncell_size = 32.0\n").unwrap();
    /// assert_eq!(config.layout.cell_size, 32.0);
    /// assert_eq!(config.breakpoints.tablet_min_width, 768);
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable by the estimator and state manager
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.layout.cell_size > 0.0) {
            return Err(invalid("layout.cell_size", "must be greater than 0"));
        }
        if self.layout.chrome_reserve_height < 0.0 {
            return Err(invalid("layout.chrome_reserve_height", "must not be negative"));
        }

        let breakpoints = &self.breakpoints;
        if breakpoints.tablet_min_width >= breakpoints.desktop_min_width {
            return Err(invalid(
                "breakpoints.tablet_min_width",
                format!(
                    "must be below desktop_min_width ({})",
                    breakpoints.desktop_min_width
                ),
            ));
        }

        let thresholds = &self.thresholds;
        check_range(
            "thresholds.min_scale_factor",
            thresholds.min_scale_factor,
            thresholds.max_scale_factor,
        )?;
        if !(thresholds.min_scale_factor > 0.0) {
            return Err(invalid("thresholds.min_scale_factor", "must be greater than 0"));
        }
        if thresholds.legible_scale > thresholds.zoom_scale {
            return Err(invalid(
                "thresholds.legible_scale",
                format!("must not exceed zoom_scale ({})", thresholds.zoom_scale),
            ));
        }

        let viewport = &self.viewport;
        check_range("viewport.min_scale", viewport.min_scale, viewport.max_scale)?;
        if !(viewport.min_scale > 0.0) {
            return Err(invalid("viewport.min_scale", "must be greater than 0"));
        }
        check_range(
            "viewport.auto_min_scale",
            viewport.auto_min_scale,
            viewport.auto_max_scale,
        )?;

        Ok(())
    }
}

fn check_range(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    // Also rejects NaN bounds
    if min <= max {
        Ok(())
    } else {
        Err(invalid(field, format!("must not exceed its upper bound ({max})")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let config = EngineConfig::from_toml_str(
            "[thresholds]\nzoom_scale = 0.7\n\n[breakpoints]\ndesktop_min_width = 1280\n",
        )
        .unwrap();

        assert_eq!(config.thresholds.zoom_scale, 0.7);
        assert_eq!(config.thresholds.legible_scale, 0.3);
        assert_eq!(config.breakpoints.desktop_min_width, 1280);
        assert_eq!(config.breakpoints.tablet_min_width, 768);
    }

    #[test]
    fn rejects_zero_cell_size() {
        let mut config = EngineConfig::default();
        config.layout.cell_size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "layout.cell_size", .. })
        ));
    }

    #[test]
    fn rejects_inverted_breakpoints() {
        let result = EngineConfig::from_toml_str(
            "[breakpoints]\ntablet_min_width = 1200\ndesktop_min_width = 1024\n",
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "breakpoints.tablet_min_width", .. })
        ));
    }

    #[test]
    fn rejects_inverted_scale_bounds() {
        let mut config = EngineConfig::default();
        config.viewport.min_scale = 3.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.thresholds.min_scale_factor = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_legibility_above_zoom_threshold() {
        let mut config = EngineConfig::default();
        config.thresholds.legible_scale = 0.8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = EngineConfig::from_toml_str("[layout\ncell_size = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
