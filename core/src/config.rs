use serde::Deserialize;

pub const DEFAULT_MAP_IMAGE_SRC: &str = "assets/images/naver_map.png";
pub const DEFAULT_STORE_ADDRESS: &str = "월곶중앙로14번길 65-1 경성빌딩 2층";
pub const DEFAULT_COPY_SUCCESS_MESSAGE: &str = "주소를 복사했습니다.";
pub const DEFAULT_COPY_FAILURE_MESSAGE: &str = "주소 복사에 실패했어요. 다시 시도해주세요.";

pub const DEFAULT_MIN_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_SCALE: f64 = 4.0;
pub const DEFAULT_ZOOM_STEP: f64 = 0.25;
pub const DEFAULT_WHEEL_STEP: f64 = 0.2;
pub const DEFAULT_RESET_ANIMATION_MS: u32 = 260;

pub const DEFAULT_VISIBILITY_TOP_MARGIN: f64 = 0.30;
pub const DEFAULT_VISIBILITY_BOTTOM_MARGIN: f64 = 0.45;
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.25;
pub const DEFAULT_HEADER_OFFSET_PADDING: f64 = 12.0;
pub const DEFAULT_MIN_VISIBLE_BELOW_LINE: f64 = 40.0;
pub const DEFAULT_REVEAL_TOP_RATIO: f64 = 0.1;
pub const DEFAULT_REVEAL_BOTTOM_RATIO: f64 = 0.9;
pub const DEFAULT_INITIAL_SECTION: &str = "home";

pub const DEFAULT_PRESS_EFFECT_MS: u32 = 180;
pub const DEFAULT_TOAST_DURATION_MS: u32 = 2200;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("viewer scale bounds are inverted: min {min} > max {max}")]
    ScaleBounds { min: f64, max: f64 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be within [0, 1], got {value}")]
    RatioOutOfRange { field: &'static str, value: f64 },
    #[error("visibility margins leave no band: top {top} + bottom {bottom} >= 1")]
    EmptyVisibilityBand { top: f64, bottom: f64 },
    #[error("navigation.initial_section cannot be empty")]
    EmptyInitialSection,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub store: StoreConfig,
    pub navigation: NavigationConfig,
    pub viewer: ViewerConfig,
    pub carousel: CarouselConfig,
    pub toast: ToastConfig,
}

impl SiteConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewer.validate()?;
        self.navigation.validate()?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub address: String,
    pub map_image_src: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_STORE_ADDRESS.to_string(),
            map_image_src: DEFAULT_MAP_IMAGE_SRC.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Fraction of the viewport height cut from the top of the visibility band.
    pub visibility_top_margin: f64,
    /// Fraction of the viewport height cut from the bottom of the visibility band.
    pub visibility_bottom_margin: f64,
    /// Share of a section's own height that must sit inside the band.
    pub visibility_threshold: f64,
    pub header_offset_padding: f64,
    pub min_visible_below_line: f64,
    pub reveal_top_ratio: f64,
    pub reveal_bottom_ratio: f64,
    pub initial_section: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            visibility_top_margin: DEFAULT_VISIBILITY_TOP_MARGIN,
            visibility_bottom_margin: DEFAULT_VISIBILITY_BOTTOM_MARGIN,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            header_offset_padding: DEFAULT_HEADER_OFFSET_PADDING,
            min_visible_below_line: DEFAULT_MIN_VISIBLE_BELOW_LINE,
            reveal_top_ratio: DEFAULT_REVEAL_TOP_RATIO,
            reveal_bottom_ratio: DEFAULT_REVEAL_BOTTOM_RATIO,
            initial_section: DEFAULT_INITIAL_SECTION.to_string(),
        }
    }
}

impl NavigationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_ratio("navigation.visibility_top_margin", self.visibility_top_margin)?;
        check_ratio(
            "navigation.visibility_bottom_margin",
            self.visibility_bottom_margin,
        )?;
        check_ratio("navigation.visibility_threshold", self.visibility_threshold)?;
        check_ratio("navigation.reveal_top_ratio", self.reveal_top_ratio)?;
        check_ratio("navigation.reveal_bottom_ratio", self.reveal_bottom_ratio)?;
        if self.visibility_top_margin + self.visibility_bottom_margin >= 1.0 {
            return Err(ConfigError::EmptyVisibilityBand {
                top: self.visibility_top_margin,
                bottom: self.visibility_bottom_margin,
            });
        }
        if self.initial_section.trim().is_empty() {
            return Err(ConfigError::EmptyInitialSection);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
    pub wheel_step: f64,
    pub reset_animation_ms: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            zoom_step: DEFAULT_ZOOM_STEP,
            wheel_step: DEFAULT_WHEEL_STEP,
            reset_animation_ms: DEFAULT_RESET_ANIMATION_MS,
        }
    }
}

impl ViewerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_positive("viewer.min_scale", self.min_scale)?;
        check_positive("viewer.max_scale", self.max_scale)?;
        check_positive("viewer.zoom_step", self.zoom_step)?;
        check_positive("viewer.wheel_step", self.wheel_step)?;
        if self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub press_effect_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            press_effect_ms: DEFAULT_PRESS_EFFECT_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub duration_ms: u32,
    pub copy_success: String,
    pub copy_failure: String,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_TOAST_DURATION_MS,
            copy_success: DEFAULT_COPY_SUCCESS_MESSAGE.to_string(),
            copy_failure: DEFAULT_COPY_FAILURE_MESSAGE.to_string(),
        }
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn check_ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { field, value })
    }
}
