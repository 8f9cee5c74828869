use storefront_core::{ConfigError, SiteConfig};

const SHIPPED: &str = include_str!("../../site.toml");

#[test]
fn shipped_config_matches_defaults() {
    let config = SiteConfig::from_toml_str(SHIPPED).expect("site.toml should parse");
    assert_eq!(config, SiteConfig::default());
}

#[test]
fn missing_tables_fall_back_to_defaults() {
    let config = SiteConfig::from_toml_str("[viewer]\nmax_scale = 6.0\n").expect("partial config");
    assert_eq!(config.viewer.max_scale, 6.0);
    assert_eq!(config.viewer.min_scale, 1.0);
    assert_eq!(config.navigation.initial_section, "home");
    assert_eq!(config.toast.duration_ms, 2200);
}

#[test]
fn inverted_scale_bounds_are_rejected() {
    let err = SiteConfig::from_toml_str("[viewer]\nmin_scale = 5.0\nmax_scale = 2.0\n")
        .expect_err("inverted bounds");
    assert!(matches!(err, ConfigError::ScaleBounds { .. }));
}

#[test]
fn non_positive_steps_are_rejected() {
    let err = SiteConfig::from_toml_str("[viewer]\nzoom_step = 0.0\n").expect_err("zero step");
    assert!(matches!(
        err,
        ConfigError::NonPositive {
            field: "viewer.zoom_step",
            ..
        }
    ));
}

#[test]
fn ratios_outside_unit_range_are_rejected() {
    let err = SiteConfig::from_toml_str("[navigation]\nvisibility_threshold = 1.5\n")
        .expect_err("ratio");
    assert!(matches!(err, ConfigError::RatioOutOfRange { .. }));
}

#[test]
fn margins_must_leave_a_band() {
    let raw = "[navigation]\nvisibility_top_margin = 0.6\nvisibility_bottom_margin = 0.4\n";
    let err = SiteConfig::from_toml_str(raw).expect_err("empty band");
    assert!(matches!(err, ConfigError::EmptyVisibilityBand { .. }));
}

#[test]
fn empty_initial_section_is_rejected() {
    let err = SiteConfig::from_toml_str("[navigation]\ninitial_section = \"  \"\n")
        .expect_err("empty section");
    assert!(matches!(err, ConfigError::EmptyInitialSection));
}

#[test]
fn malformed_toml_reports_parse_error() {
    let err = SiteConfig::from_toml_str("[viewer\nmin_scale = 1").expect_err("parse");
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("config parse failed"));
}
