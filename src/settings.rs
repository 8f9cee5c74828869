use gloo::console;
use js_sys::{Function, Reflect};
use storefront_core::{MotionPreference, SiteConfig};
use wasm_bindgen::JsCast;

const SITE_TOML: &str = include_str!("../site.toml");

pub(crate) fn load_site_config() -> SiteConfig {
    match SiteConfig::from_toml_str(SITE_TOML) {
        Ok(config) => config,
        Err(err) => {
            console::warn!("site config rejected, using defaults:", err.to_string());
            SiteConfig::default()
        }
    }
}

pub(crate) fn motion_preference() -> MotionPreference {
    if prefers_reduced_motion() {
        MotionPreference::Reduced
    } else {
        MotionPreference::Full
    }
}

fn prefers_reduced_motion() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(match_media) = Reflect::get(&window, &"matchMedia".into()) else {
        return false;
    };
    let Ok(match_media) = match_media.dyn_into::<Function>() else {
        return false;
    };
    let Ok(query) = match_media.call1(&window, &"(prefers-reduced-motion: reduce)".into()) else {
        return false;
    };
    Reflect::get(&query, &"matches".into())
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn bundled_site_config_is_valid() {
        let config = SiteConfig::from_toml_str(SITE_TOML).expect("bundled site.toml");
        assert_eq!(config, load_site_config());
    }
}
