//! Browser runtime for the storefront landing page: section-aware navigation,
//! the directions map viewer, review carousel, image slideshow and the
//! address copy toast. Behavior lives in `storefront-core`; the modules here
//! bind it to the DOM.

mod carousel_runtime;
mod clipboard;
mod dom;
mod map_runtime;
mod nav_runtime;
mod settings;
mod slides_runtime;
mod toast;

/// Wires every page component that has markup on the current document.
/// Components whose elements are missing are skipped.
pub fn run() {
    let config = settings::load_site_config();
    let motion = settings::motion_preference();

    nav_runtime::install(&config.navigation, motion);
    carousel_runtime::install(&config.carousel);
    slides_runtime::install();
    let toast = toast::ToastView::mount(config.toast.duration_ms);
    clipboard::install(&config.store, &config.toast, toast);
    map_runtime::install(&config.store, &config.viewer);

    gloo::console::log!("storefront: runtime ready");
}
