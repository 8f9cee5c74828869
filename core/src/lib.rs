pub mod carousel;
pub mod config;
pub mod geometry;
pub mod navigation;
pub mod notice;
pub mod viewer;

pub use carousel::{active_dot_index, parse_css_px, scroll_step, DragScroll, ScrollDirection};
pub use config::{
    CarouselConfig, ConfigError, NavigationConfig, SiteConfig, StoreConfig, ToastConfig,
    ViewerConfig,
};
pub use geometry::{Point, Rect, Size};
pub use navigation::{
    fragment_id, FrameGate, MotionPreference, NavLink, NavigationTracker, SectionState,
    VisibilityBand,
};
pub use notice::{CopyMethod, CopyOutcome, Toast, ToastState};
pub use viewer::{clamp_translation, PanZoomViewer, ViewTransform, ViewerGeometry, ViewerPhase};
