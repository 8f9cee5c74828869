use storefront_core::{
    PanZoomViewer, Point, Rect, Size, ViewTransform, ViewerConfig, ViewerGeometry, ViewerPhase,
};

const VIEWPORT: Rect = Rect::new(100.0, 50.0, 800.0, 600.0);

fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= 1e-9,
        "expected {:.9} got {:.9} (delta {:.9})",
        expected,
        actual,
        delta
    );
}

fn open_viewer() -> PanZoomViewer {
    let mut viewer = PanZoomViewer::new(ViewerConfig::default());
    viewer.set_natural_size(Size::new(1600.0, 1200.0));
    viewer.open(VIEWPORT);
    viewer
}

fn center_offset(dx: f64, dy: f64) -> Point {
    let center = VIEWPORT.center();
    Point::new(center.x + dx, center.y + dy)
}

#[test]
fn zoom_clamps_to_scale_bounds() {
    let mut viewer = open_viewer();
    assert!(viewer.zoom(100.0, None));
    assert_eq!(viewer.transform().scale, 4.0);
    assert!(!viewer.zoom(0.25, None));
    assert!(viewer.zoom(-100.0, None));
    assert_eq!(viewer.transform().scale, 1.0);
    assert!(!viewer.zoom_out());
}

#[test]
fn button_steps_accumulate_without_overshoot() {
    let mut viewer = open_viewer();
    viewer.zoom_in();
    viewer.zoom_in();
    viewer.zoom_in();
    assert_eq!(viewer.transform().scale, 1.75);
    viewer.zoom_in();
    assert_eq!(viewer.transform().scale, 2.0);
    viewer.zoom_in();
    assert_eq!(viewer.transform().scale, 2.25);
}

#[test]
fn zoom_keeps_focal_point_under_cursor() {
    let mut viewer = open_viewer();
    let focal = center_offset(100.0, 50.0);
    viewer.zoom(1.0, Some(focal));
    let transform = viewer.transform();
    assert_eq!(transform.scale, 2.0);
    assert_close(transform.translate_x, -100.0);
    assert_close(transform.translate_y, -50.0);

    // Image point under the cursor before the zoom was (100, 50) from the
    // image center; at scale 2 it must still render at the cursor.
    let center = VIEWPORT.center();
    assert_close(center.x + transform.translate_x + 2.0 * 100.0, focal.x);
    assert_close(center.y + transform.translate_y + 2.0 * 50.0, focal.y);
}

#[test]
fn zoom_in_then_out_restores_translation() {
    let mut viewer = open_viewer();
    viewer.zoom(1.0, Some(center_offset(100.0, 50.0)));
    let before = viewer.transform();

    let focal = center_offset(-200.0, 120.0);
    viewer.zoom(1.0, Some(focal));
    viewer.zoom(-1.0, Some(focal));
    let after = viewer.transform();
    assert_eq!(after.scale, before.scale);
    assert_close(after.translate_x, before.translate_x);
    assert_close(after.translate_y, before.translate_y);
}

#[test]
fn zoom_without_focal_uses_viewport_center() {
    let mut viewer = open_viewer();
    viewer.zoom(1.0, None);
    assert_eq!(viewer.transform(), ViewTransform::identity(2.0));
}

#[test]
fn non_finite_focal_skips_translation_adjustment() {
    let mut viewer = open_viewer();
    viewer.zoom(1.0, Some(Point::new(f64::NAN, 10.0)));
    assert_eq!(viewer.transform(), ViewTransform::identity(2.0));
    assert!(!viewer.zoom(f64::NAN, None));
}

#[test]
fn pan_is_clamped_to_overflow() {
    let mut viewer = open_viewer();
    viewer.zoom(1.0, None);
    assert!(viewer.begin_pan(Point::new(0.0, 0.0)));
    assert!(viewer.pan_to(Point::new(10_000.0, -10_000.0)));
    let transform = viewer.transform();
    assert_close(transform.translate_x, 400.0);
    assert_close(transform.translate_y, -300.0);

    assert!(viewer.pan_to(Point::new(30.0, 20.0)));
    assert_close(viewer.transform().translate_x, 30.0);
    assert_close(viewer.transform().translate_y, 20.0);
    assert!(viewer.end_pan());
    assert!(!viewer.end_pan());
}

#[test]
fn pan_at_minimum_scale_is_pinned() {
    let mut viewer = open_viewer();
    viewer.begin_pan(Point::new(10.0, 10.0));
    viewer.pan_to(Point::new(200.0, 300.0));
    let transform = viewer.transform();
    assert_eq!(transform.translate_x, 0.0);
    assert_eq!(transform.translate_y, 0.0);
}

#[test]
fn only_one_drag_at_a_time() {
    let mut viewer = open_viewer();
    viewer.zoom(2.0, None);
    assert!(viewer.begin_pan(Point::new(0.0, 0.0)));
    assert!(!viewer.begin_pan(Point::new(500.0, 500.0)));
    viewer.pan_to(Point::new(50.0, 40.0));
    assert_close(viewer.transform().translate_x, 50.0);
    assert_close(viewer.transform().translate_y, 40.0);
}

#[test]
fn pan_move_without_drag_is_ignored() {
    let mut viewer = open_viewer();
    viewer.zoom(2.0, None);
    assert!(!viewer.pan_to(Point::new(50.0, 40.0)));
    assert_eq!(viewer.transform(), ViewTransform::identity(3.0));
}

#[test]
fn pan_continues_from_previous_translation() {
    let mut viewer = open_viewer();
    viewer.zoom(2.0, None);
    viewer.begin_pan(Point::new(0.0, 0.0));
    viewer.pan_to(Point::new(100.0, 0.0));
    viewer.end_pan();
    viewer.begin_pan(Point::new(500.0, 500.0));
    viewer.pan_to(Point::new(520.0, 510.0));
    assert_close(viewer.transform().translate_x, 120.0);
    assert_close(viewer.transform().translate_y, 10.0);
}

#[test]
fn reset_restores_identity_and_flags_animation() {
    let mut viewer = open_viewer();
    viewer.zoom(2.0, Some(center_offset(40.0, 40.0)));
    assert!(!viewer.reset(false));
    assert_eq!(viewer.transform(), ViewTransform::identity(1.0));
    assert!(!viewer.is_resetting());

    viewer.zoom(1.0, None);
    assert!(viewer.reset(true));
    assert!(viewer.is_resetting());
    assert_eq!(viewer.transform(), ViewTransform::identity(1.0));
    viewer.finish_reset_animation();
    assert!(!viewer.is_resetting());
}

#[test]
fn open_and_close_reset_the_view() {
    let mut viewer = open_viewer();
    assert_eq!(viewer.phase(), ViewerPhase::Open);
    viewer.zoom(1.5, None);
    viewer.begin_pan(Point::new(0.0, 0.0));
    assert!(viewer.close());
    assert_eq!(viewer.phase(), ViewerPhase::Closed);
    assert!(!viewer.is_panning());
    assert_eq!(viewer.transform(), ViewTransform::identity(1.0));
    assert!(!viewer.close());

    viewer.open(VIEWPORT);
    assert!(viewer.is_open());
    assert_eq!(viewer.transform(), ViewTransform::identity(1.0));
}

#[test]
fn wheel_zooms_only_while_open() {
    let mut viewer = PanZoomViewer::new(ViewerConfig::default());
    assert!(!viewer.wheel(-120.0, Point::new(0.0, 0.0)));
    assert_eq!(viewer.transform().scale, 1.0);

    let mut viewer = open_viewer();
    let focal = VIEWPORT.center();
    assert!(viewer.wheel(-120.0, focal));
    assert_close(viewer.transform().scale, 1.2);
    assert!(viewer.wheel(120.0, focal));
    assert_close(viewer.transform().scale, 1.0);
    assert!(viewer.wheel(120.0, focal));
    assert_eq!(viewer.transform().scale, 1.0);
}

#[test]
fn fit_size_letterboxes_wide_images() {
    let geometry = ViewerGeometry::new(Rect::new(0.0, 0.0, 800.0, 600.0), Size::new(1000.0, 500.0));
    assert_eq!(geometry.fit_size(), Size::new(800.0, 400.0));
    assert_eq!(geometry.half_range(1.0), (0.0, 0.0));
    assert_eq!(geometry.half_range(2.0), (400.0, 100.0));
}

#[test]
fn fit_size_falls_back_to_viewport_before_image_loads() {
    let geometry = ViewerGeometry::new(Rect::new(0.0, 0.0, 640.0, 480.0), Size::default());
    assert_eq!(geometry.fit_size(), Size::new(640.0, 480.0));
}

#[test]
fn resize_reclamps_only_while_open() {
    let mut viewer = open_viewer();
    viewer.zoom(1.0, None);
    viewer.begin_pan(Point::new(0.0, 0.0));
    viewer.pan_to(Point::new(400.0, 300.0));
    viewer.end_pan();

    // Halving the viewport halves the fit size and the overflow with it.
    assert!(viewer.on_resize(Rect::new(0.0, 0.0, 400.0, 300.0)));
    assert_close(viewer.transform().translate_x, 200.0);
    assert_close(viewer.transform().translate_y, 150.0);

    viewer.close();
    assert!(!viewer.on_resize(VIEWPORT));
}

#[test]
fn empty_natural_size_is_ignored() {
    let mut viewer = open_viewer();
    viewer.set_natural_size(Size::new(0.0, 0.0));
    assert_eq!(viewer.geometry().natural, Size::new(1600.0, 1200.0));
}

#[test]
fn css_transform_translates_then_scales() {
    let mut viewer = open_viewer();
    assert_eq!(viewer.css_transform(), "translate(0px, 0px) scale(1)");
    viewer.zoom(1.0, Some(center_offset(100.0, 50.0)));
    assert_eq!(viewer.css_transform(), "translate(-100px, -50px) scale(2)");
}
