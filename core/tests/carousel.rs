use storefront_core::{active_dot_index, parse_css_px, scroll_step, DragScroll, ScrollDirection};

#[test]
fn css_lengths_parse_like_parse_float() {
    assert_eq!(parse_css_px("16px"), 16.0);
    assert_eq!(parse_css_px(" 12.5px"), 12.5);
    assert_eq!(parse_css_px("-4px"), -4.0);
    assert_eq!(parse_css_px(".5rem"), 0.5);
    assert_eq!(parse_css_px("1e1px"), 10.0);
    assert_eq!(parse_css_px("1epx"), 1.0);
    assert_eq!(parse_css_px("normal"), 0.0);
    assert_eq!(parse_css_px(""), 0.0);
    assert_eq!(parse_css_px("-"), 0.0);
}

#[test]
fn step_is_card_plus_gap() {
    assert_eq!(scroll_step(280.0, 16.0), Some(296.0));
    assert_eq!(scroll_step(280.0, 0.0), Some(280.0));
    assert_eq!(scroll_step(0.0, 16.0), None);
    assert_eq!(scroll_step(f64::NAN, 16.0), None);
    assert_eq!(ScrollDirection::Prev.sign() * 296.0, -296.0);
}

#[test]
fn drag_scroll_moves_opposite_to_pointer() {
    let mut drag = DragScroll::new();
    assert_eq!(drag.scroll_for(10.0), None);

    drag.begin(500.0, 120.0);
    assert!(drag.is_active());
    assert_eq!(drag.scroll_for(450.0), Some(170.0));
    assert_eq!(drag.scroll_for(560.0), Some(60.0));
    assert!(drag.end());
    assert!(!drag.end());
    assert_eq!(drag.scroll_for(450.0), None);
}

#[test]
fn dot_index_tracks_scroll_ratio() {
    assert_eq!(active_dot_index(0.0, 3000.0, 1000.0, 5), Some(0));
    assert_eq!(active_dot_index(1000.0, 3000.0, 1000.0, 5), Some(2));
    assert_eq!(active_dot_index(2000.0, 3000.0, 1000.0, 5), Some(4));
    assert_eq!(active_dot_index(2400.0, 3000.0, 1000.0, 5), Some(4));
    assert_eq!(active_dot_index(300.0, 1000.0, 1000.0, 3), Some(0));
    assert_eq!(active_dot_index(0.0, 3000.0, 1000.0, 0), None);
}
