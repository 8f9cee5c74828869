/// Parses a computed CSS length the way `parseFloat` does: the leading
/// numeric prefix wins and anything unparseable is zero (`"16px"` -> 16,
/// `"normal"` -> 0).
pub fn parse_css_px(value: &str) -> f64 {
    let value = value.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let bytes = value.as_bytes();
    while end < bytes.len() {
        let ch = bytes[end];
        match ch {
            b'0'..=b'9' => seen_digit = true,
            b'+' | b'-' if end == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes[end - 1], b'e' | b'E') => {}
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
        end += 1;
    }
    let mut candidate = &value[..end];
    while !candidate.is_empty() {
        if let Ok(parsed) = candidate.parse::<f64>() {
            return if parsed.is_finite() { parsed } else { 0.0 };
        }
        candidate = &candidate[..candidate.len() - 1];
    }
    0.0
}

/// Distance one prev/next press scrolls: a card plus the track gap.
pub fn scroll_step(item_width: f64, gap: f64) -> Option<f64> {
    let step = item_width + gap;
    if step.is_finite() && step > 0.0 && item_width > 0.0 {
        Some(step)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Prev,
    Next,
}

impl ScrollDirection {
    pub fn sign(self) -> f64 {
        match self {
            ScrollDirection::Prev => -1.0,
            ScrollDirection::Next => 1.0,
        }
    }
}

/// Horizontal drag-to-scroll on a track.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragScroll {
    active: bool,
    start_x: f64,
    start_scroll: f64,
}

impl DragScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn begin(&mut self, pointer_x: f64, scroll_left: f64) {
        self.active = true;
        self.start_x = pointer_x;
        self.start_scroll = scroll_left;
    }

    /// Scroll offset for the current pointer position, `None` when idle.
    pub fn scroll_for(&self, pointer_x: f64) -> Option<f64> {
        if !self.active {
            return None;
        }
        Some(self.start_scroll + (self.start_x - pointer_x))
    }

    /// Returns whether a drag was active.
    pub fn end(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }
}

/// Pagination dot matching the track's scroll position.
pub fn active_dot_index(
    scroll_left: f64,
    scroll_width: f64,
    client_width: f64,
    dot_count: usize,
) -> Option<usize> {
    if dot_count == 0 {
        return None;
    }
    let max_scroll = scroll_width - client_width;
    let ratio = if max_scroll > 0.0 {
        (scroll_left / max_scroll).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let index = (ratio * (dot_count - 1) as f64).round() as usize;
    Some(index.min(dot_count - 1))
}
