//! Active-section tracking for the page navigation.
//!
//! Two signal sources feed the tracker: visibility reports from an
//! intersection observer and a scroll/resize fallback that measures every
//! section against an activation line below the fixed header. Both resolve to
//! a single active section id which the runtime mirrors onto the nav links.

use crate::config::NavigationConfig;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn animations_enabled(self) -> bool {
        matches!(self, MotionPreference::Full)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    /// Section id the link highlights for (`data-section`).
    pub section_id: String,
    /// Click target, normally `#<section id>`.
    pub href: String,
}

impl NavLink {
    pub fn new(section_id: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            href: href.into(),
        }
    }

    pub fn target_id(&self) -> Option<&str> {
        fragment_id(&self.href)
    }
}

/// Returns the id of an in-page fragment link (`#reviews` -> `reviews`).
pub fn fragment_id(href: &str) -> Option<&str> {
    let id = href.trim().strip_prefix('#')?.trim();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Middle band of the viewport in which a section counts as "in view".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityBand {
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub threshold: f64,
}

impl VisibilityBand {
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self {
            top_margin: config.visibility_top_margin,
            bottom_margin: config.visibility_bottom_margin,
            threshold: config.visibility_threshold,
        }
    }

    /// CSS margin string for an `IntersectionObserver` root.
    pub fn root_margin(&self) -> String {
        format!(
            "-{}% 0px -{}% 0px",
            percent(self.top_margin),
            percent(self.bottom_margin)
        )
    }

    pub fn bounds(&self, viewport_height: f64) -> (f64, f64) {
        let top = viewport_height * self.top_margin;
        let bottom = viewport_height * (1.0 - self.bottom_margin);
        (top, bottom.max(top))
    }

    pub fn intersects(&self, rect: Rect, viewport_height: f64) -> bool {
        if rect.height <= 0.0 || viewport_height <= 0.0 {
            return false;
        }
        let (band_top, band_bottom) = self.bounds(viewport_height);
        let overlap = rect.bottom().min(band_bottom) - rect.top.max(band_top);
        if overlap <= 0.0 {
            return false;
        }
        overlap / rect.height >= self.threshold
    }
}

fn percent(ratio: f64) -> f64 {
    (ratio * 100.0 * 1000.0).round() / 1000.0
}

/// Coalesces scroll/resize bursts into one recomputation per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the caller must schedule a frame; false while one is pending.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn complete(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionState {
    id: String,
    intersecting: bool,
    visible: bool,
}

impl SectionState {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_intersecting(&self) -> bool {
        self.intersecting
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Clone, Debug)]
pub struct NavigationTracker {
    sections: Vec<SectionState>,
    links: Vec<NavLink>,
    active: Option<String>,
    band: VisibilityBand,
    header_offset_padding: f64,
    min_visible_below_line: f64,
    reveal_top_ratio: f64,
    reveal_bottom_ratio: f64,
    initial_section: String,
    motion: MotionPreference,
}

impl NavigationTracker {
    pub fn new<I, S>(
        section_ids: I,
        links: Vec<NavLink>,
        config: &NavigationConfig,
        motion: MotionPreference,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reduced = !motion.animations_enabled();
        let sections = section_ids
            .into_iter()
            .map(|id| SectionState {
                id: id.into(),
                intersecting: false,
                visible: reduced,
            })
            .collect();
        Self {
            sections,
            links,
            active: None,
            band: VisibilityBand::from_config(config),
            header_offset_padding: config.header_offset_padding,
            min_visible_below_line: config.min_visible_below_line,
            reveal_top_ratio: config.reveal_top_ratio,
            reveal_bottom_ratio: config.reveal_bottom_ratio,
            initial_section: config.initial_section.clone(),
            motion,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn band(&self) -> VisibilityBand {
        self.band
    }

    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    pub fn sections(&self) -> &[SectionState] {
        &self.sections
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.section_index(id).is_some()
    }

    pub fn is_link_active(&self, link: &NavLink) -> bool {
        match self.active.as_deref() {
            Some(active) => link.section_id == active,
            None => false,
        }
    }

    pub fn link_states(&self) -> impl Iterator<Item = (&NavLink, bool)> + '_ {
        self.links
            .iter()
            .map(move |link| (link, self.is_link_active(link)))
    }

    /// Sets the active section; `None` or an empty id clears it.
    /// Returns whether the active id changed.
    pub fn set_active(&mut self, id: Option<&str>) -> bool {
        let next = id.map(str::trim).filter(|id| !id.is_empty());
        if self.active.as_deref() == next {
            return false;
        }
        self.active = next.map(str::to_string);
        true
    }

    pub fn on_visibility_change(&mut self, id: &str, is_intersecting: bool) -> bool {
        let Some(index) = self.section_index(id) else {
            return false;
        };
        let animate = self.motion.animations_enabled();
        let section = &mut self.sections[index];
        section.intersecting = is_intersecting;
        if animate {
            section.visible = is_intersecting;
        }
        if is_intersecting {
            return self.set_active(Some(id));
        }
        if self.active.as_deref() != Some(id) {
            return false;
        }
        let fallback = self
            .sections
            .iter()
            .find(|section| section.intersecting)
            .map(|section| section.id.clone());
        self.set_active(fallback.as_deref())
    }

    /// Applies one observer callback worth of reports in declared section
    /// order, so the last declared intersecting section wins the tick.
    pub fn on_visibility_batch<S: AsRef<str>>(&mut self, entries: &[(S, bool)]) -> bool {
        let mut ordered: Vec<(usize, &str, bool)> = entries
            .iter()
            .filter_map(|(id, intersecting)| {
                let id = id.as_ref();
                self.section_index(id).map(|index| (index, id, *intersecting))
            })
            .collect();
        ordered.sort_by_key(|(index, _, _)| *index);
        let before = self.active.clone();
        for (_, id, intersecting) in ordered {
            self.on_visibility_change(id, intersecting);
        }
        before != self.active
    }

    pub fn activation_line(&self, header_height: f64) -> f64 {
        header_height.max(0.0) + self.header_offset_padding
    }

    /// Scroll fallback. `rects` are the section bounds in declared order.
    pub fn on_scroll(&mut self, rects: &[Rect], header_height: f64, viewport_height: f64) -> bool {
        if self.motion.animations_enabled() {
            self.prime_reveal(rects, viewport_height);
        }
        let line = self.activation_line(header_height);
        let current = self
            .sections
            .iter()
            .zip(rects)
            .find(|(_, rect)| {
                rect.top <= line && rect.bottom() >= line + self.min_visible_below_line
            })
            .map(|(section, _)| section.id.clone());
        self.set_active(current.as_deref())
    }

    pub fn on_resize(&mut self, rects: &[Rect], header_height: f64, viewport_height: f64) -> bool {
        self.on_scroll(rects, header_height, viewport_height)
    }

    pub fn is_section_revealed(&self, rect: Rect, viewport_height: f64) -> bool {
        rect.top <= viewport_height * self.reveal_bottom_ratio
            && rect.bottom() >= viewport_height * self.reveal_top_ratio
    }

    /// Recomputes entrance-animation visibility from current bounds.
    pub fn prime_reveal(&mut self, rects: &[Rect], viewport_height: f64) {
        if !self.motion.animations_enabled() {
            return;
        }
        let revealed: Vec<bool> = rects
            .iter()
            .map(|rect| self.is_section_revealed(*rect, viewport_height))
            .collect();
        for (section, visible) in self.sections.iter_mut().zip(revealed) {
            section.visible = visible;
        }
    }

    /// Resolves a nav link click. `element_exists` reports whether the page has
    /// an element with the fragment id; tracked sections always count. Returns
    /// the id to scroll to, or `None` (leaving all state untouched) when
    /// nothing on the page carries it.
    pub fn on_nav_link_click<F>(&mut self, href: &str, element_exists: F) -> Option<String>
    where
        F: FnOnce(&str) -> bool,
    {
        let id = fragment_id(href)?;
        if !self.has_section(id) && !element_exists(id) {
            return None;
        }
        let id = id.to_string();
        self.set_active(Some(&id));
        Some(id)
    }

    /// Forces the initial section active, then corrects it from layout.
    pub fn initialize(&mut self, rects: &[Rect], header_height: f64, viewport_height: f64) {
        let initial = self.initial_section.clone();
        self.set_active(Some(&initial));
        self.on_scroll(rects, header_height, viewport_height);
    }

    fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }
}
