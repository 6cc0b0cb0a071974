//! Which page section counts as "current" for navigation highlighting.
//!
//! The tracker is fed intersection samples for a band near the middle of the viewport
//! and URL fragments. It never looks at the DOM; sections and nav links register with
//! it by id.

use std::collections::HashMap;

/// Thresholds handed to the browser observer so ratio changes are reported in steps.
pub const OBSERVER_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub const NAV_OFFSET_PX: f64 = 80.0;
pub const NAV_OFFSET_NARROW_PX: f64 = 10.0;
pub const NARROW_VIEWPORT_PX: f64 = 768.0;

/// Scroll offset that puts a section's top just below the header bar.
pub fn nav_scroll_target(section_top: f64, viewport_width: f64) -> f64 {
    let offset = if viewport_width < NARROW_VIEWPORT_PX {
        NAV_OFFSET_NARROW_PX
    } else {
        NAV_OFFSET_PX
    };
    (section_top - offset).max(0.0)
}

/// Horizontal strip of the viewport, given as fractions trimmed off the top and bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionBand {
    pub top_inset: f64,
    pub bottom_inset: f64,
}

impl Default for IntersectionBand {
    fn default() -> Self {
        Self {
            top_inset: 0.40,
            bottom_inset: 0.55,
        }
    }
}

impl IntersectionBand {
    /// CSS `rootMargin` for an `IntersectionObserver` rooted at the viewport.
    pub fn root_margin(&self) -> String {
        format!(
            "-{}% 0px -{}% 0px",
            percent(self.top_inset),
            percent(self.bottom_inset)
        )
    }

    /// Document-space `(top, bottom)` of the band at a scroll offset.
    pub fn span(&self, scroll: f64, viewport_height: f64) -> (f64, f64) {
        let top = scroll + viewport_height * self.top_inset;
        let bottom = scroll + viewport_height * (1.0 - self.bottom_inset);
        (top, bottom.max(top))
    }
}

fn percent(fraction: f64) -> String {
    let value = (fraction * 100.0 * 100.0).round() / 100.0;
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionSample {
    pub id: String,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// A section's box in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionGeometry<'a> {
    pub id: &'a str,
    pub top: f64,
    pub height: f64,
}

/// The samples a viewport observer would report for `sections` at `scroll`.
pub fn simulate(
    band: IntersectionBand,
    scroll: f64,
    viewport_height: f64,
    sections: &[SectionGeometry<'_>],
) -> Vec<IntersectionSample> {
    let (band_top, band_bottom) = band.span(scroll, viewport_height);

    sections
        .iter()
        .map(|section| {
            let top = section.top;
            let bottom = section.top + section.height.max(0.0);
            let is_intersecting = bottom >= band_top && top <= band_bottom;
            let overlap = (bottom.min(band_bottom) - top.max(band_top)).max(0.0);

            let ratio = if !is_intersecting {
                0.0
            } else if section.height > 0.0 {
                (overlap / section.height).min(1.0)
            } else {
                1.0
            };

            IntersectionSample {
                id: section.id.to_string(),
                ratio,
                is_intersecting,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct SectionTracker {
    band: IntersectionBand,
    /// Document order; ties between equal ratios go to the earlier id.
    order: Vec<String>,
    attached: Vec<String>,
    links: Vec<String>,
    visible: HashMap<String, f64>,
    active: Option<String>,
}

impl SectionTracker {
    pub fn new<I, S>(band: IntersectionBand, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for id in order {
            let id = id.into();
            if !id.is_empty() && !ordered.contains(&id) {
                ordered.push(id);
            }
        }

        Self {
            band,
            order: ordered,
            ..Self::default()
        }
    }

    pub fn band(&self) -> IntersectionBand {
        self.band
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Only ids from the supplied order can attach.
    pub fn attach_section(&mut self, id: &str) -> bool {
        if !self.order.iter().any(|known| known == id) || self.is_attached(id) {
            return false;
        }
        self.attached.push(id.to_string());
        true
    }

    pub fn detach_section(&mut self, id: &str) -> bool {
        let before = self.attached.len();
        self.attached.retain(|attached| attached != id);
        self.visible.remove(id);
        self.attached.len() != before
    }

    pub fn is_attached(&self, id: &str) -> bool {
        self.attached.iter().any(|attached| attached == id)
    }

    pub fn register_link(&mut self, target: &str) -> bool {
        if self.links.iter().any(|link| link == target) {
            return false;
        }
        self.links.push(target.to_string());
        true
    }

    pub fn unregister_link(&mut self, target: &str) -> bool {
        let before = self.links.len();
        self.links.retain(|link| link != target);
        self.links.len() != before
    }

    /// Folds in a batch of samples and re-picks the active section. With nothing
    /// intersecting, the previous pick stands. Returns whether the pick changed.
    pub fn on_intersections(&mut self, samples: &[IntersectionSample]) -> bool {
        for sample in samples {
            if !self.is_attached(&sample.id) {
                continue;
            }
            if sample.is_intersecting {
                self.visible.insert(sample.id.clone(), sample.ratio);
            } else {
                self.visible.remove(&sample.id);
            }
        }

        match self.most_visible() {
            Some(id) => self.set_active(Some(id)),
            None => false,
        }
    }

    fn most_visible(&self) -> Option<String> {
        let mut best: Option<(&String, f64)> = None;
        for id in &self.order {
            let Some(ratio) = self.visible.get(id).copied() else {
                continue;
            };
            if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
                best = Some((id, ratio));
            }
        }
        best.map(|(id, _)| id.clone())
    }

    /// Applies a URL fragment such as `#contact`. Unknown or empty fragments clear
    /// the active section.
    pub fn on_fragment(&mut self, fragment: &str) -> bool {
        let id = fragment.trim().trim_start_matches('#');
        let next = self.order.iter().find(|known| *known == id).cloned();
        self.set_active(next)
    }

    fn set_active(&mut self, next: Option<String>) -> bool {
        if self.active == next {
            return false;
        }
        self.active = next;
        true
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_link_active(&self, target: &str) -> bool {
        self.active.as_deref() == Some(target) && self.links.iter().any(|link| link == target)
    }

    pub fn active_link(&self) -> Option<&str> {
        let active = self.active.as_deref()?;
        self.links
            .iter()
            .find(|link| link.as_str() == active)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 5] = ["about", "featured-projects", "experience", "education", "contact"];

    fn tracker() -> SectionTracker {
        let mut tracker = SectionTracker::new(IntersectionBand::default(), IDS);
        for id in IDS {
            tracker.attach_section(id);
            tracker.register_link(id);
        }
        tracker
    }

    fn sample(id: &str, ratio: f64) -> IntersectionSample {
        IntersectionSample {
            id: id.to_string(),
            ratio,
            is_intersecting: ratio > 0.0,
        }
    }

    #[test]
    fn root_margin_matches_band() {
        assert_eq!(IntersectionBand::default().root_margin(), "-40% 0px -55% 0px");
        let band = IntersectionBand {
            top_inset: 0.125,
            bottom_inset: 0.5,
        };
        assert_eq!(band.root_margin(), "-12.5% 0px -50% 0px");
    }

    #[test]
    fn nav_target_leaves_room_for_header() {
        assert_eq!(nav_scroll_target(1_200.0, 1_440.0), 1_120.0);
        assert_eq!(nav_scroll_target(1_200.0, 390.0), 1_190.0);
        assert_eq!(nav_scroll_target(40.0, 1_440.0), 0.0);
    }

    #[test]
    fn centred_section_becomes_active() {
        let sections = [
            SectionGeometry {
                id: "a",
                top: 0.0,
                height: 800.0,
            },
            SectionGeometry {
                id: "b",
                top: 800.0,
                height: 800.0,
            },
            SectionGeometry {
                id: "c",
                top: 1_600.0,
                height: 800.0,
            },
        ];
        let mut tracker = SectionTracker::new(IntersectionBand::default(), ["a", "b", "c"]);
        for section in &sections {
            tracker.attach_section(section.id);
        }

        // Band spans 1300..1350 at this offset, inside b.
        let samples = simulate(tracker.band(), 900.0, 1_000.0, &sections);
        assert!(!samples[0].is_intersecting);
        assert!(samples[1].is_intersecting);
        assert!(!samples[2].is_intersecting);

        assert!(tracker.on_intersections(&samples));
        assert_eq!(tracker.active(), Some("b"));
    }

    #[test]
    fn greatest_ratio_wins() {
        let mut tracker = tracker();
        tracker.on_intersections(&[sample("about", 0.2), sample("experience", 0.6)]);
        assert_eq!(tracker.active(), Some("experience"));
    }

    #[test]
    fn equal_ratios_go_to_document_order() {
        let mut tracker = tracker();
        tracker.on_intersections(&[sample("education", 0.5), sample("experience", 0.5)]);
        assert_eq!(tracker.active(), Some("experience"));
    }

    #[test]
    fn ratios_persist_across_batches() {
        let mut tracker = tracker();
        tracker.on_intersections(&[sample("about", 0.75)]);
        tracker.on_intersections(&[sample("experience", 0.25)]);
        assert_eq!(tracker.active(), Some("about"));

        tracker.on_intersections(&[sample("about", 0.0)]);
        assert_eq!(tracker.active(), Some("experience"));
    }

    #[test]
    fn nothing_intersecting_keeps_previous_pick() {
        let mut tracker = tracker();
        tracker.on_intersections(&[sample("contact", 1.0)]);
        assert!(!tracker.on_intersections(&[sample("contact", 0.0)]));
        assert_eq!(tracker.active(), Some("contact"));
    }

    #[test]
    fn fragment_at_load_sets_active_without_scroll() {
        let mut tracker = tracker();
        assert!(tracker.on_fragment("#contact"));
        assert_eq!(tracker.active(), Some("contact"));
        assert_eq!(tracker.active_link(), Some("contact"));
    }

    #[test]
    fn unknown_or_empty_fragment_clears() {
        let mut tracker = tracker();
        tracker.on_fragment("#about");
        assert!(tracker.on_fragment("#nowhere"));
        assert_eq!(tracker.active(), None);

        tracker.on_fragment("about");
        assert!(tracker.on_fragment(""));
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn exactly_one_link_is_active() {
        let mut tracker = tracker();
        tracker.on_intersections(&[sample("education", 0.4)]);

        let active: Vec<&str> = IDS
            .iter()
            .copied()
            .filter(|id| tracker.is_link_active(id))
            .collect();
        assert_eq!(active, vec!["education"]);
    }

    #[test]
    fn link_mounted_after_activation_lights_up_on_registration() {
        let mut tracker = SectionTracker::new(IntersectionBand::default(), IDS);
        for id in IDS {
            tracker.attach_section(id);
        }
        tracker.on_intersections(&[sample("experience", 0.6)]);

        // Rendered before registering: not yet marked.
        assert!(!tracker.is_link_active("experience"));

        // Registration is reported as new, and no active change follows it, so the
        // link has to redraw off this signal alone.
        assert!(tracker.register_link("experience"));
        assert!(!tracker.on_intersections(&[sample("experience", 0.6)]));
        assert!(tracker.is_link_active("experience"));
        assert_eq!(tracker.active_link(), Some("experience"));

        assert!(!tracker.register_link("experience"));
    }

    #[test]
    fn detached_sections_are_ignored() {
        let mut tracker = tracker();
        tracker.on_intersections(&[sample("about", 0.9)]);
        tracker.detach_section("about");
        tracker.on_intersections(&[sample("about", 1.0), sample("contact", 0.1)]);
        assert_eq!(tracker.active(), Some("contact"));
    }

    #[test]
    fn only_listed_ids_attach() {
        let mut tracker = SectionTracker::new(IntersectionBand::default(), ["about", "about", ""]);
        assert_eq!(tracker.order(), &["about".to_string()]);
        assert!(tracker.attach_section("about"));
        assert!(!tracker.attach_section("about"));
        assert!(!tracker.attach_section("footer"));
    }

    #[test]
    fn empty_order_never_reports_a_section() {
        let mut tracker = SectionTracker::new(IntersectionBand::default(), Vec::<String>::new());
        tracker.attach_section("about");
        tracker.on_intersections(&[sample("about", 1.0)]);
        tracker.on_fragment("#about");
        assert_eq!(tracker.active(), None);
    }
}
