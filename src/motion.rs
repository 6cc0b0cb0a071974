//! Scroll-to-style curves for the hero terminal and the landing page.

use crate::scroll::sanitize_offset;
use crate::view_state::ViewMode;

/// Typed into the prompt while the reader scrolls through the first screen.
pub const SCROLL_COMMAND: &str = "npm run dev";

/// Linear map from a scroll domain to an output range, clamped at both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Transform {
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Position of `input` within the domain, in `0.0..=1.0`.
    pub fn progress(&self, input: f64) -> f64 {
        let (start, end) = self.domain;
        if input.is_nan() {
            return 0.0;
        }
        if start == end {
            return if input < start { 0.0 } else { 1.0 };
        }
        ((input - start) / (end - start)).clamp(0.0, 1.0)
    }

    pub fn sample(&self, input: f64) -> f64 {
        let (from, to) = self.range;
        let t = self.progress(input);
        if t >= 1.0 {
            return to;
        }
        from + (to - from) * t
    }

    pub fn start_value(&self) -> f64 {
        self.range.0
    }

    pub fn end_value(&self) -> f64 {
        self.range.1
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

pub const TYPING: Transform = Transform::new((0.0, 500.0), (0.0, 11.0));
pub const ROTATE_X_DEG: Transform = Transform::new((0.0, 500.0), (1.0, 0.0));
pub const SCROLL_HINT_OPACITY: Transform = Transform::new((0.0, 150.0), (1.0, 0.0));
pub const LASER_OPACITY: Transform = Transform::new((400.0, 650.0), (1.0, 0.0));

pub const MARGIN_TOP_VH: Transform = Transform::new((500.0, 700.0), (50.0, 0.0));
pub const TRANSLATE_Y_PERCENT: Transform = Transform::new((500.0, 700.0), (-50.0, 0.0));
pub const MAX_WIDTH_REM: Transform = Transform::new((500.0, 700.0), (46.0, 200.0));
pub const BORDER_RADIUS_PX: Transform = Transform::new((500.0, 700.0), (12.0, 0.0));
pub const CHASSIS_Y_PX: Transform = Transform::new((500.0, 700.0), (12.0, 0.0));
pub const CHASSIS_OPACITY: Transform = Transform::new((500.0, 650.0), (1.0, 0.0));

pub const HERO_OPACITY: Transform = Transform::new((500.0, 600.0), (1.0, 0.0));
pub const HEADER_OPACITY: Transform = Transform::new((600.0, 700.0), (0.0, 1.0));
pub const CONTENT_OPACITY: Transform = Transform::new((600.0, 850.0), (0.0, 1.0));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOptions {
    /// Pin every curve to its header-side end.
    pub always_header: bool,
    /// Snap every motion curve to the end matching the current mode. The typed
    /// command still follows the offset since it is text, not motion.
    pub reduced_motion: bool,
}

/// Every scroll-derived style value for one offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphFrame {
    pub typed_chars: usize,
    pub rotate_x_deg: f64,
    pub margin_top_vh: f64,
    pub translate_y_percent: f64,
    pub max_width_rem: f64,
    pub border_radius_px: f64,
    pub chassis_y_px: f64,
    pub chassis_opacity: f64,
    pub hero_opacity: f64,
    pub header_opacity: f64,
    pub content_opacity: f64,
    pub laser_opacity: f64,
    pub scroll_hint_opacity: f64,
}

#[derive(Clone, Copy)]
enum Drive {
    Follow(f64),
    Start,
    End,
}

impl Drive {
    fn read(self, curve: Transform) -> f64 {
        match self {
            Self::Follow(scroll) => curve.sample(scroll),
            Self::Start => curve.start_value(),
            Self::End => curve.end_value(),
        }
    }
}

impl MorphFrame {
    /// `mode` only matters under reduced motion, where it picks the resting end.
    pub fn at(scroll: f64, mode: ViewMode, options: FrameOptions) -> Self {
        let scroll = sanitize_offset(scroll);

        if options.always_header {
            return Self::build(Drive::End, Drive::End);
        }

        let motion = if options.reduced_motion {
            match mode {
                ViewMode::Hero => Drive::Start,
                ViewMode::Header => Drive::End,
            }
        } else {
            Drive::Follow(scroll)
        };
        Self::build(Drive::Follow(scroll), motion)
    }

    fn build(text: Drive, motion: Drive) -> Self {
        let typed = text.read(TYPING).round().max(0.0) as usize;

        Self {
            typed_chars: typed.min(SCROLL_COMMAND.len()),
            rotate_x_deg: motion.read(ROTATE_X_DEG),
            margin_top_vh: motion.read(MARGIN_TOP_VH),
            translate_y_percent: motion.read(TRANSLATE_Y_PERCENT),
            max_width_rem: motion.read(MAX_WIDTH_REM),
            border_radius_px: motion.read(BORDER_RADIUS_PX),
            chassis_y_px: motion.read(CHASSIS_Y_PX),
            chassis_opacity: motion.read(CHASSIS_OPACITY),
            hero_opacity: motion.read(HERO_OPACITY),
            header_opacity: motion.read(HEADER_OPACITY),
            content_opacity: motion.read(CONTENT_OPACITY),
            laser_opacity: motion.read(LASER_OPACITY),
            scroll_hint_opacity: motion.read(SCROLL_HINT_OPACITY),
        }
    }

    pub fn typed_command(&self) -> &'static str {
        &SCROLL_COMMAND[..self.typed_chars]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame(scroll: f64) -> MorphFrame {
        let mode = ViewMode::for_scroll(scroll, Default::default());
        MorphFrame::at(scroll, mode, FrameOptions::default())
    }

    #[test]
    fn transform_clamps_outside_domain() {
        let curve = Transform::new((500.0, 700.0), (12.0, 0.0));
        assert_eq!(curve.sample(-1_000.0), 12.0);
        assert_eq!(curve.sample(500.0), 12.0);
        assert_eq!(curve.sample(600.0), 6.0);
        assert_eq!(curve.sample(700.0), 0.0);
        assert_eq!(curve.sample(1e12), 0.0);
    }

    #[test]
    fn transform_is_defined_for_odd_inputs() {
        let curve = Transform::new((0.0, 100.0), (0.0, 1.0));
        assert_eq!(curve.sample(f64::NAN), 0.0);
        assert_eq!(curve.sample(f64::INFINITY), 1.0);
        assert_eq!(curve.sample(f64::NEG_INFINITY), 0.0);

        let step = Transform::new((50.0, 50.0), (3.0, 7.0));
        assert_eq!(step.sample(49.9), 3.0);
        assert_eq!(step.sample(50.0), 7.0);
    }

    #[test]
    fn typing_reveals_command_over_first_screen() {
        assert_eq!(frame(0.0).typed_command(), "");
        assert_eq!(frame(200.0).typed_command(), "npm ");
        assert_eq!(frame(250.0).typed_command(), "npm ru");
        assert_eq!(frame(500.0).typed_command(), "npm run dev");
        assert_eq!(frame(9_000.0).typed_command(), "npm run dev");
    }

    #[test]
    fn crossfade_hits_zero_zero_only_at_the_seam() {
        let seam = frame(600.0);
        assert_eq!(seam.hero_opacity, 0.0);
        assert_eq!(seam.header_opacity, 0.0);

        let before = frame(550.0);
        assert_eq!(before.hero_opacity, 0.5);
        assert_eq!(before.header_opacity, 0.0);

        let after = frame(650.0);
        assert_eq!(after.hero_opacity, 0.0);
        assert_eq!(after.header_opacity, 0.5);
    }

    #[test]
    fn morph_reaches_header_layout() {
        let start = frame(500.0);
        assert_eq!(start.margin_top_vh, 50.0);
        assert_eq!(start.translate_y_percent, -50.0);
        assert_eq!(start.max_width_rem, 46.0);
        assert_eq!(start.border_radius_px, 12.0);
        assert_eq!(start.rotate_x_deg, 0.0);

        let end = frame(700.0);
        assert_eq!(end.margin_top_vh, 0.0);
        assert_eq!(end.translate_y_percent, 0.0);
        assert_eq!(end.max_width_rem, 200.0);
        assert_eq!(end.border_radius_px, 0.0);
        assert_eq!(end.chassis_opacity, 0.0);
    }

    #[test]
    fn always_header_pins_header_side() {
        let pinned = MorphFrame::at(0.0, ViewMode::Hero, FrameOptions {
            always_header: true,
            reduced_motion: false,
        });

        assert_eq!(pinned.hero_opacity, 0.0);
        assert_eq!(pinned.header_opacity, 1.0);
        assert_eq!(pinned.margin_top_vh, 0.0);
        assert_eq!(pinned.border_radius_px, 0.0);
        assert_eq!(pinned.content_opacity, 1.0);
        assert_eq!(pinned.typed_command(), SCROLL_COMMAND);
    }

    #[test]
    fn reduced_motion_snaps_to_mode_rest() {
        let options = FrameOptions {
            always_header: false,
            reduced_motion: true,
        };

        let hero = MorphFrame::at(590.0, ViewMode::Hero, options);
        assert_eq!(hero.hero_opacity, 1.0);
        assert_eq!(hero.header_opacity, 0.0);
        assert_eq!(hero.margin_top_vh, 50.0);
        assert_eq!(hero.typed_command(), SCROLL_COMMAND);

        let header = MorphFrame::at(610.0, ViewMode::Header, options);
        assert_eq!(header.hero_opacity, 0.0);
        assert_eq!(header.header_opacity, 1.0);
        assert_eq!(header.content_opacity, 1.0);
        assert_eq!(header, frame(5_000.0));
    }

    proptest! {
        #[test]
        fn hero_and_header_never_both_fully_visible(scroll in -100.0f64..5_000.0) {
            let frame = frame(scroll);
            prop_assert!(!(frame.hero_opacity == 1.0 && frame.header_opacity == 1.0));
            prop_assert!(frame.hero_opacity == 0.0 || frame.header_opacity == 0.0);
        }

        #[test]
        fn every_output_stays_within_its_range(scroll in -1_000.0f64..10_000.0) {
            let frame = frame(scroll);
            for opacity in [
                frame.hero_opacity,
                frame.header_opacity,
                frame.chassis_opacity,
                frame.content_opacity,
                frame.laser_opacity,
                frame.scroll_hint_opacity,
            ] {
                prop_assert!((0.0..=1.0).contains(&opacity));
            }
            prop_assert!((0.0..=50.0).contains(&frame.margin_top_vh));
            prop_assert!((46.0..=200.0).contains(&frame.max_width_rem));
            prop_assert!(frame.typed_chars <= SCROLL_COMMAND.len());
        }
    }
}
