//! Hero/header mode, the staggered header reveal, and the boot sequence, driven by
//! scroll offsets and a caller-supplied clock.
//!
//! The mode itself comes from [`reduce_mode`], a pure function of the previous mode
//! and the latest offset. [`HeroController`] layers the phase timers and the boot
//! sequence on top and never touches a platform API; the host feeds it scroll
//! offsets and clock ticks and arms one timer for [`HeroController::next_deadline`].

use crate::boot::{BootLine, BootSequence, BootTimings};
use crate::scroll::sanitize_offset;
use crate::timeline::Timeline;

pub const HEADER_THRESHOLD_PX: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Hero,
    Header,
}

impl ViewMode {
    pub fn for_scroll(scroll: f64, thresholds: Thresholds) -> Self {
        if sanitize_offset(scroll) > thresholds.enter_header_px {
            Self::Header
        } else {
            Self::Hero
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Header => "header",
        }
    }
}

/// Offsets at which the mode flips. Entering needs `scroll > enter_header_px`,
/// leaving needs `scroll <= exit_header_px`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub enter_header_px: f64,
    pub exit_header_px: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            enter_header_px: HEADER_THRESHOLD_PX,
            exit_header_px: HEADER_THRESHOLD_PX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeTransition {
    Unchanged,
    EnteredHeader,
    ReturnedToHero,
}

pub fn reduce_mode(mode: ViewMode, scroll: f64, thresholds: Thresholds) -> ModeTransition {
    let scroll = sanitize_offset(scroll);
    match mode {
        ViewMode::Hero if scroll > thresholds.enter_header_px => ModeTransition::EnteredHeader,
        ViewMode::Header if scroll <= thresholds.exit_header_px => ModeTransition::ReturnedToHero,
        _ => ModeTransition::Unchanged,
    }
}

/// Centre slot of the header: boot banner, then section navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderPhase {
    Boot,
    Nav,
}

/// Left slot under the name: dev-server status, then role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeftPhase {
    Running,
    Role,
}

/// Right slot: server indicator, then resume link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RightPhase {
    Active,
    Resume,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseAdvance {
    HeaderNav,
    LeftRole,
    RightResume,
}

impl PhaseAdvance {
    pub const ALL: [Self; 3] = [Self::HeaderNav, Self::LeftRole, Self::RightResume];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeaderNav => "header_nav",
            Self::LeftRole => "left_role",
            Self::RightResume => "right_resume",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTimings {
    pub header_nav_ms: u64,
    pub left_role_ms: u64,
    pub right_resume_ms: u64,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            header_nav_ms: 2_000,
            left_role_ms: 3_000,
            right_resume_ms: 4_000,
        }
    }
}

impl PhaseTimings {
    fn delay_for(self, advance: PhaseAdvance) -> u64 {
        match advance {
            PhaseAdvance::HeaderNav => self.header_nav_ms,
            PhaseAdvance::LeftRole => self.left_role_ms,
            PhaseAdvance::RightResume => self.right_resume_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub header_phase: HeaderPhase,
    pub left_phase: LeftPhase,
    pub right_phase: RightPhase,
}

impl ViewState {
    pub const HERO: Self = Self {
        mode: ViewMode::Hero,
        header_phase: HeaderPhase::Boot,
        left_phase: LeftPhase::Running,
        right_phase: RightPhase::Active,
    };

    pub const SETTLED_HEADER: Self = Self {
        mode: ViewMode::Header,
        header_phase: HeaderPhase::Nav,
        left_phase: LeftPhase::Role,
        right_phase: RightPhase::Resume,
    };

    fn apply(&mut self, advance: PhaseAdvance) {
        match advance {
            PhaseAdvance::HeaderNav => self.header_phase = HeaderPhase::Nav,
            PhaseAdvance::LeftRole => self.left_phase = LeftPhase::Role,
            PhaseAdvance::RightResume => self.right_phase = RightPhase::Resume,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeroConfig {
    /// Present permanently as the page's top bar; scroll input is ignored.
    pub always_header: bool,
    /// Replace timed reveals with immediate state changes.
    pub reduced_motion: bool,
    pub thresholds: Thresholds,
    pub phases: PhaseTimings,
    pub boot: BootTimings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub phases: Vec<PhaseAdvance>,
    pub boot_changed: bool,
    pub boot_completed: bool,
}

impl TickOutcome {
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty() && !self.boot_changed
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeroSnapshot {
    pub view: ViewState,
    pub boot_lines: Vec<BootLine>,
    pub boot_complete: bool,
}

#[derive(Debug)]
pub struct HeroController {
    config: HeroConfig,
    view: ViewState,
    phase_timers: Timeline<PhaseAdvance>,
    boot: BootSequence,
    lifecycle: Lifecycle,
}

impl HeroController {
    pub fn new(config: HeroConfig) -> Self {
        let view = if config.always_header {
            ViewState::SETTLED_HEADER
        } else {
            ViewState::HERO
        };

        Self {
            config,
            view,
            phase_timers: Timeline::new(),
            boot: BootSequence::new(config.boot),
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn config(&self) -> HeroConfig {
        self.config
    }

    /// Starts the boot sequence. Returns `false` when it was already started, the
    /// controller is a permanent header, or it has been unmounted.
    pub fn mount(&mut self, now_ms: u64) -> bool {
        if self.lifecycle == Lifecycle::Unmounted {
            return false;
        }
        self.lifecycle = Lifecycle::Mounted;

        if self.config.always_header {
            return false;
        }
        self.boot.start(now_ms, self.config.reduced_motion)
    }

    /// Cancels every pending phase timer and aborts the boot sequence. Nothing mutates
    /// the controller afterwards.
    pub fn unmount(&mut self) {
        self.phase_timers.cancel_all();
        self.boot.abort();
        self.lifecycle = Lifecycle::Unmounted;
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn on_scroll(&mut self, scroll: f64, now_ms: u64) -> ModeTransition {
        if self.lifecycle != Lifecycle::Mounted || self.config.always_header {
            return ModeTransition::Unchanged;
        }

        let transition = reduce_mode(self.view.mode, scroll, self.config.thresholds);
        match transition {
            ModeTransition::Unchanged => {}
            ModeTransition::EnteredHeader => self.enter_header(now_ms),
            ModeTransition::ReturnedToHero => {
                self.phase_timers.cancel_all();
                self.view = ViewState::HERO;
            }
        }
        transition
    }

    fn enter_header(&mut self, now_ms: u64) {
        self.view = ViewState {
            mode: ViewMode::Header,
            ..ViewState::HERO
        };

        if self.config.reduced_motion {
            self.view = ViewState::SETTLED_HEADER;
            return;
        }

        for advance in PhaseAdvance::ALL {
            self.phase_timers
                .schedule(now_ms, self.config.phases.delay_for(advance), advance);
        }
    }

    pub fn on_tick(&mut self, now_ms: u64) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.lifecycle != Lifecycle::Mounted {
            return outcome;
        }

        for advance in self.phase_timers.drain_due(now_ms) {
            if self.view.mode == ViewMode::Header {
                self.view.apply(advance);
                outcome.phases.push(advance);
            }
        }

        let was_complete = self.boot.is_complete();
        outcome.boot_changed = self.boot.poll(now_ms);
        outcome.boot_completed = !was_complete && self.boot.is_complete();
        outcome
    }

    pub fn next_deadline(&self) -> Option<u64> {
        if self.lifecycle != Lifecycle::Mounted {
            return None;
        }

        match (self.phase_timers.next_deadline(), self.boot.next_deadline()) {
            (Some(phase), Some(boot)) => Some(phase.min(boot)),
            (phase, boot) => phase.or(boot),
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode
    }

    pub fn pending_phase_timers(&self) -> usize {
        self.phase_timers.len()
    }

    /// A permanent header counts as booted.
    pub fn boot_complete(&self) -> bool {
        self.config.always_header || self.boot.is_complete()
    }

    pub fn snapshot(&self) -> HeroSnapshot {
        HeroSnapshot {
            view: self.view,
            boot_lines: self.boot.lines().to_vec(),
            boot_complete: self.boot_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mounted(config: HeroConfig) -> HeroController {
        let mut controller = HeroController::new(config);
        controller.mount(0);
        controller
    }

    #[test]
    fn threshold_is_hero_inclusive() {
        let thresholds = Thresholds::default();
        assert_eq!(ViewMode::for_scroll(600.0, thresholds), ViewMode::Hero);
        assert_eq!(ViewMode::for_scroll(600.5, thresholds), ViewMode::Header);

        assert_eq!(
            reduce_mode(ViewMode::Hero, 600.0, thresholds),
            ModeTransition::Unchanged
        );
        assert_eq!(
            reduce_mode(ViewMode::Header, 600.0, thresholds),
            ModeTransition::ReturnedToHero
        );
        assert_eq!(
            reduce_mode(ViewMode::Hero, 601.0, thresholds),
            ModeTransition::EnteredHeader
        );
    }

    #[test]
    fn separate_thresholds_form_a_band() {
        let thresholds = Thresholds {
            enter_header_px: 620.0,
            exit_header_px: 580.0,
        };

        assert_eq!(
            reduce_mode(ViewMode::Hero, 600.0, thresholds),
            ModeTransition::Unchanged
        );
        assert_eq!(
            reduce_mode(ViewMode::Header, 600.0, thresholds),
            ModeTransition::Unchanged
        );
        assert_eq!(
            reduce_mode(ViewMode::Header, 580.0, thresholds),
            ModeTransition::ReturnedToHero
        );
    }

    #[test]
    fn phases_advance_on_schedule_after_entering_header() {
        let mut controller = mounted(HeroConfig::default());

        assert_eq!(controller.on_scroll(650.0, 1_000), ModeTransition::EnteredHeader);
        assert_eq!(controller.view().header_phase, HeaderPhase::Boot);
        assert_eq!(controller.pending_phase_timers(), 3);

        let outcome = controller.on_tick(2_999);
        assert!(outcome.phases.is_empty());

        let outcome = controller.on_tick(3_000);
        assert_eq!(outcome.phases, vec![PhaseAdvance::HeaderNav]);
        assert_eq!(controller.view().header_phase, HeaderPhase::Nav);
        assert_eq!(controller.view().left_phase, LeftPhase::Running);

        let outcome = controller.on_tick(5_000);
        assert_eq!(
            outcome.phases,
            vec![PhaseAdvance::LeftRole, PhaseAdvance::RightResume]
        );
        assert_eq!(controller.view(), ViewState::SETTLED_HEADER);
        assert_eq!(controller.pending_phase_timers(), 0);
    }

    #[test]
    fn reverting_before_timers_fire_cancels_them() {
        let mut controller = mounted(HeroConfig::default());

        controller.on_scroll(700.0, 0);
        assert_eq!(controller.on_scroll(300.0, 1_500), ModeTransition::ReturnedToHero);
        assert_eq!(controller.pending_phase_timers(), 0);

        for now in [2_000, 3_000, 4_000, 60_000] {
            let outcome = controller.on_tick(now);
            assert!(outcome.phases.is_empty());
            assert_eq!(controller.view(), ViewState::HERO);
        }
    }

    #[test]
    fn bounce_does_not_double_advance_from_stale_timers() {
        let mut controller = mounted(HeroConfig::default());

        controller.on_scroll(700.0, 0);
        controller.on_scroll(500.0, 1_000);
        controller.on_scroll(700.0, 1_500);

        // The first entry's 2000ms timer would have landed here.
        controller.on_tick(2_000);
        assert_eq!(controller.view().header_phase, HeaderPhase::Boot);

        controller.on_tick(3_500);
        assert_eq!(controller.view().header_phase, HeaderPhase::Nav);
        assert_eq!(controller.view().left_phase, LeftPhase::Running);
        assert_eq!(controller.pending_phase_timers(), 2);
    }

    #[test]
    fn reentering_header_restarts_phases() {
        let mut controller = mounted(HeroConfig::default());

        controller.on_scroll(900.0, 0);
        controller.on_tick(10_000);
        assert_eq!(controller.view(), ViewState::SETTLED_HEADER);

        controller.on_scroll(0.0, 11_000);
        assert_eq!(controller.view(), ViewState::HERO);

        controller.on_scroll(900.0, 12_000);
        assert_eq!(controller.view().header_phase, HeaderPhase::Boot);
        assert_eq!(controller.view().left_phase, LeftPhase::Running);
        assert_eq!(controller.view().right_phase, RightPhase::Active);
    }

    #[test]
    fn repeated_offsets_do_not_reschedule() {
        let mut controller = mounted(HeroConfig::default());
        controller.on_tick(1_000);

        controller.on_scroll(800.0, 1_000);
        assert_eq!(controller.on_scroll(800.0, 1_500), ModeTransition::Unchanged);
        assert_eq!(controller.on_scroll(950.0, 1_900), ModeTransition::Unchanged);
        assert_eq!(controller.pending_phase_timers(), 3);
        assert_eq!(controller.next_deadline(), Some(3_000));
    }

    #[test]
    fn jump_from_top_to_far_below_lands_in_header() {
        let mut controller = mounted(HeroConfig::default());

        assert_eq!(controller.on_scroll(10_000.0, 0), ModeTransition::EnteredHeader);
        assert_eq!(controller.mode(), ViewMode::Header);
        assert_eq!(controller.view().header_phase, HeaderPhase::Boot);
    }

    #[test]
    fn always_header_is_settled_and_inert() {
        let mut controller = HeroController::new(HeroConfig {
            always_header: true,
            ..HeroConfig::default()
        });

        assert!(!controller.mount(0));
        assert_eq!(controller.view(), ViewState::SETTLED_HEADER);
        assert!(controller.boot_complete());
        assert!(controller.snapshot().boot_lines.is_empty());

        assert_eq!(controller.on_scroll(0.0, 10), ModeTransition::Unchanged);
        assert_eq!(controller.view(), ViewState::SETTLED_HEADER);
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn reduced_motion_settles_header_immediately() {
        let mut controller = mounted(HeroConfig {
            reduced_motion: true,
            ..HeroConfig::default()
        });

        assert!(controller.boot_complete());
        controller.on_scroll(601.0, 0);
        assert_eq!(controller.view(), ViewState::SETTLED_HEADER);
        assert_eq!(controller.pending_phase_timers(), 0);

        controller.on_scroll(0.0, 10);
        assert_eq!(controller.view(), ViewState::HERO);
    }

    #[test]
    fn unmount_silences_everything() {
        let mut controller = mounted(HeroConfig::default());
        controller.on_scroll(700.0, 0);
        controller.unmount();

        assert_eq!(controller.next_deadline(), None);
        assert!(controller.on_tick(100_000).is_empty());
        assert_eq!(controller.on_scroll(0.0, 100_001), ModeTransition::Unchanged);
        assert_eq!(controller.mode(), ViewMode::Header);
        assert_eq!(controller.view().header_phase, HeaderPhase::Boot);
        assert!(!controller.mount(100_002));
    }

    #[test]
    fn boot_sequence_runs_once_per_controller() {
        let mut controller = HeroController::new(HeroConfig::default());
        assert!(controller.mount(0));
        controller.on_tick(1_000);
        assert!(controller.boot_complete());
        let lines = controller.snapshot().boot_lines;

        assert!(!controller.mount(2_000));
        assert_eq!(controller.next_deadline(), None);
        controller.on_tick(5_000);
        assert_eq!(controller.snapshot().boot_lines, lines);
    }

    #[test]
    fn boot_sequence_is_independent_of_scroll() {
        let mut controller = mounted(HeroConfig::default());
        controller.on_scroll(5_000.0, 100);
        controller.on_scroll(0.0, 200);

        let outcome = controller.on_tick(600);
        assert!(outcome.boot_completed);
        assert!(controller.boot_complete());
    }

    #[test]
    fn next_deadline_takes_the_earliest_source() {
        let mut controller = mounted(HeroConfig::default());
        // Mounting types the first character at once; the second is due at 50.
        assert_eq!(controller.next_deadline(), Some(50));

        controller.on_tick(600);
        assert_eq!(controller.next_deadline(), None);

        controller.on_scroll(700.0, 1_000);
        assert_eq!(controller.next_deadline(), Some(3_000));
    }

    proptest! {
        #[test]
        fn mode_matches_threshold(scroll in 0.0f64..20_000.0) {
            let expected = if scroll > HEADER_THRESHOLD_PX { ViewMode::Header } else { ViewMode::Hero };
            prop_assert_eq!(ViewMode::for_scroll(scroll, Thresholds::default()), expected);

            let mut controller = mounted(HeroConfig::default());
            controller.on_scroll(scroll, 0);
            prop_assert_eq!(controller.mode(), expected);
        }

        #[test]
        fn mode_depends_only_on_latest_offset(
            offsets in proptest::collection::vec(0.0f64..2_000.0, 1..40),
        ) {
            let mut controller = mounted(HeroConfig::default());
            for (index, offset) in offsets.iter().enumerate() {
                controller.on_scroll(*offset, index as u64 * 16);
            }

            let last = offsets[offsets.len() - 1];
            prop_assert_eq!(controller.mode(), ViewMode::for_scroll(last, Thresholds::default()));
            if controller.mode() == ViewMode::Hero {
                prop_assert_eq!(controller.view(), ViewState::HERO);
                prop_assert_eq!(controller.pending_phase_timers(), 0);
            }
        }
    }
}
