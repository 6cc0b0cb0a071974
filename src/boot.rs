//! The hero terminal's opening `whoami` sequence.

use crate::timeline::{RunState, SequenceRunner};

pub const BOOT_COMMAND: &str = "whoami";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootTimings {
    pub char_delay_ms: u64,
    /// Extra wait between the last character and the identity block.
    pub pause_ms: u64,
}

impl Default for BootTimings {
    fn default() -> Self {
        Self {
            char_delay_ms: 50,
            pause_ms: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootLine {
    /// The prompt line, holding the part of the command typed so far.
    Command(String),
    /// Name, role and affiliation; rendered from the content store.
    Identity,
    Spacer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BootStep {
    Type(usize),
    Identity,
}

fn boot_steps(command: &str, timings: BootTimings) -> Vec<(u64, BootStep)> {
    let chars = command.chars().count();
    let mut steps: Vec<(u64, BootStep)> = (1..=chars)
        .map(|typed| {
            let delay = if typed == 1 { 0 } else { timings.char_delay_ms };
            (delay, BootStep::Type(typed))
        })
        .collect();

    let identity_delay = if chars == 0 {
        timings.pause_ms
    } else {
        timings.char_delay_ms + timings.pause_ms
    };
    steps.push((identity_delay, BootStep::Identity));
    steps
}

#[derive(Debug)]
pub struct BootSequence {
    runner: SequenceRunner<BootStep>,
    lines: Vec<BootLine>,
}

impl BootSequence {
    pub fn new(timings: BootTimings) -> Self {
        Self {
            runner: SequenceRunner::new(boot_steps(BOOT_COMMAND, timings)),
            lines: Vec::new(),
        }
    }

    /// Returns `false` if the sequence has been started or aborted before.
    /// `immediate` applies every step at once.
    pub fn start(&mut self, now_ms: u64, immediate: bool) -> bool {
        if !self.runner.start(now_ms) {
            return false;
        }

        let steps = if immediate {
            self.runner.finish_now()
        } else {
            self.runner.poll(now_ms)
        };
        self.apply_all(steps);
        true
    }

    /// Returns whether any line changed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let steps = self.runner.poll(now_ms);
        let changed = !steps.is_empty();
        self.apply_all(steps);
        changed
    }

    pub fn abort(&mut self) -> bool {
        self.runner.abort()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.runner.next_deadline()
    }

    pub fn is_complete(&self) -> bool {
        self.runner.is_finished()
    }

    pub fn is_aborted(&self) -> bool {
        self.runner.state() == RunState::Aborted
    }

    pub fn lines(&self) -> &[BootLine] {
        &self.lines
    }

    fn apply_all(&mut self, steps: Vec<BootStep>) {
        for step in steps {
            self.apply(step);
        }
    }

    fn apply(&mut self, step: BootStep) {
        match step {
            BootStep::Type(typed) => {
                let text: String = BOOT_COMMAND.chars().take(typed).collect();
                match self.lines.first_mut() {
                    Some(BootLine::Command(current)) => *current = text,
                    _ => self.lines.insert(0, BootLine::Command(text)),
                }
            }
            BootStep::Identity => {
                self.lines.push(BootLine::Identity);
                self.lines.push(BootLine::Spacer);
            }
        }
    }
}
