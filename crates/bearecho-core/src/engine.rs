//! Typing animation state machine.
//!
//! [`TypingAnimation`] reveals a target string one character per tick. It is
//! a pure state machine: every operation returns the [`TimerOp`]s the host has
//! to execute, and fired timers come back through
//! [`TypingAnimation::on_timer`]. The engine owns three timer slots:
//!
//! - `ticker`: the repeating reveal timer, armed only while revealing;
//! - `deferred`: one pending one-shot, either the loop restart after the
//!   hold at full text or the re-arm after a speed change;
//! - `auto_start`: the delayed start armed on activation.
//!
//! A fired id that is not held in one of the slots is stale and ignored, so
//! nothing cancelled by `pause`, `reset`, a target change or `dispose` can
//! touch the state again.
//!
//! ```text
//! Idle --start--> Revealing --pause--> Paused --start--> Revealing
//! Revealing --end, no loop--> Complete
//! Revealing --end, loop--> Holding --hold elapsed--> Revealing (from "")
//! any --reset / new target--> Idle
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    speed::TickInterval,
    timer::{TimerId, TimerIds, TimerMode, TimerOp, TimerRequest},
};

/// Delay before an auto-started animation begins.
pub const AUTO_START_DELAY: Duration = Duration::from_millis(1000);

/// How long a looping animation holds the full text before starting over.
pub const LOOP_HOLD: Duration = Duration::from_millis(2000);

/// Options fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationOptions {
    /// Initial tick interval.
    pub speed: TickInterval,

    /// Start automatically `auto_start_delay` after activation.
    pub auto_start: bool,

    /// Delay used by `auto_start`.
    pub auto_start_delay: Duration,

    /// Start over after the full text has been shown for `loop_hold`.
    pub loop_enabled: bool,

    /// Hold time at full text when looping.
    pub loop_hold: Duration,

    /// Arm auto-start again whenever the target text changes.
    pub rearm_auto_start_on_text_change: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            speed: TickInterval::default(),
            auto_start: false,
            auto_start_delay: AUTO_START_DELAY,
            loop_enabled: false,
            loop_hold: LOOP_HOLD,
            rearm_auto_start_on_text_change: false,
        }
    }
}

/// Where the reveal sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing revealed and not running.
    Idle,
    /// Ticking.
    Revealing,
    /// Looping: full text shown, waiting for the restart.
    Holding,
    /// Stopped by `pause` with part of the text revealed.
    Paused,
    /// Full text shown, no loop. Terminal until reset or a new target.
    Complete,
}

impl Phase {
    /// Whether observers should see the animation as playing.
    pub fn is_running(self) -> bool {
        matches!(self, Phase::Revealing | Phase::Holding)
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Revealed prefix of the target text.
    pub display_text: String,

    /// Whether the animation is playing (revealing or holding for a loop).
    pub is_animating: bool,

    /// Number of revealed characters.
    pub revealed: usize,

    /// Number of characters in the target text.
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    LoopRestart,
    SpeedReapply,
}

/// The typing animation engine. See the module docs for the timer contract.
#[derive(Debug)]
pub struct TypingAnimation {
    target: String,
    total: usize,
    revealed: usize,
    phase: Phase,
    speed: TickInterval,
    options: AnimationOptions,
    ids: TimerIds,
    ticker: Option<TimerId>,
    deferred: Option<(TimerId, Deferred)>,
    auto_start: Option<TimerId>,
    activated: bool,
    disposed: bool,
}

impl TypingAnimation {
    /// Create an idle engine. No timer is armed until [`activate`](Self::activate).
    pub fn new(target: impl Into<String>, options: AnimationOptions) -> Self {
        let target = target.into();
        Self {
            total: target.chars().count(),
            target,
            revealed: 0,
            phase: Phase::Idle,
            speed: options.speed,
            options,
            ids: TimerIds::default(),
            ticker: None,
            deferred: None,
            auto_start: None,
            activated: false,
            disposed: false,
        }
    }

    /// Activate the engine, arming the auto-start timer if enabled.
    ///
    /// Only the first call has an effect.
    pub fn activate(&mut self) -> Vec<TimerOp> {
        let mut ops = Vec::new();
        if self.disposed || self.activated {
            return ops;
        }
        self.activated = true;
        if self.options.auto_start {
            self.arm_auto_start(&mut ops);
        }
        ops
    }

    /// Start or resume revealing.
    ///
    /// No-op when already running or when the whole text is shown and
    /// looping is off. With looping on, starting at full text resumes the
    /// hold before the restart.
    pub fn start(&mut self) -> Vec<TimerOp> {
        let mut ops = Vec::new();
        if self.disposed {
            return ops;
        }
        self.cancel_auto_start(&mut ops);
        self.start_inner(&mut ops);
        ops
    }

    /// Stop revealing and keep the revealed prefix.
    pub fn pause(&mut self) -> Vec<TimerOp> {
        let mut ops = Vec::new();
        if self.disposed {
            return ops;
        }
        self.cancel_auto_start(&mut ops);
        if !self.phase.is_running() {
            return ops;
        }
        self.clear_timers(&mut ops);
        self.phase = if self.revealed == 0 {
            Phase::Idle
        } else {
            Phase::Paused
        };
        debug!(revealed = self.revealed, "typing animation paused");
        ops
    }

    /// Stop, hide everything and cancel every outstanding timer.
    pub fn reset(&mut self) -> Vec<TimerOp> {
        let mut ops = Vec::new();
        if self.disposed {
            return ops;
        }
        self.clear_timers(&mut ops);
        self.revealed = 0;
        self.phase = Phase::Idle;
        debug!("typing animation reset");
        ops
    }

    /// Change the tick interval.
    ///
    /// While revealing, the running ticker is cancelled and a zero-delay
    /// one-shot is armed; the new ticker is only armed when that one-shot
    /// fires, so no tick at the old interval can follow this call. In any
    /// other phase the interval is just recorded for the next start.
    pub fn set_speed(&mut self, speed: TickInterval) -> Vec<TimerOp> {
        let mut ops = Vec::new();
        if self.disposed || speed == self.speed {
            return ops;
        }
        debug!(from = %self.speed, to = %speed, "typing animation speed changed");
        self.speed = speed;
        if self.phase == Phase::Revealing {
            if let Some(id) = self.ticker.take() {
                ops.push(TimerOp::Cancel(id));
            }
            if let Some((id, _)) = self.deferred.take() {
                ops.push(TimerOp::Cancel(id));
            }
            self.arm_deferred(Deferred::SpeedReapply, Duration::ZERO, &mut ops);
        }
        ops
    }

    /// Replace the target text. Resets the sequence; auto-start is armed
    /// again only when `rearm_auto_start_on_text_change` is set.
    pub fn set_target(&mut self, target: impl Into<String>) -> Vec<TimerOp> {
        let target = target.into();
        if self.disposed || target == self.target {
            return Vec::new();
        }
        let mut ops = self.reset();
        self.total = target.chars().count();
        self.target = target;
        if self.options.auto_start && self.options.rearm_auto_start_on_text_change {
            self.arm_auto_start(&mut ops);
        }
        ops
    }

    /// Handle a fired timer. Stale ids are ignored.
    pub fn on_timer(&mut self, id: TimerId) -> Vec<TimerOp> {
        let mut ops = Vec::new();
        if self.disposed {
            trace!(%id, "timer fired after disposal, ignored");
            return ops;
        }

        if self.ticker == Some(id) {
            self.tick(&mut ops);
        } else if let Some(kind) = self.take_deferred(id) {
            match kind {
                Deferred::LoopRestart => {
                    trace!("loop hold elapsed, restarting");
                    self.revealed = 0;
                    self.phase = Phase::Revealing;
                    self.arm_ticker(&mut ops);
                }
                Deferred::SpeedReapply => {
                    if self.phase == Phase::Revealing {
                        self.arm_ticker(&mut ops);
                    }
                }
            }
        } else if self.auto_start == Some(id) {
            self.auto_start = None;
            if self.phase == Phase::Idle && self.revealed == 0 {
                debug!("auto-starting typing animation");
                self.start_inner(&mut ops);
            }
        } else {
            trace!(%id, "stale timer ignored");
        }
        ops
    }

    /// Cancel everything and refuse further work. Idempotent.
    pub fn dispose(&mut self) -> Vec<TimerOp> {
        let mut ops = Vec::new();
        if self.disposed {
            return ops;
        }
        self.clear_timers(&mut ops);
        self.disposed = true;
        debug!("typing animation disposed");
        ops
    }

    /// Current read-only view.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display_text: self.display_text().to_string(),
            is_animating: self.phase.is_running(),
            revealed: self.revealed,
            total: self.total,
        }
    }

    /// Revealed prefix of the target text.
    pub fn display_text(&self) -> &str {
        let end = self
            .target
            .char_indices()
            .nth(self.revealed)
            .map_or(self.target.len(), |(idx, _)| idx);
        &self.target[..end]
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn speed(&self) -> TickInterval {
        self.speed
    }

    pub fn loop_enabled(&self) -> bool {
        self.options.loop_enabled
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of timers the host should currently have armed.
    pub fn armed_timers(&self) -> usize {
        usize::from(self.ticker.is_some())
            + usize::from(self.deferred.is_some())
            + usize::from(self.auto_start.is_some())
    }

    fn start_inner(&mut self, ops: &mut Vec<TimerOp>) {
        if self.phase.is_running() {
            return;
        }
        if self.revealed >= self.total {
            if self.options.loop_enabled && self.total > 0 {
                self.phase = Phase::Holding;
                self.arm_deferred(Deferred::LoopRestart, self.options.loop_hold, ops);
                debug!("typing animation resumed into loop hold");
            }
            return;
        }
        self.phase = Phase::Revealing;
        self.arm_ticker(ops);
        debug!(revealed = self.revealed, speed = %self.speed, "typing animation started");
    }

    fn tick(&mut self, ops: &mut Vec<TimerOp>) {
        let next = self.revealed + 1;
        if next <= self.total {
            self.revealed = next;
            trace!(revealed = next, "tick");
            return;
        }

        if let Some(id) = self.ticker.take() {
            ops.push(TimerOp::Cancel(id));
        }
        if self.options.loop_enabled {
            self.phase = Phase::Holding;
            self.arm_deferred(Deferred::LoopRestart, self.options.loop_hold, ops);
            debug!("typing animation reached the end, holding before restart");
        } else {
            self.phase = Phase::Complete;
            debug!("typing animation complete");
        }
    }

    fn arm_ticker(&mut self, ops: &mut Vec<TimerOp>) {
        if let Some(id) = self.ticker.take() {
            ops.push(TimerOp::Cancel(id));
        }
        let id = self.ids.next();
        self.ticker = Some(id);
        ops.push(TimerOp::Arm(TimerRequest {
            id,
            mode: TimerMode::Repeating,
            delay: self.speed.as_duration(),
        }));
    }

    fn arm_deferred(&mut self, kind: Deferred, delay: Duration, ops: &mut Vec<TimerOp>) {
        if let Some((id, _)) = self.deferred.take() {
            ops.push(TimerOp::Cancel(id));
        }
        let id = self.ids.next();
        self.deferred = Some((id, kind));
        ops.push(TimerOp::Arm(TimerRequest {
            id,
            mode: TimerMode::Once,
            delay,
        }));
    }

    fn arm_auto_start(&mut self, ops: &mut Vec<TimerOp>) {
        self.cancel_auto_start(ops);
        let id = self.ids.next();
        self.auto_start = Some(id);
        ops.push(TimerOp::Arm(TimerRequest {
            id,
            mode: TimerMode::Once,
            delay: self.options.auto_start_delay,
        }));
    }

    fn take_deferred(&mut self, id: TimerId) -> Option<Deferred> {
        match self.deferred {
            Some((pending, kind)) if pending == id => {
                self.deferred = None;
                Some(kind)
            }
            _ => None,
        }
    }

    fn cancel_auto_start(&mut self, ops: &mut Vec<TimerOp>) {
        if let Some(id) = self.auto_start.take() {
            ops.push(TimerOp::Cancel(id));
        }
    }

    fn clear_timers(&mut self, ops: &mut Vec<TimerOp>) {
        if let Some(id) = self.ticker.take() {
            ops.push(TimerOp::Cancel(id));
        }
        if let Some((id, _)) = self.deferred.take() {
            ops.push(TimerOp::Cancel(id));
        }
        self.cancel_auto_start(ops);
    }
}
