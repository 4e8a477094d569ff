//! Timer command protocol between the animation engine and its host.
//!
//! The engine never owns a clock. Each operation returns a list of
//! [`TimerOp`]s which the host (browser bindings or a test scheduler) must
//! execute in order, reporting fired timers back through
//! [`TypingAnimation::on_timer`](crate::TypingAnimation::on_timer).

use std::{fmt, time::Duration};

/// Opaque identifier of a timer armed by the engine.
///
/// Ids grow monotonically and are never reused, so a late delivery of a
/// cancelled timer can always be told apart from a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric value, mostly useful for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Whether a timer fires once or keeps firing every `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Fires every `delay` until cancelled.
    Repeating,
    /// Fires once after `delay`.
    Once,
}

/// A request to arm a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    /// Identifier the host must report back when the timer fires.
    pub id: TimerId,

    /// Repeating or one-shot.
    pub mode: TimerMode,

    /// Interval (repeating) or delay (one-shot).
    pub delay: Duration,
}

/// A command for the timer host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOp {
    /// Arm a new timer.
    Arm(TimerRequest),
    /// Cancel a previously armed timer. Cancelling an unknown or already
    /// fired timer must be a no-op on the host side.
    Cancel(TimerId),
}

impl TimerOp {
    /// The timer this command refers to.
    pub fn id(&self) -> TimerId {
        match self {
            TimerOp::Arm(request) => request.id,
            TimerOp::Cancel(id) => *id,
        }
    }
}

/// Allocator for fresh timer ids.
#[derive(Debug, Default)]
pub(crate) struct TimerIds {
    next: u64,
}

impl TimerIds {
    pub(crate) fn next(&mut self) -> TimerId {
        self.next += 1;
        TimerId(self.next)
    }
}
