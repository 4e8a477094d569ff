//! Reactive bindings for the typing animation engine.
//!
//! [`use_typing_animation`] owns a [`TypingAnimation`] for the lifetime of the
//! calling component, executes its timer commands with browser timers and
//! publishes a [`Snapshot`] signal the views render from.

use std::collections::HashMap;

use bearecho_core::{
    AnimationOptions, Snapshot, TickInterval, TimerId, TimerMode, TimerOp, TimerRequest,
    TypingAnimation,
};
use leptos::prelude::*;

/// A browser timer armed on behalf of the engine.
enum ActiveTimer {
    Interval(IntervalHandle),
    Timeout(TimeoutHandle),
}

impl ActiveTimer {
    fn clear(self) {
        match self {
            ActiveTimer::Interval(handle) => handle.clear(),
            ActiveTimer::Timeout(handle) => handle.clear(),
        }
    }
}

/// Engine plus the browser handles of every timer it asked for.
struct Driver {
    engine: TypingAnimation,
    timers: HashMap<TimerId, ActiveTimer>,
}

impl Driver {
    fn apply(&mut self, ops: Vec<TimerOp>, handle: TypingAnimationHandle) {
        for op in ops {
            match op {
                TimerOp::Arm(TimerRequest { id, mode, delay }) => {
                    let armed = match mode {
                        TimerMode::Repeating => {
                            set_interval_with_handle(move || handle.fire(id), delay)
                                .map(ActiveTimer::Interval)
                        }
                        TimerMode::Once => set_timeout_with_handle(move || handle.fire(id), delay)
                            .map(ActiveTimer::Timeout),
                    };
                    match armed {
                        Ok(timer) => {
                            self.timers.insert(id, timer);
                        }
                        Err(err) => tracing::warn!(%id, ?err, "failed to arm animation timer"),
                    }
                }
                TimerOp::Cancel(id) => {
                    if let Some(timer) = self.timers.remove(&id) {
                        timer.clear();
                    }
                }
            }
        }
    }
}

/// Handle to a running typing animation.
///
/// Cheap to copy; every copy controls the same engine.
#[derive(Clone, Copy)]
pub struct TypingAnimationHandle {
    driver: StoredValue<Driver>,
    snapshot: RwSignal<Snapshot>,
    speed: RwSignal<TickInterval>,
}

impl TypingAnimationHandle {
    /// Latest engine snapshot.
    pub fn snapshot(self) -> ReadSignal<Snapshot> {
        self.snapshot.read_only()
    }

    /// Revealed prefix of the target text.
    pub fn display_text(self) -> Signal<String> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.display_text.clone()))
    }

    /// Whether the animation is playing.
    pub fn is_animating(self) -> Signal<bool> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.is_animating))
    }

    /// Current tick interval.
    pub fn speed(self) -> Signal<TickInterval> {
        self.speed.into()
    }

    pub fn start(self) {
        self.dispatch(|driver| driver.engine.start());
    }

    pub fn pause(self) {
        self.dispatch(|driver| driver.engine.pause());
    }

    pub fn reset(self) {
        self.dispatch(|driver| driver.engine.reset());
    }

    pub fn set_speed(self, speed: TickInterval) {
        self.dispatch(|driver| driver.engine.set_speed(speed));
    }

    fn set_target(self, target: String) {
        self.dispatch(|driver| driver.engine.set_target(target));
    }

    fn fire(self, id: TimerId) {
        self.dispatch(|driver| {
            // A one-shot is spent once it fires; intervals stay until cancelled.
            if let Some(ActiveTimer::Timeout(_)) = driver.timers.get(&id) {
                driver.timers.remove(&id);
            }
            driver.engine.on_timer(id)
        });
    }

    fn dispose(self) {
        self.dispatch(|driver| driver.engine.dispose());
    }

    /// Run an engine operation, execute its timer commands and publish the
    /// new state. Does nothing once the owning component is gone.
    fn dispatch(self, op: impl FnOnce(&mut Driver) -> Vec<TimerOp>) {
        let Some((snapshot, speed)) = self.driver.try_update_value(|driver| {
            let ops = op(driver);
            driver.apply(ops, self);
            (driver.engine.snapshot(), driver.engine.speed())
        }) else {
            return;
        };

        if self.snapshot.try_with_untracked(|current| *current != snapshot) == Some(true) {
            self.snapshot.try_set(snapshot);
        }
        if self.speed.try_get_untracked() != Some(speed) {
            self.speed.try_set(speed);
        }
    }
}

/// Create a typing animation owned by the current reactive owner.
///
/// The animation is activated immediately (arming auto-start if enabled),
/// reset whenever `target` changes, and disposed together with the owner so
/// no timer outlives the component.
pub fn use_typing_animation(
    target: Signal<String>,
    options: AnimationOptions,
) -> TypingAnimationHandle {
    let speed = options.speed;
    let engine = TypingAnimation::new(target.get_untracked(), options);
    let snapshot = engine.snapshot();

    let handle = TypingAnimationHandle {
        driver: StoredValue::new(Driver {
            engine,
            timers: HashMap::new(),
        }),
        snapshot: RwSignal::new(snapshot),
        speed: RwSignal::new(speed),
    };
    handle.dispatch(|driver| driver.engine.activate());

    Effect::new(move |previous: Option<String>| {
        let text = target.get();
        if previous.is_some() {
            handle.set_target(text.clone());
        }
        text
    });

    on_cleanup(move || handle.dispose());

    handle
}
