//! Timeline tests: the engine driven by a deterministic virtual clock.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    time::Duration,
};

use bearecho_core::{
    AnimationOptions, LandingConfig, Phase, TickInterval, TimerId, TimerMode, TimerOp,
    TypingAnimation,
};

/// Single-threaded scheduler over virtual milliseconds.
///
/// Timers due at the same instant fire in arming order, and a callback always
/// runs to completion before the next one starts.
struct VirtualClock {
    now: u64,
    seq: u64,
    queue: BinaryHeap<Reverse<(u64, u64, TimerId)>>,
    live: HashMap<TimerId, (TimerMode, u64)>,
    /// (time, display text) recorded whenever the revealed text changes.
    frames: Vec<(u64, String)>,
    /// (time, is_animating) recorded whenever it changes.
    animating: Vec<(u64, bool)>,
}

impl VirtualClock {
    fn new() -> Self {
        Self {
            now: 0,
            seq: 0,
            queue: BinaryHeap::new(),
            live: HashMap::new(),
            frames: Vec::new(),
            animating: Vec::new(),
        }
    }

    fn apply(&mut self, ops: Vec<TimerOp>) {
        for op in ops {
            match op {
                TimerOp::Arm(request) => {
                    let delay = request.delay.as_millis() as u64;
                    assert!(
                        self.live.insert(request.id, (request.mode, delay)).is_none(),
                        "timer {} armed twice",
                        request.id
                    );
                    self.push(self.now + delay, request.id);
                }
                TimerOp::Cancel(id) => {
                    self.live.remove(&id);
                }
            }
        }
    }

    fn push(&mut self, due: u64, id: TimerId) {
        self.seq += 1;
        self.queue.push(Reverse((due, self.seq, id)));
    }

    fn record(&mut self, anim: &TypingAnimation) {
        let snapshot = anim.snapshot();
        if self.frames.last().map(|(_, text)| text.as_str()) != Some(snapshot.display_text.as_str()) {
            self.frames.push((self.now, snapshot.display_text));
        }
        if self.animating.last().map(|(_, a)| *a) != Some(snapshot.is_animating) {
            self.animating.push((self.now, snapshot.is_animating));
        }
    }

    /// Run every timer due up to and including `until`.
    fn advance_to(&mut self, anim: &mut TypingAnimation, until: u64) {
        self.record(anim);
        while let Some(Reverse((due, _, id))) = self.queue.peek().copied() {
            if due > until {
                break;
            }
            self.queue.pop();
            let Some(&(mode, delay)) = self.live.get(&id) else {
                continue;
            };
            self.now = due;
            if mode == TimerMode::Once {
                self.live.remove(&id);
            }
            let ops = anim.on_timer(id);
            if mode == TimerMode::Repeating && self.live.contains_key(&id) {
                self.push(due + delay, id);
            }
            self.apply(ops);
            self.record(anim);
        }
        self.now = until;
    }

    fn advance_by(&mut self, anim: &mut TypingAnimation, millis: u64) {
        let until = self.now + millis;
        self.advance_to(anim, until);
    }

    /// Times at which the revealed length grew by one.
    fn tick_times(&self) -> Vec<u64> {
        self.frames
            .windows(2)
            .filter(|w| w[1].1.chars().count() == w[0].1.chars().count() + 1)
            .map(|w| w[1].0)
            .collect()
    }
}

fn options(speed: u32, auto_start: bool, loop_enabled: bool) -> AnimationOptions {
    AnimationOptions {
        speed: TickInterval::from_millis(speed).unwrap(),
        auto_start,
        loop_enabled,
        ..AnimationOptions::default()
    }
}

#[test]
fn test_reveals_every_prefix_exactly_once() {
    let target = "bearecho.com";
    let mut anim = TypingAnimation::new(target, options(100, false, false));
    let mut clock = VirtualClock::new();

    let ops = anim.start();
    clock.apply(ops);
    clock.advance_by(&mut anim, 100 * target.len() as u64 + 500);

    let texts: Vec<&str> = clock.frames.iter().map(|(_, t)| t.as_str()).collect();
    let expected: Vec<String> = (0..=target.len()).map(|n| target[..n].to_string()).collect();
    assert_eq!(texts, expected);
    assert_eq!(texts.iter().filter(|t| **t == target).count(), 1);
    assert_eq!(anim.phase(), Phase::Complete);
    assert!(clock.live.is_empty());
}

#[test]
fn test_autostart_scenario() {
    let config = LandingConfig::default();
    let target = config.animation.target_text.clone();
    let mut anim = TypingAnimation::new(target.clone(), config.animation.options().unwrap());
    let mut clock = VirtualClock::new();

    clock.apply(anim.activate());
    clock.advance_by(&mut anim, 999);
    assert_eq!(anim.snapshot().display_text, "");
    assert!(!anim.is_running());

    let full_at = 1000 + 100 * target.chars().count() as u64;
    clock.advance_to(&mut anim, full_at);
    assert_eq!(anim.snapshot().display_text, target);
    assert!(anim.snapshot().is_animating);

    // Looping: the engine keeps reporting itself as animating through the hold.
    clock.advance_to(&mut anim, full_at + 1000);
    assert_eq!(anim.phase(), Phase::Holding);
    assert!(anim.snapshot().is_animating);
    assert_eq!(anim.snapshot().display_text, target);
}

#[test]
fn test_autostart_without_loop_stops() {
    let target = "bearecho.com";
    let mut anim = TypingAnimation::new(target, options(100, true, false));
    let mut clock = VirtualClock::new();

    clock.apply(anim.activate());
    clock.advance_by(&mut anim, 1000 + 100 * target.len() as u64);
    assert_eq!(anim.snapshot().display_text, target);

    clock.advance_by(&mut anim, 100);
    assert!(!anim.snapshot().is_animating);
    assert_eq!(anim.phase(), Phase::Complete);

    clock.advance_by(&mut anim, 10_000);
    assert_eq!(anim.snapshot().display_text, target);
    assert_eq!(clock.animating.last(), Some(&(2300, false)));
}

#[test]
fn test_loop_holds_and_repeats() {
    let mut anim = TypingAnimation::new("abc", options(100, false, true));
    let mut clock = VirtualClock::new();

    clock.apply(anim.start());
    clock.advance_by(&mut anim, 10_000);

    // "abc" at 300, end detected at 400, hold until 2400, "" then "a" at 2500.
    let abc_times: Vec<u64> = clock
        .frames
        .iter()
        .filter(|(_, t)| t == "abc")
        .map(|(at, _)| *at)
        .collect();
    assert!(abc_times.len() >= 3, "expected repeated cycles: {abc_times:?}");
    assert_eq!(abc_times[0], 300);
    let cycle = abc_times[1] - abc_times[0];
    assert_eq!(cycle, 100 + 2000 + 300);
    assert!(abc_times.windows(2).all(|w| w[1] - w[0] == cycle));

    let restart = clock
        .frames
        .iter()
        .find(|(at, t)| *at > 300 && t.is_empty())
        .map(|(at, _)| *at);
    assert_eq!(restart, Some(2400));

    // Never observed as stopped.
    assert_eq!(clock.animating, vec![(0, true)]);
}

#[test]
fn test_speed_change_spacing() {
    let mut anim = TypingAnimation::new("abcdefghijklmnop", options(200, false, false));
    let mut clock = VirtualClock::new();

    clock.apply(anim.start());
    clock.advance_to(&mut anim, 450);
    let before = clock.tick_times();
    assert_eq!(before, vec![200, 400]);

    clock.apply(anim.set_speed(TickInterval::from_millis(50).unwrap()));
    clock.advance_to(&mut anim, 1000);

    let after: Vec<u64> = clock
        .tick_times()
        .into_iter()
        .filter(|at| *at > 450)
        .collect();
    assert_eq!(after[0], 500);
    assert!(after.windows(2).all(|w| w[1] - w[0] == 50));
    // 500, 550, ..., 1000.
    assert_eq!(after.len(), 11);
    assert_eq!(clock.live.len(), 1);
}

#[test]
fn test_speed_change_to_slower_never_fires_stale_tick() {
    let mut anim = TypingAnimation::new("abcdefghij", options(50, false, false));
    let mut clock = VirtualClock::new();

    clock.apply(anim.start());
    clock.advance_to(&mut anim, 120);
    clock.apply(anim.set_speed(TickInterval::from_millis(200).unwrap()));
    clock.advance_to(&mut anim, 700);

    let after: Vec<u64> = clock
        .tick_times()
        .into_iter()
        .filter(|at| *at > 120)
        .collect();
    assert_eq!(after, vec![320, 520]);
}

#[test]
fn test_nothing_fires_after_reset() {
    let mut anim = TypingAnimation::new("abcdef", options(100, true, true));
    let mut clock = VirtualClock::new();

    clock.apply(anim.activate());
    clock.advance_to(&mut anim, 1350);
    assert_eq!(anim.snapshot().display_text, "abc");

    clock.apply(anim.reset());
    assert!(clock.live.is_empty());
    let frames_at_reset = clock.frames.len();

    clock.advance_by(&mut anim, 10_000);
    assert_eq!(anim.snapshot().display_text, "");
    assert!(!anim.snapshot().is_animating);
    // Only the reset itself was recorded.
    assert_eq!(clock.frames.len(), frames_at_reset + 1);
}

#[test]
fn test_nothing_fires_after_dispose_during_hold() {
    let mut anim = TypingAnimation::new("ab", options(100, false, true));
    let mut clock = VirtualClock::new();

    clock.apply(anim.start());
    clock.advance_to(&mut anim, 350);
    assert_eq!(anim.phase(), Phase::Holding);

    clock.apply(anim.dispose());
    assert!(clock.live.is_empty());
    clock.advance_by(&mut anim, 5_000);
    assert_eq!(anim.snapshot().display_text, "ab");
}

#[test]
fn test_pause_and_resume_timeline() {
    let mut anim = TypingAnimation::new("abcdef", options(100, false, false));
    let mut clock = VirtualClock::new();

    clock.apply(anim.start());
    clock.advance_to(&mut anim, 250);
    clock.apply(anim.pause());
    clock.apply(anim.pause());
    clock.advance_to(&mut anim, 1000);
    assert_eq!(anim.snapshot().display_text, "ab");
    assert_eq!(anim.phase(), Phase::Paused);

    clock.apply(anim.start());
    clock.advance_to(&mut anim, 1100);
    assert_eq!(anim.snapshot().display_text, "abc");
}

#[test]
fn test_target_change_mid_flight() {
    let mut anim = TypingAnimation::new("abcdef", options(100, true, false));
    let mut clock = VirtualClock::new();

    clock.apply(anim.activate());
    clock.advance_to(&mut anim, 1250);
    clock.apply(anim.set_target("xyz"));
    clock.advance_by(&mut anim, 5_000);

    // No auto-start re-arm by default: the caller must start again.
    assert_eq!(anim.snapshot().display_text, "");
    assert_eq!(anim.phase(), Phase::Idle);

    clock.apply(anim.start());
    clock.advance_by(&mut anim, 300);
    assert_eq!(anim.snapshot().display_text, "xyz");
}

#[test]
fn test_target_change_with_rearmed_autostart() {
    let mut anim = TypingAnimation::new(
        "abcdef",
        AnimationOptions {
            rearm_auto_start_on_text_change: true,
            ..options(100, true, false)
        },
    );
    let mut clock = VirtualClock::new();

    clock.apply(anim.activate());
    clock.advance_to(&mut anim, 1250);
    clock.apply(anim.set_target("xyz"));
    clock.advance_by(&mut anim, 999);
    assert_eq!(anim.snapshot().display_text, "");

    clock.advance_by(&mut anim, 301);
    assert_eq!(anim.snapshot().display_text, "xyz");
}

#[test]
fn test_at_most_one_timer_of_each_kind() {
    let mut anim = TypingAnimation::new("abcdefgh", options(100, true, true));
    let mut clock = VirtualClock::new();

    clock.apply(anim.activate());
    for step in 0..40u64 {
        clock.advance_by(&mut anim, 75);
        if step % 7 == 0 {
            let speed = if step % 2 == 0 { 50 } else { 150 };
            clock.apply(anim.set_speed(TickInterval::from_millis(speed).unwrap()));
        }
        if step % 11 == 0 {
            clock.apply(anim.pause());
            clock.apply(anim.start());
        }

        let repeating = clock
            .live
            .values()
            .filter(|(mode, _)| *mode == TimerMode::Repeating)
            .count();
        assert!(repeating <= 1);
        assert!(clock.live.len() <= 3);
        assert_eq!(clock.live.len(), anim.armed_timers());
        assert!(Duration::from_millis(0) < anim.speed().as_duration());
    }
}
