//! Transport controls for the typing animation.

use bearecho_core::{SpeedPreset, TickInterval};
use leptos::prelude::*;

/// Label of the play/pause toggle for the given state.
pub fn toggle_title(is_animating: bool) -> &'static str {
    if is_animating {
        "Pause animation"
    } else {
        "Start animation"
    }
}

/// Status indicator text.
pub fn status_label(is_animating: bool) -> &'static str {
    if is_animating { "Playing" } else { "Paused" }
}

/// Parse a `<select>` value back into a tick interval.
pub fn parse_speed(value: &str) -> Option<TickInterval> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|millis| TickInterval::from_millis(millis).ok())
}

/// Animation control panel: play/pause toggle, reset and speed presets.
///
/// Holds no state of its own; the selected preset mirrors `speed`.
#[component]
pub fn AnimationControls(
    /// Whether the animation is playing.
    is_animating: Signal<bool>,
    /// Current tick interval.
    speed: Signal<TickInterval>,
    #[prop(into)] on_start: Callback<()>,
    #[prop(into)] on_pause: Callback<()>,
    #[prop(into)] on_reset: Callback<()>,
    #[prop(into)] on_speed_change: Callback<TickInterval>,
) -> impl IntoView {
    let selected = Memo::new(move |_| SpeedPreset::nearest(speed.get()));

    let options = SpeedPreset::ALL
        .into_iter()
        .map(|preset| {
            view! {
              <option
                value=preset.interval().as_millis().to_string()
                prop:selected=move || selected.get() == preset
              >
                {preset.label()}
              </option>
            }
        })
        .collect_view();

    view! {
      <div class="bearecho-controls">
        <button
          class="bearecho-control-toggle"
          title=move || toggle_title(is_animating.get())
          aria-label=move || toggle_title(is_animating.get())
          on:click=move |_| {
            if is_animating.get_untracked() {
              on_pause.run(());
            } else {
              on_start.run(());
            }
          }
        >
          {move || if is_animating.get() { "\u{23F8}" } else { "\u{25B6}" }}
        </button>

        <button
          class="bearecho-control-reset"
          title="Reset animation"
          aria-label="Reset animation"
          on:click=move |_| on_reset.run(())
        >
          "\u{21BA}"
        </button>

        <span class="bearecho-control-divider"></span>

        <label class="bearecho-control-speed">
          <span aria-hidden="true">"\u{2699}"</span>
          <select
            title="Animation speed"
            on:change=move |ev| {
              match parse_speed(&event_target_value(&ev)) {
                Some(interval) => on_speed_change.run(interval),
                None => tracing::warn!("ignoring unknown speed option"),
              }
            }
          >
            {options}
          </select>
        </label>

        <span class="bearecho-status" class:playing=move || is_animating.get()>
          <span class="bearecho-status-dot"></span>
          <span class="bearecho-status-label">{move || status_label(is_animating.get())}</span>
        </span>
      </div>
    }
}
