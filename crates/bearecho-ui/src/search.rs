//! Search box component and the stubbed search request.

use std::time::Duration;

use bearecho_core::SearchQuery;
use leptos::prelude::*;

/// Width of one character in the caret overlay, in `em`.
const CARET_CHAR_WIDTH_EM: f32 = 0.6;

/// Horizontal offset of the animated caret after `chars` characters.
pub fn caret_offset_em(chars: usize) -> f32 {
    chars as f32 * CARET_CHAR_WIDTH_EM
}

/// Search box input component.
///
/// Shows `value` and reports edits through `on_input`. While `is_animating`
/// is set the field is disabled, edits are dropped, the submit button is
/// hidden and a blinking caret follows the typed text. Enter or the button
/// fire `on_search` with the trimmed value; blank values and submissions
/// while `is_searching` are ignored.
#[component]
pub fn SearchBox(
    /// Value shown in the field.
    value: Signal<String>,
    /// Called with the new text after a user edit.
    #[prop(into)]
    on_input: Callback<String>,
    /// Called with the trimmed value when the user submits.
    #[prop(into)]
    on_search: Callback<SearchQuery>,
    /// Whether the typing animation is playing.
    is_animating: Signal<bool>,
    /// Whether a search is in flight.
    #[prop(default = false.into())]
    is_searching: Signal<bool>,
    /// Label of the submit button.
    #[prop(default = "Search".to_string())]
    button_label: String,
    /// Label of the submit button while searching.
    #[prop(default = "Searching...".to_string())]
    busy_label: String,
) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let submit = move || {
        if is_animating.get_untracked() || is_searching.get_untracked() {
            return;
        }
        if let Some(query) = SearchQuery::new(&value.get_untracked()) {
            on_search.run(query);
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            submit();
        }
    };

    let button_text = move || {
        if is_searching.get() {
            busy_label.clone()
        } else {
            button_label.clone()
        }
    };

    view! {
      <div class="bearecho-search-box">
        <div class="bearecho-search-field">
          <span class="bearecho-search-icon" aria-hidden="true">
            "\u{2315}"
          </span>
          <input
            node_ref=input_ref
            type="text"
            class="bearecho-search-input"
            aria-label="Search"
            prop:value=move || value.get()
            prop:disabled=move || is_animating.get()
            on:input=move |ev| {
              if is_animating.get_untracked() {
                // Put back the animated text the browser may have replaced.
                if let Some(input) = input_ref.get_untracked() {
                  input.set_value(&value.get_untracked());
                }
                return;
              }
              on_input.run(event_target_value(&ev));
            }
            on:keydown=on_keydown
          />
          <Show when=move || !is_animating.get()>
            <button
              class="bearecho-search-button"
              prop:disabled=move || is_searching.get()
              on:click=move |_| submit()
            >
              {button_text.clone()}
            </button>
          </Show>
        </div>
        <Show when=move || is_animating.get()>
          <span
            class="bearecho-caret"
            aria-hidden="true"
            style=move || {
                format!("margin-left: {:.1}em", caret_offset_em(value.get().chars().count()))
            }
          ></span>
        </Show>
      </div>
    }
}

/// Stand-in for the search backend: completes after `delay` with no result.
///
/// Returns the timer handle so the caller can cancel it on unmount.
pub fn perform_search(
    query: SearchQuery,
    delay: Duration,
    done: impl FnOnce() + 'static,
) -> Option<TimeoutHandle> {
    tracing::info!(%query, "searching");
    match set_timeout_with_handle(done, delay) {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(?err, "failed to schedule search completion");
            None
        }
    }
}
