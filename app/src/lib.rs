use bearecho_core::{AnimationOptions, LandingConfig, SearchQuery, SearchSession, TickInterval};
use bearecho_ui::{AnimationControls, SearchBox, perform_search, use_typing_animation};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

const LANDING_TOML: &str = include_str!("../landing.toml");

/// Load the embedded landing configuration, falling back to defaults.
pub fn landing_config() -> LandingConfig {
    match LandingConfig::from_toml_str(LANDING_TOML) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "invalid landing.toml, using defaults");
            LandingConfig::default()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let config = landing_config();
    let title = config.page.title.clone();
    provide_context(config);

    view! {
      // sets the document title
      <Title text=title />

      <Router>
        <main>
          <Routes fallback=|| "Page not found.".into_view()>
            <Route path=StaticSegment("") view=HomePage />
          </Routes>
        </main>
      </Router>
    }
}

/// Renders the search landing page.
///
/// The field shows the typing animation while it plays and the user's own
/// text otherwise; submitting runs the stubbed search.
#[component]
fn HomePage() -> impl IntoView {
    let config = use_context::<LandingConfig>().unwrap_or_default();

    let options = config.animation.options().unwrap_or_else(|err| {
        tracing::warn!(%err, "invalid animation settings, using defaults");
        AnimationOptions::default()
    });
    let target = Signal::stored(config.animation.target_text.clone());
    let animation = use_typing_animation(target, options);

    let session = RwSignal::new(SearchSession::new());
    let pending_search = StoredValue::new(None::<TimeoutHandle>);
    let stub_delay = config.search.stub_delay();

    let is_animating = animation.is_animating();
    let snapshot = animation.snapshot();
    let input_value =
        Signal::derive(move || snapshot.with(|snap| session.with(|s| s.effective_value(snap).to_string())));
    let is_searching = Signal::derive(move || session.with(SearchSession::is_searching));

    let on_input = move |value: String| {
        let animating = is_animating.get_untracked();
        let mut next = session.get_untracked();
        if next.edit(value, animating) {
            session.set(next);
        }
    };

    let on_search = move |query: SearchQuery| {
        let mut next = session.get_untracked();
        let Some(query) = next.submit(query.as_str()) else {
            return;
        };
        session.set(next);

        let handle = perform_search(query, stub_delay, move || {
            pending_search.try_set_value(None);
            session.try_update(SearchSession::finish);
        });
        if handle.is_none() {
            session.update(SearchSession::finish);
        }
        pending_search.set_value(handle);
    };

    on_cleanup(move || {
        if let Some(Some(handle)) = pending_search.try_get_value() {
            handle.clear();
        }
    });

    let controls = config.page.show_controls.then(|| {
        view! {
          <AnimationControls
            is_animating=is_animating
            speed=animation.speed()
            on_start=move |_: ()| animation.start()
            on_pause=move |_: ()| animation.pause()
            on_reset=move |_: ()| animation.reset()
            on_speed_change=move |speed: TickInterval| animation.set_speed(speed)
          />
        }
    });

    view! {
      <div class="bearecho-home">
        <div class="bearecho-logo-area">
          <img src=config.page.logo_src.clone() alt=config.page.logo_alt.clone() class="bearecho-logo" />
        </div>

        <div class="bearecho-search-area">
          <div class="bearecho-search-container">
            <SearchBox
              value=input_value
              on_input=on_input
              on_search=on_search
              is_animating=is_animating
              is_searching=is_searching
              button_label=config.search.button_label.clone()
              busy_label=config.search.busy_label.clone()
            />
          </div>
        </div>

        {controls}
      </div>
    }
}
