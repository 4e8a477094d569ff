//! BearEcho UI Components
//!
//! Leptos components for the BearEcho landing page.
//!
//! # Components
//!
//! - [`SearchBox`] - Search field fed by the animation or by the user
//! - [`AnimationControls`] - Play/pause, reset and speed presets
//!
//! # Hooks
//!
//! - [`use_typing_animation`] - Runs a [`bearecho_core::TypingAnimation`] on browser timers
//!
//! # Example
//!
//! ```ignore
//! use bearecho_core::{AnimationOptions, SearchQuery};
//! use bearecho_ui::{SearchBox, use_typing_animation};
//! use leptos::prelude::*;
//!
//! #[component]
//! fn Demo() -> impl IntoView {
//!     let target = Signal::stored("bearecho.com".to_string());
//!     let animation = use_typing_animation(target, AnimationOptions::default());
//!
//!     view! {
//!         <SearchBox
//!             value=animation.display_text()
//!             on_input=|_: String| {}
//!             on_search=|_: SearchQuery| {}
//!             is_animating=animation.is_animating()
//!         />
//!     }
//! }
//! ```

pub mod controls;
pub mod search;
pub mod typing;

pub use controls::AnimationControls;
pub use search::{SearchBox, perform_search};
pub use typing::{TypingAnimationHandle, use_typing_animation};
