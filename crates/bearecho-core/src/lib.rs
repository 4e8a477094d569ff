//! BearEcho Core Library
//!
//! Host-independent logic behind the BearEcho landing page: the typing
//! animation engine, the search input rules and the page configuration.
//!
//! Nothing in this crate touches a real clock or the DOM. The engine speaks
//! a small timer protocol ([`TimerOp`]) that the UI crate executes with
//! browser timers and the tests execute against a virtual clock.
//!
//! # Example
//!
//! ```
//! use bearecho_core::{AnimationOptions, TimerOp, TypingAnimation};
//!
//! let mut anim = TypingAnimation::new("bearecho.com", AnimationOptions::default());
//! let ops = anim.start();
//! let TimerOp::Arm(ticker) = ops[0] else { unreachable!() };
//!
//! anim.on_timer(ticker.id);
//! anim.on_timer(ticker.id);
//! assert_eq!(anim.snapshot().display_text, "be");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod session;
pub mod speed;
pub mod timer;

pub use config::{AnimationConfig, LandingConfig, PageConfig, SearchConfig};
pub use engine::{AUTO_START_DELAY, AnimationOptions, LOOP_HOLD, Phase, Snapshot, TypingAnimation};
pub use error::{CoreError, Result};
pub use session::{SEARCH_STUB_DELAY, SearchQuery, SearchSession};
pub use speed::{SpeedPreset, TickInterval};
pub use timer::{TimerId, TimerMode, TimerOp, TimerRequest};
