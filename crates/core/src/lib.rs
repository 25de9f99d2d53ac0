//! tally-core: challenge state validation, migration, and progress engine.
//!
//! The stored record of a personal challenge has changed shape over time.
//! This crate turns whatever was stored into one canonical
//! [`ChallengeState`], reports what it had to repair, and derives the figures
//! a front end shows from it. It performs no I/O.
//!
//! # Public API
//!
//! - [`validate()`] / [`validate_str()`] -- load-time validation and legacy migration
//! - [`sanitize()`] -- idempotent pre-save normalization
//! - [`calendar`] -- day index <-> date mapping and the challenge grid
//! - [`progress`] -- streak, percent complete, days left
//! - [`milestone`] -- progress milestones
//! - [`action`] -- state-changing user actions (log, note, delete, duration)

/// Key under which the canonical record is stored.
pub const STORAGE_KEY: &str = "challengeData";

pub mod action;
pub mod calendar;
pub mod date;
pub mod milestone;
pub mod notes;
pub mod problem;
pub mod progress;
pub mod sanitize;
pub mod state;
pub mod validate;

// ── Convenience re-exports ───────────────────────────────────────────

pub use action::ActionError;
pub use date::{CalendarDate, Clock, ParseDateError, Timestamp};
pub use problem::{Problem, ProblemKind};
pub use progress::Progress;
pub use sanitize::sanitize;
pub use state::{
    ChallengeState, SessionNote, DEFAULT_DURATION_DAYS, MAX_DURATION_DAYS, MIN_DURATION_DAYS,
    PLACEHOLDER_NAME, SCHEMA_VERSION,
};
pub use validate::{validate, validate_str, Validation};
