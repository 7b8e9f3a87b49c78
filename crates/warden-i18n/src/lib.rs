//! Multi-language text and time presentation for Warden.
//!
//! Two cooperating pieces, both stateless aside from static lookup tables:
//!
//! - Translation lookup: maps a semantic key and a language code to localized
//!   display text, falling back to English and finally to the key itself, so
//!   a missing translation can never block a message from being sent.
//! - Time localization: converts an absolute instant into each supported
//!   language's wall clock and renders it with that language's date pattern
//!   and calendar names.
//!
//! Every operation is a total function over immutable tables; nothing here
//! returns an error, takes a lock, or mutates shared state.
//!
//! # Example
//!
//! ```rust
//! use warden_i18n::{get_translation, localize, format_for_language};
//! use chrono::{TimeZone, Utc};
//!
//! let title = get_translation("match_notification", "pt");
//! assert_eq!(title, "Notificação de Partida");
//!
//! let kickoff = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
//! let local = localize(kickoff);
//! for (language, instant) in &local {
//!     let _display = format_for_language(instant, language.code());
//! }
//! ```

pub mod language;
pub mod timezone;
pub mod translations;

pub use language::Language;
pub use timezone::{
    current_time_for_language, format_for_language, localize, localize_fixed, localize_naive,
};
pub use translations::{get_translation, supported_languages};
