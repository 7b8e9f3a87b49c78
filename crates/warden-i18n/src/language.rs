//! Supported languages and their fixed timezone associations

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Languages the bot can present text and times in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Portuguese,
    Spanish,
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl Language {
    /// Get the language code for this language
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Portuguese => "pt",
            Self::Spanish => "es",
        }
    }

    /// Parse a language from a code, if it is one of the supported set
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::English),
            "pt" => Some(Self::Portuguese),
            "es" => Some(Self::Spanish),
            _ => None,
        }
    }

    /// Resolve a free-form code to a supported language.
    ///
    /// Unrecognized codes degrade to English rather than failing; every
    /// caller-facing operation in this crate goes through this.
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    /// Get all supported languages
    pub fn all() -> [Self; 3] {
        [Self::English, Self::Portuguese, Self::Spanish]
    }

    /// Get the display name for this language
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Portuguese => "Português",
            Self::Spanish => "Español",
        }
    }

    /// The timezone a given language's audience expects times in.
    ///
    /// Every supported language has exactly one associated timezone.
    pub fn timezone(&self) -> Tz {
        match self {
            Self::English => chrono_tz::UTC,
            Self::Portuguese => chrono_tz::America::Sao_Paulo,
            Self::Spanish => chrono_tz::Europe::Madrid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for language in Language::all() {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
    }

    #[test]
    fn test_unknown_code_resolves_to_english() {
        assert_eq!(Language::resolve("xx_invalid"), Language::English);
        assert_eq!(Language::resolve(""), Language::English);
        // Codes are matched exactly; regional variants are not recognized.
        assert_eq!(Language::resolve("pt-BR"), Language::English);
    }

    #[test]
    fn test_every_language_has_a_timezone() {
        assert_eq!(Language::English.timezone(), chrono_tz::UTC);
        assert_eq!(
            Language::Portuguese.timezone(),
            chrono_tz::America::Sao_Paulo
        );
        assert_eq!(Language::Spanish.timezone(), chrono_tz::Europe::Madrid);
    }
}
