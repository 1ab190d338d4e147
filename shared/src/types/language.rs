//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language used for user-facing form messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    /// Pick the preferred supported language from an Accept-Language header
    ///
    /// Entries are weighted by their `q` parameter; anything that is neither
    /// English nor Chinese is ignored. Falls back to English.
    pub fn from_accept_language(header: &str) -> Self {
        let mut preferred = Language::English;
        let mut best_quality = 0.0_f32;

        for entry in header.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or_default().to_lowercase();
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            let candidate = if tag.starts_with("zh") {
                Language::Chinese
            } else if tag.starts_with("en") {
                Language::English
            } else {
                continue;
            };

            if quality > best_quality {
                preferred = candidate;
                best_quality = quality;
            }
        }

        preferred
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    /// Get locale code
    pub fn locale(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Chinese => "zh-CN",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "zh" | "chi" | "chinese" | "中文" => Ok(Language::Chinese),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

/// Language preference with fallback support
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LanguagePreference {
    /// Primary language
    pub primary: Language,

    /// Fallback language if a message has no translation
    #[serde(default)]
    pub fallback: Option<Language>,
}

impl LanguagePreference {
    /// Create a new language preference, falling back to English for non-English primaries
    pub fn new(primary: Language) -> Self {
        Self {
            primary,
            fallback: (primary != Language::English).then_some(Language::English),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_header() {
        assert_eq!(Language::from_accept_language("en-US,en;q=0.9"), Language::English);
        assert_eq!(Language::from_accept_language("zh-CN,zh;q=0.9"), Language::Chinese);
        assert_eq!(Language::from_accept_language("fr-FR"), Language::English);
        assert_eq!(Language::from_accept_language("ZH-TW"), Language::Chinese);
    }

    #[test]
    fn test_language_quality_weighting() {
        assert_eq!(
            Language::from_accept_language("en;q=0.5,zh-CN;q=0.8"),
            Language::Chinese
        );
        assert_eq!(
            Language::from_accept_language("zh;q=0.3,fr;q=0.9,en;q=0.4"),
            Language::English
        );
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("中文".parse::<Language>().unwrap(), Language::Chinese);
        assert!("invalid".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_preference() {
        let pref = LanguagePreference::new(Language::Chinese);
        assert_eq!(pref.fallback, Some(Language::English));

        let pref = LanguagePreference::new(Language::English);
        assert_eq!(pref.fallback, None);
    }
}
