use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Language buckets the provider can be searched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Tamil,
    Hindi,
    Telugu,
    Malayalam,
    Kannada,
    English,
}

/// How an unrecognised language tag is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanguagePolicy {
    /// Reject the request with [`SearchError::InvalidLanguage`].
    Strict,
    /// Treat the tag as if none was given.
    #[default]
    Lenient,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Tamil,
        Language::Hindi,
        Language::Telugu,
        Language::Malayalam,
        Language::Kannada,
        Language::English,
    ];

    /// Case-insensitive lookup of a tag such as `"Tamil"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        Self::ALL.into_iter().find(|language| language.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Tamil => "tamil",
            Language::Hindi => "hindi",
            Language::Telugu => "telugu",
            Language::Malayalam => "malayalam",
            Language::Kannada => "kannada",
            Language::English => "english",
        }
    }

    /// Single search string biased towards this language.
    pub fn search_hint(&self) -> String {
        format!("{} singer", self.as_str())
    }

    /// Broader set of searches used when one query is not enough coverage.
    /// The first entry is always the plain [`search_hint`](Self::search_hint).
    pub fn curated_queries(&self) -> &'static [&'static str] {
        match self {
            Language::Tamil => &[
                "tamil singer",
                "tamil playback singer",
                "kollywood music director",
                "tamil composer",
                "tamil rapper",
            ],
            Language::Hindi => &[
                "hindi singer",
                "bollywood playback singer",
                "bollywood music director",
                "hindi composer",
                "hindi rapper",
            ],
            Language::Telugu => &[
                "telugu singer",
                "telugu playback singer",
                "tollywood music director",
                "telugu composer",
                "telugu rapper",
            ],
            Language::Malayalam => &[
                "malayalam singer",
                "malayalam playback singer",
                "mollywood music director",
                "malayalam composer",
                "malayalam rapper",
            ],
            Language::Kannada => &[
                "kannada singer",
                "kannada playback singer",
                "sandalwood music director",
                "kannada composer",
                "kannada rapper",
            ],
            Language::English => &[
                "english singer",
                "pop singer",
                "rock band",
                "english songwriter",
                "english rapper",
            ],
        }
    }

    /// Words whose presence in a name or role marks an artist as belonging here.
    pub fn filter_keywords(&self) -> &'static [&'static str] {
        match self {
            Language::Tamil => &["tamil", "kollywood"],
            Language::Hindi => &["hindi", "bollywood"],
            Language::Telugu => &["telugu", "tollywood"],
            Language::Malayalam => &["malayalam", "mollywood"],
            Language::Kannada => &["kannada", "sandalwood"],
            Language::English => &["english", "pop", "rock"],
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns the raw request tag into a language according to `policy`.
/// A missing or blank tag is never an error.
pub fn resolve_language(
    tag: Option<&str>,
    policy: LanguagePolicy,
) -> Result<Option<Language>, SearchError> {
    let Some(tag) = tag.map(str::trim).filter(|tag| !tag.is_empty()) else {
        return Ok(None);
    };

    match (Language::from_tag(tag), policy) {
        (Some(language), _) => Ok(Some(language)),
        (None, LanguagePolicy::Lenient) => Ok(None),
        (None, LanguagePolicy::Strict) => Err(SearchError::InvalidLanguage(tag.to_string())),
    }
}
