use serde::{Deserialize, Serialize};

/// An artist record as returned by the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: String,
    pub role: String,
    pub image: String,
    pub profile_url: Option<String>,
    #[serde(default)]
    pub popularity: u64,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            role: String::new(),
            image: String::new(),
            profile_url: None,
            popularity: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_popularity(mut self, popularity: u64) -> Self {
        self.popularity = popularity;
        self
    }
}

/// One page of artists from one or more upstream queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub artists: Vec<Artist>,
    /// Total the provider claims for the query, when it reported one.
    pub total: Option<u64>,
}

impl SearchResult {
    pub fn new(artists: Vec<Artist>, total: Option<u64>) -> Self {
        Self { artists, total }
    }

    /// Reported total, or the number of artists actually held.
    pub fn effective_total(&self) -> u64 {
        self.total.unwrap_or(self.artists.len() as u64)
    }
}

/// Public projection of an [`Artist`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub name: String,
    pub role: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u64>,
}

/// Response envelope returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub page: u32,
    pub per_page: u32,
    pub language: String,
    pub search_query: String,
    pub total: u64,
    pub artists: Vec<ArtistSummary>,
    pub cached: bool,
}
