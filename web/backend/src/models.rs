use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Query string of `/api/artists`. `q`, `l` and `p` are accepted as short names.
#[derive(Debug, Default, Deserialize)]
pub struct ArtistQuery {
    #[serde(default, alias = "q")]
    pub name: Option<String>,
    #[serde(default, alias = "l")]
    pub language: Option<String>,
    #[serde(default = "default_page", alias = "p")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub cached_entries: usize,
    pub in_flight: usize,
}
