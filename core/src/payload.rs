//! Decoding of the provider's search response.
//!
//! The provider prefixes its JSON with junk bytes, reports numbers either as
//! numbers or as strings, and HTML-escapes some text fields.

use crate::error::SearchError;
use crate::models::{Artist, SearchResult};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ProviderEnvelope {
    #[serde(default)]
    results: Vec<RawArtist>,
    #[serde(default, deserialize_with = "lenient_u64")]
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawArtist {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    perma_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    ctr: Option<u64>,
}

/// Parses a raw provider body into a [`SearchResult`].
///
/// Everything before the first `{` is discarded. A body without any `{` is
/// an error, never an empty result.
pub fn parse_provider_payload(raw: &str) -> Result<SearchResult, SearchError> {
    let start = raw
        .find('{')
        .ok_or_else(|| SearchError::MalformedPayload("no JSON object in response".to_string()))?;

    let envelope: ProviderEnvelope = serde_json::from_str(&raw[start..])
        .map_err(|e| SearchError::MalformedPayload(e.to_string()))?;

    let artists = envelope
        .results
        .into_iter()
        .filter_map(convert_raw_artist)
        .collect();

    Ok(SearchResult::new(artists, envelope.total))
}

fn convert_raw_artist(raw: RawArtist) -> Option<Artist> {
    let name = decode_entities(raw.name.as_deref()?.trim());
    if name.is_empty() {
        return None;
    }

    Some(Artist {
        id: raw.id.filter(|id| !id.is_empty()),
        name,
        role: raw.role.as_deref().map(decode_entities).unwrap_or_default(),
        image: raw.image.unwrap_or_default(),
        profile_url: raw.perma_url.filter(|url| !url.is_empty()),
        popularity: raw.ctr.unwrap_or(0),
    })
}

fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
