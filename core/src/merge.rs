use crate::models::{Artist, SearchResult};
use rustc_hash::FxHashSet;
use unidecode::unidecode;

/// What makes two artist records the same artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtistIdentity {
    Id(String),
    Name(String),
}

impl ArtistIdentity {
    pub fn of(artist: &Artist) -> Self {
        match artist.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => ArtistIdentity::Id(id.to_string()),
            _ => ArtistIdentity::Name(normalize_name(&artist.name)),
        }
    }
}

/// Folds a display name to a comparison form: ASCII, lower-case, single spaces.
pub fn normalize_name(name: &str) -> String {
    unidecode(name)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Combines sub-results in the order given.
///
/// The first record seen for an identity wins. The merged total is the
/// largest total any sub-result reported, or the number of distinct artists
/// when none of them reported one.
pub fn merge_results<I>(results: I) -> SearchResult
where
    I: IntoIterator<Item = SearchResult>,
{
    let mut seen: FxHashSet<ArtistIdentity> = FxHashSet::default();
    let mut artists = Vec::new();
    let mut max_total: Option<u64> = None;

    for result in results {
        max_total = match (max_total, result.total) {
            (Some(current), Some(total)) => Some(current.max(total)),
            (current, total) => current.or(total),
        };

        for artist in result.artists {
            if seen.insert(ArtistIdentity::of(&artist)) {
                artists.push(artist);
            }
        }
    }

    let total = max_total.unwrap_or(artists.len() as u64);
    SearchResult::new(artists, Some(total))
}
