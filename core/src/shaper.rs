use crate::language::Language;
use crate::models::{Artist, ArtistSummary, SearchPage, SearchResult};
use crate::planner::QueryPlan;

/// Post-processing applied to a result before it is returned.
#[derive(Debug, Clone)]
pub struct ShapeOptions {
    /// Keep only artists whose name or role mentions the requested language.
    pub language_filter: bool,
    /// Largest share of artists the filter may drop before it is abandoned.
    pub max_filtered_fraction: f64,
    /// Order by the provider's popularity counter, highest first.
    pub sort_by_popularity: bool,
    /// Expose id, profile URL and popularity in each summary.
    pub include_details: bool,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            language_filter: false,
            max_filtered_fraction: 0.5,
            sort_by_popularity: false,
            include_details: false,
        }
    }
}

pub fn shape_response(
    plan: &QueryPlan,
    result: &SearchResult,
    per_page: u32,
    cached: bool,
    options: &ShapeOptions,
) -> SearchPage {
    let mut artists: Vec<&Artist> = result.artists.iter().collect();

    if options.language_filter {
        if let Some(language) = plan.language {
            artists = filter_by_language(artists, language, options.max_filtered_fraction);
        }
    }

    if options.sort_by_popularity {
        // stable, so equal counters keep provider order
        artists.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    }

    SearchPage {
        page: plan.page,
        per_page,
        language: plan
            .language
            .map_or_else(|| "default".to_string(), |language| language.to_string()),
        search_query: plan.search_query.clone(),
        total: result.effective_total(),
        artists: artists
            .into_iter()
            .map(|artist| summarize(artist, options.include_details))
            .collect(),
        cached,
    }
}

/// Applies the keyword filter unless it would drop more than
/// `max_filtered_fraction` of the artists.
pub fn filter_by_language(
    artists: Vec<&Artist>,
    language: Language,
    max_filtered_fraction: f64,
) -> Vec<&Artist> {
    if artists.is_empty() {
        return artists;
    }

    let keywords = language.filter_keywords();
    let kept: Vec<&Artist> = artists
        .iter()
        .copied()
        .filter(|artist| mentions_any(artist, keywords))
        .collect();

    let removed = (artists.len() - kept.len()) as f64 / artists.len() as f64;
    if removed > max_filtered_fraction {
        artists
    } else {
        kept
    }
}

fn mentions_any(artist: &Artist, keywords: &[&str]) -> bool {
    let name = artist.name.to_lowercase();
    let role = artist.role.to_lowercase();
    keywords
        .iter()
        .any(|keyword| name.contains(keyword) || role.contains(keyword))
}

fn summarize(artist: &Artist, include_details: bool) -> ArtistSummary {
    ArtistSummary {
        name: artist.name.clone(),
        role: artist.role.clone(),
        image: artist.image.clone(),
        id: include_details.then(|| artist.id.clone()).flatten(),
        url: include_details.then(|| artist.profile_url.clone()).flatten(),
        popularity: include_details.then_some(artist.popularity),
    }
}
