pub mod cache_key;
pub mod error;
pub mod language;
pub mod merge;
pub mod models;
pub mod payload;
pub mod planner;
pub mod shaper;

// Re-export commonly used items
pub use cache_key::cache_key;
pub use error::SearchError;
pub use language::{Language, LanguagePolicy, resolve_language};
pub use merge::{ArtistIdentity, merge_results, normalize_name};
pub use models::{Artist, ArtistSummary, SearchPage, SearchResult};
pub use payload::parse_provider_payload;
pub use planner::{PlannerConfig, QueryPlan, SearchParams, SubQuery, build_plan};
pub use shaper::{ShapeOptions, shape_response};
