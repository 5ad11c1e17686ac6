use crate::cache_key::cache_key;
use crate::language::Language;

/// Search text used when neither a name nor a language is given.
pub const DEFAULT_QUERY: &str = "artist";

/// Upper bound on concurrent sub-queries for one request.
pub const MAX_FAN_OUT: usize = 5;

/// Request parameters after parsing and defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub name: Option<String>,
    pub language: Option<Language>,
    pub page: u32,
}

impl SearchParams {
    pub fn new(name: Option<String>, language: Option<Language>, page: u32) -> Self {
        Self {
            name,
            language,
            page,
        }
    }
}

/// Knobs for how language searches are broadened.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Spread a language search over its curated queries instead of one.
    pub fan_out: bool,
    /// Number of curated queries to issue, capped at [`MAX_FAN_OUT`].
    pub max_sub_queries: usize,
    /// Append the language tag to free-text name searches.
    pub language_hint_for_names: bool,
}

impl PlannerConfig {
    pub fn new(fan_out: bool, max_sub_queries: usize, language_hint_for_names: bool) -> Self {
        Self {
            fan_out,
            max_sub_queries,
            language_hint_for_names,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fan_out: true,
            max_sub_queries: 4,
            language_hint_for_names: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubQuery {
    pub text: String,
    pub page: u32,
}

impl SubQuery {
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page,
        }
    }
}

/// The upstream calls needed to answer one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub sub_queries: Vec<SubQuery>,
    pub merge_required: bool,
    /// Effective search text; part of the cache key and echoed to the caller.
    pub search_query: String,
    pub language: Option<Language>,
    pub page: u32,
}

impl QueryPlan {
    fn single(search_query: String, language: Option<Language>, page: u32) -> Self {
        Self {
            sub_queries: vec![SubQuery::new(search_query.clone(), page)],
            merge_required: false,
            search_query,
            language,
            page,
        }
    }

    pub fn cache_key(&self) -> String {
        cache_key(&self.search_query, self.language, self.page)
    }

    /// Single-query plan for the following page of the same search.
    /// Prefetching never fans out.
    pub fn next_page(&self) -> Self {
        Self::single(
            self.search_query.clone(),
            self.language,
            self.page.saturating_add(1),
        )
    }

    pub fn is_fan_out(&self) -> bool {
        self.sub_queries.len() > 1
    }
}

pub fn build_plan(params: &SearchParams, config: &PlannerConfig) -> QueryPlan {
    let page = params.page.max(1);
    let name = params
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    match (name, params.language) {
        (Some(name), Some(language)) if config.language_hint_for_names => {
            QueryPlan::single(format!("{name} {language}"), Some(language), page)
        }
        (Some(name), language) => QueryPlan::single(name.to_string(), language, page),
        (None, Some(language)) => plan_language(language, page, config),
        (None, None) => QueryPlan::single(DEFAULT_QUERY.to_string(), None, page),
    }
}

fn plan_language(language: Language, page: u32, config: &PlannerConfig) -> QueryPlan {
    let width = config.max_sub_queries.clamp(1, MAX_FAN_OUT);
    if !config.fan_out || width == 1 {
        return QueryPlan::single(language.search_hint(), Some(language), page);
    }

    let sub_queries: Vec<SubQuery> = language
        .curated_queries()
        .iter()
        .take(width)
        .map(|text| SubQuery::new(*text, page))
        .collect();

    QueryPlan {
        merge_required: sub_queries.len() > 1,
        sub_queries,
        search_query: language.search_hint(),
        language: Some(language),
        page,
    }
}
