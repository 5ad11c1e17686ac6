use crate::language::Language;

/// Key under which a search result is cached.
///
/// The language tag is expected to be canonical already, which [`Language`]
/// guarantees.
pub fn cache_key(search_text: &str, language: Option<Language>, page: u32) -> String {
    let language = language.map_or("default", |language| language.as_str());
    format!("{search_text}_{language}_{page}")
}
