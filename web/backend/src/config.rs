use artistfeed_core::{LanguagePolicy, PlannerConfig, ShapeOptions};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_URL: &str = "https://www.jiosaavn.com/api.php";

/// Cached results are served for this long before a refetch.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Service settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub upstream_base_url: String,
    /// Artists requested per upstream call, echoed as `perPage`.
    pub page_size: u32,
    pub upstream_timeout: Duration,
    pub language_policy: LanguagePolicy,
    pub planner: PlannerConfig,
    pub shape: ShapeOptions,
    /// Period of the background sweeper; `None` leaves eviction to requests.
    pub sweep_interval: Option<Duration>,
    /// Chance that a cache miss also sweeps expired entries.
    pub sweep_probability: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            upstream_base_url: DEFAULT_UPSTREAM_URL.to_string(),
            page_size: 50,
            upstream_timeout: Duration::from_secs(8),
            language_policy: LanguagePolicy::Lenient,
            planner: PlannerConfig::default(),
            shape: ShapeOptions::default(),
            sweep_interval: Some(Duration::from_secs(60)),
            sweep_probability: 0.1,
        }
    }
}

impl Config {
    /// Reads settings from the environment, after loading `.env` if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or unparsable keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let sweep_secs: u64 = parse_or(&lookup, "SWEEP_INTERVAL_SECS", 60);

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            upstream_base_url: lookup("UPSTREAM_BASE_URL").unwrap_or(defaults.upstream_base_url),
            page_size: parse_or(&lookup, "PAGE_SIZE", defaults.page_size).max(1),
            upstream_timeout: Duration::from_secs(
                parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 8_u64).max(1),
            ),
            language_policy: match lookup("LANGUAGE_POLICY").as_deref().map(str::trim) {
                Some(policy) if policy.eq_ignore_ascii_case("strict") => LanguagePolicy::Strict,
                _ => LanguagePolicy::Lenient,
            },
            planner: PlannerConfig::new(
                parse_or(&lookup, "FAN_OUT", defaults.planner.fan_out),
                parse_or(&lookup, "MAX_SUB_QUERIES", defaults.planner.max_sub_queries),
                parse_or(
                    &lookup,
                    "LANGUAGE_HINT_FOR_NAMES",
                    defaults.planner.language_hint_for_names,
                ),
            ),
            shape: ShapeOptions {
                language_filter: parse_or(&lookup, "LANGUAGE_FILTER", false),
                max_filtered_fraction: parse_or(&lookup, "FILTER_MAX_REMOVED", 0.5_f64)
                    .clamp(0.0, 1.0),
                sort_by_popularity: parse_or(&lookup, "SORT_BY_POPULARITY", false),
                include_details: parse_or(&lookup, "INCLUDE_DETAILS", false),
            },
            sweep_interval: (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs)),
            sweep_probability: parse_or(&lookup, "SWEEP_PROBABILITY", defaults.sweep_probability)
                .clamp(0.0, 1.0),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable setting");
            default
        }),
        None => default,
    }
}
