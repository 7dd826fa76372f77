//! Per-provider mood/category translation tables.
//!
//! Forward direction: a mood becomes the query each provider understands.
//! Inverse direction: a place's raw category tokens become the set of moods
//! the place satisfies. Both are lookup tables plus substring heuristics,
//! not an algorithm; the vocabularies are hard-coded per provider.

use std::collections::BTreeSet;

use crate::models::Mood;
use crate::services::providers::{ProviderId, ProviderQuery};

/// Foursquare category ids per mood (numeric taxonomy codes)
const FOURSQUARE_CATEGORIES: &[(&str, &[&str])] = &[
    ("adventurous", &["16000", "18000"]),
    ("creative", &["10027", "10004", "10000"]),
    ("happy", &["10000", "16032", "13000"]),
    ("hungry", &["13065", "13032", "13003"]),
    ("relaxed", &["16032", "13032", "14009"]),
    ("romantic", &["13065", "16000"]),
    ("social", &["13003", "13000", "17114"]),
    ("stressed", &["14009", "16032"]),
];

/// Geoapify category slugs per mood
const GEOAPIFY_CATEGORIES: &[(&str, &[&str])] = &[
    ("adventurous", &["sport", "natural", "entertainment.theme_park"]),
    ("creative", &["entertainment.museum", "entertainment.culture"]),
    ("happy", &["entertainment", "leisure.park"]),
    ("hungry", &["catering.restaurant", "catering.fast_food", "catering.cafe"]),
    ("relaxed", &["leisure.park", "leisure.spa", "natural"]),
    ("romantic", &["catering.restaurant", "tourism.sights", "leisure.park"]),
    ("social", &["catering.bar", "catering.pub", "entertainment"]),
    ("stressed", &["leisure.spa", "leisure.park", "natural"]),
];

/// Geoapify fallback when the mood has no table entry
const GEOAPIFY_DEFAULT_CATEGORIES: &[&str] = &["tourism", "entertainment", "catering"];

/// OpenCage has no category vocabulary, only free-text geocoding queries
const OPENCAGE_QUERIES: &[(&str, &str)] = &[
    ("adventurous", "adventure or outdoor activities"),
    ("creative", "museums or art galleries"),
    ("happy", "fun or entertainment venues"),
    ("hungry", "restaurants or food"),
    ("relaxed", "parks or quiet cafes"),
    ("romantic", "romantic restaurants or scenic views"),
    ("social", "bars or popular meeting spots"),
    ("stressed", "spas or relaxing places"),
];

/// Resolve a mood into the query one provider understands.
///
/// Unknown moods: Foursquare gets `None` (that adapter contributes nothing),
/// Geoapify falls back to its broad default set, OpenCage to a generic
/// free-text query.
pub fn mood_query(provider: ProviderId, mood: &Mood) -> Option<ProviderQuery> {
    match provider {
        ProviderId::Foursquare => lookup(FOURSQUARE_CATEGORIES, mood)
            .map(|ids| ProviderQuery::Categories(to_owned(ids))),
        ProviderId::Geoapify => Some(ProviderQuery::Categories(to_owned(
            lookup(GEOAPIFY_CATEGORIES, mood).unwrap_or(GEOAPIFY_DEFAULT_CATEGORIES),
        ))),
        ProviderId::OpenCage => Some(ProviderQuery::Text(
            OPENCAGE_QUERIES
                .iter()
                .find(|(tag, _)| *tag == mood.as_str())
                .map(|(_, query)| (*query).to_string())
                .unwrap_or_else(|| format!("places {}", mood)),
        )),
    }
}

/// Default category set used when Geoapify is searched by free text
pub fn geoapify_default_categories() -> Vec<String> {
    to_owned(GEOAPIFY_DEFAULT_CATEGORIES)
}

/// Inverse mapping: which moods does a place with these raw category tokens
/// satisfy. Scans the provider's table for containment, falls back to
/// substring heuristics on the token text, and finally to the `social`
/// fallback mood so no place ends up moodless.
pub fn moods_for_categories<'a, I>(provider: ProviderId, tokens: I) -> BTreeSet<Mood>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<String> = tokens
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut moods = table_scan(provider, &tokens);

    if moods.is_empty() {
        for token in &tokens {
            heuristic_moods(token, &mut moods);
        }
    }

    if moods.is_empty() {
        moods.insert(Mood::fallback());
    }

    moods
}

fn table_scan(provider: ProviderId, tokens: &[String]) -> BTreeSet<Mood> {
    let table = match provider {
        ProviderId::Foursquare => FOURSQUARE_CATEGORIES,
        ProviderId::Geoapify => GEOAPIFY_CATEGORIES,
        // OpenCage has no table; heuristics carry the whole mapping
        ProviderId::OpenCage => return BTreeSet::new(),
    };

    let mut moods = BTreeSet::new();
    for (tag, categories) in table {
        for category in *categories {
            if tokens.iter().any(|t| contains_either(t, category)) {
                moods.insert(Mood::new(tag));
                break;
            }
        }
    }
    moods
}

// "catering.restaurant.pizza" matches the table entry "catering.restaurant"
// and vice versa
fn contains_either(token: &str, category: &str) -> bool {
    token.contains(category) || category.contains(token)
}

fn heuristic_moods(token: &str, moods: &mut BTreeSet<Mood>) {
    let mut add = |tags: &[&str]| {
        for tag in tags {
            moods.insert(Mood::new(tag));
        }
    };

    if token.contains("restaurant") || token.contains("food") {
        add(&["hungry", "social"]);
    }
    if token.contains("cafe") || token.contains("coffee") {
        add(&["relaxed", "creative"]);
    }
    if token.contains("park") || token.contains("garden") {
        add(&["relaxed", "happy"]);
    }
    if token.contains("bar") || token.contains("pub") {
        add(&["social"]);
    }
    if token.contains("museum") || token.contains("galler") || token.contains("art") {
        add(&["creative"]);
    }
    if token.contains("spa") || token.contains("massage") {
        add(&["relaxed", "stressed"]);
    }
    if token.contains("beach") || token.contains("natur") {
        add(&["relaxed", "happy"]);
    }
}

fn to_owned(categories: &[&str]) -> Vec<String> {
    categories.iter().map(|c| (*c).to_string()).collect()
}

fn lookup<'a>(table: &'a [(&str, &[&str])], mood: &Mood) -> Option<&'a [&'a str]> {
    table
        .iter()
        .find(|(tag, _)| *tag == mood.as_str())
        .map(|(_, categories)| *categories)
}
