//! Collapses provider records that refer to the same real-world venue.
//!
//! Two records are the same place when they share an id, or when their
//! normalized name and coordinates rounded to 4 decimal places (~11 m)
//! are equal. First record encountered wins; later duplicates are dropped
//! whole rather than merged field-by-field, so the caller's provider
//! ordering decides whose fields survive.

use std::collections::HashSet;

use crate::models::Place;

/// Removes near-duplicate places, keeping input order.
///
/// Idempotent: a second pass finds no new duplicates.
pub fn dedupe(places: Vec<Place>) -> Vec<Place> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_keys: HashSet<(String, i64, i64)> = HashSet::new();
    let mut kept = Vec::with_capacity(places.len());

    for place in places {
        let id = usable_id(&place);
        let key = composite_key(&place);

        if id.as_ref().is_some_and(|i| seen_ids.contains(i))
            || key.as_ref().is_some_and(|k| seen_keys.contains(k))
        {
            continue;
        }

        // A record with no identity at all is only worth keeping if it at
        // least carries a name
        if id.is_none() && key.is_none() && normalized_name(&place.name).is_empty() {
            continue;
        }

        if let Some(id) = id {
            seen_ids.insert(id);
        }
        if let Some(key) = key {
            seen_keys.insert(key);
        }
        kept.push(place);
    }

    kept
}

fn usable_id(place: &Place) -> Option<String> {
    let id = place.id.trim();
    (!id.is_empty()).then(|| id.to_string())
}

fn composite_key(place: &Place) -> Option<(String, i64, i64)> {
    let name = normalized_name(&place.name);
    if name.is_empty() || !place.latitude.is_finite() || !place.longitude.is_finite() {
        return None;
    }
    Some((name, round4(place.latitude), round4(place.longitude)))
}

/// Rounds degrees to 4 decimal places as an integer key
fn round4(degrees: f64) -> i64 {
    (degrees * 10_000.0).round() as i64
}

fn normalized_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
