use serde::{Deserialize, Serialize};

/// The closed mood vocabulary the mobile client offers. Tags outside this
/// list still flow through the pipeline but only match provider fallbacks.
pub const KNOWN_MOODS: &[&str] = &[
    "adventurous",
    "creative",
    "happy",
    "hungry",
    "relaxed",
    "romantic",
    "social",
    "stressed",
];

/// A user-selected affect/intent tag used to bias place search.
///
/// Stored lowercase and whitespace-trimmed so that `"Hungry "` and
/// `"hungry"` are the same mood everywhere (lookup tables, serialized
/// `matching_moods` sets, query parameters).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Mood(String);

impl Mood {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the tag belongs to the closed vocabulary
    pub fn is_known(&self) -> bool {
        KNOWN_MOODS.contains(&self.0.as_str())
    }

    /// The mood assigned when no category mapping matches a place
    pub fn fallback() -> Self {
        Self::new("social")
    }
}

impl From<String> for Mood {
    fn from(tag: String) -> Self {
        Self::new(&tag)
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        mood.0
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
