mod mood;
mod place;
pub mod providers;
mod review;

pub use mood::{Mood, KNOWN_MOODS};
pub use place::{Coordinates, Feedback, Place, PLACEHOLDER_IMAGE};
pub use review::Review;
