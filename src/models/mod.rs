pub mod features;
pub mod game;
pub mod user;

pub use features::FeatureVector;
pub use game::{clamp_rating, CatalogGame, Category, ScoredCandidate, MAX_RATING, MIN_RATING};
pub use user::{calculate_age, PlayActivity, PlaySession, RatingRecord, UserProfile};
