pub mod artifacts;
pub mod features;
pub mod recommendations;

pub use artifacts::{load_recommendation_system, RecommendationSystem};
pub use features::{analyze_category_preferences, DefaultFeatureBuilder, FeatureBuilder};
pub use recommendations::{generate_recommendations, RecommendationEngine, RecommendationInputs};
