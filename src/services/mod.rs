// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod ai_parse;
pub mod gemini_client;
pub mod geo;
pub mod naver_client;
pub mod providers;
pub mod random;
pub mod recommender;
pub mod regions;
pub mod relay;
pub mod templates;

pub use gemini_client::*;
pub use naver_client::*;
pub use providers::*;
pub use random::*;
pub use recommender::*;
pub use regions::*;
pub use relay::*;

/// Recommendation service wired to the production providers
pub type AppRecommender = RecommendationService<NaverClient, TextProvider, ThreadRandom>;
