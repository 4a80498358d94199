//! quotematch-engine
//!
//! Crisis detection, tone gating, weighted-cosine scoring and ranking, tied
//! together by [`QuoteEngine`].
pub mod crisis;
pub mod engine;
pub mod ranker;
pub mod scorer;
pub mod tone;

pub use crisis::CrisisDetector;
pub use engine::{Explanation, QuoteEngine};
pub use ranker::rank;
pub use scorer::{ScoreBreakdown, SimilarityScorer};
pub use tone::{QueryMood, Rejection, ToneFilter};
