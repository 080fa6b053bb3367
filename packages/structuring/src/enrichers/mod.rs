//! Enricher implementations (NLP service, generative model).

pub mod generative;
pub mod nlp;

pub use generative::{GenerativeEnricher, FALLBACK_MODELS};
pub use nlp::NlpEnricher;
