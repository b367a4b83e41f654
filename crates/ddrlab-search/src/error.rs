//! Search error types.

use std::fmt::{Display, Formatter};

use ddrlab_model::error::ModelError;

/// Error produced by the search engines.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Every sampled candidate across every preset was rejected by the
    /// physical plausibility filter.
    NoPlausibleCandidate { presets: usize, evaluated: usize },
    /// No enumerated configuration satisfies all deployment requirements.
    NoFeasibleConfiguration { details: String },
    /// The forward model rejected a preset or workload.
    Model(ModelError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::NoPlausibleCandidate { presets, evaluated } => {
                write!(
                    f,
                    "no physically plausible candidate among {} samples across {} presets",
                    evaluated, presets
                )
            }
            SearchError::NoFeasibleConfiguration { details } => {
                write!(f, "no feasible server configuration: {}", details)
            }
            SearchError::Model(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<ModelError> for SearchError {
    fn from(err: ModelError) -> Self {
        SearchError::Model(err)
    }
}
