//! Error types

use thiserror::Error;

/// Why a request was rejected before any result was produced.
///
/// Every variant is the caller's fault: none of them are retryable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("invalid request payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request payload must be a JSON object")]
    RequestNotAnObject,

    #[error("missing `data` field in request")]
    MissingData,

    #[error("`data` field must be a JSON object")]
    DataNotAnObject,

    #[error("facet `{facet}` must be a JSON object")]
    NotAnObject { facet: String },

    #[error("facet `{facet}` has no count and no children")]
    Empty { facet: String },

    #[error("malformed facet `{facet}`: count must be the sole field")]
    CountNotSole { facet: String },

    #[error("facet `{facet}`: count value is not an integer")]
    CountNotInteger { facet: String },

    #[error("duplicate facet name `{facet}` in request")]
    DuplicateName { facet: String },

    /// The total of a branch does not fit in an `i64`
    #[error("facet `{facet}`: sum does not fit in a 64-bit integer")]
    SumOverflow { facet: String },
}

impl SummaryError {
    /// The facet the error refers to, if it is tied to one.
    #[must_use]
    pub fn facet(&self) -> Option<&str> {
        match self {
            Self::NotAnObject { facet }
            | Self::Empty { facet }
            | Self::CountNotSole { facet }
            | Self::CountNotInteger { facet }
            | Self::DuplicateName { facet }
            | Self::SumOverflow { facet } => Some(facet),
            Self::Decode(_)
            | Self::RequestNotAnObject
            | Self::MissingData
            | Self::DataNotAnObject => None,
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacetError {
    #[error(transparent)]
    Invalid(#[from] SummaryError),

    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}
