//! Facet tree summation
//!
//! This crate turns a request of the form `{"data": {...}}`, describing a
//! hierarchy of named facets, into the sum of counts beneath every facet.
//! It is independent of the HTTP layer: callers hand in the raw payload and
//! get back either the encoded result or a classified [`FacetError`].
//!
//! ## Core Concepts
//!
//! - **FacetNode**: a validated facet, either a `Leaf` holding its count or a
//!   `Branch` of named children
//! - **SumTable**: the flat mapping from every facet name, at any depth, to
//!   its total
//! - **FacetSums**: the name-ordered `{"result": [...]}` projection of a
//!   `SumTable`

use serde_json::Value;
use tracing::debug;

mod error;
mod node;
mod result;
mod sum;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(test)]
mod tests;

pub use error::{FacetError, SummaryError};
pub use node::FacetNode;
pub use result::{serialize, FacetSums, ResultEntry};
pub use sum::SumTable;

/// Name of the request field holding the facet tree root.
pub const DATA_FIELD: &str = "data";

/// Name of the field that makes a facet a leaf.
pub const COUNT_FIELD: &str = "count";

/// Summarizes a raw request payload and encodes the result.
///
/// This is the whole pipeline: decode, validate, sum, sort and encode.
pub fn sum_facets(payload: &[u8]) -> Result<Vec<u8>, FacetError> {
    let table = summarize_request(payload)?;

    serialize(table).map_err(FacetError::Encode)
}

/// Decodes a request payload and builds its [`SumTable`].
///
/// An empty request object and an empty `data` object both produce an empty
/// table. Keys besides `data` are ignored.
pub fn summarize_request(payload: &[u8]) -> Result<SumTable, SummaryError> {
    let Value::Object(mut request) = serde_json::from_slice::<Value>(payload)? else {
        return Err(SummaryError::RequestNotAnObject);
    };

    if request.is_empty() {
        return Ok(SumTable::default());
    }

    let Some(data) = request.remove(DATA_FIELD) else {
        return Err(SummaryError::MissingData);
    };

    let Value::Object(data) = data else {
        return Err(SummaryError::DataNotAnObject);
    };

    let roots = node::parse_children(data)?;

    let mut table = SumTable::default();

    for (name, root) in &roots {
        let _sum = root.summarize(name, &mut table)?;
    }

    debug!(
        roots = roots.len(),
        facets = table.len(),
        "summarized facet tree"
    );

    Ok(table)
}
