//! Wire form of a summarized request

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::sum::SumTable;


/// `{"result": [{name: sum}, ...]}`, entries ascending by facet name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FacetSums {
    result: Vec<ResultEntry>,
}

impl FacetSums {
    /// The result entries, ascending by facet name.
    #[must_use]
    pub fn entries(&self) -> &[ResultEntry] {
        &self.result
    }
}

impl From<SumTable> for FacetSums {
    fn from(table: SumTable) -> Self {
        // SumTable already yields names in ascending order
        let result = table
            .into_iter()
            .map(|(name, sum)| ResultEntry { name, sum })
            .collect();

        Self { result }
    }
}

/// A single facet total, serialized as the one-key object `{name: sum}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultEntry {
    pub name: String,
    pub sum: i64,
}

impl Serialize for ResultEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.sum)?;
        map.end()
    }
}

/// Consumes a [`SumTable`] into its encoded JSON result.
pub fn serialize(table: SumTable) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&FacetSums::from(table))
}
