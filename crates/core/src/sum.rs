use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;

use crate::error::SummaryError;

/// Every facet name seen in one request, at any depth, mapped to its total.
///
/// Names are unique: [`SumTable::record`] refuses to overwrite. Iteration is
/// in ascending byte order of the names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SumTable {
    sums: BTreeMap<String, i64>,
}

impl SumTable {
    /// Adds a facet total, refusing a name that is already present.
    pub fn record(&mut self, name: &str, sum: i64) -> Result<(), SummaryError> {
        match self.sums.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(SummaryError::DuplicateName {
                facet: name.to_owned(),
            }),
            Entry::Vacant(entry) => {
                let _ignored = entry.insert(sum);
                Ok(())
            }
        }
    }

    /// The total recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.sums.get(name).copied()
    }

    /// Number of distinct facets recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    /// True when no facet has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Facet totals in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.sums.iter().map(|(name, sum)| (name.as_str(), *sum))
    }
}

impl IntoIterator for SumTable {
    type Item = (String, i64);
    type IntoIter = btree_map::IntoIter<String, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.sums.into_iter()
    }
}
