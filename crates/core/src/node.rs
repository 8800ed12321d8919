use serde_json::{Map, Value};

use crate::error::SummaryError;
use crate::sum::SumTable;
use crate::COUNT_FIELD;


/// 2^63, the first float past `i64::MAX`. Exactly representable.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// A validated facet.
///
/// A JSON object with the single key `count` is a `Leaf`, any other
/// non-empty object is a `Branch` whose keys name the children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FacetNode {
    Leaf(i64),
    Branch(Vec<(String, FacetNode)>),
}

impl FacetNode {
    /// Validates the shape of `value`, the facet called `name`, and of
    /// everything beneath it.
    pub fn parse(name: &str, value: Value) -> Result<Self, SummaryError> {
        let Value::Object(mut fields) = value else {
            return Err(SummaryError::NotAnObject {
                facet: name.to_owned(),
            });
        };

        if fields.is_empty() {
            return Err(SummaryError::Empty {
                facet: name.to_owned(),
            });
        }

        let Some(count) = fields.remove(COUNT_FIELD) else {
            return parse_children(fields).map(Self::Branch);
        };

        if !fields.is_empty() {
            return Err(SummaryError::CountNotSole {
                facet: name.to_owned(),
            });
        }

        coerce_count(&count)
            .map(Self::Leaf)
            .ok_or_else(|| SummaryError::CountNotInteger {
                facet: name.to_owned(),
            })
    }

    /// Sums this facet, recording it and every facet beneath it into `table`.
    ///
    /// A facet is recorded once its subtree is complete, so a name clash
    /// between a branch and one of its descendants is reported against the
    /// branch.
    pub fn summarize(&self, name: &str, table: &mut SumTable) -> Result<i64, SummaryError> {
        let sum = match self {
            Self::Leaf(count) => *count,
            Self::Branch(children) => {
                let mut total = 0_i64;

                for (child_name, child) in children {
                    let child_sum = child.summarize(child_name, table)?;

                    total = total
                        .checked_add(child_sum)
                        .ok_or_else(|| SummaryError::SumOverflow {
                            facet: name.to_owned(),
                        })?;
                }

                total
            }
        };

        table.record(name, sum)?;

        Ok(sum)
    }

    /// True for a facet holding its own count.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

/// Parses every entry of `fields` as a named child facet.
///
/// Used for branch bodies and for the `data` root, which unlike a branch may
/// be empty and never holds a count of its own.
pub(crate) fn parse_children(
    fields: Map<String, Value>,
) -> Result<Vec<(String, FacetNode)>, SummaryError> {
    fields
        .into_iter()
        .map(|(name, value)| {
            let node = FacetNode::parse(&name, value)?;

            Ok((name, node))
        })
        .collect()
}

/// Integers pass through, fractions round to nearest with ties away from
/// zero. Anything that is not a number, or does not fit in an `i64` once
/// rounded, is rejected.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the rounded value is range checked before the cast"
)]
fn coerce_count(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(count) = number.as_i64() {
        return Some(count);
    }

    let rounded = number.as_f64()?.round();

    (-I64_LIMIT..I64_LIMIT)
        .contains(&rounded)
        .then(|| rounded as i64)
}
