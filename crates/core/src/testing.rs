//! Request fixtures shared by unit and integration tests
//!
//! The binary tree numbers its facets breadth first, starting at 1, so the
//! children of facet `n` are `2n` and `2n + 1`. Every leaf counts 1, which
//! makes a facet at distance `d` from the leaf level sum to `2^d`:
//!
//! ```text
//! 1                       sums to 8
//! 2 3                     sum to 4
//! 4 5 6 7                 sum to 2
//! 8 9 10 11 12 13 14 15   leaves, count 1
//! ```

/// `{"data": {...}}` for a perfect binary tree of `height` levels.
#[must_use]
pub fn binary_tree_request(height: u32) -> String {
    if height == 0 {
        return r#"{"data": {}}"#.to_owned();
    }

    format!(r#"{{"data": {{{}}}}}"#, binary_tree_node(1, height))
}

fn binary_tree_node(number: u64, height: u32) -> String {
    if height == 1 {
        return format!(r#""facet{number:05}": {{"count": 1}}"#);
    }

    format!(
        r#""facet{number:05}": {{{}, {}}}"#,
        binary_tree_node(number * 2, height - 1),
        binary_tree_node(number * 2 + 1, height - 1),
    )
}

/// The expected `{"result": [...]}` for [`binary_tree_request`].
///
/// Breadth-first numbering with zero padding means sorting by name visits
/// the tree level by level, so the rows can be emitted top down.
#[must_use]
pub fn binary_tree_result(height: u32) -> String {
    let entries: Vec<String> = (0..height)
        .flat_map(|depth| {
            let first = 1_u64 << depth;
            let sum = 1_u64 << (height - depth - 1);

            (first..first * 2).map(move |number| format!(r#"{{"facet{number:05}": {sum}}}"#))
        })
        .collect();

    format!(r#"{{"result": [{}]}}"#, entries.join(", "))
}
