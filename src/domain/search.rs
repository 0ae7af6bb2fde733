//! Case-insensitive catalog filter for display.

use crate::domain::ObjectiveNode;

/// Keep nodes whose title or any subtopic contains `query`. Matching nodes are
/// returned whole, with all of their subtopics. An empty query returns everything;
/// whitespace is matched like any other character.
pub fn filter_nodes(nodes: &[ObjectiveNode], query: &str) -> Vec<ObjectiveNode> {
    if query.is_empty() {
        return nodes.to_vec();
    }
    let needle = query.to_lowercase();
    nodes
        .iter()
        .filter(|n| {
            n.title.to_lowercase().contains(&needle)
                || n.subtopics.iter().any(|s| s.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
