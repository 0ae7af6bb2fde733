//! Objective (kazanım) selection model.
//!
//! Invariants held after every transition:
//! - a selected subtopic of node N implies `Topic(N)` is selected;
//! - deselecting the last subtopic of N removes `Topic(N)`.
//!
//! Direct topic toggling applies to childless nodes only. Topics with subtopics
//! are driven by their subtopic selections; a direct toggle on them is rejected.

use crate::domain::{DomainError, ObjectiveNode};
use serde::{Deserialize, Serialize};

/// Separator used when flattening the selection into the `kazanim` payload.
pub const PAYLOAD_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SelectionKey {
    Topic {
        node_id: i64,
        title: String,
    },
    Subtopic {
        node_id: i64,
        parent_title: String,
        value: String,
    },
}

impl SelectionKey {
    pub fn topic(node: &ObjectiveNode) -> Self {
        Self::Topic {
            node_id: node.id,
            title: node.title.clone(),
        }
    }

    pub fn subtopic(node: &ObjectiveNode, value: &str) -> Self {
        Self::Subtopic {
            node_id: node.id,
            parent_title: node.title.clone(),
            value: value.to_string(),
        }
    }

    pub fn node_id(&self) -> i64 {
        match self {
            Self::Topic { node_id, .. } | Self::Subtopic { node_id, .. } => *node_id,
        }
    }

    /// Text contributed to the payload.
    pub fn value(&self) -> &str {
        match self {
            Self::Topic { title, .. } => title,
            Self::Subtopic { value, .. } => value,
        }
    }
}

fn is_subtopic_key(key: &SelectionKey, id: i64, wanted: &str) -> bool {
    matches!(
        key,
        SelectionKey::Subtopic { node_id, value, .. } if *node_id == id && value == wanted
    )
}

/// Selection set in insertion order, plus optional free-text objective.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveSelection {
    keys: Vec<SelectionKey>,
    free_text: String,
}

impl ObjectiveSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[SelectionKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.free_text = text.into();
    }

    pub fn is_topic_selected(&self, node: &ObjectiveNode) -> bool {
        self.keys
            .iter()
            .any(|k| matches!(k, SelectionKey::Topic { node_id, .. } if *node_id == node.id))
    }

    pub fn is_subtopic_selected(&self, node: &ObjectiveNode, value: &str) -> bool {
        self.keys.iter().any(|k| is_subtopic_key(k, node.id, value))
    }

    fn has_any_subtopic(&self, node_id: i64) -> bool {
        self.keys
            .iter()
            .any(|k| matches!(k, SelectionKey::Subtopic { node_id: id, .. } if *id == node_id))
    }

    fn remove_topic(&mut self, node_id: i64) {
        self.keys
            .retain(|k| !matches!(k, SelectionKey::Topic { node_id: id, .. } if *id == node_id));
    }

    /// Flip a childless topic. No propagation.
    pub fn toggle_leaf_topic(&mut self, node: &ObjectiveNode) -> Result<(), DomainError> {
        if !node.is_leaf() {
            return Err(DomainError::Validation(format!(
                "topic '{}' has subtopics; select a subtopic instead",
                node.title
            )));
        }
        if self.is_topic_selected(node) {
            self.remove_topic(node.id);
        } else {
            self.keys.push(SelectionKey::topic(node));
        }
        Ok(())
    }

    /// Flip one subtopic, adding or removing the parent topic to keep the invariants.
    pub fn toggle_subtopic(
        &mut self,
        node: &ObjectiveNode,
        value: &str,
    ) -> Result<(), DomainError> {
        if !node.has_subtopic(value) {
            return Err(DomainError::Validation(format!(
                "'{}' is not a subtopic of '{}'",
                value, node.title
            )));
        }

        if self.is_subtopic_selected(node, value) {
            self.keys.retain(|k| !is_subtopic_key(k, node.id, value));
            if !self.has_any_subtopic(node.id) {
                self.remove_topic(node.id);
            }
        } else {
            if !self.is_topic_selected(node) {
                self.keys.push(SelectionKey::topic(node));
            }
            self.keys.push(SelectionKey::subtopic(node, value));
        }
        Ok(())
    }

    /// Flatten the selection into one comma-joined string. A topic that has
    /// selected subtopics is represented by those subtopics only. Non-empty
    /// `free_text` is appended last, verbatim.
    pub fn serialize(&self, free_text: Option<&str>) -> String {
        let mut parts: Vec<&str> = self
            .keys
            .iter()
            .filter(|k| match k {
                SelectionKey::Topic { node_id, .. } => !self.has_any_subtopic(*node_id),
                SelectionKey::Subtopic { .. } => true,
            })
            .map(SelectionKey::value)
            .collect();
        if let Some(text) = free_text.filter(|t| !t.is_empty()) {
            parts.push(text);
        }
        parts.join(PAYLOAD_SEPARATOR)
    }

    /// `serialize` with the stored free text.
    pub fn payload(&self) -> String {
        self.serialize(Some(&self.free_text))
    }

    /// Empty the selection and discard free text. Called after a successful save.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.free_text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sayilar() -> ObjectiveNode {
        ObjectiveNode {
            id: 5,
            title: "Sayılar".to_string(),
            subtopics: vec!["Toplama".to_string(), "Çıkarma".to_string()],
        }
    }

    fn geometri() -> ObjectiveNode {
        ObjectiveNode {
            id: 8,
            title: "Geometri".to_string(),
            subtopics: vec![],
        }
    }

    #[test]
    fn test_subtopic_selects_parent() {
        let node = sayilar();
        let mut sel = ObjectiveSelection::new();
        sel.toggle_subtopic(&node, "Toplama").unwrap();
        assert_eq!(
            sel.keys(),
            &[SelectionKey::topic(&node), SelectionKey::subtopic(&node, "Toplama")]
        );
        assert!(sel.is_topic_selected(&node));
        assert!(sel.is_subtopic_selected(&node, "Toplama"));
        assert!(!sel.is_subtopic_selected(&node, "Çıkarma"));
    }

    #[test]
    fn test_last_subtopic_removes_parent() {
        let node = sayilar();
        let mut sel = ObjectiveSelection::new();
        sel.toggle_subtopic(&node, "Toplama").unwrap();
        sel.toggle_subtopic(&node, "Toplama").unwrap();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_parent_kept_while_a_subtopic_remains() {
        let node = sayilar();
        let mut sel = ObjectiveSelection::new();
        sel.toggle_subtopic(&node, "Toplama").unwrap();
        sel.toggle_subtopic(&node, "Çıkarma").unwrap();
        sel.toggle_subtopic(&node, "Toplama").unwrap();
        assert!(sel.is_topic_selected(&node));
        assert_eq!(sel.keys().len(), 2);
        // parent is only added once
        sel.toggle_subtopic(&node, "Toplama").unwrap();
        assert_eq!(sel.keys().len(), 3);
    }

    #[test]
    fn test_leaf_topic_toggle() {
        let node = geometri();
        let mut sel = ObjectiveSelection::new();
        sel.toggle_leaf_topic(&node).unwrap();
        assert!(sel.is_topic_selected(&node));
        sel.toggle_leaf_topic(&node).unwrap();
        assert!(!sel.is_topic_selected(&node));
    }

    #[test]
    fn test_direct_toggle_on_parent_rejected() {
        let node = sayilar();
        let mut sel = ObjectiveSelection::new();
        let err = sel.toggle_leaf_topic(&node).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_unknown_subtopic_rejected() {
        let mut sel = ObjectiveSelection::new();
        assert!(sel.toggle_subtopic(&sayilar(), "Bölme").is_err());
        assert!(sel.is_empty());
    }

    #[test]
    fn test_serialize_subtopic_with_free_text() {
        let node = sayilar();
        let mut sel = ObjectiveSelection::new();
        sel.toggle_subtopic(&node, "Çıkarma").unwrap();
        assert_eq!(sel.serialize(Some("Ek not")), "Çıkarma, Ek not");
    }

    #[test]
    fn test_serialize_mixes_leaf_topics_and_subtopics() {
        let mut sel = ObjectiveSelection::new();
        sel.toggle_leaf_topic(&geometri()).unwrap();
        sel.toggle_subtopic(&sayilar(), "Toplama").unwrap();
        sel.toggle_subtopic(&sayilar(), "Çıkarma").unwrap();
        assert_eq!(sel.serialize(None), "Geometri, Toplama, Çıkarma");
        assert_eq!(sel.serialize(Some("")), "Geometri, Toplama, Çıkarma");
    }

    #[test]
    fn test_free_text_appended_verbatim() {
        let node = sayilar();
        let mut sel = ObjectiveSelection::new();
        sel.toggle_subtopic(&node, "Çıkarma").unwrap();
        assert_eq!(sel.serialize(Some("  Ek not  ")), "Çıkarma,   Ek not  ");
        assert_eq!(sel.serialize(Some("   ")), "Çıkarma,    ");
    }

    #[test]
    fn test_clear_drops_free_text() {
        let mut sel = ObjectiveSelection::new();
        sel.toggle_leaf_topic(&geometri()).unwrap();
        sel.set_free_text("Proje ödevi");
        assert_eq!(sel.payload(), "Geometri, Proje ödevi");
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.payload(), "");
    }
}
