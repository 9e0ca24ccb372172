//! Ordered forest of bounded nodes, rebuilt from the live scene each interaction.
//!
//! Children keep insertion order, which the hit-test and area-selection
//! tie-breaks depend on. A child's bounds are not required to lie inside its
//! parent's bounds.

use crate::rect::Rectangle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Geo tree construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoTreeError {
    #[error("Node {child} already has parent {existing}, cannot attach to {requested}")]
    AlreadyAttached {
        child: String,
        existing: String,
        requested: String,
    },
    #[error("Attaching {child} to {parent} would create a cycle")]
    Cycle { parent: String, child: String },
}

/// Result type for geo tree construction.
pub type GeoTreeResult<T> = Result<T, GeoTreeError>;

/// A node with absolute bounds and ordered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoNode {
    pub id: String,
    pub bounds: Rectangle,
    #[serde(default)]
    pub children: Vec<GeoNode>,
}

impl GeoNode {
    /// Create a leaf node.
    pub fn new(id: impl Into<String>, bounds: Rectangle) -> Self {
        Self {
            id: id.into(),
            bounds,
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    pub fn with_children(id: impl Into<String>, bounds: Rectangle, children: Vec<GeoNode>) -> Self {
        Self {
            id: id.into(),
            bounds,
            children,
        }
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a node by ID in this subtree (including `self`).
    pub fn find(&self, id: &str) -> Option<&GeoNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Pre-order iterator over this subtree.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }
}

/// Pre-order, front-to-back iterator over geo nodes.
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a GeoNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a GeoNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// An ordered forest of geo nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoTree {
    pub roots: Vec<GeoNode>,
}

impl GeoTree {
    pub fn new(roots: Vec<GeoNode>) -> Self {
        Self { roots }
    }

    /// Top-level nodes, back to front.
    pub fn roots(&self) -> &[GeoNode] {
        &self.roots
    }

    /// Find a node by ID anywhere in the forest.
    pub fn find(&self, id: &str) -> Option<&GeoNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// Pre-order iterator over every node.
    pub fn iter(&self) -> impl Iterator<Item = &GeoNode> {
        self.roots.iter().flat_map(GeoNode::iter)
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Union of every node's bounds.
    pub fn bounds(&self) -> Option<Rectangle> {
        Rectangle::bounding(self.iter().map(|node| node.bounds))
    }
}

#[derive(Debug)]
struct Entry {
    id: String,
    bounds: Rectangle,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Builds a [`GeoTree`] from a sequence of node and parent-child declarations.
///
/// Nodes are created on first mention with `{0, 0, 0, 0}` bounds. Nodes left
/// without a parent become roots, in the order they were first declared.
#[derive(Debug, Default)]
pub struct GeoTreeBuilder {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl GeoTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(Entry {
            id: id.to_string(),
            bounds: Rectangle::ZERO,
            parent: None,
            children: Vec::new(),
        });
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Declare a node with its bounds.
    pub fn insert(&mut self, id: &str, bounds: Rectangle) -> &mut Self {
        self.set_bounds(id, bounds)
    }

    /// Set (or overwrite) a node's bounds, declaring it if needed.
    pub fn set_bounds(&mut self, id: &str, bounds: Rectangle) -> &mut Self {
        let idx = self.entry(id);
        self.entries[idx].bounds = bounds;
        self
    }

    /// Append `child` to the end of `parent`'s children.
    ///
    /// Re-attaching a child to the parent it already has is a no-op.
    pub fn attach(&mut self, parent: &str, child: &str) -> GeoTreeResult<&mut Self> {
        let parent_idx = self.entry(parent);
        let child_idx = self.entry(child);

        if let Some(existing) = self.entries[child_idx].parent {
            if existing == parent_idx {
                return Ok(self);
            }
            return Err(GeoTreeError::AlreadyAttached {
                child: child.to_string(),
                existing: self.entries[existing].id.clone(),
                requested: parent.to_string(),
            });
        }

        // Walk up from the parent; reaching the child means a cycle.
        let mut cursor = Some(parent_idx);
        while let Some(idx) = cursor {
            if idx == child_idx {
                return Err(GeoTreeError::Cycle {
                    parent: parent.to_string(),
                    child: child.to_string(),
                });
            }
            cursor = self.entries[idx].parent;
        }

        self.entries[child_idx].parent = Some(parent_idx);
        self.entries[parent_idx].children.push(child_idx);
        Ok(self)
    }

    /// Declare a node with bounds and attach it under `parent` in one step.
    pub fn insert_child(
        &mut self,
        parent: &str,
        id: &str,
        bounds: Rectangle,
    ) -> GeoTreeResult<&mut Self> {
        self.set_bounds(id, bounds);
        self.attach(parent, id)
    }

    /// Consume the declarations and produce the forest.
    pub fn build(self) -> GeoTree {
        let mut slots: Vec<Option<Entry>> = self.entries.into_iter().map(Some).collect();
        let root_ids: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, Some(entry) if entry.parent.is_none()))
            .map(|(idx, _)| idx)
            .collect();

        let roots: Vec<GeoNode> = root_ids
            .into_iter()
            .filter_map(|idx| take_subtree(&mut slots, idx))
            .collect();

        let tree = GeoTree::new(roots);
        log::trace!("Built geo tree: {} roots, {} nodes", tree.roots.len(), tree.len());
        tree
    }
}

fn take_subtree(slots: &mut [Option<Entry>], idx: usize) -> Option<GeoNode> {
    let entry = slots.get_mut(idx)?.take()?;
    let children = entry
        .children
        .iter()
        .filter_map(|&child| take_subtree(slots, child))
        .collect();
    Some(GeoNode {
        id: entry.id,
        bounds: entry.bounds,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(nodes: impl Iterator<Item = &'a GeoNode>) -> Vec<&'a str> {
        nodes.map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_build_preserves_order() {
        let mut builder = GeoTreeBuilder::new();
        builder.insert("frame", Rectangle::new(0.0, 0.0, 100.0, 100.0));
        builder.insert_child("frame", "b", Rectangle::new(10.0, 10.0, 10.0, 10.0)).unwrap();
        builder.insert_child("frame", "a", Rectangle::new(20.0, 20.0, 10.0, 10.0)).unwrap();
        builder.insert("other", Rectangle::new(200.0, 0.0, 50.0, 50.0));
        let tree = builder.build();

        assert_eq!(ids(tree.roots.iter()), vec!["frame", "other"]);
        assert_eq!(ids(tree.roots[0].children.iter()), vec!["b", "a"]);
        assert_eq!(ids(tree.iter()), vec!["frame", "b", "a", "other"]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_default_bounds() {
        let mut builder = GeoTreeBuilder::new();
        builder.attach("parent", "child").unwrap();
        let tree = builder.build();
        let child = tree.find("child").unwrap();
        assert_eq!(child.bounds, Rectangle::ZERO);
        assert_eq!(tree.find("parent").unwrap().bounds, Rectangle::ZERO);
    }

    #[test]
    fn test_set_bounds_after_attach() {
        let mut builder = GeoTreeBuilder::new();
        builder.attach("parent", "child").unwrap();
        builder.set_bounds("child", Rectangle::new(1.0, 2.0, 3.0, 4.0));
        let tree = builder.build();
        assert_eq!(tree.find("child").unwrap().bounds, Rectangle::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_second_parent_rejected() {
        let mut builder = GeoTreeBuilder::new();
        builder.attach("a", "c").unwrap();
        assert!(builder.attach("a", "c").is_ok());
        assert_eq!(
            builder.attach("b", "c").unwrap_err(),
            GeoTreeError::AlreadyAttached {
                child: "c".to_string(),
                existing: "a".to_string(),
                requested: "b".to_string(),
            }
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let mut builder = GeoTreeBuilder::new();
        builder.attach("a", "b").unwrap();
        builder.attach("b", "c").unwrap();
        assert!(matches!(builder.attach("c", "a"), Err(GeoTreeError::Cycle { .. })));
        assert!(matches!(builder.attach("a", "a"), Err(GeoTreeError::Cycle { .. })));
    }

    #[test]
    fn test_bounds_union_allows_overflow() {
        let tree = GeoTree::new(vec![GeoNode::with_children(
            "frame",
            Rectangle::new(0.0, 0.0, 100.0, 100.0),
            vec![GeoNode::new("overflow", Rectangle::new(90.0, 90.0, 50.0, 50.0))],
        )]);
        assert_eq!(tree.bounds(), Some(Rectangle::new(0.0, 0.0, 140.0, 140.0)));
        assert_eq!(GeoTree::default().bounds(), None);
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let json = r#"{"roots":[{"id":"a","bounds":{"x":0,"y":0,"width":10,"height":10}}]}"#;
        let tree: GeoTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.roots[0].id, "a");
        assert!(tree.roots[0].is_leaf());
    }
}
