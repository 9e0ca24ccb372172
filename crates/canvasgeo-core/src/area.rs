//! Marquee (box) selection.
//!
//! Unlike the hit test, this returns the topmost matching items: once a
//! container matches, it stands in for its whole subtree and its children are
//! not examined.

use crate::geo_tree::{GeoNode, GeoTree};
use crate::rect::Rectangle;
use serde::{Deserialize, Serialize};

/// How an item's bounds are matched against the marquee area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaMatch {
    /// The area fully contains the item.
    Contain,
    /// The area overlaps the item.
    Intersect,
}

impl AreaMatch {
    fn matches(self, area: &Rectangle, bounds: &Rectangle) -> bool {
        match self {
            AreaMatch::Contain => bounds.is_contained_in(area),
            AreaMatch::Intersect => bounds.intersects(area),
        }
    }
}

/// A marquee selection query.
pub struct AreaQuery<'f> {
    pub area: Rectangle,
    pub matching: AreaMatch,
    /// Visit siblings last-to-first (topmost drawn first). Only affects result order.
    pub reverse: bool,
    ignore: Option<&'f dyn Fn(&GeoNode) -> bool>,
}

impl std::fmt::Debug for AreaQuery<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AreaQuery")
            .field("area", &self.area)
            .field("matching", &self.matching)
            .field("reverse", &self.reverse)
            .field("ignore", &self.ignore.is_some())
            .finish()
    }
}

impl<'f> AreaQuery<'f> {
    /// New query with `reverse` on and nothing ignored.
    pub fn new(area: Rectangle, matching: AreaMatch) -> Self {
        Self {
            area,
            matching,
            reverse: true,
            ignore: None,
        }
    }

    /// Set the sibling visiting order.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Skip items (and their whole subtrees) for which `ignore` returns true.
    pub fn ignore(mut self, ignore: &'f dyn Fn(&GeoNode) -> bool) -> Self {
        self.ignore = Some(ignore);
        self
    }

    /// Run the query over a sibling list.
    pub fn select<'a>(&self, items: &'a [GeoNode]) -> Vec<&'a GeoNode> {
        let mut out = Vec::new();
        self.collect(items, &mut out);
        log::trace!(
            "Area {:?} ({:?}) selected {} item(s)",
            self.area,
            self.matching,
            out.len()
        );
        out
    }

    /// Run the query over every root of a forest.
    pub fn select_in<'a>(&self, tree: &'a GeoTree) -> Vec<&'a GeoNode> {
        self.select(&tree.roots)
    }

    fn collect<'a>(&self, items: &'a [GeoNode], out: &mut Vec<&'a GeoNode>) {
        let ordered: Box<dyn Iterator<Item = &'a GeoNode> + 'a> = if self.reverse {
            Box::new(items.iter().rev())
        } else {
            Box::new(items.iter())
        };

        for item in ordered {
            if self.ignore.is_some_and(|ignore| ignore(item)) {
                continue;
            }
            if self.matching.matches(&self.area, &item.bounds) {
                out.push(item);
            } else if !item.children.is_empty() {
                self.collect(&item.children, out);
            }
        }
    }
}

/// Topmost items selected by `area`.
///
/// `ignore` of `None` never ignores anything.
pub fn target_of_area<'a>(
    area: Rectangle,
    items: &'a [GeoNode],
    ignore: Option<&dyn Fn(&GeoNode) -> bool>,
    matching: AreaMatch,
    reverse: bool,
) -> Vec<&'a GeoNode> {
    let query = AreaQuery {
        area,
        matching,
        reverse,
        ignore,
    };
    query.select(items)
}
