//! Quadtree node with capacity-driven or fixed-depth subdivision.
//!
//! Children are ordered top-left, top-right, bottom-left, bottom-right and an
//! insert is handed to the first child that accepts it. A unit that no child
//! accepts stays at the parent instead of being dropped.

use glam::Vec2;
use thiserror::Error;

use skirmish_core::config::SubdivisionPolicy;
use skirmish_core::state::QuadNodeView;
use skirmish_core::types::Rect;

/// Errors from building a quadtree.
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    #[error("quadtree bounds must have positive finite extent, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
}

/// Non-owning reference to a unit: its index in the owner's list plus the
/// point it was indexed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialEntry {
    pub id: usize,
    pub position: Vec2,
}

impl SpatialEntry {
    pub fn new(id: usize, position: Vec2) -> Self {
        Self { id, position }
    }
}

/// One rectangular region of the world.
#[derive(Debug, Clone)]
pub struct QuadtreeNode {
    bounds: Rect,
    entries: Vec<SpatialEntry>,
    children: Option<Box<[QuadtreeNode; 4]>>,
    policy: SubdivisionPolicy,
    depth: u32,
}

impl QuadtreeNode {
    /// Create a root node. Fixed-policy trees are pre-subdivided here.
    pub fn new(bounds: Rect, policy: SubdivisionPolicy) -> Result<Self, SpatialError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let anchored = bounds.x.is_finite() && bounds.y.is_finite();
        if !(anchored && positive(bounds.width) && positive(bounds.height)) {
            return Err(SpatialError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        let mut node = Self::at_depth(bounds, policy, 0);
        node.presubdivide();
        Ok(node)
    }

    fn at_depth(bounds: Rect, policy: SubdivisionPolicy, depth: u32) -> Self {
        Self {
            bounds,
            entries: Vec::new(),
            children: None,
            policy,
            depth,
        }
    }

    /// Build the fixed skeleton below this node (no-op for adaptive trees).
    fn presubdivide(&mut self) {
        if let SubdivisionPolicy::Fixed { depth } = self.policy {
            if self.depth < depth {
                self.subdivide();
                if let Some(children) = self.children.as_mut() {
                    for child in children.iter_mut() {
                        child.presubdivide();
                    }
                }
            }
        }
    }

    fn subdivide(&mut self) {
        let next_depth = self.depth + 1;
        let policy = self.policy;
        let quads = self.bounds.quadrants();
        self.children = Some(Box::new(
            quads.map(|rect| Self::at_depth(rect, policy, next_depth)),
        ));
    }

    /// Insert a unit reference.
    ///
    /// Returns false only when `position` lies outside this node.
    pub fn insert(&mut self, id: usize, position: Vec2) -> bool {
        if !self.bounds.contains(position) {
            return false;
        }
        let entry = SpatialEntry::new(id, position);

        if let Some(children) = self.children.as_mut() {
            if !offer(children, entry) {
                self.entries.push(entry);
            }
            return true;
        }

        self.entries.push(entry);

        if let SubdivisionPolicy::Adaptive {
            capacity,
            max_depth,
        } = self.policy
        {
            if self.entries.len() > capacity && self.depth < max_depth {
                self.split();
            }
        }
        true
    }

    /// Create children and push every held entry down where possible.
    fn split(&mut self) {
        self.subdivide();
        let held = std::mem::take(&mut self.entries);
        if let Some(children) = self.children.as_mut() {
            for entry in held {
                if !offer(children, entry) {
                    self.entries.push(entry);
                }
            }
        }
    }

    /// All entries in this subtree whose point lies inside `range`.
    pub fn query(&self, range: &Rect) -> Vec<SpatialEntry> {
        let mut found = Vec::new();
        self.query_into(range, &mut found);
        found
    }

    /// Like `query`, appending to a caller-provided buffer.
    pub fn query_into(&self, range: &Rect, found: &mut Vec<SpatialEntry>) {
        if !range.intersects(&self.bounds) {
            return;
        }

        found.extend(
            self.entries
                .iter()
                .filter(|entry| range.contains(entry.position))
                .copied(),
        );

        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.query_into(range, found);
            }
        }
    }

    /// Drop every entry and child, returning to a fresh root of the same policy.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Some(mut children) = self.children.take() {
            for child in children.iter_mut() {
                child.clear();
            }
        }
        self.presubdivide();
    }

    /// Clear, then insert every entry. Returns how many were rejected as out of bounds.
    pub fn rebuild(&mut self, entries: impl IntoIterator<Item = SpatialEntry>) -> usize {
        self.clear();
        entries
            .into_iter()
            .filter(|entry| !self.insert(entry.id, entry.position))
            .count()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn policy(&self) -> SubdivisionPolicy {
        self.policy
    }

    /// Entries stored directly at this node (not its descendants).
    pub fn entries(&self) -> &[SpatialEntry] {
        &self.entries
    }

    pub fn children(&self) -> Option<&[QuadtreeNode; 4]> {
        self.children.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Total entries in this subtree.
    pub fn len(&self) -> usize {
        self.entries.len()
            + self
                .children()
                .map_or(0, |children| children.iter().map(QuadtreeNode::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(QuadtreeNode::node_count).sum())
    }

    /// Visit this node and every descendant, parents before children.
    pub fn for_each_node<'a>(&'a self, visit: &mut impl FnMut(&'a QuadtreeNode)) {
        visit(self);
        if let Some(children) = self.children() {
            for child in children {
                child.for_each_node(visit);
            }
        }
    }

    /// Owned copy of the tree layout for renderers.
    pub fn to_view(&self) -> QuadNodeView {
        QuadNodeView {
            bounds: self.bounds,
            unit_ids: self.entries.iter().map(|entry| entry.id).collect(),
            children: self
                .children()
                .map(|children| children.iter().map(QuadtreeNode::to_view).collect())
                .unwrap_or_default(),
        }
    }
}

/// Hand `entry` to the first child that accepts it.
fn offer(children: &mut [QuadtreeNode; 4], entry: SpatialEntry) -> bool {
    children
        .iter_mut()
        .any(|child| child.insert(entry.id, entry.position))
}
