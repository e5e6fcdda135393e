#![forbid(unsafe_code)]

//! Host-owned element tree with document-order traversal.
//!
//! Each node represents an element identified by an [`ElementId`]. The tree
//! records parent/child structure in insertion order, which is the document
//! order the engine's focusable-set resolution follows.
//!
//! # Invariants
//!
//! 1. Element IDs are unique within the tree.
//! 2. Children are stored in insertion order; preorder traversal therefore
//!    matches document order.
//! 3. Removing an element removes its entire subtree and the parent's
//!    child reference.
//! 4. Mutations addressing a missing ID are silent no-ops.

use std::collections::HashMap;

/// Unique identifier for an element. Handles are opaque: the engine never
/// interprets them beyond identity.
pub type ElementId = u64;

/// A single element in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Tab index for keyboard reachability. Negative values are never
    /// keyboard-reachable.
    pub tab_index: i32,
    /// Whether the element is disabled (present but not interactive).
    pub disabled: bool,
    /// Whether the element is hidden. Hiding an element hides its subtree.
    pub hidden: bool,
}

impl Element {
    /// Create a new visible, enabled element with tab index 0.
    #[must_use]
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            tab_index: 0,
            disabled: false,
            hidden: false,
        }
    }

    /// Builder: set tab index.
    #[must_use]
    pub fn with_tab_index(mut self, idx: i32) -> Self {
        self.tab_index = idx;
        self
    }

    /// Builder: set disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Builder: set hidden flag.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Host-owned tree of elements.
///
/// The engine reads this structure; only hosts mutate it. All lookups are
/// O(1); traversal is O(subtree).
#[derive(Debug, Default)]
pub struct ElementTree {
    nodes: HashMap<ElementId, Element>,
    children: HashMap<ElementId, Vec<ElementId>>,
    parent: HashMap<ElementId, ElementId>,
    roots: Vec<ElementId>,
}

impl ElementTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element as a root. Returns the element's ID.
    ///
    /// If the ID already exists anywhere in the tree, the stored element
    /// data is replaced and its position is unchanged.
    pub fn insert_root(&mut self, element: Element) -> ElementId {
        let id = element.id;
        if self.nodes.insert(id, element).is_none() {
            self.roots.push(id);
        }
        id
    }

    /// Insert an element as the last child of `parent`.
    ///
    /// Returns `None` (and changes nothing) if the parent is missing.
    /// Replacing an existing ID keeps its current position.
    pub fn append(&mut self, parent: ElementId, element: Element) -> Option<ElementId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        let id = element.id;
        if self.nodes.insert(id, element).is_none() {
            self.children.entry(parent).or_default().push(id);
            self.parent.insert(id, parent);
        }
        Some(id)
    }

    /// Remove an element and its entire subtree.
    ///
    /// Returns the removed element, or `None` if not present.
    #[must_use = "use the removed element (if any)"]
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let element = self.nodes.remove(&id)?;

        // Explicit stack; host trees can nest arbitrarily deep.
        let mut stack = self.children.remove(&id).unwrap_or_default();
        while let Some(node) = stack.pop() {
            self.nodes.remove(&node);
            self.parent.remove(&node);
            if let Some(kids) = self.children.remove(&node) {
                stack.extend(kids);
            }
        }

        if let Some(parent) = self.parent.remove(&id) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|c| *c != id);
            }
        } else {
            self.roots.retain(|r| *r != id);
        }

        Some(element)
    }

    /// Look up an element by ID.
    #[must_use = "use the returned element (if any)"]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(&id)
    }

    /// Whether an element exists in the tree.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Direct children of an element, in document order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Parent of an element, if any.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent.get(&id).copied()
    }

    /// Whether `id` is a strict descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Whether `id` is `container` itself or one of its descendants.
    ///
    /// This is the containment test for outside-pointer decisions.
    #[must_use]
    pub fn is_within(&self, id: ElementId, container: ElementId) -> bool {
        id == container || self.is_descendant(id, container)
    }

    /// All strict descendants of `container` in preorder (document order).
    #[must_use]
    pub fn descendants(&self, container: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(container).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            for child in self.children(id).iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Set the disabled flag. Silent no-op if the element is missing.
    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(el) = self.nodes.get_mut(&id) {
            el.disabled = disabled;
        }
    }

    /// Set the hidden flag. Silent no-op if the element is missing.
    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        if let Some(el) = self.nodes.get_mut(&id) {
            el.hidden = hidden;
        }
    }

    /// Set the tab index. Silent no-op if the element is missing.
    pub fn set_tab_index(&mut self, id: ElementId, tab_index: i32) {
        if let Some(el) = self.nodes.get_mut(&id) {
            el.tab_index = tab_index;
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.children.clear();
        self.parent.clear();
        self.roots.clear();
    }
}

// =========================================================================
// Tests
// =========================================================================
