//! Mutable node tree with parent/child link maintenance.
//!
//! A [`Node`] is a cheap handle onto shared node data. Children are owned by
//! their parent's child list; the parent link is a [`Weak`] back-pointer so a
//! tree is dropped as soon as its root handle (and any outside handles) go
//! away.
//!
//! Node identity is handle identity: two nodes with the same name and props
//! are still different nodes. See [`Node::ptr_eq`].

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Insertion-ordered node properties.
pub type Props = Map<String, Value>;

struct NodeData {
    name: String,
    props: Props,
    children: Vec<Node>,
    parent: Weak<RefCell<NodeData>>,
}

// Tear subtrees down iteratively so dropping a deep tree cannot overflow the
// stack. Children still held by an outside handle are left to that handle.
impl Drop for NodeData {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if Rc::strong_count(&node.0) == 1 {
                pending.append(&mut node.0.borrow_mut().children);
            }
        }
    }
}

/// A labeled tree element with properties and ordered children.
///
/// Cloning a `Node` clones the handle, not the subtree.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    /// Creates a detached node with no props.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_props(name, Props::new())
    }

    /// Creates a detached node with initial props.
    pub fn with_props(name: impl Into<String>, props: Props) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            name: name.into(),
            props,
            children: Vec::new(),
            parent: Weak::new(),
        })))
    }

    /// Returns true if both handles point at the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) -> &Self {
        self.0.borrow_mut().name = name.into();
        self
    }

    /// Returns a copy of a single prop.
    pub fn prop(&self, key: &str) -> Option<Value> {
        self.0.borrow().props.get(key).cloned()
    }

    pub fn set_prop(&self, key: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.0.borrow_mut().props.insert(key.into(), value.into());
        self
    }

    /// Removes a prop, returning its previous value. Absent keys are a no-op.
    pub fn remove_prop(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().props.shift_remove(key)
    }

    /// Replaces all props at once.
    pub fn set_props(&self, props: Props) -> &Self {
        self.0.borrow_mut().props = props;
        self
    }

    /// Returns a copy of the props. Mutating it never affects the node.
    pub fn props(&self) -> Props {
        self.0.borrow().props.clone()
    }

    /// Returns a copy of the child handles in order.
    ///
    /// Pushing to or removing from the returned `Vec` never changes the
    /// node's own children; use [`Node::add_child`] / [`Node::remove_child`].
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    pub fn has_parent(&self) -> bool {
        self.parent().is_some()
    }

    /// Appends `child`, detaching it from its current parent first.
    ///
    /// Adding a node to itself or to one of its own descendants would form a
    /// cycle; such calls leave the tree untouched.
    pub fn add_child(&self, child: &Node) -> &Self {
        // Only a node with children can be an ancestor of `self`.
        if self.ptr_eq(child) || (child.child_count() > 0 && self.is_descendant_of(child)) {
            tracing::warn!(
                parent = %self.name(),
                child = %child.name(),
                "refusing to add a node beneath itself"
            );
            return self;
        }

        if let Some(old_parent) = child.parent() {
            old_parent.remove_child(child);
        }

        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
        self
    }

    /// Removes `child` (by identity) and clears its parent link.
    ///
    /// Does nothing if `child` is not a direct child of this node.
    pub fn remove_child(&self, child: &Node) -> &Self {
        let removed = {
            let mut data = self.0.borrow_mut();
            match data.children.iter().position(|c| c.ptr_eq(child)) {
                Some(index) => {
                    data.children.remove(index);
                    true
                }
                None => false,
            }
        };

        if removed {
            child.0.borrow_mut().parent = Weak::new();
        }
        self
    }

    /// Depth-first pre-order search by name, starting with this node itself.
    pub fn child_by_name(&self, name: &str) -> Option<Node> {
        let data = self.0.borrow();
        if data.name == name {
            return Some(self.clone());
        }
        data.children.iter().find_map(|c| c.child_by_name(name))
    }

    /// Depth-first pre-order search for a node whose prop `key` is exactly
    /// the string `value`, starting with this node itself.
    ///
    /// Non-string props never match, even if they print the same.
    pub fn child_where_prop(&self, key: &str, value: &str) -> Option<Node> {
        let data = self.0.borrow();
        if matches!(data.props.get(key), Some(Value::String(s)) if s == value) {
            return Some(self.clone());
        }
        data.children
            .iter()
            .find_map(|c| c.child_where_prop(key, value))
    }

    /// Serializable copy of this subtree.
    pub fn to_snapshot(&self) -> NodeSnapshot {
        let data = self.0.borrow();
        NodeSnapshot {
            name: data.name.clone(),
            props: data.props.clone(),
            children: data.children.iter().map(Node::to_snapshot).collect(),
        }
    }

    /// The subtree as `{name, props, children}` JSON.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self.to_snapshot()).unwrap_or(Value::Null)
    }

    /// Rebuilds a live tree from a snapshot, wiring up parent links.
    pub fn from_snapshot(snapshot: NodeSnapshot) -> Self {
        let node = Node::with_props(snapshot.name, snapshot.props);
        for child in snapshot.children {
            node.add_child(&Node::from_snapshot(child));
        }
        node
    }

    fn is_descendant_of(&self, ancestor: &Node) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.ptr_eq(ancestor) {
                return true;
            }
            current = node.parent();
        }
        false
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Node")
            .field("name", &data.name)
            .field("props", &data.props)
            .field("children", &data.children)
            .finish()
    }
}

/// Wire shape of a node: `{ name, props, children }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub name: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub children: Vec<NodeSnapshot>,
}
