//! The document root node.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::{Node, NodeSnapshot};

/// Name every canvas root node is created with.
pub const CANVAS_NODE_NAME: &str = "canvas";

/// Root of a page's node tree, tagged with the template the renderer should use.
///
/// Derefs to its root [`Node`], so all tree operations are available directly.
/// A canvas is meant to stay parentless; that is up to the caller.
#[derive(Debug)]
pub struct Canvas {
    root: Node,
    template: String,
}

impl Canvas {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            root: Node::new(CANVAS_NODE_NAME),
            template: template.into(),
        }
    }

    /// Template identifier, opaque to everything but the renderer.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn set_template(&mut self, template: impl Into<String>) -> &mut Self {
        self.template = template.into();
        self
    }

    /// Handle to the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn to_snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            node: self.root.to_snapshot(),
            template: self.template.clone(),
        }
    }

    /// The canvas as `{name, props, children, template}` JSON.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self.to_snapshot()).unwrap_or(Value::Null)
    }

    pub fn from_snapshot(snapshot: CanvasSnapshot) -> Self {
        Self {
            root: Node::from_snapshot(snapshot.node),
            template: snapshot.template,
        }
    }
}

impl Deref for Canvas {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.root
    }
}

/// Wire shape of a canvas: a node snapshot plus `template`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    #[serde(flatten)]
    pub node: NodeSnapshot,
    pub template: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canvas_root_name() {
        let canvas = Canvas::new("page/default");
        assert_eq!(canvas.name(), CANVAS_NODE_NAME);
        assert!(canvas.parent().is_none());
    }

    #[test]
    fn test_to_value_includes_template() {
        let mut canvas = Canvas::new("page/landing");
        assert_eq!(canvas.to_value()["template"], "page/landing");

        canvas.set_template("page/article");
        assert_eq!(
            canvas.to_value(),
            json!({
                "name": "canvas",
                "props": {},
                "children": [],
                "template": "page/article"
            })
        );
    }

    #[test]
    fn test_tree_operations_through_deref() {
        let canvas = Canvas::new("page/default");
        let header = Node::new("header");
        canvas.add_child(&header);

        assert!(header.parent().unwrap().ptr_eq(canvas.root()));
        assert!(canvas.child_by_name("header").unwrap().ptr_eq(&header));
    }

    #[test]
    fn test_snapshot_restores_template_and_tree() {
        let snapshot: CanvasSnapshot = serde_json::from_value(json!({
            "name": "canvas",
            "props": {"theme": "dark"},
            "children": [{"name": "main", "props": {}, "children": []}],
            "template": "page/docs"
        }))
        .unwrap();

        let canvas = Canvas::from_snapshot(snapshot);

        assert_eq!(canvas.template(), "page/docs");
        assert_eq!(canvas.prop("theme"), Some(json!("dark")));
        assert_eq!(canvas.child_count(), 1);
    }
}
