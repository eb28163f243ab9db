//! Layout-tree model and workspace resolution.
//!
//! [`Node`] mirrors the subset of sway's `get_tree` JSON the switcher cares
//! about.  Workspace membership is **never** taken from node-level metadata:
//! floating windows can report a workspace that does not match their actual
//! placement, so [`resolve_workspace`] walks the tree and associates every
//! node with its nearest workspace-type ancestor instead.

use serde::Deserialize;

/// Node kind in the layout tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Root,
    Output,
    Workspace,
    Con,
    FloatingCon,
    #[serde(other)]
    Unknown,
}

/// A pixel rectangle in compositor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// X11 window properties reported for XWayland clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowProperties {
    #[serde(default)]
    pub class: Option<String>,
}

/// One node of the layout tree, as returned by `get_tree`.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub window_properties: Option<WindowProperties>,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub floating_nodes: Vec<Node>,
}

impl Node {
    /// Lazy preorder iterator over the leaf windows of this subtree.
    ///
    /// A leaf is a childless `con` or `floating_con`; structural nodes
    /// (root, outputs, workspaces, split containers) are never yielded.
    /// At each level tiled children come before floating ones, giving a
    /// stable tree-traversal order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Find the single node flagged focused, if any.
    pub fn find_focused(&self) -> Option<&Node> {
        if self.focused {
            return Some(self);
        }
        self.nodes
            .iter()
            .chain(self.floating_nodes.iter())
            .find_map(Node::find_focused)
    }
}

/// Iterator produced by [`Node::leaves`].
pub struct Leaves<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        while let Some(node) = self.stack.pop() {
            if node.nodes.is_empty() && node.floating_nodes.is_empty() {
                if matches!(node.node_type, NodeType::Con | NodeType::FloatingCon) {
                    return Some(node);
                }
                continue;
            }
            // Reverse so pop order matches document order.
            for child in node.floating_nodes.iter().rev() {
                self.stack.push(child);
            }
            for child in node.nodes.iter().rev() {
                self.stack.push(child);
            }
        }
        None
    }
}

/// Resolve the workspace a node actually belongs to.
///
/// Walks the tree from `root` and returns the name of the nearest
/// workspace-type ancestor on the path to the node with id `id`, or `None`
/// if the node does not exist or has no workspace ancestor.
pub fn resolve_workspace(root: &Node, id: i64) -> Option<&str> {
    fn walk<'a>(node: &'a Node, id: i64, workspace: Option<&'a str>) -> Option<Option<&'a str>> {
        let workspace = if node.node_type == NodeType::Workspace {
            node.name.as_deref()
        } else {
            workspace
        };
        if node.id == id {
            return Some(workspace);
        }
        node.nodes
            .iter()
            .chain(node.floating_nodes.iter())
            .find_map(|child| walk(child, id, workspace))
    }
    walk(root, id, None).flatten()
}

/// The leaf windows whose resolved workspace equals `workspace`, in tree
/// order, as owned records.
pub fn windows_on_workspace(root: &Node, workspace: &str) -> Vec<WindowRecord> {
    root.leaves()
        .filter(|node| resolve_workspace(root, node.id) == Some(workspace))
        .map(|node| WindowRecord::from_node(node, workspace))
        .collect()
}

/// A candidate window, frozen at tree-snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    /// Container id, unique for the lifetime of the window.
    pub id: i64,
    /// Display title; empty names fall back to `"Untitled"`.
    pub title: String,
    /// Wayland application id, empty for XWayland clients.
    pub app_id: String,
    /// X11 window class, empty for native Wayland clients.
    pub class: String,
    /// Window geometry in compositor pixels.
    pub rect: Rect,
    /// Resolved workspace name.
    pub workspace: String,
    /// Whether the window held focus when the tree was read.
    pub focused: bool,
}

impl WindowRecord {
    /// Build a record from a tree node and its resolved workspace.
    pub fn from_node(node: &Node, workspace: &str) -> Self {
        let title = node
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Untitled")
            .to_string();
        Self {
            id: node.id,
            title,
            app_id: node.app_id.clone().unwrap_or_default(),
            class: node
                .window_properties
                .as_ref()
                .and_then(|props| props.class.clone())
                .unwrap_or_default(),
            rect: node.rect,
            workspace: workspace.to_string(),
            focused: node.focused,
        }
    }

    /// Icon name hint for notifications: app id, then class, then a generic
    /// fallback.
    pub fn icon_hint(&self) -> &str {
        if !self.app_id.is_empty() {
            &self.app_id
        } else if !self.class.is_empty() {
            &self.class
        } else {
            "window"
        }
    }
}

//  Tests
