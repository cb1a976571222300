use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// Index of a node inside its [`Tree`] arena. Only valid for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("no node with path '{0}'")]
    NodeNotFound(String),

    #[error("path '{0}' is already in the tree")]
    DuplicatePath(String),

    #[error("parent directory of '{0}' is not in the tree")]
    MissingParent(String),

    #[error("invalid node path '{0}'")]
    InvalidPath(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    name: String,
    rel_path: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    selected: bool,
    expanded: bool,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root-relative, `/`-separated path. Unique within the tree.
    pub fn rel_path(&self) -> &str {
        &self.rel_path
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// For files the inclusion flag; for directories "every descendant is selected".
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }
}

/// Arena-backed file tree.
///
/// Nodes are stored in insertion order and a parent is always inserted before
/// its children, so walking the arena backwards visits every child before its
/// parent. `index` maps each relative path to its node and is the only way
/// callers outside the tree address nodes.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    index: HashMap<String, NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node below the directory named by the parent part of `rel_path`.
    ///
    /// Directories start expanded, everything starts unselected.
    pub fn insert(
        &mut self,
        kind: NodeKind,
        rel_path: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        let rel_path = rel_path.into().trim_end_matches('/').to_string();
        if rel_path.is_empty() || rel_path.split('/').any(str::is_empty) {
            return Err(TreeError::InvalidPath(rel_path));
        }
        if self.index.contains_key(&rel_path) {
            return Err(TreeError::DuplicatePath(rel_path));
        }

        let (parent, name) = match rel_path.rsplit_once('/') {
            Some((parent_path, name)) => {
                let parent_id = match self.index.get(parent_path) {
                    Some(&id) if self.nodes[id.0].is_dir() => id,
                    _ => return Err(TreeError::MissingParent(rel_path)),
                };
                (Some(parent_id), name.to_string())
            }
            None => (None, rel_path.clone()),
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            name,
            rel_path: rel_path.clone(),
            children: Vec::new(),
            parent,
            selected: false,
            expanded: kind == NodeKind::Directory,
        });
        match parent {
            Some(parent_id) => self.nodes[parent_id.0].children.push(id),
            None => self.roots.push(id),
        }
        self.index.insert(rel_path, id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn lookup(&self, rel_path: &str) -> Option<NodeId> {
        self.index.get(rel_path).copied()
    }

    pub fn get(&self, rel_path: &str) -> Option<&Node> {
        self.lookup(rel_path).map(|id| self.node(id))
    }

    /// All nodes in insertion (pre-order for scanner-built trees) order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Flips the selection of the node at `rel_path`.
    ///
    /// A directory pushes its new value onto its whole subtree. Afterwards
    /// every ancestor is recomputed as the AND of its children, so directory
    /// flags always agree with their contents. Returns the node's new value.
    pub fn toggle(&mut self, rel_path: &str) -> Result<bool, TreeError> {
        let id = self
            .lookup(rel_path)
            .ok_or_else(|| TreeError::NodeNotFound(rel_path.to_string()))?;
        let new_state = !self.nodes[id.0].selected;

        self.set_subtree(id, new_state);
        self.refresh_ancestors(id);

        debug!(rel_path, selected = new_state, "toggled node");
        Ok(new_state)
    }

    /// Selects everything unless everything is already selected, in which
    /// case everything is deselected. Returns the value applied.
    pub fn toggle_select_all(&mut self) -> bool {
        let target = !self.is_fully_selected();
        for node in &mut self.nodes {
            node.selected = target;
        }
        debug!(selected = target, nodes = self.nodes.len(), "toggled select all");
        target
    }

    pub fn is_fully_selected(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(|node| node.selected)
    }

    /// A directory that is not selected but has at least one selected descendant.
    pub fn is_partially_selected(&self, node: &Node) -> bool {
        if !node.is_dir() || node.selected {
            return false;
        }
        let mut stack: Vec<NodeId> = node.children.clone();
        while let Some(id) = stack.pop() {
            let child = &self.nodes[id.0];
            if child.selected {
                return true;
            }
            stack.extend_from_slice(&child.children);
        }
        false
    }

    /// Flips `expanded` on a directory. Files are left alone and report `false`.
    pub fn toggle_expanded(&mut self, rel_path: &str) -> Result<bool, TreeError> {
        let id = self
            .lookup(rel_path)
            .ok_or_else(|| TreeError::NodeNotFound(rel_path.to_string()))?;
        let node = &mut self.nodes[id.0];
        if node.is_dir() {
            node.expanded = !node.expanded;
        }
        Ok(node.expanded)
    }

    pub fn set_expanded(&mut self, rel_path: &str, expanded: bool) -> Result<(), TreeError> {
        let id = self
            .lookup(rel_path)
            .ok_or_else(|| TreeError::NodeNotFound(rel_path.to_string()))?;
        let node = &mut self.nodes[id.0];
        if node.is_dir() {
            node.expanded = expanded;
        }
        Ok(())
    }

    /// Expands every ancestor of `rel_path` so that its row is visible.
    pub fn reveal(&mut self, rel_path: &str) -> Result<(), TreeError> {
        let id = self
            .lookup(rel_path)
            .ok_or_else(|| TreeError::NodeNotFound(rel_path.to_string()))?;
        let mut parent = self.nodes[id.0].parent;
        while let Some(parent_id) = parent {
            self.nodes[parent_id.0].expanded = true;
            parent = self.nodes[parent_id.0].parent;
        }
        Ok(())
    }

    /// Selects every file whose relative path satisfies `predicate`, then
    /// recomputes all directory flags. Returns how many files matched.
    pub fn select_matching(&mut self, mut predicate: impl FnMut(&str) -> bool) -> usize {
        let mut matched = 0;
        for node in &mut self.nodes {
            if !node.is_dir() && predicate(&node.rel_path) {
                node.selected = true;
                matched += 1;
            }
        }
        self.recompute_directories();
        matched
    }

    /// Relative paths of selected files in pre-order. Directories never appear.
    pub fn selected_files(&self) -> Vec<&str> {
        let mut files = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.is_dir() {
                stack.extend(node.children.iter().rev().copied());
            } else if node.selected {
                files.push(node.rel_path.as_str());
            }
        }
        files
    }

    fn set_subtree(&mut self, id: NodeId, selected: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0];
            node.selected = selected;
            stack.extend_from_slice(&node.children);
        }
    }

    fn refresh_ancestors(&mut self, id: NodeId) {
        let mut parent = self.nodes[id.0].parent;
        while let Some(parent_id) = parent {
            self.recompute_directory(parent_id);
            parent = self.nodes[parent_id.0].parent;
        }
    }

    fn recompute_directories(&mut self) {
        for idx in (0..self.nodes.len()).rev() {
            if self.nodes[idx].is_dir() {
                self.recompute_directory(NodeId(idx));
            }
        }
    }

    // Empty directories keep whatever value they were given explicitly.
    fn recompute_directory(&mut self, id: NodeId) {
        let node = &self.nodes[id.0];
        if node.children.is_empty() {
            return;
        }
        let all_selected = node
            .children
            .iter()
            .all(|child| self.nodes[child.0].selected);
        self.nodes[id.0].selected = all_selected;
    }
}
