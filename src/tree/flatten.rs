use super::model::{Node, NodeId, Tree};

/// One visible line of the tree.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub node: &'a Node,
    pub depth: usize,
    pub is_last: bool,
    /// Whether each ancestor, outermost first, was the last of its siblings.
    pub ancestors_last: Vec<bool>,
    /// Search key: the relative path, with a trailing `/` for directories.
    pub path: String,
}

impl Row<'_> {
    pub fn rel_path(&self) -> &str {
        self.node.rel_path()
    }

    /// Box-drawing prefix placed before the name.
    ///
    /// Top-level rows get no prefix, so the outermost ancestor never
    /// contributes a vertical bar.
    pub fn connector(&self) -> String {
        if self.depth == 0 {
            return String::new();
        }
        let mut prefix = String::with_capacity(self.depth * 3);
        for &ancestor_last in self.ancestors_last.iter().skip(1) {
            prefix.push_str(if ancestor_last { "   " } else { "│  " });
        }
        prefix.push_str(if self.is_last { "└─ " } else { "├─ " });
        prefix
    }

    pub fn label(&self) -> String {
        if self.node.is_dir() {
            format!("{}/", self.node.name())
        } else {
            self.node.name().to_string()
        }
    }
}

/// Pre-order list of the rows currently visible in `tree`.
///
/// A collapsed directory keeps its own row but hides its whole subtree.
pub fn flatten(tree: &Tree) -> Vec<Row<'_>> {
    flatten_with(tree, false)
}

/// Every node in pre-order, folded or not. Search runs over this so that a
/// collapsed directory does not hide its files from the query.
pub fn flatten_all(tree: &Tree) -> Vec<Row<'_>> {
    flatten_with(tree, true)
}

fn flatten_with(tree: &Tree, include_collapsed: bool) -> Vec<Row<'_>> {
    let mut rows = Vec::with_capacity(tree.len());
    let mut ancestors_last = Vec::new();
    flatten_level(
        tree,
        tree.roots(),
        0,
        include_collapsed,
        &mut ancestors_last,
        &mut rows,
    );
    rows
}

fn flatten_level<'a>(
    tree: &'a Tree,
    siblings: &'a [NodeId],
    depth: usize,
    include_collapsed: bool,
    ancestors_last: &mut Vec<bool>,
    rows: &mut Vec<Row<'a>>,
) {
    for (idx, &id) in siblings.iter().enumerate() {
        let node = tree.node(id);
        let is_last = idx + 1 == siblings.len();
        let path = if node.is_dir() {
            format!("{}/", node.rel_path())
        } else {
            node.rel_path().to_string()
        };

        rows.push(Row {
            node,
            depth,
            is_last,
            ancestors_last: ancestors_last.clone(),
            path,
        });

        let descend = include_collapsed || node.is_expanded();
        if node.is_dir() && descend && !node.children().is_empty() {
            ancestors_last.push(is_last);
            flatten_level(
                tree,
                node.children(),
                depth + 1,
                include_collapsed,
                ancestors_last,
                rows,
            );
            ancestors_last.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn project_tree() -> Tree {
        let mut tree = Tree::new();
        for (kind, path) in [
            (NodeKind::Directory, "docs"),
            (NodeKind::File, "docs/guide.md"),
            (NodeKind::Directory, "src"),
            (NodeKind::Directory, "src/tree"),
            (NodeKind::File, "src/tree/mod.rs"),
            (NodeKind::File, "src/tree/model.rs"),
            (NodeKind::File, "src/main.rs"),
            (NodeKind::File, "Cargo.toml"),
        ] {
            tree.insert(kind, path).unwrap();
        }
        tree
    }

    fn rendered(rows: &[Row<'_>]) -> Vec<String> {
        rows.iter()
            .map(|row| format!("{}{}", row.connector(), row.label()))
            .collect()
    }

    #[test]
    fn rows_come_out_in_pre_order() {
        let tree = project_tree();
        let rows = flatten(&tree);
        let paths: Vec<&str> = rows.iter().map(|row| row.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "docs/",
                "docs/guide.md",
                "src/",
                "src/tree/",
                "src/tree/mod.rs",
                "src/tree/model.rs",
                "src/main.rs",
                "Cargo.toml",
            ]
        );
        assert_eq!(rows.len(), tree.len());
    }

    #[test]
    fn depth_and_sibling_flags() {
        let tree = project_tree();
        let rows = flatten(&tree);
        let model = rows.iter().find(|r| r.rel_path() == "src/tree/model.rs").unwrap();
        assert_eq!(model.depth, 2);
        assert!(model.is_last);
        assert_eq!(model.ancestors_last, vec![false, false]);

        let main = rows.iter().find(|r| r.rel_path() == "src/main.rs").unwrap();
        assert_eq!(main.depth, 1);
        assert!(main.is_last);

        let cargo = rows.last().unwrap();
        assert_eq!(cargo.depth, 0);
        assert!(cargo.is_last);
        assert!(cargo.ancestors_last.is_empty());
    }

    #[test]
    fn connectors_draw_the_tree() {
        let tree = project_tree();
        assert_eq!(
            rendered(&flatten(&tree)),
            vec![
                "docs/",
                "└─ guide.md",
                "src/",
                "├─ tree/",
                "│  ├─ mod.rs",
                "│  └─ model.rs",
                "└─ main.rs",
                "Cargo.toml",
            ]
        );
    }

    #[test]
    fn last_ancestor_leaves_a_gap_instead_of_a_bar() {
        let mut tree = Tree::new();
        tree.insert(NodeKind::Directory, "a").unwrap();
        tree.insert(NodeKind::File, "a/first.txt").unwrap();
        tree.insert(NodeKind::Directory, "a/b").unwrap();
        tree.insert(NodeKind::File, "a/b/deep.txt").unwrap();
        assert_eq!(
            rendered(&flatten(&tree)),
            vec!["a/", "├─ first.txt", "└─ b/", "   └─ deep.txt"]
        );
    }

    #[test]
    fn collapsed_directory_hides_descendants_only() {
        let mut tree = project_tree();
        tree.set_expanded("src/tree", false).unwrap();
        let rows = flatten(&tree);
        let paths: Vec<&str> = rows.iter().map(|row| row.rel_path()).collect();
        assert_eq!(
            paths,
            vec!["docs", "docs/guide.md", "src", "src/tree", "src/main.rs", "Cargo.toml"]
        );
        let collapsed = rows.iter().find(|r| r.rel_path() == "src/tree").unwrap();
        assert!(!collapsed.is_last);
    }

    #[test]
    fn flatten_all_ignores_folding() {
        let mut tree = project_tree();
        tree.set_expanded("src", false).unwrap();
        tree.set_expanded("docs", false).unwrap();
        assert_eq!(flatten(&tree).len(), 3);
        let rows = flatten_all(&tree);
        assert_eq!(rows.len(), tree.len());
        assert_eq!(rows[4].rel_path(), "src/tree/mod.rs");
        assert_eq!(rows[4].connector(), "│  ├─ ");
    }

    #[test]
    fn empty_tree_flattens_to_nothing() {
        assert!(flatten(&Tree::new()).is_empty());
    }
}
