//! In-memory category tree for one site.
//!
//! A site's categories are fetched in a single query and indexed here; every
//! traversal (slug-chain descent, ancestor chains, sibling navigation, full
//! pre-order walks) runs against this index. Depth is unbounded.

use std::collections::{HashMap, HashSet};

use crate::models::{Category, Post};

/// Ordered index over one site's category rows.
#[derive(Debug, Default)]
pub struct CategoryTree {
    nodes: HashMap<i32, Category>,
    children: HashMap<Option<i32>, Vec<i32>>,
}

impl CategoryTree {
    /// Build the tree from sibling-ordered rows.
    ///
    /// Rows whose parent is missing from the set are dropped; they are
    /// unreachable from any root and would otherwise produce orphan paths.
    #[must_use]
    pub fn from_rows(rows: Vec<Category>) -> Self {
        let ids: HashSet<i32> = rows.iter().map(|c| c.id).collect();
        let mut nodes = HashMap::with_capacity(rows.len());
        let mut children: HashMap<Option<i32>, Vec<i32>> = HashMap::new();
        for cat in rows {
            if let Some(parent) = cat.parent_id {
                if !ids.contains(&parent) {
                    continue;
                }
            }
            children.entry(cat.parent_id).or_default().push(cat.id);
            nodes.insert(cat.id, cat);
        }
        Self { nodes, children }
    }

    /// Fetch a node by id.
    #[must_use]
    pub fn get(&self, id: i32) -> Option<&Category> { self.nodes.get(&id) }

    /// Number of indexed nodes.
    #[must_use]
    pub fn len(&self) -> usize { self.nodes.len() }

    /// Whether the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Ordered child ids of `parent` (`None` for the root level).
    #[must_use]
    pub fn child_ids(&self, parent: Option<i32>) -> &[i32] {
        self.children.get(&parent).map_or(&[], Vec::as_slice)
    }

    /// Ordered child nodes of a category.
    #[must_use]
    pub fn children(&self, id: i32) -> Vec<&Category> {
        self.child_ids(Some(id))
            .iter()
            .filter_map(|child| self.nodes.get(child))
            .collect()
    }

    /// Ordered siblings of a category, excluding the category itself.
    #[must_use]
    pub fn siblings(&self, id: i32) -> Vec<&Category> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        self.child_ids(node.parent_id)
            .iter()
            .filter(|sibling| **sibling != id)
            .filter_map(|sibling| self.nodes.get(sibling))
            .collect()
    }

    /// Resolve a slug chain from the root level down to a single node.
    ///
    /// Empty segments are skipped; an empty chain resolves to nothing.
    #[must_use]
    pub fn descend<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Category> {
        let mut parent = None;
        let mut found = None;
        for segment in segments.iter().map(AsRef::as_ref).filter(|s| !s.is_empty()) {
            let next = self
                .child_ids(parent)
                .iter()
                .filter_map(|id| self.nodes.get(id))
                .find(|cat| cat.slug == segment)?;
            parent = Some(next.id);
            found = Some(next);
        }
        found
    }

    /// Ancestor chain from the root down to and including `id`.
    ///
    /// The parent chain is acyclic by invariant; a malformed cycle still
    /// terminates via the visited set.
    #[must_use]
    pub fn ancestors(&self, id: i32) -> Vec<&Category> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = self.nodes.get(&id);
        while let Some(cat) = cursor {
            if !seen.insert(cat.id) {
                break;
            }
            chain.push(cat);
            cursor = cat.parent_id.and_then(|parent| self.nodes.get(&parent));
        }
        chain.reverse();
        chain
    }

    /// Slash-joined slug path from the root to `id`.
    #[must_use]
    pub fn path(&self, id: i32) -> String {
        let segments: Vec<&str> = self
            .ancestors(id)
            .iter()
            .map(|cat| cat.slug.as_str())
            .collect();
        format!("/{}", segments.join("/"))
    }

    /// Fully qualified path of a post: its category's path plus the post
    /// slug. A post without a resolvable category hangs off the site root.
    #[must_use]
    pub fn post_path(&self, post: &Post) -> String {
        match post.category_id.and_then(|id| self.nodes.get(&id)) {
            Some(cat) => format!("{}/{}", self.path(cat.id), post.slug),
            None => format!("/{}", post.slug),
        }
    }

    /// Every node in pre-order (roots first, each subtree before the next
    /// sibling).
    #[must_use]
    pub fn walk(&self) -> Vec<&Category> {
        self.walk_from(self.child_ids(None))
    }

    /// Pre-order walk of the subtree rooted at `id`, inclusive.
    #[must_use]
    pub fn subtree(&self, id: i32) -> Vec<&Category> {
        if !self.nodes.contains_key(&id) {
            return Vec::new();
        }
        self.walk_from(&[id])
    }

    fn walk_from(&self, start: &[i32]) -> Vec<&Category> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<i32> = start.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(cat) = self.nodes.get(&id) {
                out.push(cat);
                stack.extend(self.child_ids(Some(id)).iter().rev());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use rstest::{fixture, rstest};

    use super::*;

    fn category(id: i32, parent_id: Option<i32>, slug: &str, position: i32) -> Category {
        Category {
            id,
            site_id: 1,
            parent_id,
            slug: slug.to_owned(),
            title: slug.to_owned(),
            content: None,
            position,
            created_at: NaiveDateTime::default(),
        }
    }

    /// shoes -> running -> trail, plus a sibling branch bags.
    #[fixture]
    fn sample_tree() -> CategoryTree {
        CategoryTree::from_rows(vec![
            category(1, None, "shoes", 0),
            category(2, Some(1), "running", 0),
            category(3, Some(2), "trail", 0),
            category(4, None, "bags", 1),
        ])
    }

    #[rstest]
    fn descend_resolves_full_chains(sample_tree: CategoryTree) {
        let node = sample_tree
            .descend(&["shoes", "running", "trail"])
            .expect("chain should resolve");
        assert_eq!(node.id, 3);
    }

    #[rstest]
    fn descend_skips_empty_segments(sample_tree: CategoryTree) {
        let node = sample_tree
            .descend(&["shoes", "", "running"])
            .expect("chain should resolve");
        assert_eq!(node.id, 2);
    }

    #[rstest]
    #[case::empty(&[] as &[&str])]
    #[case::missing_root(&["sandals"])]
    #[case::missing_leaf(&["shoes", "sandals"])]
    #[case::wrong_order(&["running", "shoes"])]
    fn descend_rejects_broken_chains(sample_tree: CategoryTree, #[case] segments: &[&str]) {
        assert!(sample_tree.descend(segments).is_none());
    }

    #[rstest]
    fn ancestors_run_root_to_self(sample_tree: CategoryTree) {
        let ids: Vec<i32> = sample_tree.ancestors(3).iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[rstest]
    fn path_is_slash_joined_from_root(sample_tree: CategoryTree) {
        assert_eq!(sample_tree.path(3), "/shoes/running/trail");
        assert_eq!(sample_tree.path(1), "/shoes");
    }

    #[rstest]
    fn walk_visits_every_node_once_at_any_depth() {
        // 8 levels deep: well past the old unrolled limit.
        let mut rows = vec![category(1, None, "level-1", 0)];
        for depth in 2..=8 {
            rows.push(category(depth, Some(depth - 1), &format!("level-{depth}"), 0));
        }
        let tree = CategoryTree::from_rows(rows);
        let visited: Vec<i32> = tree.walk().iter().map(|c| c.id).collect();
        assert_eq!(visited, (1..=8).collect::<Vec<i32>>());
        assert_eq!(tree.path(8), "/level-1/level-2/level-3/level-4/level-5/level-6/level-7/level-8");
    }

    #[rstest]
    fn walk_orders_siblings_by_position(sample_tree: CategoryTree) {
        let ids: Vec<i32> = sample_tree.walk().iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[rstest]
    fn subtree_excludes_sibling_branches(sample_tree: CategoryTree) {
        let ids: Vec<i32> = sample_tree.subtree(2).iter().map(|c| c.id).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[rstest]
    fn siblings_exclude_self(sample_tree: CategoryTree) {
        let ids: Vec<i32> = sample_tree.siblings(1).iter().map(|c| c.id).collect();
        assert_eq!(ids, [4]);
        assert!(sample_tree.siblings(3).is_empty());
    }

    #[test]
    fn orphan_rows_are_dropped() {
        let tree = CategoryTree::from_rows(vec![
            category(1, None, "root", 0),
            category(2, Some(99), "orphan", 0),
        ]);
        assert_eq!(tree.len(), 1);
        assert!(tree.get(2).is_none());
    }
}
