//! Search tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by `NodeId`
//! indices. Parents own their children transitively through the arena;
//! the child-to-parent link is a plain index, so the ownership graph
//! stays acyclic and the whole tree is dropped in one piece.

use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::node::{NodeId, SearchNode};
use crate::stats::NodeStats;

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<S, A> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<S, A>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: NodeStats, A> SearchTree<S, A> {
    /// Create a new tree holding only a root node.
    pub fn new(root_stats: S) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_stats)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S, A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true after construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[SearchNode<S, A>] {
        &self.nodes
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: SearchNode<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Add a child to a parent node. Returns the new child's ID.
    pub fn add_child(&mut self, parent: NodeId, action: A, stats: S) -> NodeId {
        let child = self.allocate(SearchNode::new_child(parent, action, stats));
        self.get_mut(parent).children.push(child);
        child
    }

    /// Expand a node: one child per legal action, in the given order.
    /// A correct engine expands each node at most once.
    pub fn expand(
        &mut self,
        parent: NodeId,
        actions: impl IntoIterator<Item = A>,
        mut new_stats: impl FnMut() -> S,
    ) {
        debug_assert!(self.get(parent).children.is_empty(), "node expanded twice");
        for action in actions {
            self.add_child(parent, action, new_stats());
        }
    }

    /// Back-propagate a score from a node up to the root.
    /// The score is negated at each ply (opponent's perspective).
    pub fn backpropagate(&mut self, from: NodeId, score: f64) {
        let mut current = from;
        let mut current_score = score;

        while current.is_some() {
            let node = self.get_mut(current);
            node.stats.record(current_score);
            current_score = -current_score;
            current = node.parent;
        }
    }

    /// Select the child maximizing the upper confidence bound.
    /// Ties are broken uniformly at random among the maximizers.
    pub fn select_child(
        &self,
        parent: NodeId,
        exploration: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        let parent_visits = self.get(parent).stats.visits();
        self.max_child_by(parent, rng, |stats| {
            stats.upper_bound(parent_visits, exploration)
        })
    }

    /// Select the child maximizing `value` (the conservative estimate).
    /// With `exploration == 0.0` this picks the best average score.
    /// Ties are broken uniformly at random among the maximizers.
    pub fn favorite_child(
        &self,
        parent: NodeId,
        exploration: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        let parent_visits = self.get(parent).stats.visits();
        self.max_child_by(parent, rng, |stats| {
            stats.value(parent_visits, exploration)
        })
    }

    /// Pick a child uniformly at random.
    pub fn random_child(&self, parent: NodeId, rng: &mut ChaCha20Rng) -> Option<NodeId> {
        let children = &self.get(parent).children;
        if children.is_empty() {
            None
        } else {
            Some(children[rng.gen_range(0..children.len())])
        }
    }

    /// Maximum over children of `score`, collecting every tied maximizer
    /// and sampling one uniformly. First-found picks would bias the search
    /// whenever several children share an estimate, which is the common
    /// case at the start of a search.
    fn max_child_by(
        &self,
        parent: NodeId,
        rng: &mut ChaCha20Rng,
        score: impl Fn(&S) -> f64,
    ) -> Option<NodeId> {
        let mut best = f64::NEG_INFINITY;
        let mut ties: Vec<NodeId> = Vec::new();

        for &child in &self.get(parent).children {
            let s = score(&self.get(child).stats);
            if s > best {
                best = s;
                ties.clear();
                ties.push(child);
            } else if s == best {
                ties.push(child);
            }
        }

        if ties.is_empty() {
            None
        } else {
            Some(ties[rng.gen_range(0..ties.len())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::UctStats;
    use rand::SeedableRng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    fn tree_with_children(actions: &[u8]) -> SearchTree<UctStats, u8> {
        let mut tree = SearchTree::new(UctStats::new());
        tree.expand(tree.root(), actions.iter().copied(), UctStats::new);
        tree
    }

    #[test]
    fn test_new_tree() {
        let tree: SearchTree<UctStats, u8> = SearchTree::new(UctStats::new());

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));
        assert!(tree.get(tree.root()).is_root());
        assert!(tree.get(tree.root()).is_leaf());
    }

    #[test]
    fn test_expand() {
        let tree = tree_with_children(&[3, 1, 4]);

        assert_eq!(tree.len(), 4);
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 3);

        // Children keep legal-action order and point back at the parent
        let actions: Vec<u8> = root
            .children
            .iter()
            .map(|&id| tree.get(id).action.unwrap())
            .collect();
        assert_eq!(actions, vec![3, 1, 4]);
        for &id in &root.children {
            assert_eq!(tree.get(id).parent, tree.root());
        }
    }

    #[test]
    fn test_backpropagate_two_ply() {
        let mut tree = tree_with_children(&[0]);
        let child = tree.get(tree.root()).children[0];
        let grandchild = tree.add_child(child, 1, UctStats::new());

        tree.backpropagate(grandchild, 1.0);

        // One visit everywhere along the path
        assert_eq!(tree.get(grandchild).stats.visits(), 1);
        assert_eq!(tree.get(child).stats.visits(), 1);
        assert_eq!(tree.get(tree.root()).stats.visits(), 1);

        // Sign alternates once per ply
        assert_eq!(tree.get(grandchild).stats.total_score(), 1.0);
        assert_eq!(tree.get(child).stats.total_score(), -1.0);
        assert_eq!(tree.get(tree.root()).stats.total_score(), 1.0);
    }

    #[test]
    fn test_select_prefers_unvisited() {
        let mut tree = tree_with_children(&[0, 1]);
        let first = tree.get(tree.root()).children[0];
        let second = tree.get(tree.root()).children[1];

        // Visit the first child with a perfect score; the second is still
        // unvisited, so its upper bound is infinite.
        tree.backpropagate(first, 1.0);

        let picked = tree.select_child(tree.root(), 1.0, &mut rng()).unwrap();
        assert_eq!(picked, second);
    }

    #[test]
    fn test_select_by_mean_without_exploration() {
        let mut tree = tree_with_children(&[0, 1]);
        let first = tree.get(tree.root()).children[0];
        let second = tree.get(tree.root()).children[1];

        tree.backpropagate(first, 1.0);
        tree.backpropagate(second, -1.0);

        let picked = tree.select_child(tree.root(), 0.0, &mut rng()).unwrap();
        assert_eq!(picked, first);
        let favorite = tree.favorite_child(tree.root(), 0.0, &mut rng()).unwrap();
        assert_eq!(favorite, first);
    }

    #[test]
    fn test_tie_break_is_uniform() {
        // Two unvisited children have identical value(0); over many picks
        // both must be chosen at roughly equal frequency.
        let tree = tree_with_children(&[0, 1]);
        let first = tree.get(tree.root()).children[0];
        let mut rng = rng();

        let trials = 1000;
        let mut first_count = 0;
        for _ in 0..trials {
            if tree.favorite_child(tree.root(), 0.0, &mut rng).unwrap() == first {
                first_count += 1;
            }
        }

        assert!(
            (400..=600).contains(&first_count),
            "tie-break is biased: {first_count}/{trials}"
        );
    }

    #[test]
    fn test_no_children_yields_none() {
        let tree: SearchTree<UctStats, u8> = SearchTree::new(UctStats::new());
        let mut rng = rng();

        assert!(tree.select_child(tree.root(), 1.0, &mut rng).is_none());
        assert!(tree.favorite_child(tree.root(), 0.0, &mut rng).is_none());
        assert!(tree.random_child(tree.root(), &mut rng).is_none());
    }
}
