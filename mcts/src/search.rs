//! Search engine implementation.
//!
//! Implements the core MCTS loop under a time/iteration budget:
//! 1. Selection: traverse the tree by upper confidence bound
//! 2. Expansion: add children to the first unexpanded leaf
//! 3. Simulation: random roll-out to a terminal state
//! 4. Back-propagation: update statistics along the path
//!
//! The caller's game state is played on directly during selection and
//! roll-out and is restored exactly (via undo) before each iteration ends,
//! so the caller gets the state back unchanged.

use std::time::{Duration, Instant};

use game_core::GameState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::budget::{Budget, BudgetClock};
use crate::config::SearchConfig;
use crate::stats::{NodeFactory, NodeStats, UctFactory};
use crate::tree::SearchTree;

/// Errors that can occur when configuring a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Neither a time nor an iteration budget was given; the search would
    /// never terminate.
    #[error("unbounded search: a time or iteration budget is required")]
    UnboundedSearch,
}

/// Summary of one `search` call.
#[derive(Debug, Clone, Copy)]
pub struct SearchStats {
    /// Simulations completed within budget.
    pub iterations: u64,

    /// Total nodes in the search tree.
    pub nodes: usize,

    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// How a single iteration ended.
enum IterationEnd {
    Completed,
    TimeUp,
}

/// Monte Carlo Tree Search engine.
///
/// Owns the search tree it builds (fresh per `search` call) and the RNG
/// used for tie-breaking and roll-outs. Generic over the game and over the
/// node-statistics factory; the default factory produces UCB1 statistics.
pub struct SearchEngine<G: GameState, F: NodeFactory = UctFactory> {
    config: SearchConfig,
    factory: F,
    rng: ChaCha20Rng,
    root: Option<SearchTree<F::Stats, G::Action>>,
}

impl<G: GameState> SearchEngine<G, UctFactory> {
    /// Create an engine with the default UCB1 statistics.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_factory(config, UctFactory)
    }
}

impl<G: GameState, F: NodeFactory> SearchEngine<G, F> {
    /// Create an engine with a custom node-statistics factory.
    pub fn with_factory(config: SearchConfig, factory: F) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self {
            config,
            factory,
            rng,
            root: None,
        }
    }

    /// The current search tree, if any (for inspection and tests).
    pub fn tree(&self) -> Option<&SearchTree<F::Stats, G::Action>> {
        self.root.as_ref()
    }

    /// Run MCTS from `state` until the budget is exhausted.
    ///
    /// Builds a fresh tree, expands the root, then repeats
    /// selection/expansion/simulation/back-propagation. `state` is mutated
    /// during the search and restored exactly before every iteration ends.
    ///
    /// Searching a terminal state is a no-op, not an error. An unbounded
    /// budget in both dimensions is rejected up front.
    pub fn search(&mut self, state: &mut G, budget: Budget) -> Result<SearchStats, SearchError> {
        if budget.is_unbounded() {
            return Err(SearchError::UnboundedSearch);
        }

        let started = Instant::now();
        if state.is_terminal() {
            // Nothing to search; any previous tree is left alone.
            return Ok(SearchStats {
                iterations: 0,
                nodes: 0,
                elapsed: started.elapsed(),
            });
        }

        let mut tree = SearchTree::new(self.factory.new_stats());
        tree.expand(tree.root(), state.legal_actions(), || {
            self.factory.new_stats()
        });

        let mut clock = BudgetClock::start(&budget);
        let mut iterations = 0u64;

        while clock.iterations_remaining() {
            match self.run_iteration(&mut tree, state, &clock) {
                IterationEnd::Completed => {
                    clock.complete_iteration();
                    iterations += 1;
                }
                IterationEnd::TimeUp => break,
            }
        }

        let stats = SearchStats {
            iterations,
            nodes: tree.len(),
            elapsed: started.elapsed(),
        };
        debug!(
            iterations = stats.iterations,
            nodes = stats.nodes,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "search complete"
        );

        self.root = Some(tree);
        Ok(stats)
    }

    /// Search, then return the action of the root's favorite child under
    /// the exploitation-only estimate (plain average score).
    ///
    /// Returns `Ok(None)` when `state` is terminal: there is nothing to
    /// pick, and that is a degenerate input rather than an error.
    pub fn good_action(
        &mut self,
        state: &mut G,
        budget: Budget,
    ) -> Result<Option<G::Action>, SearchError> {
        self.search(state, budget)?;

        if state.is_terminal() {
            return Ok(None);
        }
        let Some(tree) = self.root.as_ref() else {
            return Ok(None);
        };

        let choice = tree.favorite_child(tree.root(), 0.0, &mut self.rng);
        Ok(choice.and_then(|id| tree.get(id).action.clone()))
    }

    /// Discard the current search tree.
    pub fn reset(&mut self) {
        self.root = None;
    }

    /// One pass of selection, expansion, simulation and back-propagation.
    ///
    /// Descends from the root by upper confidence bound, playing each
    /// chosen action on `state`, until it reaches an unvisited child or a
    /// true leaf. A non-terminal leaf is expanded and one random new child
    /// is stepped into. The roll-out score is taken from the perspective
    /// of the player whose move led into the simulated node, then
    /// back-propagated with alternating sign. `state` is restored exactly
    /// before returning.
    ///
    /// Running out of time mid-selection aborts only this iteration: its
    /// moves are undone and nothing is recorded.
    fn run_iteration(
        &mut self,
        tree: &mut SearchTree<F::Stats, G::Action>,
        state: &mut G,
        clock: &BudgetClock,
    ) -> IterationEnd {
        let mut node = tree.root();
        let mut depth = 0usize;
        let mut perspective = state.to_play();

        loop {
            if !clock.time_remaining() {
                undo_all(state, depth);
                return IterationEnd::TimeUp;
            }

            if tree.get(node).is_leaf() {
                // A true leaf: expand unless terminal, then step into one
                // random new child before simulating.
                if !state.is_terminal() {
                    tree.expand(node, state.legal_actions(), || self.factory.new_stats());
                    if let Some(child) = tree.random_child(node, &mut self.rng) {
                        perspective = state.to_play();
                        if let Some(action) = tree.get(child).action.clone() {
                            state.play(&action);
                            depth += 1;
                        }
                        node = child;
                    }
                }
                break;
            }

            let Some(child) = tree.select_child(node, self.config.exploration, &mut self.rng)
            else {
                break;
            };
            perspective = state.to_play();
            if let Some(action) = tree.get(child).action.clone() {
                state.play(&action);
                depth += 1;
            }
            node = child;

            // An unvisited child is simulated before anything below it is
            // explored.
            if tree.get(node).stats.visits() == 0 {
                break;
            }
        }

        let score = roll_out(state, perspective, &mut self.rng);
        tree.backpropagate(node, score);
        undo_all(state, depth);

        trace!(depth, score, "simulation complete");
        IterationEnd::Completed
    }
}

/// Random play-out to a terminal state, scored from `perspective`.
///
/// An explicit loop with counted undos rather than recursion, so game
/// length bounds memory instead of stack depth; the state is handed back
/// exactly as it came in.
fn roll_out<G: GameState>(state: &mut G, perspective: G::Player, rng: &mut ChaCha20Rng) -> f64 {
    let mut depth = 0usize;

    while !state.is_terminal() {
        let actions = state.legal_actions();
        debug_assert!(!actions.is_empty(), "non-terminal state with no actions");
        let idx = rng.gen_range(0..actions.len());
        state.play(&actions[idx]);
        depth += 1;
    }

    let score = state.score(perspective);
    undo_all(state, depth);
    score
}

fn undo_all<G: GameState>(state: &mut G, count: usize) {
    for _ in 0..count {
        state.undo();
    }
}
