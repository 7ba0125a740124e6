//! Monte Carlo Tree Search (MCTS) decision engine.
//!
//! This crate provides a game-agnostic MCTS implementation that works with
//! any game implementing the `game-core` `GameState` trait.
//!
//! # Overview
//!
//! MCTS builds a search tree by running simulations under a time or
//! iteration budget. Each simulation consists of four phases:
//!
//! 1. **Selection**: Traverse the tree by upper confidence bound (UCB1) to
//!    balance exploration and exploitation
//! 2. **Expansion**: When reaching a leaf, expand it by adding one child
//!    per legal action
//! 3. **Simulation**: Play uniformly random moves to a terminal state and
//!    read off its score
//! 4. **Back-propagation**: Update visit counts and score sums along the
//!    path from the simulated node back to the root, negating the score at
//!    each ply (zero-sum convention)
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::TicTacToe;
//! use mcts::{Budget, SearchConfig, SearchEngine};
//!
//! let mut state = TicTacToe::new();
//! let mut engine = SearchEngine::new(SearchConfig::for_testing());
//!
//! let action = engine
//!     .good_action(&mut state, Budget::iterations(128))
//!     .unwrap();
//! assert!(action.is_some());
//! ```
//!
//! # Configuration
//!
//! The [`SearchConfig`] struct controls search behavior:
//!
//! - `exploration`: UCB1 exploration constant (default: 1.0)
//! - `iterations`: default iteration cap used by the [`SearchAgent`] facade
//! - `seed`: RNG seed for reproducible searches
//!
//! # Node statistics
//!
//! Per-node bookkeeping lives behind the [`NodeStats`] capability, produced
//! by a [`NodeFactory`]. The default [`UctStats`] implements the UCB1
//! bounds; alternative bound formulas can be substituted without touching
//! the engine.

pub mod agent;
pub mod budget;
pub mod config;
pub mod node;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use agent::SearchAgent;
pub use budget::Budget;
pub use config::SearchConfig;
pub use node::{NodeId, SearchNode};
pub use search::{SearchEngine, SearchError, SearchStats};
pub use stats::{NodeFactory, NodeStats, UctFactory, UctStats};
pub use tree::SearchTree;
