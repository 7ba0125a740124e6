//! One-call-per-turn agent facade.
//!
//! `SearchAgent` pins a reusable configuration (exploration constant,
//! iteration budget, node-statistics factory) behind a single
//! `select_action` entry point suitable for a driving game loop. It adds
//! no algorithm of its own.

use std::time::Duration;

use game_core::GameState;

use crate::budget::Budget;
use crate::config::SearchConfig;
use crate::search::{SearchEngine, SearchError};
use crate::stats::{NodeFactory, UctFactory};

/// Agent binding a fixed iteration budget to an owned search engine.
pub struct SearchAgent<G: GameState, F: NodeFactory = UctFactory> {
    engine: SearchEngine<G, F>,
    iterations: Option<u64>,
}

impl<G: GameState> SearchAgent<G, UctFactory> {
    /// Create an agent with the default UCB1 statistics. The config's
    /// `iterations` becomes this agent's fixed per-turn budget.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_factory(config, UctFactory)
    }
}

impl<G: GameState, F: NodeFactory> SearchAgent<G, F> {
    /// Create an agent with a custom node-statistics factory.
    pub fn with_factory(config: SearchConfig, factory: F) -> Self {
        let iterations = config.iterations;
        Self {
            engine: SearchEngine::with_factory(config, factory),
            iterations,
        }
    }

    /// Search under this agent's iteration budget plus the caller's time
    /// limit, and return an action.
    ///
    /// Returns `Ok(None)` when `state` is terminal. If the agent was
    /// configured without an iteration budget and no time limit is given,
    /// this surfaces the engine's unbounded-search error.
    pub fn select_action(
        &mut self,
        state: &mut G,
        time_limit: Option<Duration>,
    ) -> Result<Option<G::Action>, SearchError> {
        self.engine
            .good_action(state, Budget::new(time_limit, self.iterations))
    }

    /// Discard the engine's current search tree.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// The underlying engine (for inspection and tests).
    pub fn engine(&self) -> &SearchEngine<G, F> {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::TicTacToe;

    #[test]
    fn test_select_action_returns_a_legal_move() {
        let mut state = TicTacToe::from_moves(&[4]);
        let mut agent = SearchAgent::new(SearchConfig::for_testing());

        let action = agent.select_action(&mut state, None).unwrap().unwrap();
        assert!(state.legal_actions().contains(&action));

        // The caller's state came back untouched.
        assert_eq!(state, TicTacToe::from_moves(&[4]));
    }

    #[test]
    fn test_unbounded_agent_requires_a_time_limit() {
        let mut state = TicTacToe::new();
        let mut agent: SearchAgent<TicTacToe> =
            SearchAgent::new(SearchConfig::default().with_seed(42));

        let result = agent.select_action(&mut state, None);
        assert!(matches!(result, Err(SearchError::UnboundedSearch)));

        let action = agent
            .select_action(&mut state, Some(Duration::from_millis(10)))
            .unwrap();
        assert!(action.is_some());
    }

    #[test]
    fn test_terminal_state_yields_no_action() {
        let mut state = TicTacToe::from_moves(&[0, 3, 1, 4, 2]);
        let mut agent = SearchAgent::new(SearchConfig::for_testing());

        let action = agent.select_action(&mut state, None).unwrap();
        assert!(action.is_none());
    }

    #[test]
    fn test_reset_clears_the_tree() {
        let mut state = TicTacToe::new();
        let mut agent = SearchAgent::new(SearchConfig::for_testing());

        agent.select_action(&mut state, None).unwrap();
        assert!(agent.engine().tree().is_some());

        agent.reset();
        assert!(agent.engine().tree().is_none());
    }

    #[test]
    fn test_agent_can_play_a_full_game() {
        let mut state = TicTacToe::new();
        let mut agent = SearchAgent::new(SearchConfig::for_testing());

        while let Some(action) = agent.select_action(&mut state, None).unwrap() {
            state.play(&action);
        }
        assert!(state.is_terminal());
    }
}
