//! Search configuration parameters.

/// Configuration for the search engine and agent.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Exploration constant for the UCB1 formula.
    /// Higher values favor under-visited nodes during selection; zero is
    /// pure exploitation.
    pub exploration: f64,

    /// Default iteration cap used by the agent facade.
    /// `None` leaves the iteration dimension unbounded, to be resolved by
    /// a caller-supplied time limit instead.
    pub iterations: Option<u64>,

    /// RNG seed for reproducible searches. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: 1.0,
            iterations: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Deterministic, small-budget preset for tests.
    pub fn for_testing() -> Self {
        Self {
            exploration: 1.0,
            iterations: Some(64),
            seed: Some(42),
        }
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Builder pattern: set the default iteration cap.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
