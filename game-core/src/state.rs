//! The game-state capability interface consumed by the search engine.
//!
//! A game implements [`GameState`] with its own state, action, and player
//! types. The engine only ever enumerates legal actions, plays and undoes
//! moves on a borrowed state, and reads terminal scores; it knows nothing
//! about any concrete game.

use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

/// Interface an adversarial, turn-based game state exposes to a search.
///
/// # Contract
///
/// `play` and `undo` must be exact inverses: after `play(a)` followed by
/// `undo()`, every observable accessor returns what it returned before the
/// `play`. `score` is only defined once `is_terminal()` is true and follows
/// the zero-sum convention (same magnitude, opposite sign for the two sides
/// of a two-player game).
///
/// During a search the engine is the sole mutator of the state; callers
/// hand it over as `&mut` and get it back restored to its original value.
///
/// # Example
///
/// ```rust
/// use game_core::GameState;
///
/// /// Subtraction game: take 1 or 2 from a shared pile; taking the last
/// /// counter wins.
/// #[derive(Debug, Clone)]
/// struct Pile {
///     remaining: u32,
///     turn: u8,
///     history: Vec<u32>,
/// }
///
/// impl GameState for Pile {
///     type Action = u32;
///     type Player = u8;
///
///     fn legal_actions(&self) -> Vec<u32> {
///         (1..=self.remaining.min(2)).collect()
///     }
///
///     fn play(&mut self, action: &u32) {
///         self.remaining -= *action;
///         self.history.push(*action);
///         self.turn = 3 - self.turn;
///     }
///
///     fn undo(&mut self) {
///         if let Some(taken) = self.history.pop() {
///             self.remaining += taken;
///             self.turn = 3 - self.turn;
///         }
///     }
///
///     fn is_terminal(&self) -> bool {
///         self.remaining == 0
///     }
///
///     fn to_play(&self) -> u8 {
///         self.turn
///     }
///
///     fn score(&self, player: u8) -> f64 {
///         // The player who took the last counter is the one not to move.
///         if player == self.turn {
///             -1.0
///         } else {
///             1.0
///         }
///     }
/// }
///
/// let mut pile = Pile { remaining: 3, turn: 1, history: Vec::new() };
/// let before = pile.remaining;
/// let n = pile.with_played(&2, |p| p.legal_actions().len());
/// assert_eq!(n, 1);
/// assert_eq!(pile.remaining, before);
/// ```
pub trait GameState {
    /// A move in this game; stored on tree edges, never interpreted.
    type Action: Clone + Debug;

    /// Identifies one side of the game.
    type Player: Copy + Eq + Debug;

    /// The moves available from the current state, in a stable order.
    /// Empty once the state is terminal.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Apply `action` to the state in place. Must be paired with [`undo`]
    /// for exact restoration.
    ///
    /// [`undo`]: GameState::undo
    fn play(&mut self, action: &Self::Action);

    /// Revert the most recent [`play`], restoring the prior state exactly.
    ///
    /// [`play`]: GameState::play
    fn undo(&mut self);

    /// Whether the game is over in this state.
    fn is_terminal(&self) -> bool;

    /// The player whose turn it is.
    fn to_play(&self) -> Self::Player;

    /// Terminal outcome from `player`'s perspective. Only defined when
    /// [`is_terminal`] is true.
    ///
    /// [`is_terminal`]: GameState::is_terminal
    fn score(&self, player: Self::Player) -> f64;

    /// Play `action`, run `f` on the resulting state, then undo the action.
    ///
    /// The undo is guaranteed to run exactly once on every exit path,
    /// including unwinding out of `f`.
    fn with_played<R>(&mut self, action: &Self::Action, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        let mut played = Played::new(self, action);
        f(&mut *played)
    }
}

/// Guard for a trial move: plays the action on construction and undoes it
/// on drop.
///
/// Dereferences to the underlying state, so the guarded state can be
/// inspected (or recursed into) while the move is on the board.
pub struct Played<'a, G: GameState> {
    state: &'a mut G,
}

impl<'a, G: GameState> Played<'a, G> {
    pub fn new(state: &'a mut G, action: &G::Action) -> Self {
        state.play(action);
        Self { state }
    }
}

impl<G: GameState> Deref for Played<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.state
    }
}

impl<G: GameState> DerefMut for Played<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.state
    }
}

impl<G: GameState> Drop for Played<'_, G> {
    fn drop(&mut self) {
        self.state.undo();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal one-shot game for exercising the guard.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct OneShot {
        moves: Vec<u8>,
    }

    impl GameState for OneShot {
        type Action = u8;
        type Player = u8;

        fn legal_actions(&self) -> Vec<u8> {
            if self.moves.is_empty() {
                vec![7]
            } else {
                Vec::new()
            }
        }

        fn play(&mut self, action: &u8) {
            self.moves.push(*action);
        }

        fn undo(&mut self) {
            self.moves.pop();
        }

        fn is_terminal(&self) -> bool {
            !self.moves.is_empty()
        }

        fn to_play(&self) -> u8 {
            (self.moves.len() % 2) as u8 + 1
        }

        fn score(&self, player: u8) -> f64 {
            if player == 1 {
                1.0
            } else {
                -1.0
            }
        }
    }

    #[test]
    fn test_with_played_restores_state() {
        let mut game = OneShot { moves: Vec::new() };
        let before = game.clone();

        let terminal = game.with_played(&7, |g| g.is_terminal());

        assert!(terminal);
        assert_eq!(game, before);
    }

    #[test]
    fn test_with_played_sees_the_move() {
        let mut game = OneShot { moves: Vec::new() };

        game.with_played(&7, |g| {
            assert_eq!(g.moves, vec![7]);
            assert!(g.legal_actions().is_empty());
        });

        assert!(game.moves.is_empty());
    }

    #[test]
    fn test_guard_undoes_on_unwind() {
        let mut game = OneShot { moves: Vec::new() };

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _played = Played::new(&mut game, &7);
            panic!("boom");
        }));

        assert!(result.is_err());
        assert!(game.moves.is_empty());
    }
}
