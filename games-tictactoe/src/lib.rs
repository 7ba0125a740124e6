//! TicTacToe reference implementation of the `game-core` state interface
//!
//! This crate provides a complete reference implementation of TicTacToe
//! demonstrating how to implement the `GameState` trait for the search
//! engine: legal-move enumeration, in-place `play` with a move-history
//! stack so `undo` is an exact inverse, and zero-sum terminal scoring.
//!
//! # Usage
//!
//! ```rust
//! use game_core::GameState;
//! use games_tictactoe::TicTacToe;
//!
//! let mut state = TicTacToe::new();
//! assert_eq!(state.legal_actions().len(), 9);
//!
//! state.play(&4); // X takes the center
//! assert_eq!(state.legal_actions().len(), 8);
//!
//! state.undo();
//! assert_eq!(state, TicTacToe::new());
//! ```

use game_core::game_utils::zero_sum_score;
use game_core::GameState;

/// Cell/player code for X (moves first).
pub const PLAYER_X: u8 = 1;
/// Cell/player code for O.
pub const PLAYER_O: u8 = 2;
/// Winner code for a drawn game.
pub const DRAW: u8 = 3;

/// TicTacToe game state.
///
/// Holds the board, whose turn it is, the winner indicator, and the move
/// history that makes `undo` exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
    /// Positions played so far, in order.
    history: Vec<u8>,
}

impl TicTacToe {
    /// Create a new initial game state.
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: PLAYER_X, // X goes first
            winner: 0,
            history: Vec::new(),
        }
    }

    /// Build a state by playing `moves` from the initial position.
    pub fn from_moves(moves: &[u8]) -> Self {
        let mut state = Self::new();
        for pos in moves {
            state.play(pos);
        }
        state
    }

    /// Current board contents.
    pub fn board(&self) -> &[u8; 9] {
        &self.board
    }

    /// Winner indicator: 0=ongoing, 1=X, 2=O, 3=draw.
    pub fn winner(&self) -> u8 {
        self.winner
    }

    /// Check for a winner on the board.
    fn check_winner(board: &[u8; 9]) -> u8 {
        // Winning positions (rows, columns, diagonals)
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ];

        for line in &LINES {
            let first = board[line[0]];
            if first != 0 && first == board[line[1]] && first == board[line[2]] {
                return first;
            }
        }

        if board.iter().all(|&cell| cell != 0) {
            DRAW
        } else {
            0
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Action = u8;
    type Player = u8;

    fn legal_actions(&self) -> Vec<u8> {
        if self.winner != 0 {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    fn play(&mut self, action: &u8) {
        let pos = *action as usize;
        debug_assert!(self.winner == 0 && pos < 9 && self.board[pos] == 0);

        self.board[pos] = self.current_player;
        self.history.push(*action);
        self.winner = Self::check_winner(&self.board);
        // The turn passes even on the final move; `score` does not depend
        // on whose turn it is.
        self.current_player = 3 - self.current_player;
    }

    fn undo(&mut self) {
        let Some(pos) = self.history.pop() else {
            return;
        };
        self.current_player = self.board[pos as usize];
        self.board[pos as usize] = 0;
        self.winner = 0;
    }

    fn is_terminal(&self) -> bool {
        self.winner != 0
    }

    fn to_play(&self) -> u8 {
        self.current_player
    }

    fn score(&self, player: u8) -> f64 {
        zero_sum_score(self.winner, player)
    }
}
