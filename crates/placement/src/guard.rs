//! Single-writer guards per (vertical, kind).
//!
//! The store has no multi-key transactions, so every read-scan-write
//! sequence that touches a board (index append, slot assignment, reorder,
//! soft delete, cache rebuild) holds that board's guard for its whole
//! duration. Readers never take it.
//!
//! Guards are in-process: two processes sharing one store are not
//! serialized against each other.

use showcase_core::vertical::{Kind, Vertical};
use tokio::sync::{Mutex, MutexGuard};

const BOARD_COUNT: usize = Vertical::ALL.len() * Kind::ALL.len();

/// One async mutex per (vertical, kind) board.
pub struct WriteGuards {
    boards: [Mutex<()>; BOARD_COUNT],
}

impl WriteGuards {
    pub fn new() -> Self {
        Self {
            boards: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    /// Wait until no other writer holds the board, then hold it until the
    /// returned guard is dropped.
    pub async fn acquire(&self, vertical: Vertical, kind: Kind) -> MutexGuard<'_, ()> {
        self.boards[board_index(vertical, kind)].lock().await
    }

    /// `true` if a writer currently holds the board.
    pub fn is_held(&self, vertical: Vertical, kind: Kind) -> bool {
        self.boards[board_index(vertical, kind)].try_lock().is_err()
    }
}

impl Default for WriteGuards {
    fn default() -> Self {
        Self::new()
    }
}

fn board_index(vertical: Vertical, kind: Kind) -> usize {
    vertical as usize * Kind::ALL.len() + kind as usize
}
