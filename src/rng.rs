//! Piece selection: a seam for choosing the next catalog index, plus the uniform default.

use std::time::{SystemTime, UNIX_EPOCH};

/// Picks the catalog index of the next piece to spawn.
pub trait PieceSource {
    /// Returns an index in `0..count`. `count` is never 0.
    fn next_index(&mut self, count: usize) -> usize;
}

/// Uniform choice over the catalog driven by a small LCG (no bag, no history).
#[derive(Debug, Clone)]
pub struct RandomPieces {
    state: u32,
}

impl RandomPieces {
    pub fn new(seed: u64) -> Self {
        let folded = (seed ^ (seed >> 32)) as u32;
        Self {
            state: if folded == 0 { 0x1234_5678 } else { folded },
        }
    }

    /// Seeded from the wall clock.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos)
    }

    fn next_rand(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        self.state >> 16
    }
}

impl PieceSource for RandomPieces {
    fn next_index(&mut self, count: usize) -> usize {
        (self.next_rand() as usize) % count.max(1)
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_index(&mut self, count: usize) -> usize {
        (**self).next_index(count)
    }
}
