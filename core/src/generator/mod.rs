use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// The three boxes in shelf order.
pub type Shelf = [Container; BOX_COUNT];

pub trait ShelfGenerator {
    fn generate(self, config: GameConfig) -> Shelf;
}

/// One of the two ways to fill the boxes so that every label is wrong.
///
/// These are the only derangements of three items, which is what makes the puzzle solvable from a single draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arrangement {
    /// Apples → oranges, mixed → apples, oranges → mixed.
    ShiftBackward,
    /// Apples → mixed, mixed → oranges, oranges → apples.
    ShiftForward,
}

impl Arrangement {
    pub const ALL: [Self; 2] = [Self::ShiftBackward, Self::ShiftForward];

    pub fn random<R: RandomSource + ?Sized>(source: &mut R) -> Self {
        if source.coin_flip() {
            Self::ShiftBackward
        } else {
            Self::ShiftForward
        }
    }

    /// What a box carrying `label` actually holds.
    pub const fn content_for(self, label: Contents) -> Contents {
        let offset = match self {
            Self::ShiftBackward => BOX_COUNT - 1,
            Self::ShiftForward => 1,
        };
        Contents::ALL[(label.ordinal() + offset) % BOX_COUNT]
    }

    /// Which arrangement produced the given `(label, content)` pairs, if any.
    pub fn detect(pairs: impl IntoIterator<Item = (Contents, Contents)>) -> Option<Self> {
        let mut candidates = Self::ALL.map(Some);
        for (label, content) in pairs {
            for candidate in candidates.iter_mut() {
                if candidate.is_some_and(|arrangement| arrangement.content_for(label) != content) {
                    *candidate = None;
                }
            }
        }
        candidates.into_iter().flatten().next()
    }

    /// Boxes in canonical label order, all closed.
    pub fn shelf(self) -> Shelf {
        Contents::ALL.map(|label| Container::closed(label, self.content_for(label)))
    }
}

/// Picks an arrangement and, when configured, a shelf order from a [`RandomSource`].
#[derive(Debug)]
pub struct RandomShelfGenerator<'a, R: RandomSource + ?Sized> {
    source: &'a mut R,
}

impl<'a, R: RandomSource + ?Sized> RandomShelfGenerator<'a, R> {
    pub fn new(source: &'a mut R) -> Self {
        Self { source }
    }
}

impl<R: RandomSource + ?Sized> ShelfGenerator for RandomShelfGenerator<'_, R> {
    fn generate(self, config: GameConfig) -> Shelf {
        let arrangement = Arrangement::random(&mut *self.source);
        let mut shelf = arrangement.shelf();

        if config.shuffle_positions {
            for i in (1..shelf.len()).rev() {
                let j = self.source.next_index(i + 1);
                shelf.swap(i, j);
            }
        }

        log::debug!("generated shelf with {:?}", arrangement);
        shelf
    }
}
