#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use container::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod container;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Shuffle the shelf order once at creation. Labels keep their contents.
    #[serde(default)]
    pub shuffle_positions: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The hint box was opened and this fruit was pulled out of it.
    FirstOpened(Fruit),
    Revealed,
    /// The last closed box was revealed; the verdict is now available.
    AllOpened,
}

impl OpenOutcome {
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::AllOpened)
    }
}
