use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    FirstOpened,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Three mislabeled boxes and the open, predict, reveal protocol played on them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Snapshot", try_from = "Snapshot")]
pub struct PuzzleEngine {
    shelf: Shelf,
    first_opened: Option<BoxIndex>,
}

impl PuzzleEngine {
    pub fn new(shelf: Shelf) -> Self {
        Self {
            shelf,
            first_opened: None,
        }
    }

    /// Fresh game with contents drawn from `source`.
    pub fn generate<R: RandomSource + ?Sized>(config: GameConfig, source: &mut R) -> Self {
        Self::new(RandomShelfGenerator::new(source).generate(config))
    }

    pub(crate) fn from_parts(shelf: Shelf, first_opened: Option<BoxIndex>) -> Self {
        Self {
            shelf,
            first_opened,
        }
    }

    pub fn state(&self) -> EngineState {
        match self.verdict() {
            Some(true) => EngineState::Won,
            Some(false) => EngineState::Lost,
            None if self.first_opened.is_some() => EngineState::FirstOpened,
            None => EngineState::Ready,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn first_opened_index(&self) -> Option<BoxIndex> {
        self.first_opened
    }

    pub fn containers(&self) -> &[Container] {
        &self.shelf
    }

    pub fn container(&self, index: BoxIndex) -> Result<Container> {
        self.shelf.get(index).copied().ok_or(GameError::InvalidIndex)
    }

    pub fn open_count(&self) -> usize {
        self.shelf.iter().filter(|c| c.is_open()).count()
    }

    pub fn all_open(&self) -> bool {
        self.shelf.iter().all(|c| c.is_open())
    }

    /// Whether every closed box carries a prediction, so the next reveal is allowed.
    pub fn is_ready_to_reveal(&self) -> bool {
        self.first_opened.is_some()
            && self
                .shelf
                .iter()
                .filter(|c| !c.is_open())
                .all(Container::is_predicted)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    /// Opens the first box if none is open yet, otherwise reveals `index`.
    pub fn open<R: RandomSource + ?Sized>(
        &mut self,
        index: BoxIndex,
        source: &mut R,
    ) -> Result<OpenOutcome> {
        if self.first_opened.is_none() {
            self.open_first(index, source)
        } else {
            self.reveal(index)
        }
    }

    /// Opens the hint box and pulls one fruit out of it.
    pub fn open_first<R: RandomSource + ?Sized>(
        &mut self,
        index: BoxIndex,
        source: &mut R,
    ) -> Result<OpenOutcome> {
        let index = self.validate_index(index)?;
        if self.first_opened.is_some() {
            return Err(GameError::AlreadyOpenedFirst);
        }

        let container = &mut self.shelf[index];
        let took = match container.content().pure_fruit() {
            Some(fruit) => fruit,
            None if source.coin_flip() => Fruit::Apple,
            None => Fruit::Orange,
        };
        container.set_took(Some(took));
        container.open();
        self.first_opened = Some(index);

        log::debug!("opened box {} first, took {}", index, took);
        Ok(OpenOutcome::FirstOpened(took))
    }

    /// Opens one of the predicted boxes.
    pub fn reveal(&mut self, index: BoxIndex) -> Result<OpenOutcome> {
        let index = self.validate_index(index)?;
        let Some(first) = self.first_opened else {
            return Err(GameError::NoFirstOpenYet);
        };
        if self.shelf[index].is_open() {
            return Err(GameError::AlreadyOpen);
        }
        if !self.is_ready_to_reveal() {
            return Err(GameError::IncompleteOpenOrdering);
        }

        self.shelf[index].open();
        log::trace!("revealed box {}", index);

        if self.all_open() {
            self.shelf[first].set_took(None);
            Ok(OpenOutcome::AllOpened)
        } else {
            Ok(OpenOutcome::Revealed)
        }
    }

    /// Records a guess for a closed box. Guesses may be changed until the first reveal.
    pub fn set_prediction(&mut self, index: BoxIndex, prediction: Contents) -> Result<()> {
        let index = self.validate_index(index)?;
        let Some(first) = self.first_opened else {
            return Err(GameError::NoFirstOpenYet);
        };
        if index == first {
            return Err(GameError::PredictingRevealedContainer);
        }
        if self.open_count() != 1 {
            return Err(GameError::IncompleteOpenOrdering);
        }

        self.shelf[index].set_prediction(prediction);
        log::trace!("predicted box {} holds {}", index, prediction);
        Ok(())
    }

    /// True when every box other than the first one was predicted correctly.
    pub fn check_win(&self) -> bool {
        self.shelf
            .iter()
            .enumerate()
            .filter(|&(index, _)| Some(index) != self.first_opened)
            .all(|(_, container)| container.prediction_matches())
    }

    /// Final result once every box is open, `None` before that.
    pub fn verdict(&self) -> Option<bool> {
        if self.all_open() {
            Some(self.check_win())
        } else {
            None
        }
    }

    fn validate_index(&self, index: BoxIndex) -> Result<BoxIndex> {
        if index < self.shelf.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }
}
