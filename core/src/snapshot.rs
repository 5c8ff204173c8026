use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Plain structural copy of an engine, the shape handed to storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub first_opened_index: Option<BoxIndex>,
    pub containers: Vec<Container>,
}

impl Snapshot {
    pub fn from_engine(engine: &PuzzleEngine) -> Self {
        Self {
            first_opened_index: engine.first_opened_index(),
            containers: engine.containers().to_vec(),
        }
    }

    /// Checks that the snapshot could have been produced by playing a game.
    pub fn validate(&self) -> Result<()> {
        let shelf = self.shelf()?;

        let mut seen = [false; BOX_COUNT];
        for container in &shelf {
            let slot = &mut seen[container.label().ordinal()];
            if *slot {
                return Err(GameError::InvalidSnapshot);
            }
            *slot = true;
        }

        if Arrangement::detect(shelf.iter().map(|c| (c.label(), c.content()))).is_none() {
            return Err(GameError::InvalidSnapshot);
        }

        match self.first_opened_index {
            None => validate_untouched(&shelf),
            Some(first) => validate_started(&shelf, first),
        }
    }

    fn shelf(&self) -> Result<Shelf> {
        <Shelf>::try_from(self.containers.as_slice()).map_err(|_| GameError::InvalidSnapshot)
    }
}

fn validate_untouched(shelf: &Shelf) -> Result<()> {
    let untouched = shelf
        .iter()
        .all(|c| !c.is_open() && c.prediction().is_none() && c.took().is_none());
    if untouched {
        Ok(())
    } else {
        Err(GameError::InvalidSnapshot)
    }
}

fn validate_started(shelf: &Shelf, first: BoxIndex) -> Result<()> {
    let hint = shelf.get(first).ok_or(GameError::InvalidSnapshot)?;
    if !hint.is_open() || hint.prediction().is_some() {
        return Err(GameError::InvalidSnapshot);
    }

    let all_open = shelf.iter().all(Container::is_open);
    let took_consistent = match (hint.took(), hint.content().pure_fruit()) {
        (None, _) => all_open,
        (Some(_), _) if all_open => false,
        (Some(took), Some(fruit)) => took == fruit,
        (Some(_), None) => true,
    };
    if !took_consistent {
        return Err(GameError::InvalidSnapshot);
    }

    let revealed_any = shelf.iter().filter(|c| c.is_open()).count() > 1;
    for (index, container) in shelf.iter().enumerate() {
        if index == first {
            continue;
        }
        if container.took().is_some() {
            return Err(GameError::InvalidSnapshot);
        }
        if (container.is_open() || revealed_any) && !container.is_predicted() {
            return Err(GameError::InvalidSnapshot);
        }
    }

    Ok(())
}

impl From<PuzzleEngine> for Snapshot {
    fn from(engine: PuzzleEngine) -> Self {
        Self::from_engine(&engine)
    }
}

impl TryFrom<Snapshot> for PuzzleEngine {
    type Error = GameError;

    fn try_from(snapshot: Snapshot) -> Result<Self> {
        snapshot.validate()?;
        let shelf = snapshot.shelf()?;
        Ok(PuzzleEngine::from_parts(shelf, snapshot.first_opened_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Contents::*;

    fn round_trip(engine: &PuzzleEngine) -> PuzzleEngine {
        let json = serde_json::to_string(engine).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    fn played_to_end(last_guess: Contents) -> PuzzleEngine {
        let mut engine = PuzzleEngine::new(Arrangement::ShiftForward.shelf());
        let mut source = ScriptedSource::coin_flips(&[true]);
        engine.open(0, &mut source).unwrap();
        engine.set_prediction(1, Oranges).unwrap();
        engine.set_prediction(2, last_guess).unwrap();
        engine.open(1, &mut source).unwrap();
        engine.open(2, &mut source).unwrap();
        engine
    }

    #[test]
    fn round_trip_preserves_every_phase() {
        let mut source = ScriptedSource::coin_flips(&[false, true]);
        let mut engine = PuzzleEngine::generate(GameConfig::default(), &mut source);
        assert_eq!(round_trip(&engine), engine);

        engine.open(1, &mut source).unwrap();
        assert_eq!(round_trip(&engine), engine);

        engine.set_prediction(0, Mixed).unwrap();
        engine.set_prediction(2, Apples).unwrap();
        assert_eq!(round_trip(&engine), engine);

        engine.open(2, &mut source).unwrap();
        assert_eq!(round_trip(&engine), engine);
    }

    #[test]
    fn round_trip_preserves_shuffled_shelf() {
        let config = GameConfig {
            shuffle_positions: true,
        };
        let mut source = ScriptedSource::new([ScriptedSource::TAILS, 0.0, 0.0]);
        let mut engine = PuzzleEngine::generate(config, &mut source);
        let labels: Vec<Contents> = engine.containers().iter().map(|c| c.label()).collect();
        assert_eq!(labels, [Mixed, Oranges, Apples]);
        assert_eq!(round_trip(&engine), engine);

        engine.open(2, &mut source).unwrap();
        engine.set_prediction(0, Oranges).unwrap();
        engine.set_prediction(1, Apples).unwrap();
        assert_eq!(round_trip(&engine), engine);

        engine.open(0, &mut source).unwrap();
        engine.open(1, &mut source).unwrap();

        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(round_trip(&engine), engine);
    }

    #[test]
    fn round_trip_preserves_terminal_states() {
        let won = played_to_end(Apples);
        let lost = played_to_end(Mixed);

        assert_eq!(round_trip(&won).state(), EngineState::Won);
        assert_eq!(round_trip(&lost).state(), EngineState::Lost);
        assert_eq!(round_trip(&lost), lost);
    }

    #[test]
    fn serialized_shape_uses_first_opened_index_and_containers() {
        let mut engine = PuzzleEngine::new(Arrangement::ShiftBackward.shelf());
        engine.open(1, &mut ScriptedSource::coin_flips(&[true])).unwrap();

        let json = serde_json::to_value(&engine).unwrap();

        assert_eq!(json["firstOpenedIndex"], 1);
        assert_eq!(json["containers"][1]["label"], "mixed");
        assert_eq!(json["containers"][1]["content"], "apples");
        assert_eq!(json["containers"][1]["took"], "apple");
        assert_eq!(json["containers"][0]["isOpen"], false);
    }

    #[test]
    fn rejects_wrong_container_count() {
        let mut snapshot = PuzzleEngine::new(Arrangement::ShiftForward.shelf()).snapshot();
        snapshot.containers.pop();

        assert_eq!(snapshot.validate(), Err(GameError::InvalidSnapshot));
    }

    #[test]
    fn rejects_contents_outside_both_arrangements() {
        let snapshot = Snapshot {
            first_opened_index: None,
            containers: Contents::ALL
                .iter()
                .map(|&label| Container::closed(label, label))
                .collect(),
        };
        let json = serde_json::to_string(&snapshot).unwrap();

        let result = serde_json::from_str::<PuzzleEngine>(&json);

        assert!(result.is_err());
        assert_eq!(PuzzleEngine::try_from(snapshot), Err(GameError::InvalidSnapshot));
    }

    #[test]
    fn rejects_duplicate_labels() {
        let mut snapshot = PuzzleEngine::new(Arrangement::ShiftForward.shelf()).snapshot();
        snapshot.containers[2] = snapshot.containers[0];

        assert_eq!(snapshot.validate(), Err(GameError::InvalidSnapshot));
    }

    #[test]
    fn rejects_reveal_without_prediction() {
        let mut engine = PuzzleEngine::new(Arrangement::ShiftForward.shelf());
        engine.open(0, &mut ScriptedSource::coin_flips(&[true])).unwrap();
        let mut snapshot = engine.snapshot();
        snapshot.containers[1].open();

        assert_eq!(snapshot.validate(), Err(GameError::InvalidSnapshot));
    }

    #[test]
    fn rejects_open_boxes_without_first_index() {
        let mut snapshot = PuzzleEngine::new(Arrangement::ShiftForward.shelf()).snapshot();
        snapshot.containers[0].open();

        assert_eq!(snapshot.validate(), Err(GameError::InvalidSnapshot));
    }
}
