use mislabeled_core as game;
use serde::{Deserialize, Serialize};

use crate::storage::StorageKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SessionStatus {
    Playing,
    Won,
    Lost,
}

impl SessionStatus {
    pub(crate) const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    fn from_verdict(won: bool) -> Self {
        if won { Self::Won } else { Self::Lost }
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ActionOutcome {
    /// The session is over, nothing was attempted.
    Ignored,
    Opened(game::OpenOutcome),
    Predicted,
}

/// A game plus what the player side has concluded about it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GameSession {
    #[serde(rename = "game")]
    engine: game::PuzzleEngine,
    #[serde(default)]
    status: SessionStatus,
}

impl GameSession {
    pub(crate) fn new(engine: game::PuzzleEngine) -> Self {
        Self {
            engine,
            status: SessionStatus::Playing,
        }
    }

    pub(crate) fn generate<R: game::RandomSource + ?Sized>(
        config: game::GameConfig,
        source: &mut R,
    ) -> Self {
        Self::new(game::PuzzleEngine::generate(config, source))
    }

    pub(crate) fn engine(&self) -> &game::PuzzleEngine {
        &self.engine
    }

    pub(crate) fn status(&self) -> SessionStatus {
        self.status
    }

    pub(crate) fn snapshot(&self) -> game::Snapshot {
        self.engine.snapshot()
    }

    /// Brings a loaded status back in line with the engine it was saved with.
    pub(crate) fn reconcile(&mut self) {
        if let Some(won) = self.engine.verdict() {
            let status = SessionStatus::from_verdict(won);
            if self.status != status {
                log::warn!(
                    "stored status {:?} disagrees with board, using {:?}",
                    self.status,
                    status
                );
                self.status = status;
            }
        }
    }

    pub(crate) fn open_container<R: game::RandomSource + ?Sized>(
        &mut self,
        index: game::BoxIndex,
        source: &mut R,
    ) -> game::Result<ActionOutcome> {
        if self.status.is_finished() {
            return Ok(ActionOutcome::Ignored);
        }

        let outcome = self.engine.open(index, source)?;
        if outcome.is_complete() {
            self.status = SessionStatus::from_verdict(self.engine.check_win());
            log::info!("game finished: {:?}", self.status);
        }
        Ok(ActionOutcome::Opened(outcome))
    }

    pub(crate) fn set_prediction(
        &mut self,
        index: game::BoxIndex,
        prediction: game::Contents,
    ) -> game::Result<ActionOutcome> {
        if self.status.is_finished() {
            return Ok(ActionOutcome::Ignored);
        }

        self.engine.set_prediction(index, prediction)?;
        Ok(ActionOutcome::Predicted)
    }

    /// Gives up a game in progress.
    pub(crate) fn forfeit(&mut self) {
        if !self.status.is_finished() {
            self.status = SessionStatus::Lost;
        }
    }

    pub(crate) fn restart<R: game::RandomSource + ?Sized>(
        &mut self,
        config: game::GameConfig,
        source: &mut R,
    ) {
        *self = Self::generate(config, source);
    }
}

impl StorageKey for GameSession {
    const KEY: &'static str = "mislabeled:game:v1";
}

#[cfg(test)]
mod tests {
    use super::*;
    use mislabeled_core::Contents::*;
    use mislabeled_core::{Arrangement, GameError, OpenOutcome, ScriptedSource};

    fn session() -> GameSession {
        GameSession::new(game::PuzzleEngine::new(Arrangement::ShiftForward.shelf()))
    }

    fn heads() -> ScriptedSource {
        ScriptedSource::coin_flips(&[true])
    }

    fn play(session: &mut GameSession, guesses: [game::Contents; 2]) {
        let mut source = heads();
        session.open_container(0, &mut source).unwrap();
        session.set_prediction(1, guesses[0]).unwrap();
        session.set_prediction(2, guesses[1]).unwrap();
        session.open_container(1, &mut source).unwrap();
        session.open_container(2, &mut source).unwrap();
    }

    #[test]
    fn correct_guesses_win() {
        let mut session = session();

        play(&mut session, [Oranges, Apples]);

        assert_eq!(session.status(), SessionStatus::Won);
    }

    #[test]
    fn wrong_guess_loses() {
        let mut session = session();

        play(&mut session, [Apples, Oranges]);

        assert_eq!(session.status(), SessionStatus::Lost);
    }

    #[test]
    fn finished_session_ignores_actions() {
        let mut session = session();
        play(&mut session, [Oranges, Apples]);
        let before = session.clone();

        assert_eq!(session.open_container(0, &mut heads()), Ok(ActionOutcome::Ignored));
        assert_eq!(session.set_prediction(1, Mixed), Ok(ActionOutcome::Ignored));
        assert_eq!(session, before);
    }

    #[test]
    fn errors_pass_through_unchanged() {
        let mut session = session();

        assert_eq!(session.set_prediction(1, Mixed), Err(GameError::NoFirstOpenYet));
        assert_eq!(
            session.open_container(0, &mut heads()),
            Ok(ActionOutcome::Opened(OpenOutcome::FirstOpened(game::Fruit::Apple)))
        );
        assert_eq!(
            session.open_container(1, &mut heads()),
            Err(GameError::IncompleteOpenOrdering)
        );
        assert_eq!(session.status(), SessionStatus::Playing);
    }

    #[test]
    fn forfeit_only_applies_while_playing() {
        let mut won = session();
        play(&mut won, [Oranges, Apples]);
        won.forfeit();
        assert_eq!(won.status(), SessionStatus::Won);

        let mut playing = session();
        playing.forfeit();
        assert_eq!(playing.status(), SessionStatus::Lost);
    }

    #[test]
    fn stored_record_round_trips() {
        let mut session = session();
        session.open_container(0, &mut heads()).unwrap();
        session.set_prediction(2, Apples).unwrap();

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["status"], "playing");
        assert_eq!(json["game"]["firstOpenedIndex"], 0);

        let loaded: GameSession = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.snapshot(), session.snapshot());
    }

    #[test]
    fn reconcile_fixes_stale_status() {
        let mut session = session();
        play(&mut session, [Apples, Oranges]);
        let mut json = serde_json::to_value(&session).unwrap();
        json["status"] = "playing".into();

        let mut loaded: GameSession = serde_json::from_value(json).unwrap();
        loaded.reconcile();

        assert_eq!(loaded.status(), SessionStatus::Lost);
    }

    #[test]
    fn restart_replaces_the_game() {
        let mut session = session();
        play(&mut session, [Oranges, Apples]);

        session.restart(game::GameConfig::default(), &mut ScriptedSource::coin_flips(&[true]));

        assert_eq!(session.status(), SessionStatus::Playing);
        assert_eq!(session.engine().state(), game::EngineState::Ready);
        assert_eq!(session.engine().containers(), Arrangement::ShiftBackward.shelf());
    }
}
