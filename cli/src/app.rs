use clap::{Parser, Subcommand};
use mislabeled_core as game;
use std::io::{BufRead, Write};
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use crate::notice::Notifier;
use crate::session::{ActionOutcome, GameSession};
use crate::settings::Settings;
use crate::storage::{FileStore, StoreError};
use crate::view;

/// Moves a player can make, shared by the command line and the interactive prompt.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub(crate) enum Action {
    /// Print the boxes
    Show,
    /// Open a box (the first one gives a hint, the rest reveal your guesses)
    Open {
        /// Box number, 1 to 3
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        number: u8,
    },
    /// Guess what a closed box holds
    Predict {
        /// Box number, 1 to 3
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        number: u8,
        /// apples, mixed or oranges
        contents: game::Contents,
    },
    /// Throw the current game away and start a new one
    Restart,
}

#[derive(Subcommand, Debug)]
enum PromptCommand {
    #[command(flatten)]
    Action(Action),
    /// Leave the game, progress is kept
    #[command(alias = "exit")]
    Quit,
}

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct PromptLine {
    #[command(subcommand)]
    command: PromptCommand,
}

/// Seed derived from the clock when none is forced.
pub(crate) fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

pub(crate) struct App {
    store: FileStore,
    settings: Settings,
    session: GameSession,
    source: game::SeededSource,
    notifier: Notifier,
}

impl App {
    pub(crate) fn load(store: FileStore, seed: u64) -> Self {
        let settings: Settings = store.load_or_default();
        let mut source = game::SeededSource::new(seed);
        let mut fresh = false;
        let mut session = store.load_or_else(|| {
            fresh = true;
            GameSession::generate(settings.game_config(), &mut source)
        });
        session.reconcile();
        log::debug!("seed: {}", source.seed());

        // The next command must see the same game.
        if fresh && let Err(err) = store.set(&session) {
            log::warn!("could not store new game: {:#}", anyhow::Error::new(err));
        }

        Self {
            store,
            settings,
            session,
            source,
            notifier: Notifier::default(),
        }
    }

    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }

    pub(crate) fn save(&self) -> Result<(), StoreError> {
        self.store.set(&self.session)
    }

    /// Applies one action. Rejected moves become notices; returns whether the game changed.
    pub(crate) fn execute(&mut self, action: &Action, now: Instant) -> bool {
        let result = match *action {
            Action::Show => return false,
            Action::Restart => {
                self.session
                    .restart(self.settings.game_config(), &mut self.source);
                self.notifier.hide();
                log::info!("new game");
                return true;
            }
            Action::Open { number } => self
                .session
                .open_container(usize::from(number) - 1, &mut self.source),
            Action::Predict { number, contents } => {
                self.session.set_prediction(usize::from(number) - 1, contents)
            }
        };

        match result {
            Ok(ActionOutcome::Ignored) => {
                self.notify("The game is over, restart to play again.", now);
                false
            }
            Ok(outcome) => {
                log::debug!("{:?} -> {:?}", action, outcome);
                true
            }
            Err(err) => {
                log::debug!("{:?} rejected: {}", action, err);
                self.notify(err.to_string(), now);
                if self.settings.errors_forfeit {
                    self.session.forfeit();
                    return true;
                }
                false
            }
        }
    }

    pub(crate) fn render(&mut self, now: Instant) -> String {
        let notice = self.notifier.current(now).map(|notice| notice.message().to_owned());
        view::render(&self.session, notice.as_deref())
    }

    fn notify(&mut self, message: impl Into<String>, now: Instant) {
        let duration = self.settings.notice_duration();
        self.notifier.show(message, duration, now);
    }

    /// Reads prompt lines until `quit` or end of input, saving after every change.
    pub(crate) fn run_prompt(
        &mut self,
        input: impl BufRead,
        mut output: impl Write,
    ) -> anyhow::Result<()> {
        write!(output, "{}", self.render(Instant::now()))?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                write!(output, "> ")?;
                output.flush()?;
                continue;
            }

            match PromptLine::try_parse_from(words) {
                Ok(PromptLine {
                    command: PromptCommand::Quit,
                }) => break,
                Ok(PromptLine {
                    command: PromptCommand::Action(action),
                }) => {
                    if self.execute(&action, Instant::now()) {
                        self.save()?;
                    }
                    write!(output, "{}", self.render(Instant::now()))?;
                }
                Err(err) => write!(output, "{}", err.render())?,
            }
            write!(output, "> ")?;
            output.flush()?;
        }

        Ok(())
    }
}
