use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use web_time::Instant;

mod app;
mod notice;
mod session;
mod settings;
mod storage;
mod view;

use app::{Action, App};
use session::GameSession;
use settings::Settings;
use storage::FileStore;

#[derive(Parser, Debug)]
#[command(version, about = "Three mislabeled fruit boxes: open one, guess the rest", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory holding the saved game and settings
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Action(Action),
    /// Play interactively, one command per line
    Play,
    /// Show or change settings
    Settings {
        /// Shuffle box positions in new games
        #[arg(long)]
        shuffle: Option<bool>,
        /// Count a rejected move as giving up
        #[arg(long)]
        errors_forfeit: Option<bool>,
        /// How long notices stay visible in interactive mode
        #[arg(long)]
        notice_millis: Option<u64>,
    },
    /// Print the current game as a JSON snapshot
    Snapshot,
    /// Delete the saved game and settings
    Reset,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(log_level) = args.verbose.log_level() {
        env_logger::Builder::new()
            .filter_level(log_level.to_level_filter())
            .parse_default_env()
            .init();
    }

    let store = FileStore::new(args.data_dir.unwrap_or_else(FileStore::default_dir));
    log::debug!("data dir: {}", store.dir().display());

    match args.command.unwrap_or(Command::Action(Action::Show)) {
        Command::Action(action) => {
            let mut app = App::load(store, args.seed.unwrap_or_else(app::clock_seed));
            if app.execute(&action, Instant::now()) {
                app.save().context("could not save the game")?;
            }
            print!("{}", app.render(Instant::now()));
        }
        Command::Play => {
            let mut app = App::load(store, args.seed.unwrap_or_else(app::clock_seed));
            app.run_prompt(io::stdin().lock(), io::stdout().lock())?;
            app.save().context("could not save the game")?;
        }
        Command::Snapshot => {
            let app = App::load(store, args.seed.unwrap_or_else(app::clock_seed));
            let snapshot = serde_json::to_string_pretty(&app.session().snapshot())?;
            println!("{snapshot}");
        }
        Command::Settings {
            shuffle,
            errors_forfeit,
            notice_millis,
        } => {
            let mut settings: Settings = store.load_or_default();
            let updated = Settings {
                shuffle_positions: shuffle.unwrap_or(settings.shuffle_positions),
                errors_forfeit: errors_forfeit.unwrap_or(settings.errors_forfeit),
                notice_millis: notice_millis.unwrap_or(settings.notice_millis),
            };
            if updated != settings {
                settings = updated;
                store.set(&settings).context("could not save settings")?;
            }
            println!("shuffle = {}", settings.shuffle_positions);
            println!("errors-forfeit = {}", settings.errors_forfeit);
            println!("notice-millis = {}", settings.notice_millis);
        }
        Command::Reset => {
            store.remove::<GameSession>().context("could not delete the game")?;
            store.remove::<Settings>().context("could not delete settings")?;
            println!("Removed saved data from {}", store.dir().display());
        }
    }

    Ok(())
}
