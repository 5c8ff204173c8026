use mislabeled_core as game;

use crate::session::{GameSession, SessionStatus};

/// What the player is shown for one box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum ViewBoxState {
    Closed,
    Predicted(game::Contents),
    /// The box opened first, with the fruit pulled from it while the game is running.
    Hint(game::Contents, Option<game::Fruit>),
    Revealed(game::Contents),
    Correct(game::Contents),
    Wrong {
        content: game::Contents,
        prediction: Option<game::Contents>,
    },
}

pub(crate) fn box_state(session: &GameSession, index: game::BoxIndex) -> ViewBoxState {
    let engine = session.engine();
    let Ok(container) = engine.container(index) else {
        return ViewBoxState::Closed;
    };
    let is_hint = engine.first_opened_index() == Some(index);

    match container.visible_content() {
        None => match container.prediction() {
            Some(prediction) => ViewBoxState::Predicted(prediction),
            None => ViewBoxState::Closed,
        },
        Some(content) if is_hint => ViewBoxState::Hint(content, container.took()),
        Some(content) if !session.status().is_finished() => ViewBoxState::Revealed(content),
        Some(content) if container.prediction_matches() => ViewBoxState::Correct(content),
        Some(content) => ViewBoxState::Wrong {
            content,
            prediction: container.prediction(),
        },
    }
}

fn describe(state: ViewBoxState) -> String {
    use ViewBoxState::*;

    match state {
        Closed => "closed".to_string(),
        Predicted(prediction) => format!("closed, you guess {prediction}"),
        Hint(content, Some(fruit)) => format!("holds {content}, you pulled out an {fruit}"),
        Hint(content, None) => format!("holds {content}"),
        Revealed(content) => format!("holds {content}"),
        Correct(content) => format!("holds {content}, guessed right"),
        Wrong {
            content,
            prediction: Some(prediction),
        } => format!("holds {content}, you guessed {prediction}"),
        Wrong {
            content,
            prediction: None,
        } => format!("holds {content}, never guessed"),
    }
}

fn status_line(session: &GameSession) -> &'static str {
    let engine = session.engine();
    match session.status() {
        SessionStatus::Won => "You won! Every guess was right.",
        SessionStatus::Lost if engine.all_open() => "You lost. Not every guess was right.",
        SessionStatus::Lost => "You lost. The game was given up.",
        SessionStatus::Playing => match engine.state() {
            game::EngineState::Ready => "Open any box to pull out a fruit.",
            _ if engine.open_count() == 1 && !engine.is_ready_to_reveal() => {
                "Guess what every closed box holds."
            }
            _ => "Open the remaining boxes.",
        },
    }
}

/// Text rendering of the shelf, numbered from 1.
pub(crate) fn render(session: &GameSession, notice: Option<&str>) -> String {
    let mut out = String::new();
    for (index, container) in session.engine().containers().iter().enumerate() {
        let state = box_state(session, index);
        out.push_str(&format!(
            "Box {}  labeled {:<8} {}\n",
            index + 1,
            container.label().as_str(),
            describe(state)
        ));
    }
    out.push_str(status_line(session));
    out.push('\n');
    if let Some(notice) = notice {
        out.push_str(&format!("! {notice}\n"));
    }
    out
}
