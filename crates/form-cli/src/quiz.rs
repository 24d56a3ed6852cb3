use std::io::BufRead;

use tree_match::{QuizState, QuizTransport, TreeMatchSession};

use crate::{CliResult, read_line};

/// Runs the quiz until the user quits or input ends.
pub fn run_quiz<T: QuizTransport>(
    session: &mut TreeMatchSession<T>,
    input: &mut impl BufRead,
) -> CliResult<()> {
    loop {
        match session.state().clone() {
            QuizState::Loading => {
                session.restart();
            }
            QuizState::Question(question) => {
                println!("{}", question.question);
                for (index, answer) in question.answers.iter().enumerate() {
                    println!("  {}) {}", index + 1, answer);
                }
                let Some(raw) = prompt(input, "> ")? else {
                    return Ok(());
                };
                if raw.eq_ignore_ascii_case("exit") {
                    return Ok(());
                }
                let answer = pick_answer(&question.answers, &raw);
                if let Err(err) = session.submit(&answer) {
                    eprintln!("Invalid answer: {}", err);
                }
            }
            QuizState::Match(found) => {
                println!("You have a match!");
                println!("{}", found.name);
                if !found.description.is_empty() {
                    println!("{}", found.description);
                }
                if !ask_restart(input)? {
                    return Ok(());
                }
                session.restart();
            }
            QuizState::Error(message) => {
                eprintln!("{}", message);
                if !ask_restart(input)? {
                    return Err(message.into());
                }
                session.restart();
            }
        }
    }
}

/// Accepts either the 1-based number of an answer or its text.
fn pick_answer(answers: &[String], raw: &str) -> String {
    raw.parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| answers.get(index))
        .cloned()
        .or_else(|| {
            answers
                .iter()
                .find(|answer| answer.eq_ignore_ascii_case(raw))
                .cloned()
        })
        .unwrap_or_else(|| raw.to_string())
}

fn ask_restart(input: &mut impl BufRead) -> CliResult<bool> {
    let answer = prompt(input, "Start over? (y/n) ")?;
    Ok(matches!(
        answer.as_deref().map(str::to_lowercase).as_deref(),
        Some("y" | "yes")
    ))
}

fn prompt(input: &mut impl BufRead, label: &str) -> CliResult<Option<String>> {
    print!("{}", label);
    std::io::Write::flush(&mut std::io::stdout())?;
    read_line(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> Vec<String> {
        vec!["Indoor".to_string(), "Outdoor".to_string()]
    }

    #[test]
    fn picks_by_number() {
        assert_eq!(pick_answer(&answers(), "2"), "Outdoor");
    }

    #[test]
    fn picks_by_text_ignoring_case() {
        assert_eq!(pick_answer(&answers(), "indoor"), "Indoor");
    }

    #[test]
    fn passes_unknown_input_through() {
        assert_eq!(pick_answer(&answers(), "0"), "0");
        assert_eq!(pick_answer(&answers(), "Underwater"), "Underwater");
    }
}
