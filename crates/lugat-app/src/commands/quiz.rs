use lugat_config::quiz::QuizConfig;
use lugat_core::quiz::{QuizError, QuizProgress, QuizSession};
use lugat_types::FlashcardRecord;
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::terminal::{Terminal, is_yes};

/// Final score, `None` when the quiz didn't start or was abandoned
pub type QuizOutcome = Option<(usize, usize)>;

pub async fn run_quiz<R, W, G>(
    cards: &[FlashcardRecord],
    config: &QuizConfig,
    rng: &mut G,
    terminal: &mut Terminal<R, W>,
) -> anyhow::Result<QuizOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    G: Rng + ?Sized,
{
    let mut session = match QuizSession::start(cards, config, rng) {
        Ok(session) => session,
        Err(e @ QuizError::NotEnoughCards { .. }) => {
            terminal.writeln(&format!("{e}. Add more!")).await?;
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    terminal
        .writeln(&format!("Test yourself on {} random words.", session.total()))
        .await?;

    let mut position = 1;
    loop {
        let Some(card) = session.current() else {
            break;
        };
        terminal
            .writeln(&format!(
                "\nQuestion {position} / {}   Score: {}",
                session.total(),
                session.score()
            ))
            .await?;
        terminal
            .writeln(&format!("  {}  [{}]", card.term, card.language))
            .await?;

        if terminal.ask("Press Enter to reveal ").await?.is_none() {
            return Ok(None);
        }

        let card = session.reveal()?;
        terminal.writeln(&format!("  {}", card.translation)).await?;
        if !card.example.is_empty() {
            terminal.writeln(&format!("  {}", card.example)).await?;
        }

        let Some(reply) = terminal.ask("Did you know it? [y/N] ").await? else {
            return Ok(None);
        };

        match session.answer(is_yes(&reply))? {
            QuizProgress::Next { .. } => position += 1,
            QuizProgress::Finished { score, total } => {
                terminal.writeln(&format!("\nScore: {score} / {total}")).await?;
                if session.is_perfect() {
                    terminal.writeln("Perfect score!").await?;
                }
                return Ok(Some((score, total)));
            }
        }
    }

    Ok(Some((session.score(), session.total())))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lugat_types::Language;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use uuid::Uuid;

    use super::*;

    fn deck(n: usize) -> Vec<FlashcardRecord> {
        (0..n)
            .map(|i| FlashcardRecord {
                id: Uuid::new_v4(),
                term: format!("word{i}"),
                translation: format!("kelime{i}"),
                language: Language::En,
                example: format!("Sentence {i}."),
                created_at: Utc::now(),
                group: "2026-10-16".into(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_refuses_small_deck() {
        let mut terminal = Terminal::new("".as_bytes(), Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = run_quiz(&deck(2), &QuizConfig::default(), &mut rng, &mut terminal)
            .await
            .unwrap();

        assert_eq!(outcome, None);
        let output = String::from_utf8(terminal.into_output()).unwrap();
        assert!(output.contains("Need at least 3 cards"));
    }

    #[tokio::test]
    async fn test_scores_answers() {
        // reveal + answer for each of three questions
        let input = "\ny\n\nn\n\nyes\n";
        let mut terminal = Terminal::new(input.as_bytes(), Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = run_quiz(&deck(3), &QuizConfig::default(), &mut rng, &mut terminal)
            .await
            .unwrap();

        assert_eq!(outcome, Some((2, 3)));
        let output = String::from_utf8(terminal.into_output()).unwrap();
        assert!(output.contains("Question 3 / 3"));
        assert!(output.contains("Score: 2 / 3"));
        assert!(!output.contains("Perfect score!"));
    }

    #[tokio::test]
    async fn test_perfect_run() {
        let input = "\ny\n\ny\n\ny\n";
        let mut terminal = Terminal::new(input.as_bytes(), Vec::new());
        let mut rng = StdRng::seed_from_u64(9);
        let outcome = run_quiz(&deck(3), &QuizConfig::default(), &mut rng, &mut terminal)
            .await
            .unwrap();

        assert_eq!(outcome, Some((3, 3)));
        let output = String::from_utf8(terminal.into_output()).unwrap();
        assert!(output.contains("Perfect score!"));
    }

    #[tokio::test]
    async fn test_end_of_input_abandons() {
        let mut terminal = Terminal::new("\ny\n".as_bytes(), Vec::new());
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = run_quiz(&deck(4), &QuizConfig::default(), &mut rng, &mut terminal)
            .await
            .unwrap();
        assert_eq!(outcome, None);
    }
}
