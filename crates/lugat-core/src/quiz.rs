use lugat_config::quiz::QuizConfig;
use lugat_types::FlashcardRecord;
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Need at least {need} cards to start a quiz, have {have}")]
    NotEnoughCards { have: usize, need: usize },

    #[error("Reveal the card before answering")]
    NotRevealed,

    #[error("Quiz is already finished")]
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Playing { index: usize, revealed: bool },
    Finished,
}

/// What happened after an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizProgress {
    Next { index: usize },
    Finished { score: usize, total: usize },
}

/// Drill over a random subset of saved cards.
///
/// Each card is shown front first, revealed, then self-graded.
#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<FlashcardRecord>,
    state: QuizState,
    score: usize,
}

impl QuizSession {
    pub fn start<R: Rng + ?Sized>(
        cards: &[FlashcardRecord],
        config: &QuizConfig,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        let need = config.min_cards.max(1);
        if cards.len() < need {
            return Err(QuizError::NotEnoughCards {
                have: cards.len(),
                need,
            });
        }

        let mut questions = cards.to_vec();
        questions.shuffle(rng);
        questions.truncate(config.max_questions.max(1));

        tracing::debug!(
            "Quiz started with {} of {} cards",
            questions.len(),
            cards.len()
        );

        Ok(Self {
            questions,
            state: QuizState::Playing {
                index: 0,
                revealed: false,
            },
            score: 0,
        })
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    /// Card being asked, `None` once finished
    pub fn current(&self) -> Option<&FlashcardRecord> {
        match self.state {
            QuizState::Playing { index, .. } => self.questions.get(index),
            QuizState::Finished => None,
        }
    }

    /// Flip the current card
    pub fn reveal(&mut self) -> Result<&FlashcardRecord, QuizError> {
        match self.state {
            QuizState::Playing { index, .. } => {
                self.state = QuizState::Playing {
                    index,
                    revealed: true,
                };
                Ok(&self.questions[index])
            }
            QuizState::Finished => Err(QuizError::Finished),
        }
    }

    pub fn answer(&mut self, correct: bool) -> Result<QuizProgress, QuizError> {
        let index = match self.state {
            QuizState::Playing {
                revealed: false, ..
            } => return Err(QuizError::NotRevealed),
            QuizState::Playing { index, .. } => index,
            QuizState::Finished => return Err(QuizError::Finished),
        };

        if correct {
            self.score += 1;
        }

        let next = index + 1;
        if next < self.questions.len() {
            self.state = QuizState::Playing {
                index: next,
                revealed: false,
            };
            Ok(QuizProgress::Next { index: next })
        } else {
            self.state = QuizState::Finished;
            Ok(QuizProgress::Finished {
                score: self.score,
                total: self.total(),
            })
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.state == QuizState::Finished
    }

    /// Finished with every answer correct
    pub fn is_perfect(&self) -> bool {
        self.is_finished() && self.score == self.total()
    }
}
