//! The gift quiz.
//!
//! One question guards the gift: answers are normalized (trimmed,
//! lowercased) before comparison, so "Patrick Jane " and "patrick jane"
//! both unlock. Wrong guesses are counted for the session; the frontend
//! uses the count to vary the mascot's teasing.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

const GIFT_ANSWER: &str = "patrick jane";

/// Outcome of one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, specta::Type)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum GiftOutcome {
    #[serde(rename = "unlocked")]
    Unlocked,
    #[serde(rename = "wrong")]
    Wrong { attempts: u32 },
}

pub struct GiftQuiz {
    answer: String,
    attempts: Mutex<u32>,
}

impl Default for GiftQuiz {
    fn default() -> Self {
        Self::new()
    }
}

impl GiftQuiz {
    pub fn new() -> Self {
        Self::with_answer(GIFT_ANSWER)
    }

    fn with_answer(answer: &str) -> Self {
        Self {
            answer: normalize(answer),
            attempts: Mutex::new(0),
        }
    }

    /// Check a guess. Correct guesses do not consume an attempt.
    pub fn check(&self, guess: &str) -> GiftOutcome {
        if normalize(guess) == self.answer {
            return GiftOutcome::Unlocked;
        }

        let mut attempts = self.attempts.lock().unwrap();
        *attempts += 1;
        log::debug!("Wrong gift answer (attempt {})", *attempts);
        GiftOutcome::Wrong {
            attempts: *attempts,
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_answer_unlocks() {
        let quiz = GiftQuiz::with_answer("patrick jane");
        assert_eq!(quiz.check("patrick jane"), GiftOutcome::Unlocked);
    }

    #[test]
    fn answer_is_case_and_whitespace_insensitive() {
        let quiz = GiftQuiz::with_answer("patrick jane");
        assert_eq!(quiz.check("  Patrick Jane "), GiftOutcome::Unlocked);
        assert_eq!(quiz.check("PATRICK JANE"), GiftOutcome::Unlocked);
    }

    #[test]
    fn wrong_guess_increments_attempts() {
        let quiz = GiftQuiz::with_answer("patrick jane");
        assert_eq!(quiz.check("lisbon"), GiftOutcome::Wrong { attempts: 1 });
        assert_eq!(quiz.check("red john"), GiftOutcome::Wrong { attempts: 2 });
    }

    #[test]
    fn unlock_still_works_after_wrong_guesses() {
        let quiz = GiftQuiz::with_answer("patrick jane");
        quiz.check("nope");
        quiz.check("still nope");
        assert_eq!(quiz.check("patrick jane"), GiftOutcome::Unlocked);
    }

    #[test]
    fn correct_guess_does_not_consume_an_attempt() {
        let quiz = GiftQuiz::with_answer("patrick jane");
        quiz.check("patrick jane");
        assert_eq!(quiz.check("wrong"), GiftOutcome::Wrong { attempts: 1 });
    }
}
