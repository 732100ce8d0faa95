use std::sync::Arc;
use tauri::State;

use crate::gift::{GiftOutcome, GiftQuiz};
use crate::progress::{Progress, ProgressField};

#[tauri::command]
#[specta::specta]
pub fn submit_gift_answer(
    answer: String,
    quiz: State<GiftQuiz>,
    progress: State<Arc<Progress>>,
) -> GiftOutcome {
    let outcome = quiz.check(&answer);
    if outcome == GiftOutcome::Unlocked {
        progress.set(ProgressField::GiftUnlocked, true);
    }
    outcome
}
