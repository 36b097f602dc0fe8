use chrono::{DateTime, Utc};

use crate::{McqState, ProcessingPhase};

/// Render decisions derived from [`McqState`]. Never includes an
/// empty-state message: the view either processes or shows results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct McqViewModel {
    pub show_spinner: bool,
    /// Empty unless the spinner is shown.
    pub progress_message: String,
    pub show_results: bool,
    pub questions: Vec<QuestionView>,
    pub show_screenshot_queue: bool,
    pub queue_loading: bool,
    pub screenshots: Vec<ScreenshotView>,
    pub has_started: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// 1-based position.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub correct_label: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotView {
    pub id: String,
    pub path: String,
    pub preview: String,
    pub captured_at: DateTime<Utc>,
}

impl McqViewModel {
    pub(crate) fn from_state(state: &McqState) -> Self {
        let processing = state.is_processing();
        let progress_message = match (processing, state.message()) {
            (false, _) => String::new(),
            (true, "") => state.messages().initial_progress.clone(),
            (true, message) => message.to_string(),
        };

        let questions = match state.phase() {
            ProcessingPhase::Settled(result) => {
                let total = result.questions.len();
                result
                    .questions
                    .iter()
                    .enumerate()
                    .map(|(i, question)| QuestionView {
                        number: i + 1,
                        total,
                        prompt: question.prompt.clone(),
                        options: question
                            .options
                            .iter()
                            .map(|option| OptionView {
                                label: option.label.clone(),
                                text: option.text.clone(),
                                is_correct: option.label == question.correct_label,
                            })
                            .collect(),
                        correct_label: question.correct_label.clone(),
                        explanation: question.explanation.clone(),
                    })
                    .collect()
            }
            ProcessingPhase::Idle | ProcessingPhase::Processing => Vec::new(),
        };

        let screenshots: Vec<ScreenshotView> = state
            .screenshots()
            .entries()
            .iter()
            .map(|entry| ScreenshotView {
                id: entry.id.clone(),
                path: entry.path.clone(),
                preview: entry.preview.clone(),
                captured_at: entry.captured_at,
            })
            .collect();

        Self {
            show_spinner: processing,
            progress_message,
            show_results: !processing && !questions.is_empty(),
            questions,
            show_screenshot_queue: !screenshots.is_empty(),
            queue_loading: processing,
            screenshots,
            has_started: state.has_started(),
        }
    }
}
