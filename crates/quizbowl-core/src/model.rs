//! Core data model types for quizbowl.
//!
//! These are the fundamental types that the entire quizbowl system uses to
//! represent questions, players, and per-turn outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single trivia question, immutable once constructed.
///
/// The three variants share one capability contract: award `point_value()`
/// points, judge a response with `check_answer`, render themselves with
/// `prompt_lines`, and reveal the stored answer with `correct_answer_text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    point_value: i32,
    variant: QuestionVariant,
}

/// Variant-specific data for a [`Question`].
///
/// Answers are stored exactly as they appeared in the source; all comparison
/// against player input is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionVariant {
    /// Answered with "true" or "false".
    TrueFalse { answer: String },
    /// Answered with a choice letter ("A", "B", ...), never the choice text.
    MultipleChoice { choices: Vec<String>, answer: String },
    /// Answered with free text.
    ShortAnswer { answer: String },
}

impl Question {
    /// A true/false question. `point_value` must be positive.
    pub fn true_false(
        prompt: impl Into<String>,
        point_value: i32,
        answer: impl Into<String>,
    ) -> Self {
        debug_assert!(point_value > 0);
        Self {
            prompt: prompt.into(),
            point_value,
            variant: QuestionVariant::TrueFalse {
                answer: answer.into(),
            },
        }
    }

    /// A multiple-choice question keyed by letter. `point_value` must be positive.
    pub fn multiple_choice(
        prompt: impl Into<String>,
        point_value: i32,
        choices: Vec<String>,
        answer: impl Into<String>,
    ) -> Self {
        debug_assert!(point_value > 0);
        Self {
            prompt: prompt.into(),
            point_value,
            variant: QuestionVariant::MultipleChoice {
                choices,
                answer: answer.into(),
            },
        }
    }

    /// A short-answer question. `point_value` must be positive.
    pub fn short_answer(
        prompt: impl Into<String>,
        point_value: i32,
        answer: impl Into<String>,
    ) -> Self {
        debug_assert!(point_value > 0);
        Self {
            prompt: prompt.into(),
            point_value,
            variant: QuestionVariant::ShortAnswer {
                answer: answer.into(),
            },
        }
    }

    /// The question text as stored (may be empty).
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// How many points this question is worth. Always positive; the sign of
    /// a score change is decided by the session engine.
    pub fn point_value(&self) -> i32 {
        self.point_value
    }

    /// Which of the three variants this question is.
    pub fn question_type(&self) -> QuestionType {
        match self.variant {
            QuestionVariant::TrueFalse { .. } => QuestionType::TrueFalse,
            QuestionVariant::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionVariant::ShortAnswer { .. } => QuestionType::ShortAnswer,
        }
    }

    /// The choice list for multiple-choice questions, `None` otherwise.
    pub fn choices(&self) -> Option<&[String]> {
        match &self.variant {
            QuestionVariant::MultipleChoice { choices, .. } => Some(choices),
            _ => None,
        }
    }

    /// Judge a raw response. Comparison is case-insensitive for every
    /// variant; multiple-choice compares the response against the stored
    /// answer letter, so choice text never matches.
    pub fn check_answer(&self, response: &str) -> bool {
        match &self.variant {
            QuestionVariant::TrueFalse { answer } | QuestionVariant::ShortAnswer { answer } => {
                response.to_lowercase() == answer.to_lowercase()
            }
            QuestionVariant::MultipleChoice { answer, .. } => {
                response.to_uppercase() == answer.to_uppercase()
            }
        }
    }

    /// The stored answer, in its original case. This is what gets revealed
    /// after an incorrect response.
    pub fn correct_answer_text(&self) -> &str {
        match &self.variant {
            QuestionVariant::TrueFalse { answer }
            | QuestionVariant::MultipleChoice { answer, .. }
            | QuestionVariant::ShortAnswer { answer } => answer,
        }
    }

    /// Display lines for this question: the prompt line (true/false gets a
    /// hint suffix), then one labeled line per choice for multiple choice.
    /// Choice labels are letters through `Z`, then 1-based numbers.
    pub fn prompt_lines(&self) -> Vec<String> {
        match &self.variant {
            QuestionVariant::TrueFalse { .. } => {
                vec![format!("Question: {} (true/false)", self.prompt)]
            }
            QuestionVariant::ShortAnswer { .. } => {
                vec![format!("Question: {}", self.prompt)]
            }
            QuestionVariant::MultipleChoice { choices, .. } => {
                let mut lines = Vec::with_capacity(choices.len() + 1);
                lines.push(format!("Question: {}", self.prompt));
                for (i, choice) in choices.iter().enumerate() {
                    lines.push(format!("{}) {choice}", choice_label(i)));
                }
                lines
            }
        }
    }
}

/// Label for the choice at `index`: `A` through `Z`, then the 1-based
/// position once letters run out. Only the lettered range can be named by
/// an answer key.
fn choice_label(index: usize) -> String {
    if index < 26 {
        char::from(b'A' + index as u8).to_string()
    } else {
        (index + 1).to_string()
    }
}

/// Question type markers matching the bank file header tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    TrueFalse,
    MultipleChoice,
    ShortAnswer,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::TrueFalse => write!(f, "TF"),
            QuestionType::MultipleChoice => write!(f, "MC"),
            QuestionType::ShortAnswer => write!(f, "SA"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TF" => Ok(QuestionType::TrueFalse),
            "MC" => Ok(QuestionType::MultipleChoice),
            "SA" => Ok(QuestionType::ShortAnswer),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// The player of a session.
///
/// The score is read-only outside this crate; only the session engine moves
/// it, through [`Player::apply_delta`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    first_name: String,
    last_name: String,
    score: i32,
}

impl Player {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            score: 0,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last", or just "First" when the last name is empty.
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Running score. May be negative.
    pub fn score(&self) -> i32 {
        self.score
    }

    pub(crate) fn apply_delta(&mut self, delta: i32) {
        self.score += delta;
    }
}

/// How a single turn was judged. Verdicts are final once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
    Skipped,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::Incorrect => write!(f, "incorrect"),
            Verdict::Skipped => write!(f, "skipped"),
        }
    }
}

/// The record of one answered (or skipped) question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    /// The question as it was asked.
    pub question: Question,
    /// The player's raw response.
    pub response: String,
    /// How the response was judged.
    pub verdict: Verdict,
    /// Signed score change: `+point_value`, `-point_value`, or 0 for a skip.
    pub points_delta: i32,
    /// The answer to reveal. Populated exactly when the verdict is
    /// [`Verdict::Incorrect`].
    pub correct_answer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_display_and_parse() {
        assert_eq!(QuestionType::TrueFalse.to_string(), "TF");
        assert_eq!(QuestionType::MultipleChoice.to_string(), "MC");
        assert_eq!(QuestionType::ShortAnswer.to_string(), "SA");
        assert_eq!("TF".parse::<QuestionType>().unwrap(), QuestionType::TrueFalse);
        assert_eq!("MC".parse::<QuestionType>().unwrap(), QuestionType::MultipleChoice);
        assert_eq!("SA".parse::<QuestionType>().unwrap(), QuestionType::ShortAnswer);
        assert!("tf".parse::<QuestionType>().is_err());
        assert!("ESSAY".parse::<QuestionType>().is_err());
    }

    #[test]
    fn true_false_checks_case_insensitively() {
        let q = Question::true_false("The sky is blue.", 10, "True");
        assert!(q.check_answer("true"));
        assert!(q.check_answer("TRUE"));
        assert!(q.check_answer("tRuE"));
        assert!(!q.check_answer("false"));
        assert!(!q.check_answer(""));
    }

    #[test]
    fn short_answer_checks_case_insensitively() {
        let q = Question::short_answer("Capital of France?", 20, "Paris");
        assert!(q.check_answer("paris"));
        assert!(q.check_answer("PARIS"));
        assert!(!q.check_answer("Lyon"));
        assert!(!q.check_answer("Pari"));
    }

    #[test]
    fn multiple_choice_matches_letter_only() {
        let q = Question::multiple_choice(
            "Pick one.",
            5,
            vec!["Red".into(), "Blue".into()],
            "B",
        );
        assert!(q.check_answer("B"));
        assert!(q.check_answer("b"));
        assert!(!q.check_answer("A"));
        assert!(!q.check_answer("a"));
        // Choice text never matches, even the right one.
        assert!(!q.check_answer("Blue"));
        assert!(!q.check_answer("blue"));
    }

    #[test]
    fn correct_answer_text_keeps_stored_case() {
        let tf = Question::true_false("Statement.", 10, "TRUE");
        assert_eq!(tf.correct_answer_text(), "TRUE");

        let sa = Question::short_answer("Capital?", 20, "Paris");
        assert_eq!(sa.correct_answer_text(), "Paris");

        let mc = Question::multiple_choice("Pick.", 5, vec!["Red".into(), "Blue".into()], "b");
        assert_eq!(mc.correct_answer_text(), "b");
        assert!(mc.check_answer("B"));
    }

    #[test]
    fn prompt_lines_true_false_hint() {
        let q = Question::true_false("Water boils at 100C.", 10, "true");
        assert_eq!(
            q.prompt_lines(),
            vec!["Question: Water boils at 100C. (true/false)"]
        );
    }

    #[test]
    fn prompt_lines_short_answer_plain() {
        let q = Question::short_answer("Capital of France?", 20, "Paris");
        assert_eq!(q.prompt_lines(), vec!["Question: Capital of France?"]);
    }

    #[test]
    fn prompt_lines_multiple_choice_letters_choices() {
        let q = Question::multiple_choice(
            "Which planet is red?",
            15,
            vec!["Venus".into(), "Mars".into(), "Jupiter".into()],
            "B",
        );
        assert_eq!(
            q.prompt_lines(),
            vec![
                "Question: Which planet is red?",
                "A) Venus",
                "B) Mars",
                "C) Jupiter",
            ]
        );
    }

    #[test]
    fn prompt_lines_number_choices_past_the_alphabet() {
        let choices: Vec<String> = (0..200).map(|i| format!("choice {i}")).collect();
        let q = Question::multiple_choice("Pick.", 5, choices, "A");

        let lines = q.prompt_lines();
        assert_eq!(lines.len(), 201);
        assert_eq!(lines[1], "A) choice 0");
        assert_eq!(lines[26], "Z) choice 25");
        assert_eq!(lines[27], "27) choice 26");
        assert_eq!(lines[200], "200) choice 199");
    }

    #[test]
    fn player_score_starts_at_zero_and_tracks_deltas() {
        let mut player = Player::new("Ada", "Lovelace");
        assert_eq!(player.score(), 0);
        player.apply_delta(10);
        player.apply_delta(-25);
        assert_eq!(player.score(), -15);
        assert_eq!(player.full_name(), "Ada Lovelace");
    }

    #[test]
    fn full_name_without_last_name() {
        let player = Player::new("Ada", "");
        assert_eq!(player.full_name(), "Ada");
    }

    #[test]
    fn question_serde_roundtrip() {
        let q = Question::multiple_choice(
            "Pick one.",
            15,
            vec!["Red".into(), "Blue".into()],
            "B",
        );
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("multiple_choice"));
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.prompt(), "Pick one.");
        assert_eq!(back.point_value(), 15);
        assert_eq!(back.correct_answer_text(), "B");
        assert_eq!(back.question_type(), QuestionType::MultipleChoice);
    }
}
