//! Question bank parser and validation.
//!
//! Banks are plain text with a line-oriented grammar:
//!
//! ```text
//! <declared question count>
//! <TYPE> <points>          TYPE is TF, MC, or SA; points is a positive int
//! <question text>          verbatim, may be empty
//! ...variant lines...      TF/SA: one answer line
//!                          MC: choice count, the choices, then the key letter
//! ```
//!
//! A count line that disagrees with the number of blocks is observable on the
//! returned [`ParsedBank`], never an error. Structural problems abort the
//! whole load with a [`ParseError`]; no partial bank is returned. The parser
//! never prints — reporting belongs to the caller.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ParseError;
use crate::model::{Question, QuestionType};

/// A successfully parsed bank: the questions in source order plus the count
/// the file claimed to contain.
#[derive(Debug, Clone)]
pub struct ParsedBank {
    /// Questions in the order they appeared.
    pub questions: Vec<Question>,
    /// The count declared on the first line.
    pub declared_count: usize,
}

impl ParsedBank {
    /// How many questions were actually parsed.
    pub fn actual_count(&self) -> usize {
        self.questions.len()
    }

    /// Whether the declared count disagrees with the parsed count.
    pub fn has_count_mismatch(&self) -> bool {
        self.declared_count != self.questions.len()
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

/// Tracks the 1-based line number of the line most recently consumed.
struct LineCursor<'a, I: Iterator<Item = &'a str>> {
    lines: I,
    line: usize,
}

impl<'a, I: Iterator<Item = &'a str>> LineCursor<'a, I> {
    fn new(lines: I) -> Self {
        Self { lines, line: 0 }
    }

    fn next(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line += 1;
        Some(line)
    }

    fn line(&self) -> usize {
        self.line
    }

    /// Next line, or [`ParseError::UnexpectedEof`] if the source ran out.
    fn require(&mut self, block: usize, expected: &'static str) -> Result<&'a str, ParseError> {
        self.next()
            .ok_or(ParseError::UnexpectedEof { block, expected })
    }
}

/// Parse a bank from a string source.
pub fn parse_bank_str(source: &str) -> Result<ParsedBank, ParseError> {
    parse_bank_lines(source.lines())
}

/// Parse a bank from any line feed. Lines arrive without terminators.
pub fn parse_bank_lines<'a, I>(lines: I) -> Result<ParsedBank, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cursor = LineCursor::new(lines.into_iter());

    let count_line = cursor.next().ok_or(ParseError::EmptySource)?;
    let declared_count =
        count_line
            .trim()
            .parse::<usize>()
            .map_err(|_| ParseError::MalformedCount {
                line: cursor.line(),
                found: count_line.trim().to_string(),
            })?;

    let mut questions = Vec::new();
    let mut block = 0;
    while let Some(header) = cursor.next() {
        block += 1;
        questions.push(parse_block(&mut cursor, block, header)?);
    }

    Ok(ParsedBank {
        questions,
        declared_count,
    })
}

/// Parse one question block. `header` has already been consumed.
fn parse_block<'a, I>(
    cursor: &mut LineCursor<'a, I>,
    block: usize,
    header: &str,
) -> Result<Question, ParseError>
where
    I: Iterator<Item = &'a str>,
{
    let header_line = cursor.line();
    let malformed_header = || ParseError::MalformedHeader {
        block,
        line: header_line,
        found: header.trim().to_string(),
    };

    // First two whitespace-separated tokens; anything after them is ignored.
    let mut tokens = header.split_whitespace();
    let (Some(type_token), Some(points_token)) = (tokens.next(), tokens.next()) else {
        return Err(malformed_header());
    };
    let question_type: QuestionType = type_token.parse().map_err(|_| malformed_header())?;
    let point_value = points_token
        .parse::<i32>()
        .ok()
        .filter(|points| *points > 0)
        .ok_or_else(malformed_header)?;

    let prompt = cursor.require(block, "question text")?.to_string();

    match question_type {
        QuestionType::TrueFalse => {
            let answer = cursor.require(block, "an answer line")?;
            Ok(Question::true_false(prompt, point_value, answer))
        }
        QuestionType::ShortAnswer => {
            let answer = cursor.require(block, "an answer line")?;
            Ok(Question::short_answer(prompt, point_value, answer))
        }
        QuestionType::MultipleChoice => {
            let count_line = cursor.require(block, "a choice count")?;
            let num_choices =
                count_line
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ParseError::MalformedBlock {
                        block,
                        line: cursor.line(),
                        expected: "a choice count",
                        found: count_line.trim().to_string(),
                    })?;
            // The declared count is untrusted input; the list grows only as
            // choice lines actually arrive.
            let mut choices = Vec::new();
            for _ in 0..num_choices {
                choices.push(cursor.require(block, "a choice line")?.to_string());
            }
            let answer = cursor.require(block, "an answer letter")?;
            Ok(Question::multiple_choice(
                prompt,
                point_value,
                choices,
                answer,
            ))
        }
    }
}

/// Read and parse a bank file.
pub fn load_bank(path: &Path) -> Result<ParsedBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;
    let bank = parse_bank_str(&content)
        .with_context(|| format!("failed to parse question bank: {}", path.display()))?;
    tracing::debug!(
        "loaded {} questions from {} (declared {})",
        bank.actual_count(),
        path.display(),
        bank.declared_count
    );
    Ok(bank)
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The 1-based question number (if applicable).
    pub question: Option<usize>,
    /// What kind of problem was found.
    pub kind: WarningKind,
    /// Human-readable message.
    pub message: String,
}

/// Validation warning categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Declared count disagrees with the parsed count.
    CountMismatch,
    /// A question has empty text.
    EmptyPrompt,
    /// A multiple-choice question has no choices to pick from.
    ChoicelessQuestion,
    /// A multiple-choice answer key that no choice letter can match.
    AnswerKeyOutOfRange,
}

impl WarningKind {
    /// Whether a bank with this warning is unplayable. Playable-but-odd
    /// banks (count mismatch, empty prompt) still run.
    pub fn blocks_play(self) -> bool {
        matches!(
            self,
            WarningKind::ChoicelessQuestion | WarningKind::AnswerKeyOutOfRange
        )
    }
}

/// Check a parsed bank for problems the grammar cannot see.
///
/// The parser stays permissive (a zero-choice MC block is grammatically
/// fine); this pass is where semantic holes surface.
pub fn validate_bank(bank: &ParsedBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.has_count_mismatch() {
        warnings.push(ValidationWarning {
            question: None,
            kind: WarningKind::CountMismatch,
            message: format!(
                "Expected {} questions, but found {}.",
                bank.declared_count,
                bank.actual_count()
            ),
        });
    }

    for (i, question) in bank.questions.iter().enumerate() {
        let number = i + 1;

        if question.prompt().trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(number),
                kind: WarningKind::EmptyPrompt,
                message: "question text is empty".into(),
            });
        }

        if let Some(choices) = question.choices() {
            if choices.is_empty() {
                warnings.push(ValidationWarning {
                    question: Some(number),
                    kind: WarningKind::ChoicelessQuestion,
                    message: "multiple-choice question has no choices".into(),
                });
            } else if !answer_key_in_range(question.correct_answer_text(), choices.len()) {
                warnings.push(ValidationWarning {
                    question: Some(number),
                    kind: WarningKind::AnswerKeyOutOfRange,
                    message: format!(
                        "answer key '{}' does not name one of the {} choices",
                        question.correct_answer_text(),
                        choices.len()
                    ),
                });
            }
        }
    }

    warnings
}

/// Whether a stored answer key is a single letter naming a valid choice
/// index (A names the first choice).
fn answer_key_in_range(key: &str, num_choices: usize) -> bool {
    let mut chars = key.chars();
    let Some(letter) = chars.next() else {
        return false;
    };
    if chars.next().is_some() || !letter.is_ascii_alphabetic() {
        return false;
    }
    let index = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
    index < num_choices
}
