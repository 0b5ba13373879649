//! Session outcome aggregation.

use serde::{Deserialize, Serialize};

use crate::model::{Outcome, Verdict};

/// Aggregated numbers for one session, computed from its outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Questions that received a response (including skips).
    pub played: usize,
    /// Correctly answered questions.
    pub correct: usize,
    /// Incorrectly answered questions.
    pub incorrect: usize,
    /// Skipped questions.
    pub skipped: usize,
    /// Points gained from correct answers (positive magnitude).
    pub points_won: i32,
    /// Points lost to incorrect answers (positive magnitude).
    pub points_lost: i32,
    /// Signed sum of all deltas, in turn order.
    pub final_score: i32,
    /// Sum of the point values of every played question, skips included.
    pub max_possible: i32,
}

impl SessionStats {
    /// Fraction of answered (non-skipped) questions judged correct.
    /// 0.0 when nothing was answered.
    pub fn accuracy(&self) -> f64 {
        let answered = self.correct + self.incorrect;
        if answered == 0 {
            0.0
        } else {
            self.correct as f64 / answered as f64
        }
    }
}

/// Aggregate a session's outcomes.
pub fn compute_session_stats(outcomes: &[Outcome]) -> SessionStats {
    let mut stats = SessionStats {
        played: outcomes.len(),
        correct: 0,
        incorrect: 0,
        skipped: 0,
        points_won: 0,
        points_lost: 0,
        final_score: 0,
        max_possible: 0,
    };

    for outcome in outcomes {
        match outcome.verdict {
            Verdict::Correct => {
                stats.correct += 1;
                stats.points_won += outcome.points_delta;
            }
            Verdict::Incorrect => {
                stats.incorrect += 1;
                stats.points_lost -= outcome.points_delta;
            }
            Verdict::Skipped => stats.skipped += 1,
        }
        stats.final_score += outcome.points_delta;
        stats.max_possible += outcome.question.point_value();
    }

    stats
}
