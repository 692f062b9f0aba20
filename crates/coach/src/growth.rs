//! Growth-area derivation from recent session metrics.
//!
//! Pure heuristics over the last few sessions' counters. The caller decides
//! where the metrics come from and what to do with the issues.

use rand::seq::SliceRandom;

use crate::model::TrainingMetrics;

/// How many recent sessions feed the analysis.
const WINDOW: usize = 6;

const OPEN_QUESTION_FLOOR: f64 = 0.25;

/// A practice area worth surfacing, with a short actionable hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthIssue {
    pub title: String,
    pub hint: String,
}

impl GrowthIssue {
    fn new(title: &str, hint: &str) -> Self {
        Self {
            title: title.to_string(),
            hint: hint.to_string(),
        }
    }
}

/// Derive growth issues from recent sessions, most recent first.
///
/// Returns nothing when no sessions exist. When sessions exist but no
/// specific issue triggers, a few generic growth ideas are surfaced instead.
/// The result order is shuffled.
pub fn derive(recent: &[TrainingMetrics]) -> Vec<GrowthIssue> {
    if recent.is_empty() {
        return Vec::new();
    }

    let window = &recent[..recent.len().min(WINDOW)];

    let total_turns: u32 = window.iter().map(|m| m.turns).sum();
    let short_answers: u32 = window.iter().map(|m| m.short_answers).sum();
    let open_questions: u32 = window.iter().map(|m| m.open_questions).sum();
    let hints: u32 = window.iter().map(|m| m.hints_shown).sum();

    let mut issues = Vec::new();

    if total_turns > 0 && f64::from(open_questions) / f64::from(total_turns.max(1)) < OPEN_QUESTION_FLOOR {
        issues.push(GrowthIssue::new(
            "Ask more open questions",
            "Try starting with 'what/which/how' and invite a short story.",
        ));
    }

    if short_answers as usize >= window.len() * 2 {
        issues.push(GrowthIssue::new(
            "Expand your answers",
            "Add one concrete detail or feeling to avoid one-word replies.",
        ));
    }

    if hints as usize >= window.len() * 2 {
        issues.push(GrowthIssue::new(
            "Rely less on hints",
            "Bridge from a keyword the partner said, then ask lightly.",
        ));
    }

    if issues.is_empty() {
        issues = vec![
            GrowthIssue::new("Follow up on details", "Pick one word they used and ask a gentle follow-up."),
            GrowthIssue::new("Share, then ask", "Offer a tiny example from you, then invite theirs."),
            GrowthIssue::new("Smooth endings", "Wrap with appreciation and a light next-time option."),
        ];
    }

    issues.shuffle(&mut rand::thread_rng());
    issues
}
