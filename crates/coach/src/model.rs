//! Transient domain types exchanged with the completion API.
//!
//! Everything here lives for a single request/response cycle. Persisting
//! sparks, sessions, or settings is the caller's concern.

use serde::{Deserialize, Serialize};

/// Tag on a generated conversation starter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SparkKind {
    Question,
    Observation,
    Theme,
}

impl SparkKind {
    pub fn label(self) -> &'static str {
        match self {
            SparkKind::Question => "question",
            SparkKind::Observation => "observation",
            SparkKind::Theme => "theme",
        }
    }
}

/// A short generated conversation-starter line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spark {
    #[serde(rename = "type")]
    pub kind: SparkKind,
    pub text: String,
}

/// The strict JSON object the model is instructed to emit for sparks.
#[derive(Debug, Deserialize)]
pub(crate) struct SparksPayload {
    pub(crate) items: Vec<Spark>,
}

/// The strict JSON object the model is instructed to emit for daily topics.
#[derive(Debug, Deserialize)]
pub(crate) struct TopicsPayload {
    pub(crate) topics: Vec<String>,
}

/// Input for spark generation: where the conversation happens and with whom.
#[derive(Debug, Clone)]
pub struct SparkContext {
    pub situation: String,
    pub audience: String,
    pub locale: String,
    /// Optional tone hint, e.g. "playful" or "low-key".
    pub tone: Option<String>,
    /// Optional length hint, e.g. "one-liners".
    pub length: Option<String>,
}

impl SparkContext {
    pub fn new(situation: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            situation: situation.into(),
            audience: audience.into(),
            locale: "en".to_string(),
            tone: None,
            length: None,
        }
    }
}

/// Post-session feedback decoded from a JSON-mode call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedbackSummary {
    /// What went well. The model is asked for exactly two entries; whatever
    /// it actually returned is passed through.
    pub strengths: Vec<String>,
    pub suggestion: String,
    /// Optional title for a micro-lesson to link from the summary.
    #[serde(default)]
    pub lesson_title: Option<String>,
}

/// Flavor of a mid-conversation repair suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairKind {
    /// Rewrite the user's last line so it lands more naturally.
    Rephrase,
    /// Bridge to a nearby, safer topic.
    Pivot,
    /// Offer an open question that invites a short story.
    Open,
}

/// Speaker of a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Ai,
    /// Coach hints shown inline. Serialized to the model as assistant turns.
    Hint,
}

/// One turn of a training dialogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub role: TurnRole,
    pub text: String,
}

impl DialogueTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Ai,
            text: text.into(),
        }
    }

    pub fn hint(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Hint,
            text: text.into(),
        }
    }
}

const SHORT_ANSWER_MAX_WORDS: usize = 3;

const OPEN_WORDS: &[&str] = &["what", "how", "which", "why", "where", "who"];

/// Per-session counters fed into feedback generation and growth analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub turns: u32,
    pub short_answers: u32,
    pub open_questions: u32,
    pub hints_shown: u32,
}

impl TrainingMetrics {
    /// Update counters for one user turn.
    pub fn record_user_turn(&mut self, text: &str) {
        self.turns += 1;

        if text.split_whitespace().count() <= SHORT_ANSWER_MAX_WORDS {
            self.short_answers += 1;
        }

        if is_open_question(text) {
            self.open_questions += 1;
        }
    }

    pub fn record_hint(&mut self) {
        self.hints_shown += 1;
    }
}

/// Heuristic: the line asks something and leads with an open interrogative.
fn is_open_question(text: &str) -> bool {
    if !text.contains('?') {
        return false;
    }

    let lower = text.trim().to_lowercase();

    OPEN_WORDS
        .iter()
        .any(|word| lower.starts_with(word) || lower.contains(&format!(" {word} ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spark_kind_round_trips_through_wire_names() {
        let spark: Spark = serde_json::from_str(r#"{"type":"observation","text":"Nice spot."}"#).unwrap();

        assert_eq!(spark.kind, SparkKind::Observation);
        assert_eq!(spark.text, "Nice spot.");
    }

    #[test]
    fn open_question_is_counted() {
        let mut metrics = TrainingMetrics::default();
        metrics.record_user_turn("What do you usually order here?");

        assert_eq!(metrics.turns, 1);
        assert_eq!(metrics.open_questions, 1);
        assert_eq!(metrics.short_answers, 0);
    }

    #[test]
    fn short_answer_is_counted() {
        let mut metrics = TrainingMetrics::default();
        metrics.record_user_turn("Yeah, sure.");

        assert_eq!(metrics.short_answers, 1);
        assert_eq!(metrics.open_questions, 0);
    }

    #[test]
    fn closed_question_is_not_open() {
        let mut metrics = TrainingMetrics::default();
        metrics.record_user_turn("Do you come here often?");

        assert_eq!(metrics.open_questions, 0);
    }

    #[test]
    fn feedback_lesson_title_is_optional() {
        let feedback: FeedbackSummary =
            serde_json::from_str(r#"{"strengths":["warm opener","good follow-up"],"suggestion":"Slow down."}"#).unwrap();

        assert_eq!(feedback.strengths.len(), 2);
        assert!(feedback.lesson_title.is_none());
    }
}
