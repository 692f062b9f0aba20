//! Prompt construction for every operation.
//!
//! Each builder returns the full ordered message sequence for one call. The
//! first message is always the system message; transcript history follows as
//! alternating user/assistant turns.

use std::fmt::Write;

use crate::{
    messages::ChatMessage,
    model::{DialogueTurn, RepairKind, SparkContext, TrainingMetrics, TurnRole},
};

/// How many trailing transcript turns are sent with a streaming reply.
const TRANSCRIPT_WINDOW: usize = 10;

pub(crate) fn sparks(context: &SparkContext) -> Vec<ChatMessage> {
    let system = "You are Icebreaker, generating light, safe, contemporary conversation sparks for adults 30+. \
         Avoid politics, religion, explicit content, or controversy. Prefer positive, neutral topics. \
         Provide variety and freshness. \
         Reply with a strict JSON object: {\"items\":[{\"type\":\"question|observation|theme\",\"text\":\"...\"}]}.";

    let mut user = format!(
        "Situation: {}\nAudience: {}\nLocale: {}\nConstraints: 3\u{2013}5 items; mix of questions, observations, themes; brief (1\u{2013}2 lines each).",
        context.situation, context.audience, context.locale
    );

    if let Some(tone) = &context.tone {
        let _ = write!(user, "\nTone: {tone}");
    }

    if let Some(length) = &context.length {
        let _ = write!(user, "\nLength: {length}");
    }

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

pub(crate) fn reply(persona: &str, context: &str, transcript: &[DialogueTurn], locale: &str) -> Vec<ChatMessage> {
    let system = format!(
        "You role-play a realistic persona in a casual setting. Keep replies 1\u{2013}3 sentences, friendly, \
         and natural. Seed subtle hooks the user can pick up. Don't ask two questions in a row. \
         Respect safety policy. Persona: {persona} Context: {context} Locale: {locale}"
    );

    let mut messages = vec![ChatMessage::system(system)];

    let window_start = transcript.len().saturating_sub(TRANSCRIPT_WINDOW);

    for turn in &transcript[window_start..] {
        let message = match turn.role {
            TurnRole::User => ChatMessage::user(&turn.text),
            TurnRole::Ai | TurnRole::Hint => ChatMessage::assistant(&turn.text),
        };

        messages.push(message);
    }

    messages
}

pub(crate) fn feedback(transcript: &[DialogueTurn], metrics: &TrainingMetrics, locale: &str) -> Vec<ChatMessage> {
    let system = format!(
        "You are a warm, practical conversation coach reviewing a finished training dialogue. \
         Reply with a strict JSON object: \
         {{\"strengths\":[\"...\",\"...\"],\"suggestion\":\"...\",\"lesson_title\":\"...\"}}. \
         Exactly two strengths, one concrete suggestion, and a short optional lesson title. \
         Locale: {locale}"
    );

    let user = format!(
        "Transcript:\n{}\n\nMetrics: turns={}, short answers={}, open questions={}, hints shown={}",
        render_transcript(transcript),
        metrics.turns,
        metrics.short_answers,
        metrics.open_questions,
        metrics.hints_shown
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

pub(crate) fn repair(
    kind: RepairKind,
    persona: &str,
    context: &str,
    transcript: &[DialogueTurn],
    avoid: &[String],
) -> Vec<ChatMessage> {
    let system = format!(
        "You are a discreet conversation coach whispering one line the user could say next. \
         Reply with the line only: no quotes, no commentary. Persona: {persona} Context: {context}"
    );

    let ask = match kind {
        RepairKind::Rephrase => "Rephrase the user's last line so it lands more naturally",
        RepairKind::Pivot => "Offer a light pivot to a nearby, safer topic",
        RepairKind::Open => "Offer one open question that invites a short story",
    };

    let mut user = format!("{ask}.\nTranscript:\n{}", render_transcript(transcript));

    if !avoid.is_empty() {
        user.push_str("\nDo not repeat any of these earlier suggestions:");

        for line in avoid {
            let _ = write!(user, "\n- {line}");
        }
    }

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

pub(crate) fn daily_advice(locale: &str) -> Vec<ChatMessage> {
    let system = "You are a concise conversation coach. Reply with the tip only, one sentence, no preamble.";

    let user = format!(
        "Give one practical tip (max 140 characters) for starting and sustaining casual conversations today. Locale: {locale}"
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

pub(crate) fn daily_topics(count: usize, locale: &str) -> Vec<ChatMessage> {
    let system = "You suggest light, safe, contemporary conversation topics for adults. \
         Reply with a strict JSON object: {\"topics\":[\"...\"]}.";

    let user = format!("Suggest {count} topics as short labels of 1\u{2013}3 words each. Locale: {locale}");

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

fn render_transcript(transcript: &[DialogueTurn]) -> String {
    let mut rendered = String::new();

    for turn in transcript {
        let speaker = match turn.role {
            TurnRole::User => "User",
            TurnRole::Ai => "Partner",
            TurnRole::Hint => "Hint",
        };

        let _ = writeln!(rendered, "{speaker}: {}", turn.text);
    }

    rendered
}

#[cfg(test)]
mod tests {
    use crate::messages::Role;

    use super::*;

    #[test]
    fn every_prompt_starts_with_a_system_message() {
        let context = SparkContext::new("Coffee date", "Book lover");
        let transcript = [DialogueTurn::ai("Hey!")];
        let metrics = TrainingMetrics::default();

        let prompts = [
            sparks(&context),
            reply("persona", "context", &transcript, "en"),
            feedback(&transcript, &metrics, "en"),
            repair(RepairKind::Open, "persona", "context", &transcript, &[]),
            daily_advice("en"),
            daily_topics(4, "en"),
        ];

        for messages in prompts {
            assert_eq!(messages[0].role, Role::System);
        }
    }

    #[test]
    fn reply_sends_only_the_last_ten_turns() {
        let transcript: Vec<_> = (0..25)
            .map(|i| {
                if i % 2 == 0 {
                    DialogueTurn::user(format!("user {i}"))
                } else {
                    DialogueTurn::ai(format!("ai {i}"))
                }
            })
            .collect();

        let messages = reply("persona", "context", &transcript, "en");

        // System message plus the window.
        assert_eq!(messages.len(), 11);
        assert_eq!(messages[1].content, "ai 15");
        assert_eq!(messages[10].content, "user 24");
    }

    #[test]
    fn hint_turns_are_serialized_as_assistant() {
        let transcript = [DialogueTurn::user("hello"), DialogueTurn::hint("try asking about books")];

        let messages = reply("persona", "context", &transcript, "en");

        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
    }

    #[test]
    fn spark_prompt_carries_optional_hints() {
        let mut context = SparkContext::new("Gym", "Casual runner");
        context.tone = Some("playful".to_string());
        context.length = Some("one-liners".to_string());

        let messages = sparks(&context);

        assert!(messages[1].content.contains("Tone: playful"));
        assert!(messages[1].content.contains("Length: one-liners"));
    }

    #[test]
    fn repair_prompt_lists_lines_to_avoid() {
        let transcript = [DialogueTurn::user("so, read anything good?")];
        let avoid = ["Ask about her favorite shelf.".to_string()];

        let messages = repair(RepairKind::Rephrase, "persona", "context", &transcript, &avoid);

        assert!(messages[1].content.contains("- Ask about her favorite shelf."));
    }

    #[test]
    fn transcript_rendering_labels_speakers() {
        let transcript = [DialogueTurn::user("hi"), DialogueTurn::ai("hey"), DialogueTurn::hint("smile")];

        let rendered = render_transcript(&transcript);

        assert_eq!(rendered, "User: hi\nPartner: hey\nHint: smile\n");
    }
}
