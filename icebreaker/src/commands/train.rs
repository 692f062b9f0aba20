use std::io::Write as _;

use coach::{Client, DialogueTurn, FeedbackSummary, RepairKind, TrainingMetrics, presets};
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::args::TrainArgs;

const OPENING_LINE: &str = "Hey! How's your evening going so far?";

pub(crate) async fn run(client: &Client, args: TrainArgs) -> anyhow::Result<()> {
    let persona = match &args.persona {
        Some(id) => presets::persona(id).ok_or_else(|| anyhow::anyhow!("unknown persona id: {id}"))?,
        None => presets::random_personas(1)
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("the persona catalog is empty"))?,
    };

    let scenario = presets::SCENARIOS
        .iter()
        .find(|scenario| scenario.id == persona.scenario_id)
        .ok_or_else(|| anyhow::anyhow!("persona {} has no scenario", persona.id))?;

    let persona_description = format!("{}, {}", persona.title, persona.description);

    println!("Training with {} ({})", persona.title, scenario.description);
    println!("Type a message. Commands: /rephrase, /pivot, /open, /quit");
    println!();
    println!("Partner: {OPENING_LINE}");

    let mut transcript = vec![DialogueTurn::ai(OPENING_LINE)];
    let mut metrics = TrainingMetrics::default();
    let mut suggested: Vec<String> = Vec::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let text = line.trim();

        if text.is_empty() {
            continue;
        }

        if text == "/quit" {
            break;
        }

        if let Some(kind) = repair_kind(text) {
            metrics.record_hint();

            match client
                .repair_suggestion(kind, &persona_description, scenario.description, &transcript, &suggested)
                .await
            {
                Ok(suggestion) => {
                    println!("Hint: {suggestion}");
                    transcript.push(DialogueTurn::hint(suggestion.clone()));
                    suggested.push(suggestion);
                }
                Err(e) => log::warn!("No suggestion available: {e}"),
            }

            continue;
        }

        metrics.record_user_turn(text);
        transcript.push(DialogueTurn::user(text));

        let mut stream = client
            .stream_reply(&persona_description, scenario.description, &transcript, &args.locale)
            .await?;

        print!("Partner: ");
        std::io::stdout().flush()?;

        let mut reply = String::new();

        while let Some(fragment) = stream.next().await {
            match fragment {
                Ok(fragment) => {
                    print!("{fragment}");
                    std::io::stdout().flush()?;
                    reply.push_str(&fragment);
                }
                Err(e) => {
                    log::error!("Reply stream failed: {e}");
                    break;
                }
            }
        }

        println!();

        if !reply.is_empty() {
            transcript.push(DialogueTurn::ai(reply));
        }
    }

    if metrics.turns > 0 {
        match client.generate_feedback(&transcript, &metrics, &args.locale).await {
            Ok(feedback) => print_feedback(&feedback),
            Err(e) => log::warn!("Feedback unavailable: {e}"),
        }

        for issue in coach::growth::derive(&[metrics]).into_iter().take(2) {
            println!("  Growth: {} ({})", issue.title, issue.hint);
        }
    }

    Ok(())
}

fn repair_kind(text: &str) -> Option<RepairKind> {
    match text {
        "/rephrase" => Some(RepairKind::Rephrase),
        "/pivot" => Some(RepairKind::Pivot),
        "/open" => Some(RepairKind::Open),
        _ => None,
    }
}

fn print_feedback(feedback: &FeedbackSummary) {
    println!();
    println!("Session feedback:");

    for strength in &feedback.strengths {
        println!("  + {strength}");
    }

    println!("  Try: {}", feedback.suggestion);

    if let Some(title) = &feedback.lesson_title {
        println!("  Lesson: {title}");
    }
}
