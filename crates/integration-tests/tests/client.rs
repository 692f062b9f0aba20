use axum::http::StatusCode;
use coach::{Client, DialogueTurn, Error, RepairKind, SparkContext, SparkKind, TrainingMetrics, safety};
use integration_tests::CompletionsMock;
use serde_json::{Value, json};

fn spark_items() -> Value {
    json!({"items": [
        {"type": "question", "text": "What's the book that made you love reading?"},
        {"type": "observation", "text": "This place smells like fresh espresso and old paper."},
        {"type": "theme", "text": "Small weekend rituals worth keeping."},
        {"type": "question", "text": "Which shelf do you always drift to first?"}
    ]})
}

fn coffee_date() -> SparkContext {
    SparkContext::new("Date — First coffee date", "Date — Thoughtful book-lover")
}

#[tokio::test]
async fn sparks_end_to_end() {
    let server = CompletionsMock::json(spark_items()).spawn().await;
    let client = Client::new(&server.api_config()).unwrap();

    let sparks = client.generate_sparks(&coffee_date()).await.unwrap();

    assert!((3..=5).contains(&sparks.len()));
    assert_eq!(sparks[0].kind, SparkKind::Question);
    assert_eq!(sparks[2].kind, SparkKind::Theme);

    for spark in &sparks {
        assert!(!safety::is_unsafe(&spark.text), "unsafe spark: {}", spark.text);
    }
}

#[tokio::test]
async fn sparks_survive_prose_wrapped_payloads() {
    let direct = CompletionsMock::json(spark_items()).spawn().await;
    let wrapped = CompletionsMock::text(format!("Here are some ideas:\n{}\nHave fun!", spark_items()))
        .spawn()
        .await;

    let direct_sparks = Client::new(&direct.api_config())
        .unwrap()
        .generate_sparks(&coffee_date())
        .await
        .unwrap();

    let wrapped_sparks = Client::new(&wrapped.api_config())
        .unwrap()
        .generate_sparks(&coffee_date())
        .await
        .unwrap();

    assert_eq!(direct_sparks, wrapped_sparks);
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let server = CompletionsMock::json(spark_items()).spawn().await;
    let client = Client::new(&server.api_config_without_key()).unwrap();

    let result = client.generate_sparks(&coffee_date()).await;

    assert!(matches!(result, Err(Error::MissingApiKey)));
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn rate_limited_primary_falls_back_once() {
    let server = CompletionsMock::json(spark_items())
        .fail_first(1, StatusCode::TOO_MANY_REQUESTS)
        .spawn()
        .await;

    let client = Client::new(&server.api_config()).unwrap();
    let sparks = client.generate_sparks(&coffee_date()).await.unwrap();

    assert_eq!(sparks.len(), 4);
    assert_eq!(server.hits(), 2);
    assert_eq!(server.models_seen(), ["4o-nano", "gpt-4o-mini"]);
}

#[tokio::test]
async fn rate_limited_fallback_surfaces_a_server_error_after_two_attempts() {
    let server = CompletionsMock::json(spark_items())
        .fail_first(2, StatusCode::TOO_MANY_REQUESTS)
        .spawn()
        .await;

    let client = Client::new(&server.api_config()).unwrap();
    let result = client.generate_sparks(&coffee_date()).await;

    assert!(
        matches!(result, Err(Error::Server(ref message)) if message.contains("429")),
        "expected a 429 server error"
    );
    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn requesting_the_fallback_model_itself_gets_a_single_attempt() {
    let server = CompletionsMock::json(spark_items())
        .fail_first(1, StatusCode::TOO_MANY_REQUESTS)
        .spawn()
        .await;

    let mut api = server.api_config();
    api.model = "gpt-4o-mini".to_string();

    let client = Client::new(&api).unwrap();
    let result = client.generate_sparks(&coffee_date()).await;

    assert!(matches!(result, Err(Error::Server(_))));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_server_error() {
    let api = config::ApiConfig {
        base_url: "http://127.0.0.1:1/v1".to_string(),
        ..CompletionsMock::text("unused").spawn().await.api_config()
    };

    let client = Client::new(&api).unwrap();
    let result = client.daily_advice("en").await;

    assert!(matches!(result, Err(Error::Server(_))));
}

#[tokio::test]
async fn feedback_decodes_the_summary_shape() {
    let server = CompletionsMock::json(json!({
        "strengths": ["Warm, specific opener", "Good follow-up on details"],
        "suggestion": "Let a pause breathe before the next question.",
        "lesson_title": "Open questions"
    }))
    .spawn()
    .await;

    let client = Client::new(&server.api_config()).unwrap();

    let transcript = [DialogueTurn::ai("Hey!"), DialogueTurn::user("Hi, how's it going?")];
    let mut metrics = TrainingMetrics::default();
    metrics.record_user_turn("Hi, how's it going?");

    let feedback = client.generate_feedback(&transcript, &metrics, "en").await.unwrap();

    assert_eq!(feedback.strengths.len(), 2);
    assert_eq!(feedback.lesson_title.as_deref(), Some("Open questions"));
}

#[tokio::test]
async fn feedback_without_json_is_a_decode_error() {
    let server = CompletionsMock::text("I could not rate this conversation.").spawn().await;
    let client = Client::new(&server.api_config()).unwrap();

    let result = client
        .generate_feedback(&[DialogueTurn::user("hi")], &TrainingMetrics::default(), "en")
        .await;

    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn repair_suggestion_is_a_single_trimmed_line() {
    let server = CompletionsMock::text("\nMaybe ask which shelf she drifts to first.\n").spawn().await;
    let client = Client::new(&server.api_config()).unwrap();

    let suggestion = client
        .repair_suggestion(
            RepairKind::Rephrase,
            "Book Lover, thoughtful and curious",
            "Light first date",
            &[DialogueTurn::user("so, books, huh?")],
            &["Ask about her favorite author.".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(suggestion, "Maybe ask which shelf she drifts to first.");
}

#[tokio::test]
async fn daily_advice_returns_trimmed_text() {
    let server = CompletionsMock::text("  Lead with a detail you noticed.  ").spawn().await;
    let client = Client::new(&server.api_config()).unwrap();

    let tip = client.daily_advice("en").await.unwrap();

    assert_eq!(tip, "Lead with a detail you noticed.");
}

#[tokio::test]
async fn daily_topics_are_capped_at_the_requested_count() {
    let server = CompletionsMock::json(json!({
        "topics": ["Local Cafés", "City Walks", "Concerts", "Hobbies", "Travel Tips", "Podcasts"]
    }))
    .spawn()
    .await;

    let client = Client::new(&server.api_config()).unwrap();
    let topics = client.daily_topics(4, "en").await.unwrap();

    assert_eq!(topics.len(), 4);
    assert_eq!(topics[0], "Local Cafés");
}
