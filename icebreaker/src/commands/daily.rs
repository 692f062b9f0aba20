use coach::Client;
use jiff::Zoned;

use crate::args::{LocaleArgs, TopicsArgs};

/// Canned tips shown when the API call fails; rotated by day.
const DEFAULT_TIPS: &[&str] = &[
    "Open with something specific you noticed.",
    "Avoid yes/no questions; invite short stories.",
    "Mirror a keyword and ask a light follow-up.",
    "Share a small detail, then ask about theirs.",
    "Close with a kind wrap-up and option to continue.",
];

const DEFAULT_TOPICS: &[&str] = &[
    "Local Cafés",
    "Weekend Plans",
    "Books & Podcasts",
    "City Walks",
    "Small Passions",
    "Concerts",
    "Hobbies",
    "Travel Tips",
];

pub(crate) async fn tip(client: &Client, args: LocaleArgs) -> anyhow::Result<()> {
    let tip = match client.daily_advice(&args.locale).await {
        Ok(tip) => tip,
        Err(e) => {
            log::warn!("Daily tip unavailable, showing a default: {e}");
            DEFAULT_TIPS[day_of_year() % DEFAULT_TIPS.len()].to_string()
        }
    };

    println!("{tip}");

    Ok(())
}

pub(crate) async fn topics(client: &Client, args: TopicsArgs) -> anyhow::Result<()> {
    let topics = match client.daily_topics(args.count, &args.locale).await {
        Ok(topics) if !topics.is_empty() => topics,
        Ok(_) => {
            log::warn!("The model returned no topics, showing defaults");
            default_topics(args.count)
        }
        Err(e) => {
            log::warn!("Daily topics unavailable, showing defaults: {e}");
            default_topics(args.count)
        }
    };

    for topic in topics {
        println!("- {topic}");
    }

    Ok(())
}

fn default_topics(count: usize) -> Vec<String> {
    let offset = day_of_year() % DEFAULT_TOPICS.len();

    DEFAULT_TOPICS
        .iter()
        .cycle()
        .skip(offset)
        .take(count.min(DEFAULT_TOPICS.len()))
        .map(|topic| topic.to_string())
        .collect()
}

fn day_of_year() -> usize {
    Zoned::now().date().day_of_year() as usize
}
