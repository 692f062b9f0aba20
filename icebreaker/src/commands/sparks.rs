use coach::{Client, SparkContext, presets, safety};
use jiff::Zoned;

use crate::args::SparksArgs;

pub(crate) async fn run(client: &Client, args: SparksArgs) -> anyhow::Result<()> {
    // Rotate through the preset catalogs when no context is given, so a bare
    // `icebreaker sparks` changes with the day.
    let day = Zoned::now().date().day_of_year() as usize;

    let situation = args
        .situation
        .unwrap_or_else(|| presets::SITUATIONS[day % presets::SITUATIONS.len()].to_string());

    let audience = args
        .audience
        .unwrap_or_else(|| presets::AUDIENCES[day % presets::AUDIENCES.len()].to_string());

    println!("{situation} / {audience}");
    println!();

    let context = SparkContext {
        situation,
        audience,
        locale: args.locale,
        tone: args.tone,
        length: args.length,
    };

    let sparks = client.generate_sparks(&context).await?;

    let mut shown = 0;

    for spark in &sparks {
        if safety::is_unsafe(&spark.text) {
            log::warn!("Dropping a spark that failed the safety filter");
            continue;
        }

        println!("[{}] {}", spark.kind.label(), spark.text);
        shown += 1;
    }

    if shown == 0 {
        println!("No sparks this time. Try a different situation or audience.");
    }

    Ok(())
}
