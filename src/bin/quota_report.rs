//! Offline report: runs the quota engine over a CSV export and prints the
//! dashboard report as JSON.
//!
//! Usage: `quota_report <feed.csv> <year> [months]`, where `months` is a
//! comma-separated list such as `Junho,Julho`. Without it, every month present
//! in the feed is used.

use sales_quota_api::engine::QuotaEngine;
use sales_quota_api::feed::FeedSnapshot;
use sales_quota_api::handlers::parse_months;
use sales_quota_api::models::FilterSelection;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        anyhow::bail!("usage: {} <feed.csv> <year> [months]", program_name(&args));
    }

    let feed_path = &args[1];
    let year: i32 = args[2]
        .parse()
        .map_err(|_| anyhow::anyhow!("year must be a number, got '{}'", args[2]))?;

    let engine = QuotaEngine::commercial_team()?;
    let snapshot = FeedSnapshot::load(feed_path, &engine).await?;

    let months = match args.get(3) {
        Some(raw) => parse_months(raw)?,
        None => engine
            .filter_options(&snapshot.records)
            .months
            .into_iter()
            .collect(),
    };

    let selection = FilterSelection::new(year, months);
    let report = engine.report(&snapshot.records, &selection);

    tracing::info!(
        "Report for {}: {} salespeople, {} sales",
        year,
        report.rows.len(),
        report.summary.total_realized
    );

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("quota_report", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_without_argv() {
        assert_eq!(program_name(&[]), "quota_report");
        assert_eq!(
            program_name(&["target/release/quota_report".to_string()]),
            "target/release/quota_report"
        );
    }
}
