//! Demo binary: load a JSON work-history file, match it against a job
//! posting, and print ranked results — or propose project groupings
//! with `--group <strategy>`.
//!
//! Usage:
//!   matcher <history.json> <posting.txt>
//!   matcher <history.json> --group company_time

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matcher::{
    Config, GroupingStrategy, InMemoryStore, MatchEngine, MatchResult, SourceRecord,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (history_path, mode) = match args.as_slice() {
        [history, flag, strategy] if flag == "--group" => {
            (history.clone(), Mode::Group(strategy.parse()?))
        }
        [history, posting] => (history.clone(), Mode::Match(posting.clone())),
        _ => bail!("usage: matcher <history.json> (<posting.txt> | --group <strategy>)"),
    };

    let raw = std::fs::read_to_string(&history_path)
        .with_context(|| format!("failed to read work history from '{history_path}'"))?;
    let records: Vec<SourceRecord> =
        serde_json::from_str(&raw).context("work history file is not a valid record array")?;
    let store = InMemoryStore::from_records(records);
    info!(records = store.len(), "loaded work history");

    let engine = MatchEngine::new(config);

    match mode {
        Mode::Match(posting_path) => {
            let posting = std::fs::read_to_string(&posting_path)
                .with_context(|| format!("failed to read job posting from '{posting_path}'"))?;
            let report = engine.match_job(&store, &posting).await?;

            println!(
                "Extracted {} keywords ({} technologies)",
                report.keywords.required_terms.len(),
                report.keywords.technology_terms.len()
            );
            print_pool("Resume components", &report.components);
            print_pool("Work records", &report.work_records);
            print_pool("Projects", &report.projects);
        }
        Mode::Group(strategy) => {
            let proposals = engine.propose_groups(&store, strategy).await?;
            println!("{} proposed groupings ({strategy}):", proposals.len());
            for proposal in &proposals {
                println!(
                    "  {} — {} records, ${:.2}{}",
                    proposal.name,
                    proposal.aggregate.record_count,
                    proposal.aggregate.total_value,
                    proposal
                        .aggregate
                        .mean_rating
                        .map(|r| format!(", avg rating {r:.1}"))
                        .unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

enum Mode {
    Match(String),
    Group(GroupingStrategy),
}

fn print_pool(label: &str, results: &[MatchResult]) {
    println!("\n{label}:");
    for result in results.iter().take(10) {
        println!(
            "  [{:>5.1}] {}{}",
            result.score,
            result.title,
            if result.technology_bonus_applied {
                " (tech match)"
            } else {
                ""
            }
        );
        if !result.matched_terms.is_empty() {
            println!("          matched: {}", result.matched_terms.join(", "));
        }
    }
    if results.is_empty() {
        println!("  (none)");
    }
}
