use anyhow::Context;
use serde::Serialize;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wealthengine::{AddressLookup, Batch, BatchID, Config, EmailLookup, PhoneLookup, WealthEngine};

const USAGE: &str = "\
Usage: wealthengine <command> [args]

Commands:
  match-email   <email> <last_name> <first_name> [full|basic]
  match-phone   <phone> <last_name> <first_name> [full|basic]
  match-address <last_name> <first_name> <address_line1> <city> <state> <zip> [full|basic]
  score-email   <email> <last_name> <first_name> <model>
  score-phone   <phone> <last_name> <first_name> <model>
  score-address <last_name> <first_name> <address_line1> <city> <state> <zip> <model>
  batch-submit  <batch.json> [full|basic]
  batch-status  <batch_id>
  batch-results <batch_id>
  batch-wait    <batch_id> [poll_interval_secs]

Environment:
  WEALTHENGINE_API_KEY, WEALTHENGINE_MODE (Dev|Prod),
  WEALTHENGINE_BASE_URL (optional), WEALTHENGINE_TIMEOUT_SECS (optional)";

/// Fetches the positional argument at `idx`, or fails with the usage text.
fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("missing <{}>\n\n{}", name, USAGE))
}

fn opt_arg<'a>(args: &'a [String], idx: usize) -> &'a str {
    args.get(idx).map(String::as_str).unwrap_or("")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn address_lookup(args: &[String]) -> anyhow::Result<AddressLookup> {
    Ok(AddressLookup {
        last_name: arg(args, 0, "last_name")?.to_string(),
        first_name: arg(args, 1, "first_name")?.to_string(),
        address_line1: arg(args, 2, "address_line1")?.to_string(),
        address_line2: String::new(),
        city: arg(args, 3, "city")?.to_string(),
        state: arg(args, 4, "state")?.to_string(),
        zip: arg(args, 5, "zip")?.to_string(),
    })
}

fn email_lookup(args: &[String]) -> anyhow::Result<EmailLookup> {
    Ok(EmailLookup {
        email: arg(args, 0, "email")?.to_string(),
        last_name: arg(args, 1, "last_name")?.to_string(),
        first_name: arg(args, 2, "first_name")?.to_string(),
    })
}

fn phone_lookup(args: &[String]) -> anyhow::Result<PhoneLookup> {
    Ok(PhoneLookup {
        phone: arg(args, 0, "phone")?.to_string(),
        last_name: arg(args, 1, "last_name")?.to_string(),
        first_name: arg(args, 2, "first_name")?.to_string(),
    })
}

/// Polls a batch job until it reports a terminal status, then fetches its results.
async fn wait_for_batch(we: &WealthEngine, id: &BatchID, interval: Duration) -> anyhow::Result<()> {
    loop {
        let status = we.get_batch_job_status(id).await?;
        if status.is_failed() {
            anyhow::bail!("batch job {} failed with status {:?}", id, status.status);
        }
        if status.is_complete() {
            break;
        }
        tracing::info!(
            "Batch job {} is {:?}, checking again in {}s",
            id,
            status.status,
            interval.as_secs()
        );
        tokio::time::sleep(interval).await;
    }

    print_json(&we.get_batch_job_results(id).await?)
}

/// Entry point for the WealthEngine command line client.
///
/// Loads configuration from the environment, builds the client and runs a
/// single command, printing the decoded response as JSON.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wealthengine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, args)) = argv.split_first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let config = Config::from_env()?;
    let we = WealthEngine::from_config(&config)?;
    tracing::info!("✓ WealthEngine client initialized: {}", we.base_url());

    match command.as_str() {
        "match-email" => {
            let lookup = email_lookup(args)?;
            print_json(&we.match_one_by_email(&lookup, opt_arg(args, 3)).await?)
        }
        "match-phone" => {
            let lookup = phone_lookup(args)?;
            print_json(&we.match_one_by_phone(&lookup, opt_arg(args, 3)).await?)
        }
        "match-address" => {
            let lookup = address_lookup(args)?;
            print_json(&we.match_one_by_address(&lookup, opt_arg(args, 6)).await?)
        }
        "score-email" => {
            let model = arg(args, 3, "model")?;
            print_json(&we.score_one_by_email(&email_lookup(args)?, model).await?)
        }
        "score-phone" => {
            let model = arg(args, 3, "model")?;
            print_json(&we.score_one_by_phone(&phone_lookup(args)?, model).await?)
        }
        "score-address" => {
            let model = arg(args, 6, "model")?;
            print_json(&we.score_one_by_address(&address_lookup(args)?, model).await?)
        }
        "batch-submit" => {
            let path = arg(args, 0, "batch.json")?;
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path))?;
            let batch: Batch =
                serde_json::from_str(&raw).with_context(|| format!("invalid batch file {}", path))?;
            print_json(&we.find_many(&batch, opt_arg(args, 1)).await?)
        }
        "batch-status" => {
            let id = BatchID::new(arg(args, 0, "batch_id")?);
            print_json(&we.get_batch_job_status(&id).await?)
        }
        "batch-results" => {
            let id = BatchID::new(arg(args, 0, "batch_id")?);
            print_json(&we.get_batch_job_results(&id).await?)
        }
        "batch-wait" => {
            let id = BatchID::new(arg(args, 0, "batch_id")?);
            let secs = match args.get(1) {
                Some(raw) => raw
                    .parse::<u64>()
                    .with_context(|| format!("poll interval must be whole seconds, got {}", raw))?,
                None => 30,
            };
            wait_for_batch(&we, &id, Duration::from_secs(secs)).await
        }
        other => anyhow::bail!("unknown command {:?}\n\n{}", other, USAGE),
    }
}
