use std::path::PathBuf;

use alero::dispatch::{DispatchRules, format_dispatch_date, format_window};
use alero_app::domain::dispatch::{DEFAULT_TIME_ZONE, DispatchService};
use clap::Args;
use jiff::{Timestamp, tz::TimeZone};
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Args)]
pub(crate) struct DispatchArgs {
    /// Product category label; may be repeated
    #[arg(long = "category", required = true)]
    categories: Vec<String>,

    /// Instant to quote from (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<Timestamp>,

    /// YAML rule table; the built-in table is used when omitted
    #[arg(long, env = "DISPATCH_RULES_PATH")]
    rules: Option<PathBuf>,

    /// Store time zone
    #[arg(long, env = "STORE_TIME_ZONE", default_value = DEFAULT_TIME_ZONE)]
    time_zone: String,
}

pub(crate) fn run(args: &DispatchArgs) -> Result<(), String> {
    let rules = match &args.rules {
        Some(path) => DispatchRules::from_path(path)
            .map_err(|error| format!("failed to load dispatch rules: {error}"))?,
        None => DispatchRules::standard(),
    };

    let time_zone = TimeZone::get(&args.time_zone)
        .map_err(|error| format!("unknown time zone {}: {error}", args.time_zone))?;

    let service = DispatchService::new(rules, time_zone);
    let at = args.at.unwrap_or_else(Timestamp::now);

    let mut builder = Builder::default();

    builder.push_record(["Category", "Rule", "Date", "Dispatch", "Window"]);

    for category in &args.categories {
        let quote = service
            .quote(category, at)
            .map_err(|error| format!("failed to quote {category}: {error}"))?;

        builder.push_record([
            category.clone(),
            quote.rule_key.clone(),
            quote.date.to_string(),
            format_dispatch_date(quote.date),
            format_window(quote.window),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    println!("{table}");

    Ok(())
}
