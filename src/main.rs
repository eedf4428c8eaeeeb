use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use ffscraper::{extract, fetch, persist};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Scrape the ForexFactory weekly calendar into JSON and CSV files.
#[derive(Debug, Parser)]
#[command(name = "ffscraper", about = "ForexFactory economic-calendar scraper")]
struct Args {
    /// First day of the window, YYYY-MM-DD; defaults to today.
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Last day of the window, YYYY-MM-DD.
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Window length in days, used when no end date is given.
    #[arg(long, default_value_t = 7)]
    days: i64,

    /// Directory the output files are written to.
    #[arg(long, default_value = "data")]
    out_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();
    info!("startup");

    // ─── 2) resolve the requested window ─────────────────────────────
    let today = Utc::now().date_naive();
    let anchor = args.start_date.unwrap_or(today);
    let (monday, sunday) = extract::week::resolve_week(anchor);
    let (window_start, window_end) = match (args.start_date, args.end_date) {
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => (start, start + Duration::days(args.days)),
        _ => (monday, sunday),
    };
    info!(%anchor, %window_start, %window_end, "scraping calendar");

    // ─── 3) fetch the weekly page and extract ────────────────────────
    let client = fetch::build_client()?;
    let result = match fetch::fetch_calendar(&client, anchor).await {
        Ok(page) => extract::extract_range(
            &page,
            anchor,
            &window_start.to_string(),
            &window_end.to_string(),
        )?,
        Err(err) => {
            // fetch failures degrade to an empty result; EmptyWeekError
            // above propagates and fails the run
            warn!(error = %err, "fetch failed, no records extracted");
            extract::ExtractionResult::empty()
        }
    };

    // ─── 4) persist outputs ──────────────────────────────────────────
    let written = persist::write_outputs(&args.out_dir, &result)?;
    for path in &written {
        info!(path = %path.display(), "wrote");
    }

    info!(
        total_extracted = result.total_extracted,
        total_in_week = result.total_in_week,
        "done"
    );
    Ok(())
}
