//! Price Tracker - Amazon price-drop alerts
//!
//! Asks for a product URL, a drop percentage and an email address, then
//! checks the price on a fixed interval until it has dropped far enough.

use clap::Parser;
use price_tracker::prompt::{self, DROP_PROMPT, EMAIL_PROMPT, URL_PROMPT};
use price_tracker::{
    Config, EmailNotifier, InputError, PriceFetcher, TokioSleeper, TrackOutcome, Tracker,
    TrackingRequest,
};
use std::io;
use std::time::Duration;

/// Watch an Amazon product and get an email when its price drops
#[derive(Parser, Debug)]
#[command(name = "price_tracker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Amazon product URL (prompted for when omitted)
    #[arg(long)]
    url: Option<String>,

    /// Percentage drop that triggers the alert (prompted for when omitted)
    #[arg(long)]
    drop_percent: Option<f64>,

    /// Address to send the alert to (prompted for when omitted)
    #[arg(long)]
    email: Option<String>,

    /// Seconds between price checks
    #[arg(long, default_value_t = 3600)]
    interval_secs: u64,

    /// Stop after this many checks without a drop (default: never)
    #[arg(long)]
    max_checks: Option<u32>,
}

/// Fill in anything not given on the command line, in prompt order
fn build_request(args: Args) -> Result<TrackingRequest, InputError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let url = match args.url {
        Some(url) => url,
        None => prompt::ask(&mut input, &mut output, URL_PROMPT)?,
    };
    let drop_percent = match args.drop_percent {
        Some(drop) => drop,
        None => prompt::parse_percent(&prompt::ask(&mut input, &mut output, DROP_PROMPT)?)?,
    };
    let email = match args.email {
        Some(email) => email,
        None => prompt::ask(&mut input, &mut output, EMAIL_PROMPT)?,
    };

    Ok(TrackingRequest::new(url, drop_percent, email)?
        .with_interval(Duration::from_secs(args.interval_secs))?
        .with_max_checks(args.max_checks))
}

async fn run(args: Args) -> price_tracker::Result<TrackOutcome> {
    let config = Config::from_env()?;
    let request = build_request(args)?;

    let fetcher = PriceFetcher::new(config.api_key.clone(), config.provider.clone());
    let notifier = EmailNotifier::new(config.smtp.clone());
    let tracker = Tracker::new(fetcher, notifier, TokioSleeper);

    let cancel = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tracker.run(&request, cancel).await
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }

    let args = Args::parse();

    match run(args).await {
        Ok(outcome) => log::info!("Tracker finished: {:?}", outcome),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
