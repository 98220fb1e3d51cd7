use std::process;
use std::time::Duration;

use clap::Parser;
use tracing::debug;

use check_sl_delay::api::{SlClient, TrafficType};
use check_sl_delay::delay;
use check_sl_delay::error::CheckError;
use check_sl_delay::report::{self, Report};
use check_sl_delay::state::{determine_state, ServiceState};

/// check_sl_delay connects to the SL API to determine the percentage of
/// delayed departures for any given site-id.
#[derive(Parser, Debug)]
#[command(name = "check_sl_delay", version, about)]
#[command(long_about = "check_sl_delay connects to the SL API to determine the percentage of \
delayed departures for any given site-id.

The site-id can be found using the SL Platsuppslag API:
    https://www.trafiklab.se/api/sl-platsuppslag/dokumentation

Example: check_sl_delay -p 10 -m 1 -i 1002 -T METRO -w 20 -c 30

The above example will check the site 1002 (T-Centralen) for all METRO \
departures in the coming 10 minutes. It will warn if the percentage of \
departures that are more than 1 minute late is 20% or more of the total \
amount of departures for the time period. It will crit if the same \
percentage is 30% or more.")]
struct Args {
    /// Warning threshold (0-100), warning if the percentage of departures
    /// having delays above --minutes is greater or equal than this option.
    /// Must be less than --critical.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    warning: Option<u8>,

    /// Critical threshold (0-100), critical if the percentage of departures
    /// having delays above --minutes is greater or equal than this option.
    /// Must be greater than --warning.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    critical: Option<u8>,

    /// Site-id to check.
    #[arg(short = 'i', long, value_parser = clap::value_parser!(u32).range(1..))]
    site_id: u32,

    /// Delay threshold, in minutes.
    #[arg(short, long)]
    minutes: u32,

    /// Time period to check, in minutes.
    #[arg(short, long)]
    period: u32,

    /// Plugin timeout, in seconds.
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Traffic type to check.
    #[arg(short = 'T', long, value_enum)]
    traffic_type: TrafficType,

    /// API key for the site lookup (SL Platsuppslag) API.
    #[arg(short = 'a', long)]
    site_api_key: String,

    /// API key for the real-time departures API.
    #[arg(short = 'A', long)]
    departure_api_key: String,

    /// Use 2 times for higher verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Configuration problems are rejected before any fetch happens.
    if let Some(message) = validate_args(&args) {
        println!("{}", report::config_error_line(&message));
        process::exit(ServiceState::ConfigError.exit_code());
    }

    let (line, state) = run(&args);
    println!("{line}");
    process::exit(state.exit_code());
}

/// Run the pipeline under a single wall-clock deadline and produce the
/// status line plus the verdict it carries. Partial results are discarded
/// on timeout, never partially reported.
fn run(args: &Args) -> (String, ServiceState) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            return (
                format!("{}: {}", ServiceState::Unknown.label(), e),
                ServiceState::Unknown,
            )
        }
    };

    let deadline = Duration::from_secs(args.timeout);
    let outcome = runtime.block_on(async { tokio::time::timeout(deadline, check(args)).await });

    match outcome {
        Ok(Ok(report)) => (report.render(args.verbose >= 1), report.state),
        Ok(Err(err)) => (report::failure_line(&err), err.state()),
        Err(_elapsed) => {
            let err = CheckError::Timeout {
                seconds: args.timeout,
            };
            (report::failure_line(&err), err.state())
        }
    }
}

/// Fetch, evaluate, and decide: the whole check for one invocation.
async fn check(args: &Args) -> Result<Report, CheckError> {
    let client = SlClient::builder()
        .site_api_key(&args.site_api_key)
        .departure_api_key(&args.departure_api_key)
        .build();

    let site_name = client.fetch_site(args.site_id).await?;
    let response = client.fetch_departures(args.site_id, args.period).await?;

    let percentage =
        delay::delayed_percentage(&response.response_data, args.traffic_type, args.minutes)?;
    debug!(percentage, "percentage of departures delayed above threshold");

    let state = determine_state(percentage, args.warning, args.critical);

    Ok(Report {
        state,
        percentage,
        site_name: Some(site_name),
        minutes: args.minutes,
        warning: args.warning,
        critical: args.critical,
    })
}

/// Input validation owned by the CLI layer: threshold ordering and API key
/// shape. Returns the rejection message, if any.
fn validate_args(args: &Args) -> Option<String> {
    if let (Some(warning), Some(critical)) = (args.warning, args.critical) {
        if warning > critical {
            return Some(format!(
                "--warning ({warning}) higher than --critical ({critical})"
            ));
        }
    }
    if args.site_api_key.chars().count() != 32 {
        return Some("--site-api-key must be a 32 characters long string.".to_string());
    }
    if args.departure_api_key.chars().count() != 32 {
        return Some("--departure-api-key must be a 32 characters long string.".to_string());
    }
    None
}

/// Diagnostics go to stderr so the status line on stdout stays parsable.
fn init_tracing(verbosity: u8) {
    let level = if verbosity >= 2 { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
        ))
        .with_writer(std::io::stderr)
        .init();
}
