use std::process::ExitCode;

use clap::Parser;
use czpubtran::{ChapsClient, ChapsConfig, DepartureTime, QueryResult};
use tracing_subscriber::EnvFilter;

/// Find public transport connections with the CHAPS CRWS API
#[derive(Debug, Parser)]
#[command(name = "czpubtran")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Departure stop
    #[arg(required_unless_present = "list")]
    origin: Option<String>,

    /// Arrival stop
    #[arg(required_unless_present = "list")]
    destination: Option<String>,

    /// Timetable combination ID (e.g. ABCz)
    #[arg(required_unless_present = "list")]
    combination_id: Option<String>,

    /// Earliest departure, "HH:MM"
    start_time: Option<DepartureTime>,

    /// List the available timetable combination IDs and exit
    #[arg(long, conflicts_with_all = ["origin", "destination", "combination_id", "start_time"])]
    list: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// CRWS user ID. Anonymous access when empty
    #[arg(long, env = "CHAPS_USER_ID", default_value = "")]
    user_id: String,

    /// Request timeout in seconds
    #[arg(long, env = "CHAPS_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Connections requested per search
    #[arg(long, default_value_t = 2)]
    max_count: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("czpubtran=info")),
        )
        .init();

    let config = ChapsConfig::new()
        .with_user_id(cli.user_id)
        .with_timeout(cli.timeout_secs)
        .with_max_count(cli.max_count);

    let client = match ChapsClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create CRWS client: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.list {
        let ids = client.list_combination_ids().await;
        if ids.is_empty() {
            eprintln!("No timetable combinations available");
            return ExitCode::FAILURE;
        }
        for id in ids {
            println!("{id}");
        }
        return ExitCode::SUCCESS;
    }

    // clap enforces these unless --list was given
    let (Some(origin), Some(destination), Some(combination_id)) =
        (cli.origin, cli.destination, cli.combination_id)
    else {
        return ExitCode::FAILURE;
    };

    let result = match client
        .find_connection(&origin, &destination, &combination_id, cli.start_time)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            eprintln!("No connection: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Failed to encode result: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_result(&result);
    }

    ExitCode::SUCCESS
}

fn print_result(result: &QueryResult) {
    println!(
        "Connection from {} to {} using timetable {}",
        result.origin, result.destination, result.combination_id
    );
    println!("------------------------------------------------");
    println!("Departure: {}", result.departure.as_deref().unwrap_or("-"));
    println!("Duration: {}", result.duration.as_deref().unwrap_or("-"));
    println!("Short: {}", result.short_description());
    println!("Long:\n{}", result.long_description());
    println!("Delay: {}", result.delay_summary());

    if let Some(alternative) = result.alternative() {
        println!();
        println!("Next connection:");
        for leg in alternative {
            println!("{leg}");
        }
    }
}
