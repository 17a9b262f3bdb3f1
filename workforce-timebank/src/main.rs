use workforce_timebank::config::{load_policy_or_default, AppConfig, DEFAULT_PORT};
use workforce_timebank::display::{print_ledger, write_ledger_to_file};
use workforce_timebank::parser::{build_ledgers, load_daily_deltas};
use workforce_timebank::web;

fn print_usage() {
    println!("Usage:");
    println!("  workforce-timebank web [port]");
    println!("  workforce-timebank import <daily.csv> [policy.json]");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("web") => {
            let port = args.get(2)
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT);
            let config = AppConfig::from_env(port)?;

            log::info!("Starting web server on {}:{}", config.bind_address, config.port);
            log::info!("Time bank policy: {:?}", config.policy);

            web::start_server(config).await?;
            Ok(())
        }
        Some("import") => {
            let Some(csv_path) = args.get(2) else {
                print_usage();
                return Ok(());
            };
            let policy = load_policy_or_default(args.get(3).map(String::as_str))?;

            println!("Loading daily deltas from {}...", csv_path);
            let deltas = load_daily_deltas(csv_path)?;
            println!("Loaded {} employee-day records", deltas.len());

            let ledgers = build_ledgers(&deltas, &policy);
            for ledger in ledgers.values() {
                print_ledger(ledger, &policy);
            }

            println!("\n=== Writing Ledgers to Files ===");
            for (employee_id, ledger) in &ledgers {
                let filename = format!("timebank_{}.txt", employee_id);
                write_ledger_to_file(ledger, &policy, &filename)?;
                println!("  - {}", filename);
            }
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}
