//! cwrkit CLI - Convert CSV catalogs to CWR-style transmissions
//!
//! # Main Commands
//!
//! ```bash
//! cwrkit convert works.csv -o works.cwr   # Convert a CSV file
//! cwrkit serve                            # Start HTTP server (port 3000)
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! cwrkit parse works.csv                  # Just parse CSV to JSON rows
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cwrkit::{
    api::logs::log_error, convert_file, parse_file_auto, pipeline::format_delimiter, Config,
    ConvertOptions, JobLog,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cwrkit")]
#[command(about = "Convert CSV work catalogs to CWR-style fixed-width files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CSV file into a transmission
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sender id for the header (overrides CWR_SENDER_ID)
        #[arg(long)]
        sender: Option<String>,

        /// Receiver id for the header (overrides CWR_RECEIVER_ID)
        #[arg(long)]
        receiver: Option<String>,

        /// Header date as YYYYMMDD (default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Parse a CSV file and output JSON rows
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (overrides CWR_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory for generated files (overrides CWR_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match Config::from_env() {
        Ok(config) => match cli.command {
            Commands::Convert {
                input,
                output,
                sender,
                receiver,
                date,
            } => cmd_convert(config, &input, output.as_deref(), sender, receiver, date),

            Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

            Commands::Serve { port, output_dir } => cmd_serve(config, port, output_dir).await,
        },
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map_err(|e| format!("expected YYYYMMDD, got '{}': {}", raw, e))
}

fn cmd_convert(
    mut config: Config,
    input: &Path,
    output: Option<&Path>,
    sender: Option<String>,
    receiver: Option<String>,
    date: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(sender) = sender {
        config.sender_id = sender;
    }
    if let Some(receiver) = receiver {
        config.receiver_id = receiver;
    }

    let options = match date {
        Some(date) => ConvertOptions::new(config.header_info(date)),
        None => ConvertOptions::from_config(&config),
    };

    let report = convert_file(input, &options, &JobLog::untagged())?;

    eprintln!("   Columns: {}", report.csv_info.headers.join(", "));
    write_output(&report.output.text, output)?;

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = parse_file_auto(input)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.delimiter));
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} rows", result.rows.len());

    let json = serde_json::to_string_pretty(&result.rows)?;
    write_output(&format!("{}\n", json), output)?;

    Ok(())
}

async fn cmd_serve(
    mut config: Config,
    port: Option<u16>,
    output_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    cwrkit::server::start_server(config).await
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
