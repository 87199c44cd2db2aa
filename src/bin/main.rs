//! Facet CLI - turn tabular files and plain-language questions into charts
//!
//! Usage:
//!   facet upload <file>
//!   facet fetch <url>
//!   facet schema <file>
//!   facet classify "<sql>"
//!   facet ask "<question>" <file>
//!
//! Examples:
//!   facet upload sales.csv
//!   facet fetch https://dummyjson.com/products
//!   facet classify "SELECT region, SUM(amount) AS total FROM sales GROUP BY region"
//!   facet ask "total sales by region" sales.csv

use clap::{Parser, Subcommand};
use facet::classify::classify;
use facet::config::Settings;
use facet::ingest;
use facet::llm::OpenAiClient;
use facet::pipeline;
use facet::schema;
use facet::store::MemoryStore;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "facet")]
#[command(about = "Turn tabular data and plain-language questions into chart-ready datasets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a CSV/Excel/JSON file and print the table spec and chart data
    Upload {
        /// Path to the data file
        file: PathBuf,
    },

    /// Fetch JSON records from a URL and ingest them
    Fetch {
        /// URL returning a JSON array (or an envelope holding one)
        url: String,
    },

    /// Print the schema description inferred for a file
    Schema {
        /// Path to the data file
        file: PathBuf,
    },

    /// Classify a SQL query into a chart suggestion
    Classify {
        /// The SQL query text
        sql: String,
    },

    /// Generate SQL for a question against a file's schema and classify it
    Ask {
        /// The question, in plain language
        question: String,

        /// Path to the data file supplying the schema
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Upload { file } => cmd_upload(file),
        Commands::Fetch { url } => cmd_fetch(url).await,
        Commands::Schema { file } => cmd_schema(file),
        Commands::Classify { sql } => cmd_classify(&sql),
        Commands::Ask { question, file } => cmd_ask(&question, file).await,
    }
}

fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Warning: failed to load config, using defaults: {}", e);
            Settings::default()
        }
    }
}

fn cmd_upload(file: PathBuf) -> ExitCode {
    let dataset = match ingest::read_file(&file) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    ingest_dataset(&dataset)
}

async fn cmd_fetch(url: String) -> ExitCode {
    let value: Value = match fetch_json(&url).await {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error fetching {}: {}", url, e);
            return ExitCode::FAILURE;
        }
    };

    let stem = url
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("remote");
    let dataset = match ingest::read_json(stem, &value) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error ingesting response: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ingest_dataset(&dataset)
}

async fn fetch_json(url: &str) -> Result<Value, reqwest::Error> {
    reqwest::get(url).await?.error_for_status()?.json().await
}

fn ingest_dataset(dataset: &facet::ingest::Dataset) -> ExitCode {
    let settings = load_settings();
    let mut store = MemoryStore::new();

    match pipeline::upload(dataset, &mut store, &settings) {
        Ok(outcome) => print_json(&outcome),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_schema(file: PathBuf) -> ExitCode {
    let dataset = match ingest::read_file(&file) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let settings = load_settings();
    let table = pipeline::table_name(&dataset.name, settings.naming.suffix_len);
    let spec = pipeline::dataset_spec(&dataset, &table, &settings);
    println!("{}", schema::schema_text(&spec));
    ExitCode::SUCCESS
}

fn cmd_classify(sql: &str) -> ExitCode {
    print_json(&classify(sql))
}

async fn cmd_ask(question: &str, file: PathBuf) -> ExitCode {
    let dataset = match ingest::read_file(&file) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let settings = load_settings();
    let generator = match OpenAiClient::from_settings(&settings.llm) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let table = pipeline::table_name(&dataset.name, settings.naming.suffix_len);
    let spec = pipeline::dataset_spec(&dataset, &table, &settings);

    match pipeline::ask(question, &spec, &generator).await {
        Ok(outcome) => print_json(&outcome),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            ExitCode::FAILURE
        }
    }
}
