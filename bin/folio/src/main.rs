//! Folio - inspect pagination cursors and page through JSON records.
//!
//! # Usage
//!
//! ```bash
//! # Encode and decode cursors
//! folio encode id=node5
//! folio decode b2Zmc2V0PTU= --offset
//!
//! # Page through a JSON array of records
//! folio page --records fruits.json --first 5 --page 2
//! folio page --records fruits.json --strategy cursor --key id --last 3
//!
//! # Override paging limits from the environment
//! FOLIO_MAX_EDGES_PER_PAGE=500 folio page --records fruits.json --first 250
//! ```

mod records;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde_json::{Value, json};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

use folio_core::cursor::CursorParameters;
use folio_core::metrics::init_metrics;
use folio_core::{ConnectionArgs, Cursor, OffsetCursor, OffsetPaginator, OpaqueCursor, PagingOptions};

use crate::records::RecordSet;

/// Folio CLI - Relay pagination toolbox.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Folio - cursor and offset pagination toolbox")]
#[command(version)]
struct Cli {
    /// Page size used when neither "first" nor "last" is given.
    #[arg(long, env = "FOLIO_DEFAULT_EDGES_PER_PAGE", default_value = "20", global = true)]
    default_edges_per_page: u32,

    /// Largest accepted page size.
    #[arg(long, env = "FOLIO_MAX_EDGES_PER_PAGE", default_value = "100", global = true)]
    max_edges_per_page: u32,

    /// Accept "last" for cursor pagination.
    #[arg(
        long,
        env = "FOLIO_ALLOW_REVERSE_ORDER",
        default_value = "true",
        action = ArgAction::Set,
        global = true
    )]
    allow_reverse_order: bool,

    /// Enable JSON log output.
    #[arg(long, env = "JSON_LOGS", global = true)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Print Prometheus metrics to stderr before exiting.
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode key=value pairs into an opaque cursor.
    Encode {
        /// Cursor parameters, e.g. `id=node5`.
        #[arg(required = true, value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },
    /// Decode an opaque cursor into its parameters.
    Decode {
        cursor: String,

        /// Validate the cursor as an offset cursor.
        #[arg(long)]
        offset: bool,
    },
    /// Resolve pagination arguments and print one page of records.
    Page(PageCommand),
}

#[derive(Args, Debug)]
struct PageCommand {
    /// JSON file holding an array of records, ordered by the key field.
    #[arg(long)]
    records: PathBuf,

    /// Paging strategy: offset or cursor.
    #[arg(long, default_value = "offset", value_parser = parse_strategy)]
    strategy: Strategy,

    /// Record field used as the cursor key (cursor strategy).
    #[arg(long, default_value = "id")]
    key: String,

    #[arg(long, allow_negative_numbers = true)]
    first: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    last: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    page: Option<i64>,

    #[arg(long)]
    after: Option<String>,

    #[arg(long)]
    before: Option<String>,
}

impl PageCommand {
    fn connection_args(&self) -> ConnectionArgs {
        ConnectionArgs {
            page: self.page,
            first: self.first,
            last: self.last,
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Offset,
    Cursor,
}

/// Parse paging strategy from string.
fn parse_strategy(s: &str) -> Result<Strategy, String> {
    match s.to_lowercase().as_str() {
        "offset" => Ok(Strategy::Offset),
        "cursor" => Ok(Strategy::Cursor),
        _ => Err(format!(
            "Invalid strategy '{}'. Use 'offset' or 'cursor'.",
            s
        )),
    }
}

/// Parse a `key=value` cursor parameter.
fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Invalid parameter '{}'. Use 'key=value'.", s)),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    // Metrics recorder (optional - failures don't stop the command)
    let metrics = if cli.print_metrics {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                init_metrics();
                Some(handle)
            }
            Err(e) => {
                warn!("Failed to install metrics recorder: {}. Continuing without metrics.", e);
                None
            }
        }
    } else {
        None
    };

    let options = PagingOptions::default()
        .with_default_edges_per_page(cli.default_edges_per_page)
        .with_max_edges_per_page(cli.max_edges_per_page)
        .with_reverse_order(cli.allow_reverse_order);
    options.validate().context("Invalid paging options")?;
    debug!(?options, "Paging options");

    let output = match &cli.command {
        Command::Encode { pairs } => Value::String(encode(pairs)),
        Command::Decode { cursor, offset } => decode(cursor, *offset)?,
        Command::Page(command) => page(command, &options)?,
    };

    match output {
        Value::String(s) => println!("{}", s),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }

    if let Some(handle) = metrics {
        print_metrics(&handle);
    }

    Ok(())
}

fn encode(pairs: &[(String, String)]) -> String {
    let parameters: CursorParameters = pairs.iter().cloned().collect();
    Cursor::new(parameters).encode()
}

fn decode(cursor: &str, offset: bool) -> Result<Value> {
    if offset {
        let cursor = OffsetCursor::from_string(cursor).context("Invalid offset cursor")?;
        return Ok(json!({ "offset": cursor.offset }));
    }

    let cursor = Cursor::from_string(cursor).context("Invalid cursor")?;
    Ok(serde_json::to_value(cursor.parameters())?)
}

fn page(command: &PageCommand, options: &PagingOptions) -> Result<Value> {
    let records = RecordSet::load(&command.records, command.key.as_str())?;
    let args = command.connection_args();
    debug!(?args, strategy = ?command.strategy, "Paging records");

    let connection = match command.strategy {
        Strategy::Offset => {
            let paginator = OffsetPaginator::from_args(&args, options)
                .context("Invalid pagination arguments")?;
            records.offset_page(&paginator)
        }
        Strategy::Cursor => {
            let paginator = records
                .cursor_paginator(&args, options)
                .context("Invalid pagination arguments")?;
            records.cursor_page(&paginator)?
        }
    };

    Ok(serde_json::to_value(connection)?)
}

/// Initialize tracing subscriber.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }
}

fn print_metrics(handle: &PrometheusHandle) {
    eprintln!("{}", handle.render());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("id=node5"),
            Ok(("id".to_string(), "node5".to_string()))
        );
        // La valeur peut elle-même contenir "="
        assert_eq!(
            parse_pair("q=a=b"),
            Ok(("q".to_string(), "a=b".to_string()))
        );
        assert!(parse_pair("=x").is_err());
        assert!(parse_pair("novalue").is_err());
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!(parse_strategy("CURSOR"), Ok(Strategy::Cursor));
        assert!(parse_strategy("keyset").is_err());
    }

    #[test]
    fn test_encode_matches_wire_format() {
        assert_eq!(
            encode(&[("id".to_string(), "node5".to_string())]),
            "aWQ9bm9kZTU="
        );
    }

    #[test]
    fn test_decode_offset_cursor() {
        assert_eq!(decode("b2Zmc2V0PTU=", true).unwrap(), json!({ "offset": 5 }));
        assert_eq!(decode("b2Zmc2V0PTU=", false).unwrap(), json!({ "offset": "5" }));
        assert!(decode("aWQ9bm9kZTU=", true).is_err());
    }

    #[test]
    fn test_page_args_from_flags() {
        let cli = Cli::parse_from([
            "folio", "page", "--records", "r.json", "--first", "5", "--page", "-1",
        ]);
        let Command::Page(command) = cli.command else {
            panic!("expected page command");
        };

        assert_eq!(command.strategy, Strategy::Offset);
        assert_eq!(
            command.connection_args(),
            ConnectionArgs::first(5).with_page(-1)
        );
    }
}
