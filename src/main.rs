//! Issnaudit CLI - audit journal spreadsheets against the DOAJ registry
//!
//! # Main Commands
//!
//! ```bash
//! issnaudit sheet journals.xls --suffix 2016   # Whole-sheet audit
//! issnaudit rows journals.xls --suffix 2017    # Per-row audit (one journal per row)
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! issnaudit scan journals.xls      # Extract ISSNs without touching the DOAJ
//! issnaudit check 2167-8359        # Check a single ISSN
//! ```

use clap::{Parser, Subcommand};
use issnaudit::{
    audit_workbook, audit_workbook_by_row, scan_sheet, AuditError, AuditOptions, DoajClient,
    DoajLookup, Issn, LookupResult, Workbook,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "issnaudit")]
#[command(about = "Audit accreditation spreadsheets against the DOAJ registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Whole-sheet audit: distinct ISSNs, duplicates, DOAJ presence
    Sheet {
        /// Workbook files to audit
        #[arg(required = true)]
        workbooks: Vec<PathBuf>,

        /// Only audit sheets whose name ends with this suffix (e.g. a year)
        #[arg(short, long)]
        suffix: Option<String>,

        /// Minimum delay between DOAJ calls, in milliseconds
        #[arg(long, default_value = "100")]
        interval_ms: u64,

        /// Override the DOAJ search endpoint base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Also write the aggregates as JSON to this file
        #[arg(short, long)]
        json: Option<PathBuf>,
    },

    /// Per-row audit: one journal per row, found by both/one/neither ISSN
    Rows {
        /// Workbook files to audit
        #[arg(required = true)]
        workbooks: Vec<PathBuf>,

        /// Only audit sheets whose name ends with this suffix (e.g. a year)
        #[arg(short, long)]
        suffix: Option<String>,

        /// Report failed lookups separately instead of counting them as misses
        #[arg(long)]
        track_failures: bool,

        /// Minimum delay between DOAJ calls, in milliseconds
        #[arg(long, default_value = "100")]
        interval_ms: u64,

        /// Override the DOAJ search endpoint base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Also write the aggregates as JSON to this file
        #[arg(short, long)]
        json: Option<PathBuf>,
    },

    /// Extract ISSNs from workbooks without querying the DOAJ
    Scan {
        /// Workbook files to scan
        #[arg(required = true)]
        workbooks: Vec<PathBuf>,

        /// Only scan sheets whose name ends with this suffix
        #[arg(short, long)]
        suffix: Option<String>,
    },

    /// Check a single ISSN against the DOAJ
    Check {
        /// The ISSN to check (e.g. 2167-8359)
        issn: String,

        /// Minimum delay before the call, in milliseconds
        #[arg(long, default_value = "100")]
        interval_ms: u64,

        /// Override the DOAJ search endpoint base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sheet {
            workbooks,
            suffix,
            interval_ms,
            base_url,
            json,
        } => {
            cmd_sheet(
                &workbooks,
                suffix,
                interval_ms,
                base_url.as_deref(),
                json.as_deref(),
            )
            .await
        }

        Commands::Rows {
            workbooks,
            suffix,
            track_failures,
            interval_ms,
            base_url,
            json,
        } => {
            cmd_rows(
                &workbooks,
                suffix,
                track_failures,
                interval_ms,
                base_url.as_deref(),
                json.as_deref(),
            )
            .await
        }

        Commands::Scan { workbooks, suffix } => cmd_scan(&workbooks, suffix),

        Commands::Check {
            issn,
            interval_ms,
            base_url,
        } => cmd_check(&issn, interval_ms, base_url.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn build_client(interval_ms: u64, base_url: Option<&str>) -> DoajClient {
    let mut client = DoajClient::new().with_call_interval(Duration::from_millis(interval_ms));
    if let Some(url) = base_url {
        client = client.with_base_url(url);
    }
    client
}

async fn cmd_sheet(
    workbooks: &[PathBuf],
    suffix: Option<String>,
    interval_ms: u64,
    base_url: Option<&str>,
    json: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(interval_ms, base_url);
    let options = AuditOptions {
        sheet_suffix: suffix,
        track_failures: false,
    };

    let mut all = Vec::new();
    for path in workbooks {
        eprintln!("📖 Opening workbook {}", path.display());
        let audits = audit_workbook(path, &client, &options).await?;
        if audits.is_empty() {
            eprintln!("   No sheets matched the suffix filter.");
        }
        for audit in &audits {
            println!("{}", audit);
        }
        all.extend(audits);
    }

    write_json(&all, json)?;
    Ok(())
}

async fn cmd_rows(
    workbooks: &[PathBuf],
    suffix: Option<String>,
    track_failures: bool,
    interval_ms: u64,
    base_url: Option<&str>,
    json: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(interval_ms, base_url);
    let options = AuditOptions {
        sheet_suffix: suffix,
        track_failures,
    };

    let mut all = Vec::new();
    for path in workbooks {
        eprintln!("📖 Opening workbook {}", path.display());
        let audits = audit_workbook_by_row(path, &client, &options).await?;
        if audits.is_empty() {
            eprintln!("   No sheets matched the suffix filter.");
        }
        for audit in &audits {
            println!("{}", audit);
        }
        all.extend(audits);
    }

    write_json(&all, json)?;
    Ok(())
}

fn cmd_scan(
    workbooks: &[PathBuf],
    suffix: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    for path in workbooks {
        eprintln!("📖 Opening workbook {}", path.display());
        let mut workbook = Workbook::open(path)?;

        for name in workbook.sheet_names() {
            if let Some(ref s) = suffix {
                if !name.ends_with(s.as_str()) {
                    continue;
                }
            }
            let grid = workbook.sheet(&name)?;
            let set = scan_sheet(&grid);
            println!("\tSheet {}", name);
            println!(
                "\t\tFound {} ISSNs. {} duplicate(s) on the sheet.",
                set.len(),
                set.duplicates()
            );

            let mut issns: Vec<&str> = set.iter().map(|i| i.as_str()).collect();
            issns.sort_unstable();
            for issn in issns {
                println!("\t\t  {}", issn);
            }
        }
    }
    Ok(())
}

async fn cmd_check(
    token: &str,
    interval_ms: u64,
    base_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let issn =
        Issn::parse(token).ok_or_else(|| AuditError::InvalidIssn(token.to_string()))?;

    let client = build_client(interval_ms, base_url);
    match client.lookup(&issn).await {
        LookupResult::Found => println!("✅ {} is in the DOAJ.", issn),
        LookupResult::NotFound => println!("➖ {} is not in the DOAJ.", issn),
        LookupResult::Failed => println!("⚠️  The DOAJ search failed for {}.", issn),
    }
    Ok(())
}

fn write_json<T: Serialize>(
    audits: &[T],
    path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(p) = path {
        let json = serde_json::to_string_pretty(audits)?;
        fs::write(p, json)?;
        eprintln!("💾 Report written to: {}", p.display());
    }
    Ok(())
}
