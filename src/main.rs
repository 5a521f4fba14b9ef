mod engine;
mod models;
mod report;
mod types;

use std::fs;
use std::io::{Read, Write, stderr, stdin, stdout};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::engine::SessionEngine;
use crate::models::{CommissionSummary, SessionPolicy};

/// Computes sales commission from pasted transaction reports.
///
/// Feed one or more report pages (tab-delimited exports copied out of the
/// point-of-sale system) as files or on stdin; pages accumulate into one
/// session and the final summary is printed to stdout.
#[derive(Parser, Debug)]
#[command(name = "commission-engine", version, about)]
struct Cli {
    /// Report pages, processed in order; reads stdin when omitted
    #[arg(value_name = "REPORT")]
    reports: Vec<PathBuf>,

    /// Out-of-department sales to deduct, one entry per bracket in order
    /// (6%, 3%, 1.5%); blank entries mean zero
    #[arg(short = 'd', long = "deduction", value_name = "AMOUNT")]
    deductions: Vec<String>,

    /// Count returned items by the row quantity instead of one per row
    #[arg(long)]
    returns_by_quantity: bool,

    /// Leave the out-of-department total out of the total-sales figure
    #[arg(long)]
    exclude_out_of_dept_sales: bool,

    /// Emit the summary as JSON instead of the plain-text report
    #[arg(long)]
    json: bool,

    /// Log verbosity: error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", default_value = "error")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let policy = SessionPolicy {
        count_returns_by_quantity: cli.returns_by_quantity,
        include_out_of_dept_in_sales: !cli.exclude_out_of_dept_sales
    };
    let mut engine = SessionEngine::new(policy);

    let pages = read_pages(&cli.reports)?;
    let page_count = pages.len();

    let timer = Instant::now();
    let mut summary = None;

    for (source, text) in pages {
        let result = engine.process(&text, &cli.deductions)
            .with_context(|| format!("Computation failed for {source}, results were not applied"))?;

        summary = Some(result);
    }

    info!("Processed {page_count} page(s) in: {:?}", timer.elapsed());

    if let Some(summary) = summary {
        write_summary_to_stdout(&summary, cli.json)?;
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Stdout carries the summary and may be redirected, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

/// Reads the report pages named on the command line, or a single page from
/// stdin when none were.
fn read_pages(reports: &[PathBuf]) -> Result<Vec<(String, String)>> {
    if reports.is_empty() {
        let mut text = String::new();
        stdin().read_to_string(&mut text).context("Failed to read the report from stdin")?;

        return Ok(vec![("stdin".to_string(), text)]);
    }

    reports
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read report file {}", path.display()))?;

            Ok((path.display().to_string(), text))
        })
        .collect()
}

fn write_summary_to_stdout(summary: &CommissionSummary, json: bool) -> Result<()> {
    let mut output = stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut output, summary)?;
        writeln!(output)?;
    } else {
        write_summary(&mut output, summary)?;
    }

    output.flush()?;

    Ok(())
}

fn write_summary<W: Write>(output: &mut W, summary: &CommissionSummary) -> Result<()> {
    writeln!(output, "Total Commission: ${:.2}", summary.total_commission.round_dp(2))?;
    writeln!(output, "Total Sales: ${:.2}", summary.total_sales.round_dp(2))?;
    writeln!(output, "Customers Helped: {}", summary.customers_helped)?;
    writeln!(output, "Commission Rate: {:.2}%", summary.overall_rate.round_dp(2))?;
    writeln!(output)?;

    for tier in &summary.tiers {
        writeln!(
            output,
            "{}: sales ${:.2}, deduction ${:.2}, commission ${:.2}, returned ${:.2}, share {:.2}%",
            tier.label,
            tier.sales.round_dp(2),
            tier.deduction.round_dp(2),
            tier.commission.round_dp(2),
            tier.returned.round_dp(2),
            tier.share_of_sales.round_dp(2)
        )?;
    }

    writeln!(
        output,
        "Out of Dept: total ${:.2}, commission ${:.2}",
        summary.out_of_dept.total.round_dp(2),
        summary.out_of_dept.commission.round_dp(2)
    )?;
    writeln!(
        output,
        "Service Plans: total ${:.2}, commission ${:.2}",
        summary.service_plan.total.round_dp(2),
        summary.service_plan.commission.round_dp(2)
    )?;
    writeln!(output)?;
    writeln!(
        output,
        "Returns: {}, total ${:.2}, commission lost ${:.2}",
        summary.returns.count,
        summary.returns.total.round_dp(2),
        summary.returns.commission_lost.round_dp(2)
    )?;

    Ok(())
}
