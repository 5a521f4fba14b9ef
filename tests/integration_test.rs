use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

fn binary() -> &'static str {
    env!("CARGO_BIN_EXE_commission-engine")
}

#[test]
fn test_cli_renders_summary_for_sample_report() -> Result<()> {
    let sample_path = Path::new("samples").join("report.txt");

    let output = Command::new(binary())
        .arg(sample_path)
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();

    assert!(lines.contains(&"Total Commission: $5.15"), "stdout was: {stdout}");
    assert!(lines.contains(&"Total Sales: $120.00"));
    assert!(lines.contains(&"Customers Helped: 4"));
    assert!(lines.contains(&"Commission Rate: 4.29%"));
    assert!(lines.contains(&"6% Bracket: sales $5.00, deduction $0.00, commission $0.30, returned $0.00, share 4.17%"));
    assert!(lines.contains(&"3% Bracket: sales $95.00, deduction $0.00, commission $2.85, returned $60.00, share 79.17%"));
    assert!(lines.contains(&"1.5% Bracket: sales $0.00, deduction $0.00, commission $0.00, returned $0.00, share 0.00%"));
    assert!(lines.contains(&"Service Plans: total $20.00, commission $2.00"));
    assert!(lines.contains(&"Returns: 1, total $60.00, commission lost $1.80"));

    Ok(())
}

#[test]
fn test_cli_processing_the_same_page_twice_does_not_double_count() -> Result<()> {
    let sample_path = Path::new("samples").join("report.txt");

    let output = Command::new(binary())
        .arg(&sample_path)
        .arg(&sample_path)
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.lines().any(|line| line == "Total Commission: $5.15"), "stdout was: {stdout}");
    assert!(stdout.lines().any(|line| line == "Total Sales: $120.00"));

    Ok(())
}

#[test]
fn test_cli_applies_deductions_and_emits_json() -> Result<()> {
    let mut report = NamedTempFile::new()?;
    writeln!(report, "Total")?;
    writeln!(report, "Total: $50.00")?;
    writeln!(report, "2001\tSale\t1\tSKU-200\tWireless Mouse\t1\t$50.00\t$50.00")?;

    let output = Command::new(binary())
        .arg(report.path())
        .args(["--deduction", "", "--deduction", "10.00", "--json"])
        .output()?;

    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    let total_commission = value["total_commission"]
        .as_str()
        .ok_or_else(|| anyhow!("total_commission missing from JSON output"))?;
    let total_sales = value["total_sales"]
        .as_str()
        .ok_or_else(|| anyhow!("total_sales missing from JSON output"))?;

    // (50 - 10) * 3% + 10 * 1% = 1.30; sales include the out-of-dept total.
    assert_eq!(Decimal::from_str(total_commission)?, Decimal::from_str("1.30")?);
    assert_eq!(Decimal::from_str(total_sales)?, Decimal::from_str("60.00")?);
    assert_eq!(value["customers_helped"], 1);
    assert_eq!(value["returns"]["count"], 0);

    Ok(())
}

#[test]
fn test_cli_reports_a_single_failure_for_a_boundaryless_report() -> Result<()> {
    let mut report = NamedTempFile::new()?;
    writeln!(report, "nothing resembling a transaction export")?;

    let output = Command::new(binary())
        .arg(report.path())
        .output()?;

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Computation failed"), "stderr was: {stderr}");

    Ok(())
}

#[test]
fn test_cli_excludes_out_of_dept_sales_under_that_flag() -> Result<()> {
    let mut report = NamedTempFile::new()?;
    writeln!(report, "Total")?;
    writeln!(report, "Total: $50.00")?;
    writeln!(report, "2001\tSale\t1\tSKU-200\tWireless Mouse\t1\t$50.00\t$50.00")?;

    let output = Command::new(binary())
        .arg(report.path())
        .args(["--deduction", "", "--deduction", "10.00", "--exclude-out-of-dept-sales"])
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.lines().any(|line| line == "Total Sales: $50.00"), "stdout was: {stdout}");

    Ok(())
}
