//! E2E tests for the calc, batch, compare and schema commands

use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--"].iter().copied().chain(args.iter().copied()))
        .output()
        .expect("Failed to execute command")
}

/// Macron III under the threshold: the worked scenario from the unit tests
#[test]
fn calc_macron_iii_breakdown() {
    let output = run(&[
        "calc",
        "-n",
        "100",
        "--vesting-price",
        "50",
        "--sell-price",
        "80",
        "--usd-to-eur",
        "0.90",
        "--vesting-date",
        "2024-02-15",
        "--sell-date",
        "2025-02-15",
        "--regime",
        "macron-iii",
        "--tax-rate",
        "0.30",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("RSU TAX BREAKDOWN (Macron III)"));
    assert!(stdout.contains("Taper relief: 50%"));
    assert!(stdout.contains("7200.00")); // gross proceeds
    assert!(stdout.contains("2336.40")); // total taxes
    assert!(stdout.contains("4863.60")); // net in pocket
    assert!(stdout.contains("50% automatic abatement"));
}

#[test]
fn calc_json_output() {
    let output = run(&[
        "calc",
        "-n",
        "100",
        "--vesting-price",
        "50",
        "--sell-price",
        "80",
        "--usd-to-eur",
        "0.90",
        "--vesting-date",
        "2024-02-15",
        "--sell-date",
        "2025-02-15",
        "--regime",
        "unrestricted",
        "--json",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"total_taxes\""));
    assert!(stdout.contains("2858.40"));
    assert!(stdout.contains("\"tributable_gain\""));
    assert!(stdout.contains("\"regime_notes\""));
}

#[test]
fn calc_rejects_inverted_dates() {
    let output = run(&[
        "calc",
        "-n",
        "10",
        "--vesting-price",
        "100",
        "--sell-price",
        "150",
        "--vesting-date",
        "2025-02-15",
        "--sell-date",
        "2024-02-15",
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("precedes"));
}

#[test]
fn batch_table_with_totals() {
    let output = run(&["batch", "tests/data/scenarios.csv"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("RSU SELL SCENARIOS"));
    assert!(stdout.contains("Feb 2024 tranche"));
    assert!(stdout.contains("Old grant"));
    assert!(stdout.contains("Macron I"));
    assert!(stdout.contains("TOTALS:"));
}

#[test]
fn batch_csv_output() {
    let output = run(&["batch", "tests/data/scenarios.csv", "--csv"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("row_num"));
    assert!(stdout.contains("net_proceeds"));
    assert!(stdout.contains("Feb 2024 tranche"));
}

#[test]
fn compare_first_two_scenarios() {
    let output = run(&["compare", "tests/data/scenarios.csv"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("SCENARIO COMPARISON"));
    assert!(stdout.contains("Net in Pocket"));
    assert!(stdout.contains("more net in pocket"));
}

#[test]
fn compare_by_name() {
    let output = run(&[
        "compare",
        "tests/data/scenarios.csv",
        "--first",
        "Feb 2024 tranche",
        "--second",
        "Non-qualified",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Feb 2024 tranche"));
    assert!(stdout.contains("Non-qualified"));
}

#[test]
fn schema_json() {
    let output = run(&["schema"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("vesting_price_usd"));
    assert!(stdout.contains("regime"));
}

#[test]
fn schema_csv_header() {
    let output = run(&["schema", "csv-header"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("name,regime,shares,vesting_date,sell_date"));
}
