use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn fleetdash_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fleetdash"))
}

/// Command pointed at a config dir that does not exist, so the built-in
/// sample dataset is used.
fn sample_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = fleetdash_cmd();
    cmd.args(["-C", temp_dir.path().join("none").to_str().unwrap()]);
    cmd
}

fn write_short_dataset(path: &Path) {
    let content = r#"vehicles = []

[[agencies]]
id = "paris"
name = "Agence Paris"
city = "Paris"

[[monthly]]
month = 1
revenue = 1000
expenses = 400
rentals = 10

[[monthly]]
month = 2
revenue = 1200
expenses = 500
rentals = 12

[[monthly]]
month = 3
revenue = 900
expenses = 450
rentals = 9
"#;
    fs::write(path, content).unwrap();
}

#[test]
fn test_help() {
    fleetdash_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial dashboard"));
}

#[test]
fn test_version() {
    fleetdash_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fleetdash"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("fleetdash-config");

    fleetdash_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized fleetdash config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("dataset.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("fleetdash-config");

    fleetdash_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    fleetdash_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_initialized_dataset_matches_sample() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("fleetdash-config");

    fleetdash_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    // Reads dataset.toml through config.toml rather than the built-in sample
    fleetdash_cmd()
        .args(["-C", config_path.to_str().unwrap(), "kpis", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_revenue\": 4583000"));
}

#[test]
fn test_kpis_network_totals() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .arg("kpis")
        .assert()
        .success()
        .stdout(predicate::str::contains("Toutes les agences"))
        .stdout(predicate::str::contains("4 583 000 €"))
        .stdout(predicate::str::contains("1 720 000 €"))
        .stdout(predicate::str::contains("37.5%"))
        .stdout(predicate::str::contains("5 600"))
        .stdout(predicate::str::contains("78.5%"));
}

#[test]
fn test_kpis_agency_json() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .args(["kpis", "--agency", "paris", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_revenue\": 5957900"))
        .stdout(predicate::str::contains("\"fleet_utilization\": 78.5"));
}

#[test]
fn test_kpis_half_growth_window() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .args(["kpis", "--growth-window", "half"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first and last 6 month(s)"));

    sample_cmd(&temp_dir)
        .args(["kpis", "--growth-window", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first and last 3 month(s)"));
}

#[test]
fn test_kpis_rejects_bad_growth_window() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .args(["kpis", "--growth-window", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --growth-window"));
}

#[test]
fn test_short_series_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("short.toml");
    write_short_dataset(&data_path);

    sample_cmd(&temp_dir)
        .args(["--data", data_path.to_str().unwrap(), "kpis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"))
        .stderr(predicate::str::contains("got 3"));

    // A one-month window fits in three months
    sample_cmd(&temp_dir)
        .args([
            "--data",
            data_path.to_str().unwrap(),
            "kpis",
            "--growth-window",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 100 €"));
}

#[test]
fn test_overflowing_dataset_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("huge.toml");
    let month = |m: u32| {
        format!(
            "[[monthly]]\nmonth = {m}\nrevenue = {}\nexpenses = 0\nrentals = 1\n\n",
            i64::MAX
        )
    };
    let content = format!(
        "vehicles = []\nagencies = []\n\n{}{}",
        month(1),
        month(2)
    );
    fs::write(&data_path, content).unwrap();

    sample_cmd(&temp_dir)
        .args([
            "--data",
            data_path.to_str().unwrap(),
            "kpis",
            "--growth-window",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"))
        .stderr(predicate::str::contains("does not fit in 64 bits"));
}

#[test]
fn test_missing_dataset_file() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .args(["--data", "/nonexistent/dataset.toml", "kpis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dataset file not found"));
}

#[test]
fn test_config_changes_currency_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cfg");
    fs::create_dir_all(&config_path).unwrap();
    fs::write(
        config_path.join("config.toml"),
        "[format]\ncurrency_symbol = \"$\"\nsymbol_position = \"prefix\"\nthousands_separator = \",\"\n",
    )
    .unwrap();

    fleetdash_cmd()
        .args(["-C", config_path.to_str().unwrap(), "kpis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1,720,000"));
}

#[test]
fn test_monthly_table() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .args(["monthly", "--agency", "paris"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Janvier"))
        .stdout(predicate::str::contains("Décembre"))
        .stdout(predicate::str::contains("370 500 €"));
}

#[test]
fn test_monthly_evolution_tracks_profit() {
    let temp_dir = TempDir::new().unwrap();

    // February profit 80 000 after January 87 000, while revenue also fell
    sample_cmd(&temp_dir)
        .arg("monthly")
        .assert()
        .success()
        .stdout(predicate::str::contains("↓ -8.0%"));
}

#[test]
fn test_agencies_summary() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .arg("agencies")
        .assert()
        .success()
        .stdout(predicate::str::contains("paris"))
        .stdout(predicate::str::contains("nice"))
        .stdout(predicate::str::contains("5 957 900 €"));
}

#[test]
fn test_compare_matrix() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .arg("compare")
        .assert()
        .success()
        .stdout(predicate::str::contains("LYON"))
        .stdout(predicate::str::contains("242 250 €"));
}

#[test]
fn test_fleet_search() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .args(["fleet", "--search", "golf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Golf"))
        .stdout(predicate::str::contains("Showing 1 of 18 vehicles"))
        .stdout(predicate::str::contains("885 000 €"));
}

#[test]
fn test_fleet_no_match() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .args(["fleet", "--search", "zeppelin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No vehicles match"));
}

#[test]
fn test_fleet_invalid_status() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .args(["fleet", "--status", "flying"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --status"));
}

#[test]
fn test_fleet_top_limit() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .args(["fleet", "--top", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 3 vehicles by revenue"));
}

#[test]
fn test_fleet_ranking_ignores_list_filters() {
    let temp_dir = TempDir::new().unwrap();

    // The list is empty but the ranking still covers the whole fleet
    sample_cmd(&temp_dir)
        .args(["fleet", "--search", "zeppelin", "--top", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No vehicles match"))
        .stdout(predicate::str::contains("Top 1 vehicles by revenue"))
        .stdout(predicate::str::contains("Peugeot 3008"));
}

#[test]
fn test_categories() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUV"))
        .stdout(predicate::str::contains("295 000 €"))
        .stdout(predicate::str::contains("2 663 000 €"));
}

#[test]
fn test_expenses_filters() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .arg("expenses")
        .assert()
        .success()
        .stdout(predicate::str::contains("34 352 €"));

    sample_cmd(&temp_dir)
        .args(["expenses", "--category", "Carburant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carburant (4)"))
        .stdout(predicate::str::contains("292 €"));

    sample_cmd(&temp_dir)
        .args(["expenses", "--status", "unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --status"));
}

#[test]
fn test_users() {
    let temp_dir = TempDir::new().unwrap();

    sample_cmd(&temp_dir)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("Roles"))
        .stdout(predicate::str::contains("@"));
}
