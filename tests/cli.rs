#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(plan: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("binome-cli").unwrap();
    cmd.arg("--plan").arg(plan);
    cmd
}

#[test]
fn init_then_generate() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.json");

    cli(&plan)
        .args(["init", "--workers", "6", "--target", "4"])
        .assert()
        .success();
    cli(&plan).args(["init"]).assert().failure();

    cli(&plan)
        .args(["week", "--date", "2024-08-29"])
        .assert()
        .success()
        .stdout(predicate::str::contains("26 août 2024"));

    let csv = dir.path().join("week.csv");
    let json = dir.path().join("week.json");
    cli(&plan)
        .args(["generate", "--seed", "3", "--weeks", "2"])
        .arg("--out-csv")
        .arg(&csv)
        .arg("--out-json")
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lundi:"))
        .stdout(predicate::str::contains("du 2 septembre 2024"));

    let exported = fs::read_to_string(&csv).unwrap();
    assert!(exported.starts_with("week,day,date,group,worker_ids,names,solo"));
    let weeks: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(weeks.as_array().map(Vec::len), Some(2));
}

#[test]
fn check_flags_understaffed_days() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.json");

    cli(&plan)
        .args(["init", "--workers", "2", "--target", "2"])
        .assert()
        .success();
    cli(&plan).arg("check").assert().code(0);

    cli(&plan)
        .args(["rest", "--id", "1", "--days", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lundi"));
    cli(&plan)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Lundi"));
}

#[test]
fn import_workers_from_csv() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.json");
    let csv = dir.path().join("workers.csv");
    fs::write(&csv, "id,name,rest_days\n10,Marta,0;6\n11,Ines,\n").unwrap();

    cli(&plan)
        .args(["init", "--workers", "1"])
        .assert()
        .success();
    cli(&plan)
        .arg("import-workers")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 membre(s)"));

    let loaded = binome::load_plan_from_file(&plan).unwrap();
    assert_eq!(loaded.roster.len(), 3);
    assert_eq!(
        loaded.roster.rest_days(binome::WorkerId::new(10)),
        vec![binome::Day::MONDAY, binome::Day::SUNDAY]
    );

    cli(&plan)
        .arg("import-workers")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .failure();
}

#[test]
fn target_rejects_zero() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.json");
    cli(&plan).args(["init"]).assert().success();
    cli(&plan)
        .args(["target", "--day", "2", "--count", "0"])
        .assert()
        .failure();
    cli(&plan)
        .args(["target", "--all", "--count", "3"])
        .assert()
        .success();
}
