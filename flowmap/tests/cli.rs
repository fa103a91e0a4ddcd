use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TOTALS: &str = "state,inflow,outflow,net_migration\n\
    Texas,500000,300000,200000\n\
    Florida,700000,200000,500000\n\
    California,400000,600000,-200000\n";

const FLOWS: &str = "origin,destination,estimate\n\
    Florida,Texas,50000\n\
    California,Texas,80000\n\
    Texas,Florida,20000\n\
    Texas,Texas,4242\n\
    Texas,California,1000\n\
    Texas,California,500\n";

struct Fixture {
    dir: TempDir,
    totals: PathBuf,
    flows: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let totals = dir.path().join("totals.csv");
        let flows = dir.path().join("flows.csv");
        fs::write(&totals, TOTALS).expect("write totals");
        fs::write(&flows, FLOWS).expect("write flows");
        Fixture { dir, totals, flows }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("flowmap").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .arg("--totals")
            .arg(&self.totals)
            .arg("--flows")
            .arg(&self.flows);
        cmd
    }
}

#[test]
fn version() {
    let f = Fixture::new();
    f.cmd().arg("version").assert().success().stdout(contains("flowmap"));
}

#[test]
fn states_lists_mapping() {
    let f = Fixture::new();
    f.cmd().arg("states").assert().success().stdout(contains("TX Texas")).stdout(contains("DC District of Columbia"));
}

#[test]
fn totals_text_by_code() {
    let f = Fixture::new();
    f.cmd()
        .args(["totals", "TX"])
        .assert()
        .success()
        .stdout(contains("Inflow: 500,000"))
        .stdout(contains("Outflow: 300,000"))
        .stdout(contains("Net: +200,000"));
}

#[test]
fn query_json() {
    let f = Fixture::new();
    let out = f.cmd().args(["--format", "json", "query", "Texas"]).output().unwrap();
    assert!(out.status.success());
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["total"]["net_migration"], 200000);
    assert_eq!(v["top_origins"][0]["state"], "California");
    assert_eq!(v["top_origins"][0]["estimate"], 80000);
    assert_eq!(v["top_origins"][1]["state"], "Florida");
    assert_eq!(v["top_destinations"][0]["state"], "Florida");
    assert_eq!(v["top_destinations"][1]["state"], "California");
    assert_eq!(v["top_destinations"][1]["estimate"], 1500);
    let dests = v["top_destinations"].as_array().unwrap();
    assert!(dests.iter().all(|d| d["state"] != "Texas"));
}

#[test]
fn rankings_respects_top() {
    let f = Fixture::new();
    let out = f.cmd().args(["--format", "jsonl", "rankings", "Texas", "--top", "1"]).output().unwrap();
    assert!(out.status.success());
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["top_origins"].as_array().unwrap().len(), 1);
    assert_eq!(v["top_origins"][0]["state"], "California");
}

#[test]
fn unknown_state_fails() {
    let f = Fixture::new();
    f.cmd().args(["totals", "Atlantis"]).assert().failure().stderr(contains("no data for state `Atlantis`"));
}

#[test]
fn malformed_data_is_fatal() {
    let f = Fixture::new();
    fs::write(&f.flows, "origin,destination\nTexas,Ohio\n").unwrap();
    f.cmd().args(["totals", "Texas"]).assert().failure().stderr(contains("missing required column `estimate`"));
}

#[test]
fn map_csv_export() {
    let f = Fixture::new();
    let out = f.dir.path().join("map.csv");
    f.cmd().args(["map", "--csv", "--out"]).arg(&out).assert().success();
    let s = fs::read_to_string(&out).unwrap();
    let mut lines = s.lines();
    assert_eq!(lines.next(), Some("code,state,net_migration"));
    assert_eq!(lines.next(), Some("CA,California,-200000"));
    assert_eq!(lines.next(), Some("FL,Florida,500000"));
    assert_eq!(lines.next(), Some("TX,Texas,200000"));
}

#[test]
fn config_file_supplies_defaults() {
    let f = Fixture::new();
    let cfg = f.dir.path().join("flowmap.yaml");
    fs::write(&cfg, format!(
        "data:\n  totals: {}\n  flows: {}\nquery:\n  format: jsonl\n",
        f.totals.display(),
        f.flows.display()
    ))
    .unwrap();
    let mut cmd = Command::cargo_bin("flowmap").unwrap();
    let out = cmd.current_dir(f.dir.path()).args(["totals", "FL"]).output().unwrap();
    assert!(out.status.success());
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["state"], "Florida");
    assert_eq!(v["inflow"], 700000);
}
