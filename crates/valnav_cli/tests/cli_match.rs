#![allow(missing_docs)]

use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use valnav_testkit::fixture_path;

const GROUP_VALUES: &str = r#"value("groups") / unwrap / values(*) / unwrap / values(*)"#;

#[test]
fn match_lists_cartesian_expansion() {
	let output = run(&["match", &catalog(), GROUP_VALUES, "--sort"]);
	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

	let stdout = String::from_utf8_lossy(&output.stdout);
	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(lines.len(), 4);
	assert!(lines[0].ends_with(r#"<map value of key "A"> / <unwrap> / <map value of key "x"> = 1"#), "{}", lines[0]);
	assert!(lines[1].ends_with(r#"<map value of key "A"> / <unwrap> / <map value of key "y"> = 2"#), "{}", lines[1]);
	assert!(lines[2].ends_with(r#"<map value of key "B"> / <unwrap> / <map value of key "x"> = 3"#), "{}", lines[2]);
	assert_eq!(lines[3], "matches: 3");
}

#[test]
fn match_json_reports_count_and_rows() {
	let json = run_json(&["match", &catalog(), GROUP_VALUES, "--sort", "--json"]);
	assert_eq!(json["count"], 3);
	let values: Vec<Value> = json["matches"]
		.as_array()
		.expect("matches array")
		.iter()
		.map(|row| row["value"].clone())
		.collect();
	assert_eq!(values, vec![json!(1), json!(2), json!(3)]);
	assert!(json["pattern"].as_str().is_some_and(|item| item.contains("<all map values>")));
}

#[test]
fn match_keys_yield_the_keys() {
	let json = run_json(&["match", &catalog(), r#"value("groups") / unwrap / keys(*)"#, "--sort", "--json"]);
	let values: Vec<Value> = json["matches"]
		.as_array()
		.expect("matches array")
		.iter()
		.map(|row| row["value"].clone())
		.collect();
	assert_eq!(values, vec![json!("A"), json!("B")]);
}

#[test]
fn match_limit_stops_early() {
	let json = run_json(&["match", &catalog(), GROUP_VALUES, "--limit", "1", "--json"]);
	assert_eq!(json["count"], 1);
}

#[test]
fn match_without_results_succeeds() {
	let output = run(&["match", &catalog(), r#"value("owner") / unwrap / values(*)"#]);
	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "matches: 0");
}

#[test]
fn match_empty_pattern_yields_root() {
	let json = run_json(&["match", &catalog(), "", "--json"]);
	assert_eq!(json["count"], 1);
	assert_eq!(json["matches"][0]["path"], "<empty path>");
	assert_eq!(json["matches"][0]["value"]["name"], "catalog");
}

#[test]
fn match_reports_parse_errors() {
	let output = run(&["match", &catalog(), "values(*) /"]);
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.starts_with("error: invalid expression"), "stderr: {stderr}");
}

#[test]
fn match_reports_missing_document() {
	let output = run(&["match", "/nonexistent/valnav/catalog.json", "values(*)"]);
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.starts_with("error: read /nonexistent/valnav/catalog.json"), "stderr: {stderr}");
}

fn catalog() -> String {
	fixture_path("catalog.json").display().to_string()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_valnav")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"valnav command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
