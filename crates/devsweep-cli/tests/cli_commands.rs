use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn base_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("devsweep"));
    cmd.env("HOME", home)
        .env_remove("RUSTDESK_TOKEN")
        .env_remove("DEVSWEEP_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn inventory_body() -> String {
    json!({
        "data": [
            {
                "id": 7,
                "guid": "guid-7",
                "device_name": "old-kiosk",
                "last_online": "2020-03-01T08:15:00.250"
            },
            {
                "id": 8,
                "guid": "guid-8",
                "info": { "device_name": "reception" },
                "last_online": "2999-01-01T00:00:00"
            }
        ],
        "total": 2
    })
    .to_string()
}

fn mock_inventory(server: &mut Server) -> mockito::Mock {
    server
        .mock("GET", "/api/devices")
        .match_header("authorization", "Bearer secret")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(inventory_body())
        .create()
}

#[test]
fn help_lists_subcommands() {
    let home_dir = tempdir().expect("tempdir");
    base_cmd(home_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("view"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn view_prints_matching_devices() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    let listing = server
        .mock("GET", "/api/devices")
        .match_header("authorization", "Bearer secret")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("group_name".into(), "%lab%".into()),
            Matcher::UrlEncoded("pageSize".into(), "200".into()),
            Matcher::UrlEncoded("current".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(inventory_body())
        .create();

    base_cmd(home_dir.path())
        .args([
            "--url",
            &server.url(),
            "--token",
            "secret",
            "view",
            "--group-name",
            "lab",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("old-kiosk"))
        .stdout(predicate::str::contains("reception"))
        .stdout(predicate::str::contains("Total devices matched: 2"));
    listing.assert();
}

#[test]
fn view_filters_by_offline_days_with_underscore_alias() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_inventory(&mut server);

    base_cmd(home_dir.path())
        .env("RUSTDESK_TOKEN", "secret")
        .env("DEVSWEEP_URL", server.url())
        .args(["view", "--offline_days", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("old-kiosk"))
        .stdout(predicate::str::contains("reception").not())
        .stdout(predicate::str::contains("Total devices matched: 1"));
}

#[test]
fn config_file_supplies_url_and_format() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_inventory(&mut server);

    let config_dir = home_dir.path().join(".devsweep");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(
        config_dir.join("config.json"),
        json!({ "url": server.url(), "format": "json", "identifier": "id" }).to_string(),
    )
    .expect("write config");

    let output = base_cmd(home_dir.path())
        .env("RUSTDESK_TOKEN", "secret")
        .args(["view", "--offline-days", "30"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(rows[0]["identifier"], "7");
    assert_eq!(rows[0]["name"], "old-kiosk");
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
}

#[test]
fn delete_declined_changes_nothing() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_inventory(&mut server);
    let disable = server
        .mock("POST", Matcher::Regex(r"^/api/devices/.+/disable$".to_string()))
        .expect(0)
        .create();

    base_cmd(home_dir.path())
        .args(["--url", &server.url(), "--token", "secret", "delete"])
        .args(["--offline-days", "30"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete these 1 devices? (yes/no): "))
        .stdout(predicate::str::contains("Aborted; no devices were changed."));
    disable.assert();
}

#[test]
fn delete_confirmed_disables_then_deletes() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_inventory(&mut server);
    let disable = server
        .mock("POST", "/api/devices/guid-7/disable")
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .expect(1)
        .create();
    let delete = server
        .mock("DELETE", "/api/devices/guid-7")
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .expect(1)
        .create();

    base_cmd(home_dir.path())
        .args(["--url", &server.url(), "--token", "secret", "delete"])
        .args(["--offline-days", "30"])
        .write_stdin(" Yes \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Device deleted: old-kiosk (guid-7)"))
        .stdout(predicate::str::contains(
            "Deleted 1 of 1 devices (0 disable failed, 0 delete failed)",
        ));
    disable.assert();
    delete.assert();
}

#[test]
fn delete_with_failures_exits_6() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_inventory(&mut server);
    server
        .mock("POST", "/api/devices/guid-7/disable")
        .with_status(403)
        .with_body("forbidden")
        .create();
    let delete = server
        .mock("DELETE", "/api/devices/guid-7")
        .expect(0)
        .create();

    base_cmd(home_dir.path())
        .args(["--url", &server.url(), "--token", "secret", "delete"])
        .args(["--offline-days", "30"])
        .write_stdin("yes\n")
        .assert()
        .code(6)
        .stdout(predicate::str::contains(
            "Failed to disable device: old-kiosk (guid-7): HTTP 403: forbidden",
        ));
    delete.assert();
}

#[test]
fn missing_token_exits_3_without_requests() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    let listing = server
        .mock("GET", "/api/devices")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    base_cmd(home_dir.path())
        .args(["--url", &server.url(), "view"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("RUSTDESK_TOKEN"));
    listing.assert();
}

#[test]
fn bad_timestamp_aborts_unless_skipped() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    server
        .mock("GET", "/api/devices")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "data": [
                    { "id": "1", "guid": "g-1", "device_name": "broken", "last_online": "yesterday" },
                    { "id": "2", "guid": "g-2", "device_name": "stale", "last_online": "2020-01-01T00:00:00" }
                ],
                "total": 2
            })
            .to_string(),
        )
        .create();

    base_cmd(home_dir.path())
        .args(["--url", &server.url(), "--token", "secret", "view"])
        .args(["--offline-days", "1"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("yesterday"));

    base_cmd(home_dir.path())
        .args(["--url", &server.url(), "--token", "secret", "view"])
        .args(["--offline-days", "1", "--on-bad-timestamp", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stale"))
        .stdout(predicate::str::contains("Skipped 1 devices with unreadable last_online: 1"));
}

#[test]
fn failed_listing_exits_4() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    server
        .mock("GET", "/api/devices")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    base_cmd(home_dir.path())
        .args(["--url", &server.url(), "--token", "secret", "view"])
        .assert()
        .code(4);
}

#[test]
fn negative_offline_days_is_a_usage_error() {
    let home_dir = tempdir().expect("tempdir");
    base_cmd(home_dir.path())
        .args(["--token", "secret", "view", "--offline-days", "-3"])
        .assert()
        .code(2);
}
