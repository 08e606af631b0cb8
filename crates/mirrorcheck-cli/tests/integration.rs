#![allow(deprecated)]
use assert_cmd::Command;
use mockito::{Mock, Server, ServerGuard};
use predicates::prelude::*;
use tempfile::TempDir;

fn mirrorcheck() -> Command {
    let mut cmd = Command::cargo_bin("mirrorcheck").unwrap();
    cmd.env_remove("MIRRORCHECK_CONFIG")
        .env_remove("MIRRORCHECK_KIND")
        .env_remove("RUST_LOG");
    cmd
}

fn serve(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_body(body)
        .expect(1)
        .create()
}

// ---------------------------------------------------------------------------
// configuration errors
// ---------------------------------------------------------------------------

#[test]
fn identical_endpoints_fail_without_fetching() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/trace")
        .with_status(200)
        .with_body("Date: Fri, 19 Jan 2018 19:26:41 UTC\n")
        .expect(0)
        .create();
    let url = format!("{}/trace", server.url());

    mirrorcheck()
        .args(["check", "debian", &url, &url])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot be compared with itself"));

    mock.assert();
}

#[test]
fn unknown_kind_fails_without_fetching() {
    let mut server = Server::new();
    let first = server.mock("GET", "/a").expect(0).create();
    let second = server.mock("GET", "/b").expect(0).create();

    mirrorcheck()
        .args([
            "check",
            "gentoo",
            &format!("{}/a", server.url()),
            &format!("{}/b", server.url()),
            "--kind",
            "portage",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported format kind 'portage'"));

    first.assert();
    second.assert();
}

#[test]
fn zero_threshold_is_a_config_error() {
    mirrorcheck()
        .args([
            "check",
            "debian",
            "https://a.example.org/trace",
            "https://b.example.org/trace",
            "--threshold-hours",
            "0",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn malformed_config_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mirrorcheck.yaml");
    std::fs::write(&path, "threshold: [not, a, number]\n").unwrap();

    mirrorcheck()
        .args([
            "check",
            "debian",
            "https://a.example.org/trace",
            "https://b.example.org/trace",
        ])
        .arg("--config")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration"));
}

// ---------------------------------------------------------------------------
// verdicts
// ---------------------------------------------------------------------------

#[test]
fn fresh_mirror_exits_zero_quietly() {
    let mut server = Server::new();
    let local = serve(&mut server, "/local/trace", "Date: Fri, 19 Jan 2018 18:40:00 UTC\n");
    let upstream = serve(
        &mut server,
        "/upstream/trace",
        "Date: Fri, 19 Jan 2018 19:26:41 UTC\n",
    );

    mirrorcheck()
        .args([
            "check",
            "debian",
            &format!("{}/local/trace", server.url()),
            &format!("{}/upstream/trace", server.url()),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    local.assert();
    upstream.assert();
}

#[test]
fn stale_mirror_reports_and_exits_one() {
    let mut server = Server::new();
    // Upstream is passed first; the report still lists the older side first.
    let _upstream = serve(&mut server, "/upstream/state", "branch=stable\ndate=2018-01-19T19:26:41Z\n");
    let _local = serve(&mut server, "/local/state", "branch=stable\ndate=2018-01-17T10:00:00Z\n");
    let upstream = format!("{}/upstream/state", server.url());
    let local = format!("{}/local/state", server.url());

    let assert = mirrorcheck()
        .args(["check", "manjaro", &upstream, &local, "--kind", "manjaro"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[STALE] manjaro"))
        .stdout(predicate::str::contains("2d 09h 26m 41s"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let older = stdout.find(&format!("older: 2018-01-17T10:00:00Z  {local}"));
    let newer = stdout.find(&format!("newer: 2018-01-19T19:26:41Z  {upstream}"));
    assert!(older.is_some() && newer.is_some(), "{stdout}");
    assert!(older < newer);
}

#[test]
fn threshold_flag_changes_verdict() {
    let mut server = Server::new();
    let _a = server
        .mock("GET", "/a")
        .with_body("1516392227\n")
        .expect(2)
        .create();
    let _b = server
        .mock("GET", "/b")
        .with_body("1516370627\n")
        .expect(2)
        .create();
    let a = format!("{}/a", server.url());
    let b = format!("{}/b", server.url());

    // 6 hours apart.
    mirrorcheck()
        .args(["check", "ubuntu", &a, &b, "-k", "unix_timestamp"])
        .assert()
        .success();
    mirrorcheck()
        .args(["check", "ubuntu", &a, &b, "-k", "unix_timestamp"])
        .args(["--threshold-hours", "5"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("06h 00m 00s"));
}

#[test]
fn json_output_on_success() {
    let mut server = Server::new();
    let _a = serve(&mut server, "/a", "Fri Jan 19 19:26:41 UTC 2018\n");
    let _b = serve(&mut server, "/b", "Fri Jan 19 19:00:00 UTC 2018\n");

    let assert = mirrorcheck()
        .args([
            "check",
            "archlinux",
            &format!("{}/a", server.url()),
            &format!("{}/b", server.url()),
            "--kind",
            "datetime",
            "--json",
        ])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["project"], "archlinux");
    assert_eq!(value["kind"], "datetime");
    assert_eq!(value["verdict"]["stale"], false);
    assert_eq!(value["verdict"]["gap_seconds"], 1601);
    assert!(value["mirrors"]["older"]["endpoint"]
        .as_str()
        .unwrap()
        .ends_with("/b"));
}

#[test]
fn recursive_listing_from_local_file() {
    let dir = TempDir::new().unwrap();
    let listing = dir.path().join("ls-lR");
    std::fs::write(
        &listing,
        "./pool:\n\
         -rw-r--r-- 1 mirror mirror 1024 2018-01-19 08:00 index\n\
         -rw-r--r-- 1 mirror mirror 2048 2018-01-19 19:20 Packages\n",
    )
    .unwrap();

    let mut server = Server::new();
    let _remote = serve(
        &mut server,
        "/ls-lR",
        "-rw-r--r-- 1 mirror mirror 2048 2018-01-19 19:26 Packages\n",
    );

    mirrorcheck()
        .args([
            "check",
            "cpan",
            &format!("file://{}", listing.display()),
            &format!("{}/ls-lR", server.url()),
            "--kind",
            "recursive_ls",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ---------------------------------------------------------------------------
// fetch and parse failures
// ---------------------------------------------------------------------------

#[test]
fn http_error_exits_two() {
    let mut server = Server::new();
    let _ok = serve(&mut server, "/ok", "Date: Fri, 19 Jan 2018 19:26:41 UTC\n");
    let _missing = server.mock("GET", "/missing").with_status(404).create();
    let missing = format!("{}/missing", server.url());

    mirrorcheck()
        .args(["check", "debian", &format!("{}/ok", server.url()), &missing])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(format!("{missing} returned HTTP 404")));
}

#[test]
fn parse_error_names_endpoint_and_kind() {
    let mut server = Server::new();
    let _html = serve(&mut server, "/html", "<html><body>maintenance</body></html>\n");
    let url = format!("{}/html", server.url());

    mirrorcheck()
        .args(["check", "debian", &url, "https://never.example.org/trace"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(format!(
            "cannot read debian timestamp from {url}"
        )))
        .stderr(predicate::str::contains("no line starting with 'Date: '"));
}

// ---------------------------------------------------------------------------
// inspect / kinds
// ---------------------------------------------------------------------------

#[test]
fn inspect_prints_timestamp_and_zone() {
    let mut server = Server::new();
    let _lastsync = serve(&mut server, "/lastsync", "1516392227\n");

    mirrorcheck()
        .args([
            "inspect",
            &format!("{}/lastsync", server.url()),
            "--kind",
            "unix_timestamp",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced at: 2018-01-19T20:03:47Z"))
        .stdout(predicate::str::contains("Zone:      utc"));
}

#[test]
fn kinds_lists_every_format() {
    mirrorcheck()
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("debian (default)"))
        .stdout(predicate::str::contains("manjaro"))
        .stdout(predicate::str::contains("unix_timestamp"))
        .stdout(predicate::str::contains("datetime"))
        .stdout(predicate::str::contains("recursive_ls"));
}
