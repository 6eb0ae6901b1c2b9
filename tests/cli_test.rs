mod common;

use assert_cmd::Command;
use common::*;
use httpmock::prelude::*;
use predicates::prelude::*;
use regex::Regex;
use std::fs;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(rpc_url: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let artifacts = dir.path().join("artifacts");
        write_staking_artifact(&artifacts);
        fs::write(dir.path().join("deploy.toml"), config_toml(rpc_url, &artifacts))
            .expect("write config");
        Self { dir }
    }

    /// Adds a second network entry to the workspace config.
    fn add_network(&self, name: &str, url: &str) {
        let path = self.dir.path().join("deploy.toml");
        let mut config = fs::read_to_string(&path).expect("read config");
        config.push_str(&format!(
            "\n[networks.{name}]\nurl = \"{url}\"\naccounts = [\"${{PRIVATE_KEY}}\"]\n"
        ));
        fs::write(&path, config).expect("write config");
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("staking-deploy").expect("binary built");
        cmd.current_dir(self.dir.path())
            .env_remove("DEPLOY_NETWORK")
            .env_remove("REPORT_GAS")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn deploy_prints_one_address_line() {
    let server = MockServer::start();
    mock_chain_reads(&server, "0x1");
    mock_send_accepted(&server);
    mock_receipt(&server, "0x1");

    let ws = Workspace::new(&server.base_url());
    let output = ws
        .cmd()
        .env("PRIVATE_KEY", DEV_KEY)
        .env("REPORT_GAS", "true")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout was: {stdout}");
    assert_eq!(lines[0], format!("StakingToken deployed to: {CONTRACT_ADDRESS}"));

    let address_re = Regex::new(r"0x[0-9a-fA-F]{40}").unwrap();
    assert_eq!(address_re.find_iter(&stdout).count(), 1);
}

#[test]
fn rejected_deploy_exits_one_with_stderr_only() {
    let server = MockServer::start();
    mock_chain_reads(&server, "0x1");
    mock_send_rejected(&server, "insufficient funds for gas * price + value");

    let ws = Workspace::new(&server.base_url());
    ws.cmd()
        .env("PRIVATE_KEY", DEV_KEY)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("insufficient funds"));
}

#[test]
fn reverted_deploy_exits_one() {
    let server = MockServer::start();
    mock_chain_reads(&server, "0x1");
    mock_send_accepted(&server);
    mock_receipt(&server, "0x0");

    let ws = Workspace::new(&server.base_url());
    ws.cmd()
        .env("PRIVATE_KEY", DEV_KEY)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("reverted"));
}

#[test]
fn unset_private_key_fails_before_any_rpc() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let ws = Workspace::new(&server.base_url());
    ws.cmd()
        .env_remove("PRIVATE_KEY")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("accounts"));
    any.assert_hits(0);
}

#[test]
fn dry_run_sends_nothing() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let ws = Workspace::new(&server.base_url());
    ws.cmd()
        .env("PRIVATE_KEY", DEV_KEY)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Configuration Summary"));
    any.assert_hits(0);
}

#[test]
fn unknown_network_exits_one() {
    let ws = Workspace::new("http://127.0.0.1:1");
    ws.cmd()
        .env("PRIVATE_KEY", DEV_KEY)
        .args(["--network", "mainnet"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("mainnet"));
}

#[test]
fn deploy_network_env_selects_network() {
    let server = MockServer::start();
    mock_chain_reads(&server, "0x1");
    let send = mock_send_accepted(&server);
    mock_receipt(&server, "0x1");

    // The default network points at a closed port; only the env choice can succeed.
    let ws = Workspace::new("http://127.0.0.1:1");
    ws.add_network("staging", &server.base_url());
    ws.cmd()
        .env("PRIVATE_KEY", DEV_KEY)
        .env("DEPLOY_NETWORK", "staging")
        .assert()
        .success()
        .stdout(predicate::str::contains(CONTRACT_ADDRESS));
    send.assert_hits(1);
}

#[test]
fn invalid_flag_exits_one() {
    let ws = Workspace::new("http://127.0.0.1:1");
    ws.cmd()
        .args(["--confirmations", "abc"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--confirmations"));
}

#[test]
fn help_still_exits_zero() {
    let ws = Workspace::new("http://127.0.0.1:1");
    ws.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--network"));
}

#[test]
fn explicit_missing_config_exits_one() {
    let ws = Workspace::new("http://127.0.0.1:1");
    ws.cmd()
        .env("PRIVATE_KEY", DEV_KEY)
        .args(["--config", "missing.toml", "--dry-run"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn dotenv_in_working_dir_supplies_key() {
    let server = MockServer::start();
    mock_chain_reads(&server, "0x1");
    mock_send_accepted(&server);
    mock_receipt(&server, "0x1");

    let ws = Workspace::new(&server.base_url());
    fs::write(ws.dir.path().join(".env"), format!("PRIVATE_KEY={}\n", DEV_KEY)).unwrap();
    ws.cmd()
        .env_remove("PRIVATE_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains(CONTRACT_ADDRESS));
}

#[test]
fn failure_is_reported_once() {
    let server = MockServer::start();
    mock_chain_reads(&server, "0x1");
    mock_send_rejected(&server, "insufficient funds for gas * price + value");

    let ws = Workspace::new(&server.base_url());
    ws.cmd()
        .env("PRIVATE_KEY", DEV_KEY)
        .assert()
        .code(1)
        .stderr(predicate::function(|err: &str| {
            err.matches("insufficient funds").count() == 1
        }));
}
