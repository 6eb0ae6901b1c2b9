#![allow(dead_code)]

use httpmock::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Well-known development account #0 and its first CREATE address.
pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const TX_HASH: &str = "0x2f1c5c2b44f771e942a8506148e256f94f1a464babc938ae0690c6e34cd79190";

pub fn write_staking_artifact(root: &Path) {
    let dir = root.join("contracts/StakingToken.sol");
    fs::create_dir_all(&dir).unwrap();
    let artifact = json!({
        "_format": "hh-sol-artifact-1",
        "contractName": "StakingToken",
        "sourceName": "contracts/StakingToken.sol",
        "abi": [
            {"type": "constructor", "inputs": [], "stateMutability": "nonpayable"},
            {"type": "function", "name": "stake", "inputs": [{"name": "amount", "type": "uint256"}], "outputs": []}
        ],
        "bytecode": "0x6080604052348015600f57600080fd5b50603f80601d6000396000f3fe6080604052600080fdfea164736f6c634300080b000a",
        "deployedBytecode": "0x6080604052600080fdfea164736f6c634300080b000a",
        "linkReferences": {},
        "deployedLinkReferences": {}
    });
    fs::write(dir.join("StakingToken.json"), artifact.to_string()).unwrap();
}

fn rpc_result(result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "result": result})
}

fn method(name: &str) -> String {
    format!("\"method\":\"{}\"", name)
}

/// Answers every read the deployer makes before submitting, keyed by method.
pub fn mock_chain_reads<'a>(
    server: &'a MockServer,
    head_block: &str,
) -> HashMap<&'static str, httpmock::Mock<'a>> {
    let mut mocks = HashMap::new();
    for (name, result) in [
        ("eth_chainId", json!("0x7a69")),
        ("eth_getTransactionCount", json!("0x0")),
        ("eth_gasPrice", json!("0x3b9aca00")),
        ("eth_maxPriorityFeePerGas", json!("0x3b9aca00")),
        ("eth_estimateGas", json!("0x186a0")),
        ("eth_blockNumber", json!(head_block)),
    ] {
        let mock = server.mock(|when, then| {
            when.method(POST).body_contains(method(name));
            then.status(200).json_body(rpc_result(result));
        });
        mocks.insert(name, mock);
    }
    mocks
}

pub fn mock_send_accepted(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).body_contains(method("eth_sendRawTransaction"));
        then.status(200).json_body(rpc_result(json!(TX_HASH)));
    })
}

pub fn mock_send_rejected<'a>(server: &'a MockServer, message: &str) -> httpmock::Mock<'a> {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": {"code": -32000, "message": message}
    });
    server.mock(|when, then| {
        when.method(POST).body_contains(method("eth_sendRawTransaction"));
        then.status(200).json_body(body);
    })
}

pub fn mock_receipt<'a>(server: &'a MockServer, status: &str) -> httpmock::Mock<'a> {
    mock_receipt_at(server, status, Some(CONTRACT_ADDRESS))
}

pub fn mock_receipt_at<'a>(
    server: &'a MockServer,
    status: &str,
    contract_address: Option<&str>,
) -> httpmock::Mock<'a> {
    let receipt = json!({
        "transactionHash": TX_HASH,
        "blockNumber": "0x1",
        "contractAddress": contract_address.map(str::to_lowercase),
        "status": status,
        "gasUsed": "0x2dc6c0",
        "effectiveGasPrice": "0x77359400"
    });
    server.mock(|when, then| {
        when.method(POST).body_contains(method("eth_getTransactionReceipt"));
        then.status(200).json_body(rpc_result(receipt));
    })
}

pub fn mock_receipt_pending(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).body_contains(method("eth_getTransactionReceipt"));
        then.status(200).json_body(rpc_result(Value::Null));
    })
}

pub fn config_toml(url: &str, artifacts: &Path) -> String {
    format!(
        r#"
[solidity]
version = "0.8.11"

[solidity.optimizer]
enabled = true
runs = 200

[networks.localhost]
url = "{url}"
accounts = ["${{PRIVATE_KEY}}"]
chain_id = 31337

[gas_reporter]
enabled = "${{REPORT_GAS}}"
currency = "USD"

[deploy]
default_network = "localhost"
artifacts = "{artifacts}"
poll_interval_ms = 10
timeout_secs = 5
"#,
        url = url,
        artifacts = artifacts.display().to_string().replace('\\', "/"),
    )
}
