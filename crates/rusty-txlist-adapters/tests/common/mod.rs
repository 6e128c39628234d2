#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use alloy::primitives::Address;
use serde_json::json;
use tiny_http::{Method, Response, Server, StatusCode};

use rusty_txlist_adapters::TxListAdapterConfig;
use rusty_txlist_core::{ClockPort, PortError};

/// Clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct TestClock {
    now: Arc<AtomicU64>,
}

impl TestClock {
    pub fn at(now_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(now_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl ClockPort for TestClock {
    fn now_ms(&self) -> Result<u64, PortError> {
        Ok(self.now.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasStationMode {
    Healthy,
    BasicUnavailable,
    MalformedBasic,
    /// Healthy payloads, each answered after a delay.
    Slow(Duration),
}

pub struct MockGasStation {
    pub base_url: String,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockGasStation {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn config(&self) -> TxListAdapterConfig {
        TxListAdapterConfig {
            gas_station_base_url: self.base_url.clone(),
            gas_station_timeout_ms: 5_000,
            ..TxListAdapterConfig::default()
        }
    }
}

pub fn basic_payload() -> serde_json::Value {
    json!({
        "fast": 200.0,
        "fastest": 300.0,
        "safeLow": 100.0,
        "average": 150.0,
        "block_time": 13.5,
        "blockNum": 9_876_543,
        "speed": 0.92,
        "safeLowWait": 12.1,
        "avgWait": 3.2,
        "fastWait": 0.6,
        "fastestWait": 0.5
    })
}

pub fn prediction_payload() -> serde_json::Value {
    json!([
        {"expectedTime": 20.0, "expectedWait": 8.0, "gasprice": 10.0, "somethingElse": 1},
        {"expectedTime": 20.0, "expectedWait": 8.0, "gasprice": 11.0},
        {"expectedTime": 5.0, "expectedWait": 2.0, "gasprice": 40.0}
    ])
}

pub fn spawn_gas_station(mode: GasStationMode) -> MockGasStation {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let base_url = format!("http://{}", server.server_addr());
    let calls = Arc::new(Mutex::new(Vec::<String>::new()));
    let recorded = Arc::clone(&calls);

    thread::spawn(move || {
        for req in server.incoming_requests() {
            let path = req.url().to_owned();
            if let Ok(mut g) = recorded.lock() {
                g.push(path.clone());
            }
            if let GasStationMode::Slow(delay) = mode {
                thread::sleep(delay);
            }

            let (code, body) = match (req.method(), path.as_str(), mode) {
                (Method::Get, "/json/ethgasAPI.json", GasStationMode::BasicUnavailable) => {
                    (503, json!({"error": "maintenance"}).to_string())
                }
                (Method::Get, "/json/ethgasAPI.json", GasStationMode::MalformedBasic) => {
                    (200, "{\"fast\": \"soon\"}".to_owned())
                }
                (Method::Get, "/json/ethgasAPI.json", _) => (200, basic_payload().to_string()),
                (Method::Get, "/json/predictTable.json", _) => {
                    (200, prediction_payload().to_string())
                }
                _ => (404, json!({"error": "not found"}).to_string()),
            };

            let response = Response::from_string(body).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    MockGasStation { base_url, calls }
}

pub fn owner_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid owner address")
}

pub fn recipient_address() -> Address {
    "0x000000000000000000000000000000000000CAFE"
        .parse()
        .expect("valid recipient address")
}
