/*
 * Integration tests for ipmi-node-exporter
 *
 * These tests drive the full scrape path (command output -> parsers ->
 * classifier -> registry -> HTTP response) with canned tool output.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use clap::Parser;
use ine_error::{ExporterError, Result};
use ine_sensors::{CommandRunner, CommandSpec};
use ipmi_node_exporter::server::{router, METRICS_PATH};
use ipmi_node_exporter::{Collector, CollectorSettings, Config, MetricRegistry};
use serial_test::serial;
use tower::ServiceExt;

const IPMI_OUTPUT: &str = "\
CPU1_TEMP        | 45.000     | degrees C  | ok    | na | 5.000 | 10.000 | 95.000 | 100.000 | na
CPU2_TEMP        | 47.000     | degrees C  | ok    | na | 5.000 | 10.000 | 95.000 | 100.000 | na
DIMMG0_TEMP      | 38.000     | degrees C  | ok    | na | na    | na     | 85.000 | 90.000  | na
VR_DIMMG0_TEMP   | 41.000     | degrees C  | ok    | na | na    | na     | 105.00 | 115.00  | na
M2_AMB_TEMP_3    | 33.000     | degrees C  | ok    | na | na    | na     | 70.000 | 75.000  | na
HIC_TEMP         | 52.000     | degrees C  | ok    | na | na    | na     | 90.000 | 95.000  | na
FAN1             | 4200.000   | RPM        | ok    | na | na    | na     | na     | na      | na
PSU1_VIN         | na         | Volts      | na    | na | na    | na     | na     | na      | na
GARBLED_TEMP     | 4x.0       | degrees C  | ok    | na | na    | na     | na     | na      | na
";

const SENSORS_OUTPUT: &str = "\
coretemp-isa-0000
Adapter: ISA adapter
Package id 0:  +40.0°C  (high = +80.0°C, crit = +100.0°C)
temp1:         +30.0°C

bnxt_en-pci-0200
Adapter: PCI adapter
temp1:        +45.0°C  (high = +100.0°C, crit = +110.0°C)
temp1:        +99.0°C
";

/// Serves canned tool output. Odd-numbered `ipmitool` calls report CPU1_TEMP
/// one degree higher so overlapping scrapes write different values.
struct CannedRunner {
    ipmi: Option<String>,
    sensors: Option<String>,
    ipmi_calls: AtomicUsize,
}

impl CannedRunner {
    fn new(ipmi: Option<&str>, sensors: Option<&str>) -> Self {
        Self {
            ipmi: ipmi.map(str::to_string),
            sensors: sensors.map(str::to_string),
            ipmi_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CommandRunner for CannedRunner {
    async fn run(&self, command: &CommandSpec) -> Result<String> {
        let is_ipmi = command.args.iter().any(|a| a == "ipmitool") || command.program == "ipmitool";
        let canned = if is_ipmi {
            let call = self.ipmi_calls.fetch_add(1, Ordering::SeqCst);
            self.ipmi.as_ref().map(|out| {
                if call % 2 == 1 {
                    out.replace("CPU1_TEMP        | 45.000", "CPU1_TEMP        | 46.000")
                } else {
                    out.clone()
                }
            })
        } else {
            self.sensors.clone()
        };
        canned.ok_or_else(|| ExporterError::CommandFailed {
            command: command.to_string(),
            status: "exit status: 1".to_string(),
            stderr: "simulated failure".to_string(),
        })
    }
}

fn collector(runner: CannedRunner) -> (Arc<Collector>, Arc<CannedRunner>) {
    let config = Config::try_parse_from(["ipmi-node-exporter"]).unwrap();
    let runner = Arc::new(runner);
    let collector = Collector::new(
        runner.clone(),
        Arc::new(MetricRegistry::new().unwrap()),
        CollectorSettings::from_config(&config, true),
    );
    (Arc::new(collector), runner)
}

async fn scrape(collector: Arc<Collector>) -> (StatusCode, String) {
    let response = router(collector)
        .oneshot(Request::get(METRICS_PATH).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
#[serial]
async fn test_full_scrape_publishes_every_category() {
    let (collector, _) = collector(CannedRunner::new(Some(IPMI_OUTPUT), Some(SENSORS_OUTPUT)));
    let (status, text) = scrape(collector).await;

    assert_eq!(status, StatusCode::OK);
    for expected in [
        "ipmi_temp_cpu_sensor{sensor_name=\"CPU1_TEMP\"} 45\n",
        "ipmi_temp_cpu_sensor{sensor_name=\"CPU2_TEMP\"} 47\n",
        "ipmi_temp_dimm_sensor{sensor_name=\"DIMMG0_TEMP\"} 38\n",
        "ipmi_temp_vrdimm_sensor{sensor_name=\"VR_DIMMG0_TEMP\"} 41\n",
        "ipmi_temp_env_sensor{sensor_name=\"M2_AMB_TEMP_3\"} 33\n",
        "ipmi_temp_hic_sensor{sensor_name=\"HIC_TEMP\"} 52\n",
        "network_card_temp_sensor{sensor_name=\"bnxt_en-pci-0200\"} 45\n",
    ] {
        assert!(text.contains(expected), "missing {expected:?} in:\n{text}");
    }

    for absent in ["FAN1", "PSU1_VIN", "GARBLED_TEMP", "coretemp", " 99\n"] {
        assert!(!text.contains(absent), "unexpected {absent:?} in:\n{text}");
    }
}

#[tokio::test]
#[serial]
async fn test_every_scrape_reruns_commands() {
    let (collector, runner) = collector(CannedRunner::new(Some(IPMI_OUTPUT), Some(SENSORS_OUTPUT)));
    scrape(collector.clone()).await;
    scrape(collector).await;
    assert_eq!(runner.ipmi_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
#[serial]
async fn test_both_sources_failing_still_returns_200() {
    let (collector, _) = collector(CannedRunner::new(None, None));
    let (status, text) = scrape(collector).await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.is_empty());
}

#[tokio::test]
#[serial]
async fn test_sensors_failure_keeps_ipmi_metrics() {
    let (collector, _) = collector(CannedRunner::new(Some(IPMI_OUTPUT), None));
    let (status, text) = scrape(collector).await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("ipmi_temp_cpu_sensor{sensor_name=\"CPU1_TEMP\"} 45\n"));
    assert!(!text.contains("network_card_temp_sensor"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn test_concurrent_scrapes_leave_consistent_values() {
    let (collector, _) = collector(CannedRunner::new(Some(IPMI_OUTPUT), Some(SENSORS_OUTPUT)));

    let scrapes: Vec<_> = (0..8)
        .map(|_| tokio::spawn(scrape(collector.clone())))
        .collect();
    for handle in scrapes {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let text = collector.registry().encode().unwrap();
    let cpu_lines: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("ipmi_temp_cpu_sensor{sensor_name=\"CPU1_TEMP\"}"))
        .collect();
    assert_eq!(cpu_lines.len(), 1);
    assert!(
        cpu_lines[0].ends_with(" 45") || cpu_lines[0].ends_with(" 46"),
        "torn or unexpected value: {}",
        cpu_lines[0]
    );
}

#[test]
#[serial]
fn test_config_from_environment() {
    std::env::set_var("IPMI_NODE_EXPORTER_LISTEN", "127.0.0.1:19101");
    std::env::set_var("IPMI_NODE_EXPORTER_COMMAND_TIMEOUT", "5");
    let config = Config::try_parse_from(["ipmi-node-exporter"]);
    std::env::remove_var("IPMI_NODE_EXPORTER_LISTEN");
    std::env::remove_var("IPMI_NODE_EXPORTER_COMMAND_TIMEOUT");

    let config = config.unwrap();
    assert_eq!(config.listen_address.to_string(), "127.0.0.1:19101");
    assert_eq!(config.command_timeout_secs, 5);
}

#[test]
#[serial]
fn test_flags_override_environment() {
    std::env::set_var("IPMI_NODE_EXPORTER_LISTEN", "127.0.0.1:19101");
    let config = Config::try_parse_from(["ipmi-node-exporter", "--listen-address", "127.0.0.1:9999"]);
    std::env::remove_var("IPMI_NODE_EXPORTER_LISTEN");

    assert_eq!(config.unwrap().listen_address.to_string(), "127.0.0.1:9999");
}
