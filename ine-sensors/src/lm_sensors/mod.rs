//! Network card temperatures via lm-sensors (`sensors`)
//!
//! `sensors` prints one stanza per chip: an identifier line, an `Adapter:`
//! line, then one line per feature. Only stanzas whose identifier is in the
//! watched set are read, and only their first `temp1` feature:
//!
//! ```text
//! bnxt_en-pci-0200
//! Adapter: PCI adapter
//! temp1:        +45.0°C  (high = +100.0°C, crit = +110.0°C)
//! ```

use ine_error::ExporterError;
use tracing::{trace, warn};

use crate::constants::{SENSORS_TEMP_MARKER, SENSORS_TEMP_PREFIX, SENSORS_TEMP_SUFFIX};
use crate::{CommandSpec, Result, SensorReading};

/// Build the `sensors` invocation
pub fn command(sensors: &str) -> CommandSpec {
    CommandSpec::new(sensors)
}

/// Parse a temperature token such as `+45.0°C`
pub fn parse_temperature(device: &str, token: &str) -> Result<f64> {
    let bare = token
        .trim_start_matches(SENSORS_TEMP_PREFIX)
        .trim_end_matches(SENSORS_TEMP_SUFFIX);
    bare.parse::<f64>()
        .map_err(|e| ExporterError::value_parse(device, token, e))
}

/// Extract at most one temperature per watched device stanza.
///
/// A reading is named after the identifier line of its stanza.
pub fn parse_output(output: &str, devices: &[String]) -> Vec<SensorReading> {
    let mut readings = Vec::new();
    let mut current: Option<&str> = None;

    for line in output.lines().map(str::trim) {
        if let Some(device) = devices.iter().find(|d| d.as_str() == line) {
            trace!("Entering stanza for {}", device);
            current = Some(device.as_str());
            continue;
        }

        let Some(device) = current else { continue };
        if !line.contains(SENSORS_TEMP_MARKER) {
            continue;
        }

        let Some(token) = line.split_whitespace().nth(1) else {
            continue;
        };

        match parse_temperature(device, token) {
            Ok(value) => {
                readings.push(SensorReading::new(device, value));
                // only the first temp1 line of a stanza counts
                current = None;
            }
            Err(e) => warn!("{}", e),
        }
    }

    readings
}
