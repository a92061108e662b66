//! IPMI sensor readings via `ipmitool sensor`
//!
//! Each output line is `<name> | <value> | <unit> | <status> | ...`. Only the
//! first two fields are used; readings are classified by name afterwards.

use ine_error::ExporterError;
use tracing::{debug, warn};

use crate::constants::{IPMITOOL_SENSOR_ARG, IPMI_FIELD_DELIMITER, IPMI_NO_READING, SUDO};
use crate::{CommandSpec, Result, SensorReading};

/// Build the `ipmitool sensor` invocation, optionally through sudo
pub fn command(ipmitool: &str, use_sudo: bool) -> CommandSpec {
    let spec = CommandSpec::new(ipmitool).arg(IPMITOOL_SENSOR_ARG);
    if use_sudo {
        spec.wrapped_in(SUDO)
    } else {
        spec
    }
}

/// Parse one line of `ipmitool sensor` output.
///
/// Returns `None` for lines without a name/value pair, `Some(Err)` when the
/// value field is not a number.
pub fn parse_line(line: &str) -> Option<Result<SensorReading>> {
    let mut fields = line.split(IPMI_FIELD_DELIMITER);
    let name = fields.next()?.trim();
    let value = fields.next()?.trim();

    if name.is_empty() {
        return None;
    }

    Some(
        value
            .parse::<f64>()
            .map(|v| SensorReading::new(name, v))
            .map_err(|e| ExporterError::value_parse(name, value, e)),
    )
}

/// Parse full `ipmitool sensor` output, dropping lines that do not parse
pub fn parse_output(output: &str) -> Vec<SensorReading> {
    let mut readings = Vec::new();

    for line in output.lines() {
        match parse_line(line) {
            Some(Ok(reading)) => readings.push(reading),
            Some(Err(ExporterError::ValueParse { sensor, value, .. }))
                if value == IPMI_NO_READING =>
            {
                debug!("No reading for IPMI sensor {}", sensor);
            }
            Some(Err(e)) => warn!("{}", e),
            None => {}
        }
    }

    readings
}
