//! Tool names, arguments and output markers

/// Default ipmitool executable
pub const IPMITOOL: &str = "ipmitool";

/// ipmitool subcommand that prints one pipe-delimited line per sensor
pub const IPMITOOL_SENSOR_ARG: &str = "sensor";

/// Privilege escalation wrapper for ipmitool
pub const SUDO: &str = "sudo";

/// Default lm-sensors executable
pub const SENSORS: &str = "sensors";

/// Field delimiter in `ipmitool sensor` output
pub const IPMI_FIELD_DELIMITER: char = '|';

/// Reading ipmitool prints for a sensor with no current value
pub const IPMI_NO_READING: &str = "na";

/// Substring marking the temperature line inside an lm-sensors stanza
pub const SENSORS_TEMP_MARKER: &str = "temp1";

/// Decoration around lm-sensors temperature tokens (`+45.0°C`)
pub const SENSORS_TEMP_PREFIX: char = '+';
pub const SENSORS_TEMP_SUFFIX: &str = "°C";

/// Network card adapter watched by default
pub const DEFAULT_SENSORS_DEVICE: &str = "bnxt_en-pci-0200";

/// Default per-command timeout in seconds
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;
