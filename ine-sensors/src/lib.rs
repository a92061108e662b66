//! Hardware sensor collection for ipmi-node-exporter
//!
//! Provides command invocation and output parsing for:
//! - IPMI sensors (via `ipmitool sensor`)
//! - Network card temperatures (via lm-sensors `sensors`)
//!
//! plus the substring rules that sort IPMI sensor names into metric categories.

pub mod classify;
pub mod constants;
pub mod ipmi;
pub mod lm_sensors;
pub mod runner;

mod types;

pub use classify::{classify, classify_with, Rule, IPMI_RULES};
pub use runner::{CommandRunner, CommandSpec, SystemRunner};
pub use types::*;

pub use ine_error::ExporterError;

pub type Result<T> = std::result::Result<T, ExporterError>;
