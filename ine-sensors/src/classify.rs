//! Sensor name classification
//!
//! IPMI sensor names are vendor specific and only loosely structured, so a
//! name is mapped to a [`Category`] by an ordered table of substring rules.
//! The first rule whose substrings are all present wins; names matching no
//! rule are [`Category::Unknown`].

use crate::Category;

/// One classification rule: every substring in `all_of` must be contained in
/// the sensor name (case-sensitive)
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub all_of: &'static [&'static str],
}

impl Rule {
    pub fn matches(&self, name: &str) -> bool {
        self.all_of.iter().all(|needle| name.contains(needle))
    }
}

/// Rule table for `ipmitool sensor` names.
///
/// Order matters: `VR_DIMMG` must be tested before `DIMMG`.
pub const IPMI_RULES: &[Rule] = &[
    Rule { category: Category::VrDimm, all_of: &["VR_DIMMG"] },
    Rule { category: Category::Dimm, all_of: &["DIMMG"] },
    Rule { category: Category::Cpu, all_of: &["CPU", "TEMP"] },
    Rule { category: Category::Env, all_of: &["M2_AMB_TEMP"] },
    Rule { category: Category::Hic, all_of: &["HIC_TEMP"] },
];

/// Classify a name against an arbitrary rule table
pub fn classify_with(rules: &[Rule], name: &str) -> Category {
    rules
        .iter()
        .find(|rule| rule.matches(name))
        .map(|rule| rule.category)
        .unwrap_or(Category::Unknown)
}

/// Classify an IPMI sensor name
pub fn classify(name: &str) -> Category {
    classify_with(IPMI_RULES, name)
}
