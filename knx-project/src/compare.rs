//! Cross check of a GPA export against an ETS export of the same installation

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::model::GroupAddress;

/// A GPA group address whose ETS counterpart differs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub gpa: GroupAddress,
    pub ets: GroupAddress,
    pub address_ok: bool,
    /// Same datapoint type main group
    pub dtype_ok: bool,
    /// One name contains the other
    pub name_ok: bool,
}

/// Result of [`compare_group_addresses`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub mismatches: Vec<Mismatch>,
    /// GPA addresses without an ETS address of the same raw value
    pub missing: Vec<GroupAddress>,
}

impl Comparison {
    /// No mismatches and nothing missing
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty() && self.missing.is_empty()
    }

    pub fn log(&self) {
        for mismatch in &self.mismatches {
            warn!(
                "{}: address {}, dtype {} ({} / {}), name {} ('{}' / '{}')",
                mismatch.gpa,
                ok(mismatch.address_ok),
                ok(mismatch.dtype_ok),
                mismatch.gpa.dtype,
                mismatch.ets.dtype,
                ok(mismatch.name_ok),
                mismatch.gpa.name,
                mismatch.ets.name,
            );
        }
        if !self.missing.is_empty() {
            warn!("{} group addresses are missing in the ETS export", self.missing.len());
            for ga in &self.missing {
                warn!("\t{}: {} ({})", ga, ga.name, ga.dtype);
            }
        }
        if self.is_consistent() {
            info!("Both exports are consistent");
        }
    }
}

fn ok(value: bool) -> &'static str {
    if value {
        "ok"
    } else {
        "differs"
    }
}

/// Pair every GPA address with the ETS address of the same raw value.
///
/// Pairs that are not [`GroupAddress::almost_equal`] are reported as
/// mismatches, GPA addresses without a partner as missing.
pub fn compare_group_addresses(gpa: &[GroupAddress], ets: &[GroupAddress]) -> Comparison {
    let by_address: HashMap<u16, &GroupAddress> = ets.iter().map(|ga| (ga.address, ga)).collect();
    let mut comparison = Comparison::default();

    for gpa_ga in gpa {
        let Some(ets_ga) = by_address.get(&gpa_ga.address) else {
            comparison.missing.push(gpa_ga.clone());
            continue;
        };

        if gpa_ga.almost_equal(ets_ga) {
            continue;
        }

        comparison.mismatches.push(Mismatch {
            gpa: gpa_ga.clone(),
            ets: (*ets_ga).clone(),
            address_ok: gpa_ga.address == ets_ga.address,
            dtype_ok: gpa_ga.dtype_main_group() == ets_ga.dtype_main_group(),
            name_ok: ets_ga.name.contains(&gpa_ga.name) || gpa_ga.name.contains(&ets_ga.name),
        });
    }

    comparison
}
