// src/core/align.rs
//
// Length alignment of the reference clips after decimation.

use log::{debug, warn};
use serde::Serialize;

use crate::config::{Attack, REFERENCE_COUNT};
use crate::error::{AnalysisError, Result};

/// Samples dropped from one reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trim {
    pub attack: Attack,
    pub original_len: usize,
    pub removed: usize,
}

/// Truncate every reference to the shortest one.
///
/// Each truncation is a data-quality issue and is logged as a warning. The
/// returned list holds only the references that lost samples.
pub fn align_references(references: &mut [Vec<f64>; REFERENCE_COUNT]) -> Result<Vec<Trim>> {
    let common = references.iter().map(Vec::len).min().unwrap_or(0);
    if common == 0 {
        let attack = references
            .iter()
            .position(Vec::is_empty)
            .and_then(Attack::from_index)
            .unwrap_or(Attack::LightPunch);
        return Err(AnalysisError::EmptySignal {
            name: attack.code().to_string(),
        });
    }

    let mut trims = Vec::new();
    for (attack, samples) in Attack::ALL.iter().zip(references.iter_mut()) {
        let removed = samples.len() - common;
        if removed > 0 {
            warn!(
                "{}: {} sample(s) longer than the shortest reference, truncating to {}",
                attack, removed, common
            );
            trims.push(Trim {
                attack: *attack,
                original_len: samples.len(),
                removed,
            });
            samples.truncate(common);
        }
    }

    debug!("references aligned to {} samples", common);
    Ok(trims)
}
