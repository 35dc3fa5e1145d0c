//! The pure part of a screening pass: validate bodies, convert them to
//! Cartesian positions once, then evaluate every unordered pair.
//!
//! A catalog id may appear only once per pass. The first occurrence is
//! screened and later ones are rejected, so no record pairs a body with
//! itself.
//!
//! Pairs are visited as `(a, b)` with `a < b` over the valid bodies, outer
//! index ascending, then inner index ascending. Candidates come out in that
//! order whether or not the scan runs in parallel.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::warn;

use crate::risk::{classify, Classification, RiskThresholds};
use crate::separation::separation_km;
use crate::{Body, InputDataError, Position};

/// A pair of catalog entries that falls inside the collision threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairCandidate {
    /// Catalog index of the earlier body.
    pub primary: usize,
    /// Catalog index of the later body.
    pub secondary: usize,
    pub distance_km: f64,
    pub classification: Classification,
}

/// A catalog entry left out of the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedBody {
    pub index: usize,
    pub error: InputDataError,
}

/// Outcome of the pairwise evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairScan {
    pub candidates: Vec<PairCandidate>,
    /// Number of pairs whose distance was evaluated: `n * (n - 1) / 2` for
    /// `n` valid bodies.
    pub pairs_examined: usize,
    pub rejected: Vec<RejectedBody>,
}

pub(crate) fn scan_pairs(
    catalog: &[Body],
    thresholds: &RiskThresholds,
    parallel: bool,
) -> PairScan {
    let mut rejected = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(catalog.len());
    let mut positions: Vec<(usize, Position)> = Vec::with_capacity(catalog.len());
    for (index, body) in catalog.iter().enumerate() {
        let checked = body.validate().and_then(|()| {
            if seen.insert(body.catalog_id.as_str()) {
                Ok(())
            } else {
                Err(InputDataError::DuplicateIdentity {
                    catalog_id: body.catalog_id.clone(),
                })
            }
        });
        match checked {
            Ok(()) => positions.push((index, body.position.to_cartesian())),
            Err(error) => {
                warn!("Skipping body #{} ({}): {}", index, body.name, error);
                rejected.push(RejectedBody { index, error });
            }
        }
    }

    let rows: Vec<(Vec<PairCandidate>, usize)> = if parallel {
        (0..positions.len())
            .into_par_iter()
            .map(|a| scan_row(&positions, a, thresholds))
            .collect()
    } else {
        (0..positions.len())
            .map(|a| scan_row(&positions, a, thresholds))
            .collect()
    };

    let mut scan = PairScan {
        rejected,
        ..Default::default()
    };
    for (candidates, examined) in rows {
        scan.candidates.extend(candidates);
        scan.pairs_examined += examined;
    }
    scan
}

/// Evaluate body `a` against every later body.
fn scan_row(
    positions: &[(usize, Position)],
    a: usize,
    thresholds: &RiskThresholds,
) -> (Vec<PairCandidate>, usize) {
    let (primary, pos_a) = &positions[a];
    let mut out = Vec::new();
    let mut examined = 0;
    for (secondary, pos_b) in &positions[a + 1..] {
        examined += 1;
        let distance_km = separation_km(pos_a, pos_b);
        if let Some(classification) = classify(distance_km, thresholds) {
            out.push(PairCandidate {
                primary: *primary,
                secondary: *secondary,
                distance_km,
                classification,
            });
        }
    }
    (out, examined)
}
