//! Occlusion ledger and the retry-on-invalid-placement policy.
//!
//! The ledger is an immutable accumulator: every proposal returns a fresh ledger, so a
//! rejected attempt leaves the previous state untouched.

use crate::{
    foundation::error::{CardsceneError, CardsceneResult},
    geometry::polygon::Polygon,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Reaction to a placement that would hide every remaining symbol of an earlier card.
pub enum FullOcclusionPolicy {
    /// Reject the attempt and retry with a fresh rotation and centre.
    #[default]
    Retry,
    /// Accept anyway and remove the hidden card from the ledger.
    Accept,
}

/// Inputs for [`place_with_retry`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub visibility_threshold: f64,
    pub full_occlusion: FullOcclusionPolicy,
}

/// A symbol stays labelled only if strictly more than `threshold` of it is uncovered.
pub fn is_visible(uncovered_fraction: f64, threshold: f64) -> bool {
    uncovered_fraction > threshold
}

/// Retained symbols for one placed card.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerEntry {
    pub label: String,
    pub symbols: Vec<Polygon>,
}

impl LedgerEntry {
    pub fn area(&self) -> f64 {
        self.symbols.iter().map(Polygon::area).sum()
    }
}

/// Currently visible symbol outlines, one entry per placed card in placement order.
///
/// Entries never hold an empty symbol list: a card whose last symbol is dropped is removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityLedger {
    entries: Vec<LedgerEntry>,
}

/// Result of laying a new card outline over the ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct Occlusion {
    /// Ledger after dropping symbols that are no longer visible.
    pub ledger: VisibilityLedger,
    /// Labels of cards that lost every remaining symbol.
    pub fully_occluded: Vec<String>,
    pub symbols_dropped: usize,
}

/// Outcome of testing one candidate against the ledger.
#[derive(Clone, Debug, PartialEq)]
pub enum Proposal {
    Accepted {
        ledger: VisibilityLedger,
        symbols_dropped: usize,
    },
    Rejected {
        fully_occluded: Vec<String>,
    },
}

impl VisibilityLedger {
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained symbols of the first entry with `label`.
    pub fn symbols(&self, label: &str) -> Option<&[Polygon]> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.symbols.as_slice())
    }

    pub fn symbol_count(&self) -> usize {
        self.entries.iter().map(|e| e.symbols.len()).sum()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.entries.iter().flat_map(|e| e.symbols.iter())
    }

    /// Record a card drawn on top of everything placed so far.
    pub fn with_card(mut self, label: impl Into<String>, symbols: Vec<Polygon>) -> Self {
        if !symbols.is_empty() {
            self.entries.push(LedgerEntry {
                label: label.into(),
                symbols,
            });
        }
        self
    }

    /// Apply the same map to every polygon, e.g. a scene-level transform or shift.
    pub fn map_polygons(self, f: impl Fn(&Polygon) -> Polygon) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|e| LedgerEntry {
                    label: e.label,
                    symbols: e.symbols.iter().map(&f).collect(),
                })
                .collect(),
        }
    }

    /// Drop every symbol whose uncovered fraction under `cover` is not above `threshold`.
    pub fn occlude(&self, cover: &Polygon, threshold: f64) -> Occlusion {
        let mut entries = Vec::with_capacity(self.entries.len());
        let mut fully_occluded = Vec::new();
        let mut symbols_dropped = 0usize;

        for entry in &self.entries {
            let kept: Vec<Polygon> = entry
                .symbols
                .iter()
                .filter(|p| is_visible(p.uncovered_fraction(cover), threshold))
                .cloned()
                .collect();
            symbols_dropped += entry.symbols.len() - kept.len();
            if kept.is_empty() {
                fully_occluded.push(entry.label.clone());
            } else {
                entries.push(LedgerEntry {
                    label: entry.label.clone(),
                    symbols: kept,
                });
            }
        }

        Occlusion {
            ledger: Self { entries },
            fully_occluded,
            symbols_dropped,
        }
    }

    /// Test a candidate card (outline plus its own symbols) against the ledger.
    pub fn propose(
        &self,
        label: &str,
        outline: &Polygon,
        symbols: Vec<Polygon>,
        threshold: f64,
        policy: FullOcclusionPolicy,
    ) -> Proposal {
        let occlusion = self.occlude(outline, threshold);
        if !occlusion.fully_occluded.is_empty() && policy == FullOcclusionPolicy::Retry {
            return Proposal::Rejected {
                fully_occluded: occlusion.fully_occluded,
            };
        }
        Proposal::Accepted {
            ledger: occlusion.ledger.with_card(label, symbols),
            symbols_dropped: occlusion.symbols_dropped,
        }
    }
}

/// One proposed placement of a card, with an opaque payload (usually the rotated raster).
#[derive(Clone, Debug)]
pub struct Candidate<T> {
    pub label: String,
    pub outline: Polygon,
    pub symbols: Vec<Polygon>,
    pub payload: T,
}

#[derive(Clone, Debug)]
pub enum PlacementOutcome<T> {
    Placed {
        ledger: VisibilityLedger,
        payload: T,
        attempts: u32,
        symbols_dropped: usize,
    },
    /// Budget exhausted; the card is left out of the scene.
    Dropped {
        attempts: u32,
        fully_occluded: Vec<String>,
    },
}

/// Ask `attempt` for up to `policy.max_attempts` candidates and keep the first that does not
/// fully hide an earlier card.
pub fn place_with_retry<T, F>(
    ledger: &VisibilityLedger,
    policy: &RetryPolicy,
    mut attempt: F,
) -> CardsceneResult<PlacementOutcome<T>>
where
    F: FnMut(u32) -> CardsceneResult<Candidate<T>>,
{
    if policy.max_attempts == 0 {
        return Err(CardsceneError::validation("max_attempts must be >= 1"));
    }

    let mut last_occluded = Vec::new();
    for n in 1..=policy.max_attempts {
        let candidate = attempt(n)?;
        match ledger.propose(
            &candidate.label,
            &candidate.outline,
            candidate.symbols,
            policy.visibility_threshold,
            policy.full_occlusion,
        ) {
            Proposal::Accepted {
                ledger,
                symbols_dropped,
            } => {
                return Ok(PlacementOutcome::Placed {
                    ledger,
                    payload: candidate.payload,
                    attempts: n,
                    symbols_dropped,
                });
            }
            Proposal::Rejected { fully_occluded } => {
                tracing::debug!(
                    card = %candidate.label,
                    attempt = n,
                    hidden = ?fully_occluded,
                    "placement would hide an earlier card"
                );
                last_occluded = fully_occluded;
            }
        }
    }

    Ok(PlacementOutcome::Dropped {
        attempts: policy.max_attempts,
        fully_occluded: last_occluded,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/visibility.rs"]
mod tests;
