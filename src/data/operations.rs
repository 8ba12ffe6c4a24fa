//! Score combination rules, [`ScoreCalculationMethod`], and their
//! order-independent accumulator.
//!
//! Averages accumulate `(weighted sum, total weight)` and divide once at the
//! end, rather than re-averaging incrementally, so the result does not depend
//! on the order contributions arrive in.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The reduction rule used to combine overlapping or bin-spanning scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ScoreCalculationMethod {
    Sum,
    Average,
    Maximum,
    Minimum,
    /// Number of intervals contributing.
    Count,
}

impl ScoreCalculationMethod {
    /// A new, empty accumulator for this method.
    pub fn accumulator(&self) -> ScoreAccumulator {
        ScoreAccumulator::new(*self)
    }

    /// Combine a set of unweighted scores. Returns `None` for no scores.
    pub fn run(&self, scores: &[f64]) -> Option<f64> {
        let mut accumulator = self.accumulator();
        scores.iter().for_each(|&score| accumulator.add(score, 1.0));
        accumulator.result()
    }
}

/// Accumulates contributions to a single bin or segment.
#[derive(Clone, Debug)]
pub struct ScoreAccumulator {
    method: ScoreCalculationMethod,
    count: usize,
    first: f64,
    value: f64,
    weight: f64,
}

impl ScoreAccumulator {
    pub fn new(method: ScoreCalculationMethod) -> Self {
        Self {
            method,
            count: 0,
            first: 0.0,
            value: 0.0,
            weight: 0.0,
        }
    }

    /// Add a score; `weight` only matters to [`ScoreCalculationMethod::Average`].
    #[inline]
    pub fn add(&mut self, score: f64, weight: f64) {
        if self.count == 0 {
            self.first = score;
        }
        self.count += 1;
        match self.method {
            ScoreCalculationMethod::Sum => self.value += score,
            ScoreCalculationMethod::Average => {
                self.value += score * weight;
                self.weight += weight;
            }
            ScoreCalculationMethod::Maximum => {
                self.value = if self.count == 1 {
                    score
                } else {
                    self.value.max(score)
                }
            }
            ScoreCalculationMethod::Minimum => {
                self.value = if self.count == 1 {
                    score
                } else {
                    self.value.min(score)
                }
            }
            ScoreCalculationMethod::Count => self.value += 1.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The combined value, or `None` if nothing was added.
    pub fn result(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        match self.method {
            ScoreCalculationMethod::Average => {
                if self.count == 1 {
                    // a single contributor is its own average
                    Some(self.first)
                } else if self.weight > 0.0 {
                    Some(self.value / self.weight)
                } else {
                    None
                }
            }
            _ => Some(self.value),
        }
    }
}
