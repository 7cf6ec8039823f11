//! Weighted blends of strategies

use super::Strategy;
use std::fmt::Write as _;

/// Ordered, normalised list of `(strategy, weight)` pairs
#[derive(Debug, Clone, PartialEq)]
pub struct BlendSpec {
    entries: Vec<(Strategy, f64)>,
}

impl BlendSpec {
    /// Normalise `entries` so the weights sum to 1
    ///
    /// Negative and non-finite weights count as 0. If every weight is 0 the
    /// strategies share equally. Returns `None` for an empty list.
    ///
    /// # Examples
    /// ```
    /// use wordle_advisor::solver::{BlendSpec, Strategy};
    ///
    /// let blend = BlendSpec::new(vec![(Strategy::Entropy, 3.0), (Strategy::Presence, -1.0)]).unwrap();
    /// assert_eq!(blend.entries(), &[(Strategy::Entropy, 1.0), (Strategy::Presence, 0.0)]);
    /// ```
    #[must_use]
    pub fn new(entries: Vec<(Strategy, f64)>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let clamped: Vec<(Strategy, f64)> = entries
            .into_iter()
            .map(|(s, w)| (s, if w.is_finite() && w > 0.0 { w } else { 0.0 }))
            .collect();
        let total: f64 = clamped.iter().map(|(_, w)| w).sum();

        let entries = if total > 0.0 {
            clamped.into_iter().map(|(s, w)| (s, w / total)).collect()
        } else {
            let equal = 1.0 / clamped.len() as f64;
            clamped.into_iter().map(|(s, _)| (s, equal)).collect()
        };
        Some(Self { entries })
    }

    /// Two-strategy slider: `weight` 0 is all `a`, 1 is all `b`
    #[must_use]
    pub fn slider(a: Strategy, b: Strategy, weight: f64) -> Self {
        let w = if weight.is_finite() {
            weight.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            entries: vec![(a, 1.0 - w), (b, w)],
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[(Strategy, f64)] {
        &self.entries
    }

    /// Each strategy once, in first-seen order
    #[must_use]
    pub fn distinct(&self) -> Vec<Strategy> {
        let mut seen = Vec::with_capacity(self.entries.len());
        for &(strategy, _) in &self.entries {
            if !seen.contains(&strategy) {
                seen.push(strategy);
            }
        }
        seen
    }

    /// Combined weight of `strategy` across all entries
    #[must_use]
    pub fn weight_of(&self, strategy: Strategy) -> f64 {
        self.entries
            .iter()
            .filter(|(s, _)| *s == strategy)
            .map(|(_, w)| w)
            .sum()
    }

    /// True if any constituent needs full partitions
    #[must_use]
    pub fn is_heavy(&self) -> bool {
        self.entries.iter().any(|(s, _)| s.is_heavy())
    }

    /// Stable identifier used as a cache key
    #[must_use]
    pub fn key(&self) -> String {
        let mut key = String::from("blend:");
        for (i, (strategy, weight)) in self.entries.iter().enumerate() {
            if i > 0 {
                key.push(',');
            }
            let _ = write!(key, "{strategy}={weight:.6}");
        }
        key
    }
}
