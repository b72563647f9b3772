use std::collections::HashMap;

use serde::Serialize;

/// Padding and rounding for a [`BandScale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandConfig {
    /// Fraction of each step left empty between bands, in `[0, 1]`.
    pub padding_inner: f64,
    /// Padding before the first and after the last band, in steps.
    pub padding_outer: f64,
    /// Where leftover space goes: 0 at the start, 1 at the end.
    pub align: f64,
    /// Snap step, start and band width to whole pixels.
    pub round: bool,
}

impl BandConfig {
    /// Same padding inside and outside, centred.
    pub fn uniform(padding: f64, round: bool) -> Self {
        Self {
            padding_inner: padding,
            padding_outer: padding,
            align: 0.5,
            round,
        }
    }
}

impl Default for BandConfig {
    fn default() -> Self {
        Self::uniform(0.0, false)
    }
}

/// Evenly spaced bands for a categorical axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    step: f64,
    bandwidth: f64,
    positions: Vec<f64>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl BandScale {
    /// Lay `domain` out over `range`. Duplicate keys keep their first band.
    pub fn new(domain: Vec<String>, range: (f64, f64), config: BandConfig) -> Self {
        let mut index = HashMap::new();
        let mut unique = Vec::with_capacity(domain.len());
        for key in domain {
            if !index.contains_key(&key) {
                index.insert(key.clone(), unique.len());
                unique.push(key);
            }
        }

        let n = unique.len() as f64;
        let padding_inner = config.padding_inner.clamp(0.0, 1.0);
        let padding_outer = config.padding_outer.max(0.0);
        let align = config.align.clamp(0.0, 1.0);

        let reverse = range.1 < range.0;
        let (mut start, stop) = if reverse { (range.1, range.0) } else { range };

        let (step, bandwidth, mut positions) = if unique.is_empty() {
            (0.0, 0.0, Vec::new())
        } else {
            let mut step = (stop - start) / (n - padding_inner + padding_outer * 2.0).max(1.0);
            if config.round {
                step = step.floor();
            }
            start += (stop - start - step * (n - padding_inner)) * align;
            let mut bandwidth = step * (1.0 - padding_inner);
            if config.round {
                start = start.round();
                bandwidth = bandwidth.round();
            }
            let positions = (0..unique.len()).map(|i| start + step * i as f64).collect();
            (step, bandwidth, positions)
        };

        if reverse {
            positions.reverse();
        }

        Self {
            domain: unique,
            range,
            step,
            bandwidth,
            positions,
            index,
        }
    }

    /// Left edge of the band for `key`, if it is in the domain.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&i| self.positions[i])
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}
