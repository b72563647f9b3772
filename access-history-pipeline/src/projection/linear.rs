use serde::Serialize;

/// A continuous linear mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    round: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            round: false,
        }
    }

    /// Scale for magnitudes: `[0, max(values)]` onto `[plot_height, 0]`, so
    /// zero sits at the bottom of the plot.
    pub fn magnitudes<I>(values: I, plot_height: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let max = values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(0.0_f64, f64::max);
        Self::new((0.0, max), (plot_height, 0.0))
    }

    /// Round outputs to whole pixels.
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if self.is_degenerate() {
            0.5
        } else {
            (value - d0) / (d1 - d0)
        };
        let out = r0 + t * (r1 - r0);
        if self.round {
            out.round()
        } else {
            out
        }
    }

    pub fn invert(&self, position: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return (d0 + d1) / 2.0;
        }
        d0 + (position - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` round-numbered tick values spanning the domain
    /// (multiples of 1, 2 or 5 times a power of ten).
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }
        tick_values(lo, hi, count as f64)
    }
}

fn tick_values(start: f64, stop: f64, count: f64) -> Vec<f64> {
    let Some((i1, i2, increment)) = tick_spec(start, stop, count) else {
        return Vec::new();
    };
    (i1..=i2)
        .map(|i| {
            if increment < 0.0 {
                i as f64 / -increment
            } else {
                i as f64 * increment
            }
        })
        .collect()
}

/// Upper bound on the number of ticks one call may produce.
const MAX_TICKS: i64 = 1_000;

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let (lo, hi) = finite_pair(start * inc, stop * inc)?;
        i1 = lo;
        i2 = hi;
        if (i1 as f64) / inc < start {
            i1 += 1;
        }
        if (i2 as f64) / inc > stop {
            i2 -= 1;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        let (lo, hi) = finite_pair(start / inc, stop / inc)?;
        i1 = lo;
        i2 = hi;
        if (i1 as f64) * inc < start {
            i1 += 1;
        }
        if (i2 as f64) * inc > stop {
            i2 -= 1;
        }
        increment = inc;
    }

    if i2 < i1 {
        if (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        return None;
    }
    if i2 - i1 >= MAX_TICKS {
        return None;
    }
    Some((i1, i2, increment))
}

/// Rounds both tick indices, or `None` when either falls outside what an
/// `i64` holds exactly. Domains near the bottom of the float range overflow
/// the power-of-ten multiplier.
fn finite_pair(a: f64, b: f64) -> Option<(i64, i64)> {
    const LIMIT: f64 = (1_i64 << 53) as f64;
    let (a, b) = (a.round(), b.round());
    (a.is_finite() && b.is_finite() && a.abs() <= LIMIT && b.abs() <= LIMIT)
        .then(|| (a as i64, b as i64))
}
