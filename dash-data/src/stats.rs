//! Small numeric summaries behind the histogram and box plot.

/// Linear-interpolated quantile of an ascending slice (`q` in `[0, 1]`).
///
/// Uses the same rule as NumPy's default: position `q * (n - 1)`.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value not below `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest value not above `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Values outside the whiskers, ascending.
    pub outliers: Vec<f64>,
    pub count: usize,
}

/// Summarize `values` (any order; NaNs are dropped).
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;

    let inside = sorted.iter().copied().filter(|v| *v >= lo_fence && *v <= hi_fence);
    let lower_whisker = inside.clone().next().unwrap_or(q1);
    let upper_whisker = inside.last().unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lo_fence || *v > hi_fence)
        .collect();

    Some(BoxSummary {
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        lower_whisker,
        upper_whisker,
        outliers,
        count: sorted.len(),
    })
}

/// One histogram bin covering `[x0, x1)`; the last bin also includes `x1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub x0: f64,
    pub x1: f64,
    pub count: usize,
}

/// Most bins a single histogram may have.
pub const MAX_BINS: usize = 10_000;

/// Count `values` into fixed-width bins starting at `domain.0`.
///
/// Values outside `domain` are ignored. A value equal to the upper edge of
/// the domain lands in the last bin. Returns no bins when the width would
/// need more than [`MAX_BINS`].
pub fn histogram(values: &[f64], bin_width: f64, domain: (f64, f64)) -> Vec<Bin> {
    let (lo, hi) = domain;
    if !(bin_width > 0.0) || !(hi >= lo) || !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let needed = ((hi - lo) / bin_width).ceil();
    if !needed.is_finite() || needed > MAX_BINS as f64 {
        return Vec::new();
    }
    let n = (needed as usize).max(1);
    let mut bins: Vec<Bin> = (0..n)
        .map(|i| Bin {
            x0: lo + i as f64 * bin_width,
            x1: (lo + (i + 1) as f64 * bin_width).min(hi.max(lo + bin_width)),
            count: 0,
        })
        .collect();

    for v in values.iter().copied().filter(|v| *v >= lo && *v <= hi) {
        let idx = (((v - lo) / bin_width).floor() as usize).min(n - 1);
        bins[idx].count += 1;
    }
    bins
}
