//! Rolling-window and smoothing primitives shared by the indicator modules.
//!
//! Every helper returns one entry per input value. A window of size `n`
//! yields its first defined value at index `n - 1`; earlier entries are
//! `None`.

/// Simple moving average over a trailing window.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |slice| {
        Some(slice.iter().sum::<f64>() / slice.len() as f64)
    })
}

/// Sample standard deviation (n - 1 denominator) over a trailing window.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |slice| {
        if slice.len() < 2 {
            return None;
        }
        let mean = slice.iter().sum::<f64>() / slice.len() as f64;
        let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (slice.len() - 1) as f64;
        Some(variance.sqrt())
    })
}

pub fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |slice| {
        slice.iter().copied().reduce(f64::min)
    })
}

pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |slice| {
        slice.iter().copied().reduce(f64::max)
    })
}

/// Moving average over a series that may itself contain undefined values.
/// Any undefined value inside the window makes the result undefined.
pub fn rolling_mean_opt(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let mut sum = 0.0;
            for value in slice {
                sum += (*value)?;
            }
            Some(sum / window as f64)
        })
        .collect()
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded with the
/// first value (non-adjusted form). Defined from the first element.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &value in values {
        let next = match prev {
            Some(p) => alpha * value + (1.0 - alpha) * p,
            None => value,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                f(&values[i + 1 - window..=i])
            }
        })
        .collect()
}
