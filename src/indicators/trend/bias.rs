//! BIAS: percentage deviation of the close from its moving average

/// BIAS = (Close - MA) / MA * 100
///
/// Undefined where the average is undefined or zero.
pub fn calculate_bias(closes: &[f64], ma: &[Option<f64>]) -> Vec<Option<f64>> {
    closes
        .iter()
        .zip(ma.iter())
        .map(|(&close, &avg)| match avg {
            Some(avg) if avg != 0.0 => Some((close - avg) / avg * 100.0),
            _ => None,
        })
        .collect()
}
