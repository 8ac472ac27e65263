pub const EGAMMA: f64 = 0.577215664901532860606512090082402431_f64;

#[inline]
pub fn harmonic_number(n: usize) -> f64 {
    (n as f64).ln() + EGAMMA
}

/// Expected path length of an unsuccessful search among `n` items,
/// `c(n) = 2 H(n - 1) - 2 (n - 1) / n`. Zero for `n <= 1`.
pub fn average_path_length(n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        2.0 * harmonic_number(n - 1) - (2.0 * (n as f64 - 1.0) / n as f64)
    }
}

pub fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / v.len() as f64
}
