//! Evenly spaced sequences.

/// `count` evenly spaced points from `start` to `end` (both inclusive).
///
/// Each point is computed directly as a weighted mean of the endpoints rather
/// than by repeated addition, so the last value is exactly `end`.
/// A count of 1 yields `[start]` and a count of 0 yields an empty vector.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| {
                    let i = i as f64;
                    (i * end + (last - i) * start) / last
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(-2.0, 3.0, 6);
        assert_eq!(v, vec![-2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(4.0, 9.0, 1), vec![4.0]);
    }
}
