//! Helper functions for integration tests

use adr_rs::physics::{ConcentrationField, Grid, initial_gaussian_pulse};

/// Assert that two fields are close, point by point (absolute tolerance)
pub fn assert_fields_close(
    field1: &ConcentrationField,
    field2: &ConcentrationField,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(field1.len(), field2.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in field1.as_slice().iter().zip(field2.as_slice()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Channel of `length` metres on `points` points holding a unit-amplitude Gaussian pulse
pub fn pulse_channel(length: f64, points: usize, center: f64, sigma: f64) -> (Grid, ConcentrationField) {
    let grid = Grid::new(length, points).unwrap();
    let field = initial_gaussian_pulse(&grid, 1.0, center, sigma).unwrap();
    (grid, field)
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_pulse_channel() {
        let (grid, field) = pulse_channel(100.0, 200, 20.0, 5.0);
        assert_eq!(field.len(), grid.points());
        assert_eq!(field.peak_position(&grid), 20.0);
    }
}
