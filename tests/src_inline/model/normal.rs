use super::*;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn test_z_score() {
    assert_eq!(z_score(65.0, 50.0, 10.0), Some(1.5));
    assert_eq!(z_score(40.0, 50.0, 10.0), Some(-1.0));
    assert_eq!(z_score(50.0, 50.0, 0.0), None);
    assert_eq!(z_score(f64::NAN, 50.0, 10.0), None);
    assert_eq!(z_score(1.0, 0.0, f64::INFINITY), None);
}

#[test]
fn test_normal_cdf_reference_values() {
    assert!(close(normal_cdf(0.0), 0.5, 1e-15));
    assert!(close(normal_cdf(1.0), 0.841_344_746_068_542_9, 1e-14));
    assert!(close(normal_cdf(1.5), 0.933_192_798_731_141_9, 1e-14));
    assert!(close(normal_cdf(-1.959_963_984_540_054), 0.025, 1e-14));
    assert!(close(normal_cdf(-3.0), 0.001_349_898_031_630_094_5, 1e-15));
    assert!(close(normal_cdf(8.0), 1.0, 1e-14));
}

#[test]
fn test_normal_cdf_symmetry_and_order() {
    for i in 0..80 {
        let z = i as f64 * 0.1;
        assert!(close(normal_cdf(z) + normal_cdf(-z), 1.0, 1e-14));
        assert!(normal_cdf(z + 0.1) >= normal_cdf(z));
    }
    assert_eq!(normal_cdf(-40.0), 0.0);
    assert_eq!(normal_cdf(40.0), 1.0);
    assert!(normal_cdf(f64::NAN).is_nan());
}

#[test]
fn test_percentile() {
    assert!(close(percentile(1.5), 93.319_279_873_114_19, 1e-10));
    assert!(close(percentile(0.0), 50.0, 1e-12));
    assert!(percentile(-12.0) > 0.0);
    assert!(percentile(12.0) <= 100.0);
}

#[test]
fn test_percentile_strictly_increases_with_score() {
    let mut previous = f64::NEG_INFINITY;
    for score in 20..=110 {
        let z = z_score(score as f64, 65.0, 10.0).unwrap();
        let p = percentile(z);
        assert!(p > previous, "score {score}: {p} <= {previous}");
        previous = p;
    }
}
