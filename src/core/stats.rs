//! Statistics primitives shared by the analysis code

/// Standard normal cumulative distribution function (CDF)
/// Φ(z) = probability that a standard normal random variable is ≤ z
/// Uses Hastings approximation (error < 7.5e-8)
pub fn normal_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return 0.5;
    }
    if z == 0.0 {
        // Symmetry point; the polynomial is ~1e-8 off here
        return 0.5;
    }
    if z >= 8.0 {
        return 1.0;
    }
    if z <= -8.0 {
        return 0.0;
    }

    // Handle negative z by symmetry: Φ(-z) = 1 - Φ(z)
    let (z_abs, negate) = if z < 0.0 { (-z, true) } else { (z, false) };

    // Hastings approximation constants (A&S 26.2.17)
    const B0: f64 = 0.2316419;
    const B1: f64 = 0.319381530;
    const B2: f64 = -0.356563782;
    const B3: f64 = 1.781477937;
    const B4: f64 = -1.821255978;
    const B5: f64 = 1.330274429;

    let t = 1.0 / (1.0 + B0 * z_abs);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let pdf = (-0.5 * z_abs * z_abs).exp() / (2.0 * std::f64::consts::PI).sqrt();
    let cdf = 1.0 - pdf * (B1 * t + B2 * t2 + B3 * t3 + B4 * t4 + B5 * t5);

    if negate {
        1.0 - cdf
    } else {
        cdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_cdf_center() {
        assert_eq!(normal_cdf(0.0), 0.5);
    }

    #[test]
    fn test_normal_cdf_table_values() {
        assert!((normal_cdf(1.0) - 0.841345).abs() < 1e-6);
        assert!((normal_cdf(1.645) - 0.950015).abs() < 1e-6);
        assert!((normal_cdf(2.0) - 0.977250).abs() < 1e-6);
        assert!((normal_cdf(3.0) - 0.998650).abs() < 1e-6);
    }

    #[test]
    fn test_normal_cdf_symmetry() {
        for z in [0.25, 0.5, 1.0, 1.96, 3.0] {
            let sum = normal_cdf(z) + normal_cdf(-z);
            assert!((sum - 1.0).abs() < 1e-7, "Φ({z}) + Φ(-{z}) = {sum}");
        }
    }

    #[test]
    fn test_normal_cdf_extremes() {
        assert_eq!(normal_cdf(10.0), 1.0);
        assert_eq!(normal_cdf(-10.0), 0.0);
        assert_eq!(normal_cdf(f64::INFINITY), 1.0);
        assert_eq!(normal_cdf(f64::NEG_INFINITY), 0.0);
        assert_eq!(normal_cdf(f64::NAN), 0.5);
    }

    #[test]
    fn test_normal_cdf_monotonic() {
        let mut last = normal_cdf(-8.0);
        let mut z = -7.75;
        while z <= 8.0 {
            let cur = normal_cdf(z);
            assert!(cur >= last, "CDF not monotonic at z = {z}");
            last = cur;
            z += 0.25;
        }
    }
}
