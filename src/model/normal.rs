/// Standardized deviation of `score` from `mean`, in `sd` units.
///
/// Undefined when the deviation is zero or any input is not finite.
pub fn z_score(score: f64, mean: f64, sd: f64) -> Option<f64> {
    if sd == 0.0 || !score.is_finite() || !mean.is_finite() || !sd.is_finite() {
        return None;
    }
    let z = (score - mean) / sd;
    z.is_finite().then_some(z)
}

/// Standard normal cumulative distribution function.
///
/// Hart's rational approximation (double precision) as published by West,
/// "Better approximations to cumulative normal functions" (2005).
pub fn normal_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    let x = z.abs();
    let tail = if x > 37.0 {
        0.0
    } else {
        let e = (-x * x / 2.0).exp();
        if x < 7.071_067_811_865_47 {
            let mut num = 3.526_249_659_989_11e-2 * x + 0.700_383_064_443_688;
            num = num * x + 6.373_962_203_531_65;
            num = num * x + 33.912_866_078_383;
            num = num * x + 112.079_291_497_871;
            num = num * x + 221.213_596_169_931;
            num = num * x + 220.206_867_912_376;
            let mut den = 8.838_834_764_831_84e-2 * x + 1.755_667_163_182_64;
            den = den * x + 16.064_177_579_207;
            den = den * x + 86.780_732_202_946_1;
            den = den * x + 296.564_248_779_674;
            den = den * x + 637.333_633_378_831;
            den = den * x + 793.826_512_519_948;
            den = den * x + 440.413_735_824_752;
            e * num / den
        } else {
            let mut b = x + 0.65;
            b = x + 4.0 / b;
            b = x + 3.0 / b;
            b = x + 2.0 / b;
            b = x + 1.0 / b;
            e / b / 2.506_628_274_631
        }
    };
    if z > 0.0 { 1.0 - tail } else { tail }
}

/// Percentile rank of a z-score under the normal model, not clamped.
pub fn percentile(z: f64) -> f64 {
    normal_cdf(z) * 100.0
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/normal.rs"]
mod tests;
