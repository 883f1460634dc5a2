//! Hazard rate primitives used by the `p_model` probability models.
//!
//! A hazard rate is a conditional failure probability per unit of time:
//! `h(t) = f(t) / R(t)`, where `f` is a probability density function and
//! `R(t) = 1 - F(t)` is the reliability function (probability the
//! component has not yet failed by time `t`). Each function below computes
//! an instantaneous probability and compares it to a fresh draw from a
//! `RandomSource` — pure with respect to its parameters and the random
//! source, as required by the determinism law in the design's testable
//! properties.
//!
//! References: Trivedi, "Probability and Statistics with Reliability,
//! Queuing and Computer Science Applications"; Grosh, "A Primer of
//! Reliability Theory".

use crate::rng::RandomSource;

/// Always fires. Used by the `deterministic` probability model.
pub fn deterministic_hazard() -> bool {
    true
}

/// Exponentially distributed hazard rate (constant failure rate). A
/// special case of the Weibull hazard at `shape = 1`.
///
/// `mttf`: mean time to failure in seconds.
pub fn exponential_hazard(mttf: f64, rng: &mut dyn RandomSource) -> bool {
    let lambda = 1.0 / mttf;
    rng.next_f64() <= lambda
}

/// Weibull-distributed hazard rate. `shape < 1` is a decreasing failure
/// rate (break-in phase); `shape == 1` reduces to the exponential hazard;
/// `shape > 1` is an increasing failure rate (wear-out phase).
///
/// `t`: elapsed seconds since the event's last firing.
pub fn weibull_hazard(shape: f64, mttf: f64, t: f64, rng: &mut dyn RandomSource) -> bool {
    let lambda = 1.0 / mttf;
    let p = shape * lambda.powf(shape) * t.powf(shape - 1.0);
    rng.next_f64() <= p
}

/// Normal (Gaussian) distributed hazard rate — an increasing failure rate
/// whose predictability is controlled by `sigma`.
///
/// Returns `false` (never fires) when `t` is far enough below `mu` that the
/// Z-table has no tabulated lower bound for it.
pub fn normal_hazard(mu: f64, sigma: f64, t: f64, rng: &mut dyn RandomSource) -> bool {
    let density = normal_density(mu, sigma, t);
    let z = (t - mu) / sigma;
    let area = match z_table_lookup(z) {
        Some(area) => area,
        None => return false,
    };
    let h = density / (1.0 - area);
    rng.next_f64() <= h
}

fn normal_density(mu: f64, sigma: f64, t: f64) -> f64 {
    let f1 = 1.0 / (sigma * (2.0 * std::f64::consts::PI).sqrt());
    let f2 = (-0.5 * ((t - mu) / sigma).powi(2)).exp();
    f1 * f2
}

/// One row of the Standard Normal (Z) table: `area` is the cumulative
/// probability up to z-score `z`.
struct ZCell {
    area: f64,
    z: f64,
}

/// Binary search for the greatest table row whose `z <= z_in` — a
/// bracketed lower bound. Returns `None` if `z_in` falls below the
/// smallest tabulated `z`.
///
/// The table must be sorted by ascending `z` for this search to be valid;
/// `Z_TABLE` below ships fully sorted (the original Python table had its
/// first three rows out of order, which this implementation corrects).
fn z_table_lookup(z_in: f64) -> Option<f64> {
    if z_in < Z_TABLE[0].z {
        return None;
    }
    let mut lo = 0usize;
    let mut hi = Z_TABLE.len() - 1;
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if Z_TABLE[mid].z <= z_in {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Some(Z_TABLE[lo].area)
}

/// A Standard Normal (Z) table: cumulative area vs. z-score, 107 rows
/// spanning area 0.0001 to 0.9999 (z from -3.719 to +3.719). Implementations
/// must ship this exact table to preserve numerical behavior.
#[rustfmt::skip]
const Z_TABLE: [ZCell; 107] = [
    ZCell { area: 0.0001, z: -3.719 },
    ZCell { area: 0.001, z: -3.09 },
    ZCell { area: 0.005, z: -2.576 },
    ZCell { area: 0.01, z: -2.326 },
    ZCell { area: 0.02, z: -2.054 },
    ZCell { area: 0.025, z: -1.96 },
    ZCell { area: 0.03, z: -1.881 },
    ZCell { area: 0.04, z: -1.751 },
    ZCell { area: 0.05, z: -1.645 },
    ZCell { area: 0.06, z: -1.555 },
    ZCell { area: 0.07, z: -1.476 },
    ZCell { area: 0.08, z: -1.405 },
    ZCell { area: 0.09, z: -1.341 },
    ZCell { area: 0.1, z: -1.282 },
    ZCell { area: 0.11, z: -1.227 },
    ZCell { area: 0.12, z: -1.175 },
    ZCell { area: 0.13, z: -1.126 },
    ZCell { area: 0.14, z: -1.08 },
    ZCell { area: 0.15, z: -1.036 },
    ZCell { area: 0.16, z: -0.994 },
    ZCell { area: 0.17, z: -0.954 },
    ZCell { area: 0.18, z: -0.915 },
    ZCell { area: 0.19, z: -0.878 },
    ZCell { area: 0.2, z: -0.842 },
    ZCell { area: 0.21, z: -0.806 },
    ZCell { area: 0.22, z: -0.772 },
    ZCell { area: 0.23, z: -0.739 },
    ZCell { area: 0.24, z: -0.706 },
    ZCell { area: 0.25, z: -0.674 },
    ZCell { area: 0.26, z: -0.643 },
    ZCell { area: 0.27, z: -0.613 },
    ZCell { area: 0.28, z: -0.583 },
    ZCell { area: 0.29, z: -0.553 },
    ZCell { area: 0.3, z: -0.524 },
    ZCell { area: 0.31, z: -0.496 },
    ZCell { area: 0.32, z: -0.468 },
    ZCell { area: 0.33, z: -0.44 },
    ZCell { area: 0.34, z: -0.412 },
    ZCell { area: 0.35, z: -0.385 },
    ZCell { area: 0.36, z: -0.358 },
    ZCell { area: 0.37, z: -0.332 },
    ZCell { area: 0.38, z: -0.305 },
    ZCell { area: 0.39, z: -0.279 },
    ZCell { area: 0.4, z: -0.253 },
    ZCell { area: 0.41, z: -0.228 },
    ZCell { area: 0.42, z: -0.202 },
    ZCell { area: 0.43, z: -0.176 },
    ZCell { area: 0.44, z: -0.151 },
    ZCell { area: 0.45, z: -0.126 },
    ZCell { area: 0.46, z: -0.1 },
    ZCell { area: 0.47, z: -0.075 },
    ZCell { area: 0.48, z: -0.05 },
    ZCell { area: 0.49, z: -0.025 },
    ZCell { area: 0.5, z: 0.0 },
    ZCell { area: 0.51, z: 0.025 },
    ZCell { area: 0.52, z: 0.05 },
    ZCell { area: 0.53, z: 0.075 },
    ZCell { area: 0.54, z: 0.1 },
    ZCell { area: 0.55, z: 0.126 },
    ZCell { area: 0.56, z: 0.151 },
    ZCell { area: 0.57, z: 0.176 },
    ZCell { area: 0.58, z: 0.202 },
    ZCell { area: 0.59, z: 0.228 },
    ZCell { area: 0.6, z: 0.253 },
    ZCell { area: 0.61, z: 0.279 },
    ZCell { area: 0.62, z: 0.305 },
    ZCell { area: 0.63, z: 0.332 },
    ZCell { area: 0.64, z: 0.358 },
    ZCell { area: 0.65, z: 0.385 },
    ZCell { area: 0.66, z: 0.412 },
    ZCell { area: 0.67, z: 0.44 },
    ZCell { area: 0.68, z: 0.468 },
    ZCell { area: 0.69, z: 0.496 },
    ZCell { area: 0.7, z: 0.524 },
    ZCell { area: 0.71, z: 0.553 },
    ZCell { area: 0.72, z: 0.583 },
    ZCell { area: 0.73, z: 0.613 },
    ZCell { area: 0.74, z: 0.643 },
    ZCell { area: 0.75, z: 0.674 },
    ZCell { area: 0.76, z: 0.706 },
    ZCell { area: 0.77, z: 0.739 },
    ZCell { area: 0.78, z: 0.772 },
    ZCell { area: 0.79, z: 0.806 },
    ZCell { area: 0.8, z: 0.842 },
    ZCell { area: 0.81, z: 0.878 },
    ZCell { area: 0.82, z: 0.915 },
    ZCell { area: 0.83, z: 0.954 },
    ZCell { area: 0.84, z: 0.994 },
    ZCell { area: 0.85, z: 1.036 },
    ZCell { area: 0.86, z: 1.08 },
    ZCell { area: 0.87, z: 1.126 },
    ZCell { area: 0.88, z: 1.175 },
    ZCell { area: 0.89, z: 1.227 },
    ZCell { area: 0.9, z: 1.282 },
    ZCell { area: 0.91, z: 1.341 },
    ZCell { area: 0.92, z: 1.405 },
    ZCell { area: 0.93, z: 1.476 },
    ZCell { area: 0.94, z: 1.555 },
    ZCell { area: 0.95, z: 1.645 },
    ZCell { area: 0.96, z: 1.751 },
    ZCell { area: 0.97, z: 1.881 },
    ZCell { area: 0.975, z: 1.96 },
    ZCell { area: 0.98, z: 2.054 },
    ZCell { area: 0.99, z: 2.326 },
    ZCell { area: 0.999, z: 3.09 },
    ZCell { area: 0.9995, z: 3.29 },
    ZCell { area: 0.9999, z: 3.719 },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandomSource;

    #[test]
    fn z_table_is_sorted_ascending() {
        for w in Z_TABLE.windows(2) {
            assert!(w[0].z < w[1].z, "table not strictly ascending at {:?}/{:?}", w[0].z, w[1].z);
        }
    }

    #[test]
    fn z_table_lookup_below_range_is_none() {
        assert_eq!(z_table_lookup(-10.0), None);
    }

    #[test]
    fn z_table_lookup_finds_bracketed_lower_bound() {
        // Between -2.576 and -2.326, should resolve to the -2.576 row's area.
        assert_eq!(z_table_lookup(-2.4), Some(0.005));
        assert_eq!(z_table_lookup(0.0), Some(0.5));
    }

    #[test]
    fn deterministic_always_fires() {
        assert!(deterministic_hazard());
    }

    #[test]
    fn exponential_mttf_one_always_fires() {
        // mttf = 1 => lambda = 1.0 => fire probability exactly 1.0, any draw <= 1.0 fires.
        let mut rng = SeededRandomSource::new(1);
        for _ in 0..50 {
            assert!(exponential_hazard(1.0, &mut rng));
        }
    }

    #[test]
    fn weibull_shape_one_matches_exponential_rate() {
        // shape = 1 => p = 1 * (1/mttf)^1 * t^0 = 1/mttf, independent of t.
        let mttf = 10.0;
        let mut rng_a = SeededRandomSource::new(42);
        let mut rng_b = SeededRandomSource::new(42);
        for t in [1.0, 5.0, 100.0] {
            assert_eq!(
                weibull_hazard(1.0, mttf, t, &mut rng_a),
                exponential_hazard(mttf, &mut rng_b)
            );
        }
    }

    #[test]
    fn normal_hazard_far_below_mean_never_fires() {
        let mut rng = SeededRandomSource::new(5);
        assert!(!normal_hazard(1000.0, 1.0, 0.0, &mut rng));
    }
}
