use log::trace;
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;

/// Upper bound on the number of refinement steps taken by [`phi2`]
pub const PHI2_MAX_ITER: usize = 15;

/// Convergence criterion for [`phi2`], in radians
pub const PHI2_TOLERANCE: f64 = 1.0e-10;

/// tsfn is the function t(phi) as defined in Snyder (1987), Eq. (7-10),
/// i.e. the exponential of the negated isometric latitude, exp(-𝜓).
///
/// Inputs:
///   phi: geographic latitude (radians)
///   e: eccentricity of the ellipsoid
/// Output:
///   tan(𝜋/4 - 𝜙/2) / ((1 - e sin 𝜙) / (1 + e sin 𝜙))^(e/2)
///
/// At the poles, the tangent takes the values 0 (north) and a very
/// large number (south), which is what the callers expect.
pub fn tsfn(phi: f64, e: f64) -> f64 {
    let con = e * phi.sin();
    (FRAC_PI_4 - phi / 2.).tan() / ((1. - con) / (1. + con)).powf(e / 2.)
}

/// The inverse of [`tsfn`]: Recover the geographic latitude from
/// the isometric latitude encoding `ts`.
///
/// Snyder (1987), Eq. (7-9), solved by fixed point iteration, starting
/// from the spherical solution. Stops when two consecutive estimates
/// agree to within [`PHI2_TOLERANCE`], or after [`PHI2_MAX_ITER`] steps.
/// In the latter case, the last estimate is returned as is: There is
/// no failure mode.
pub fn phi2(ts: f64, e: f64) -> f64 {
    phi2_counted(ts, e).0
}

/// Implementation of [`phi2`], also returning the number of refinement
/// steps actually taken.
pub(crate) fn phi2_counted(ts: f64, e: f64) -> (f64, usize) {
    let half_e = e / 2.;
    let mut phi = FRAC_PI_2 - 2. * ts.atan();

    for i in 1..=PHI2_MAX_ITER {
        let con = e * phi.sin();
        let next = FRAC_PI_2 - 2. * (ts * ((1. - con) / (1. + con)).powf(half_e)).atan();
        let converged = (phi - next).abs() <= PHI2_TOLERANCE;
        phi = next;
        if converged {
            return (phi, i);
        }
    }

    trace!("phi2: no convergence after {PHI2_MAX_ITER} iterations (ts={ts})");
    (phi, PHI2_MAX_ITER)
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ellipsoid;
    use float_eq::assert_float_eq;

    #[test]
    fn tsfn_and_phi2() {
        let e = Ellipsoid::default().eccentricity();

        // Spherical case: tsfn reduces to tan(pi/4 - phi/2)
        assert_float_eq!(tsfn(0.5, 0.), (FRAC_PI_4 - 0.25).tan(), abs <= 1e-15);
        assert_float_eq!(tsfn(0., e), 1., abs <= 1e-15);
        assert!(tsfn(FRAC_PI_2, e).abs() < 1e-15);

        for deg in [-89.5_f64, -60., -30., -1e-3, 0., 1e-3, 12., 45., 55.51, 89.9] {
            let phi = deg.to_radians();
            let ts = tsfn(phi, e);
            assert_float_eq!(phi2(ts, e), phi, abs <= 1e-10);
        }

        // Northern latitudes are encoded as ts < 1, southern as ts > 1
        assert!(tsfn(0.7, e) < 1.);
        assert!(tsfn(-0.7, e) > 1.);
    }

    #[test]
    fn phi2_is_bounded() {
        let e = Ellipsoid::default().eccentricity();
        for ts in [0., 1e-300, 1e-12, 0.01, 0.5, 1., 2., 1e3, 1e12, 1e300, f64::INFINITY] {
            let (_, n) = phi2_counted(ts, e);
            assert!(n <= PHI2_MAX_ITER);
        }

        // NaN never meets the convergence criterion, so it exhausts the budget
        let (phi, n) = phi2_counted(f64::NAN, e);
        assert!(phi.is_nan());
        assert_eq!(n, PHI2_MAX_ITER);

        // Spherical case converges in the first step
        let (phi, n) = phi2_counted(0.3, 0.);
        assert_eq!(n, 1);
        assert_float_eq!(phi, FRAC_PI_2 - 2. * 0.3_f64.atan(), abs <= 1e-15);
    }
}
