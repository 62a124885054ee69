use std::f64::consts::PI;

/// Degrees per turn
pub const TD: f64 = 360.;
/// Minutes per degree
pub const DM: f64 = 60.;
/// Seconds per degree
pub const DS: f64 = 3600.;

/// Degrees to radians, after reducing the input modulo 360. The reduction
/// is the truncated remainder, so the sign of the result follows the sign
/// of the input, and the output is in (-2π, 2π).
pub fn deg_to_rad(deg: f64) -> f64 {
    (deg % TD) * (PI / 180.)
}

/// Radians to degrees, reduced modulo 360 into (-360, 360).
pub fn rad_to_deg(rad: f64) -> f64 {
    (rad * (180. / PI)) % TD
}

/// Transformation from degrees, minutes and seconds-with-decimals
/// to degrees-with-decimals. All three components are taken as unsigned
/// magnitudes: the sign is applied by the caller.
pub fn dms_to_dd(d: f64, m: f64, s: f64) -> f64 {
    d.abs() + m.abs() / DM + s.abs() / DS
}

/// Split degrees-with-decimals into its truncated degree part, and the
/// unsigned minutes-with-decimals remainder.
pub fn dd_to_dm(dd: f64) -> (f64, f64) {
    let d = dd.trunc();
    (d, (dd - d).abs() * DM)
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn reduction() {
        assert_float_eq!(deg_to_rad(180.), PI, abs <= 1e-15);
        assert_float_eq!(deg_to_rad(540.), PI, abs <= 1e-14);
        assert_float_eq!(deg_to_rad(-540.), -PI, abs <= 1e-14);
        assert_eq!(deg_to_rad(360.), 0.);
        assert!(deg_to_rad(-10.) < 0.);

        assert_float_eq!(rad_to_deg(PI), 180., abs <= 1e-12);
        assert_float_eq!(rad_to_deg(3. * PI), 180., abs <= 1e-12);
        assert_float_eq!(rad_to_deg(-3. * PI), -180., abs <= 1e-12);
        assert_float_eq!(rad_to_deg(deg_to_rad(55.51)), 55.51, abs <= 1e-12);
    }

    #[test]
    fn sexagesimal() {
        assert_float_eq!(dms_to_dd(55., 30., 36.), 55.51, abs <= 1e-12);
        assert_float_eq!(dms_to_dd(-55., 30., 36.), 55.51, abs <= 1e-12);

        let (d, m) = dd_to_dm(55.51);
        assert_eq!(d, 55.);
        assert_float_eq!(m, 30.6, abs <= 1e-10);

        let (d, m) = dd_to_dm(-0.5);
        assert!(d.is_sign_negative());
        assert_float_eq!(m, 30., abs <= 1e-12);
    }
}
