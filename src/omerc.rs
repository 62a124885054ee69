//! Oblique Mercator, with the projection center at an arbitrary tangent point
//! on the WGS84 ellipsoid, and the initial line along the central meridian.
//!
//! The projection constants are derived once per center point
//! ([`ProjectionConstants`]), and then reused for every point mapped, in
//! either direction. Following Snyder (1987), ch. 9, "Hotine" variant, and
//! IOGP Publication 373-7-2, Guidance Note 7-2, section 3.2.4.
//!
//! EXAMPLE:
//! ```
//! use omerc::prelude::*;
//!
//! let op: ObliqueMercator = "omerc lat_0=45 lon_c=10 k_0=1".parse()?;
//!
//! let center = op.fwd(&GeoPoint::new(45., 10.));
//! assert!(center.hypot2(&PlanarPoint::origin()) < 1e-6);
//!
//! let north = op.fwd(&GeoPoint::new(46., 10.));
//! assert!(north.x().abs() < 1e-6);
//! assert!((north.y() - 111_141.5).abs() < 1.);
//!
//! let back = op.inv(&north);
//! assert!(back.max_deviation(&GeoPoint::new(46., 10.)) < 1e-9);
//! # Ok::<(), omerc::Error>(())
//! ```
use crate::coordinate::{GeoPoint, PlanarPoint};
use crate::dms::dms_to_deg;
use crate::math::{deg_to_rad, phi2, rad_to_deg, tsfn};
use crate::{Ellipsoid, Error};
use log::{debug, trace};
use std::f64::consts::FRAC_PI_2;
use std::fmt::Display;
use std::str::FromStr;

/// Latitudes this close to the equator (radians) are treated as equatorial
/// when deriving the constants.
const EQUATOR_TOLERANCE: f64 = 1e-10;

/// Latitudes this close to a pole (radians) are mapped by the polar limit.
/// Also the tolerance for |U'| = 1 in the inverse.
const POLE_TOLERANCE: f64 = 1e-10;

/// Below this, cos(B(λ - λ₀)) is considered zero in the forward mapping.
const MERIDIAN_TOLERANCE: f64 = 1e-7;

/// The limiting value of the v-coordinate (in units of A/B) at the poles
#[allow(clippy::excessive_precision)]
const POLAR_V_LIMIT: f64 = -4.289_728_803_118_608_513_675_072_319_719_5;

// ----- C E N T E R -------------------------------------------------------------------

/// The caller supplied definition of the projection: The center point
/// (tangent point) and the scale factor along the initial line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterParams {
    lat_0: f64,
    lon_c: f64,
    k_0: f64,
}

impl CenterParams {
    /// Tries to create a projection definition from center latitude and
    /// longitude (degrees), and scale factor.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if `lat_0` is outside [-90, 90], `lon_c` is not
    /// finite, or `k_0` is not a finite positive number.
    pub fn new(lat_0: f64, lon_c: f64, k_0: f64) -> Result<CenterParams, Error> {
        if !(-90_f64..=90_f64).contains(&lat_0) {
            return Err(Error::Validation(format!(
                "center latitude {lat_0} outside of valid range [-90, 90]"
            )));
        }
        if !lon_c.is_finite() {
            return Err(Error::Validation(format!(
                "center longitude {lon_c} is not a finite number"
            )));
        }
        if !(k_0.is_finite() && k_0 > 0.) {
            return Err(Error::Validation(format!(
                "scale factor {k_0} must be a finite positive number"
            )));
        }
        Ok(CenterParams { lat_0, lon_c, k_0 })
    }

    /// Center latitude, degrees
    pub fn lat_0(&self) -> f64 {
        self.lat_0
    }

    /// Center longitude, degrees
    pub fn lon_c(&self) -> f64 {
        self.lon_c
    }

    /// Scale factor at the center
    pub fn k_0(&self) -> f64 {
        self.k_0
    }
}

/// Parse an operator definition of the form `omerc lat_0=45 lon_c=10 k_0=1`.
///
/// The leading operator name is optional. `latc` and `lonc` are accepted
/// as aliases for `lat_0` and `lon_c`, and `k` for `k_0`. Angular values
/// may be given in decimal degrees or in DMS notation. The scale factor
/// defaults to 1.
impl FromStr for CenterParams {
    type Err = Error;

    fn from_str(definition: &str) -> Result<CenterParams, Error> {
        let mut lat_0 = None;
        let mut lon_c = None;
        let mut k_0 = None;

        for (i, element) in definition.split_whitespace().enumerate() {
            let Some((key, value)) = element.split_once('=') else {
                if i == 0 && element == "omerc" {
                    continue;
                }
                return Err(Error::BadParam(
                    element.to_string(),
                    String::from("expected key=value"),
                ));
            };

            let bad = || Error::BadParam(key.to_string(), value.to_string());
            match key {
                "lat_0" | "latc" => lat_0 = Some(dms_to_deg(value).map_err(|_| bad())?),
                "lon_c" | "lonc" => lon_c = Some(dms_to_deg(value).map_err(|_| bad())?),
                "k_0" | "k" => k_0 = Some(value.parse::<f64>().map_err(|_| bad())?),
                _ => return Err(bad()),
            }
        }

        let lat_0 = lat_0.ok_or_else(|| Error::MissingParam(String::from("lat_0")))?;
        let lon_c = lon_c.ok_or_else(|| Error::MissingParam(String::from("lon_c")))?;
        CenterParams::new(lat_0, lon_c, k_0.unwrap_or(1.))
    }
}

impl Display for CenterParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "omerc lat_0={} lon_c={} k_0={}",
            self.lat_0, self.lon_c, self.k_0
        )
    }
}

// ----- C O N S T A N T S -------------------------------------------------------------

/// The constants of the projection, as derived from a [`CenterParams`] and
/// the WGS84 ellipsoid. `A` and `uc` are in units of the semimajor axis.
#[allow(non_snake_case)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConstants {
    pub A: f64,
    pub B: f64,
    pub D: f64,
    pub F: f64,
    pub E: f64,
    /// u-coordinate of the projection center
    pub uc: f64,
}

/// Derive the projection constants for the center point (`lat_0`, `lon_c`) and
/// scale factor `k_0`.
///
/// # Errors
///
/// [`Error::Validation`] on out-of-range input, as for [`CenterParams::new`].
pub fn derive_constants(lat_0: f64, lon_c: f64, k_0: f64) -> Result<ProjectionConstants, Error> {
    let center = CenterParams::new(lat_0, lon_c, k_0)?;
    Ok(ProjectionConstants::from(&center))
}

impl From<&CenterParams> for ProjectionConstants {
    #[allow(non_snake_case)]
    fn from(center: &CenterParams) -> ProjectionConstants {
        let ellps = Ellipsoid::default();
        let e = ellps.eccentricity();
        let es = ellps.eccentricity_squared();

        let phi_0 = deg_to_rad(center.lat_0);
        let k_0 = center.k_0;

        let (A, B, D, F, E) = if phi_0.abs() > EQUATOR_TOLERANCE {
            let (s, c) = phi_0.sin_cos();
            let B = (1. + ellps.second_eccentricity_squared() * c.powi(4)).sqrt();
            let A = B * k_0 * (1. - es).sqrt() / (1. - es * s * s);

            // Guard the square roots below against D slightly less than 1
            let mut D = B * (1. - es).sqrt() / (c * (1. - es * s * s).sqrt());
            if D * D < 1. {
                D = 1.;
            }
            let DD = (D * D - 1.).sqrt();
            let F = if phi_0 < 0. { D - DD } else { D + DD };
            let E = tsfn(phi_0, e).powf(B) * F;
            (A, B, D, F, E)
        } else {
            debug!("omerc: equatorial center");
            (k_0, (1. - es).sqrt(), 1., 1., 1.)
        };

        let uc = (A / B * (D * D - 1.).sqrt().atan2(1.)).abs();
        let uc = if phi_0 < 0. { -uc } else { uc };

        let constants = ProjectionConstants { A, B, D, F, E, uc };
        debug!("omerc: {center} -> {constants:?}");
        constants
    }
}

// ----- F O R W A R D -----------------------------------------------------------------

/// Map the geographic `point` to the projection plane.
///
/// `lambda_0` is the center longitude, in radians. Points exactly 90°
/// (in units of B(λ - λ₀)) from the central meridian on the equator map to
/// an infinite easting: That is the nature of the projection, and is not
/// treated as an error.
#[allow(non_snake_case)]
pub fn fwd(point: &GeoPoint, c: &ProjectionConstants, lambda_0: f64) -> PlanarPoint {
    let ellps = Ellipsoid::default();
    let e = ellps.eccentricity();
    let ProjectionConstants { A, B, E, uc, .. } = *c;

    let phi = deg_to_rad(point.latitude());
    let dlambda = deg_to_rad(point.longitude()) - lambda_0;

    let (v, u) = if phi.abs() >= FRAC_PI_2 - POLE_TOLERANCE {
        (A / B * POLAR_V_LIMIT, phi * A / B - uc)
    } else {
        let Q = E / tsfn(phi, e).powf(B);
        let S = (Q - 1. / Q) / 2.;
        let T = (Q + 1. / Q) / 2.;
        let V = (B * dlambda).sin();
        let U = -V / T;

        let v = if U.abs() == 1. {
            f64::INFINITY
        } else {
            A / (2. * B) * ((1. - U) / (1. + U)).ln()
        };

        let M = (B * dlambda).cos();
        let u = if M > MERIDIAN_TOLERANCE {
            A / B * S.atan2(M)
        } else {
            A * B * dlambda
        };
        (v, u - uc)
    };

    if !v.is_finite() {
        trace!("omerc: non-finite easting for {point}");
    }

    let a = ellps.semimajor_axis();
    PlanarPoint::new(v * a, u * a)
}

// ----- I N V E R S E -----------------------------------------------------------------

/// Map the planar `point` back to the ellipsoid.
///
/// `lambda_0` is the center longitude in radians, `lon_c` the same in
/// degrees: The poles have no well defined longitude, so they are returned
/// with longitude `lon_c`. Other longitudes are reduced into (-360, 360) but
/// not normalized further.
#[allow(non_snake_case)]
pub fn inv(point: &PlanarPoint, c: &ProjectionConstants, lambda_0: f64, lon_c: f64) -> GeoPoint {
    let ellps = Ellipsoid::default();
    let e = ellps.eccentricity();
    let a = ellps.semimajor_axis();
    let ProjectionConstants { A, B, E, uc, .. } = *c;

    let v = point.x() / a;
    let u = point.y() / a + uc;

    let Q = (-B * v / A).exp();
    let S = (Q - 1. / Q) / 2.;
    let T = (Q + 1. / Q) / 2.;
    let V = (B * u / A).sin();
    let U = V / T;

    if (U.abs() - 1.).abs() < POLE_TOLERANCE {
        let lat = if U > 0. { 90. } else { -90. };
        return GeoPoint::new(lat, lon_c);
    }

    let t = E / ((1. + U) / (1. - U)).sqrt();
    let phi = phi2(t.powf(1. / B), e);
    let lambda = -S.atan2((B * u / A).cos()) / B;

    GeoPoint::new(rad_to_deg(phi), rad_to_deg(lambda + lambda_0))
}

// ----- B A T C H ---------------------------------------------------------------------

/// Forward map all of `points`, using constants derived for the center
/// longitude `lon_c` (degrees). Output has the same length and order as
/// the input.
pub fn forward_batch(
    points: &[GeoPoint],
    constants: &ProjectionConstants,
    lon_c: f64,
) -> Vec<PlanarPoint> {
    let lambda_0 = deg_to_rad(lon_c);
    points.iter().map(|p| fwd(p, constants, lambda_0)).collect()
}

/// Inverse map all of `points`, using constants derived for the center
/// longitude `lon_c` (degrees). Output has the same length and order as
/// the input.
pub fn inverse_batch(
    points: &[PlanarPoint],
    constants: &ProjectionConstants,
    lon_c: f64,
) -> Vec<GeoPoint> {
    let lambda_0 = deg_to_rad(lon_c);
    points
        .iter()
        .map(|p| inv(p, constants, lambda_0, lon_c))
        .collect()
}

// ----- O P E R A T O R ---------------------------------------------------------------

/// A ready-to-use projection: The center definition, with its constants
/// derived once and for all.
///
/// `ObliqueMercator` is a plain `Copy` value with no interior mutability,
/// so it may be shared freely between threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObliqueMercator {
    center: CenterParams,
    constants: ProjectionConstants,
    lambda_0: f64,
}

impl ObliqueMercator {
    #[must_use]
    pub fn new(center: CenterParams) -> ObliqueMercator {
        ObliqueMercator {
            center,
            constants: ProjectionConstants::from(&center),
            lambda_0: deg_to_rad(center.lon_c),
        }
    }

    pub fn center(&self) -> &CenterParams {
        &self.center
    }

    pub fn constants(&self) -> &ProjectionConstants {
        &self.constants
    }

    pub fn fwd(&self, point: &GeoPoint) -> PlanarPoint {
        fwd(point, &self.constants, self.lambda_0)
    }

    pub fn inv(&self, point: &PlanarPoint) -> GeoPoint {
        inv(point, &self.constants, self.lambda_0, self.center.lon_c)
    }

    pub fn fwd_batch(&self, points: &[GeoPoint]) -> Vec<PlanarPoint> {
        forward_batch(points, &self.constants, self.center.lon_c)
    }

    pub fn inv_batch(&self, points: &[PlanarPoint]) -> Vec<GeoPoint> {
        inverse_batch(points, &self.constants, self.center.lon_c)
    }

    /// Forward, then inverse
    pub fn roundtrip(&self, point: &GeoPoint) -> GeoPoint {
        self.inv(&self.fwd(point))
    }
}

impl FromStr for ObliqueMercator {
    type Err = Error;

    fn from_str(definition: &str) -> Result<ObliqueMercator, Error> {
        Ok(ObliqueMercator::new(definition.parse()?))
    }
}

// ----- T E S T S ---------------------------------------------------------------------
