//! Coordinate value types: Geographic points on the ellipsoid, and planar
//! points on the projection plane.
//!
//! Both types are plain immutable `Copy` values. They implement `Display`
//! and `FromStr` for the GML `pos`-style interchange format: Two numbers
//! separated by whitespace.
use crate::Error;
use std::fmt::Display;
use std::str::FromStr;

mod pos;
pub use pos::split_pos;

/// A WGS84 latitude/longitude pair, in degrees.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// A `GeoPoint` from latitude/longitude in degrees, without any range check
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Tries to create a `GeoPoint` from a latitude/longitude pair. First checks
    /// if the values are valid:
    /// * Latitude must be in the range [-90, 90]
    /// * Longitude must be in the range (-180, 180]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if either latitude or longitude is invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use omerc::GeoPoint;
    ///
    /// let p = GeoPoint::checked(55.68, 12.57).unwrap();
    /// assert_eq!(p.latitude(), 55.68);
    /// assert_eq!(p.longitude(), 12.57);
    ///
    /// assert!(GeoPoint::checked(91., 0.).is_err());
    /// assert!(GeoPoint::checked(0., -180.).is_err());
    /// assert!(GeoPoint::checked(0., 180.).is_ok());
    /// ```
    pub fn checked(latitude: f64, longitude: f64) -> Result<GeoPoint, Error> {
        if !(-90_f64..=90_f64).contains(&latitude) {
            return Err(Error::Validation(format!(
                "latitude {latitude} outside of valid range [-90, 90]"
            )));
        }
        if !(longitude > -180. && longitude <= 180.) {
            return Err(Error::Validation(format!(
                "longitude {longitude} outside of valid range (-180, 180]"
            )));
        }
        Ok(GeoPoint::new(latitude, longitude))
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The largest of the absolute latitude and longitude differences to `other`,
    /// in degrees
    #[must_use]
    pub fn max_deviation(&self, other: &GeoPoint) -> f64 {
        (self.latitude - other.latitude)
            .abs()
            .max((self.longitude - other.longitude).abs())
    }
}

/// A point on the projection plane: Easting and northing in meters,
/// relative to the projection center.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct PlanarPoint {
    x: f64,
    y: f64,
}

impl PlanarPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> PlanarPoint {
        PlanarPoint { x, y }
    }

    /// The projection center
    #[must_use]
    pub const fn origin() -> PlanarPoint {
        PlanarPoint { x: 0., y: 0. }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to `other`
    #[must_use]
    pub fn hypot2(&self, other: &PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// ----- pos format --------------------------------------------------------------------

impl Display for PlanarPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} {:.*}", p, self.x, p, self.y),
            None => write!(f, "{} {}", self.x, self.y),
        }
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} {:.*}", p, self.latitude, p, self.longitude),
            None => write!(f, "{} {}", self.latitude, self.longitude),
        }
    }
}

impl FromStr for PlanarPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<PlanarPoint, Error> {
        let (x, y) = split_pos(s)?;
        let parse = |token: &str| {
            token
                .parse::<f64>()
                .map_err(|_| Error::Format(format!("not a number: '{token}'")))
        };
        Ok(PlanarPoint::new(parse(x)?, parse(y)?))
    }
}

/// Latitude first, then longitude. Each may be given in decimal degrees or
/// in any DMS notation accepted by [`dms_to_deg`](crate::dms::dms_to_deg).
impl FromStr for GeoPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<GeoPoint, Error> {
        let (lat, lon) = split_pos(s)?;
        Ok(GeoPoint::new(
            crate::dms::dms_to_deg(lat)?,
            crate::dms::dms_to_deg(lon)?,
        ))
    }
}

// ----- T E S T S ---------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar() -> Result<(), Error> {
        let p: PlanarPoint = "1.5   -2".parse()?;
        assert_eq!(p, PlanarPoint::new(1.5, -2.));
        assert_eq!(p.to_string(), "1.5 -2");
        assert_eq!(format!("{p:.3}"), "1.500 -2.000");

        assert_eq!(PlanarPoint::origin().hypot2(&PlanarPoint::new(3., 4.)), 5.);

        assert!(matches!("1 2 3".parse::<PlanarPoint>(), Err(Error::Format(_))));
        assert!(matches!("1".parse::<PlanarPoint>(), Err(Error::Format(_))));
        assert!(matches!("1 y".parse::<PlanarPoint>(), Err(Error::Format(_))));
        Ok(())
    }

    #[test]
    fn geographic() -> Result<(), Error> {
        let p: GeoPoint = "55.5 12d30'W".parse()?;
        assert_eq!(p, GeoPoint::new(55.5, -12.5));
        assert_eq!(p.to_string(), "55.5 -12.5");
        assert_eq!(format!("{p:.2}"), "55.50 -12.50");
        assert_eq!(p.max_deviation(&GeoPoint::new(55., -12.75)), 0.5);

        assert!(matches!("55.5".parse::<GeoPoint>(), Err(Error::Format(_))));
        assert!(matches!("55.5 twelve".parse::<GeoPoint>(), Err(Error::Format(_))));

        assert!(GeoPoint::checked(-90., 0.).is_ok());
        assert!(matches!(
            GeoPoint::checked(-90.5, 0.),
            Err(Error::Validation(_))
        ));
        assert!(GeoPoint::checked(0., f64::NAN).is_err());
        Ok(())
    }
}
