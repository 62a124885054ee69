/// Representation of the (biaxial) reference ellipsoid by its semimajor
/// axis and first eccentricity.
///
/// Only WGS84 is supported, so the [`Default`] is the only way to build
/// one from outside the crate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    e: f64,
}

/// WGS84 semimajor axis, in meters
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 first eccentricity, to the precision used throughout the
/// projection formulas
pub const WGS84_E: f64 = 0.081_819_2;

/// WGS84 is the default (and only) ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::wgs84()
    }
}

impl Ellipsoid {
    #[must_use]
    pub const fn wgs84() -> Ellipsoid {
        Ellipsoid {
            a: WGS84_A,
            e: WGS84_E,
        }
    }

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The eccentricity, *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.e
    }

    /// The squared eccentricity *e² = (a² - b²) / a²*.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.e * self.e
    }

    /// The squared second eccentricity *e'² = e² / (1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1. - es)
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn wgs84() {
        let ellps = Ellipsoid::default();
        assert_eq!(ellps, Ellipsoid::wgs84());
        assert_eq!(ellps.semimajor_axis(), 6_378_137.0);
        assert_eq!(ellps.eccentricity(), 0.0818192);

        // The flattening derived from e agrees with the WGS84 definition
        // to the precision e is given with
        let f = 1. - (1. - ellps.eccentricity_squared()).sqrt();
        assert_float_eq!(f, 1. / 298.257_223_563, abs <= 1e-8);

        let es = ellps.eccentricity_squared();
        assert_float_eq!(ellps.second_eccentricity_squared(), es / (1. - es), abs <= 1e-18);
    }
}
