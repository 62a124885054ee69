//! *Oblique Mercator projection around an arbitrary tangent point on the
//! WGS84 ellipsoid, and Degrees-Minutes-Seconds angle conversion*.
//!
//! Intended for feeding planar-geometry code (distances, areas,
//! intersections) with Cartesian coordinates, when the input is given as
//! geographical latitude/longitude: Pick a center point close to the data,
//! project, do the planar work, and project back if needed.
//!
//! ```
//! use omerc::prelude::*;
//!
//! let op = ObliqueMercator::new(CenterParams::new(55., 12., 1.)?);
//! let cph = GeoPoint::new(dms_to_deg("55d40'36\"N")?, dms_to_deg("12d34'06\"E")?);
//! let xy = op.fwd(&cph);
//! assert!(op.inv(&xy).max_deviation(&cph) < 1e-9);
//! # Ok::<(), omerc::Error>(())
//! ```
//!
//! All operations are pure functions of their input, and all types are
//! plain `Copy` values, so batches of points may be processed in parallel
//! against one shared [`ObliqueMercator`].

pub mod coordinate;
pub mod dms;
mod ellipsoid;
pub mod math;
pub mod omerc;

pub use crate::coordinate::GeoPoint;
pub use crate::coordinate::PlanarPoint;
pub use crate::ellipsoid::Ellipsoid;
pub use crate::omerc::CenterParams;
pub use crate::omerc::ObliqueMercator;
pub use crate::omerc::ProjectionConstants;

/// The bread-and-butter, shrink-wrapped for external use
pub mod prelude {
    pub use crate::dms::{deg_to_dms, dms_to_deg};
    pub use crate::omerc::{derive_constants, forward_batch, inverse_batch};
    pub use crate::CenterParams;
    pub use crate::Direction;
    pub use crate::Ellipsoid;
    pub use crate::Error;
    pub use crate::GeoPoint;
    pub use crate::ObliqueMercator;
    pub use crate::PlanarPoint;
    pub use crate::ProjectionConstants;
}

use thiserror::Error;

/// The *Oblique Mercator Error* messaging enumeration.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Input outside the domain of the operation
    #[error("invalid input: {0}")]
    Validation(String),

    /// Text that does not follow the expected notation
    #[error("format error: {0}")]
    Format(String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),
}

/// `Fwd`: Indicate that a two-way operation should run in the *forward*
/// direction, from geographical to planar coordinates.
/// `Inv`: Indicate that it should run in the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Fwd,
    Inv,
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let e = Error::BadParam("k_0".to_string(), "-1".to_string());
        assert_eq!(e.to_string(), "malformed value for parameter k_0: -1");
        let e = Error::MissingParam("lat_0".to_string());
        assert_eq!(e.to_string(), "missing required parameter lat_0");
        assert!(dms::dms_to_deg("nonsense")
            .unwrap_err()
            .to_string()
            .starts_with("format error"));
    }

    #[test]
    fn types_are_shareable() {
        fn shareable<T: Send + Sync + Copy>() {}
        shareable::<ObliqueMercator>();
        shareable::<ProjectionConstants>();
        shareable::<GeoPoint>();
        shareable::<PlanarPoint>();
    }
}
