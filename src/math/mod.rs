//! Miscellaneous math functions

/// The isometric latitude and its inverse, i.e. the work horses of the
/// conformal projections.
pub mod ancillary;
pub use ancillary::phi2;
pub use ancillary::tsfn;

/// Free functions for handling and converting between
/// different representations of angles.
pub mod angular;
pub use angular::deg_to_rad;
pub use angular::rad_to_deg;
