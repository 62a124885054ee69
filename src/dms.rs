//! Conversion between decimal degrees and Degrees-Minutes-Seconds notation.
//!
//! The accepted DMS grammar is
//!
//! ```txt
//! <degrees> [ <sep_d> [ <minutes> <sep_m> [ <seconds> ["] ] ] ] [<hemisphere>]
//! ```
//!
//! where `<sep_d>` is one of `D d O o`, `<sep_m>` is one of `' m`, and the
//! optional `<hemisphere>` is one of `N S E W`. Only the degrees may carry a
//! numeric sign. A hemisphere letter, when present, decides the sign of the
//! result (`S` and `W` negative, `N` and `E` positive). Otherwise the sign of
//! the degrees is used.
//!
//! EXAMPLE:
//! ```
//! use omerc::dms::{deg_to_dms, dms_to_deg};
//!
//! assert_eq!(dms_to_deg("5d30'").unwrap(), 5.5);
//! assert_eq!(dms_to_deg("-5d").unwrap(), -5.0);
//! assert_eq!(dms_to_deg("5d30'W").unwrap(), -5.5);
//! assert_eq!(deg_to_dms(-5.5), "-5d30'0");
//! ```
use crate::math::angular;
use crate::Error;
use once_cell::sync::Lazy;
use regex::Regex;

/// Seconds (and minutes) this close to 60 are carried into the next unit
const CARRY_TOLERANCE: f64 = 1e-10;

static DMS_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<d>[+-]?(?:\d+(?:\.\d*)?|\.\d+))",
        r"(?:[DdOo]",
        r"(?:(?P<m>\d+(?:\.\d*)?|\.\d+)['m]",
        r#"(?:(?P<s>\d+(?:\.\d*)?|\.\d+)"?)?"#,
        r")?)?",
        r"\s*(?P<h>[NSEW])?$",
    ))
    .expect("DMS grammar is a valid regular expression")
});

/// Parse a DMS string into decimal degrees.
///
/// # Errors
///
/// Returns [`Error::Format`] if `dms` does not match the grammar described in
/// the [module documentation](self).
///
/// # Usage
///
/// ```
/// use omerc::dms::dms_to_deg;
///
/// let south = dms_to_deg("11d12'13\"S").unwrap();
/// assert!((south + (11. + 12. / 60. + 13. / 3600.)).abs() < 1e-12);
/// assert!(dms_to_deg("11x12'").is_err());
/// ```
pub fn dms_to_deg(dms: &str) -> Result<f64, Error> {
    let text = dms.trim();
    let malformed = || Error::Format(format!("malformed DMS angle: '{text}'"));
    let captures = DMS_GRAMMAR.captures(text).ok_or_else(malformed)?;

    let component = |name: &str| -> Result<f64, Error> {
        match captures.name(name) {
            Some(token) => token.as_str().parse::<f64>().map_err(|_| malformed()),
            None => Ok(0.),
        }
    };

    let degrees = component("d")?;
    let minutes = component("m")?;
    let seconds = component("s")?;

    // The hemisphere overrides the numeric sign only when present
    let negative = match captures.name("h").map(|h| h.as_str()) {
        Some("S" | "W") => true,
        Some(_) => false,
        None => degrees.is_sign_negative(),
    };

    let magnitude = angular::dms_to_dd(degrees, minutes, seconds);
    Ok(if negative { -magnitude } else { magnitude })
}

/// Format decimal degrees as `<d>d<m>'<s>`, with degrees and minutes
/// integral, and seconds as given by the default `f64` formatting.
///
/// The degree part is truncated toward zero, so for angles in (-1, 0), it
/// is written as `-0` to retain the sign. Zero minutes and seconds are
/// written out in full. Seconds within rounding error of 60 are carried
/// into the minutes, and minutes into the degrees.
pub fn deg_to_dms(deg: f64) -> String {
    let (mut d, ms) = angular::dd_to_dm(deg);
    let mut m = ms.trunc();
    let mut s = (ms - m) * angular::DM;

    if s >= angular::DM - CARRY_TOLERANCE {
        m += 1.;
        s = 0.;
    }
    if m >= angular::DM - CARRY_TOLERANCE {
        d += if deg.is_sign_negative() { -1. } else { 1. };
        m -= angular::DM;
    }

    format!("{d}d{m}'{s}")
}

// ----- T E S T S ---------------------------------------------------------------------
