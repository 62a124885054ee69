use crate::Error;

/// Split a `pos`-style string into exactly two whitespace separated tokens.
///
/// ```
/// assert_eq!(omerc::coordinate::split_pos(" 1  2 ").unwrap(), ("1", "2"));
/// assert!(omerc::coordinate::split_pos("1 2 3").is_err());
/// ```
pub fn split_pos(pos: &str) -> Result<(&str, &str), Error> {
    let mut tokens = pos.split_whitespace();
    let (Some(first), Some(second), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(Error::Format(format!(
            "expected two whitespace separated values, found '{}'",
            pos.trim()
        )));
    };
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split() {
        assert_eq!(split_pos("1 2").unwrap(), ("1", "2"));
        assert_eq!(split_pos("\t-1.5e3\n 7 ").unwrap(), ("-1.5e3", "7"));
        assert!(split_pos("").is_err());
        assert!(split_pos("   ").is_err());
        assert!(split_pos("1").is_err());
        assert!(split_pos("1 2 3").is_err());
    }
}
