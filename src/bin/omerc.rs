//! OMERC: Read coordinate pairs from files or stdin, and map them to or from
//! an Oblique Mercator plane centered at a given point.
//!
//! EXAMPLE:
//! ```sh
//! $ echo 46 10 | omerc --lat0 45 --lonc 10
//! > 0.00000 111141.54810
//! $ echo 78846.84169 486.56266 | omerc --center "lat_0=45 lon_c=10" --inv -d 6
//! > 45.000000 11.000000
//! ```
use anyhow::{bail, Context};
use clap::Parser;
use log::{debug, info, warn};
use omerc::prelude::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// OMERC: Map latitude/longitude pairs to planar coordinates on an Oblique
/// Mercator projection centered at a given tangent point (or back, with --inv).
/// Input lines hold two whitespace separated values. Geographical input
/// may be given in decimal degrees or DMS notation.
#[derive(Parser, Debug)]
#[clap(name = "omerc")]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Projection definition, e.g. "lat_0=55 lon_c=12 k_0=1"
    #[clap(short, long, conflicts_with_all = ["lat0", "lonc"])]
    center: Option<String>,

    /// Latitude of the projection center
    #[clap(long, allow_hyphen_values = true)]
    lat0: Option<String>,

    /// Longitude of the projection center
    #[clap(long, allow_hyphen_values = true)]
    lonc: Option<String>,

    /// Scale factor at the projection center
    #[clap(long, default_value_t = 1.0)]
    k0: f64,

    /// Inverse operation
    #[clap(long = "inv")]
    inverse: bool,

    /// Write geographical output in DMS notation
    #[clap(long)]
    dms: bool,

    /// Number of decimals in the output
    #[clap(short = 'd', long)]
    decimals: Option<usize>,

    /// Report fwd-inv roundtrip deviation
    #[clap(short, long)]
    roundtrip: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on (stdin if none given)
    args: Vec<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    debug!("{:#?}", options);

    let center = match (&options.center, &options.lat0, &options.lonc) {
        (Some(definition), _, _) => definition.parse::<CenterParams>()?,
        (None, Some(lat0), Some(lonc)) => {
            CenterParams::new(dms_to_deg(lat0)?, dms_to_deg(lonc)?, options.k0)?
        }
        _ => bail!("Missing projection center: use --center, or both of --lat0 and --lonc"),
    };
    info!("{center}");

    let op = ObliqueMercator::new(center);
    let direction = if options.inverse {
        Direction::Inv
    } else {
        Direction::Fwd
    };

    if options.args.is_empty() {
        return process(&op, direction, &options, io::stdin().lock());
    }

    for path in &options.args {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Cannot open {}", path.display()))?;
        process(&op, direction, &options, io::BufReader::new(file))?;
    }
    Ok(())
}

/// Convert every line of `reader`, skipping empty lines and `#`-comments.
/// Malformed lines are logged and skipped.
fn process(
    op: &ObliqueMercator,
    direction: Direction,
    options: &Cli,
    reader: impl BufRead,
) -> Result<(), anyhow::Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        match convert(op, direction, options, text) {
            Ok(result) => writeln!(out, "{result}")?,
            Err(err) => warn!("Line {}: {err}", n + 1),
        }
    }
    Ok(())
}

fn convert(
    op: &ObliqueMercator,
    direction: Direction,
    options: &Cli,
    text: &str,
) -> Result<String, omerc::Error> {
    match direction {
        Direction::Fwd => {
            let geo: GeoPoint = text.parse()?;
            let projected = op.fwd(&geo);
            let mut result = format!("{:.*}", options.decimals.unwrap_or(5), projected);
            if options.roundtrip {
                let deviation = op.inv(&projected).max_deviation(&geo);
                result += &format!("  {deviation:.3e}");
            }
            Ok(result)
        }

        Direction::Inv => {
            let projected: PlanarPoint = text.parse()?;
            let geo = op.inv(&projected);
            let mut result = if options.dms {
                format!(
                    "{} {}",
                    deg_to_dms(geo.latitude()),
                    deg_to_dms(geo.longitude())
                )
            } else {
                format!("{:.*}", options.decimals.unwrap_or(10), geo)
            };
            if options.roundtrip {
                let deviation = op.fwd(&geo).hypot2(&projected);
                result += &format!("  {deviation:.3e}");
            }
            Ok(result)
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(args: &[&str]) -> Result<(ObliqueMercator, Cli), omerc::Error> {
        let options = Cli::parse_from(std::iter::once("omerc").chain(args.iter().copied()));
        let op = ObliqueMercator::new(CenterParams::new(45., 10., 1.)?);
        Ok((op, options))
    }

    #[test]
    fn forward() -> Result<(), omerc::Error> {
        let (op, options) = setup(&["--lat0", "45", "--lonc", "10"])?;
        assert_eq!(
            convert(&op, Direction::Fwd, &options, "46 10")?,
            "0.00000 111141.54810"
        );
        assert_eq!(
            convert(&op, Direction::Fwd, &options, "46d0'0\"N 10d0'0\"E")?,
            "0.00000 111141.54810"
        );
        assert!(matches!(
            convert(&op, Direction::Fwd, &options, "46"),
            Err(omerc::Error::Format(_))
        ));
        Ok(())
    }

    #[test]
    fn inverse_dms() -> Result<(), omerc::Error> {
        let (op, options) = setup(&["--lat0", "45", "--lonc", "10", "--inv", "--dms"])?;
        assert!(options.inverse && options.dms);

        let geo = GeoPoint::new(45.5, 11.25);
        let xy = op.fwd(&geo);
        let text = format!("{} {}", xy.x(), xy.y());
        let result = convert(&op, Direction::Inv, &options, &text)?;

        let (lat, lon) = omerc::coordinate::split_pos(&result)?;
        assert!(lat.starts_with("45d"));
        assert!(lon.starts_with("11d"));
        assert!((dms_to_deg(lat)? - 45.5).abs() < 1e-9);
        assert!((dms_to_deg(lon)? - 11.25).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn inverse_decimals_and_roundtrip() -> Result<(), omerc::Error> {
        let (op, options) = setup(&["--lat0", "45", "--lonc", "10", "--inv", "-d", "4", "-r"])?;
        let result = convert(&op, Direction::Inv, &options, "0 111141.54810320922")?;

        let mut tokens = result.split_whitespace();
        assert_eq!(tokens.next(), Some("46.0000"));
        assert_eq!(tokens.next(), Some("10.0000"));
        let deviation: f64 = tokens.next().unwrap_or_default().parse().unwrap_or(f64::NAN);
        assert!(deviation < 1e-6);
        assert_eq!(tokens.next(), None);
        Ok(())
    }
}
