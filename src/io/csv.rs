use std::io::{self, Write};
use std::path::Path;

use crate::sim::TrackPoint;

/// Write recorded body tracks to CSV, one row per body per recorded step.
///
/// Columns: time, body, x, y
pub fn write_tracks<W: Write>(
    writer: &mut W,
    names: &[&str],
    tracks: &[TrackPoint],
) -> io::Result<()> {
    writeln!(writer, "time,body,x,y")?;

    for point in tracks {
        for (name, pos) in names.iter().zip(&point.positions) {
            writeln!(writer, "{:.1},{},{:.6e},{:.6e}", point.time, name, pos.x, pos.y)?;
        }
    }

    Ok(())
}

/// Write tracks to a CSV file at the given path.
pub fn write_tracks_file(
    path: impl AsRef<Path>,
    names: &[&str],
    tracks: &[TrackPoint],
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_tracks(&mut file, names, tracks)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn csv_output_has_header_and_rows() {
        let tracks = vec![
            TrackPoint {
                time: 0.0,
                positions: vec![Vector2::zeros(), Vector2::new(1.496e11, 0.0)],
            },
            TrackPoint {
                time: 3600.0,
                positions: vec![Vector2::zeros(), Vector2::new(1.496e11, 1.07e8)],
            },
        ];

        let mut buf = Vec::new();
        write_tracks(&mut buf, &["Sun", "Earth"], &tracks).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,body,x,y");
        assert_eq!(lines.len(), 5); // header + 2 steps x 2 bodies
        assert!(lines[2].starts_with("0.0,Earth,1.496000e11"));
        assert!(lines[4].starts_with("3600.0,Earth,"));
    }
}
