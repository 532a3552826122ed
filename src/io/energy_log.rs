use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::dynamics::EnergySample;
use crate::error::{Error, Result};

/// Write one `<time_seconds> <total_energy_joules>` line per sample.
pub fn write_energy_log<'a, W, I>(writer: &mut W, samples: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a EnergySample>,
{
    for s in samples {
        writeln!(writer, "{} {:e}", s.time, s.energy)?;
    }
    Ok(())
}

/// Create (or truncate) `path` and write the samples to it.
pub fn write_energy_log_file(path: impl AsRef<Path>, samples: &[EnergySample]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_energy_log(&mut file, samples)?;
    file.flush()
}

pub fn read_energy_log<R: BufRead>(reader: R) -> Result<Vec<EnergySample>> {
    let mut samples = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let bad = |reason: &str| Error::MalformedConfig {
            line: i + 1,
            reason: format!("energy log: {reason}"),
        };
        let mut fields = line.split_whitespace();
        let (Some(t), Some(e), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(bad("expected '<time> <energy>'"));
        };
        samples.push(EnergySample {
            time: t.parse().map_err(|_| bad("bad time"))?,
            energy: e.parse().map_err(|_| bad("bad energy"))?,
        });
    }
    Ok(samples)
}

pub fn read_energy_log_file(path: impl AsRef<Path>) -> Result<Vec<EnergySample>> {
    let file = std::fs::File::open(path)?;
    read_energy_log(BufReader::new(file))
}
