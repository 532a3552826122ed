//! Plain-text scenario format.
//!
//! ```text
//! <iterations> <dt_seconds>
//! <name> <colour> <size> <mass_kg> <x_m> <y_m> <vx_m_s> <vy_m_s>
//! ...
//! ```
//!
//! Fields are whitespace separated; blank lines are ignored. Line numbers in
//! errors are 1-based.

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::scenario::{BodyConfig, SimulationConfig};

const BODY_FIELDS: usize = 8;

pub fn parse_config(text: &str) -> Result<SimulationConfig> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (header_line, header) = lines.next().ok_or(Error::MalformedConfig {
        line: 1,
        reason: "empty scenario".into(),
    })?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(malformed(
            header_line,
            format!("expected iterations and timestep, found {} fields", fields.len()),
        ));
    }
    let iterations: usize = field(header_line, "iterations", fields[0])?;
    let dt: f64 = field(header_line, "timestep", fields[1])?;
    if iterations == 0 {
        return Err(malformed(header_line, "iterations must be > 0".into()));
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(malformed(header_line, format!("timestep must be > 0, got {dt}")));
    }

    let mut bodies = Vec::new();
    let mut names = HashSet::new();
    for (n, line) in lines {
        let body = parse_body(n, line)?;
        if !names.insert(body.name.clone()) {
            return Err(malformed(n, format!("duplicate body name {}", body.name)));
        }
        bodies.push(body);
    }
    if bodies.is_empty() {
        return Err(malformed(header_line, "scenario defines no bodies".into()));
    }

    Ok(SimulationConfig { iterations, dt, bodies })
}

fn parse_body(line: usize, text: &str) -> Result<BodyConfig> {
    let f: Vec<&str> = text.split_whitespace().collect();
    if f.len() != BODY_FIELDS {
        return Err(malformed(
            line,
            format!("expected {BODY_FIELDS} fields, found {}", f.len()),
        ));
    }

    let body = BodyConfig {
        name: f[0].to_string(),
        colour: f[1].to_string(),
        size: field(line, "size", f[2])?,
        mass: field(line, "mass", f[3])?,
        position: [field(line, "x", f[4])?, field(line, "y", f[5])?],
        velocity: [field(line, "vx", f[6])?, field(line, "vy", f[7])?],
    };
    body.validate().map_err(|e| malformed(line, e.to_string()))?;
    Ok(body)
}

fn field<T: FromStr>(line: usize, what: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| malformed(line, format!("cannot parse {what} from '{raw}'")))
}

fn malformed(line: usize, reason: String) -> Error {
    Error::MalformedConfig { line, reason }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<SimulationConfig> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

/// Write a scenario in the same format `parse_config` reads.
pub fn write_config<W: Write>(writer: &mut W, config: &SimulationConfig) -> io::Result<()> {
    writeln!(writer, "{} {}", config.iterations, config.dt)?;
    for b in &config.bodies {
        writeln!(
            writer,
            "{} {} {} {} {} {} {} {}",
            b.name,
            b.colour,
            b.size,
            b.mass,
            b.position[0],
            b.position[1],
            b.velocity[0],
            b.velocity[1],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::presets;

    const SAMPLE: &str = "\
20000 3600
Sun yellow 2 1.989e30 0 0 0 0
Earth blue 0.5 5.972e24 149597870700 0 0 29780

Viking_Probe black 0.75 3000 149597970700 384400000 10650 30000
";

    #[test]
    fn parses_header_and_bodies() {
        let cfg = parse_config(SAMPLE).unwrap();
        assert_eq!(cfg.iterations, 20_000);
        assert_eq!(cfg.dt, 3_600.0);
        assert_eq!(cfg.bodies.len(), 3);
        assert_eq!(cfg.bodies[2].name, "Viking_Probe");
        assert_eq!(cfg.bodies[2].velocity, [10_650.0, 30_000.0]);
        assert_eq!(cfg.bodies[0].colour, "yellow");
    }

    #[test]
    fn wrong_arity_reports_line() {
        let text = "10 60\nSun yellow 2 1e30 0 0 0\n";
        match parse_config(text) {
            Err(Error::MalformedConfig { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("expected 8 fields"));
            }
            other => panic!("expected malformed config, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_number_reports_field() {
        let text = "10 60\nSun yellow 2 heavy 0 0 0 0\n";
        match parse_config(text) {
            Err(Error::MalformedConfig { line: 2, reason }) => assert!(reason.contains("mass")),
            other => panic!("expected malformed config, got {other:?}"),
        }
    }

    #[test]
    fn header_must_have_two_positive_numbers() {
        for header in ["10", "0 60", "10 -5", "ten 60"] {
            let text = format!("{header}\nA c 1 1 0 0 0 0");
            assert!(
                matches!(parse_config(&text), Err(Error::MalformedConfig { line: 1, .. })),
                "header '{header}' accepted"
            );
        }
    }

    #[test]
    fn non_positive_mass_is_malformed() {
        let text = "10 60\nA c 1 -4 0 0 0 0\n";
        assert!(matches!(parse_config(text), Err(Error::MalformedConfig { line: 2, .. })));
    }

    #[test]
    fn repeated_name_reports_second_line() {
        let text = "10 3600\nEarth a 1 1e30 0 0 0 0\n\nEarth b 1 1e24 1e11 0 0 1\n";
        match parse_config(text) {
            Err(Error::MalformedConfig { line, reason }) => {
                assert_eq!(line, 4);
                assert!(reason.contains("duplicate body name Earth"));
            }
            other => panic!("expected malformed config, got {other:?}"),
        }
    }

    #[test]
    fn empty_inputs_rejected() {
        assert!(parse_config("").is_err());
        assert!(parse_config("10 60\n\n").is_err());
    }

    #[test]
    fn written_config_reads_back() {
        let cfg = presets::inner_solar_system();
        let mut buf = Vec::new();
        write_config(&mut buf, &cfg).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(parse_config(&text).unwrap(), cfg);
    }
}
