use gravity_sim::presets;
use gravity_sim::sim::{relative_distances, velocity_sweep, SweepRange};
use gravity_sim::RunParams;

fn main() -> gravity_sim::Result<()> {
    let config = presets::inner_solar_system();
    let target = config.index_of("Mars").unwrap_or(2);
    let probe = config.index_of("Viking_Probe").unwrap_or(5);
    let params = RunParams::new(target, probe);

    println!("=== Probe launch sweep: closest approach to Mars ===\n");
    let range = SweepRange::new(8_000.0, 20_000.0, 1_000.0);
    let points = velocity_sweep(&config, &params, range, 30_000.0)?;

    println!("{:>8}  {:>14}  {:>10}  {:>8}", "vx", "distance (km)", "day", "rel");
    for (p, rel) in points.iter().zip(relative_distances(&points)) {
        println!(
            "{:>8.0}  {:>14.0}  {:>10.1}  {:>8.3}",
            p.vx,
            p.closest_distance.unwrap_or(f64::NAN) / 1000.0,
            p.approach_time.unwrap_or(f64::NAN) / 86_400.0,
            rel.unwrap_or(f64::NAN),
        );
    }

    Ok(())
}
