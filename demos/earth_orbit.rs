use gravity_sim::physics::{circular_speed, kepler_period, SECONDS_PER_YEAR};
use gravity_sim::presets::{AU, EARTH_MASS, SUN_MASS};
use gravity_sim::{BodyConfig, RunParams, Simulation, SimulationConfigBuilder};

fn main() -> gravity_sim::Result<()> {
    println!("=== Earth around the Sun, Beeman integrator ===\n");

    let v = circular_speed(SUN_MASS, AU);
    let expected = kepler_period(SUN_MASS, AU) / SECONDS_PER_YEAR;

    let config = SimulationConfigBuilder::new(9_000, 3_600.0)
        .body(BodyConfig::new("Sun", SUN_MASS, [0.0, 0.0], [0.0, 0.0]))
        .body(BodyConfig::new("Earth", EARTH_MASS, [AU, 0.0], [0.0, v]))
        .build()?;

    let mut sim = Simulation::new(&config, &RunParams::new(0, 1))?;
    let (mut r_min, mut r_max) = (f64::INFINITY, 0.0_f64);
    while !sim.is_finished() {
        sim.step()?;
        let b = sim.bodies();
        let r = (b[1].position() - b[0].position()).norm();
        r_min = r_min.min(r);
        r_max = r_max.max(r);
    }

    let samples = sim.energy_samples();
    let e0 = samples[0].energy;
    let e1 = samples[samples.len() - 1].energy;

    println!("Orbital speed:    {:.1} m/s", v);
    println!("Kepler period:    {:.5} years", expected);
    match sim.bodies()[1].period() {
        Some(p) => println!("Measured period:  {:.5} years", p),
        None => println!("Measured period:  not reached"),
    }
    println!("Radius range:     {:.6} .. {:.6} AU", r_min / AU, r_max / AU);
    println!("Energy samples:   {}", samples.len());
    println!("Energy change:    {:.3e} %", (e0 - e1) / e0 * 100.0);

    Ok(())
}
