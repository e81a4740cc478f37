use mag_dipole::prelude::*;

fn main() -> Result<(), SimulationError> {
    // Two buried dipoles under a 200 m x 200 m survey at 5 m spacing.
    let sources = Points::new(vec![[80.0, 100.0, -25.0], [130.0, 90.0, -40.0]]);
    let grid = Grid2D::new([0.0, 0.0, 2.0], 5.0, 5.0, 40, 40);

    let result = MagneticSimulation::new(&sources, &grid, vec![5.0e3, 2.0e4], -62.11, -17.9)
        .with_earth_field(Orientation::new(-62.11, -17.9))
        .simulate()?;

    let (lo, hi) = result
        .tmi
        .iter()
        .fold((Scalar::MAX, Scalar::MIN), |(lo, hi), &t| (lo.min(t), hi.max(t)));
    println!("cells: {}", result.len());
    println!("tmi range: {lo:.3} .. {hi:.3} nT");
    if let Some(peak) = result.peak() {
        println!("peak |B|: {:.3} nT", peak.magnitude);
    }

    // Profile along the grid row through the first dipole.
    let row = 20;
    println!("x, tmi");
    for (x, t) in linspace(2.5, 197.5, 40).iter().zip(&result.tmi[row * 40..(row + 1) * 40]) {
        println!("{x:.1}, {t:.4}");
    }
    Ok(())
}
