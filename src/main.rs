use laplace_rs::direct::solve_laplace_direct;
use laplace_rs::report::solve_with_summary;
use laplace_rs::{DirichletBoundary, Grid2D, Method, SolverConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 1 m x 1 m plate, 20 x 20 nodes
    let grid = Grid2D::uniform(20, 20, 1.0, 1.0)?;
    let bcs = DirichletBoundary::reference();
    let initial = bcs.initial_field(&grid, 0.0)?;

    let exact = solve_laplace_direct(&initial)?;

    for method in [Method::Relaxation, Method::Adi] {
        let config = SolverConfig::with_method(method);
        let (outcome, summary) = solve_with_summary(initial.clone(), &config)?;
        let max_error = (&outcome.result().field - &exact).amax();
        info!("{}: max deviation from direct solve {:.3e}", method.name(), max_error);
        println!("{}", summary.to_json_pretty()?);
    }

    Ok(())
}
