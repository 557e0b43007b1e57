use tracing_subscriber::EnvFilter;
use qtunnel::{ evolve, Backend, RunConfig };
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    for backend in [Backend::Dense, Backend::Fft] {
        let config = RunConfig::default().with_backend(backend)?;
        let step = config.time_step()?;
        let q0 = config.initial_state()?;
        let evo = evolve(&q0, &step, config.steps(), false)?;

        println!("# backend: {:?}", backend);
        println!("# step\tnorm²\tdrift");
        for rec in evo.diagnostics.iter() {
            println!("{}\t{:.15}\t{:.3e}", rec.step, rec.norm_squared, rec.drift);
        }
        info!(
            ?backend,
            max_drift = evo.max_drift(),
            max_step_drift = evo.max_step_drift(q0.norm_squared()),
            "evolution finished"
        );
    }
    Ok(())
}
