use tracing_subscriber::EnvFilter;
use qtunnel::{ run_evolution, PotentialParams, RunConfig };

const QUBITS: usize = 4; // grid of 2^4 points
const DT: f64 = 0.01;
const STEPS: usize = 200;
const A: f64 = 50.0; // well depth parameter
const B: f64 = 0.5; // well minima at ±B

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::new(QUBITS, DT, STEPS, PotentialParams { a: A, b: B })?;
    let output = run_evolution(&config)?;
    let plot = output.plot_data();

    println!("# tunneling after {} steps (dt = {}) from uniform superposition", STEPS, DT);
    println!("# state\tprobability\tscaled potential");
    for (label, p, v) in plot.rows() {
        println!("{}\t{:.12}\t{:.12}", label, p, v);
    }
    eprintln!("total probability: {:.15}", plot.probabilities.sum());
    Ok(())
}
