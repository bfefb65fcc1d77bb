use {
    anyhow::{Context, Result},
    clap::Parser,
    indicatif::ProgressBar,
    meshmatrix::{GeneratorConfig, models::write_matrix},
    std::{
        io::{self, IsTerminal},
        path::PathBuf,
    },
    tracing::{Level, info},
    tracing_subscriber::FmtSubscriber,
};

fn validate_nodes(s: &str) -> std::result::Result<usize, String> {
    let val = s.parse::<usize>().map_err(|e| format!("{e}"))?;
    if val > 0 {
        Ok(val)
    } else {
        Err("Value must be at least 1".to_string())
    }
}

fn validate_sparsity(s: &str) -> std::result::Result<f64, String> {
    let val = s.parse::<f64>().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&val) {
        Ok(val)
    } else {
        Err("Value is not between 0..1".to_string())
    }
}

/// Generate a random node-to-node communication matrix for mesh simulation.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[arg(long, default_value_t = meshmatrix::NODES_DEFAULT, value_parser = validate_nodes, help = "Number of nodes (matrix is nodes x nodes)")]
    nodes: usize,

    #[arg(
        long,
        default_value = meshmatrix::OUTPUT_DEFAULT,
        value_parser = clap::value_parser!(PathBuf),
        help = "Output file (can be non-existent)"
    )]
    output: PathBuf,

    #[arg(
        long,
        num_args = 1..,
        default_values_t = meshmatrix::CHUNK_SIZES_DEFAULT,
        help = "Candidate chunk sizes"
    )]
    sizes: Vec<u64>,

    #[arg(long, default_value_t = meshmatrix::SPARSITY_DEFAULT, value_parser = validate_sparsity, help = "Probability a cell is left at zero (0..1)")]
    sparsity: f64,

    #[arg(long, help = "Mirror the upper triangle to get a symmetric matrix")]
    symmetric: bool,

    #[arg(long, help = "Print the generated matrix")]
    print: bool,

    #[arg(long, help = "Show a progress bar while filling rows")]
    progress: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn log_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::WARN }
}

// stdout carries only the matrix preview and the confirmation line.
fn setup_logging(verbose: bool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(verbose))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose)?;

    let config = GeneratorConfig {
        node_count: args.nodes,
        chunk_sizes: args.sizes,
        sparsity: args.sparsity,
        symmetric: args.symmetric,
        diagonal_zero: true,
    };

    let pb = if args.progress {
        ProgressBar::new(config.node_count as u64)
    } else {
        ProgressBar::hidden()
    };

    let matrix = meshmatrix::generate(&config, &mut rand::rng(), || pb.inc(1))
        .context("failed to generate matrix")?;
    pb.finish_and_clear();

    info!(
        transfers = matrix.transfers().count(),
        volume = %matrix.total_volume(),
        "matrix generated"
    );

    if args.print {
        println!("Generated communication matrix:");
        print!("{matrix}");
    }

    write_matrix(&matrix, &args.output)
        .with_context(|| format!("failed to save matrix to {}", args.output.display()))?;
    println!("Matrix saved to {}", args.output.display());
    Ok(())
}
