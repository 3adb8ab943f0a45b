use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use hickory_proto::rr::RecordType;
use tracing_subscriber::EnvFilter;

use strictns::batch::run_batch;
use strictns::config::ResolverConfig;
use strictns::io::{input::read_domain_list, output::write_report};
use strictns::report::print_answer_and_chain;
use strictns::resolver::Resolver;

/// Validate DNSSEC chains of trust for a hostname or a batch of hostnames.
#[derive(Parser)]
#[command(name = "strictns", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a batch measurement job over a list of hostnames.
    Measure {
        /// Newline-delimited list of hostnames to measure.
        #[arg(short, long, default_value = "test.csv")]
        inputlist: PathBuf,

        /// Directory the timestamped results CSV is written into.
        #[arg(short, long, default_value = "results")]
        outdir: PathBuf,

        /// Number of concurrent queries in flight. Defaults to 2x logical cores.
        #[arg(short, long)]
        parallelism: Option<usize>,
    },

    /// Run a single DNSSEC chain-of-trust check and print it.
    Query {
        /// Fully-qualified domain name to query.
        #[arg(short, long, default_value = "sudheesh.info.")]
        fqdn: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Measure { inputlist, outdir, parallelism } => run_measure(inputlist, outdir, parallelism).await,
        Command::Query { fqdn } => run_query(fqdn).await,
    }
}

async fn run_measure(inputlist: PathBuf, outdir: PathBuf, parallelism: Option<usize>) -> ExitCode {
    let domains = match read_domain_list(&inputlist) {
        Ok(domains) => domains,
        Err(e) => {
            eprintln!("failed to read {}: {e}", inputlist.display());
            return ExitCode::FAILURE;
        }
    };

    let workers = parallelism.unwrap_or_else(|| {
        std::thread::available_parallelism().map(|n| n.get() * 2).unwrap_or(4)
    });

    let resolver = Arc::new(Resolver::new(ResolverConfig::default().with_workers(workers)));
    let records = run_batch(resolver, domains, workers).await;

    match write_report(&records, &outdir) {
        Ok(path) => {
            println!("wrote {} records to {}", records.len(), path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to write report to {}: {e}", outdir.display());
            ExitCode::FAILURE
        }
    }
}

async fn run_query(fqdn: String) -> ExitCode {
    let resolver = Resolver::default();
    match resolver.strict_ns_query(&fqdn, RecordType::A).await {
        Ok((answer, chain)) => {
            print_answer_and_chain(&fqdn, "A", &answer, &chain);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            let (exists, valid, reason) = failure.error.classify();
            println!("{fqdn}: DNSSECExists={exists} DNSSECValid={valid} reason={reason}");
            if let Some(chain) = failure.chain_so_far {
                print_answer_and_chain(&fqdn, "A", &[], &chain);
            }
            ExitCode::SUCCESS
        }
    }
}
