mod error;
mod config;
mod input;
mod formatting;
mod cli;

fn main() {
    use tracing_subscriber::{FmtSubscriber, EnvFilter};

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .expect("failed to initialize global tracing subscriber");

    if let Err(err) = cli::start() {
        eprintln!("{}", err);

        std::process::exit(1);
    }
}
