//! One-shot console report: runs a full forecast cycle and prints the
//! fixed-width tables to stdout.

use std::error::Error;

use gangamon_service::config::ServiceConfig;
use gangamon_service::context::ServiceContext;
use gangamon_service::pipeline;

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    // Diagnostics go to stderr so the report itself stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gangamon_service=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServiceConfig::load()?;
    let context = ServiceContext::load(&config)?;

    let (first, last) = context.history.date_range();
    eprintln!(
        "Loaded {} observations ({} to {}) and {} model artifacts for {}.",
        context.history.observations(),
        first,
        last,
        context.registry.len(),
        context.location,
    );

    let report = pipeline::run_report(&context)?;
    print!("{}", report.render_console());

    Ok(())
}
