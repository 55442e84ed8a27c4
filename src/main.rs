use anyhow::Result;
use clap::Parser;
use order_calculator::cli::{init_tracing, Args, CliApp};

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let app = CliApp::new(&args.pricing)?;
    init_tracing(args.verbose, &app.config().log_level);
    tracing::debug!(
        "Configuration loaded for {} environment",
        app.config().environment
    );

    app.run(args.command)
}
