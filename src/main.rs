// main.rs
use anyhow::{Context, Result};
use clap::Parser;
use xsnoop::core::{CommandlineArgs, Settings, init_logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = CommandlineArgs::parse();
    init_logging().context("Failed to initialize logging")?;

    let settings = Settings::from_args(args).context("Failed to resolve settings")?;
    let exit_code = xsnoop::proxy::run(settings)
        .await
        .context("Failed to run X11 proxy")?;

    std::process::exit(exit_code);
}
