use anyhow::Result;
use clap::Parser;
use otpwalk::config::WalkConfig;
use otpwalk::walk::walk;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "otpwalk")]
#[command(version)]
#[command(about = "Walk through an OTP generator looking for duplicates")]
struct Cli {
    /// OTP mode, either totp or hotp
    #[arg(long, default_value = "totp")]
    mode: String,

    /// Limit (iterations/seconds for hotp/totp)
    #[arg(long, default_value = "100000", allow_hyphen_values = true)]
    limit: String,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    // Validate before any walk state exists
    let config = WalkConfig::parse(&cli.mode, &cli.limit)?;
    let report = walk(&config)?;
    println!("\n{report}\n");

    Ok(())
}
