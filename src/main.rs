use clap::Parser;
use munir::auth::AuthMethod;
use munir::core::config::{self, CliOverrides};
use munir::core::screen::ScreenId;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "munir", about = "Terminal multi-currency wallet with biometric gating")]
struct Args {
    /// Disable biometric authentication for sensitive screens
    #[arg(long)]
    no_gating: bool,

    /// Simulated scan duration in milliseconds
    #[arg(long, value_name = "MS")]
    auth_delay_ms: Option<u64>,

    /// Biometric method: fingerprint or face
    #[arg(long, value_name = "METHOD")]
    auth_method: Option<AuthMethod>,

    /// Screen to open on launch (e.g. dashboard, wallet)
    #[arg(long, value_name = "SCREEN")]
    start_screen: Option<ScreenId>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        Self {
            no_gating: args.no_gating,
            auth_delay_ms: args.auth_delay_ms,
            auth_method: args.auth_method,
            start_screen: args.start_screen,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to munir.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("munir.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let cli: CliOverrides = args.into();
    let resolved = config::resolve(&file_config, &cli).map_err(std::io::Error::other)?;

    log::info!(
        "Munir starting up (start: {}, gating: {}, method: {})",
        resolved.start_screen,
        resolved.biometric_gating,
        resolved.auth_method
    );

    munir::tui::run(resolved)
}
