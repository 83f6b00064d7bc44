use anyhow::Result;
use clap::{Parser, Subcommand};
use echome::{console, App, AppContext, Config};
use tracing::info;

#[derive(Parser)]
#[command(name = "echome", version, about = "EchoVerse voice session simulator")]
struct Cli {
    /// Config file (extension optional); defaults apply if it is missing
    #[arg(short, long, default_value = "config/echome")]
    config: String,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Scripted walk through splash, sign-in, recording, call and rooms
    Demo,
    /// Read commands from stdin
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load_or_default(&cli.config)?;

    info!("{} v{}", cfg.app.name, env!("CARGO_PKG_VERSION"));
    info!("Theme: {:?}, user: {}", cfg.app.theme, cfg.identity.full_name);

    let app = App::new(AppContext::new(cfg));

    match cli.mode.unwrap_or(Mode::Shell) {
        Mode::Demo => console::run_demo(app).await,
        Mode::Shell => console::run_shell(app).await,
    }
}
