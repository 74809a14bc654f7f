use anyhow::Result;
use clap::Parser;
use level_thumb::config::{CONFIG_ENV, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Serves composited level thumbnails")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = CONFIG_ENV, default_value = "level-thumb.toml")]
    config: PathBuf,

    /// Address to listen on, overrides the config file
    #[arg(short, long)]
    listen: Option<String>,

    /// Assets directory, overrides the config file
    #[arg(short, long)]
    assets_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    level_thumb::init_logger();

    let args = Args::parse();
    let mut config = Config::load(&args.config)?;

    if let Some(listen) = args.listen {
        config = config.with_listen_addr(listen);
    }
    if let Some(dir) = args.assets_dir {
        config = config.with_assets_dir(dir);
    }

    level_thumb::server::serve(config).await
}
