use anyhow::Result;
use clap::Parser;
use wallpaper_server::config::{init_tracing, FontArgs};
use wallpaper_server::{run, ServerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Calendar wallpaper web server")]
struct Args {
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    #[arg(short = 'b', long, default_value = "0.0.0.0")]
    bind_address: String,

    #[command(flatten)]
    fonts: FontArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    run(ServerConfig {
        port: args.port,
        bind_address: args.bind_address,
        font_source: args.fonts.source(),
    })
    .await
}
