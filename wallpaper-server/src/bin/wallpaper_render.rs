use std::path::PathBuf;

use anyhow::{Context, Result};
use calendar_core::{Clock, OutputFormat, RenderProfile, SystemClock, WallpaperQuery};
use clap::Parser;
use wallpaper_server::config::{init_tracing, FontArgs};
use wallpaper_server::{render_png, FontCache};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a calendar wallpaper to a file",
    long_about = "Render a calendar wallpaper to a PNG or SVG file using the same \
                  parameters as the /api/wallpaper endpoint."
)]
struct Args {
    #[arg(short, long, help = "Output file (.png or .svg)")]
    output: PathBuf,

    #[arg(short, long, default_value = "year", help = "Calendar mode: year or life")]
    mode: String,

    #[arg(long, help = "Image width in pixels [default: 1290]")]
    width: Option<u32>,

    #[arg(long, help = "Image height in pixels [default: 2796]")]
    height: Option<u32>,

    #[arg(long, default_value = "FFFFFF", help = "Dot color as hex")]
    fg: String,

    #[arg(long, default_value = "000000", help = "Background color as hex")]
    bg: String,

    #[arg(short, long, help = "Year to draw [default: current year]")]
    year: Option<i32>,

    #[arg(long, help = "Birthday as YYYY-MM-DD (life mode)")]
    birthday: Option<String>,

    #[arg(long, default_value_t = 80, help = "Life expectancy in years (life mode)")]
    life_expectancy: u32,

    #[arg(long, help = "Show percentage of life lived (life mode)")]
    show_stats: bool,

    #[arg(long, help = "png or svg [default: from the output extension]")]
    format: Option<String>,

    #[arg(long, help = "Print an install link rooted at this server URL")]
    base_url: Option<String>,

    #[command(flatten)]
    fonts: FontArgs,
}

impl Args {
    fn query(&self) -> WallpaperQuery {
        let format = self.format.clone().or_else(|| {
            self.output
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_string)
        });
        WallpaperQuery {
            mode: Some(self.mode.clone()),
            width: self.width.map(|w| w.to_string()),
            height: self.height.map(|h| h.to_string()),
            fg: Some(self.fg.clone()),
            bg: Some(self.bg.clone()),
            year: self.year.map(|y| y.to_string()),
            birthday: self.birthday.clone(),
            life_expectancy_years: Some(self.life_expectancy.to_string()),
            show_stats: Some(if self.show_stats { "1" } else { "0" }.to_string()),
            format,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let now = SystemClock.now();
    let request = args
        .query()
        .into_wallpaper(now)
        .context("Invalid wallpaper parameters")?;

    let svg = request
        .config
        .render_svg(request.size.to_canvas()?, RenderProfile::Wallpaper, now)?;

    let bytes = match request.format {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Png => {
            let fonts = FontCache::new(args.fonts.source())
                .get()
                .await
                .context("Failed to load caption font")?;
            render_png(&svg, request.size, fonts).context("Failed to render PNG")?
        }
    };

    tokio::fs::write(&args.output, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    tracing::info!(
        "Wrote {} {} wallpaper ({} bytes) to {}",
        request.size,
        request.config.mode().as_str(),
        bytes.len(),
        args.output.display()
    );

    if let Some(base_url) = &args.base_url {
        println!("{}", request.install_url(base_url));
    }

    Ok(())
}
