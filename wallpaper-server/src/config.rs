//! Command-line options shared by the server and the render tool.

use std::path::PathBuf;

use clap::Args;

use crate::fonts::{FontSource, DEFAULT_FONT_URL};

#[derive(Args, Debug, Clone)]
pub struct FontArgs {
    #[arg(
        long,
        default_value = DEFAULT_FONT_URL,
        help = "URL of a TTF/OTF font used for captions"
    )]
    pub font_url: String,

    #[arg(
        long,
        conflicts_with = "system_fonts",
        help = "Load the caption font from a local file instead of the URL"
    )]
    pub font_file: Option<PathBuf>,

    #[arg(long, help = "Use fonts installed on this machine instead of the URL")]
    pub system_fonts: bool,
}

impl FontArgs {
    pub fn source(&self) -> FontSource {
        match (&self.font_file, self.system_fonts) {
            (Some(path), _) => FontSource::File(path.clone()),
            (None, true) => FontSource::System,
            (None, false) => FontSource::Url(self.font_url.clone()),
        }
    }
}

/// Initialize the fmt subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
