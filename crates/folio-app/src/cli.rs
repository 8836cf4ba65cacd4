use std::path::PathBuf;

use clap::Parser;
use folio_common::Section;

/// folio-backdrop: render an animated page background offscreen.
#[derive(Parser, Debug)]
#[command(name = "folio-backdrop", version, about)]
pub struct Args {
    /// Theme id (see --list). Unknown ids fall back to the default theme.
    #[arg(short = 't', long)]
    pub theme: Option<String>,

    /// Page section whose palette variant is used.
    #[arg(short = 's', long, value_parser = parse_section)]
    pub section: Option<Section>,

    /// Render a single static frame.
    #[arg(long)]
    pub reduced_motion: bool,

    /// Number of display refreshes to simulate.
    #[arg(short = 'n', long, default_value_t = 120)]
    pub frames: u32,

    /// Viewport size in CSS pixels, e.g. 1280x720.
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Device pixel ratio.
    #[arg(long)]
    pub pixel_ratio: Option<f64>,

    /// Write the last frame to this PNG file.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// List the available themes and exit.
    #[arg(long)]
    pub list: bool,

    /// Render shader themes on the GPU (needs the `gpu` feature).
    #[arg(long)]
    pub gpu: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

fn parse_section(value: &str) -> Result<Section, String> {
    Section::from_id(value).ok_or_else(|| {
        let known: Vec<&str> = Section::all().iter().map(|s| s.id()).collect();
        format!("unknown section '{value}' (expected one of: {})", known.join(", "))
    })
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let height: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if width == 0 || height == 0 {
        return Err("size must be non-zero".into());
    }
    Ok((width, height))
}
