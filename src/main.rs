use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use planet_map::app::MapState;
use planet_map::config::{MapConfig, MarkConfig};
use planet_map::error::MapError;
use planet_map::geo::{GeoPoint, ScreenPoint, Viewport};
use planet_map::raster;
use planet_map::resample::ResamplingMethod;
use planet_map::scene::RenderMode;
use planet_map::surface::{DrawRecorder, PixelSurface};

#[derive(clap::Parser)]
struct ClArgs {
    /// Surface width in pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Surface height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Equirectangular texture image for planet mode
    #[arg(short, long)]
    texture: Option<PathBuf>,

    /// Start in planet mode
    #[arg(long)]
    planet: bool,

    /// Override the resampling method (nearest, bilinear)
    #[arg(long, value_parser = parse_method)]
    method: Option<ResamplingMethod>,

    /// Mark as LAT,LON[,TEXT] in degrees. Repeatable.
    #[arg(long = "mark", value_parser = parse_mark)]
    marks: Vec<MarkConfig>,

    /// Click at X,Y in pixels. Repeatable.
    #[arg(long = "click", value_parser = parse_click)]
    clicks: Vec<ScreenPoint>,

    /// Write the rendered scene as PNG
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write the recorded draw commands as JSON
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn parse_method(s: &str) -> Result<ResamplingMethod, String> {
    ResamplingMethod::from_name(s).ok_or_else(|| format!("unknown resampling method '{s}'"))
}

fn parse_mark(s: &str) -> Result<MarkConfig, String> {
    let mut parts = s.splitn(3, ',');
    let mut number = |what: &str| -> Result<f64, String> {
        parts
            .next()
            .ok_or_else(|| format!("missing {what} in '{s}'"))?
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("bad {what} in '{s}': {e}"))
    };
    let latitude_deg = number("latitude")?;
    let longitude_deg = number("longitude")?;
    let text = parts.next().map(str::to_string);
    Ok(MarkConfig {
        latitude_deg,
        longitude_deg,
        text,
    })
}

fn parse_click(s: &str) -> Result<ScreenPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y: {e}"))?;
    Ok(ScreenPoint::new(x, y))
}

fn main() -> Result<(), MapError> {
    let args = ClArgs::parse();

    let tracing_subscriber = FmtSubscriber::builder()
        .with_max_level(match args.verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        })
        .finish();
    if tracing::subscriber::set_global_default(tracing_subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }

    let mut config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    if let Some(method) = args.method {
        config.raster.method = method;
    }

    let mut state = MapState::new(config, Viewport::new(args.width, args.height))?;

    for mark in &args.marks {
        state.add_mark_at(
            GeoPoint::from_degrees(mark.latitude_deg, mark.longitude_deg),
            mark.text.clone(),
        )?;
    }

    if let Some(path) = &args.texture {
        // A texture that fails to load leaves the map in graticule mode.
        if state.load_texture(path).is_ok() && args.planet {
            state.set_mode(RenderMode::Planet);
        }
    } else if args.planet {
        warn!("planet mode requested without a texture; drawing the graticule");
        state.set_mode(RenderMode::Planet);
    }

    for &at in &args.clicks {
        match state.click(at) {
            Ok(geo) => {
                let (lat, lon) = geo.to_degrees();
                println!("{:.3},{:.3} -> lat {lat:.6} lon {lon:.6}", at.x, at.y);
            }
            Err(e) => warn!(x = at.x, y = at.y, error = %e, "click not deprojected"),
        }
    }

    if let Some(path) = &args.out {
        let mut surface = PixelSurface::new(state.viewport());
        state.redraw(&mut surface)?;
        raster::save_png(surface.pixels(), path)?;
        info!(path = %path.display(), labels = surface.labels().len(), "wrote image");
    }

    if let Some(path) = &args.commands {
        let mut recorder = DrawRecorder::new(state.viewport());
        state.redraw(&mut recorder)?;
        fs::write(path, serde_json::to_string_pretty(&recorder.commands)?)?;
        info!(path = %path.display(), commands = recorder.commands.len(), "wrote draw commands");
    }

    Ok(())
}
