#[cfg(feature = "cairo-backend")]
use std::fs::{self, File};
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_PATH: &str = "target/colorbar_example.png";
#[cfg(feature = "cairo-backend")]
const DEFAULT_GRID_SIZE: usize = 100;

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    output_path: PathBuf,
    grid_size: usize,
    colormap: chart_colorbar::core::Colormap,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

/// Renders an `x + y` ramp over `[-1, 1]^2` with an attached colorbar to PNG.
#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use chart_colorbar::attach_colorbar;
    use chart_colorbar::api::FigureEngine;
    use chart_colorbar::core::{FigureConfig, ValueGrid};
    use chart_colorbar::render::CairoRenderer;

    let _ = chart_colorbar::telemetry::init_default_tracing();
    let args = parse_args()?;

    let config = FigureConfig::default();
    let viewport = config.viewport();
    let width = i32::try_from(viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;
    let renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    let mut engine = FigureEngine::new(renderer, config).map_err(|err| err.to_string())?;

    let size = args.grid_size;
    let grid = ValueGrid::from_fn(size, size, |row, col| {
        unit_coordinate(row, size) + unit_coordinate(col, size)
    })
    .map_err(|err| err.to_string())?;
    let figure = engine.figure_mut();
    let axis = figure.add_subplot();
    let image = figure
        .imshow(axis, grid, args.colormap)
        .map_err(|err| err.to_string())?;
    let colorbar = attach_colorbar(figure, &image, &axis).map_err(|err| err.to_string())?;

    engine.render().map_err(|err| err.to_string())?;

    if let Some(parent) = args.output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create `{}`: {err}", parent.display()))?;
    }
    let mut file = File::create(&args.output_path)
        .map_err(|err| format!("failed to create `{}`: {err}", args.output_path.display()))?;
    engine
        .renderer()
        .write_png(&mut file)
        .map_err(|err| err.to_string())?;

    let (vmin, vmax) = engine
        .figure()
        .colorbar(colorbar)
        .map(|colorbar| colorbar.value_range())
        .ok_or_else(|| "colorbar disappeared from figure".to_owned())?;
    println!(
        "wrote {} ({size}x{size} grid, colorbar {vmin}..{vmax})",
        args.output_path.display()
    );
    Ok(())
}

/// Position of `index` among `count` evenly spaced samples of `[-1, 1]`.
#[cfg(feature = "cairo-backend")]
fn unit_coordinate(index: usize, count: usize) -> f64 {
    if count < 2 {
        return 0.0;
    }
    -1.0 + 2.0 * index as f64 / (count - 1) as f64
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut grid_size = DEFAULT_GRID_SIZE;
    let mut colormap = chart_colorbar::core::Colormap::Jet;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = PathBuf::from(value);
            }
            "--size" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --size".to_owned())?;
                grid_size = value
                    .parse::<usize>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| format!("invalid grid size `{value}`"))?;
            }
            "--cmap" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --cmap".to_owned())?;
                colormap = value
                    .parse::<chart_colorbar::core::Colormap>()
                    .map_err(|err| err.to_string())?;
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        output_path,
        grid_size,
        colormap,
    })
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "usage: render_colorbar_example [--output PATH] [--size N] [--cmap NAME]\n\
         defaults: --output {DEFAULT_OUTPUT_PATH} --size {DEFAULT_GRID_SIZE} --cmap jet"
    )
}
