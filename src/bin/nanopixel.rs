//! nanopixel: Convert images into a 3D particle field and export it
//!
//! Usage:
//!   nanopixel photo.png --out model.ply
//!   nanopixel a.png b.jpg https://example.com/c.png --density 2 --svg view.svg

use nanopixel_rs::core::Camera;
use nanopixel_rs::io::{save_ply, save_svg, DEFAULT_PLY_FILE_NAME};
use nanopixel_rs::render::VectorProjector;
use nanopixel_rs::{synthesize, ImageSource, ParticleOptions, SamplingConfig, SettingsFile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_VIEW_WIDTH: u32 = 1920;
const DEFAULT_VIEW_HEIGHT: u32 = 1080;

/// Take the value following `flag`, or exit with a usage error.
fn value_for(args: &mut impl Iterator<Item = String>, flag: &str) -> String {
    match args.next() {
        Some(value) => value,
        None => {
            eprintln!("Error: missing value for {}", flag);
            std::process::exit(1);
        }
    }
}

fn parse_value<T: FromStr>(args: &mut impl Iterator<Item = String>, flag: &str) -> T {
    let raw = value_for(args, flag);
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Error: invalid value for {}: {}", flag, raw);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("nanopixel v{}", nanopixel_rs::VERSION);

    // Parse command-line arguments
    let mut args = std::env::args().skip(1);
    let mut sources: Vec<ImageSource> = Vec::new();
    let mut out_path = PathBuf::from(DEFAULT_PLY_FILE_NAME);
    let mut svg_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut camera_json: Option<PathBuf> = None;
    let mut density: Option<u32> = None;
    let mut depth: Option<f32> = None;
    let mut saturation: Option<f32> = None;
    let mut threshold: Option<u8> = None;
    let mut max_dimension: Option<u32> = None;
    let mut jitter: Option<f32> = None;
    let mut gap: Option<f32> = None;
    let mut width: Option<u32> = None;
    let mut height: Option<u32> = None;
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out_path = PathBuf::from(value_for(&mut args, "--out")),
            "--svg" => svg_path = Some(PathBuf::from(value_for(&mut args, "--svg"))),
            "--config" => config_path = Some(PathBuf::from(value_for(&mut args, "--config"))),
            "--camera-json" => {
                camera_json = Some(PathBuf::from(value_for(&mut args, "--camera-json")))
            }
            "--density" => density = Some(parse_value(&mut args, "--density")),
            "--depth" => depth = Some(parse_value(&mut args, "--depth")),
            "--saturation" => saturation = Some(parse_value(&mut args, "--saturation")),
            "--threshold" => threshold = Some(parse_value(&mut args, "--threshold")),
            "--max-dimension" => max_dimension = Some(parse_value(&mut args, "--max-dimension")),
            "--jitter" => jitter = Some(parse_value(&mut args, "--jitter")),
            "--gap" => gap = Some(parse_value(&mut args, "--gap")),
            "--width" => width = Some(parse_value(&mut args, "--width")),
            "--height" => height = Some(parse_value(&mut args, "--height")),
            "--seed" => seed = Some(parse_value(&mut args, "--seed")),
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(1);
            }
            source => sources.push(ImageSource::parse(source)),
        }
    }

    if sources.is_empty() {
        eprintln!("Error: no input images given");
        print_help();
        std::process::exit(1);
    }

    // Settings: file first, then individual flags on top
    let mut config = match &config_path {
        Some(path) => {
            println!("Loading settings from {:?}...", path);
            match SettingsFile::from_json_file(path) {
                Ok(settings) => settings.into_config(),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => SamplingConfig::from(&ParticleOptions::default()),
    };
    config.step = density.unwrap_or(config.step);
    config.depth_multiplier = depth.unwrap_or(config.depth_multiplier);
    config.saturation = saturation.unwrap_or(config.saturation);
    config.alpha_threshold = threshold.unwrap_or(config.alpha_threshold);
    config.max_dimension = max_dimension.unwrap_or(config.max_dimension);
    config.depth_jitter = jitter.unwrap_or(config.depth_jitter);
    config.gap = gap.unwrap_or(config.gap);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Synthesize
    println!(
        "Synthesizing {} image(s) (step {}, depth {}, saturation {}, threshold {})...",
        sources.len(),
        config.step,
        config.depth_multiplier,
        config.saturation,
        config.alpha_threshold
    );
    let cloud = match synthesize(sources, &config, &mut rng).await {
        Ok(cloud) => cloud,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Generated {} particles (footprint {:.0}×{:.0})",
        cloud.len(),
        cloud.width,
        cloud.height
    );
    if let Some((min, max)) = cloud.bounds() {
        println!("Bounds: min={:?}, max={:?}", min.as_slice(), max.as_slice());
    }

    // PLY export
    println!("Saving PLY to {:?}...", out_path);
    if let Err(e) = save_ply(&cloud, &out_path) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Optional SVG export
    if let Some(svg_path) = svg_path {
        let mut camera = match &camera_json {
            Some(path) => {
                println!("Loading camera from {:?}...", path);
                Camera::from_json_file(path).unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                })
            }
            None => Camera::viewer_default(DEFAULT_VIEW_WIDTH, DEFAULT_VIEW_HEIGHT),
        };
        if let Some(w) = width {
            camera.width = w;
        }
        if let Some(h) = height {
            camera.height = h;
        }

        println!(
            "Projecting to {}×{} SVG at {:?}...",
            camera.width, camera.height, svg_path
        );
        if let Err(e) = save_svg(&cloud, &camera, &VectorProjector::new(), &svg_path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    println!("Done!");
}

fn print_help() {
    println!(
        r#"nanopixel: Convert images into a 3D particle field

USAGE:
    nanopixel [OPTIONS] IMAGE...

IMAGES:
    File paths, http(s):// URLs or data:image/...;base64,... URIs.
    Multiple images are laid out side by side.

OPTIONS:
    --out PATH               PLY output path [default: nanopixel_model.ply]
    --svg PATH               Also project the cloud and write an SVG
    --config PATH            Particle options or sampling config as JSON file
    --density N              Sample every Nth pixel [default: 3]
    --depth F                Depth displacement strength [default: 150]
    --saturation F           Color saturation boost [default: 1.2]
    --threshold N            Drop pixels with alpha below N (0-255) [default: 10]
    --max-dimension N        Downscale images larger than N pixels [default: 600]
    --jitter F               Random depth jitter amplitude [default: 2.5]
    --gap F                  Gap between images [default: 60]
    --seed N                 Seed the depth jitter for reproducible output
    --camera-json PATH       Camera for SVG export (default: viewer start camera)
    --width N, --height N    SVG viewport size [default: 1920×1080]
    --help, -h               Print this help message

EXAMPLES:
    # Dense point cloud from one photo
    nanopixel photo.png --density 1 --out photo.ply

    # Two images, reproducible jitter, plus an SVG snapshot
    nanopixel left.png right.png --seed 7 --svg view.svg

SETTINGS JSON FORMAT (either shape, missing fields use defaults):
    {{ "size": 1.5, "density": 3, "depth": 150, "saturation": 1.2, "threshold": 10 }}
    {{ "step": 4, "depth_multiplier": 50, "saturation": 1.0, "alpha_threshold": 10,
       "max_dimension": 600, "gap": 60, "depth_jitter": 2.5 }}

CAMERA JSON FORMAT:
    {{
        "position": [0.0, 0.0, 600.0],
        "target": [0.0, 0.0, 0.0],
        "up": [0.0, 1.0, 0.0],
        "fov_y_degrees": 50.0,
        "near": 0.1,
        "far": 2000.0,
        "width": 1920,
        "height": 1080
    }}
"#
    );
}
