use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use brick_mosaic::{hex_to_pixel, upscale_to_width, BrickPalette, BrickPixelizer, GridSpec, Pixelizer};
use clap::{value_parser, Arg, ArgAction, Command};
use env_logger::Env;
use image::{imageops::FilterType, DynamicImage, ImageDecoder, ImageReader};
use log::{debug, info};

use minifb::{Key, KeyRepeat, Window, WindowOptions};

fn main() -> Result<(), Box<dyn Error>>{
    let matches = Command::new("brick-mosaic")
        .version("0.1")
        .about("Rebuild the input image out of toy bricks.")
        .arg(
            Arg::new("input")
                .help("Sets the input file to use")
                .required(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Sets an optional output file")
        )
        .arg(
            Arg::new("show")
            .help("Display the result in another window.")
            .long("show")
            .action(ArgAction::SetTrue)
        )
        .arg(Arg::new("cols")
            .long("cols")
            .help("Number of brick columns.")
            .default_value("48")
            .value_parser(value_parser!(u32).range(1..))
            .value_name("UINT"))
        .arg(Arg::new("rows")
            .long("rows")
            .help("Number of brick rows.")
            .default_value("48")
            .value_parser(value_parser!(u32).range(1..))
            .value_name("UINT"))
        .arg(Arg::new("width")
            .long("width")
            .help("Upscale the mosaic to at least this width.")
            .default_value("800")
            .value_parser(value_parser!(u32))
            .value_name("UINT"))
        .arg(Arg::new("stud_color")
            .long("stud-color")
            .help("Use a fixed stud color instead of lightening each brick.")
            .value_name("RRGGBB"))
        .arg(Arg::new("palette")
            .long("palette")
            .help("Replace the built-in brick colors with one RRGGBB per line.")
            .value_parser(value_parser!(PathBuf))
            .value_name("FILE"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Prints debug information verbosely.")
            .action(ArgAction::SetTrue))
        .get_matches();

    let verbose = matches.get_flag("verbose");
    env_logger::Builder::from_env(Env::default().default_filter_or(if verbose { "debug" } else { "info" })).init();

    let input_path = matches.get_one::<PathBuf>("input").ok_or("missing input file")?;
    let grid = GridSpec::new(
        *matches.get_one::<u32>("cols").unwrap_or(&48),
        *matches.get_one::<u32>("rows").unwrap_or(&48),
    )?;
    let target_width = *matches.get_one::<u32>("width").unwrap_or(&800);

    let palette = match matches.get_one::<PathBuf>("palette") {
        Some(path) => load_palette(path)?,
        None => BrickPalette::builtin().clone(),
    };
    let stud_color = matches
        .get_one::<String>("stud_color")
        .map(|hex| hex_to_pixel(hex))
        .transpose()?;

    info!("Using input file: {}", input_path.display());
    let img = open_upright(input_path)?;
    debug!("Input is {}x{}, grid {}x{}, {} brick colors", img.width(), img.height(), grid.cols, grid.rows, palette.len());

    let pixelizer = BrickPixelizer::new(palette, stud_color);
    let img_mosaic = pixelizer.pixelize(&img, grid)?;
    let img_mosaic = upscale_to_width(img_mosaic, target_width);
    info!("Mosaic size: {}x{}", img_mosaic.width(), img_mosaic.height());

    let output_path = match matches.get_one::<PathBuf>("output") {
        Some(path) => path.clone(),
        None => {
            let file_stem = input_path.file_stem().unwrap_or_default();
            let mut new_name = file_stem.to_os_string();
            new_name.push("_brick.png");
            input_path.with_file_name(new_name)
        }
    };

    img_mosaic.save(&output_path)?;
    info!("Mosaic saved to {}", output_path.display());

    if matches.get_flag("show") {
        show(&img, &img_mosaic, &output_path)?;
    }

    Ok(())
}

/// Decode an image and undo the rotation recorded in its EXIF data.
fn open_upright(path: &Path) -> Result<DynamicImage, Box<dyn Error>> {
    let mut decoder = ImageReader::open(path)?.with_guessed_format()?.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}

fn load_palette(path: &Path) -> Result<BrickPalette, Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read palette {}: {e}", path.display()))?;
    let palette = BrickPalette::from_text(&content)?;
    debug!("Loaded {} colors from {}", palette.len(), path.display());
    Ok(palette)
}

fn to_buffer(img: &DynamicImage) -> Vec<u32> {
    img.to_rgb8().pixels().map(|p| {
        let [r, g, b] = p.0;
        (r as u32) << 16 | (g as u32) << 8 | (b as u32) | 0xFF000000
    }).collect()
}

fn show(img: &DynamicImage, img_mosaic: &DynamicImage, output_path: &Path) -> Result<(), Box<dyn Error>>{
    println!("Press ESC to quit.");
    println!("Press ENTER to alternate between input and mosaic.");
    println!("Press S to save the mosaic to {}", output_path.display());
    let width = img_mosaic.width();
    let height = img_mosaic.height();
    let buffer_mosaic = to_buffer(img_mosaic);
    let buffer = to_buffer(&img.resize_exact(width, height, FilterType::Nearest));

    let mut window = Window::new(
        "Brick mosaic",
        width as usize,
        height as usize,
        WindowOptions::default(),
    )?;
    let mut current_buffer = &buffer_mosaic;
    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(current_buffer, width as usize, height as usize)?;
        if window.is_key_pressed(Key::Enter, KeyRepeat::No){
            current_buffer = if current_buffer == &buffer { &buffer_mosaic } else { &buffer };
        }
        if window.is_key_pressed(Key::S, KeyRepeat::No){
            img_mosaic.save(output_path)?;
            info!("Mosaic saved to {}", output_path.display());
        }
    }
    Ok(())
}
