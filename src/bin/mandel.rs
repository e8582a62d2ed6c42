extern crate clap;
extern crate mandelzoom;
extern crate num;

use clap::{App, Arg, ArgMatches, ErrorKind};
use mandelzoom::{
    render_sequence, ImageFileEncoder, ImageFormat, PathTemplate, RenderError, SequenceConfig,
    MAX_WORKERS,
};
use num::Complex;
use std::str::FromStr;

/// Accepts `s` if it parses as a `T` within `[low, high]`.  For floats
/// the bounds also shut out NaN and the infinities.
fn validate_number<T: FromStr + PartialOrd>(
    s: &str,
    (low, high): (T, T),
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    let n = T::from_str(s).map_err(|_| isnotanumber_err.to_string())?;
    if n >= low && n <= high {
        Ok(())
    } else {
        Err(isnotinrange_err.to_string())
    }
}

const FINITE: (f64, f64) = (std::f64::MIN, std::f64::MAX);

const XCENTER: &str = "xcenter";
const YCENTER: &str = "ycenter";
const SCALE: &str = "scale";
const FACTOR: &str = "factor";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const MAX: &str = "max";
const OUTPUT: &str = "output";
const PROCESSES: &str = "processes";
const FRAMES: &str = "frames";
const QUALITY: &str = "quality";
const QUIET: &str = "quiet";

const EXAMPLES: &str = "Some examples are:
    mandel -x -0.5 -y -0.5 -s 0.2
    mandel -x -.38 -y -.665 -s .05 -m 100
    mandel -x 0.286932 -y 0.014287 -s .0005 -m 1000
    mandel -x -0.746415 -y -0.184298 -m 6996 -p 8";

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("mandel")
        .version("0.1.0")
        .about("Renders a zoom into the Mandelbrot set as a numbered sequence of images")
        .after_help(EXAMPLES)
        .arg(
            Arg::with_name(XCENTER)
                .long(XCENTER)
                .short("x")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0")
                .validator(|s| {
                    validate_number(
                        &s,
                        FINITE,
                        "Could not parse X coordinate",
                        "X coordinate must be a finite number",
                    )
                })
                .help("X coordinate of image center point"),
        )
        .arg(
            Arg::with_name(YCENTER)
                .long(YCENTER)
                .short("y")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0")
                .validator(|s| {
                    validate_number(
                        &s,
                        FINITE,
                        "Could not parse Y coordinate",
                        "Y coordinate must be a finite number",
                    )
                })
                .help("Y coordinate of image center point"),
        )
        .arg(
            Arg::with_name(SCALE)
                .long(SCALE)
                .short("s")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("4")
                .validator(|s| {
                    validate_number(
                        &s,
                        FINITE,
                        "Could not parse scale",
                        "Scale must be a finite number",
                    )
                })
                .help("Scale of the first frame in Mandelbrot coordinates (X-axis)"),
        )
        .arg(
            Arg::with_name(FACTOR)
                .long(FACTOR)
                .short("f")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.85")
                .validator(|s| {
                    validate_number(
                        &s,
                        FINITE,
                        "Could not parse zoom factor",
                        "Zoom factor must be a finite number",
                    )
                })
                .help("Scale multiplier from one frame to the next; below 1 zooms in"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("W")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_number(
                        &s,
                        (1, 65_535),
                        "Could not parse image width",
                        "Image width must be between 1 and 65535",
                    )
                })
                .help("Width of the image in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .short("H")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_number(
                        &s,
                        (1, 65_535),
                        "Could not parse image height",
                        "Image height must be between 1 and 65535",
                    )
                })
                .help("Height of the image in pixels"),
        )
        .arg(
            Arg::with_name(MAX)
                .long(MAX)
                .short("m")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_number(
                        &s,
                        (0, u32::max_value()),
                        "Could not parse iteration count",
                        "Iteration count is too large",
                    )
                })
                .help("The maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("mandel%d.jpg")
                .validator(|s| PathTemplate::parse(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Output file template; %d is replaced by the frame number"),
        )
        .arg(
            Arg::with_name(PROCESSES)
                .long(PROCESSES)
                .short("p")
                .takes_value(true)
                .default_value("4")
                .validator(|s| {
                    validate_number(
                        &s,
                        (1, MAX_WORKERS),
                        "Could not parse worker count",
                        &format!("Worker count must be between 1 and {}", MAX_WORKERS),
                    )
                })
                .help("Number of workers to split the frames among"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .long(FRAMES)
                .short("n")
                .takes_value(true)
                .default_value("50")
                .validator(|s| {
                    validate_number(
                        &s,
                        (1, usize::max_value()),
                        "Could not parse frame count",
                        "Frame count must be at least 1",
                    )
                })
                .help("Number of frames in the zoom"),
        )
        .arg(
            Arg::with_name(QUALITY)
                .long(QUALITY)
                .takes_value(true)
                .default_value("75")
                .validator(|s| {
                    validate_number(
                        &s,
                        (1u8, 100u8),
                        "Could not parse JPEG quality",
                        "JPEG quality must be between 1 and 100",
                    )
                })
                .help("JPEG quality"),
        )
        .arg(
            Arg::with_name(QUIET)
                .long(QUIET)
                .short("q")
                .help("Don't print a status line for each frame"),
        )
}

/// Help ends the run without rendering anything, and with a failing
/// status.  Version has already been printed by clap and exits cleanly.
fn args<'a>() -> ArgMatches<'a> {
    match app().get_matches_safe() {
        Ok(matches) => matches,
        Err(e) => match e.kind {
            ErrorKind::VersionDisplayed => std::process::exit(0),
            ErrorKind::HelpDisplayed => {
                println!("{}", e.message);
                std::process::exit(1);
            }
            _ => {
                eprintln!("{}", e.message);
                std::process::exit(1);
            }
        },
    }
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, RenderError> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| RenderError::InvalidConfig(format!("could not parse --{}", name)))
}

fn config(matches: &ArgMatches) -> Result<SequenceConfig, RenderError> {
    let template = PathTemplate::parse(matches.value_of(OUTPUT).unwrap_or("mandel%d.jpg"))?;
    if ImageFormat::from_path(&template.render(0)).is_none() {
        return Err(RenderError::UnsupportedFormat(template.render(0)));
    }
    let config = SequenceConfig {
        template,
        center: Complex::new(value(matches, XCENTER)?, value(matches, YCENTER)?),
        scale: value(matches, SCALE)?,
        decay: value(matches, FACTOR)?,
        width: value(matches, WIDTH)?,
        height: value(matches, HEIGHT)?,
        max_iterations: value(matches, MAX)?,
        workers: value(matches, PROCESSES)?,
        frames: value(matches, FRAMES)?,
        quiet: matches.is_present(QUIET),
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = args();
    let config = match config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mandel: {}", e);
            std::process::exit(1);
        }
    };
    if !config.template.has_placeholder() {
        eprintln!("mandel: warning: output template has no %d; every frame will overwrite the last");
    }
    let encoder = match value(&matches, QUALITY) {
        Ok(quality) => ImageFileEncoder::with_quality(quality),
        Err(_) => ImageFileEncoder::default(),
    };

    match render_sequence(&config, &encoder) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(report) => {
            if !report.succeeded() {
                for failure in report.failures() {
                    eprintln!("Render failure: {}", failure);
                }
                std::process::exit(1);
            }
        }
    }
}
