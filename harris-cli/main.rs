use harris_cli::{init_thread_pool, Config, HarrisKeypoint, HarrisPipeline};
use harris_detect::KeypointFilter;
use image::{GrayImage, ImageReader, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_circle_mut;
use std::path::Path;
use std::time::Instant;

struct Args {
    paths: Vec<String>,
    min_response: Option<f32>,
    max_overlap: Option<f32>,
    limit: Option<usize>,
    draw: bool,
}

fn print_usage() {
    eprintln!("Usage: harris [OPTIONS] <IMAGE>...");
    eprintln!();
    eprintln!("Detect Harris corners in one or more grayscale images.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --min-response <VALUE>   Response threshold on the 0-255 scale (default: 100)");
    eprintln!("  --max-overlap <VALUE>    Allowed keypoint overlap in [0, 1) (default: 0)");
    eprintln!("  --limit <N>              Keep only the N strongest keypoints per frame");
    eprintln!("  --draw                   Save an annotated copy next to each input");
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args {
        paths: Vec::new(),
        min_response: None,
        max_overlap: None,
        limit: None,
        draw: false,
    };

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--min-response" => {
                let value = raw.next().ok_or("--min-response requires a value")?;
                args.min_response = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --min-response value: {}", value))?,
                );
            }
            "--max-overlap" => {
                let value = raw.next().ok_or("--max-overlap requires a value")?;
                args.max_overlap = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --max-overlap value: {}", value))?,
                );
            }
            "--limit" => {
                let value = raw.next().ok_or("--limit requires a value")?;
                args.limit = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --limit value: {}", value))?,
                );
            }
            "--draw" => args.draw = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option: {}", flag)),
            _ => args.paths.push(arg),
        }
    }

    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    if args.paths.is_empty() {
        print_usage();
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(min_response) = args.min_response {
        config.min_response = min_response;
    }
    if let Some(max_overlap) = args.max_overlap {
        config.max_overlap = max_overlap;
    }

    // One global pool for the whole run; per-frame detectors share it
    init_thread_pool(config.n_threads)?;

    let mut pipeline: Option<HarrisPipeline> = None;
    let mut processed = 0usize;
    let mut total_keypoints = 0usize;
    let t0 = Instant::now();

    for path in &args.paths {
        match process_frame(path, &config, &args, &mut pipeline) {
            Ok(count) => {
                processed += 1;
                total_keypoints += count;
            }
            Err(e) => eprintln!("{}: {}", path, e),
        }
    }

    println!(
        "Processed {} of {} frames: {} keypoints in {:.2?}",
        processed,
        args.paths.len(),
        total_keypoints,
        t0.elapsed()
    );

    if processed == 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn process_frame(
    path: &str,
    config: &Config,
    args: &Args,
    pipeline: &mut Option<HarrisPipeline>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let img = ImageReader::open(path)?.decode()?.to_luma8();
    let (w, h) = img.dimensions();
    let width = w as usize;
    let height = h as usize;

    // Rebuild the detector when the frame size changes
    let current = match pipeline.take() {
        Some(p) if p.dimensions() == (width, height) => p,
        _ => HarrisPipeline::with_existing_pool(config.clone(), width, height)?,
    };

    let t0 = Instant::now();
    let mut keypoints = current.detect_keypoints(img.as_raw())?;
    let elapsed = t0.elapsed();

    if let Some(limit) = args.limit {
        KeypointFilter::retain_best(&mut keypoints, limit);
    }

    println!(
        "{}: {} keypoints in {:.2?} ({}x{})",
        path,
        keypoints.len(),
        elapsed,
        width,
        height
    );

    if args.draw {
        let out_path = annotated_name(path);
        save_annotated(img, &keypoints, &out_path)?;
        println!("  saved {}", out_path);
    }

    let count = keypoints.len();
    *pipeline = Some(current);
    Ok(count)
}

fn annotated_name(path: &str) -> String {
    let path = Path::new(path);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");

    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir
            .join(format!("{}_keypoints.png", stem))
            .display()
            .to_string(),
        _ => format!("{}_keypoints.png", stem),
    }
}

fn save_annotated(
    img: GrayImage,
    keypoints: &[HarrisKeypoint],
    out_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // Convert image to RGBA for drawing
    let mut output: RgbaImage = image::DynamicImage::ImageLuma8(img).into_rgba8();

    // Draw red circles at each keypoint, radius matching the neighborhood
    for kp in keypoints {
        draw_hollow_circle_mut(
            &mut output,
            (kp.x.round() as i32, kp.y.round() as i32),
            (kp.size / 2.0).round() as i32,
            Rgba([255, 0, 0, 255]),
        );
    }

    output.save(out_path)?;
    Ok(())
}
