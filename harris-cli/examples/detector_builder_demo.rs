use harris_core::{Image, Keypoint};
use harris_detect::DetectorBuilder;
use image::{ImageReader, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_circle_mut;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🎯 Harris DetectorBuilder API Demo");
    println!("==================================\n");

    let (harris_image, width, height) = load_input()?;

    // Demo 1: Dense preset (permissive threshold, tolerant overlap)
    println!("\n✨ Demo 1: Dense Preset");
    run_detection_demo(
        DetectorBuilder::new(width, height).preset_dense(),
        &harris_image,
        "dense",
    )?;

    // Demo 2: Sparse preset (strict threshold, capped output)
    println!("\n🌟 Demo 2: Sparse Preset");
    run_detection_demo(
        DetectorBuilder::new(width, height).preset_sparse(),
        &harris_image,
        "sparse",
    )?;

    // Demo 3: Custom configuration
    println!("\n⚙️  Demo 3: Custom Configuration");
    run_detection_demo(
        DetectorBuilder::new(width, height)
            .block_size(3)
            .harris_k(0.06)
            .min_response(80.0)
            .max_overlap(0.25)
            .retain_best(200)
            .threads(4),
        &harris_image,
        "custom",
    )?;

    // Demo 4: Threshold sweep
    println!("\n⏱️  Demo 4: Threshold Sweep");
    threshold_sweep(&harris_image, width, height)?;

    println!("\n🎉 All demos completed successfully!");
    println!("Check the generated images: harris_keypoints_*.png");

    Ok(())
}

/// Load the image given on the command line, or fall back to a synthetic
/// corner-rich test pattern
fn load_input() -> Result<(Image, usize, usize), Box<dyn std::error::Error>> {
    if let Some(path) = std::env::args().nth(1) {
        let img = ImageReader::open(&path)
            .map_err(|e| format!("Failed to open image: {}", e))?
            .decode()
            .map_err(|e| format!("Failed to decode image: {}", e))?
            .to_luma8();
        let (w, h) = img.dimensions();
        println!("📷 Processing {}: {}x{}", path, w, h);
        return Ok((img.into_raw(), w as usize, h as usize));
    }

    let width = 320;
    let height = 240;
    println!("📷 No image given, using a synthetic {}x{} test pattern", width, height);
    Ok((synthetic_corners(width, height), width, height))
}

/// Checkerboard pattern with strong corners at every cell junction
fn synthetic_corners(width: usize, height: usize) -> Image {
    let mut img = vec![40u8; width * height];
    for y in 0..height {
        for x in 0..width {
            if (x / 32 + y / 32) % 2 == 0 {
                img[y * width + x] = 210;
            }
        }
    }
    img
}

fn run_detection_demo(
    builder: DetectorBuilder,
    img: &Image,
    name: &str,
) -> Result<(), harris_detect::HarrisError> {
    // Print configuration summary
    println!("   Config: {}", builder.summary());

    // Build the detector
    let configured = builder.build()?;

    // Time the detection
    let start = Instant::now();
    let keypoints = configured.detect_keypoints(img)?;
    let elapsed = start.elapsed();

    println!("   ⏱️  Time: {:.2?}", elapsed);
    println!("   🎯 Detected {} keypoints", keypoints.len());

    // Keypoint density metric
    let (width, height) = configured.dimensions();
    let density = keypoints.len() as f32 / (width * height) as f32 * 10000.0; // per 10k pixels
    println!("   📊 Density: {:.2} keypoints per 10k pixels", density);

    // Visualize and save
    let filename = format!("harris_keypoints_{}.png", name);
    if let Err(e) = save_keypoint_visualization(img, &keypoints, &filename, configured.dimensions()) {
        println!("   ⚠️  Warning: Failed to save visualization: {}", e);
    } else {
        println!("   💾 Saved: {}", filename);
    }

    Ok(())
}

fn threshold_sweep(
    img: &Image,
    width: usize,
    height: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("   {:<12} {:<12} {:<10}", "Threshold", "Time", "Keypoints");
    println!("   {}", "-".repeat(36));

    for min_response in [60.0, 100.0, 140.0, 180.0] {
        let configured = DetectorBuilder::new(width, height)
            .min_response(min_response)
            .build()?;

        let start = Instant::now();
        let keypoints = configured.detect_keypoints(img)?;
        let elapsed = start.elapsed();

        println!(
            "   {:<12.0} {:<12.2?} {:<10}",
            min_response,
            elapsed,
            keypoints.len()
        );
    }

    Ok(())
}

fn save_keypoint_visualization(
    img: &Image,
    keypoints: &[Keypoint],
    filename: &str,
    (width, height): (usize, usize),
) -> Result<(), Box<dyn std::error::Error>> {
    let luma_img = image::GrayImage::from_raw(width as u32, height as u32, img.clone())
        .ok_or("Failed to create image from raw data")?;

    // Convert to RGBA for drawing
    let mut output: RgbaImage = image::DynamicImage::ImageLuma8(luma_img).into_rgba8();

    for kp in keypoints {
        draw_hollow_circle_mut(
            &mut output,
            (kp.x.round() as i32, kp.y.round() as i32),
            (kp.size / 2.0).round() as i32,
            Rgba([255, 0, 0, 255]),
        );
    }

    output.save(filename)?;
    Ok(())
}
