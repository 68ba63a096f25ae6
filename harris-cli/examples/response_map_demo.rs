use harris_cli::{Config, HarrisPipeline};
use harris_core::Image;
use image::{GrayImage, ImageReader};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🗺️  Harris Response Map Demo");
    println!("============================\n");

    let (img, width, height) = load_input()?;

    let pipeline = HarrisPipeline::new(Config::default(), width, height)?;

    let t0 = Instant::now();
    let map = pipeline.response_map(&img)?;
    let elapsed = t0.elapsed();

    println!(
        "⏱️  Computed {}x{} response map in {:.2?}",
        map.width(),
        map.height(),
        elapsed
    );

    // Responses are already normalized to the 0-255 range
    let pixels: Vec<u8> = map.values().iter().map(|&v| v.round() as u8).collect();
    let out = GrayImage::from_raw(width as u32, height as u32, pixels)
        .ok_or("Failed to build output image")?;
    out.save("harris_response_map.png")?;
    println!("💾 Saved: harris_response_map.png");

    let min_response = pipeline.config().min_response;
    let above = map.values().iter().filter(|&&v| v > min_response).count();
    println!(
        "📊 {} of {} pixels above threshold {:.0}",
        above,
        map.values().len(),
        min_response
    );

    let keypoints = pipeline.detect_keypoints(&img)?;
    println!("🎯 {} keypoints after suppression", keypoints.len());

    Ok(())
}

fn load_input() -> Result<(Image, usize, usize), Box<dyn std::error::Error>> {
    if let Some(path) = std::env::args().nth(1) {
        let img = ImageReader::open(&path)?.decode()?.to_luma8();
        let (w, h) = img.dimensions();
        println!("📷 Processing {}: {}x{}", path, w, h);
        return Ok((img.into_raw(), w as usize, h as usize));
    }

    let width = 320;
    let height = 240;
    println!("📷 No image given, using a synthetic {}x{} test pattern", width, height);

    let mut img = vec![40u8; width * height];
    for y in 0..height {
        for x in 0..width {
            if (x / 32 + y / 32) % 2 == 0 {
                img[y * width + x] = 210;
            }
        }
    }

    Ok((img, width, height))
}
