#[cfg(feature = "serde")]
use harris_core::Image;
#[cfg(feature = "serde")]
use harris_detect::DetectorConfig;

#[cfg(feature = "serde")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::time::Instant;

    println!("🔧 Harris Configuration Serialization Demo");
    println!("==========================================\n");

    let width = 320;
    let height = 240;
    let harris_image: Image = test_pattern(width, height);
    println!("📷 Image dimensions: {}x{}", width, height);

    // Demo 1: Create configurations
    println!("\n📋 Demo 1: Creating Configurations");

    let dense_config = DetectorConfig::dense_preset(width, height)
        .with_metadata("Dense Tracking", "Permissive settings for feature-rich scenes");

    let sparse_config = DetectorConfig::sparse_preset(width, height)
        .with_metadata("Sparse Tracking", "Strict settings keeping only the strongest corners");

    let custom_config = DetectorConfig::new(width, height)
        .with_metadata("Custom Config", "Default detector parameters with metadata");

    println!("   Created 3 configurations:");
    println!("   • {}", dense_config.summary());
    println!("   • {}", sparse_config.summary());
    println!("   • {}", custom_config.summary());

    // Demo 2: JSON serialization
    println!("\n📄 Demo 2: JSON Serialization");

    let dense_json = dense_config.to_json()?;
    println!("   Dense config JSON (first 200 chars):");
    println!("   {}", &dense_json[..200.min(dense_json.len())]);

    dense_config.save_json("dense_config.json")?;
    sparse_config.save_json("sparse_config.json")?;
    custom_config.save_json("custom_config.json")?;

    println!("   ✅ Saved 3 JSON configuration files");

    // Demo 3: TOML serialization
    println!("\n📋 Demo 3: TOML Serialization");

    let sparse_toml = sparse_config.to_toml()?;
    println!("   Sparse config TOML (first 300 chars):");
    println!("   {}", &sparse_toml[..300.min(sparse_toml.len())]);

    dense_config.save_toml("dense_config.toml")?;
    sparse_config.save_toml("sparse_config.toml")?;
    custom_config.save_toml("custom_config.toml")?;

    println!("   ✅ Saved 3 TOML configuration files");

    // Demo 4: Load and validate
    println!("\n🔍 Demo 4: Loading and Validation");

    let loaded_dense_json = DetectorConfig::load_json("dense_config.json")?;
    let loaded_sparse_toml = DetectorConfig::load_toml("sparse_config.toml")?;

    println!("   Loaded configurations:");
    println!("   • From JSON: {}", loaded_dense_json.summary());
    println!("   • From TOML: {}", loaded_sparse_toml.summary());

    loaded_dense_json.validate()?;
    loaded_sparse_toml.validate()?;
    println!("   ✅ All loaded configurations are valid");

    // Demo 5: Configuration-based detection
    println!("\n🎯 Demo 5: Configuration-Based Detection");

    let configs = vec![
        ("Dense (JSON)", loaded_dense_json),
        ("Sparse (TOML)", loaded_sparse_toml),
    ];

    for (name, config) in configs {
        let start = Instant::now();
        let detector = config.to_builder().build()?;
        let keypoints = detector.detect_keypoints(&harris_image)?;
        let elapsed = start.elapsed();

        println!("   • {}: {:.2?}, {} keypoints", name, elapsed, keypoints.len());
    }

    // Demo 6: Configuration comparison
    println!("\n📊 Demo 6: Configuration Comparison");

    let configs_to_compare = vec![
        ("Dense", DetectorConfig::dense_preset(width, height)),
        ("Sparse", DetectorConfig::sparse_preset(width, height)),
        ("Default", DetectorConfig::new(width, height)),
    ];

    println!(
        "   {:<10} {:<10} {:<10} {:<8} {:<8}",
        "Name", "MinResp", "Overlap", "Block", "MaxKps"
    );
    println!("   {}", "-".repeat(48));

    for (name, config) in &configs_to_compare {
        let max_kps = config
            .max_keypoints
            .map(|n| n.to_string())
            .unwrap_or_else(|| "all".to_string());

        println!(
            "   {:<10} {:<10.1} {:<10.2} {:<8} {:<8}",
            name, config.core.min_response, config.core.max_overlap, config.core.block_size, max_kps
        );
    }

    // Demo 7: Round-trip consistency
    println!("\n🔄 Demo 7: Round-trip Testing");

    let original = DetectorConfig::dense_preset(256, 256)
        .with_metadata("Round-trip Test", "Testing serialization consistency");

    let json_str = original.to_json()?;
    let from_json = DetectorConfig::from_json(&json_str)?;

    let toml_str = original.to_toml()?;
    let from_toml = DetectorConfig::from_toml(&toml_str)?;

    println!("   Round-trip test results:");
    println!("   • Original:  {}", original.summary());
    println!("   • From JSON: {}", from_json.summary());
    println!("   • From TOML: {}", from_toml.summary());

    assert_eq!(original.width, from_json.width);
    assert_eq!(original.width, from_toml.width);
    assert_eq!(original.core.min_response, from_json.core.min_response);
    assert_eq!(original.core.min_response, from_toml.core.min_response);
    assert_eq!(original.core.max_overlap, from_json.core.max_overlap);
    assert_eq!(original.core.max_overlap, from_toml.core.max_overlap);

    println!("   ✅ Round-trip serialization is consistent");

    println!("\n🎉 Configuration serialization demo completed successfully!");
    println!("📁 Generated files:");
    println!("   • dense_config.json / dense_config.toml");
    println!("   • sparse_config.json / sparse_config.toml");
    println!("   • custom_config.json / custom_config.toml");

    Ok(())
}

#[cfg(feature = "serde")]
fn test_pattern(width: usize, height: usize) -> Image {
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

#[cfg(not(feature = "serde"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔧 Harris Configuration Serialization Demo");
    println!("==========================================\n");
    println!("❌ This demo requires the 'serde' feature to be enabled.");
    println!("   Run with: cargo run --example config_serialization_demo --features=serde");
    Ok(())
}
