//! End-to-end tests for the enhancement orchestrator.
//!
//! Tests cover:
//! - Output names and sizes for both modes
//! - Re-running overwrites the comparison image
//! - The comparison shows the source and the pre-polish image
//! - Debug stage dumps, including a reused enhancer
//! - Failures leave the output directory untouched

mod common;

use common::*;

#[test]
fn test_natural_then_stylized() -> anyhow::Result<()> {
    let ws = create_workspace();
    let source = create_test_photo(&ws.input_dir, "photo.jpg", 100, 100);
    let enhancer = Enhancer::new().with_output_dir(&ws.output_dir);

    // 1. Natural run writes the enhanced image and the comparison
    let natural = enhancer.enhance(&source, Mode::Natural)?;
    assert_eq!(natural.enhanced_path, ws.output_dir.join("photo_Natural.jpg"));
    assert_eq!(natural.comparison_path, ws.output_dir.join("photo_compare.jpg"));
    assert_eq!(natural.source_size, (100, 100));
    assert_eq!(natural.enhanced_size, (150, 150));
    assert_eq!(dimensions_of(&natural.enhanced_path), (150, 150));
    assert_eq!(dimensions_of(&natural.comparison_path), (250, 150));

    let first_compare = std::fs::read(&natural.comparison_path)?;

    // 2. Stylized run adds its own output and replaces the comparison
    let stylized = enhancer.enhance(&source, Mode::Stylized)?;
    assert_eq!(stylized.enhanced_path, ws.output_dir.join("photo_Stylized.jpg"));
    assert_eq!(dimensions_of(&stylized.enhanced_path), (150, 150));
    assert_eq!(dimensions_of(&stylized.comparison_path), (250, 150));
    assert_ne!(std::fs::read(&stylized.comparison_path)?, first_compare);

    assert_eq!(
        file_names(&ws.output_dir),
        vec!["photo_Natural.jpg", "photo_Stylized.jpg", "photo_compare.jpg"]
    );

    Ok(())
}

#[test]
fn test_odd_dimensions_round_down() -> anyhow::Result<()> {
    let ws = create_workspace();
    let source = create_test_photo(&ws.input_dir, "wide.png", 61, 27);

    let artifacts = Enhancer::new()
        .with_output_dir(&ws.output_dir)
        .enhance(&source, Mode::Natural)?;

    assert_eq!(artifacts.enhanced_size, (91, 40));
    assert_eq!(dimensions_of(&artifacts.enhanced_path), (91, 40));
    // 61 + 91 wide, max(27, 40) tall
    assert_eq!(dimensions_of(&artifacts.comparison_path), (152, 40));

    Ok(())
}

#[test]
fn test_rgba_png_is_accepted() -> anyhow::Result<()> {
    let ws = create_workspace();
    let source = create_rgba_png(&ws.input_dir, "overlay.png", 40, 30);

    let artifacts = Enhancer::new()
        .with_output_dir(&ws.output_dir)
        .enhance(&source, Mode::Stylized)?;

    assert_eq!(artifacts.enhanced_path, ws.output_dir.join("overlay_Stylized.jpg"));
    assert_eq!(dimensions_of(&artifacts.enhanced_path), (60, 45));

    Ok(())
}

#[test]
fn test_missing_file_fails_without_output() {
    let ws = create_workspace();
    let missing = ws.input_dir.join("nope.jpg");

    let result = Enhancer::new()
        .with_output_dir(&ws.output_dir)
        .enhance(&missing, Mode::Natural);

    match result {
        Err(EnhanceError::Decode { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected a decode error, got {:?}", other),
    }
    assert!(file_names(&ws.output_dir).is_empty());
}

#[test]
fn test_non_image_fails_with_message() {
    let ws = create_workspace();
    let bogus = ws.input_dir.join("notes.png");
    std::fs::write(&bogus, "just text").unwrap();

    let err = Enhancer::new()
        .with_output_dir(&ws.output_dir)
        .enhance(&bogus, Mode::Stylized)
        .unwrap_err();

    assert!(
        err.to_string().contains("notes.png"),
        "Error should name the file, got: {}",
        err
    );
    assert!(file_names(&ws.output_dir).is_empty());
}

#[test]
fn test_comparison_shows_source_and_unpolished_result() -> anyhow::Result<()> {
    use image::imageops::crop_imm;
    use image_enhancer::filters::{UPSCALE_FACTOR, build_filter_pipeline, build_polish_pipeline};

    let ws = create_workspace();
    let source = create_smooth_photo(&ws.input_dir, "photo.png", 100, 100);
    let original = image::open(&source)?.to_rgb8();

    // 1. Run the stylized enhancement
    let artifacts = Enhancer::new()
        .with_output_dir(&ws.output_dir)
        .enhance(&source, Mode::Stylized)?;
    let compare = image::open(&artifacts.comparison_path)?.to_rgb8();
    assert_eq!(compare.dimensions(), (250, 150));

    // 2. Rebuild the two halves the comparison should contain
    let filtered = build_filter_pipeline(Mode::Stylized, UPSCALE_FACTOR).run(original.clone())?;
    let polished = build_polish_pipeline(Mode::Stylized).run(filtered.clone())?;

    // 3. Left is the untouched source, right the tinted image before polish
    let left = crop_imm(&compare, 0, 0, 100, 100).to_image();
    let right = crop_imm(&compare, 100, 0, 150, 150).to_image();

    let left_error = mean_abs_diff(&left, &original);
    let right_error = mean_abs_diff(&right, &filtered);
    let polished_gap = mean_abs_diff(&right, &polished);

    assert!(left_error < 3.0, "left half drifted from the source: {}", left_error);
    assert!(right_error < 3.0, "right half is not the filtered image: {}", right_error);
    assert!(
        polished_gap > right_error + 4.0,
        "right half looks polished: {} vs {}",
        polished_gap,
        right_error
    );

    // 4. Below the shorter source the canvas stays black
    let corner = compare.get_pixel(50, 140);
    assert!(corner.0.iter().all(|&c| c < 16), "expected black fill, got {:?}", corner);

    Ok(())
}

#[test]
fn test_debug_dump_has_every_stage() -> anyhow::Result<()> {
    let ws = create_workspace();
    let source = create_test_photo(&ws.input_dir, "photo.jpg", 24, 16);
    let debug_dir = ws.dir.path().join("stages");

    Enhancer::new()
        .with_output_dir(&ws.output_dir)
        .with_debug(&debug_dir)?
        .enhance(&source, Mode::Stylized)?;

    let run_dir = debug_dir.join("photo_Stylized");
    assert_eq!(
        file_names(&run_dir.join("filters")),
        vec![
            "00_input.png",
            "01_denoise.png",
            "02_white_balance.png",
            "03_gentle_sharpen.png",
            "04_upscale.png",
            "05_stylize_tint.png",
        ]
    );
    assert_eq!(
        file_names(&run_dir.join("polish")),
        vec!["00_input.png", "01_tonal_polish.png"]
    );

    Ok(())
}

#[test]
fn test_debug_enhancer_can_be_reused() -> anyhow::Result<()> {
    let ws = create_workspace();
    let source = create_test_photo(&ws.input_dir, "photo.jpg", 24, 16);
    let debug_dir = ws.dir.path().join("stages");

    let enhancer = Enhancer::new()
        .with_output_dir(&ws.output_dir)
        .with_debug(&debug_dir)?;

    // 1. Both modes run on the same enhancer
    enhancer.enhance(&source, Mode::Natural)?;
    enhancer.enhance(&source, Mode::Stylized)?;
    assert_eq!(file_names(&debug_dir), vec!["photo_Natural", "photo_Stylized"]);
    assert_eq!(file_names(&debug_dir.join("photo_Natural/filters")).len(), 5);
    assert_eq!(file_names(&debug_dir.join("photo_Stylized/filters")).len(), 6);

    // 2. Repeating a mode overwrites its stages
    enhancer.enhance(&source, Mode::Natural)?;
    assert_eq!(file_names(&debug_dir.join("photo_Natural/filters")).len(), 5);

    Ok(())
}
