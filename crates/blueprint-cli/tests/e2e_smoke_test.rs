use std::fs;

use tempfile::tempdir;

use blueprint::BlueprintError;
use blueprint_cli::{Args, run};

fn args_for(output: &str) -> Args {
    Args {
        output: output.to_string(),
        config: None,
        scale: None,
        background: None,
        no_crop: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_svg_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("architecture_diagram.svg");

    run(&args_for(&output.to_string_lossy())).expect("Failed to render diagram");

    let svg = fs::read_to_string(&output).expect("Output should exist");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Orchestrator Agent"));
    assert!(svg.contains("Key Design Principles:"));
}

#[test]
fn e2e_png_output_with_overrides() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("architecture_diagram.png");

    let mut args = args_for(&output.to_string_lossy());
    args.scale = Some(0.5);
    args.background = Some("#fafafa".to_string());
    args.no_crop = true;
    run(&args).expect("Failed to render diagram");

    let bytes = fs::read(&output).expect("Output should exist");
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn e2e_invalid_scale_writes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("architecture_diagram.png");

    let mut args = args_for(&output.to_string_lossy());
    args.scale = Some(0.0);
    let err = run(&args).unwrap_err();

    assert!(matches!(err, BlueprintError::Config(_)));
    assert!(!output.exists());
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[export]\nformat = \"svg\"\n").unwrap();
    let output = temp_dir.path().join("diagram.png");

    let mut args = args_for(&output.to_string_lossy());
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("Failed to render diagram");

    assert!(fs::read_to_string(&output).unwrap().contains("<svg"));
}
