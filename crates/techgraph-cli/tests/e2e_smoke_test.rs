use std::{fs, path::PathBuf};

use serde_json::Value;
use tempfile::tempdir;

use techgraph_cli::{Args, FormatArg, run};

/// Samples live at the workspace root, not inside the crate
fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
}

/// Collects all .plantuml and .json files from a directory
fn collect_sample_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && matches!(
                        path.extension().and_then(|s| s.to_str()),
                        Some("plantuml" | "json")
                    )
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

fn args_for(input: &PathBuf, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        format: FormatArg::Auto,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_samples = collect_sample_files(samples_dir());
    assert!(!valid_samples.is_empty(), "No valid samples found in samples/");

    let mut failed_samples = Vec::new();

    for sample_path in &valid_samples {
        let output_filename = format!(
            "{}.json",
            sample_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        match run(&args_for(sample_path, output_path.clone())) {
            Ok(()) => {
                let written = fs::read_to_string(&output_path).expect("Output should exist");
                let document: Value =
                    serde_json::from_str(&written).expect("Output should be valid JSON");
                assert!(
                    document["constraints"].is_array(),
                    "{}: missing constraints",
                    sample_path.display()
                );
            }
            Err(e) => failed_samples.push((sample_path.clone(), e)),
        }
    }

    if !failed_samples.is_empty() {
        eprintln!("\nValid samples that failed:");
        for (path, err) in &failed_samples {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid sample(s) failed unexpectedly", failed_samples.len());
    }
}

#[test]
fn e2e_smoke_test_error_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_samples = collect_sample_files(samples_dir().join("errors"));
    assert!(
        !error_samples.is_empty(),
        "No error samples found in samples/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for sample_path in &error_samples {
        let output_filename = format!(
            "error_{}.json",
            sample_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args_for(sample_path, output_path.clone())).is_ok() {
            unexpectedly_succeeded.push(sample_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{}: no output expected on failure",
            sample_path.display()
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError samples that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error sample(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_triangle_layout_document() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = samples_dir().join("triangle.json");
    let output_path = temp_dir.path().join("triangle.json");

    run(&args_for(&input, output_path.clone())).expect("Triangle sample should succeed");

    let written = fs::read_to_string(&output_path).expect("Output should exist");
    let document: Value = serde_json::from_str(&written).expect("Output should be valid JSON");

    let constraints = document["constraints"].as_array().unwrap();
    assert_eq!(constraints.len(), 4);
    assert_eq!(constraints[0]["type"], "alignment");
    assert_eq!(constraints[3]["offsets"].as_array().unwrap().len(), 1);
    assert_eq!(document["links"].as_array().unwrap().len(), 3);
    assert_eq!(document["links"][2]["strong"], false);
}

#[test]
fn e2e_config_file_applies() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[constraints]\ngap = 80.0\n").expect("Failed to write config");
    let input = samples_dir().join("triangle.json");
    let output_path = temp_dir.path().join("out.json");

    let mut args = args_for(&input, output_path.clone());
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("Run with config should succeed");

    let written = fs::read_to_string(&output_path).expect("Output should exist");
    let document: Value = serde_json::from_str(&written).expect("Output should be valid JSON");
    assert_eq!(document["constraints"][1]["gap"], 80.0);
}
