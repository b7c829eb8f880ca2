use std::fs;

use assert_cmd::Command;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("boxport 0.3.0"));
}

#[test]
fn lists_formats() {
    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.arg("formats");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("darknet"))
        .stdout(predicates::str::contains("anno-yaml"))
        .stdout(predicates::str::contains("binary"));
}

// Convert subcommand tests

fn write_sample_labels(dir: &std::path::Path) {
    fs::create_dir_all(dir).expect("create labels dir");
    fs::write(dir.join("img_0.txt"), "0 0.05 0.1 0.03 0.08\n").expect("write label");
    fs::write(dir.join("img_1.txt"), "1 0.5 0.5 0.2 0.2\n").expect("write label");
}

#[test]
fn convert_darknet_to_yaml_reports_image_count() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let labels = temp.path().join("labels");
    write_sample_labels(&labels);
    let out = temp.path().join("annotations.yaml");

    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.args([
        "convert",
        "darknet",
        labels.to_str().unwrap(),
        "anno-yaml",
        out.to_str().unwrap(),
        "--kwargs",
        "image_width=1000",
        "image_height=500",
        "class_label_map=person,car",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Converted 2 images"));

    let text = fs::read_to_string(&out).expect("read output");
    assert!(text.contains("person"));
}

#[test]
fn convert_applies_stride_and_offset() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let labels = temp.path().join("labels");
    write_sample_labels(&labels);
    let out = temp.path().join("annotations.yaml");

    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.args([
        "convert",
        "darknet",
        labels.to_str().unwrap(),
        "anno-yaml",
        out.to_str().unwrap(),
        "--stride",
        "2",
        "--offset",
        "1",
        "--kwargs",
        "image_width=1000",
        "image_height=500",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Converted 1 images"));
}

#[test]
fn convert_creates_missing_output_directory() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let labels = temp.path().join("labels");
    write_sample_labels(&labels);
    let out = temp.path().join("out_labels");

    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.args([
        "convert",
        "darknet",
        labels.to_str().unwrap(),
        "darknet",
        out.to_str().unwrap(),
        "--kwargs",
        "image_width=1000",
        "image_height=500",
    ]);
    cmd.assert().success();

    assert!(out.is_dir());
    assert!(out.join("img_0.txt").is_file());
}

#[test]
fn convert_rejects_file_path_for_multi_file_output() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let labels = temp.path().join("labels");
    write_sample_labels(&labels);

    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.args([
        "convert",
        "darknet",
        labels.to_str().unwrap(),
        "darknet",
        temp.path().join("out.txt").to_str().unwrap(),
        "--kwargs",
        "image_width=1000",
        "image_height=500",
    ]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicates::str::contains("requires a directory"));
}

#[test]
fn convert_without_required_options_fails_fast() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let labels = temp.path().join("labels");
    write_sample_labels(&labels);
    let out = temp.path().join("annotations.yaml");

    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.args([
        "convert",
        "darknet",
        labels.to_str().unwrap(),
        "anno-yaml",
        out.to_str().unwrap(),
    ]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicates::str::contains("image_width"));
}

#[test]
fn convert_unknown_format_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.args([
        "convert",
        "pascalvoc",
        temp.path().to_str().unwrap(),
        "anno-yaml",
        temp.path().join("out.yaml").to_str().unwrap(),
    ]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicates::str::contains("Unknown format"));
}

#[test]
fn convert_unknown_kwarg_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let labels = temp.path().join("labels");
    write_sample_labels(&labels);

    let mut cmd = Command::cargo_bin("boxport").unwrap();
    cmd.args([
        "convert",
        "darknet",
        labels.to_str().unwrap(),
        "anno-yaml",
        temp.path().join("out.yaml").to_str().unwrap(),
        "--kwargs",
        "imagewidth=1000",
    ]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicates::str::contains("imagewidth"));
}
