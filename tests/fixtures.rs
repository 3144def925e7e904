use assert_cmd::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use test_generator::test_resources;

// for f in test-files/toasts/*; do toastscan --no-color $f > tests/.fixtures/$(basename $f); done
#[test_resources("test-files/toasts/*")]
fn toast_calls_nocolor(file: &str) {
    let mut cmd = Command::cargo_bin("toastscan").unwrap();
    cmd.arg("--no-color").arg(file);

    let filename = file.split('/').next_back().unwrap();
    let mut expected_output_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    expected_output_path.push("tests/.fixtures");
    expected_output_path.push(filename);

    let expected_output = std::fs::read(expected_output_path).unwrap();

    cmd.assert().code(0).stdout(expected_output);
}

#[test_resources("test-files/toasts/*")]
fn toast_calls_json_matches_text(file: &str) {
    let mut text = Command::cargo_bin("toastscan").unwrap();
    let text_output = text.arg("--no-color").arg(file).assert().code(0).get_output().stdout.clone();
    let text_output = String::from_utf8(text_output).unwrap();

    let mut json = Command::cargo_bin("toastscan").unwrap();
    let json_output = json.arg("--json").arg(file).assert().code(0).get_output().stdout.clone();
    let sites: Vec<serde_json::Value> = serde_json::from_slice(&json_output).unwrap();

    let mut lines = text_output.lines();
    assert_eq!(
        lines.next(),
        Some(format!("Found {} toast instances.", sites.len()).as_str())
    );
    for (line, site) in lines.zip(&sites) {
        assert_eq!(
            line,
            format!(
                "[{}] {}:{} - {}",
                site["variant"].as_str().unwrap().to_uppercase(),
                site["file"].as_str().unwrap(),
                site["line"],
                site["args"].as_str().unwrap()
            )
        );
    }
}
