use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn stringsfill_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("stringsfill"))
}

fn write_strings(root: &Path, lang: &str, name: &str, content: &str) {
    let dir = root.join(format!("{}.lproj", lang));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_strings(
        dir.path(),
        "en",
        "Localizable.strings",
        "/* Window */\n\"TITLE\" = \"Projects\";\n\"OPEN\" = \"Open\";\n\"CLOSE\" = \"Close\";\n",
    );
    write_strings(
        dir.path(),
        "fr",
        "Localizable.strings",
        "\"TITLE\" = \"Projets\";\n\"CLOSE\" = \"Fermer\";\n",
    );
    write_strings(dir.path(), "en", "Menu.strings", "\"FILE\" = \"File\";");
    dir
}

fn run(args: &[&str]) -> Output {
    stringsfill_cmd()
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_list() {
    let dir = project();
    let output = run(&["list", dir.path().to_str().unwrap()]);

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = stdout(&output);
    assert!(text.contains("Localizable.strings (source: en, 3 keys, UTF-8)"));
    assert!(text.contains("  fr: 2 translated, 1 missing"));
    assert!(text.contains("Menu.strings (source: en, 1 keys, UTF-8)"));
}

#[test]
fn test_list_empty_directory_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&["list", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No resources found"));
}

#[test]
fn test_missing() {
    let dir = project();
    let output = run(&[
        "missing",
        dir.path().to_str().unwrap(),
        "--file",
        "Localizable",
        "--lang",
        "fr",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "OPEN\n");
}

#[test]
fn test_export_keeps_source_order() {
    let dir = project();
    let output = run(&[
        "export",
        dir.path().to_str().unwrap(),
        "-f",
        "Localizable.strings",
        "-l",
        "fr",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\"TITLE\" = \"Projets\";\n\"CLOSE\" = \"Fermer\";\n"
    );
}

#[test]
fn test_copy_single_statement() {
    let dir = project();
    let output = run(&[
        "copy",
        dir.path().to_str().unwrap(),
        "-f",
        "Localizable",
        "-l",
        "fr",
        "-k",
        "CLOSE",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\"CLOSE\" = \"Fermer\";\n");
}

#[test]
fn test_remove_rewrites_file_alphabetically() {
    let dir = project();
    write_strings(
        dir.path(),
        "fr",
        "Localizable.strings",
        "\"TITLE\" = \"Projets\";\n\"OPEN\" = \"Ouvrir\";\n\"CLOSE\" = \"Fermer\";\n",
    );

    let output = run(&[
        "remove",
        dir.path().to_str().unwrap(),
        "-f",
        "Localizable",
        "-l",
        "fr",
        "-k",
        "OPEN",
    ]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written =
        fs::read_to_string(dir.path().join("fr.lproj").join("Localizable.strings")).unwrap();
    assert_eq!(written, "\"CLOSE\" = \"Fermer\";\n\"TITLE\" = \"Projets\";");
}

#[test]
fn test_remove_absent_key_leaves_file_untouched() {
    let dir = project();
    let path = dir.path().join("fr.lproj").join("Localizable.strings");
    let before = fs::read(&path).unwrap();

    let output = run(&[
        "remove",
        dir.path().to_str().unwrap(),
        "-f",
        "Localizable",
        "-l",
        "fr",
        "-k",
        "OPEN",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("nothing to remove"));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_unknown_resource_and_language() {
    let dir = project();
    let root = dir.path().to_str().unwrap();

    let output = run(&["export", root, "-f", "Nope", "-l", "fr"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Resource 'Nope' not found"));

    let output = run(&["export", root, "-f", "Localizable", "-l", "de"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Language 'de' not found"));
}

#[test]
fn test_translate_requires_api_key() {
    let dir = project();
    let config = dir.path().join("stringsfill.toml");
    fs::write(
        &config,
        "[oracle]\napi_key_env = \"STRINGSFILL_CLI_TEST_KEY_UNSET\"\n",
    )
    .unwrap();

    let output = stringsfill_cmd()
        .args([
            "translate",
            dir.path().to_str().unwrap(),
            "-f",
            "Localizable",
            "-l",
            "fr",
            "--config",
            config.to_str().unwrap(),
        ])
        .env_remove("STRINGSFILL_CLI_TEST_KEY_UNSET")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("STRINGSFILL_CLI_TEST_KEY_UNSET"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = project();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[layout").unwrap();

    let output = run(&[
        "list",
        dir.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot load"));
}

#[test]
fn test_show_marks_missing_translations() {
    let dir = project();
    let output = run(&[
        "show",
        dir.path().to_str().unwrap(),
        "-f",
        "Localizable",
        "-l",
        "fr",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "TITLE  Projects  ->  Projets\n\
         OPEN   Open  ->  [missing]\n\
         CLOSE  Close  ->  Fermer\n\
         3 keys, 2 translated, 1 missing\n"
    );
}

#[test]
fn test_translate_failing_first_call_leaves_file_untouched() {
    let dir = project();
    let fr_path = dir.path().join("fr.lproj").join("Localizable.strings");
    write_strings(
        dir.path(),
        "fr",
        "Localizable.strings",
        "/* keep me */\n\"TITLE\" = \"Projets\";\n\"CLOSE\" = \"Fermer\";\n",
    );
    let before = fs::read(&fr_path).unwrap();

    // Nothing listens on port 9, so the first request fails.
    let config = dir.path().join("stringsfill.toml");
    fs::write(
        &config,
        "[oracle]\napi_base = \"http://127.0.0.1:9/v1\"\napi_key_env = \"STRINGSFILL_CLI_TEST_KEY\"\ntimeout_secs = 5\n",
    )
    .unwrap();

    let output = stringsfill_cmd()
        .args([
            "translate",
            dir.path().to_str().unwrap(),
            "-f",
            "Localizable",
            "-l",
            "fr",
            "--config",
            config.to_str().unwrap(),
        ])
        .env("STRINGSFILL_CLI_TEST_KEY", "sk-test")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("translation of `OPEN` failed"), "{}", stderr);
    assert!(!stderr.contains("partial results saved"));
    assert_eq!(fs::read(&fr_path).unwrap(), before);
}
