//! Runs the `modlift` binary against files in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn modlift(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modlift"))
        .current_dir(dir)
        .args(args)
        .env_remove("MODLIFT_IMPORT_DEFAULT")
        .env_remove("MODLIFT_IMPORT_ALL")
        .env_remove("MODLIFT_ENABLE_RESOLVE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run modlift")
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_transform_prints_to_stdout() {
    let dir = workspace(&[("index.js", "import a from \"./a\";\nexport default a;\n")]);
    let output = modlift(dir.path(), &["transform", "index.js"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "var _a = require(\"./a\");\n\
         var a = _$$_IMPORT_DEFAULT(_a);\n\
         var _default = a;\n\
         exports.default = _default;\n\
         Object.defineProperty(exports, \"__esModule\", { value: true });\n"
    );
}

#[test]
fn test_transform_writes_out_dir_and_metadata() {
    let dir = workspace(&[
        ("a.js", "export * from \"./b\";\nimport \"./polyfill\";\n"),
        ("plain.js", "console.log(1);\n"),
    ]);
    let output = modlift(
        dir.path(),
        &["-q", "transform", "a.js", "plain.js", "--out-dir", "build", "--metadata"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let build = dir.path().join("build");
    let code = fs::read_to_string(build.join("a.js")).unwrap();
    assert!(code.starts_with("var _b = require(\"./b\");\nrequire(\"./polyfill\");\n"));
    assert_eq!(fs::read_to_string(build.join("plain.js")).unwrap(), "console.log(1);\n");

    let meta: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(build.join("a.js.meta.json")).unwrap()).unwrap();
    assert_eq!(meta["path"], "a.js");
    assert_eq!(meta["isESModule"], true);
    assert_eq!(meta["dependencies"], serde_json::json!(["./b", "./polyfill"]));

    let meta: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(build.join("plain.js.meta.json")).unwrap())
            .unwrap();
    assert_eq!(meta["isESModule"], false);
}

#[test]
fn test_config_file_and_flags() {
    let dir = workspace(&[
        (
            "modlift.toml",
            "[transform]\nimport_default = \"fromConfig\"\nimport_all = \"nsFromConfig\"\n",
        ),
        ("m.js", "import d, * as ns from \"dep\";\n"),
    ]);
    let output = modlift(
        dir.path(),
        &["transform", "m.js", "--import-all", "nsFromFlag", "--resolve"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "var _dep = require(require.resolve(\"dep\"));\n\
         var d = fromConfig(_dep);\n\
         var ns = nsFromFlag(_dep);\n\
         Object.defineProperty(exports, \"__esModule\", { value: true });\n"
    );
}

#[test]
fn test_environment_overrides_config() {
    let dir = workspace(&[
        ("modlift.toml", "[transform]\nimport_default = \"fromConfig\"\n"),
        ("m.js", "import d from \"dep\";\n"),
    ]);
    let output = Command::new(env!("CARGO_BIN_EXE_modlift"))
        .current_dir(dir.path())
        .args(["transform", "m.js"])
        .env("MODLIFT_IMPORT_DEFAULT", "fromEnv")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("var d = fromEnv(_dep);\n"));
}

#[test]
fn test_check_reports_diagnostics_and_fails() {
    let dir = workspace(&[
        ("good.js", "export const a = 1;\n"),
        ("bad.js", "export default 1;\nexport default 2;\n"),
    ]);
    let output = modlift(dir.path(), &["check", "good.js", "bad.js"]);
    assert!(!output.status.success());

    assert!(stdout(&output).contains("good.js"));
    let errors = stderr(&output);
    assert!(errors.contains("bad.js:2:1: error: Duplicate default export"), "{errors}");
    assert!(errors.contains("  export default 2;\n  ^\n"), "{errors}");
}

#[test]
fn test_missing_file_does_not_stop_others() {
    let dir = workspace(&[("ok.js", "export {};\n")]);
    let output = modlift(dir.path(), &["transform", "missing.js", "ok.js"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read missing.js"));
    assert!(stdout(&output).contains("__esModule"));
}

#[test]
fn test_metadata_without_out_dir_prints_json_lines() {
    let dir = workspace(&[("x.js", "import y from \"y\";\n")]);
    let output = modlift(dir.path(), &["transform", "x.js", "--metadata"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "{\"path\":\"x.js\",\"isESModule\":true,\"dependencies\":[\"y\"]}\n"
    );
}
