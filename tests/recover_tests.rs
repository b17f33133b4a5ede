use sourcemap_recover::recover::engine::recover_file;
use sourcemap_recover::recover::inventory::Mode;
use sourcemap_recover::recover::{NameBy, RecoverOptions};
use sourcemap_recover::RecoverError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn options_without_formatter() -> RecoverOptions {
    RecoverOptions {
        formatter: None,
        ..Default::default()
    }
}

fn write_pair(dir: &Path, name: &str, minified: &str, map: &str) -> PathBuf {
    let input = dir.join(name);
    fs::write(&input, minified).unwrap();
    fs::write(dir.join(format!("{}.map", name)), map).unwrap();
    input
}

#[test]
fn test_verbatim_round_trip_is_byte_exact() {
    let dir = TempDir::new().unwrap();
    let input = write_pair(
        dir.path(),
        "app.js",
        "console.log(1)",
        r#"{"version":3,"sources":["util.ts"],"sourcesContent":["export const x = 1;\n"],"names":[],"mappings":"AAAA"}"#,
    );

    let report = recover_file(&input, &options_without_formatter()).unwrap();

    assert_eq!(report.mode, Mode::Verbatim);
    assert_eq!(report.written, vec![dir.path().join("util.ts")]);
    assert_eq!(report.failed, 0);

    let recovered = fs::read_to_string(dir.path().join("util.ts")).unwrap();
    assert_eq!(recovered, "export const x = 1;\n");
}

#[test]
fn test_verbatim_precedence_suppresses_reconstruction() {
    // Valid mappings are present, but any embedded text puts the whole file
    // in verbatim mode: no -recovered output may appear.
    let dir = TempDir::new().unwrap();
    let input = write_pair(
        dir.path(),
        "app.js",
        "var x=1;",
        r#"{"version":3,"sources":["util.ts"],"sourcesContent":["const x = 1;\n"],"names":[],"mappings":"AAAA"}"#,
    );

    let report = recover_file(&input, &options_without_formatter()).unwrap();
    assert_eq!(report.mode, Mode::Verbatim);

    for entry in fs::read_dir(dir.path()).unwrap() {
        let name = entry.unwrap().file_name().to_string_lossy().into_owned();
        assert!(
            !name.contains("-recovered"),
            "reconstruction output {} must not exist in verbatim mode",
            name
        );
    }
}

#[test]
fn test_mixed_inventory_extracts_only_embedded_entries() {
    let dir = TempDir::new().unwrap();
    let input = write_pair(
        dir.path(),
        "bundle.js",
        "let a=1;",
        r#"{"version":3,"sources":["a.js","b.js"],"sourcesContent":["let a = 1;\n",null],"names":[],"mappings":"AAAA"}"#,
    );

    let report = recover_file(&input, &options_without_formatter()).unwrap();

    assert_eq!(report.written, vec![dir.path().join("a")]);
    assert_eq!(
        fs::read_to_string(dir.path().join("a")).unwrap(),
        "let a = 1;\n"
    );
    assert!(!dir.path().join("b").exists());
}

#[test]
fn test_reconstruction_substitutes_names_and_drops_unmapped() {
    // Single mapping at generated column 9 carrying the name "add": the
    // name lands once, mapped columns keep their minified characters, and
    // the unmapped prefix contributes nothing.
    let dir = TempDir::new().unwrap();
    let input = write_pair(
        dir.path(),
        "calc.js",
        "function a(b){return b+1}",
        r#"{"version":3,"sources":["math.ts"],"names":["add"],"mappings":"SAAAA"}"#,
    );

    let report = recover_file(&input, &options_without_formatter()).unwrap();

    assert_eq!(report.mode, Mode::Reconstructed);
    let output = dir.path().join("math.ts-recovered.js");
    assert_eq!(report.written, vec![output.clone()]);
    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "add(b){return b+1}"
    );
}

#[test]
fn test_reconstruction_named_after_minified_file() {
    let dir = TempDir::new().unwrap();
    let input = write_pair(
        dir.path(),
        "calc.js",
        "function a(b){return b+1}",
        r#"{"version":3,"sources":["math.ts"],"names":["add"],"mappings":"SAAAA"}"#,
    );

    let options = RecoverOptions {
        name_by: NameBy::MinifiedFile,
        formatter: None,
        ..Default::default()
    };
    let report = recover_file(&input, &options).unwrap();

    assert_eq!(report.written, vec![dir.path().join("calc-recovered.js")]);
}

#[test]
fn test_missing_map_errors_per_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("app.js");
    fs::write(&input, "var a=1;").unwrap();

    let err = recover_file(&input, &options_without_formatter()).unwrap_err();
    assert!(matches!(err, RecoverError::MissingMap(_)));
}

#[test]
fn test_malformed_map_errors_per_file() {
    let dir = TempDir::new().unwrap();
    let input = write_pair(dir.path(), "app.js", "var a=1;", "{ this is not json");

    let err = recover_file(&input, &options_without_formatter()).unwrap_err();
    assert!(matches!(err, RecoverError::MalformedMap { .. }));
}

#[test]
fn test_empty_sources_reconstructs_to_zero_outputs() {
    let dir = TempDir::new().unwrap();
    let input = write_pair(
        dir.path(),
        "app.js",
        "var a=1;",
        r#"{"version":3,"sources":[],"names":[],"mappings":""}"#,
    );

    let report = recover_file(&input, &options_without_formatter()).unwrap();
    assert_eq!(report.mode, Mode::Reconstructed);
    assert!(report.written.is_empty());
}
