mod common;

use assert_cmd::Command;
use common::node_project;
use predicates::prelude::*;
use std::fs;

fn sea_compile(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("sea_compile").unwrap();
    cmd.current_dir(dir).env_remove("SEA_PROJECT_DIR");
    cmd
}

#[test]
fn unsupported_platform_fails_before_touching_the_project() {
    let project = tempfile::tempdir().unwrap();
    node_project(project.path(), "demo", true);

    sea_compile(project.path())
        .args(["--platform", "freebsd"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Unsupported platform: freebsd. Supported platforms are: darwin, linux, win32.",
        ));

    assert!(!project.path().join("bin").exists());
    assert!(!project.path().join("dist").exists());
}

#[test]
fn missing_tools_fail_before_any_directory_changes() {
    let project = tempfile::tempdir().unwrap();
    node_project(project.path(), "demo", true);
    fs::create_dir_all(project.path().join("dist")).unwrap();
    fs::write(project.path().join("dist/bundle.js"), "kept").unwrap();

    sea_compile(project.path())
        .args(["--platform", "linux"])
        .env("PATH", "")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Required tool \"pnpm\""))
        .stderr(predicate::str::contains(
            "Please ensure you have pnpm and node installed.",
        ));

    assert_eq!(
        fs::read_to_string(project.path().join("dist/bundle.js")).unwrap(),
        "kept"
    );
    assert!(!project.path().join("bin").exists());
}

#[test]
fn missing_package_json_is_fatal() {
    let project = tempfile::tempdir().unwrap();

    sea_compile(project.path())
        .args(["--platform", "linux"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid package metadata"));

    assert!(!project.path().join("bin").exists());
}

#[test]
fn bundle_without_esbuild_fails_and_keeps_output() {
    let project = tempfile::tempdir().unwrap();
    fs::create_dir_all(project.path().join("dist")).unwrap();
    fs::write(project.path().join("dist/bundle.js"), "kept").unwrap();

    Command::cargo_bin("sea_bundle")
        .unwrap()
        .current_dir(project.path())
        .env_remove("SEA_PROJECT_DIR")
        .env("PATH", "")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Build failed:"));

    assert!(project.path().join("dist/bundle.js").exists());
}

#[cfg(unix)]
#[test]
fn bundle_runs_project_esbuild_from_a_relative_project_dir() {
    use std::os::unix::fs::PermissionsExt;

    let workspace = tempfile::tempdir().unwrap();
    let project = workspace.path().join("app");
    let bin = project.join("node_modules/.bin");
    fs::create_dir_all(&bin).unwrap();
    let esbuild = bin.join("esbuild");
    fs::write(
        &esbuild,
        "#!/bin/sh\nfor a in \"$@\"; do case \"$a\" in --outfile=*) f=\"${a#--outfile=}\"; mkdir -p \"$(dirname \"$f\")\"; echo bundled > \"$f\";; esac; done\n",
    )
    .unwrap();
    fs::set_permissions(&esbuild, fs::Permissions::from_mode(0o755)).unwrap();

    Command::cargo_bin("sea_bundle")
        .unwrap()
        .current_dir(workspace.path())
        .env_remove("SEA_PROJECT_DIR")
        .args(["--project-dir", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build completed successfully"));

    assert_eq!(
        fs::read_to_string(project.join("dist/bundle.js")).unwrap(),
        "bundled\n"
    );
}

#[test]
fn bundle_refuses_an_outfile_at_the_project_root() {
    let project = tempfile::tempdir().unwrap();
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::write(project.path().join("src/index.ts"), "console.log(1);").unwrap();
    fs::write(project.path().join("package.json"), r#"{ "name": "demo" }"#).unwrap();
    fs::create_dir_all(project.path().join("node_modules/.bin")).unwrap();
    fs::write(project.path().join("node_modules/.bin/esbuild"), "").unwrap();
    fs::write(project.path().join("node_modules/.bin/esbuild.cmd"), "").unwrap();

    Command::cargo_bin("sea_bundle")
        .unwrap()
        .current_dir(project.path())
        .env_remove("SEA_PROJECT_DIR")
        .args(["--outfile", "bundle.js"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Refusing to erase"));

    assert!(project.path().join("src/index.ts").is_file());
    assert!(project.path().join("package.json").is_file());
}

#[test]
fn compile_refuses_a_bin_dir_at_the_project_root() {
    let project = tempfile::tempdir().unwrap();
    node_project(project.path(), "demo", true);

    sea_compile(project.path())
        .args(["--platform", "linux", "--bin-dir", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Refusing to erase"));

    assert!(project.path().join("package.json").is_file());
    assert!(project.path().join("sea-config.json").is_file());
}
