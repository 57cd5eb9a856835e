mod common;

use common::fake_toolchain;
use node_sea_bundler::{
    PackagerSettings, Platform, SettingsBuilder,
    metadata::AppMetadata,
    pipeline::{PlatformStepTable, StepAction, build_pipeline, common_steps},
    settings::SENTINEL_FUSE,
};
use std::path::PathBuf;

const COMMON: [&str; 5] = [
    "Clean up dist directory",
    "Build project",
    "Create bin directory if needed",
    "Generate SEA blob",
    "Copy Node binary",
];

fn in_root(parts: &[&str]) -> PathBuf {
    parts
        .iter()
        .fold(std::path::absolute("/work/app").unwrap(), |path, part| {
            path.join(part)
        })
}

fn settings(platform: Platform) -> PackagerSettings {
    SettingsBuilder::new()
        .project_root("/work/app")
        .platform(platform)
        .app(AppMetadata::new("demo"))
        .build()
        .unwrap()
}

fn suffix_commands(platform: Platform) -> Vec<String> {
    let settings = settings(platform);
    PlatformStepTable::standard(&settings, &fake_toolchain())
        .steps_for(platform)
        .iter()
        .map(|step| match step.action() {
            StepAction::Run(command) => command.to_string(),
            other => panic!("unexpected platform action {other:?}"),
        })
        .collect()
}

#[test]
fn darwin_strips_injects_with_segment_and_ad_hoc_signs() {
    let app = in_root(&["bin", "demo"]).display().to_string();
    let blob = in_root(&["bin", "sea-prep.blob"]).display().to_string();
    assert_eq!(
        suffix_commands(Platform::Darwin),
        vec![
            format!("codesign --remove-signature {app}"),
            format!(
                "pnpm postject {app} NODE_SEA_BLOB {blob} --sentinel-fuse {SENTINEL_FUSE} --macho-segment-name NODE_SEA"
            ),
            format!("codesign --sign - {app}"),
        ]
    );
}

#[test]
fn linux_only_injects() {
    let app = in_root(&["bin", "demo"]).display().to_string();
    let blob = in_root(&["bin", "sea-prep.blob"]).display().to_string();
    assert_eq!(
        suffix_commands(Platform::Linux),
        vec![format!(
            "pnpm postject {app} NODE_SEA_BLOB {blob} --sentinel-fuse {SENTINEL_FUSE}"
        )]
    );
}

#[test]
fn win32_uses_signtool_and_exe_extension() {
    let app = in_root(&["bin", "demo.exe"]).display().to_string();
    let blob = in_root(&["bin", "sea-prep.blob"]).display().to_string();
    assert_eq!(
        suffix_commands(Platform::Win32),
        vec![
            format!("signtool remove /s {app}"),
            format!(
                "pnpm postject {app} NODE_SEA_BLOB {blob} --sentinel-fuse {SENTINEL_FUSE}"
            ),
            format!("signtool sign /fd SHA256 {app}"),
        ]
    );
}

#[test]
fn pipeline_is_common_prefix_plus_platform_suffix() {
    let expected_suffix: [(Platform, &[&str]); 3] = [
        (
            Platform::Darwin,
            &["Remove signature", "Inject SEA blob", "Sign binary"],
        ),
        (Platform::Linux, &["Inject SEA blob"]),
        (
            Platform::Win32,
            &["Remove signature", "Inject SEA blob", "Sign binary"],
        ),
    ];

    for (platform, suffix) in expected_suffix {
        let pipeline = build_pipeline(&settings(platform), &fake_toolchain());
        let names = pipeline.step_names();
        assert_eq!(&names[..5], &COMMON[..], "{platform}");
        assert_eq!(&names[5..], suffix, "{platform}");
        assert!(pipeline.steps()[5..].iter().all(|s| s.is_nested()));
    }
}

#[test]
fn common_steps_follow_the_project_layout() {
    let settings = settings(Platform::Linux);
    let steps = common_steps(&settings, &fake_toolchain());

    assert_eq!(
        steps.iter().map(|s| s.name()).collect::<Vec<_>>(),
        COMMON.to_vec()
    );
    assert_eq!(
        steps[0].action(),
        &StepAction::RemoveDir(in_root(&["dist"]))
    );
    match steps[1].action() {
        StepAction::Run(command) => {
            assert_eq!(command.to_string(), "pnpm run build:ts");
            assert_eq!(command.get_current_dir(), Some(in_root(&[]).as_path()));
            assert!(command.is_streamed());
        }
        other => panic!("unexpected build action {other:?}"),
    }
    assert_eq!(
        steps[2].action(),
        &StepAction::RecreateDir(in_root(&["bin"]))
    );
    match steps[3].action() {
        StepAction::GenerateBlob { command, blob_file, .. } => {
            assert_eq!(
                command.to_string(),
                format!(
                    "node --experimental-sea-config {}",
                    in_root(&["sea-config.json"]).display()
                )
            );
            assert_eq!(blob_file, &in_root(&["bin", "sea-prep.blob"]));
        }
        other => panic!("unexpected blob action {other:?}"),
    }
    match steps[4].action() {
        StepAction::CopyRuntime { query, destination } => {
            assert_eq!(query.to_string(), "node -p process.execPath");
            assert_eq!(destination, &in_root(&["bin", "demo"]));
        }
        other => panic!("unexpected copy action {other:?}"),
    }
}

#[test]
fn platform_missing_from_table_contributes_no_steps() {
    let settings = settings(Platform::Linux);
    let mut table = PlatformStepTable::new();
    table.insert(
        Platform::Darwin,
        PlatformStepTable::standard(&settings, &fake_toolchain())
            .into_steps(Platform::Darwin),
    );

    assert_eq!(table.steps_for(Platform::Darwin).len(), 3);
    assert!(table.steps_for(Platform::Linux).is_empty());
    assert!(table.into_steps(Platform::Win32).is_empty());
}

#[test]
fn platform_identifiers_must_match_exactly() {
    assert_eq!(Platform::from_identifier("darwin").unwrap(), Platform::Darwin);
    assert_eq!("linux".parse::<Platform>().unwrap(), Platform::Linux);
    assert_eq!(Platform::from_identifier("win32").unwrap(), Platform::Win32);

    for id in ["freebsd", "macos", "windows", "Linux", ""] {
        let err = Platform::from_identifier(id).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Unsupported platform: {id}. Supported platforms are: darwin, linux, win32.")
        );
    }
}
