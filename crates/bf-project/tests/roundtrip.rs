use bf_project::{load_json, load_yaml, save_json, save_yaml};
use std::path::Path;

fn demo() -> bf_project::Project {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/dropflow.yaml");
    load_yaml(&path).unwrap()
}

#[test]
fn roundtrip_yaml_dropflow_project() {
    let project = demo();

    let path = std::env::temp_dir().join("bf_project_roundtrip_dropflow.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_dropflow_project() {
    let project = demo();

    let path = std::env::temp_dir().join("bf_project_roundtrip_dropflow.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = demo();
    project.battery.params.nominal_capacity = 0.0;

    let path = std::env::temp_dir().join("bf_project_invalid.yaml");
    assert!(save_yaml(&path, &project).is_err());
}

#[test]
fn unknown_variant_fails_to_parse() {
    let yaml = std::fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/fading.yaml"),
    )
    .unwrap()
    .replace("variant: fading", "variant: hydrogen");
    assert!(matches!(
        bf_project::from_yaml_str(&yaml),
        Err(bf_project::ProjectError::Yaml(_))
    ));
}

#[test]
fn save_picks_format_from_extension() {
    let project = demo();
    let path = std::env::temp_dir().join("bf_project_roundtrip_by_ext.json");
    bf_project::save(&path, &project).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.trim_start().starts_with('{'));
    assert_eq!(bf_project::load(&path).unwrap(), project);
}
