//! # Conversion Integration Tests
//!
//! Drives full runs against on-disk input trees built in temporary
//! directories, covering the end-to-end pipeline: discovery, metadata
//! parsing, key mapping, quota extraction, namespace resolution, assembly,
//! and output writing.

use std::fs;
use std::path::Path;

use values_converter::config::{ConverterConfig, DEFAULT_NAMESPACE_FORMAT};
use values_converter::converter;
use values_converter::error::ConvertError;

fn write_team(input_root: &Path, team: &str, properties: Option<&str>, quotas: &[(&str, &str)]) {
    let team_dir = input_root.join(team);
    fs::create_dir_all(&team_dir).unwrap();
    if let Some(content) = properties {
        fs::write(team_dir.join("project.properties"), content).unwrap();
    }
    for (file_name, content) in quotas {
        fs::write(team_dir.join(file_name), content).unwrap();
    }
}

fn config(input_root: &Path, output_root: &Path) -> ConverterConfig {
    ConverterConfig::new(
        input_root.to_path_buf(),
        output_root.to_path_buf(),
        DEFAULT_NAMESPACE_FORMAT.to_string(),
    )
}

fn read_yaml(path: &Path) -> serde_yaml::Value {
    serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

const WRAPPER_QUOTAS: &str = "\
apiVersion: v1
kind: Template
objects:
  - apiVersion: v1
    kind: LimitRange
    metadata:
      name: limits
    spec:
      limits:
        - type: Container
          max:
            cpu: '2'
  - apiVersion: v1
    kind: ResourceQuota
    metadata:
      name: quota
    spec:
      hard:
        cpu: '4'
        memory: 8Gi
        storage: 10Gi
        pods: 50
";

const BARE_LIST_QUOTAS: &str = "\
- kind: LimitRange
  spec:
    limits: []
- kind: ResourceQuota
  spec:
    hard:
      cpu: '1'
      memory: 2Gi
";

const SINGLE_OBJECT_QUOTAS: &str = "\
apiVersion: v1
kind: ResourceQuota
metadata:
  name: quota
spec:
  hard:
    ephemeral-storage: 5Gi
    pods: 20
";

#[test]
fn converts_all_environments_across_document_shapes() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_team(
        input.path(),
        "team-test-one",
        Some(
            "# team metadata\n\
             PROJECT_DOMAIN=demo\n\
             PROJECT_MANAGER=Manager\n\
             PROJECT_CODE=APP1001\n\
             PROJECT_COST_CENTER=1001\n\
             CREATED_DATE=2025-01-01\n\
             CREATED_BY=Automation\n\
             CMDB_APPLICATION=MyApp\n\
             AD_GROUP=TEAM-TEST-ONE-ADMINS\n\
             REQUEST_ID=REQ-123\n",
        ),
        &[
            ("team-test-one-dev-quotas.yml", WRAPPER_QUOTAS),
            ("team-test-one-stage-quotas.yml", BARE_LIST_QUOTAS),
            ("team-test-one-prod-quotas.yaml", SINGLE_OBJECT_QUOTAS),
        ],
    );

    let report = converter::run(&config(input.path(), output.path())).unwrap();
    assert!(report.is_success(), "failures: {:?}", report.failures);
    assert_eq!(report.written.len(), 3);

    let dev = read_yaml(&output.path().join("team-test-one/dev.yaml"));
    assert_eq!(dev["team"], "team-test-one");
    assert_eq!(dev["namespace"], "team-test-one-dev-1");
    assert_eq!(dev["project"]["domain"], "demo");
    assert_eq!(dev["project"]["cost_center"], "1001");
    assert_eq!(dev["project"]["cmdb_application"], "MyApp");
    assert_eq!(dev["adgroup"], "TEAM-TEST-ONE-ADMINS");
    assert_eq!(dev["request_id"], "REQ-123");
    assert_eq!(dev["resourceQuota"]["enabled"], serde_yaml::Value::Bool(true));
    assert_eq!(dev["resourceQuota"]["cpu"], "4");
    assert_eq!(dev["resourceQuota"]["memory"], "8Gi");
    assert_eq!(dev["resourceQuota"]["storage"], "10Gi");
    assert_eq!(dev["resourceQuota"]["pods"], "50");

    let stage = read_yaml(&output.path().join("team-test-one/stage.yaml"));
    assert_eq!(stage["namespace"], "team-test-one-stage-1");
    assert_eq!(stage["resourceQuota"]["cpu"], "1");
    assert_eq!(stage["resourceQuota"]["storage"], "");

    let prod = read_yaml(&output.path().join("team-test-one/prod.yaml"));
    assert_eq!(prod["resourceQuota"]["storage"], "5Gi");
    assert_eq!(prod["resourceQuota"]["pods"], "20");
    assert_eq!(prod["resourceQuota"]["cpu"], "");
}

#[test]
fn required_fields_present_even_with_sparse_metadata() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_team(
        input.path(),
        "team-sparse",
        Some("PROJECT_DOMAIN=only-this\n"),
        &[("team-sparse-dev-quotas.yml", SINGLE_OBJECT_QUOTAS)],
    );

    let report = converter::run(&config(input.path(), output.path())).unwrap();
    assert!(report.is_success());

    let doc = read_yaml(&output.path().join("team-sparse/dev.yaml"));
    assert_eq!(doc["adgroup"], "");
    assert_eq!(doc["request_id"], "");
    assert_eq!(doc["project"]["manager"], "");
    assert_eq!(
        doc["repositories"],
        serde_yaml::Value::Sequence(Vec::new())
    );
    assert_eq!(
        doc["applications"],
        serde_yaml::Value::Sequence(Vec::new())
    );
}

#[test]
fn unmapped_and_malformed_metadata_never_reach_output() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_team(
        input.path(),
        "team-noisy",
        Some(
            "PROJECT_DOMAIN=clean\n\
             UNKNOWN_KEY=should-not-appear\n\
             garbage-no-equals\n\
             AD_GROUP=GROUP\n",
        ),
        &[("team-noisy-dev-quotas.yml", SINGLE_OBJECT_QUOTAS)],
    );

    let report = converter::run(&config(input.path(), output.path())).unwrap();
    assert!(report.is_success());

    let raw = fs::read_to_string(output.path().join("team-noisy/dev.yaml")).unwrap();
    assert!(!raw.contains("UNKNOWN_KEY"));
    assert!(!raw.contains("should-not-appear"));
    assert!(!raw.contains("garbage"));

    let doc = read_yaml(&output.path().join("team-noisy/dev.yaml"));
    assert_eq!(doc["project"]["domain"], "clean");
    assert_eq!(doc["adgroup"], "GROUP");
}

#[test]
fn foreign_team_quota_files_are_skipped() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_team(
        input.path(),
        "team-a",
        Some("AD_GROUP=X\n"),
        &[
            ("team-a-dev-quotas.yml", SINGLE_OBJECT_QUOTAS),
            // belongs to a different team; rejected by the filename parser
            ("team-b-prod-quotas.yml", SINGLE_OBJECT_QUOTAS),
        ],
    );

    let report = converter::run(&config(input.path(), output.path())).unwrap();
    assert!(report.is_success());
    assert_eq!(report.written.len(), 1);
    assert!(!output.path().join("team-a/prod.yaml").exists());
}

#[test]
fn environment_failures_are_isolated_and_exit_status_reflects_them() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_team(
        input.path(),
        "team-mixed",
        Some("AD_GROUP=X\n"),
        &[
            (
                "team-mixed-dev-quotas.yml",
                "kind: Template\nobjects:\n  - kind: LimitRange\n    spec:\n      limits: []\n",
            ),
            ("team-mixed-prod-quotas.yml", SINGLE_OBJECT_QUOTAS),
        ],
    );
    write_team(
        input.path(),
        "team-whole",
        Some("AD_GROUP=Y\n"),
        &[("team-whole-dev-quotas.yml", SINGLE_OBJECT_QUOTAS)],
    );

    let report = converter::run(&config(input.path(), output.path())).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].team, "team-mixed");
    assert_eq!(report.failures[0].environment.as_deref(), Some("dev"));
    assert!(matches!(
        report.failures[0].error,
        ConvertError::NoResourceQuota(_)
    ));

    // The failing environment wrote nothing; siblings and other teams did.
    assert!(!output.path().join("team-mixed/dev.yaml").exists());
    assert!(output.path().join("team-mixed/prod.yaml").exists());
    assert!(output.path().join("team-whole/dev.yaml").exists());
}

#[test]
fn reruns_are_byte_identical() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_team(
        input.path(),
        "team-a",
        Some("PROJECT_DOMAIN=payments\nREQUEST_ID=REQ-9\n"),
        &[
            ("team-a-dev-quotas.yml", WRAPPER_QUOTAS),
            ("team-a-prod-quotas.yml", BARE_LIST_QUOTAS),
        ],
    );
    let cfg = config(input.path(), output.path());

    converter::run(&cfg).unwrap();
    let dev_first = fs::read(output.path().join("team-a/dev.yaml")).unwrap();
    let prod_first = fs::read(output.path().join("team-a/prod.yaml")).unwrap();

    converter::run(&cfg).unwrap();
    assert_eq!(
        dev_first,
        fs::read(output.path().join("team-a/dev.yaml")).unwrap()
    );
    assert_eq!(
        prod_first,
        fs::read(output.path().join("team-a/prod.yaml")).unwrap()
    );
}

#[test]
fn duplicate_environment_names_fail_the_team() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_team(
        input.path(),
        "team-dup",
        Some("AD_GROUP=X\n"),
        &[
            ("team-dup-dev-quotas.yml", SINGLE_OBJECT_QUOTAS),
            ("team-dup-dev-quotas.yaml", SINGLE_OBJECT_QUOTAS),
        ],
    );
    write_team(
        input.path(),
        "team-ok",
        Some("AD_GROUP=Y\n"),
        &[("team-ok-dev-quotas.yml", SINGLE_OBJECT_QUOTAS)],
    );

    let report = converter::run(&config(input.path(), output.path())).unwrap();
    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].team, "team-ok");
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        ConvertError::DuplicateEnvironment { .. }
    ));
    assert!(!output.path().join("team-dup").exists());
}

#[test]
fn missing_input_root_is_a_global_error() {
    let output = tempfile::tempdir().unwrap();
    let cfg = config(Path::new("/nonexistent/input-root"), output.path());
    assert!(converter::run(&cfg).is_err());
}

#[test]
fn custom_mapping_table_is_honored() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_team(
        input.path(),
        "team-a",
        Some("OWNER_NAME=Jane\nPROJECT_DOMAIN=ignored-by-custom-table\n"),
        &[("team-a-dev-quotas.yml", SINGLE_OBJECT_QUOTAS)],
    );

    let mut cfg = config(input.path(), output.path());
    cfg.key_mapping = vec![("OWNER_NAME".to_string(), "project.owner".to_string())];

    let report = converter::run(&cfg).unwrap();
    assert!(report.is_success());

    let doc = read_yaml(&output.path().join("team-a/dev.yaml"));
    assert_eq!(doc["project"]["owner"], "Jane");
    let raw = fs::read_to_string(output.path().join("team-a/dev.yaml")).unwrap();
    assert!(!raw.contains("ignored-by-custom-table"));
}
