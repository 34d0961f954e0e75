use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_fitness(data_root: &Path, key: &str, pool: &str, contents: &str) {
    let dir = data_root
        .join("experiments")
        .join(key)
        .join("gene_pools")
        .join(format!("gene_pool_{pool}"));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("fitness.csv"), contents).unwrap();
}

#[test]
fn test_samples_fitness_file() {
    let temp = tempdir().unwrap();
    let data_root = temp.path().join("data");
    write_fitness(
        &data_root,
        "compare_chem_configs",
        "0",
        "0,1,2\n100,3,4\n150,5,6\n200,7,8\n",
    );

    let mut cmd = Command::cargo_bin("fitness-sampler").unwrap();
    cmd.arg("compare_chem_configs")
        .arg("0")
        .arg("--data-root")
        .arg(&data_root)
        .arg("--output-dir")
        .arg(&data_root)
        .assert()
        .success()
        .stdout(predicate::str::contains("kept 3 of 4 rows"))
        .stdout(predicate::str::contains("done"));

    let out = fs::read_to_string(data_root.join("compare_chem_configs_0.csv")).unwrap();
    assert_eq!(out, "0,1,2,\n100,3,4,\n200,7,8,\n");
}

#[test]
fn test_default_paths_use_data_dir() {
    let temp = tempdir().unwrap();
    let data_root = temp.path().join("data");
    write_fitness(&data_root, "exp", "2", "100,9\n101,9\n");

    let mut cmd = Command::cargo_bin("fitness-sampler").unwrap();
    cmd.current_dir(temp.path())
        .arg("exp")
        .arg("2")
        .assert()
        .success();

    let out = fs::read_to_string(data_root.join("exp_2.csv")).unwrap();
    assert_eq!(out, "100,9,\n");
}

#[test]
fn test_missing_source_is_logged() {
    let temp = tempdir().unwrap();
    let data_root = temp.path().join("data");
    fs::create_dir_all(&data_root).unwrap();

    let mut cmd = Command::cargo_bin("fitness-sampler").unwrap();
    cmd.arg("no_such_experiment")
        .arg("0")
        .arg("--data-root")
        .arg(&data_root)
        .arg("--output-dir")
        .arg(&data_root)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to process"));

    assert!(!data_root.join("no_such_experiment_0.csv").exists());
}

#[test]
fn test_rejects_path_traversal() {
    let temp = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("fitness-sampler").unwrap();
    cmd.arg("../outside")
        .arg("0")
        .arg("--data-root")
        .arg(temp.path())
        .arg("--output-dir")
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid identifier"));
}

#[test]
fn test_fail_policy_flag() {
    let temp = tempdir().unwrap();
    let data_root = temp.path().join("data");
    write_fitness(&data_root, "exp", "0", "0,1\nabc,2\n");

    let mut cmd = Command::cargo_bin("fitness-sampler").unwrap();
    cmd.arg("exp")
        .arg("0")
        .arg("--data-root")
        .arg(&data_root)
        .arg("--output-dir")
        .arg(&data_root)
        .arg("--on-unparsable")
        .arg("fail")
        .assert()
        .failure()
        .stdout(predicate::str::contains("line 2"));
}

#[test]
fn test_unknown_policy_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("fitness-sampler").unwrap();
    cmd.arg("exp")
        .arg("0")
        .arg("--on-unparsable")
        .arg("ignore")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown unparsable-row policy"));
}

#[test]
fn test_config_file_and_flag_override() {
    let temp = tempdir().unwrap();
    let data_root = temp.path().join("data");
    let out_dir = temp.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();
    write_fitness(&data_root, "exp", "1", "0,1\n50,2\n100,3\n");

    let config = temp.path().join("settings.json");
    fs::write(
        &config,
        format!(
            r#"{{ "data_root": {:?}, "output_dir": {:?}, "sampling_interval": 25 }}"#,
            data_root.to_str().unwrap(),
            out_dir.to_str().unwrap()
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("fitness-sampler").unwrap();
    cmd.arg("exp")
        .arg("1")
        .arg("--config")
        .arg(&config)
        .arg("--interval")
        .arg("50")
        .assert()
        .success();

    let out = fs::read_to_string(out_dir.join("exp_1.csv")).unwrap();
    assert_eq!(out, "0,1,\n50,2,\n100,3,\n");
}

#[test]
fn test_generated_sample_round_trip() {
    let temp = tempdir().unwrap();
    let data_root = temp.path().join("data");

    Command::cargo_bin("generate_sample")
        .unwrap()
        .arg("synthetic")
        .arg("--data-root")
        .arg(&data_root)
        .arg("--pools")
        .arg("1")
        .arg("--ticks")
        .arg("350")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 350 ticks"));

    Command::cargo_bin("fitness-sampler")
        .unwrap()
        .arg("synthetic")
        .arg("0")
        .arg("--data-root")
        .arg(&data_root)
        .arg("--output-dir")
        .arg(&data_root)
        .assert()
        .success();

    let out = fs::read_to_string(data_root.join("synthetic_0.csv")).unwrap();
    let generations: Vec<&str> = out
        .lines()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(generations, vec!["0", "100", "200", "300"]);
    assert!(out.lines().all(|l| l.ends_with(',') && l.split(',').count() == 6));
}
