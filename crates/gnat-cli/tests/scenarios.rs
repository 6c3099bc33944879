//! End-to-end CLI tests for the literal scenarios.
//!
//! Each scenario runs the `gnat` binary against small fixture files in an
//! isolated temporary directory (since the output path is the fixed
//! relative `./gnat2_out.txt`) and inspects the resulting edge file.

use assert_cmd::Command;
use std::fs;
use std::path::Path;

fn write_fixture(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run_gnat(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    Command::cargo_bin("gnat")
        .unwrap()
        .current_dir(dir)
        .args(args)
        .assert()
}

fn read_output(dir: &Path) -> String {
    fs::read_to_string(dir.join("gnat2_out.txt")).unwrap_or_default()
}

#[test]
fn scenario_a_one_edge() {
    let tmp = tempfile::tempdir().unwrap();
    let spikes = write_fixture(tmp.path(), "spikes.txt", "0 0A 0\n0 14 0\n0 0B 1\n0 15 1\n");
    let network = write_fixture(tmp.path(), "network.txt", "0 1 1.0 1.0\n");

    run_gnat(
        tmp.path(),
        &[
            "2",
            spikes.to_str().unwrap(),
            network.to_str().unwrap(),
            "1.0",
            "1.0",
            "10",
        ],
    )
    .success();

    let out = read_output(tmp.path());
    assert_eq!(out.trim(), "0 10 20 1 11 21");
}

#[test]
fn scenario_b_sub_delay_gap_blocks_emission() {
    let tmp = tempfile::tempdir().unwrap();
    let spikes = write_fixture(tmp.path(), "spikes.txt", "0 0A 0\n0 14 0\n0 0B 1\n0 15 1\n");
    let network = write_fixture(tmp.path(), "network.txt", "0 1 1.0 5.0\n");

    run_gnat(
        tmp.path(),
        &[
            "2",
            spikes.to_str().unwrap(),
            network.to_str().unwrap(),
            "1.0",
            "1.0",
            "10",
        ],
    )
    .success();

    let out = read_output(tmp.path());
    assert!(out.trim().is_empty());
}

#[test]
fn scenario_c_c_radius_gating() {
    let tmp = tempfile::tempdir().unwrap();
    let spikes = write_fixture(tmp.path(), "spikes.txt", "0 0A 0\n0 14 0\n0 0B 1\n0 15 1\n");
    let network = write_fixture(tmp.path(), "network.txt", "0 1 1.0 1.0\n");

    run_gnat(
        tmp.path(),
        &[
            "2",
            spikes.to_str().unwrap(),
            network.to_str().unwrap(),
            "1.0",
            "1.0",
            "0.5",
        ],
    )
    .success();

    let out = read_output(tmp.path());
    assert!(out.trim().is_empty());
}

#[test]
fn scenario_d_multi_pair_enumeration() {
    let tmp = tempfile::tempdir().unwrap();
    let spikes = write_fixture(
        tmp.path(),
        "spikes.txt",
        "0 0A 0\n0 14 0\n0 1E 0\n0 0B 1\n0 15 1\n0 1F 1\n",
    );
    let network = write_fixture(tmp.path(), "network.txt", "0 1 1.0 1.0\n");

    run_gnat(
        tmp.path(),
        &[
            "2",
            spikes.to_str().unwrap(),
            network.to_str().unwrap(),
            "1.0",
            "1.0",
            "100",
        ],
    )
    .success();

    let out = read_output(tmp.path());
    let n_lines = out.lines().filter(|l| !l.trim().is_empty()).count();
    // Each of the 3 post-pairs (i<j over {11,21,31}) matches exactly the
    // pre-pair with the same positional index over {10,20,30}: 3 edges.
    assert_eq!(n_lines, 3);
}

#[test]
fn scenario_e_isolated_synapse() {
    let tmp = tempfile::tempdir().unwrap();
    let spikes = write_fixture(
        tmp.path(),
        "spikes.txt",
        "0 0A 0\n0 14 0\n0 0B 1\n0 15 1\n0 0C 2\n0 16 2\n",
    );
    let network = write_fixture(tmp.path(), "network.txt", "0 1 1.0 1.0\n");

    run_gnat(
        tmp.path(),
        &[
            "3",
            spikes.to_str().unwrap(),
            network.to_str().unwrap(),
            "1.0",
            "1.0",
            "10",
        ],
    )
    .success();

    let out = read_output(tmp.path());
    for line in out.lines() {
        let post_neuron: u32 = line.split_whitespace().nth(3).unwrap().parse().unwrap();
        assert_ne!(post_neuron, 2, "neuron 2 has no presynaptic partners");
    }
}

#[test]
fn malformed_network_file_exits_nonzero() {
    let tmp = tempfile::tempdir().unwrap();
    let spikes = write_fixture(tmp.path(), "spikes.txt", "0 0A 0\n");
    let network = write_fixture(tmp.path(), "network.txt", "not a valid line\n");

    run_gnat(
        tmp.path(),
        &[
            "1",
            spikes.to_str().unwrap(),
            network.to_str().unwrap(),
            "1.0",
            "1.0",
            "10",
        ],
    )
    .failure();
}
