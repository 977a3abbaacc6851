use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const REFERENCE: &str = ">chr1 test\n\
ACGTTGCAAGGCTTACGATCGATCGGATCCATGCAGGTACCATTGACGGTCAAGTC\n\
GGATTACAGGCATGCCTAGGTTACCGATTGCAAGCTTGGCATGACCTAGGATCCAT\n\
TTGGCCAAGGTTCCAAGTTGCAACGTAGCTAGCTGACTGATCGTAGCTAGGCTAAC\n\
GATCCGATGGCTAGCTTAGGCAAGTCCGATGCAAGTTCGATCGGCTAGCATGCATG\n";

fn write_reference(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("reference.fasta");
    fs::write(&path, REFERENCE).unwrap();
    path
}

fn mutabench() -> Command {
    Command::cargo_bin("mutabench").unwrap()
}

#[test]
fn test_genomes_writes_fasta_and_profile() {
    let temp = tempdir().unwrap();
    let reference = write_reference(temp.path());
    let output = temp.path().join("genomes.fasta");
    let profile = temp.path().join("profile.txt");

    mutabench()
        .arg("genomes")
        .arg(&reference)
        .args(["-m", "0.1", "-n", "4", "--seed", "42", "--quiet"])
        .arg("-o")
        .arg(&output)
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sampled 22 mutation sites"))
        .stdout(predicate::str::contains("4 genomes saved"));

    let fasta = fs::read_to_string(&output).unwrap();
    let headers: Vec<&str> = fasta.lines().filter(|l| l.starts_with('>')).collect();
    assert_eq!(headers, [">1.chr1 test", ">2.chr1 test", ">3.chr1 test", ">4.chr1 test"]);

    let report = fs::read_to_string(&profile).unwrap();
    assert!(report.starts_with("Note: at each position, an indel occurs with probability 11.11%."));
    assert_eq!(report.lines().count(), 2 + 22);
}

#[test]
fn test_genomes_same_seed_same_output() {
    let temp = tempdir().unwrap();
    let reference = write_reference(temp.path());

    let mut outputs = Vec::new();
    for name in ["a.fasta", "b.fasta"] {
        let output = temp.path().join(name);
        mutabench()
            .arg("genomes")
            .arg(&reference)
            .args(["-m", "0.05", "--seed", "7", "--quiet", "-t", "2"])
            .arg("-o")
            .arg(&output)
            .arg("--profile")
            .arg(temp.path().join("profile.txt"))
            .assert()
            .success();
        outputs.push(fs::read_to_string(&output).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_genomes_rejects_invalid_reference() {
    let temp = tempdir().unwrap();
    let reference = temp.path().join("bad.fasta");
    fs::write(&reference, "ACGT\n").unwrap();
    let output = temp.path().join("genomes.fasta");

    mutabench()
        .arg("genomes")
        .arg(&reference)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read reference"));

    assert!(!output.exists());
}

#[test]
fn test_genomes_rejects_ambiguous_reference() {
    let temp = tempdir().unwrap();
    let reference = temp.path().join("n.fasta");
    fs::write(&reference, ">r\nACGTNACGT\n").unwrap();

    mutabench()
        .arg("genomes")
        .arg(&reference)
        .arg("-o")
        .arg(temp.path().join("out.fasta"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reference cannot be used for mutation"));
}

#[test]
fn test_genomes_rejects_bad_indel_fraction() {
    let temp = tempdir().unwrap();
    let reference = write_reference(temp.path());

    mutabench()
        .arg("genomes")
        .arg(&reference)
        .args(["-i", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_reads_then_evaluate_perfect_alignment() {
    let temp = tempdir().unwrap();
    let reference = write_reference(temp.path());
    let reads = temp.path().join("reads.fasta");
    let truth = temp.path().join("truth.tsv");
    let records = temp.path().join("reads.txt");

    mutabench()
        .arg("reads")
        .arg(&reference)
        .args(["-l", "30", "-N", "25", "-e", "0.05", "--seed", "3"])
        .arg("-o")
        .arg(&reads)
        .arg("--truth")
        .arg(&truth)
        .arg("--records")
        .arg(&records)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sampled 25 reads"));

    let fasta = fs::read_to_string(&reads).unwrap();
    assert_eq!(fasta.lines().count(), 50);
    assert!(fasta.starts_with(">r1 "));

    // An aligner that reports the first true position of every read
    let truth_text = fs::read_to_string(&truth).unwrap();
    let alignment: String = truth_text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let first = line.split('\t').nth(1).unwrap().split(' ').next().unwrap();
            format!("{i}\t{first}\n")
        })
        .collect();
    let alignment_path = temp.path().join("alignment.tsv");
    fs::write(&alignment_path, alignment).unwrap();

    let json = temp.path().join("eval.json");
    mutabench()
        .arg("evaluate")
        .arg(&truth)
        .arg(&alignment_path)
        .arg("--json")
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("G=20"))
        .stdout(predicate::str::contains("Precision: 1.0000"));

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["summary"]["false_positives"], 0);
    assert_eq!(value["summary"]["aligned_reads"], 25);

    mutabench()
        .arg("verify")
        .arg("-s")
        .arg(&reference)
        .arg("-r")
        .arg(&records)
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished verifying 25 reads"));
}

#[test]
fn test_reads_select_record_of_multi_genome_file() {
    let temp = tempdir().unwrap();
    let reference = write_reference(temp.path());
    let genomes = temp.path().join("genomes.fasta");
    mutabench()
        .arg("genomes")
        .arg(&reference)
        .args(["-m", "0.1", "-n", "2", "--seed", "5", "--quiet"])
        .arg("-o")
        .arg(&genomes)
        .arg("--profile")
        .arg(temp.path().join("profile.txt"))
        .assert()
        .success();

    let reads = temp.path().join("reads.fasta");
    let truth = temp.path().join("truth.tsv");
    let records = temp.path().join("reads.txt");
    let sample = |record: Option<&str>| {
        let mut cmd = mutabench();
        cmd.arg("reads")
            .arg(&genomes)
            .args(["-l", "20", "-N", "10", "--seed", "1"])
            .arg("-o")
            .arg(&reads)
            .arg("--truth")
            .arg(&truth)
            .arg("--records")
            .arg(&records);
        if let Some(record) = record {
            cmd.args(["--record", record]);
        }
        cmd.assert()
    };

    sample(None)
        .failure()
        .stderr(predicate::str::contains("Expected a single FASTA record, found 2"));
    sample(Some("3"))
        .failure()
        .stderr(predicate::str::contains("Record 3 is out of range"));
    sample(Some("2"))
        .success()
        .stdout(predicate::str::contains("Sampled 10 reads"));

    mutabench()
        .arg("verify")
        .arg("-s")
        .arg(&genomes)
        .args(["--record", "2"])
        .arg("-r")
        .arg(&records)
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking reads against 2.chr1 test"));
}

#[test]
fn test_evaluate_unknown_read_fails() {
    let temp = tempdir().unwrap();
    let truth = temp.path().join("truth.tsv");
    let alignment = temp.path().join("alignment.tsv");
    fs::write(&truth, "ACGT\t10\n").unwrap();
    fs::write(&alignment, "5\t10\n").unwrap();

    mutabench()
        .arg("evaluate")
        .arg(&truth)
        .arg(&alignment)
        .assert()
        .failure()
        .stderr(predicate::str::contains("read id 5 does not exist"));
}

#[test]
fn test_evaluate_gap_and_details() {
    let temp = tempdir().unwrap();
    let truth = temp.path().join("truth.tsv");
    let alignment = temp.path().join("alignment.tsv");
    fs::write(&truth, "ACGT\t100\n").unwrap();
    fs::write(&alignment, "0\t95 105\n").unwrap();

    mutabench()
        .arg("evaluate")
        .arg(&truth)
        .arg(&alignment)
        .args(["-g", "5", "--details"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 ACGT\n100\n95 105\n2 0 0\n"))
        .stdout(predicate::str::contains("1\t1\t1\t2\t2\t0\t0\t1.00000000\t1.00000000"));

    mutabench()
        .arg("evaluate")
        .arg(&truth)
        .arg(&alignment)
        .args(["-g", "5", "--exclusive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1\t1\t1\t2\t1\t1\t0\t0.50000000\t1.00000000"));
}

#[test]
fn test_verify_reports_issues() {
    let temp = tempdir().unwrap();
    let reference = write_reference(temp.path());
    let records = temp.path().join("reads.txt");
    // Reference starts ACGTTG; claim an error at offset 0 that is not one
    fs::write(&records, "ACGTTG 1 0 1 0\n").unwrap();

    mutabench()
        .arg("verify")
        .arg("-s")
        .arg(&reference)
        .arg("-r")
        .arg(&records)
        .assert()
        .success()
        .stdout(predicate::str::contains("flagged as an error"));

    mutabench()
        .arg("verify")
        .arg("-s")
        .arg(&reference)
        .arg("-r")
        .arg(&records)
        .arg("--strict")
        .assert()
        .failure();
}

#[test]
fn test_config_round_trip() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("bench.json");

    mutabench()
        .arg("config")
        .arg("-o")
        .arg(&config)
        .assert()
        .success();

    let text = fs::read_to_string(&config).unwrap();
    assert!(text.contains("\"gap_tolerance\": 20"));

    let reference = write_reference(temp.path());
    mutabench()
        .arg("genomes")
        .arg(&reference)
        .arg("--config")
        .arg(&config)
        .args(["--seed", "1", "--quiet"])
        .arg("-o")
        .arg(temp.path().join("g.fasta"))
        .arg("--profile")
        .arg(temp.path().join("p.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Population Size: 10"));
}
