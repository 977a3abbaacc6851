use mutabench_analysis::scoring::EvaluationSummary;
use mutabench_sim::config::{BenchConfig, Matching};
use mutabench_sim::Reference;

pub fn print_genome_parameters(config: &BenchConfig, seed: u64, reference: &Reference) {
    let profile = &config.profile;
    let derivation = &config.derivation;

    println!("\n📋 Benchmark Configuration");
    println!(
        "  • Reference: {} ({} bp)",
        reference.description(),
        reference.len()
    );
    println!("  • Random Seed: {seed} [--seed]");
    println!(
        "  • Population Size: {} [-n, --population-size]",
        profile.population_size
    );

    println!("\n⚡ Mutation Profile");
    println!(
        "  • Mutation Rate: {:.2e} per base [-m, --mutation-rate]",
        profile.mutation_rate
    );
    match profile.first_allele_prob {
        Some(p) => println!("  • First Allele Weight: {p:.2} [--first-prob]"),
        None => println!("  • First Allele Weight: Uniform [--first-prob]"),
    }

    println!("\n✂️  Indels");
    println!(
        "  • Indel Fraction: {:.4} [-i, --indel-fraction]",
        derivation.indel_fraction
    );
    println!(
        "  • Extension Prob: {:.2} (mean len ~{:.1} bp) [--indel-extension]",
        derivation.indel_extension,
        1.0 / (1.0 - derivation.indel_extension)
    );
    if derivation.debug {
        println!("  • Debug: injected bases are lower-case");
    }
    println!();
}

pub fn print_read_parameters(config: &BenchConfig, seed: u64, genome: &Reference) {
    let reads = &config.reads;
    println!("\n📋 Read Sampling");
    println!("  • Genome: {} ({} bp)", genome.description(), genome.len());
    println!("  • Random Seed: {seed} [--seed]");
    println!("  • Read Length: {} [-l, --length]", reads.length);
    println!("  • Read Count: {} [-N, --count]", reads.count);
    println!("  • Error Rate: {:.4} [-e, --error-rate]", reads.error_rate);
    println!();
}

pub fn print_evaluation(summary: &EvaluationSummary) {
    let mode = match summary.matching {
        Matching::Lenient => "lenient",
        Matching::Exclusive => "exclusive",
    };
    let metric = |v: Option<f64>| v.map_or_else(|| "NaN".to_string(), |v| format!("{v:.4}"));

    println!("\n🎯 Evaluation (G={}, {mode} matching)", summary.gap_tolerance);
    println!(
        "  • Reads: {} aligned of {}",
        summary.aligned_reads, summary.reads
    );
    println!(
        "  • Positions: {} reported, {} true",
        summary.aligned_positions, summary.positions
    );
    println!(
        "  • TP / FP / FN: {} / {} / {}",
        summary.true_positives, summary.false_positives, summary.false_negatives
    );
    println!("  • Precision: {}", metric(summary.precision));
    println!("  • Recall: {}", metric(summary.recall));
}
