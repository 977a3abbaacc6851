use anyhow::{Context, Result};
use mutabench_sim::config::BenchConfig;
use std::fs;
use std::path::Path;

pub fn write_default_config(output: &Path) -> Result<()> {
    let json = BenchConfig::default().to_json()?;
    fs::write(output, json + "\n")
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("✓ Configuration saved to {}", output.display());
    Ok(())
}
