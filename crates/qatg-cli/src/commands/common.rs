//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};

use qatg_core::{Fault, FaultSpec, RunFile};
use qatg_synth::BasisGates;

/// Load and validate a run file.
pub fn load_run_file(path: &str) -> Result<RunFile> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    RunFile::from_file(path).with_context(|| format!("Failed to load run file: {path}"))
}

/// Instantiate every fault in `specs`.
pub fn build_faults(specs: &[FaultSpec]) -> Result<Vec<Box<dyn Fault>>> {
    specs
        .iter()
        .map(|spec| {
            spec.build()
                .with_context(|| format!("Invalid fault '{}'", spec.name()))
        })
        .collect()
}

/// Resolve a basis preset name or a comma-separated gate list.
pub fn resolve_basis(basis: &str) -> Result<BasisGates> {
    if let Some(preset) = BasisGates::preset(basis) {
        return Ok(preset);
    }
    let gates: Vec<&str> = basis
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect();
    if gates.len() < 2 {
        anyhow::bail!(
            "Unknown basis: '{basis}'. Available presets: ibm, u3, zyz, or a comma-separated gate list"
        );
    }
    Ok(BasisGates::new(gates))
}
