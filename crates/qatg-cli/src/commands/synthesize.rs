//! Synthesize command implementation.

use anyhow::Result;
use console::style;

use qatg_ir::Unitary2x2;
use qatg_synth::{BasisSynthesizer, GateSynthesizer, RotationParams, sequence_unitary};

use super::common::resolve_basis;

/// Execute the synthesize command.
pub fn execute(basis: &str, params: RotationParams) -> Result<()> {
    let basis = resolve_basis(basis)?;
    let synthesizer = BasisSynthesizer::new(basis)?;
    let [theta, phi, lambda] = params;

    println!(
        "{} U({theta}, {phi}, {lambda}) using the {} decomposition",
        style("→").cyan().bold(),
        style(synthesizer.decomposition()).yellow()
    );

    let gates = synthesizer.synthesize(params)?;
    for gate in &gates {
        println!("  {gate}");
    }

    let matches = sequence_unitary(&gates)
        .is_some_and(|u| u.approx_eq_up_to_phase(&Unitary2x2::u(theta, phi, lambda), 1e-9));
    if !matches {
        anyhow::bail!("Synthesized sequence does not reproduce U({theta}, {phi}, {lambda})");
    }
    println!(
        "{} {} gate(s), equal to U up to global phase",
        style("✓").green().bold(),
        gates.len()
    );

    Ok(())
}
