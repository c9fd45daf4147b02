//! Generate command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use qatg_core::{GenerationState, Qatg, QatgConfig, TestConfiguration};

use super::common::{build_faults, load_run_file};

/// JSON report written by `qatg generate`.
#[derive(Serialize)]
struct Report<'a> {
    version: &'static str,
    generator: &'a QatgConfig,
    configurations: &'a [TestConfiguration],
}

/// Execute the generate command.
pub fn execute(config: &str, output: Option<&str>, quiet: bool) -> Result<()> {
    let run = load_run_file(config)?;
    let single_faults = build_faults(&run.single_faults)?;
    let two_faults = build_faults(&run.two_faults)?;
    let total = single_faults.len() + two_faults.len();

    eprintln!(
        "{} Generating templates for {} fault(s) from {}",
        style("→").cyan().bold(),
        style(total).yellow(),
        style(config).green()
    );

    let qatg = Qatg::new(run.generator.clone()).context("Invalid generator configuration")?;
    eprintln!(
        "  Basis: {} ({} decomposition), grid {}, {} rounds",
        run.generator.basis_gates.gates().join(", "),
        qatg.synthesizer().name(),
        run.generator.search.grid_slices,
        run.generator.search.max_rounds
    );

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total as u64)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let configurations = qatg.test_configuration_with(
        &single_faults,
        &two_faults,
        &run.single_initial_state()?,
        &run.two_initial_state()?,
        |configuration| {
            progress.set_message(configuration.fault.clone());
            progress.inc(1);
        },
    )?;
    progress.finish_and_clear();

    print_summary(&configurations);

    let report = Report {
        version: env!("CARGO_PKG_VERSION"),
        generator: &run.generator,
        configurations: &configurations,
    };
    let json = serde_json::to_string_pretty(&report)?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write file: {path}"))?;
            info!(path, "wrote report");
            eprintln!("  Output: {}", style(path).green());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn print_summary(configurations: &[TestConfiguration]) {
    for configuration in configurations {
        let template = &configuration.template;
        let marker = match template.state {
            GenerationState::Converged => style("✓").green().bold(),
            _ => style("~").yellow().bold(),
        };
        eprintln!(
            "{} {:<24} {:<6} {:<9} {:>3} element(s) {:>4} gate(s)  effect size {:.4}",
            marker,
            configuration.fault,
            configuration.kind,
            template.state,
            template.len(),
            template.num_gates(),
            template.effect_size
        );
    }
}
