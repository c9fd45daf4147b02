//! CLI command parsing and utility tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from`), run-file
//! loading, and the helpers shared by the commands.

// The CLI is a binary crate, so the helpers from commands::common are tested
// through equivalent logic built on the library crates.

// ============================================================================
// Run-file loading
// ============================================================================

mod run_file_tests {
    use std::fs;

    use qatg_core::{ActivationKind, GenerationState, Qatg, QatgError, RunFile};

    const RUN_FILE: &str = r#"
generator:
  circuit_size: 2
  basis_gates: [u, cx]
  coupling_map: [[0, 1]]
  search:
    grid_slices: 5
    max_rounds: 20
  max_test_template_size: 3
  min_required_effect_size: 3.0
single_faults:
  - type: bias
    name: u-noop
    gate: u
    params: [0.5, 0.2, 0.1]
    bias: [0.0, 0.0, 0.0]
two_faults:
  - type: two_qubit_over_rotation
    name: cx-drift
    gate: cx
    axis: x
    angle: 0.3
"#;

    fn write_run_file(contents: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        fs::write(&path, contents).unwrap();
        (dir, path.to_string_lossy().into_owned())
    }

    #[test]
    fn test_load_run_file() {
        let (_dir, path) = write_run_file(RUN_FILE);
        let run = RunFile::from_file(&path).unwrap();
        assert_eq!(run.generator.circuit_size, 2);
        assert_eq!(run.generator.search.grid_slices, 5);
        assert_eq!(run.generator.search.max_rounds, 20);
        assert!((run.generator.search.step - 0.01).abs() < 1e-15);
        assert_eq!(run.single_faults.len(), 1);
        assert_eq!(run.two_faults[0].name(), "cx-drift");
    }

    #[test]
    fn test_run_file_generates_every_fault() {
        let (_dir, path) = write_run_file(RUN_FILE);
        let run = RunFile::from_file(&path).unwrap();
        let singles: Vec<_> = run.single_faults.iter().map(|s| s.build().unwrap()).collect();
        let twos: Vec<_> = run.two_faults.iter().map(|s| s.build().unwrap()).collect();

        let qatg = Qatg::new(run.generator.clone()).unwrap();
        let configurations = qatg
            .test_configuration(
                &singles,
                &twos,
                &run.single_initial_state().unwrap(),
                &run.two_initial_state().unwrap(),
            )
            .unwrap();

        assert_eq!(configurations.len(), 2);
        assert_eq!(configurations[0].state(), GenerationState::Capped);
        assert_eq!(configurations[0].template.len(), 3);
        assert_eq!(configurations[1].kind, ActivationKind::Two);

        let json = serde_json::to_value(&configurations).unwrap();
        assert_eq!(json[0]["fault"], "u-noop");
        assert_eq!(json[0]["template"]["state"], "capped");
        assert_eq!(json[1]["kind"], "two");
    }

    #[test]
    fn test_missing_run_file() {
        let err = RunFile::from_file("/nonexistent/run.yaml").unwrap_err();
        assert!(matches!(err, QatgError::Io(_)));
    }

    #[test]
    fn test_malformed_run_file() {
        let (_dir, path) = write_run_file("generator: [not, a, map]\n");
        let err = RunFile::from_file(&path).unwrap_err();
        assert!(matches!(err, QatgError::Parse(_)));
    }

    #[test]
    fn test_unknown_fault_type() {
        let (_dir, path) = write_run_file(
            "generator:\n  circuit_size: 1\nsingle_faults:\n  - type: teleport\n    name: x\n",
        );
        assert!(matches!(
            RunFile::from_file(&path),
            Err(QatgError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_generator_section() {
        let (_dir, path) = write_run_file("generator:\n  circuit_size: 1\n  search:\n    step: 0\n");
        let err = RunFile::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("search.step"));
    }
}

// ============================================================================
// commands::common tests
// ============================================================================

mod common_tests {
    use qatg_synth::{BasisGates, BasisSynthesizer, Decomposition};

    /// Equivalent to commands::common::resolve_basis
    fn resolve_basis(basis: &str) -> anyhow::Result<BasisGates> {
        if let Some(preset) = BasisGates::preset(basis) {
            return Ok(preset);
        }
        let gates: Vec<&str> = basis
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .collect();
        if gates.len() < 2 {
            anyhow::bail!("Unknown basis: '{basis}'");
        }
        Ok(BasisGates::new(gates))
    }

    #[test]
    fn test_basis_presets() {
        assert_eq!(resolve_basis("ibm").unwrap(), BasisGates::ibm());
        assert_eq!(resolve_basis("U3").unwrap(), BasisGates::u3());
        assert_eq!(resolve_basis("zyz").unwrap(), BasisGates::zyz());
    }

    #[test]
    fn test_basis_gate_list() {
        let basis = resolve_basis("rz, rx, cz").unwrap();
        assert!(basis.contains("rx"));
        let synth = BasisSynthesizer::new(basis).unwrap();
        assert_eq!(synth.decomposition(), Decomposition::ZXZ);
    }

    #[test]
    fn test_unknown_basis() {
        let err = resolve_basis("bogus").unwrap_err();
        assert!(err.to_string().contains("Unknown basis"));
    }

    #[test]
    fn test_unsynthesizable_gate_list() {
        let basis = resolve_basis("h,cx").unwrap();
        assert!(BasisSynthesizer::new(basis).is_err());
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qatg")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Generate {
            #[arg(short, long)]
            config: String,
            #[arg(short, long)]
            output: Option<String>,
            #[arg(long)]
            quiet: bool,
        },
        Synthesize {
            #[arg(short, long, default_value = "ibm")]
            basis: String,
            #[arg(long, allow_hyphen_values = true)]
            theta: f64,
            #[arg(long, allow_hyphen_values = true)]
            phi: f64,
            #[arg(long, allow_hyphen_values = true)]
            lambda: f64,
        },
        Version,
    }

    #[test]
    fn test_parse_generate_minimal() {
        let cli = TestCli::try_parse_from(["qatg", "generate", "-c", "run.yaml"]).unwrap();
        match cli.command {
            TestCommands::Generate {
                config,
                output,
                quiet,
            } => {
                assert_eq!(config, "run.yaml");
                assert!(output.is_none());
                assert!(!quiet);
            }
            _ => panic!("expected Generate"),
        }
    }

    #[test]
    fn test_parse_generate_with_output() {
        let cli = TestCli::try_parse_from([
            "qatg", "generate", "--config", "run.yaml", "-o", "out.json", "--quiet",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Generate { output, quiet, .. } => {
                assert_eq!(output.as_deref(), Some("out.json"));
                assert!(quiet);
            }
            _ => panic!("expected Generate"),
        }
    }

    #[test]
    fn test_parse_generate_requires_config() {
        assert!(TestCli::try_parse_from(["qatg", "generate"]).is_err());
    }

    #[test]
    fn test_parse_synthesize_negative_angles() {
        let cli = TestCli::try_parse_from([
            "qatg", "synthesize", "--theta", "0.5", "--phi", "-1.25", "--lambda", "-3",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Synthesize {
                basis,
                theta,
                phi,
                lambda,
            } => {
                assert_eq!(basis, "ibm");
                assert_eq!(theta, 0.5);
                assert_eq!(phi, -1.25);
                assert_eq!(lambda, -3.0);
            }
            _ => panic!("expected Synthesize"),
        }
    }

    #[test]
    fn test_parse_verbosity() {
        let cli = TestCli::try_parse_from(["qatg", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(TestCli::try_parse_from(["qatg", "compile"]).is_err());
    }
}
