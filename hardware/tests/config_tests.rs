//! Tests for configuration loading and statistics reporting.

mod common;

use std::io::Write;

use common::{run_program, Program};
use pretty_assertions::assert_eq;
use yess::common::error::SimError;
use yess::config::Config;
use yess::core::memory::DEFAULT_MEMORY_SIZE;
use yess::isa::abi::*;

/// Tests the defaults of an empty configuration.
#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::from_toml_str("").expect("empty config");
    assert_eq!(config, Config::default());
    assert_eq!(config.memory.size, DEFAULT_MEMORY_SIZE);
    assert_eq!(config.general.max_cycles, 0);
    assert!(config.output.print_stats);
    assert!(!config.output.stats_json);
}

/// Tests that a partial section keeps the defaults of its other keys.
#[test]
fn test_partial_config() {
    let config = Config::from_toml_str(
        r#"
[general]
max_cycles = 1000

[output]
stats_json = true
"#,
    )
    .expect("partial config");

    assert_eq!(config.general.max_cycles, 1000);
    assert_eq!(config.memory.size, DEFAULT_MEMORY_SIZE);
    assert!(config.output.print_stats);
    assert!(config.output.stats_json);
}

/// Tests that a `[general]` section without the trace key keeps the
/// build's trace default.
#[test]
fn test_general_section_keeps_trace_default() {
    let config = Config::from_toml_str("[general]\nmax_cycles = 5").expect("general only");
    assert_eq!(config.general.max_cycles, 5);
    assert_eq!(
        config.general.trace_instructions,
        cfg!(feature = "always-trace")
    );
    assert_eq!(
        config.general.trace_instructions,
        Config::default().general.trace_instructions
    );
}

/// Tests rejected memory sizes.
#[test]
fn test_invalid_memory_size() {
    for text in ["[memory]\nsize = 0", "[memory]\nsize = 4098"] {
        let err = Config::from_toml_str(text).expect_err("invalid size");
        assert!(matches!(err, SimError::Config(_)), "{text}");
    }
}

/// Tests that malformed TOML is a parse error.
#[test]
fn test_malformed_toml() {
    let err = Config::from_toml_str("[general\nmax_cycles = 1").expect_err("bad toml");
    assert!(matches!(err, SimError::ConfigParse(_)));

    let err = Config::from_toml_str("[general]\nmax_cycles = \"many\"").expect_err("bad type");
    assert!(matches!(err, SimError::ConfigParse(_)));
}

/// Tests reading the configuration from a file.
#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[memory]\nsize = 8192").expect("write config");

    let config = Config::from_file(file.path()).expect("config file");
    assert_eq!(config.memory.size, 8192);

    assert!(matches!(
        Config::from_file("/nonexistent/yess.toml"),
        Err(SimError::Io(_))
    ));
}

/// Tests that the shipped configuration parses to the defaults.
#[test]
fn test_shipped_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/default.toml");
    let config = Config::from_file(path).expect("shipped config");
    assert_eq!(config.memory, Config::default().memory);
    assert_eq!(config.output, Config::default().output);
}

/// Tests that the statistics report and its JSON form agree with the run.
#[test]
fn test_stats_report() {
    let mut program = Program::new();
    program
        .irmovl(0x100, REG_EBP)
        .mrmovl(0, REG_EBP, REG_EAX)
        .addl(REG_EAX, REG_EAX)
        .halt();
    let (h, _) = run_program(&program);
    let stats = &h.cpu.stats;

    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.stalls_load_use, 1);

    let mut report = Vec::new();
    stats.print(&mut report).expect("print stats");
    let report = String::from_utf8(report).expect("utf8");
    assert!(report.contains(&format!("sim_cycles               {}", stats.cycles)));
    assert!(report.contains("stalls.load_use        1"));

    let json: serde_json::Value =
        serde_json::from_str(&stats.to_json().expect("serialize")).expect("valid json");
    assert_eq!(json["cycles"], stats.cycles);
    assert_eq!(json["instructions_retired"], 3);
    assert!(json.get("start_time").is_none());
}
