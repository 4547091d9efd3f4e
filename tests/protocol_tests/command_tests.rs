//! Command Tests
//!
//! Validation of command-line words into commands, per generation.

use sorictl::protocol::{encode, Command, Invocation};
use sorictl::{ClientError, Generation};

fn parse(generation: Generation, operation: &str, args: &[&str]) -> sorictl::Result<Invocation> {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    Invocation::parse(generation, operation, &args)
}

fn usage_message(result: sorictl::Result<Invocation>) -> String {
    match result {
        Err(ClientError::Usage(message)) => message,
        other => panic!("Expected usage error, got {:?}", other),
    }
}

// =============================================================================
// Generation 1
// =============================================================================

#[test]
fn test_create_project_with_template() {
    let invocation = parse(Generation::One, "createProject", &["demo", "sandbox", "genX"]).unwrap();
    let Invocation::Send(command) = invocation else {
        panic!("Expected a command");
    };

    let message = command.to_message();
    assert_eq!(message.operation(), "createProject");
    assert_eq!(message.get("name"), Some("demo"));
    assert_eq!(message.get("playground"), Some("sandbox"));
    assert_eq!(message.get("engine"), Some("genX"));
}

#[test]
fn test_create_project_missing_args() {
    let message = usage_message(parse(Generation::One, "createProject", &["demo"]));
    assert_eq!(message, "Expected createProject <name> <playground> <engine>");
}

#[test]
fn test_run_with_fitness() {
    let invocation = parse(Generation::One, "run", &["xor", "10"]).unwrap();
    assert_eq!(
        invocation,
        Invocation::Send(Command::Run {
            minutes: "10".to_string(),
            fitness: Some("xor".to_string()),
        })
    );

    let Invocation::Send(command) = invocation else { unreachable!() };
    let message = command.to_message();
    let keys: Vec<&str> = message.fields().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["fitness", "minutes"]);
}

#[test]
fn test_individual_commands() {
    assert_eq!(
        parse(Generation::One, "exportIndividual", &["17"]).unwrap(),
        Invocation::Send(Command::ExportIndividual { id: "17".to_string() })
    );
    assert_eq!(
        parse(Generation::One, "perform", &["17"]).unwrap(),
        Invocation::Send(Command::Perform { id: "17".to_string() })
    );
    assert_eq!(
        usage_message(parse(Generation::One, "perform", &[])),
        "Expected perform <id>"
    );
}

#[test]
fn test_generation_one_rejects_export_pop() {
    let message = usage_message(parse(Generation::One, "exportPop", &["0", "out.pop"]));
    assert!(message.starts_with("Unknown operation 'exportPop' for generation 1"));
}

#[test]
fn test_status_query_can_be_sent_directly() {
    assert_eq!(
        parse(Generation::One, "getLastSnapshot", &[]).unwrap(),
        Invocation::Send(Command::LastSnapshot)
    );
}

// =============================================================================
// Generation 2
// =============================================================================

#[test]
fn test_create_project_without_template() {
    let invocation = parse(Generation::Two, "createProject", &["demo"]).unwrap();
    let Invocation::Send(command) = invocation else {
        panic!("Expected a command");
    };

    let message = command.to_message();
    assert_eq!(message.fields().count(), 1);
    assert_eq!(message.get("playground"), None);
}

#[test]
fn test_generation_two_run_takes_minutes_only() {
    assert_eq!(
        parse(Generation::Two, "run", &["30"]).unwrap(),
        Invocation::Send(Command::Run {
            minutes: "30".to_string(),
            fitness: None,
        })
    );
    assert_eq!(
        usage_message(parse(Generation::Two, "run", &["xor", "30"])),
        "Expected run <minutes>"
    );
}

#[test]
fn test_export_pop() {
    let invocation = parse(Generation::Two, "exportPop", &["2", "best.pop"]).unwrap();
    let Invocation::Send(command) = invocation else {
        panic!("Expected a command");
    };

    let message = command.to_message();
    assert_eq!(message.get("pop"), Some("2"));
    assert_eq!(message.get("filename"), Some("best.pop"));
    assert_eq!(
        usage_message(parse(Generation::Two, "exportPop", &["2"])),
        "Expected exportPop <idx> <filename>"
    );
}

#[test]
fn test_generation_two_rejects_perform() {
    let message = usage_message(parse(Generation::Two, "perform", &["1"]));
    assert!(message.contains("recentStats"));
    assert!(message.contains("follow"));
}

#[test]
fn test_generation_two_bare_operations() {
    for (operation, command) in [
        ("getState", Command::GetState),
        ("listProjects", Command::ListProjects),
        ("stop", Command::Stop),
        ("getConfig", Command::GetConfig),
    ] {
        assert_eq!(
            parse(Generation::Two, operation, &[]).unwrap(),
            Invocation::Send(command.clone())
        );

        let json = String::from_utf8(encode(&command.to_message()).unwrap()).unwrap();
        assert_eq!(json, format!("{{\"operation\":\"{}\"}}", operation));

        assert_eq!(
            usage_message(parse(Generation::Two, operation, &["extra"])),
            format!("Expected {}", operation)
        );
    }
}

#[test]
fn test_generation_one_rejects_bare_generation_two_operations() {
    for operation in ["getState", "listProjects", "stop", "getConfig"] {
        let message = usage_message(parse(Generation::One, operation, &[]));
        assert!(message.starts_with(&format!(
            "Unknown operation '{}' for generation 1",
            operation
        )));
    }
}

// =============================================================================
// Shared
// =============================================================================

#[test]
fn test_follow_is_client_side() {
    assert_eq!(parse(Generation::One, "follow", &[]).unwrap(), Invocation::Follow);
    assert_eq!(parse(Generation::Two, "follow", &[]).unwrap(), Invocation::Follow);
    assert_eq!(usage_message(parse(Generation::One, "follow", &["now"])), "Expected follow");
}

#[test]
fn test_project_lifecycle_names() {
    for generation in [Generation::One, Generation::Two] {
        assert_eq!(
            parse(generation, "loadProject", &["demo"]).unwrap(),
            Invocation::Send(Command::LoadProject { name: "demo".to_string() })
        );
        assert_eq!(
            parse(generation, "deleteProject", &["demo"]).unwrap(),
            Invocation::Send(Command::DeleteProject { name: "demo".to_string() })
        );
        assert_eq!(
            usage_message(parse(generation, "deleteProject", &[])),
            "Expected deleteProject <name>"
        );
    }
}

#[test]
fn test_unknown_operation() {
    let message = usage_message(parse(Generation::Two, "launch", &[]));
    assert_eq!(
        message,
        "Unknown operation 'launch' for generation 2. Expected one of: createProject, \
         loadProject, deleteProject, run, exportPop, set, recentStats, getState, listProjects, \
         stop, getConfig, follow"
    );
}

#[test]
fn test_status_per_generation() {
    assert_eq!(Command::status(Generation::One).operation(), "getLastSnapshot");
    assert_eq!(Command::status(Generation::Two).operation(), "recentStats");
}
