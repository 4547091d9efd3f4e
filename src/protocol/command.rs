//! Command definitions
//!
//! The closed set of operations a client can issue, validated from
//! command-line words before any network activity.

use crate::config::Generation;
use crate::error::{ClientError, Result};
use super::Message;

/// Client-side pseudo-operation that switches to follow mode
pub const FOLLOW: &str = "follow";

/// Accepted operations and their positional parameters, per generation
const GENERATION_ONE: &[(&str, &[&str])] = &[
    ("createProject", &["name", "playground", "engine"]),
    ("loadProject", &["name"]),
    ("deleteProject", &["name"]),
    ("run", &["fitness", "minutes"]),
    ("exportIndividual", &["id"]),
    ("perform", &["id"]),
    ("set", &["key", "value"]),
    ("getLastSnapshot", &[]),
    (FOLLOW, &[]),
];

const GENERATION_TWO: &[(&str, &[&str])] = &[
    ("createProject", &["name"]),
    ("loadProject", &["name"]),
    ("deleteProject", &["name"]),
    ("run", &["minutes"]),
    ("exportPop", &["idx", "filename"]),
    ("set", &["key", "value"]),
    ("recentStats", &[]),
    ("getState", &[]),
    ("listProjects", &[]),
    ("stop", &[]),
    ("getConfig", &[]),
    (FOLLOW, &[]),
];

/// Playground and engine chosen when a generation 1 project is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTemplate {
    pub playground: String,
    pub engine: String,
}

/// A validated command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a named project (generation 1 also picks playground/engine)
    CreateProject {
        name: String,
        template: Option<ProjectTemplate>,
    },

    /// Load a named project
    LoadProject { name: String },

    /// Delete a named project
    DeleteProject { name: String },

    /// Run the current project for a number of minutes
    Run {
        minutes: String,
        fitness: Option<String>,
    },

    /// Export one individual by id
    ExportIndividual { id: String },

    /// Perform the action of one individual by id
    Perform { id: String },

    /// Export a population segment to a server-side file
    ExportPop { pop: String, filename: String },

    /// Set a configuration value
    Set { key: String, value: String },

    /// Last snapshot of the running project (generation 1 status query)
    LastSnapshot,

    /// Recent statistics of the running project (generation 2 status query)
    RecentStats,

    /// Host state: idle, running, ...
    GetState,

    /// Names of all stored projects
    ListProjects,

    /// Stop a running project
    Stop,

    /// Current project configuration as JSON
    GetConfig,
}

/// What the user asked the client to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Send one command and print the response
    Send(Command),

    /// Poll the status operation forever
    Follow,
}

impl Invocation {
    /// Validate an operation name and its arguments for a generation
    pub fn parse(generation: Generation, operation: &str, args: &[String]) -> Result<Self> {
        let params = signature(generation, operation).ok_or_else(|| unknown(generation, operation))?;
        if args.len() != params.len() {
            return Err(ClientError::Usage(format!(
                "Expected {}",
                usage_line(operation, params)
            )));
        }

        if operation == FOLLOW {
            return Ok(Invocation::Follow);
        }

        let arg = |i: usize| args[i].clone();
        let command = match (generation, operation) {
            (Generation::One, "createProject") => Command::CreateProject {
                name: arg(0),
                template: Some(ProjectTemplate {
                    playground: arg(1),
                    engine: arg(2),
                }),
            },
            (Generation::Two, "createProject") => Command::CreateProject {
                name: arg(0),
                template: None,
            },
            (_, "loadProject") => Command::LoadProject { name: arg(0) },
            (_, "deleteProject") => Command::DeleteProject { name: arg(0) },
            (Generation::One, "run") => Command::Run {
                fitness: Some(arg(0)),
                minutes: arg(1),
            },
            (Generation::Two, "run") => Command::Run {
                fitness: None,
                minutes: arg(0),
            },
            (_, "exportIndividual") => Command::ExportIndividual { id: arg(0) },
            (_, "perform") => Command::Perform { id: arg(0) },
            (_, "exportPop") => Command::ExportPop {
                pop: arg(0),
                filename: arg(1),
            },
            (_, "set") => Command::Set {
                key: arg(0),
                value: arg(1),
            },
            (_, "getLastSnapshot") => Command::LastSnapshot,
            (_, "recentStats") => Command::RecentStats,
            (_, "getState") => Command::GetState,
            (_, "listProjects") => Command::ListProjects,
            (_, "stop") => Command::Stop,
            (_, "getConfig") => Command::GetConfig,
            _ => return Err(unknown(generation, operation)),
        };

        Ok(Invocation::Send(command))
    }
}

impl Command {
    /// Fixed status query polled in follow mode
    pub fn status(generation: Generation) -> Self {
        match generation {
            Generation::One => Command::LastSnapshot,
            Generation::Two => Command::RecentStats,
        }
    }

    /// Operation name sent on the wire
    pub fn operation(&self) -> &'static str {
        match self {
            Command::CreateProject { .. } => "createProject",
            Command::LoadProject { .. } => "loadProject",
            Command::DeleteProject { .. } => "deleteProject",
            Command::Run { .. } => "run",
            Command::ExportIndividual { .. } => "exportIndividual",
            Command::Perform { .. } => "perform",
            Command::ExportPop { .. } => "exportPop",
            Command::Set { .. } => "set",
            Command::LastSnapshot => "getLastSnapshot",
            Command::RecentStats => "recentStats",
            Command::GetState => "getState",
            Command::ListProjects => "listProjects",
            Command::Stop => "stop",
            Command::GetConfig => "getConfig",
        }
    }

    /// Build the request message, fields in usage order
    pub fn to_message(&self) -> Message {
        let message = Message::new(self.operation());
        match self {
            Command::CreateProject { name, template } => {
                let message = message.with("name", name);
                match template {
                    Some(t) => message
                        .with("playground", &t.playground)
                        .with("engine", &t.engine),
                    None => message,
                }
            }
            Command::LoadProject { name } | Command::DeleteProject { name } => {
                message.with("name", name)
            }
            Command::Run { minutes, fitness } => {
                let message = match fitness {
                    Some(fitness) => message.with("fitness", fitness),
                    None => message,
                };
                message.with("minutes", minutes)
            }
            Command::ExportIndividual { id } | Command::Perform { id } => message.with("id", id),
            Command::ExportPop { pop, filename } => {
                message.with("pop", pop).with("filename", filename)
            }
            Command::Set { key, value } => message.with("key", key).with("value", value),
            Command::LastSnapshot
            | Command::RecentStats
            | Command::GetState
            | Command::ListProjects
            | Command::Stop
            | Command::GetConfig => message,
        }
    }
}

fn signatures(generation: Generation) -> &'static [(&'static str, &'static [&'static str])] {
    match generation {
        Generation::One => GENERATION_ONE,
        Generation::Two => GENERATION_TWO,
    }
}

fn signature(generation: Generation, operation: &str) -> Option<&'static [&'static str]> {
    signatures(generation)
        .iter()
        .find(|(name, _)| *name == operation)
        .map(|(_, params)| *params)
}

fn usage_line(operation: &str, params: &[&str]) -> String {
    let mut line = operation.to_string();
    for param in params {
        line.push_str(" <");
        line.push_str(param);
        line.push('>');
    }
    line
}

fn unknown(generation: Generation, operation: &str) -> ClientError {
    let known: Vec<&str> = signatures(generation).iter().map(|(name, _)| *name).collect();
    ClientError::Usage(format!(
        "Unknown operation '{}' for generation {}. Expected one of: {}",
        operation,
        generation,
        known.join(", ")
    ))
}
