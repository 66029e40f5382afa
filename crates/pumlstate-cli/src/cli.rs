//! Command-line interface for the pumlstate utility
//!
//! Provides a CLI to check PlantUML state diagrams and inspect the parsed
//! element tree or the resolved state machine graph.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use pumlstate::logging::init_logging;
use pumlstate::prelude::*;
use pumlstate::PSEUDOSTATE;

/// Pumlstate - Parse PlantUML state diagrams into state machine graphs
#[derive(Parser)]
#[command(name = "pumlstate")]
#[command(about = "A Rust utility to parse PlantUML state diagrams into state machine graphs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and resolve a diagram, reporting any errors
    Check {
        /// Input file containing the diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the parsed diagram element tree
    Elements {
        /// Input file containing the diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the resolved state machine
    Machine {
        /// Input file containing the diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
pub struct PumlstateApp;

impl PumlstateApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Initialize logging with CLI flags (environment variables take precedence)
        let log_level_str = std::env::var("PUMLSTATE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("PUMLSTATE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        // Reinitialize logging with CLI/environment settings
        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }
        debug!(
            log_level = log_level_str.as_deref(),
            log_format = log_format_str.as_deref(),
            "Logging configured"
        );

        if cli.verbose {
            eprintln!("Pumlstate v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Check { input } => self.check_command(input, cli.verbose),
            Commands::Elements { input, output } => {
                self.elements_command(input, output, cli.verbose)
            }
            Commands::Machine {
                input,
                output,
                json,
            } => self.machine_command(input, output, json, cli.verbose),
        }
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match compile(&content) {
            Ok(machine) => {
                println!(
                    "✓ Valid state diagram: {} ({} states)",
                    machine.name(),
                    machine.state_count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid state diagram: {}", e);
                Err(e.into())
            }
        }
    }

    /// Handle the elements command
    fn elements_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let diagram = parse(&content)?;

        if verbose {
            eprintln!(
                "Parsed diagram '{}' with {} top-level elements",
                diagram.name,
                diagram.elements.len()
            );
        }

        let mut rendered = String::new();
        render_elements(&diagram.elements, 0, &mut rendered);
        self.write_output(output, &rendered)
    }

    /// Handle the machine command
    fn machine_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let machine = compile(&content)?;

        if verbose {
            eprintln!(
                "Resolved machine '{}' with {} states",
                machine.name(),
                machine.state_count()
            );
        }

        let rendered = if json {
            serde_json::to_string_pretty(&machine_json(&machine))?
        } else {
            render_machine(&machine)
        };
        self.write_output(output, &rendered)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) => {
                if path.to_string_lossy() == "-" {
                    // Read from stdin
                    let mut content = String::new();
                    io::stdin().read_to_string(&mut content)?;
                    Ok(content)
                } else {
                    // Read from file
                    fs::read_to_string(&path).map_err(|e| {
                        anyhow!("Failed to read input file '{}': {}", path.display(), e)
                    })
                }
            }
            None => {
                // No input file specified, read from stdin
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) => {
                if path.to_string_lossy() == "-" {
                    // Write to stdout
                    print!("{}", stdout_content);
                    io::stdout().flush()?;
                } else {
                    // Write to file
                    fs::write(&path, content).map_err(|e| {
                        anyhow!("Failed to write output file '{}': {}", path.display(), e)
                    })?;
                }
            }
            None => {
                // No output file specified, write to stdout
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for PumlstateApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the parsed element tree, one element per line, indented by depth
fn render_elements(elements: &[DiagramElement], depth: usize, out: &mut String) {
    for element in elements {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&element.to_string());
        out.push('\n');
        if let DiagramElement::State(state) = element {
            render_elements(&state.children, depth + 1, out);
        }
    }
}

/// Render the resolved machine as an indented outline
fn render_machine(machine: &StateMachine) -> String {
    let mut out = format!(
        "machine {} ({} states)\n",
        machine.name(),
        machine.state_count()
    );
    for initial in machine.initial_transitions() {
        out.push_str(&initial_line(machine, initial));
        out.push('\n');
    }
    for id in machine.children() {
        render_state(machine, *id, 0, &mut out);
    }
    out
}

fn render_state(machine: &StateMachine, id: VertexId, depth: usize, out: &mut String) {
    let state = machine.state(id);
    let pad = "  ".repeat(depth);
    out.push_str(&format!("{}state {}\n", pad, state.name()));

    let inner = "  ".repeat(depth + 1);
    for action in state.entry_actions() {
        out.push_str(&format!("{}{}\n", inner, lifecycle_line("entry", action)));
    }
    for action in state.exit_actions() {
        out.push_str(&format!("{}{}\n", inner, lifecycle_line("exit", action)));
    }
    for response in state.event_responses() {
        out.push_str(&format!("{}{}\n", inner, response_line(response)));
    }
    for transition in state.transitions() {
        out.push_str(&format!("{}{}\n", inner, transition_line(machine, transition)));
    }
    for initial in state.initial_transitions() {
        out.push_str(&format!("{}{}\n", inner, initial_line(machine, initial)));
    }
    for child in state.children() {
        render_state(machine, *child, depth + 1, out);
    }
}

fn lifecycle_line(kind: &str, action: &ActionReference) -> String {
    let mut line = kind.to_string();
    if !action.guard_name.is_empty() {
        line.push_str(&format!(" [{}]", action.guard_name));
    }
    if !action.action_name.is_empty() {
        line.push_str(&format!(" / {}", action.action_name));
    }
    line
}

fn response_line(response: &EventResponse) -> String {
    let mut line = format!("on {}", response.event_name);
    if !response.guard_name.is_empty() {
        line.push_str(&format!(" [{}]", response.guard_name));
    }
    if !response.action_name.is_empty() {
        line.push_str(&format!(" / {}", response.action_name));
    }
    line
}

fn transition_line(machine: &StateMachine, transition: &EventTransition) -> String {
    let mut line = format!("--> {}", target_name(machine, transition.target));
    let decorated = !transition.event_name.is_empty()
        || !transition.guard_name.is_empty()
        || !transition.action_name.is_empty();
    if decorated {
        line.push_str(" :");
        if !transition.event_name.is_empty() {
            line.push_str(&format!(" {}", transition.event_name));
        }
        if !transition.guard_name.is_empty() {
            line.push_str(&format!(" [{}]", transition.guard_name));
        }
        if !transition.action_name.is_empty() {
            line.push_str(&format!(" / {}", transition.action_name));
        }
    }
    line
}

fn initial_line(machine: &StateMachine, initial: &InitialTransition) -> String {
    let mut line = format!("[*] --> {}", machine.state(initial.target).name());
    if !initial.action_name.is_empty() {
        line.push_str(&format!(" : / {}", initial.action_name));
    }
    line
}

fn target_name(machine: &StateMachine, target: TransitionTarget) -> String {
    match target {
        TransitionTarget::State(id) => machine.state(id).name().to_string(),
        TransitionTarget::Final => PSEUDOSTATE.to_string(),
    }
}

fn machine_json(machine: &StateMachine) -> serde_json::Value {
    let states: Vec<serde_json::Value> = machine
        .states()
        .map(|(_, state)| {
            let parent = match state.parent() {
                Parent::Machine => serde_json::Value::Null,
                Parent::State(id) => machine.state(id).name().into(),
            };
            serde_json::json!({
                "name": state.name(),
                "parent": parent,
                "children": child_names(machine, state.children()),
                "entry_actions": state.entry_actions().iter().map(action_json).collect::<Vec<_>>(),
                "exit_actions": state.exit_actions().iter().map(action_json).collect::<Vec<_>>(),
                "event_responses": state
                    .event_responses()
                    .iter()
                    .map(response_json)
                    .collect::<Vec<_>>(),
                "transitions": state
                    .transitions()
                    .iter()
                    .map(|t| transition_json(machine, t))
                    .collect::<Vec<_>>(),
                "initial_transitions": state
                    .initial_transitions()
                    .iter()
                    .map(|t| initial_json(machine, t))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "name": machine.name(),
        "state_count": machine.state_count(),
        "children": child_names(machine, machine.children()),
        "initial_transitions": machine
            .initial_transitions()
            .iter()
            .map(|t| initial_json(machine, t))
            .collect::<Vec<_>>(),
        "states": states,
    })
}

fn child_names(machine: &StateMachine, children: &[VertexId]) -> Vec<String> {
    children
        .iter()
        .map(|id| machine.state(*id).name().to_string())
        .collect()
}

fn action_json(action: &ActionReference) -> serde_json::Value {
    serde_json::json!({
        "action": action.action_name,
        "guard": action.guard_name,
    })
}

fn response_json(response: &EventResponse) -> serde_json::Value {
    serde_json::json!({
        "event": response.event_name,
        "guard": response.guard_name,
        "action": response.action_name,
    })
}

fn transition_json(machine: &StateMachine, transition: &EventTransition) -> serde_json::Value {
    serde_json::json!({
        "event": transition.event_name,
        "guard": transition.guard_name,
        "action": transition.action_name,
        "target": target_name(machine, transition.target),
    })
}

fn initial_json(machine: &StateMachine, initial: &InitialTransition) -> serde_json::Value {
    serde_json::json!({
        "target": machine.state(initial.target).name(),
        "action": initial.action_name,
    })
}
