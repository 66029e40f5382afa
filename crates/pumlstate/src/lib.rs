//! Pumlstate - Parse PlantUML state diagrams into state machine graphs
//!
//! A library for parsing the PlantUML state-diagram subset and resolving it into
//! a validated, hierarchical state machine suitable for code generation.
//!
//! # Quick Start
//!
//! ```rust
//! use pumlstate::compile;
//!
//! let input = "@startuml\nstate Off\nstate On\nOff --> On : Toggle\n@enduml";
//! let machine = compile(input).unwrap();
//! assert_eq!(machine.state_count(), 2);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, run the two stages separately:
//!
//! ```rust
//! use pumlstate::prelude::*;
//!
//! let input = "@startuml \"Blinky\"\nstate Off\n[*] --> Off\n@enduml";
//!
//! // Parse into a syntax tree
//! let diagram = parse(input).unwrap();
//! assert_eq!(diagram.name, "Blinky");
//! assert_eq!(diagram.elements.len(), 2);
//!
//! // Resolve into a state machine graph
//! let machine = diagram.to_state_machine().unwrap();
//! let (_, off) = machine.find_state("Off").unwrap();
//! assert_eq!(off.parent(), Parent::Machine);
//! ```

pub mod ast;
pub mod error;
pub mod logging;
pub mod machine;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use logging::*;
pub use machine::*;
pub use parser::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ast::{
        Diagram, DiagramElement, ExternalTransition, InternalTransition, StateDefinition,
    };
    pub use crate::error::{DiagramError, ParseError, SemanticError};
    pub use crate::machine::{
        ActionReference, EventResponse, EventTransition, InitialTransition, Parent, State,
        StateMachine, TransitionTarget, VertexId,
    };
    pub use crate::{compile, parse, resolve};
}

/// Parse and resolve diagram source in one step
///
/// This is the simplest way to turn diagram text into a state machine.
///
/// # Arguments
/// * `input` - PlantUML state-diagram source
///
/// # Returns
/// * `Ok(StateMachine)` - The resolved state machine graph
/// * `Err` - If parsing or resolution fails
///
/// # Example
/// ```rust
/// use pumlstate::compile;
///
/// let machine = compile("@startuml\nstate Idle\n[*] --> Idle\n@enduml").unwrap();
/// assert!(machine.find_state("Idle").is_some());
/// ```
pub fn compile(input: &str) -> Result<StateMachine, DiagramError> {
    let diagram = parser::parse(input)?;
    let machine = machine::resolve(&diagram)?;
    Ok(machine)
}
