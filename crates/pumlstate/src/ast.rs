//! Parse model for PlantUML state diagrams
//!
//! The parser produces a [`Diagram`]: a name plus the ordered list of
//! [`DiagramElement`]s that appeared between `@startuml` and `@enduml`.
//! Composite states nest further elements, so the model is a tree. Nothing
//! here is resolved; names are plain strings until the resolver checks them.

use std::fmt;

/// The `[*]` marker: initial pseudostate as a source, final as a destination.
pub const PSEUDOSTATE: &str = "[*]";

/// Event name that marks an internal transition as an entry action.
pub const ENTRY_EVENT: &str = "entry";

/// Event name that marks an internal transition as an exit action.
pub const EXIT_EVENT: &str = "exit";

/// A parsed diagram: title plus top-level elements in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub name: String,
    pub elements: Vec<DiagramElement>,
}

/// One element of a diagram body
///
/// Every match over this enum is exhaustive; adding a variant must break
/// every consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramElement {
    State(StateDefinition),
    Internal(InternalTransition),
    External(ExternalTransition),
}

/// A `state` declaration, possibly with a nested element block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDefinition {
    /// Identifier used for lookups and transition endpoints
    pub short_name: String,
    /// Display alias from `state "Long Name" as Short`; never used for lookup
    pub long_name: Option<String>,
    /// Nested elements from the `{ ... }` block, in source order
    pub children: Vec<DiagramElement>,
}

/// A transition between two vertices, `Source --> Destination : decorations`
///
/// Decorations default to the empty string when the diagram omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTransition {
    pub source: String,
    pub destination: String,
    pub event_name: String,
    pub guard_name: String,
    pub action_name: String,
}

impl ExternalTransition {
    /// True when the source is the `[*]` pseudostate marker
    pub fn is_initial(&self) -> bool {
        self.source == PSEUDOSTATE
    }

    /// True when the destination is the `[*]` pseudostate marker
    pub fn is_final(&self) -> bool {
        self.destination == PSEUDOSTATE
    }

    fn is_decorated(&self) -> bool {
        !self.event_name.is_empty() || !self.guard_name.is_empty() || !self.action_name.is_empty()
    }
}

/// In-state event handling, `State : Event [Guard] / Action`
///
/// Guard and action default to the empty string when omitted. Events named
/// `entry` and `exit` are lifecycle actions, not responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalTransition {
    pub source: String,
    pub event_name: String,
    pub guard_name: String,
    pub action_name: String,
}

impl InternalTransition {
    /// True when this line declares an entry action
    pub fn is_entry(&self) -> bool {
        self.event_name == ENTRY_EVENT
    }

    /// True when this line declares an exit action
    pub fn is_exit(&self) -> bool {
        self.event_name == EXIT_EVENT
    }
}

impl fmt::Display for DiagramElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramElement::State(state) => state.fmt(f),
            DiagramElement::Internal(transition) => transition.fmt(f),
            DiagramElement::External(transition) => transition.fmt(f),
        }
    }
}

/// Renders the declaration header; nested children are not included
impl fmt::Display for StateDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.long_name {
            Some(long_name) => write!(f, "state \"{}\" as {}", long_name, self.short_name),
            None => write!(f, "state {}", self.short_name),
        }
    }
}

impl fmt::Display for ExternalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.source, self.destination)?;
        if self.is_decorated() {
            write!(f, " :")?;
            if !self.event_name.is_empty() {
                write!(f, " {}", self.event_name)?;
            }
            if !self.guard_name.is_empty() {
                write!(f, " [{}]", self.guard_name)?;
            }
            if !self.action_name.is_empty() {
                write!(f, " / {}", self.action_name)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for InternalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.source, self.event_name)?;
        if !self.guard_name.is_empty() {
            write!(f, " [{}]", self.guard_name)?;
        }
        if !self.action_name.is_empty() {
            write!(f, " / {}", self.action_name)?;
        }
        Ok(())
    }
}
