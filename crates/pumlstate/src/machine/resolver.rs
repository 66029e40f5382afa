//! Two-pass conversion from a parsed [`Diagram`] to a [`StateMachine`]
//!
//! Pass 1 walks the element tree in source order and registers every state
//! vertex in a diagram-global lookup, failing on duplicate names. Pass 2
//! walks the same tree again and attaches transitions, event responses, and
//! lifecycle actions, failing on names with no registered vertex. Forward
//! references therefore need no special handling: by the time any edge is
//! attached, every state already exists.

use std::fmt;

use tracing::{debug, trace};

use crate::ast::{Diagram, DiagramElement, ExternalTransition, InternalTransition, StateDefinition};
use crate::error::SemanticError;
use crate::machine::lookup::VertexLookup;
use crate::machine::model::{
    ActionReference, EventResponse, EventTransition, InitialTransition, Parent, State,
    StateMachine, TransitionTarget, VertexId,
};

/// Resolve a parsed diagram into a state machine graph
///
/// The diagram is only borrowed, so callers may resolve the same tree more
/// than once; each call builds its lookup table from scratch.
///
/// # Examples
///
/// ```
/// let diagram = pumlstate::parse("@startuml\nstate Off\n[*] --> Off\n@enduml").unwrap();
/// let machine = pumlstate::resolve(&diagram).unwrap();
/// assert_eq!(machine.state_count(), 1);
/// ```
pub fn resolve(diagram: &Diagram) -> Result<StateMachine, SemanticError> {
    let mut machine = StateMachine::new(diagram.name.clone());
    let mut lookup = VertexLookup::new();

    register_states(&mut machine, &mut lookup, &diagram.elements, Parent::Machine)?;
    debug!(state_count = lookup.len(), "Vertex registration pass completed");

    connect_elements(&mut machine, &lookup, &diagram.elements, Parent::Machine)?;
    debug!(
        machine_name = %machine.name(),
        state_count = machine.state_count(),
        "Connection pass completed"
    );

    Ok(machine)
}

impl Diagram {
    /// Resolve this diagram into a state machine graph
    ///
    /// Convenience wrapper around [`resolve`].
    pub fn to_state_machine(&self) -> Result<StateMachine, SemanticError> {
        resolve(self)
    }
}

/// Pass 1: create a vertex for every state declaration, depth first
fn register_states(
    machine: &mut StateMachine,
    lookup: &mut VertexLookup,
    elements: &[DiagramElement],
    parent: Parent,
) -> Result<(), SemanticError> {
    for element in elements {
        if let DiagramElement::State(definition) = element {
            register_state(machine, lookup, definition, parent)?;
        }
    }
    Ok(())
}

fn register_state(
    machine: &mut StateMachine,
    lookup: &mut VertexLookup,
    definition: &StateDefinition,
    parent: Parent,
) -> Result<(), SemanticError> {
    let id = machine.push_state(State::new(definition.short_name.clone(), parent));
    lookup.insert(&definition.short_name, id)?;
    match parent {
        Parent::Machine => machine.add_child(id),
        Parent::State(parent_id) => machine.state_mut(parent_id).add_child(id),
    }
    register_states(machine, lookup, &definition.children, Parent::State(id))
}

/// Pass 2: attach transitions and lifecycle actions to registered vertices
fn connect_elements(
    machine: &mut StateMachine,
    lookup: &VertexLookup,
    elements: &[DiagramElement],
    scope: Parent,
) -> Result<(), SemanticError> {
    for element in elements {
        match element {
            DiagramElement::State(definition) => {
                let id = find_vertex(lookup, &definition.short_name, definition)?;
                connect_elements(machine, lookup, &definition.children, Parent::State(id))?;
            }
            DiagramElement::Internal(transition) => {
                connect_internal(machine, lookup, transition)?;
            }
            DiagramElement::External(transition) => {
                connect_external(machine, lookup, transition, scope)?;
            }
        }
    }
    Ok(())
}

fn connect_internal(
    machine: &mut StateMachine,
    lookup: &VertexLookup,
    transition: &InternalTransition,
) -> Result<(), SemanticError> {
    let id = find_vertex(lookup, &transition.source, transition)?;
    trace!(
        state_name = %transition.source,
        event_name = %transition.event_name,
        "Attaching internal transition"
    );

    if transition.is_entry() {
        machine.state_mut(id).add_entry_action(ActionReference {
            action_name: transition.action_name.clone(),
            guard_name: transition.guard_name.clone(),
        });
    } else if transition.is_exit() {
        machine.state_mut(id).add_exit_action(ActionReference {
            action_name: transition.action_name.clone(),
            guard_name: transition.guard_name.clone(),
        });
    } else {
        machine.state_mut(id).add_event_response(EventResponse {
            event_name: transition.event_name.clone(),
            guard_name: transition.guard_name.clone(),
            action_name: transition.action_name.clone(),
        });
    }
    Ok(())
}

fn connect_external(
    machine: &mut StateMachine,
    lookup: &VertexLookup,
    transition: &ExternalTransition,
    scope: Parent,
) -> Result<(), SemanticError> {
    trace!(
        source = %transition.source,
        destination = %transition.destination,
        "Attaching external transition"
    );

    if transition.is_initial() {
        let target = find_vertex(lookup, &transition.destination, transition)?;
        let initial = InitialTransition {
            target,
            action_name: transition.action_name.clone(),
        };
        match scope {
            Parent::Machine => machine.add_initial_transition(initial),
            Parent::State(parent_id) => {
                machine.state_mut(parent_id).add_initial_transition(initial)
            }
        }
        return Ok(());
    }

    let source = find_vertex(lookup, &transition.source, transition)?;
    let target = if transition.is_final() {
        TransitionTarget::Final
    } else {
        TransitionTarget::State(find_vertex(lookup, &transition.destination, transition)?)
    };

    machine.state_mut(source).add_transition(EventTransition {
        event_name: transition.event_name.clone(),
        guard_name: transition.guard_name.clone(),
        action_name: transition.action_name.clone(),
        target,
    });
    Ok(())
}

fn find_vertex(
    lookup: &VertexLookup,
    name: &str,
    referenced_by: &impl fmt::Display,
) -> Result<VertexId, SemanticError> {
    lookup.get(name).ok_or_else(|| {
        SemanticError::undefined_vertex(name.to_string(), referenced_by.to_string())
    })
}
