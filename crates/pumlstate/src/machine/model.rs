//! Resolved state machine graph
//!
//! The machine owns every [`State`] in a single arena and hands out
//! [`VertexId`] handles. Parent links are plain ids, so the graph stays
//! strictly tree-owned with no reference cycles.

use tracing::trace;

/// Handle to a state in the machine's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Position of the state in [`StateMachine::states`] iteration order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owner of a state, either the machine root or another state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    Machine,
    State(VertexId),
}

/// Entry or exit action attached to a state
///
/// The guard is preserved verbatim even though lifecycle actions rarely
/// carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReference {
    pub action_name: String,
    pub guard_name: String,
}

/// Same-state reaction to an event, with no transfer of control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventResponse {
    pub event_name: String,
    pub guard_name: String,
    pub action_name: String,
}

/// Where an event transition lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionTarget {
    /// Another state in the machine
    State(VertexId),
    /// The final pseudostate
    Final,
}

/// Event-triggered transition out of a state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTransition {
    pub event_name: String,
    pub guard_name: String,
    pub action_name: String,
    pub target: TransitionTarget,
}

/// Default transition taken on entering a scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialTransition {
    pub target: VertexId,
    pub action_name: String,
}

/// A named vertex in the resolved graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    name: String,
    parent: Parent,
    children: Vec<VertexId>,
    entry_actions: Vec<ActionReference>,
    exit_actions: Vec<ActionReference>,
    event_responses: Vec<EventResponse>,
    transitions: Vec<EventTransition>,
    initial_transitions: Vec<InitialTransition>,
}

impl State {
    pub(crate) fn new(name: String, parent: Parent) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            event_responses: Vec::new(),
            transitions: Vec::new(),
            initial_transitions: Vec::new(),
        }
    }

    /// Short name, unique across the whole machine
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owner of this state
    pub fn parent(&self) -> Parent {
        self.parent
    }

    /// Directly nested states in declaration order
    pub fn children(&self) -> &[VertexId] {
        &self.children
    }

    /// Actions run when the state is entered
    pub fn entry_actions(&self) -> &[ActionReference] {
        &self.entry_actions
    }

    /// Actions run when the state is exited
    pub fn exit_actions(&self) -> &[ActionReference] {
        &self.exit_actions
    }

    /// Event reactions that stay within this state
    pub fn event_responses(&self) -> &[EventResponse] {
        &self.event_responses
    }

    /// Event transitions leaving this state
    pub fn transitions(&self) -> &[EventTransition] {
        &self.transitions
    }

    /// Default transitions into this state's children
    pub fn initial_transitions(&self) -> &[InitialTransition] {
        &self.initial_transitions
    }

    pub(crate) fn add_child(&mut self, child: VertexId) {
        self.children.push(child);
    }

    pub(crate) fn add_entry_action(&mut self, action: ActionReference) {
        self.entry_actions.push(action);
    }

    pub(crate) fn add_exit_action(&mut self, action: ActionReference) {
        self.exit_actions.push(action);
    }

    pub(crate) fn add_event_response(&mut self, response: EventResponse) {
        self.event_responses.push(response);
    }

    pub(crate) fn add_transition(&mut self, transition: EventTransition) {
        self.transitions.push(transition);
    }

    pub(crate) fn add_initial_transition(&mut self, transition: InitialTransition) {
        self.initial_transitions.push(transition);
    }
}

/// Resolved state machine graph, root of the vertex hierarchy
///
/// States are stored in registration order, so iteration is deterministic
/// and matches the declaration order of the source diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMachine {
    name: String,
    states: Vec<State>,
    children: Vec<VertexId>,
    initial_transitions: Vec<InitialTransition>,
}

impl StateMachine {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            states: Vec::new(),
            children: Vec::new(),
            initial_transitions: Vec::new(),
        }
    }

    /// Machine name, taken from the diagram title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level states in declaration order
    pub fn children(&self) -> &[VertexId] {
        &self.children
    }

    /// Default transitions taken when the machine starts
    pub fn initial_transitions(&self) -> &[InitialTransition] {
        &self.initial_transitions
    }

    /// Total number of states at every nesting depth
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Look up a state by handle
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this machine.
    pub fn state(&self, id: VertexId) -> &State {
        &self.states[id.index()]
    }

    /// Iterate over every state with its handle, in registration order
    pub fn states(&self) -> impl Iterator<Item = (VertexId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(index, state)| (VertexId(index), state))
    }

    /// Find a state by its short name
    pub fn find_state(&self, name: &str) -> Option<(VertexId, &State)> {
        self.states().find(|(_, state)| state.name() == name)
    }

    pub(crate) fn push_state(&mut self, state: State) -> VertexId {
        let id = VertexId(self.states.len());
        trace!(state_name = %state.name(), state_index = id.index(), "Registering state vertex");
        self.states.push(state);
        id
    }

    pub(crate) fn state_mut(&mut self, id: VertexId) -> &mut State {
        &mut self.states[id.index()]
    }

    pub(crate) fn add_child(&mut self, child: VertexId) {
        self.children.push(child);
    }

    pub(crate) fn add_initial_transition(&mut self, transition: InitialTransition) {
        self.initial_transitions.push(transition);
    }
}
