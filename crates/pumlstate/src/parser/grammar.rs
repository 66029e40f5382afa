//! Grammar rules for the PlantUML state-diagram subset
//!
//! Rules compose the primitives from [`lexis`](super::lexis) into diagram
//! elements and the diagram itself. Choice is ordered: the first alternative
//! to match wins, so more specific shapes are listed before the shapes they
//! extend.

use chumsky::prelude::*;

use super::lexis::{
    arrow, friendly_method_reference, identifier, inline_whitespace, optional_whitespace,
    pseudostate, quoted_string, symbol,
};
use crate::ast::{Diagram, DiagramElement, ExternalTransition, InternalTransition, StateDefinition};

/// `[ Guard ]`, yielding the normalized guard name
pub fn guard<'src>() -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    symbol('[')
        .ignore_then(friendly_method_reference())
        .then_ignore(symbol(']'))
        .labelled("guard")
}

/// `/ Action`, yielding the normalized action name
///
/// A bare `/` is legal and yields the empty string.
pub fn action<'src>() -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone
{
    symbol('/')
        .ignore_then(friendly_method_reference())
        .labelled("action")
}

/// `State : Event [Guard] / Action`, guard and action optional
pub fn internal_transition<'src>(
) -> impl Parser<'src, &'src str, InternalTransition, extra::Err<Rich<'src, char>>> + Clone {
    inline_whitespace()
        .ignore_then(identifier())
        .then_ignore(symbol(':'))
        .then(identifier())
        .then(guard().or_not())
        .then(action().or_not())
        .map(|(((source, event_name), guard), action)| InternalTransition {
            source,
            event_name,
            guard_name: guard.unwrap_or_default(),
            action_name: action.unwrap_or_default(),
        })
        .labelled("internal transition")
}

/// `[*] --> Dest` with an optional `: / Action` tail
///
/// Initial transitions take no event and no guard.
fn initial_transition<'src>(
) -> impl Parser<'src, &'src str, ExternalTransition, extra::Err<Rich<'src, char>>> + Clone {
    let with_action = pseudostate()
        .then_ignore(arrow())
        .then(identifier())
        .then_ignore(symbol(':'))
        .then(action())
        .map(|((source, destination), action_name)| ExternalTransition {
            source,
            destination,
            event_name: String::new(),
            guard_name: String::new(),
            action_name,
        });

    let without_action =
        pseudostate()
            .then_ignore(arrow())
            .then(identifier())
            .map(|(source, destination)| ExternalTransition {
                source,
                destination,
                event_name: String::new(),
                guard_name: String::new(),
                action_name: String::new(),
            });

    with_action.or(without_action)
}

/// `Source --> Dest : Event [Guard] / Action`, every decoration optional
fn decorated_transition<'src>(
) -> impl Parser<'src, &'src str, ExternalTransition, extra::Err<Rich<'src, char>>> + Clone {
    identifier()
        .then_ignore(arrow())
        .then(pseudostate().or(identifier()))
        .then_ignore(symbol(':'))
        .then(identifier().or_not())
        .then(guard().or_not())
        .then(action().or_not())
        .map(
            |((((source, destination), event), guard), action)| ExternalTransition {
                source,
                destination,
                event_name: event.unwrap_or_default(),
                guard_name: guard.unwrap_or_default(),
                action_name: action.unwrap_or_default(),
            },
        )
}

/// `Source --> Dest` with no decorations
fn undecorated_transition<'src>(
) -> impl Parser<'src, &'src str, ExternalTransition, extra::Err<Rich<'src, char>>> + Clone {
    identifier()
        .then_ignore(arrow())
        .then(pseudostate().or(identifier()))
        .map(|(source, destination)| ExternalTransition {
            source,
            destination,
            event_name: String::new(),
            guard_name: String::new(),
            action_name: String::new(),
        })
}

/// A transition between vertices; most-specific shape first
pub fn external_transition<'src>(
) -> impl Parser<'src, &'src str, ExternalTransition, extra::Err<Rich<'src, char>>> + Clone {
    initial_transition()
        .or(decorated_transition())
        .or(undecorated_transition())
        .labelled("transition")
}

/// `"Long Name" as`, yielding the display alias
fn long_state_name<'src>(
) -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    quoted_string()
        .then_ignore(inline_whitespace())
        .then_ignore(just("as"))
        .then_ignore(inline_whitespace())
}

/// `{ ... }` block of nested elements
fn state_children<'src, Element>(
    element: Element,
) -> impl Parser<'src, &'src str, Vec<DiagramElement>, extra::Err<Rich<'src, char>>> + Clone
where
    Element: Parser<'src, &'src str, DiagramElement, extra::Err<Rich<'src, char>>> + Clone + 'src,
{
    just('{')
        .then_ignore(optional_whitespace())
        .ignore_then(element.repeated().collect::<Vec<_>>())
        .then_ignore(just('}'))
        .then_ignore(optional_whitespace())
}

/// `state "Long Name" as Short { ... }`, alias and children optional
pub fn state_declaration<'src, Element>(
    element: Element,
) -> impl Parser<'src, &'src str, StateDefinition, extra::Err<Rich<'src, char>>> + Clone
where
    Element: Parser<'src, &'src str, DiagramElement, extra::Err<Rich<'src, char>>> + Clone + 'src,
{
    just("state")
        .then_ignore(inline_whitespace())
        .ignore_then(long_state_name().or_not())
        .then(identifier())
        .then(state_children(element).or_not())
        .map(|((long_name, short_name), children)| StateDefinition {
            short_name,
            long_name,
            children: children.unwrap_or_default(),
        })
        .labelled("state declaration")
}

/// One diagram element plus its trailing whitespace
pub fn diagram_element<'src>(
) -> impl Parser<'src, &'src str, DiagramElement, extra::Err<Rich<'src, char>>> + Clone {
    recursive(|element| {
        state_declaration(element)
            .map(DiagramElement::State)
            .or(internal_transition().map(DiagramElement::Internal))
            .or(external_transition().map(DiagramElement::External))
            .then_ignore(optional_whitespace())
    })
}

/// A whole diagram between `@startuml` and `@enduml`
///
/// The quoted title is optional and defaults to `Unnamed`; a literal
/// `hide empty description` directive is tolerated and discarded.
pub fn diagram<'src>() -> impl Parser<'src, &'src str, Diagram, extra::Err<Rich<'src, char>>> + Clone
{
    let header = just("@startuml")
        .then_ignore(optional_whitespace())
        .ignore_then(quoted_string().or_not())
        .then_ignore(optional_whitespace());

    let hide_directive = just("hide empty description")
        .then_ignore(optional_whitespace())
        .ignored();

    let footer = just("@enduml").then_ignore(optional_whitespace());

    optional_whitespace()
        .ignore_then(header)
        .then_ignore(hide_directive.or_not())
        .then(diagram_element().repeated().collect::<Vec<_>>())
        .then_ignore(footer)
        .map(|(name, elements)| Diagram {
            name: name.unwrap_or_else(|| "Unnamed".to_string()),
            elements,
        })
        .labelled("diagram")
}
