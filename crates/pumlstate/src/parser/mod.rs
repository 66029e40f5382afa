//! PlantUML state-diagram parsing
//!
//! Turns diagram source text into the syntactic [`Diagram`] tree. Parsing is
//! purely structural; name resolution happens later in
//! [`machine`](crate::machine).

mod grammar;
mod lexis;

use chumsky::prelude::*;
use tracing::{debug, trace};

use crate::ast::Diagram;
use crate::error::ParseError;

/// Parse complete diagram source into a [`Diagram`]
///
/// The whole input must be consumed; trailing text after `@enduml` is an
/// error. On failure the returned [`ParseError`] carries the 1-based line and
/// column of the first offending character.
///
/// # Examples
///
/// ```
/// let diagram = pumlstate::parse("@startuml\nstate Alpha\n@enduml").unwrap();
/// assert_eq!(diagram.elements.len(), 1);
/// ```
pub fn parse(input: &str) -> Result<Diagram, ParseError> {
    trace!(bytes = input.len(), "Parsing diagram source");

    let diagram = grammar::diagram()
        .then_ignore(end())
        .parse(input)
        .into_result()
        .map_err(|errors| first_parse_error(input, &errors))?;

    debug!(
        diagram_name = %diagram.name,
        element_count = diagram.elements.len(),
        "Parsed diagram"
    );
    Ok(diagram)
}

/// Convert chumsky's error list into a single positioned [`ParseError`]
fn first_parse_error(input: &str, errors: &[Rich<'_, char>]) -> ParseError {
    match errors.first() {
        Some(error) => {
            let (line, column) = position(input, error.span().start);
            ParseError::new(error.to_string(), line, column)
        }
        None => ParseError::new("unknown parse failure".to_string(), 1, 1),
    }
}

/// 1-based line and column of a byte offset in `input`
fn position(input: &str, offset: usize) -> (usize, usize) {
    let prefix = input.get(..offset).unwrap_or(input);
    let line = prefix.matches('\n').count() + 1;
    let column = prefix.chars().rev().take_while(|c| *c != '\n').count() + 1;
    (line, column)
}
