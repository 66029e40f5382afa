//! Semantic resolution of parsed diagrams
//!
//! Converts [`Diagram`](crate::ast::Diagram) trees into validated
//! [`StateMachine`] graphs, resolving every name reference and rejecting
//! duplicate or undefined vertices.

mod lookup;
mod model;
mod resolver;

pub use model::*;
pub use resolver::*;
