//! # Formula Parser
//!
//! Token-stream parser for the formula language, built on a small
//! position-passing combinator core.
//!
//! * [`core`]: the [`core::Parser`] trait and [`core::ParseError`]
//! * [`combinators`]: combinator implementations
//! * [`prelude`]: free-function constructors for the combinators
//! * [`expression`]: the formula grammar and [`expression::parse_formula`]

pub mod combinators;
pub mod core;
pub mod expression;
pub mod prelude;

pub use self::core::{ParseError, ParseResult, Parser};
pub use expression::{parse_formula, FormulaError};
