//! # formwork
//!
//! Configuration-driven evaluation engine for per-machine order view
//! templates. A template describes the data-entry table, calculation rules,
//! display panel and totals row for one (machine, order-type) pair; the
//! runtime evaluates a template against one order into a fully computed
//! snapshot, with per-slot errors instead of aborted evaluations.
//!
//! ```
//! use formwork::model::TemplateConfig;
//! use formwork::order::Order;
//! use formwork::runtime::evaluate_template;
//!
//! let template = TemplateConfig::default();
//! let order = Order::default();
//! let evaluated = evaluate_template(&template, &order);
//! assert!(evaluated.rows.len() == 1);
//! ```

pub mod aggregate;
pub mod ast;
pub mod error;
pub mod eval;
pub mod model;
pub mod order;
pub mod parser;
pub mod resolver;
pub mod runtime;
pub mod tokenizer;

// Re-exports
pub use error::{Error, Result};
pub use eval::{EvalError, EvalResult, ExpressionEvaluator};
pub use model::TemplateConfig;
pub use order::Order;
pub use parser::parse_formula;
pub use runtime::{evaluate_template, EvaluatedTemplate};
