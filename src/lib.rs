//! URL path router compiled to a deterministic finite automaton.
//!
//! Patterns such as `/users/{id}` or `/static/{path}*` are parsed, merged
//! into one DFA by subset construction, and encoded either as a dense
//! transition table or a compressed sparse row (CSR) table. Lookup cost is
//! linear in the path length and independent of the number of routes.
//!
//! ```text
//! pattern strings
//!     → pattern   (parse + percent canonicalization)
//!     → automaton (item sets → states, conflict detection)
//!     → machine   (Dense | CSR integer tables)
//!     → router    (Router<T>: normalize, run, extract variables)
//! ```

pub mod automaton;
pub mod config;
pub mod error;
pub mod machine;
pub mod observability;
pub mod pattern;
pub mod router;

pub use error::{ConflictError, Error, Result, SyntaxError};
pub use router::{
    BuildOptions, RouteInput, Router, RouterBuilder, SharedRouter, VarValue, Variables,
};
