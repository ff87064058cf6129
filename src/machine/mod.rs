//! Compiled automaton encodings.
//!
//! # Data Flow
//! ```text
//! State[] (from automaton/)
//!     → dense.rs (95-cell row per state, direct indexing)
//!     → csr.rs   (sparse rows + wildcard key, linear scan)
//!     → MatchEngine (one of the two, chosen once at build time)
//!
//! Matching (hot path):
//!     canonical path bytes → MatchEngine::run → Some(route id) | None
//! ```
//!
//! # Design Decisions
//! - Plain integer arrays only, so engines are `Send + Sync`, cheap to share
//!   through `Arc` and serializable for transfer to other processes
//! - Arrays use the narrowest integer width that fits (see packed.rs)
//! - Both encodings must agree on every input; CSR trades a short scan for
//!   far less memory on variable-heavy route sets
//! - The first input byte is assumed to be `/` and skipped

pub mod csr;
pub mod dense;
pub mod packed;

use serde::{Deserialize, Serialize};

use crate::automaton::State;
use crate::error::Result;

pub use csr::CsrMachine;
pub use dense::DenseMachine;

/// Operations shared by the compiled encodings.
pub trait Machine {
    /// Run over `input` (whose first byte is the leading `/`) and return the
    /// accepting route id, if any.
    fn run(&self, input: &[u8]) -> Option<usize>;

    fn state_count(&self) -> usize;

    fn route_count(&self) -> usize;

    /// Bytes held by the compiled arrays.
    fn table_bytes(&self) -> usize;
}

/// A compiled automaton in one of the two physical layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEngine {
    Dense(DenseMachine),
    Csr(CsrMachine),
}

impl MatchEngine {
    /// Encode `states` with the CSR layout when `compress` is set.
    pub fn compile(states: &[State], route_count: usize, compress: bool) -> Result<Self> {
        if compress {
            CsrMachine::build(states, route_count).map(MatchEngine::Csr)
        } else {
            DenseMachine::build(states, route_count).map(MatchEngine::Dense)
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, MatchEngine::Csr(_))
    }

    /// Short layout name for logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchEngine::Dense(_) => "dense",
            MatchEngine::Csr(_) => "csr",
        }
    }
}

impl Machine for MatchEngine {
    #[inline]
    fn run(&self, input: &[u8]) -> Option<usize> {
        match self {
            MatchEngine::Dense(m) => m.run(input),
            MatchEngine::Csr(m) => m.run(input),
        }
    }

    fn state_count(&self) -> usize {
        match self {
            MatchEngine::Dense(m) => m.state_count(),
            MatchEngine::Csr(m) => m.state_count(),
        }
    }

    fn route_count(&self) -> usize {
        match self {
            MatchEngine::Dense(m) => m.route_count(),
            MatchEngine::Csr(m) => m.route_count(),
        }
    }

    fn table_bytes(&self) -> usize {
        match self {
            MatchEngine::Dense(m) => m.table_bytes(),
            MatchEngine::Csr(m) => m.table_bytes(),
        }
    }
}
