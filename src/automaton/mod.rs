//! Route automaton construction.
//!
//! # Data Flow
//! ```text
//! ParsedRoute[]
//!     → item.rs (intern (route, segment, offset) positions)
//!     → builder.rs (subset construction over item sets)
//!     → State[] (id 0 = start state, at most one accepting route each)
//!     → machine/ (dense or CSR encoding)
//! ```
//!
//! # Design Decisions
//! - States are hash-consed by their sorted item set during construction,
//!   so no separate minimization pass is needed
//! - Conflicts (two routes accepting in one state) are build errors
//! - Construction data (items, item-set index) is dropped once the state
//!   list is produced

pub mod builder;
pub mod item;

pub use builder::build_states;

/// Path separator byte.
pub const FORWARD_SLASH: u8 = b'/';

/// Lowest byte a canonical path may contain.
pub const ALPHABET_START: u8 = 0x21;

/// Highest byte a canonical path may contain.
pub const ALPHABET_END: u8 = 0x7e;

/// Number of bytes a variable segment may consume (printable ASCII minus `/`).
pub const ALPHABET_LEN: usize = (ALPHABET_END - ALPHABET_START) as usize;

/// Bytes a variable segment may consume.
pub fn alphabet() -> impl Iterator<Item = u8> {
    (ALPHABET_START..=ALPHABET_END).filter(|&b| b != FORWARD_SLASH)
}

/// A node of the route automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub id: usize,
    /// Outgoing transitions, sorted by input byte.
    pub transitions: Vec<(u8, usize)>,
    /// Route accepted when input ends here.
    pub accepts: Option<usize>,
}

impl State {
    /// The single child reached by every alphabet byte, if there is one.
    ///
    /// Always the case for states inside a variable segment.
    pub fn wildcard_child(&self) -> Option<usize> {
        let mut common = None;
        let mut count = 0;
        for &(byte, child) in &self.transitions {
            if byte == FORWARD_SLASH {
                continue;
            }
            match common {
                None => common = Some(child),
                Some(c) if c != child => return None,
                Some(_) => {}
            }
            count += 1;
        }
        if count == ALPHABET_LEN {
            common
        } else {
            None
        }
    }

    /// Target of the `/` transition.
    pub fn slash_child(&self) -> Option<usize> {
        self.transitions
            .iter()
            .find(|&&(byte, _)| byte == FORWARD_SLASH)
            .map(|&(_, child)| child)
    }
}
