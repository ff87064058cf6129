//! Compressed sparse row (CSR) transition table.
//!
//! `row_offsets[s]..row_offsets[s + 1]` is the slice of `keys`/`values`
//! holding the explicit transitions of state `s`. The reserved key
//! [`WILDCARD`] stands for "every alphabet byte except `/`", all leading to
//! one state. Variable-segment states always have this shape, so their ~93
//! transitions collapse to at most two entries: an optional `/` plus the
//! wildcard, which is always last in its row.

use serde::{Deserialize, Serialize};

use crate::automaton::{State, ALPHABET_END, ALPHABET_START, FORWARD_SLASH};
use crate::error::{Error, Result};
use crate::machine::packed::{PackedVec, MAX_PACKED_VALUE};
use crate::machine::Machine;

/// Key matching any alphabet byte other than `/`.
pub const WILDCARD: u8 = 0xff;

/// Compressed state machine: a short linear scan per input byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CsrParts")]
pub struct CsrMachine {
    row_offsets: PackedVec,
    keys: Vec<u8>,
    values: PackedVec,
    matches: PackedVec,
    state_count: usize,
    route_count: usize,
}

impl CsrMachine {
    /// Encode `states`, sized for `route_count` routes.
    pub fn build(states: &[State], route_count: usize) -> Result<Self> {
        let state_count = states.len();
        let capacity = || Error::Capacity {
            states: state_count,
            routes: route_count,
        };

        let mut row_offsets = Vec::with_capacity(state_count + 1);
        let mut keys = Vec::new();
        let mut values = Vec::new();
        let mut matches =
            PackedVec::filled(state_count, route_count, route_count).ok_or_else(capacity)?;

        for state in states {
            row_offsets.push(keys.len());
            if let Some(route) = state.accepts {
                matches.set(state.id, route);
            }

            if let Some(common) = state.wildcard_child() {
                if let Some(slash) = state.slash_child() {
                    keys.push(FORWARD_SLASH);
                    values.push(slash);
                }
                keys.push(WILDCARD);
                values.push(common);
            } else {
                for &(byte, child) in &state.transitions {
                    keys.push(byte);
                    values.push(child);
                }
            }
        }
        row_offsets.push(keys.len());

        let row_offsets = PackedVec::from_values(&row_offsets, keys.len()).ok_or_else(capacity)?;
        let values = PackedVec::from_values(&values, state_count.saturating_sub(1))
            .ok_or_else(capacity)?;

        Ok(Self {
            row_offsets,
            keys,
            values,
            matches,
            state_count,
            route_count,
        })
    }

    /// Number of stored transition entries.
    pub fn entry_count(&self) -> usize {
        self.keys.len()
    }
}

impl Machine for CsrMachine {
    #[inline]
    fn run(&self, input: &[u8]) -> Option<usize> {
        let mut state = 0;
        'read: for &byte in input.iter().skip(1) {
            if !(ALPHABET_START..=ALPHABET_END).contains(&byte) {
                return None;
            }
            let start = self.row_offsets.get(state);
            let end = self.row_offsets.get(state + 1);
            for offset in start..end {
                if self.keys[offset] == byte {
                    state = self.values.get(offset);
                    continue 'read;
                }
            }
            if end > start && self.keys[end - 1] == WILDCARD && byte != FORWARD_SLASH {
                state = self.values.get(end - 1);
                continue;
            }
            return None;
        }
        let route = self.matches.get(state);
        (route < self.route_count).then_some(route)
    }

    fn state_count(&self) -> usize {
        self.state_count
    }

    fn route_count(&self) -> usize {
        self.route_count
    }

    fn table_bytes(&self) -> usize {
        self.row_offsets.byte_len() + self.keys.len() + self.values.byte_len() + self.matches.byte_len()
    }
}

/// Unvalidated wire form of a [`CsrMachine`].
#[derive(Deserialize)]
struct CsrParts {
    row_offsets: PackedVec,
    keys: Vec<u8>,
    values: PackedVec,
    matches: PackedVec,
    state_count: usize,
    route_count: usize,
}

impl TryFrom<CsrParts> for CsrMachine {
    type Error = Error;

    fn try_from(parts: CsrParts) -> Result<Self> {
        let CsrParts {
            row_offsets,
            keys,
            values,
            matches,
            state_count,
            route_count,
        } = parts;

        if state_count == 0 || state_count.max(route_count) > MAX_PACKED_VALUE {
            return Err(Error::Shape(format!(
                "csr machine has {state_count} states and {route_count} routes"
            )));
        }
        if row_offsets.len() != state_count + 1 || row_offsets.get(0) != 0 {
            return Err(Error::Shape("csr row offsets do not cover every state".into()));
        }
        if keys.len() != values.len() || row_offsets.get(state_count) != keys.len() {
            return Err(Error::Shape(format!(
                "csr rows end at {} but hold {} keys and {} values",
                row_offsets.get(state_count),
                keys.len(),
                values.len()
            )));
        }
        for state in 0..state_count {
            let (start, end) = (row_offsets.get(state), row_offsets.get(state + 1));
            if start > end {
                return Err(Error::Shape(format!("csr row {state} is reversed")));
            }
            for (offset, &key) in keys.iter().enumerate().take(end).skip(start) {
                let valid = (ALPHABET_START..=ALPHABET_END).contains(&key)
                    || (key == WILDCARD && offset + 1 == end);
                if !valid {
                    return Err(Error::Shape(format!("csr row {state} has invalid key {key:#04x}")));
                }
            }
        }
        if values.iter().any(|next| next >= state_count) {
            return Err(Error::Shape("csr values reference an unknown state".into()));
        }
        if matches.len() != state_count || matches.iter().any(|route| route > route_count) {
            return Err(Error::Shape("csr matches do not fit the route table".into()));
        }

        Ok(Self {
            row_offsets,
            keys,
            values,
            matches,
            state_count,
            route_count,
        })
    }
}
