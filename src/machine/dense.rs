//! Dense transition table.
//!
//! One row of [`ROW_WIDTH`] cells per state; the cell for byte `b` sits at
//! column `b - 0x20`, so column 0 is never addressed. A cell holds the next
//! state id, or `state_count` when there is no transition. A parallel
//! `matches` array holds the accepting route id, or `route_count`.

use serde::{Deserialize, Serialize};

use crate::automaton::{State, ALPHABET_END, ALPHABET_START};
use crate::error::{Error, Result};
use crate::machine::packed::{PackedVec, MAX_PACKED_VALUE};
use crate::machine::Machine;

/// Cells per state row.
pub const ROW_WIDTH: usize = (ALPHABET_END - ALPHABET_START) as usize + 2;

const COLUMN_BASE: u8 = ALPHABET_START - 1;

#[inline]
fn column(byte: u8) -> usize {
    (byte - COLUMN_BASE) as usize
}

/// Uncompressed state machine: one indexed read per input byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DenseParts")]
pub struct DenseMachine {
    table: PackedVec,
    matches: PackedVec,
    state_count: usize,
    route_count: usize,
}

impl DenseMachine {
    /// Encode `states`, sized for `route_count` routes.
    pub fn build(states: &[State], route_count: usize) -> Result<Self> {
        let state_count = states.len();
        let max_value = state_count.max(route_count);
        let capacity = || Error::Capacity {
            states: state_count,
            routes: route_count,
        };

        let mut table = PackedVec::filled(state_count * ROW_WIDTH, state_count, max_value)
            .ok_or_else(capacity)?;
        let mut matches =
            PackedVec::filled(state_count, route_count, max_value).ok_or_else(capacity)?;

        for state in states {
            if let Some(route) = state.accepts {
                matches.set(state.id, route);
            }
            let row = state.id * ROW_WIDTH;
            for &(byte, child) in &state.transitions {
                debug_assert!((ALPHABET_START..=ALPHABET_END).contains(&byte));
                table.set(row + column(byte), child);
            }
        }

        Ok(Self {
            table,
            matches,
            state_count,
            route_count,
        })
    }
}

impl Machine for DenseMachine {
    #[inline]
    fn run(&self, input: &[u8]) -> Option<usize> {
        let mut state = 0;
        for &byte in input.iter().skip(1) {
            if !(ALPHABET_START..=ALPHABET_END).contains(&byte) {
                return None;
            }
            state = self.table.get(state * ROW_WIDTH + column(byte));
            if state >= self.state_count {
                return None;
            }
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
        self.table.byte_len() + self.matches.byte_len()
    }
}

/// Unvalidated wire form of a [`DenseMachine`].
#[derive(Deserialize)]
struct DenseParts {
    table: PackedVec,
    matches: PackedVec,
    state_count: usize,
    route_count: usize,
}

impl TryFrom<DenseParts> for DenseMachine {
    type Error = Error;

    fn try_from(parts: DenseParts) -> Result<Self> {
        let DenseParts {
            table,
            matches,
            state_count,
            route_count,
        } = parts;

        if state_count == 0 || state_count.max(route_count) > MAX_PACKED_VALUE {
            return Err(Error::Shape(format!(
                "dense machine has {state_count} states and {route_count} routes"
            )));
        }
        if table.len() != state_count * ROW_WIDTH {
            return Err(Error::Shape(format!(
                "dense table has {} cells, expected {}",
                table.len(),
                state_count * ROW_WIDTH
            )));
        }
        if matches.len() != state_count {
            return Err(Error::Shape(format!(
                "dense matches has {} entries, expected {state_count}",
                matches.len()
            )));
        }
        if table.iter().any(|next| next > state_count) {
            return Err(Error::Shape("dense table references an unknown state".into()));
        }
        if matches.iter().any(|route| route > route_count) {
            return Err(Error::Shape("dense matches references an unknown route".into()));
        }

        Ok(Self {
            table,
            matches,
            state_count,
            route_count,
        })
    }
}
