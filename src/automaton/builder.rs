//! Subset construction over item sets.
//!
//! # Responsibilities
//! - Compute the outgoing transitions of every item in a state
//! - Group targets per input byte and resolve each target item set to a state
//! - Record accepting routes and reject states accepting more than one route
//!
//! # Design Decisions
//! - Item sets are canonicalized as sorted id vectors and hash-consed into
//!   states, which also minimizes the automaton
//! - An explicit worklist instead of recursion, so long patterns cannot
//!   exhaust the stack
//! - State ids follow first discovery, fixing the start state at id 0
//! - The start state is never shared: a leading `{name}*` accepts there
//!   (the path "/"), while the identical item set reached by repeating the
//!   variable after a "/" must not

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::automaton::item::{Item, ItemId, ItemPool};
use crate::automaton::{alphabet, State, FORWARD_SLASH};
use crate::error::ConflictError;
use crate::pattern::{ParsedRoute, Segment};

/// Build the automaton for `routes`; route ids are slice indices.
pub fn build_states(routes: &[ParsedRoute]) -> Result<Vec<State>, ConflictError> {
    let mut construction = Construction {
        routes,
        items: ItemPool::new(),
        index: HashMap::new(),
        states: Vec::new(),
        pending: Vec::new(),
    };

    let start: BTreeSet<ItemId> = (0..routes.len())
        .map(|route| construction.items.intern(Item::new(route, 0, 0)))
        .collect();
    construction.states.push(State {
        id: 0,
        transitions: Vec::new(),
        accepts: None,
    });
    construction.expand(0, &start.into_iter().collect::<Vec<_>>(), true)?;

    while let Some((id, item_set)) = construction.pending.pop() {
        construction.expand(id, &item_set, false)?;
    }

    tracing::trace!(
        route_count = routes.len(),
        item_count = construction.items.len(),
        state_count = construction.states.len(),
        "Automaton constructed"
    );

    Ok(construction.states)
}

struct Construction<'r> {
    routes: &'r [ParsedRoute],
    items: ItemPool,
    /// Canonical item set → state id.
    index: HashMap<Vec<ItemId>, usize>,
    states: Vec<State>,
    /// Discovered states whose transitions are not computed yet.
    pending: Vec<(usize, Vec<ItemId>)>,
}

/// Per-state accumulator of transitions and accepting routes.
#[derive(Default)]
struct Successors {
    targets: BTreeMap<u8, BTreeSet<ItemId>>,
    matches: BTreeSet<usize>,
}

impl Successors {
    fn transition(&mut self, byte: u8, item: ItemId) {
        self.targets.entry(byte).or_default().insert(item);
    }

    fn transition_alphabet(&mut self, item: ItemId) {
        for byte in alphabet() {
            self.transition(byte, item);
        }
    }
}

impl Construction<'_> {
    fn state_of(&mut self, item_set: BTreeSet<ItemId>) -> usize {
        let key: Vec<ItemId> = item_set.into_iter().collect();
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = self.states.len();
        self.states.push(State {
            id,
            transitions: Vec::new(),
            accepts: None,
        });
        self.index.insert(key.clone(), id);
        self.pending.push((id, key));
        id
    }

    fn expand(&mut self, id: usize, item_set: &[ItemId], root: bool) -> Result<(), ConflictError> {
        let routes = self.routes;
        let mut next = Successors::default();

        for &item_id in item_set {
            let item = self.items.get(item_id);
            let segments = &routes[item.route].segments;
            let has_next = item.segment + 1 < segments.len();

            match &segments[item.segment] {
                Segment::Literal(text) => {
                    if let Some(&byte) = text.as_bytes().get(item.offset) {
                        let child = self
                            .items
                            .intern(Item::new(item.route, item.segment, item.offset + 1));
                        next.transition(byte, child);
                    } else if has_next {
                        self.next_segment(item, segments, &mut next);
                    } else {
                        next.matches.insert(item.route);
                    }
                }
                Segment::Variable { quantifier, .. } => {
                    if item.offset == 0 {
                        if root && segments[item.segment].is_star() {
                            next.matches.insert(item.route);
                        }
                        let child = self.items.intern(Item::new(item.route, item.segment, 1));
                        next.transition_alphabet(child);
                    } else {
                        next.transition_alphabet(item_id);
                        if has_next {
                            self.next_segment(item, segments, &mut next);
                        } else {
                            next.matches.insert(item.route);
                            if quantifier.is_some() {
                                let repeat = self.items.intern(Item::new(item.route, item.segment, 0));
                                next.transition(FORWARD_SLASH, repeat);
                            }
                        }
                    }
                }
            }
        }

        if next.matches.len() > 1 {
            let conflicts: Vec<String> = next
                .matches
                .iter()
                .map(|&route| routes[route].source.clone())
                .collect();
            tracing::warn!(state = id, ?conflicts, "Route conflict detected");
            return Err(ConflictError { conflicts });
        }

        let mut transitions = Vec::with_capacity(next.targets.len());
        for (byte, targets) in next.targets {
            transitions.push((byte, self.state_of(targets)));
        }

        let state = &mut self.states[id];
        state.transitions = transitions;
        state.accepts = next.matches.first().copied();
        Ok(())
    }

    /// `/` into the following segment; a `*` variable there may be empty,
    /// so the route already accepts here.
    fn next_segment(&mut self, item: Item, segments: &[Segment], next: &mut Successors) {
        let child = self.items.intern(Item::new(item.route, item.segment + 1, 0));
        next.transition(FORWARD_SLASH, child);
        if segments[item.segment + 1].is_star() {
            next.matches.insert(item.route);
        }
    }
}
