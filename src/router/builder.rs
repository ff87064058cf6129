//! Router construction.
//!
//! # Responsibilities
//! - Parse patterns as they are added (fail fast, builder left unchanged)
//! - Assign route ids in registration order
//! - Run automaton construction and the selected encoder
//!
//! # Design Decisions
//! - `build` borrows the builder, so it can be extended and rebuilt
//! - Conflicts and capacity overflow surface from `build`, never from `add`

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::automaton::build_states;
use crate::error::Result;
use crate::machine::{Machine, MatchEngine};
use crate::observability::metrics;
use crate::pattern::{parse, ParsedRoute, Segment};
use crate::router::{RouteEntry, Router, VariableSlot};

/// Options for [`RouterBuilder::build`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Use the CSR encoding instead of the dense table.
    pub compress: bool,
}

impl BuildOptions {
    pub fn compressed() -> Self {
        Self { compress: true }
    }
}

/// Accumulates routes and compiles them into a [`Router`].
#[derive(Debug, Clone)]
pub struct RouterBuilder<T> {
    routes: Vec<ParsedRoute>,
    values: Vec<T>,
}

impl<T> Default for RouterBuilder<T> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> RouterBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern; `{name}`, `{name}+` and `{name}*` segments are variables.
    pub fn add(&mut self, pattern: &str, value: T) -> Result<&mut Self> {
        self.push(parse(pattern, false)?, value)
    }

    /// Register a pattern whose every character is matched literally.
    pub fn add_literal(&mut self, pattern: &str, value: T) -> Result<&mut Self> {
        self.push(parse(pattern, true)?, value)
    }

    fn push(&mut self, route: ParsedRoute, value: T) -> Result<&mut Self> {
        self.routes.push(route);
        self.values.push(value);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Parsed routes in id order.
    pub fn routes(&self) -> &[ParsedRoute] {
        &self.routes
    }

    /// Compile every registered route into an immutable router.
    pub fn build(&self, options: BuildOptions) -> Result<Router<T>>
    where
        T: Clone,
    {
        let started = Instant::now();

        let states = build_states(&self.routes).inspect_err(|_| metrics::record_conflict())?;
        let engine = MatchEngine::compile(&states, self.routes.len(), options.compress)?;

        let entries = self
            .routes
            .iter()
            .zip(&self.values)
            .map(|(route, value)| RouteEntry {
                value: value.clone(),
                layout: variable_layout(route),
            })
            .collect();

        let elapsed = started.elapsed();
        tracing::debug!(
            route_count = self.routes.len(),
            state_count = engine.state_count(),
            engine = engine.kind(),
            table_bytes = engine.table_bytes(),
            elapsed_us = elapsed.as_micros() as u64,
            "Router built"
        );
        metrics::record_build(engine.kind(), engine.state_count(), elapsed);

        Ok(Router::new(engine, entries))
    }
}

fn variable_layout(route: &ParsedRoute) -> Option<Vec<Option<VariableSlot>>> {
    if !route.has_variables() {
        return None;
    }
    let layout = route
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Literal(_) => None,
            Segment::Variable { name, quantifier } => Some(VariableSlot {
                name: name.clone(),
                quantified: quantifier.is_some(),
            }),
        })
        .collect();
    Some(layout)
}
