//! Route lookup and variable extraction.
//!
//! # Data Flow
//! ```text
//! Incoming path (string or parsed URL)
//!     → resolve pathname (relative to a dummy origin; opaque URLs never match)
//!     → pattern::encoding::normalize_path (canonical percent-encoding)
//!     → MatchEngine::run (O(path length))
//!     → route id → RouteEntry { value, layout }
//!     → variables extracted only after a match
//! ```
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Engine and route table are behind `Arc`, so clones are cheap handles
//! - Explicit `None` on no match; the caller's variable map is untouched then

pub mod builder;
pub mod shared;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::error::{Error, Result};
use crate::machine::{Machine, MatchEngine};
use crate::pattern::encoding::{decode_value, normalize_path};

pub use builder::{BuildOptions, RouterBuilder};
pub use shared::SharedRouter;

/// Value bound to a route variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    /// `{name}`: one decoded segment.
    Single(String),
    /// `{name}+` / `{name}*`: every remaining decoded segment.
    Multi(Vec<String>),
}

impl VarValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            VarValue::Single(s) => Some(s),
            VarValue::Multi(_) => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            VarValue::Single(_) => None,
            VarValue::Multi(v) => Some(v),
        }
    }
}

impl From<&str> for VarValue {
    fn from(s: &str) -> Self {
        VarValue::Single(s.to_string())
    }
}

impl From<Vec<&str>> for VarValue {
    fn from(v: Vec<&str>) -> Self {
        VarValue::Multi(v.into_iter().map(str::to_string).collect())
    }
}

/// Variable bindings filled in by [`Router::route_with`].
pub type Variables = HashMap<String, VarValue>;

/// Where a route's variables sit among its segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSlot {
    pub name: String,
    /// True for `+`/`*` variables, which bind a list.
    pub quantified: bool,
}

/// What survives of a route after compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry<T> {
    pub value: T,
    /// Per segment, the variable at that position; `None` for routes
    /// without variables.
    pub layout: Option<Vec<Option<VariableSlot>>>,
}

/// A path to route: a pathname string or an already parsed URL.
#[derive(Debug, Clone, Copy)]
pub enum RouteInput<'a> {
    Str(&'a str),
    Url(&'a Url),
}

impl<'a> From<&'a str> for RouteInput<'a> {
    fn from(s: &'a str) -> Self {
        RouteInput::Str(s)
    }
}

impl<'a> From<&'a String> for RouteInput<'a> {
    fn from(s: &'a String) -> Self {
        RouteInput::Str(s)
    }
}

impl<'a> From<&'a Url> for RouteInput<'a> {
    fn from(url: &'a Url) -> Self {
        RouteInput::Url(url)
    }
}

impl<'a> TryFrom<&'a serde_json::Value> for RouteInput<'a> {
    type Error = Error;

    fn try_from(value: &'a serde_json::Value) -> Result<Self> {
        value
            .as_str()
            .map(RouteInput::Str)
            .ok_or_else(|| Error::Input(format!("expected url to be a string, got {value}")))
    }
}

fn base_url() -> &'static Url {
    static BASE: OnceLock<Url> = OnceLock::new();
    BASE.get_or_init(|| Url::parse("http://localhost/").expect("static base url is valid"))
}

/// Whether `s` is an absolute pathname that URL resolution would return
/// unchanged up to percent-encoding: no authority, query, fragment,
/// backslash, whitespace, non-ASCII byte or dot segment.
fn is_plain_path(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'/') || bytes.get(1) == Some(&b'/') {
        return false;
    }
    if !bytes
        .iter()
        .all(|&b| b.is_ascii_graphic() && !matches!(b, b'?' | b'#' | b'\\'))
    {
        return false;
    }
    !s.split('/').any(|segment| {
        segment.starts_with('.')
            || segment
                .get(..3)
                .is_some_and(|head| head.eq_ignore_ascii_case("%2e"))
    })
}

/// Resolve `s` against the dummy origin.
fn resolve_pathname(s: &str) -> Option<String> {
    let url = base_url().join(s).ok()?;
    if url.cannot_be_a_base() {
        return None;
    }
    Some(url.path().to_string())
}

impl RouteInput<'_> {
    /// The absolute pathname, or `None` for opaque or unparsable URLs.
    fn pathname(&self) -> Option<Cow<'_, str>> {
        let path = match self {
            RouteInput::Str(s) if is_plain_path(s) => Cow::Borrowed(*s),
            RouteInput::Str(s) => Cow::Owned(resolve_pathname(s)?),
            RouteInput::Url(url) => {
                if url.cannot_be_a_base() {
                    return None;
                }
                Cow::Borrowed(url.path())
            }
        };
        path.starts_with('/').then_some(path)
    }
}

/// A compiled, immutable router mapping pathnames to values of type `T`.
#[derive(Debug)]
pub struct Router<T> {
    engine: Arc<MatchEngine>,
    routes: Arc<[RouteEntry<T>]>,
}

impl<T> Clone for Router<T> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            routes: Arc::clone(&self.routes),
        }
    }
}

impl<T> Router<T> {
    pub(crate) fn new(engine: MatchEngine, routes: Vec<RouteEntry<T>>) -> Self {
        Self {
            engine: Arc::new(engine),
            routes: routes.into(),
        }
    }

    /// Rebuild a router from compiled parts, checking they belong together.
    pub fn from_parts(engine: MatchEngine, routes: Vec<RouteEntry<T>>) -> Result<Self> {
        if engine.route_count() != routes.len() {
            return Err(Error::Shape(format!(
                "engine was compiled for {} routes but {} were supplied",
                engine.route_count(),
                routes.len()
            )));
        }
        for (id, route) in routes.iter().enumerate() {
            let Some(layout) = &route.layout else {
                continue;
            };
            let misplaced = layout
                .iter()
                .rev()
                .skip(1)
                .flatten()
                .any(|slot| slot.quantified);
            if misplaced {
                return Err(Error::Shape(format!(
                    "route {id} has a quantified variable before its last segment"
                )));
            }
        }
        Ok(Self::new(engine, routes))
    }

    /// An independent handle sharing the compiled data of `other`.
    pub fn from_router(other: &Router<T>) -> Self {
        other.clone()
    }

    /// Value of the route matching `input`.
    pub fn route<'a>(&self, input: impl Into<RouteInput<'a>>) -> Option<&T> {
        self.resolve(input.into(), None)
    }

    /// Like [`route`](Self::route), also binding the matched route's
    /// variables into `variables`. On no match `variables` is not touched.
    pub fn route_with<'a>(
        &self,
        input: impl Into<RouteInput<'a>>,
        variables: &mut Variables,
    ) -> Option<&T> {
        self.resolve(input.into(), Some(variables))
    }

    fn resolve(&self, input: RouteInput<'_>, out: Option<&mut Variables>) -> Option<&T> {
        let pathname = input.pathname()?;
        let normalized = normalize_path(&pathname)?;
        let id = self.engine.run(normalized.as_bytes())?;
        let entry = self.routes.get(id)?;

        if let (Some(out), Some(layout)) = (out, entry.layout.as_deref()) {
            extract_variables(&normalized, layout, out);
        }
        Some(&entry.value)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn state_count(&self) -> usize {
        self.engine.state_count()
    }

    pub fn is_compressed(&self) -> bool {
        self.engine.is_compressed()
    }

    /// Bytes held by the compiled tables.
    pub fn table_bytes(&self) -> usize {
        self.engine.table_bytes()
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Registered values in route id order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.routes.iter().map(|route| &route.value)
    }
}

/// Bind variables of a matched route from its canonical pathname.
fn extract_variables(path: &str, layout: &[Option<VariableSlot>], out: &mut Variables) {
    for (index, slot) in layout.iter().enumerate() {
        let Some(slot) = slot else {
            continue;
        };
        // Segment 0 of the pattern is path segment 1 (after the leading "/").
        let value = if slot.quantified {
            if path == "/" {
                VarValue::Multi(Vec::new())
            } else {
                VarValue::Multi(path.split('/').skip(index + 1).map(decode_value).collect())
            }
        } else {
            VarValue::Single(
                path.split('/')
                    .nth(index + 1)
                    .map(decode_value)
                    .unwrap_or_default(),
            )
        };
        out.insert(slot.name.clone(), value);
    }
}

#[derive(Serialize)]
struct RouterRef<'a, T> {
    engine: &'a MatchEngine,
    routes: &'a [RouteEntry<T>],
}

#[derive(Deserialize)]
struct RouterParts<T> {
    engine: MatchEngine,
    routes: Vec<RouteEntry<T>>,
}

impl<T: Serialize> Serialize for Router<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RouterRef {
            engine: &self.engine,
            routes: &self.routes,
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Router<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let parts = RouterParts::<T>::deserialize(deserializer)?;
        Router::from_parts(parts.engine, parts.routes).map_err(serde::de::Error::custom)
    }
}
