//! Shared utilities for integration tests.

#![allow(dead_code)]

use dfa_router::{BuildOptions, Router, RouterBuilder};

/// Value used for routes that only exist to occupy nearby paths.
pub const DECOY: i32 = 0;

/// Both encodings, labelled for assertion messages.
pub const ENGINES: [(&str, bool); 2] = [("compressed", true), ("uncompressed", false)];

/// The reference route table exercised by the router tests.
pub fn sample_router(compress: bool) -> Router<i32> {
    let mut builder = RouterBuilder::new();
    builder
        .add("/", 1)
        .unwrap()
        .add("/foo", 2)
        .unwrap()
        .add("/foo/bar", 3)
        .unwrap()
        .add("/foo/bar/baz", 4)
        .unwrap()
        .add("/{var1}/BAR/{var2}", 5)
        .unwrap()
        .add("/x/a/{optionalPath}*", 6)
        .unwrap()
        .add("/x/b/{requiredPath}+", 7)
        .unwrap()
        .add_literal("/x/%62/{requiredPath}+", 8)
        .unwrap()
        .add("/mailto:foobarbaz", DECOY)
        .unwrap()
        .add("/mailto:oobarbaz", DECOY)
        .unwrap()
        .add("/foobarbaz", DECOY)
        .unwrap()
        .add("/oobarbaz", DECOY)
        .unwrap()
        .add("/enc%6Fded&", 9)
        .unwrap()
        .add("/%00weird%2f", 10)
        .unwrap();
    builder.build(options(compress)).unwrap()
}

/// A router holding a single pattern.
pub fn single_router(pattern: &str, compress: bool) -> Router<i32> {
    let mut builder = RouterBuilder::new();
    builder.add(pattern, -1).unwrap();
    builder.build(options(compress)).unwrap()
}

pub fn options(compress: bool) -> BuildOptions {
    BuildOptions { compress }
}

/// Write `content` to a fresh file under the system temp dir.
pub fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("dfa-router-it-{}-{name}", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}
