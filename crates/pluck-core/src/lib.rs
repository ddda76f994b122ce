//! Core engine for pluck.
//!
//! This crate turns a flat, externally collected test item list into a
//! navigable structure:
//! - Path builder: per-item ancestry walk into (path, node) steps
//! - Path index: path-keyed postings, children, and node maps
//! - Test tree: memoized lazy views with child lookup, indexing, and
//!   parametrization-value filtering
//! - Selection set: ordered, duplicate-free accumulation of chosen items
//! - Error types and symbol sanitization
//!
//! No I/O happens here; ingestion and the shell-facing session live in the
//! root crate.

pub mod builder;
pub mod error;
pub mod index;
pub mod selection;
pub mod text;
pub mod tree;
pub mod types;
pub mod view;
