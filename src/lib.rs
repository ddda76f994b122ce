//! Pluck: interactive selection of collected test items.
//!
//! An external collector hands over a finished flat item list; pluck indexes
//! it into a navigable path tree so an embedding shell can drill down and
//! accumulate a subset to run. Pluck decides which items run and in what
//! order; it never executes anything itself.

// Core engine - re-exported from pluck-core
pub use pluck_core::builder;
pub use pluck_core::index;
pub use pluck_core::selection;
pub use pluck_core::text;
pub use pluck_core::tree;
pub use pluck_core::types;
pub use pluck_core::view;

// Boundary layer for the embedding shell
pub mod collect;
pub mod error;
pub mod render;
pub mod session;
