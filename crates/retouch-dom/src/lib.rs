//! Element handles and an in-memory document for Retouch.
//!
//! The style engine never touches a concrete DOM directly. Everything it
//! needs from the host page (tag names, classes, parent/child structure,
//! computed-style snapshots) is expressed through the [`ElementRef`]
//! capability trait. This crate also ships [`Document`], an arena-backed
//! in-memory implementation used by tests and by embedders that mirror a
//! page into process memory.

mod dom;
mod handle;

pub use dom::{Document, DomElement, ElementData, NodeId};
pub use handle::ElementRef;
