//! Offline asset tools.
//!
//! These work on a local asset directory and do not need a session.

pub mod manifest;
pub mod roots;

pub use manifest::write_manifests;
pub use roots::{find_roots, write_roots};
