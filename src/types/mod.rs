//! Shared types used throughout the library.

mod direction;
mod transform;

pub use direction::{Axis, Direction};
pub use transform::{DisplayTransform, ElementRotation, NodeTransform};

/// Strip the `minecraft:` namespace from an identifier.
///
/// Other namespaces are kept as-is.
pub fn strip_namespace(name: &str) -> &str {
    name.strip_prefix("minecraft:").unwrap_or(name)
}

/// Take the path part of a resource location, whatever the namespace.
/// "minecraft:item/stick" -> "item/stick"
pub fn location_path(name: &str) -> &str {
    match name.split_once(':') {
        Some((_, path)) => path,
        None => name,
    }
}
