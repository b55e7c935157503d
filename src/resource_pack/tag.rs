//! Item tag parsing.

use serde::{Deserialize, Serialize};

/// A parsed tag from tags/items/*.json.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagDescriptor {
    /// Whether this tag replaces lower-priority definitions.
    #[serde(default)]
    pub replace: bool,
    /// Item ids, or `#`-prefixed references to other tags.
    #[serde(default)]
    pub values: Vec<String>,
}

/// A tag entry, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEntry<'a> {
    Item(&'a str),
    Tag(&'a str),
}

impl TagDescriptor {
    /// Parse a tag from JSON bytes.
    pub fn from_slice(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    /// Iterate entries, splitting item ids from nested tag references.
    pub fn entries(&self) -> impl Iterator<Item = TagEntry<'_>> {
        self.values.iter().map(|value| match value.strip_prefix('#') {
            Some(tag) => TagEntry::Tag(tag),
            None => TagEntry::Item(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let tag = TagDescriptor::from_slice(
            br##"{ "replace": false, "values": ["minecraft:oak_planks", "#minecraft:birch_logs"] }"##,
        )
        .unwrap();

        let entries: Vec<_> = tag.entries().collect();
        assert_eq!(
            entries,
            vec![
                TagEntry::Item("minecraft:oak_planks"),
                TagEntry::Tag("minecraft:birch_logs")
            ]
        );
    }

    #[test]
    fn test_defaults() {
        let tag = TagDescriptor::from_slice(b"{}").unwrap();
        assert!(!tag.replace);
        assert!(tag.values.is_empty());
    }
}
