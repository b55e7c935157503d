//! Item tag expansion.

use crate::error::{Result, ViewerError};
use crate::resource_pack::tag::{TagDescriptor, TagEntry};
use crate::session::Session;
use crate::types::location_path;
use indexmap::IndexSet;
use std::future::Future;
use std::pin::Pin;

/// Expand an item tag into the item ids it covers.
///
/// Nested `#` references are expanded in place, so the result keeps
/// declaration order. Duplicates keep their first position.
pub async fn expand_tag(session: &Session, tag: &str) -> Result<Vec<String>> {
    let mut items = IndexSet::new();
    expand_into(session, tag, 0, &mut items).await?;
    Ok(items.into_iter().collect())
}

fn expand_into<'a>(
    session: &'a Session,
    tag: &'a str,
    depth: usize,
    items: &'a mut IndexSet<String>,
) -> Pin<Box<dyn Future<Output = Result<()>> + 'a>> {
    Box::pin(async move {
        if depth >= session.config().max_inheritance_depth {
            return Err(ViewerError::TagNestingTooDeep(tag.to_string()));
        }

        let path = session.layout().item_tag(location_path(tag));
        log::debug!("Expanding tag {}", path);
        let descriptor = TagDescriptor::from_slice(&session.fetch(&path).await?)?;

        for entry in descriptor.entries() {
            match entry {
                TagEntry::Item(item) => {
                    items.insert(item.to_string());
                }
                TagEntry::Tag(nested) => expand_into(session, nested, depth + 1, items).await?,
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_pack::MemorySource;
    use serde_json::json;

    #[tokio::test]
    async fn test_nested_tags_expand_in_order() {
        let mut source = MemorySource::new();
        source.insert_json(
            "tags/items/planks.json",
            &json!({ "values": ["minecraft:oak_planks", "#minecraft:dark_planks", "minecraft:birch_planks"] }),
        );
        source.insert_json(
            "tags/items/dark_planks.json",
            &json!({ "values": ["minecraft:spruce_planks", "minecraft:oak_planks"] }),
        );

        let session = Session::new(source);
        let items = expand_tag(&session, "minecraft:planks").await.unwrap();
        assert_eq!(
            items,
            vec!["minecraft:oak_planks", "minecraft:spruce_planks", "minecraft:birch_planks"]
        );
    }

    #[tokio::test]
    async fn test_self_reference_is_bounded() {
        let mut source = MemorySource::new();
        source.insert_json("tags/items/loop.json", &json!({ "values": ["#loop"] }));

        let session = Session::new(source);
        let err = expand_tag(&session, "loop").await.unwrap_err();
        assert!(matches!(err, ViewerError::TagNestingTooDeep(_)));
    }

    #[tokio::test]
    async fn test_missing_tag() {
        let session = Session::new(MemorySource::new());
        let err = expand_tag(&session, "minecraft:logs").await.unwrap_err();
        assert!(matches!(err, ViewerError::ResourceNotFound(_)));
    }
}
