//! Root recipe discovery.
//!
//! A root is a recipe whose result is never used as an ingredient by any
//! other recipe, i.e. the top of a crafting tree.

use crate::error::Result;
use crate::resource_pack::RecipeDescriptor;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

/// Scan every `*.json` recipe in `dir` and return the unreferenced names,
/// as sorted `item:minecraft:<file stem>` strings.
pub fn find_roots<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let mut names = BTreeSet::new();
    let mut references = HashSet::new();

    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        names.insert(format!("item:minecraft:{}", stem));

        let recipe = RecipeDescriptor::from_slice(&fs::read(&path)?)?;
        log::debug!("{}: {} ingredients", stem, recipe.ingredients().len());
        for ingredient in recipe.ingredients() {
            references.insert(ingredient.reference_key());
        }
    }

    Ok(names
        .into_iter()
        .filter(|name| !references.contains(name))
        .collect())
}

/// Find the roots of `dir` and write them to `output` as a JSON array.
pub fn write_roots<P: AsRef<Path>, Q: AsRef<Path>>(dir: P, output: Q) -> Result<Vec<String>> {
    let roots = find_roots(dir)?;
    if let Some(parent) = output.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, serde_json::to_string_pretty(&roots)?)?;
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_recipe(dir: &Path, name: &str, value: serde_json::Value) {
        fs::write(dir.join(format!("{}.json", name)), value.to_string()).unwrap();
    }

    fn shapeless(ingredient: &str) -> serde_json::Value {
        json!({
            "type": "minecraft:crafting_shapeless",
            "ingredients": [{ "item": ingredient }],
            "result": "minecraft:dummy"
        })
    }

    #[test]
    fn test_chain_has_one_root() {
        let dir = TempDir::new().unwrap();
        write_recipe(dir.path(), "a", shapeless("minecraft:b"));
        write_recipe(dir.path(), "b", shapeless("minecraft:c"));

        assert_eq!(find_roots(dir.path()).unwrap(), vec!["item:minecraft:a"]);
    }

    #[test]
    fn test_all_recipe_kinds_contribute_references() {
        let dir = TempDir::new().unwrap();
        write_recipe(
            dir.path(),
            "chest",
            json!({
                "type": "minecraft:crafting_shaped",
                "pattern": ["###", "# #", "###"],
                "key": { "#": { "tag": "minecraft:planks" } },
                "result": { "item": "minecraft:chest" }
            }),
        );
        write_recipe(
            dir.path(),
            "charcoal",
            json!({
                "type": "minecraft:smelting",
                "ingredient": [{ "item": "minecraft:oak_log" }, { "item": "minecraft:chest" }],
                "result": "minecraft:charcoal"
            }),
        );
        write_recipe(
            dir.path(),
            "oak_log",
            json!({ "type": "minecraft:stonecutting", "ingredient": { "item": "minecraft:charcoal" }, "result": "minecraft:oak_log" }),
        );
        write_recipe(dir.path(), "map_cloning", json!({ "type": "minecraft:crafting_special_mapcloning" }));
        fs::write(dir.path().join("notes.txt"), "not a recipe").unwrap();

        assert_eq!(find_roots(dir.path()).unwrap(), vec!["item:minecraft:map_cloning"]);
    }

    #[test]
    fn test_write_roots() {
        let dir = TempDir::new().unwrap();
        write_recipe(dir.path(), "a", shapeless("minecraft:b"));
        write_recipe(dir.path(), "b", shapeless("minecraft:c"));

        let out = TempDir::new().unwrap();
        let file = out.path().join("generated").join("roots.json");
        write_roots(dir.path(), &file).unwrap();

        let written: Vec<String> = serde_json::from_slice(&fs::read(&file).unwrap()).unwrap();
        assert_eq!(written, vec!["item:minecraft:a"]);
    }

    #[test]
    fn test_invalid_recipe_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(find_roots(dir.path()).is_err());
    }
}
