//! Placement of recipe parts.
//!
//! Everything here is a pure function of the recipe descriptor, so the
//! layout can be checked without loading a single asset.

use crate::resource_pack::recipe::{
    RecipeDescriptor, BLASTING, CAMPFIRE_COOKING, CRAFTING_SHAPED, CRAFTING_SHAPELESS, SMELTING,
    SMOKING, STONECUTTING,
};
use crate::resource_pack::{Ingredient, ItemResult};

/// Distance between neighbouring crafting slots.
pub const SLOT_PITCH: f32 = 18.0;
/// Top-left crafting slot.
pub const GRID_ORIGIN: [f32; 2] = [-49.0, 18.0];
/// Items per row in a shapeless grid.
pub const SHAPELESS_COLUMNS: usize = 3;

const CRAFTING_RESULT: [f32; 3] = [45.0, 0.0, 0.0];
const COOKING_INPUT: [f32; 3] = [-32.0, 18.0, 0.0];
const STONECUTTING_INPUT: [f32; 3] = [-32.0, 0.0, 0.0];
const STATION_RESULT: [f32; 3] = [28.0, 0.0, 0.0];

/// Depth of the background quad.
pub const BACKGROUND_Z: f32 = -8.0;

/// One ingredient slot. All alternatives are shown cycling in one item.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub ingredients: Vec<Ingredient>,
    pub position: [f32; 3],
}

/// Where every part of a recipe goes.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeLayout {
    /// GUI image drawn behind the items.
    pub background: &'static str,
    pub title: Option<&'static str>,
    /// Item shown as the workstation icon.
    pub workstation: &'static str,
    pub slots: Vec<Slot>,
    pub result: ItemResult,
    pub result_position: [f32; 3],
}

/// The item that performs a recipe type.
pub fn workstation(recipe_type: &str) -> &'static str {
    match recipe_type {
        BLASTING => "blast_furnace",
        CAMPFIRE_COOKING => "campfire",
        SMELTING => "furnace",
        SMOKING => "smoker",
        CRAFTING_SHAPED | CRAFTING_SHAPELESS => "crafting_table",
        STONECUTTING => "stonecutter",
        _ => "crafting_table",
    }
}

/// Position of a crafting grid cell.
pub fn grid_position(column: usize, row: usize) -> [f32; 3] {
    [
        GRID_ORIGIN[0] + column as f32 * SLOT_PITCH,
        GRID_ORIGIN[1] - row as f32 * SLOT_PITCH,
        0.0,
    ]
}

/// Workstation icon position over a `width × height` background.
pub fn icon_position(width: f32, height: f32) -> [f32; 3] {
    [-width / 2.0 + 8.0, height / 2.0 + 4.0, -4.0]
}

/// Title position over a `width × height` background.
pub fn title_position(width: f32, height: f32) -> [f32; 3] {
    [-width / 2.0 + 18.0, height / 2.0 + 1.0, -4.0]
}

/// Lay out a recipe. Special and unsupported recipes have no layout.
pub fn plan(recipe: &RecipeDescriptor) -> Option<RecipeLayout> {
    let station = workstation(recipe.type_name());

    let layout = match recipe {
        RecipeDescriptor::CraftingShaped(shaped) => {
            let mut slots = Vec::new();
            for (row, line) in shaped.pattern.iter().enumerate() {
                for (column, cell) in line.chars().enumerate() {
                    if let Some(ingredients) = shaped.key.get(&cell) {
                        slots.push(Slot {
                            ingredients: ingredients.clone(),
                            position: grid_position(column, row),
                        });
                    }
                }
            }
            RecipeLayout {
                background: "crafting_table_small",
                title: Some("Crafting"),
                workstation: station,
                slots,
                result: shaped.result.clone(),
                result_position: CRAFTING_RESULT,
            }
        }
        RecipeDescriptor::CraftingShapeless(shapeless) => RecipeLayout {
            background: "crafting_table_small",
            title: Some("Crafting"),
            workstation: station,
            slots: shapeless
                .ingredients
                .iter()
                .enumerate()
                .map(|(i, ingredients)| Slot {
                    ingredients: ingredients.clone(),
                    position: grid_position(i % SHAPELESS_COLUMNS, i / SHAPELESS_COLUMNS),
                })
                .collect(),
            result: shapeless.result.clone(),
            result_position: CRAFTING_RESULT,
        },
        RecipeDescriptor::Cooking(cooking) => RecipeLayout {
            background: "furnace_small",
            title: None,
            workstation: station,
            slots: vec![Slot {
                ingredients: cooking.ingredient.clone(),
                position: COOKING_INPUT,
            }],
            result: cooking.result.clone(),
            result_position: STATION_RESULT,
        },
        RecipeDescriptor::Stonecutting(cutting) => RecipeLayout {
            background: "stone_cutter_small",
            title: None,
            workstation: station,
            slots: vec![Slot {
                ingredients: cutting.ingredient.clone(),
                position: STONECUTTING_INPUT,
            }],
            result: cutting.result.clone(),
            result_position: STATION_RESULT,
        },
        RecipeDescriptor::Special { .. } | RecipeDescriptor::Unsupported { .. } => return None,
    };

    Some(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recipe(value: serde_json::Value) -> RecipeDescriptor {
        RecipeDescriptor::from_value(value).unwrap()
    }

    fn positions(layout: &RecipeLayout) -> Vec<[f32; 3]> {
        layout.slots.iter().map(|slot| slot.position).collect()
    }

    #[test]
    fn test_workstations() {
        assert_eq!(workstation("minecraft:blasting"), "blast_furnace");
        assert_eq!(workstation("minecraft:campfire_cooking"), "campfire");
        assert_eq!(workstation("minecraft:smelting"), "furnace");
        assert_eq!(workstation("minecraft:smoking"), "smoker");
        assert_eq!(workstation("minecraft:crafting_shapeless"), "crafting_table");
        assert_eq!(workstation("minecraft:stonecutting"), "stonecutter");
        assert_eq!(workstation("minecraft:smithing"), "crafting_table");
    }

    #[test]
    fn test_shaped_skips_cells_without_key() {
        let layout = plan(&recipe(json!({
            "type": "minecraft:crafting_shaped",
            "pattern": [" XY", " Z "],
            "key": {
                "X": { "item": "minecraft:stick" },
                "Y": { "item": "minecraft:apple" },
                "Z": { "tag": "minecraft:planks" }
            },
            "result": { "item": "minecraft:stone" }
        })))
        .unwrap();

        assert_eq!(layout.background, "crafting_table_small");
        assert_eq!(layout.title, Some("Crafting"));
        assert_eq!(layout.workstation, "crafting_table");
        assert_eq!(
            positions(&layout),
            vec![[-31.0, 18.0, 0.0], [-13.0, 18.0, 0.0], [-31.0, 0.0, 0.0]]
        );
        assert_eq!(layout.slots[2].ingredients, vec![Ingredient::Tag("minecraft:planks".into())]);
        assert_eq!(layout.result_position, [45.0, 0.0, 0.0]);
    }

    #[test]
    fn test_shapeless_wraps_every_three() {
        let stick = json!({ "item": "minecraft:stick" });
        let layout = plan(&recipe(json!({
            "type": "minecraft:crafting_shapeless",
            "ingredients": [stick, stick, stick, stick],
            "result": "minecraft:stone"
        })))
        .unwrap();

        assert_eq!(
            positions(&layout),
            vec![
                [-49.0, 18.0, 0.0],
                [-31.0, 18.0, 0.0],
                [-13.0, 18.0, 0.0],
                [-49.0, 0.0, 0.0]
            ]
        );
    }

    #[test]
    fn test_cooking() {
        let layout = plan(&recipe(json!({
            "type": "minecraft:blasting",
            "ingredient": { "item": "minecraft:iron_ore" },
            "result": "minecraft:iron_ingot"
        })))
        .unwrap();

        assert_eq!(layout.background, "furnace_small");
        assert_eq!(layout.title, None);
        assert_eq!(layout.workstation, "blast_furnace");
        assert_eq!(positions(&layout), vec![[-32.0, 18.0, 0.0]]);
        assert_eq!(layout.result_position, [28.0, 0.0, 0.0]);
    }

    #[test]
    fn test_stonecutting() {
        let layout = plan(&recipe(json!({
            "type": "minecraft:stonecutting",
            "ingredient": { "item": "minecraft:stone" },
            "result": "minecraft:stone_slab",
            "count": 2
        })))
        .unwrap();

        assert_eq!(layout.background, "stone_cutter_small");
        assert_eq!(layout.workstation, "stonecutter");
        assert_eq!(positions(&layout), vec![[-32.0, 0.0, 0.0]]);
        assert_eq!(layout.result_position, [28.0, 0.0, 0.0]);
    }

    #[test]
    fn test_special_has_no_layout() {
        assert!(plan(&recipe(json!({ "type": "minecraft:crafting_special_bookcloning" }))).is_none());
        assert!(plan(&recipe(json!({ "type": "minecraft:smithing" }))).is_none());
    }

    #[test]
    fn test_background_positions() {
        assert_eq!(icon_position(116.0, 54.0), [-50.0, 31.0, -4.0]);
        assert_eq!(title_position(116.0, 54.0), [-40.0, 28.0, -4.0]);
    }
}
