//! Recipe descriptor parsing.
//!
//! Recipes are decoded in two steps: the `type` discriminator is read first,
//! then the body is handed to the decoder for that variant.

use crate::error::{Result, ViewerError};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const CRAFTING_SHAPED: &str = "minecraft:crafting_shaped";
pub const CRAFTING_SHAPELESS: &str = "minecraft:crafting_shapeless";
pub const SMELTING: &str = "minecraft:smelting";
pub const BLASTING: &str = "minecraft:blasting";
pub const SMOKING: &str = "minecraft:smoking";
pub const CAMPFIRE_COOKING: &str = "minecraft:campfire_cooking";
pub const STONECUTTING: &str = "minecraft:stonecutting";
const CRAFTING_SPECIAL_PREFIX: &str = "minecraft:crafting_special_";

/// A single ingredient reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ingredient {
    /// A concrete item id, e.g. "minecraft:stick".
    Item(String),
    /// A tag reference, e.g. "minecraft:planks".
    Tag(String),
}

#[derive(Debug, Deserialize)]
struct RawIngredient {
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    tag: Option<String>,
}

impl Ingredient {
    /// Decode one `{item}` / `{tag}` object.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let raw = RawIngredient::deserialize(value)
            .map_err(|e| ViewerError::InvalidIngredient(format!("{}: {}", value, e)))?;
        match (raw.tag, raw.item) {
            (Some(tag), _) => Ok(Ingredient::Tag(tag)),
            (None, Some(item)) => Ok(Ingredient::Item(item)),
            (None, None) => Err(ViewerError::InvalidIngredient(format!(
                "neither `item` nor `tag` in {}",
                value
            ))),
        }
    }

    /// Decode an ingredient position: one object or an array of alternatives.
    pub fn list_from_value(value: &serde_json::Value) -> Result<Vec<Self>> {
        match value {
            serde_json::Value::Array(items) => items.iter().map(Self::from_value).collect(),
            other => Ok(vec![Self::from_value(other)?]),
        }
    }

    /// Reference key used by root extraction: `item:<id>` or `tag:<id>`.
    pub fn reference_key(&self) -> String {
        match self {
            Ingredient::Item(item) => format!("item:{}", item),
            Ingredient::Tag(tag) => format!("tag:{}", tag),
        }
    }
}

/// Result of a recipe. Accepts `{item, count}` or a bare item id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResult {
    pub item: String,
    pub count: u32,
}

impl<'de> Deserialize<'de> for ItemResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Full {
                item: String,
                #[serde(default = "default_count")]
                count: u32,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(item) => ItemResult { item, count: 1 },
            Raw::Full { item, count } => ItemResult { item, count },
        })
    }
}

fn default_count() -> u32 {
    1
}

/// Which furnace-like station a cooking recipe uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookingKind {
    Smelting,
    Blasting,
    Smoking,
    CampfireCooking,
}

impl CookingKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            CookingKind::Smelting => SMELTING,
            CookingKind::Blasting => BLASTING,
            CookingKind::Smoking => SMOKING,
            CookingKind::CampfireCooking => CAMPFIRE_COOKING,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShapedRecipe {
    pub group: Option<String>,
    pub pattern: Vec<String>,
    pub key: IndexMap<char, Vec<Ingredient>>,
    pub result: ItemResult,
}

#[derive(Debug, Clone)]
pub struct ShapelessRecipe {
    pub group: Option<String>,
    /// One entry per slot; each entry lists interchangeable alternatives.
    pub ingredients: Vec<Vec<Ingredient>>,
    pub result: ItemResult,
}

#[derive(Debug, Clone)]
pub struct CookingRecipe {
    pub kind: CookingKind,
    pub group: Option<String>,
    pub ingredient: Vec<Ingredient>,
    pub result: ItemResult,
    pub experience: f32,
    pub cooking_time: u32,
}

#[derive(Debug, Clone)]
pub struct StonecuttingRecipe {
    pub group: Option<String>,
    pub ingredient: Vec<Ingredient>,
    pub result: ItemResult,
    pub count: u32,
}

/// A parsed recipe.
#[derive(Debug, Clone)]
pub enum RecipeDescriptor {
    CraftingShaped(ShapedRecipe),
    CraftingShapeless(ShapelessRecipe),
    Cooking(CookingRecipe),
    Stonecutting(StonecuttingRecipe),
    /// `crafting_special_*` recipes have no static ingredients.
    Special { kind: String },
    /// Any type string this crate does not know about.
    Unsupported { kind: String },
}

#[derive(Deserialize)]
struct Discriminator {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct ShapedBody {
    #[serde(default)]
    group: Option<String>,
    pattern: Vec<String>,
    key: IndexMap<String, serde_json::Value>,
    result: ItemResult,
}

#[derive(Deserialize)]
struct ShapelessBody {
    #[serde(default)]
    group: Option<String>,
    ingredients: Vec<serde_json::Value>,
    result: ItemResult,
}

#[derive(Deserialize)]
struct CookingBody {
    #[serde(default)]
    group: Option<String>,
    ingredient: serde_json::Value,
    result: ItemResult,
    #[serde(default)]
    experience: f32,
    #[serde(default = "default_cooking_time", rename = "cookingtime")]
    cooking_time: u32,
}

fn default_cooking_time() -> u32 {
    200
}

#[derive(Deserialize)]
struct StonecuttingBody {
    #[serde(default)]
    group: Option<String>,
    ingredient: serde_json::Value,
    result: ItemResult,
    #[serde(default = "default_count")]
    count: u32,
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

impl RecipeDescriptor {
    /// Parse a recipe from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(data)?;
        Self::from_value(value)
    }

    /// Parse a recipe from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let Discriminator { kind } = serde_json::from_value(value.clone())?;

        let cooking = |kind: CookingKind, value: serde_json::Value| -> Result<Self> {
            let body: CookingBody = decode(value)?;
            Ok(RecipeDescriptor::Cooking(CookingRecipe {
                kind,
                group: body.group,
                ingredient: Ingredient::list_from_value(&body.ingredient)?,
                result: body.result,
                experience: body.experience,
                cooking_time: body.cooking_time,
            }))
        };

        match kind.as_str() {
            CRAFTING_SHAPED => {
                let body: ShapedBody = decode(value)?;
                let mut key = IndexMap::new();
                for (symbol, ingredients) in body.key {
                    let mut chars = symbol.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => {
                            key.insert(c, Ingredient::list_from_value(&ingredients)?);
                        }
                        _ => {
                            return Err(ViewerError::InvalidRecipe(format!(
                                "pattern key must be a single character, got {:?}",
                                symbol
                            )))
                        }
                    }
                }
                Ok(RecipeDescriptor::CraftingShaped(ShapedRecipe {
                    group: body.group,
                    pattern: body.pattern,
                    key,
                    result: body.result,
                }))
            }
            CRAFTING_SHAPELESS => {
                let body: ShapelessBody = decode(value)?;
                Ok(RecipeDescriptor::CraftingShapeless(ShapelessRecipe {
                    group: body.group,
                    ingredients: body
                        .ingredients
                        .iter()
                        .map(Ingredient::list_from_value)
                        .collect::<Result<_>>()?,
                    result: body.result,
                }))
            }
            SMELTING => cooking(CookingKind::Smelting, value),
            BLASTING => cooking(CookingKind::Blasting, value),
            SMOKING => cooking(CookingKind::Smoking, value),
            CAMPFIRE_COOKING => cooking(CookingKind::CampfireCooking, value),
            STONECUTTING => {
                let body: StonecuttingBody = decode(value)?;
                Ok(RecipeDescriptor::Stonecutting(StonecuttingRecipe {
                    group: body.group,
                    ingredient: Ingredient::list_from_value(&body.ingredient)?,
                    result: body.result,
                    count: body.count,
                }))
            }
            special if special.starts_with(CRAFTING_SPECIAL_PREFIX) => {
                Ok(RecipeDescriptor::Special { kind })
            }
            _ => Ok(RecipeDescriptor::Unsupported { kind }),
        }
    }

    /// The recipe's `type` string.
    pub fn type_name(&self) -> &str {
        match self {
            RecipeDescriptor::CraftingShaped(_) => CRAFTING_SHAPED,
            RecipeDescriptor::CraftingShapeless(_) => CRAFTING_SHAPELESS,
            RecipeDescriptor::Cooking(recipe) => recipe.kind.type_name(),
            RecipeDescriptor::Stonecutting(_) => STONECUTTING,
            RecipeDescriptor::Special { kind } | RecipeDescriptor::Unsupported { kind } => kind,
        }
    }

    /// The produced item, if the recipe has a static result.
    pub fn result(&self) -> Option<&ItemResult> {
        match self {
            RecipeDescriptor::CraftingShaped(recipe) => Some(&recipe.result),
            RecipeDescriptor::CraftingShapeless(recipe) => Some(&recipe.result),
            RecipeDescriptor::Cooking(recipe) => Some(&recipe.result),
            RecipeDescriptor::Stonecutting(recipe) => Some(&recipe.result),
            RecipeDescriptor::Special { .. } | RecipeDescriptor::Unsupported { .. } => None,
        }
    }

    /// Every ingredient referenced by this recipe.
    pub fn ingredients(&self) -> Vec<&Ingredient> {
        match self {
            RecipeDescriptor::CraftingShaped(recipe) => recipe.key.values().flatten().collect(),
            RecipeDescriptor::CraftingShapeless(recipe) => {
                recipe.ingredients.iter().flatten().collect()
            }
            RecipeDescriptor::Cooking(recipe) => recipe.ingredient.iter().collect(),
            RecipeDescriptor::Stonecutting(recipe) => recipe.ingredient.iter().collect(),
            RecipeDescriptor::Special { .. } | RecipeDescriptor::Unsupported { .. } => Vec::new(),
        }
    }
}
