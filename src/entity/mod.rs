//! Scene entities: items, recipes and text labels.
//!
//! Entities own a scene node and the resources hanging off it. Loading and
//! item cycling run as tasks on the current [`tokio::task::LocalSet`].

pub mod item;
pub mod layout;
pub mod recipe;
pub mod text;

pub use item::{Cycler, Item, OnLoad};
pub use layout::{plan, workstation, RecipeLayout, Slot};
pub use recipe::Recipe;
pub use text::TextLabel;
