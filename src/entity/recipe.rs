//! Recipe entities: a workstation background with ingredient and result items.

use crate::entity::item::Item;
use crate::entity::layout::{self, RecipeLayout, BACKGROUND_Z};
use crate::entity::text::TextLabel;
use crate::error::Result;
use crate::mesher::geometry::Mesh;
use crate::resolver::expand_tag;
use crate::resource_pack::{Ingredient, RecipeDescriptor};
use crate::scene::{MaterialDesc, Node, NodeRef, Shading};
use crate::session::Session;
use std::rc::Rc;

/// Item names shown for one slot: plain items as-is, tags expanded.
pub async fn ingredient_names(session: &Session, ingredients: &[Ingredient]) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for ingredient in ingredients {
        match ingredient {
            Ingredient::Item(item) => names.push(item.clone()),
            Ingredient::Tag(tag) => names.extend(expand_tag(session, tag).await?),
        }
    }
    Ok(names)
}

/// A fully built recipe scene.
pub struct Recipe {
    name: String,
    descriptor: RecipeDescriptor,
    layout: Option<RecipeLayout>,
    node: NodeRef,
    background: Option<NodeRef>,
    title: Option<TextLabel>,
    icon: Option<Item>,
    ingredients: Vec<Item>,
    result: Option<Item>,
}

impl Recipe {
    /// Load `recipes/<name>.json` and build the scene.
    ///
    /// Anything up to the last `:` in `name` is ignored.
    pub async fn load(session: &Rc<Session>, name: &str) -> Result<Self> {
        let name = name.rsplit(':').next().unwrap_or(name);
        let path = session.layout().recipe(name);
        log::debug!("Loading recipe {}", path);
        let descriptor = RecipeDescriptor::from_slice(&session.fetch(&path).await?)?;
        Self::from_descriptor(session, name, descriptor).await
    }

    /// Build the scene for an already parsed recipe.
    pub async fn from_descriptor(session: &Rc<Session>, name: &str, descriptor: RecipeDescriptor) -> Result<Self> {
        let mut recipe = Self {
            name: name.to_string(),
            layout: layout::plan(&descriptor),
            descriptor,
            node: Node::group(name).into_ref(),
            background: None,
            title: None,
            icon: None,
            ingredients: Vec::new(),
            result: None,
        };

        let Some(plan) = recipe.layout.clone() else {
            log::debug!("Recipe {} of type {} has no layout", name, recipe.descriptor.type_name());
            return Ok(recipe);
        };

        let texture = session.gui_texture(plan.background).await?;
        let (width, height) = (texture.width as f32, texture.height as f32);
        let material = session.new_material(MaterialDesc::textured(plan.background, texture, Shading::Unlit));
        let background = Node::mesh(
            plan.background,
            session.new_single_geometry(Mesh::plane(width, height)),
            vec![material],
        )
        .with_position([0.0, 0.0, BACKGROUND_Z])
        .into_ref();
        recipe.attach(&background);
        recipe.background = Some(background);

        let icon = Item::load(session, &[plan.workstation]).await?;
        icon.set_position(layout::icon_position(width, height));
        recipe.attach(&icon.node());
        recipe.icon = Some(icon);

        if let Some(title) = plan.title {
            let label = TextLabel::new(session, title).await?;
            label.node().borrow_mut().transform.translation = layout::title_position(width, height).into();
            recipe.attach(&label.node());
            recipe.title = Some(label);
        }

        for slot in &plan.slots {
            let names = ingredient_names(session, &slot.ingredients).await?;
            let item = Item::load(session, names.as_slice()).await?;
            item.set_position(slot.position);
            recipe.attach(&item.node());
            recipe.ingredients.push(item);
        }

        let result = Item::load(session, &[plan.result.item.as_str()]).await?;
        result.set_position(plan.result_position);
        recipe.attach(&result.node());
        recipe.result = Some(result);

        Ok(recipe)
    }

    fn attach(&self, child: &NodeRef) {
        self.node.borrow_mut().add(Rc::clone(child));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &RecipeDescriptor {
        &self.descriptor
    }

    /// The layout, or `None` for recipes that are not drawn.
    pub fn layout(&self) -> Option<&RecipeLayout> {
        self.layout.as_ref()
    }

    pub fn node(&self) -> NodeRef {
        Rc::clone(&self.node)
    }

    /// The workstation icon item.
    pub fn icon(&self) -> Option<&Item> {
        self.icon.as_ref()
    }

    /// Ingredient items, in slot order.
    pub fn ingredients(&self) -> &[Item] {
        &self.ingredients
    }

    pub fn result(&self) -> Option<&Item> {
        self.result.as_ref()
    }

    /// Release the background and title and dispose every item.
    pub fn dispose(&mut self) {
        drop(self.node.borrow_mut().take_children());
        self.background = None;
        self.title = None;
        for item in self.icon.iter_mut().chain(self.ingredients.iter_mut()).chain(self.result.iter_mut()) {
            item.dispose();
        }
    }
}
