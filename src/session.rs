//! The rendering session: asset source, caches and resource accounting.

use crate::error::Result;
use crate::mesher::geometry::Mesh;
use crate::resolver::TextureCache;
use crate::resource_pack::{AssetLayout, AssetSource, Texture};
use crate::scene::{Geometry, GeometryGroup, Material, MaterialDesc, ResourceStats, Shading};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where each asset kind lives in the source.
    pub layout: AssetLayout,
    /// Time between variant swaps of multi-name items, in milliseconds.
    pub cycle_interval_ms: u64,
    /// Maximum parent hops before a chain is treated as circular.
    pub max_inheritance_depth: usize,
    /// Alpha-test threshold for block and sprite materials.
    pub alpha_test: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: AssetLayout::default(),
            cycle_interval_ms: 1500,
            max_inheritance_depth: 10,
            alpha_test: 1.0,
        }
    }
}

impl SessionConfig {
    /// Use a custom asset layout.
    pub fn with_layout(mut self, layout: AssetLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Use a custom cycle interval.
    pub fn with_cycle_interval(mut self, interval: Duration) -> Self {
        self.cycle_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn cycle_interval(&self) -> Duration {
        Duration::from_millis(self.cycle_interval_ms)
    }
}

/// Bitmap-font materials: one drawn in the scene, one drawn over it.
#[derive(Default)]
struct FontMaterials {
    scene: Option<Rc<Material>>,
    overlay: Option<Rc<Material>>,
}

impl FontMaterials {
    fn slot(&mut self, overlay: bool) -> &mut Option<Rc<Material>> {
        if overlay {
            &mut self.overlay
        } else {
            &mut self.scene
        }
    }
}

/// State shared by every entity built from one asset source.
///
/// The texture cache and the font material live here, so their lifetime is
/// the session's. Entities hold the session through an `Rc`.
pub struct Session {
    source: Box<dyn AssetSource>,
    config: SessionConfig,
    textures: TextureCache,
    ui_textures: TextureCache,
    font_materials: RefCell<FontMaterials>,
    stats: Rc<ResourceStats>,
}

impl Session {
    /// Create a session with default configuration.
    pub fn new(source: impl AssetSource + 'static) -> Rc<Self> {
        Self::with_config(source, SessionConfig::default())
    }

    /// Create a session with custom configuration.
    pub fn with_config(source: impl AssetSource + 'static, config: SessionConfig) -> Rc<Self> {
        Rc::new(Self {
            source: Box::new(source),
            config,
            textures: TextureCache::new(),
            ui_textures: TextureCache::new(),
            font_materials: RefCell::new(FontMaterials::default()),
            stats: Rc::new(ResourceStats::default()),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn layout(&self) -> &AssetLayout {
        &self.config.layout
    }

    /// Live resource counters.
    pub fn stats(&self) -> &ResourceStats {
        &self.stats
    }

    /// The model texture cache.
    pub fn texture_cache(&self) -> &TextureCache {
        &self.textures
    }

    /// Fetch raw bytes.
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        self.source.fetch(path).await
    }

    /// Load a model texture by asset path, going through the cache.
    pub async fn texture(&self, path: &str) -> Result<Rc<Texture>> {
        let file = self.config.layout.texture(path);
        self.load_cached(&self.textures, path, &file).await
    }

    /// Load a GUI image by name, going through the cache.
    pub async fn gui_texture(&self, name: &str) -> Result<Rc<Texture>> {
        let file = self.config.layout.gui(name);
        self.load_cached(&self.ui_textures, &format!("gui/{}", name), &file).await
    }

    async fn load_cached(&self, cache: &TextureCache, key: &str, file: &str) -> Result<Rc<Texture>> {
        if let Some(texture) = cache.get(key) {
            log::debug!("Texture cache hit: {}", key);
            return Ok(texture);
        }

        let data = self.fetch(file).await?;
        let texture = Texture::from_png(key, &data)?;
        Ok(cache.insert(key, texture))
    }

    /// The shared bitmap-font material, created on first use.
    ///
    /// Overlay materials skip the depth test so labels draw over the scene.
    pub async fn font_material(&self, overlay: bool) -> Result<Rc<Material>> {
        if let Some(material) = self.font_materials.borrow_mut().slot(overlay).as_ref() {
            return Ok(Rc::clone(material));
        }

        let file = self.config.layout.font("ascii");
        let texture = self.load_cached(&self.ui_textures, "font/ascii", &file).await?;
        let mut desc = MaterialDesc::textured("font/ascii", texture, Shading::Unlit)
            .with_alpha_test(self.config.alpha_test);
        if overlay {
            desc = desc.without_depth_test();
        }
        let material = self.new_material(desc);

        // Another label may have raced us here; keep the first one.
        let mut materials = self.font_materials.borrow_mut();
        Ok(Rc::clone(materials.slot(overlay).get_or_insert(material)))
    }

    /// Register a new geometry.
    pub fn new_geometry(&self, mesh: Mesh, groups: Vec<GeometryGroup>) -> Geometry {
        Geometry::new(&self.stats, mesh, groups)
    }

    /// Register a new single-material geometry.
    pub fn new_single_geometry(&self, mesh: Mesh) -> Geometry {
        Geometry::single(&self.stats, mesh)
    }

    /// Register a new material.
    pub fn new_material(&self, desc: MaterialDesc) -> Rc<Material> {
        Rc::new(Material::new(&self.stats, desc))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Fixtures shared by the async tests.

    use crate::resource_pack::{MemorySource, Texture};
    use serde_json::json;

    /// PNG bytes of a solid `size × size` texture.
    pub fn png(size: u32) -> Vec<u8> {
        Texture::new("fixture", size, size, vec![200; (size * size * 4) as usize])
            .to_png()
            .unwrap()
    }

    /// A small asset set: sprite items (workstations included), two cube
    /// blocks with a 3-level chain, the GUI images and the font page.
    pub fn fixture_source() -> MemorySource {
        let mut source = MemorySource::new();

        for texture in [
            "item/stick",
            "item/apple",
            "item/crafting_table",
            "item/furnace",
            "item/blast_furnace",
            "item/stonecutter",
            "block/stone",
            "block/oak_planks",
            "block/side",
            "block/top",
        ] {
            source.insert(format!("textures/{}.png", texture), png(16));
        }
        source.insert("gui/crafting_table_small.png", png_sized(116, 54));
        source.insert("gui/furnace_small.png", png_sized(82, 54));
        source.insert("gui/stone_cutter_small.png", png_sized(82, 54));
        source.insert("font/ascii.png", png(128));

        for sprite in ["stick", "apple", "crafting_table", "furnace", "blast_furnace", "stonecutter"] {
            source.insert_json(
                format!("models/item/{}.json", sprite),
                &json!({ "parent": "item/generated", "textures": { "layer0": format!("item/{}", sprite) } }),
            );
        }

        source.insert_json(
            "models/block/cube.json",
            &json!({
                "parent": "block/block",
                "elements": [{
                    "from": [0, 0, 0],
                    "to": [16, 16, 16],
                    "faces": {
                        "down":  { "texture": "#down" },
                        "up":    { "texture": "#up" },
                        "north": { "texture": "#north" },
                        "south": { "texture": "#south" },
                        "west":  { "texture": "#west" },
                        "east":  { "texture": "#east" }
                    }
                }]
            }),
        );
        source.insert_json(
            "models/block/block.json",
            &json!({
                "display": { "gui": { "rotation": [30, 225, 0], "translation": [0, 0, 0], "scale": [0.625, 0.625, 0.625] } }
            }),
        );
        source.insert_json(
            "models/block/cube_all.json",
            &json!({
                "parent": "block/cube",
                "textures": {
                    "particle": "#all", "down": "#all", "up": "#all",
                    "north": "#all", "east": "#all", "south": "#all", "west": "#all"
                }
            }),
        );
        for block in ["stone", "oak_planks"] {
            source.insert_json(
                format!("models/block/{}.json", block),
                &json!({ "parent": "block/cube_all", "textures": { "all": format!("block/{}", block) } }),
            );
            source.insert_json(
                format!("models/item/{}.json", block),
                &json!({ "parent": format!("block/{}", block) }),
            );
        }

        source
    }

    /// PNG bytes of a solid `width × height` texture.
    pub fn png_sized(width: u32, height: u32) -> Vec<u8> {
        Texture::new("fixture", width, height, vec![90; (width * height * 4) as usize])
            .to_png()
            .unwrap()
    }
}
