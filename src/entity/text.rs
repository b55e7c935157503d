//! Bitmap-font text labels.
//!
//! Glyphs come from the 16×16 grid in `font/ascii.png`. Each glyph is 8
//! pixels tall and a fixed number of pixels wide.

use crate::error::Result;
use crate::mesher::geometry::Mesh;
use crate::scene::{Node, NodeRef};
use crate::session::Session;

/// Glyph height in model units.
pub const GLYPH_HEIGHT: f32 = 8.0;

/// Render order used by overlay labels.
pub const OVERLAY_RENDER_ORDER: i32 = 100;

/// Font atlas rows, top to bottom.
const GLYPH_ROWS: [&str; 16] = [
    "ÀÁÂÈÊËÍÓÔŌÚßāōğİ",
    " ŒœŞşŴŵžê       ",
    " !\"#$%&'()*+,-./",
    "0123456789:;<=>?",
    "@ABCDEFGHIJKLMNO",
    "PQRSTUVWXYZ[\\]^_",
    "`abcdefghijklmno",
    "pqrstuvwxyz{|}~ ",
    "ÇüéâäàȧçêëèïîìÄȦ",
    "ÈæÆôöòûùÿÖÜø£Ø×⨍",
    "áíóú    ¿©¬   «»",
    "░▒▓│┤╡╢╖╕╣║╗╝╛╜┐",
    "└┴┬├─┼╞╟╚╔╩╦╠═╬╧",
    "╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀",
    "αβΓπΣσγτΦΘΩδ∞∅∈∩",
    "≡±≥≤⌠⌡÷≈°  √ⁿ²  ",
];

/// Glyph widths in pixels, by atlas index.
#[rustfmt::skip]
const GLYPH_WIDTHS: [u8; 256] = [
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    4, 6, 6, 8, 6, 6, 6, 6, 6, 0, 0, 0, 0, 0, 0, 0,
    0, 2, 4, 6, 6, 6, 6, 2, 4, 4, 4, 6, 2, 6, 2, 6,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 2, 2, 5, 6, 5, 6,
    7, 6, 6, 6, 6, 6, 6, 6, 6, 4, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 4, 6, 4, 6, 6,
    3, 6, 6, 6, 6, 6, 5, 6, 6, 2, 6, 5, 3, 6, 6, 6,
    6, 6, 6, 6, 4, 6, 6, 6, 6, 6, 6, 4, 3, 4, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 4, 6, 3, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    6, 3, 6, 6, 6, 6, 5, 5, 6, 8, 6, 6, 6, 2, 7, 7,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8,
];

/// Atlas index of the first glyph drawing `c`.
pub fn glyph_index(c: char) -> Option<usize> {
    GLYPH_ROWS.iter().flat_map(|row| row.chars()).position(|g| g == c)
}

/// Width of a glyph in pixels.
pub fn glyph_width(index: usize) -> f32 {
    GLYPH_WIDTHS.get(index).copied().unwrap_or(0) as f32
}

/// UV rectangle (min, max) of a glyph, V pointing up.
pub fn glyph_uv(index: usize) -> ([f32; 2], [f32; 2]) {
    let x = (index & 0x0F) as f32;
    let y = (0x0F - (index >> 4)) as f32;
    let width = glyph_width(index);
    (
        [x / 16.0, y / 16.0],
        [(x + width / 8.0) / 16.0, (y + 1.0) / 16.0],
    )
}

/// Total advance of `text` in pixels, ignoring unknown characters.
pub fn measure(text: &str) -> f32 {
    text.chars().filter_map(glyph_index).map(glyph_width).sum()
}

/// A line of text built from font glyph quads.
pub struct TextLabel {
    text: String,
    width: f32,
    node: NodeRef,
}

impl TextLabel {
    /// Build a label in the scene.
    pub async fn new(session: &Session, text: &str) -> Result<Self> {
        Self::build(session, text, false).await
    }

    /// Build a label drawn over the scene, without depth testing.
    pub async fn overlay(session: &Session, text: &str) -> Result<Self> {
        Self::build(session, text, true).await
    }

    async fn build(session: &Session, text: &str, overlay: bool) -> Result<Self> {
        let material = session.font_material(overlay).await?;

        let mut node = Node::group(text);
        if overlay {
            node.render_order = OVERLAY_RENDER_ORDER;
        }

        // Glyphs advance by their atlas width, so a space moves the pen 4.
        let mut advance = 0.0;
        for c in text.chars() {
            let Some(index) = glyph_index(c) else {
                log::warn!("No glyph for {:?} in {:?}, skipping", c, text);
                continue;
            };

            let width = glyph_width(index);
            let (min, max) = glyph_uv(index);
            let mut mesh = Mesh::plane(width, GLYPH_HEIGHT);
            mesh.set_quad_uvs(0, [[min[0], max[1]], [max[0], max[1]], [min[0], min[1]], [max[0], min[1]]]);

            let mut glyph = Node::mesh(c.to_string(), session.new_single_geometry(mesh), vec![material.clone()])
                .with_position([advance + width / 2.0, GLYPH_HEIGHT / 2.0, 0.0]);
            glyph.render_order = node.render_order;
            node.add(glyph.into_ref());

            advance += width;
        }

        Ok(Self {
            text: text.to_string(),
            width: advance,
            node: node.into_ref(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Total advance in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn node(&self) -> NodeRef {
        self.node.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::fixture_source;

    #[test]
    fn test_rows_are_sixteen_wide() {
        for row in GLYPH_ROWS {
            assert_eq!(row.chars().count(), 16, "{:?}", row);
        }
    }

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph_index(' '), Some(16));
        assert_eq!(glyph_width(16), 4.0);
        assert_eq!(glyph_index('A'), Some(65));
        assert_eq!(glyph_width(65), 6.0);
        assert_eq!(glyph_index('!'), Some(33));
        assert_eq!(glyph_width(33), 2.0);
        assert_eq!(glyph_index('€'), None);
    }

    #[test]
    fn test_glyph_uv() {
        let (min, max) = glyph_uv(65);
        assert_eq!(min, [1.0 / 16.0, 11.0 / 16.0]);
        assert_eq!(max, [1.75 / 16.0, 12.0 / 16.0]);
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure("Hi"), 8.0);
        assert_eq!(measure("Crafting"), 41.0);
    }

    #[tokio::test]
    async fn test_label_layout() {
        let session = Session::new(fixture_source());
        let label = TextLabel::new(&session, "Hi").await.unwrap();
        assert_eq!(label.width(), 8.0);

        let node = label.node();
        let node = node.borrow();
        assert_eq!(node.render_order, 0);

        let x: Vec<f32> = node
            .children()
            .iter()
            .map(|glyph| glyph.borrow().transform.translation.x)
            .collect();
        assert_eq!(x, vec![3.0, 7.0]);

        let glyph = node.children()[1].borrow();
        assert_eq!(glyph.transform.translation.y, 4.0);
        let mesh = glyph.mesh.as_ref().unwrap();
        assert!(mesh.materials[0].depth_test);
        // Top-left corner samples the glyph's top-left texel.
        let (min, max) = glyph_uv(105);
        assert_eq!(mesh.geometry.mesh.vertices[0].uv, [min[0], max[1]]);
    }

    #[tokio::test]
    async fn test_space_advances_by_its_glyph_width() {
        let session = Session::new(fixture_source());
        let label = TextLabel::new(&session, "a b").await.unwrap();
        assert_eq!(label.width(), 16.0);
        assert_eq!(measure(" "), 4.0);

        let node = label.node();
        let x: Vec<f32> = node
            .borrow()
            .children()
            .iter()
            .map(|glyph| glyph.borrow().transform.translation.x)
            .collect();
        assert_eq!(x, vec![3.0, 8.0, 13.0]);
    }

    #[tokio::test]
    async fn test_overlay_skips_unknown_chars() {
        let session = Session::new(fixture_source());
        let label = TextLabel::overlay(&session, "A€B").await.unwrap();
        assert_eq!(label.text(), "A€B");

        let node = label.node();
        let node = node.borrow();
        assert_eq!(node.render_order, OVERLAY_RENDER_ORDER);
        assert_eq!(node.children().len(), 2);

        let glyph = node.children()[0].borrow();
        assert!(!glyph.mesh.as_ref().unwrap().materials[0].depth_test);
        assert_eq!(glyph.render_order, OVERLAY_RENDER_ORDER);
    }
}
