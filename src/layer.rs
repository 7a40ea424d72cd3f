//! Layer tree with read-through inheritance from group layers.
//!
//! Layers live in an arena ([`LayerTree`]) and refer to their parent by
//! [`LayerId`]. Effective properties (visibility, tint, offset, ...) are
//! resolved by walking the parent chain on every query, so editing a group
//! is seen by its children immediately.

use macroquad::color::{Color, WHITE};

use crate::error::MapError;
use crate::math::Vector2;
use crate::object::ObjectGroup;
use crate::tile::TileRef;

/// Index of a layer inside its [`LayerTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub usize);

/// Fixed-size grid of tile references, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    width: u32,
    height: u32,
    data: Vec<TileRef>,
}

impl TileLayer {
    /// Empty layer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        TileLayer {
            width,
            height,
            data: vec![TileRef::EMPTY; width as usize * height as usize],
        }
    }

    /// Layer from raw Tiled cell values (gid plus flip bits). `name` only
    /// appears in the error when the data length is not `width * height`.
    pub fn from_gids(name: &str, width: u32, height: u32, gids: Vec<u32>) -> Result<Self, MapError> {
        let expected = width as usize * height as usize;
        if gids.len() != expected {
            return Err(MapError::InvalidLayerSize {
                layer: name.to_owned(),
                expected,
                actual: gids.len(),
            });
        }
        Ok(TileLayer {
            width,
            height,
            data: gids.into_iter().map(TileRef).collect(),
        })
    }

    #[inline] pub fn width(&self) -> u32 { self.width }
    #[inline] pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Non-empty tile at `(x, y)`; `None` when out of bounds or empty.
    pub fn get_tile_at(&self, x: i32, y: i32) -> Option<TileRef> {
        self.index(x, y)
            .map(|i| self.data[i])
            .filter(|t| !t.is_empty())
    }

    /// Replaces the cell at `(x, y)` and returns what was there, or `None`
    /// if the position is outside the layer.
    pub fn set_tile_at(&mut self, x: i32, y: i32, tile: TileRef) -> Option<TileRef> {
        let i = self.index(x, y)?;
        Some(std::mem::replace(&mut self.data[i], tile))
    }

    /// Number of non-empty cells.
    pub fn tile_count(&self) -> usize {
        self.data.iter().filter(|t| !t.is_empty()).count()
    }
}

/// Single background image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayer {
    pub source: String,
    pub width: f64,
    pub height: f64,
}

/// What a layer holds.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Tiles(TileLayer),
    Objects(ObjectGroup),
    Image(ImageLayer),
    /// Container; children are tracked by the tree.
    Group,
}

/// A node in the [`LayerTree`] with its own display properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub opacity: f32,
    pub tint: Option<Color>,
    /// Pixel offset, added to every ancestor's.
    pub offset: Vector2,
    /// Scroll factor relative to the camera; (1, 1) scrolls normally.
    pub parallax: Vector2,
    kind: LayerKind,
    id: LayerId,
    parent: Option<LayerId>,
}

impl Layer {
    /// Visible, unlocked and opaque, with no offset.
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Layer {
            name: name.into(),
            visible: true,
            locked: false,
            opacity: 1.0,
            tint: None,
            offset: Vector2::ZERO,
            parallax: Vector2::ONE,
            kind,
            id: LayerId(0),
            parent: None,
        }
    }

    pub fn tiles(name: impl Into<String>, tiles: TileLayer) -> Self {
        Self::new(name, LayerKind::Tiles(tiles))
    }

    pub fn objects(name: impl Into<String>, group: ObjectGroup) -> Self {
        Self::new(name, LayerKind::Objects(group))
    }

    pub fn image(name: impl Into<String>, image: ImageLayer) -> Self {
        Self::new(name, LayerKind::Image(image))
    }

    /// Empty group; add children with [`LayerTree::push_child`].
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, LayerKind::Group)
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Vector2::new(x, y);
        self
    }

    /// Scroll factors relative to the camera; 1.0 moves with the map.
    pub fn with_parallax(mut self, x: f64, y: f64) -> Self {
        self.parallax = Vector2::new(x, y);
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = Some(tint);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[inline] pub fn id(&self) -> LayerId { self.id }
    #[inline] pub fn parent(&self) -> Option<LayerId> { self.parent }
    #[inline] pub fn kind(&self) -> &LayerKind { &self.kind }
    #[inline] pub fn is_group(&self) -> bool { matches!(self.kind, LayerKind::Group) }

    pub fn tile_layer_mut(&mut self) -> Option<&mut TileLayer> {
        match &mut self.kind {
            LayerKind::Tiles(t) => Some(t),
            _ => None,
        }
    }

    pub fn object_group_mut(&mut self) -> Option<&mut ObjectGroup> {
        match &mut self.kind {
            LayerKind::Objects(g) => Some(g),
            _ => None,
        }
    }
}

/// All layers of a map, in map order.
#[derive(Debug, Clone, Default)]
pub struct LayerTree {
    layers: Vec<Layer>,
    children: Vec<Vec<LayerId>>,
    roots: Vec<LayerId>,
}

impl LayerTree {
    /// Tree without layers.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline] pub fn len(&self) -> usize { self.layers.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.layers.is_empty() }

    fn insert(&mut self, mut layer: Layer, parent: Option<LayerId>) -> LayerId {
        let id = LayerId(self.layers.len());
        layer.id = id;
        layer.parent = parent;
        self.layers.push(layer);
        self.children.push(Vec::new());
        id
    }

    /// Appends a top-level layer above the existing ones.
    pub fn push_root(&mut self, layer: Layer) -> LayerId {
        let id = self.insert(layer, None);
        self.roots.push(id);
        id
    }

    /// Appends `layer` as the topmost child of group `parent`.
    pub fn push_child(&mut self, parent: LayerId, layer: Layer) -> Result<LayerId, MapError> {
        let group = self.get(parent).ok_or(MapError::UnknownLayer(parent))?;
        if !group.is_group() {
            return Err(MapError::NotAGroup(parent));
        }
        let id = self.insert(layer, Some(parent));
        self.children[parent.0].push(id);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.0)
    }

    /// Mutable access for editing properties. Tree links stay fixed.
    #[inline]
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id.0)
    }

    /// First layer with the given name, depth-first in map order.
    pub fn find(&self, name: &str) -> Option<LayerId> {
        let mut found = None;
        self.walk(&self.roots, &mut |l| {
            if found.is_none() && l.name == name {
                found = Some(l.id);
            }
        });
        found
    }

    /// Top-level layers, bottom first.
    #[inline]
    pub fn roots(&self) -> &[LayerId] {
        &self.roots
    }

    /// Children of a group, bottom first. Empty for other layers.
    pub fn children(&self, id: LayerId) -> &[LayerId] {
        self.children.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The layer itself followed by its ancestors, nearest first.
    pub fn lineage(&self, id: LayerId) -> Lineage<'_> {
        Lineage {
            tree: self,
            next: self.get(id).map(|l| l.id),
        }
    }

    /// Ancestors of a layer, nearest first.
    pub fn ancestors(&self, id: LayerId) -> Lineage<'_> {
        let mut it = self.lineage(id);
        it.next();
        it
    }

    fn walk<'a>(&'a self, ids: &[LayerId], f: &mut dyn FnMut(&'a Layer)) {
        for &id in ids {
            if let Some(layer) = self.get(id) {
                f(layer);
                self.walk(self.children(id), f);
            }
        }
    }

    /// Every non-group layer, depth-first in map order (bottom to top).
    pub fn flatten(&self) -> Vec<LayerId> {
        let mut out = Vec::new();
        self.walk(&self.roots, &mut |l| {
            if !l.is_group() {
                out.push(l.id);
            }
        });
        out
    }

    /// Folds `f` over the layer and its ancestors, nearest first.
    pub fn fold_lineage<T>(&self, id: LayerId, init: T, f: impl FnMut(T, &Layer) -> T) -> T {
        self.lineage(id).fold(init, f)
    }

    /// Visible only if the layer and every ancestor are.
    pub fn effective_visible(&self, id: LayerId) -> bool {
        self.lineage(id).all(|l| l.visible)
    }

    /// Locked if the layer or any ancestor is.
    pub fn effective_locked(&self, id: LayerId) -> bool {
        self.lineage(id).any(|l| l.locked)
    }

    pub fn effective_opacity(&self, id: LayerId) -> f32 {
        self.fold_lineage(id, 1.0, |acc, l| acc * l.opacity)
    }

    /// Sum of the layer's and its ancestors' offsets.
    pub fn render_offset(&self, id: LayerId) -> Vector2 {
        self.fold_lineage(id, Vector2::ZERO, |acc, l| acc + l.offset)
    }

    /// Product of the layer's and its ancestors' parallax factors.
    pub fn effective_parallax(&self, id: LayerId) -> Vector2 {
        self.fold_lineage(id, Vector2::ONE, |acc, l| acc.scale(l.parallax))
    }

    /// Tint of the nearest layer in the lineage that sets one, else white.
    pub fn effective_tint(&self, id: LayerId) -> Color {
        self.lineage(id).find_map(|l| l.tint).unwrap_or(WHITE)
    }

    /// Every layer in insertion order, ignoring nesting.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }
}

/// Iterator up a layer's parent chain.
pub struct Lineage<'a> {
    tree: &'a LayerTree,
    next: Option<LayerId>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a Layer;

    fn next(&mut self) -> Option<&'a Layer> {
        let layer = self.tree.get(self.next?)?;
        self.next = layer.parent;
        Some(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::color::RED;

    fn tree() -> (LayerTree, LayerId, LayerId, LayerId) {
        let mut t = LayerTree::new();
        let ground = t.push_root(Layer::tiles("ground", TileLayer::new(2, 2)));
        let group = t.push_root(Layer::group("clouds").with_offset(5.0, 0.0).with_parallax(0.5, 0.5));
        let inner = t
            .push_child(group, Layer::tiles("wisps", TileLayer::new(2, 2)).with_offset(1.0, 2.0))
            .expect("group accepts children");
        (t, ground, group, inner)
    }

    #[test]
    fn from_gids_checks_length() {
        let err = TileLayer::from_gids("oops", 2, 2, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, MapError::InvalidLayerSize { layer, expected: 4, actual: 3 } if layer == "oops"));
    }

    #[test]
    fn tile_access_is_bounds_checked() {
        let mut l = TileLayer::from_gids("l", 2, 1, vec![0, 7]).expect("sized");
        assert_eq!(l.get_tile_at(0, 0), None);
        assert_eq!(l.get_tile_at(1, 0), Some(TileRef(7)));
        assert_eq!(l.get_tile_at(2, 0), None);
        assert_eq!(l.set_tile_at(0, 0, TileRef(3)), Some(TileRef::EMPTY));
        assert_eq!(l.set_tile_at(-1, 0, TileRef(3)), None);
        assert_eq!(l.tile_count(), 2);
    }

    #[test]
    fn only_groups_take_children() {
        let (mut t, ground, _, _) = tree();
        let err = t.push_child(ground, Layer::group("g")).unwrap_err();
        assert!(matches!(err, MapError::NotAGroup(id) if id == ground));
        assert!(matches!(
            t.push_child(LayerId(99), Layer::group("g")),
            Err(MapError::UnknownLayer(LayerId(99)))
        ));
    }

    #[test]
    fn offsets_and_parallax_compose_up_the_chain() {
        let (t, _, _, inner) = tree();
        assert_eq!(t.render_offset(inner), Vector2::new(6.0, 2.0));
        assert_eq!(t.effective_parallax(inner), Vector2::new(0.5, 0.5));
        assert_eq!(t.ancestors(inner).count(), 1);
    }

    #[test]
    fn group_edits_are_seen_by_children() {
        let (mut t, _, group, inner) = tree();
        assert!(t.effective_visible(inner));
        assert_eq!(t.effective_tint(inner), WHITE);

        let g = t.get_mut(group).expect("group exists");
        g.visible = false;
        g.locked = true;
        g.tint = Some(RED);
        g.opacity = 0.5;

        assert!(!t.effective_visible(inner));
        assert!(t.effective_locked(inner));
        assert_eq!(t.effective_tint(inner), RED);
        assert_eq!(t.effective_opacity(inner), 0.5);
    }

    #[test]
    fn flatten_skips_groups_in_map_order() {
        let (t, ground, group, inner) = tree();
        assert_eq!(t.flatten(), vec![ground, inner]);
        assert_eq!(t.children(group), &[inner]);
        assert_eq!(t.find("wisps"), Some(inner));
    }
}
