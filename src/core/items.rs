use glam::Vec3;
use smallvec::SmallVec;

/// Stable handle to an interactive item. Doubles as the registry index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ItemId(pub u32);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ItemKind {
    MainCard,
    Repository,
    Skill,
}

/// Display metadata, immutable after creation.
#[derive(Clone, Debug)]
pub struct ItemMeta {
    pub title: String,
    /// Ordered tag strings (tech stack); order is presentation order.
    pub tags: SmallVec<[String; 4]>,
    /// Optional numeric badge (star count).
    pub badge: Option<u64>,
}

impl ItemMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: SmallVec::new(),
            badge: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_badge(mut self, badge: u64) -> Self {
        self.badge = Some(badge);
        self
    }
}

#[derive(Clone, Debug)]
pub struct InteractiveItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub meta: ItemMeta,
    /// World position, rewritten every tick by the scene's motion pass.
    /// The evaluators only ever read it.
    pub position: Vec3,
    /// Resting glow intensity; resting scale is always 1.0.
    pub base_glow: f32,
}

/// Flat, append-only collection of interactive items.
///
/// Items are created once during scene population and live until teardown,
/// so there is no removal and no duplicate-id handling.
#[derive(Default)]
pub struct Registry {
    items: Vec<InteractiveItem>,
}

impl Registry {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn register(&mut self, kind: ItemKind, meta: ItemMeta, base_glow: f32) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(InteractiveItem {
            id,
            kind,
            meta,
            position: Vec3::ZERO,
            base_glow,
        });
        id
    }

    /// Restartable pass over every registered item, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &InteractiveItem> {
        self.items.iter()
    }

    pub fn get(&self, id: ItemId) -> Option<&InteractiveItem> {
        self.items.get(id.0 as usize)
    }

    /// Single writer: the scene calls this after stepping motion rules.
    pub fn set_position(&mut self, id: ItemId, position: Vec3) {
        if let Some(item) = self.items.get_mut(id.0 as usize) {
            item.position = position;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
