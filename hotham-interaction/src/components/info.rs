/// What sort of thing an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityKind {
    Unknown,
    Model,
    #[default]
    Shape,
    Text,
    Image,
    Web,
    Light,
    Zone,
    PolyLine,
}

impl EntityKind {
    /// Some kinds of entity have no physical presence, so grabbing them makes no sense
    pub fn can_be_grabbed(&self) -> bool {
        !matches!(
            self,
            EntityKind::Unknown | EntityKind::Light | EntityKind::Zone | EntityKind::PolyLine
        )
    }
}

/// Debug information about an entity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Info {
    pub name: String,
    pub kind: EntityKind,
}

impl Info {
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}
