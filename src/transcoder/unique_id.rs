use std::collections::HashMap;
use std::fmt;

/// The kind of COLLADA element a [`UniqueId`] refers to. Identifiers of
/// different classes never collide, even for equal `id` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassId {
    Geometry,
    Material,
    Camera,
    Light,
    Controller,
    Node,
    VisualScene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueId {
    pub class: ClassId,
    pub object_id: u32,
}

impl UniqueId {
    pub fn new(class: ClassId, object_id: u32) -> Self {
        Self { class, object_id }
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.class, self.object_id)
    }
}

/// Hands out [`UniqueId`]s for document `id` attributes.
///
/// A reference seen before its definition allocates the identifier early, so
/// forward references resolve to the same id as the later definition.
#[derive(Debug, Default)]
pub struct IdRegistry {
    named: HashMap<(ClassId, String), UniqueId>,
    defined: HashMap<UniqueId, String>,
    next: HashMap<ClassId, u32>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, class: ClassId) -> UniqueId {
        let next = self.next.entry(class).or_insert(0);
        let id = UniqueId::new(class, *next);
        *next += 1;
        id
    }

    /// Identifier for a reference to `id`, allocated on first use.
    pub fn reference(&mut self, class: ClassId, id: &str) -> UniqueId {
        if let Some(unique_id) = self.named.get(&(class, id.to_owned())) {
            return *unique_id;
        }

        let unique_id = self.allocate(class);
        self.named.insert((class, id.to_owned()), unique_id);
        unique_id
    }

    /// Identifier for an element definition. Elements without an `id`
    /// attribute get a fresh identifier nothing can reference.
    pub fn define(&mut self, class: ClassId, id: Option<&str>) -> UniqueId {
        match id {
            Some(id) => {
                let unique_id = self.reference(class, id);
                self.defined.insert(unique_id, id.to_owned());
                unique_id
            }
            None => self.allocate(class),
        }
    }

    /// Identifier of an already defined element.
    pub fn lookup_defined(&self, class: ClassId, id: &str) -> Option<UniqueId> {
        self.named
            .get(&(class, id.to_owned()))
            .copied()
            .filter(|unique_id| self.defined.contains_key(unique_id))
    }

    pub fn is_defined(&self, unique_id: UniqueId) -> bool {
        self.defined.contains_key(&unique_id)
    }

    /// References that never received a definition.
    pub fn dangling(&self) -> impl Iterator<Item = (&str, UniqueId)> {
        self.named
            .iter()
            .filter(|(_, unique_id)| !self.defined.contains_key(unique_id))
            .map(|((_, id), unique_id)| (id.as_str(), *unique_id))
    }
}
