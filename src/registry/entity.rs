//! Entity-definition model for metadata attachment.
//!
//! This module provides the [`EntityModel`], a thread-safe registry of the program entities
//! that metadata can attach to. An entity is either a type definition or a class-instance
//! prototype, identified by an [`EntityId`] handle and carrying an optional declared parent.
//!
//! # Key Components
//!
//! - [`EntityId`] - Opaque `u32` handle identifying a defined entity
//! - [`EntityKind`] - Classification of entities (type definition vs. prototype)
//! - [`EntityDef`] - Immutable definition record (id, kind, name, parent)
//! - [`EntityModel`] - Central registry of definitions with parent-chain walking
//!
//! # Inheritance Model
//!
//! Inheritance is explicit: each definition names at most one parent, and the parent must
//! already be defined at definition time. Because handles are allocated in definition order,
//! a parent always carries a smaller handle than its children and declared chains can never
//! form a cycle. [`EntityModel::chain`] walks an entity followed by its ancestors, which is
//! the resolution order inheritance-aware metadata lookups use.
//!
//! # Thread Safety
//!
//! The model is designed for concurrent definition and lookup:
//! - Lock-free primary storage (`SkipMap`) keyed by handle
//! - Concurrent name index (`DashMap`)
//! - Atomic handle generation
//!
//! # Examples
//!
//! ```rust
//! use declmeta::registry::{EntityKind, EntityModel};
//!
//! let model = EntityModel::new();
//! let animal = model.define("Animal", EntityKind::Type, None)?;
//! let dog = model.define("Dog", EntityKind::Type, Some(animal))?;
//!
//! assert_eq!(model.parent_of(dog), Some(animal));
//! assert_eq!(model.chain(dog).collect::<Vec<_>>(), vec![dog, animal]);
//! # Ok::<(), declmeta::Error>(())
//! ```

use std::fmt;
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use strum::{EnumCount, EnumIter};

use crate::{Error::InvalidTarget, Result};

/// A handle identifying a defined entity within an [`EntityModel`].
///
/// Handles are opaque 32-bit values allocated in definition order, starting at 1.
/// The value 0 is the null handle and never names a defined entity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Creates an entity handle from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        EntityId(value)
    }

    /// Returns the raw handle value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns true if this is the null handle (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for EntityId {
    fn from(value: u32) -> Self {
        EntityId(value)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId(0x{:08x})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Classification of entities that metadata can attach to.
///
/// Mirrors the two target shapes of annotation-style frameworks layered over
/// single-inheritance object models: the type definition itself (annotations placed on
/// the class) and the instance prototype (annotations placed on instance members).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter)]
pub enum EntityKind {
    /// A callable type definition (a class or constructor)
    Type,
    /// A class-instance prototype
    Prototype,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Type => write!(f, "type"),
            EntityKind::Prototype => write!(f, "prototype"),
        }
    }
}

/// An immutable entity definition.
///
/// Created through [`EntityModel::define`] and shared by reference counting. The parent
/// link, when present, is guaranteed to name an entity defined earlier in the same model.
#[derive(Debug)]
pub struct EntityDef {
    /// Handle identifying this definition within its model
    pub id: EntityId,
    /// Whether this is a type definition or an instance prototype
    pub kind: EntityKind,
    /// Declared name (not required to be unique)
    pub name: String,
    /// Declared parent in the inheritance chain, if any
    pub parent: Option<EntityId>,
}

/// A reference-counted [`EntityDef`]
pub type EntityRc = Arc<EntityDef>;

/// Central registry of entity definitions.
///
/// `EntityModel` is the authoritative source for "is this a valid metadata target" and for
/// parent-chain resolution. It is constructed explicitly by the application and shared by
/// reference with every component that needs it; there is no ambient global instance, which
/// keeps tests isolated and call sites honest about their dependencies.
///
/// # Concurrency Design
///
/// - Primary storage is a `SkipMap` keyed by [`EntityId`] for lock-free ordered access
/// - The name index is a `DashMap` permitting duplicate names
/// - Handle generation uses an atomic counter, so concurrent `define` calls never collide
///
/// # Examples
///
/// ```rust
/// use declmeta::registry::{EntityKind, EntityModel};
///
/// let model = EntityModel::new();
/// let base = model.define("Controller", EntityKind::Type, None)?;
/// let derived = model.define("UserController", EntityKind::Type, Some(base))?;
///
/// assert!(model.get(derived).is_some());
/// assert_eq!(model.find_by_name("Controller").unwrap().id, base);
/// # Ok::<(), declmeta::Error>(())
/// ```
pub struct EntityModel {
    /// Primary definition storage indexed by handle
    entities: SkipMap<EntityId, EntityRc>,
    /// Secondary index: definitions by declared name (duplicates permitted)
    by_name: DashMap<String, Vec<EntityId>>,
    /// Atomic counter for handle allocation; 0 is reserved as the null handle
    next_id: AtomicU32,
}

impl EntityModel {
    /// Create a new empty entity model.
    #[must_use]
    pub fn new() -> Self {
        EntityModel {
            entities: SkipMap::new(),
            by_name: DashMap::new(),
            next_id: AtomicU32::new(1),
        }
    }

    /// Get the next available handle and increment the counter
    fn next_id(&self) -> EntityId {
        EntityId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Define a new entity and return its handle.
    ///
    /// The parent, when given, must already be defined in this model. Since handles are
    /// allocated in definition order, a declared chain is strictly decreasing in handle
    /// value and can never cycle.
    ///
    /// # Arguments
    /// * `name` - Declared name; duplicates are permitted
    /// * `kind` - Whether this is a type definition or an instance prototype
    /// * `parent` - Declared parent in the inheritance chain, if any
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidTarget`] if `parent` does not name a defined entity.
    pub fn define(
        &self,
        name: &str,
        kind: EntityKind,
        parent: Option<EntityId>,
    ) -> Result<EntityId> {
        if let Some(parent) = parent {
            if self.entities.get(&parent).is_none() {
                return Err(InvalidTarget { entity: parent });
            }
        }

        let id = self.next_id();
        self.entities.insert(
            id,
            Arc::new(EntityDef {
                id,
                kind,
                name: name.to_string(),
                parent,
            }),
        );
        self.by_name.entry(name.to_string()).or_default().push(id);
        Ok(id)
    }

    /// Look up a definition by handle.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<EntityRc> {
        self.entities.get(&id).map(|entry| entry.value().clone())
    }

    /// Look up the earliest definition with the given name.
    ///
    /// Names are not unique; when several entities share a name, the one defined first wins.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<EntityRc> {
        let id = self.by_name.get(name).and_then(|ids| ids.first().copied())?;
        self.get(id)
    }

    /// One step up the declared inheritance chain.
    ///
    /// Returns `None` for undefined handles and for entities without a declared parent.
    #[must_use]
    pub fn parent_of(&self, id: EntityId) -> Option<EntityId> {
        self.get(id).and_then(|entity| entity.parent)
    }

    /// The entity itself followed by its declared ancestors, nearest first.
    ///
    /// This is the resolution order used by inheritance-aware metadata lookups. The walk
    /// terminates because parent handles are strictly smaller than their children's.
    pub fn chain(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::successors(Some(id), move |&entity| self.parent_of(entity))
    }

    /// Resolve a handle, failing if it does not name a defined entity.
    ///
    /// This is the validity check every registry operation applies to its target before
    /// doing anything else.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidTarget`] if `id` is the null handle or was never
    /// returned by [`EntityModel::define`] on this model.
    pub fn expect_valid(&self, id: EntityId) -> Result<EntityRc> {
        self.get(id).ok_or(InvalidTarget { entity: id })
    }

    /// Number of defined entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entities have been defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for EntityModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn test_entity_id_basics() {
        let id = EntityId::new(0x42);
        assert_eq!(id.value(), 0x42);
        assert!(!id.is_null());
        assert!(EntityId::new(0).is_null());

        let from: EntityId = 7u32.into();
        let back: u32 = from.into();
        assert_eq!(back, 7);
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(format!("{}", EntityId::new(0x1F)), "0x0000001f");
        assert!(format!("{:?}", EntityId::new(1)).contains("EntityId(0x00000001)"));
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Type.to_string(), "type");
        assert_eq!(EntityKind::Prototype.to_string(), "prototype");
        assert_eq!(EntityKind::iter().count(), EntityKind::COUNT);
    }

    #[test]
    fn test_define_and_get() {
        let model = EntityModel::new();
        let id = model.define("Animal", EntityKind::Type, None).unwrap();

        let def = model.get(id).unwrap();
        assert_eq!(def.id, id);
        assert_eq!(def.name, "Animal");
        assert_eq!(def.kind, EntityKind::Type);
        assert!(def.parent.is_none());
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_define_unknown_parent_fails() {
        let model = EntityModel::new();
        let result = model.define("Dog", EntityKind::Type, Some(EntityId::new(99)));
        assert!(matches!(
            result,
            Err(crate::Error::InvalidTarget { entity }) if entity.value() == 99
        ));
        assert!(model.is_empty());
    }

    #[test]
    fn test_parent_chain() {
        let model = EntityModel::new();
        let animal = model.define("Animal", EntityKind::Type, None).unwrap();
        let dog = model.define("Dog", EntityKind::Type, Some(animal)).unwrap();
        let puppy = model.define("Puppy", EntityKind::Type, Some(dog)).unwrap();

        assert_eq!(model.parent_of(puppy), Some(dog));
        assert_eq!(model.parent_of(dog), Some(animal));
        assert_eq!(model.parent_of(animal), None);

        let chain: Vec<_> = model.chain(puppy).collect();
        assert_eq!(chain, vec![puppy, dog, animal]);
    }

    #[test]
    fn test_find_by_name_first_wins() {
        let model = EntityModel::new();
        let first = model.define("Handler", EntityKind::Type, None).unwrap();
        let _second = model.define("Handler", EntityKind::Prototype, None).unwrap();

        assert_eq!(model.find_by_name("Handler").unwrap().id, first);
        assert!(model.find_by_name("Missing").is_none());
    }

    #[test]
    fn test_expect_valid() {
        let model = EntityModel::new();
        let id = model.define("Animal", EntityKind::Type, None).unwrap();

        assert!(model.expect_valid(id).is_ok());
        assert!(model.expect_valid(EntityId::new(0)).is_err());
        assert!(model.expect_valid(EntityId::new(1234)).is_err());
    }

    #[test]
    fn test_concurrent_define_unique_handles() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let model = Arc::new(EntityModel::new());
        let mut handles = Vec::new();
        for t in 0..4 {
            let model = Arc::clone(&model);
            handles.push(std::thread::spawn(move || {
                (0..100)
                    .map(|i| {
                        model
                            .define(&format!("T{}_{}", t, i), EntityKind::Type, None)
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate handle {}", id);
            }
        }
        assert_eq!(model.len(), 400);
    }
}
