//! The metadata registry: attachment and inheritance-aware retrieval.
//!
//! [`MetadataRegistry`] associates [`MetadataRecord`]s with (entity, member) slots and
//! resolves them either strictly at the target's own level or by walking the declared
//! inheritance chain. It is the single component annotation call sites talk to: decorators
//! register attributes at definition time through [`MetadataRegistry::add_attribute`], and
//! framework initialization recovers them later through
//! [`MetadataRegistry::get_attributes`] / [`MetadataRegistry::get_own_attributes`].
//!
//! # Own vs. Inherited Resolution
//!
//! The two resolution modes exist so that attribute accumulation on a subclass never
//! mutates the superclass's list, while reads can still fall back to inherited attributes
//! when the subclass declares none of its own:
//!
//! - [`get_instance`](MetadataRegistry::get_instance) walks the chain and returns the
//!   nearest record, creating one at the *target's* level only when the whole chain is
//!   empty.
//! - [`get_own_instance`](MetadataRegistry::get_own_instance) ignores ancestors entirely,
//!   giving a subclass its own independent record even when a parent already has one.
//!
//! Writes always go through the own path, so an inherited record is never appended to.
//!
//! # Concurrency Design
//!
//! The slot table is a `DashMap`; record creation goes through its entry API, which makes
//! the check-then-create-then-register sequence a single critical section per slot. Two
//! threads racing to create the same slot observe one record, never two.
//!
//! # Examples
//!
//! ```rust
//! use declmeta::prelude::*;
//! use std::sync::Arc;
//!
//! struct Sound { value: &'static str }
//!
//! let model = Arc::new(EntityModel::new());
//! let animal = model.define("Animal", EntityKind::Type, None)?;
//! let dog = model.define("Dog", EntityKind::Type, Some(animal))?;
//!
//! let registry = MetadataRegistry::new(model);
//! registry.add_attribute(Arc::new(Sound { value: "generic" }), animal, None, None)?;
//!
//! // Dog has no own attributes, but inherits Animal's
//! assert_eq!(registry.get_attributes(dog, None)?.len(), 1);
//! assert!(registry.get_own_attributes(dog, None)?.is_empty());
//! # Ok::<(), declmeta::Error>(())
//! ```

use std::sync::Arc;

use dashmap::DashMap;

use crate::{
    registry::{
        AccessorDescriptor, AttributeRc, EntityId, EntityModel, MemberKey, MetadataRecord,
        MetadataRecordRc,
    },
    Result,
};

/// Composite slot key: one record per (entity, member) pair.
#[derive(Clone, PartialEq, Eq, Hash)]
struct RecordKey {
    entity: EntityId,
    /// `None` is entity-level scope, distinct from every member-level slot
    member: Option<MemberKey>,
}

/// Registry associating metadata records with entities and their members.
///
/// Constructed once by the application around a shared [`EntityModel`] and passed by
/// reference to every call site that attaches or introspects metadata. There is no ambient
/// global instance; per-test registries stay fully isolated.
///
/// Records live for the registry's lifetime. There is no deletion operation, and a record
/// is only ever mutated by appending attributes.
pub struct MetadataRegistry {
    /// Entity model supplying target validation and parent-chain lookup
    model: Arc<EntityModel>,
    /// Slot table; at most one own record per (entity, member) pair
    records: DashMap<RecordKey, MetadataRecordRc>,
}

impl MetadataRegistry {
    /// Create a registry over the given entity model.
    #[must_use]
    pub fn new(model: Arc<EntityModel>) -> Self {
        MetadataRegistry {
            model,
            records: DashMap::new(),
        }
    }

    /// The entity model this registry resolves targets against.
    #[must_use]
    pub fn model(&self) -> &Arc<EntityModel> {
        &self.model
    }

    /// Resolve the record for a slot, following the inheritance chain.
    ///
    /// Walks from `target` up its declared ancestors and returns the first own record
    /// found. When the whole chain has none, creates an empty record attached at the
    /// *target's* level (never at an ancestor's) and returns it. Once a target has an own
    /// record, repeated calls return the identical `Arc`, so mutations through it are
    /// visible to every caller.
    ///
    /// # Arguments
    /// * `target` - Handle of the entity to resolve against
    /// * `member` - Member scope; `None` addresses the entity-level slot
    /// * `descriptor` - Accessor descriptor recorded if a record is created
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidTarget`] if `target` does not name a defined entity.
    pub fn get_instance(
        &self,
        target: EntityId,
        member: Option<MemberKey>,
        descriptor: Option<AccessorDescriptor>,
    ) -> Result<MetadataRecordRc> {
        self.model.expect_valid(target)?;

        for entity in self.model.chain(target) {
            let key = RecordKey {
                entity,
                member: member.clone(),
            };
            if let Some(record) = self.records.get(&key) {
                return Ok(record.clone());
            }
        }

        Ok(self.own_record(target, member, descriptor))
    }

    /// Resolve the record for a slot at the target's own level only.
    ///
    /// Never consults ancestors: when the target has no own record, a fresh empty one is
    /// created even if a parent already has attributes for the same member. This is how a
    /// subclass accumulates attributes without aliasing its parent's list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidTarget`] if `target` does not name a defined entity.
    pub fn get_own_instance(
        &self,
        target: EntityId,
        member: Option<MemberKey>,
        descriptor: Option<AccessorDescriptor>,
    ) -> Result<MetadataRecordRc> {
        self.model.expect_valid(target)?;
        Ok(self.own_record(target, member, descriptor))
    }

    /// Attributes for a slot, following the inheritance chain.
    ///
    /// Returns a snapshot of the resolved record's attribute sequence in insertion order.
    /// A target whose whole chain carries no attributes yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidTarget`] if `target` does not name a defined entity.
    pub fn get_attributes(
        &self,
        target: EntityId,
        member: Option<MemberKey>,
    ) -> Result<Vec<AttributeRc>> {
        Ok(self.get_instance(target, member, None)?.attributes())
    }

    /// Attributes attached directly to the target, ignoring ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidTarget`] if `target` does not name a defined entity.
    pub fn get_own_attributes(
        &self,
        target: EntityId,
        member: Option<MemberKey>,
    ) -> Result<Vec<AttributeRc>> {
        Ok(self.get_own_instance(target, member, None)?.attributes())
    }

    /// Append an attribute to the target's own record for a slot.
    ///
    /// Resolves (or creates) the own record and appends; an inherited record is never
    /// appended to. Insertion order is preserved and duplicates are permitted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidTarget`] if `target` does not name a defined entity.
    pub fn add_attribute(
        &self,
        attribute: AttributeRc,
        target: EntityId,
        member: Option<MemberKey>,
        descriptor: Option<AccessorDescriptor>,
    ) -> Result<()> {
        self.get_own_instance(target, member, descriptor)?
            .add_attribute(attribute);
        Ok(())
    }

    /// Number of records currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records have been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get or create the own record for a slot. The entry API keeps concurrent creation
    /// races down to a single winning record per slot.
    fn own_record(
        &self,
        target: EntityId,
        member: Option<MemberKey>,
        descriptor: Option<AccessorDescriptor>,
    ) -> MetadataRecordRc {
        let key = RecordKey {
            entity: target,
            member: member.clone(),
        };
        self.records
            .entry(key)
            .or_insert_with(|| Arc::new(MetadataRecord::new(target, member, descriptor)))
            .clone()
    }
}
