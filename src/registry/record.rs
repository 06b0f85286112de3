//! Metadata records and the opaque attribute capability.
//!
//! A [`MetadataRecord`] is the unit of storage in the registry: one record per
//! (entity, member) slot, holding an ordered, append-only sequence of attributes plus a
//! back-reference to the slot it belongs to. Attributes themselves are opaque — any
//! `Send + Sync + 'static` value qualifies through the blanket [`Attribute`] impl, and the
//! registry never inspects attribute content.
//!
//! # Ordering and Sharing
//!
//! The attribute sequence preserves insertion order, permits duplicates, and is never
//! reordered or deduplicated. Records are shared by reference counting
//! ([`MetadataRecordRc`]); every caller resolving the same slot holds the same record, so
//! appends are visible to all of them. The sequence itself is a `boxcar::Vec`, which
//! supports lock-free concurrent appends without invalidating concurrent readers.

use std::any::Any;
use std::sync::Arc;

use crate::registry::{AccessorDescriptor, EntityId, MemberKey};

/// The capability required of values stored as attributes.
///
/// Blanket-implemented for every `Send + Sync + 'static` type, so any framework-defined
/// annotation value is storable without ceremony. [`as_any`](Attribute::as_any) is the
/// hook consumers use to recover the concrete type at introspection time:
///
/// ```rust
/// use declmeta::registry::Attribute;
/// use std::sync::Arc;
///
/// struct Route { path: &'static str }
///
/// let attribute: Arc<dyn Attribute> = Arc::new(Route { path: "/users" });
/// let route = attribute.downcast_ref::<Route>().unwrap();
/// assert_eq!(route.path, "/users");
/// ```
pub trait Attribute: Send + Sync + 'static {
    /// Upcast to [`Any`] for downcasting back to the concrete attribute type
    fn as_any(&self) -> &dyn Any;
}

impl<T: Send + Sync + 'static> Attribute for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Attribute {
    /// Returns true if the stored attribute is of type `T`
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the stored attribute as `T`, if it is one
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl std::fmt::Debug for dyn Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<attribute>")
    }
}

/// A reference-counted opaque attribute value
pub type AttributeRc = Arc<dyn Attribute>;

/// The metadata record owned by one (entity, member) slot.
///
/// Created lazily by the registry on first write or own-forcing read, and mutated only by
/// appending attributes; attributes are never removed or replaced. The target, member key,
/// and descriptor are a back-reference for introspection and carry no ownership semantics.
///
/// # Thread Safety
///
/// [`add_attribute`](MetadataRecord::add_attribute) takes `&self` and is safe to call
/// concurrently; appends from different threads serialize inside the underlying sequence
/// and each lands at a distinct position.
pub struct MetadataRecord {
    /// The entity this record is attached to
    target: EntityId,
    /// Member the record is scoped to; `None` means entity-level scope
    member: Option<MemberKey>,
    /// Accessor descriptor for property-level attachments
    descriptor: Option<AccessorDescriptor>,
    /// Ordered attribute sequence; append-only, duplicates permitted
    attributes: boxcar::Vec<AttributeRc>,
}

/// A reference-counted [`MetadataRecord`].
///
/// Pointer identity of the `Arc` is the record-identity guarantee: resolving the same slot
/// twice yields the same allocation.
pub type MetadataRecordRc = Arc<MetadataRecord>;

impl MetadataRecord {
    /// Create an empty record for the given slot
    pub(crate) fn new(
        target: EntityId,
        member: Option<MemberKey>,
        descriptor: Option<AccessorDescriptor>,
    ) -> Self {
        MetadataRecord {
            target,
            member,
            descriptor,
            attributes: boxcar::Vec::new(),
        }
    }

    /// The entity this record is attached to
    #[must_use]
    pub fn target(&self) -> EntityId {
        self.target
    }

    /// The member key this record is scoped to, if any
    #[must_use]
    pub fn member(&self) -> Option<&MemberKey> {
        self.member.as_ref()
    }

    /// The accessor descriptor this record was attached through, if any
    #[must_use]
    pub fn descriptor(&self) -> Option<AccessorDescriptor> {
        self.descriptor
    }

    /// Append an attribute, preserving insertion order.
    pub fn add_attribute(&self, attribute: AttributeRc) {
        self.attributes.push(attribute);
    }

    /// Snapshot of the attribute sequence in insertion order.
    #[must_use]
    pub fn attributes(&self) -> Vec<AttributeRc> {
        self.attributes
            .iter()
            .map(|(_, attribute)| attribute.clone())
            .collect()
    }

    /// Number of attributes currently attached
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.count()
    }

    /// Returns true if no attributes are attached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Tag(&'static str);

    #[test]
    fn test_empty_record() {
        let record = MetadataRecord::new(EntityId::new(1), None, None);
        assert!(record.is_empty());
        assert_eq!(record.len(), 0);
        assert!(record.attributes().is_empty());
        assert_eq!(record.target(), EntityId::new(1));
        assert!(record.member().is_none());
        assert!(record.descriptor().is_none());
    }

    #[test]
    fn test_insertion_order_and_duplicates() {
        let record = MetadataRecord::new(EntityId::new(1), None, None);
        record.add_attribute(Arc::new(Tag("first")));
        record.add_attribute(Arc::new(Tag("second")));
        record.add_attribute(Arc::new(Tag("first")));

        let attributes = record.attributes();
        assert_eq!(attributes.len(), 3);
        let tags: Vec<_> = attributes
            .iter()
            .map(|a| a.downcast_ref::<Tag>().unwrap().0)
            .collect();
        assert_eq!(tags, vec!["first", "second", "first"]);
    }

    #[test]
    fn test_member_scoped_back_reference() {
        let member: MemberKey = "speak".into();
        let descriptor = crate::registry::AccessorDescriptor::accessor(true, false);
        let record = MetadataRecord::new(EntityId::new(3), Some(member.clone()), Some(descriptor));

        assert_eq!(record.member(), Some(&member));
        assert_eq!(record.descriptor(), Some(descriptor));
    }

    #[test]
    fn test_downcast_mismatch() {
        let record = MetadataRecord::new(EntityId::new(1), None, None);
        record.add_attribute(Arc::new(Tag("tag")));

        let attributes = record.attributes();
        assert!(attributes[0].is::<Tag>());
        assert!(attributes[0].downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_concurrent_append() {
        let record = Arc::new(MetadataRecord::new(EntityId::new(1), None, None));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let record = Arc::clone(&record);
            handles.push(std::thread::spawn(move || {
                for _ in 0..250 {
                    record.add_attribute(Arc::new(Tag("t")));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(record.len(), 1000);
    }
}
