//! Metadata attachment and inheritance-aware retrieval.
//!
//! This module is the heart of the crate: a registry that associates opaque attribute
//! values with program entities and their members, and resolves them later either strictly
//! or through the declared inheritance chain.
//!
//! # Key Components
//!
//! - [`EntityModel`] - Registry of the entities metadata can attach to, with explicit
//!   parent links ([`EntityId`], [`EntityKind`], [`EntityDef`])
//! - [`MemberKey`] - Canonical member key (string name or [`SymbolId`]) with normalization
//!   at the API boundary
//! - [`AccessorDescriptor`] - Informational accessor shape for property-level attachments
//! - [`MetadataRecord`] - Ordered, append-only attribute sequence owned by one slot
//! - [`MetadataRegistry`] - The attachment and lookup operations themselves
//!
//! # Typical Flow
//!
//! Annotation call sites register attributes at definition time and introspect them at
//! framework-initialization time:
//!
//! ```rust
//! use declmeta::prelude::*;
//! use std::sync::Arc;
//!
//! struct Inject { token: &'static str }
//!
//! let model = Arc::new(EntityModel::new());
//! let service = model.define("Service", EntityKind::Type, None)?;
//!
//! let registry = MetadataRegistry::new(Arc::clone(&model));
//! registry.add_attribute(
//!     Arc::new(Inject { token: "db" }),
//!     service,
//!     Some("connection".into()),
//!     None,
//! )?;
//!
//! for attribute in registry.get_attributes(service, Some("connection".into()))? {
//!     if let Some(inject) = attribute.downcast_ref::<Inject>() {
//!         println!("inject {}", inject.token);
//!     }
//! }
//! # Ok::<(), declmeta::Error>(())
//! ```

mod entity;
mod member;
mod record;
mod store;

pub use entity::{EntityDef, EntityId, EntityKind, EntityModel, EntityRc};
pub use member::{AccessorDescriptor, AccessorFlags, MemberKey, SymbolId};
pub use record::{Attribute, AttributeRc, MetadataRecord, MetadataRecordRc};
pub use store::MetadataRegistry;
