use thiserror::Error;

use crate::registry::EntityId;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The registry has exactly one failure mode: an operation was handed a target reference
/// that does not name a defined entity. All other inputs are normalized defensively at the
/// API boundary (a missing member key means class-level scope, arbitrary key values are
/// coerced to their canonical form) rather than rejected.
///
/// # Examples
///
/// ```rust
/// use declmeta::{Error, registry::{EntityId, EntityModel, MetadataRegistry}};
/// use std::sync::Arc;
///
/// let model = Arc::new(EntityModel::new());
/// let registry = MetadataRegistry::new(model);
///
/// match registry.get_attributes(EntityId::new(0xDEAD), None) {
///     Ok(attributes) => println!("Found {} attributes", attributes.len()),
///     Err(Error::InvalidTarget { entity }) => {
///         eprintln!("Not a defined entity: {}", entity);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The target reference does not name a defined entity.
    ///
    /// Raised synchronously by every registry operation when the first argument is not a
    /// handle obtained from the entity model, and by [`crate::registry::EntityModel::define`]
    /// when the declared parent is unknown. This is a programmer error at the call site,
    /// surfaced immediately; there are no retry semantics.
    #[error("Target is not a defined entity - {entity}")]
    InvalidTarget {
        /// The handle that failed resolution against the entity model
        entity: EntityId,
    },
}
