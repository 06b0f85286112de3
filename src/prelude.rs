//! # declmeta Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! library. Import this module to get quick access to the essential types for metadata
//! attachment and introspection.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all declmeta operations
pub use crate::Error;

/// The result type used throughout declmeta
pub use crate::Result;

// ================================================================================================
// Entity Model
// ================================================================================================

/// Entity definitions and the model that owns them
pub use crate::registry::{EntityDef, EntityId, EntityKind, EntityModel, EntityRc};

// ================================================================================================
// Member Keys and Accessors
// ================================================================================================

/// Canonical member keys and accessor descriptors
pub use crate::registry::{AccessorDescriptor, AccessorFlags, MemberKey, SymbolId};

// ================================================================================================
// Records and the Registry
// ================================================================================================

/// Opaque attribute capability and record types
pub use crate::registry::{Attribute, AttributeRc, MetadataRecord, MetadataRecordRc};

/// Main entry point for metadata attachment and lookup
pub use crate::registry::MetadataRegistry;
