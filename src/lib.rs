// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # declmeta
//!
//! A thread-safe, inheritance-aware metadata attachment registry for annotation-driven
//! frameworks. `declmeta` associates arbitrary opaque "attribute" values with a program
//! entity (a type definition or an instance prototype), a member of that entity, or a
//! property accessor, and retrieves them later — including through the declared
//! inheritance chain.
//!
//! ## Features
//!
//! - **Opaque attributes** - Any `Send + Sync + 'static` value attaches without ceremony;
//!   the registry never inspects attribute content
//! - **Inheritance-aware lookup** - Reads fall back to the nearest ancestor's attributes
//!   when a subclass declares none of its own
//! - **Own/inherited isolation** - Writes always land on the target's own record, so a
//!   subclass never mutates its parent's attribute list
//! - **Thread safe** - Lock-free slot table and append-only attribute sequences; record
//!   creation is a single critical section per slot
//! - **Explicit lifecycle** - No ambient global state; the application constructs the
//!   entity model and registry and passes them by reference
//!
//! ## Quick Start
//!
//! Add `declmeta` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! declmeta = "0.1"
//! ```
//!
//! ### Using the Prelude
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
//! // Dog declares nothing of its own, so reads fall back to Animal
//! let inherited = registry.get_attributes(dog, None)?;
//! assert_eq!(inherited[0].downcast_ref::<Sound>().unwrap().value, "generic");
//!
//! // ...while Dog's own slot stays empty until something is attached to it
//! assert!(registry.get_own_attributes(dog, None)?.is_empty());
//! # Ok::<(), declmeta::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`registry`] - The entity model, member keys, records, and the registry itself
//! - [`prelude`] - Convenient re-exports of the commonly used types
//! - [`Error`] and [`Result`] - Error handling
//!
//! The registry holds at most one *own* record per (entity, member) slot. Inherited
//! lookups read an ancestor's own record without copying it, so there is never ambiguity
//! about which list a read observed or a write mutated.

mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use declmeta::prelude::*;
/// use std::sync::Arc;
///
/// let model = Arc::new(EntityModel::new());
/// let registry = MetadataRegistry::new(model);
/// assert!(registry.is_empty());
/// ```
pub mod prelude;

/// Metadata attachment and inheritance-aware retrieval.
///
/// See [`registry::MetadataRegistry`] for the attachment/lookup operations and
/// [`registry::EntityModel`] for the entity-definition model they resolve targets against.
pub mod registry;

/// `declmeta` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. Used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `declmeta` Error type
///
/// The single error type for all operations in this crate. The only failure mode is an
/// invalid target reference; see [`Error::InvalidTarget`].
pub use error::Error;

/// Registry of metadata attachments.
///
/// See [`registry::MetadataRegistry`] for attachment and inheritance-aware lookup.
pub use registry::MetadataRegistry;
