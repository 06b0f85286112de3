//! Member keys and accessor descriptors.
//!
//! Metadata can attach at three granularities: the entity itself (no member key), a named
//! member (method or property), or a property accessor (member key plus descriptor). This
//! module provides the [`MemberKey`] sum type with canonical-form normalization at the API
//! boundary, and the informational [`AccessorDescriptor`] carried by property-level
//! attachments.
//!
//! # Key Normalization
//!
//! Arbitrary key values are coerced into one of two canonical shapes: a string name or a
//! symbolic identifier. Numeric keys normalize to their decimal string form, matching the
//! property-key coercion rules of dynamic object models; symbols keep their identity and
//! never collide with names. The `From` impls on [`MemberKey`] are the single normalization
//! point, so every registry operation sees keys in canonical form.

use std::fmt;

use bitflags::bitflags;

/// An interned symbolic identifier.
///
/// Symbols are distinct from string names: `SymbolId::new(1)` and the name `"1"` address
/// different member slots. Allocation and interning of symbol values is the caller's
/// concern; the registry only requires identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Creates a symbol identifier from a raw value
    #[must_use]
    pub fn new(value: u32) -> Self {
        SymbolId(value)
    }

    /// Returns the raw symbol value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// A canonical member key: a string name or a symbolic identifier.
///
/// This is the normalized form every registry operation works with. Construct it through
/// the `From` impls (the normalization boundary) rather than by matching on variants:
///
/// ```rust
/// use declmeta::registry::{MemberKey, SymbolId};
///
/// let by_name: MemberKey = "speak".into();
/// let by_index: MemberKey = 42u32.into();
/// let by_symbol: MemberKey = SymbolId::new(7).into();
///
/// assert_eq!(by_name, MemberKey::Name("speak".to_string()));
/// assert_eq!(by_index, MemberKey::Name("42".to_string()));
/// assert_eq!(by_symbol, MemberKey::Symbol(SymbolId::new(7)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKey {
    /// A property or method name
    Name(String),
    /// A symbolic identifier, never equal to any name
    Symbol(SymbolId),
}

impl MemberKey {
    /// Returns the string name if this key is a name
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            MemberKey::Name(name) => Some(name),
            MemberKey::Symbol(_) => None,
        }
    }

    /// Returns true if this key is a symbolic identifier
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self, MemberKey::Symbol(_))
    }
}

impl From<&str> for MemberKey {
    fn from(name: &str) -> Self {
        MemberKey::Name(name.to_string())
    }
}

impl From<String> for MemberKey {
    fn from(name: String) -> Self {
        MemberKey::Name(name)
    }
}

// Numeric keys canonicalize to their decimal string form, like property keys
// in dynamic object models.
impl From<u32> for MemberKey {
    fn from(index: u32) -> Self {
        MemberKey::Name(index.to_string())
    }
}

impl From<usize> for MemberKey {
    fn from(index: usize) -> Self {
        MemberKey::Name(index.to_string())
    }
}

impl From<SymbolId> for MemberKey {
    fn from(symbol: SymbolId) -> Self {
        MemberKey::Symbol(symbol)
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKey::Name(name) => write!(f, "{}", name),
            MemberKey::Symbol(symbol) => write!(f, "@{}", symbol.value()),
        }
    }
}

bitflags! {
    /// Shape flags of a property accessor.
    ///
    /// Records which accessor pieces a property-level attachment was declared with and
    /// the configurability of the slot. Purely informational; lookup never consults them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessorFlags: u8 {
        /// The property declares a getter
        const GETTER = 0x01;
        /// The property declares a setter
        const SETTER = 0x02;
        /// The property is a plain value slot
        const VALUE = 0x04;
        /// The value slot is writable
        const WRITABLE = 0x08;
        /// The property shows up during enumeration
        const ENUMERABLE = 0x10;
        /// The property slot can be reconfigured
        const CONFIGURABLE = 0x20;
    }
}

/// Descriptor of the property accessor a metadata record was attached through.
///
/// Present only for property-level attachments. The registry stores it as part of the
/// record's back-reference and never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorDescriptor {
    /// Accessor shape flags
    pub flags: AccessorFlags,
}

impl AccessorDescriptor {
    /// Creates a descriptor with the given shape flags
    #[must_use]
    pub fn new(flags: AccessorFlags) -> Self {
        AccessorDescriptor { flags }
    }

    /// Descriptor for a getter/setter accessor pair
    #[must_use]
    pub fn accessor(getter: bool, setter: bool) -> Self {
        let mut flags = AccessorFlags::empty();
        if getter {
            flags |= AccessorFlags::GETTER;
        }
        if setter {
            flags |= AccessorFlags::SETTER;
        }
        AccessorDescriptor { flags }
    }

    /// Descriptor for a writable plain value slot
    #[must_use]
    pub fn value() -> Self {
        AccessorDescriptor {
            flags: AccessorFlags::VALUE | AccessorFlags::WRITABLE,
        }
    }

    /// Returns true if the property declares a getter
    #[must_use]
    pub fn has_getter(&self) -> bool {
        self.flags.contains(AccessorFlags::GETTER)
    }

    /// Returns true if the property declares a setter
    #[must_use]
    pub fn has_setter(&self) -> bool {
        self.flags.contains(AccessorFlags::SETTER)
    }
}
