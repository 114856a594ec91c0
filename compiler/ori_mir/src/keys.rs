//! Opaque cross-module identifiers.
//!
//! Earlier phases mint globally-unique key strings for types, functions,
//! methods, fields, and so on. Each category gets its own newtype so a
//! field key can never be passed where a method key is expected.

/// Define string-backed key newtypes.
///
/// Each generated type has:
/// - `new()` taking anything convertible into `String`
/// - `as_str()` borrowing the raw key
/// - `Display` printing the raw key verbatim
/// - `From<&str>` and `From<String>`
macro_rules! define_key {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            #[inline]
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self::new(key)
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }
    )* };
}

define_key!(
    /// Nominal type key: `ns::name#binds`.
    TypeKey,
    /// Namespace-level constant key: `ns::global`.
    GlobalKey,
    /// Type-associated constant key: `ns::name::const#binds`.
    ConstKey,
    /// Member field key: `ns::name::field#binds`.
    FieldKey,
    /// Lambda body key: `enclosingkey$line$column#binds`.
    LambdaKey,
    /// Free function key: `ns::func#binds`.
    FunctionKey,
    /// Static (type-associated) function key: `ns::name::static#binds`.
    StaticKey,
    /// Statically resolved method key: `ns::name::method#binds`.
    MethodKey,
    /// Fully resolved (structural or union) type key.
    ResolvedTypeKey,
    /// Virtual method resolution key: `method#binds`.
    VirtualMethodKey,
    /// Basic block label, unique within one body.
    BlockLabel,
);

impl BlockLabel {
    /// Conventional label of the entry block.
    pub const ENTRY: &'static str = "entry";
    /// Conventional label of the exit block.
    pub const EXIT: &'static str = "exit";

    pub fn entry() -> Self {
        Self::new(Self::ENTRY)
    }

    pub fn exit() -> Self {
        Self::new(Self::EXIT)
    }
}
