//! The `Bean` contract shared by every property bean, plus the macros that
//! wire up parent embedding, class names and `class`-tagged polymorphism.

use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::validation::Validate;

/// Header version written by this library.
pub const CURRENT_PROPERTIES_VERSION: i64 = 1;

/// Name of the JSON property carrying the concrete type of a polymorphic bean.
pub const CLASS_PROPERTY: &str = "class";

/// Common behaviour of every property bean.
///
/// Copying is `Clone`: every collection is owned, so a copy never shares
/// mutable state with its template. `Hash` feeds the fingerprint, so equal
/// beans hash alike.
pub trait Bean:
    Clone + Default + Eq + Hash + fmt::Debug + Serialize + DeserializeOwned + Validate
{
    /// Simple type name written to the `class` discriminator.
    const CLASS_NAME: &'static str;

    /// Copies the template, or returns a default instance when there is none.
    fn from_template(template: Option<&Self>) -> Self {
        template.cloned().unwrap_or_default()
    }

    /// Version of the property layout this bean was written with.
    fn header_version(&self) -> i64;

    /// SHA-256 over the canonical JSON form. Equal beans share a fingerprint.
    fn fingerprint(&self) -> String {
        crate::fingerprint::fingerprint(self)
    }
}

// -- serde helpers ---------------------------------------------------------

pub(crate) fn is_false(b: &bool) -> bool {
    !b
}

pub(crate) fn current_version() -> i64 {
    CURRENT_PROPERTIES_VERSION
}

/// Collection length as a bean count field, capped at `i32::MAX`.
pub(crate) fn saturating_count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Macro: embeds a parent record and exposes it through Deref/DerefMut.
// ---------------------------------------------------------------------------
macro_rules! extends {
    ($child:ty => $parent:ty, $field:ident) => {
        impl std::ops::Deref for $child {
            type Target = $parent;

            fn deref(&self) -> &$parent {
                &self.$field
            }
        }

        impl std::ops::DerefMut for $child {
            fn deref_mut(&mut self) -> &mut $parent {
                &mut self.$field
            }
        }

        impl From<$parent> for $child {
            fn from(parent: $parent) -> Self {
                Self {
                    $field: parent,
                    ..Default::default()
                }
            }
        }
    };
}
pub(crate) use extends;

// ---------------------------------------------------------------------------
// Macro: implements `Bean` with the class name taken from the type or given.
// ---------------------------------------------------------------------------
macro_rules! impl_bean {
    (@class $ty:ident) => { stringify!($ty) };
    (@class $ty:ident, $class:literal) => { $class };
    ($( $ty:ident $(=> $class:literal)? ),+ $(,)?) => {
        $(
            impl $crate::bean::Bean for $ty {
                const CLASS_NAME: &'static str = impl_bean!(@class $ty $(, $class)?);

                fn header_version(&self) -> i64 {
                    self.header_version
                }
            }

            impl Eq for $ty {}

            impl std::hash::Hash for $ty {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    std::hash::Hash::hash(&$crate::fingerprint::fingerprint(self), state);
                }
            }

            // The derived body (`remote = "Self"`) holds the fields; the
            // trait impl writes `class` ahead of them. Parents are flattened
            // through their body, so only the outermost bean is tagged.
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    #[derive(serde::Serialize)]
                    struct Tagged<'a> {
                        class: &'static str,
                        #[serde(flatten, serialize_with = "body")]
                        inner: &'a $ty,
                    }

                    fn body<S: serde::Serializer>(bean: &&$ty, serializer: S) -> Result<S::Ok, S::Error> {
                        $ty::serialize(*bean, serializer)
                    }

                    serde::Serialize::serialize(
                        &Tagged {
                            class: <$ty as $crate::bean::Bean>::CLASS_NAME,
                            inner: self,
                        },
                        serializer,
                    )
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    $ty::deserialize(deserializer)
                }
            }
        )+
    };
}
pub(crate) use impl_bean;

// ---------------------------------------------------------------------------
// Macro: a closed, `class`-tagged family of beans.
//
// Known class names select their variant; a missing or unrecognised class
// decodes as the fallback variant. Delegates are nested families whose class
// names are also accepted.
// ---------------------------------------------------------------------------
macro_rules! polymorphic {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident,
        variants: [
            $( $variant:ident($ty:ty) ),+ $(,)?
        ]
        $(, delegates: [
            $( $dvariant:ident($dty:ident) ),+ $(,)?
        ])?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $( $variant($ty), )+
            $( $( $dvariant($dty), )+ )?
        }

        impl $name {
            /// Returns the class name written to the discriminator.
            pub fn class_name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => <$ty as $crate::bean::Bean>::CLASS_NAME, )+
                    $( $( Self::$dvariant(inner) => inner.class_name(), )+ )?
                }
            }

            /// Returns `true` if `class` names a member of this family.
            pub fn handles(class: &str) -> bool {
                $( class == <$ty as $crate::bean::Bean>::CLASS_NAME || )+
                $( $( $dty::handles(class) || )+ )?
                false
            }

            /// Header version of the wrapped bean.
            pub fn header_version(&self) -> i64 {
                match self {
                    $( Self::$variant(inner) => $crate::bean::Bean::header_version(inner), )+
                    $( $( Self::$dvariant(inner) => inner.header_version(), )+ )?
                }
            }

            /// Fingerprint of the wrapped bean, including its class.
            pub fn fingerprint(&self) -> String {
                $crate::fingerprint::fingerprint(self)
            }

            pub(crate) fn from_value(
                class: Option<&str>,
                value: serde_json::Value,
            ) -> Result<Self, serde_json::Error> {
                let class_name = class.unwrap_or_default();
                $(
                    if class_name == <$ty as $crate::bean::Bean>::CLASS_NAME {
                        return serde_json::from_value(value).map(Self::$variant);
                    }
                )+
                $( $(
                    if $dty::handles(class_name) {
                        return $dty::from_value(class, value).map(Self::$dvariant);
                    }
                )+ )?
                match class {
                    Some(unknown) => tracing::debug!(
                        class = unknown,
                        family = stringify!($name),
                        "unrecognised class, decoding as {}",
                        stringify!($fallback)
                    ),
                    None => tracing::debug!(
                        family = stringify!($name),
                        "no class discriminator, decoding as {}",
                        stringify!($fallback)
                    ),
                }
                serde_json::from_value(value).map(Self::$fallback)
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&self.fingerprint(), state);
            }
        }

        impl $crate::validation::Validate for $name {
            fn validate(&self) -> Result<(), $crate::validation::ValidationError> {
                match self {
                    $( Self::$variant(inner) => $crate::validation::Validate::validate(inner), )+
                    $( $( Self::$dvariant(inner) => $crate::validation::Validate::validate(inner), )+ )?
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(bean: $ty) -> Self {
                    Self::$variant(bean)
                }
            }
        )+

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $( Self::$variant(inner) => serde::Serialize::serialize(inner, serializer), )+
                    $( $( Self::$dvariant(inner) => serde::Serialize::serialize(inner, serializer), )+ )?
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                let class = value
                    .get($crate::bean::CLASS_PROPERTY)
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned);
                Self::from_value(class.as_deref(), value).map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use polymorphic;
