//! Handler identifiers.
//!
//! A [`HandlerId`] names the request-handling unit an incident came from
//! (a controller, a route handler, a service). It is an opaque string key:
//! every way of spelling the same name normalizes to one value, so a unit
//! registered by type and looked up by its string name resolves to the same
//! scoped observers.

use std::{borrow::Borrow, borrow::Cow, fmt, ops::Deref, sync::Arc};

/// A type with a fixed, symbolic unit name.
///
/// Lets code refer to a handling unit by type instead of by string:
///
/// ```rust,ignore
/// struct UsersController;
///
/// impl UnitName for UsersController {
///     const NAME: &'static str = "UsersController";
/// }
///
/// assert_eq!(HandlerId::of::<UsersController>(), HandlerId::from("UsersController"));
/// ```
pub trait UnitName {
    /// The unit's name.
    const NAME: &'static str;
}

/// Opaque, cheaply cloneable key identifying a handling unit.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(Arc<str>);

impl HandlerId {
    /// Create a handler id from anything with a string form.
    pub fn new(name: impl Into<HandlerId>) -> Self {
        name.into()
    }

    /// The handler id of a type with a symbolic name.
    pub fn of<U: UnitName + ?Sized>() -> Self {
        Self(Arc::from(U::NAME))
    }

    /// The string form of this id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is the empty string.
    ///
    /// Dispatch treats an empty id the same as no id at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for HandlerId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HandlerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for HandlerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for HandlerId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&String> for HandlerId {
    fn from(name: &String) -> Self {
        Self(Arc::from(name.as_str()))
    }
}

impl From<Cow<'_, str>> for HandlerId {
    fn from(name: Cow<'_, str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }
}

impl From<Arc<str>> for HandlerId {
    fn from(name: Arc<str>) -> Self {
        Self(name)
    }
}

impl From<&HandlerId> for HandlerId {
    fn from(id: &HandlerId) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for HandlerId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for HandlerId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
