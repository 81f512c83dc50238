//! Record contract
//!
//! What a value must provide to be kept in a store.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A storable value identified by a unique key
///
/// The store only ever calls [`Record::key`] and [`Record::duplicate`]; serde
/// is needed by the snapshot codec.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use snapstore::Record;
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct User {
///     name: String,
///     groups: Vec<String>,
/// }
///
/// impl Record for User {
///     type Key = String;
///
///     fn key(&self) -> &String {
///         &self.name
///     }
///
///     fn duplicate(&self) -> Self {
///         User {
///             name: self.name.clone(),
///             groups: self.groups.clone(),
///         }
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned {
    /// Identity type, compared by equality
    type Key: PartialEq + Debug;

    /// The record's identity. Must not change while the record is stored.
    fn key(&self) -> &Self::Key;

    /// An equal value sharing no mutable state with `self`
    fn duplicate(&self) -> Self;
}
