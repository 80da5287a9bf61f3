//! Reconcilers, one per remote object kind.
//!
//! Each follows the same life cycle: `create` yields observed state with an
//! id, `read` and `update` yield `None` once the remote object is gone, and
//! `delete` succeeds whether or not the object still exists.

mod domain;
mod rrset;
mod token;
mod token_policy;

pub use domain::*;
pub use rrset::*;
pub use token::*;
pub use token_policy::*;

use crate::common::Result;

pub trait Resource {
    /// Desired state, validated before any remote call.
    type Desired;
    /// Observed state, carrying the id the object is addressed by.
    type Observed;

    const KIND: &'static str;

    fn create(&self, desired: &Self::Desired) -> Result<Self::Observed>;
    fn read(&self, id: &str) -> Result<Option<Self::Observed>>;
    fn update(&self, id: &str, desired: &Self::Desired) -> Result<Option<Self::Observed>>;
    fn delete(&self, id: &str) -> Result<()>;

    /// Binds to an existing remote object by id.
    fn import(&self, id: &str) -> Result<Option<Self::Observed>> {
        self.read(id)
    }
}

/// Maps a not-found outcome to `None`.
pub(crate) fn absent_if_not_found<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Deletes are idempotent: an object that is already gone is a success.
pub(crate) fn gone_if_not_found(result: Result<()>) -> Result<()> {
    match result {
        Err(err) if !err.is_not_found() => Err(err),
        _ => Ok(()),
    }
}
