use std::collections::HashSet;

use crate::common::{diff_records, DiffResult, Error, Result, ValidationSnafu};
use crate::desec::api::RRSetApi;
use crate::resources::{RRSetResource, RRSetSpec, Resource};
use crate::session::Session;

/// Brings the remote record sets in line with a list of desired ones.
/// Record sets that are not listed are left alone.
pub struct DesecSync<'a, C> {
    session: &'a Session<C>,
}

impl<'a, C: RRSetApi> DesecSync<'a, C> {
    pub fn new(session: &'a Session<C>) -> Self {
        Self { session }
    }

    fn rrsets(&self) -> RRSetResource<'a, C> {
        self.session.rrsets()
    }

    /// Reads go through the cache, so each domain is listed once however
    /// many of its record sets are desired.
    pub fn plan(&self, desired: Vec<RRSetSpec>) -> Result<DiffResult<RRSetSpec>> {
        let mut seen = HashSet::with_capacity(desired.len());
        for rrset in desired.iter() {
            rrset.validate()?;
            if !seen.insert(rrset.id()) {
                return ValidationSnafu {
                    field: "id",
                    message: format!("{} is listed more than once", rrset.id()),
                }
                .fail();
            }
        }

        let rrsets = self.rrsets();
        diff_records::<_, _, Error>(desired, |rrset| {
            Ok(rrsets
                .read(&rrset.id())?
                .map(|current| (current.ttl, current.records)))
        })
    }

    pub fn sync(&self, desired: Vec<RRSetSpec>, dry_run: bool) -> Result<DiffResult<RRSetSpec>> {
        let diff = self.plan(desired)?;

        if diff.is_empty() {
            tracing::info!("No changes detected");
            return Ok(diff);
        }

        if dry_run {
            tracing::info!(
                create = diff.create.len(),
                update = diff.update.len(),
                unchanged = diff.unchanged.len(),
                "Dry run completed",
            );
            return Ok(diff);
        }

        tracing::info!(
            create = diff.create.len(),
            update = diff.update.len(),
            unchanged = diff.unchanged.len(),
            "Applying changes",
        );

        let rrsets = self.rrsets();
        for rrset in diff.update.iter() {
            if rrsets.update(&rrset.id(), rrset)?.is_none() {
                tracing::warn!(
                    id = rrset.id(),
                    "Record set disappeared before it could be updated, recreating"
                );
                rrsets.create(rrset)?;
            }
        }
        for rrset in diff.create.iter() {
            rrsets.create(rrset)?;
        }

        Ok(diff)
    }
}
