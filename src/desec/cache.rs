use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::common::{identity, Result};

use super::api::RRSetApi;
use super::models::RRSet;

/// Record sets of one domain, keyed by resource id.
type DomainRecords = HashMap<String, RRSet>;

/// Per-domain snapshot of record sets.
///
/// A domain is fetched in full on its first lookup and served from memory
/// afterwards. Any write anywhere must call [`RRSetCache::invalidate`], which
/// drops every domain at once. One lock covers lookups, fetches and
/// invalidation, so a lookup never sees a snapshot taken before the last
/// completed invalidation.
#[derive(Default)]
pub struct RRSetCache {
    data: Mutex<HashMap<String, DomainRecords>>,
}

impl RRSetCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DomainRecords>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `None` when either the record set or its whole domain is
    /// absent. A missing domain is not remembered; the next lookup fetches
    /// again.
    pub fn lookup<A: RRSetApi + ?Sized>(&self, api: &A, id: &str) -> Result<Option<RRSet>> {
        let key = identity::decode(id)?;
        let mut data = self.lock();

        let records = match data.entry(key.domain.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let rrsets = match api.list_rrsets(&key.domain) {
                    Ok(rrsets) => rrsets,
                    Err(err) if err.is_not_found() => {
                        tracing::debug!(domain = key.domain, "Domain does not exist");
                        return Ok(None);
                    }
                    Err(err) => return Err(err),
                };
                tracing::debug!(
                    domain = key.domain,
                    rrsets = rrsets.len(),
                    "Cached domain record sets"
                );
                entry.insert(rrsets.into_iter().map(|r| (r.id(), r)).collect())
            }
        };

        Ok(records.get(&key.to_id()).cloned())
    }

    /// Drops all domains. Idempotent.
    pub fn invalidate(&self) {
        self.lock().clear();
    }

    pub fn contains_domain(&self, domain: &str) -> bool {
        self.lock().contains_key(domain)
    }
}
