use crate::desec::RRSetCache;
use crate::resources::{DomainResource, RRSetResource, TokenPolicyResource, TokenResource};

/// One provider session: the API client and the record set cache every
/// reconciler shares.
pub struct Session<C> {
    client: C,
    cache: RRSetCache,
}

impl<C> Session<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            cache: RRSetCache::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn cache(&self) -> &RRSetCache {
        &self.cache
    }

    pub fn rrsets(&self) -> RRSetResource<'_, C> {
        RRSetResource::new(&self.client, &self.cache)
    }

    pub fn domains(&self) -> DomainResource<'_, C> {
        DomainResource::new(&self.client, &self.cache)
    }

    pub fn tokens(&self) -> TokenResource<'_, C> {
        TokenResource::new(&self.client)
    }

    pub fn token_policies(&self) -> TokenPolicyResource<'_, C> {
        TokenPolicyResource::new(&self.client)
    }
}
