use crate::common::identity::ID_SEPARATOR;
use crate::common::{Result, ValidationSnafu};
use crate::desec::api::DomainApi;
use crate::desec::models::Domain;
use crate::desec::RRSetCache;

use super::{absent_if_not_found, gone_if_not_found, Resource};

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DomainSpec {
    pub name: String,
}

impl DomainSpec {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.name.contains(ID_SEPARATOR) {
            return ValidationSnafu {
                field: "name",
                message: format!("{:?} is not a domain name", self.name),
            }
            .fail();
        }
        Ok(())
    }
}

/// Domains are addressed by name. Creating or deleting one changes which
/// record sets exist, so both clear the record set cache.
pub struct DomainResource<'a, C> {
    client: &'a C,
    cache: &'a RRSetCache,
}

impl<'a, C> DomainResource<'a, C> {
    pub fn new(client: &'a C, cache: &'a RRSetCache) -> Self {
        Self { client, cache }
    }
}

impl<C: DomainApi> Resource for DomainResource<'_, C> {
    type Desired = DomainSpec;
    type Observed = Domain;

    const KIND: &'static str = "domain";

    fn create(&self, desired: &DomainSpec) -> Result<Domain> {
        desired.validate()?;
        self.cache.invalidate();

        tracing::info!(resource = Self::KIND, id = desired.name, "Creating domain");
        self.client.create_domain(&desired.name)
    }

    fn read(&self, id: &str) -> Result<Option<Domain>> {
        absent_if_not_found(self.client.get_domain(id))
    }

    /// A domain has nothing to change in place; this only refreshes it.
    fn update(&self, id: &str, desired: &DomainSpec) -> Result<Option<Domain>> {
        if desired.name != id {
            return ValidationSnafu {
                field: "name",
                message: format!("domain {id} cannot be renamed to {}", desired.name),
            }
            .fail();
        }
        self.read(id)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.cache.invalidate();

        tracing::info!(resource = Self::KIND, id, "Deleting domain");
        gone_if_not_found(self.client.delete_domain(id))
    }
}
