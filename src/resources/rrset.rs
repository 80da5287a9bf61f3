use crate::common::identity::{self, RRSetKey};
use crate::common::{
    encode_records, AsDesired, RecordType, Result, ValidationSnafu, MAX_NAME_LEN, MAX_TTL, MIN_TTL,
};
use crate::desec::api::RRSetApi;
use crate::desec::models::{NewRRSet, RRSet, RRSetPatch};
use crate::desec::RRSetCache;

use super::{absent_if_not_found, gone_if_not_found, Resource};

/// A record set as it should exist remotely.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RRSetSpec {
    pub domain: String,
    #[serde(default)]
    pub subname: String,
    #[serde(rename = "type")]
    pub kind: RecordType,
    pub ttl: u32,
    pub records: Vec<String>,
}

impl RRSetSpec {
    pub fn key(&self) -> RRSetKey {
        RRSetKey::new(&self.domain, &self.subname, self.kind.as_str())
    }

    pub fn id(&self) -> String {
        self.key().to_id()
    }

    pub fn validate(&self) -> Result<()> {
        if self.domain.is_empty() || self.domain.contains(identity::ID_SEPARATOR) {
            return ValidationSnafu {
                field: "domain",
                message: format!("{:?} is not a domain name", self.domain),
            }
            .fail();
        }
        if self.subname.len() > MAX_NAME_LEN || self.subname.contains(identity::ID_SEPARATOR) {
            return ValidationSnafu {
                field: "subname",
                message: format!(
                    "must be at most {MAX_NAME_LEN} characters without '{}'",
                    identity::ID_SEPARATOR
                ),
            }
            .fail();
        }
        if self.subname == identity::APEX_SUBNAME {
            return ValidationSnafu {
                field: "subname",
                message: format!(
                    "{:?} only names the apex inside ids, use \"\" instead",
                    identity::APEX_SUBNAME
                ),
            }
            .fail();
        }
        if !(MIN_TTL..=MAX_TTL).contains(&self.ttl) {
            return ValidationSnafu {
                field: "ttl",
                message: format!("{} is outside {MIN_TTL}..={MAX_TTL}", self.ttl),
            }
            .fail();
        }
        if self.records.is_empty() {
            return ValidationSnafu {
                field: "records",
                message: "at least one record is required",
            }
            .fail();
        }
        Ok(())
    }

    fn encoded_records(&self) -> Vec<String> {
        encode_records(self.kind, &self.records)
    }
}

impl AsDesired for RRSetSpec {
    fn ttl(&self) -> u32 {
        self.ttl
    }

    fn records(&self) -> &[String] {
        &self.records
    }
}

/// A record set as last seen remotely. `records` keep the server's order
/// and quoting.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RRSetState {
    pub id: String,
    pub domain: String,
    pub subname: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ttl: u32,
    pub records: Vec<String>,
    pub name: String,
    pub created: Option<String>,
}

impl From<RRSet> for RRSetState {
    fn from(value: RRSet) -> Self {
        Self {
            id: value.id(),
            domain: value.domain,
            subname: value.subname,
            kind: value.kind,
            ttl: value.ttl,
            records: value.records,
            name: value.name,
            created: value.created,
        }
    }
}

pub struct RRSetResource<'a, C> {
    client: &'a C,
    cache: &'a RRSetCache,
}

impl<'a, C> RRSetResource<'a, C> {
    pub fn new(client: &'a C, cache: &'a RRSetCache) -> Self {
        Self { client, cache }
    }
}

impl<C: RRSetApi> Resource for RRSetResource<'_, C> {
    type Desired = RRSetSpec;
    type Observed = RRSetState;

    const KIND: &'static str = "rrset";

    fn create(&self, desired: &RRSetSpec) -> Result<RRSetState> {
        desired.validate()?;
        self.cache.invalidate();

        tracing::info!(resource = Self::KIND, id = desired.id(), "Creating record set");
        let rrset = self.client.create_rrset(&NewRRSet {
            domain: desired.domain.clone(),
            subname: desired.subname.clone(),
            kind: desired.kind.to_string(),
            ttl: desired.ttl,
            records: desired.encoded_records(),
        })?;
        tracing::debug!(resource = Self::KIND, id = rrset.id(), "Created record set");

        Ok(rrset.into())
    }

    fn read(&self, id: &str) -> Result<Option<RRSetState>> {
        let rrset = self.cache.lookup(self.client, id)?;
        if rrset.is_none() {
            tracing::debug!(resource = Self::KIND, id, "Record set is absent");
        }
        Ok(rrset.map(Into::into))
    }

    fn update(&self, id: &str, desired: &RRSetSpec) -> Result<Option<RRSetState>> {
        self.cache.invalidate();
        let key = identity::decode(id)?;
        desired.validate()?;
        if desired.key() != key {
            return ValidationSnafu {
                field: "id",
                message: format!(
                    "{id} cannot change to {} in place, it has to be replaced",
                    desired.id()
                ),
            }
            .fail();
        }

        tracing::info!(resource = Self::KIND, id, "Updating record set");
        let patch = RRSetPatch {
            ttl: desired.ttl,
            records: desired.encoded_records(),
        };
        let rrset = absent_if_not_found(self.client.update_rrset(&key, &patch))?;
        if rrset.is_none() {
            tracing::warn!(resource = Self::KIND, id, "Record set was deleted remotely");
        }
        Ok(rrset.map(Into::into))
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.cache.invalidate();
        let key = identity::decode(id)?;

        tracing::info!(resource = Self::KIND, id, "Deleting record set");
        gone_if_not_found(self.client.delete_rrset(&key))
    }

    /// Fetches the single record set directly, without populating the cache
    /// for the whole domain.
    fn import(&self, id: &str) -> Result<Option<RRSetState>> {
        let key = identity::decode(id)?;
        let rrset = absent_if_not_found(self.client.get_rrset(&key))?;
        Ok(rrset.map(Into::into))
    }
}
