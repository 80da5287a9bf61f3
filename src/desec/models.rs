use uuid::Uuid;

use crate::common::identity::{self, RRSetKey};

/// A record set as reported by the API. `kind` stays a plain string so that
/// listing a domain never fails on a type we do not manage.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RRSet {
    pub domain: String,
    pub subname: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ttl: u32,
    pub records: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl RRSet {
    pub fn key(&self) -> RRSetKey {
        RRSetKey::new(&self.domain, &self.subname, &self.kind)
    }

    pub fn id(&self) -> String {
        identity::encode(&self.domain, &self.subname, &self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NewRRSet {
    #[serde(skip)]
    pub domain: String,
    pub subname: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ttl: u32,
    pub records: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RRSetPatch {
    pub ttl: u32,
    pub records: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Domain {
    pub name: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub minimum_ttl: Option<u32>,
    #[serde(default)]
    pub keys: Vec<DomainKey>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DomainKey {
    pub dnskey: String,
    #[serde(default)]
    pub ds: Vec<String>,
    pub flags: u16,
    pub keytype: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Token {
    pub id: Uuid,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub perm_create_domain: bool,
    #[serde(default)]
    pub perm_delete_domain: bool,
    #[serde(default)]
    pub perm_manage_tokens: bool,
    #[serde(default)]
    pub auto_policy: bool,
    #[serde(default)]
    pub allowed_subnets: Vec<cidr::IpCidr>,
    /// The secret. Only returned by the create call.
    #[serde(default, rename = "token", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TokenPatch {
    pub name: String,
    pub perm_create_domain: bool,
    pub perm_delete_domain: bool,
    pub perm_manage_tokens: bool,
    pub auto_policy: bool,
    pub allowed_subnets: Vec<cidr::IpCidr>,
}

/// `None` scope fields select the default policy and travel as `null`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TokenPolicy {
    #[serde(default, skip_serializing)]
    pub id: Option<Uuid>,
    pub domain: Option<String>,
    pub subname: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub perm_write: bool,
}
