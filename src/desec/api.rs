//! Remote operations the reconcilers depend on. Implemented over HTTP by
//! [`super::DesecClient`]; a not-found outcome is always
//! [`crate::common::Error::NotFound`].

use uuid::Uuid;

use crate::common::identity::RRSetKey;
use crate::common::Result;

use super::models::{Domain, NewRRSet, RRSet, RRSetPatch, Token, TokenPatch, TokenPolicy};

pub trait RRSetApi {
    fn create_rrset(&self, rrset: &NewRRSet) -> Result<RRSet>;
    fn get_rrset(&self, key: &RRSetKey) -> Result<RRSet>;
    fn list_rrsets(&self, domain: &str) -> Result<Vec<RRSet>>;
    fn update_rrset(&self, key: &RRSetKey, patch: &RRSetPatch) -> Result<RRSet>;
    /// Not-found is an acceptable outcome for callers.
    fn delete_rrset(&self, key: &RRSetKey) -> Result<()>;
}

pub trait DomainApi {
    fn create_domain(&self, name: &str) -> Result<Domain>;
    fn get_domain(&self, name: &str) -> Result<Domain>;
    fn delete_domain(&self, name: &str) -> Result<()>;
}

pub trait TokenApi {
    fn create_token(&self, name: &str) -> Result<Token>;
    fn get_token(&self, id: &Uuid) -> Result<Token>;
    fn update_token(&self, id: &Uuid, patch: &TokenPatch) -> Result<Token>;
    fn delete_token(&self, id: &Uuid) -> Result<()>;
}

pub trait TokenPolicyApi {
    fn create_policy(&self, token_id: &Uuid, policy: &TokenPolicy) -> Result<TokenPolicy>;
    fn get_policy(&self, token_id: &Uuid, policy_id: &Uuid) -> Result<TokenPolicy>;
    fn update_policy(
        &self,
        token_id: &Uuid,
        policy_id: &Uuid,
        policy: &TokenPolicy,
    ) -> Result<TokenPolicy>;
    fn delete_policy(&self, token_id: &Uuid, policy_id: &Uuid) -> Result<()>;
}
