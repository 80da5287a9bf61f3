//! In-memory stand-in for the deSEC API that records every call.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use desec_sync::common::identity::RRSetKey;
use desec_sync::common::{Error, NotFoundSnafu, ResponseSnafu, Result};
use desec_sync::desec::api::{DomainApi, RRSetApi, TokenApi, TokenPolicyApi};
use desec_sync::desec::models::{
    Domain, NewRRSet, RRSet, RRSetPatch, Token, TokenPatch, TokenPolicy,
};

pub const CREATED: &str = "2024-05-01T12:00:00.000000Z";

#[derive(Default)]
pub struct State {
    pub domains: BTreeMap<String, Domain>,
    /// Keyed by resource id.
    pub rrsets: BTreeMap<String, RRSet>,
    pub tokens: HashMap<Uuid, Token>,
    pub policies: HashMap<(Uuid, Uuid), TokenPolicy>,
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeDesec {
    state: Mutex<State>,
}

fn not_found(url: String) -> Error {
    NotFoundSnafu { url }.build()
}

fn fqdn(domain: &str, subname: &str) -> String {
    match subname {
        "" => format!("{domain}."),
        s => format!("{s}.{domain}."),
    }
}

impl FakeDesec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(self, name: &str) -> Self {
        self.state().domains.insert(
            name.to_string(),
            Domain {
                name: name.to_string(),
                created: Some(CREATED.into()),
                published: None,
                minimum_ttl: Some(3600),
                keys: vec![],
            },
        );
        self
    }

    pub fn with_rrset(self, domain: &str, subname: &str, kind: &str, records: &[&str]) -> Self {
        let rrset = RRSet {
            domain: domain.into(),
            subname: subname.into(),
            kind: kind.into(),
            ttl: 3600,
            records: records.iter().map(|r| r.to_string()).collect(),
            created: Some(CREATED.into()),
            name: fqdn(domain, subname),
        };
        self.state().rrsets.insert(rrset.id(), rrset);
        self
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Number of recorded calls starting with `prefix`, e.g. `"list example.com"`.
    pub fn calls(&self, prefix: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) -> MutexGuard<'_, State> {
        let mut state = self.state();
        state.calls.push(call);
        state
    }
}

impl RRSetApi for FakeDesec {
    fn create_rrset(&self, rrset: &NewRRSet) -> Result<RRSet> {
        let mut state = self.record(format!(
            "create {}/{}/{}",
            rrset.domain, rrset.subname, rrset.kind
        ));
        if !state.domains.contains_key(&rrset.domain) {
            return Err(not_found(format!("domains/{}/rrsets/", rrset.domain)));
        }
        let created = RRSet {
            domain: rrset.domain.clone(),
            subname: rrset.subname.clone(),
            kind: rrset.kind.clone(),
            ttl: rrset.ttl,
            records: rrset.records.clone(),
            created: Some(CREATED.into()),
            name: fqdn(&rrset.domain, &rrset.subname),
        };
        if state.rrsets.contains_key(&created.id()) {
            return ResponseSnafu {
                message: format!("POST returned 400: {} already exists", created.id()),
            }
            .fail();
        }
        state.rrsets.insert(created.id(), created.clone());
        Ok(created)
    }

    fn get_rrset(&self, key: &RRSetKey) -> Result<RRSet> {
        let state = self.record(format!("get {}", key.to_id()));
        state
            .rrsets
            .get(&key.to_id())
            .cloned()
            .ok_or_else(|| not_found(key.to_id()))
    }

    fn list_rrsets(&self, domain: &str) -> Result<Vec<RRSet>> {
        let state = self.record(format!("list {domain}"));
        if !state.domains.contains_key(domain) {
            return Err(not_found(format!("domains/{domain}/rrsets/")));
        }
        Ok(state
            .rrsets
            .values()
            .filter(|rrset| rrset.domain == domain)
            .cloned()
            .collect())
    }

    fn update_rrset(&self, key: &RRSetKey, patch: &RRSetPatch) -> Result<RRSet> {
        let mut state = self.record(format!("update {}", key.to_id()));
        let rrset = state
            .rrsets
            .get_mut(&key.to_id())
            .ok_or_else(|| not_found(key.to_id()))?;
        rrset.ttl = patch.ttl;
        rrset.records = patch.records.clone();
        Ok(rrset.clone())
    }

    fn delete_rrset(&self, key: &RRSetKey) -> Result<()> {
        let mut state = self.record(format!("delete {}", key.to_id()));
        state
            .rrsets
            .remove(&key.to_id())
            .map(|_| ())
            .ok_or_else(|| not_found(key.to_id()))
    }
}

impl DomainApi for FakeDesec {
    fn create_domain(&self, name: &str) -> Result<Domain> {
        let mut state = self.record(format!("create domain {name}"));
        let domain = Domain {
            name: name.to_string(),
            created: Some(CREATED.into()),
            published: None,
            minimum_ttl: Some(3600),
            keys: vec![],
        };
        state.domains.insert(name.to_string(), domain.clone());
        Ok(domain)
    }

    fn get_domain(&self, name: &str) -> Result<Domain> {
        let state = self.record(format!("get domain {name}"));
        state
            .domains
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(format!("domains/{name}/")))
    }

    fn delete_domain(&self, name: &str) -> Result<()> {
        let mut state = self.record(format!("delete domain {name}"));
        state
            .domains
            .remove(name)
            .ok_or_else(|| not_found(format!("domains/{name}/")))?;
        state.rrsets.retain(|_, rrset| rrset.domain != name);
        Ok(())
    }
}

impl TokenApi for FakeDesec {
    fn create_token(&self, name: &str) -> Result<Token> {
        let mut state = self.record(format!("create token {name}"));
        let token = Token {
            id: Uuid::new_v4(),
            created: Some(CREATED.into()),
            owner: "owner@example.com".into(),
            name: name.to_string(),
            perm_create_domain: false,
            perm_delete_domain: false,
            perm_manage_tokens: false,
            auto_policy: false,
            allowed_subnets: vec!["0.0.0.0/0".parse().unwrap(), "::/0".parse().unwrap()],
            value: None,
        };
        state.tokens.insert(token.id, token.clone());
        Ok(Token {
            value: Some("4pnk7u-NHvrEkFzrhFDRTjGFyX_S".into()),
            ..token
        })
    }

    fn get_token(&self, id: &Uuid) -> Result<Token> {
        let state = self.record(format!("get token {id}"));
        state
            .tokens
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(format!("auth/tokens/{id}/")))
    }

    fn update_token(&self, id: &Uuid, patch: &TokenPatch) -> Result<Token> {
        let mut state = self.record(format!("update token {id}"));
        let token = state
            .tokens
            .get_mut(id)
            .ok_or_else(|| not_found(format!("auth/tokens/{id}/")))?;
        token.name = patch.name.clone();
        token.perm_create_domain = patch.perm_create_domain;
        token.perm_delete_domain = patch.perm_delete_domain;
        token.perm_manage_tokens = patch.perm_manage_tokens;
        token.auto_policy = patch.auto_policy;
        token.allowed_subnets = patch.allowed_subnets.clone();
        Ok(token.clone())
    }

    fn delete_token(&self, id: &Uuid) -> Result<()> {
        let mut state = self.record(format!("delete token {id}"));
        state
            .tokens
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(format!("auth/tokens/{id}/")))
    }
}

impl TokenPolicyApi for FakeDesec {
    fn create_policy(&self, token_id: &Uuid, policy: &TokenPolicy) -> Result<TokenPolicy> {
        let mut state = self.record(format!("create policy {token_id}"));
        if !state.tokens.contains_key(token_id) {
            return Err(not_found(format!("auth/tokens/{token_id}/")));
        }
        let created = TokenPolicy {
            id: Some(Uuid::new_v4()),
            ..policy.clone()
        };
        state
            .policies
            .insert((*token_id, created.id.unwrap()), created.clone());
        Ok(created)
    }

    fn get_policy(&self, token_id: &Uuid, policy_id: &Uuid) -> Result<TokenPolicy> {
        let state = self.record(format!("get policy {token_id}/{policy_id}"));
        state
            .policies
            .get(&(*token_id, *policy_id))
            .cloned()
            .ok_or_else(|| not_found(format!("policies/rrsets/{policy_id}/")))
    }

    fn update_policy(
        &self,
        token_id: &Uuid,
        policy_id: &Uuid,
        policy: &TokenPolicy,
    ) -> Result<TokenPolicy> {
        let mut state = self.record(format!("update policy {token_id}/{policy_id}"));
        let existing = state
            .policies
            .get_mut(&(*token_id, *policy_id))
            .ok_or_else(|| not_found(format!("policies/rrsets/{policy_id}/")))?;
        *existing = TokenPolicy {
            id: Some(*policy_id),
            ..policy.clone()
        };
        Ok(existing.clone())
    }

    fn delete_policy(&self, token_id: &Uuid, policy_id: &Uuid) -> Result<()> {
        let mut state = self.record(format!("delete policy {token_id}/{policy_id}"));
        state
            .policies
            .remove(&(*token_id, *policy_id))
            .map(|_| ())
            .ok_or_else(|| not_found(format!("policies/rrsets/{policy_id}/")))
    }
}
