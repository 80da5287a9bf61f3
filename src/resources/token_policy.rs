use uuid::Uuid;

use crate::common::identity::{decode_policy, encode_policy, ID_SEPARATOR};
use crate::common::{RecordType, ResponseSnafu, Result, ValidationSnafu, MAX_NAME_LEN};
use crate::desec::api::TokenPolicyApi;
use crate::desec::models::TokenPolicy;

use super::{absent_if_not_found, gone_if_not_found, Resource};

/// `None` scope fields make this the token's default policy. An empty
/// string counts as `None`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TokenPolicySpec {
    pub token_id: Uuid,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub subname: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<RecordType>,
    pub perm_write: bool,
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

impl TokenPolicySpec {
    pub fn validate(&self) -> Result<()> {
        if let Some(domain) = non_empty(&self.domain) {
            if domain.contains(ID_SEPARATOR) {
                return ValidationSnafu {
                    field: "domain",
                    message: format!("{domain:?} is not a domain name"),
                }
                .fail();
            }
        }
        if let Some(subname) = non_empty(&self.subname) {
            if subname.len() > MAX_NAME_LEN {
                return ValidationSnafu {
                    field: "subname",
                    message: format!("must be at most {MAX_NAME_LEN} characters"),
                }
                .fail();
            }
        }
        Ok(())
    }

    fn body(&self) -> TokenPolicy {
        TokenPolicy {
            id: None,
            domain: non_empty(&self.domain),
            subname: non_empty(&self.subname),
            kind: self.kind.map(|kind| kind.to_string()),
            perm_write: self.perm_write,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TokenPolicyState {
    /// `token_id/policy_id`
    pub id: String,
    pub token_id: Uuid,
    pub policy_id: Uuid,
    pub domain: Option<String>,
    pub subname: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub perm_write: bool,
}

impl TokenPolicyState {
    fn new(token_id: Uuid, policy: TokenPolicy) -> Result<Self> {
        let policy_id = policy.id.ok_or_else(|| {
            ResponseSnafu {
                message: format!("policy of token {token_id} was returned without an id"),
            }
            .build()
        })?;
        Ok(Self {
            id: encode_policy(&token_id, &policy_id),
            token_id,
            policy_id,
            domain: policy.domain,
            subname: policy.subname,
            kind: policy.kind,
            perm_write: policy.perm_write,
        })
    }
}

/// Policies are only unique per token, so they are addressed by
/// `token_id/policy_id`.
pub struct TokenPolicyResource<'a, C> {
    client: &'a C,
}

impl<'a, C> TokenPolicyResource<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

impl<C: TokenPolicyApi> Resource for TokenPolicyResource<'_, C> {
    type Desired = TokenPolicySpec;
    type Observed = TokenPolicyState;

    const KIND: &'static str = "token_policy";

    fn create(&self, desired: &TokenPolicySpec) -> Result<TokenPolicyState> {
        desired.validate()?;
        tracing::info!(
            resource = Self::KIND,
            token_id = desired.token_id.to_string(),
            "Creating token policy"
        );
        let policy = self.client.create_policy(&desired.token_id, &desired.body())?;
        TokenPolicyState::new(desired.token_id, policy)
    }

    fn read(&self, id: &str) -> Result<Option<TokenPolicyState>> {
        let (token_id, policy_id) = decode_policy(id)?;
        absent_if_not_found(self.client.get_policy(&token_id, &policy_id))?
            .map(|policy| TokenPolicyState::new(token_id, policy))
            .transpose()
    }

    /// The token is taken from the id; a policy cannot move between tokens.
    fn update(&self, id: &str, desired: &TokenPolicySpec) -> Result<Option<TokenPolicyState>> {
        let (token_id, policy_id) = decode_policy(id)?;
        desired.validate()?;

        tracing::info!(resource = Self::KIND, id, "Updating token policy");
        absent_if_not_found(
            self.client
                .update_policy(&token_id, &policy_id, &desired.body()),
        )?
        .map(|policy| TokenPolicyState::new(token_id, policy))
        .transpose()
    }

    fn delete(&self, id: &str) -> Result<()> {
        let (token_id, policy_id) = decode_policy(id)?;

        tracing::info!(resource = Self::KIND, id, "Deleting token policy");
        gone_if_not_found(self.client.delete_policy(&token_id, &policy_id))
    }
}
