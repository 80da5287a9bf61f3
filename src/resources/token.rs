use uuid::Uuid;

use crate::common::{MalformedIdentifierSnafu, Result, ValidationSnafu, MAX_NAME_LEN};
use crate::desec::api::TokenApi;
use crate::desec::models::{Token, TokenPatch};

use super::{absent_if_not_found, gone_if_not_found, Resource};

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TokenSpec {
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
}

impl TokenSpec {
    pub fn validate(&self) -> Result<()> {
        if self.name.len() > MAX_NAME_LEN {
            return ValidationSnafu {
                field: "name",
                message: format!("must be at most {MAX_NAME_LEN} characters"),
            }
            .fail();
        }
        Ok(())
    }

    fn patch(&self) -> TokenPatch {
        TokenPatch {
            name: self.name.clone(),
            perm_create_domain: self.perm_create_domain,
            perm_delete_domain: self.perm_delete_domain,
            perm_manage_tokens: self.perm_manage_tokens,
            auto_policy: self.auto_policy,
            allowed_subnets: self.allowed_subnets.clone(),
        }
    }
}

fn parse_token_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| {
        MalformedIdentifierSnafu {
            id,
            expected: "token uuid",
        }
        .build()
    })
}

pub struct TokenResource<'a, C> {
    client: &'a C,
}

impl<'a, C> TokenResource<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

impl<C: TokenApi> Resource for TokenResource<'_, C> {
    type Desired = TokenSpec;
    type Observed = Token;

    const KIND: &'static str = "token";

    /// Creates the token by name, then applies the remaining fields. The
    /// secret is only present in the creation response and is carried over.
    fn create(&self, desired: &TokenSpec) -> Result<Token> {
        desired.validate()?;

        tracing::info!(resource = Self::KIND, name = desired.name, "Creating token");
        let created = self.client.create_token(&desired.name)?;
        let mut token = self
            .client
            .update_token(&created.id, &desired.patch())
            .inspect_err(|err| {
                tracing::warn!(
                    resource = Self::KIND,
                    id = created.id.to_string(),
                    error = err.to_string(),
                    "Token was created but its permissions could not be set"
                )
            })?;
        token.value = created.value;
        Ok(token)
    }

    fn read(&self, id: &str) -> Result<Option<Token>> {
        let id = parse_token_id(id)?;
        absent_if_not_found(self.client.get_token(&id))
    }

    fn update(&self, id: &str, desired: &TokenSpec) -> Result<Option<Token>> {
        let id = parse_token_id(id)?;
        desired.validate()?;

        tracing::info!(resource = Self::KIND, id = id.to_string(), "Updating token");
        absent_if_not_found(self.client.update_token(&id, &desired.patch()))
    }

    fn delete(&self, id: &str) -> Result<()> {
        let id = parse_token_id(id)?;

        tracing::info!(resource = Self::KIND, id = id.to_string(), "Deleting token");
        gone_if_not_found(self.client.delete_token(&id))
    }
}
