use uuid::Uuid;

use super::{MalformedIdentifierSnafu, Result};

/// Stands in for the empty (apex) subname so that ids always have three
/// non-empty-looking parts.
pub const APEX_SUBNAME: &str = "@";
pub const ID_SEPARATOR: char = '/';

const RRSET_ID_FORMAT: &str = "domain/subname/type";
const POLICY_ID_FORMAT: &str = "token_id/policy_id";

/// Identity of a record set. Immutable for the lifetime of the remote object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RRSetKey {
    pub domain: String,
    pub subname: String,
    pub kind: String,
}

impl RRSetKey {
    pub fn new(domain: impl Into<String>, subname: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subname: subname.into(),
            kind: kind.into(),
        }
    }

    pub fn to_id(&self) -> String {
        encode(&self.domain, &self.subname, &self.kind)
    }
}

pub fn encode(domain: &str, subname: &str, kind: &str) -> String {
    let subname = match subname {
        "" => APEX_SUBNAME,
        s => s,
    };
    format!("{domain}{ID_SEPARATOR}{subname}{ID_SEPARATOR}{kind}")
}

/// Splits with a limit of three, so any separator after the second one
/// stays inside the type part.
pub fn decode(id: &str) -> Result<RRSetKey> {
    let mut parts = id.splitn(3, ID_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(domain), Some(subname), Some(kind)) => Ok(RRSetKey {
            domain: domain.to_string(),
            subname: match subname {
                APEX_SUBNAME => String::new(),
                s => s.to_string(),
            },
            kind: kind.to_string(),
        }),
        _ => MalformedIdentifierSnafu {
            id,
            expected: RRSET_ID_FORMAT,
        }
        .fail(),
    }
}

pub fn encode_policy(token_id: &Uuid, policy_id: &Uuid) -> String {
    format!("{token_id}{ID_SEPARATOR}{policy_id}")
}

pub fn decode_policy(id: &str) -> Result<(Uuid, Uuid)> {
    let malformed = || {
        MalformedIdentifierSnafu {
            id,
            expected: POLICY_ID_FORMAT,
        }
        .build()
    };

    let (token_id, policy_id) = id.split_once(ID_SEPARATOR).ok_or_else(malformed)?;
    let token_id = Uuid::parse_str(token_id).map_err(|_| malformed())?;
    let policy_id = Uuid::parse_str(policy_id).map_err(|_| malformed())?;
    Ok((token_id, policy_id))
}
