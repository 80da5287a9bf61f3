use std::fmt;
use std::str::FromStr;

use super::{Error, ValidationSnafu};

pub const MIN_TTL: u32 = 60;
pub const MAX_TTL: u32 = 604800;
pub const MAX_NAME_LEN: usize = 178;

macro_rules! record_types {
    ($($kind:ident),+ $(,)?) => {
        /// Record types accepted in desired state.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum RecordType {
            $($kind),+
        }

        impl RecordType {
            pub const ALL: &'static [RecordType] = &[$(RecordType::$kind),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(RecordType::$kind => stringify!($kind)),+
                }
            }
        }

        impl FromStr for RecordType {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($kind) => Ok(RecordType::$kind),)+
                    other => ValidationSnafu {
                        field: "type",
                        message: format!("unsupported record type {other}"),
                    }
                    .fail(),
                }
            }
        }
    };
}

record_types!(
    A, AAAA, CAA, CERT, CNAME, DNSKEY, DS, LOC, MX, NAPTR, NS, PTR, SMIMEA, SPF, SRV, SSHFP,
    TLSA, TXT, URI,
);

impl RecordType {
    /// Types whose values are character-strings and travel quoted.
    pub fn is_text(&self) -> bool {
        matches!(self, RecordType::TXT | RecordType::SPF)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
