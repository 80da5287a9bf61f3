use crate::common::Result;
use crate::desec::DesecClient;
use crate::session::Session;

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub desec: crate::desec::Config,
}

impl Config {
    pub fn into_session(self) -> Result<Session<DesecClient>> {
        let client = DesecClient::try_from(self.desec)?;
        Ok(Session::new(client))
    }
}
