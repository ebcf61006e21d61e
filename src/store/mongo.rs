use bson::doc;
use mongodb::Client;
use mongodb::options::{ClientOptions, Credential};
use std::future::Future;
use std::time::Duration;

use super::conn::Connector;
use crate::config::{ConnectionSettings, redact_uri};
use crate::errors::DbError;

/// Connects a `mongodb::Client` and verifies it with a `ping`.
#[derive(Debug, Clone)]
pub struct MongoConnector {
    settings: ConnectionSettings,
}

impl MongoConnector {
    #[must_use]
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    async fn client_options(&self) -> Result<ClientOptions, DbError> {
        let s = &self.settings;
        let mut opts = ClientOptions::parse(&s.uri).await?;
        let timeout = Duration::from_millis(s.connect_timeout_ms);
        opts.connect_timeout = Some(timeout);
        opts.server_selection_timeout = Some(timeout);
        if let Some(name) = &s.app_name {
            opts.app_name = Some(name.clone());
        }
        if s.username.is_some() || s.password.is_some() {
            let mut cred = Credential::default();
            cred.username = s.username.clone();
            cred.password = s.password.clone();
            opts.credential = Some(cred);
        }
        Ok(opts)
    }
}

impl Connector for MongoConnector {
    type Handle = Client;

    fn connect(&self) -> impl Future<Output = Result<Client, DbError>> + Send {
        async move {
            log::info!("connecting to {}", redact_uri(&self.settings.uri));
            let client = Client::with_options(self.client_options().await?)?;
            client.database("admin").run_command(doc! {"ping": 1}).await?;
            Ok(client)
        }
    }
}
