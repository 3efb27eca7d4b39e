//! Session handling and registration submission against the RegObs v5 API.

use crate::{
    config::ClientConfig,
    error::{RegObsError, Result},
    registration::SnowRegistration,
    tid::tid_enum,
};
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info};
use serde::Deserialize;
use serde_json::{json, Value};
use std::future::Future;

/// Seconds a bearer token is valid after it was issued.
pub const EXPIRES_IN: i64 = 3600;

/// Renew the token when it expires within this many seconds.
pub const RENEW_MARGIN: i64 = 60;

/// Header carrying the application token on every request.
pub const APP_TOKEN_HEADER: &str = "regObs_apptoken";

tid_enum! {
    /// Language a stored registration is rendered in.
    Language {
        Norwegian = 1,
        English = 2,
    }
}

/// Status and body of an API response.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub type Headers = [(&'static str, String)];

/// Moves JSON requests to the API and back.
pub trait Transport {
    fn get(&self, url: &str, headers: &Headers) -> impl Future<Output = Result<ApiResponse>>;

    fn post_json(
        &self,
        url: &str,
        headers: &Headers,
        body: &Value,
    ) -> impl Future<Output = Result<ApiResponse>>;
}

#[derive(Deserialize)]
struct MyPage {
    #[serde(rename = "Guid")]
    guid: String,
}

#[derive(Deserialize)]
struct Created {
    #[serde(rename = "RegId")]
    reg_id: i64,
}

#[derive(Clone)]
struct Session {
    token: String,
    expires: DateTime<Utc>,
    guid: String,
}

/// An authenticated connection to RegObs.
///
/// Holds one bearer token at a time. [`Connection::submit`] renews the token
/// when it is about to expire, at most once per call.
pub struct Connection<T: Transport> {
    config: ClientConfig,
    transport: T,
    session: Option<Session>,
}

impl<T: Transport> std::fmt::Debug for Connection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("config", &self.config)
            .field("expires", &self.expires())
            .field("account", &self.account_guid())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Connection<T> {
    /// A connection that authenticates on first submit.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            session: None,
        }
    }

    /// Create a connection and authenticate right away.
    pub async fn connect(config: ClientConfig, transport: T) -> Result<Self> {
        let mut connection = Self::new(config, transport);
        connection.authenticate().await?;
        Ok(connection)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.session.as_ref().map(|s| s.expires)
    }

    pub fn account_guid(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.guid.as_str())
    }

    /// True if there is no token or it expires within [`RENEW_MARGIN`] of `now`.
    pub fn needs_authentication(&self, now: DateTime<Utc>) -> bool {
        match &self.session {
            None => true,
            Some(session) => session.expires < now + TimeDelta::seconds(RENEW_MARGIN),
        }
    }

    /// Exchange username and password for a bearer token, then look up the
    /// account GUID. The previous session is kept if either step fails.
    pub async fn authenticate(&mut self) -> Result<&mut Self> {
        let app_headers = [(APP_TOKEN_HEADER, self.config.app_token.clone())];
        let login = self
            .transport
            .post_json(
                &self.config.endpoint("Account/Token"),
                &app_headers,
                &json!({
                    "username": self.config.username,
                    "password": self.config.password,
                }),
            )
            .await?;
        if !login.is_success() {
            return Err(RegObsError::Auth {
                status: login.status,
                message: login.body,
            });
        }
        let token: String = serde_json::from_str(&login.body)?;
        let expires = Utc::now() + TimeDelta::seconds(EXPIRES_IN);

        let headers = auth_headers(&self.config.app_token, &token);
        let page = self
            .transport
            .get(&self.config.endpoint("Account/Mypage"), &headers)
            .await?;
        if !page.is_success() {
            return Err(RegObsError::Api {
                status: page.status,
                message: page.body,
            });
        }
        let page: MyPage = serde_json::from_str(&page.body)?;

        info!(
            "Authenticated as {} (account {}), token valid until {}",
            self.config.username, page.guid, expires
        );
        self.session = Some(Session {
            token,
            expires,
            guid: page.guid,
        });
        Ok(self)
    }

    /// Submit a registration and return it as stored by RegObs, rendered in
    /// `language`.
    ///
    /// Fails without any request if the registration has no observation.
    pub async fn submit(
        &mut self,
        registration: &SnowRegistration,
        language: Language,
    ) -> Result<Value> {
        if !registration.has_observation() {
            return Err(RegObsError::NoObservation(
                "no observation in registration".to_string(),
            ));
        }

        if self.needs_authentication(Utc::now()) {
            debug!("Token missing or about to expire, authenticating");
            self.authenticate().await?;
        }
        let headers = match &self.session {
            Some(session) => auth_headers(&self.config.app_token, &session.token),
            None => {
                return Err(RegObsError::Auth {
                    status: 0,
                    message: "no session after authentication".to_string(),
                })
            }
        };

        let payload = registration.payload()?;
        debug!("Registration payload: {}", payload);
        let created = self
            .transport
            .post_json(&self.config.endpoint("Registration"), &headers, &payload)
            .await?;
        if !created.is_success() {
            return Err(RegObsError::Api {
                status: created.status,
                message: created.body,
            });
        }
        let Created { reg_id } = serde_json::from_str(&created.body)?;
        info!("Created registration {}", reg_id);

        let path = format!("Registration/{}/{}", reg_id, language.tid());
        let stored = self
            .transport
            .get(&self.config.endpoint(&path), &headers)
            .await?;
        if !stored.is_success() {
            return Err(RegObsError::Api {
                status: stored.status,
                message: stored.body,
            });
        }
        Ok(serde_json::from_str(&stored.body)?)
    }
}

fn auth_headers(app_token: &str, token: &str) -> Vec<(&'static str, String)> {
    vec![
        (APP_TOKEN_HEADER, app_token.to_string()),
        ("Authorization", format!("Bearer {}", token)),
    ]
}
