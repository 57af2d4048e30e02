use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::domain::{
    FollowLookupError, FollowRecord, FollowRelationshipService, Identity, TokenStore,
    UserLookupError, UserLookupService,
};

// Helix rejects malformed logins with a 400 carrying this message.
const INVALID_LOGIN_MARKER: &str = "invalid login";

#[derive(Debug, Clone)]
pub struct HelixConfig {
    pub base_url: String,
    pub client_id: String,
    pub app_access_token: String,
    pub timeout: Duration,
}

// Thin reqwest wrapper for the Twitch Helix endpoints used by followage.
#[derive(Clone)]
pub struct HelixClient {
    http: Client,
    base_url: String,
    client_id: String,
    app_access_token: String,
    tokens: Arc<dyn TokenStore>,
}

#[derive(Debug, Deserialize)]
struct HelixPage<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct HelixUser {
    id: String,
    login: String,
}

// `channels/followers` omits `data` (answering with only `total`) when the
// token's user is neither the broadcaster nor one of their moderators.
#[derive(Debug, Deserialize)]
struct HelixFollowerPage {
    data: Option<Vec<HelixFollower>>,
}

#[derive(Debug, Deserialize)]
struct HelixFollower {
    followed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct HelixErrorResponse {
    message: String,
}

impl HelixClient {
    pub fn new(config: HelixConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id,
            app_access_token: config.app_access_token,
            tokens,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}/{path}", self.base_url))
    }

    fn authorized(&self, url: Url, token: &str) -> RequestBuilder {
        self.http
            .get(url)
            .header("Client-Id", &self.client_id)
            .bearer_auth(token)
    }
}

// Body text of a failed response, or the status line when the body is empty.
async fn failure_text(status: StatusCode, response: Response) -> String {
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => format!("helix returned {status}"),
    }
}

fn upstream_message(body: &str) -> Option<String> {
    serde_json::from_str::<HelixErrorResponse>(body)
        .ok()
        .map(|payload| payload.message)
}

#[async_trait]
impl UserLookupService for HelixClient {
    async fn resolve(
        &self,
        logins: &[String],
    ) -> Result<HashMap<String, Identity>, UserLookupError> {
        let mut url = self
            .endpoint("users")
            .map_err(|err| UserLookupError::upstream(err.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            let mut seen = Vec::with_capacity(logins.len());
            for login in logins {
                if !seen.contains(&login) {
                    query.append_pair("login", login);
                    seen.push(login);
                }
            }
        }

        let response = self
            .authorized(url, &self.app_access_token)
            .send()
            .await
            .map_err(|err| UserLookupError::upstream(format!("helix transport error: {err}")))?;
        let status = response.status();

        if !status.is_success() {
            let body = failure_text(status, response).await;
            let rejected_logins = status == StatusCode::BAD_REQUEST
                && upstream_message(&body)
                    .is_some_and(|message| message.to_lowercase().contains(INVALID_LOGIN_MARKER));
            if rejected_logins {
                return Err(UserLookupError::BadIdentifiers);
            }
            return Err(UserLookupError::Upstream { message: body });
        }

        let page = response
            .json::<HelixPage<HelixUser>>()
            .await
            .map_err(|err| UserLookupError::upstream(format!("helix decode error: {err}")))?;

        Ok(page
            .data
            .into_iter()
            .map(|user| {
                (
                    user.login.to_lowercase(),
                    Identity {
                        id: user.id,
                        login: user.login,
                    },
                )
            })
            .collect())
    }
}

#[async_trait]
impl FollowRelationshipService for HelixClient {
    async fn fetch(
        &self,
        streamer: &Identity,
        viewer: &Identity,
        moderator_id: Option<&str>,
    ) -> Result<FollowRecord, FollowLookupError> {
        // Followers are only visible to the broadcaster or one of their moderators.
        let token_owner = moderator_id.unwrap_or(streamer.id.as_str());
        let token = self
            .tokens
            .user_token(token_owner)
            .await
            .map_err(FollowLookupError::upstream)?
            .ok_or(FollowLookupError::NotLoggedIn)?;

        let mut url = self
            .endpoint("channels/followers")
            .map_err(|err| FollowLookupError::upstream(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("broadcaster_id", &streamer.id)
            .append_pair("user_id", &viewer.id);

        let response = self
            .authorized(url, &token)
            .send()
            .await
            .map_err(|err| FollowLookupError::upstream(format!("helix transport error: {err}")))?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(FollowLookupError::AuthRevoked);
        }
        if status == StatusCode::FORBIDDEN && moderator_id.is_some() {
            return Err(FollowLookupError::NotModerator);
        }
        if !status.is_success() {
            return Err(FollowLookupError::Upstream {
                message: failure_text(status, response).await,
            });
        }

        let page = response
            .json::<HelixFollowerPage>()
            .await
            .map_err(|err| FollowLookupError::upstream(format!("helix decode error: {err}")))?;

        let Some(data) = page.data else {
            return Err(match moderator_id {
                Some(_) => FollowLookupError::NotModerator,
                None => FollowLookupError::upstream("helix followers response had no data"),
            });
        };

        Ok(FollowRecord {
            followed_at: data.into_iter().next().map(|follow| follow.followed_at),
        })
    }
}
