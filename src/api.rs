use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::auth::{Credentials, Endpoints, Session};
use crate::data::{ActivityFilter, ActivityTypeRecord, RawActivity, TimezoneRecord, UserSettings};

const ACTIVITIES_PATH: &str = "/proxy/activitylist-service/activities/search/activities";
const ACTIVITY_TYPES_PATH: &str = "/proxy/activity-service/activity/activityTypes";
const TIMEZONES_PATH: &str = "/proxy/system-service/timezoneUnits";
const USER_SETTINGS_PATH: &str = "/proxy/userprofile-service/userprofile/user-settings";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API request failed: {endpoint} returned {status} - {message}")]
    RequestFailed {
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("Failed to reach {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to parse response from {endpoint}: {source} (body excerpt: {excerpt})")]
    ParseError {
        endpoint: String,
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Invalid URI: {uri}")]
    InvalidUri { uri: String },
}

impl ApiError {
    pub(crate) fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        }
    }
}

/// Returns the body of a successful response, or `RequestFailed` with the
/// start of the body for anything outside 2xx.
pub(crate) async fn check_response(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<String, ApiError> {
    let status = response.status();
    tracing::debug!(endpoint, status = status.as_u16(), "response received");

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            "Empty response".to_string()
        } else {
            body.chars().take(500).collect::<String>()
        };
        return Err(ApiError::RequestFailed {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    response.text().await.map_err(|e| ApiError::transport(endpoint, e))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserSettingsResponse {
    user_data: UserSettings,
}

/// Reference data memoised for the lifetime of one [`GarminApi`], which is
/// one export run. Nothing expires.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    activity_types: OnceCell<Vec<ActivityTypeRecord>>,
    timezones: OnceCell<Vec<TimezoneRecord>>,
    user_settings: OnceCell<UserSettings>,
}

pub struct GarminApi {
    session: Session,
    endpoints: Endpoints,
    cache: ReferenceCache,
}

impl GarminApi {
    pub async fn login(credentials: &Credentials, endpoints: Endpoints) -> Result<Self, ApiError> {
        let session = Session::login(credentials, &endpoints).await?;
        Ok(Self::with_session(session, endpoints))
    }

    pub fn with_session(session: Session, endpoints: Endpoints) -> Self {
        Self {
            session,
            endpoints,
            cache: ReferenceCache::default(),
        }
    }

    /// Most recent activities first, at most `limit` of them. A category
    /// filter is applied by the service.
    pub async fn activities(
        &self,
        limit: u32,
        filter: ActivityFilter,
    ) -> Result<Vec<RawActivity>, ApiError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(tag) = filter.query_value() {
            query.push(("activityType", tag.to_string()));
        }

        let mut activities: Vec<RawActivity> = self.get_json(ACTIVITIES_PATH, &query).await?;
        activities.truncate(limit as usize);
        tracing::info!(count = activities.len(), limit, "fetched activities");
        Ok(activities)
    }

    pub async fn activity_types(&self) -> Result<&[ActivityTypeRecord], ApiError> {
        let types = self
            .cache
            .activity_types
            .get_or_try_init(|| self.get_json(ACTIVITY_TYPES_PATH, &[]))
            .await?;
        Ok(types.as_slice())
    }

    pub async fn timezones(&self) -> Result<&[TimezoneRecord], ApiError> {
        let zones = self
            .cache
            .timezones
            .get_or_try_init(|| self.get_json(TIMEZONES_PATH, &[]))
            .await?;
        Ok(zones.as_slice())
    }

    pub async fn user_settings(&self) -> Result<&UserSettings, ApiError> {
        self.cache
            .user_settings
            .get_or_try_init(|| async {
                let response: UserSettingsResponse = self.get_json(USER_SETTINGS_PATH, &[]).await?;
                Ok::<_, ApiError>(response.user_data)
            })
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.endpoints.web_base, path);

        let response = self
            .session
            .client()
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::transport(path, e))?;

        let body = check_response(response, path).await?;
        serde_json::from_str::<T>(&body).map_err(|e| ApiError::ParseError {
            endpoint: path.to_string(),
            excerpt: body.chars().take(200).collect(),
            source: e,
        })
    }
}
