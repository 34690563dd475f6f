use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error as ThisError;

use gymdesk_data::{Delete, Insert, Membership, MembershipFilter, Query, Retrieve, Update};

/// Path of the membership collection on the backend.
pub const USERS_PATH: &str = "/api/users";

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("Membership {0} not found")]
    NotFound(u32),
    #[error("Backend responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct Created {
    id: u32,
}

/// Client for the membership REST backend.
///
/// The backend only lists the whole collection; single records
/// are looked up in that listing.
#[derive(Debug, Clone)]
pub struct ApiClient {
    url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn users_url(&self) -> String {
        format!("{}{}", self.url, USERS_PATH)
    }

    fn user_url(&self, id: u32) -> String {
        format!("{}{}/{}", self.url, USERS_PATH, id)
    }
}

/// Turn unsuccessful responses into an [`ApiError`].
async fn check(response: Response, id: Option<u32>) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(ApiError::NotFound(id));
    }
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(err) => err.error,
        Err(_) => body,
    };
    log::warn!("backend request failed: {} {}", status, message);
    Err(ApiError::Status { status, message })
}

#[async_trait]
impl Query<Membership> for ApiClient {
    type Filter = MembershipFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Membership>> {
        let url = self.users_url();
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let members: Vec<Membership> = check(response, None).await?.json().await?;
        log::debug!("fetched {} memberships", members.len());

        let members = match filter.id {
            Some(id) => members.into_iter().filter(|m| m.id == id).collect(),
            None => members,
        };
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Membership> for ApiClient {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Membership> {
        let filter = MembershipFilter {
            id: Some(member_id),
        };
        let member = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(ApiError::NotFound(member_id))?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Membership> for ApiClient {
    async fn insert(&self, member: Membership) -> Result<Membership> {
        let url = self.users_url();
        log::debug!("POST {}", url);
        let response = self.client.post(&url).json(&member).send().await?;
        let created: Created = check(response, None).await?.json().await?;
        log::info!("created membership {}", created.id);
        self.retrieve(created.id).await
    }
}

#[async_trait]
impl Update<Membership> for ApiClient {
    async fn update(&self, member: Membership) -> Result<Membership> {
        let url = self.user_url(member.id);
        log::debug!("PUT {}", url);
        let response = self.client.put(&url).json(&member).send().await?;
        check(response, Some(member.id)).await?;
        log::info!("updated membership {}", member.id);
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Membership> for ApiClient {
    async fn delete(&self, member: Membership) -> Result<()> {
        let url = self.user_url(member.id);
        log::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check(response, Some(member.id)).await?;
        log::info!("deleted membership {}", member.id);
        Ok(())
    }
}
