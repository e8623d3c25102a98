//! Async HTTP client for the photo JSON API.
//!
//! Implements [`photon_core::api::PhotoApi`] over `reqwest`. Requests are sent
//! once; retry policy is left to callers.

pub mod error;

use std::time::Duration;

use photon_core::{api::PhotoApi, changes::Changes, photo::Photo, urls};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

pub use error::{ClientError, Result};

/// Connection settings for the photo API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:2342".to_string(),
      username: String::new(),
      password: String::new(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// HTTP client for `/api/v1`.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ClientError::Build)?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    api_url(&self.config.base_url, path)
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let req = self.client.request(method, self.url(path));
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  async fn send(
    &self,
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
  ) -> Result<Response> {
    tracing::debug!(%method, %path, "sending request");
    let mut req = self.request(method.clone(), &path);
    if let Some(body) = body {
      req = req.json(&body);
    }
    let resp = req.send().await.map_err(|source| ClientError::Http {
      method: method.clone(),
      path: path.clone(),
      source,
    })?;

    if !resp.status().is_success() {
      return Err(ClientError::Status {
        method,
        path,
        status: resp.status(),
      });
    }
    Ok(resp)
  }

  async fn send_json<T: DeserializeOwned>(
    &self,
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
  ) -> Result<T> {
    let resp = self.send(method.clone(), path.clone(), body).await?;
    resp
      .json()
      .await
      .map_err(|source| ClientError::Decode { method, path, source })
  }
}

/// Join the configured base URL with an `/api/v1`-relative path.
pub fn api_url(base_url: &str, path: &str) -> String {
  format!("{}{}{}", base_url.trim_end_matches('/'), urls::API_PREFIX, path)
}

fn label_path(uid: &str, label_id: u64) -> String {
  format!("{}/label/{label_id}", urls::photo_resource(uid))
}

impl PhotoApi for ApiClient {
  type Error = ClientError;

  async fn get_photo(&self, uid: &str) -> Result<Photo> {
    self
      .send_json(Method::GET, urls::photo_resource(uid), None)
      .await
  }

  async fn update_photo(&self, uid: &str, changes: &Changes) -> Result<Photo> {
    let body = serde_json::to_value(changes).map_err(ClientError::Encode)?;
    self
      .send_json(Method::PUT, urls::photo_resource(uid), Some(body))
      .await
  }

  async fn like(&self, uid: &str) -> Result<()> {
    let path = format!("{}/like", urls::photo_resource(uid));
    self.send(Method::POST, path, None).await.map(|_| ())
  }

  async fn unlike(&self, uid: &str) -> Result<()> {
    let path = format!("{}/like", urls::photo_resource(uid));
    self.send(Method::DELETE, path, None).await.map(|_| ())
  }

  async fn add_label(&self, uid: &str, name: &str, priority: i32) -> Result<Photo> {
    let path = format!("{}/label", urls::photo_resource(uid));
    let body = json!({ "LabelName": name, "LabelPriority": priority });
    self.send_json(Method::POST, path, Some(body)).await
  }

  async fn activate_label(&self, uid: &str, label_id: u64) -> Result<Photo> {
    let body = json!({ "Uncertainty": 0 });
    self
      .send_json(Method::PUT, label_path(uid, label_id), Some(body))
      .await
  }

  async fn rename_label(
    &self,
    uid: &str,
    label_id: u64,
    name: &str,
  ) -> Result<Photo> {
    let body = json!({ "Label": { "LabelName": name } });
    self
      .send_json(Method::PUT, label_path(uid, label_id), Some(body))
      .await
  }

  async fn remove_label(&self, uid: &str, label_id: u64) -> Result<Photo> {
    self
      .send_json(Method::DELETE, label_path(uid, label_id), None)
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn urls_are_joined_under_api_prefix() {
    assert_eq!(
      api_url("http://localhost:2342/", &urls::photo_resource("pq1")),
      "http://localhost:2342/api/v1/photos/pq1"
    );
    assert_eq!(
      api_url("https://photos.example.com", &label_path("pq1", 7)),
      "https://photos.example.com/api/v1/photos/pq1/label/7"
    );
    assert_eq!(
      api_url("http://localhost:2342", &label_path("a/b?c", 7)),
      "http://localhost:2342/api/v1/photos/a%2Fb%3Fc/label/7"
    );
  }

  #[test]
  fn client_builds_with_defaults() {
    let client = ApiClient::new(ApiConfig::default()).unwrap();
    assert_eq!(client.url("/photos/x"), "http://localhost:2342/api/v1/photos/x");
  }
}
