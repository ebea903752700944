//! Async HTTP client wrapping the shelter JSON API.
//!
//! Requests carry no client-side timeout; a slow server is waited on.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shelter_core::{
  envelope::Envelope,
  person::{NewPerson, Person, PersonPatch},
};
use uuid::Uuid;

/// Connection settings for the shelter API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the shelter JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder().build().context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Send `req` and unwrap the envelope. A `success: false` reply becomes an
  /// error carrying the server's message, whatever the HTTP status.
  async fn send<T: DeserializeOwned>(
    &self,
    req: RequestBuilder,
    what: &str,
  ) -> Result<Option<T>> {
    let resp = req.send().await.with_context(|| format!("{what} failed"))?;
    let status = resp.status();
    let envelope: Envelope<T> = resp
      .json()
      .await
      .with_context(|| format!("deserialising {what} ({status})"))?;

    if envelope.success {
      return Ok(envelope.data);
    }
    let message = envelope
      .error
      .map_or_else(|| format!("{what} → {status}"), |e| e.message);
    tracing::warn!(%status, "{what}: {message}");
    Err(anyhow!(message))
  }

  // ── Collection ────────────────────────────────────────────────────────────

  /// `GET /api/people`
  pub async fn list_people(&self) -> Result<Vec<Person>> {
    let people = self
      .send(self.client.get(self.url("/people")), "GET /people")
      .await?;
    Ok(people.unwrap_or_default())
  }

  /// `GET /api/people/recent`
  pub async fn list_recent(&self) -> Result<Vec<Person>> {
    let people = self
      .send(self.client.get(self.url("/people/recent")), "GET /people/recent")
      .await?;
    Ok(people.unwrap_or_default())
  }

  /// `POST /api/people`
  pub async fn create_person(&self, input: &NewPerson) -> Result<Person> {
    self
      .send(self.client.post(self.url("/people")).json(input), "POST /people")
      .await?
      .context("POST /people returned no person")
  }

  // ── Item ──────────────────────────────────────────────────────────────────

  /// `GET /api/people/:id`: `None` when the id does not exist.
  pub async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    self
      .send(self.client.get(self.url(&format!("/people/{id}"))), "GET /people/:id")
      .await
  }

  /// `PUT /api/people/:id`
  pub async fn update_person(&self, id: Uuid, patch: &PersonPatch) -> Result<Person> {
    self
      .send(
        self.client.put(self.url(&format!("/people/{id}"))).json(patch),
        "PUT /people/:id",
      )
      .await?
      .context("PUT /people/:id returned no person")
  }

  /// `DELETE /api/people/:id`
  pub async fn delete_person(&self, id: Uuid) -> Result<()> {
    self
      .send::<Person>(
        self.client.delete(self.url(&format!("/people/{id}"))),
        "DELETE /people/:id",
      )
      .await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
  };

  use super::*;

  /// Answer one request with an empty roster after `delay`.
  async fn spawn_slow_server(delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await.unwrap();
      let mut request = Vec::new();
      let mut buf = [0u8; 1024];
      while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
          return;
        }
        request.extend_from_slice(&buf[..n]);
      }

      tokio::time::sleep(delay).await;

      let body = r#"{"success":true,"data":[]}"#;
      let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
      );
      socket.write_all(response.as_bytes()).await.unwrap();
      socket.shutdown().await.ok();
    });
    format!("http://{addr}")
  }

  #[tokio::test(start_paused = true)]
  async fn slow_server_is_waited_on() {
    let base_url = spawn_slow_server(Duration::from_secs(120)).await;
    let client = ApiClient::new(ApiConfig { base_url }).unwrap();

    let people = client.list_people().await.unwrap();
    assert!(people.is_empty());
  }

  #[test]
  fn url_joins_base_and_api_prefix() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:3000/".into(),
    })
    .unwrap();
    assert_eq!(client.url("/people"), "http://localhost:3000/api/people");
  }
}
