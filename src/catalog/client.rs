//! HTTP client for the remote exercise catalog.
//!
//! The catalog is a read-only external collaborator; failures here surface
//! as `FetchError` and never touch favorites or workout plan state.

use super::exercise::Exercise;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog responded with status {0}")]
    Status(u16),

    #[error("no exercise with id {0}")]
    NotFound(String),
}

pub struct ExerciseDbClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_host: String,
    api_key: String,
}

impl ExerciseDbClient {
    pub fn new(
        base_url: &str,
        api_host: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_host: api_host.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetches one page of the catalog listing.
    pub fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Exercise>, FetchError> {
        let url = format!(
            "{}/exercises?limit={}&offset={}",
            self.base_url, limit, offset
        );

        let response = self.send(&url)?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.json()?)
    }

    /// Fetches a single exercise by its catalog id.
    pub fn fetch_by_id(&self, id: &str) -> Result<Exercise, FetchError> {
        let url = format!("{}/exercises/exercise/{}", self.base_url, id);

        let response = self.send(&url)?;
        if response.status().as_u16() == 404 {
            return Err(FetchError::NotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.json()?)
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        Ok(self
            .client
            .get(url)
            .header("x-rapidapi-host", &self.api_host)
            .header("x-rapidapi-key", &self.api_key)
            .send()?)
    }
}

/// Last-request-wins gate for catalog fetches.
///
/// A view issues a ticket before each fetch; when the response arrives it is
/// applied only if no newer ticket has been issued since. Stale responses are
/// discarded, not applied.
pub struct RequestGate {
    current: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// Issues a new ticket, superseding all previously issued ones.
    pub fn issue(&self) -> RequestTicket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { generation }
    }

    /// True while the ticket is the most recently issued one.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.current.load(Ordering::SeqCst)
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let gate = RequestGate::new();
        let ticket = gate.issue();
        assert!(gate.is_current(&ticket));
    }

    #[test]
    fn test_new_ticket_supersedes_older_ones() {
        let gate = RequestGate::new();
        let first = gate.issue();
        let second = gate.issue();

        assert!(!gate.is_current(&first));
        assert!(gate.is_current(&second));
    }

    #[test]
    fn test_stale_ticket_stays_stale() {
        let gate = RequestGate::new();
        let first = gate.issue();
        let _second = gate.issue();
        let third = gate.issue();

        assert!(!gate.is_current(&first));
        assert!(gate.is_current(&third));
    }
}
