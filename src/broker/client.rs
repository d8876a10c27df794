//! HTTP client for the move broker
//!
//! The broker is a single URL: GET returns the latest move, POST publishes
//! one. `BrokerLink` drives the async client from the synchronous game loop.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::board::coord::CoordPair;
use crate::broker::protocol::{BrokerMove, BrokerResponse};
use crate::broker::{MoveSink, MoveSource, BROKER_RETRY_DELAY};
use crate::core::error::{Result, WargameError};
use crate::game::state::GameState;

/// Async broker client
pub struct BrokerClient {
    client: Client,
    url: String,
}

impl BrokerClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Latest move posted to the broker, whatever its turn
    pub async fn fetch(&self) -> Result<BrokerResponse> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| WargameError::Broker(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            return Err(WargameError::Broker(format!(
                "status code: {}, response: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WargameError::Broker(e.to_string()))
    }

    /// Publish a move; the broker must echo it back
    pub async fn post(&self, mv: &BrokerMove) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(mv)
            .send()
            .await
            .map_err(|e| WargameError::Broker(e.to_string()))?;

        let status = response.status();
        let body: BrokerResponse = response
            .json()
            .await
            .map_err(|e| WargameError::Broker(e.to_string()))?;

        if status == StatusCode::OK && body.confirms(mv) {
            Ok(())
        } else {
            Err(WargameError::Broker(format!(
                "status code: {}, response: {:?}",
                status, body
            )))
        }
    }
}

/// Blocking front for [`BrokerClient`], usable as both source and sink
pub struct BrokerLink {
    client: BrokerClient,
    runtime: Runtime,
}

impl BrokerLink {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let runtime = Runtime::new()?;
        Ok(Self {
            client: BrokerClient::new(url),
            runtime,
        })
    }
}

impl MoveSource for BrokerLink {
    fn next_move(&mut self, state: &GameState) -> Result<Option<CoordPair>> {
        let expected_turn = state.turns_played() + 1;
        let response = self.runtime.block_on(self.client.fetch())?;
        if !response.success {
            return Err(WargameError::Broker(format!(
                "unsuccessful response: {:?}",
                response
            )));
        }
        let mv = response.move_for_turn(expected_turn);
        if let Some(mv) = mv {
            info!("Got move from broker: {}", mv);
        }
        Ok(mv)
    }

    fn retry_delay(&self) -> Duration {
        BROKER_RETRY_DELAY
    }

    fn label(&self) -> &'static str {
        "Broker"
    }
}

impl MoveSink for BrokerLink {
    fn publish_move(&mut self, mv: CoordPair, turn: u32) -> Result<()> {
        let body = BrokerMove::new(mv, turn);
        let result = self.runtime.block_on(self.client.post(&body));
        if let Err(e) = &result {
            warn!("Broker error: {}", e);
        }
        result
    }
}
