use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::{GatewayConfig, BIDS_TABLE, CANDIDATES_TABLE};
use crate::model::{Bid, BidRow, Candidate, CandidateRow, NewBidRow, RecordId};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Characters left as-is inside a filter value; everything else is escaped.
const FILTER_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} while requesting {url}")]
    Status { status: u16, url: String },
    #[error("could not decode response: {0}")]
    Parse(String),
    #[error("no record with id {0}")]
    NotFound(String),
}

impl GatewayError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: std::fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Remote row store holding the candidates and bids tables.
#[async_trait(?Send)]
pub trait DataGateway {
    /// All candidates, oldest first.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, GatewayError>;

    async fn get_candidate(&self, id: &RecordId) -> Result<Candidate, GatewayError>;

    async fn list_bids(&self) -> Result<Vec<Bid>, GatewayError>;

    async fn insert_bid(&self, bid: &Bid) -> Result<(), GatewayError>;
}

/// PostgREST client for a Supabase project.
#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseGateway {
    config: GatewayConfig,
}

impl SupabaseGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    fn candidates_url(&self) -> String {
        format!(
            "{}?select=*&order=created_at.asc",
            self.config.table_url(CANDIDATES_TABLE)
        )
    }

    fn candidate_url(&self, id: &RecordId) -> String {
        format!(
            "{}?select=*&id=eq.{}",
            self.config.table_url(CANDIDATES_TABLE),
            utf8_percent_encode(&id.to_string(), FILTER_VALUE)
        )
    }

    fn bids_url(&self) -> String {
        format!("{}?select=*", self.config.table_url(BIDS_TABLE))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {}", self.config.anon_key))
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, GatewayError> {
        let response = self
            .authorize(Request::get(url))
            .send()
            .await
            .map_err(GatewayError::network)?;
        decode(response, url).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, GatewayError> {
    if !response.ok() {
        return Err(GatewayError::Status {
            status: response.status(),
            url: url.to_owned(),
        });
    }

    let text = response.text().await.map_err(GatewayError::network)?;
    serde_json::from_str(&text).map_err(GatewayError::parse)
}

#[async_trait(?Send)]
impl DataGateway for SupabaseGateway {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, GatewayError> {
        let url = self.candidates_url();
        let rows: Vec<CandidateRow> = self.fetch_rows(&url).await?;
        Ok(rows.into_iter().map(Candidate::from).collect())
    }

    async fn get_candidate(&self, id: &RecordId) -> Result<Candidate, GatewayError> {
        let url = self.candidate_url(id);
        let response = self
            .authorize(Request::get(&url))
            .header("Accept", SINGLE_OBJECT)
            .send()
            .await
            .map_err(GatewayError::network)?;

        // PostgREST answers 406 when a single-object request matches no rows.
        if response.status() == 406 || response.status() == 404 {
            return Err(GatewayError::NotFound(id.to_string()));
        }

        let row: CandidateRow = decode(response, &url).await?;
        Ok(row.into())
    }

    async fn list_bids(&self) -> Result<Vec<Bid>, GatewayError> {
        let url = self.bids_url();
        let rows: Vec<BidRow> = self.fetch_rows(&url).await?;
        Ok(rows.into_iter().map(Bid::from).collect())
    }

    async fn insert_bid(&self, bid: &Bid) -> Result<(), GatewayError> {
        let url = self.config.table_url(BIDS_TABLE);
        let response = self
            .authorize(Request::post(&url))
            .header("Prefer", "return=minimal")
            .json(&NewBidRow::from(bid))
            .map_err(GatewayError::parse)?
            .send()
            .await
            .map_err(GatewayError::network)?;

        if !response.ok() {
            return Err(GatewayError::Status {
                status: response.status(),
                url,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> SupabaseGateway {
        SupabaseGateway::new(GatewayConfig::new("https://proj.supabase.co", "anon"))
    }

    #[test]
    fn candidate_listing_is_ordered_by_creation() {
        assert_eq!(
            gateway().candidates_url(),
            "https://proj.supabase.co/rest/v1/friends?select=*&order=created_at.asc"
        );
    }

    #[test]
    fn single_candidate_filters_on_id() {
        let gateway = gateway();
        assert_eq!(
            gateway.candidate_url(&RecordId::Int(12)),
            "https://proj.supabase.co/rest/v1/friends?select=*&id=eq.12"
        );
        assert_eq!(
            gateway.candidate_url(&RecordId::from("a-b")),
            "https://proj.supabase.co/rest/v1/friends?select=*&id=eq.a-b"
        );
    }

    #[test]
    fn text_ids_are_escaped_in_the_filter() {
        assert_eq!(
            gateway().candidate_url(&RecordId::from("a b&c,d")),
            "https://proj.supabase.co/rest/v1/friends?select=*&id=eq.a%20b%26c%2Cd"
        );
    }

    #[test]
    fn errors_render_readable_messages() {
        let err = GatewayError::Status {
            status: 500,
            url: gateway().bids_url(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 500 while requesting https://proj.supabase.co/rest/v1/bids?select=*"
        );
    }
}
