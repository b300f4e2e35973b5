use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key as stored remotely. Tables may use integer or text keys, so
/// both are accepted and written back in the same form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(value) => write!(f, "{value}"),
            RecordId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: RecordId,
    pub name: String,
    pub age: u32,
    pub bio: String,
    pub starting_bid: f64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bid {
    pub candidate_id: RecordId,
    pub amount: f64,
    pub user_id: String,
}

impl Bid {
    pub fn for_candidate(candidate: &Candidate, user_id: &str) -> Self {
        Self {
            candidate_id: candidate.id.clone(),
            amount: candidate.starting_bid,
            user_id: user_id.to_owned(),
        }
    }
}

/// Row of the `friends` table.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRow {
    pub id: RecordId,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub bio: Option<String>,
    pub starting_bid: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            bio: row.bio.unwrap_or_default(),
            starting_bid: row.starting_bid,
            image: row.image_url.unwrap_or_default(),
        }
    }
}

/// Row of the `bids` table.
#[derive(Debug, Clone, Deserialize)]
pub struct BidRow {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub friend_id: RecordId,
    pub bid_amount: f64,
    pub user_id: String,
}

impl From<BidRow> for Bid {
    fn from(row: BidRow) -> Self {
        Self {
            candidate_id: row.friend_id,
            amount: row.bid_amount,
            user_id: row.user_id,
        }
    }
}

/// Insert payload for the `bids` table.
#[derive(Debug, Serialize)]
pub struct NewBidRow<'a> {
    pub friend_id: &'a RecordId,
    pub bid_amount: f64,
    pub user_id: &'a str,
}

impl<'a> From<&'a Bid> for NewBidRow<'a> {
    fn from(bid: &'a Bid) -> Self {
        Self {
            friend_id: &bid.candidate_id,
            bid_amount: bid.amount,
            user_id: &bid.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_row_maps_remote_field_names() {
        let row: CandidateRow = serde_json::from_str(
            r#"{"id":7,"name":"Sam","age":29,"bio":"Loves hiking","starting_bid":45.5,
                "image_url":"https://img.example/sam.jpg","created_at":"2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let candidate = Candidate::from(row);

        assert_eq!(candidate.id, RecordId::Int(7));
        assert_eq!(candidate.starting_bid, 45.5);
        assert_eq!(candidate.image, "https://img.example/sam.jpg");
        assert_eq!(candidate.bio, "Loves hiking");
    }

    #[test]
    fn text_ids_and_missing_optionals_are_accepted() {
        let row: CandidateRow = serde_json::from_str(
            r#"{"id":"b5f1","name":"Ari","age":31,"bio":null,"starting_bid":0}"#,
        )
        .unwrap();
        let candidate = Candidate::from(row);

        assert_eq!(candidate.id, RecordId::Text("b5f1".into()));
        assert_eq!(candidate.bio, "");
        assert_eq!(candidate.image, "");
    }

    #[test]
    fn new_bid_row_serializes_with_remote_names() {
        let bid = Bid {
            candidate_id: RecordId::Int(3),
            amount: 20.0,
            user_id: "demo-user".into(),
        };
        let json = serde_json::to_value(NewBidRow::from(&bid)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"friend_id": 3, "bid_amount": 20.0, "user_id": "demo-user"})
        );
    }

    #[test]
    fn bid_row_without_id_maps_to_bid() {
        let row: BidRow =
            serde_json::from_str(r#"{"friend_id":"x1","bid_amount":12,"user_id":"u"}"#).unwrap();
        let bid = Bid::from(row);
        assert_eq!(bid.candidate_id, RecordId::Text("x1".into()));
        assert_eq!(bid.amount, 12.0);
    }
}
