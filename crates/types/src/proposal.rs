//! Governance proposal records.
//!
//! Field names follow the Cosmos SDK `gov/v1beta1` JSON encoding so a REST
//! response body can be deserialized directly. Integer amounts are carried as
//! strings, the way the chain encodes them.

use serde::{Deserialize, Serialize};

pub const PROPOSAL_STATUS_UNSPECIFIED: &str = "PROPOSAL_STATUS_UNSPECIFIED";
pub const PROPOSAL_STATUS_DEPOSIT_PERIOD: &str = "PROPOSAL_STATUS_DEPOSIT_PERIOD";
pub const PROPOSAL_STATUS_VOTING_PERIOD: &str = "PROPOSAL_STATUS_VOTING_PERIOD";
pub const PROPOSAL_STATUS_PASSED: &str = "PROPOSAL_STATUS_PASSED";
pub const PROPOSAL_STATUS_REJECTED: &str = "PROPOSAL_STATUS_REJECTED";
pub const PROPOSAL_STATUS_FAILED: &str = "PROPOSAL_STATUS_FAILED";

/// A governance proposal as reported by a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub proposal_id: String,
    #[serde(default)]
    pub content: ProposalContent,
    pub status: String,
    #[serde(default)]
    pub final_tally_result: TallyResult,
    #[serde(default)]
    pub submit_time: String,
    #[serde(default)]
    pub deposit_end_time: String,
    #[serde(default)]
    pub total_deposit: Vec<Coin>,
    #[serde(default)]
    pub voting_start_time: String,
    #[serde(default)]
    pub voting_end_time: String,
}

impl ProposalResponse {
    /// Minimal record with the given id and status.
    pub fn new(proposal_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            proposal_id: proposal_id.into(),
            content: ProposalContent::default(),
            status: status.into(),
            final_tally_result: TallyResult::default(),
            submit_time: String::new(),
            deposit_end_time: String::new(),
            total_deposit: Vec::new(),
            voting_start_time: String::new(),
            voting_end_time: String::new(),
        }
    }
}

/// Proposal content header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalContent {
    #[serde(rename = "@type", default)]
    pub type_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Vote tally of a proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    #[serde(default)]
    pub yes: String,
    #[serde(default)]
    pub abstain: String,
    #[serde(default)]
    pub no: String,
    #[serde(default)]
    pub no_with_veto: String,
}

/// A denominated amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_rest_record() {
        let body = r#"{
            "proposal_id": "3",
            "content": {
                "@type": "/cosmos.gov.v1beta1.TextProposal",
                "title": "Raise block size",
                "description": "more room"
            },
            "status": "PROPOSAL_STATUS_PASSED",
            "final_tally_result": {"yes": "100", "abstain": "0", "no": "1", "no_with_veto": "0"},
            "submit_time": "2022-09-01T10:00:00Z",
            "deposit_end_time": "2022-09-03T10:00:00Z",
            "total_deposit": [{"denom": "ujuno", "amount": "10000000"}],
            "voting_start_time": "2022-09-01T10:00:00Z",
            "voting_end_time": "2022-09-01T10:00:30Z"
        }"#;

        let proposal: ProposalResponse = serde_json::from_str(body).unwrap();
        assert_eq!(proposal.proposal_id, "3");
        assert_eq!(proposal.content.title, "Raise block size");
        assert_eq!(proposal.final_tally_result.yes, "100");
        assert_eq!(proposal.total_deposit[0].denom, "ujuno");
        assert_eq!(proposal.status, PROPOSAL_STATUS_PASSED);
    }

    #[test]
    fn test_missing_optional_fields() {
        let body = r#"{"proposal_id": "1", "status": "PROPOSAL_STATUS_VOTING_PERIOD"}"#;
        let proposal: ProposalResponse = serde_json::from_str(body).unwrap();
        assert_eq!(proposal, ProposalResponse::new("1", PROPOSAL_STATUS_VOTING_PERIOD));
    }
}
