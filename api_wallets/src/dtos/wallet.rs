use common::error::{AppError, Res};
use serde::{Deserialize, Serialize};

pub const MAX_LABEL_LEN: usize = 64;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    pub chain: String,
    pub address: String,
    pub label: Option<String>,
}

impl CreateWalletRequest {
    /// Trims fields and lowercases the chain name.
    pub fn normalized(self) -> Res<Self> {
        let chain = self.chain.trim().to_lowercase();
        let address = self.address.trim().to_string();
        let label = self
            .label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        if chain.is_empty() {
            return Err(AppError::BadRequest("Chain is required".to_string()));
        }
        if address.is_empty() || address.chars().any(char::is_whitespace) {
            return Err(AppError::BadRequest("Invalid wallet address".to_string()));
        }
        if label.as_ref().is_some_and(|l| l.chars().count() > MAX_LABEL_LEN) {
            return Err(AppError::BadRequest(format!(
                "Label must be at most {} characters",
                MAX_LABEL_LEN
            )));
        }

        Ok(CreateWalletRequest {
            chain,
            address,
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(chain: &str, address: &str, label: Option<&str>) -> CreateWalletRequest {
        CreateWalletRequest {
            chain: chain.to_string(),
            address: address.to_string(),
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn normalizes_fields() {
        let req = req(" Ethereum ", " 0xabc ", Some("  ")).normalized().unwrap();
        assert_eq!(req.chain, "ethereum");
        assert_eq!(req.address, "0xabc");
        assert!(req.label.is_none());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(req("", "0xabc", None).normalized().is_err());
        assert!(req("eth", "0x ab", None).normalized().is_err());
        assert!(req("eth", "0xabc", Some(&"x".repeat(65))).normalized().is_err());
    }
}
