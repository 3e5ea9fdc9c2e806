use resolvd_error::{Error, Result};
use serde_json::Value;

use crate::backend::ChainGateway;

impl ChainGateway {
    async fn ud_records(&self, domain: &str) -> Result<Value> {
        let Some(key) = &self.config().unstoppable_api_key else {
            return Err(Error::MissingCredential("unstoppable domains api key"));
        };
        let url = format!("{}/domains/{domain}", self.config().endpoints.unstoppable);
        let bearer = format!("Bearer {key}");
        let response = self
            .client()
            .get(&url, &[("Authorization", bearer.as_str())])
            .await?
            .into_success()?;
        Ok(response
            .body
            .get("records")
            .cloned()
            .unwrap_or(Value::Null))
    }

    /// Resolves the address record a domain holds for a currency
    /// (e.g. `ETH`), via the Unstoppable Domains resolution API.
    pub async fn ud_address(&self, domain: &str, currency: &str) -> Result<String> {
        let records = self.ud_records(domain).await?;
        let key = format!("crypto.{}.address", currency.to_uppercase());
        records
            .get(key.as_str())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::DomainNotFound(domain.to_string()))
    }

    /// Resolves the IPFS content hash a domain points at, if any.
    pub async fn ud_ipfs_hash(&self, domain: &str) -> Result<String> {
        let records = self.ud_records(domain).await?;
        records
            .get("ipfs.html.value")
            .or_else(|| records.get("dweb.ipfs.hash"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::DomainNotFound(domain.to_string()))
    }
}
