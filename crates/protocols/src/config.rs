use crate::addresses::ContractAddresses;
use std::fmt;
use zeroize::Zeroizing;

/// Connection settings for the RPC endpoint and signing wallet.
#[derive(Clone)]
pub struct ClientConfig {
    /// HTTP JSON-RPC endpoint.
    pub rpc_url: String,
    /// Hex-encoded secp256k1 private key of the signing wallet.
    pub private_key: Zeroizing<String>,
    /// Contract deployments.
    pub addresses: ContractAddresses,
}

impl ClientConfig {
    pub fn new(rpc_url: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            private_key: Zeroizing::new(private_key.into()),
            addresses: ContractAddresses::default(),
        }
    }

    #[must_use]
    pub fn with_addresses(mut self, addresses: ContractAddresses) -> Self {
        self.addresses = addresses;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("addresses", &self.addresses)
            .finish()
    }
}
