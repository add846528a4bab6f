//! The one external collaborator: the Solana RPC layer.
//!
//! Consumed through a narrow async seam so the pipeline can be driven by a
//! stub in tests. Each call is independently bounded by the configured
//! timeout; retries, if any, are the caller's policy, not ours.

use std::time::Duration;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::config::RpcSettings;
use crate::domain::Network;
use crate::error::EncodeError;

#[async_trait]
pub trait NetworkGateway: Send + Sync {
    /// Latest blockhash, bounding the assembled transaction's validity window.
    async fn latest_blockhash(&self, network: Network) -> Result<Hash, EncodeError>;

    async fn account_exists(&self, address: &Pubkey, network: Network)
        -> Result<bool, EncodeError>;
}

/// Production gateway: one nonblocking RPC client per network.
pub struct RpcGateway {
    mainnet: RpcClient,
    devnet: RpcClient,
    timeout: Duration,
}

impl RpcGateway {
    pub fn new(settings: &RpcSettings) -> Self {
        Self {
            mainnet: RpcClient::new_with_commitment(
                settings.mainnet_url.clone(),
                CommitmentConfig::confirmed(),
            ),
            devnet: RpcClient::new_with_commitment(
                settings.devnet_url.clone(),
                CommitmentConfig::confirmed(),
            ),
            timeout: Duration::from_millis(settings.timeout_ms),
        }
    }

    fn client(&self, network: Network) -> &RpcClient {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Devnet => &self.devnet,
        }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl std::future::Future<Output = Result<T, solana_client::client_error::ClientError>>
            + Send,
    ) -> Result<T, EncodeError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => Err(EncodeError::network(operation, e.to_string())),
            Err(_) => Err(EncodeError::network(
                operation,
                format!("timed out after {:?}", self.timeout),
            )),
        }
    }
}

#[async_trait]
impl NetworkGateway for RpcGateway {
    async fn latest_blockhash(&self, network: Network) -> Result<Hash, EncodeError> {
        let hash = self
            .bounded("getLatestBlockhash", self.client(network).get_latest_blockhash())
            .await?;
        debug!(network = network.as_str(), %hash, "gateway.latest_blockhash");
        Ok(hash)
    }

    async fn account_exists(
        &self,
        address: &Pubkey,
        network: Network,
    ) -> Result<bool, EncodeError> {
        let resp = self
            .bounded(
                "getAccountInfo",
                self.client(network)
                    .get_account_with_commitment(address, CommitmentConfig::confirmed()),
            )
            .await?;
        Ok(resp.value.is_some())
    }
}
