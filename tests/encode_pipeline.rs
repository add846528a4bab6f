//! End-to-end pipeline tests against a stub gateway.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;

use solana_dex_encoder::venues::raydium::RaydiumArgs;
use solana_dex_encoder::{
    EncodeError, Engine, Network, NetworkGateway, Operation, Registry, TradeIntent, Venue,
};

/// Stub gateway with a fixed blockhash and a call counter.
struct StubGateway {
    blockhash: Hash,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl StubGateway {
    fn new() -> Self {
        Self {
            blockhash: Hash::new_unique(),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkGateway for StubGateway {
    async fn latest_blockhash(&self, _network: Network) -> Result<Hash, EncodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        Ok(self.blockhash)
    }

    async fn account_exists(
        &self,
        _address: &Pubkey,
        _network: Network,
    ) -> Result<bool, EncodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

fn engine_with(gateway: Arc<StubGateway>) -> Engine {
    Engine::new(Arc::new(Registry::with_defaults()), gateway)
}

fn valid_intent() -> TradeIntent {
    TradeIntent {
        wallet_address: Pubkey::new_unique().to_string(),
        token_mint: Pubkey::new_unique().to_string(),
        amount: "1000000".into(),
        slippage_bps: 100,
        operation: Operation::Buy,
        priority_fee: None,
        max_wait_secs: None,
        use_mainnet: true,
    }
}

#[tokio::test]
async fn all_three_venues_encode_concurrently_with_distinct_ids() {
    let gateway = Arc::new(StubGateway::new());
    let engine = engine_with(gateway.clone());

    let (a, b, c) = tokio::join!(
        engine.encode(Venue::Pumpfun, valid_intent()),
        engine.encode(Venue::PumpSwap, valid_intent()),
        engine.encode(Venue::Raydium, valid_intent()),
    );

    let mut ids = Vec::new();
    for resp in [a, b, c] {
        assert!(resp.success, "error: {:?} {:?}", resp.error_code, resp.error);
        assert!(!resp.transaction_data.as_deref().unwrap_or("").is_empty());
        assert!(resp.estimated_fee.is_some());
        ids.push(resp.transaction_id.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3, "correlation ids must be pairwise distinct");
}

#[tokio::test]
async fn invalid_wallet_fails_validation_for_every_venue_without_io() {
    let gateway = Arc::new(StubGateway::new());
    let engine = engine_with(gateway.clone());

    for venue in Venue::ALL {
        let mut intent = valid_intent();
        intent.wallet_address = "invalid_wallet_address".into();
        let resp = engine.encode(venue, intent).await;
        assert!(!resp.success);
        assert_eq!(resp.error_code.as_deref(), Some("VALIDATION_ERROR"));
        assert!(resp.transaction_data.is_none());
    }
    assert_eq!(gateway.calls(), 0, "validation failures must not reach the gateway");
}

#[tokio::test]
async fn amount_below_minimum_names_the_minimum() {
    let gateway = Arc::new(StubGateway::new());
    let engine = engine_with(gateway.clone());

    let mut intent = valid_intent();
    intent.amount = "100".into();
    let resp = engine.encode(Venue::Pumpfun, intent).await;

    assert!(!resp.success);
    assert_eq!(resp.error_code.as_deref(), Some("VALIDATION_ERROR"));
    let msg = resp.error.unwrap();
    assert!(msg.contains("1000"), "message should name the minimum: {msg}");
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn slippage_above_ceiling_is_rejected() {
    let engine = engine_with(Arc::new(StubGateway::new()));
    let mut intent = valid_intent();
    intent.slippage_bps = 9_999;
    let resp = engine.encode(Venue::Raydium, intent).await;
    assert_eq!(resp.error_code.as_deref(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn raydium_message_carries_expected_swap_fields() {
    let gateway = Arc::new(StubGateway::new());
    let engine = engine_with(gateway.clone());

    let intent = valid_intent();
    let wallet: Pubkey = intent.wallet_address.parse().unwrap();
    let resp = engine.encode(Venue::Raydium, intent).await;
    assert!(resp.success);

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(resp.transaction_data.unwrap())
        .unwrap();
    let message: Message = bincode::deserialize(&bytes).unwrap();

    // Fee payer first, stub blockhash, one compiled instruction.
    assert_eq!(message.account_keys[0], wallet);
    assert_eq!(message.recent_blockhash, gateway.blockhash);
    assert_eq!(message.instructions.len(), 1);

    let compiled = &message.instructions[0];
    let program = message.account_keys[compiled.program_id_index as usize];
    assert_eq!(
        program.to_string(),
        "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8"
    );

    let args = RaydiumArgs::decode(&compiled.data).unwrap();
    assert_eq!(args.operation, Operation::Buy);
    assert_eq!(args.amount_in, 1_000_000);
    assert_eq!(args.minimum_amount_out, 990_000);
}

#[tokio::test]
async fn estimated_fee_is_single_instruction_fee_in_sol() {
    let engine = engine_with(Arc::new(StubGateway::new()));
    let resp = engine.encode(Venue::PumpSwap, valid_intent()).await;
    assert!(resp.success);
    // 5000 base + 1000 for the one instruction.
    assert_eq!(resp.estimated_fee.as_deref(), Some("0.000006000"));
}

#[tokio::test]
async fn devnet_intents_are_routed_to_devnet() {
    let gateway = Arc::new(StubGateway::new());
    let engine = engine_with(gateway.clone());
    let mut intent = valid_intent();
    intent.use_mainnet = false;
    let resp = engine.encode(Venue::Pumpfun, intent).await;
    assert!(resp.success);
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn caller_timeout_surfaces_as_network_failure() {
    let gateway = Arc::new(StubGateway::slow(Duration::from_secs(60)));
    let engine = engine_with(gateway);

    let resp = engine
        .encode_with_timeout(Venue::Raydium, valid_intent(), Duration::from_millis(250))
        .await;

    assert!(!resp.success);
    assert_eq!(resp.error_code.as_deref(), Some("NETWORK_ERROR"));
    assert!(resp.transaction_data.is_none());
}

#[tokio::test]
async fn envelope_json_matches_api_contract() {
    let engine = engine_with(Arc::new(StubGateway::new()));
    let resp = engine.encode(Venue::Pumpfun, valid_intent()).await;
    let json = serde_json::to_value(&resp).unwrap();

    assert_eq!(json["success"], serde_json::json!(true));
    assert!(json["transactionData"].is_string());
    assert!(json["estimatedFee"].is_string());
    assert!(json["transactionId"].is_string());
    assert!(json.get("error").is_none());
}
