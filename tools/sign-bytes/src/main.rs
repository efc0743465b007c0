use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::B256;
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use eip712_multi_encoder::{
    hash_typed_data_json, recover_signer, sign_digest, DomainTemplate,
    SignModeEip712MultiHandler,
};
use eip712_multi_types::{AnyMsg, Fee, SignMode, SignableMsg, SignerContext, Tip, Tx};
use k256::ecdsa::SigningKey;
use serde::Deserialize;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Compute EIP-712 sign bytes for a JSON-encoded transaction, or re-check a typed-data document.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Log filter directives (eg, `eip712_multi_encoder=trace`).
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the digest a signer must sign for a transaction.
    Encode(EncodeArgs),
    /// Recompute the digest of an exported typed-data JSON document.
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Transaction JSON file (`messages`, `memo`, `timeout_height`, `fee`, `tip`).
    #[arg(long)]
    tx: PathBuf,

    /// Chain label, eg `greenfield_9000-1`.
    #[arg(long, env = "CHAIN_ID")]
    chain_id: String,

    #[arg(long, env = "ACCOUNT_NUMBER")]
    account_number: u64,

    #[arg(long, env = "SEQUENCE")]
    sequence: u64,

    /// Sign mode (only `eip712` is handled).
    #[arg(long, default_value = "eip712")]
    mode: SignMode,

    /// Write `{digest, typed_data, ...}` to this path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Private key (hex string, 0x...) used to sign the digest.
    #[arg(long, env = "PKEY", hide_env_values = true)]
    private_key: Option<String>,

    #[arg(long, default_value = "Greenfield Tx")]
    domain_name: String,

    #[arg(long, default_value = "1.0.0")]
    domain_version: String,

    #[arg(long, default_value = "greenfield")]
    verifying_contract: String,

    #[arg(long, default_value = "0")]
    salt: String,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Typed-data JSON (`types`, `primaryType`, `domain`, `message`), or an `encode --out` file.
    #[arg(long)]
    typed_data: PathBuf,
}

/// On-disk transaction shape.
#[derive(Deserialize, Debug)]
struct TxFile {
    messages: Vec<AnyMsg>,
    #[serde(default)]
    memo: String,
    #[serde(default)]
    timeout_height: u64,
    #[serde(default)]
    fee: Fee,
    #[serde(default)]
    tip: Option<Tip>,
}

impl TxFile {
    fn into_tx(self) -> Tx {
        let messages = self
            .messages
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn SignableMsg>)
            .collect();
        Tx::new(messages)
            .with_memo(self.memo)
            .with_timeout_height(self.timeout_height)
            .with_fee(self.fee)
            .with_tip(self.tip)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    match cli.command {
        Command::Encode(args) => encode(&args),
        Command::Verify(args) => verify(&args),
    }
}

fn init_tracing(filter: &str) {
    // Ignore the error when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init();
}

fn encode(args: &EncodeArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.tx)
        .with_context(|| format!("failed reading {}", args.tx.display()))?;
    let tx_file: TxFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing transaction JSON in {}", args.tx.display()))?;
    debug!(messages = tx_file.messages.len(), "loaded transaction");
    let tx = tx_file.into_tx();

    let handler = SignModeEip712MultiHandler::with_domain(DomainTemplate::new(
        args.domain_name.clone(),
        args.domain_version.clone(),
        args.verifying_contract.clone(),
        args.salt.clone(),
    ));
    let signer = SignerContext::new(args.chain_id.clone(), args.account_number, args.sequence);

    let digest = handler
        .get_sign_bytes(args.mode, &signer, &tx)
        .context("failed to compute sign bytes")?;
    println!("{digest}");

    let signature = match &args.private_key {
        Some(pk) => {
            let (sig, address) = sign(&digest, pk)?;
            println!("signature: 0x{}", hex::encode(sig));
            println!("signer:    {address}");
            Some((sig, address))
        }
        None => None,
    };

    if let Some(out) = &args.out {
        let typed_data = handler
            .typed_data(args.mode, &signer, &tx)
            .context("failed to build typed data")?;
        let now = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());

        let mut root = json!({
            "generated_at": now,
            "chain_id": args.chain_id,
            "account_number": args.account_number,
            "sequence": args.sequence,
            "digest": digest.to_string(),
            "typed_data": typed_data,
        });
        if let Some((sig, address)) = signature {
            root["signature"] = json!(format!("0x{}", hex::encode(sig)));
            root["signer"] = json!(address.to_string());
        }

        write_json_atomic(out, &root)?;
        info!(path = %out.display(), "wrote typed data");
    }

    Ok(())
}

fn sign(digest: &B256, private_key: &str) -> Result<([u8; 65], alloy_primitives::Address)> {
    let key_hex = private_key.trim();
    let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);
    let key_bytes = hex::decode(key_hex).context("private key is not valid hex")?;
    let key = SigningKey::from_slice(&key_bytes).map_err(|e| anyhow!("invalid private key: {e}"))?;

    let sig = sign_digest(digest, &key).map_err(|e| anyhow!("failed to sign digest: {e}"))?;
    let address =
        recover_signer(digest, &sig).map_err(|e| anyhow!("failed to recover signer: {e}"))?;
    Ok((sig, address))
}

fn verify(args: &VerifyArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.typed_data)
        .with_context(|| format!("failed reading {}", args.typed_data.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing JSON in {}", args.typed_data.display()))?;

    // Accept both a bare typed-data document and an `encode --out` file.
    let (typed_data, expected) = match value.get("typed_data") {
        Some(inner) => (inner.clone(), value.get("digest").and_then(Value::as_str)),
        None => (value.clone(), None),
    };

    let digest = hash_typed_data_json(&typed_data.to_string()).context("failed to hash typed data")?;
    println!("{digest}");

    if let Some(expected) = expected {
        if !expected.eq_ignore_ascii_case(&digest.to_string()) {
            return Err(anyhow!("digest mismatch: file says {expected}, computed {digest}"));
        }
        info!("digest matches");
    }
    Ok(())
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let serialised = serde_json::to_string_pretty(value).context("failed serialising output JSON")?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eip712_multi_types::Coin;
    use serde_json::Map;

    const TX_JSON: &str = r#"{
        "messages": [
            { "@type": "/cosmos.bank.v1beta1.MsgSend", "from_address": "a", "to_address": "b",
              "amount": [{ "denom": "BNB", "amount": "1" }] },
            { "@type": "/cosmos.bank.v1beta1.MsgSend", "from_address": "a", "to_address": "c",
              "amount": [{ "denom": "BNB", "amount": "22222" }] }
        ],
        "memo": "some test memo",
        "fee": { "amount": [{ "denom": "atom", "amount": "150" }], "gas_limit": 20000 }
    }"#;

    fn send(to: &str, amount: u128) -> Box<dyn SignableMsg> {
        let mut fields = Map::new();
        fields.insert("from_address".into(), json!("a"));
        fields.insert("to_address".into(), json!(to));
        fields.insert("amount".into(), json!([Coin::new("BNB", amount)]));
        Box::new(AnyMsg::new("/cosmos.bank.v1beta1.MsgSend", fields))
    }

    fn signer() -> SignerContext {
        SignerContext::new("greenfield_9000-1", 1, 2)
    }

    fn verify_file(path: &Path) -> Result<()> {
        verify(&VerifyArgs {
            typed_data: path.to_path_buf(),
        })
    }

    #[test]
    fn test_tx_file_matches_hand_built_tx() {
        let tx_file: TxFile = serde_json::from_str(TX_JSON).unwrap();
        assert_eq!(tx_file.messages.len(), 2);
        assert_eq!(tx_file.messages[0].type_url, "/cosmos.bank.v1beta1.MsgSend");
        assert!(!tx_file.messages[0].value.contains_key("@type"));

        let handler = SignModeEip712MultiHandler::new();
        let from_file = handler
            .get_sign_bytes(SignMode::Eip712, &signer(), &tx_file.into_tx())
            .unwrap();

        let built = Tx::new(vec![send("b", 1), send("c", 22222)])
            .with_memo("some test memo")
            .with_fee(Fee {
                amount: vec![Coin::new("atom", 150)],
                gas_limit: 20000,
                ..Default::default()
            });
        let by_hand = handler
            .get_sign_bytes(SignMode::Eip712, &signer(), &built)
            .unwrap();

        assert_eq!(from_file, by_hand);
    }

    #[test]
    fn test_verify_rejects_tampered_digest() {
        let dir = tempfile::tempdir().unwrap();
        let tx = serde_json::from_str::<TxFile>(TX_JSON).unwrap().into_tx();
        let handler = SignModeEip712MultiHandler::new();
        let digest = handler
            .get_sign_bytes(SignMode::Eip712, &signer(), &tx)
            .unwrap();
        let typed_data = handler
            .typed_data(SignMode::Eip712, &signer(), &tx)
            .unwrap();

        let good = dir.path().join("good.json");
        write_json_atomic(
            &good,
            &json!({ "digest": digest.to_string(), "typed_data": typed_data }),
        )
        .unwrap();
        verify_file(&good).unwrap();

        let tampered = dir.path().join("tampered.json");
        write_json_atomic(
            &tampered,
            &json!({ "digest": B256::repeat_byte(0x11).to_string(), "typed_data": typed_data }),
        )
        .unwrap();
        let err = verify_file(&tampered).unwrap_err();
        assert!(err.to_string().contains("digest mismatch"), "{err}");
    }

    #[test]
    fn test_write_json_atomic_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        let value = json!({ "digest": "0x00", "typed_data": { "primaryType": "Tx" } });

        write_json_atomic(&path, &value).unwrap();
        let read_back: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read_back, value);
        assert!(!tmp_path_for(&path).exists());

        let replaced = json!({ "digest": "0x01" });
        write_json_atomic(&path, &replaced).unwrap();
        let read_back: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read_back, replaced);
    }
}
