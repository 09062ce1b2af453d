//! Subcommand implementations. Each returns the JSON value `main` prints.

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

use catapult_sdk::crypto::{KeyPair, PublicKey};
use catapult_sdk::id::{generate_mosaic_id, generate_namespace_path};
use catapult_sdk::model::{
    Address, Message, Mosaic, MosaicNonce, NamespaceId, NetworkType, UnresolvedAddress,
    UnresolvedMosaicId,
};
use catapult_sdk::transaction::{sign, signed_payload_hash, BinarySerializer, TransactionFactory};
use catapult_sdk::UInt64;

use crate::cli::{DecodeArgs, KeygenArgs, MosaicIdArgs, NamespaceIdArgs, TransferArgs};
use crate::config;

pub fn mosaic_id(args: &MosaicIdArgs) -> Result<Value> {
    let owner = PublicKey::from_hex(&args.owner).context("invalid owner public key")?;
    let nonce = match &args.nonce {
        Some(hex) => MosaicNonce::from_hex(hex).context("invalid nonce")?,
        None => MosaicNonce::random(),
    };
    let id = generate_mosaic_id(nonce, &owner);
    Ok(json!({
        "nonce": nonce.to_hex(),
        "mosaicId": id.to_hex(),
        "id": UInt64::from_u64(id.id()).to_dto(),
    }))
}

pub fn namespace_id(args: &NamespaceIdArgs) -> Result<Value> {
    let ids = generate_namespace_path(&args.path)
        .with_context(|| format!("invalid namespace path {:?}", args.path))?;
    let levels: Vec<Value> = args
        .path
        .split('.')
        .zip(&ids)
        .map(|(name, id)| json!({ "name": name, "namespaceId": id.to_hex() }))
        .collect();
    Ok(json!({ "path": args.path, "levels": levels }))
}

pub fn transfer(args: &TransferArgs) -> Result<Value> {
    let network_config =
        config::with_deadline(config::resolve(&args.network)?, args.deadline_secs);
    let generation_hash = network_config.generation_hash_bytes()?;
    let network = network_config.network_type;

    let signer = KeyPair::from_hex(&args.private_key).context("invalid private key")?;
    let recipient = parse_recipient(&args.recipient, network)?;
    let mosaics = args
        .mosaics
        .iter()
        .map(|spec| parse_mosaic(spec))
        .collect::<Result<Vec<_>>>()?;

    let mut builder = TransactionFactory::from_config(&network_config)?
        .transfer()
        .recipient(recipient)
        .mosaics(mosaics);
    if let Some(text) = &args.message {
        builder = builder.message(Message::plain(text));
    }
    let transaction = builder.build().context("failed to build transfer")?;
    let signed = sign(&transaction, &signer, &generation_hash).context("failed to sign transfer")?;

    tracing::info!(hash = %signed.hash, "transfer signed");
    Ok(serde_json::to_value(&signed)?)
}

pub fn decode(args: &DecodeArgs) -> Result<Value> {
    let bytes = hex::decode(args.payload.trim()).context("payload is not valid hex")?;
    let serializer = BinarySerializer::new();
    let transaction = if args.embedded {
        serializer.deserialize_embedded(&bytes)
    } else {
        serializer.deserialize(&bytes)
    }
    .context("failed to decode payload")?;

    let mut description = json!({
        "size": bytes.len(),
        "type": transaction.transaction_type(),
        "transaction": transaction,
    });
    if let (Some(hash_hex), false) = (&args.generation_hash, args.embedded) {
        let generation_hash: [u8; 32] = hex::decode(hash_hex)
            .ok()
            .and_then(|b| b.try_into().ok())
            .context("generation hash must be 32 hex-encoded bytes")?;
        let hash = signed_payload_hash(&bytes, &generation_hash)
            .context("failed to hash payload")?;
        description["hash"] = json!(hex::encode_upper(hash));
    }
    Ok(description)
}

pub fn keygen(args: &KeygenArgs) -> Result<Value> {
    let network = config::parse_network(&args.network)?;
    let key_pair = KeyPair::generate();
    let public_key = key_pair.public_key();
    Ok(json!({
        "privateKey": key_pair.secret_key_hex(),
        "publicKey": public_key.to_hex(),
        "address": Address::from_public_key(&public_key, network).pretty(),
        "networkType": network,
    }))
}

/// `@a.b` is a namespace alias; anything else is a base32 address.
fn parse_recipient(value: &str, network: NetworkType) -> Result<UnresolvedAddress> {
    if let Some(path) = value.strip_prefix('@') {
        let namespace = NamespaceId::from_name(path)
            .with_context(|| format!("invalid namespace alias {value:?}"))?;
        return Ok(UnresolvedAddress::alias(namespace, network));
    }
    let address = Address::from_plain(value).with_context(|| format!("invalid address {value:?}"))?;
    Ok(address.into())
}

/// `HEX_ID:AMOUNT`, e.g. `0DC67FBE1CAD29E3:1000000`.
fn parse_mosaic(spec: &str) -> Result<Mosaic> {
    let Some((id, amount)) = spec.split_once(':') else {
        bail!("mosaic {spec:?} must look like HEX_ID:AMOUNT");
    };
    let id = UInt64::from_hex(id).with_context(|| format!("invalid mosaic id in {spec:?}"))?;
    let amount: u64 = amount
        .parse()
        .with_context(|| format!("invalid amount in {spec:?}"))?;
    Ok(Mosaic::new(UnresolvedMosaicId::new(id.to_u64()), amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::NetworkArgs;
    use catapult_sdk::transaction::{
        sign_with_cosigners, verify_signed_transaction, SignedTransaction,
    };

    const SEED: &str = "787225AAFF3D2C71F4FFA32D4F19EC4922F3CD869747F267378F81F8E3FCB12D";

    fn transfer_args() -> TransferArgs {
        TransferArgs {
            network: NetworkArgs::default(),
            private_key: SEED.into(),
            recipient: "SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM".into(),
            mosaics: vec!["0DC67FBE1CAD29E3:10".into()],
            message: Some("hello".into()),
            deadline_secs: None,
        }
    }

    #[test]
    fn mosaic_id_with_known_nonce() {
        let value = mosaic_id(&MosaicIdArgs {
            owner: "4AFF7B4BA8C1C26A7917575993346627CB6C80DE62CD92F7F9AEDB7064A3DE62".into(),
            nonce: Some("B76FE378".into()),
        })
        .unwrap();
        assert_eq!(value["mosaicId"], "3AD842A8C0AFC518");
    }

    #[test]
    fn namespace_levels() {
        let value = namespace_id(&NamespaceIdArgs {
            path: "nem.subnem".into(),
        })
        .unwrap();
        let levels = value["levels"].as_array().unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0]["name"], "nem");
        assert_eq!(levels[0]["namespaceId"], "84B3552D375FFA4B");

        assert!(namespace_id(&NamespaceIdArgs { path: "a.b.c.d".into() }).is_err());
    }

    #[test]
    fn transfer_output_verifies() {
        let value = transfer(&transfer_args()).unwrap();
        let signed: SignedTransaction = serde_json::from_value(value).unwrap();
        let generation_hash: [u8; 32] = hex::decode(config::DEFAULT_GENERATION_HASH)
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(signed.network_type, NetworkType::MijinTest);
        assert!(verify_signed_transaction(&signed, &generation_hash).unwrap());
    }

    #[test]
    fn transfer_input_errors() {
        let args = TransferArgs {
            mosaics: vec!["nocolon".into()],
            ..transfer_args()
        };
        assert!(transfer(&args).is_err());

        let args = TransferArgs {
            private_key: "zz".into(),
            ..transfer_args()
        };
        assert!(transfer(&args).is_err());

        // Recipient on another network than the config selects.
        let args = TransferArgs {
            network: NetworkArgs {
                network: Some("mainnet".into()),
                ..NetworkArgs::default()
            },
            ..transfer_args()
        };
        assert!(transfer(&args).is_err());
    }

    #[test]
    fn transfer_to_alias() {
        let args = TransferArgs {
            recipient: "@nem.owner".into(),
            ..transfer_args()
        };
        assert!(transfer(&args).is_ok());
    }

    #[test]
    fn decode_round_trips_transfer_output() {
        let signed: SignedTransaction =
            serde_json::from_value(transfer(&transfer_args()).unwrap()).unwrap();
        let value = decode(&DecodeArgs {
            payload: signed.payload.clone(),
            embedded: false,
            generation_hash: Some(config::DEFAULT_GENERATION_HASH.into()),
        })
        .unwrap();
        assert_eq!(value["hash"], signed.hash.as_str());
        assert_eq!(value["size"], signed.payload.len() / 2);

        assert!(decode(&DecodeArgs {
            payload: "B1000000".into(),
            embedded: false,
            generation_hash: None,
        })
        .is_err());
    }

    #[test]
    fn decode_hash_of_cosigned_aggregate() {
        let generation_hash: [u8; 32] = hex::decode(config::DEFAULT_GENERATION_HASH)
            .unwrap()
            .try_into()
            .unwrap();
        let initiator = KeyPair::from_hex(SEED).unwrap();
        let cosigner = KeyPair::from_seed(&[2; 32]);
        let inner = TransactionFactory::new(NetworkType::MijinTest)
            .transfer()
            .recipient(Address::from_plain("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap())
            .build()
            .unwrap();
        let aggregate = TransactionFactory::new(NetworkType::MijinTest)
            .aggregate_complete()
            .inner_with_signer(inner, cosigner.public_key())
            .build()
            .unwrap();
        let signed =
            sign_with_cosigners(&aggregate, &initiator, &[&cosigner], &generation_hash).unwrap();

        let value = decode(&DecodeArgs {
            payload: signed.payload.clone(),
            embedded: false,
            generation_hash: Some(config::DEFAULT_GENERATION_HASH.into()),
        })
        .unwrap();
        assert_eq!(value["hash"], signed.hash.as_str());
    }

    #[test]
    fn keygen_address_matches_network() {
        let value = keygen(&KeygenArgs {
            network: "testnet".into(),
        })
        .unwrap();
        assert!(value["address"].as_str().unwrap().starts_with('T'));
        assert_eq!(value["publicKey"].as_str().unwrap().len(), 64);
    }
}
