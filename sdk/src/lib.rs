// Copyright (c) 2026 Catapult SDK Contributors. MIT License.
// See LICENSE for details.

//! # Catapult SDK: Transaction Layer
//!
//! Client-side construction, encoding and signing of transactions for
//! Catapult-style networks. Everything here runs in memory: nothing in this
//! crate talks to a node. You build a [`transaction::Transaction`], serialize
//! it to catbuffer bytes, sign it, and hand the resulting
//! [`transaction::SignedTransaction`] payload to whatever client submits it.
//!
//! ## Architecture
//!
//! - **config**: Wire constants and network parameters.
//! - **uint64**: The `(low, high)` word-pair bridge for 64-bit quantities.
//! - **crypto**: SHA3-256, Ed25519 key pairs, the [`crypto::Signer`] seam.
//! - **codec**: Little-endian cursor reader/writer and the `WireFormat` trait.
//! - **id**: Deterministic mosaic and namespace identifiers.
//! - **model**: Value types shared by transaction bodies.
//! - **transaction**: Transactions, bodies, builders, serializer, signing,
//!   aggregates and cosignatures.
//!
//! ## Ground rules
//!
//! 1. Every codec operation is a pure function over owned buffers.
//! 2. Sizes are derived on encode, never trusted as stored state.
//! 3. Invalid input fails the call. Nothing is silently truncated or padded.
//!
//! ## Example
//!
//! ```
//! use catapult_sdk::crypto::KeyPair;
//! use catapult_sdk::model::{Address, Deadline, Message, Mosaic, MosaicId, NetworkType};
//! use catapult_sdk::transaction::{sign, TransferBuilder};
//!
//! let network = NetworkType::MijinTest;
//! let sender = KeyPair::from_seed(&[7u8; 32]);
//! let recipient = Address::from_public_key(&KeyPair::from_seed(&[9u8; 32]).public_key(), network);
//!
//! let tx = TransferBuilder::new(network)
//!     .recipient(recipient)
//!     .mosaic(Mosaic::new(MosaicId::new(0x0DC6_7FBE_1CAD_29E3).unwrap(), 1_000_000))
//!     .message(Message::plain("hello"))
//!     .deadline(Deadline::from_epoch_millis(3_600_000))
//!     .build()
//!     .unwrap();
//!
//! let generation_hash = [0x57u8; 32];
//! let signed = sign(&tx, &sender, &generation_hash).unwrap();
//! assert_eq!(signed.hash.len(), 64);
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod id;
pub mod model;
pub mod transaction;
pub mod uint64;

pub use uint64::UInt64;
