//! # Core Chain Entities
//!
//! Blocks, headers, state-sync records and the lookup entries used by the
//! milestone and chain-store subsystems.
//!
//! ## Clusters
//!
//! - **Chain**: `BlockHeader`, `Block`
//! - **Bridge**: `StateSyncData`, `StateSyncReceipt`, `LogEntry`
//! - **Lookup**: `TxLookupEntry`

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// A 32-byte hash (Keccak-256).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Block height in the canonical chain.
pub type BlockNumber = u64;

/// Render a hash as lowercase hex without prefix.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Parse a hash from hex, with or without a `0x` prefix.
pub fn hash_from_hex(s: &str) -> Result<Hash, hex::FromHexError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s)?;
    if bytes.len() != 32 {
        return Err(hex::FromHexError::InvalidStringLength);
    }
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}

/// The header of a block containing chain linkage and commitment roots.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block height in the chain.
    pub number: BlockNumber,
    /// Hash of the parent block.
    pub parent_hash: Hash,
    /// Merkle root of the block's transactions.
    pub tx_root: Hash,
    /// Merkle root of the block's receipts.
    pub receipt_root: Hash,
    /// Root hash of the state trie after applying this block.
    pub state_root: Hash,
    /// Unix timestamp when the block was sealed.
    pub timestamp: u64,
}

impl BlockHeader {
    /// Keccak-256 commitment over the header fields.
    ///
    /// This is the block hash: every field participates, so two headers
    /// differing in any field hash differently.
    #[must_use]
    pub fn hash(&self) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(self.number.to_be_bytes());
        hasher.update(self.parent_hash);
        hasher.update(self.tx_root);
        hasher.update(self.receipt_root);
        hasher.update(self.state_root);
        hasher.update(self.timestamp.to_be_bytes());
        hasher.finalize().into()
    }
}

/// A sealed block.
///
/// Transactions bodies are omitted: the milestone subsystem only needs
/// header commitments and the canonical hash.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Block {
    /// The block header.
    pub header: BlockHeader,
}

impl Block {
    /// Build a block from its header.
    #[must_use]
    pub fn new(header: BlockHeader) -> Self {
        Self { header }
    }

    /// The block's canonical hash.
    #[must_use]
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// The block's height.
    #[must_use]
    pub fn number(&self) -> BlockNumber {
        self.header.number
    }
}

/// A log entry emitted by a state-sync execution.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LogEntry {
    /// Contract that emitted the log.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<Hash>,
    /// Unindexed payload.
    pub data: Vec<u8>,
}

/// A bridge record replayed from the validator layer into the chain.
///
/// State-sync records are committed at sprint boundaries in a synthetic
/// transaction appended after the block's regular transactions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StateSyncData {
    /// Monotonic record id assigned by the validator layer.
    pub id: u64,
    /// Target contract on this chain.
    pub contract: Address,
    /// ABI-encoded payload.
    pub data: Vec<u8>,
    /// Hash of the synthetic transaction carrying this record.
    pub tx_hash: Hash,
}

/// Receipt of the synthetic state-sync transaction of a block.
///
/// Stored out of band from regular receipts; absence means the block
/// committed no state-sync records, which is not an error.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StateSyncReceipt {
    /// Hash of the block the synthetic transaction was appended to.
    pub block_hash: Hash,
    /// Height of that block.
    pub block_number: BlockNumber,
    /// Hash of the synthetic transaction.
    pub tx_hash: Hash,
    /// Logs emitted while replaying the records.
    pub logs: Vec<LogEntry>,
    /// Whether the replay succeeded.
    pub success: bool,
}

/// Location of a state-sync transaction in the chain.
///
/// More than one entry may exist for the same transaction hash while
/// competing forks are alive; lookups qualified by block hash disambiguate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TxLookupEntry {
    /// The transaction hash.
    pub tx_hash: Hash,
    /// Hash of the containing block.
    pub block_hash: Hash,
    /// Height of the containing block.
    pub block_number: BlockNumber,
    /// Index of the transaction within the block.
    pub index: u64,
}
