//! Sprint root oracle: Keccak merkle commitment over a block range.

use async_trait::async_trait;
use sc_milestone::{ChainReader, OracleError, RootHashOracle};
use sha3::{Digest, Keccak256};
use shared_types::{Block, BlockNumber, Hash};
use std::sync::Arc;
use tracing::debug;

const ZERO_LEAF: Hash = [0u8; 32];

/// Computes the root over `[start, end]` as a merkle tree of per-block
/// leaves, padded with zero leaves to the next power of two.
///
/// The leaf commits to the block hash and both content roots, so the root
/// pins transactions and receipts as well as chain linkage. Pure over
/// chain state: the same canonical range always yields the same root.
pub struct SprintRootOracle<C: ChainReader> {
    chain: Arc<C>,
    max_range: u64,
}

impl<C: ChainReader> SprintRootOracle<C> {
    /// Create an oracle reading from `chain`, refusing ranges longer than
    /// `max_range` blocks.
    pub fn new(chain: Arc<C>, max_range: u64) -> Self {
        Self { chain, max_range }
    }

    fn leaf(block: &Block) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(block.hash());
        hasher.update(block.header.tx_root);
        hasher.update(block.header.receipt_root);
        hasher.finalize().into()
    }

    fn parent(left: &Hash, right: &Hash) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into()
    }

    fn merkle_root(mut layer: Vec<Hash>) -> Hash {
        let width = layer.len().next_power_of_two();
        layer.resize(width, ZERO_LEAF);

        while layer.len() > 1 {
            layer = layer
                .chunks(2)
                .map(|pair| Self::parent(&pair[0], &pair[1]))
                .collect();
        }
        layer[0]
    }
}

#[async_trait]
impl<C: ChainReader + 'static> RootHashOracle for SprintRootOracle<C> {
    async fn compute_root(
        &self,
        start: BlockNumber,
        end: BlockNumber,
    ) -> Result<Hash, OracleError> {
        if start > end {
            return Err(OracleError::InvertedRange { start, end });
        }
        let len = end - start + 1;
        if len > self.max_range {
            return Err(OracleError::RangeTooLarge {
                len,
                cap: self.max_range,
            });
        }

        let mut leaves = Vec::with_capacity(len as usize);
        for number in start..=end {
            let block = self
                .chain
                .block_by_number(number)
                .await
                .ok_or(OracleError::MissingBlock(number))?;
            leaves.push(Self::leaf(&block));
        }

        let root = Self::merkle_root(leaves);
        debug!(start, end, root = %hex::encode(root), "sprint root computed");
        Ok(root)
    }
}
