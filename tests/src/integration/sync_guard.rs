//! Finality floor versus sync pivots.

#[cfg(test)]
mod tests {
    use crate::integration::{test_block, test_node};
    use shared_bus::{ChainEvent, HeadChangeKind};
    use shared_types::{Block, BlockHeader};
    use std::time::Duration;
    use tokio::time::timeout;

    fn fork_block(number: u64) -> Block {
        Block::new(BlockHeader {
            number,
            state_root: [0xfa; 32],
            ..BlockHeader::default()
        })
    }

    #[tokio::test]
    async fn test_confirmed_milestone_pins_the_floor() {
        let node = test_node(200).await;
        let root = node.backend.root_hash(100, 200).await.unwrap();
        assert!(node
            .backend
            .vote_on_root_hash(100, 200, &root, "m1")
            .await
            .unwrap());

        // Pivots at or below the confirmed end block are refused
        assert!(!node.lock.can_pivot_to(150));
        assert!(!node.lock.can_pivot_to(200));
        assert!(node.lock.can_pivot_to(201));
    }

    #[tokio::test]
    async fn test_reorg_above_floor_is_observable() {
        let node = test_node(200).await;
        let root = node.backend.root_hash(1, 150).await.unwrap();
        assert!(node
            .backend
            .vote_on_root_hash(1, 150, &root, "m1")
            .await
            .unwrap());

        let mut heads = node.backend.subscribe_chain_head();

        // Rewind to 180, comfortably above the floor at 150
        assert!(node.lock.can_pivot_to(180));
        node.store
            .reorg_to((180..=205).map(fork_block).collect())
            .await;

        let event = timeout(Duration::from_millis(100), heads.recv())
            .await
            .expect("timeout")
            .expect("event");
        match event {
            ChainEvent::HeadChanged {
                kind,
                head_number,
                old_chain,
                ..
            } => {
                assert_eq!(kind, HeadChangeKind::Reorg);
                assert_eq!(head_number, 205);
                // Blocks 180..=200 of the old branch were displaced
                assert_eq!(old_chain.len(), 21);
                assert_eq!(old_chain[0], test_block(180).hash());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_verification_against_post_reorg_chain() {
        let node = test_node(100).await;

        // A fork replaces the suffix before any milestone lands
        node.store
            .reorg_to((90..=110).map(fork_block).collect())
            .await;

        // The root now commits to the fork blocks, and the recorded floor
        // carries the post-reorg hash of block 110
        let root = node.backend.root_hash(80, 110).await.unwrap();
        assert!(node
            .backend
            .vote_on_root_hash(80, 110, &root, "m1")
            .await
            .unwrap());

        let floor = node.backend.finality_floor().unwrap();
        assert_eq!(floor.block_hash, fork_block(110).hash());
    }
}
