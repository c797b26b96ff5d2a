//! # Admission Pipeline Integration
//!
//! Drives candidate blocks through all three checks in pipeline order,
//! the way chain-acceptance code consumes the validator:
//!
//! 1. `validate_body`: linkage and body commitments
//! 2. `validate_state`: execution outputs against header declarations
//! 3. `validate_miner`: one transition of the rotating leader protocol

#[cfg(test)]
mod tests {
    use crate::fixtures::{sample_receipt, sample_transaction, TestChain};
    use qr_admission::{AdmissionError, StateSnapshot};
    use shared_types::{keccak256, Block, Receipt};

    /// Run the full pipeline exactly as chain acceptance would.
    fn admit(chain: &TestChain, block: &Block, parent: &Block, receipts: &[Receipt]) -> Result<(), AdmissionError> {
        chain.validator.validate_body(block)?;
        let used_gas = receipts.last().map_or(0, |r| r.cumulative_gas_used);
        chain
            .validator
            .validate_state(block, parent, &*chain.state, receipts, used_gas)?;
        chain.validator.validate_miner(block, parent, &*chain.state)
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn sealed_chain_is_admitted_block_by_block() {
        let mut chain = TestChain::new(5);
        for _ in 0..4 {
            let parent = chain.tip.clone();
            let block = chain.seal_child(&parent, 0);
            assert_eq!(admit(&chain, &block, &parent, &[]), Ok(()));
            chain.advance(0);
        }
    }

    #[test]
    fn non_empty_body_is_admitted_with_matching_receipts() {
        let mut chain = TestChain::new(5);
        chain.advance(0);

        let parent = chain.tip.clone();
        let transactions = vec![sample_transaction(0), sample_transaction(1)];
        let receipts = vec![sample_receipt(21_000), sample_receipt(42_000)];
        let block = chain.seal_child_with(&parent, 0, transactions, &receipts);

        assert_eq!(admit(&chain, &block, &parent, &receipts), Ok(()));
    }

    // =========================================================================
    // BODY REJECTIONS
    // =========================================================================

    #[test]
    fn already_imported_block_is_not_revalidated() {
        let mut chain = TestChain::new(3);
        let parent = chain.tip.clone();
        let block = chain.advance(0);
        assert_eq!(
            admit(&chain, &block, &parent, &[]),
            Err(AdmissionError::KnownBlock)
        );
    }

    #[test]
    fn orphan_block_is_rejected_before_any_other_check() {
        let chain = TestChain::new(3);
        let mut block = chain.seal_child(&chain.tip, 0);
        block.header.parent_hash = keccak256(b"never imported");
        assert_eq!(
            chain.validator.validate_body(&block),
            Err(AdmissionError::UnknownAncestor)
        );
    }

    #[test]
    fn pruned_parent_state_is_a_distinct_verdict() {
        let mut chain = TestChain::new(3);
        let b1 = chain.advance(0);
        let b2 = chain.seal_child(&b1, 0);

        chain.chain.prune_state(b1.hash(), b1.number());
        assert_eq!(
            chain.validator.validate_body(&b2),
            Err(AdmissionError::PrunedAncestor)
        );
    }

    #[test]
    fn body_not_matching_declared_tx_root_is_rejected() {
        let chain = TestChain::new(3);
        let mut block = chain.seal_child(&chain.tip, 0);
        // Body altered after sealing.
        block.transactions.push(sample_transaction(9));
        assert!(matches!(
            chain.validator.validate_body(&block),
            Err(AdmissionError::TxRootMismatch { .. })
        ));
    }

    // =========================================================================
    // STATE REJECTIONS
    // =========================================================================

    #[test]
    fn receipts_that_disagree_with_the_header_are_rejected_in_order() {
        let mut chain = TestChain::new(3);
        chain.advance(0);
        let parent = chain.tip.clone();

        let transactions = vec![sample_transaction(0)];
        let sealed_receipts = vec![sample_receipt(21_000)];
        let block = chain.seal_child_with(&parent, 0, transactions, &sealed_receipts);

        // Gas disagreement is reported before any commitment is checked.
        let wrong_gas = vec![sample_receipt(30_000)];
        assert_eq!(
            chain
                .validator
                .validate_state(&block, &parent, &*chain.state, &wrong_gas, 30_000),
            Err(AdmissionError::GasUsedMismatch {
                have: 30_000,
                want: 21_000
            })
        );

        // Same cumulative gas but a different receipt body: the root check
        // catches it.
        let mut wrong_root = vec![sample_receipt(21_000)];
        wrong_root[0].status = 0;
        assert!(matches!(
            chain
                .validator
                .validate_state(&block, &parent, &*chain.state, &wrong_root, 21_000),
            Err(AdmissionError::ReceiptRootMismatch { .. })
        ));
    }

    #[test]
    fn foreign_state_root_is_rejected() {
        let chain = TestChain::new(3);
        let parent = chain.tip.clone();
        let mut block = chain.seal_child(&parent, 0);
        block.header.state_root = keccak256(b"some other chain");
        assert!(matches!(
            chain
                .validator
                .validate_state(&block, &parent, &*chain.state, &[], 0),
            Err(AdmissionError::StateRootMismatch { .. })
        ));
    }

    #[test]
    fn state_fork_height_switches_the_expected_root() {
        let config = qr_admission::AdmissionConfig {
            state_fork_height: Some(2),
            ..Default::default()
        };
        let mut chain = TestChain::with_config(3, config);
        // Block 1 validates under legacy rules, block 2 under the fork.
        let b1 = chain.advance(0);
        assert_eq!(
            b1.header.state_root,
            chain.state.intermediate_root(false)
        );

        let parent = chain.tip.clone();
        let b2 = chain.seal_child(&parent, 0);
        assert_eq!(b2.header.state_root, chain.state.intermediate_root(true));
        assert_eq!(
            chain
                .validator
                .validate_state(&b2, &parent, &*chain.state, &[], 0),
            Ok(())
        );
    }

    // =========================================================================
    // MINER REJECTIONS SURFACE THROUGH THE PIPELINE
    // =========================================================================

    #[test]
    fn punished_miner_fails_the_pipeline_at_the_miner_stage() {
        let chain = TestChain::new(3);
        let parent = chain.tip.clone();
        let block = chain.seal_child(&parent, 0);

        chain.registry.punish(block.coinbase());

        // Body and state still pass; the miner gate is what rejects.
        assert_eq!(chain.validator.validate_body(&block), Ok(()));
        assert_eq!(
            admit(&chain, &block, &parent, &[]),
            Err(AdmissionError::MinerPunished(block.coinbase()))
        );
    }

    #[test]
    fn verdicts_are_stable_across_repeated_validation() {
        let mut chain = TestChain::new(4);
        chain.advance(0);
        let parent = chain.tip.clone();
        let block = chain.seal_child(&parent, 1);

        let first = admit(&chain, &block, &parent, &[]);
        for _ in 0..20 {
            assert_eq!(admit(&chain, &block, &parent, &[]), first);
        }
    }
}
