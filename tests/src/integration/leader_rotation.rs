//! # Leader Rotation Integration
//!
//! Sequence abuse against the miner gate: out-of-turn sealing, forged
//! seals, difficulty-level claims and primary-miner continuity, all with
//! real keys and real registry lookups.

#[cfg(test)]
mod tests {
    use crate::fixtures::{sign_digest, TestChain};
    use qr_admission::{elected_index, AdmissionError};
    use shared_types::QrSeal;

    // =========================================================================
    // ROTATION TOLERANCE
    // =========================================================================

    #[test]
    fn each_missed_slot_admits_the_next_miner_in_the_schedule() {
        let mut chain = TestChain::new(6);
        chain.advance(0);
        let parent = chain.tip.clone();

        for steps in 0..6u64 {
            let block = chain.seal_child(&parent, steps);
            assert_eq!(
                chain.validator.validate_miner(&block, &parent, &*chain.state),
                Ok(()),
                "steps={steps}"
            );
        }
    }

    #[test]
    fn out_of_turn_miner_is_rejected_until_its_slot_arrives() {
        let mut chain = TestChain::new(6);
        chain.advance(0);
        let parent = chain.tip.clone();

        // Sealed by the miner two slots down the schedule, but stamped as
        // if sealed immediately.
        let mut block = chain.seal_child(&parent, 2);
        block.header.timestamp = parent.timestamp() + chain.config.min_block_interval;
        block.header.difficulty_level = 0;

        assert_eq!(
            chain.validator.validate_miner(&block, &parent, &*chain.state),
            Err(AdmissionError::InvalidMiner(block.coinbase()))
        );

        // With the honest timestamp the same miner is admitted.
        let honest = chain.seal_child(&parent, 2);
        assert_eq!(
            chain.validator.validate_miner(&honest, &parent, &*chain.state),
            Ok(())
        );
    }

    #[test]
    fn stranger_never_becomes_eligible_no_matter_how_late() {
        let mut chain = TestChain::new(4);
        chain.advance(0);
        let parent = chain.tip.clone();

        let mut block = chain.seal_child(&parent, 0);
        // Very late, from an address outside the registry.
        block.header.timestamp = parent.timestamp() + chain.config.block_slot * 1000;
        block.header.coinbase = [0x77; 20];

        assert_eq!(
            chain.validator.validate_miner(&block, &parent, &*chain.state),
            Err(AdmissionError::MinerNotRegistered([0x77; 20]))
        );
    }

    #[test]
    fn block_sealed_inside_the_minimum_interval_is_rejected() {
        let chain = TestChain::new(4);
        let mut block = chain.seal_child(&chain.tip, 0);
        block.header.timestamp = chain.tip.timestamp() + chain.config.min_block_interval - 1;
        assert!(matches!(
            chain.validator.validate_miner(&block, &chain.tip, &*chain.state),
            Err(AdmissionError::BlockTooFast { .. })
        ));
    }

    // =========================================================================
    // SEAL INTEGRITY
    // =========================================================================

    #[test]
    fn seal_signed_by_a_different_registered_miner_is_rejected() {
        let mut chain = TestChain::new(4);
        chain.advance(0);
        let parent = chain.tip.clone();
        let mut block = chain.seal_child(&parent, 0);

        let seal = QrSeal::from_bytes(&block.header.miner_qr_seal).unwrap();
        let other = chain
            .miners
            .addresses
            .iter()
            .find(|a| **a != block.coinbase())
            .copied()
            .unwrap();
        let forged = QrSeal {
            signature: sign_digest(chain.miners.key_for(&other), &seal.qr),
            qr: seal.qr,
        };
        block.header.miner_qr_seal = forged.to_bytes();

        assert_eq!(
            chain.validator.validate_miner(&block, &parent, &*chain.state),
            Err(AdmissionError::InvalidQrSignature)
        );
    }

    #[test]
    fn garbage_seal_bytes_are_a_verdict_not_a_panic() {
        let mut chain = TestChain::new(4);
        chain.advance(0);
        let parent = chain.tip.clone();

        // Right length, meaningless contents.
        let mut block = chain.seal_child(&parent, 0);
        let qr = QrSeal::from_bytes(&block.header.miner_qr_seal).unwrap().qr;
        block.header.miner_qr_seal = QrSeal {
            signature: [0xFF; 65],
            qr,
        }
        .to_bytes();

        assert_eq!(
            chain.validator.validate_miner(&block, &parent, &*chain.state),
            Err(AdmissionError::InvalidQrSignature)
        );
    }

    // =========================================================================
    // DECLARED FIELDS
    // =========================================================================

    #[test]
    fn difficulty_level_may_be_understated_but_never_overstated() {
        let mut chain = TestChain::new(8);
        chain.advance(0);
        let parent = chain.tip.clone();

        let mut humble = chain.seal_child(&parent, 3);
        humble.header.difficulty_level = 1;
        assert_eq!(
            chain.validator.validate_miner(&humble, &parent, &*chain.state),
            Ok(())
        );

        let mut greedy = chain.seal_child(&parent, 3);
        greedy.header.difficulty_level = 4;
        assert_eq!(
            chain.validator.validate_miner(&greedy, &parent, &*chain.state),
            Err(AdmissionError::DifficultyLevelMismatch { have: 4, want: 3 })
        );
    }

    #[test]
    fn primary_miner_must_name_the_previous_rounds_leader() {
        let mut chain = TestChain::new(5);
        chain.advance(0);
        let parent = chain.tip.clone();

        let prev_qr = chain.prev_qr(&parent);
        let expected =
            chain.miners.addresses[elected_index(&prev_qr, chain.miners.len()) as usize];

        let block = chain.seal_child(&parent, 0);
        assert_eq!(block.header.primary_miner, expected);

        let mut wrong = block.clone();
        wrong.header.primary_miner = [0x42; 20];
        assert_eq!(
            chain.validator.validate_miner(&wrong, &parent, &*chain.state),
            Err(AdmissionError::PrimaryMinerMismatch {
                have: [0x42; 20],
                want: expected
            })
        );
    }

    #[test]
    fn first_block_declares_difficulty_zero() {
        let chain = TestChain::new(4);
        let mut block = chain.seal_child(&chain.tip, 0);
        block.header.difficulty_level = 2;
        assert_eq!(
            chain.validator.validate_miner(&block, &chain.tip, &*chain.state),
            Err(AdmissionError::DifficultyLevelMismatch { have: 2, want: 0 })
        );
    }
}
