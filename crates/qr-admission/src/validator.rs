//! # Block Validator
//!
//! The admission decision itself: body validation (commitment
//! consistency), state validation (execution outputs against header
//! declarations) and miner validation (one transition of the rotating
//! leader protocol). Chain-acceptance logic calls the three checks in
//! order and short-circuits on the first typed rejection.

use crate::domain::{
    calc_next_qr, elected_index, eligibility_level, rotation_counter, AdmissionConfig,
    AdmissionError, AdmissionResult,
};
use crate::ports::{ChainIndex, ConsensusEngine, MinerRegistryView, MinerStatus, StateSnapshot};
use qr_crypto::verify_seal_signature;
use shared_types::{
    log_bloom, receipts_root, transactions_root, uncles_root, Block, EntityError, Receipt,
    GENESIS_QR,
};
use std::sync::Arc;
use tracing::debug;

/// Validates candidate blocks against the canonical chain. Safe for
/// re-use across blocks; holds no per-block state.
pub struct BlockValidator {
    config: AdmissionConfig,
    chain: Arc<dyn ChainIndex>,
    engine: Arc<dyn ConsensusEngine>,
    registry: Arc<dyn MinerRegistryView>,
}

impl BlockValidator {
    pub fn new(
        config: AdmissionConfig,
        chain: Arc<dyn ChainIndex>,
        engine: Arc<dyn ConsensusEngine>,
        registry: Arc<dyn MinerRegistryView>,
    ) -> Self {
        Self {
            config,
            chain,
            engine,
            registry,
        }
    }

    /// Validate the block's body: linkage into the chain, uncle legality
    /// via the consensus engine, and the header's uncle/transaction
    /// commitments. Headers are assumed to be pre-validated upstream.
    pub fn validate_body(&self, block: &Block) -> AdmissionResult<()> {
        // Known blocks short-circuit; re-validation is redundant.
        if self
            .chain
            .has_block_and_state(&block.hash(), block.number())
        {
            return Err(AdmissionError::KnownBlock);
        }
        let parent_number = block.number().saturating_sub(1);
        if !self
            .chain
            .has_block_and_state(&block.parent_hash(), parent_number)
        {
            if !self.chain.has_block(&block.parent_hash(), parent_number) {
                return Err(AdmissionError::UnknownAncestor);
            }
            return Err(AdmissionError::PrunedAncestor);
        }

        let state = self
            .chain
            .current_state()
            .ok_or(AdmissionError::PrunedAncestor)?;
        self.engine.verify_uncles(&*self.chain, block, &*state)?;

        let uncle_root = uncles_root(&block.uncles);
        if uncle_root != block.header.uncle_root {
            return Err(AdmissionError::UncleRootMismatch {
                have: uncle_root,
                want: block.header.uncle_root,
            });
        }
        let tx_root = transactions_root(&block.transactions);
        if tx_root != block.header.tx_root {
            return Err(AdmissionError::TxRootMismatch {
                have: tx_root,
                want: block.header.tx_root,
            });
        }
        Ok(())
    }

    /// Validate the changes that happen after a state transition: gas
    /// consumed, the aggregate log bloom, the receipt commitment and the
    /// post-execution state root.
    pub fn validate_state(
        &self,
        block: &Block,
        _parent: &Block,
        state: &dyn StateSnapshot,
        receipts: &[Receipt],
        used_gas: u64,
    ) -> AdmissionResult<()> {
        let header = &block.header;
        if header.gas_used != used_gas {
            return Err(AdmissionError::GasUsedMismatch {
                have: used_gas,
                want: header.gas_used,
            });
        }
        let bloom = log_bloom(receipts);
        if bloom != header.bloom {
            return Err(AdmissionError::BloomMismatch {
                have: bloom,
                want: header.bloom,
            });
        }
        let receipt_root = receipts_root(receipts);
        if receipt_root != header.receipt_root {
            return Err(AdmissionError::ReceiptRootMismatch {
                have: receipt_root,
                want: header.receipt_root,
            });
        }
        let state_root = state.intermediate_root(self.config.is_state_fork(header.number));
        if state_root != header.state_root {
            return Err(AdmissionError::StateRootMismatch {
                have: state_root,
                want: header.state_root,
            });
        }
        Ok(())
    }

    /// Validate one transition of the rotating-leader protocol: was the
    /// coinbase the legitimately elected miner for this slot, and are the
    /// declared primary-miner and difficulty-level fields consistent with
    /// the rotation? Every gate is hard; the first failure is final.
    pub fn validate_miner(
        &self,
        block: &Block,
        parent: &Block,
        state: &dyn StateSnapshot,
    ) -> AdmissionResult<()> {
        let header = &block.header;

        // 1. Minimum inter-block timing.
        let interval = header.timestamp.saturating_sub(parent.timestamp());
        if interval < self.config.min_block_interval {
            return Err(AdmissionError::BlockTooFast {
                interval,
                min: self.config.min_block_interval,
            });
        }

        // 2. Registry size; an empty registry means the chain is
        //    bootstrapping and the sequence checks have nothing to say.
        let total = self.registry.miner_count(state);

        // 3. Registration standing of the claimed miner.
        if total != 0 {
            match self.registry.miner_status(state, &header.coinbase) {
                MinerStatus::Active => {}
                MinerStatus::Punished => {
                    return Err(AdmissionError::MinerPunished(header.coinbase))
                }
                MinerStatus::Unregistered => {
                    return Err(AdmissionError::MinerNotRegistered(header.coinbase))
                }
            }
        }

        // 4. Rotation steps the elapsed time allows.
        let rotation = rotation_counter(header.timestamp, parent.timestamp(), self.config.block_slot);

        // 5. Expected QR for this round, chaining off the parent's seal
        //    (the genesis constant seeds block 1).
        let prev_qr = if header.number == 1 {
            GENESIS_QR
        } else {
            parent.header.qr_seal().map_err(seal_error)?.qr
        };
        let qr = calc_next_qr(&parent.coinbase(), header.number, &prev_qr);

        // 6. The candidate's seal must carry exactly that QR, signed by
        //    the coinbase. Length is checked before any cryptography.
        if header.number > 1 {
            let seal = header.qr_seal().map_err(seal_error)?;
            if seal.qr != qr {
                return Err(AdmissionError::QrMismatch {
                    have: seal.qr,
                    want: qr,
                });
            }
            if !verify_seal_signature(&seal.signature, &qr, &header.coinbase) {
                debug!(number = header.number, "qr seal signature rejected");
                return Err(AdmissionError::InvalidQrSignature);
            }
        }

        // 7. Leader-sequence validity and the earned eligibility level.
        let level = if total == 0 {
            0
        } else {
            eligibility_level(&header.coinbase, &qr, total, rotation, |index| {
                self.registry.miner_address(state, index)
            })
            .ok_or(AdmissionError::InvalidMiner(header.coinbase))?
        };

        // 8. Primary-miner continuity with the previous round's leader.
        if total != 0 {
            let pre_miner_id = elected_index(&prev_qr, total);
            let want = self
                .registry
                .miner_address(state, pre_miner_id)
                .ok_or_else(|| {
                    AdmissionError::Registry(format!("no miner at index {pre_miner_id}"))
                })?;
            if header.primary_miner != want {
                return Err(AdmissionError::PrimaryMinerMismatch {
                    have: header.primary_miner,
                    want,
                });
            }
        }

        // 9. Difficulty-level policy: block 1 declares exactly zero;
        //    later blocks may not claim a higher level than earned.
        if header.number == 1 {
            if header.difficulty_level != 0 {
                return Err(AdmissionError::DifficultyLevelMismatch {
                    have: header.difficulty_level,
                    want: 0,
                });
            }
        } else if header.difficulty_level > level {
            return Err(AdmissionError::DifficultyLevelMismatch {
                have: header.difficulty_level,
                want: level,
            });
        }

        Ok(())
    }
}

fn seal_error(err: EntityError) -> AdmissionError {
    match err {
        EntityError::QrSealLength { have, expected } => {
            AdmissionError::QrSealLength { have, expected }
        }
    }
}
