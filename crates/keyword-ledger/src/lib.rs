//! Weighted keyword dictionaries used by the hierarchical sentiment scorer.
//!
//! Two documents feed the ledger: a general one keyed by evidence tier
//! (`concretas`, `qualitativas`) plus the override phrase lists, and a
//! sectoral one keyed by sector and subsector. Both are parsed leniently:
//! anything with the wrong shape is dropped with a [`LoadWarning`] and the
//! affected tier simply contributes no evidence.
//!
//! Matching is plain substring search over normalized text. A short term
//! also matches inside longer unrelated words (`"alta"` inside
//! `"salta"`), which is a known source of false positives.

pub mod error;
pub mod ledger;
pub mod tables;

pub use error::{LedgerError, LoadWarning};
pub use ledger::KeywordLedger;
pub use tables::{GeneralTable, Polarity, PolarityBuckets, SectorTable, Tier};
