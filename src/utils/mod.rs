//! Utility functions shared by the conditioning and reconciliation code.

pub mod stats;
