//! # dedupchain
//!
//! Core library for priority-chain directory deduplication.
//!
//! Given an ordered list of directory trees, files in later trees that
//! duplicate a file at the same relative path in an earlier tree are
//! deleted according to a [`config::Policy`], and directories left empty
//! are pruned afterwards. Earlier trees are always authoritative.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the dedupchain library
pub mod error;

/// Content hashing, file stamps and the equality oracle
pub mod comparison;

/// Directory listing with hidden-entry filtering
pub mod scanner;

/// Job configuration, policy, validation and batch list files
pub mod config;

/// Tree comparison, pruning and priority-chain scheduling
pub mod dedup;
