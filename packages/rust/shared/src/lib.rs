//! Shared types, error model, and configuration for orgchain.
//!
//! This crate is the foundation depended on by the other orgchain crates.
//! It provides:
//! - [`OrgChainError`], the unified error type
//! - Domain types ([`EmployeeRecord`], [`CommunicationChain`], [`ChainLink`])
//! - Configuration ([`AppConfig`] and its policy enums, config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, HierarchyConfig, InputConfig, InputFormat, NameMatching, OutputConfig,
    OutputStyle, QueryConfig, RedeclarationPolicy, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{OrgChainError, Result};
pub use types::{ChainLink, CommunicationChain, EmployeeRecord};
