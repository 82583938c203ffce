//! # kubeenv
//!
//! kubeenv keeps a directory of named kubeconfig files ("environments") and
//! lets one host juggle them: import contexts from an existing kubeconfig,
//! switch into a shell bound to one environment, rename, list and delete.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Parses arguments, prints results, owns the exit code     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Facade over commands, carries startup configuration      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - One operation per module, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/) + documents (document.rs) + shell (shell.rs)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or calls
//! `std::process::exit`. The only process-level side effect, replacing the
//! current process with a shell on `switch`, sits behind the
//! [`shell::ShellLauncher`] trait so tests can record it instead.
//!
//! ## Active environment
//!
//! `switch` exports `KUBEENV` (name) and `KUBECONFIG` (absolute path) into
//! the new shell. Later invocations read them once at startup into
//! [`config::KubeenvConfig::active`]; nothing else tracks which environment
//! is active.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade every client goes through
//! - [`commands`]: business logic per operation
//! - [`store`]: environment storage abstraction and implementations
//! - [`document`]: kubeconfig document model and the import merge helpers
//! - [`config`]: startup configuration from environment variables
//! - [`shell`]: interactive session launching
//! - [`model`]: environment names and the active-environment pair
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod shell;
pub mod store;
