//! Benefits Tracker - supplementary health insurance budget tracking
//!
//! Tracks invoices against the benefit categories of a supplementary health
//! insurance plan. Each category reimburses a fixed share of every invoice up
//! to a budget cap that renews yearly, every three calendar-aligned years, or
//! never.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, entries, renewal periods)
//! - `storage`: JSON file storage layer
//! - `services`: Ledger, reimbursement calculator, invoice interpreter and
//!   the submission flow
//! - `ocr`: Text recognition boundary for scanned invoices
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `benefits` binary
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use benefits::config::paths::BenefitPaths;
//! use benefits::models::ExpenseDraft;
//! use benefits::services::ExpenseService;
//! use benefits::storage::{initialize_storage, Storage};
//!
//! let paths = BenefitPaths::new()?;
//! initialize_storage(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let today = chrono::Local::now().date_naive();
//! let draft = ExpenseDraft::new(today, "sehhilfen", "Brille", "500".parse()?);
//! let entry = ExpenseService::new(&storage).submit(draft, today)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod ocr;
pub mod services;
pub mod storage;

pub use error::BenefitError;
