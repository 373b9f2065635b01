#![forbid(unsafe_code)]

//! Account Listing Helper (alh) — turns raw account dump folders into
//! marketplace-ready listings.
//!
//! Pipeline stages:
//! 1. **Registry** — enumerate account subfolders under a base directory
//! 2. **Assembler** — read and concatenate the `.txt` dumps of one account
//! 3. **Extractor** — regex field extraction over the combined text
//! 4. **Listing generator** — 128-char packed title + fixed description
//! 5. **Usage tracker** — scarcity ranking so rarely-featured names surface first
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use account_listing_helper::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use account_listing_helper::core::config::Config;
//! use account_listing_helper::listing::autofill_listing;
//! ```

pub mod prelude;

pub mod assemble;
pub mod core;
pub mod extract;
pub mod listing;
pub mod logger;
pub mod registry;
pub mod usage;
