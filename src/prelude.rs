//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use account_listing_helper::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{AlhError, Result};

// Extraction
pub use crate::extract::{AccountRecord, extract_record};

// Assembly
pub use crate::assemble::{FileSource, FsFileSource, parse_account_data, parse_account_dir};

// Listing
pub use crate::listing::{AutofillOptions, AutofillOutcome, ListingForm, autofill_listing};
pub use crate::listing::description::generate_description;
pub use crate::listing::title::{TitlePacking, generate_title};

// Usage
pub use crate::usage::UsageTracker;
pub use crate::usage::store::{JsonFileStore, MemoryStore, UsageCounters, UsageStore};

// Registry
pub use crate::registry::{
    Account, AccountRegistry, AccountStatus, DirectorySource, FsDirectorySource, PathMemory,
};
