//! Listing generation: title packing, description template, autofill.

pub mod description;
pub mod title;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use description::generate_description;
pub use title::{CHAMPION_FEATURE_CAP, MAX_TITLE_CHARS, TitlePacking, generate_title};

use crate::assemble::{self, FileSource};
use crate::core::errors::Result;
use crate::usage::{UsageStore, UsageTracker};

/// A filled marketplace listing form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
}

/// Result of one autofill run: the filled form plus the names the title
/// packer actually fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutofillOutcome {
    pub form: ListingForm,
    pub skins_featured: Vec<String>,
    pub champions_featured: Vec<String>,
}

/// Knobs for one autofill run.
#[derive(Debug, Clone, Copy)]
pub struct AutofillOptions {
    /// Order title candidates scarcest-first instead of extraction order.
    pub rank_by_scarcity: bool,
    /// Bump usage counters for the champions the title actually featured.
    pub record_usage: bool,
}

impl Default for AutofillOptions {
    fn default() -> Self {
        Self {
            rank_by_scarcity: true,
            record_usage: false,
        }
    }
}

/// Parse one account folder and fill the listing form.
///
/// Only the title consults the scarcity ranking; the description always
/// presents the lists in extraction order. The one fatal condition is an
/// account folder with no readable content, propagated from the assembler.
pub fn autofill_listing<F, S>(
    source: &F,
    dir: &Path,
    tracker: &mut UsageTracker<S>,
    options: AutofillOptions,
) -> Result<AutofillOutcome>
where
    F: FileSource,
    S: UsageStore,
{
    let record = assemble::parse_account_dir(source, dir)?;

    let (skins, champions) = if options.rank_by_scarcity {
        (
            tracker.rank_by_scarcity(&record.skin_list),
            tracker.rank_by_scarcity(&record.champion_list),
        )
    } else {
        (record.skin_list.clone(), record.champion_list.clone())
    };

    let packing = generate_title(&record, &skins, &champions);
    let description = generate_description(&record);

    if options.record_usage && !packing.champions_used.is_empty() {
        tracker.record(&packing.champions_used);
    }

    info!(
        account = %dir.display(),
        title_chars = packing.title.chars().count(),
        skins_used = packing.skins_used.len(),
        champions_used = packing.champions_used.len(),
        "autofilled listing"
    );

    Ok(AutofillOutcome {
        form: ListingForm {
            title: packing.title,
            description,
        },
        skins_featured: packing.skins_used,
        champions_featured: packing.champions_used,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::MemoryStore;

    fn account_dir(content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("dump.txt"), content).expect("write dump");
        dir
    }

    const DUMP: &str = "\
Server - EUW
Level - 57
Champions - 43
List of Champions: Ahri, Lux, Zed.
List of Skins:
";

    #[test]
    fn autofill_fills_title_and_description() {
        let dir = account_dir(DUMP);
        let mut tracker = UsageTracker::load(MemoryStore::new());
        let outcome = autofill_listing(
            &assemble::FsFileSource,
            dir.path(),
            &mut tracker,
            AutofillOptions::default(),
        )
        .expect("autofill");
        assert!(
            outcome
                .form
                .title
                .starts_with("[EUW ⍜] - [57 LVL | 43 Champions")
        );
        assert!(outcome.form.description.contains("◉ Level - 57"));
        assert_eq!(outcome.champions_featured, vec!["Ahri", "Lux", "Zed"]);
        assert!(outcome.skins_featured.is_empty());
    }

    #[test]
    fn ranking_reorders_the_title_but_not_the_description() {
        let dir = account_dir(DUMP);
        let mut tracker = UsageTracker::load(MemoryStore::new());
        tracker.record(["Ahri", "Ahri", "Lux"]);

        let outcome = autofill_listing(
            &assemble::FsFileSource,
            dir.path(),
            &mut tracker,
            AutofillOptions {
                rank_by_scarcity: true,
                record_usage: false,
            },
        )
        .expect("autofill");

        // Zed is unseen, so it leads the title candidates.
        assert!(
            outcome
                .form
                .title
                .contains("Champions | Zed | Lux | Ahri |")
        );
        assert!(outcome.form.description.contains("Ahri, Lux, Zed."));
    }

    #[test]
    fn no_ranking_keeps_extraction_order() {
        let dir = account_dir(DUMP);
        let mut tracker = UsageTracker::load(MemoryStore::new());
        tracker.record(["Ahri", "Ahri"]);

        let outcome = autofill_listing(
            &assemble::FsFileSource,
            dir.path(),
            &mut tracker,
            AutofillOptions {
                rank_by_scarcity: false,
                record_usage: false,
            },
        )
        .expect("autofill");
        assert!(
            outcome
                .form
                .title
                .contains("Champions | Ahri | Lux | Zed |")
        );
    }

    #[test]
    fn record_usage_bumps_featured_champions_only() {
        let dir = account_dir(DUMP);
        let mut tracker = UsageTracker::load(MemoryStore::new());
        autofill_listing(
            &assemble::FsFileSource,
            dir.path(),
            &mut tracker,
            AutofillOptions {
                rank_by_scarcity: false,
                record_usage: true,
            },
        )
        .expect("autofill");
        assert_eq!(tracker.count("Ahri"), 1);
        assert_eq!(tracker.count("Lux"), 1);
        assert_eq!(tracker.count("Zed"), 1);
    }

    #[test]
    fn without_record_flag_counters_stay_untouched() {
        let dir = account_dir(DUMP);
        let mut tracker = UsageTracker::load(MemoryStore::new());
        autofill_listing(
            &assemble::FsFileSource,
            dir.path(),
            &mut tracker,
            AutofillOptions::default(),
        )
        .expect("autofill");
        assert!(tracker.counters().is_empty());
    }

    #[test]
    fn empty_folder_propagates_no_readable_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut tracker = UsageTracker::load(MemoryStore::new());
        let err = autofill_listing(
            &assemble::FsFileSource,
            dir.path(),
            &mut tracker,
            AutofillOptions::default(),
        )
        .expect_err("must fail");
        assert_eq!(err.code(), "ALH-4001");
    }
}
