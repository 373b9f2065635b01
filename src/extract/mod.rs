//! Regex field extraction over the combined account text.
//!
//! Extraction never fails: every field falls back to its sentinel default
//! when no pattern matches, so one malformed dump degrades a single field
//! rather than aborting the account.

pub mod fields;
pub mod lists;
pub mod server;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Marker introducing the champion list span.
pub const CHAMPION_LIST_MARKER: &str = "List of Champions:";
/// Marker introducing the skin list span.
pub const SKIN_LIST_MARKER: &str = "List of Skins:";

/// Everything the extractor recovers for one account.
///
/// The numeric counts and the name lists are independent: sellers routinely
/// paste a full count next to a hand-picked highlight list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub server: String,
    pub level: u32,
    pub honor_level: u32,
    pub champion_count: u32,
    pub champion_list: Vec<String>,
    pub skin_count: u32,
    pub skin_list: Vec<String>,
    pub riot_points: u32,
    pub blue_essence: u32,
    pub orange_essence: u32,
    pub last_play_date: String,
    pub opgg_link: Option<String>,
}

impl Default for AccountRecord {
    fn default() -> Self {
        Self {
            server: "Unknown".to_string(),
            level: 0,
            honor_level: 3,
            champion_count: 0,
            champion_list: Vec::new(),
            skin_count: 0,
            skin_list: Vec::new(),
            riot_points: 0,
            blue_essence: 0,
            orange_essence: 0,
            last_play_date: "Unknown".to_string(),
            opgg_link: None,
        }
    }
}

/// Run every extraction chain over one combined text blob.
#[must_use]
pub fn extract_record(text: &str) -> AccountRecord {
    let record = AccountRecord {
        server: server::extract_server(text),
        level: fields::level(text),
        honor_level: fields::honor_level(text),
        champion_count: fields::champion_count(text),
        champion_list: lists::extract_list(text, CHAMPION_LIST_MARKER),
        skin_count: fields::skin_count(text),
        skin_list: lists::extract_list(text, SKIN_LIST_MARKER),
        riot_points: fields::riot_points(text),
        blue_essence: fields::blue_essence(text),
        orange_essence: fields::orange_essence(text),
        last_play_date: fields::last_play_date(text),
        opgg_link: fields::opgg_link(text),
    };
    debug!(
        server = %record.server,
        level = record.level,
        champions = record.champion_list.len(),
        skins = record.skin_list.len(),
        "extracted account record"
    );
    record
}
