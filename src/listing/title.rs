//! Marketplace title packing under the 128-character cap.
//!
//! The title frames the account's headline stats and fills the remaining
//! space with skin and champion names. Budgets are counted in Unicode
//! scalars, not bytes, because the frame embeds `⍜`.

use crate::extract::AccountRecord;

/// Marketplace hard cap on title length, in characters.
pub const MAX_TITLE_CHARS: usize = 128;
/// Champions appended to a title stop at this many even when space remains.
pub const CHAMPION_FEATURE_CAP: usize = 10;

const TITLE_SUFFIX: &str = " | Handleveled | Full Access ⍜]";
const ITEM_SEPARATOR: &str = " | ";

/// A packed title plus the items that made it in, so the caller can record
/// which champions were featured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePacking {
    pub title: String,
    pub skins_used: Vec<String>,
    pub champions_used: Vec<String>,
}

/// Pack skins then champions into the title frame, first fit per item.
///
/// An item too long for the remaining budget is skipped, not truncated;
/// later shorter items may still fit. Skins are packed before champions
/// because a named skin carries more buyer appeal than one more champion.
#[must_use]
pub fn generate_title(record: &AccountRecord, skins: &[String], champions: &[String]) -> TitlePacking {
    let prefix = format!(
        "[{} ⍜] - [{} LVL | {} Champions",
        record.server, record.level, record.champion_count
    );
    let mut budget = MAX_TITLE_CHARS
        .saturating_sub(prefix.chars().count())
        .saturating_sub(TITLE_SUFFIX.chars().count());

    let mut body = String::new();
    let mut pack = |name: &String, budget: &mut usize| -> bool {
        let cost = name.chars().count() + ITEM_SEPARATOR.chars().count();
        if cost > *budget {
            return false;
        }
        body.push_str(ITEM_SEPARATOR);
        body.push_str(name);
        *budget -= cost;
        true
    };

    let mut skins_used = Vec::new();
    for skin in skins {
        if pack(skin, &mut budget) {
            skins_used.push(skin.clone());
        }
    }

    let mut champions_used = Vec::new();
    for champion in champions {
        if champions_used.len() == CHAMPION_FEATURE_CAP {
            break;
        }
        if pack(champion, &mut budget) {
            champions_used.push(champion.clone());
        }
    }

    TitlePacking {
        title: format!("{prefix}{body}{TITLE_SUFFIX}"),
        skins_used,
        champions_used,
    }
}
