//! Scalar field extraction: first-match-wins regex chains.

use std::sync::LazyLock;

use regex::Regex;

static LEVEL: LazyLock<Regex> = LazyLock::new(|| compiled(r"(?i)Level\s*[-:]\s*(\d+)"));
static CHAMPION_COUNT: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?i)Champions\s*[-:]\s*(\d+)"));
static SKIN_COUNT: LazyLock<Regex> = LazyLock::new(|| compiled(r"(?i)Skins\s*[-:]\s*(\d+)"));
static RIOT_POINTS: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?i)Riot\s+Points\s*[-:]\s*(\d+)"));
static BLUE_ESSENCE: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?i)Blue\s+Essence\s*[-:]\s*(\d+)"));
static ORANGE_ESSENCE: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?i)Orange\s+Essence\s*[-:]\s*(\d+)"));
static HONOR_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?i)Honor\s+level\s+is\s+(\d+)"));
static LAST_PLAY: LazyLock<Regex> = LazyLock::new(|| {
    compiled(r"(?i)Last\s+Play(?:\s*/\s*Inactive\s+From)?\s*[-:]\s*([^\r\n]+)")
});
static INACTIVE_FROM: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?i)Inactive\s+From\s*[-:]\s*([^\r\n]+)"));
static OPGG_LINK: LazyLock<Regex> = LazyLock::new(|| compiled(r"(?i)(https?://\S*op\.gg\S+)"));

fn compiled(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hardcoded pattern must compile")
}

/// First capture group parsed as a number; unparsable or absent yields 0.
fn extract_number(text: &str, re: &Regex) -> u32 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}

pub fn level(text: &str) -> u32 {
    extract_number(text, &LEVEL)
}

pub fn champion_count(text: &str) -> u32 {
    extract_number(text, &CHAMPION_COUNT)
}

pub fn skin_count(text: &str) -> u32 {
    extract_number(text, &SKIN_COUNT)
}

pub fn riot_points(text: &str) -> u32 {
    extract_number(text, &RIOT_POINTS)
}

pub fn blue_essence(text: &str) -> u32 {
    extract_number(text, &BLUE_ESSENCE)
}

pub fn orange_essence(text: &str) -> u32 {
    extract_number(text, &ORANGE_ESSENCE)
}

/// Honor level; absent or zero both fall back to 3.
pub fn honor_level(text: &str) -> u32 {
    match extract_number(text, &HONOR_LEVEL) {
        0 => 3,
        n => n,
    }
}

/// Last activity date, free-form to end of line. Absent yields `"Unknown"`.
pub fn last_play_date(text: &str) -> String {
    for re in [&*LAST_PLAY, &*INACTIVE_FROM] {
        if let Some(caps) = re.captures(text)
            && let Some(m) = caps.get(1)
        {
            return m.as_str().trim().to_string();
        }
    }
    "Unknown".to_string()
}

pub fn opgg_link(text: &str) -> Option<String> {
    OPGG_LINK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
