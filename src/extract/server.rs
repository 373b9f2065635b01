//! Region token extraction and normalization.

use std::sync::LazyLock;

use regex::Regex;

// Chain ordered by reliability: the op.gg URL embeds the region directly,
// the `Server -` field is free text, the filename token is a last resort.
static OPGG_SERVER: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?i)op\.gg/summoners/([a-z0-9]+)/"));
static SERVER_FIELD: LazyLock<Regex> =
    LazyLock::new(|| compiled(r"(?i)Server\s*[-:]\s*([A-Za-z0-9]+)"));
static FILENAME_TOKEN: LazyLock<Regex> = LazyLock::new(|| compiled(r"(?i)_([a-z]+\d?)_"));

fn compiled(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hardcoded pattern must compile")
}

/// Map a raw region token to its canonical marketplace code.
///
/// Unknown tokens are uppercased as-is.
pub fn normalize_server(token: &str) -> String {
    let normalized = token.trim().to_lowercase();
    let canonical = match normalized.as_str() {
        "brazil" | "br" | "br1" => "BR1",
        "euw" | "euw1" => "EUW",
        "eune" | "eune1" => "EUNE",
        "na" | "na1" => "NA",
        "oce" | "oce1" => "OCE",
        "las" | "las1" => "LAS",
        "lan" | "lan1" => "LAN",
        "tr" | "tr1" => "TR",
        "ru" | "ru1" => "RU",
        "jp" | "jp1" => "JP",
        "kr" => "KR",
        _ => return token.to_uppercase(),
    };
    canonical.to_string()
}

/// Extract the normalized server code, or `"Unknown"` when nothing matches.
pub fn extract_server(text: &str) -> String {
    for re in [&*OPGG_SERVER, &*SERVER_FIELD, &*FILENAME_TOKEN] {
        if let Some(caps) = re.captures(text)
            && let Some(m) = caps.get(1)
        {
            return normalize_server(m.as_str());
        }
    }
    "Unknown".to_string()
}
