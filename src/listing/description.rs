//! Fixed marketplace description template.

use crate::extract::AccountRecord;

/// Render the full description body for one account.
///
/// The boilerplate lines are what buyers expect to see on every listing;
/// only the stat lines and the optional list sections vary per account.
#[must_use]
pub fn generate_description(record: &AccountRecord) -> String {
    let mut lines = vec![
        "⮸Full info into the media⮸".to_string(),
        String::new(),
        "▸ Instant Auto-Delivery 24/7".to_string(),
        "⤱ You must play 10 Quickplay or Draft games to unlock Ranked.".to_string(),
        "⤱ Last Rank: The Account has never been ranked, but MMR is random.".to_string(),
        "⤱ Current Rank: Unranked".to_string(),
        format!("⤱ Last Play / Inactive From - {}", record.last_play_date),
        String::new(),
        format!("◉ Level - {}", record.level),
        format!("◉ Honor level is {}", record.honor_level),
        format!("◉ Champions - {}", record.champion_count),
        format!("◉ Skins - {}", record.skin_count),
        format!("◉ Riot Points - {}", record.riot_points),
        format!("◉ Blue Essence - {}", record.blue_essence),
        format!("◉ Orange Essence - {}", record.orange_essence),
        String::new(),
        "✓ Full Access [You can change the email, password, etc.]".to_string(),
        "⍜ Completely Safe with 0% Banrate".to_string(),
        "⮸ Hand-Leveled".to_string(),
        "✫ Positive Reviews".to_string(),
    ];

    if !record.champion_list.is_empty() {
        lines.push(String::new());
        lines.push("◉ List of Champions:".to_string());
        lines.push(format!("{}.", record.champion_list.join(", ")));
    }

    if !record.skin_list.is_empty() {
        lines.push(String::new());
        lines.push("◉ List of Skins:".to_string());
        lines.push(format!("{}.", record.skin_list.join(", ")));
    }

    lines.join("\n")
}
