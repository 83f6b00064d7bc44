//! Demo voice effects and contacts, with the list filters the screens use

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectCategory {
    Character,
    Effect,
    Creator,
    Meme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceEffect {
    pub id: String,
    pub name: String,
    pub category: EffectCategory,
    pub favorite: bool,
}

/// Which slice of the effect list is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTab {
    All,
    Favorites,
    Category(EffectCategory),
}

impl EffectTab {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Some(EffectTab::All),
            "favorites" => Some(EffectTab::Favorites),
            "character" => Some(EffectTab::Category(EffectCategory::Character)),
            "effect" => Some(EffectTab::Category(EffectCategory::Effect)),
            "creator" => Some(EffectTab::Category(EffectCategory::Creator)),
            "meme" => Some(EffectTab::Category(EffectCategory::Meme)),
            _ => None,
        }
    }
}

/// Tab filter first, then case-insensitive name search. Order is preserved.
pub fn filter_effects<'a>(
    effects: &'a [VoiceEffect],
    tab: EffectTab,
    search: &str,
) -> Vec<&'a VoiceEffect> {
    let needle = search.to_lowercase();

    effects
        .iter()
        .filter(|e| match tab {
            EffectTab::All => true,
            EffectTab::Favorites => e.favorite,
            EffectTab::Category(category) => e.category == category,
        })
        .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn demo_effects() -> Vec<VoiceEffect> {
    use EffectCategory::*;

    [
        ("Robot Voice", Character, false),
        ("Chipmunk", Character, true),
        ("Echo Chamber", Effect, false),
        ("Deep Voice", Character, false),
        ("Movie Trailer", Character, false),
        ("Helium", Effect, false),
        ("PewDiePie", Creator, true),
        ("MrBeast", Creator, false),
        ("Morgan Freeman", Character, false),
        ("Darth Vader", Character, false),
        ("Meme Review", Meme, false),
        ("TikTok Voice", Meme, false),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, category, favorite))| VoiceEffect {
        id: (i + 1).to_string(),
        name: name.to_string(),
        category,
        favorite,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub number: String,
    pub recent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTab {
    All,
    Recent,
}

/// The Recent tab ignores the search box; otherwise match name
/// (case-insensitive) or number (verbatim).
pub fn filter_contacts<'a>(contacts: &'a [Contact], tab: ContactTab, search: &str) -> Vec<&'a Contact> {
    let needle = search.to_lowercase();

    contacts
        .iter()
        .filter(|c| match tab {
            ContactTab::Recent => c.recent,
            ContactTab::All => c.name.to_lowercase().contains(&needle) || c.number.contains(search),
        })
        .collect()
}

pub fn demo_contacts() -> Vec<Contact> {
    [
        ("c1", "Alex Johnson", "123-456-7890", true),
        ("c2", "Taylor Smith", "234-567-8901", false),
        ("c3", "Jordan Lee", "345-678-9012", true),
        ("c4", "Casey Brown", "456-789-0123", false),
    ]
    .into_iter()
    .map(|(id, name, number, recent)| Contact {
        id: id.to_string(),
        name: name.to_string(),
        number: number.to_string(),
        recent,
    })
    .collect()
}
