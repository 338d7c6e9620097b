//! Random guest character names.
//!
//! Produces names in the format `AdjectiveNounNN` (e.g. `GrimOtter42`), used
//! when no character is configured.

use rand::RngExt;

const ADJECTIVES: &[&str] = &[
    "Grim", "Brave", "Swift", "Sly", "Stout", "Wily", "Pale", "Bold", "Quiet", "Wild", "Lucky",
    "Ashen", "Amber", "Rusty", "Frosty", "Misty", "Gloomy", "Merry", "Noble", "Fey",
];

const NOUNS: &[&str] = &[
    "Otter", "Badger", "Raven", "Stag", "Boar", "Heron", "Wyrm", "Toad", "Newt", "Hare", "Lynx",
    "Owl", "Crow", "Moth", "Elk", "Mole", "Wren", "Adder", "Fox", "Yak",
];

pub fn generate_guest_name() -> String {
    let mut rng = rand::rng();
    let adj = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let num: u8 = rng.random_range(0..100);
    format!("{}{}{}", adj, noun, num)
}
