use serde::Deserialize;
use std::fmt;

/// Catalog entry as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListItem {
    pub name: String,
    pub url: String,
}

impl ListItem {
    /// Numeric id taken from the second-to-last path segment of `url`
    /// (`.../pokemon/25/` -> 25). None when that segment isn't a number.
    pub fn id(&self) -> Option<u32> {
        let mut segments = self.url.rsplit('/');
        segments.next()?;
        segments.next()?.parse().ok()
    }
}

/// Full attribute set for one creature, fetched on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub name: String,
    pub id: u32,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    pub abilities: Vec<Ability>,
    pub stats: Vec<Stat>,
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub base_stat: u32,
    pub stat_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSlot {
    pub type_name: String,
}

impl DetailRecord {
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    pub fn primary_ability(&self) -> Option<&str> {
        self.abilities.first().map(|a| a.name.as_str())
    }
}

/// One slide of the header carousel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselImage {
    pub id: u32,
    pub src: String,
    pub alt: String,
}

impl CarouselImage {
    pub fn new(id: u32, src: String) -> Self {
        Self {
            id,
            src,
            alt: format!("Creature {}", id),
        }
    }
}

/// Zero-padded catalog number, e.g. `No. 025`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DexNumber(pub Option<u32>);

impl fmt::Display for DexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "No. {:03}", id),
            None => write!(f, "No. ???"),
        }
    }
}

/// Artwork URL for an id. Built locally, never fetched or validated.
pub fn artwork_url(sprite_base: &str, id: u32) -> String {
    format!("{}/{}.png", sprite_base.trim_end_matches('/'), id)
}

/// Upper-case the first letter: `pikachu` -> `Pikachu`
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
