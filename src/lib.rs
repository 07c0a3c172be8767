pub mod assets;
pub mod config;
pub mod error;
pub mod handler;
pub mod portrait;
pub mod renderer;
pub mod request;

use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

pub use error::{PortraitError, RequestError};

/// Highest gear tier; at this tier the relic border replaces the gear border.
pub const MAX_GEAR_LEVEL: u32 = 13;
pub const MAX_RELIC_LEVEL: u32 = 9;
pub const MAX_LEVEL: u32 = 85;
/// Level drawn on the badge when the request does not name one.
pub const DEFAULT_LEVEL: u32 = 85;

#[derive(Debug, Clone, Serialize)]
pub struct Character {
    pub id: &'static str,
    pub name: &'static str,
    pub faction: &'static str,
    #[serde(skip)]
    pub image_file: &'static str,
    pub max_zetas: u32,
    pub max_omicrons: u32,
}

static CHARACTERS: &[Character] = &[Character {
    id: "darth_vader",
    name: "Darth Vader",
    faction: "dark_side",
    image_file: "darth_vader.png",
    max_zetas: 3,
    max_omicrons: 1,
}];

static CATALOG: LazyLock<HashMap<&'static str, &'static Character>> =
    LazyLock::new(|| CHARACTERS.iter().map(|c| (c.id, c)).collect());

impl Character {
    pub fn lookup(id: &str) -> Option<&'static Character> {
        CATALOG.get(id).copied()
    }

    /// All supported characters in declaration order.
    pub fn all() -> &'static [Character] {
        CHARACTERS
    }
}

/// A validated portrait request. Relic level is 0 unless gear level is 13.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortraitRequest {
    pub character: String,
    pub gear_level: u32,
    pub relic_level: u32,
    pub zetas: u32,
    pub omicrons: u32,
    pub level: u32,
}

impl PortraitRequest {
    pub fn is_relic(&self) -> bool {
        self.gear_level == MAX_GEAR_LEVEL
    }
}
