//! # Content Catalog
//!
//! The templates the generator draws from. The default catalog holds the
//! seed content every run starts with; callers may supply their own.

use crate::game::{
    ItemKind, ItemTemplate, MacguffinQuirk, MacguffinTemplate, MonsterBehavior,
    MonsterDisposition, MonsterTemplate,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Monster, item and macguffin templates available to the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCatalog {
    pub monsters: Vec<MonsterTemplate>,
    pub items: Vec<ItemTemplate>,
    pub macguffins: Vec<MacguffinTemplate>,
}

impl ContentCatalog {
    /// Picks a monster template uniformly at random.
    pub fn random_monster<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&MonsterTemplate> {
        self.monsters.choose(rng)
    }

    /// Picks an item template uniformly at random.
    pub fn random_item<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ItemTemplate> {
        self.items.choose(rng)
    }

    /// Picks a macguffin template uniformly at random.
    pub fn random_macguffin<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&MacguffinTemplate> {
        self.macguffins.choose(rng)
    }

    pub fn monster(&self, id: &str) -> Option<&MonsterTemplate> {
        self.monsters.iter().find(|template| template.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|template| template.id == id)
    }

    pub fn macguffin(&self, id: &str) -> Option<&MacguffinTemplate> {
        self.macguffins.iter().find(|template| template.id == id)
    }
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self {
            monsters: vec![
                monster("rat", "Rat", 4, 1, 0.9, 'r', "#8B4513"),
                monster("goblin", "Goblin", 8, 2, 0.75, 'g', "#228B22"),
                monster("skeleton", "Skeleton", 12, 3, 0.5, 's', "#F5F5DC"),
            ],
            items: vec![
                item("rusty_sword", "Rusty Sword", ItemKind::Weapon, 3, '/', "#B87333"),
                item("iron_sword", "Iron Sword", ItemKind::Weapon, 5, '/', "#C0C0C0"),
                item("wooden_shield", "Wooden Shield", ItemKind::Armor, 1, ')', "#DEB887"),
                item("leather_armor", "Leather Armor", ItemKind::Armor, 2, '[', "#8B4513"),
                item("health_potion", "Health Potion", ItemKind::Consumable, 10, '!', "#FF6347"),
                item("gold_coin", "Gold Coin", ItemKind::Gold, 5, '$', "#FFD700"),
                item("rusty_key", "Rusty Key", ItemKind::Key, 1, '-', "#B87333"),
            ],
            macguffins: vec![
                macguffin(
                    "milk_carton",
                    "Milk Carton",
                    "A perfectly ordinary carton of milk. Expires tomorrow.",
                    '%',
                    "#FFFFFF",
                    Some(MacguffinQuirk::Fragile),
                ),
                macguffin(
                    "lost_keys",
                    "Lost Keys",
                    "A jangling set of keys. Someone must be looking for these.",
                    '-',
                    "#FFD700",
                    None,
                ),
                macguffin(
                    "ancient_scroll",
                    "Ancient Scroll",
                    "Dusty parchment covered in arcane symbols.",
                    '?',
                    "#F5DEB3",
                    Some(MacguffinQuirk::Glowing),
                ),
                macguffin(
                    "crystal_orb",
                    "Crystal Orb",
                    "A perfectly spherical crystal that hums faintly.",
                    '*',
                    "#E6E6FA",
                    Some(MacguffinQuirk::AttractsEnemies),
                ),
                macguffin(
                    "golden_idol",
                    "Golden Idol",
                    "Surprisingly heavy for its size.",
                    '&',
                    "#FFD700",
                    Some(MacguffinQuirk::Heavy),
                ),
            ],
        }
    }
}

fn monster(
    id: &str,
    name: &str,
    max_hp: i32,
    damage: i32,
    speed: f64,
    symbol: char,
    color: &str,
) -> MonsterTemplate {
    MonsterTemplate {
        id: id.to_string(),
        name: name.to_string(),
        max_hp,
        damage,
        speed,
        behavior: MonsterBehavior::Aggressive,
        disposition: MonsterDisposition::Hostile,
        symbol,
        color: color.to_string(),
    }
}

fn item(id: &str, name: &str, kind: ItemKind, effect: i32, symbol: char, color: &str) -> ItemTemplate {
    ItemTemplate {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        effect,
        symbol,
        color: color.to_string(),
    }
}

fn macguffin(
    id: &str,
    name: &str,
    description: &str,
    symbol: char,
    color: &str,
    quirk: Option<MacguffinQuirk>,
) -> MacguffinTemplate {
    MacguffinTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        symbol,
        color: color.to_string(),
        quirk,
    }
}
