//! Word lists used to vary question wording.

use rand::seq::SliceRandom;
use rand::RngCore;

/// Everyday objects that can move, collide, or be thrown. Each starts with
/// a consonant sound so templates can write "a {noun}".
pub const NOUNS: &[&str] = &[
    "ball",
    "box",
    "cart",
    "car",
    "bike",
    "sled",
    "train",
    "puck",
    "rock",
    "drone",
    "rocket",
    "skateboard",
    "bowling ball",
    "shopping cart",
    "toy truck",
    "watermelon",
    "pumpkin",
    "brick",
];

/// Past participles for launching a projectile.
pub const PROJECTILE_VERBS: &[&str] = &[
    "thrown", "launched", "kicked", "tossed", "hurled", "fired", "flung", "lobbed",
];

pub fn random_noun(rng: &mut dyn RngCore) -> &'static str {
    NOUNS.choose(rng).copied().unwrap_or("ball")
}

/// Two different nouns, for problems with two objects.
pub fn noun_pair(rng: &mut dyn RngCore) -> (&'static str, &'static str) {
    let mut picked = NOUNS.choose_multiple(rng, 2).copied();
    let first = picked.next().unwrap_or("cart");
    let second = picked.next().unwrap_or("box");
    (first, second)
}

pub fn random_projectile_verb(rng: &mut dyn RngCore) -> &'static str {
    PROJECTILE_VERBS.choose(rng).copied().unwrap_or("thrown")
}
