//! Inspirational quotes shown between sessions

use rand::seq::IndexedRandom as _;

/// Every quote the companion can show
pub const INSPIRATIONAL_QUOTES: [&str; 10] = [
    "It's okay to take things one day at a time",
    "Your feelings are valid",
    "Small steps still move you forward",
    "You don't have to have it all figured out",
    "It's okay to rest and recharge",
    "Every small win counts",
    "You are stronger than you think",
    "Progress over perfection",
    "It's okay to want more, do more, be more",
    "Your journey is unique, and that's beautiful",
];

/// Pick a quote uniformly at random
pub fn random_quote() -> &'static str {
    INSPIRATIONAL_QUOTES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(INSPIRATIONAL_QUOTES[0])
}
