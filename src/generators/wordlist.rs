// src/generators/wordlist.rs

/// Words used for passphrases. All lowercase, no duplicates.
pub const WORDLIST: &[&str] = &[
    "aurora", "beacon", "crystal", "diamond", "eclipse", "forest", "galaxy", "horizon",
    "island", "journey", "kingdom", "liberty", "mountain", "nebula", "ocean", "phoenix",
    "quantum", "radiant", "stellar", "thunder", "universe", "valley", "wisdom", "zenith",
    "azure", "breeze", "cascade", "destiny", "eternal", "fortune", "gentle", "harmony",
    "infinite", "jubilant", "knight", "legacy", "marvel", "nobility", "optimal", "pioneer",
];
