//! Synthetic user records for seeding a collection.

use rand::seq::SliceRandom;
use rand::Rng;

use user_search_shared::User;

/// Youngest generated age.
pub const MIN_AGE: u32 = 10;

/// Oldest generated age.
pub const MAX_AGE: u32 = 50;

/// Number of random words appended to every description.
const DESCRIPTION_WORDS: usize = 100;

const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Adrian", "Alba", "Amir", "Anika", "Bruno", "Camila", "Chen", "Dana", "Daniel",
    "Danielle", "Dante", "Elena", "Emeka", "Farah", "Felix", "Greta", "Hana", "Hugo", "Ingrid",
    "Isaac", "Jada", "Jonas", "Kai", "Keiko", "Lars", "Leila", "Luca", "Maya", "Mateo", "Nadia",
    "Noah", "Olga", "Omar", "Priya", "Quinn", "Rafael", "Rosa", "Sami", "Sofia", "Tariq", "Tess",
    "Uma", "Victor", "Wanda", "Xavier", "Yara", "Yusuf", "Zoe", "Zoran",
];

const CITIES: &[&str] = &[
    "Amsterdam", "Athens", "Bangkok", "Berlin", "Bogota", "Cairo", "Chicago", "Dublin", "Hanoi",
    "Helsinki", "Istanbul", "Jakarta", "Kyoto", "Lagos", "Lima", "Lisbon", "London", "Madrid",
    "Montreal", "Nairobi", "Oslo", "Paris", "Porto", "Prague", "Santiago", "Seoul", "Sydney",
    "Toronto", "Vienna", "Warsaw",
];

const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla", "pariatur", "excepteur",
    "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum", "eum", "music", "pizza",
];

/// Generate `count` users with the thread-local RNG.
pub fn generate_users(count: u64) -> Vec<User> {
    generate_users_with(&mut rand::thread_rng(), count)
}

/// Generate `count` users with ids `0..count` from the given RNG.
pub fn generate_users_with<R: Rng>(rng: &mut R, count: u64) -> Vec<User> {
    (0..count).map(|id| generate_user(rng, id)).collect()
}

fn generate_user<R: Rng>(rng: &mut R, id: u64) -> User {
    User {
        id,
        name: pick(rng, FIRST_NAMES).to_string(),
        age: rng.gen_range(MIN_AGE..=MAX_AGE),
        address: pick(rng, CITIES).to_string(),
        description: random_description(rng),
    }
}

fn pick<R: Rng>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

fn random_sentence<R: Rng>(rng: &mut R) -> String {
    let word_count = rng.gen_range(4..=10);
    let words: Vec<&str> = (0..word_count).map(|_| pick(rng, LOREM_WORDS)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

fn random_description<R: Rng>(rng: &mut R) -> String {
    let sentence_count = rng.gen_range(1..=3);
    let mut parts: Vec<String> = (0..sentence_count).map(|_| random_sentence(rng)).collect();
    let words: Vec<&str> = (0..DESCRIPTION_WORDS)
        .map(|_| pick(rng, LOREM_WORDS))
        .collect();
    parts.push(words.join(" "));
    parts.join(" ")
}
