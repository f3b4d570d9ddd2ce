use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Short url-safe id for games and turn records.
pub fn short_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect()
}

// Friend codes get typed by hand, so skip lookalike characters.
const CODE_CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

pub fn friend_code() -> String {
    let mut rng = thread_rng();
    (0..6)
        .map(|_| CODE_CHARS[rng.gen_range(0..CODE_CHARS.len())] as char)
        .collect()
}

const ADJECTIVES: [&str; 12] = [
    "Salty", "Rusty", "Brave", "Sneaky", "Foggy", "Iron", "Lucky", "Stormy", "Silent", "Bold",
    "Crimson", "Gilded",
];

const VESSELS: [&str; 12] = [
    "Kraken", "Corsair", "Galleon", "Frigate", "Cutter", "Buccaneer", "Admiral", "Schooner",
    "Privateer", "Mariner", "Harpooner", "Deckhand",
];

/// Display name for users who did not pick one.
pub fn display_name() -> String {
    let mut rng = thread_rng();
    format!(
        "{}{}{}",
        ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())],
        VESSELS[rng.gen_range(0..VESSELS.len())],
        rng.gen_range(10..100)
    )
}
