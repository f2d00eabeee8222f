//! Human-readable game numbers.
//!
//! A game number is a reversible rendering of the seed:
//!
//! | generator | plain rendering |
//! |-----------|-----------------|
//! | LC        | `%05d`          |
//! | LC (ms)   | `ms<N>`         |
//! | MT        | `%020d`         |
//!
//! `GameNumberFormat::Grouped` splits the digits into hyphen-separated groups
//! of four for reading aloud. Parsing strips whitespace and `# - _ . ,`, so
//! every format parses back to the same generator.
//!
//! ```
//! use solitaire_engine::core::{parse_game_number, format_game_number, GameNumberFormat};
//!
//! let rng = parse_game_number("#1234-5678-9012-3456").unwrap();
//! assert_eq!(format_game_number(&rng, GameNumberFormat::Plain), "00001234567890123456");
//! ```

use serde::{Deserialize, Serialize};

use super::rng::{GameRandom, LcRandom31, RandomKind, SeedOrigin, LC_SEED_LIMIT, MT_SEED_LIMIT};
use crate::error::GameNumberError;

/// How to render a game number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameNumberFormat {
    #[default]
    Plain,
    /// Prefixed with `#`.
    Hash,
    /// Hyphen-separated groups of four digits, counted from the right.
    Grouped,
}

/// Render the game number of a generator.
#[must_use]
pub fn format_game_number(random: &GameRandom, format: GameNumberFormat) -> String {
    let seed = random.initial_seed();
    let (prefix, digits) = match random.kind() {
        RandomKind::Lc if random.is_ms_deal() => ("ms", seed.to_string()),
        RandomKind::Lc => ("", format!("{seed:05}")),
        RandomKind::Mt => ("", format!("{seed:020}")),
    };
    match format {
        GameNumberFormat::Plain => format!("{prefix}{digits}"),
        GameNumberFormat::Hash => format!("#{prefix}{digits}"),
        GameNumberFormat::Grouped => format!("{prefix}{}", group_digits(&digits)),
    }
}

fn group_digits(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let head = bytes.len() % 4;
    let mut groups: Vec<&str> = Vec::new();
    if head > 0 {
        groups.push(&digits[..head]);
    }
    let mut i = head;
    while i < bytes.len() {
        groups.push(&digits[i..i + 4]);
        i += 4;
    }
    groups.join("-")
}

/// Parse user input back into a generator tagged `SeedOrigin::Selected`.
pub fn parse_game_number(input: &str) -> Result<GameRandom, GameNumberError> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_suffix('L').unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| !c.is_whitespace() && !matches!(c, '#' | '-' | '_' | '.' | ','))
        .collect();
    if cleaned.is_empty() {
        return Err(GameNumberError::Empty);
    }

    let (ms, digits) = match cleaned.strip_prefix("ms") {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GameNumberError::Invalid(input.to_string()));
    }
    let seed: u128 = digits
        .parse()
        .map_err(|_| GameNumberError::OutOfRange(input.to_string()))?;

    let random = if ms {
        let seed = u64::try_from(seed)
            .ok()
            .filter(|s| *s <= LcRandom31::MAX_SEED)
            .ok_or_else(|| GameNumberError::OutOfRange(input.to_string()))?;
        GameRandom::ms(seed)?
    } else if seed < LC_SEED_LIMIT {
        GameRandom::lc(seed as u64)?
    } else if seed < MT_SEED_LIMIT {
        GameRandom::mt(seed)
    } else {
        return Err(GameNumberError::OutOfRange(input.to_string()));
    };
    Ok(random.with_origin(SeedOrigin::Selected))
}
