//! Random identifiers for stored timers.
//!
//! Ids are 8 symbols from `[a-zA-Z0-9]`, giving 62^8 possible values. They are
//! not checked against existing records: a collision overwrites the older
//! timer.

use nutype::nutype;
use parking_lot::Mutex;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TIMER_ID_LENGTH: usize = 8;

/// Process-wide generator, seeded once from the clock. Not suitable for
/// anything that must be unguessable.
static RNG: LazyLock<Mutex<StdRng>> = LazyLock::new(|| {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since| since.as_nanos() as u64)
        .unwrap_or_default();
    Mutex::new(StdRng::seed_from_u64(seed))
});

#[nutype(
    new_unchecked,
    validate(
        len_char_min = TIMER_ID_LENGTH,
        len_char_max = TIMER_ID_LENGTH,
        predicate = |id: &str| id.chars().all(|c| c.is_ascii_alphanumeric()),
    ),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct TimerId(String);

impl TimerId {
    pub fn generate() -> Self {
        let id: String = {
            let mut rng = RNG.lock();
            (0..TIMER_ID_LENGTH)
                .map(|_| char::from(rng.sample(Alphanumeric)))
                .collect()
        };

        // SAFETY: `Alphanumeric` only yields ASCII letters and digits, and
        // exactly TIMER_ID_LENGTH of them are drawn.
        unsafe { Self::new_unchecked(id) }
    }
}

#[cfg(test)]
mod tests;
