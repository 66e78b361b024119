use rand::Rng;

use crate::Headline;

/// Number of leading feed entries considered for selection.
pub const MAX_HEADLINES: usize = 15;

/// Picks one of the first `cap` headlines uniformly at random.
pub fn select_headline<R: Rng + ?Sized>(
    mut headlines: Vec<Headline>,
    cap: usize,
    rng: &mut R,
) -> Option<Headline> {
    headlines.truncate(cap);
    if headlines.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..headlines.len());
    Some(headlines.swap_remove(idx))
}
