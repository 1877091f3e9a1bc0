//! Deterministic display statistics and accent colours.
//!
//! The feed shows view / like counts that are synthesised from the video's
//! source URL, so the same video always shows the same numbers.  The
//! arithmetic follows 32-bit string hashing over UTF-16 code units so the
//! numbers match the web client exactly.

// ───────────────────────────────────────── hashing ───────────

/// Polynomial rolling hash (`h * 31 + unit`), wrapped to `i32`.
pub fn seed_hash(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

/// Synthesised view and like counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeterministicStats {
    pub views: u64,
    pub likes: u64,
}

/// Derive stable stats from a seed.  An empty seed yields zeros.
pub fn deterministic_stats(seed: &str) -> DeterministicStats {
    if seed.is_empty() {
        return DeterministicStats::default();
    }

    let hash = i64::from(seed_hash(seed));
    let base_views = (hash % 900_000).abs() + 500_000;
    let views = base_views * ((hash % 5).abs() + 2);
    let ratio = 0.12 + (hash % 15).abs() as f64 / 100.0;
    let likes = (views as f64 * ratio).floor().abs();

    DeterministicStats {
        views: views as u64,
        likes: likes as u64,
    }
}

// ───────────────────────────────────────── formatting ────────

/// Compact counter: `999`, `1.5K`, `2.5M`.
pub fn format_big_number(num: u64) -> String {
    if num >= 1_000_000 {
        return format!("{}M", one_decimal(num as f64 / 1_000_000.0));
    }
    if num >= 1_000 {
        return format!("{}K", one_decimal(num as f64 / 1_000.0));
    }
    num.to_string()
}

/// One fractional digit with exact ties rounded up (`1.25` → `1.3`).
/// `{:.1}` alone would round such ties to even.
fn one_decimal(x: f64) -> String {
    let scaled = x * 10.0;
    if (x * 4.0).fract() == 0.0 && scaled.fract() == 0.5 {
        return format!("{:.1}", scaled.ceil() / 10.0);
    }
    format!("{x:.1}")
}

// ───────────────────────────────────────── accents ───────────

/// Named accent colours.  The UI layer maps these onto terminal colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Red,
    Cyan,
    Yellow,
    Purple,
    Green,
    Blue,
    Orange,
    Emerald,
    Indigo,
    White,
}

/// Card border palette, indexed by [`neon_index`].
pub const NEON_ACCENTS: [Accent; 6] = [
    Accent::Red,
    Accent::Cyan,
    Accent::Yellow,
    Accent::Purple,
    Accent::Green,
    Accent::Blue,
];

/// Index into [`NEON_ACCENTS`] for a video id.
///
/// Unlike [`seed_hash`] the running value is not wrapped; only the shifted
/// term goes through an `i32`.
pub fn neon_index(id: &str) -> usize {
    let mut hash: i64 = 0;
    for unit in id.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit) + (shifted - hash);
    }
    (hash.unsigned_abs() % NEON_ACCENTS.len() as u64) as usize
}

pub fn neon_accent(id: &str) -> Accent {
    NEON_ACCENTS[neon_index(id)]
}
