//! Vote-ratio display tiers.
//!
//! A starred item is displayed with an emoji and color picked by how large a
//! share of the guild's eligible humans starred it. Break points are
//! inclusive at each boundary, ties resolving to the higher tier.

use serde::{Deserialize, Serialize};

/// Compute the vote ratio for a record.
///
/// `eligible_humans` comes from [`crate::GuildProfile::eligible_humans`] and
/// is always >= 1, so this is total for any starrer count.
pub fn star_ratio(starrers: usize, eligible_humans: u32) -> f64 {
    starrers as f64 / f64::from(eligible_humans.max(1))
}

/// Display bucket for a starred item.
///
/// # Examples
///
/// ```
/// use starling_core::Tier;
///
/// assert_eq!(Tier::for_ratio(0.0), Tier::Blue);
/// assert_eq!(Tier::for_ratio(0.4), Tier::Gold);
/// assert_eq!(Tier::for_ratio(2.5), Tier::White);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    /// Ratio >= 0.
    Blue,
    /// Ratio >= 0.1.
    Bronze,
    /// Ratio >= 0.2.
    Silver,
    /// Ratio >= 0.4.
    Gold,
    /// Ratio >= 0.8.
    Red,
    /// Ratio >= 1.
    White,
}

impl Tier {
    /// Select the tier whose break point is the highest not exceeding the
    /// ratio. Total for all ratios >= 0; negative ratios clamp to the lowest
    /// tier.
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= 1.0 {
            Tier::White
        } else if ratio >= 0.8 {
            Tier::Red
        } else if ratio >= 0.4 {
            Tier::Gold
        } else if ratio >= 0.2 {
            Tier::Silver
        } else if ratio >= 0.1 {
            Tier::Bronze
        } else {
            Tier::Blue
        }
    }

    /// The emoji shown in the mirrored post title.
    pub fn emoji(self) -> &'static str {
        match self {
            Tier::Blue => "\u{2B50}",
            Tier::Bronze => "\u{1F31F}",
            Tier::Silver => "\u{1F4AB}",
            Tier::Gold => "\u{2728}",
            Tier::Red => "\u{1F320}",
            Tier::White => "\u{1F386}",
        }
    }

    /// The accent color of the mirrored post.
    pub fn color(self) -> u32 {
        match self {
            Tier::Blue => 0x5DADEC,
            Tier::Bronze => 0xC67931,
            Tier::Silver => 0xC0C0C0,
            Tier::Gold => 0xD4AF37,
            Tier::Red => 0xFF0000,
            Tier::White => 0xFFFFFF,
        }
    }
}
