//! Feedback for a wrong guess: which way to go, and optionally how close it was.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    TooLow,
    TooHigh,
}

/// Proximity buckets, hottest first. `Ord` follows that order, so a hotter
/// bucket compares as smaller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Proximity {
    VeryHot,
    Hot,
    Warm,
    Cold,
}

/// Only meaningful when `guess != secret`.
pub fn directional_hint(guess: i64, secret: i64) -> Direction {
    if guess < secret {
        Direction::TooLow
    } else {
        Direction::TooHigh
    }
}

/// Bucket `|guess - secret|` against fractions of the range span (1/20, 1/10, 1/3).
/// Each threshold is at least 1 so an off-by-one guess on a small range still
/// reads as very hot.
pub fn proximity_hint(guess: i64, secret: i64, min: i64, max: i64) -> Proximity {
    let distance = (i128::from(guess) - i128::from(secret)).abs();
    let span = i128::from(max) - i128::from(min);
    let threshold = |divisor: i128| (span / divisor).max(1);

    if distance <= threshold(20) {
        Proximity::VeryHot
    } else if distance <= threshold(10) {
        Proximity::Hot
    } else if distance <= threshold(3) {
        Proximity::Warm
    } else {
        Proximity::Cold
    }
}
