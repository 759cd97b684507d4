//! Review rewards and badges
//!
//! Coin and XP payouts are fixed lookup tables per rating. They are
//! deliberately not monotonic in "how easy the button is": tapping `Easy` on
//! everything pays the most coins but not the most XP, which blunts reflexive
//! rating.

use crate::srs::ReviewRating;

/// Coins earned for a single review.
pub fn coin_reward(rating: ReviewRating) -> u32 {
    match rating {
        ReviewRating::Again => 1,
        ReviewRating::Hard => 2,
        ReviewRating::Good => 2,
        ReviewRating::Easy => 3,
    }
}

/// XP earned for a single review.
pub fn xp_reward(rating: ReviewRating) -> u32 {
    match rating {
        ReviewRating::Again => 6,
        ReviewRating::Hard => 10,
        ReviewRating::Good => 9,
        ReviewRating::Easy => 8,
    }
}

/// Aggregate stats a badge predicate may look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgeStats {
    pub best_streak: u32,
    pub total_reviewed: u64,
    pub coins: u64,
}

/// A badge with a pure unlock predicate. Predicates are cheap and idempotent,
/// so callers evaluate them on every render rather than persisting unlocks.
pub struct BadgeDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub is_unlocked: fn(&BadgeStats) -> bool,
}

/// The full badge catalog, in display order.
pub const BADGES: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: "streak-3",
        title: "3-Day Streak",
        description: "Hit your daily goal for 3 days in a row.",
        is_unlocked: |stats| stats.best_streak >= 3,
    },
    BadgeDefinition {
        id: "streak-7",
        title: "7-Day Streak",
        description: "One full week of consistency.",
        is_unlocked: |stats| stats.best_streak >= 7,
    },
    BadgeDefinition {
        id: "streak-14",
        title: "14-Day Streak",
        description: "Two weeks. You're dangerous now.",
        is_unlocked: |stats| stats.best_streak >= 14,
    },
    BadgeDefinition {
        id: "streak-30",
        title: "30-Day Streak",
        description: "A month of daily momentum.",
        is_unlocked: |stats| stats.best_streak >= 30,
    },
    BadgeDefinition {
        id: "review-100",
        title: "100 Reviews",
        description: "Reviewed 100 words (total).",
        is_unlocked: |stats| stats.total_reviewed >= 100,
    },
    BadgeDefinition {
        id: "review-500",
        title: "500 Reviews",
        description: "Reviewed 500 words (total).",
        is_unlocked: |stats| stats.total_reviewed >= 500,
    },
    BadgeDefinition {
        id: "coins-250",
        title: "Quarter K",
        description: "Earned 250 coins.",
        is_unlocked: |stats| stats.coins >= 250,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_table() {
        assert_eq!(coin_reward(ReviewRating::Again), 1);
        assert_eq!(coin_reward(ReviewRating::Hard), 2);
        assert_eq!(coin_reward(ReviewRating::Good), 2);
        assert_eq!(coin_reward(ReviewRating::Easy), 3);
    }

    #[test]
    fn test_xp_pays_hard_work_most() {
        assert!(xp_reward(ReviewRating::Hard) > xp_reward(ReviewRating::Easy));
        assert!(xp_reward(ReviewRating::Good) > xp_reward(ReviewRating::Easy));
    }

    #[test]
    fn test_badge_thresholds() {
        let locked = BadgeStats::default();
        assert!(BADGES.iter().all(|b| !(b.is_unlocked)(&locked)));

        let stats = BadgeStats {
            best_streak: 7,
            total_reviewed: 120,
            coins: 40,
        };
        let unlocked: Vec<&str> = BADGES
            .iter()
            .filter(|b| (b.is_unlocked)(&stats))
            .map(|b| b.id)
            .collect();
        assert_eq!(unlocked, vec!["streak-3", "streak-7", "review-100"]);
    }

    #[test]
    fn test_badge_ids_are_unique() {
        let mut ids: Vec<&str> = BADGES.iter().map(|b| b.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), BADGES.len());
    }
}
