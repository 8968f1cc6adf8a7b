use crate::types::{CollectibleKind, EnemyKind, MovementClass};

pub struct EnemyStats {
    /// Tiles per second before the level speed multiplier.
    pub base_speed: f64,
    pub points: u32,
    pub movement: MovementClass,
}

pub fn get_enemy_stats(kind: EnemyKind) -> EnemyStats {
    match kind {
        EnemyKind::Caterpillar => {
            EnemyStats { base_speed: 1.25, points: 100, movement: MovementClass::Patrol }
        }
        EnemyKind::Beetle => {
            EnemyStats { base_speed: 1.7, points: 150, movement: MovementClass::Patrol }
        }
        EnemyKind::BlueCaterpillar => {
            EnemyStats { base_speed: 2.2, points: 200, movement: MovementClass::Patrol }
        }
        EnemyKind::Frog => {
            EnemyStats { base_speed: 1.9, points: 250, movement: MovementClass::Bouncer }
        }
        EnemyKind::Flea => {
            EnemyStats { base_speed: 2.5, points: 300, movement: MovementClass::Bouncer }
        }
        EnemyKind::Rhino => {
            EnemyStats { base_speed: 3.75, points: 400, movement: MovementClass::EdgeRunner }
        }
        EnemyKind::Blu => {
            EnemyStats { base_speed: 0.9, points: 500, movement: MovementClass::Blocker }
        }
    }
}

pub fn movement_class(kind: EnemyKind) -> MovementClass {
    get_enemy_stats(kind).movement
}

pub struct CollectibleStats {
    pub points: u32,
    /// Relative draw weight among the kinds a level has unlocked.
    pub spawn_weight: f64,
}

pub fn get_collectible_stats(kind: CollectibleKind) -> CollectibleStats {
    match kind {
        CollectibleKind::Coin => CollectibleStats { points: 10, spawn_weight: 0.70 },
        CollectibleKind::BlueCoin => CollectibleStats { points: 50, spawn_weight: 0.15 },
        CollectibleKind::Diamond => CollectibleStats { points: 250, spawn_weight: 0.07 },
        CollectibleKind::FreeLife => CollectibleStats { points: 0, spawn_weight: 0.03 },
        CollectibleKind::InvincibilityPendant => {
            CollectibleStats { points: 0, spawn_weight: 0.05 }
        }
    }
}

pub const TREASURE_CHEST_POINTS: u32 = 1_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_enemy_moves_and_scores() {
        for kind in EnemyKind::ALL {
            let stats = get_enemy_stats(kind);
            assert!(stats.base_speed > 0.0, "{kind:?} must move");
            assert!(stats.points > 0, "{kind:?} must be worth points");
        }
    }

    #[test]
    fn exactly_two_bouncers_and_one_blocker() {
        let bouncers =
            EnemyKind::ALL.iter().filter(|&&k| movement_class(k) == MovementClass::Bouncer).count();
        let blockers =
            EnemyKind::ALL.iter().filter(|&&k| movement_class(k) == MovementClass::Blocker).count();
        assert_eq!(bouncers, 2);
        assert_eq!(blockers, 1);
    }

    #[test]
    fn coins_dominate_collectible_weights() {
        let coin = get_collectible_stats(CollectibleKind::Coin).spawn_weight;
        for kind in CollectibleKind::ALL.into_iter().skip(1) {
            assert!(coin > get_collectible_stats(kind).spawn_weight);
        }
    }
}
