use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Caterpillar,
    Beetle,
    BlueCaterpillar,
    Frog,
    Flea,
    Rhino,
    Blu,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Caterpillar,
        EnemyKind::Beetle,
        EnemyKind::BlueCaterpillar,
        EnemyKind::Frog,
        EnemyKind::Flea,
        EnemyKind::Rhino,
        EnemyKind::Blu,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EnemyKind::Caterpillar => "caterpillar",
            EnemyKind::Beetle => "beetle",
            EnemyKind::BlueCaterpillar => "blue_caterpillar",
            EnemyKind::Frog => "frog",
            EnemyKind::Flea => "flea",
            EnemyKind::Rhino => "rhino",
            EnemyKind::Blu => "blu",
        }
    }
}

/// How an enemy moves, fixed per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementClass {
    Patrol,
    /// Spawns against a wall and charges across the whole floor.
    EdgeRunner,
    Bouncer,
    /// Slow wide enemy that closes a floor; kept off ladders.
    Blocker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Coin,
    BlueCoin,
    Diamond,
    FreeLife,
    InvincibilityPendant,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 5] = [
        CollectibleKind::Coin,
        CollectibleKind::BlueCoin,
        CollectibleKind::Diamond,
        CollectibleKind::FreeLife,
        CollectibleKind::InvincibilityPendant,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

/// Horizontal patrol range in tile units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatrolBounds {
    pub left: f64,
    pub right: f64,
}

impl PatrolBounds {
    pub fn contains(&self, x: f64) -> bool {
        self.left <= x && x <= self.right
    }
}
