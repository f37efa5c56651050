use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Approach into the intersection. Wire names are capitalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per approach. Every direction must be present on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerDirection<T> {
    #[serde(rename = "North")]
    pub north: T,
    #[serde(rename = "South")]
    pub south: T,
    #[serde(rename = "East")]
    pub east: T,
    #[serde(rename = "West")]
    pub west: T,
}

impl<T: Copy> PerDirection<T> {
    pub fn splat(value: T) -> Self {
        Self {
            north: value,
            south: value,
            east: value,
            west: value,
        }
    }

    pub fn get(&self, direction: Direction) -> T {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, T)> + '_ {
        Direction::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

/// Raw signal per direction: 1 is green, anything else is shown as red.
pub type LightStates = PerDirection<i64>;

/// Waiting vehicles per direction.
pub type QueueCounts = PerDirection<u32>;

pub const LIGHT_GREEN: i64 = 1;
pub const LIGHT_RED: i64 = 0;

/// Per-step snapshot pushed by the simulation server.
///
/// The six stat fields stay as JSON numbers so the dashboard can show
/// exactly what the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepUpdate {
    pub episode: Number,
    pub step: Number,
    pub waiting_time: Number,
    pub reward: Number,
    pub epsilon: Number,
    pub cars_passed: Number,
    pub lights: LightStates,
    pub queues: QueueCounts,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<bool>,
}

/// Emitted once when an episode completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: Number,
    pub avg_reward: Number,
    pub total_waiting_time: Number,
    pub cars_passed: Number,
    pub action_history: Vec<String>,
}
