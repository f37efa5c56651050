//! Pure projection of [`DashboardState`] into what a front end draws.

use std::fmt;

use serde_json::Number;
use shared::domain::{Direction, EpisodeSummary, LIGHT_GREEN};

use crate::controller::{ActionRecord, DashboardState};

/// Every n-th action of an episode is shown in its summary.
pub const ACTION_SAMPLE_STRIDE: usize = 5;

/// Queue strips draw at most this many markers; the label keeps the exact count.
pub const MAX_DRAWN_MARKERS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub episode: String,
    pub step: String,
    pub waiting_time: String,
    pub reward: String,
    pub epsilon: String,
    pub cars_passed: String,
}

impl StatsView {
    pub fn rows(&self) -> [(&'static str, &str); 6] {
        [
            ("Episode", self.episode.as_str()),
            ("Step", self.step.as_str()),
            ("Waiting Time", self.waiting_time.as_str()),
            ("Reward", self.reward.as_str()),
            ("Epsilon", self.epsilon.as_str()),
            ("Cars Passed", self.cars_passed.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightView {
    pub direction: Direction,
    pub red_active: bool,
    pub green_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueView {
    pub direction: Direction,
    pub markers: usize,
}

impl QueueView {
    pub fn drawn_markers(&self) -> usize {
        self.markers.min(MAX_DRAWN_MARKERS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItemView {
    pub headline: String,
    pub reward: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItemView {
    pub title: String,
    pub avg_reward: String,
    pub total_waiting_time: String,
    pub cars_passed: String,
    pub actions: String,
}

impl SummaryItemView {
    pub fn lines(&self) -> [&str; 5] {
        [
            self.title.as_str(),
            self.avg_reward.as_str(),
            self.total_waiting_time.as_str(),
            self.cars_passed.as_str(),
            self.actions.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsView {
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub reset_enabled: bool,
    pub training_toggle_enabled: bool,
    pub training_checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub connected: bool,
    pub stats: StatsView,
    pub lights: [LightView; 4],
    pub queues: [QueueView; 4],
    pub actions: Vec<ActionItemView>,
    pub summaries: Vec<SummaryItemView>,
    pub controls: ControlsView,
}

pub fn render(state: &DashboardState) -> DashboardView {
    let stats = &state.stats;
    DashboardView {
        connected: state.connected,
        stats: StatsView {
            episode: display_number(&stats.episode),
            step: display_number(&stats.step),
            waiting_time: display_number(&stats.waiting_time),
            reward: display_number(&stats.reward),
            epsilon: display_number(&stats.epsilon),
            cars_passed: display_number(&stats.cars_passed),
        },
        lights: Direction::ALL.map(|d| light_view(d, state.lights.get(d))),
        queues: Direction::ALL.map(|d| queue_view(d, state.queues.get(d))),
        actions: state.action_history.iter().map(action_item).collect(),
        summaries: state.episode_summaries.iter().map(summary_item).collect(),
        controls: controls(state),
    }
}

/// Red and green are exclusive: only a value of exactly 1 lights green.
pub fn light_view(direction: Direction, value: i64) -> LightView {
    let green = value == LIGHT_GREEN;
    LightView {
        direction,
        red_active: !green,
        green_active: green,
    }
}

pub fn queue_view(direction: Direction, count: u32) -> QueueView {
    QueueView {
        direction,
        markers: count as usize,
    }
}

pub fn controls(state: &DashboardState) -> ControlsView {
    let running = state.simulation_running;
    ControlsView {
        start_enabled: !running,
        stop_enabled: running,
        reset_enabled: !running,
        training_toggle_enabled: !running,
        training_checked: state.training_mode,
    }
}

pub fn action_item(record: &ActionRecord) -> ActionItemView {
    ActionItemView {
        headline: format!("Step {}: {}", record.step, record.action),
        reward: format!("Reward: {}", display_number(&record.reward)),
    }
}

pub fn summary_item(summary: &EpisodeSummary) -> SummaryItemView {
    SummaryItemView {
        title: format!("Episode {}", display_number(&summary.episode)),
        avg_reward: format!("Average Reward: {}", display_number(&summary.avg_reward)),
        total_waiting_time: format!(
            "Total Waiting Time: {}",
            display_number(&summary.total_waiting_time)
        ),
        cars_passed: format!("Cars Passed: {}", display_number(&summary.cars_passed)),
        actions: format!("Actions: {}", sample_actions(&summary.action_history)),
    }
}

/// Whole floats print without a fractional part (`1.0` shows as `1`), matching
/// how a browser prints the same value. Everything else keeps its wire text.
pub fn display_number(value: &Number) -> String {
    match value.as_f64() {
        Some(v) if value.is_f64() && v.fract() == 0.0 && v.abs() < 1e21 => {
            let v = if v == 0.0 { 0.0 } else { v };
            v.to_string()
        }
        _ => value.to_string(),
    }
}

/// Indices 0, 5, 10, ... joined by ", ", always followed by an ellipsis.
pub fn sample_actions(history: &[String]) -> String {
    let sampled: Vec<&str> = history
        .iter()
        .step_by(ACTION_SAMPLE_STRIDE)
        .map(String::as_str)
        .collect();
    format!("{}...", sampled.join(", "))
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |flag: bool| if flag { "on" } else { "off" };
        writeln!(
            f,
            "connected: {}  running: {}  training: {}",
            on_off(self.connected),
            on_off(self.controls.stop_enabled),
            on_off(self.controls.training_checked),
        )?;

        let stats = self
            .stats
            .rows()
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(f, "{stats}")?;

        for (light, queue) in self.lights.iter().zip(self.queues.iter()) {
            let signal = if light.green_active { "GREEN" } else { "RED" };
            writeln!(
                f,
                "{:<6} [{signal:<5}] {} ({})",
                light.direction.as_str(),
                "#".repeat(queue.drawn_markers()),
                queue.markers,
            )?;
        }

        writeln!(f, "Action history:")?;
        for item in &self.actions {
            writeln!(f, "  {}  {}", item.headline, item.reward)?;
        }

        writeln!(f, "Episode summaries:")?;
        for item in &self.summaries {
            writeln!(f, "  {}", item.lines().join(" | "))?;
        }
        Ok(())
    }
}
