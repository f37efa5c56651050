//! Dashboard view-model: owns the displayed state, applies server events and
//! turns user actions into outbound requests.

use anyhow::{anyhow, Result};
use serde_json::Number;
use shared::{
    domain::{EpisodeSummary, LightStates, QueueCounts, StepUpdate, LIGHT_RED},
    protocol::{ClientRequest, ServerEvent},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    history::{BoundedHistory, ACTION_HISTORY_CAP, EPISODE_SUMMARY_CAP},
    transport::ChannelEvent,
    view::{self, DashboardView},
};

/// Outbound side of the event channel as seen by the controller.
pub trait RequestSink {
    fn send(&self, request: ClientRequest) -> Result<()>;
}

impl RequestSink for mpsc::UnboundedSender<ClientRequest> {
    fn send(&self, request: ClientRequest) -> Result<()> {
        mpsc::UnboundedSender::send(self, request)
            .map_err(|err| anyhow!("request channel closed before {}", err.0.event_name()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Start,
    Stop,
    Reset,
    SetTraining(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatValues {
    pub episode: Number,
    pub step: Number,
    pub waiting_time: Number,
    pub reward: Number,
    pub epsilon: Number,
    pub cars_passed: Number,
}

impl Default for StatValues {
    fn default() -> Self {
        Self {
            episode: Number::from(0),
            step: Number::from(0),
            waiting_time: Number::from(0),
            reward: Number::from(0),
            epsilon: Number::from(0),
            cars_passed: Number::from(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub step: Number,
    pub action: String,
    pub reward: Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub connected: bool,
    pub simulation_running: bool,
    pub training_mode: bool,
    pub stats: StatValues,
    pub lights: LightStates,
    pub queues: QueueCounts,
    pub action_history: BoundedHistory<ActionRecord>,
    pub episode_summaries: BoundedHistory<EpisodeSummary>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            connected: false,
            simulation_running: false,
            training_mode: false,
            stats: StatValues::default(),
            lights: LightStates::splat(LIGHT_RED),
            queues: QueueCounts::splat(0),
            action_history: BoundedHistory::new(ACTION_HISTORY_CAP),
            episode_summaries: BoundedHistory::new(EPISODE_SUMMARY_CAP),
        }
    }
}

pub struct DashboardController<S: RequestSink> {
    state: DashboardState,
    sink: S,
}

impl<S: RequestSink> DashboardController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: DashboardState::default(),
            sink,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn sink(&self) -> &S {
        &self.sink
    }

    pub fn render(&self) -> DashboardView {
        view::render(&self.state)
    }

    /// Applies a user action if its control is currently enabled.
    pub fn dispatch(&mut self, action: UserAction) -> bool {
        let controls = view::controls(&self.state);
        let enabled = match action {
            UserAction::Start => controls.start_enabled,
            UserAction::Stop => controls.stop_enabled,
            UserAction::Reset => controls.reset_enabled,
            UserAction::SetTraining(_) => controls.training_toggle_enabled,
        };
        if !enabled {
            debug!(?action, "ignoring action for disabled control");
            return false;
        }

        match action {
            UserAction::Start => self.start_simulation(),
            UserAction::Stop => self.stop_simulation(),
            UserAction::Reset => self.reset_simulation(),
            UserAction::SetTraining(checked) => self.toggle_training(checked),
        }
        true
    }

    pub fn start_simulation(&mut self) {
        self.state.simulation_running = true;
        info!(training = self.state.training_mode, "starting simulation");
        self.emit(ClientRequest::StartSimulation {
            training: self.state.training_mode,
        });
    }

    pub fn stop_simulation(&mut self) {
        self.state.simulation_running = false;
        info!("stopping simulation");
        self.emit(ClientRequest::StopSimulation);
    }

    /// Clears the dashboard before the server confirms the reset.
    pub fn reset_simulation(&mut self) {
        self.reset_ui();
        info!("resetting simulation");
        self.emit(ClientRequest::ResetSimulation);
    }

    pub fn toggle_training(&mut self, checked: bool) {
        self.state.training_mode = checked;
        info!(training = checked, "training mode toggled");
        self.emit(ClientRequest::ToggleTraining { training: checked });
    }

    pub fn handle_channel_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Connected => {
                self.state.connected = true;
                info!("connected to simulation server");
            }
            ChannelEvent::Disconnected => {
                self.state.connected = false;
                // The request channel is gone, so only the local controls revert.
                self.state.simulation_running = false;
                warn!("disconnected from simulation server");
            }
            ChannelEvent::Server(event) => self.apply_server_event(event),
        }
    }

    pub fn apply_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::UpdateUi(update) => self.apply_step_update(update),
            ServerEvent::EpisodeSummary(summary) => {
                debug!(episode = %summary.episode, "episode summary received");
                self.state.episode_summaries.push_front(summary);
            }
            ServerEvent::SimulationReset => {
                info!("server reset the simulation");
                self.reset_ui();
            }
            ServerEvent::TrainingStatus { training } => {
                debug!(training, "server training status");
                self.state.training_mode = training;
            }
        }
    }

    fn apply_step_update(&mut self, update: StepUpdate) {
        debug!(
            episode = %update.episode,
            step = %update.step,
            action = %update.action,
            "step update"
        );
        let StepUpdate {
            episode,
            step,
            waiting_time,
            reward,
            epsilon,
            cars_passed,
            lights,
            queues,
            action,
            training: _,
        } = update;

        self.state.stats = StatValues {
            episode,
            step: step.clone(),
            waiting_time,
            reward: reward.clone(),
            epsilon,
            cars_passed,
        };
        self.state.lights = lights;
        self.state.queues = queues;
        self.state
            .action_history
            .push_front(ActionRecord { step, action, reward });
    }

    pub fn reset_ui(&mut self) {
        self.state.stats = StatValues::default();
        self.state.lights = LightStates::splat(LIGHT_RED);
        self.state.queues = QueueCounts::splat(0);
        self.state.action_history.clear();
        self.state.episode_summaries.clear();
    }

    fn emit(&self, request: ClientRequest) {
        let event = request.event_name();
        if let Err(err) = self.sink.send(request) {
            warn!(event, "failed to emit request: {err}");
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
