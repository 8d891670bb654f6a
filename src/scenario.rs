//! The per-scenario entry point tying narration to its collaborators.

use crate::config::ScenarioConfig;
use crate::environment::Environment;
use crate::error::Result;
use crate::mode::ScenarioMode;
use crate::narrate::{describe_actions, DisplayTags, Narrator};
use crate::plot::{JsonScenePlotter, ScenePlotter};
use crate::record::{PromptRecord, Record, SceneRecorder};
use log::debug;
use std::path::Path;

/// The number of vehicles, ego included, recorded and plotted per frame.
const SNAPSHOT_COUNT: usize = 10;

/// Describes the frames of one driving scenario.
///
/// The scenario mode is chosen once from the environment type and never
/// changes. Every description is recorded along with the vehicles it was
/// made from.
pub struct Scenario<E: Environment, R: SceneRecorder> {
    env: E,
    env_type: String,
    mode: ScenarioMode,
    config: ScenarioConfig,
    recorder: R,
    plotter: Box<dyn ScenePlotter>,
    tags: DisplayTags,
}

impl<E: Environment, R: SceneRecorder> Scenario<E, R> {
    /// Creates a scenario with the default settings for `env_type`.
    pub fn new(env: E, env_type: &str, seed: u64, recorder: R) -> Self {
        Self::with_config(env, env_type, seed, recorder, ScenarioConfig::for_env_type(env_type))
    }

    /// Creates a scenario with explicit settings.
    pub fn with_config(
        env: E,
        env_type: &str,
        seed: u64,
        mut recorder: R,
        config: ScenarioConfig,
    ) -> Self {
        let mode = ScenarioMode::from_env_type(env_type);
        debug!("Scenario mode for {:?} is {}", env_type, mode);
        recorder.record(Record::SimInfo {
            env_type: env_type.to_owned(),
            seed,
        });
        recorder.record(Record::Network(env.network().clone()));
        Self {
            env,
            env_type: env_type.to_owned(),
            mode,
            config,
            recorder,
            plotter: Box::new(JsonScenePlotter),
            tags: DisplayTags::new(),
        }
    }

    /// Replaces the plotter used by [`Scenario::plot_sce`].
    pub fn with_plotter(mut self, plotter: impl ScenePlotter + 'static) -> Self {
        self.plotter = Box::new(plotter);
        self
    }

    /// Describes the current state of the environment as seen from ego.
    pub fn describe(&mut self, frame: u64) -> Result<String> {
        let ego = self.env.ego();
        let vehicles = std::iter::once(ego)
            .chain(self.env.close_vehicles(SNAPSHOT_COUNT - 1, true))
            .cloned()
            .collect();
        self.recorder.record(Record::Vehicles { frame, vehicles });

        Narrator::new(&self.env, &self.config, self.mode, &mut self.tags).describe()
    }

    /// Lists the actions ego may take now.
    pub fn available_actions_description(&self) -> String {
        describe_actions(&self.env.available_actions(), self.mode)
    }

    /// Records a prompt and the policy's reply.
    pub fn prompts_commit(
        &mut self,
        frame: u64,
        vector_id: &str,
        done: bool,
        description: &str,
        fewshots: &str,
        thoughts_and_action: &str,
    ) {
        self.recorder.record(Record::Prompt(PromptRecord {
            frame,
            vector_id: vector_id.to_owned(),
            done,
            description: description.to_owned(),
            fewshots: fewshots.to_owned(),
            thoughts_and_action: thoughts_and_action.to_owned(),
        }));
    }

    /// Plots the vehicles around ego to a file.
    pub fn plot_sce(&self, path: impl AsRef<Path>) -> Result<()> {
        let vehicles = self.env.close_vehicles(SNAPSHOT_COUNT - 1, true);
        self.plotter
            .plot_scene(self.env.network(), &vehicles, self.env.ego(), path.as_ref())
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Gets the environment for updating between frames.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn env_type(&self) -> &str {
        &self.env_type
    }

    pub fn mode(&self) -> ScenarioMode {
        self.mode
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Consumes the scenario, returning its recorder.
    pub fn into_recorder(self) -> R {
        self.recorder
    }
}
