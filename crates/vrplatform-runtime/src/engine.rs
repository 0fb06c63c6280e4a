// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The engine context and its frame loop.

use crate::config::RuntimeConfig;
use crate::connection::{scene_event_message, ServerConnection};
use crate::error::EngineError;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use vrplatform_editor::{publish, GameCreator};
use vrplatform_scene::Scene;
use vrplatform_xr::{
    Eye, FrameTiming, HandTracker, HeadlessStereoRenderer, SimulatedHandTracker, StereoRenderer,
    Stopwatch,
};

/// Asks a running [`Engine::run`] loop to return after its current frame.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Requests the loop to stop.
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owns every subsystem of a running platform instance.
///
/// The engine is an explicit value: create one, [`initialize`](Self::initialize)
/// it, then drive it with [`run`](Self::run) or step by step with
/// [`frame`](Self::frame). Dropping an initialized engine shuts it down.
#[derive(Debug)]
pub struct Engine {
    config: RuntimeConfig,
    renderer: Box<dyn StereoRenderer>,
    hand_tracker: Box<dyn HandTracker>,
    scene: Scene,
    creator: GameCreator,
    connection: ServerConnection,
    user_token: Option<String>,
    timing: FrameTiming,
    running: Arc<AtomicBool>,
    initialized: bool,
}

impl Engine {
    /// An engine on the headless renderer and the simulated hand tracker.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_backends(
            config,
            Box::new(HeadlessStereoRenderer::new()),
            Box::new(SimulatedHandTracker::new()),
        )
    }

    /// An engine on caller-provided backends.
    pub fn with_backends(
        config: RuntimeConfig,
        renderer: Box<dyn StereoRenderer>,
        hand_tracker: Box<dyn HandTracker>,
    ) -> Self {
        Self {
            config,
            renderer,
            hand_tracker,
            scene: Scene::new(),
            creator: GameCreator::new(),
            connection: ServerConnection::new(),
            user_token: None,
            timing: FrameTiming::default(),
            running: Arc::new(AtomicBool::new(false)),
            initialized: false,
        }
    }

    /// Brings up the renderer at the configured size, then hand tracking, and
    /// starts from an empty scene.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.initialized {
            log::warn!("Engine already initialized.");
            return Ok(());
        }
        log::info!("Initializing VR Platform Engine...");

        let render = self.config.render;
        self.renderer.initialize(render.width, render.height)?;
        if let Err(e) = self.hand_tracker.initialize() {
            self.renderer.shutdown();
            return Err(e.into());
        }

        self.scene = Scene::new();
        self.creator = GameCreator::new();
        self.initialized = true;
        log::info!("VR Platform Engine initialized successfully!");
        Ok(())
    }

    /// Whether [`initialize`](Self::initialize) succeeded and no shutdown followed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Disconnects, drops editor state, clears the scene and releases the renderer.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        log::info!("Shutting down...");

        self.stop();
        self.connection.disconnect();
        self.creator = GameCreator::new();
        self.scene.clear();
        self.scene.events().drain();
        self.renderer.shutdown();
        self.initialized = false;

        log::info!("Engine systems shutdown complete.");
    }

    /// Runs the frame loop until [`stop`](Self::stop) is called or
    /// `frame_limit` frames have been produced. Returns the frame count.
    pub fn run(&mut self, frame_limit: Option<u64>) -> Result<u64, EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        log::info!("Starting main loop...");

        self.running.store(true, Ordering::SeqCst);
        let interval = Duration::from_millis(self.config.frame_interval_ms);
        let mut frame_clock = Stopwatch::new();
        let mut frames = 0u64;

        while self.running.load(Ordering::SeqCst) {
            if frame_limit.is_some_and(|limit| frames >= limit) {
                break;
            }
            let frame_watch = Stopwatch::new();
            let dt = frame_clock.restart().as_secs_f32();

            self.frame(dt);

            if let Some(remaining) = interval.checked_sub(frame_watch.elapsed()) {
                thread::sleep(remaining);
            }
            self.timing.record_frame(frame_watch.elapsed_ms_f64());
            frames += 1;
        }
        self.running.store(false, Ordering::SeqCst);

        let stats = self.timing.stats();
        log::info!(
            "Main loop finished after {frames} frames (p50 {:.2} ms, p99 {:.2} ms, {:.1}% over budget)",
            stats.p50_ms,
            stats.p99_ms,
            stats.missed_pct
        );
        Ok(frames)
    }

    /// Produces one frame: input, update, render, then network forwarding.
    pub fn frame(&mut self, dt: f32) {
        self.process_input();
        self.update(dt);
        self.render();
        self.forward_scene_events();
    }

    fn process_input(&mut self) {
        self.hand_tracker.update();
    }

    fn update(&mut self, dt: f32) {
        self.creator
            .update(dt, self.hand_tracker.as_ref(), &mut self.scene);
        self.scene.update(dt);
    }

    fn render(&mut self) {
        let renderer = self.renderer.as_mut();
        renderer.begin_frame();
        for eye in Eye::BOTH {
            renderer.render_eye(eye);
            self.scene.render(renderer);
            self.creator.render(renderer, &self.scene);
        }
        renderer.submit_frame();
        renderer.end_frame();
    }

    /// Sends pending scene changes to the server while connected. Changes made
    /// offline are discarded.
    fn forward_scene_events(&mut self) {
        for event in self.scene.events().drain() {
            if !self.connection.is_connected() {
                continue;
            }
            let message = scene_event_message(&event, &self.scene);
            if let Err(e) = self.connection.send(message) {
                log::warn!("Dropped scene update for {}: {e}", event.object_id());
            }
        }
    }

    /// Makes a running loop return after its current frame.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// A handle that stops the loop from elsewhere, e.g. another thread.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.running))
    }

    /// Whether [`run`](Self::run) is looping.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Steps hands and scene `simulation_steps` times, pausing
    /// `simulation_step_ms` between steps. The creator is not updated.
    pub fn simulate(&mut self) -> Result<(), EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        let steps = self.config.simulation_steps;
        let dt = self.config.simulation_dt;
        let pause = Duration::from_millis(self.config.simulation_step_ms);
        log::info!("Running VR simulation for {steps} steps...");

        for step in 0..steps {
            log::info!("Simulation frame {step} - tracking hands, updating scene");
            self.hand_tracker.update();
            self.scene.update(dt);
            self.forward_scene_events();
            thread::sleep(pause);
        }

        log::info!("Simulation complete.");
        Ok(())
    }

    /// Connects the client link to `address`.
    pub fn connect_to_server(&mut self, address: &str) -> Result<(), EngineError> {
        self.connection.connect(address)?;
        Ok(())
    }

    /// Drops the client link.
    pub fn disconnect(&mut self) {
        self.connection.disconnect();
    }

    /// Whether the client link is up.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Stores the account token of the signed-in user.
    pub fn set_user_token(&mut self, token: impl Into<String>) {
        self.user_token = Some(token.into());
    }

    /// The account token, if a user signed in.
    pub fn user_token(&self) -> Option<&str> {
        self.user_token.as_deref()
    }

    /// Saves the scene as `<games_dir>/<name>.vrgame`.
    pub fn save_game(&self, name: &str) -> Result<PathBuf, EngineError> {
        Ok(self
            .creator
            .save_game(&self.scene, &self.config.games_dir, name)?)
    }

    /// Replaces the scene with `<games_dir>/<name>.vrgame` and drops the
    /// creator's selection, which pointed into the old scene. On error both
    /// are left untouched.
    pub fn load_game(&mut self, name: &str) -> Result<PathBuf, EngineError> {
        let path = publish::game_path(&self.config.games_dir, name)?;
        self.scene.load(&path)?;
        self.creator.forget_selection();
        log::info!("Game loaded: {name}");
        Ok(path)
    }

    /// The runtime settings.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The live scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The live scene, mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The game creator.
    pub fn creator(&self) -> &GameCreator {
        &self.creator
    }

    /// The creator together with the scene it edits.
    pub fn creator_and_scene_mut(&mut self) -> (&mut GameCreator, &mut Scene) {
        (&mut self.creator, &mut self.scene)
    }

    /// The hand tracker.
    pub fn hand_tracker(&self) -> &dyn HandTracker {
        self.hand_tracker.as_ref()
    }

    /// The stereo renderer.
    pub fn renderer(&self) -> &dyn StereoRenderer {
        self.renderer.as_ref()
    }

    /// The client link.
    pub fn connection(&self) -> &ServerConnection {
        &self.connection
    }

    /// The client link, mutably.
    pub fn connection_mut(&mut self) -> &mut ServerConnection {
        &mut self.connection
    }

    /// Frame durations recorded by [`run`](Self::run).
    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.initialized {
            log::info!("Engine is being dropped. Performing controlled shutdown...");
            self.shutdown();
        }
    }
}
