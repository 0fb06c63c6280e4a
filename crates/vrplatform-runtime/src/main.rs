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

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use vrplatform_runtime::cli::Args;
use vrplatform_runtime::demo::example_scene;
use vrplatform_runtime::menu::run_menu;
use vrplatform_runtime::{Engine, RuntimeConfig};

fn print_banner() {
    println!();
    println!("    ╔════════════════════════════════════════════╗");
    println!("    ║      VR GAME PLATFORM v{:<20}║", env!("CARGO_PKG_VERSION"));
    println!("    ║      Play & Create in Virtual Reality      ║");
    println!("    ╚════════════════════════════════════════════╝");
    println!();
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = RuntimeConfig::load(&args.config)
        .with_context(|| format!("Failed to load config '{}'", args.config.display()))?;
    args.apply(&mut config);

    let mut engine = Engine::new(config);
    engine
        .initialize()
        .context("Failed to initialize VR Engine")?;
    example_scene(engine.scene_mut());

    if let Some(frames) = args.headless_loop {
        let produced = engine.run(Some(frames))?;
        log::info!("Headless loop rendered {produced} frames.");
    } else {
        print_banner();
        let stdin = io::stdin();
        run_menu(&mut engine, stdin.lock(), io::stdout().lock())
            .context("Menu I/O failed")?;
    }

    engine.shutdown();
    println!();
    println!("Thank you for using VR Game Platform!");
    Ok(())
}
