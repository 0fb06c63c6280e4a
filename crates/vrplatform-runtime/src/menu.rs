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

//! Text menu driving an [`Engine`] from any line-based input.
//!
//! Each line read is one answer. End of input behaves like choosing *Exit*.

use crate::Engine;
use std::io::{self, BufRead, Write};
use vrplatform_core::math::Vec3;
use vrplatform_core::ObjectType;

/// Where option 2 drops its demonstration cylinder.
pub const CREATOR_SPAWN_POSITION: Vec3 = Vec3::new(3.0, 1.0, -3.0);

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Play mode simulation.
    Play,
    /// Creator mode demonstration.
    Creator,
    /// Connect, simulate, disconnect.
    Multiplayer,
    /// Save the scene under a name.
    Save,
    /// Load a named scene.
    Load,
    /// Leave the menu.
    Exit,
}

impl MenuChoice {
    /// Parses a menu answer such as `"3"`.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            "1" => Some(Self::Play),
            "2" => Some(Self::Creator),
            "3" => Some(Self::Multiplayer),
            "4" => Some(Self::Save),
            "5" => Some(Self::Load),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

fn write_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "============================================")?;
    writeln!(out, "       VR GAME PLATFORM - DEMO MENU        ")?;
    writeln!(out, "============================================")?;
    writeln!(out, "1. Play Mode - Experience the scene")?;
    writeln!(out, "2. Creator Mode - Edit and create")?;
    writeln!(out, "3. Multiplayer - Connect to server")?;
    writeln!(out, "4. Save Scene")?;
    writeln!(out, "5. Load Scene")?;
    writeln!(out, "6. Exit")?;
    writeln!(out, "============================================")?;
    write!(out, "Select option: ")?;
    out.flush()
}

/// Reads one line without its terminator. `None` at end of input.
fn read_answer(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

fn simulate(engine: &mut Engine, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "[Simulation] Running VR simulation for {} steps...",
        engine.config().simulation_steps
    )?;
    match engine.simulate() {
        Ok(()) => writeln!(out, "[Simulation] Simulation complete!"),
        Err(e) => writeln!(out, "[Simulation] Failed: {e}"),
    }
}

/// Runs the menu until *Exit* or end of input.
///
/// Engine failures are reported on `output` and the menu keeps going; only
/// I/O errors on the streams themselves end it early.
pub fn run_menu<R: BufRead, W: Write>(
    engine: &mut Engine,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    let out = &mut output;
    loop {
        write_menu(out)?;
        let Some(answer) = read_answer(&mut input)? else {
            writeln!(out)?;
            writeln!(out, "[Exit] End of input, shutting down VR Platform...")?;
            break;
        };

        match MenuChoice::parse(&answer) {
            Some(MenuChoice::Play) => {
                writeln!(out, "\n[Play Mode] Starting game...")?;
                engine.creator_and_scene_mut().0.enter_play_mode();
                simulate(engine, out)?;
                engine.creator_and_scene_mut().0.exit_play_mode();
            }
            Some(MenuChoice::Creator) => {
                writeln!(out, "\n[Creator Mode] Entering game creator...")?;
                writeln!(out, "Creator tools active:")?;
                writeln!(out, "  - Select objects with trigger")?;
                writeln!(out, "  - Grab and move with grip button")?;
                writeln!(out, "  - Spawn new objects from menu")?;

                let (creator, scene) = engine.creator_and_scene_mut();
                creator.enable_move_tool();
                let id =
                    creator.spawn_object(scene, ObjectType::Cylinder, CREATOR_SPAWN_POSITION);
                writeln!(out, "\n  -> Spawned a new cylinder ({id})")?;

                simulate(engine, out)?;
            }
            Some(MenuChoice::Multiplayer) => {
                writeln!(out, "\n[Multiplayer] Connecting to server...")?;
                let address = engine.config().server_address.clone();
                match engine.connect_to_server(&address) {
                    Ok(()) => {
                        writeln!(out, "✓ Connected! You can now play with other users.")?;
                        simulate(engine, out)?;
                        engine.disconnect();
                        writeln!(out, "Disconnected from {address}")?;
                    }
                    Err(e) => writeln!(out, "✗ Connection failed: {e}")?,
                }
            }
            Some(MenuChoice::Save) => {
                write!(out, "\n[Save] Enter game name: ")?;
                out.flush()?;
                let Some(name) = read_answer(&mut input)? else {
                    break;
                };
                match engine.save_game(name.trim()) {
                    Ok(path) => writeln!(out, "✓ Game saved to {}", path.display())?,
                    Err(e) => writeln!(out, "✗ Save failed: {e}")?,
                }
            }
            Some(MenuChoice::Load) => {
                write!(out, "\n[Load] Enter game name: ")?;
                out.flush()?;
                let Some(name) = read_answer(&mut input)? else {
                    break;
                };
                match engine.load_game(name.trim()) {
                    Ok(path) => writeln!(out, "✓ Game loaded from {}", path.display())?,
                    Err(e) => writeln!(out, "✗ Load failed: {e}")?,
                }
            }
            Some(MenuChoice::Exit) => {
                writeln!(out, "\n[Exit] Shutting down VR Platform...")?;
                break;
            }
            None => writeln!(out, "\nInvalid option. Please try again.")?,
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Play));
        assert_eq!(MenuChoice::parse(" 6 \n"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("play"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_read_answer_strips_line_endings() {
        let mut input = io::Cursor::new("first\r\nsecond\nlast");
        assert_eq!(read_answer(&mut input).unwrap().as_deref(), Some("first"));
        assert_eq!(read_answer(&mut input).unwrap().as_deref(), Some("second"));
        assert_eq!(read_answer(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_answer(&mut input).unwrap(), None);
    }
}
