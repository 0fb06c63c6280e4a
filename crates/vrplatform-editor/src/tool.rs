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

use std::fmt;
use vrplatform_xr::GizmoKind;

/// The manipulation mode of the game creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    /// Pick objects without changing them.
    #[default]
    Select,
    /// Gripping drags the selection to the hand.
    Move,
    /// Gripping turns the selection with the hand.
    Rotate,
    /// Gripping and raising or lowering the hand resizes the selection.
    Scale,
    /// Place new objects.
    Spawn,
}

impl Tool {
    /// The gizmo drawn around the selection while this tool is active.
    pub fn gizmo_kind(&self) -> GizmoKind {
        match self {
            Tool::Select | Tool::Spawn => GizmoKind::Selection,
            Tool::Move => GizmoKind::Translate,
            Tool::Rotate => GizmoKind::Rotate,
            Tool::Scale => GizmoKind::Scale,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Select => "Select",
            Tool::Move => "Move",
            Tool::Rotate => "Rotate",
            Tool::Scale => "Scale",
            Tool::Spawn => "Spawn",
        };
        f.write_str(name)
    }
}
