//! Drawing surface contract.
//!
//! The renderer does not rasterize anything itself. It emits [`DrawCommand`]s in
//! painting order to a [`DrawingSurface`]; a backend is free to replay them on any
//! vector canvas. [`CommandRecorder`] keeps them in memory, which is what the binary
//! serializes and what the tests inspect.

use serde::Serialize;

use crate::constants::Pixel;
use crate::style::{CompositeOp, Marker, Paint, Rgba32, StrokeStyle};
use crate::view::PixelPoint;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "command")]
pub enum DrawCommand {
    /// Stroke an open polyline.
    StrokePath {
        spkid: String,
        vertices: Vec<PixelPoint>,
        style: StrokeStyle,
    },
    /// Draw the glyph at the current position of a body. Circles are filled, tails
    /// are stroked with their own width.
    Marker {
        spkid: String,
        marker: Marker,
        color: Rgba32,
        comp_op: CompositeOp,
    },
    FillCircle {
        center: PixelPoint,
        radius: Pixel,
        paint: Paint,
        comp_op: CompositeOp,
    },
    /// Fill the whole frame.
    FillAll { color: Rgba32, comp_op: CompositeOp },
}

pub trait DrawingSurface {
    fn draw(&mut self, command: DrawCommand);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Stroke commands, in painting order.
    pub fn strokes(&self) -> impl Iterator<Item = (&str, &[PixelPoint], &StrokeStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokePath {
                spkid,
                vertices,
                style,
            } => Some((spkid.as_str(), vertices.as_slice(), style)),
            _ => None,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.commands)
    }
}

impl DrawingSurface for CommandRecorder {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
