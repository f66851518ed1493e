use bytemuck::{Pod, Zeroable};
use foundation::Viewport;
use foundation::math::Mat4;
use layers::{Layer, LayerId};
use runtime::Frame;
use scene::Projection;
use tracing::debug;

/// Camera matrices as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub perspective: [[f32; 4]; 4],
}

/// Everything the rendering backend needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInputs {
    pub frame: Frame,
    /// Composited layers, in draw order.
    pub layers: Vec<Layer>,
    pub viewport: Viewport,
    pub view: Mat4,
    pub perspective: Mat4,
    pub clear_color: [f32; 4],
    /// Physical pixels per device-independent pixel.
    pub retina_factor: f64,
}

impl FrameInputs {
    pub fn new(
        frame: Frame,
        layers: Vec<Layer>,
        viewport: Viewport,
        projection: &Projection,
        clear_color: [f32; 4],
        retina_factor: f64,
    ) -> Self {
        Self {
            frame,
            layers,
            viewport,
            view: projection.view,
            perspective: projection.perspective,
            clear_color,
            retina_factor,
        }
    }

    /// Backing-store size in physical pixels.
    pub fn physical_size(&self) -> [u32; 2] {
        let scale = |v: f64| (v * self.retina_factor).round().max(0.0) as u32;
        [scale(self.viewport.width), scale(self.viewport.height)]
    }

    pub fn uniforms(&self) -> CameraUniforms {
        CameraUniforms {
            view: self.view.to_cols_f32(),
            perspective: self.perspective.to_cols_f32(),
        }
    }

    pub fn instance_count(&self) -> usize {
        self.layers.iter().map(|l| l.instances.len()).sum()
    }
}

/// Consumer of composed frames (the drawing side of the viewer).
pub trait RenderBackend {
    fn render_frame(&mut self, inputs: &FrameInputs);
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Clear {
        color: [f32; 4],
    },
    SetCamera {
        uniforms: CameraUniforms,
    },
    DrawLayer {
        id: LayerId,
        name: &'static str,
        decal: bool,
        instances: usize,
        bytes: usize,
    },
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderFrame {
    pub frame_index: u64,
    pub size_px: [u32; 2],
    pub commands: Vec<RenderCommand>,
}

impl RenderFrame {
    pub fn drawn_layers(&self) -> Vec<LayerId> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawLayer { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

pub struct Renderer;

impl Renderer {
    /// Translates frame inputs into an ordered command list.
    ///
    /// Layers are emitted in the order given; layers without instances are
    /// skipped.
    pub fn collect(inputs: &FrameInputs) -> RenderFrame {
        let mut frame = RenderFrame {
            frame_index: inputs.frame.index,
            size_px: inputs.physical_size(),
            commands: Vec::with_capacity(inputs.layers.len() + 2),
        };
        frame.commands.push(RenderCommand::Clear {
            color: inputs.clear_color,
        });
        frame.commands.push(RenderCommand::SetCamera {
            uniforms: inputs.uniforms(),
        });
        for layer in inputs.layers.iter().filter(|l| !l.instances.is_empty()) {
            frame.commands.push(RenderCommand::DrawLayer {
                id: layer.id,
                name: layer.name,
                decal: layer.decal,
                instances: layer.instances.len(),
                bytes: layer.instance_bytes().len(),
            });
        }
        frame
    }
}

/// Headless backend that records the command list of every frame.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    frames: Vec<RenderFrame>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }

    pub fn take_frames(&mut self) -> Vec<RenderFrame> {
        std::mem::take(&mut self.frames)
    }
}

impl RenderBackend for CommandRecorder {
    fn render_frame(&mut self, inputs: &FrameInputs) {
        let frame = Renderer::collect(inputs);
        debug!(
            frame = frame.frame_index,
            width = frame.size_px[0],
            height = frame.size_px[1],
            commands = frame.commands.len(),
            instances = inputs.instance_count(),
            "recorded frame"
        );
        self.frames.push(frame);
    }
}
