use bytemuck::{Pod, Zeroable};
use foundation::math::Vec3;

use crate::domain::Domain;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// One instanced draw of a layer's mesh, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub position: [f32; 3],
    /// Heading in the ground plane (unit x/y).
    pub direction: [f32; 2],
    pub color: [f32; 3],
}

impl Instance {
    pub fn new(position: Vec3, direction: [f32; 2], color: [f32; 3]) -> Self {
        Self {
            position: position.to_f32(),
            direction,
            color,
        }
    }

    pub fn at(position: Vec3, color: [f32; 3]) -> Self {
        Self::new(position, [1.0, 0.0], color)
    }

    pub fn with_color(color: [f32; 3]) -> Self {
        Self::at(Vec3::ZERO, color)
    }
}

/// Drawable unit contributed by one domain.
///
/// The compositor never looks inside a layer; it only decides where the
/// layer goes in the frame's draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub domain: Domain,
    pub name: &'static str,
    /// Decals are drawn flat on the ground without depth writes.
    pub decal: bool,
    pub instances: Vec<Instance>,
}

impl Layer {
    pub fn new(id: u64, domain: Domain, name: &'static str) -> Self {
        Self {
            id: LayerId(id),
            domain,
            name,
            decal: false,
            instances: Vec::new(),
        }
    }

    pub fn decal(mut self) -> Self {
        self.decal = true;
        self
    }

    pub fn with_instances(mut self, instances: impl IntoIterator<Item = Instance>) -> Self {
        self.instances.extend(instances);
        self
    }

    /// Instance buffer as raw bytes.
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
