use cgmath::{Point3, Transform};
use serde_json::Value;
use wgpu::util::DeviceExt;

use crate::components::{
    color::Color,
    primitive::{ProjectionResult, RenderPrimitive},
    style::Style,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;

        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Vertex/index data for one projected layer. Lines are drawn as a
/// `LineList`; points as a `PointList` over their own vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlobeLayerMesh {
    pub line_vertices: Vec<LineVertex>,
    pub line_indices: Vec<u32>,
    pub point_vertices: Vec<LineVertex>,
}

/// The three arrays of a [`GlobeLayerMesh`] uploaded to the GPU.
pub struct GlobeLayerBuffers {
    pub line_vertex_buffer: wgpu::Buffer,
    pub line_index_buffer: wgpu::Buffer,
    pub num_line_indices: u32,
    pub point_vertex_buffer: wgpu::Buffer,
    pub num_points: u32,
}

pub struct MeshSystem<'a> {
    device: &'a wgpu::Device,
}

impl<'a> MeshSystem<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    fn create_buffer(
        &self,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            })
    }

    pub fn build_layer_buffers(&self, mesh: &GlobeLayerMesh) -> GlobeLayerBuffers {
        let (line_vertices, line_indices, point_vertices) = MeshSystem::layer_contents(mesh);
        GlobeLayerBuffers {
            line_vertex_buffer: self.create_buffer(
                "Globe Layer Line Vertex Buffer",
                line_vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            line_index_buffer: self.create_buffer(
                "Globe Layer Line Index Buffer",
                line_indices,
                wgpu::BufferUsages::INDEX,
            ),
            num_line_indices: mesh.line_indices.len() as u32,
            point_vertex_buffer: self.create_buffer(
                "Globe Layer Point Vertex Buffer",
                point_vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            num_points: mesh.point_vertices.len() as u32,
        }
    }

    /// Raw bytes for line vertices, line indices and point vertices, in
    /// upload order.
    pub fn layer_contents(mesh: &GlobeLayerMesh) -> (&[u8], &[u8], &[u8]) {
        (
            bytemuck::cast_slice(&mesh.line_vertices),
            bytemuck::cast_slice(&mesh.line_indices),
            bytemuck::cast_slice(&mesh.point_vertices),
        )
    }

    /// Flattens every primitive into GPU-ready arrays. With
    /// `apply_orientation` positions are rotated into the scene's y-up frame.
    pub fn build_layer_mesh(result: &ProjectionResult, apply_orientation: bool) -> GlobeLayerMesh {
        let place = |p: &Point3<f64>| -> [f32; 3] {
            let p = if apply_orientation {
                result.orientation.transform_point(*p)
            } else {
                *p
            };
            [p.x as f32, p.y as f32, p.z as f32]
        };

        let mut mesh = GlobeLayerMesh::default();

        for primitive in &result.primitives {
            match primitive {
                RenderPrimitive::Point(point) => {
                    let color = MeshSystem::style_rgba(&point.style, None);
                    mesh.point_vertices.push(LineVertex {
                        position: place(&point.position),
                        color,
                    });
                }
                RenderPrimitive::Line(line) => {
                    let color = MeshSystem::style_rgba(&line.style, Some(line.color));
                    let base = mesh.line_vertices.len() as u32;
                    mesh.line_vertices.extend(line.positions.iter().map(|p| LineVertex {
                        position: place(p),
                        color,
                    }));
                    // segments only between neighbours of the same line
                    for i in 1..line.positions.len() as u32 {
                        mesh.line_indices.push(base + i - 1);
                        mesh.line_indices.push(base + i);
                    }
                }
            }
        }

        mesh
    }

    // "color" may be a 0xrrggbb number or a "#rrggbb" / "#rgb" string,
    // opacity only counts when the material is transparent
    fn style_rgba(style: &Style, fallback: Option<Color>) -> [f32; 4] {
        let color = match style.get("color") {
            Some(Value::Number(n)) => n.as_u64().map(rgb_from_u64),
            Some(Value::String(s)) => s.strip_prefix('#').and_then(parse_hex_color),
            _ => None,
        }
        .or(fallback)
        .unwrap_or(Color {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        });

        let transparent = style
            .get("transparent")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let alpha = if transparent {
            style.get("opacity").and_then(Value::as_f64).unwrap_or(1.0)
        } else {
            1.0
        };

        color.to_rgba(alpha as f32)
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => u64::from_str_radix(hex, 16).ok().map(rgb_from_u64),
        // each digit doubles up, "f" -> "ff"
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            u64::from_str_radix(&expanded, 16).ok().map(rgb_from_u64)
        }
        _ => None,
    }
}

fn rgb_from_u64(value: u64) -> Color {
    Color {
        r: ((value >> 16) & 0xff) as f64 / 255.0,
        g: ((value >> 8) & 0xff) as f64 / 255.0,
        b: (value & 0xff) as f64 / 255.0,
    }
}
