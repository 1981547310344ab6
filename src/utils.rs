use wgpu::util::DeviceExt;
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    }];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Primitive topology the index list is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Disconnected line segments, two indices per edge.
    Lines,
    /// Independent triangles, three indices per face half.
    Triangles,
}

impl DrawMode {
    pub fn topology(&self) -> wgpu::PrimitiveTopology {
        match self {
            DrawMode::Lines => wgpu::PrimitiveTopology::LineList,
            DrawMode::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub mode: DrawMode,
}

impl Mesh {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {
        let vertices = bytemuck::cast_slice(&self.vertices);
        let indices = bytemuck::cast_slice(&self.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Index Buffer"),
            contents: indices,
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.index_count(),
        }
    }
}

/// Corners of the unit cube centred on the origin
pub fn cube_vertices() -> Vec<Vertex> {
    vec![
        Vertex { pos: [-0.5, -0.5, -0.5] },
        Vertex { pos: [0.5, -0.5, -0.5] },
        Vertex { pos: [0.5, 0.5, -0.5] },
        Vertex { pos: [-0.5, 0.5, -0.5] },
        Vertex { pos: [-0.5, -0.5, 0.5] },
        Vertex { pos: [0.5, -0.5, 0.5] },
        Vertex { pos: [0.5, 0.5, 0.5] },
        Vertex { pos: [-0.5, 0.5, 0.5] },
    ]
}

/// Cube edges as a line list (24 indices)
pub fn wireframe_cube_mesh() -> Mesh {
    let indices = vec![
        0, 1, 1, 2, 2, 3, 3, 0, // back
        4, 5, 5, 6, 6, 7, 7, 4, // front
        0, 4, 1, 5, 2, 6, 3, 7, // sides
    ];

    Mesh { vertices: cube_vertices(), indices, mode: DrawMode::Lines }
}

/// Cube faces as a triangle list (36 indices).
/// Winding is not consistent across faces, so the pipeline must not cull.
pub fn solid_cube_mesh() -> Mesh {
    let indices = vec![
        0, 1, 2, 0, 2, 3, // back
        4, 5, 6, 4, 6, 7, // front
        1, 2, 6, 1, 5, 6, // right
        0, 3, 4, 3, 4, 7, // left
        0, 1, 5, 0, 4, 5, // bottom
        2, 3, 6, 3, 6, 7, // top
    ];

    Mesh { vertices: cube_vertices(), indices, mode: DrawMode::Triangles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn corner(mesh: &Mesh, idx: u32) -> Vec3 {
        Vec3::from(mesh.vertices[idx as usize].pos)
    }

    #[test]
    fn test_wireframe_edges() {
        let mesh = wireframe_cube_mesh();
        assert_eq!(mesh.index_count(), 24);
        assert_eq!(mesh.mode.topology(), wgpu::PrimitiveTopology::LineList);

        for edge in mesh.indices.chunks(2) {
            assert!(edge.iter().all(|&i| i < 8));
            let len = (corner(&mesh, edge[0]) - corner(&mesh, edge[1])).length();
            assert!((len - 1.0).abs() < 1e-6, "edge {:?} is not a cube edge", edge);
        }
    }

    #[test]
    fn test_solid_triangles() {
        let mesh = solid_cube_mesh();
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.mode.topology(), wgpu::PrimitiveTopology::TriangleList);

        for tri in mesh.indices.chunks(3) {
            assert!(tri.iter().all(|&i| i < 8));
            let a = corner(&mesh, tri[0]);
            let b = corner(&mesh, tri[1]);
            let c = corner(&mesh, tri[2]);
            let area2 = (b - a).cross(c - a).length();
            assert!(area2 > 0.5, "triangle {:?} is degenerate", tri);
        }
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
        assert_eq!(Vertex::layout().array_stride, 12);
        assert_eq!(cube_vertices().len(), 8);
    }
}
