//! Procedural unit primitives. Everything is generated once at GPU init and
//! sized per instance, so a handful of small meshes covers the whole scene.

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// Axis-aligned unit cube centered at the origin (extent 0.5 per axis).
pub fn cuboid() -> MeshData {
    // (normal, four corners in CCW order seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                [0.5, -0.5, -0.5],
                [-0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [0.5, -0.5, 0.5],
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [-0.5, -0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [-0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
                [-0.5, -0.5, 0.5],
            ],
        ),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u16;
        for position in corners {
            vertices.push(Vertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData { vertices, indices }
}

/// Unit-radius UV sphere.
pub fn uv_sphere(stacks: u32, slices: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for stack in 0..=stacks {
        let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
        for slice in 0..=slices {
            let theta = std::f32::consts::TAU * slice as f32 / slices as f32;
            let n = [
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            ];
            vertices.push(Vertex {
                position: n,
                normal: n,
            });
        }
    }
    let row = slices + 1;
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = (stack * row + slice) as u16;
            let b = a + row as u16;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    MeshData { vertices, indices }
}

/// Torus with ring radius 1 and the given tube radius, lying in the XZ
/// plane of its local space.
pub fn torus(tube: f32, segments: u32, sides: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for seg in 0..=segments {
        let u = std::f32::consts::TAU * seg as f32 / segments as f32;
        for side in 0..=sides {
            let v = std::f32::consts::TAU * side as f32 / sides as f32;
            let ring = 1.0 + tube * v.cos();
            vertices.push(Vertex {
                position: [ring * u.cos(), tube * v.sin(), ring * u.sin()],
                normal: [v.cos() * u.cos(), v.sin(), v.cos() * u.sin()],
            });
        }
    }
    let row = sides + 1;
    for seg in 0..segments {
        for side in 0..sides {
            let a = (seg * row + side) as u16;
            let b = a + row as u16;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    MeshData { vertices, indices }
}

/// Y-axis cylinder, radius 1, height 1, with both caps.
pub fn cylinder(segments: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    // Side wall
    for seg in 0..=segments {
        let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
        let (x, z) = (theta.cos(), theta.sin());
        vertices.push(Vertex {
            position: [x, -0.5, z],
            normal: [x, 0.0, z],
        });
        vertices.push(Vertex {
            position: [x, 0.5, z],
            normal: [x, 0.0, z],
        });
    }
    for seg in 0..segments {
        let a = (seg * 2) as u16;
        indices.extend_from_slice(&[a, a + 2, a + 1, a + 1, a + 2, a + 3]);
    }
    // Caps
    for (y, ny) in [(-0.5_f32, -1.0_f32), (0.5, 1.0)] {
        let center = vertices.len() as u16;
        vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, ny, 0.0],
        });
        for seg in 0..=segments {
            let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
            vertices.push(Vertex {
                position: [theta.cos(), y, theta.sin()],
                normal: [0.0, ny, 0.0],
            });
        }
        for seg in 0..segments {
            let a = center + 1 + seg as u16;
            if ny > 0.0 {
                indices.extend_from_slice(&[center, a + 1, a]);
            } else {
                indices.extend_from_slice(&[center, a, a + 1]);
            }
        }
    }
    MeshData { vertices, indices }
}
