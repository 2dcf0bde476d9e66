//! Vertex format shared by the mesh builder and the render pipeline.

/// A flat-shaded, textured vertex.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Color: [f32; 3] (12 bytes)
/// - Texture coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes, matching the shader's expected input layout.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space.
    pub position: [f32; 3],
    /// Pre-lit flat color of the face this vertex belongs to.
    pub color: [f32; 3],
    /// UV texture coordinates (normalized 0.0-1.0).
    pub uv: [f32; 2],
}

impl Vertex {
    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: color (vec3<f32>)
    /// - `location = 2`: uv (vec2<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
