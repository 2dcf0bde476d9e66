//! Texture handling for the rendering pipeline.
//!
//! This module provides the depth buffer and the procedurally generated block
//! surface texture that every face samples.

/// Side length of the generated block texture in texels.
const BLOCK_TEXTURE_SIZE: u32 = 256;
/// Seed for the block texture noise so every run shades blocks identically.
const BLOCK_TEXTURE_SEED: u64 = 0x5eed_b10c;

/// Represents a GPU texture with associated view and sampler.
pub struct Texture {
    /// The underlying WebGPU texture resource.
    #[allow(dead_code)]
    pub texture: wgpu::Texture,
    /// The texture view used for binding the texture to the pipeline.
    pub view: wgpu::TextureView,
    /// The sampler used for texture filtering and addressing.
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// The texture format used for depth buffers.
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates a new depth texture with the given configuration.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `config` - The surface configuration containing dimensions
    /// * `label` - Debug label for the texture
    ///
    /// # Returns
    /// A new `Texture` instance configured as a depth buffer
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        };

        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            lod_min_clamp: 0.0,
            lod_max_clamp: 100.0,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Creates the block surface texture and uploads its generated texels.
    ///
    /// The texture is a seeded grayscale speckle pattern; faces multiply it by
    /// their pre-lit vertex color, so a single texture serves every block
    /// value.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `queue` - The queue used to upload the texel data
    pub fn create_block_texture(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let size = wgpu::Extent3d {
            width: BLOCK_TEXTURE_SIZE,
            height: BLOCK_TEXTURE_SIZE,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Block Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &Self::generate_block_texels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * BLOCK_TEXTURE_SIZE),
                rows_per_image: Some(BLOCK_TEXTURE_SIZE),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Generates the RGBA texel data for the block texture.
    ///
    /// Bright speckle over a light base, with a darker single-texel border so
    /// block edges read at a distance.
    fn generate_block_texels() -> Vec<u8> {
        let mut rng = fastrand::Rng::with_seed(BLOCK_TEXTURE_SEED);
        let side = BLOCK_TEXTURE_SIZE as usize;
        let mut texels = vec![0u8; side * side * 4];
        for y in 0..side {
            for x in 0..side {
                let on_border = x == 0 || y == 0 || x == side - 1 || y == side - 1;
                let level = if on_border {
                    120
                } else {
                    200u8.saturating_add(rng.u8(0..56))
                };
                let i = (y * side + x) * 4;
                texels[i] = level;
                texels[i + 1] = level;
                texels[i + 2] = level;
                texels[i + 3] = 255;
            }
        }
        texels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_texels_cover_the_texture() {
        let texels = Texture::generate_block_texels();
        assert_eq!(
            texels.len(),
            (BLOCK_TEXTURE_SIZE * BLOCK_TEXTURE_SIZE * 4) as usize
        );
        // Opaque everywhere.
        assert!(texels.chunks_exact(4).all(|t| t[3] == 255));
    }

    #[test]
    fn block_texels_are_deterministic() {
        assert_eq!(
            Texture::generate_block_texels(),
            Texture::generate_block_texels()
        );
    }

    #[test]
    fn border_is_darker_than_interior() {
        let texels = Texture::generate_block_texels();
        let side = BLOCK_TEXTURE_SIZE as usize;
        let border = texels[0];
        let interior = texels[(side + 1) * 4];
        assert!(border < interior);
    }
}
