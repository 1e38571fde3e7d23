use image::RgbaImage;
use wgpu::util::{DeviceExt, TextureDataOrder};

use crate::error::FxError;

/// The decoded image uploaded once, plus the sampler every effect reads it with.
pub struct ImageTexture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl ImageTexture {
    /// Reject images the device cannot hold in one 2D texture.
    pub fn check_size(width: u32, height: u32, limits: &wgpu::Limits) -> Result<(), FxError> {
        let max = limits.max_texture_dimension_2d;
        if width > max || height > max {
            return Err(FxError::TextureTooLarge { width, height, max });
        }
        Ok(())
    }

    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
    ) -> Result<Self, FxError> {
        let (width, height) = image.dimensions();
        Self::check_size(width, height, &device.limits())?;
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("image texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            image.as_raw(),
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("image sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        log::info!("[gpu] uploaded image texture {}x{}", width, height);
        Ok(Self {
            _texture: texture,
            view,
            sampler,
        })
    }
}
