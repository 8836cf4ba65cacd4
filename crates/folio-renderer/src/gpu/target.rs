//! Offscreen color target with CPU readback.

use std::sync::mpsc;

use image::RgbaImage;

use super::device::WgpuDevice;
use super::types::GpuError;

pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct RenderTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    readback: wgpu::Buffer,
    width: u32,
    height: u32,
    unpadded_bytes_per_row: u32,
    padded_bytes_per_row: u32,
}

impl RenderTarget {
    pub fn new(gpu: &WgpuDevice, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("folio render target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let unpadded_bytes_per_row = width * 4;
        let padded_bytes_per_row = align_to(unpadded_bytes_per_row, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let readback = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("folio readback buffer"),
            size: u64::from(padded_bytes_per_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            texture,
            view,
            readback,
            width,
            height,
            unpadded_bytes_per_row,
            padded_bytes_per_row,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Record a copy of the target into the readback buffer.
    pub fn copy_to_readback(&self, encoder: &mut wgpu::CommandEncoder) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Map the readback buffer and copy it out. Call after the copy was
    /// submitted.
    pub fn read(&self, gpu: &WgpuDevice) -> Result<RgbaImage, GpuError> {
        let slice = self.readback.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        gpu.device.poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|_| GpuError::Readback("map callback never ran".into()))?
            .map_err(|e| GpuError::Readback(e.to_string()))?;

        let pixels = {
            let mapped = slice.get_mapped_range();
            copy_tight_rows(
                &mapped,
                self.unpadded_bytes_per_row,
                self.padded_bytes_per_row,
                self.height,
            )?
        };
        self.readback.unmap();

        RgbaImage::from_raw(self.width, self.height, pixels)
            .ok_or_else(|| GpuError::Readback("pixel buffer has the wrong length".into()))
    }
}

pub(crate) fn align_to(value: u32, alignment: u32) -> u32 {
    value.div_ceil(alignment) * alignment
}

/// Strip the per-row padding wgpu requires for buffer copies.
pub(crate) fn copy_tight_rows(padded: &[u8], unpadded: u32, stride: u32, height: u32) -> Result<Vec<u8>, GpuError> {
    let required = stride as usize * height as usize;
    if padded.len() < required {
        return Err(GpuError::Readback(format!(
            "buffer holds {} bytes, expected {required}",
            padded.len()
        )));
    }
    let mut out = Vec::with_capacity(unpadded as usize * height as usize);
    for row in padded.chunks_exact(stride as usize).take(height as usize) {
        out.extend_from_slice(&row[..unpadded as usize]);
    }
    Ok(out)
}
