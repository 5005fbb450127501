//! Texture registry
//!
//! Tag-addressed texture pool. Images are loaded up front, uploaded with
//! a full mip chain, and bound to hardware slots in one pass; afterwards
//! draw calls refer to textures by slot index. The pool is bounded by
//! [`MAX_TEXTURE_SLOTS`] and a tag that cannot be resolved maps to the
//! -1 sampler sentinel instead of an error.

use crate::backend::traits::{RenderBackend, MAX_TEXTURE_SLOTS};
use crate::backend::types::{BackendError, TextureDescriptor};
use crate::backend::TextureHandle;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load image '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("image '{tag}' has {channels} channels, expected 3 or 4")]
    UnsupportedChannelCount { tag: String, channels: u8 },
    #[error("pixel data for '{tag}' is {actual} bytes, expected {expected}")]
    SizeMismatch {
        tag: String,
        expected: usize,
        actual: usize,
    },
    #[error("texture pool is full ({MAX_TEXTURE_SLOTS} entries)")]
    CapacityExceeded,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

struct TextureEntry {
    tag: String,
    handle: TextureHandle,
}

/// Tag-addressed pool of slot-bound textures
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    flip_vertically: bool,
}

impl TextureRegistry {
    /// `flip_vertically` flips images on load, for assets authored with
    /// a bottom-left UV origin
    pub fn new(flip_vertically: bool) -> Self {
        Self {
            entries: Vec::new(),
            flip_vertically,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.iter().any(|entry| entry.tag == tag)
    }

    /// Decode the image at `path` and register it under `tag`.
    ///
    /// Only 3- and 4-channel images are accepted; 3-channel data is
    /// widened to opaque RGBA on upload. No entry is created on failure.
    pub fn load_file<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<(), TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        self.load_image(backend, img, tag)
    }

    /// Register an already decoded image under `tag`
    pub fn load_image<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        img: DynamicImage,
        tag: &str,
    ) -> Result<(), TextureError> {
        let channels = img.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(TextureError::UnsupportedChannelCount {
                tag: tag.to_string(),
                channels,
            });
        }

        let img = if self.flip_vertically {
            img.flipv()
        } else {
            img
        };

        let width = img.width();
        let height = img.height();
        let pixels = match img {
            DynamicImage::ImageRgba8(rgba) => rgba.into_raw(),
            DynamicImage::ImageRgb8(rgb) => {
                let mut out = Vec::with_capacity(width as usize * height as usize * 4);
                for px in rgb.into_raw().chunks_exact(3) {
                    out.extend_from_slice(px);
                    out.push(255);
                }
                out
            }
            other => other.to_rgba8().into_raw(),
        };

        self.upload(backend, width, height, &pixels, tag)
    }

    /// Register raw RGBA8 pixel data under `tag`
    pub fn load_data<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        width: u32,
        height: u32,
        pixels: &[u8],
        tag: &str,
    ) -> Result<(), TextureError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                tag: tag.to_string(),
                expected,
                actual: pixels.len(),
            });
        }
        self.upload(backend, width, height, pixels, tag)
    }

    fn upload<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        width: u32,
        height: u32,
        pixels: &[u8],
        tag: &str,
    ) -> Result<(), TextureError> {
        if self.entries.len() >= MAX_TEXTURE_SLOTS {
            return Err(TextureError::CapacityExceeded);
        }

        // Full chain down to 1x1
        let mip_levels = 32 - width.max(height).max(1).leading_zeros();
        let handle = backend.create_texture(
            &TextureDescriptor {
                label: Some(tag.to_string()),
                width,
                height,
                mip_levels,
            },
            pixels,
        )?;

        // Duplicate tags append as well; find_slot keeps the first match
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        Ok(())
    }

    /// Bind every registered texture to its slot. Idempotent; call again
    /// after further loads to re-bind the full set.
    pub fn bind_all<B: RenderBackend>(&self, backend: &mut B) {
        for (slot, entry) in self.entries.iter().enumerate() {
            backend.bind_texture_slot(slot as u32, entry.handle);
        }
    }

    /// Slot index for `tag`, or -1 if it was never registered.
    /// First match wins for duplicate tags.
    pub fn find_slot(&self, tag: &str) -> i32 {
        self.entries
            .iter()
            .position(|entry| entry.tag == tag)
            .map_or(-1, |slot| slot as i32)
    }

    /// Destroy every registered texture and empty the pool
    pub fn release_all<B: RenderBackend>(&mut self, backend: &mut B) {
        for entry in self.entries.drain(..) {
            backend.destroy_texture(entry.handle);
        }
    }
}

impl Drop for TextureRegistry {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            log::warn!(
                "texture registry dropped with {} textures still loaded",
                self.entries.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::RecordingBackend;

    fn checker_pixels(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let value = if (x + y) % 2 == 0 { 255 } else { 0 };
                data.extend_from_slice(&[value, value, value, 255]);
            }
        }
        data
    }

    #[test]
    fn slots_assigned_in_load_order() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new(true);

        registry
            .load_data(&mut backend, 4, 4, &checker_pixels(4, 4), "wood")
            .unwrap();
        registry
            .load_data(&mut backend, 4, 4, &checker_pixels(4, 4), "metal")
            .unwrap();

        assert_eq!(registry.find_slot("wood"), 0);
        assert_eq!(registry.find_slot("metal"), 1);
        assert_eq!(registry.find_slot("glass"), -1);
        assert_eq!(registry.len(), 2);

        registry.release_all(&mut backend);
    }

    #[test]
    fn duplicate_tag_shadowed_by_first_entry() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new(false);

        registry
            .load_data(&mut backend, 2, 2, &checker_pixels(2, 2), "wood")
            .unwrap();
        registry
            .load_data(&mut backend, 2, 2, &checker_pixels(2, 2), "wood")
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find_slot("wood"), 0);

        registry.release_all(&mut backend);
    }

    #[test]
    fn bind_all_is_idempotent() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new(false);

        registry
            .load_data(&mut backend, 2, 2, &checker_pixels(2, 2), "a")
            .unwrap();
        registry
            .load_data(&mut backend, 2, 2, &checker_pixels(2, 2), "b")
            .unwrap();

        registry.bind_all(&mut backend);
        let first = backend.bind_log().to_vec();
        registry.bind_all(&mut backend);

        assert_eq!(&backend.bind_log()[2..], first.as_slice());
        assert_eq!(first[0].0, 0);
        assert_eq!(first[1].0, 1);

        registry.release_all(&mut backend);
    }

    #[test]
    fn grayscale_image_rejected_without_entry() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new(false);

        let gray = DynamicImage::ImageLuma8(image::GrayImage::new(2, 2));
        let result = registry.load_image(&mut backend, gray, "gray");

        assert!(matches!(
            result,
            Err(TextureError::UnsupportedChannelCount { channels: 1, .. })
        ));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn rgb_image_widened_to_opaque_rgba() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new(false);

        let mut rgb = image::RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, image::Rgb([10, 20, 30]));
        rgb.put_pixel(1, 0, image::Rgb([40, 50, 60]));

        registry
            .load_image(&mut backend, DynamicImage::ImageRgb8(rgb), "rgb")
            .unwrap();

        assert_eq!(registry.find_slot("rgb"), 0);
        assert_eq!(backend.live_textures().len(), 1);

        registry.release_all(&mut backend);
    }

    #[test]
    fn capacity_is_bounded() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new(false);
        let pixels = checker_pixels(1, 1);

        for i in 0..MAX_TEXTURE_SLOTS {
            registry
                .load_data(&mut backend, 1, 1, &pixels, &format!("tex{}", i))
                .unwrap();
        }
        let result = registry.load_data(&mut backend, 1, 1, &pixels, "one-too-many");

        assert!(matches!(result, Err(TextureError::CapacityExceeded)));
        assert_eq!(registry.len(), MAX_TEXTURE_SLOTS);

        registry.release_all(&mut backend);
    }

    #[test]
    fn release_all_destroys_every_texture() {
        let mut backend = RecordingBackend::new();
        let mut registry = TextureRegistry::new(false);
        let pixels = checker_pixels(2, 2);

        registry.load_data(&mut backend, 2, 2, &pixels, "a").unwrap();
        registry.load_data(&mut backend, 2, 2, &pixels, "b").unwrap();
        registry.release_all(&mut backend);

        assert_eq!(registry.len(), 0);
        assert!(backend.live_textures().is_empty());
        assert_eq!(registry.find_slot("a"), -1);
    }
}
