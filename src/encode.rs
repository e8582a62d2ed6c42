// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Getting finished frames onto disk.  The orchestrator only knows
//! about the `FrameEncoder` trait; `ImageFileEncoder` is the one that
//! actually writes files, picking the format from the extension.

use color::to_rgb;
use errors::RenderError;
use image::jpeg::JPEGEncoder;
use image::png::PNGEncoder;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Anything that can take a finished frame and persist it.  Frames
/// arrive from many workers at once, so implementations must be `Sync`.
pub trait FrameEncoder: Sync {
    /// Consumes a row-major buffer of 0xRRGGBB colors for a `width` x
    /// `height` image and stores it at `path`.
    fn encode_and_store(
        &self,
        pixels: Vec<u32>,
        width: usize,
        height: usize,
        path: &Path,
    ) -> Result<(), RenderError>;
}

/// The formats `ImageFileEncoder` knows how to write.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ImageFormat {
    /// Baseline JPEG.
    Jpeg,
    /// PNG.
    Png,
    /// Binary PPM.
    Ppm,
}

impl ImageFormat {
    /// Guesses the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "ppm" | "pnm" => Some(ImageFormat::Ppm),
            _ => None,
        }
    }
}

/// Writes frames as image files.
#[derive(Copy, Clone, Debug)]
pub struct ImageFileEncoder {
    quality: u8,
}

impl Default for ImageFileEncoder {
    fn default() -> Self {
        ImageFileEncoder { quality: 75 }
    }
}

impl ImageFileEncoder {
    /// An encoder writing JPEGs at the given quality (1-100).  Other
    /// formats ignore it.
    pub fn with_quality(quality: u8) -> Self {
        ImageFileEncoder {
            quality: quality.max(1).min(100),
        }
    }

    fn write_rgb(
        &self,
        format: ImageFormat,
        rgb: &[u8],
        width: u32,
        height: u32,
        path: &Path,
    ) -> Result<(), io::Error> {
        let mut output = BufWriter::new(File::create(path)?);
        match format {
            ImageFormat::Jpeg => JPEGEncoder::new_with_quality(&mut output, self.quality).encode(
                rgb,
                width,
                height,
                ColorType::RGB(8),
            )?,
            ImageFormat::Png => {
                PNGEncoder::new(&mut output).encode(rgb, width, height, ColorType::RGB(8))?
            }
            ImageFormat::Ppm => PNMEncoder::new(&mut output)
                .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary))
                .encode(rgb, width, height, ColorType::RGB(8))?,
        }
        output.flush()
    }
}

impl FrameEncoder for ImageFileEncoder {
    fn encode_and_store(
        &self,
        pixels: Vec<u32>,
        width: usize,
        height: usize,
        path: &Path,
    ) -> Result<(), RenderError> {
        if pixels.len() != width * height {
            return Err(RenderError::BufferSize {
                len: pixels.len(),
                width,
                height,
            });
        }
        let format = ImageFormat::from_path(path)
            .ok_or_else(|| RenderError::UnsupportedFormat(path.to_path_buf()))?;

        let mut rgb = Vec::with_capacity(pixels.len() * 3);
        for &c in &pixels {
            rgb.extend_from_slice(&to_rgb(c));
        }
        drop(pixels);

        self.write_rgb(format, &rgb, width as u32, height as u32, path)
            .map_err(|cause| RenderError::Io {
                path: path.to_path_buf(),
                cause,
            })
    }
}
