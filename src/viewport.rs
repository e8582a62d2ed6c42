// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane described by its real and
//! imaginary bounds.  Each frame of a zoom gets its own viewport,
//! derived from a center point and a horizontal scale.
use num::Complex;

/// Describes the x, y of a pixel in an image, column first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// A rectangular region of the complex plane mapped onto an image of
/// `width` x `height` pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Real bound at the left edge of the image.
    pub xmin: f64,
    /// Real bound at the right edge of the image.
    pub xmax: f64,
    /// Imaginary bound at the top row of the image.
    pub ymin: f64,
    /// Imaginary bound at the bottom row of the image.
    pub ymax: f64,
    width: usize,
    height: usize,
}

/// The vertical scale that keeps pixels square for a given horizontal
/// scale.
pub fn vertical_scale(hscale: f64, width: usize, height: usize) -> f64 {
    hscale * (height as f64) / (width as f64)
}

impl Viewport {
    /// Centers a viewport `hscale` wide on `center`; the height follows
    /// from the image's aspect ratio.  A zero or negative scale is not
    /// rejected: it just gives a degenerate or mirrored view.
    pub fn centered(center: Complex<f64>, hscale: f64, width: usize, height: usize) -> Viewport {
        let vscale = vertical_scale(hscale, width, height);
        Viewport {
            xmin: center.re - hscale / 2.0,
            xmax: center.re + hscale / 2.0,
            ymin: center.im - vscale / 2.0,
            ymax: center.im + vscale / 2.0,
            width,
            height,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of pixels in the image.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the image has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Given a pixel, return the point on the complex plane at its
    /// upper-left corner.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.xmin + (pixel.0 as f64) * (self.xmax - self.xmin) / (self.width as f64),
            self.ymin + (pixel.1 as f64) * (self.ymax - self.ymin) / (self.height as f64),
        )
    }
}
