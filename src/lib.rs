#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot zoom renderer
//!
//! Renders a sequence of frames, each one a view of the Mandelbrot set
//! around a fixed center point, each a little closer in than the one
//! before.  Every pixel is colored by how many iterations of
//! z -> z^2 + c it takes for its point to escape the circle of radius
//! two, up to some bound; points that never escape are in the set and
//! come out white.
//!
//! The frames are shared out among a number of workers in contiguous
//! blocks, each worker on its own thread with its own pixel buffer.
//! Nothing is shared between workers and nothing comes back from them
//! except how they finished.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;

#[cfg(test)]
extern crate tempfile;

pub mod color;
pub mod encode;
pub mod errors;
pub mod escape;
pub mod partition;
pub mod sequence;
pub mod template;
pub mod viewport;

pub use encode::{FrameEncoder, ImageFileEncoder, ImageFormat};
pub use errors::RenderError;
pub use escape::iterations_at_point;
pub use partition::{frames_per_worker, partition, Partition};
pub use sequence::{
    render_sequence, FrameDescriptor, SequenceConfig, SequenceReport, WorkerOutcome, WorkerReport,
    DEFAULT_FRAMES, MAX_WORKERS,
};
pub use template::PathTemplate;
pub use viewport::{Pixel, Viewport};
