// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type shared by the library and the `mandel` binary.

use failure::Fail;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while configuring or rendering a zoom
/// sequence.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The configuration was rejected before any worker was launched.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// The output path template could not be parsed.
    #[fail(display = "bad output template {:?}: {}", template, reason)]
    Template {
        /// The template as supplied.
        template: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The output path names a format we can't write.
    #[fail(display = "cannot pick an image format for {:?}", _0)]
    UnsupportedFormat(PathBuf),

    /// The pixel buffer doesn't describe a `width` x `height` image.
    #[fail(
        display = "pixel buffer holds {} values, expected {}x{}",
        len, width, height
    )]
    BufferSize {
        /// Number of values actually in the buffer.
        len: usize,
        /// Claimed image width.
        width: usize,
        /// Claimed image height.
        height: usize,
    },

    /// The worker scope itself came apart.
    #[fail(display = "workers aborted: {}", _0)]
    Aborted(String),

    /// Creating or writing the output file failed.
    #[fail(display = "could not write {:?}: {}", path, cause)]
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying failure.
        #[fail(cause)]
        cause: io::Error,
    },
}
