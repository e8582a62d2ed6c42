// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The zoom sequence orchestrator.
//!
//! A zoom is a fixed run of frames, each one the same center point
//! viewed at a scale `decay` times smaller than the frame before it.
//! The frames are split into contiguous blocks, one per worker, and
//! each worker renders its block in order on its own thread.  Workers
//! share nothing mutable: each owns the one pixel buffer it is
//! currently filling, and hands it to the encoder once it's full.  The
//! caller waits for every worker to finish and gets back a report of
//! how each one fared.
//!
//! A decay between 0 and 1 zooms in.  Anything else is accepted as-is:
//! greater than 1 zooms out, exactly 1 renders the same frame over and
//! over, and zero or below collapses or mirrors the view.

use color::iteration_to_color;
use encode::FrameEncoder;
use errors::RenderError;
use escape::iterations_at_point;
use itertools::iproduct;
use num::Complex;
use partition::{partition, Partition};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use template::PathTemplate;
use viewport::{vertical_scale, Pixel, Viewport};

/// The length of a zoom unless told otherwise.
pub const DEFAULT_FRAMES: usize = 50;

/// The most workers a sequence may be split among.  Each one is a
/// thread, so this bounds the fan-out.
pub const MAX_WORKERS: usize = 1024;

/// Everything needed to render a zoom sequence.
#[derive(Clone, Debug)]
pub struct SequenceConfig {
    /// Where each frame goes; the frame index is substituted in.
    pub template: PathTemplate,
    /// The point the zoom closes in on.
    pub center: Complex<f64>,
    /// Width of the first frame on the complex plane.
    pub scale: f64,
    /// Per-frame multiplier applied to the scale.
    pub decay: f64,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iteration bound for the escape test.
    pub max_iterations: u32,
    /// How many workers to split the frames among.
    pub workers: usize,
    /// Total frames in the sequence.
    pub frames: usize,
    /// Suppress the per-frame status line.
    pub quiet: bool,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        SequenceConfig {
            template: PathTemplate::default(),
            center: Complex::new(0.0, 0.0),
            scale: 4.0,
            decay: 0.85,
            width: 1000,
            height: 1000,
            max_iterations: 1000,
            workers: 4,
            frames: DEFAULT_FRAMES,
            quiet: false,
        }
    }
}

impl SequenceConfig {
    /// Checks the things that would make rendering meaningless.  The
    /// numeric parameters of the zoom itself are not checked.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.workers < 1 || self.workers > MAX_WORKERS {
            return Err(RenderError::InvalidConfig(format!(
                "worker count must be between 1 and {}",
                MAX_WORKERS
            )));
        }
        if self.width < 1 || self.height < 1 {
            return Err(RenderError::InvalidConfig(format!(
                "image size {}x{} has no pixels",
                self.width, self.height
            )));
        }
        if self.frames < 1 {
            return Err(RenderError::InvalidConfig(
                "frame count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The horizontal scale of frame `index`.
    pub fn scale_at(&self, index: usize) -> f64 {
        self.scale * self.decay.powf(index as f64)
    }

    /// Builds the descriptor for frame `index`.
    pub fn frame(&self, index: usize) -> FrameDescriptor {
        let scale = self.scale_at(index);
        FrameDescriptor {
            index,
            center: self.center,
            scale,
            viewport: Viewport::centered(self.center, scale, self.width, self.height),
            max_iterations: self.max_iterations,
            path: self.template.render(index),
        }
    }
}

/// One frame of the sequence, fully described.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameDescriptor {
    /// Position in the sequence.
    pub index: usize,
    /// The point the frame is centered on.
    pub center: Complex<f64>,
    /// Horizontal scale of this frame.
    pub scale: f64,
    /// The region of the complex plane shown.
    pub viewport: Viewport,
    /// Iteration bound for the escape test.
    pub max_iterations: u32,
    /// Where the frame is written.
    pub path: PathBuf,
}

impl FrameDescriptor {
    /// Computes the frame's pixels, row by row.
    pub fn render(&self) -> Vec<u32> {
        let vp = &self.viewport;
        let max = self.max_iterations;
        iproduct!(0..vp.height(), 0..vp.width())
            .map(|(row, column)| {
                let point = vp.pixel_to_point(&Pixel(column, row));
                iteration_to_color(iterations_at_point(point.re, point.im, max), max)
            })
            .collect()
    }

    /// The one-line progress report printed before a frame is rendered.
    pub fn status_line(&self) -> String {
        format!(
            "mandel: x={:.6} y={:.6} xscale={:.6} yscale={:.6} max={} outfile={}",
            self.center.re,
            self.center.im,
            self.scale,
            vertical_scale(self.scale, self.viewport.width(), self.viewport.height()),
            self.max_iterations,
            self.path.display()
        )
    }
}

/// How a worker ended.
#[derive(Debug)]
pub enum WorkerOutcome {
    /// Every frame in the partition was written.
    Completed {
        /// Frames written.
        frames: usize,
    },
    /// A frame could not be stored; the worker stopped there.
    Failed {
        /// The frame that failed.
        frame: usize,
        /// Frames written before the failure.
        completed: usize,
        /// What went wrong.
        error: RenderError,
    },
    /// Rendering or storing a frame panicked; the worker stopped there.
    Panicked {
        /// The frame being worked on.
        frame: usize,
        /// Frames written before the panic.
        completed: usize,
        /// The panic's message, if it had one.
        message: String,
    },
}

/// The fate of a single worker.
#[derive(Debug)]
pub struct WorkerReport {
    /// The frames the worker was given.
    pub partition: Partition,
    /// How it ended.
    pub outcome: WorkerOutcome,
}

impl WorkerReport {
    /// True if the worker wrote all of its frames.
    pub fn succeeded(&self) -> bool {
        match self.outcome {
            WorkerOutcome::Completed { .. } => true,
            _ => false,
        }
    }

    /// Frames the worker got onto disk, whatever happened afterwards.
    pub fn frames_written(&self) -> usize {
        match self.outcome {
            WorkerOutcome::Completed { frames } => frames,
            WorkerOutcome::Failed { completed, .. } => completed,
            WorkerOutcome::Panicked { completed, .. } => completed,
        }
    }
}

impl fmt::Display for WorkerReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "worker {} (frames {}..{}): ",
            self.partition.worker, self.partition.frames.start, self.partition.frames.end
        )?;
        match self.outcome {
            WorkerOutcome::Completed { frames } => write!(f, "wrote {} frames", frames),
            WorkerOutcome::Failed {
                frame,
                completed,
                ref error,
            } => write!(
                f,
                "failed on frame {} after writing {}: {}",
                frame, completed, error
            ),
            WorkerOutcome::Panicked {
                frame,
                completed,
                ref message,
            } => write!(
                f,
                "panicked on frame {} after writing {}: {}",
                frame, completed, message
            ),
        }
    }
}

/// What `render_sequence` hands back: one report per worker, in worker
/// order.
#[derive(Debug)]
pub struct SequenceReport {
    /// Per-worker reports.
    pub workers: Vec<WorkerReport>,
}

impl SequenceReport {
    /// True only if every worker completed.
    pub fn succeeded(&self) -> bool {
        self.workers.iter().all(WorkerReport::succeeded)
    }

    /// The workers that didn't complete.
    pub fn failures(&self) -> Vec<&WorkerReport> {
        self.workers.iter().filter(|w| !w.succeeded()).collect()
    }

    /// Total frames written across all workers.
    pub fn frames_written(&self) -> usize {
        self.workers.iter().map(WorkerReport::frames_written).sum()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "unknown panic".to_string()
}

/// Renders every frame of one partition, in order, stopping at the
/// first frame the encoder can't store or that panics.
fn run_worker<E>(config: &SequenceConfig, partition: &Partition, encoder: &E) -> WorkerOutcome
where
    E: FrameEncoder + ?Sized,
{
    let mut completed = 0;
    for index in partition.frames.clone() {
        // Never step past the end of the sequence, whatever the
        // partition says.
        if index >= config.frames {
            break;
        }
        let frame = config.frame(index);
        if !config.quiet {
            println!("{}", frame.status_line());
        }
        let (width, height) = (frame.viewport.width(), frame.viewport.height());
        let stored = panic::catch_unwind(AssertUnwindSafe(|| {
            encoder.encode_and_store(frame.render(), width, height, &frame.path)
        }));
        match stored {
            Ok(Ok(())) => completed += 1,
            Ok(Err(error)) => {
                return WorkerOutcome::Failed {
                    frame: index,
                    completed,
                    error,
                }
            }
            Err(payload) => {
                return WorkerOutcome::Panicked {
                    frame: index,
                    completed,
                    message: panic_message(payload),
                }
            }
        }
    }
    WorkerOutcome::Completed { frames: completed }
}

/// Renders the whole sequence described by `config`, one scoped thread
/// per worker with frames to render, and waits for all of them.  Workers
/// left with an empty partition complete without a thread.  Returns an
/// error only if the configuration is unusable; worker failures are in
/// the report.
pub fn render_sequence<E>(config: &SequenceConfig, encoder: &E) -> Result<SequenceReport, RenderError>
where
    E: FrameEncoder + ?Sized,
{
    config.validate()?;
    let partitions = partition(config.frames, config.workers);

    let workers = crossbeam::scope(|spawner| {
        let handles: Vec<_> = partitions
            .into_iter()
            .map(|partition| {
                let handle = if partition.is_empty() {
                    None
                } else {
                    let assigned = partition.clone();
                    Some(spawner.spawn(move |_| run_worker(config, &assigned, encoder)))
                };
                (partition, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(partition, handle)| {
                let outcome = match handle.map(|h| h.join()) {
                    None => WorkerOutcome::Completed { frames: 0 },
                    Some(Ok(outcome)) => outcome,
                    // Only panics outside the per-frame guard land here;
                    // progress is unknown, so none is claimed.
                    Some(Err(payload)) => WorkerOutcome::Panicked {
                        frame: partition.frames.start,
                        completed: 0,
                        message: panic_message(payload),
                    },
                };
                WorkerReport { partition, outcome }
            })
            .collect::<Vec<_>>()
    })
    .map_err(|payload| RenderError::Aborted(panic_message(payload)))?;

    Ok(SequenceReport { workers })
}
