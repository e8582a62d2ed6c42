// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Static division of the frame sequence among workers.  Every worker
//! gets the same number of frames, ceiling-divided, except that the
//! ranges are clipped to the end of the sequence.  Late workers may end
//! up with short or empty ranges; that's fine, they simply exit.

use std::ops::Range;

/// A contiguous, half-open run of frame indices owned by one worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    /// Which worker this belongs to, counting from zero.
    pub worker: usize,
    /// The frames this worker renders, in order.
    pub frames: Range<usize>,
}

impl Partition {
    /// Number of frames in the partition.
    pub fn len(&self) -> usize {
        self.frames.end - self.frames.start
    }

    /// An empty partition means the worker has nothing to do.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Frames handed to each worker: `ceil(total / workers)`.  Zero workers
/// is a caller error and yields zero.
pub fn frames_per_worker(total: usize, workers: usize) -> usize {
    if workers == 0 {
        return 0;
    }
    total / workers + if total % workers == 0 { 0 } else { 1 }
}

/// Splits `[0, total)` into `workers` partitions, in worker order.
pub fn partition(total: usize, workers: usize) -> Vec<Partition> {
    let per = frames_per_worker(total, workers);
    (0..workers)
        .map(|worker| {
            let start = worker.saturating_mul(per).min(total);
            let end = (worker + 1).saturating_mul(per).min(total);
            Partition {
                worker,
                frames: start..end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_division() {
        assert_eq!(frames_per_worker(50, 1), 50);
        assert_eq!(frames_per_worker(50, 4), 13);
        assert_eq!(frames_per_worker(50, 7), 8);
        assert_eq!(frames_per_worker(50, 50), 1);
        assert_eq!(frames_per_worker(50, 64), 1);
        assert_eq!(frames_per_worker(50, 0), 0);
    }

    #[test]
    fn covers_every_frame_exactly_once() {
        for workers in 1..=50 {
            let parts = partition(50, workers);
            assert_eq!(parts.len(), workers);
            let mut seen = vec![0; 50];
            for p in &parts {
                for i in p.frames.clone() {
                    seen[i] += 1;
                }
            }
            assert!(seen.iter().all(|&n| n == 1), "workers = {}", workers);
        }
    }

    #[test]
    fn partitions_are_contiguous_and_ordered() {
        for workers in 1..=60 {
            let parts = partition(50, workers);
            assert_eq!(parts[0].frames.start, 0);
            for pair in parts.windows(2) {
                assert_eq!(pair[0].frames.end, pair[1].frames.start);
            }
            assert_eq!(parts[workers - 1].frames.end, 50);
        }
    }

    #[test]
    fn seven_workers_clip_the_last() {
        let parts = partition(50, 7);
        assert_eq!(parts[0].frames, 0..8);
        assert_eq!(parts[5].frames, 40..48);
        assert_eq!(parts[6].frames, 48..50);
        assert_eq!(parts[6].len(), 2);
    }

    #[test]
    fn surplus_workers_get_nothing() {
        // ceil(50/30) = 2, so workers 25 and up have nothing left.
        let parts = partition(50, 30);
        assert_eq!(parts[24].frames, 48..50);
        for p in &parts[25..] {
            assert!(p.is_empty());
            assert_eq!(p.frames, 50..50);
        }
    }

    #[test]
    fn huge_worker_counts_do_not_overflow() {
        assert_eq!(frames_per_worker(50, usize::max_value()), 1);
        assert_eq!(frames_per_worker(usize::max_value(), usize::max_value()), 1);
        assert_eq!(frames_per_worker(usize::max_value(), 2), usize::max_value() / 2 + 1);
    }

    #[test]
    fn large_partitions_clip_without_overflow() {
        let total = usize::max_value() - 1;
        let parts = partition(total, 3);
        assert_eq!(parts[0].frames.start, 0);
        assert_eq!(parts[2].frames.end, total);
        assert_eq!(parts[0].frames.end, parts[1].frames.start);
    }

    #[test]
    fn single_worker_takes_everything() {
        let parts = partition(50, 1);
        assert_eq!(parts, vec![Partition { worker: 0, frames: 0..50 }]);
    }

    #[test]
    fn other_lengths() {
        let parts = partition(10, 3);
        let ranges: Vec<_> = parts.iter().map(|p| p.frames.clone()).collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..10]);
        assert!(partition(0, 3).iter().all(|p| p.is_empty()));
    }
}
