//! Threshold-based dispatch between sequential and rayon iteration.
//!
//! Small buffers are faster on one thread than after paying rayon's split
//! overhead, so every per-pixel pass goes through these helpers.

use rayon::prelude::*;

/// Pixel count at which per-pixel passes switch to rayon.
pub const PARALLEL_THRESHOLD: usize = 65_536;

/// For-each over mutable chunks, parallel when `parallel` is set and the
/// slice holds at least [`PARALLEL_THRESHOLD`] chunks.
///
/// A trailing partial chunk is left untouched.
pub fn for_each_chunk_mut<T, F>(data: &mut [T], chunk_size: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(&mut [T]) + Sync + Send,
{
    let num_chunks = data.len() / chunk_size;

    if parallel && num_chunks >= PARALLEL_THRESHOLD {
        data.par_chunks_exact_mut(chunk_size).for_each(&f);
    } else {
        for chunk in data.chunks_exact_mut(chunk_size) {
            f(chunk);
        }
    }
}

/// Map over `0..=count` collecting into a `Vec`, parallel above the threshold.
pub fn map_range<R, F>(count: usize, parallel: bool, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    if parallel && count >= PARALLEL_THRESHOLD {
        (0..=count).into_par_iter().map(f).collect()
    } else {
        (0..=count).map(f).collect()
    }
}
