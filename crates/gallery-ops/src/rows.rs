//! Row-parallel execution helper.
//!
//! Every per-pixel computation depends only on a read-only neighbourhood of
//! the input, so output rows are independent. With the `parallel` feature the
//! rows are handed to Rayon; without it they run in order on the caller's
//! thread. Either way the output is identical.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `width`-sized row of `data`.
pub(crate) fn for_each_row<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(u32, &mut [T]) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    data.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y as u32, row));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y as u32, row));
}
