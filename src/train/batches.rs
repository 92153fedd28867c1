use rand::Rng;
use rand::seq::SliceRandom;

/// Shuffles `0..n` and cuts it into whole batches of `batch_size` indices.
///
/// Only the first `n - n % batch_size` indices are kept before shuffling, so
/// the remainder is dropped for the epoch rather than carried over.
pub fn shuffled_batches<R: Rng + ?Sized>(n: usize, batch_size: usize, rng: &mut R) -> Vec<Vec<usize>> {
    if batch_size == 0 {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..n - n % batch_size).collect();
    indices.shuffle(rng);
    indices.chunks_exact(batch_size).map(<[usize]>::to_vec).collect()
}
