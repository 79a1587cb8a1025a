use rayon::prelude::*;

/// Serial path is cheaper below this size.
const PAR_THRESHOLD: usize = 2048;

/// Partitions the series into contiguous chunks and replaces each chunk
/// with its mean. The trailing partial chunk averages whatever remains.
/// `chunk_size == 0` yields an empty result (explicit no-op policy).
pub fn averaged(data: &[f32], chunk_size: usize) -> Vec<f32> {
    if chunk_size == 0 || data.is_empty() {
        return Vec::new();
    }
    let mean = |chunk: &[f32]| chunk.iter().map(|&v| v as f64).sum::<f64>() / chunk.len() as f64;
    if data.len() >= PAR_THRESHOLD {
        data.par_chunks(chunk_size)
            .map(|c| mean(c) as f32)
            .collect()
    } else {
        data.chunks(chunk_size).map(|c| mean(c) as f32).collect()
    }
}
