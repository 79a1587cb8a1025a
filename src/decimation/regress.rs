/// Ordinary least-squares fit of `y = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    pub slope: f32,
    pub intercept: f32,
}

impl LinearFit {
    pub fn value_at(&self, x: f32) -> f32 {
        self.slope * x + self.intercept
    }
}

/// Least-squares fit over paired samples. Returns `None` when the x
/// variance is zero (fewer than two samples, or all x equal), which the
/// caller treats as "skip regression", never as an error.
pub fn linear_fit(xs: &[f32], ys: &[f32]) -> Option<LinearFit> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let sum_x: f64 = xs[..n].iter().map(|&x| x as f64).sum();
    let sum_y: f64 = ys[..n].iter().map(|&y| y as f64).sum();
    let sum_xx: f64 = xs[..n].iter().map(|&x| (x as f64) * (x as f64)).sum();
    let sum_xy: f64 = xs[..n]
        .iter()
        .zip(&ys[..n])
        .map(|(&x, &y)| (x as f64) * (y as f64))
        .sum();

    let denom = nf * sum_xx - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let slope = (nf * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / nf;
    Some(LinearFit {
        slope: slope as f32,
        intercept: intercept as f32,
    })
}

/// Fits the series against its own indices and continues it by `count`
/// values at indices `len..len + count`. A non-positive count or a series
/// too short to fit yields an empty result.
pub fn extrapolate(data: &[f32], count: usize) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let xs: Vec<f32> = (0..data.len()).map(|i| i as f32).collect();
    let Some(fit) = linear_fit(&xs, data) else {
        return Vec::new();
    };
    (0..count)
        .map(|i| fit.value_at((data.len() + i) as f32))
        .collect()
}
