use newslens_core::error::{Error, Result};

/// Averages token-level vectors into one sentence vector and L2-normalises it.
///
/// `tokens` is `[T][H]`. Ragged rows are a `Computation` error; a zero mean
/// is returned as-is rather than divided by zero.
pub fn mean_pool(tokens: &[Vec<f32>]) -> Result<Vec<f32>> {
    let hidden_dim = tokens
        .first()
        .map(Vec::len)
        .ok_or_else(|| Error::Computation("cannot pool zero token vectors".into()))?;
    let mut mean = vec![0.0f32; hidden_dim];
    for (t, row) in tokens.iter().enumerate() {
        if row.len() != hidden_dim {
            return Err(Error::Computation(format!(
                "token {t} has {} dimensions, expected {hidden_dim}",
                row.len()
            )));
        }
        for (m, x) in mean.iter_mut().zip(row) {
            *m += x;
        }
    }
    let count = tokens.len() as f32;
    for m in &mut mean {
        *m /= count;
    }
    l2_normalize(&mut mean);
    Ok(mean)
}

/// Scales `v` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
