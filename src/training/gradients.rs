//! Per-row gradient and hessian storage.

/// Gradient/hessian pairs for every training row.
#[derive(Debug, Clone)]
pub struct Gradients {
    grads: Vec<f32>,
    hess: Vec<f32>,
}

impl Gradients {
    pub fn new(n_samples: usize) -> Self {
        Self {
            grads: vec![0.0; n_samples],
            hess: vec![0.0; n_samples],
        }
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.grads.len()
    }

    #[inline]
    pub fn grads(&self) -> &[f32] {
        &self.grads
    }

    #[inline]
    pub fn hess(&self) -> &[f32] {
        &self.hess
    }

    /// Mutable gradient and hessian slices.
    #[inline]
    pub fn pairs_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.grads, &mut self.hess)
    }

    #[inline]
    pub fn get(&self, row: usize) -> (f32, f32) {
        (self.grads[row], self.hess[row])
    }

    /// Gradient and hessian sums over `rows`, accumulated in f64.
    pub fn sum(&self, rows: &[u32]) -> (f64, f64) {
        rows.iter().fold((0.0, 0.0), |(g, h), &row| {
            let (gr, hr) = self.get(row as usize);
            (g + gr as f64, h + hr as f64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_selected_rows() {
        let mut gradients = Gradients::new(3);
        {
            let (g, h) = gradients.pairs_mut();
            g.copy_from_slice(&[1.0, -2.0, 4.0]);
            h.copy_from_slice(&[1.0, 1.0, 1.0]);
        }
        assert_eq!(gradients.sum(&[0, 2]), (5.0, 2.0));
        assert_eq!(gradients.sum(&[]), (0.0, 0.0));
    }
}
