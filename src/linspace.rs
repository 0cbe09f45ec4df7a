use num::Float;

/// Evenly spaced samples over a closed interval, endpoints included.
pub(crate) struct Linspace<F> {
    start: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub(crate) fn new(min: F, max: F, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = F::from(n - 1).unwrap_or_else(F::one);
            (max - min) / num_steps
        } else {
            F::zero()
        };
        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            None
        } else {
            // Calculate the value just like numpy.linspace does
            let i = F::from(self.index)?;
            self.index += 1;
            Some(self.start + self.step * i)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let xs: Vec<f64> = Linspace::new(0., 100., 101).collect();

    assert_eq!(xs.len(), 101);
    assert_eq!(xs[0], 0.);
    assert_eq!(xs[35], 35.);
    assert_eq!(xs[100], 100.);

    let xs: Vec<f64> = Linspace::new(2., 3., 5).collect();

    assert_eq!(xs, vec![2., 2.25, 2.5, 2.75, 3.]);

    let single: Vec<f64> = Linspace::new(4., 4., 1).collect();

    assert_eq!(single, vec![4.]);
}
