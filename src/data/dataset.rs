use ndarray::ArrayView1;

/// A single `(age, income)` record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub age: f64,
    pub income: f64,
}

/// Column-oriented sample set.
///
/// Ages and incomes live in separate buffers so the regressions can treat them
/// as vectors without copying.
#[derive(Debug, Clone)]
pub struct Dataset {
    ages: Vec<f64>,
    incomes: Vec<f64>,
}

impl Dataset {
    /// Creates a new dataset from owned buffers.
    ///
    /// # Panics
    /// - if `ages.len() != incomes.len()`
    /// - if `ages` is empty
    pub fn new(ages: Vec<f64>, incomes: Vec<f64>) -> Self {
        assert_eq!(ages.len(), incomes.len(), "ages and incomes must have same length");
        assert!(!ages.is_empty(), "dataset must be non-empty");
        Self { ages, incomes }
    }

    /// Builds a dataset by cycling over `rows` in order until exactly `n`
    /// samples have been produced.
    ///
    /// # Panics
    /// - if `rows` is empty
    /// - if `n` is zero
    pub fn tiled(rows: &[Sample], n: usize) -> Self {
        assert!(!rows.is_empty(), "cannot tile an empty row set");

        rows.iter().copied().cycle().take(n).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    #[inline]
    pub fn ages(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.ages[..])
    }

    #[inline]
    pub fn incomes(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.incomes[..])
    }
}

impl FromIterator<Sample> for Dataset {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        let (ages, incomes) = iter.into_iter().map(|s| (s.age, s.income)).unzip();
        Self::new(ages, incomes)
    }
}
