/// Running statistics for one key, in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub min: i16,
    pub max: i16,
    pub sum: i64,
    pub count: u64,
}

impl Stats {
    pub const fn new(value: i16) -> Self {
        Self {
            min: value,
            max: value,
            sum: value as i64,
            count: 1,
        }
    }

    #[inline]
    pub fn add(&mut self, value: i16) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value as i64;
        self.count += 1;
    }

    /// Commutative and associative combine of two accumulators.
    #[inline]
    pub fn merge(&mut self, other: &Stats) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Mean in real units. The scale is removed here and nowhere else.
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64 / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_exactly() {
        let values = [-53, 0, 999, -999, 12, 12];
        let mut stats = Stats::new(values[0]);
        for &v in &values[1..] {
            stats.add(v);
        }
        assert_eq!(stats.min, -999);
        assert_eq!(stats.max, 999);
        assert_eq!(stats.sum, values.iter().map(|&v| v as i64).sum::<i64>());
        assert_eq!(stats.count, values.len() as u64);
    }

    #[test]
    fn sum_survives_many_updates() {
        let mut stats = Stats::new(999);
        for _ in 0..1_000_000 {
            stats.add(999);
        }
        assert_eq!(stats.sum, 999 * 1_000_001);
        assert_eq!(stats.mean(), 99.9);
    }

    #[test]
    fn merge_is_order_independent() {
        let mut a = Stats::new(10);
        a.add(-30);
        let b = Stats::new(25);
        let mut c = Stats::new(-100);
        c.add(7);

        let mut left = a;
        left.merge(&b);
        left.merge(&c);

        let mut right = c;
        right.merge(&a);
        right.merge(&b);

        assert_eq!(left, right);
        assert_eq!(left.count, 5);
        assert_eq!((left.min, left.max, left.sum), (-100, 25, -88));
    }
}
