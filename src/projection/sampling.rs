/// picks which days of a span end up in the trajectory series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSampler {
    step: u32,
    total_days: u32,
}

impl SeriesSampler {
    /// roughly `samples` evenly spaced points, at least one day apart
    pub fn new(total_days: u32, samples: u32) -> Self {
        Self {
            step: (total_days / samples.max(1)).max(1),
            total_days,
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// day 0 and the final day are always included
    pub fn includes(&self, day: u32) -> bool {
        day == self.total_days || day % self.step == 0
    }

    /// upper bound on the number of points, day 0 included
    pub fn capacity(&self) -> usize {
        (self.total_days / self.step) as usize + 2
    }
}
