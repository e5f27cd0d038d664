//! Streaming rainflow ("dropflow") cycle counting over a SOC history.
//!
//! Samples arrive one at a time. The last stored point is the extremum of the
//! excursion in progress; it becomes a confirmed reversal once the signal
//! turns. Each confirmed reversal triggers the three-point reduction, which
//! emits closed cycles and keeps the stack short.

use bf_core::Real;

/// A turning point of the SOC signal with the temperature seen there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reversal {
    pub soc: Real,
    pub temp: Real,
}

/// A counted cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycle {
    /// Depth of discharge (SOC range)
    pub depth: Real,
    /// Mean SOC over the cycle
    pub mean_soc: Real,
    /// Mean temperature over the cycle (°C)
    pub mean_temp: Real,
    /// 1.0 for a full cycle, 0.5 for a half cycle
    pub count: Real,
}

impl Cycle {
    pub fn between(a: &Reversal, b: &Reversal, count: Real) -> Self {
        Self {
            depth: (a.soc - b.soc).abs(),
            mean_soc: 0.5 * (a.soc + b.soc),
            mean_temp: 0.5 * (a.temp + b.temp),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropflowCounter {
    reversals: Vec<Reversal>,
}

impl DropflowCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored turning points, the last one being the excursion in progress.
    pub fn reversals(&self) -> &[Reversal] {
        &self.reversals
    }

    /// Feed one sample, calling `on_cycle` for every cycle it closes.
    pub fn push(&mut self, sample: Reversal, mut on_cycle: impl FnMut(Cycle)) {
        let n = self.reversals.len();
        if n == 0 {
            self.reversals.push(sample);
            return;
        }

        let top = self.reversals[n - 1];
        let rise = sample.soc - top.soc;
        if rise == 0.0 {
            return;
        }
        if n == 1 {
            self.reversals.push(sample);
            return;
        }

        let prev_rise = top.soc - self.reversals[n - 2].soc;
        if rise * prev_rise > 0.0 {
            // same direction: the excursion keeps going
            self.reversals[n - 1] = sample;
            return;
        }

        self.reduce(&mut on_cycle);
        self.reversals.push(sample);
    }

    /// Three-point reduction over confirmed reversals.
    fn reduce(&mut self, on_cycle: &mut impl FnMut(Cycle)) {
        loop {
            let n = self.reversals.len();
            if n < 3 {
                break;
            }
            let r = &self.reversals;
            let x = (r[n - 1].soc - r[n - 2].soc).abs();
            let y = (r[n - 2].soc - r[n - 3].soc).abs();
            if x < y {
                break;
            }
            if n == 3 {
                // range y touches the start of the history
                on_cycle(Cycle::between(&r[0], &r[1], 0.5));
                self.reversals.remove(0);
            } else {
                on_cycle(Cycle::between(&r[n - 3], &r[n - 2], 1.0));
                self.reversals.drain(n - 3..n - 1);
            }
        }
    }

    /// Half cycles still open in the stack.
    pub fn residual(&self) -> impl Iterator<Item = Cycle> + '_ {
        self.reversals
            .windows(2)
            .map(|w| Cycle::between(&w[0], &w[1], 0.5))
    }
}
