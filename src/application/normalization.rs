// Traffic series normalization - window selection, gap filling and smoothing
//
// All three stages are pure functions over borrowed samples; the pipeline
// never touches the caller's data and reads no clock of its own.
use crate::domain::traffic::{CounterPair, Sample};
use chrono::{DateTime, TimeDelta, Utc};

pub const DEFAULT_WINDOW: TimeDelta = TimeDelta::minutes(10);
pub const DEFAULT_TICK: TimeDelta = TimeDelta::minutes(1);
pub const DEFAULT_SMOOTHING_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationSettings {
    /// Trailing history kept for display.
    pub window: TimeDelta,
    /// Spacing that gaps are filled onto.
    pub tick: TimeDelta,
    /// Number of samples averaged by the trailing smoother.
    pub smoothing_window: usize,
}

impl Default for NormalizationSettings {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            tick: DEFAULT_TICK,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

/// Run the full pipeline: select the trailing window, fill gaps, smooth.
pub fn normalize(
    series: &[Sample],
    now: DateTime<Utc>,
    settings: &NormalizationSettings,
) -> Vec<Sample> {
    let windowed = select_window(series, now, settings.window);
    let filled = interpolate_gaps(&windowed, settings.tick);
    smooth_trailing(&filled, settings.smoothing_window)
}

/// Samples between `now - window` and `now` inclusive, sorted ascending by
/// timestamp. The sort is stable so samples sharing a timestamp keep their
/// input order. Samples stamped after `now` are not part of the window.
pub fn select_window(series: &[Sample], now: DateTime<Utc>, window: TimeDelta) -> Vec<Sample> {
    let cutoff = now - window;
    let mut selected: Vec<Sample> = series
        .iter()
        .filter(|sample| sample.timestamp >= cutoff && sample.timestamp <= now)
        .copied()
        .collect();
    selected.sort_by_key(|sample| sample.timestamp);
    selected
}

/// Fill every gap wider than one tick with linearly interpolated samples
/// placed on `prev + j * tick`. Input must be sorted ascending.
pub fn interpolate_gaps(series: &[Sample], tick: TimeDelta) -> Vec<Sample> {
    let Some(first) = series.first() else {
        return Vec::new();
    };

    let mut output = Vec::with_capacity(series.len());
    output.push(*first);

    for pair in series.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        let gap = curr.timestamp - prev.timestamp;

        // Covers equal timestamps too: no fraction is ever computed for them.
        if gap <= tick {
            output.push(curr);
            continue;
        }

        output.extend(fill_gap(&prev, &curr, gap, tick));
        output.push(curr);
    }

    output
}

/// With `n = floor(gap / tick)`, point `j` sits at `prev + j * tick` and takes
/// fraction `j / n` of the way from `prev` to `curr`. Points landing on or
/// after `curr` are skipped.
fn fill_gap(prev: &Sample, curr: &Sample, gap: TimeDelta, tick: TimeDelta) -> Vec<Sample> {
    if tick <= TimeDelta::zero() {
        return Vec::new();
    }

    let mut offsets = Vec::new();
    let mut offset = tick;
    while offset <= gap {
        offsets.push(offset);
        match offset.checked_add(&tick) {
            Some(next) => offset = next,
            None => break,
        }
    }

    let n = offsets.len() as f64;
    let delta = curr.value - prev.value;

    offsets
        .into_iter()
        .zip(1u32..)
        .take_while(|(offset, _)| *offset < gap)
        .map(|(offset, j)| {
            Sample::new(prev.timestamp + offset, prev.value + delta * f64::from(j) / n)
        })
        .collect()
}

/// Trailing moving average: output `i` is the mean of inputs
/// `i + 1 - k ..= i`, using fewer inputs at the start of the series.
pub fn smooth_trailing(series: &[Sample], k: usize) -> Vec<Sample> {
    let k = k.max(1);

    series
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let start = (i + 1).saturating_sub(k);
            let window = &series[start..=i];
            let sum = window
                .iter()
                .fold(CounterPair::default(), |acc, s| acc + s.value);
            Sample::new(sample.timestamp, sum / window.len() as f64)
        })
        .collect()
}
