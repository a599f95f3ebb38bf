//! Heartbeat pulse synthesis
//!
//! One pulse is a five-segment piecewise-linear silhouette: flat padding,
//! a fall from the baseline to the first extreme, a sweep to the opposite
//! extreme, a return to the baseline, and flat padding again.

/// Fraction of the pulse width spent as flat baseline on each side
const PADDING_RATIO: f32 = 0.1;

/// Vertical levels of a pulse silhouette in buffer offset space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseProfile {
    /// Resting level the trace returns to between beats
    pub baseline: f32,
    /// Extreme reached at the end of the first segment
    pub peak_down: f32,
    /// Extreme reached at the end of the second segment
    pub peak_up: f32,
    /// Vertical range the levels above are expressed in
    pub range: f32,
}

impl PulseProfile {
    /// Levels expressed against a 600 unit range
    pub const NOMINAL: Self = Self {
        baseline: 300.0,
        peak_down: 50.0,
        peak_up: 550.0,
        range: 600.0,
    };

    /// Rescale the profile so its range matches a surface `height` pixels tall
    pub fn for_height(&self, height: f32) -> Self {
        let scale = height / self.range;
        Self {
            baseline: self.baseline * scale,
            peak_down: self.peak_down * scale,
            peak_up: self.peak_up * scale,
            range: height,
        }
    }
}

impl Default for PulseProfile {
    fn default() -> Self {
        Self::NOMINAL
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate `len` samples from `from` towards `to`, never reaching `to`
fn segment(from: f32, to: f32, len: usize) -> impl Iterator<Item = f32> {
    (0..len).map(move |i| lerp(from, to, i as f32 / len as f32))
}

/// Flat baseline samples on each side of a pulse `width` samples wide
pub fn padding_for(width: usize) -> usize {
    (width as f32 * PADDING_RATIO).round() as usize
}

/// Synthesize one pulse of `width` samples
///
/// The returned length is what the caller should drain; it equals `width`
/// for every input but callers treat it as authoritative anyway.
pub fn synthesize(width: usize, profile: &PulseProfile) -> Vec<f32> {
    let padding = padding_for(width);
    let core = width.saturating_sub(padding * 2);

    // Integer indices below 0.25 * core form the first segment, and so on
    let first_end = (core as f32 * 0.25).ceil() as usize;
    let second_end = (core as f32 * 0.75).ceil() as usize;

    let mut pulse = Vec::with_capacity(padding * 2 + core);
    pulse.extend(std::iter::repeat_n(profile.baseline, padding));
    pulse.extend(segment(profile.baseline, profile.peak_down, first_end));
    pulse.extend(segment(profile.peak_down, profile.peak_up, second_end - first_end));
    pulse.extend(segment(profile.peak_up, profile.baseline, core - second_end));
    pulse.extend(std::iter::repeat_n(profile.baseline, padding));
    pulse
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict_local_minima(samples: &[f32]) -> Vec<usize> {
        samples
            .windows(3)
            .enumerate()
            .filter(|(_, w)| w[0] > w[1] && w[1] < w[2])
            .map(|(i, _)| i + 1)
            .collect()
    }

    fn strict_local_maxima(samples: &[f32]) -> Vec<usize> {
        samples
            .windows(3)
            .enumerate()
            .filter(|(_, w)| w[0] < w[1] && w[1] > w[2])
            .map(|(i, _)| i + 1)
            .collect()
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(300.0, 50.0, 0.0), 300.0);
        assert_eq!(lerp(300.0, 50.0, 0.5), 175.0);
        assert_eq!(lerp(50.0, 550.0, 1.0), 550.0);
    }

    #[test]
    fn test_pulse_of_100_samples() {
        let pulse = synthesize(100, &PulseProfile::NOMINAL);
        assert_eq!(pulse.len(), 100);
        assert_eq!(pulse[0], 300.0);
        assert_eq!(pulse[99], 300.0);

        let minima = strict_local_minima(&pulse);
        assert_eq!(minima.len(), 1, "Expected one local minimum, got {:?}", minima);
        assert!((20..=30).contains(&minima[0]), "Minimum at {}", minima[0]);
        assert!((pulse[minima[0]] - 50.0).abs() < 1.0);

        let maxima = strict_local_maxima(&pulse);
        assert_eq!(maxima.len(), 1, "Expected one local maximum, got {:?}", maxima);
        assert!((70..=80).contains(&maxima[0]), "Maximum at {}", maxima[0]);
        assert!((pulse[maxima[0]] - 550.0).abs() < 1.0);
    }

    #[test]
    fn test_padding_is_a_tenth() {
        assert_eq!(padding_for(100), 10);
        assert_eq!(padding_for(80), 8);
        assert_eq!(padding_for(4), 0);
        assert_eq!(padding_for(5), 1);
    }

    #[test]
    fn test_length_matches_request() {
        for width in [0, 1, 3, 7, 40, 81, 99, 123, 400] {
            let pulse = synthesize(width, &PulseProfile::NOMINAL);
            assert_eq!(pulse.len(), width, "width {}", width);
        }
    }

    #[test]
    fn test_values_stay_within_extremes() {
        let pulse = synthesize(83, &PulseProfile::NOMINAL);
        assert!(pulse.iter().all(|&v| (50.0..=550.0).contains(&v)));
    }

    #[test]
    fn test_profile_rescales_with_height() {
        let profile = PulseProfile::NOMINAL.for_height(300.0);
        assert_eq!(profile.baseline, 150.0);
        assert_eq!(profile.peak_down, 25.0);
        assert_eq!(profile.peak_up, 275.0);

        let pulse = synthesize(100, &profile);
        assert_eq!(pulse[0], 150.0);
        assert_eq!(pulse.iter().cloned().fold(f32::MAX, f32::min), 25.0);
    }
}
