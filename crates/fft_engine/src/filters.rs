// Frequency-domain filters.
//
// Every filter works in place on the unshifted matrix and measures distances
// from the zero frequency through the nearest corner, so no explicit shift
// is needed. Filters return the matrix again so they can be chained:
//
//     matrix.lowpass(40).emphasis(10, 0.5, 1.5);

use log::debug;

use crate::{Complex, FrequencyMatrix};

/// Auto-notch leaves a disc of this fraction of the width around the zero
/// frequency untouched.
const EXCLUSION_FRACTION: f64 = 0.05;

/// Upper bound on the peaks auto-notch will suppress in one call.
const MAX_PEAKS: usize = 20;

/// A notch around the center-relative frequency `(u, v)`; it also covers the
/// point reflection `(-u, -v)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notch {
    pub u: isize,
    pub v: isize,
    pub radius: usize,
}

impl Notch {
    pub fn new(u: isize, v: isize, radius: usize) -> Self {
        Self { u, v, radius }
    }
}

impl FrequencyMatrix {
    /// Ideal lowpass: zero every coefficient farther than `radius` from the
    /// zero frequency.
    pub fn lowpass(&mut self, radius: usize) -> &mut Self {
        let radius_sqr = (radius as f64).powi(2);
        self.zero_where(|m, row, col| m.quadrant_distance_sqr(row, col) > radius_sqr);
        self
    }

    /// Ideal highpass: zero every coefficient within `radius` of the zero
    /// frequency, boundary included.
    pub fn highpass(&mut self, radius: usize) -> &mut Self {
        let radius_sqr = (radius as f64).powi(2);
        self.zero_where(|m, row, col| m.quadrant_distance_sqr(row, col) <= radius_sqr);
        self
    }

    /// Zero every coefficient within `notch.radius` of `(u, v)` or of its
    /// reflection `(-u, -v)`. Distances wrap around the matrix edges.
    pub fn notch(&mut self, notch: Notch) -> &mut Self {
        let radius_sqr = (notch.radius as f64).powi(2);
        let (width, height) = (self.width() as isize, self.height() as isize);

        self.zero_where(|m, row, col| {
            let (u, v) = m.signed_frequency(row, col);

            let near = |du: isize, dv: isize| {
                let dx = wrap(du, width) as f64;
                let dy = wrap(dv, height) as f64;
                dx * dx + dy * dy <= radius_sqr
            };

            near(u - notch.u, v - notch.v) || near(u + notch.u, v + notch.v)
        });
        self
    }

    /// Detect periodic-noise peaks and notch them out.
    ///
    /// A coefficient is a peak when its magnitude exceeds
    /// `threshold_factor` times the median magnitude and it lies outside a
    /// disc of 5% of the width around the zero frequency. At most 20 peaks
    /// are taken, in row-major order, and each gets a notch of `radius`.
    ///
    /// Returns the number of suppressed pairs, counted as half the peaks
    /// found: a spike and its mirror are both found by the scan but form one
    /// pair. The halving does not check that the mirror was actually found.
    pub fn auto_notch(&mut self, threshold_factor: f64, radius: usize) -> usize {
        let magnitudes: Vec<f64> = self.data().iter().map(|c| c.magnitude()).collect();

        let mut sorted = magnitudes.clone();
        sorted.sort_by(f64::total_cmp);
        let median = sorted[sorted.len() / 2];
        let noise_threshold = median * threshold_factor;

        let exclusion = self.width() as f64 * EXCLUSION_FRACTION;
        let exclusion_sqr = exclusion * exclusion;

        debug!(
            "Auto-notch: median magnitude {:.3}, noise threshold {:.3}",
            median, noise_threshold
        );

        let mut peaks: Vec<Notch> = Vec::with_capacity(MAX_PEAKS);
        'scan: for row in 0..self.height() {
            for col in 0..self.width() {
                if self.quadrant_distance_sqr(row, col) <= exclusion_sqr {
                    continue;
                }

                if magnitudes[row * self.width() + col] > noise_threshold {
                    let (u, v) = self.signed_frequency(row, col);
                    debug!("Auto-notch: peak at ({}, {})", u, v);
                    peaks.push(Notch::new(u, v, radius));

                    if peaks.len() == MAX_PEAKS {
                        break 'scan;
                    }
                }
            }
        }

        for &peak in &peaks {
            self.notch(peak);
        }

        peaks.len() / 2
    }

    /// Two-band emphasis: scale coefficients within `radius` of the zero
    /// frequency by `k_low` and all others by `k_high`.
    pub fn emphasis(&mut self, radius: usize, k_low: f64, k_high: f64) -> &mut Self {
        let radius_sqr = (radius as f64).powi(2);
        let width = self.width();

        for row in 0..self.height() {
            for col in 0..width {
                let gain = if self.quadrant_distance_sqr(row, col) <= radius_sqr {
                    k_low
                } else {
                    k_high
                };
                self[(row, col)] = self[(row, col)] * gain;
            }
        }
        self
    }

    fn zero_where(&mut self, predicate: impl Fn(&Self, usize, usize) -> bool) {
        for row in 0..self.height() {
            for col in 0..self.width() {
                if predicate(self, row, col) {
                    self[(row, col)] = Complex::ZERO;
                }
            }
        }
    }
}

/// Offset `delta` folded into `[-len/2, len/2)`.
fn wrap(delta: isize, len: isize) -> isize {
    (delta + len / 2).rem_euclid(len) - len / 2
}
