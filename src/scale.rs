/*
 *  scale.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Scale selection - how many bytes each pixel of the heap grid represents
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

/// Piecewise lookup from a maximum heap value to bytes-per-pixel.
///
/// The input is normalised by `divisor` and compared against `steps` in
/// order; the first threshold reached wins. The tables are hand tuned, not a
/// closed form, so they are kept as literal `(threshold, scale)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleTable {
    /// Normalisation applied before the threshold comparisons
    pub divisor: u64,
    /// `(threshold, scale)` pairs, thresholds strictly descending
    pub steps: &'static [(u64, u64)],
    /// Returned when no threshold is reached
    pub fallback: u64,
}

/// 32 rows of 1024 pixels, 32768 pixels in total.
pub const CURRENT_SCALE: ScaleTable = ScaleTable {
    divisor: 32_768,
    steps: &[
        (65_536, 131_072), // <= 4GB
        (48_000, 65_536),  // <= 2GB
        // out of order: 4800 sits below both neighbours, reproduced literally
        (32_768, 4_800),   // <= 1.5GB
        (16_384, 32_768),  // <= 1GB
        (8_192, 16_384),   // <= 500MB
        (4_096, 8_192),    // <= 250MB
        (2_048, 4_096),    // <= 100MB
        (512, 2_048),      // <= 50MB
        (32, 512),         // <= 10MB
        (16, 32),          // <= 1MB
        (8, 16),           // <= 500KB
        (4, 8),            // <= 256KB
        (2, 4),            // <= 128KB
        (1, 2),            // <= 64KB
    ],
    fallback: 1,
};

/// Superseded table from the first viewer layout. Parity only.
pub const LEGACY_SCALE: ScaleTable = ScaleTable {
    divisor: 262_144,
    steps: &[
        (8_192, 16_384), // <= 4GB
        (6_000, 4_096),  // <= 2GB
        (4_096, 6_000),  // <= 1.5GB
        (2_048, 4_096),  // <= 1GB
        (1_024, 2_048),  // <= 500MB
        (512, 1_024),    // <= 250MB
        (256, 512),      // <= 100MB
        (64, 256),       // <= 50MB
        (4, 64),         // <= 10MB
        (2, 4),          // <= 1MB
        (1, 2),          // <= 500KB
    ],
    fallback: 1,
};

impl ScaleTable {
    /// Look up the scale for `max_value`.
    pub fn select(&self, max_value: u64) -> u64 {
        // max_value / divisor >= threshold, without losing the fractional part
        self.steps
            .iter()
            .find(|(threshold, _)| max_value >= threshold.saturating_mul(self.divisor))
            .map(|&(_, scale)| scale)
            .unwrap_or(self.fallback)
    }

    /// Every scale this table can produce
    pub fn outputs(&self) -> impl Iterator<Item = u64> + '_ {
        self.steps.iter().map(|&(_, scale)| scale).chain(std::iter::once(self.fallback))
    }
}

/// Bytes represented by one pixel for a heap spanning `max_value` bytes.
pub fn scale_for_max_value(max_value: u64) -> u64 {
    CURRENT_SCALE.select(max_value)
}

/// Same as [`scale_for_max_value`] using the superseded table.
pub fn legacy_scale_for_max_value(max_value: u64) -> u64 {
    LEGACY_SCALE.select(max_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_top_threshold() {
        assert_eq!(scale_for_max_value(32_768 * 65_536), 131_072);
        assert_eq!(scale_for_max_value(u32::MAX as u64 * 2), 131_072);
    }

    #[test]
    fn test_current_non_monotonic_step() {
        assert_eq!(scale_for_max_value(32_768 * 32_768), 4_800);
        assert_eq!(scale_for_max_value(32_768 * 47_999), 4_800);
        assert_eq!(scale_for_max_value(32_768 * 48_000), 65_536);
        assert_eq!(scale_for_max_value(32_768 * 32_767), 32_768);
    }

    #[test]
    fn test_current_fallthrough() {
        assert_eq!(scale_for_max_value(0), 1);
        assert_eq!(scale_for_max_value(32_767), 1);
        assert_eq!(scale_for_max_value(32_768), 2);
    }

    #[test]
    fn test_current_every_step() {
        for &(threshold, scale) in CURRENT_SCALE.steps {
            assert_eq!(scale_for_max_value(threshold * 32_768), scale);
        }
    }

    #[test]
    fn test_fractional_boundary() {
        // 1.5 normalised reaches threshold 1 but not 2
        assert_eq!(scale_for_max_value(32_768 + 16_384), 2);
        assert_eq!(scale_for_max_value(2 * 32_768 - 1), 2);
    }

    #[test]
    fn test_legacy_table() {
        assert_eq!(legacy_scale_for_max_value(0), 1);
        assert_eq!(legacy_scale_for_max_value(262_144), 2);
        assert_eq!(legacy_scale_for_max_value(262_144 * 8_192), 16_384);
        assert_eq!(legacy_scale_for_max_value(262_144 * 6_000), 4_096);
        assert_eq!(legacy_scale_for_max_value(262_144 * 4_096), 6_000);
        assert_eq!(legacy_scale_for_max_value(262_144 * 4), 64);
        assert_eq!(legacy_scale_for_max_value(262_144 * 3), 4);
    }

    #[test]
    fn test_thresholds_descend() {
        for table in [CURRENT_SCALE, LEGACY_SCALE] {
            assert!(table.steps.windows(2).all(|w| w[0].0 > w[1].0));
        }
    }

    #[test]
    fn test_output_is_in_table() {
        for x in [0u64, 1, 40_000, 1 << 20, 1 << 26, 1 << 30, 3 << 30, 1 << 32] {
            let s = scale_for_max_value(x);
            assert!(CURRENT_SCALE.outputs().any(|o| o == s));
            let s = legacy_scale_for_max_value(x);
            assert!(LEGACY_SCALE.outputs().any(|o| o == s));
        }
    }
}
