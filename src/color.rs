// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning iteration counts into colors.

/// The brightest color a pixel can take: white, as 0xRRGGBB.
pub const MAX_COLOR: u32 = 0x00FF_FFFF;

/// Scales `count` linearly from 0 to `MAX_COLOR`, truncating.  Done in
/// integer arithmetic so the result is the exact floor.  A bound of
/// zero maps everything to black.
pub fn iteration_to_color(count: u32, max_iterations: u32) -> u32 {
    if max_iterations == 0 {
        return 0;
    }
    let count = u64::from(count.min(max_iterations));
    (u64::from(MAX_COLOR) * count / u64::from(max_iterations)) as u32
}

/// Splits a 0xRRGGBB color into its three channels.
pub fn to_rgb(color: u32) -> [u8; 3] {
    [
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturates_at_max() {
        for max in &[1, 7, 1000, 6996, u32::max_value()] {
            assert_eq!(iteration_to_color(*max, *max), MAX_COLOR);
        }
    }

    #[test]
    fn zero_count_is_black() {
        assert_eq!(iteration_to_color(0, 1000), 0);
    }

    #[test]
    fn zero_bound_is_black() {
        assert_eq!(iteration_to_color(0, 0), 0);
    }

    #[test]
    fn truncates() {
        // 0xFFFFFF * 1 / 3 = 5592405
        assert_eq!(iteration_to_color(1, 3), 5_592_405);
        assert_eq!(iteration_to_color(2, 3), 11_184_810);
        assert_eq!(iteration_to_color(500, 1000), 0x7F_FFFF);
    }

    #[test]
    fn monotonic() {
        let max = 997;
        let mut last = 0;
        for count in 0..=max {
            let c = iteration_to_color(count, max);
            assert!(c >= last);
            assert!(c <= MAX_COLOR);
            last = c;
        }
    }

    #[test]
    fn rgb_channels() {
        assert_eq!(to_rgb(MAX_COLOR), [255, 255, 255]);
        assert_eq!(to_rgb(0x12_34_56), [0x12, 0x34, 0x56]);
        assert_eq!(to_rgb(0), [0, 0, 0]);
    }
}
