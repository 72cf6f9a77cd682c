/*
 *  pow2.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Power-of-two rounding for heap address ranges
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

/// Largest input rounded normally, 2^31 = 2GB.
pub const POW2_CAP_THRESHOLD: u64 = 2_147_483_648;

/// Value returned for anything above [`POW2_CAP_THRESHOLD`], 2^32 = 4GB.
pub const POW2_SATURATION: u64 = 4_294_967_296;

/// Round `x` up to the nearest power of two.
///
/// Anything above 2^31 saturates at 2^32, even inputs that would really need
/// 2^33 or more. The heap logs come from a 32-bit address space so nothing
/// larger is ever displayed.
///
/// `0` rounds to `1`.
pub fn nearest_highest_power_of_2(x: u64) -> u64 {
    if x > POW2_CAP_THRESHOLD {
        return POW2_SATURATION;
    }
    // smear the highest set bit of x-1 downwards, so exact powers map to themselves
    let mut y = x.saturating_sub(1);
    y |= y >> 1;
    y |= y >> 2;
    y |= y >> 4;
    y |= y >> 8;
    y |= y >> 16;
    y + 1
}
