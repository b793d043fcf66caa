// Copyright (c) 2018-2022  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>,
//            Daniel Jiménez González <dani@ietcc.csic.es>,
//            Marta Sorribes Gil <msorribes@ietcc.csic.es>

// -----------------------------------------------------------------------------------
// Numeric utilities
// -----------------------------------------------------------------------------------

use num::Float;

/// Values with a magnitude under this are rounding noise
pub const EPSILON: f64 = 1e-9;

/// Rounds rounding noise to exactly zero
///
/// Applied at the end of the solver, rebalancer and emissions derivation
pub fn zero_if_tiny<T: Float>(value: T) -> T {
    match T::from(EPSILON) {
        Some(eps) if value.abs() < eps => T::zero(),
        _ => value,
    }
}

/// Quotient num / den, or zero for a null denominator (or a NaN result)
pub fn safe_ratio<T: Float>(num: T, den: T) -> T {
    if den == T::zero() {
        return T::zero();
    }
    let res = num / den;
    if res.is_nan() {
        T::zero()
    } else {
        res
    }
}

/// Approximate equality with an absolute tolerance
pub fn near<T: Float>(a: T, b: T, tol: T) -> bool {
    (a - b).abs() <= tol
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn vecops_zero_if_tiny() {
        assert_eq!(zero_if_tiny(1e-12_f64), 0.0);
        assert_eq!(zero_if_tiny(-1e-12_f64), 0.0);
        assert_eq!(zero_if_tiny(-0.5_f64), -0.5);
        assert_eq!(zero_if_tiny(3.0_f64), 3.0);
    }

    #[test]
    fn vecops_safe_ratio() {
        assert_eq!(safe_ratio(1.0_f64, 0.0), 0.0);
        assert_eq!(safe_ratio(0.0_f64, 0.0), 0.0);
        assert_eq!(safe_ratio(3.0_f64, 2.0), 1.5);
    }

    #[test]
    fn vecops_near() {
        assert!(near(10.0, 10.4, 0.5));
        assert!(!near(10.0, 10.6, 0.5));
    }
}
