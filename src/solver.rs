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

/*!
Electrificación de sectores
===========================

Reparto de la energía ajustada de un sector entre electricidad y energía primaria.

Given the base values of a sector and its scenario knobs (demand, electrification and
efficiency), computes the energy `to_move` from primary use to electricity that reaches the
requested electrification:

```text
e = electrification / 100
sP = primary.base · demand / 100
sE = electric.base · demand / 100

to_move = (e · (sP + sE) - sE) / (eff - e · eff + e)

primary = sP - to_move
electric = sE + to_move · eff
```

Unelectrifiable pieces (green fuels and carved sub-fuels) only follow demand. The rest give up
`to_move` in proportion to their share of the electrifiable base pool.
*/

use tracing::debug;

use crate::{
    sectors::{SectorBreakdown, SectorScenario},
    types::ClassificationSets,
    vecops::{safe_ratio, zero_if_tiny, EPSILON},
};

/// Suma de los valores base de las piezas no electrificables
pub fn unelectrifiable_base(bd: &SectorBreakdown, classes: &ClassificationSets) -> f64 {
    bd.pieces
        .values()
        .filter(|p| classes.is_unelectrifiable(&p.key))
        .map(|p| p.base_val)
        .sum()
}

/// Energía primaria base que puede electrificarse
pub fn electrifiable_base(bd: &SectorBreakdown, classes: &ClassificationSets) -> f64 {
    bd.primary.base_val - unelectrifiable_base(bd, classes)
}

/// Límites inferior y superior de la electrificación de un sector, %
///
/// The ceiling is reached when every electrifiable piece has been moved to electricity:
///
/// `max = 100 · (1 - U / (P - A + E + A · eff))`
///
/// with U the unelectrifiable base, A the electrifiable base, P the primary base and E the
/// electric base. Without an electrifiable pool nothing can move and both bounds collapse to
/// the base ratio. A sector without energy gets (0, 0).
pub fn electrification_bounds(scn: &SectorScenario, classes: &ClassificationSets) -> (f64, f64) {
    let bd = &scn.breakdown;
    let eff = scn.adjusted_elec_efficiency;
    let unelec = unelectrifiable_base(bd, classes);
    let elec = bd.primary.base_val - unelec;
    let den = bd.primary.base_val - elec + bd.electric.base_val + elec * eff;

    if bd.total.base_val.abs() < EPSILON || den.abs() < EPSILON {
        return (0.0, 0.0);
    }
    if elec.abs() < EPSILON {
        let base = scn.base_electrification();
        return (base, base);
    }
    let max = 100.0 * (1.0 - unelec / den);
    if max.is_nan() {
        return (0.0, 0.0);
    }
    (0.0, max.max(0.0).min(100.0))
}

/// Ajusta la electrificación de un sector a sus límites
///
/// Must run before `solve` whenever electrification, efficiency or the classification sets
/// change. Returns the (possibly clamped) electrification.
pub fn clamp_electrification(scn: &mut SectorScenario, classes: &ClassificationSets) -> f64 {
    let (min, max) = electrification_bounds(scn, classes);
    scn.min_electrification = min;
    scn.max_electrification = max;
    let requested = scn.adjusted_electrification;
    let clamped = requested.max(min).min(max);
    if (clamped - requested).abs() > EPSILON {
        debug!(
            sector = %scn.sector,
            requested,
            clamped,
            "Electrificación ajustada a los límites del sector"
        );
    }
    scn.adjusted_electrification = clamped;
    clamped
}

/// Energía que pasa de uso primario a electricidad para la electrificación pedida
pub fn energy_to_move(scaled_primary: f64, scaled_electric: f64, e: f64, eff: f64) -> f64 {
    safe_ratio(
        e * (scaled_primary + scaled_electric) - scaled_electric,
        eff - e * eff + e,
    )
}

/// Calcula los valores ajustados de un sector
///
/// Adjusted values are a pure function of the base values, the scenario knobs and the
/// classification sets, so this can run any number of times.
pub fn solve(scn: &mut SectorScenario, classes: &ClassificationSets) {
    let demand = scn.adjusted_demand / 100.0;
    let e = scn.adjusted_electrification / 100.0;
    let eff = scn.adjusted_elec_efficiency;

    let elec_base = electrifiable_base(&scn.breakdown, classes);
    let bd = &mut scn.breakdown;
    let scaled_primary = bd.primary.base_val * demand;
    let scaled_electric = bd.electric.base_val * demand;

    let to_move = if elec_base.abs() < EPSILON {
        0.0
    } else {
        energy_to_move(scaled_primary, scaled_electric, e, eff)
    };

    let primary = scaled_primary - to_move;
    let electric = scaled_electric + to_move * eff;
    bd.primary.adjusted_val = zero_if_tiny(primary);
    bd.electric.adjusted_val = zero_if_tiny(electric);
    bd.total.adjusted_val = zero_if_tiny(primary + electric);

    for piece in bd.pieces.values_mut() {
        let scaled = piece.base_val * demand;
        let value = if classes.is_unelectrifiable(&piece.key) {
            scaled
        } else {
            scaled - to_move * safe_ratio(piece.base_val, elec_base)
        };
        piece.adjusted_val = zero_if_tiny(value);
    }
}
