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
Comprobaciones de coherencia
============================

Invariantes del modelo tras cada edición. Un fallo indica un error en el cálculo, no en los
datos, y no se intenta recuperar.
*/

use indexmap::IndexMap;
use tracing::error;

use crate::{
    emissions::{EmissionContext, Emissions},
    error::{ElecError, Result},
    generation::GenerationRegistry,
    sectors::SectorScenario,
    types::{ClassificationSets, Sector},
    vecops::{near, EPSILON},
};

/// Tolerancia para energías, GWh
pub const ENERGY_TOL_GWH: f64 = 10.0;
/// Tolerancia para porcentajes, puntos porcentuales
pub const RATIO_TOL_PCT: f64 = 1.0;
/// Tolerancia para emisiones, Mt CO2
pub const EMISSION_TOL: f64 = 0.01;

fn check_sector(scn: &SectorScenario, classes: &ClassificationSets, out: &mut Vec<String>) {
    let s = scn.sector;
    let bd = &scn.breakdown;

    if !near(bd.pieces_base(), bd.primary.base_val, ENERGY_TOL_GWH) {
        out.push(format!(
            "{}: piezas base ({:.2}) distintas de la energía primaria base ({:.2})",
            s,
            bd.pieces_base(),
            bd.primary.base_val
        ));
    }
    if !near(bd.pieces_adjusted(), bd.primary.adjusted_val, ENERGY_TOL_GWH) {
        out.push(format!(
            "{}: piezas ajustadas ({:.2}) distintas de la energía primaria ajustada ({:.2})",
            s,
            bd.pieces_adjusted(),
            bd.primary.adjusted_val
        ));
    }
    for (label, electric, primary, total) in &[
        (
            "base",
            bd.electric.base_val,
            bd.primary.base_val,
            bd.total.base_val,
        ),
        (
            "ajustado",
            bd.electric.adjusted_val,
            bd.primary.adjusted_val,
            bd.total.adjusted_val,
        ),
    ] {
        if !near(electric + primary, *total, ENERGY_TOL_GWH) {
            out.push(format!(
                "{}: eléctrica + primaria ({:.2}) distinta del total {} ({:.2})",
                s,
                electric + primary,
                label,
                total
            ));
        }
    }

    if bd.total.adjusted_val.abs() > EPSILON {
        let actual = 100.0 * bd.electric.adjusted_val / bd.total.adjusted_val;
        if !near(actual, scn.adjusted_electrification, RATIO_TOL_PCT) {
            out.push(format!(
                "{}: electrificación {:.2}% distinta de eléctrica / total ({:.2}%)",
                s, scn.adjusted_electrification, actual
            ));
        }
    }

    if near(scn.adjusted_demand, 100.0, EPSILON) {
        for piece in bd.pieces.values() {
            if classes.is_unelectrifiable(&piece.key)
                && piece.adjusted_val < piece.base_val - ENERGY_TOL_GWH
            {
                out.push(format!(
                    "{}: pieza no electrificable \"{}\" por debajo de su valor base ({:.2} < {:.2})",
                    s, piece.key, piece.adjusted_val, piece.base_val
                ));
            }
        }
    }
}

fn check_generation(generation: &GenerationRegistry, out: &mut Vec<String>) {
    let base: f64 = generation.pieces.values().map(|p| p.base_val).sum();
    if !near(base, generation.base_total, ENERGY_TOL_GWH) {
        out.push(format!(
            "generación: piezas base ({:.2}) distintas del total base ({:.2})",
            base, generation.base_total
        ));
    }
}

fn check_emissions(
    sectors: &IndexMap<Sector, SectorScenario>,
    generation: &GenerationRegistry,
    emissions: &Emissions,
    out: &mut Vec<String>,
) {
    for (ctx, subset) in emissions.contexts() {
        for em in subset.pieces.values() {
            let energy = match ctx {
                EmissionContext::Sector(s) => sectors
                    .get(&s)
                    .and_then(|scn| scn.breakdown.pieces.get(&em.key))
                    .map(|p| p.adjusted_val),
                EmissionContext::Generation => em
                    .key
                    .fuel()
                    .and_then(|f| generation.pieces.get(&f))
                    .map(|p| p.adjusted_val),
            }
            .unwrap_or(0.0);
            if !near(em.factor * energy, em.adjusted_val, EMISSION_TOL) {
                out.push(format!(
                    "{} {}: factor × energía ({:.4}) distinto de la emisión ajustada ({:.4})",
                    ctx,
                    em.key,
                    em.factor * energy,
                    em.adjusted_val
                ));
            }
        }
    }
}

/// Lista de incumplimientos de los invariantes del modelo
pub fn violations(
    sectors: &IndexMap<Sector, SectorScenario>,
    generation: &GenerationRegistry,
    emissions: &Emissions,
    classes: &ClassificationSets,
) -> Vec<String> {
    let mut out = Vec::new();
    for scn in sectors.values() {
        check_sector(scn, classes, &mut out);
    }
    check_generation(generation, &mut out);
    check_emissions(sectors, generation, emissions, &mut out);
    out
}

/// Comprueba los invariantes del modelo
///
/// Returns `ElecError::Inconsistent` with every violation found.
pub fn ensure_consistent(
    sectors: &IndexMap<Sector, SectorScenario>,
    generation: &GenerationRegistry,
    emissions: &Emissions,
    classes: &ClassificationSets,
) -> Result<()> {
    let found = violations(sectors, generation, emissions, classes);
    if found.is_empty() {
        return Ok(());
    }
    for v in &found {
        error!(violation = %v, "Modelo inconsistente");
    }
    Err(ElecError::Inconsistent(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eia, sectors::sector_registry, solver, types::Readings};
    use pretty_assertions::assert_eq;

    fn readings() -> Readings {
        let mut r = Readings::default();
        r.energy.insert("ESCCB".into(), 300.0);
        r.energy.insert("TNCCB".into(), 1000.0);
        r.energy.insert("NGCCB".into(), 600.0);
        r.energy.insert("WYCCB".into(), 100.0);
        r
    }

    fn solved() -> (
        IndexMap<Sector, SectorScenario>,
        GenerationRegistry,
        Emissions,
        ClassificationSets,
    ) {
        let r = readings();
        let classes = eia::default_classification();
        let mut sectors = sector_registry();
        for scn in sectors.values_mut() {
            scn.load_base(&r);
            scn.adjusted_electrification = 55.0;
            solver::clamp_electrification(scn, &classes);
            solver::solve(scn, &classes);
        }
        let generation = GenerationRegistry::default();
        let mut emissions = Emissions::default();
        emissions.load_base(&r, &sectors, &generation);
        emissions.derive(&sectors, &generation);
        (sectors, generation, emissions, classes)
    }

    #[test]
    fn checks_solved_model_is_consistent() {
        let (sectors, generation, emissions, classes) = solved();
        assert_eq!(
            violations(&sectors, &generation, &emissions, &classes),
            Vec::<String>::new()
        );
        assert!(ensure_consistent(&sectors, &generation, &emissions, &classes).is_ok());
    }

    #[test]
    fn checks_detect_broken_conservation() {
        let (mut sectors, generation, emissions, classes) = solved();
        sectors[&Sector::Commercial].breakdown.total.adjusted_val += 50.0;
        match ensure_consistent(&sectors, &generation, &emissions, &classes) {
            Err(ElecError::Inconsistent(v)) => assert_eq!(v.len(), 2),
            other => panic!("se esperaba un error de coherencia: {:?}", other),
        }
    }

    #[test]
    fn checks_detect_electrified_green() {
        let (mut sectors, generation, emissions, classes) = solved();
        let wind = crate::types::PieceKey::from(crate::types::Fuel::Wind);
        let bd = &mut sectors[&Sector::Commercial].breakdown;
        bd.pieces[&wind].adjusted_val -= 50.0;
        bd.primary.adjusted_val -= 50.0;
        bd.total.adjusted_val -= 50.0;
        let found = violations(&sectors, &generation, &emissions, &classes);
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|v| v.contains("wind")));
    }
}
