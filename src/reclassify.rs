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
Reclasificación de subcombustibles
==================================

Separa un subcombustible del catálogo de exclusiones (p.e. "aviation") del petróleo de su
sector como pieza propia no electrificable, o lo devuelve al petróleo.

Both directions rebuild base values from the readings, so no sector total changes and a
carve followed by a fold leaves petroleum as it was.
*/

use tracing::debug;

use crate::{
    emissions::{co2_reading, EmissionSubset},
    error::{ElecError, Result},
    sectors::SectorScenario,
    types::{ExcludeSpec, Fuel, FuelContribution, PieceKey, Readings, SourceTerm},
};

fn parent_key(spec: &ExcludeSpec) -> Result<PieceKey> {
    if spec.parent != Fuel::Petroleum {
        return Err(ElecError::WrongInput(format!(
            "Solo pueden separarse subcombustibles del petróleo (\"{}\" pertenece a \"{}\")",
            spec.name, spec.parent
        )));
    }
    Ok(PieceKey::from(spec.parent))
}

/// Separa un subcombustible como pieza propia
///
/// Returns false if it was already carved out.
pub fn carve(
    scn: &mut SectorScenario,
    emissions: &mut EmissionSubset,
    spec: &ExcludeSpec,
    readings: &Readings,
) -> Result<bool> {
    let parent = parent_key(spec)?;
    let key = PieceKey::Carved(spec.name.clone());
    if scn.breakdown.pieces.contains_key(&key) {
        return Ok(false);
    }
    let ids: Vec<&str> = spec.ids.iter().map(String::as_str).collect();
    let mut piece = FuelContribution::new(key.clone(), &ids, &[]);
    piece.rederive_base(readings);

    let bd = &mut scn.breakdown;
    let parent_piece = bd
        .pieces
        .get_mut(&parent)
        .ok_or_else(|| ElecError::WrongInput(format!("Sin pieza \"{}\"", parent)))?;
    parent_piece
        .sources
        .extend(spec.ids.iter().map(|id| SourceTerm::carve(id.as_str())));
    parent_piece.rederive_base(readings);
    debug!(
        sector = %scn.sector,
        piece = %key,
        base_val = piece.base_val,
        "Subcombustible separado del petróleo"
    );
    bd.pieces.insert(key, piece);

    emissions.split_carved(bd, co2_reading(readings, scn.series.co2, spec.parent));
    Ok(true)
}

/// Devuelve un subcombustible separado a su combustible de origen
///
/// Returns false if it was not carved out.
pub fn fold(
    scn: &mut SectorScenario,
    emissions: &mut EmissionSubset,
    spec: &ExcludeSpec,
    readings: &Readings,
) -> Result<bool> {
    let parent = parent_key(spec)?;
    let key = PieceKey::Carved(spec.name.clone());
    let bd = &mut scn.breakdown;
    if bd.pieces.shift_remove(&key).is_none() {
        return Ok(false);
    }
    if let Some(parent_piece) = bd.pieces.get_mut(&parent) {
        parent_piece
            .sources
            .retain(|s| !(s.synthetic && spec.ids.contains(&s.id)));
        parent_piece.rederive_base(readings);
    }
    debug!(sector = %scn.sector, piece = %key, "Subcombustible devuelto al petróleo");

    emissions.split_carved(bd, co2_reading(readings, scn.series.co2, spec.parent));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eia, emissions::Emissions, generation::GenerationRegistry, sectors};
    use crate::types::Sector;
    use pretty_assertions::assert_eq;

    fn readings() -> Readings {
        let mut r = Readings::default();
        r.energy.insert("ESACB".into(), 10.0);
        r.energy.insert("TNACB".into(), 1310.0);
        r.energy.insert("PAACB".into(), 1000.0);
        r.energy.insert("NGASB".into(), 300.0);
        r.energy.insert("JFACB".into(), 150.0);
        r.energy.insert("AVACB".into(), 50.0);
        r.emissions.insert("TC:PE".into(), 70.0);
        r
    }

    #[test]
    fn reclassify_roundtrip() {
        let r = readings();
        let mut registry = sectors::sector_registry();
        for scn in registry.values_mut() {
            scn.load_base(&r);
        }
        let mut emissions = Emissions::default();
        emissions.load_base(&r, &registry, &GenerationRegistry::default());

        let petroleum = PieceKey::from(Fuel::Petroleum);
        let aviation = PieceKey::Carved("aviation".into());
        let catalog = eia::exclude_catalog();
        let spec = &catalog[0];
        let scn = &mut registry[&Sector::Transportation];
        let subset = &mut emissions.sectors[&Sector::Transportation];
        let before_piece = scn.breakdown.pieces[&petroleum].clone();
        let before_em = subset.pieces[&petroleum].clone();
        let total = scn.breakdown.total.base_val;

        assert!(carve(scn, subset, spec, &r).unwrap());
        assert!(!carve(scn, subset, spec, &r).unwrap());
        assert_eq!(scn.breakdown.pieces[&petroleum].base_val, 800.0);
        assert_eq!(scn.breakdown.pieces[&aviation].base_val, 200.0);
        assert_eq!(scn.breakdown.pieces_base(), scn.breakdown.primary.base_val);
        assert_eq!(scn.breakdown.total.base_val, total);
        assert_eq!(subset.pieces[&aviation].factor, before_em.factor);
        assert!((subset.pieces[&petroleum].base_val - 56.0).abs() < 1e-9);

        assert!(fold(scn, subset, spec, &r).unwrap());
        assert!(!fold(scn, subset, spec, &r).unwrap());
        assert_eq!(scn.breakdown.pieces[&petroleum], before_piece);
        assert_eq!(subset.pieces[&petroleum], before_em);
        assert!(!scn.breakdown.pieces.contains_key(&aviation));
    }
}
