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
Sectores económicos
===================

Desglose de energía de cada sector (eléctrica, primaria, total) y parámetros de escenario.

- Tipo SectorBreakdown (agregados + piezas de energía primaria)
- Tipo SectorScenario (desglose + demanda, electrificación y eficiencia ajustadas)
- Registro de sectores
*/

use indexmap::IndexMap;
use strum::IntoEnumIterator;
use tracing::warn;

use crate::{
    eia::{self, SectorSeries},
    types::{Aggregate, Fuel, FuelContribution, PieceKey, Readings, Sector},
    vecops::safe_ratio,
};

/// Desglose de energía de un sector
///
/// `total = electric + primary`, for base and adjusted values. The primary base value is
/// the authority; its pieces must add up to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectorBreakdown {
    /// Electricity delivered to the sector
    pub electric: Aggregate,
    /// Energy consumed directly as fuel
    pub primary: Aggregate,
    /// Sector total
    pub total: Aggregate,
    /// Primary pieces, in insertion order
    pub pieces: IndexMap<PieceKey, FuelContribution>,
}

impl SectorBreakdown {
    /// Breakdown with the pieces of a series table plus the residual "other" piece
    pub fn from_series(series: &SectorSeries) -> Self {
        let mut pieces = IndexMap::new();
        for (fuel, add, sub) in series.pieces {
            let key = PieceKey::from(*fuel);
            pieces.insert(key.clone(), FuelContribution::new(key, add, sub));
        }
        let other = PieceKey::from(Fuel::Other);
        pieces.insert(other.clone(), FuelContribution::new(other, &[], &[]));
        Self {
            pieces,
            ..Default::default()
        }
    }

    /// Piece of a core fuel
    pub fn piece(&self, fuel: Fuel) -> Option<&FuelContribution> {
        self.pieces.get(&PieceKey::from(fuel))
    }

    /// Sum of the base values of the pieces
    pub fn pieces_base(&self) -> f64 {
        self.pieces.values().map(|p| p.base_val).sum()
    }

    /// Sum of the adjusted values of the pieces
    pub fn pieces_adjusted(&self) -> f64 {
        self.pieces.values().map(|p| p.adjusted_val).sum()
    }
}

/// Escenario de un sector económico
#[derive(Debug, Clone, PartialEq)]
pub struct SectorScenario {
    /// Sector
    pub sector: Sector,
    /// Series ids of the sector
    pub series: &'static SectorSeries,
    /// Energy breakdown
    pub breakdown: SectorBreakdown,
    /// Static electric efficiency ratio of the sector
    pub base_elec_efficiency: f64,
    /// Scenario electric efficiency ratio
    pub adjusted_elec_efficiency: f64,
    /// Scenario demand, % of the base total
    pub adjusted_demand: f64,
    /// Scenario electrification, % of the adjusted total delivered as electricity
    pub adjusted_electrification: f64,
    /// Lowest electrification reachable with the current classification
    pub min_electrification: f64,
    /// Highest electrification reachable with the current classification
    pub max_electrification: f64,
}

impl SectorScenario {
    /// Escenario vacío de un sector, con sus identificadores de series
    pub fn new(sector: Sector) -> Self {
        let series = eia::sector_series(sector);
        Self {
            sector,
            series,
            breakdown: SectorBreakdown::from_series(series),
            base_elec_efficiency: eia::DEFAULT_ELEC_EFFICIENCY,
            adjusted_elec_efficiency: eia::DEFAULT_ELEC_EFFICIENCY,
            adjusted_demand: 100.0,
            adjusted_electrification: 0.0,
            min_electrification: 0.0,
            max_electrification: 100.0,
        }
    }

    /// Electrificación de los valores base, %
    pub fn base_electrification(&self) -> f64 {
        100.0 * safe_ratio(self.breakdown.electric.base_val, self.breakdown.total.base_val)
    }

    /// Recalcula los valores base a partir de lecturas y reinicia los parámetros de escenario
    ///
    /// Pieces keep their source terms, so carved pieces and their deductions survive a
    /// refresh.
    pub fn load_base(&mut self, readings: &Readings) {
        let electric = readings.energy(self.series.electric);
        let total = readings.energy(self.series.total);
        let bd = &mut self.breakdown;
        bd.electric = Aggregate::new(electric);
        bd.total = Aggregate::new(total);
        bd.primary = Aggregate::new(total - electric);

        let other_key = PieceKey::from(Fuel::Other);
        for (key, piece) in bd.pieces.iter_mut() {
            if *key != other_key {
                piece.rederive_base(readings);
            }
        }
        let named: f64 = bd
            .pieces
            .iter()
            .filter(|(key, _)| **key != other_key)
            .map(|(_, p)| p.base_val)
            .sum();
        let residual = bd.primary.base_val - named;
        if residual < 0.0 {
            warn!(
                sector = %self.sector,
                residual,
                "Las piezas de energía primaria superan la energía primaria del sector"
            );
        }
        if let Some(other) = bd.pieces.get_mut(&other_key) {
            other.base_val = residual;
            other.adjusted_val = residual;
        }
        self.reset_knobs();
    }

    /// Devuelve los parámetros de escenario a sus valores base
    pub fn reset_knobs(&mut self) {
        self.adjusted_elec_efficiency = self.base_elec_efficiency;
        self.adjusted_demand = 100.0;
        self.adjusted_electrification = self.base_electrification();
        self.min_electrification = 0.0;
        self.max_electrification = 100.0;
    }
}

/// Registro de sectores, en orden fijo
pub fn sector_registry() -> IndexMap<Sector, SectorScenario> {
    Sector::iter().map(|s| (s, SectorScenario::new(s))).collect()
}

/// Electricidad total consumida por los sectores, valores base
pub fn electric_base(sectors: &IndexMap<Sector, SectorScenario>) -> f64 {
    sectors.values().map(|s| s.breakdown.electric.base_val).sum()
}

/// Electricidad total consumida por los sectores, valores ajustados
pub fn electric_adjusted(sectors: &IndexMap<Sector, SectorScenario>) -> f64 {
    sectors
        .values()
        .map(|s| s.breakdown.electric.adjusted_val)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn readings() -> Readings {
        let mut r = Readings::default();
        for (id, v) in &[
            ("ESRCB", 200.0),
            ("TNRCB", 1000.0),
            ("SORCB", 50.0),
            ("NGRCB", 520.0),
            ("SFRCB", 20.0),
            ("PARCB", 100.0),
        ] {
            r.energy.insert(id.to_string(), *v);
        }
        r
    }

    #[test]
    fn sectors_load_base() {
        let mut scn = SectorScenario::new(Sector::Residential);
        scn.load_base(&readings());
        let bd = &scn.breakdown;
        assert_eq!(bd.primary.base_val, 800.0);
        assert_eq!(bd.piece(Fuel::NaturalGas).unwrap().base_val, 500.0);
        assert_eq!(bd.piece(Fuel::Wind).unwrap().base_val, 0.0);
        assert_eq!(bd.piece(Fuel::Other).unwrap().base_val, 150.0);
        assert_eq!(bd.pieces_base(), 800.0);
        assert_eq!(scn.adjusted_electrification, 20.0);
        assert_eq!(scn.adjusted_demand, 100.0);
    }

    #[test]
    fn sectors_negative_residual() {
        let mut r = readings();
        r.energy.insert("PARCB".into(), 400.0);
        let mut scn = SectorScenario::new(Sector::Residential);
        scn.load_base(&r);
        assert_eq!(scn.breakdown.piece(Fuel::Other).unwrap().base_val, -150.0);
        assert_eq!(scn.breakdown.pieces_base(), 800.0);
    }

    #[test]
    fn sectors_registry_order() {
        let reg = sector_registry();
        let order: Vec<Sector> = reg.keys().copied().collect();
        assert_eq!(
            order,
            vec![
                Sector::Residential,
                Sector::Commercial,
                Sector::Industrial,
                Sector::Transportation
            ]
        );
        assert_eq!(electric_base(&reg), 0.0);
    }
}
