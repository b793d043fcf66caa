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
Vista del modelo
================

Datos planos del modelo para su presentación (tablas, gráficas, JSON).

Energies are stored in GWh. The GW display unit divides them by the hours of a year, and that
only happens here.
*/

use std::fmt;
use std::str;

use serde::Serialize;

use crate::{
    eia,
    emissions::EmissionSubset,
    error::ElecError,
    generation::EqualizeOutcome,
    model::Model,
    sectors::{self, SectorScenario},
    types::{Fuel, PieceKey, Sector},
};

/// Horas de un año
pub const HOURS_PER_YEAR: f64 = 365.0 * 24.0;

/// Unidad de presentación de energías
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum DisplayUnit {
    /// Energy, GWh
    GWh,
    /// Average power over the year, GW
    GW,
}

impl DisplayUnit {
    /// Convierte un valor en GWh a la unidad de presentación
    pub fn convert(self, gwh: f64) -> f64 {
        match self {
            DisplayUnit::GWh => gwh,
            DisplayUnit::GW => gwh / HOURS_PER_YEAR,
        }
    }
}

impl Default for DisplayUnit {
    fn default() -> Self {
        DisplayUnit::GWh
    }
}

impl str::FromStr for DisplayUnit {
    type Err = ElecError;

    fn from_str(s: &str) -> Result<DisplayUnit, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gwh" => Ok(DisplayUnit::GWh),
            "gw" => Ok(DisplayUnit::GW),
            _ => Err(ElecError::ParseError(s.into())),
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Par de valores base y ajustado
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueView {
    /// Base value
    pub base: f64,
    /// Adjusted value
    pub adjusted: f64,
}

impl ValueView {
    fn new(unit: DisplayUnit, base: f64, adjusted: f64) -> Self {
        Self {
            base: unit.convert(base),
            adjusted: unit.convert(adjusted),
        }
    }
}

/// Pieza de energía primaria de un sector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceView {
    /// Fuel or carved sub-fuel
    pub key: PieceKey,
    /// In the green set
    pub green: bool,
    /// Follows demand only
    pub unelectrifiable: bool,
    /// Energy
    pub value: ValueView,
}

/// Sector económico
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorView {
    /// Sector
    pub sector: Sector,
    /// Electricity
    pub electric: ValueView,
    /// Primary energy
    pub primary: ValueView,
    /// Total energy
    pub total: ValueView,
    /// Demand, % of base
    pub demand: f64,
    /// Electrification, %
    pub electrification: f64,
    /// Base electrification, %
    pub base_electrification: f64,
    /// Lowest reachable electrification, %
    pub min_electrification: f64,
    /// Highest reachable electrification, %
    pub max_electrification: f64,
    /// Electric efficiency ratio
    pub efficiency: f64,
    /// Primary pieces, non-green first (carved sub-fuels included), then green, each group in
    /// insertion order
    pub pieces: Vec<PieceView>,
}

impl SectorView {
    fn new(scn: &SectorScenario, model: &Model, unit: DisplayUnit) -> Self {
        let bd = &scn.breakdown;
        let (green, other): (Vec<PieceView>, Vec<PieceView>) = bd
            .pieces
            .values()
            .map(|p| PieceView {
                key: p.key.clone(),
                green: p.key.fuel().map_or(false, |f| model.classes.is_green(f)),
                unelectrifiable: model.classes.is_unelectrifiable(&p.key),
                value: ValueView::new(unit, p.base_val, p.adjusted_val),
            })
            .partition(|p| p.green);
        Self {
            sector: scn.sector,
            electric: ValueView::new(unit, bd.electric.base_val, bd.electric.adjusted_val),
            primary: ValueView::new(unit, bd.primary.base_val, bd.primary.adjusted_val),
            total: ValueView::new(unit, bd.total.base_val, bd.total.adjusted_val),
            demand: scn.adjusted_demand,
            electrification: scn.adjusted_electrification,
            base_electrification: scn.base_electrification(),
            min_electrification: scn.min_electrification,
            max_electrification: scn.max_electrification,
            efficiency: scn.adjusted_elec_efficiency,
            pieces: other.into_iter().chain(green).collect(),
        }
    }
}

/// Fuente de generación
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationPieceView {
    /// Source
    pub key: Fuel,
    /// In the green set
    pub green: bool,
    /// Can be edited
    pub adjustable: bool,
    /// Generation
    pub value: ValueView,
    /// Adjusted generation, % of the base total
    pub share: f64,
}

/// Generación eléctrica
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationView {
    /// Sources, adjustable first
    pub pieces: Vec<GenerationPieceView>,
    /// Generation total
    pub total: ValueView,
    /// Electricity used by the sectors
    pub demand: ValueView,
    /// Generation needed for the adjusted demand
    pub required: f64,
    /// Required minus adjusted generation
    pub mismatch: f64,
    /// Sector electricity over generation, base values
    pub transmission_efficiency: f64,
    /// Upper bound of every source, % of the base total
    pub slider_max: f64,
    /// Last equalize, if any since the last reset
    pub last_equalize: Option<EqualizeOutcome>,
}

/// Emisiones de un combustible, Mt CO2
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionPieceView {
    /// Fuel or carved sub-fuel
    pub key: PieceKey,
    /// Emission factor, Mt CO2 / GWh
    pub factor: f64,
    /// Base emission
    pub base: f64,
    /// Adjusted emission
    pub adjusted: f64,
}

/// Emisiones de un contexto, Mt CO2
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionContextView {
    /// Sector name or "generation"
    pub context: String,
    /// Pieces
    pub pieces: Vec<EmissionPieceView>,
    /// Base total
    pub base: f64,
    /// Adjusted total
    pub adjusted: f64,
}

impl EmissionContextView {
    fn new(context: String, subset: &EmissionSubset) -> Self {
        Self {
            context,
            pieces: subset
                .pieces
                .values()
                .map(|p| EmissionPieceView {
                    key: p.key.clone(),
                    factor: p.factor,
                    base: p.base_val,
                    adjusted: p.adjusted_val,
                })
                .collect(),
            base: subset.total_base(),
            adjusted: subset.total_adjusted(),
        }
    }
}

/// Emisiones del modelo, Mt CO2
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionsView {
    /// Sectors and generation
    pub contexts: Vec<EmissionContextView>,
    /// Base total
    pub base: f64,
    /// Adjusted total
    pub adjusted: f64,
}

/// Vista completa del modelo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Region id
    pub region: String,
    /// Region name
    pub region_name: String,
    /// Year
    pub year: i32,
    /// Unit of every energy value
    pub unit: DisplayUnit,
    /// Green set
    pub green: Vec<Fuel>,
    /// Active exclusions
    pub excluded: Vec<String>,
    /// End-use sectors
    pub sectors: Vec<SectorView>,
    /// Generation
    pub generation: GenerationView,
    /// Emissions
    pub emissions: EmissionsView,
}

impl Snapshot {
    /// Vista de un modelo en una unidad de presentación
    pub fn from_model(model: &Model, unit: DisplayUnit) -> Self {
        let gen = &model.generation;
        let demand_base = sectors::electric_base(&model.sectors);
        let demand = model.electric_demand();
        let generation = GenerationView {
            pieces: gen
                .pieces
                .values()
                .map(|p| GenerationPieceView {
                    key: p.key,
                    green: model.classes.is_green(p.key),
                    adjustable: p.adjustable,
                    value: ValueView::new(unit, p.base_val, p.adjusted_val),
                    share: p.adjusted_demand,
                })
                .collect(),
            total: ValueView::new(unit, gen.base_total, gen.adjusted_total()),
            demand: ValueView::new(unit, demand_base, demand),
            required: unit.convert(gen.required(demand)),
            mismatch: unit.convert(gen.mismatch(demand)),
            transmission_efficiency: gen.transmission_efficiency,
            slider_max: gen.slider_max,
            last_equalize: model.last_equalize.map(|o| EqualizeOutcome {
                residual: unit.convert(o.residual),
                ..o
            }),
        };
        let emissions = EmissionsView {
            contexts: model
                .emissions
                .contexts()
                .map(|(ctx, subset)| EmissionContextView::new(ctx.to_string(), subset))
                .collect(),
            base: model.emissions.grand_total_base(),
            adjusted: model.emissions.grand_total(),
        };
        Self {
            region: model.region.clone(),
            region_name: eia::region_name(&model.region)
                .unwrap_or_default()
                .to_string(),
            year: model.year,
            unit,
            green: model.classes.green.iter().copied().collect(),
            excluded: model.classes.excluded.iter().cloned().collect(),
            sectors: model
                .sectors
                .values()
                .map(|scn| SectorView::new(scn, model, unit))
                .collect(),
            generation,
            emissions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn snapshot_display_unit() {
        assert_eq!("GW".parse::<DisplayUnit>().unwrap(), DisplayUnit::GW);
        assert_eq!("gwh".parse::<DisplayUnit>().unwrap(), DisplayUnit::GWh);
        assert!("TWh".parse::<DisplayUnit>().is_err());
        assert_eq!(DisplayUnit::GW.convert(8760.0), 1.0);
        assert_eq!(DisplayUnit::GWh.convert(8760.0), 8760.0);
    }

    #[test]
    fn snapshot_piece_order() {
        let model = Model::default();
        let snap = model.snapshot(DisplayUnit::GWh);
        assert_eq!(snap.sectors.len(), 4);
        assert_eq!(snap.region_name, "Entire US");
        let keys: Vec<String> = snap.sectors[0]
            .pieces
            .iter()
            .map(|p| p.key.to_string())
            .collect();
        assert_eq!(
            keys,
            vec![
                "coal",
                "natural gas",
                "petroleum",
                "other",
                "wind",
                "solar",
                "geothermal",
                "hydroelectric"
            ]
        );
        assert_eq!(snap.emissions.contexts.len(), 5);
        assert_eq!(snap.emissions.contexts[4].context, "generation");
    }
}
