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
Emisiones de CO2
================

Factores de emisión por contexto (sector o generación) y combustible, y emisiones ajustadas.

The factor of each piece is `measured emission / base energy`, fixed at every refresh. The
adjusted emission is `factor · adjusted energy`.

Pieces carved out of petroleum have no measured emissions. They take the petroleum factor
and petroleum keeps the rest of the measured emission.
*/

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{
    eia,
    generation::GenerationRegistry,
    sectors::{SectorBreakdown, SectorScenario},
    types::{Fuel, PieceKey, Readings, Sector},
    vecops::{safe_ratio, zero_if_tiny},
};

/// Contexto de unas emisiones
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum EmissionContext {
    /// End-use sector consumption
    Sector(Sector),
    /// Electricity generation
    Generation,
}

impl fmt::Display for EmissionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionContext::Sector(s) => write!(f, "{}", s),
            EmissionContext::Generation => write!(f, "generation"),
        }
    }
}

/// Emisiones de un combustible en un contexto
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionPiece {
    /// Fuel key, shared with the energy pieces
    pub key: PieceKey,
    /// Emission intensity, Mt CO2 / GWh
    pub factor: f64,
    /// Measured (or assigned) emission, Mt CO2
    pub base_val: f64,
    /// Scenario emission, Mt CO2
    pub adjusted_val: f64,
    /// Factor taken from petroleum when the piece was carved out
    pub inherited: bool,
}

impl EmissionPiece {
    fn new(key: PieceKey) -> Self {
        Self {
            key,
            factor: 0.0,
            base_val: 0.0,
            adjusted_val: 0.0,
            inherited: false,
        }
    }
}

/// Emisiones de un contexto
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmissionSubset {
    /// Pieces by fuel key
    pub pieces: IndexMap<PieceKey, EmissionPiece>,
}

impl EmissionSubset {
    fn with_emitting_fuels() -> Self {
        let pieces = Fuel::EMITTING
            .iter()
            .map(|f| (PieceKey::from(*f), EmissionPiece::new(PieceKey::from(*f))))
            .collect();
        Self { pieces }
    }

    /// Emisiones base del contexto
    pub fn total_base(&self) -> f64 {
        self.pieces.values().map(|p| p.base_val).sum()
    }

    /// Emisiones ajustadas del contexto
    pub fn total_adjusted(&self) -> f64 {
        self.pieces.values().map(|p| p.adjusted_val).sum()
    }

    /// Reparte las emisiones medidas del petróleo entre el petróleo y las piezas separadas
    ///
    /// `measured` is the petroleum emission reading. Carved pieces of the breakdown get the
    /// petroleum factor and their share of the emission; pieces no longer carved are dropped.
    pub fn split_carved(&mut self, bd: &SectorBreakdown, measured: f64) {
        let petroleum_key = PieceKey::from(Fuel::Petroleum);
        let factor = self
            .pieces
            .get(&petroleum_key)
            .map(|p| p.factor)
            .unwrap_or(0.0);

        self.pieces
            .retain(|key, _| key.fuel().is_some() || bd.pieces.contains_key(key));
        let mut carved_total = 0.0;
        for (key, piece) in bd.pieces.iter() {
            if let PieceKey::Carved(_) = key {
                let em = self
                    .pieces
                    .entry(key.clone())
                    .or_insert_with(|| EmissionPiece::new(key.clone()));
                em.factor = factor;
                em.inherited = true;
                em.base_val = factor * piece.base_val;
                em.adjusted_val = em.base_val;
                carved_total += em.base_val;
            }
        }
        if let Some(petroleum) = self.pieces.get_mut(&petroleum_key) {
            petroleum.base_val = measured - carved_total;
        }
    }
}

/// Emisiones de todo el modelo
#[derive(Debug, Clone, PartialEq)]
pub struct Emissions {
    /// Emissions of the end-use sectors
    pub sectors: IndexMap<Sector, EmissionSubset>,
    /// Emissions of electricity generation
    pub generation: EmissionSubset,
}

impl Default for Emissions {
    fn default() -> Self {
        Self {
            sectors: Sector::iter()
                .map(|s| (s, EmissionSubset::with_emitting_fuels()))
                .collect(),
            generation: EmissionSubset::with_emitting_fuels(),
        }
    }
}

impl Emissions {
    /// Calcula factores y emisiones base a partir de lecturas
    ///
    /// Sector petroleum factors use the measured petroleum energy, carved sub-fuels included,
    /// since the emission reading covers them.
    pub fn load_base(
        &mut self,
        readings: &Readings,
        sectors: &IndexMap<Sector, SectorScenario>,
        generation: &GenerationRegistry,
    ) {
        for (sector, subset) in self.sectors.iter_mut() {
            let scn = match sectors.get(sector) {
                Some(scn) => scn,
                None => continue,
            };
            for fuel in Fuel::EMITTING.iter() {
                let measured = co2_reading(readings, scn.series.co2, *fuel);
                let energy = scn
                    .breakdown
                    .piece(*fuel)
                    .map(|p| p.sum_measured(readings))
                    .unwrap_or(0.0);
                if let Some(em) = subset.pieces.get_mut(&PieceKey::from(*fuel)) {
                    em.factor = safe_ratio(measured, energy);
                    em.base_val = measured;
                    em.adjusted_val = measured;
                }
            }
            let measured = co2_reading(readings, scn.series.co2, Fuel::Petroleum);
            subset.split_carved(&scn.breakdown, measured);
        }

        for fuel in Fuel::EMITTING.iter() {
            let measured = co2_reading(readings, eia::CO2_ELECTRIC_SECTOR, *fuel);
            let energy = generation
                .pieces
                .get(fuel)
                .map(|p| p.base_val)
                .unwrap_or(0.0);
            if let Some(em) = self.generation.pieces.get_mut(&PieceKey::from(*fuel)) {
                em.factor = safe_ratio(measured, energy);
                em.base_val = measured;
                em.adjusted_val = measured;
            }
        }
    }

    /// Recalcula las emisiones ajustadas con la energía ajustada actual
    pub fn derive(
        &mut self,
        sectors: &IndexMap<Sector, SectorScenario>,
        generation: &GenerationRegistry,
    ) {
        for (sector, subset) in self.sectors.iter_mut() {
            for em in subset.pieces.values_mut() {
                let energy = sectors
                    .get(sector)
                    .and_then(|scn| scn.breakdown.pieces.get(&em.key))
                    .map(|p| p.adjusted_val)
                    .unwrap_or(0.0);
                em.adjusted_val = zero_if_tiny(em.factor * energy);
            }
        }
        for em in self.generation.pieces.values_mut() {
            let energy = em
                .key
                .fuel()
                .and_then(|f| generation.pieces.get(&f))
                .map(|p| p.adjusted_val)
                .unwrap_or(0.0);
            em.adjusted_val = zero_if_tiny(em.factor * energy);
        }
    }

    /// Contextos en orden de presentación: sectores y generación
    pub fn contexts(&self) -> impl Iterator<Item = (EmissionContext, &EmissionSubset)> {
        self.sectors
            .iter()
            .map(|(s, subset)| (EmissionContext::Sector(*s), subset))
            .chain(std::iter::once((
                EmissionContext::Generation,
                &self.generation,
            )))
    }

    /// Emisiones ajustadas totales de todos los contextos
    pub fn grand_total(&self) -> f64 {
        self.contexts().map(|(_, s)| s.total_adjusted()).sum()
    }

    /// Emisiones base totales de todos los contextos
    pub fn grand_total_base(&self) -> f64 {
        self.contexts().map(|(_, s)| s.total_base()).sum()
    }
}

/// Lectura de emisiones de un combustible en un sector de emisiones
pub fn co2_reading(readings: &Readings, sector_id: &str, fuel: Fuel) -> f64 {
    eia::co2_fuel_id(fuel)
        .map(|fuel_id| readings.emission(sector_id, fuel_id))
        .unwrap_or(0.0)
}
