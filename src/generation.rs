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
Generación eléctrica
====================

Registro de fuentes de generación y reequilibrio de la generación con la demanda eléctrica.

Generation pieces are set as a share of the *generation-wide* base total. The "other" and
"import" pieces count in totals but are never adjusted.
*/

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    eia,
    error::{ElecError, Result},
    types::{Fuel, Readings},
    vecops::{safe_ratio, zero_if_tiny},
};

/// Máximo de iteraciones del reparto con saturación
pub const EQUALIZE_MAX_ITER: usize = 64;

/// Desajuste residual, GWh, por debajo del cual se da por equilibrada la generación
pub const EQUALIZE_TOL: f64 = 1e-6;

/// Fuente de generación eléctrica
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationPiece {
    /// Fuel or source
    pub key: Fuel,
    /// Fuel type ids (or net inflow ids for import)
    pub source_ids: Vec<String>,
    /// Measured generation, GWh
    pub base_val: f64,
    /// Scenario generation, GWh
    pub adjusted_val: f64,
    /// Scenario generation, % of the generation base total
    pub adjusted_demand: f64,
    /// Can be edited and equalized
    pub adjustable: bool,
}

impl GenerationPiece {
    fn new(key: Fuel, ids: &[&str], adjustable: bool) -> Self {
        Self {
            key,
            source_ids: ids.iter().map(|id| id.to_string()).collect(),
            base_val: 0.0,
            adjusted_val: 0.0,
            adjusted_demand: 0.0,
            adjustable,
        }
    }
}

/// Resultado del reequilibrio de la generación
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EqualizeOutcome {
    /// Mismatch left after the redistribution, GWh
    pub residual: f64,
    /// Redistribution passes
    pub iterations: usize,
    /// Every adjustable piece is saturated or the pool has no capacity left
    pub exhausted: bool,
}

/// Registro de generación eléctrica
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRegistry {
    /// Pieces in display order, adjustable first, then "other" and "import"
    pub pieces: IndexMap<Fuel, GenerationPiece>,
    /// Base generation total, GWh. Includes "other" and "import".
    pub base_total: f64,
    /// Upper bound of every piece, % of the base total
    pub slider_max: f64,
    /// Electricity consumed by the sectors over generation, base values
    pub transmission_efficiency: f64,
}

impl Default for GenerationRegistry {
    fn default() -> Self {
        let mut pieces = IndexMap::new();
        for (fuel, ids) in eia::GENERATION_SOURCES.iter() {
            pieces.insert(*fuel, GenerationPiece::new(*fuel, ids, true));
        }
        pieces.insert(
            Fuel::Other,
            GenerationPiece::new(Fuel::Other, eia::GENERATION_OTHER, false),
        );
        pieces.insert(
            Fuel::Import,
            GenerationPiece::new(Fuel::Import, eia::IMPORT_SERIES, false),
        );
        Self {
            pieces,
            base_total: 0.0,
            slider_max: eia::GENERATION_SLIDER_MAX,
            transmission_efficiency: 0.0,
        }
    }
}

impl GenerationRegistry {
    /// Recalcula los valores base a partir de lecturas
    ///
    /// `electric_base` is the base electricity consumed by all sectors, used for the
    /// transmission efficiency. A ratio above 1 is kept as is.
    pub fn load_base(&mut self, readings: &Readings, electric_base: f64) {
        for piece in self.pieces.values_mut() {
            let value: f64 = if piece.key == Fuel::Import {
                piece.source_ids.iter().map(|id| readings.import(id)).sum()
            } else {
                piece
                    .source_ids
                    .iter()
                    .map(|id| readings.generation(id))
                    .sum()
            };
            piece.base_val = value;
            piece.adjusted_val = value;
        }
        self.base_total = self.pieces.values().map(|p| p.base_val).sum();
        self.transmission_efficiency = safe_ratio(electric_base, self.base_total);
        if self.transmission_efficiency > 1.0 {
            warn!(
                transmission_efficiency = self.transmission_efficiency,
                "Consumo eléctrico de los sectores mayor que la generación"
            );
        }
        self.update_shares();
    }

    /// Devuelve la generación ajustada a los valores base
    pub fn reset(&mut self) {
        for piece in self.pieces.values_mut() {
            piece.adjusted_val = piece.base_val;
        }
        self.update_shares();
    }

    /// Generación máxima de una pieza ajustable, GWh
    pub fn max_val(&self) -> f64 {
        self.base_total * self.slider_max / 100.0
    }

    /// Fija una pieza ajustable como % del total base de generación
    ///
    /// The share is clamped to [0, slider_max]. Returns the applied share.
    pub fn set_share(&mut self, fuel: Fuel, pct: f64) -> Result<f64> {
        let slider_max = self.slider_max;
        let base_total = self.base_total;
        let piece = self
            .pieces
            .get_mut(&fuel)
            .filter(|p| p.adjustable)
            .ok_or_else(|| {
                ElecError::WrongInput(format!("La fuente \"{}\" no es ajustable", fuel))
            })?;
        let pct = pct.max(0.0).min(slider_max);
        piece.adjusted_val = zero_if_tiny(base_total * pct / 100.0);
        piece.adjusted_demand = pct;
        Ok(pct)
    }

    /// Generación ajustada total, incluidas "other" e "import"
    pub fn adjusted_total(&self) -> f64 {
        self.pieces.values().map(|p| p.adjusted_val).sum()
    }

    /// Generación ajustable total, GWh
    pub fn adjustable_total(&self) -> f64 {
        self.pieces
            .values()
            .filter(|p| p.adjustable)
            .map(|p| p.adjusted_val)
            .sum()
    }

    /// Generación necesaria para una demanda eléctrica
    ///
    /// Without a transmission efficiency the demand itself is the requirement.
    pub fn required(&self, electric_demand: f64) -> f64 {
        if self.transmission_efficiency > 0.0 {
            electric_demand / self.transmission_efficiency
        } else {
            electric_demand
        }
    }

    /// Desajuste entre la generación necesaria y la generación ajustada, GWh
    ///
    /// Positive when generation falls short of the demand.
    pub fn mismatch(&self, electric_demand: f64) -> f64 {
        let fixed: f64 = self
            .pieces
            .values()
            .filter(|p| !p.adjustable)
            .map(|p| p.base_val)
            .sum();
        self.required(electric_demand) - self.adjustable_total() - fixed
    }

    /// Reparte el desajuste entre las piezas ajustables, en proporción a su valor actual
    ///
    /// Pieces that hit 0 or the slider maximum leave the pool and the part of their share
    /// they could not take is spread over the rest in the next pass.
    pub fn equalize(&mut self, electric_demand: f64) -> EqualizeOutcome {
        self.equalize_within(electric_demand, EQUALIZE_MAX_ITER)
    }

    fn equalize_within(&mut self, electric_demand: f64, max_iter: usize) -> EqualizeOutcome {
        let max_val = self.max_val();
        let mut remaining = self.mismatch(electric_demand);
        let mut pool: Vec<Fuel> = self
            .pieces
            .values()
            .filter(|p| p.adjustable)
            .map(|p| p.key)
            .collect();
        let mut iterations = 0;
        let mut no_capacity = false;

        while remaining.abs() > EQUALIZE_TOL && !pool.is_empty() {
            if iterations >= max_iter {
                warn!(iterations, remaining, "Reparto de generación sin converger");
                break;
            }
            iterations += 1;
            let pool_sum: f64 = pool.iter().map(|f| self.pieces[f].adjusted_val).sum();
            if pool_sum <= 0.0 {
                no_capacity = true;
                break;
            }
            let mut allocated = 0.0;
            let mut saturated = Vec::new();
            for fuel in &pool {
                let piece = &mut self.pieces[fuel];
                let target = piece.adjusted_val + remaining * piece.adjusted_val / pool_sum;
                let value = target.max(0.0).min(max_val);
                if value != target {
                    saturated.push(*fuel);
                }
                allocated += value - piece.adjusted_val;
                piece.adjusted_val = value;
            }
            remaining -= allocated;
            pool.retain(|f| !saturated.contains(f));
            debug!(
                iterations,
                remaining,
                saturated = saturated.len(),
                "Pasada de reparto de generación"
            );
        }

        for piece in self.pieces.values_mut() {
            piece.adjusted_val = zero_if_tiny(piece.adjusted_val);
        }
        self.update_shares();

        let residual = zero_if_tiny(remaining);
        let exhausted = pool.is_empty() || no_capacity;
        if residual.abs() > EQUALIZE_TOL {
            warn!(
                residual,
                exhausted, "La generación no puede igualarse a la demanda"
            );
        }
        EqualizeOutcome {
            residual,
            iterations,
            exhausted,
        }
    }

    fn update_shares(&mut self) {
        let base_total = self.base_total;
        for piece in self.pieces.values_mut() {
            piece.adjusted_demand = 100.0 * safe_ratio(piece.adjusted_val, base_total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_equal(expected: f64, got: f64) -> bool {
        (expected - got).abs() < 1e-6
    }

    // coal 100, natural gas 50, wind 50, nothing else
    fn registry() -> GenerationRegistry {
        let mut r = Readings::default();
        r.generation.insert("COW".into(), 100.0);
        r.generation.insert("NG".into(), 50.0);
        r.generation.insert("WND".into(), 50.0);
        let mut reg = GenerationRegistry::default();
        reg.load_base(&r, 200.0);
        reg
    }

    fn adjusted(reg: &GenerationRegistry, fuel: Fuel) -> f64 {
        reg.pieces[&fuel].adjusted_val
    }

    #[test]
    fn generation_load_base() {
        let reg = registry();
        assert_eq!(reg.base_total, 200.0);
        assert_eq!(reg.transmission_efficiency, 1.0);
        assert_eq!(reg.pieces[&Fuel::Coal].adjusted_demand, 50.0);
        assert!(!reg.pieces[&Fuel::Import].adjustable);
    }

    #[test]
    fn generation_set_share() {
        let mut reg = registry();
        assert_eq!(reg.set_share(Fuel::Wind, 40.0).unwrap(), 40.0);
        assert_eq!(adjusted(&reg, Fuel::Wind), 80.0);
        assert_eq!(reg.set_share(Fuel::Wind, 140.0).unwrap(), 100.0);
        assert_eq!(adjusted(&reg, Fuel::Wind), 200.0);
        assert_eq!(reg.set_share(Fuel::Wind, -5.0).unwrap(), 0.0);
        assert!(reg.set_share(Fuel::Import, 10.0).is_err());
        assert!(reg.set_share(Fuel::Other, 10.0).is_err());
    }

    #[test]
    fn generation_equalize_decrease() {
        let mut reg = registry();
        let outcome = reg.equalize(160.0);
        assert!(approx_equal(80.0, adjusted(&reg, Fuel::Coal)));
        assert!(approx_equal(40.0, adjusted(&reg, Fuel::NaturalGas)));
        assert!(approx_equal(40.0, adjusted(&reg, Fuel::Wind)));
        assert_eq!(outcome.residual, 0.0);
        assert_eq!(outcome.iterations, 1);
        assert!(!outcome.exhausted);
    }

    #[test]
    fn generation_equalize_saturation() {
        let mut reg = registry();
        // coal would reach 300 but the bound is 200
        let outcome = reg.equalize(600.0);
        assert!(approx_equal(200.0, adjusted(&reg, Fuel::Coal)));
        assert!(approx_equal(200.0, adjusted(&reg, Fuel::NaturalGas)));
        assert!(approx_equal(200.0, adjusted(&reg, Fuel::Wind)));
        assert!(approx_equal(0.0, reg.mismatch(600.0)));
        assert!(outcome.iterations > 1);
    }

    #[test]
    fn generation_equalize_exhausted() {
        let mut reg = registry();
        let outcome = reg.equalize(1000.0);
        assert!(outcome.exhausted);
        assert!(approx_equal(400.0, outcome.residual));
        for fuel in &[Fuel::Coal, Fuel::NaturalGas, Fuel::Wind] {
            assert!(approx_equal(200.0, adjusted(&reg, *fuel)));
        }
    }

    #[test]
    fn generation_equalize_decrease_exhausted() {
        let mut reg = GenerationRegistry::default();
        let mut r = Readings::default();
        r.generation.insert("COW".into(), 100.0);
        r.generation.insert("NG".into(), 50.0);
        r.generation.insert("WND".into(), 50.0);
        r.import.insert("ELISP".into(), 300.0);
        reg.load_base(&r, 500.0);
        // 250 GWh needed, 300 GWh of import alone: every adjustable source drops to 0
        let outcome = reg.equalize(250.0);
        assert!(outcome.exhausted);
        assert!(approx_equal(-50.0, outcome.residual));
        for fuel in &[Fuel::Coal, Fuel::NaturalGas, Fuel::Wind] {
            assert_eq!(adjusted(&reg, *fuel), 0.0);
        }
        assert_eq!(adjusted(&reg, Fuel::Import), 300.0);
        assert!(approx_equal(-50.0, reg.mismatch(250.0)));
    }

    #[test]
    fn generation_equalize_iteration_cap() {
        let mut reg = registry();
        // the first pass saturates coal at 200 and leaves 100 GWh for a second pass
        let outcome = reg.equalize_within(600.0, 1);
        assert_eq!(outcome.iterations, 1);
        assert!(!outcome.exhausted);
        assert!(approx_equal(100.0, outcome.residual));
        assert!(approx_equal(200.0, adjusted(&reg, Fuel::Coal)));
        assert!(approx_equal(150.0, adjusted(&reg, Fuel::NaturalGas)));
        assert!(approx_equal(150.0, adjusted(&reg, Fuel::Wind)));
    }

    #[test]
    fn generation_transmission_above_one() {
        let mut reg = GenerationRegistry::default();
        let mut r = Readings::default();
        r.generation.insert("COW".into(), 100.0);
        r.generation.insert("NG".into(), 50.0);
        r.generation.insert("WND".into(), 50.0);
        // sectors use more electricity than is generated
        reg.load_base(&r, 300.0);
        assert_eq!(reg.transmission_efficiency, 1.5);
        assert!(approx_equal(100.0, reg.required(150.0)));
        assert!(reg.required(150.0) < 150.0);
        let outcome = reg.equalize(150.0);
        assert!(!outcome.exhausted);
        assert_eq!(outcome.residual, 0.0);
        assert!(approx_equal(50.0, adjusted(&reg, Fuel::Coal)));
        assert!(approx_equal(25.0, adjusted(&reg, Fuel::NaturalGas)));
        assert!(approx_equal(25.0, adjusted(&reg, Fuel::Wind)));
        assert!(approx_equal(150.0, reg.adjusted_total() * reg.transmission_efficiency));
    }

    #[test]
    fn generation_equalize_zero_pool() {
        let mut reg = GenerationRegistry::default();
        let mut r = Readings::default();
        r.import.insert("ELISP".into(), 100.0);
        reg.load_base(&r, 50.0);
        let outcome = reg.equalize(80.0);
        assert!(outcome.exhausted);
        assert_eq!(reg.adjusted_total(), 100.0);
    }
}
