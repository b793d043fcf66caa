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
Piezas de energía
=================

Agregados con valor base y ajustado y piezas de combustible construidas a partir de lecturas.

- Tipo Aggregate (valor base + valor ajustado)
- Tipo SourceTerm (lectura sumada o restada)
- Tipo FuelContribution (pieza de energía primaria)
*/

use serde::Serialize;

use crate::types::{PieceKey, Readings};

/// Valor base (medido) y ajustado (escenario), en GWh
///
/// Base (measured) and adjusted (scenario) value pair, GWh
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize)]
pub struct Aggregate {
    /// Measured value
    pub base_val: f64,
    /// Scenario value
    pub adjusted_val: f64,
}

impl Aggregate {
    /// Aggregate with the adjusted value equal to the base value
    pub fn new(base_val: f64) -> Self {
        Self {
            base_val,
            adjusted_val: base_val,
        }
    }
}

/// Signo con el que contribuye una lectura
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sign {
    /// The reading adds to the piece
    Add,
    /// The reading is deducted from the piece
    Sub,
}

/// Lectura de una serie con el signo de su contribución
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceTerm {
    /// Series id
    pub id: String,
    /// Contribution sign
    pub sign: Sign,
    /// Added by a reclassification, not part of the measured definition of the piece
    pub synthetic: bool,
}

impl SourceTerm {
    /// Added reading
    pub fn add<T: Into<String>>(id: T) -> Self {
        Self {
            id: id.into(),
            sign: Sign::Add,
            synthetic: false,
        }
    }

    /// Deducted reading
    pub fn sub<T: Into<String>>(id: T) -> Self {
        Self {
            id: id.into(),
            sign: Sign::Sub,
            synthetic: false,
        }
    }

    /// Deduction of a reading that has been carved out into its own piece
    pub fn carve<T: Into<String>>(id: T) -> Self {
        Self {
            id: id.into(),
            sign: Sign::Sub,
            synthetic: true,
        }
    }

    fn signed(&self, readings: &Readings) -> f64 {
        let value = readings.energy(&self.id);
        match self.sign {
            Sign::Add => value,
            Sign::Sub => -value,
        }
    }
}

/// Pieza de energía primaria de un sector (fuel contribution)
///
/// Its base value is the signed sum of its source readings. Its adjusted value is always
/// derived by the solver from the sector knobs and the classification sets.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelContribution {
    /// Fuel key, unique within its sector
    pub key: PieceKey,
    /// Ordered source readings with their sign
    pub sources: Vec<SourceTerm>,
    /// Measured value, GWh
    pub base_val: f64,
    /// Scenario value, GWh
    pub adjusted_val: f64,
}

impl FuelContribution {
    /// Pieza con lecturas sumadas y restadas
    pub fn new(key: PieceKey, add: &[&str], sub: &[&str]) -> Self {
        let sources = add
            .iter()
            .map(|id| SourceTerm::add(*id))
            .chain(sub.iter().map(|id| SourceTerm::sub(*id)))
            .collect();
        Self {
            key,
            sources,
            base_val: 0.0,
            adjusted_val: 0.0,
        }
    }

    /// Signed sum of every source term, synthetic deductions included
    pub fn sum_sources(&self, readings: &Readings) -> f64 {
        self.sources.iter().map(|s| s.signed(readings)).sum()
    }

    /// Signed sum of the measured definition only, ignoring carve-out deductions
    pub fn sum_measured(&self, readings: &Readings) -> f64 {
        self.sources
            .iter()
            .filter(|s| !s.synthetic)
            .map(|s| s.signed(readings))
            .sum()
    }

    /// Recompute the base value from the readings and reset the adjusted value to it
    pub fn rederive_base(&mut self, readings: &Readings) {
        self.base_val = self.sum_sources(readings);
        self.adjusted_val = self.base_val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Fuel;
    use pretty_assertions::assert_eq;

    fn readings() -> Readings {
        let mut r = Readings::default();
        r.energy.insert("NGRCB".into(), 500.0);
        r.energy.insert("SFRCB".into(), 20.0);
        r.energy.insert("PAACB".into(), 1000.0);
        r.energy.insert("JFACB".into(), 150.0);
        r
    }

    #[test]
    fn contribution_signed_sum() {
        let mut gas = FuelContribution::new(Fuel::NaturalGas.into(), &["NGRCB"], &["SFRCB"]);
        gas.rederive_base(&readings());
        assert_eq!(gas.base_val, 480.0);
        assert_eq!(gas.adjusted_val, 480.0);
    }

    #[test]
    fn contribution_missing_reading_is_zero() {
        let mut wind = FuelContribution::new(Fuel::Wind.into(), &["WYRCB"], &[]);
        wind.rederive_base(&readings());
        assert_eq!(wind.base_val, 0.0);
    }

    #[test]
    fn contribution_synthetic_terms() {
        let mut petroleum = FuelContribution::new(Fuel::Petroleum.into(), &["PAACB"], &[]);
        petroleum.sources.push(SourceTerm::carve("JFACB"));
        let r = readings();
        petroleum.rederive_base(&r);
        assert_eq!(petroleum.base_val, 850.0);
        assert_eq!(petroleum.sum_measured(&r), 1000.0);
    }
}
