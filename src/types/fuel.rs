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
Combustibles y fuentes
======================

Claves de combustible compartidas por consumo, generación y emisiones.

Fuel keys shared by sector consumption pieces, generation pieces and emission pieces.
*/

use std::fmt;
use std::str;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::error::ElecError;

/// Combustible o fuente de energía (fuel or energy source)
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
pub enum Fuel {
    /// Wind
    Wind,
    /// Solar
    Solar,
    /// Geothermal
    Geothermal,
    /// Hydroelectric
    Hydroelectric,
    /// Nuclear (generation only)
    Nuclear,
    /// Coal
    Coal,
    /// Natural gas, net of supplemental gaseous fuels
    NaturalGas,
    /// Petroleum
    Petroleum,
    /// Residual of everything not accounted for by the named fuels
    Other,
    /// Net electricity inflow into the region (generation side only)
    Import,
}

impl Fuel {
    /// Name used in data, edits and output
    pub fn name(self) -> &'static str {
        match self {
            Fuel::Wind => "wind",
            Fuel::Solar => "solar",
            Fuel::Geothermal => "geothermal",
            Fuel::Hydroelectric => "hydroelectric",
            Fuel::Nuclear => "nuclear",
            Fuel::Coal => "coal",
            Fuel::NaturalGas => "natural gas",
            Fuel::Petroleum => "petroleum",
            Fuel::Other => "other",
            Fuel::Import => "import",
        }
    }

    /// Fuels with measured CO2 emissions
    pub const EMITTING: [Fuel; 3] = [Fuel::Coal, Fuel::NaturalGas, Fuel::Petroleum];
}

impl str::FromStr for Fuel {
    type Err = ElecError;

    fn from_str(s: &str) -> Result<Fuel, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wind" => Ok(Fuel::Wind),
            "solar" => Ok(Fuel::Solar),
            "geothermal" => Ok(Fuel::Geothermal),
            "hydroelectric" | "hydro" => Ok(Fuel::Hydroelectric),
            "nuclear" => Ok(Fuel::Nuclear),
            "coal" => Ok(Fuel::Coal),
            "natural gas" | "natural_gas" | "naturalgas" => Ok(Fuel::NaturalGas),
            "petroleum" => Ok(Fuel::Petroleum),
            "other" => Ok(Fuel::Other),
            "import" => Ok(Fuel::Import),
            _ => Err(ElecError::ParseError(s.into())),
        }
    }
}

impl fmt::Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Clave de una pieza de energía primaria
///
/// Key of a primary piece: one of the core fuels, or a fuel carved out of petroleum
/// (see the exclude catalog). Carved pieces exist only while their exclusion is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PieceKey {
    /// Core fuel
    Fuel(Fuel),
    /// Sub-fuel carved out of petroleum, always unelectrifiable
    Carved(String),
}

impl PieceKey {
    /// Core fuel of the key, if any
    pub fn fuel(&self) -> Option<Fuel> {
        match self {
            PieceKey::Fuel(fuel) => Some(*fuel),
            PieceKey::Carved(_) => None,
        }
    }
}

impl From<Fuel> for PieceKey {
    fn from(fuel: Fuel) -> Self {
        PieceKey::Fuel(fuel)
    }
}

impl fmt::Display for PieceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKey::Fuel(fuel) => write!(f, "{}", fuel),
            PieceKey::Carved(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for PieceKey {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn fuel_roundtrip() {
        for fuel in Fuel::iter() {
            assert_eq!(fuel.to_string().parse::<Fuel>().unwrap(), fuel);
        }
        assert_eq!("natural_gas".parse::<Fuel>().unwrap(), Fuel::NaturalGas);
        assert!("plutonium".parse::<Fuel>().is_err());
    }

    #[test]
    fn piece_key_display() {
        assert_eq!(PieceKey::from(Fuel::NaturalGas).to_string(), "natural gas");
        assert_eq!(PieceKey::Carved("aviation".into()).to_string(), "aviation");
        assert_eq!(PieceKey::Carved("marine".into()).fuel(), None);
    }
}
