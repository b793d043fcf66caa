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

Sectores de uso final de la energía
*/

use std::fmt;
use std::str;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::error::ElecError;

/// Sector económico de uso final (end-use economic sector)
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    /// Residential sector
    Residential,
    /// Commercial sector
    Commercial,
    /// Industrial sector
    Industrial,
    /// Transportation sector
    Transportation,
}

impl Sector {
    /// Name used in data, edits and output
    pub fn name(self) -> &'static str {
        match self {
            Sector::Residential => "residential",
            Sector::Commercial => "commercial",
            Sector::Industrial => "industrial",
            Sector::Transportation => "transportation",
        }
    }
}

impl str::FromStr for Sector {
    type Err = ElecError;

    fn from_str(s: &str) -> Result<Sector, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "residential" | "residencial" => Ok(Sector::Residential),
            "commercial" | "comercial" => Ok(Sector::Commercial),
            "industrial" => Ok(Sector::Industrial),
            "transportation" | "transport" | "transporte" => Ok(Sector::Transportation),
            _ => Err(ElecError::ParseError(s.into())),
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn sector_roundtrip() {
        for sector in Sector::iter() {
            assert_eq!(sector.to_string().parse::<Sector>().unwrap(), sector);
        }
        assert_eq!(" Transport ".parse::<Sector>().unwrap(), Sector::Transportation);
        assert!("agriculture".parse::<Sector>().is_err());
    }
}
