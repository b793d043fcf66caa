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
Ediciones de escenario
======================

Cambios de usuario sobre el escenario, uno por línea:

```text
demand, residential, 120
electrification, transportation, 60
efficiency, industrial, 0.7
green, nuclear, off
exclude, aviation, on
generation, wind, 25
equalize
reset
```
*/

use std::fmt;
use std::str;

use crate::{
    error::ElecError,
    types::{Fuel, Sector},
};

/// Edición de escenario (scenario edit)
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Sector demand, % of its base total
    Demand(Sector, f64),
    /// Sector electrification, % of its adjusted total delivered as electricity
    Electrification(Sector, f64),
    /// Sector electric efficiency ratio
    Efficiency(Sector, f64),
    /// Add (true) or remove (false) a fuel from the green set
    Green(Fuel, bool),
    /// Carve (true) or fold back (false) a sub-fuel of the exclude catalog
    Exclude(String, bool),
    /// Generation piece, % of the base generation total
    Generation(Fuel, f64),
    /// Match generation to electric demand
    Equalize,
    /// Restore every knob to its base value
    Reset,
}

fn parse_switch(s: &str) -> Result<bool, ElecError> {
    match s.trim().to_lowercase().as_str() {
        "on" | "true" | "1" | "si" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        _ => Err(ElecError::ParseError(s.into())),
    }
}

fn switch_str(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

impl str::FromStr for Edit {
    type Err = ElecError;

    fn from_str(s: &str) -> Result<Edit, Self::Err> {
        let line = s.splitn(2, '#').next().unwrap_or("").trim();
        let items: Vec<&str> = line.split(',').map(str::trim).collect();
        let edit = match items.as_slice() {
            ["demand", sector, pct] => Edit::Demand(sector.parse()?, pct.parse()?),
            ["electrification", sector, pct] => {
                Edit::Electrification(sector.parse()?, pct.parse()?)
            }
            ["efficiency", sector, ratio] => Edit::Efficiency(sector.parse()?, ratio.parse()?),
            ["green", fuel, on] => Edit::Green(fuel.parse()?, parse_switch(on)?),
            ["exclude", name, on] if !name.is_empty() => {
                Edit::Exclude(name.to_lowercase(), parse_switch(on)?)
            }
            ["generation", fuel, pct] => Edit::Generation(fuel.parse()?, pct.parse()?),
            ["equalize"] => Edit::Equalize,
            ["reset"] => Edit::Reset,
            _ => return Err(ElecError::ParseError(s.into())),
        };
        Ok(edit)
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Demand(sector, pct) => write!(f, "demand, {}, {}", sector, pct),
            Edit::Electrification(sector, pct) => {
                write!(f, "electrification, {}, {}", sector, pct)
            }
            Edit::Efficiency(sector, ratio) => write!(f, "efficiency, {}, {}", sector, ratio),
            Edit::Green(fuel, on) => write!(f, "green, {}, {}", fuel, switch_str(*on)),
            Edit::Exclude(name, on) => write!(f, "exclude, {}, {}", name, switch_str(*on)),
            Edit::Generation(fuel, pct) => write!(f, "generation, {}, {}", fuel, pct),
            Edit::Equalize => write!(f, "equalize"),
            Edit::Reset => write!(f, "reset"),
        }
    }
}

/// Lista de ediciones desde texto, ignorando comentarios y líneas vacías
pub fn parse_edits(s: &str) -> Result<Vec<Edit>, ElecError> {
    s.lines()
        .map(str::trim)
        .filter(|l| !(l.is_empty() || l.starts_with('#')))
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn edit_parse() {
        assert_eq!(
            "demand, residential, 120".parse::<Edit>().unwrap(),
            Edit::Demand(Sector::Residential, 120.0)
        );
        assert_eq!(
            "green, natural gas, on # what if".parse::<Edit>().unwrap(),
            Edit::Green(Fuel::NaturalGas, true)
        );
        assert_eq!(
            "exclude, Aviation, off".parse::<Edit>().unwrap(),
            Edit::Exclude("aviation".into(), false)
        );
        assert_eq!("equalize".parse::<Edit>().unwrap(), Edit::Equalize);
    }

    #[test]
    fn edit_parse_errors() {
        assert!("demand, residential".parse::<Edit>().is_err());
        assert!("demand, farming, 10".parse::<Edit>().is_err());
        assert!("green, wind, maybe".parse::<Edit>().is_err());
        assert!("teleport, wind, 10".parse::<Edit>().is_err());
    }

    #[test]
    fn edit_display_roundtrip() {
        let edits = "electrification, transportation, 60
# comentario

generation, wind, 25.5
exclude, marine, on
reset";
        let parsed = parse_edits(edits).unwrap();
        assert_eq!(parsed.len(), 4);
        let shown: Vec<String> = parsed.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            shown,
            vec![
                "electrification, transportation, 60",
                "generation, wind, 25.5",
                "exclude, marine, on",
                "reset"
            ]
        );
    }
}
