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
Registros de datos
==================

Registros planos entregados por el colaborador de ingesta y lecturas convertidas a GWh.

- Tipo Dataset y sus unidades esperadas
- Tipo Record (id, periodo, región, unidad, valor)
- Tipo Readings (lecturas por id en unidades internas)
*/

use std::collections::HashMap;
use std::fmt;
use std::str;

use serde::Serialize;

use crate::error::ElecError;

/// Factor de conversión de Billion Btu a GWh
pub const GWH_PER_BILLION_BTU: f64 = 1.0 / 3.412;

/// Conjunto de datos al que pertenece un registro
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Dataset {
    /// Sector fuel consumption, Billion Btu
    ENERGY,
    /// Electricity generation by source, thousand MWh
    GENERATION,
    /// Net electricity inflow, million kWh
    IMPORT,
    /// CO2 emissions by sector and fuel, million metric tons of CO2
    EMISSIONS,
}

impl Dataset {
    /// Unit string every record of this dataset must carry
    pub fn expected_unit(self) -> &'static str {
        match self {
            Dataset::ENERGY => "Billion Btu",
            Dataset::GENERATION => "thousand megawatthours",
            Dataset::IMPORT => "million kilowatthours",
            Dataset::EMISSIONS => "million metric tons of CO2",
        }
    }

    /// Factor from the dataset unit to the internal unit (GWh, or Mt CO2 for emissions)
    pub fn conversion_factor(self) -> f64 {
        match self {
            Dataset::ENERGY => GWH_PER_BILLION_BTU,
            Dataset::GENERATION | Dataset::IMPORT | Dataset::EMISSIONS => 1.0,
        }
    }
}

impl str::FromStr for Dataset {
    type Err = ElecError;

    fn from_str(s: &str) -> Result<Dataset, Self::Err> {
        match s.trim() {
            "ENERGY" => Ok(Dataset::ENERGY),
            "GENERATION" => Ok(Dataset::GENERATION),
            "IMPORT" => Ok(Dataset::IMPORT),
            "EMISSIONS" => Ok(Dataset::EMISSIONS),
            _ => Err(ElecError::ParseError(s.into())),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Registro de datos (data row)
///
/// ENERGY, ESRCB, 2022, US, Billion Btu, 4910112
/// EMISSIONS, RC:NG, 2022, US, million metric tons of CO2, 253.3
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Dataset of the row
    pub dataset: Dataset,
    /// Series id, or `SECTORID:FUELID` for emissions
    pub id: String,
    /// Year
    pub period: i32,
    /// Region id (state code or US)
    pub region: String,
    /// Unit string as delivered
    pub unit: String,
    /// Value, None when the source has no data
    pub value: Option<f64>,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self.value {
            Some(v) => format!("{}", v),
            None => "NA".to_string(),
        };
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.dataset, self.id, self.period, self.region, self.unit, value
        )
    }
}

impl str::FromStr for Record {
    type Err = ElecError;

    fn from_str(s: &str) -> Result<Record, Self::Err> {
        let items: Vec<&str> = s.trim().split(',').map(str::trim).collect();
        if items.len() != 6 {
            return Err(ElecError::ParseError(s.into()));
        }
        let dataset: Dataset = items[0].parse()?;
        let id = items[1].to_string();
        if id.is_empty() {
            return Err(ElecError::ParseError(s.into()));
        }
        let period: i32 = items[2].parse()?;
        let region = items[3].to_string();
        let unit = items[4].to_string();
        let value = match items[5] {
            "" | "NA" | "null" => None,
            v => Some(v.parse::<f64>()?),
        };
        Ok(Record {
            dataset,
            id,
            period,
            region,
            unit,
            value,
        })
    }
}

/// Lecturas de un refresco, en unidades internas
///
/// Readings of one (region, year) refresh, converted to GWh (Mt CO2 for emissions).
/// Missing ids read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readings {
    /// Sector energy by series id
    pub energy: HashMap<String, f64>,
    /// Generation by fuel type id
    pub generation: HashMap<String, f64>,
    /// Net inflow by series id
    pub import: HashMap<String, f64>,
    /// Emissions by `SECTORID:FUELID`
    pub emissions: HashMap<String, f64>,
}

impl Readings {
    /// Sector energy reading
    pub fn energy(&self, id: &str) -> f64 {
        self.energy.get(id).copied().unwrap_or(0.0)
    }

    /// Generation reading
    pub fn generation(&self, id: &str) -> f64 {
        self.generation.get(id).copied().unwrap_or(0.0)
    }

    /// Net inflow reading
    pub fn import(&self, id: &str) -> f64 {
        self.import.get(id).copied().unwrap_or(0.0)
    }

    /// Emission reading for a sector id and a fuel id
    pub fn emission(&self, sector_id: &str, fuel_id: &str) -> f64 {
        self.emissions
            .get(&format!("{}:{}", sector_id, fuel_id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Store a converted value in the map of its dataset
    pub fn insert(&mut self, dataset: Dataset, id: &str, value: f64) {
        let map = match dataset {
            Dataset::ENERGY => &mut self.energy,
            Dataset::GENERATION => &mut self.generation,
            Dataset::IMPORT => &mut self.import,
            Dataset::EMISSIONS => &mut self.emissions,
        };
        map.insert(id.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_parse() {
        let rec: Record = "ENERGY, ESRCB, 2022, US, Billion Btu, 3412"
            .parse()
            .unwrap();
        assert_eq!(rec.dataset, Dataset::ENERGY);
        assert_eq!(rec.id, "ESRCB");
        assert_eq!(rec.period, 2022);
        assert_eq!(rec.value, Some(3412.0));
        assert_eq!(rec.to_string(), "ENERGY, ESRCB, 2022, US, Billion Btu, 3412");
    }

    #[test]
    fn record_parse_null_value() {
        let rec: Record = "EMISSIONS, TC:CO, 2021, VT, million metric tons of CO2, NA"
            .parse()
            .unwrap();
        assert_eq!(rec.value, None);
        let rec: Record = "IMPORT, ELISP, 2021, VT, million kilowatthours, "
            .parse()
            .unwrap();
        assert_eq!(rec.value, None);
    }

    #[test]
    fn record_parse_errors() {
        assert!("ENERGY, ESRCB, 2022, US, Billion Btu"
            .parse::<Record>()
            .is_err());
        assert!("POWER, ESRCB, 2022, US, Billion Btu, 1"
            .parse::<Record>()
            .is_err());
        assert!("ENERGY, ESRCB, 20x2, US, Billion Btu, 1"
            .parse::<Record>()
            .is_err());
        assert!("ENERGY, ESRCB, 2022, US, Billion Btu, abc"
            .parse::<Record>()
            .is_err());
    }

    #[test]
    fn readings_default_to_zero() {
        let mut r = Readings::default();
        r.insert(Dataset::EMISSIONS, "RC:NG", 250.0);
        assert_eq!(r.emission("RC", "NG"), 250.0);
        assert_eq!(r.emission("RC", "CO"), 0.0);
        assert_eq!(r.energy("ESRCB"), 0.0);
    }
}
