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
Archivos de datos
=================

Define el tipo DataFile (lista de registros + metadatos) y la conversión de registros en
lecturas para una región y un año.

```text
#META REGION: VT
#META YEAR: 2022
ENERGY, ESRCB, 2022, VT, Billion Btu, 7466
GENERATION, NUC, 2022, VT, thousand megawatthours, 0
IMPORT, ELISP, 2022, VT, million kilowatthours, 3891
EMISSIONS, RC:PE, 2022, VT, million metric tons of CO2, 1.2
```
*/

use std::fmt;
use std::str;

use crate::{
    eia,
    error::{ElecError, Result},
    types::{Meta, MetaVec, Readings, Record},
};

/// Lista de registros de datos con sus metadatos
///
/// List of data records bundled with its metadata
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataFile {
    /// Metadata
    pub cmeta: Vec<Meta>,
    /// Record list
    pub records: Vec<Record>,
}

impl MetaVec for DataFile {
    fn get_metavec(&self) -> &Vec<Meta> {
        &self.cmeta
    }
    fn get_mut_metavec(&mut self) -> &mut Vec<Meta> {
        &mut self.cmeta
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metalines = self
            .cmeta
            .iter()
            .map(|v| format!("{}", v))
            .collect::<Vec<_>>()
            .join("\n");
        let datalines = self
            .records
            .iter()
            .map(|v| format!("{}", v))
            .collect::<Vec<_>>()
            .join("\n");
        write!(f, "{}\n{}", metalines, datalines)
    }
}

impl str::FromStr for DataFile {
    type Err = ElecError;

    fn from_str(s: &str) -> std::result::Result<DataFile, Self::Err> {
        let s_nobom = s.trim_start_matches('\u{feff}');
        let lines: Vec<&str> = s_nobom.lines().map(str::trim).collect();
        let metalines = lines.iter().filter(|l| l.starts_with("#META"));
        let datalines = lines
            .iter()
            .filter(|l| !(l.starts_with('#') || l.is_empty()));
        let cmeta = metalines
            .map(|e| e.parse())
            .collect::<std::result::Result<Vec<Meta>, _>>()?;
        let records = datalines
            .map(|e| e.parse())
            .collect::<std::result::Result<Vec<Record>, _>>()?;
        Ok(DataFile { cmeta, records })
    }
}

impl DataFile {
    /// Último año con registros
    pub fn latest_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.period).max()
    }

    /// Región de los metadatos o, si no hay, la de los registros
    pub fn region(&self) -> Option<String> {
        self.get_meta("REGION")
            .or_else(|| self.records.first().map(|r| r.region.clone()))
    }

    /// Año de los metadatos o, si no hay, el último año con registros
    pub fn year(&self) -> Option<i32> {
        self.get_meta_i32("YEAR").or_else(|| self.latest_year())
    }
}

/// Comprueba que una región está en el catálogo
pub fn validate_region(region: &str) -> Result<()> {
    match eia::region_name(region) {
        Some(_) => Ok(()),
        None => Err(ElecError::WrongInput(format!(
            "Región desconocida \"{}\"",
            region
        ))),
    }
}

/// Lecturas de una región y un año, en GWh (Mt CO2 para emisiones)
///
/// Records of other years are skipped. A record of the year with an unexpected unit or
/// region, or a non-finite value, aborts the conversion. Null values read as zero.
pub fn readings_from_records(records: &[Record], region: &str, year: i32) -> Result<Readings> {
    validate_region(region)?;
    let mut readings = Readings::default();
    for rec in records.iter().filter(|r| r.period == year) {
        if rec.region != region {
            return Err(ElecError::DataShape {
                id: rec.id.clone(),
                detail: format!("región \"{}\", se esperaba \"{}\"", rec.region, region),
            });
        }
        let expected = rec.dataset.expected_unit();
        if !rec.unit.eq_ignore_ascii_case(expected) {
            return Err(ElecError::DataShape {
                id: rec.id.clone(),
                detail: format!("unidad \"{}\", se esperaba \"{}\"", rec.unit, expected),
            });
        }
        let raw = rec.value.unwrap_or(0.0);
        if !raw.is_finite() {
            return Err(ElecError::DataShape {
                id: rec.id.clone(),
                detail: format!("valor no finito ({})", raw),
            });
        }
        let value = raw * rec.dataset.conversion_factor();
        readings.insert(rec.dataset, &rec.id, value);
    }
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GWH_PER_BILLION_BTU;
    use pretty_assertions::assert_eq;

    const DATA: &str = "\u{feff}#META REGION: VT
#META YEAR: 2022
# comentario
ENERGY, ESRCB, 2022, VT, Billion Btu, 3412
ENERGY, ESRCB, 2021, VT, Billion Btu, 1000
ENERGY, TNRCB, 2022, VT, Billion Btu, NA
GENERATION, NUC, 2022, VT, thousand megawatthours, 12.5
IMPORT, ELISP, 2022, VT, million kilowatthours, 3891
EMISSIONS, RC:PE, 2022, VT, million metric tons of CO2, 1.2
";

    #[test]
    fn datafile_parse() {
        let data: DataFile = DATA.parse().unwrap();
        assert_eq!(data.cmeta.len(), 2);
        assert_eq!(data.records.len(), 6);
        assert_eq!(data.region(), Some("VT".to_string()));
        assert_eq!(data.year(), Some(2022));
        assert_eq!(data.latest_year(), Some(2022));
        let reparsed: DataFile = data.to_string().parse().unwrap();
        assert_eq!(reparsed, data);
    }

    #[test]
    fn datafile_readings() {
        let data: DataFile = DATA.parse().unwrap();
        let r = readings_from_records(&data.records, "VT", 2022).unwrap();
        assert!((r.energy("ESRCB") - 3412.0 * GWH_PER_BILLION_BTU).abs() < 1e-9);
        assert_eq!(r.energy("TNRCB"), 0.0);
        assert_eq!(r.generation("NUC"), 12.5);
        assert_eq!(r.import("ELISP"), 3891.0);
        assert_eq!(r.emission("RC", "PE"), 1.2);
    }

    #[test]
    fn datafile_shape_errors() {
        let data: DataFile = DATA.parse().unwrap();
        assert!(match readings_from_records(&data.records, "CA", 2022) {
            Err(ElecError::DataShape { .. }) => true,
            _ => false,
        });
        assert!(match readings_from_records(&data.records, "XX", 2022) {
            Err(ElecError::WrongInput(_)) => true,
            _ => false,
        });
        let bad: DataFile = "ENERGY, ESRCB, 2022, VT, GWh, 10".parse().unwrap();
        assert!(readings_from_records(&bad.records, "VT", 2022).is_err());
        // other years are skipped
        assert!(readings_from_records(&bad.records, "VT", 2020).is_ok());
    }

    #[test]
    fn datafile_non_finite_values() {
        for value in &["NaN", "inf", "-inf"] {
            let data: DataFile = format!("ENERGY, ESRCB, 2022, VT, Billion Btu, {}", value)
                .parse()
                .unwrap();
            match readings_from_records(&data.records, "VT", 2022) {
                Err(ElecError::DataShape { id, .. }) => assert_eq!(id, "ESRCB"),
                other => panic!("se esperaba un error de formato: {:?}", other),
            }
        }
    }
}
