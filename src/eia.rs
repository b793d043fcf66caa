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

/*! Valores por defecto para datos estadísticos regionales (EIA)
 *
 * - identificadores de series de consumo por sector (SEDS, Billion Btu)
 * - identificadores de generación eléctrica por fuente y de flujo neto de electricidad
 * - identificadores de emisiones de CO2 por sector y combustible
 * - factores de eficiencia por sector, conjunto verde y catálogo de exclusiones
 * - regiones disponibles
*/

use crate::types::{ClassificationSets, ExcludeSpec, Fuel, Sector};

/// Región por defecto (todo el país)
pub const DEFAULT_REGION: &str = "US";

/// Eficiencia eléctrica por defecto de un sector.
///
/// Share of energy that electricity needs to do the same work as primary fuel. This is a
/// static heuristic, not engineering data.
pub const DEFAULT_ELEC_EFFICIENCY: f64 = 0.8;

/// Máximo de los deslizadores de generación, % del total base de generación
pub const GENERATION_SLIDER_MAX: f64 = 100.0;

/// Fuentes verdes por defecto
pub const DEFAULT_GREEN: [Fuel; 5] = [
    Fuel::Wind,
    Fuel::Solar,
    Fuel::Geothermal,
    Fuel::Hydroelectric,
    Fuel::Nuclear,
];

/// Identificador de sector de emisiones del sector eléctrico
pub const CO2_ELECTRIC_SECTOR: &str = "EC";

/// Identificador de emisiones de un combustible con emisiones medidas
pub fn co2_fuel_id(fuel: Fuel) -> Option<&'static str> {
    match fuel {
        Fuel::Coal => Some("CO"),
        Fuel::NaturalGas => Some("NG"),
        Fuel::Petroleum => Some("PE"),
        _ => None,
    }
}

/// Series de un sector económico
#[derive(Debug, PartialEq)]
pub struct SectorSeries {
    /// Sector
    pub sector: Sector,
    /// Electricity consumed from the electric sector
    pub electric: &'static str,
    /// End-use total consumption
    pub total: &'static str,
    /// Sector id of the emission data
    pub co2: &'static str,
    /// Primary pieces in display order: fuel, added series, deducted series
    pub pieces: &'static [(Fuel, &'static [&'static str], &'static [&'static str])],
}

/// Series de consumo del sector residencial
pub const RESIDENTIAL: SectorSeries = SectorSeries {
    sector: Sector::Residential,
    electric: "ESRCB",
    total: "TNRCB",
    co2: "RC",
    pieces: &[
        (Fuel::Wind, &[], &[]),
        (Fuel::Solar, &["SORCB"], &[]),
        (Fuel::Geothermal, &["GERCB"], &[]),
        (Fuel::Hydroelectric, &[], &[]),
        (Fuel::Coal, &["CLRCB"], &[]),
        (Fuel::NaturalGas, &["NGRCB"], &["SFRCB"]),
        (Fuel::Petroleum, &["PARCB"], &[]),
    ],
};

/// Series de consumo del sector comercial
pub const COMMERCIAL: SectorSeries = SectorSeries {
    sector: Sector::Commercial,
    electric: "ESCCB",
    total: "TNCCB",
    co2: "CC",
    pieces: &[
        (Fuel::Wind, &["WYCCB"], &[]),
        (Fuel::Solar, &["SOCCB"], &[]),
        (Fuel::Geothermal, &["GECCB"], &[]),
        (Fuel::Hydroelectric, &["HYCCB"], &[]),
        (Fuel::Coal, &["CLCCB"], &[]),
        (Fuel::NaturalGas, &["NGCCB"], &["SFCCB"]),
        (Fuel::Petroleum, &["PACCB"], &[]),
    ],
};

/// Series de consumo del sector industrial
///
/// Electricity uses the series excluding refinery use (ESISB); the consumption one does
/// not add up with the total.
pub const INDUSTRIAL: SectorSeries = SectorSeries {
    sector: Sector::Industrial,
    electric: "ESISB",
    total: "TNICB",
    co2: "IC",
    pieces: &[
        (Fuel::Wind, &["WYICB"], &[]),
        (Fuel::Solar, &["SOICB"], &[]),
        (Fuel::Geothermal, &["GEICB"], &[]),
        (Fuel::Hydroelectric, &["HYICB"], &[]),
        (Fuel::Coal, &["CLICB"], &[]),
        (Fuel::NaturalGas, &["NGICB"], &["SFINB"]),
        (Fuel::Petroleum, &["PAICB"], &[]),
    ],
};

/// Series de consumo del sector transporte
///
/// Natural gas uses NGASB, which has no supplemental fuels to deduct.
pub const TRANSPORTATION: SectorSeries = SectorSeries {
    sector: Sector::Transportation,
    electric: "ESACB",
    total: "TNACB",
    co2: "TC",
    pieces: &[
        (Fuel::Wind, &[], &[]),
        (Fuel::Solar, &[], &[]),
        (Fuel::Geothermal, &[], &[]),
        (Fuel::Hydroelectric, &[], &[]),
        (Fuel::Coal, &["CLACB"], &[]),
        (Fuel::NaturalGas, &["NGASB"], &[]),
        (Fuel::Petroleum, &["PAACB"], &[]),
    ],
};

/// Series de un sector
pub fn sector_series(sector: Sector) -> &'static SectorSeries {
    match sector {
        Sector::Residential => &RESIDENTIAL,
        Sector::Commercial => &COMMERCIAL,
        Sector::Industrial => &INDUSTRIAL,
        Sector::Transportation => &TRANSPORTATION,
    }
}

/// Fuentes de generación ajustables y sus identificadores, en orden de presentación
pub const GENERATION_SOURCES: [(Fuel, &[&str]); 8] = [
    (Fuel::Coal, &["COW"]),
    (Fuel::NaturalGas, &["NG"]),
    (Fuel::Petroleum, &["PEL", "PC"]),
    (Fuel::Nuclear, &["NUC"]),
    (Fuel::Hydroelectric, &["HYC"]),
    (Fuel::Wind, &["WND"]),
    (Fuel::Solar, &["SUN"]),
    (Fuel::Geothermal, &["GEO"]),
];

/// Generación no ajustable del resto de fuentes (biomasa, bombeo, otros)
pub const GENERATION_OTHER: &[&str] = &["WWW", "WAS", "HPS", "OTH"];

/// Flujo neto de electricidad hacia la región (interestatal e internacional)
pub const IMPORT_SERIES: &[&str] = &["ELISP", "ELNIP"];

/// Catálogo de subcombustibles del transporte que pueden excluirse del petróleo
pub fn exclude_catalog() -> Vec<ExcludeSpec> {
    vec![
        ExcludeSpec::new(
            "aviation",
            Sector::Transportation,
            Fuel::Petroleum,
            &["JFACB", "AVACB"],
        ),
        ExcludeSpec::new("marine", Sector::Transportation, Fuel::Petroleum, &["RFACB"]),
    ]
}

/// Conjuntos de clasificación por defecto
pub fn default_classification() -> ClassificationSets {
    ClassificationSets::new(DEFAULT_GREEN.iter().copied(), exclude_catalog())
}

/// Regiones disponibles: nombre e identificador
pub const REGIONS: [(&str, &str); 52] = [
    ("Entire US", "US"),
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("D.C.", "DC"),
    ("Delaware", "DE"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Nombre de una región a partir de su identificador
pub fn region_name(id: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(_, rid)| *rid == id)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn eia_series_cover_all_sectors() {
        for sector in Sector::iter() {
            let series = sector_series(sector);
            assert_eq!(series.sector, sector);
            assert_eq!(series.pieces.len(), 7);
        }
        assert_eq!(INDUSTRIAL.electric, "ESISB");
    }

    #[test]
    fn eia_regions() {
        assert_eq!(region_name("US"), Some("Entire US"));
        assert_eq!(region_name("VT"), Some("Vermont"));
        assert_eq!(region_name("XX"), None);
    }

    #[test]
    fn eia_default_classification() {
        let sets = default_classification();
        assert!(sets.is_green(Fuel::Nuclear));
        assert!(!sets.is_green(Fuel::Coal));
        assert_eq!(sets.catalog.len(), 2);
        assert!(sets.excluded.is_empty());
    }
}
