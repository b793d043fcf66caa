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
Modelo de balance ajustable
===========================

Contexto del modelo para una región y un año: sectores, generación, emisiones, conjuntos de
clasificación y lecturas del último refresco.

Every scenario edit goes through `Model::apply`, which always runs, in this order:

1. clamp of the electrification of every sector
2. solve of the adjusted values of every sector
3. derivation of the adjusted emissions
4. consistency checks
*/

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::{
    checks, eia,
    emissions::Emissions,
    error::{ElecError, Result},
    generation::{EqualizeOutcome, GenerationRegistry},
    reclassify,
    records::{readings_from_records, DataFile},
    sectors::{self, SectorScenario},
    snapshot::{DisplayUnit, Snapshot},
    solver,
    types::{ClassificationSets, Edit, Readings, Record, Sector},
};

/// Límites de la eficiencia eléctrica de un sector
pub const MIN_ELEC_EFFICIENCY: f64 = 0.05;
/// Límites de la eficiencia eléctrica de un sector
pub const MAX_ELEC_EFFICIENCY: f64 = 1.0;

fn unknown_sector(sector: Sector) -> ElecError {
    ElecError::WrongInput(format!("Sector desconocido \"{}\"", sector))
}

/// Valor de un parámetro de escenario, que debe ser finito
fn finite_knob(edit: &Edit, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ElecError::WrongInput(format!(
            "Valor no finito en la edición \"{}\"",
            edit
        )))
    }
}

/// Modelo de balance energético ajustable
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Region id
    pub region: String,
    /// Year of the data
    pub year: i32,
    /// Green set and exclude set
    pub classes: ClassificationSets,
    /// End-use sectors, in fixed order
    pub sectors: IndexMap<Sector, SectorScenario>,
    /// Electricity generation
    pub generation: GenerationRegistry,
    /// CO2 emissions
    pub emissions: Emissions,
    /// Readings of the last refresh
    pub readings: Readings,
    /// Outcome of the last equalize, until the next reset or refresh
    pub last_equalize: Option<EqualizeOutcome>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(eia::default_classification())
    }
}

impl Model {
    /// Modelo sin datos con unos conjuntos de clasificación
    pub fn new(classes: ClassificationSets) -> Self {
        Self {
            region: eia::DEFAULT_REGION.to_string(),
            year: 0,
            classes,
            sectors: sectors::sector_registry(),
            generation: GenerationRegistry::default(),
            emissions: Emissions::default(),
            readings: Readings::default(),
            last_equalize: None,
        }
    }

    /// Modelo a partir de un archivo de datos
    ///
    /// Region and year come from the arguments, then from the file metadata, then from the
    /// defaults (whole country and last year with data).
    pub fn from_datafile(data: &DataFile, region: Option<&str>, year: Option<i32>) -> Result<Self> {
        let region = region
            .map(str::to_string)
            .or_else(|| data.region())
            .unwrap_or_else(|| eia::DEFAULT_REGION.to_string());
        let year = year
            .or_else(|| data.year())
            .ok_or_else(|| ElecError::WrongInput("Archivo de datos sin registros".into()))?;
        let mut model = Self::default();
        model.refresh(&data.records, &region, year)?;
        Ok(model)
    }

    /// Recarga los valores base para una región y un año
    ///
    /// The records are converted first, so a data error leaves the model as it was.
    /// Scenario knobs go back to their base values. Classification sets are kept.
    pub fn refresh(&mut self, records: &[Record], region: &str, year: i32) -> Result<()> {
        let readings = readings_from_records(records, region, year)?;

        for scn in self.sectors.values_mut() {
            scn.load_base(&readings);
        }
        let electric_base = sectors::electric_base(&self.sectors);
        self.generation.load_base(&readings, electric_base);
        self.emissions
            .load_base(&readings, &self.sectors, &self.generation);
        self.readings = readings;
        self.region = region.to_string();
        self.year = year;
        self.last_equalize = None;

        info!(
            region,
            year,
            electric_base,
            generation_base = self.generation.base_total,
            transmission_efficiency = self.generation.transmission_efficiency,
            "Datos cargados"
        );
        self.recompute()
    }

    fn sector_mut(&mut self, sector: Sector) -> Result<&mut SectorScenario> {
        self.sectors
            .get_mut(&sector)
            .ok_or_else(|| unknown_sector(sector))
    }

    /// Aplica una edición de escenario y recalcula el modelo
    pub fn apply(&mut self, edit: &Edit) -> Result<()> {
        debug!(edit = %edit, "Aplicando edición");
        match edit {
            Edit::Demand(sector, pct) => {
                let pct = finite_knob(edit, *pct)?;
                self.sector_mut(*sector)?.adjusted_demand = pct.max(0.0);
            }
            Edit::Electrification(sector, pct) => {
                let pct = finite_knob(edit, *pct)?;
                self.sector_mut(*sector)?.adjusted_electrification = pct;
            }
            Edit::Efficiency(sector, ratio) => {
                let ratio = finite_knob(edit, *ratio)?;
                self.sector_mut(*sector)?.adjusted_elec_efficiency =
                    ratio.max(MIN_ELEC_EFFICIENCY).min(MAX_ELEC_EFFICIENCY);
            }
            Edit::Green(fuel, on) => {
                self.classes.set_green(*fuel, *on)?;
            }
            Edit::Exclude(name, on) => self.set_exclusion(name, *on)?,
            Edit::Generation(fuel, pct) => {
                let pct = finite_knob(edit, *pct)?;
                self.generation.set_share(*fuel, pct)?;
            }
            Edit::Equalize => {
                let demand = sectors::electric_adjusted(&self.sectors);
                self.last_equalize = Some(self.generation.equalize(demand));
            }
            Edit::Reset => {
                for scn in self.sectors.values_mut() {
                    scn.reset_knobs();
                }
                self.generation.reset();
                self.last_equalize = None;
            }
        }
        self.recompute()
    }

    /// Aplica una lista de ediciones, en orden
    pub fn apply_all<'a, I: IntoIterator<Item = &'a Edit>>(&mut self, edits: I) -> Result<()> {
        for edit in edits {
            self.apply(edit)?;
        }
        Ok(())
    }

    fn set_exclusion(&mut self, name: &str, on: bool) -> Result<()> {
        let spec = self.classes.exclude_spec(name)?.clone();
        let scn = self
            .sectors
            .get_mut(&spec.sector)
            .ok_or_else(|| unknown_sector(spec.sector))?;
        let subset = self
            .emissions
            .sectors
            .get_mut(&spec.sector)
            .ok_or_else(|| unknown_sector(spec.sector))?;
        if on {
            reclassify::carve(scn, subset, &spec, &self.readings)?;
            self.classes.excluded.insert(spec.name);
        } else {
            reclassify::fold(scn, subset, &spec, &self.readings)?;
            self.classes.excluded.shift_remove(&spec.name);
        }
        Ok(())
    }

    /// Recalcula valores ajustados y emisiones y comprueba la coherencia del modelo
    pub fn recompute(&mut self) -> Result<()> {
        for scn in self.sectors.values_mut() {
            solver::clamp_electrification(scn, &self.classes);
            solver::solve(scn, &self.classes);
        }
        self.emissions.derive(&self.sectors, &self.generation);
        checks::ensure_consistent(
            &self.sectors,
            &self.generation,
            &self.emissions,
            &self.classes,
        )
    }

    /// Electricidad ajustada consumida por los sectores
    pub fn electric_demand(&self) -> f64 {
        sectors::electric_adjusted(&self.sectors)
    }

    /// Desajuste entre la generación necesaria y la ajustada, GWh
    pub fn generation_mismatch(&self) -> f64 {
        self.generation.mismatch(self.electric_demand())
    }

    /// Vista del modelo para presentación
    pub fn snapshot(&self, unit: DisplayUnit) -> Snapshot {
        Snapshot::from_model(self, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Fuel, PieceKey};
    use pretty_assertions::assert_eq;

    fn approx_equal(expected: f64, got: f64) -> bool {
        (expected - got).abs() < 0.01
    }

    // Residential 800 primary (coal 750, solar 50) + 200 electric, in GWh
    fn records() -> Vec<Record> {
        let btu = 3.412;
        let lines = vec![
            format!("ENERGY, ESRCB, 2022, VT, Billion Btu, {}", 200.0 * btu),
            format!("ENERGY, TNRCB, 2022, VT, Billion Btu, {}", 1000.0 * btu),
            format!("ENERGY, CLRCB, 2022, VT, Billion Btu, {}", 750.0 * btu),
            format!("ENERGY, SORCB, 2022, VT, Billion Btu, {}", 50.0 * btu),
            "GENERATION, COW, 2022, VT, thousand megawatthours, 150".to_string(),
            "GENERATION, WND, 2022, VT, thousand megawatthours, 100".to_string(),
            "EMISSIONS, RC:CO, 2022, VT, million metric tons of CO2, 75".to_string(),
            "EMISSIONS, EC:CO, 2022, VT, million metric tons of CO2, 15".to_string(),
        ];
        lines.iter().map(|l| l.parse().unwrap()).collect()
    }

    fn model() -> Model {
        let mut model = Model::default();
        model.refresh(&records(), "VT", 2022).unwrap();
        model
    }

    #[test]
    fn model_refresh() {
        let model = model();
        let res = &model.sectors[&Sector::Residential];
        assert!(approx_equal(200.0, res.breakdown.electric.base_val));
        assert!(approx_equal(20.0, res.adjusted_electrification));
        assert!(approx_equal(0.8, model.generation.transmission_efficiency));
        assert!(approx_equal(90.0, model.emissions.grand_total()));
    }

    #[test]
    fn model_refresh_error_keeps_state() {
        let mut model = model();
        let before = model.clone();
        let bad: Vec<Record> = vec!["ENERGY, ESRCB, 2022, VT, GWh, 1".parse().unwrap()];
        assert!(model.refresh(&bad, "VT", 2022).is_err());
        assert!(model.refresh(&records(), "ZZ", 2022).is_err());
        let mut nan = records();
        nan.push("ENERGY, NGRCB, 2022, VT, Billion Btu, NaN".parse().unwrap());
        match model.refresh(&nan, "VT", 2022) {
            Err(ElecError::DataShape { id, .. }) => assert_eq!(id, "NGRCB"),
            other => panic!("se esperaba un error de formato: {:?}", other),
        }
        assert_eq!(model, before);
    }

    #[test]
    fn model_apply_electrification() {
        let mut model = model();
        model
            .apply(&Edit::Electrification(Sector::Residential, 50.0))
            .unwrap();
        let res = &model.sectors[&Sector::Residential];
        assert!(approx_equal(466.67, res.breakdown.electric.adjusted_val));
        assert!(approx_equal(933.33, res.breakdown.total.adjusted_val));
        // coal drops from 750 to 416.67, emissions follow
        let coal = &model.emissions.sectors[&Sector::Residential].pieces[&PieceKey::from(Fuel::Coal)];
        assert!(approx_equal(41.67, coal.adjusted_val));
    }

    #[test]
    fn model_apply_knob_limits() {
        let mut model = model();
        model
            .apply(&Edit::Efficiency(Sector::Residential, 3.0))
            .unwrap();
        model
            .apply(&Edit::Demand(Sector::Residential, -20.0))
            .unwrap();
        let res = &model.sectors[&Sector::Residential];
        assert_eq!(res.adjusted_elec_efficiency, 1.0);
        assert_eq!(res.adjusted_demand, 0.0);
        assert_eq!(res.breakdown.total.adjusted_val, 0.0);
        assert!(model.apply(&Edit::Generation(Fuel::Import, 10.0)).is_err());
        assert!(model.apply(&Edit::Green(Fuel::Import, true)).is_err());
        assert!(model.apply(&Edit::Exclude("rail".into(), true)).is_err());
    }

    #[test]
    fn model_apply_non_finite_knobs() {
        let mut model = model();
        let before = model.clone();
        for line in &[
            "demand, residential, inf",
            "demand, residential, NaN",
            "electrification, residential, -inf",
            "efficiency, residential, NaN",
            "generation, coal, inf",
        ] {
            let edit: Edit = line.parse().unwrap();
            match model.apply(&edit) {
                Err(ElecError::WrongInput(_)) => (),
                other => panic!("se esperaba una entrada incorrecta: {:?}", other),
            }
        }
        assert_eq!(model, before);
    }

    #[test]
    fn model_green_toggle_clamps() {
        let mut model = model();
        model
            .apply(&Edit::Electrification(Sector::Residential, 90.0))
            .unwrap();
        model.apply(&Edit::Green(Fuel::Coal, true)).unwrap();
        let res = &model.sectors[&Sector::Residential];
        assert!(approx_equal(20.0, res.adjusted_electrification));
        assert!(approx_equal(750.0, res.breakdown.piece(Fuel::Coal).unwrap().adjusted_val));
    }

    #[test]
    fn model_equalize_and_reset() {
        let mut model = model();
        // 200 GWh demand at 0.8 needs 250 GWh, nothing to do
        model.apply(&Edit::Equalize).unwrap();
        assert!(approx_equal(0.0, model.last_equalize.unwrap().residual));
        // 293.02 GWh demand needs 366.28 GWh, no source saturates
        model
            .apply(&Edit::Electrification(Sector::Residential, 30.0))
            .unwrap();
        model.apply(&Edit::Equalize).unwrap();
        assert!(!model.last_equalize.unwrap().exhausted);
        assert!(approx_equal(0.0, model.generation_mismatch()));
        assert!(approx_equal(
            model.electric_demand(),
            model.generation.adjusted_total() * model.generation.transmission_efficiency
        ));
        model.apply(&Edit::Reset).unwrap();
        assert!(model.last_equalize.is_none());
        assert!(approx_equal(150.0, model.generation.pieces[&Fuel::Coal].adjusted_val));
        assert!(approx_equal(
            20.0,
            model.sectors[&Sector::Residential].adjusted_electrification
        ));
    }
}
