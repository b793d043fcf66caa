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
Electrifica
===========

This crate provides a library and binary that computes an **adjustable energy balance** of a
region (a US state or the whole country) for a given year: end-use sector consumption,
electricity generation and CO2 emissions, built from regional energy statistics (EIA).

Scenario edits change sector demand, electrification and electric efficiency, the generation
mix, and which sources count as green. After each edit the model restores its invariants:

- sector total = electric + primary, for base and adjusted values
- primary = sum of its fuel pieces
- electrification % = electric / total
- green fuels and excluded sub-fuels are never electrified
- emissions = fixed emission factor × adjusted energy

Generation can be equalized to the electric demand of the sectors, spreading the mismatch over
the adjustable sources in proportion to their current value, within [0, max].

Este *crate* proporciona una biblioteca y un programa para el cálculo de un **balance de energía
ajustable** de una región (un estado de EEUU o todo el país) en un año: consumo de los sectores
de uso final, generación eléctrica y emisiones de CO2, a partir de estadísticas energéticas
regionales (EIA), y para la exploración de escenarios de electrificación.

# Ejemplo

```rust
use std::fs::read_to_string;
use electrifica::*;

// lectura de un archivo de datos
let data = read_to_string("test_data/vt_2022.csv")
    .unwrap()
    .parse::<DataFile>()
    .unwrap();

// Región y año de los metadatos del archivo
let mut model = Model::from_datafile(&data, None, None).unwrap();

// Escenario
model.apply(&"electrification, transportation, 40".parse::<Edit>().unwrap()).unwrap();
model.apply(&Edit::Equalize).unwrap();

// Visualización compacta
println!("{}", model.snapshot(DisplayUnit::GWh).to_plain());
```

*/

#![deny(missing_docs)]

mod asplain;
mod generation;
mod model;
mod records;
mod sectors;
mod snapshot;
mod vecops;

pub mod checks;
pub mod eia;
pub mod emissions;
pub mod error;
pub mod reclassify;
pub mod solver;
pub mod types;

pub use asplain::*;
pub use error::ElecError;
pub use generation::*;
pub use model::*;
pub use records::*;
pub use sectors::*;
pub use snapshot::*;
pub use types::*;

/// Número de versión de la librería
///
/// Version number
pub static VERSION: &str = env!("CARGO_PKG_VERSION");
