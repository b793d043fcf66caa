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
Conjuntos de clasificación
==========================

Conjunto de fuentes verdes y catálogo de subcombustibles excluidos de la electrificación.

Green set and exclude set. Both gate which primary pieces the solver may electrify.
*/

use std::collections::BTreeSet;

use indexmap::IndexSet;
use serde::Serialize;

use crate::{
    error::{ElecError, Result},
    types::{Fuel, PieceKey, Sector},
};

/// Subcombustible que puede separarse del petróleo
///
/// Sub-fuel that can be carved out of petroleum into its own unelectrifiable piece
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludeSpec {
    /// Piece name, e.g. "aviation"
    pub name: String,
    /// Sector holding the sub-fuel
    pub sector: Sector,
    /// Fuel the sub-fuel is folded into when not excluded
    pub parent: Fuel,
    /// Series ids of the sub-fuel readings
    pub ids: Vec<String>,
}

impl ExcludeSpec {
    /// Catalog entry constructor
    pub fn new(name: &str, sector: Sector, parent: Fuel, ids: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            sector,
            parent,
            ids: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Conjuntos de clasificación compartidos por todo el modelo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationSets {
    /// Fuels treated as emission free, never electrified
    pub green: BTreeSet<Fuel>,
    /// Fixed catalog of sub-fuels that can be excluded
    pub catalog: Vec<ExcludeSpec>,
    /// Names of the catalog entries currently carved out, in activation order
    pub excluded: IndexSet<String>,
}

impl ClassificationSets {
    /// Sets with the given green fuels and exclude catalog, no active exclusion
    pub fn new<I: IntoIterator<Item = Fuel>>(green: I, catalog: Vec<ExcludeSpec>) -> Self {
        Self {
            green: green.into_iter().collect(),
            catalog,
            excluded: IndexSet::new(),
        }
    }

    /// Check if a fuel is in the green set
    pub fn is_green(&self, fuel: Fuel) -> bool {
        self.green.contains(&fuel)
    }

    /// Check if a piece may not be electrified
    ///
    /// Green fuels and carved sub-fuels are scaled by demand only.
    pub fn is_unelectrifiable(&self, key: &PieceKey) -> bool {
        match key {
            PieceKey::Fuel(fuel) => self.is_green(*fuel),
            PieceKey::Carved(name) => self.excluded.contains(name),
        }
    }

    /// Add or remove a fuel from the green set. Returns whether the set changed.
    pub fn set_green(&mut self, fuel: Fuel, on: bool) -> Result<bool> {
        if fuel == Fuel::Import {
            return Err(ElecError::WrongInput(format!(
                "La fuente \"{}\" no puede clasificarse como verde",
                fuel
            )));
        }
        Ok(if on {
            self.green.insert(fuel)
        } else {
            self.green.remove(&fuel)
        })
    }

    /// Catalog entry for a sub-fuel name
    pub fn exclude_spec(&self, name: &str) -> Result<&ExcludeSpec> {
        self.catalog
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| {
                ElecError::WrongInput(format!("Subcombustible desconocido \"{}\"", name))
            })
    }

    /// Check if a catalog entry is currently carved out
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }
}
