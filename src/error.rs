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
Errores
=======

Tipos de error del modelo de balance ajustable.

Error types for the adjustable energy balance model.
*/

use std::fmt;

/// Error del modelo
///
/// Errors raised by ingestion, edits and consistency checks
#[derive(Debug, Clone, PartialEq)]
pub enum ElecError {
    /// Could not parse a value, record or edit from a string
    ParseError(String),
    /// Unknown names or requests that cannot apply to the model
    WrongInput(String),
    /// Unexpected unit or region in an ingested record. The refresh is aborted.
    DataShape {
        /// Record id (series or sector:fuel id)
        id: String,
        /// What did not match
        detail: String,
    },
    /// Broken model invariants. This signals a defect in the solver or rebalancer.
    Inconsistent(Vec<String>),
}

impl fmt::Display for ElecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ElecError::*;
        match self {
            ParseError(s) => write!(f, "Error al interpretar el valor: \"{}\"", s),
            WrongInput(s) => write!(f, "Entrada incorrecta: {}", s),
            DataShape { id, detail } => write!(
                f,
                "Formato de datos inesperado en el registro \"{}\": {}",
                id, detail
            ),
            Inconsistent(violations) => write!(
                f,
                "Modelo inconsistente ({} errores): {}",
                violations.len(),
                violations.join("; ")
            ),
        }
    }
}

impl std::error::Error for ElecError {}

impl From<std::num::ParseFloatError> for ElecError {
    fn from(err: std::num::ParseFloatError) -> Self {
        ElecError::ParseError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for ElecError {
    fn from(err: std::num::ParseIntError) -> Self {
        ElecError::ParseError(err.to_string())
    }
}

/// Resultado con el error del modelo
pub type Result<T> = std::result::Result<T, ElecError>;
