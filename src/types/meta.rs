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
Metadatos
=========

- Tipo Meta y sus traits
*/

use std::fmt;
use std::str;

use serde::Serialize;

use crate::error::ElecError;

/// Metadato de un archivo de datos
///
/// Metadata of a data file (`#META KEY: value`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    /// metadata name.
    pub key: String,
    /// metadata value
    pub value: String,
}

impl Meta {
    /// Metadata constructor
    pub fn new<T, U>(key: T, value: U) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#META {}: {}", self.key, self.value)
    }
}

impl str::FromStr for Meta {
    type Err = ElecError;

    fn from_str(s: &str) -> Result<Meta, Self::Err> {
        let body = s
            .trim()
            .strip_prefix("#META")
            .ok_or_else(|| ElecError::ParseError(s.into()))?;
        let items: Vec<&str> = body.splitn(2, ':').map(str::trim).collect();
        match items.as_slice() {
            [key, value] if !key.is_empty() => Ok(Meta::new(*key, *value)),
            _ => Err(ElecError::ParseError(s.into())),
        }
    }
}

/// Trait común para gestionar metadatos
pub trait MetaVec {
    /// Get vector of metadata
    fn get_metavec(&self) -> &Vec<Meta>;

    /// Get mutable vector of metadata
    fn get_mut_metavec(&mut self) -> &mut Vec<Meta>;

    /// Check if key is included in metadata
    fn has_meta(&self, key: &str) -> bool {
        self.get_metavec().iter().any(|m| m.key == key)
    }

    /// Get (optional) metadata value by key
    fn get_meta(&self, key: &str) -> Option<String> {
        self.get_metavec()
            .iter()
            .find(|m| m.key == key)
            .map(|v| v.value.clone())
    }

    /// Get (optional) metadata value by key as i32
    fn get_meta_i32(&self, key: &str) -> Option<i32> {
        self.get_metavec()
            .iter()
            .find(|m| m.key == key)
            .and_then(|v| v.value.trim().parse::<i32>().ok())
    }

    /// Update metadata value for key or insert new metadata.
    fn set_meta(&mut self, key: &str, value: &str) {
        let meta = self.get_mut_metavec();
        match meta.iter().position(|m| m.key == key) {
            Some(pos) => meta[pos].value = value.to_string(),
            None => meta.push(Meta::new(key, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn meta_roundtrip() {
        let meta = Meta::new("REGION", "VT");
        let metastr = "#META REGION: VT";
        assert_eq!(format!("{}", meta), metastr);
        assert_eq!(metastr.parse::<Meta>().unwrap(), meta);
    }

    #[test]
    fn meta_parse_errors() {
        assert!("#META : CA".parse::<Meta>().is_err());
        assert!("REGION: CA".parse::<Meta>().is_err());
    }
}
