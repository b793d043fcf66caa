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
Salida en texto simple
======================

Presentación compacta de una vista del modelo.
*/

use itertools::Itertools; // join

use crate::snapshot::{EmissionContextView, GenerationView, SectorView, Snapshot, ValueView};

// ==================== Conversión a formato simple

/// Muestra en formato simple
///
/// Formato simple y compacto para mostrar el balance de energía, la generación y las
/// emisiones del escenario
pub trait AsPlain {
    /// Get in plain format
    fn to_plain(&self) -> String;
}

// ================= Implementaciones ====================

/// Valor base y ajustado con 2 decimales
fn value2string(v: &ValueView) -> String {
    format!("base {:.2}, ajustado {:.2}", v.base, v.adjusted)
}

fn sector2string(s: &SectorView, unit: &str) -> String {
    let pieces = s
        .pieces
        .iter()
        .map(|p| {
            let mark = if p.green {
                " [verde]"
            } else if p.unelectrifiable {
                " [excluido]"
            } else {
                ""
            };
            format!("  - {}{}: {}", p.key, mark, value2string(&p.value))
        })
        .join("\n");
    format!(
        "* {sector}
Demanda: {demand:.1} [%], electrificación: {elec:.1} [%] (base {base_elec:.1}, máx. {max_elec:.1}), eficiencia: {eff:.2}
Eléctrica [{unit}]: {electric}
Primaria [{unit}]: {primary}
{pieces}
Total [{unit}]: {total}",
        sector = s.sector,
        demand = s.demand,
        elec = s.electrification,
        base_elec = s.base_electrification,
        max_elec = s.max_electrification,
        eff = s.efficiency,
        unit = unit,
        electric = value2string(&s.electric),
        primary = value2string(&s.primary),
        pieces = pieces,
        total = value2string(&s.total),
    )
}

fn generation2string(g: &GenerationView, unit: &str) -> String {
    let pieces = g
        .pieces
        .iter()
        .map(|p| {
            let share = if p.adjustable {
                format!(" ({:.1} [%])", p.share)
            } else {
                String::new()
            };
            format!("- {}: {}{}", p.key, value2string(&p.value), share)
        })
        .join("\n");
    let equalize = match &g.last_equalize {
        Some(o) if o.exhausted => format!(
            "\nIgualación sin completar: residuo {:.2} [{}] tras {} pasadas",
            o.residual, unit, o.iterations
        ),
        Some(o) => format!("\nIgualación en {} pasadas", o.iterations),
        None => String::new(),
    };
    format!(
        "{pieces}

Generación total [{unit}]: {total}
Consumo eléctrico de los sectores [{unit}]: {demand}
Eficiencia de transmisión: {te:.3}
Generación necesaria [{unit}]: {required:.2}
Desajuste [{unit}]: {mismatch:.2}{equalize}",
        pieces = pieces,
        unit = unit,
        total = value2string(&g.total),
        demand = value2string(&g.demand),
        te = g.transmission_efficiency,
        required = g.required,
        mismatch = g.mismatch,
        equalize = equalize,
    )
}

fn emissions2string(c: &EmissionContextView) -> String {
    let pieces = c
        .pieces
        .iter()
        .map(|p| {
            format!(
                "  - {}: base {:.2}, ajustado {:.2}",
                p.key, p.base, p.adjusted
            )
        })
        .join("\n");
    format!(
        "- {}: base {:.2}, ajustado {:.2}\n{}",
        c.context, c.base, c.adjusted, pieces
    )
}

impl AsPlain for Snapshot {
    fn to_plain(&self) -> String {
        let unit = self.unit.to_string();
        let sectors = self
            .sectors
            .iter()
            .map(|s| sector2string(s, &unit))
            .join("\n\n");
        let generation = generation2string(&self.generation, &unit);
        let emissions = self
            .emissions
            .contexts
            .iter()
            .map(emissions2string)
            .join("\n");
        let green = self
            .green
            .iter()
            .map(|f| f.to_string())
            .join(", ");
        let excluded = if self.excluded.is_empty() {
            "-".to_string()
        } else {
            self.excluded.join(", ")
        };

        format!(
            "** Balance de energía: {name} ({region}), {year}

Fuentes verdes: {green}
Subcombustibles excluidos: {excluded}

** Sectores

{sectors}

** Generación eléctrica

{generation}

** Emisiones [Mt CO2]

{emissions}

Total: base {em_base:.2}, ajustado {em_adjusted:.2}
",
            name = self.region_name,
            region = self.region,
            year = self.year,
            green = green,
            excluded = excluded,
            sectors = sectors,
            generation = generation,
            emissions = emissions,
            em_base = self.emissions.base,
            em_adjusted = self.emissions.adjusted,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Model, snapshot::DisplayUnit};

    #[test]
    fn asplain_headings() {
        let plain = Model::default().snapshot(DisplayUnit::GW).to_plain();
        assert!(plain.starts_with("** Balance de energía: Entire US (US), 0"));
        assert!(plain.contains("* transportation"));
        assert!(plain.contains("Eléctrica [GW]"));
        assert!(plain.contains("- generation: base 0.00, ajustado 0.00"));
        assert!(plain.contains("Subcombustibles excluidos: -"));
    }
}
