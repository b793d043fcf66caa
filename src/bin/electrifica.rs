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

#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::process::exit;

use clap::{App, AppSettings, Arg};
use failure::Error;
use failure::ResultExt;
use tracing::Level;

use electrifica::*;

// Funciones auxiliares -----------------------------------------------------------------------

fn readfile(path: &Path) -> Result<String, Error> {
    let mut f = File::open(path).context(format!("Archivo {} no encontrado", path.display()))?;
    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .context("Error al leer el archivo")?;
    Ok(contents)
}

fn writefile(path: &Path, content: &[u8]) {
    let res = File::create(&path).and_then(|mut file| file.write_all(content));
    if let Err(err) = res {
        eprintln!(
            "ERROR: no se ha podido escribir en \"{}\": {}",
            path.display(),
            err
        );
        exit(exitcode::IOERR);
    }
}

/// Nivel de registro según el número de repeticiones de -v
fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("AVISO: no se ha podido iniciar el registro de eventos");
    }
}

/// Código de salida para un error del modelo
fn exit_code(error: &ElecError) -> i32 {
    match error {
        ElecError::Inconsistent(_) => exitcode::SOFTWARE,
        _ => exitcode::DATAERR,
    }
}

/// Carga el archivo de datos
fn get_datafile(archivo: &str) -> DataFile {
    let path = Path::new(archivo);
    match readfile(path) {
        Ok(datastring) => {
            println!("Datos: \"{}\"", path.display());
            match datastring.parse::<DataFile>() {
                Ok(data) => data,
                Err(err) => {
                    eprintln!(
                        "ERROR: Formato incorrecto del archivo de datos \"{}\" ({})",
                        archivo, err
                    );
                    exit(exitcode::DATAERR);
                }
            }
        }
        Err(err) => {
            eprintln!(
                "ERROR: No se ha podido leer el archivo de datos {} ({})",
                path.display(),
                err
            );
            exit(exitcode::IOERR);
        }
    }
}

/// Ediciones de escenario del archivo de escenario y de la línea de comandos, en ese orden
fn get_edits(matches: &clap::ArgMatches<'_>) -> Vec<Edit> {
    let mut edits = Vec::new();
    if let Some(archivo) = matches.value_of("archivo_escenario") {
        let path = Path::new(archivo);
        let content = readfile(path).unwrap_or_else(|err| {
            eprintln!(
                "ERROR: No se ha podido leer el archivo de escenario {} ({})",
                path.display(),
                err
            );
            exit(exitcode::IOERR);
        });
        println!("Escenario: \"{}\"", path.display());
        edits.extend(parse_edits(&content).unwrap_or_else(|err| {
            eprintln!(
                "ERROR: Formato incorrecto del archivo de escenario \"{}\" ({})",
                archivo, err
            );
            exit(exitcode::DATAERR);
        }));
    }
    if let Some(values) = matches.values_of("edicion") {
        for value in values {
            let edit = value.parse::<Edit>().unwrap_or_else(|err| {
                eprintln!("ERROR: Edición de escenario incorrecta \"{}\" ({})", value, err);
                exit(exitcode::USAGE);
            });
            edits.push(edit);
        }
    }
    edits
}

// Función principal ------------------------------------------------------------------------------

fn main() {
    let matches = App::new("Electrifica")
        .bin_name("electrifica")
        .version(env!("CARGO_PKG_VERSION"))
        .author("
Copyright (c) 2018-2022 Ministerio de Fomento,
                        Instituto de CC. de la Construcción Eduardo Torroja (IETcc-CSIC)

Autores: Rafael Villar Burke <pachi@ietcc.csic.es>,
         Daniel Jiménez González <danielj@ietcc.csic.es>
         Marta Sorribes Gil <msorribes@ietcc.csic.es>

Licencia: Publicado bajo licencia MIT.

")
        .about("Electrifica - Balance de energía ajustable y escenarios de electrificación.")
        .setting(AppSettings::NextLineHelp)
        .arg(Arg::with_name("archivo_datos")
            .short("d")
            .long("archivo_datos")
            .value_name("ARCHIVO_DATOS")
            .required_unless("showlicense")
            .help("Archivo de datos de consumo, generación, importación y emisiones")
            .takes_value(true)
            .display_order(1))
        .arg(Arg::with_name("region")
            .short("r")
            .long("region")
            .value_name("REGION")
            .help("Región (US o código de estado). Por defecto, la de los metadatos del archivo")
            .takes_value(true)
            .display_order(2))
        .arg(Arg::with_name("year")
            .short("y")
            .long("year")
            .value_name("YEAR")
            .help("Año. Por defecto, el de los metadatos o el último año con datos")
            .takes_value(true)
            .display_order(3))
        .arg(Arg::with_name("archivo_escenario")
            .short("s")
            .long("escenario")
            .value_name("ARCHIVO_ESCENARIO")
            .help("Archivo de ediciones de escenario, una por línea")
            .takes_value(true)
            .display_order(4))
        .arg(Arg::with_name("edicion")
            .short("e")
            .long("edicion")
            .value_name("EDICION")
            .help("Edición de escenario, aplicada tras las del archivo de escenario.\nP.e.: -e \"electrification, transportation, 40\" -e equalize")
            .takes_value(true)
            .multiple(true)
            .number_of_values(1)
            .display_order(5))
        .arg(Arg::with_name("unidades")
            .long("unidades")
            .value_name("UNIDADES")
            .possible_values(&["GWh", "GW"])
            .default_value("GWh")
            .help("Unidad de presentación de las energías")
            .takes_value(true))
        .arg(Arg::with_name("archivo_salida_json")
            .long("json")
            .value_name("ARCHIVO_SALIDA_JSON")
            .help("Archivo de salida de resultados detallados en formato JSON")
            .takes_value(true))
        .arg(Arg::with_name("showlicense")
            .short("L")
            .long("licencia")
            .help("Muestra la licencia del programa (MIT)"))
        .arg(Arg::with_name("v")
            .short("v")
            .multiple(true)
            .help("Sets the level of verbosity"))
        .get_matches();

    if matches.is_present("showlicense") {
        println!(
            "
Copyright (c) 2018-2022 Ministerio de Fomento
                        Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the 'Software'), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in
all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.

Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>
            Daniel Jiménez González <danielj@ietcc.csic.es>
            Marta Sorribes Gil <msorribes@ietcc.csic.es>"
        );
        exit(exitcode::OK);
    }

    // Prólogo ------------------------------------------------------------------------------------

    let verbosity = matches.occurrences_of("v");
    init_logging(verbosity);

    if verbosity > 2 {
        println!("Opciones indicadas: ----------");
        println!("{:#?}", matches);
        println!("------------------------------");
    }

    println!("** Datos de entrada");

    // Datos y configuración: CLI > metadatos del archivo > valores por defecto -------------------
    let data = get_datafile(matches.value_of("archivo_datos").unwrap_or_default());

    let year = if matches.is_present("year") {
        Some(value_t!(matches, "year", i32).unwrap_or_else(|error| {
            eprintln!("ERROR: año incorrecto ({})", error);
            exit(exitcode::USAGE);
        }))
    } else {
        None
    };
    let region = matches.value_of("region");
    let unit = value_t!(matches, "unidades", DisplayUnit).unwrap_or_else(|e| e.exit());

    let mut model = Model::from_datafile(&data, region, year).unwrap_or_else(|error| {
        eprintln!("ERROR: No se han podido cargar los datos ({})", error);
        exit(exit_code(&error));
    });
    println!("Región: {}, año: {}", model.region, model.year);

    // Escenario -----------------------------------------------------------------------------------
    let edits = get_edits(&matches);
    for edit in &edits {
        if verbosity > 0 {
            println!("Edición: {}", edit);
        }
        if let Err(error) = model.apply(edit) {
            eprintln!("ERROR: No se ha podido aplicar la edición \"{}\" ({})", edit, error);
            exit(exit_code(&error));
        }
    }

    // Salida de resultados ------------------------------------------------------------------------
    let snapshot = model.snapshot(unit);

    if let Some(archivo) = matches.value_of_os("archivo_salida_json") {
        let path = Path::new(archivo);
        if verbosity > 0 {
            println!("Resultados en formato JSON: {:?}", path.display());
        }
        let json = serde_json::to_string_pretty(&snapshot).unwrap_or_else(|error| {
            eprintln!("ERROR: No se ha podido convertir el balance al formato JSON ({})", error);
            exit(exitcode::SOFTWARE);
        });
        writefile(&path, json.as_bytes());
    }

    // Mostrar siempre en formato plain
    println!("{}", snapshot.to_plain());
}
