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

#[test]
fn vt_base() {
    assert_cli::Assert::main_binary()
        .with_args(&["-d", "test_data/vt_2022.csv"])
        .stdout()
        .contains("Región: VT, año: 2022")
        .stdout()
        .contains("** Balance de energía: Vermont (VT), 2022")
        .stdout()
        .contains("Eléctrica [GWh]: base 2188.16, ajustado 2188.16")
        .unwrap();
}

#[test]
fn vt_base_gw() {
    assert_cli::Assert::main_binary()
        .with_args(&["-d", "test_data/vt_2022.csv", "--unidades", "GW"])
        .stdout()
        .contains("Eléctrica [GW]: base 0.25, ajustado 0.25")
        .unwrap();
}

#[test]
fn vt_scenario_file() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "-d",
            "test_data/vt_2022.csv",
            "-s",
            "test_data/escenario.txt",
            "-v",
        ])
        .stdout()
        .contains("Escenario: \"test_data/escenario.txt\"")
        .stdout()
        .contains("Edición: exclude, aviation, on")
        .stdout()
        .contains("Subcombustibles excluidos: aviation")
        .stdout()
        .contains("Igualación en")
        .unwrap();
}

#[test]
fn vt_edits() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "-d",
            "test_data/vt_2022.csv",
            "-e",
            "demand, residential, 0",
        ])
        .stdout()
        .contains("Eléctrica [GWh]: base 2188.16, ajustado 0.00")
        .unwrap();
}

#[test]
fn wrong_region() {
    assert_cli::Assert::main_binary()
        .with_args(&["-d", "test_data/vt_2022.csv", "-r", "XX"])
        .fails()
        .and()
        .stderr()
        .contains("Región desconocida \"XX\"")
        .unwrap();
}

#[test]
fn wrong_edit() {
    assert_cli::Assert::main_binary()
        .with_args(&["-d", "test_data/vt_2022.csv", "-e", "electrify, everything"])
        .fails()
        .unwrap();
}
