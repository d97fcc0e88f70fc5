// FFI Facade: the Python entry point.
// Exposes the `_core` module; program text goes in, digit strings come out.

use crate::compute::Engine;
use crate::search::solve;
use crate::store::Program;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn parse(source: &str) -> PyResult<Program> {
    Program::parse(source).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Reports the version of the compiled core.
#[pyfunction]
fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns `(min, max)` over all inputs that leave z at zero, or `None`.
#[pyfunction]
fn solve_program(source: &str) -> PyResult<Option<(String, String)>> {
    let program = parse(source)?;
    Ok(solve(&program).map(|range| (range.min, range.max)))
}

/// Runs the program over one input and returns the final `(w, x, y, z)`.
#[pyfunction]
fn run_program(source: &str, digits: &str) -> PyResult<(i64, i64, i64, i64)> {
    let program = parse(source)?;
    let state = Engine::execute(&program, digits).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok((state.w, state.x, state.y, state.z))
}

/// Defines the `_core` Python module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(core_version, m)?)?;
    m.add_function(wrap_pyfunction!(solve_program, m)?)?;
    m.add_function(wrap_pyfunction!(run_program, m)?)?;
    Ok(())
}
