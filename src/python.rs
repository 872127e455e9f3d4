use numpy::PyReadonlyArray2;
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::error::PhmError;
use crate::phm::{Database, Item, PhmConfig, PhmMiner};

fn to_py_err(err: PhmError) -> PyErr {
    match err {
        PhmError::Io(e) => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_config(
    min_utility: u64,
    min_periodicity: usize,
    max_periodicity: usize,
    min_average_periodicity: f64,
    max_average_periodicity: f64,
    min_length: usize,
    max_length: Option<usize>,
    parallel: bool,
) -> PhmConfig {
    PhmConfig::new(min_utility)
        .with_periodicity(min_periodicity, max_periodicity)
        .with_average_periodicity(min_average_periodicity, max_average_periodicity)
        .with_length(min_length, max_length.unwrap_or(usize::MAX))
        .with_parallel(parallel)
}

/// Mines a dense utility matrix (rows = transactions, columns = items).
#[pyfunction]
#[pyo3(signature = (
    utilities,
    min_utility,
    min_periodicity,
    max_periodicity,
    min_average_periodicity,
    max_average_periodicity,
    min_length = 1,
    max_length = None,
    parallel = false,
))]
#[allow(clippy::too_many_arguments)]
fn mine_phuis(
    py: Python<'_>,
    utilities: PyReadonlyArray2<'_, u64>,
    min_utility: u64,
    min_periodicity: usize,
    max_periodicity: usize,
    min_average_periodicity: f64,
    max_average_periodicity: f64,
    min_length: usize,
    max_length: Option<usize>,
    parallel: bool,
) -> PyResult<Vec<(Vec<Item>, u64)>> {
    let database = Database::from_utility_matrix(utilities.as_array());
    let miner = PhmMiner::new(build_config(
        min_utility,
        min_periodicity,
        max_periodicity,
        min_average_periodicity,
        max_average_periodicity,
        min_length,
        max_length,
        parallel,
    ));

    let (collection, _) = py
        .allow_threads(|| miner.mine_to_collection(&database))
        .map_err(to_py_err)?;

    Ok(collection
        .iter()
        .map(|phui| (phui.items.to_vec(), phui.utility))
        .collect())
}

/// Mines an SPMF utility file and writes the itemsets to `output`.
/// Returns `(phui_count, candidate_count)`.
#[pyfunction]
#[pyo3(signature = (
    input,
    output,
    min_utility,
    min_periodicity,
    max_periodicity,
    min_average_periodicity,
    max_average_periodicity,
    min_length = 1,
    max_length = None,
))]
#[allow(clippy::too_many_arguments)]
fn mine_phuis_file(
    py: Python<'_>,
    input: String,
    output: String,
    min_utility: u64,
    min_periodicity: usize,
    max_periodicity: usize,
    min_average_periodicity: f64,
    max_average_periodicity: f64,
    min_length: usize,
    max_length: Option<usize>,
) -> PyResult<(usize, usize)> {
    let miner = PhmMiner::new(build_config(
        min_utility,
        min_periodicity,
        max_periodicity,
        min_average_periodicity,
        max_average_periodicity,
        min_length,
        max_length,
        false,
    ));

    let stats = py
        .allow_threads(|| miner.mine_file(&input, &output))
        .map_err(to_py_err)?;
    Ok((stats.phui_count, stats.candidate_count))
}

#[pymodule]
fn phui_miner(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(mine_phuis, m)?)?;
    m.add_function(wrap_pyfunction!(mine_phuis_file, m)?)?;
    Ok(())
}
