//! Training data
//!
//! The tree learner works on a column-typed matrix with one row per observation and one
//! column per variable. Symbolic cells hold the index of their label, numeric cells the
//! value itself. [`TrainingData`] accepts row-major records, column-major records or an
//! already encoded matrix and converts them into that form.
use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::error::{Error, Result};
use crate::variable::{Value, Variable, VariableKind};

/// Training examples in exactly one of the supported layouts
#[derive(Clone, Debug)]
pub enum TrainingData {
    /// One record per observation, cells ordered like the variables
    Rows(Vec<Vec<Value>>),
    /// One record per variable, cells ordered by observation
    Columns(Vec<Vec<Value>>),
    /// An encoded matrix with dimensionality (nsamples, nvariables)
    Matrix(Array2<f64>),
}

impl TrainingData {
    /// Encodes the data as matrix for the given variable ordering
    ///
    /// Fails with `Error::InvalidInput` if there is no data, if the shape does not match the
    /// variables, or if a cell is not a valid value of its variable.
    pub fn into_matrix(self, variables: &[Variable]) -> Result<Array2<f64>> {
        let nvariables = variables.len();

        match self {
            TrainingData::Rows(rows) => {
                if rows.is_empty() {
                    return Err(Error::InvalidInput("no data given".into()));
                }

                let mut cells = Vec::with_capacity(rows.len() * nvariables);
                for (i, row) in rows.iter().enumerate() {
                    if row.len() != nvariables {
                        return Err(Error::InvalidInput(format!(
                            "row {} has {} cells, expected {}",
                            i,
                            row.len(),
                            nvariables
                        )));
                    }
                    for (var, value) in variables.iter().zip(row) {
                        cells.push(var.encode(value)?);
                    }
                }

                Ok(Array2::from_shape_vec((rows.len(), nvariables), cells)?)
            }
            TrainingData::Columns(columns) => {
                if columns.len() != nvariables {
                    return Err(Error::InvalidInput(format!(
                        "got {} columns for {} variables",
                        columns.len(),
                        nvariables
                    )));
                }
                let nsamples = columns.first().map(|c| c.len()).unwrap_or(0);
                if nsamples == 0 {
                    return Err(Error::InvalidInput("no data given".into()));
                }

                let mut matrix = Array2::zeros((nsamples, nvariables));
                for (j, (var, column)) in variables.iter().zip(&columns).enumerate() {
                    if column.len() != nsamples {
                        return Err(Error::InvalidInput(format!(
                            "column {} has {} cells, expected {}",
                            var.name(),
                            column.len(),
                            nsamples
                        )));
                    }
                    for (i, value) in column.iter().enumerate() {
                        matrix[(i, j)] = var.encode(value)?;
                    }
                }

                Ok(matrix)
            }
            TrainingData::Matrix(matrix) => {
                check_matrix(&matrix, variables)?;
                Ok(matrix)
            }
        }
    }
}

/// Checks that an encoded matrix fits the variables
pub fn check_matrix<D: Data<Elem = f64>>(
    matrix: &ArrayBase<D, Ix2>,
    variables: &[Variable],
) -> Result<()> {
    if matrix.ncols() != variables.len() {
        return Err(Error::InvalidInput(format!(
            "matrix has {} columns for {} variables",
            matrix.ncols(),
            variables.len()
        )));
    }
    if matrix.nrows() == 0 {
        return Err(Error::InvalidInput("no data given".into()));
    }

    for (var, column) in variables.iter().zip(matrix.columns()) {
        let valid = match var.kind() {
            VariableKind::Symbolic { labels } => column
                .iter()
                .all(|&x| x >= 0. && x.fract() == 0. && (x as usize) < labels.len()),
            VariableKind::Numeric { .. } => column.iter().all(|x| x.is_finite()),
        };
        if !valid {
            return Err(Error::InvalidInput(format!(
                "column {} contains values outside of its domain",
                var.name()
            )));
        }
    }

    Ok(())
}

impl From<Array2<f64>> for TrainingData {
    fn from(matrix: Array2<f64>) -> Self {
        TrainingData::Matrix(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn variables() -> Vec<Variable> {
        vec![
            Variable::numeric("x"),
            Variable::symbolic("color", vec!["red", "green"]),
        ]
    }

    #[test]
    fn rows_and_columns_agree() {
        let vars = variables();
        let rows = TrainingData::Rows(vec![
            vec![1.5.into(), "green".into()],
            vec![2.5.into(), "red".into()],
        ]);
        let columns = TrainingData::Columns(vec![
            vec![1.5.into(), 2.5.into()],
            vec!["green".into(), "red".into()],
        ]);

        let expected = array![[1.5, 1.], [2.5, 0.]];
        assert_eq!(rows.into_matrix(&vars).unwrap(), expected);
        assert_eq!(columns.into_matrix(&vars).unwrap(), expected);
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        let vars = variables();

        assert!(TrainingData::Rows(vec![]).into_matrix(&vars).is_err());
        assert!(TrainingData::Rows(vec![vec![1.0.into()]])
            .into_matrix(&vars)
            .is_err());
        assert!(TrainingData::Columns(vec![vec![1.0.into()], vec![]])
            .into_matrix(&vars)
            .is_err());
        assert!(TrainingData::Matrix(array![[1.0]]).into_matrix(&vars).is_err());
    }

    #[test]
    fn matrix_cells_must_be_in_domain() {
        let vars = variables();

        assert!(TrainingData::from(array![[1.0, 1.0]])
            .into_matrix(&vars)
            .is_ok());
        assert!(TrainingData::from(array![[1.0, 2.0]])
            .into_matrix(&vars)
            .is_err());
        assert!(TrainingData::from(array![[1.0, 0.5]])
            .into_matrix(&vars)
            .is_err());
        assert!(TrainingData::from(array![[f64::NAN, 0.0]])
            .into_matrix(&vars)
            .is_err());
    }
}
