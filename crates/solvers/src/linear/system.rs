use std::fmt::Display;

use numtrace_core::{DecimalFormat, Fraction};

use super::Error;

/// Checks that `a` is a non-empty square matrix of finite values.
///
/// Returns the system size.
pub(super) fn square<R: AsRef<[f64]>>(a: &[R]) -> Result<usize, Error> {
    let n = a.len();
    if n == 0 {
        return Err(Error::Empty);
    }

    for (row, values) in a.iter().enumerate() {
        let values = values.as_ref();
        if values.len() != n {
            return Err(Error::NotSquare {
                row: row + 1,
                len: values.len(),
                expected: n,
            });
        }
        if let Some((col, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteCoefficient {
                row: row + 1,
                col: col + 1,
                value,
            });
        }
    }

    Ok(n)
}

/// Checks that `b` holds `n` finite values.
pub(super) fn constants(b: &[f64], n: usize) -> Result<(), Error> {
    if b.len() != n {
        return Err(Error::ConstantsLength {
            expected: n,
            actual: b.len(),
        });
    }

    match b.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((row, &value)) => Err(Error::NonFiniteConstant {
            row: row + 1,
            value,
        }),
        None => Ok(()),
    }
}

/// Copies `a` into an owned matrix of exact fractions.
pub(super) fn to_fractions<R: AsRef<[f64]>>(a: &[R]) -> Result<Vec<Vec<Fraction>>, Error> {
    a.iter()
        .map(|row| {
            row.as_ref()
                .iter()
                .map(|&v| Fraction::from_f64(v).map_err(Error::from))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}

/// Renders each row on its own line with entries separated by tabs.
pub(super) fn matrix_lines<T: Display>(rows: &[Vec<T>]) -> impl Iterator<Item = String> + '_ {
    rows.iter().map(|row| {
        row.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\t")
    })
}

/// Renders `a x = b` one equation per line, e.g. `4.000 x1 - 1.000 x2 = 2.000`.
pub(super) fn equation_lines(
    a: &[Vec<f64>],
    b: &[f64],
    format: DecimalFormat,
) -> Vec<String> {
    a.iter()
        .zip(b)
        .map(|(row, &rhs)| {
            let mut line = String::new();
            for (j, &coefficient) in row.iter().enumerate() {
                if j == 0 {
                    line.push_str(&format.format(coefficient));
                } else if coefficient < 0.0 {
                    line.push_str(" - ");
                    line.push_str(&format.format(-coefficient));
                } else {
                    line.push_str(" + ");
                    line.push_str(&format.format(coefficient));
                }
                line.push_str(&format!(" x{}", j + 1));
            }
            line.push_str(" = ");
            line.push_str(&format.format(rhs));
            line
        })
        .collect()
}

/// Renders a vector as `[v1, v2, ...]`.
pub(super) fn vector(values: &[f64], format: DecimalFormat) -> String {
    let entries: Vec<_> = values.iter().map(|&v| format.format(v)).collect();
    format!("[{}]", entries.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_square_systems() {
        let a = [[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(square(&a), Ok(2));
        assert_eq!(constants(&[1.0, 2.0], 2), Ok(()));
    }

    #[test]
    fn rejects_ragged_rows() {
        let a = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            square(&a),
            Err(Error::NotSquare {
                row: 2,
                len: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn rejects_bad_constants() {
        assert_eq!(
            constants(&[1.0], 2),
            Err(Error::ConstantsLength {
                expected: 2,
                actual: 1
            })
        );
        assert!(matches!(
            constants(&[1.0, f64::NAN], 2),
            Err(Error::NonFiniteConstant { row: 2, .. })
        ));
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        let empty: [[f64; 0]; 0] = [];
        assert_eq!(square(&empty), Err(Error::Empty));
        assert!(matches!(
            square(&[[1.0, f64::INFINITY], [0.0, 1.0]]),
            Err(Error::NonFiniteCoefficient { row: 1, col: 2, .. })
        ));
    }

    #[test]
    fn renders_equations_with_signs() {
        let a = vec![vec![4.0, -1.0], vec![-2.0, 5.0]];
        let lines = equation_lines(&a, &[2.0, -3.5], DecimalFormat::PLUG_IN);
        assert_eq!(
            lines,
            ["4.000 x1 - 1.000 x2 = 2.000", "-2.000 x1 + 5.000 x2 = -3.500"]
        );
    }

    #[test]
    fn renders_matrices_and_vectors() {
        let rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let lines: Vec<_> = matrix_lines(&rows).collect();
        assert_eq!(lines, ["1\t2\t3", "4\t5\t6"]);

        assert_eq!(
            vector(&[1.0, -0.25], DecimalFormat::new(2)),
            "[1.00, -0.25]"
        );
    }
}
