/// Searches for a row order that makes `a` strictly diagonally dominant.
///
/// Row `r` may be placed at position `t` when `2|a[r][t]| > Σ|a[r][*]|`,
/// that is, when its entry in column `t` outweighs the rest of the row.
/// Backtracks over unused rows and returns `order[t] = r` for the first
/// complete assignment, or `None` if no order works.
pub(super) fn reorder(a: &[Vec<f64>]) -> Option<Vec<usize>> {
    let totals: Vec<f64> = a
        .iter()
        .map(|row| row.iter().map(|v| v.abs()).sum())
        .collect();

    let mut used = vec![false; a.len()];
    let mut order = Vec::with_capacity(a.len());
    assign(a, &totals, &mut used, &mut order).then_some(order)
}

fn assign(a: &[Vec<f64>], totals: &[f64], used: &mut [bool], order: &mut Vec<usize>) -> bool {
    let target = order.len();
    if target == a.len() {
        return true;
    }

    for row in 0..a.len() {
        if used[row] || 2.0 * a[row][target].abs() <= totals[row] {
            continue;
        }

        used[row] = true;
        order.push(row);
        if assign(a, totals, used, order) {
            return true;
        }
        order.pop();
        used[row] = false;
    }

    false
}

/// Returns true if `order` leaves every row in place.
pub(super) fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(i, &r)| i == r)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix<const N: usize>(rows: [[f64; N]; N]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn keeps_dominant_order() {
        let a = matrix([[10.0, -1.0, 2.0], [-1.0, 11.0, -1.0], [2.0, -1.0, 10.0]]);
        let order = reorder(&a).unwrap();
        assert_eq!(order, [0, 1, 2]);
        assert!(is_identity(&order));
    }

    #[test]
    fn finds_permutation() {
        let a = matrix([[1.0, 11.0, -1.0], [10.0, -1.0, 2.0], [2.0, -1.0, 10.0]]);
        let order = reorder(&a).unwrap();
        assert_eq!(order, [1, 0, 2]);
        assert!(!is_identity(&order));
    }

    #[test]
    fn ties_are_not_dominant() {
        // Row 0 splits its weight evenly, so it fits no column.
        let a = matrix([[3.0, 3.0, 0.0], [4.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(reorder(&a).is_none());

        let a = matrix([[3.0, 4.0, 0.0], [5.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(reorder(&a).unwrap(), [1, 0, 2]);
    }

    #[test]
    fn reports_impossible_systems() {
        let a = matrix([[1.0, 2.0], [3.0, 4.0]]);
        assert!(reorder(&a).is_none());
    }
}
