use nalgebra::{DMatrix, DVector};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Polynomial with constrained least-squares fitting
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("no sample or forced points to fit")]
    Empty,
    #[error("fit system is singular (degenerate or duplicate inputs)")]
    Singular,
}

/// A point the fitted curve must pass through exactly.
///
/// Forced points are taken from the boundary samples of a neighbouring
/// segment; pinning `m` consecutive grid samples fixes the curve's value
/// and its finite-difference derivatives up to order `m - 1` at that end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForcedPoint {
    pub time: f64,
    pub value: f64,
}

/// Polynomial in ascending coefficient order: c[0] + c[1]*t + c[2]*t^2 + ...
#[derive(Debug, Clone)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Evaluate at `t` (Horner's rule).
    pub fn val(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    /// Degree of the polynomial (number of coefficients minus one).
    pub fn order(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }
}

// ---------------------------------------------------------------------------
// Constrained least-squares fit
// ---------------------------------------------------------------------------

/// Fit a polynomial of the given order to `(times, values)` samples,
/// passing exactly through every forced point.
///
/// The free samples enter a least-squares residual; forced points become
/// equality rows, and the combined system is solved in KKT form:
///
/// ```text
/// | AᵀA  Cᵀ | |c|   |Aᵀb|
/// | C    0  | |λ| = |d  |
/// ```
///
/// Callers inflate `order` by the number of forced points, since each
/// equality constraint consumes one degree of freedom. If there are fewer
/// points than the requested order, the order is reduced to `points - 1`.
pub fn fit(
    order: usize,
    times: &[f64],
    values: &[f64],
    forced: &[ForcedPoint],
) -> Result<Polynomial, FitError> {
    let n_free = times.len().min(values.len());
    let n_forced = forced.len();
    let total = n_free + n_forced;
    if total == 0 {
        return Err(FitError::Empty);
    }

    let order = order.min(total - 1);
    let n = order + 1; // coefficient count

    // Vandermonde rows for the free samples
    let a = DMatrix::from_fn(n_free, n, |i, j| times[i].powi(j as i32));
    let b = DVector::from_fn(n_free, |i, _| values[i]);

    let ata = a.transpose() * &a;
    let atb = a.transpose() * b;

    if n_forced == 0 {
        let coeffs = ata.lu().solve(&atb).ok_or(FitError::Singular)?;
        return Ok(Polynomial {
            coeffs: coeffs.iter().copied().collect(),
        });
    }

    // Constraint rows and the bordered (KKT) system
    let c = DMatrix::from_fn(n_forced, n, |i, j| forced[i].time.powi(j as i32));
    let d = DVector::from_fn(n_forced, |i, _| forced[i].value);

    let dim = n + n_forced;
    let mut kkt = DMatrix::zeros(dim, dim);
    kkt.view_mut((0, 0), (n, n)).copy_from(&ata);
    kkt.view_mut((0, n), (n, n_forced)).copy_from(&c.transpose());
    kkt.view_mut((n, 0), (n_forced, n)).copy_from(&c);

    let mut rhs = DVector::zeros(dim);
    rhs.rows_mut(0, n).copy_from(&atb);
    rhs.rows_mut(n, n_forced).copy_from(&d);

    let sol = kkt.lu().solve(&rhs).ok_or(FitError::Singular)?;
    Ok(Polynomial {
        coeffs: sol.rows(0, n).iter().copied().collect(),
    })
}

/// Fit a polynomial determined entirely by forced points (no free residual).
///
/// Used when a segment's continuity requirements at both ends fully
/// determine the curve: `n` forced points yield a degree `n - 1` polynomial
/// through all of them.
pub fn lip(forced: &[ForcedPoint]) -> Result<Polynomial, FitError> {
    let n = forced.len();
    if n == 0 {
        return Err(FitError::Empty);
    }

    let v = DMatrix::from_fn(n, n, |i, j| forced[i].time.powi(j as i32));
    let d = DVector::from_fn(n, |i, _| forced[i].value);

    let coeffs = v.lu().solve(&d).ok_or(FitError::Singular)?;
    Ok(Polynomial {
        coeffs: coeffs.iter().copied().collect(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
