use crate::math::{Real, Vector, DIM};
use crate::query::PlaneSearchError;
use core::cmp::Ordering;

// Standard Nelder-Mead coefficients: reflection, expansion, contraction,
// shrink.
const RHO: Real = 1.0;
const CHI: Real = 2.0;
const PSI: Real = 0.5;
const SIGMA: Real = 0.5;

/// Parameters controlling the Nelder-Mead simplex search.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SimplexParams {
    /// Relative tolerance on the objective spread across the simplex.
    pub f_rel_tol: Real,
    /// Absolute tolerance on the simplex diameter.
    pub x_abs_tol: Real,
    /// Per-axis offset used to build the initial simplex around the seed.
    pub init_step: Real,
    /// Maximum number of objective evaluations before the search is
    /// declared not converged.
    pub max_evals: usize,
}

impl Default for SimplexParams {
    fn default() -> Self {
        SimplexParams {
            f_rel_tol: 1.0e-6,
            x_abs_tol: 1.0e-3,
            init_step: 0.25,
            max_evals: 400,
        }
    }
}

/// The minimizer located by [`minimize`].
#[derive(Copy, Clone, Debug)]
pub struct SimplexMinimum {
    /// The minimizing point.
    pub x: Vector<Real>,
    /// The objective value at the minimizing point.
    pub value: Real,
    /// The number of objective evaluations spent.
    pub evals: usize,
    /// The number of simplex iterations performed.
    pub iters: usize,
}

// Wraps the objective with the evaluation budget so exhaustion surfaces at
// the exact evaluation that crosses it.
struct BudgetedFn<F> {
    f: F,
    evals: usize,
    max_evals: usize,
}

impl<F: FnMut(&Vector<Real>) -> Result<Real, PlaneSearchError>> BudgetedFn<F> {
    fn eval(&mut self, x: &Vector<Real>) -> Result<Real, PlaneSearchError> {
        if self.evals >= self.max_evals {
            log::debug!(
                "simplex search exhausted its budget of {} evaluations",
                self.max_evals
            );
            return Err(PlaneSearchError::OptimizationNotConverged(self.evals));
        }

        self.evals += 1;
        (self.f)(x)
    }
}

/// Minimizes a scalar function over ℝ³ with the Nelder-Mead simplex method.
///
/// The search converges once both the relative objective spread across the
/// simplex and the simplex diameter fall below their tolerances. Exhausting
/// the evaluation budget fails with
/// [`PlaneSearchError::OptimizationNotConverged`], and any error returned
/// by the objective aborts the search unchanged: patching an undefined
/// objective value with a fake cost would void the convergence guarantees
/// and hide genuine geometric defects.
pub fn minimize<F>(
    x0: &Vector<Real>,
    params: &SimplexParams,
    f: F,
) -> Result<SimplexMinimum, PlaneSearchError>
where
    F: FnMut(&Vector<Real>) -> Result<Real, PlaneSearchError>,
{
    let mut budget = BudgetedFn {
        f,
        evals: 0,
        max_evals: params.max_evals,
    };

    let mut simplex: Vec<(Vector<Real>, Real)> = Vec::with_capacity(DIM + 1);
    let value = budget.eval(x0)?;
    simplex.push((*x0, value));

    for axis in 0..DIM {
        let vertex = x0 + Vector::ith(axis, params.init_step);
        let value = budget.eval(&vertex)?;
        simplex.push((vertex, value));
    }

    let mut iters = 0;

    loop {
        simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let (best, f_best) = simplex[0];
        let f_worst = simplex[DIM].1;
        let f_spread = f_worst - f_best;
        let diameter = simplex[1..]
            .iter()
            .map(|(x, _)| (x - best).norm())
            .fold(0.0, Real::max);

        if f_spread <= params.f_rel_tol * f_best.abs().max(1.0) && diameter <= params.x_abs_tol {
            log::debug!(
                "simplex search converged after {} iterations ({} evaluations)",
                iters,
                budget.evals
            );
            return Ok(SimplexMinimum {
                x: best,
                value: f_best,
                evals: budget.evals,
                iters,
            });
        }

        iters += 1;

        // Centroid of all vertices but the worst.
        let centroid = simplex[..DIM]
            .iter()
            .fold(Vector::zeros(), |acc, (x, _)| acc + x)
            / DIM as Real;
        let worst = simplex[DIM].0;
        let f_second_worst = simplex[DIM - 1].1;

        let reflected = centroid + (centroid - worst) * RHO;
        let f_reflected = budget.eval(&reflected)?;

        if f_reflected < f_best {
            let expanded = centroid + (centroid - worst) * (RHO * CHI);
            let f_expanded = budget.eval(&expanded)?;

            simplex[DIM] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
        } else if f_reflected < f_second_worst {
            simplex[DIM] = (reflected, f_reflected);
        } else {
            // Contract, either on the reflected side or on the worst side.
            let (contracted, threshold) = if f_reflected < f_worst {
                (centroid + (centroid - worst) * (RHO * PSI), f_reflected)
            } else {
                (centroid - (centroid - worst) * PSI, f_worst)
            };
            let f_contracted = budget.eval(&contracted)?;

            if f_contracted <= threshold {
                simplex[DIM] = (contracted, f_contracted);
            } else {
                // Shrink every vertex toward the best one.
                for vertex in simplex.iter_mut().skip(1) {
                    vertex.0 = best + (vertex.0 - best) * SIGMA;
                    let shrunk = vertex.0;
                    vertex.1 = budget.eval(&shrunk)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_on_a_quadratic_bowl() {
        let target = Vector::new(1.0, -2.0, 3.0);
        let minimum = minimize(&Vector::zeros(), &SimplexParams::default(), |x| {
            Ok((x - target).norm_squared())
        })
        .unwrap();

        assert!((minimum.x - target).norm() < 1.0e-2);
        assert!(minimum.value < 1.0e-4);
        assert!(minimum.evals <= SimplexParams::default().max_evals);
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let params = SimplexParams {
            max_evals: 2,
            ..SimplexParams::default()
        };
        let result = minimize(&Vector::zeros(), &params, |x| Ok(x.norm_squared()));

        assert_eq!(
            result.unwrap_err(),
            PlaneSearchError::OptimizationNotConverged(2)
        );
    }

    #[test]
    fn objective_errors_abort_the_search() {
        let result = minimize(&Vector::zeros(), &SimplexParams::default(), |_| {
            Err(PlaneSearchError::DegeneratePolygon(0))
        });

        assert_eq!(result.unwrap_err(), PlaneSearchError::DegeneratePolygon(0));
    }
}
