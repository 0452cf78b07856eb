//! Bateman evaluation for a single decay chain.
//!
//! For a chain of decay constants lambda_1 (head) .. lambda_n (tail), the
//! fraction of an initial unit quantity of the head that has become the tail
//! after time t is the generalized Bateman solution
//!
//!   fraction(t) = (prod_{i<n} lambda_i)
//!               * sum_i [ exp(-lambda_i t) / prod_{j != i} (lambda_j - lambda_i) ]
//!
//! The sum is, up to sign, the (n-1)-th divided difference of
//! f(x) = exp(-x t) over the nodes lambda_1..lambda_n. Evaluating it as a
//! divided-difference table keeps one code path for the degenerate-root case:
//! where two (or more) rates coincide within tolerance, the table substitutes
//! the confluent entry f^(k)(x)/k! - the L'Hopital limit of the colliding
//! terms - instead of dividing by a vanishing gap.
//!
//! Branching weights are not applied here; the caller owns them.

/// Rates closer than this, relatively, are treated as coincident.
pub const DEGENERATE_ROOT_TOLERANCE: f64 = 1e-9;

/// Fraction of a unit quantity of the chain head converted into the chain
/// tail at time `t` (seconds), ignoring branching weight.
///
/// `lambdas` lists the decay constant of every nuclide on the chain in path
/// order; the tail entry may be 0 (stable). For a single-element chain this
/// is plain exponential survival of the head itself.
pub fn chain_fraction(lambdas: &[f64], t: f64) -> f64 {
    debug_assert!(!lambdas.is_empty(), "chain must hold at least one rate");
    debug_assert!(t >= 0.0, "elapsed time must be non-negative");

    let n = lambdas.len();
    if n == 1 {
        return (-lambdas[0] * t).exp();
    }

    // The fraction is invariant under lambda -> lambda/s, t -> s*t. Scaling
    // by the fastest rate in the chain bounds every node by 1, which keeps
    // the gap products representable for long chains of very slow rates.
    let scale = lambdas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    debug_assert!(scale > 0.0, "interior chain nuclides are never stable");
    let tau = scale * t;

    let mut nodes: Vec<f64> = lambdas.iter().map(|&l| l / scale).collect();
    let rate_product: f64 = nodes[..n - 1].iter().product();
    nodes.sort_by(|a, b| a.partial_cmp(b).expect("decay constants are finite"));

    let dd = divided_difference(&nodes, tau);
    let sign = if (n - 1) % 2 == 0 { 1.0 } else { -1.0 };

    // Exact value is non-negative; cancellation can leave a tiny negative.
    (rate_product * sign * dd).max(0.0)
}

/// Divided difference f[x_1..x_n] of f(x) = exp(-x * tau) over sorted nodes,
/// with confluent entries where nodes coincide.
fn divided_difference(nodes: &[f64], tau: f64) -> f64 {
    let n = nodes.len();
    let mut d: Vec<f64> = nodes.iter().map(|&x| (-x * tau).exp()).collect();

    // In-place table: after level k, d[i] holds f[x_{i-k}..x_i].
    for k in 1..n {
        for i in (k..n).rev() {
            let gap = nodes[i] - nodes[i - k];
            if gap < DEGENERATE_ROOT_TOLERANCE * nodes[i].max(f64::MIN_POSITIVE) {
                d[i] = confluent_entry(nodes[i], tau, k);
            } else {
                d[i] = (d[i] - d[i - 1]) / gap;
            }
        }
    }
    d[n - 1]
}

/// Confluent table entry f^(k)(x)/k! = (-tau)^k exp(-x tau) / k!.
///
/// Evaluated in log space: for large tau the power and the exponential
/// overflow and underflow separately while their product is far inside range.
fn confluent_entry(x: f64, tau: f64, k: usize) -> f64 {
    if tau == 0.0 {
        return 0.0;
    }
    let ln_factorial: f64 = (1..=k).map(|i| (i as f64).ln()).sum();
    let magnitude = (k as f64 * tau.ln() - x * tau - ln_factorial).exp();
    if k % 2 == 0 { magnitude } else { -magnitude }
}
