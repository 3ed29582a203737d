// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Adaptive Quadrature
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Globally adaptive Gauss–Kronrod quadrature.
//!
//! The interval with the largest error estimate is bisected until the
//! summed error meets `max(epsabs, epsrel·|I|)` or the subdivision budget
//! of the workspace is exhausted. Error estimates follow QUADPACK:
//!   err = resasc · min(1, (200·|K − G| / resasc)^{3/2}),
//! floored at 50·ε·resabs.
//!
//! Failing to converge is not an error: the best estimate is returned
//! together with the achieved error and a status the caller can log.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Kronrod abscissae of the 41-point rule, descending; the last is the centre.
const XGK_41: [f64; 21] = [
    0.9988590315882777,
    0.9931285991850949,
    0.9815078774502503,
    0.9639719272779138,
    0.9408226338317548,
    0.912234428251326,
    0.878276811252282,
    0.8391169718222188,
    0.7950414288375512,
    0.7463319064601508,
    0.6932376563347514,
    0.636053680726515,
    0.5751404468197103,
    0.5108670019508271,
    0.4435931752387251,
    0.37370608871541955,
    0.301627868114913,
    0.22778585114164507,
    0.15260546524092267,
    0.07652652113349734,
    0.0,
];

const WGK_41: [f64; 21] = [
    0.0030735837185205317,
    0.008600269855642943,
    0.014626169256971253,
    0.020388373461266523,
    0.02588213360495116,
    0.0312873067770328,
    0.036600169758200796,
    0.041668873327973685,
    0.04643482186749767,
    0.05094457392372869,
    0.05519510534828599,
    0.05911140088063957,
    0.06265323755478117,
    0.06583459713361842,
    0.06864867292852161,
    0.07105442355344407,
    0.07303069033278667,
    0.07458287540049918,
    0.07570449768455667,
    0.07637786767208074,
    0.07660071191799965,
];

/// Gauss weights for the odd-indexed Kronrod abscissae.
const WG_41: [f64; 10] = [
    0.017614007139152118,
    0.04060142980038694,
    0.06267204833410907,
    0.08327674157670475,
    0.10193011981724044,
    0.11819453196151841,
    0.13168863844917664,
    0.14209610931838204,
    0.14917298647260374,
    0.15275338713072584,
];

/// Kronrod abscissae of the 61-point rule, descending; the last is the centre.
const XGK_61: [f64; 31] = [
    0.9994844100504906,
    0.9968934840746495,
    0.9916309968704046,
    0.9836681232797472,
    0.9731163225011262,
    0.9600218649683075,
    0.94437444474856,
    0.9262000474292743,
    0.9055733076999078,
    0.8825605357920527,
    0.8572052335460612,
    0.8295657623827684,
    0.799727835821839,
    0.7677774321048262,
    0.7337900624532268,
    0.6978504947933158,
    0.6600610641266269,
    0.6205261829892429,
    0.5793452358263617,
    0.5366241481420199,
    0.49248046786177857,
    0.44703376953808915,
    0.4004012548303944,
    0.3527047255308781,
    0.30407320227362505,
    0.25463692616788985,
    0.20452511668230988,
    0.15386991360858354,
    0.10280693796673702,
    0.0514718425553177,
    0.0,
];

const WGK_61: [f64; 31] = [
    0.0013890136986770077,
    0.003890461127099884,
    0.0066307039159312926,
    0.009273279659517764,
    0.011823015253496341,
    0.014369729507045804,
    0.01692088918905327,
    0.019414141193942382,
    0.021828035821609193,
    0.0241911620780806,
    0.0265099548823331,
    0.02875404876504129,
    0.030907257562387762,
    0.03298144705748372,
    0.034979338028060025,
    0.03688236465182123,
    0.038678945624727595,
    0.040374538951535956,
    0.041969810215164244,
    0.04345253970135607,
    0.04481480013316266,
    0.04605923827100699,
    0.04718554656929915,
    0.04818586175708713,
    0.04905543455502978,
    0.04979568342707421,
    0.05040592140278235,
    0.05088179589874961,
    0.051221547849258774,
    0.05142612853745902,
    0.05149472942945157,
];

/// Gauss weights for the odd-indexed Kronrod abscissae.
const WG_61: [f64; 15] = [
    0.007968192496166605,
    0.01846646831109096,
    0.02878470788332337,
    0.03879919256962705,
    0.04840267283059405,
    0.057493156217619065,
    0.06597422988218049,
    0.0737559747377052,
    0.08075589522942021,
    0.08689978720108298,
    0.09212252223778612,
    0.09636873717464425,
    0.09959342058679527,
    0.1017623897484055,
    0.10285265289355884,
];

/// Gauss–Kronrod rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureRule {
    /// 20-point Gauss / 41-point Kronrod. Mass and energy tables.
    GaussKronrod41,
    /// 30-point Gauss / 61-point Kronrod. Potential gauge and potential tables.
    GaussKronrod61,
}

impl QuadratureRule {
    fn tables(self) -> (&'static [f64], &'static [f64], &'static [f64]) {
        match self {
            QuadratureRule::GaussKronrod41 => (&XGK_41, &WGK_41, &WG_41),
            QuadratureRule::GaussKronrod61 => (&XGK_61, &WGK_61, &WG_61),
        }
    }

    /// Integrand evaluations per application of the rule.
    pub fn points(self) -> usize {
        2 * self.tables().0.len() - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureStatus {
    Converged,
    /// Subdivision budget exhausted before the tolerance was met.
    MaxSubdivisions,
    /// Error estimate stalled at the roundoff level.
    Roundoff,
    /// Interval shrank to machine precision (non-integrable point).
    BadIntegrand,
}

#[derive(Debug, Clone, Copy)]
pub struct QuadratureResult {
    pub value: f64,
    pub abs_error: f64,
    pub subdivisions: usize,
    pub status: QuadratureStatus,
}

impl QuadratureResult {
    pub fn is_converged(&self) -> bool {
        self.status == QuadratureStatus::Converged
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.error.total_cmp(&other.error) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// Reusable interval storage bounded by a maximum subdivision count.
#[derive(Debug)]
pub struct QuadratureWorkspace {
    limit: usize,
    segments: BinaryHeap<Segment>,
}

impl QuadratureWorkspace {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            segments: BinaryHeap::with_capacity(limit),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// One rule application on [a, b]: (result, abserr, resabs, resasc).
fn gauss_kronrod<F>(f: &mut F, a: f64, b: f64, rule: QuadratureRule) -> (f64, f64, f64, f64)
where
    F: FnMut(f64) -> f64,
{
    let (xgk, wgk, wg) = rule.tables();
    let n = xgk.len();
    let center = 0.5 * (a + b);
    let half_length = 0.5 * (b - a);
    let abs_half_length = half_length.abs();

    let mut fv1 = [0.0_f64; 31];
    let mut fv2 = [0.0_f64; 31];

    let f_center = f(center);
    let mut result_gauss = 0.0;
    let mut result_kronrod = f_center * wgk[n - 1];
    let mut result_abs = result_kronrod.abs();

    // Both rules have an odd Kronrod count, so the centre is never a Gauss node.
    for j in 0..(n - 1) / 2 {
        let jtw = 2 * j + 1;
        let abscissa = half_length * xgk[jtw];
        let fval1 = f(center - abscissa);
        let fval2 = f(center + abscissa);
        fv1[jtw] = fval1;
        fv2[jtw] = fval2;
        let fsum = fval1 + fval2;
        result_gauss += wg[j] * fsum;
        result_kronrod += wgk[jtw] * fsum;
        result_abs += wgk[jtw] * (fval1.abs() + fval2.abs());
    }

    for j in 0..n / 2 {
        let jtwm1 = 2 * j;
        let abscissa = half_length * xgk[jtwm1];
        let fval1 = f(center - abscissa);
        let fval2 = f(center + abscissa);
        fv1[jtwm1] = fval1;
        fv2[jtwm1] = fval2;
        result_kronrod += wgk[jtwm1] * (fval1 + fval2);
        result_abs += wgk[jtwm1] * (fval1.abs() + fval2.abs());
    }

    let mean = 0.5 * result_kronrod;
    let mut result_asc = wgk[n - 1] * (f_center - mean).abs();
    for j in 0..n - 1 {
        result_asc += wgk[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let err = (result_kronrod - result_gauss) * half_length;
    let result_abs = result_abs * abs_half_length;
    let result_asc = result_asc * abs_half_length;

    (
        result_kronrod * half_length,
        rescale_error(err, result_abs, result_asc),
        result_abs,
        result_asc,
    )
}

fn rescale_error(err: f64, result_abs: f64, result_asc: f64) -> f64 {
    let mut err = err.abs();
    if result_asc != 0.0 && err != 0.0 {
        let scale = (200.0 * err / result_asc).powf(1.5);
        err = if scale < 1.0 { result_asc * scale } else { result_asc };
    }
    if result_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        err = err.max(50.0 * f64::EPSILON * result_abs);
    }
    err
}

fn subinterval_too_small(a1: f64, a2: f64, b2: f64) -> bool {
    let tmp = (1.0 + 100.0 * f64::EPSILON) * (a2.abs() + 1000.0 * f64::MIN_POSITIVE);
    a1.abs() <= tmp && b2.abs() <= tmp
}

/// Integrate `f` over [a, b] to `max(epsabs, epsrel·|I|)`.
///
/// The workspace bounds the number of subintervals; its storage is reused
/// between calls.
pub fn integrate<F>(
    mut f: F,
    a: f64,
    b: f64,
    epsabs: f64,
    epsrel: f64,
    rule: QuadratureRule,
    workspace: &mut QuadratureWorkspace,
) -> QuadratureResult
where
    F: FnMut(f64) -> f64,
{
    workspace.segments.clear();
    let limit = workspace.limit;

    let (result0, abserr0, resabs0, resasc0) = gauss_kronrod(&mut f, a, b, rule);
    let done = |status| QuadratureResult {
        value: result0,
        abs_error: abserr0,
        subdivisions: 1,
        status,
    };

    let mut tolerance = epsabs.max(epsrel * result0.abs());
    let round_off = 50.0 * f64::EPSILON * resabs0;
    if abserr0 <= round_off && abserr0 > tolerance {
        return done(QuadratureStatus::Roundoff);
    }
    if (abserr0 <= tolerance && abserr0 != resasc0) || abserr0 == 0.0 {
        return done(QuadratureStatus::Converged);
    }
    if limit == 1 {
        return done(QuadratureStatus::MaxSubdivisions);
    }

    workspace.segments.push(Segment {
        a,
        b,
        value: result0,
        error: abserr0,
    });

    let mut area = result0;
    let mut errsum = abserr0;
    let mut iteration = 1;
    let mut roundoff_type1 = 0;
    let mut roundoff_type2 = 0;
    let mut failure = None;

    while let Some(worst) = workspace.segments.pop() {
        let a1 = worst.a;
        let b1 = 0.5 * (worst.a + worst.b);
        let a2 = b1;
        let b2 = worst.b;

        let (area1, error1, _, resasc1) = gauss_kronrod(&mut f, a1, b1, rule);
        let (area2, error2, _, resasc2) = gauss_kronrod(&mut f, a2, b2, rule);

        let area12 = area1 + area2;
        let error12 = error1 + error2;

        errsum += error12 - worst.error;
        area += area12 - worst.value;

        if resasc1 != error1 && resasc2 != error2 {
            let delta = worst.value - area12;
            if delta.abs() <= 1.0e-5 * area12.abs() && error12 >= 0.99 * worst.error {
                roundoff_type1 += 1;
            }
            if iteration >= 10 && error12 > worst.error {
                roundoff_type2 += 1;
            }
        }

        tolerance = epsabs.max(epsrel * area.abs());

        if errsum > tolerance {
            if roundoff_type1 >= 6 || roundoff_type2 >= 20 {
                failure = Some(QuadratureStatus::Roundoff);
            }
            if subinterval_too_small(a1, a2, b2) {
                failure = Some(QuadratureStatus::BadIntegrand);
            }
        }

        workspace.segments.push(Segment {
            a: a1,
            b: b1,
            value: area1,
            error: error1,
        });
        workspace.segments.push(Segment {
            a: a2,
            b: b2,
            value: area2,
            error: error2,
        });

        iteration += 1;
        if iteration >= limit || failure.is_some() || errsum <= tolerance {
            break;
        }
    }

    // Re-sum to avoid the drift accumulated by the running updates.
    let value: f64 = workspace.segments.iter().map(|s| s.value).sum();

    let status = if errsum <= tolerance {
        QuadratureStatus::Converged
    } else if let Some(status) = failure {
        status
    } else {
        QuadratureStatus::MaxSubdivisions
    };

    QuadratureResult {
        value,
        abs_error: errsum,
        subdivisions: workspace.segments.len(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws() -> QuadratureWorkspace {
        QuadratureWorkspace::new(1024)
    }

    #[test]
    fn test_kronrod_weights_sum_to_two() {
        for rule in [QuadratureRule::GaussKronrod41, QuadratureRule::GaussKronrod61] {
            let (xgk, wgk, wg) = rule.tables();
            let n = xgk.len();
            let kronrod: f64 = 2.0 * wgk[..n - 1].iter().sum::<f64>() + wgk[n - 1];
            let gauss: f64 = 2.0 * wg.iter().sum::<f64>();
            assert!((kronrod - 2.0).abs() < 1e-14, "{rule:?}: Kronrod sum {kronrod}");
            assert!((gauss - 2.0).abs() < 1e-14, "{rule:?}: Gauss sum {gauss}");
        }
    }

    #[test]
    fn test_rule_point_counts() {
        assert_eq!(QuadratureRule::GaussKronrod41.points(), 41);
        assert_eq!(QuadratureRule::GaussKronrod61.points(), 61);
    }

    #[test]
    fn test_polynomial_exact_single_interval() {
        // Degree-39 Gauss part: x^30 integrates exactly on the first pass.
        let r = integrate(
            |x| x.powi(30),
            0.0,
            1.0,
            0.0,
            1e-12,
            QuadratureRule::GaussKronrod41,
            &mut ws(),
        );
        assert!(r.is_converged());
        assert!((r.value - 1.0 / 31.0).abs() < 1e-14, "value = {}", r.value);
        assert_eq!(r.subdivisions, 1);
    }

    #[test]
    fn test_sine_integral() {
        let r = integrate(
            f64::sin,
            0.0,
            std::f64::consts::PI,
            0.0,
            1e-10,
            QuadratureRule::GaussKronrod61,
            &mut ws(),
        );
        assert!(r.is_converged());
        assert!((r.value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_reversed_bounds_flip_sign() {
        let mut w = ws();
        let fwd = integrate(f64::exp, 0.0, 1.0, 0.0, 1e-10, QuadratureRule::GaussKronrod41, &mut w);
        let bwd = integrate(f64::exp, 1.0, 0.0, 0.0, 1e-10, QuadratureRule::GaussKronrod41, &mut w);
        assert!((fwd.value + bwd.value).abs() < 1e-13);
    }

    #[test]
    fn test_large_surrogate_infinity() {
        // ∫_0^∞ dr / (1 + r)^2 = 1, with 1e100 standing in for ∞.
        let mut w = QuadratureWorkspace::new(4096);
        let r = integrate(
            |x| 1.0 / ((1.0 + x) * (1.0 + x)),
            0.0,
            1e100,
            0.0,
            1e-6,
            QuadratureRule::GaussKronrod61,
            &mut w,
        );
        assert!(r.is_converged(), "status = {:?}", r.status);
        assert!((r.value - 1.0).abs() < 1e-5, "value = {}", r.value);
        assert!(r.subdivisions > 1);
    }

    #[test]
    fn test_integrable_singularity_adapts() {
        // ∫_0^1 x^{-1/2} dx = 2
        let r = integrate(
            |x| if x > 0.0 { 1.0 / x.sqrt() } else { 0.0 },
            0.0,
            1.0,
            0.0,
            1e-6,
            QuadratureRule::GaussKronrod41,
            &mut ws(),
        );
        assert!((r.value - 2.0).abs() < 1e-5, "value = {}", r.value);
        assert!(r.subdivisions > 1);
    }

    #[test]
    fn test_budget_exhaustion_is_soft() {
        // Oscillatory integrand cannot meet 1e-14 in two intervals.
        let mut w = QuadratureWorkspace::new(2);
        let r = integrate(
            |x| (50.0 * x).sin() * x.exp(),
            0.0,
            10.0,
            0.0,
            1e-14,
            QuadratureRule::GaussKronrod41,
            &mut w,
        );
        assert_ne!(r.status, QuadratureStatus::Converged);
        assert!(r.value.is_finite());
        assert!(r.abs_error > 0.0);
    }

    #[test]
    fn test_zero_integrand() {
        let r = integrate(|_| 0.0, 0.0, 5.0, 0.0, 1e-6, QuadratureRule::GaussKronrod41, &mut ws());
        assert!(r.is_converged());
        assert_eq!(r.value, 0.0);
    }
}
