use super::*;
use crate::Arbitrary;
use crate::Energy;
use crate::Ground;
use crate::Mass;
use crate::Metric;
use crate::Point;
use crate::Signature;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;

/// Furthest a converged solve may sit above the true optimum, per unit of
/// the largest ground distance.
const SLACK: Energy = 2. * crate::EMD_EPSILON;
const TRIALS: usize = 64;

fn line() -> Ground<i64, i64, impl Fn(&i64, &i64) -> Energy> {
    Ground::from(|a: &i64, b: &i64| (a - b).abs() as Energy)
}
fn normalized(sig: Signature<Point>) -> Signature<Point> {
    let mass = sig.mass();
    sig.scale(1. / mass)
}

/// Five suppliers, six consumers and costs around 10⁹ on which a zero
/// tolerance lets round-off drive Dantzig's rule around a cycle of
/// degenerate pivots forever.
fn cycling() -> (Vec<(usize, Mass)>, Vec<(usize, Mass)>, Ground<usize, usize, impl Fn(&usize, &usize) -> Energy>) {
    const COST: [[Energy; 6]; 5] = [
        [1700000000.1, 700000000.1, 1000000000.1, 1000000000.7, 1100000000.7, 1100000000.3],
        [900000000.0, 1100000000.3, 1100000000.1, 1700000000.7, 1100000000.1, 700000000.1],
        [1300000000.7, 1100000000.3, 1700000000.0, 900000000.3, 1700000000.0, 700000000.1],
        [1700000000.3, 700000000.7, 1000000000.7, 1700000000.1, 1100000000.3, 1000000000.7],
        [900000000.3, 900000000.3, 1700000000.7, 1300000000.1, 700000000.7, 1300000000.7],
    ];
    let source = vec![0.3, 0.1, 0.3, 0.1, 0.1].into_iter().enumerate().collect();
    let target = vec![0.3, 0.2, 0.1, 0.3, 0.1, 0.1].into_iter().enumerate().collect();
    (source, target, Ground::from(|i: &usize, j: &usize| COST[*i][*j]))
}

// ============================================================================
// KNOWN VALUES
// ============================================================================

#[test]
fn single_bins_cost_their_distance() {
    let p = Signature::from(vec![(Point::from([0., 0.]), 1.)]);
    let q = Signature::from(vec![(Point::from([3., 4.]), 1.)]);
    let plan = Simplex::from((&p, &q, &Metric::Euclidean))
        .minimize()
        .expect("solvable");
    assert!(plan.distance() == 5.);
    assert!(plan.iterations() == 0);
}
#[test]
fn two_bins_move_the_surplus() {
    let p: Vec<(i64, Mass)> = vec![(0, 0.6), (1, 0.4)];
    let q: Vec<(i64, Mass)> = vec![(0, 0.4), (1, 0.6)];
    let d = emd(&p, &q, &line()).expect("solvable");
    assert!((d - 0.2).abs() < 1e-9, "{}", d);
}
#[test]
fn lighter_side_is_fully_moved() {
    let p: Vec<(i64, Mass)> = vec![(0, 0.5)];
    let q: Vec<(i64, Mass)> = vec![(1, 1.), (5, 1.)];
    let plan = Simplex::from((&p, &q, &line())).minimize().expect("solvable");
    assert!(plan.mass() == 0.5);
    assert!((plan.distance() - 1.).abs() < 1e-12);
    assert!(plan.flows().count() == 1);
}
#[test]
fn heavier_source_leaves_mass_behind() {
    let p: Vec<(i64, Mass)> = vec![(0, 3.)];
    let q: Vec<(i64, Mass)> = vec![(2, 7.)];
    assert!(emd(&p, &q, &line()).expect("solvable") == 2.);
    assert!(emd(&q, &p, &line()).expect("solvable") == 2.);
}
#[test]
fn maps_and_lists_are_interchangeable() {
    let btree: BTreeMap<i64, Mass> = BTreeMap::from([(0, 0.6), (1, 0.4)]);
    let hash: HashMap<i64, Mass> = HashMap::from([(0, 0.4), (1, 0.6)]);
    let d = emd(&btree, &hash, &line()).expect("solvable");
    assert!((d - 0.2).abs() < 1e-9);
}
#[test]
fn large_costs_converge_with_tolerance() {
    let (p, q, ref ground) = cycling();
    let plan = Simplex::from((&p, &q, ground)).minimize().expect("solvable");
    let want = 833333333.6666667;
    assert!((plan.distance() - want).abs() / want < 1e-5, "{}", plan.distance());
}
#[test]
fn zero_tolerance_cycles_until_the_cap() {
    let (p, q, ref ground) = cycling();
    for cap in [50, 500] {
        let config = Config::default().epsilon(0.).iterations(cap);
        let result = Simplex::from((&p, &q, ground)).config(config).minimize();
        match result {
            Err(EmdError::Convergence { iterations }) => assert!(iterations == cap),
            other => panic!("expected convergence failure, got {:?}", other.map(|p| p.distance())),
        }
    }
}
#[test]
fn cap_admits_an_optimum_on_its_last_pivot() {
    let (p, q, ref ground) = cycling();
    let plan = Simplex::from((&p, &q, ground))
        .config(Config::default().iterations(3))
        .minimize()
        .expect("optimal on the third pivot");
    assert!(plan.iterations() == 3);
    let result = Simplex::from((&p, &q, ground))
        .config(Config::default().iterations(2))
        .minimize();
    assert!(matches!(result, Err(EmdError::Convergence { iterations: 2 })));
}

// ============================================================================
// METRIC PROPERTIES
// ============================================================================

#[test]
fn identical_signatures_are_zero_apart() {
    for _ in 0..TRIALS {
        let p = Signature::<Point>::random();
        let d = emd(&p, &p, &Metric::Euclidean).expect("solvable");
        assert!(d >= 0. && d <= SLACK * 2f64.sqrt(), "{}", d);
    }
}
#[test]
fn distance_is_bounded_by_ground_distances() {
    for _ in 0..TRIALS {
        let p = Signature::<Point>::random();
        let q = Signature::<Point>::random();
        let d = emd(&p, &q, &Metric::Euclidean).expect("solvable");
        assert!(d >= 0.);
        assert!(d <= 2f64.sqrt() + SLACK);
    }
}
#[test]
fn weights_are_scale_invariant() {
    for _ in 0..TRIALS {
        let p = Signature::<Point>::random();
        let q = Signature::<Point>::random();
        let d = emd(&p, &q, &Metric::Euclidean).expect("solvable");
        let scaled = emd(&p.clone().scale(3.), &q.clone().scale(3.), &Metric::Euclidean)
            .expect("solvable");
        assert!((d - scaled).abs() < 2. * SLACK * 2f64.sqrt(), "{} != {}", d, scaled);
    }
}
#[test]
fn transposing_preserves_distance() {
    for _ in 0..TRIALS {
        let p = Signature::<Point>::random();
        let q = Signature::<Point>::random();
        let pq = emd(&p, &q, &Metric::Manhattan).expect("solvable");
        let qp = emd(&q, &p, &Metric::Manhattan).expect("solvable");
        assert!((pq - qp).abs() < 2. * SLACK * 2., "{} != {}", pq, qp);
    }
}
#[test]
fn bin_order_does_not_matter() {
    for _ in 0..TRIALS {
        let p = Signature::<Point>::random();
        let q = Signature::<Point>::random();
        let reversed = p.iter().rev().cloned().collect::<Signature<Point>>();
        let forward = emd(&p, &q, &Metric::Chebyshev).expect("solvable");
        let backward = emd(&reversed, &q, &Metric::Chebyshev).expect("solvable");
        assert!((forward - backward).abs() < 2. * SLACK, "{} != {}", forward, backward);
    }
}
#[test]
fn normalized_signatures_obey_triangle_inequality() {
    for _ in 0..TRIALS {
        let p = normalized(Signature::<Point>::random());
        let q = normalized(Signature::<Point>::random());
        let r = normalized(Signature::<Point>::random());
        let pq = emd(&p, &q, &Metric::Euclidean).expect("solvable");
        let qr = emd(&q, &r, &Metric::Euclidean).expect("solvable");
        let pr = emd(&p, &r, &Metric::Euclidean).expect("solvable");
        assert!(pr <= pq + qr + 3. * SLACK * 2f64.sqrt());
    }
}
#[test]
fn one_dimensional_distance_matches_cdf_gap() {
    const N: usize = 8;
    let weights = || {
        let raw = (0..N).map(|_| 1. - rand::random::<Mass>()).collect::<Vec<_>>();
        let total = raw.iter().sum::<Mass>();
        raw.into_iter().map(|w| w / total).collect::<Vec<_>>()
    };
    for _ in 0..TRIALS {
        let (wp, wq) = (weights(), weights());
        let mut gap: Energy = 0.;
        let (mut fp, mut fq): (Mass, Mass) = (0., 0.);
        for k in 0..N - 1 {
            fp += wp[k];
            fq += wq[k];
            gap += (fp - fq).abs();
        }
        let p = (0..N as i64).zip(wp).collect::<Signature<i64>>();
        let q = (0..N as i64).zip(wq).collect::<Signature<i64>>();
        let d = emd(&p, &q, &line()).expect("solvable");
        assert!((d - gap).abs() < SLACK * N as Energy + 1e-9, "{} != {}", d, gap);
    }
}

// ============================================================================
// PLANS AND TRACES
// ============================================================================

#[test]
fn plan_respects_marginals() {
    for _ in 0..TRIALS {
        let p = Signature::<Point>::random();
        let q = Signature::<Point>::random();
        let plan = Simplex::from((&p, &q, &Metric::Euclidean))
            .minimize()
            .expect("solvable");
        let mut rows = vec![0.; p.len()];
        let mut cols = vec![0.; q.len()];
        for cell in plan.cells() {
            assert!(cell.flow > 0.);
            rows[cell.row] += cell.flow;
            cols[cell.col] += cell.flow;
        }
        for (flow, (_, weight)) in rows.iter().zip(p.iter()) {
            assert!(*flow <= weight + 1e-9);
        }
        for (flow, (_, weight)) in cols.iter().zip(q.iter()) {
            assert!(*flow <= weight + 1e-9);
        }
        let moved = plan.flows().map(|(_, _, m)| m).sum::<Mass>();
        assert!((moved - plan.mass()).abs() < 1e-9);
        assert!((plan.mass() - p.mass().min(q.mass())).abs() < 1e-12);
    }
}
#[test]
fn every_pivot_conserves_flow() {
    for _ in 0..TRIALS {
        let p = Signature::<Point>::random();
        let q = Signature::<Point>::random();
        let mut recorder = Recorder::default();
        let plan = Simplex::from((&p, &q, &Metric::Euclidean))
            .config(Config::default().verbosity(Verbosity::Full))
            .sink(&mut recorder)
            .minimize()
            .expect("solvable");
        let events = recorder.into_events();
        let Some(Event::Balanced { supply, demand, .. }) = events.first() else {
            panic!("balanced marginals come first");
        };
        let pivots = events
            .iter()
            .filter(|e| matches!(e, Event::Pivot { .. }))
            .count();
        assert!(pivots == plan.iterations());
        for event in events.iter() {
            let Event::Solution { cells, .. } = event else {
                continue;
            };
            assert!(cells.len() == supply.len() + demand.len() - 1);
            let mut rows = vec![0.; supply.len()];
            let mut cols = vec![0.; demand.len()];
            for cell in cells {
                assert!(cell.flow >= 0.);
                rows[cell.row] += cell.flow;
                cols[cell.col] += cell.flow;
            }
            for (flow, want) in rows.iter().zip(supply).chain(cols.iter().zip(demand)) {
                assert!((flow - want).abs() < 1e-9, "{} != {}", flow, want);
            }
        }
        assert!(matches!(events.last(), Some(Event::Solution { last: true, .. })));
    }
}
#[test]
fn trace_levels_are_cumulative() {
    let (p, q, ref ground) = cycling();
    let count = |verbosity| {
        let mut recorder = Recorder::default();
        Simplex::from((&p, &q, ground))
            .config(Config::default().verbosity(verbosity))
            .sink(&mut recorder)
            .minimize()
            .expect("solvable");
        recorder.into_events().len()
    };
    let counts = [
        Verbosity::None,
        Verbosity::Low,
        Verbosity::Medium,
        Verbosity::High,
        Verbosity::Full,
    ]
    .map(count);
    assert!(counts[0] == 0);
    assert!(counts[1] == 1);
    assert!(counts.windows(2).all(|w| w[0] < w[1]));
}
#[test]
fn events_serialize_with_their_kind() {
    let event = Event::Candidate {
        iteration: 3,
        candidate: Candidate {
            row: 1,
            col: 2,
            delta: -0.5,
        },
    };
    let json = serde_json::to_value(&event).expect("serializable");
    assert!(json["event"] == "candidate");
    assert!(json["candidate"]["col"] == 2);
}
#[test]
fn logging_sink_leaves_the_result_alone() {
    let (p, q, ref ground) = cycling();
    let quiet = Simplex::from((&p, &q, ground)).minimize().expect("solvable");
    let logged = Simplex::from((&p, &q, ground))
        .config(Config::default().verbosity(Verbosity::Full))
        .sink(&mut Logger)
        .minimize()
        .expect("solvable");
    assert!(logged.distance() == quiet.distance());
    assert!(logged.iterations() == quiet.iterations());
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn rejects_unusable_inputs_before_solving() {
    let good: Vec<(i64, Mass)> = vec![(0, 1.)];
    let cases: Vec<Vec<(i64, Mass)>> = vec![
        vec![],
        vec![(0, -1.), (1, 2.)],
        vec![(0, Mass::NAN)],
        vec![(0, Mass::INFINITY)],
        vec![(0, 0.), (1, 0.)],
    ];
    for bad in cases.iter() {
        for (p, q) in [(bad, &good), (&good, bad)] {
            let mut recorder = Recorder::default();
            let result = Simplex::from((p, q, &line()))
                .config(Config::default().verbosity(Verbosity::Full))
                .sink(&mut recorder)
                .minimize();
            assert!(matches!(result, Err(EmdError::Configuration(_))));
            assert!(recorder.events().is_empty());
        }
    }
}
#[test]
fn rejects_unusable_distances() {
    let p: Vec<(i64, Mass)> = vec![(0, 1.)];
    let q: Vec<(i64, Mass)> = vec![(1, 1.)];
    for distance in [-1., Energy::NAN, Energy::INFINITY] {
        let ground = Ground::from(move |_: &i64, _: &i64| distance);
        assert!(matches!(emd(&p, &q, &ground), Err(EmdError::Configuration(_))));
    }
}
#[test]
fn mismatched_dimensions_are_rejected() {
    let p = Signature::from(vec![(Point::from([0., 0.]), 1.)]);
    let q = Signature::from(vec![(Point::from([3., 4., 12.]), 1.)]);
    for metric in [Metric::Euclidean, Metric::Manhattan, Metric::Chebyshev] {
        assert!(matches!(emd(&p, &q, &metric), Err(EmdError::Configuration(_))));
    }
}
#[test]
fn rejects_unusable_config() {
    let p: Vec<(i64, Mass)> = vec![(0, 1.)];
    let config = Config::default().iterations(0);
    let result = Simplex::from((&p, &p, &line())).config(config).minimize();
    assert!(matches!(result, Err(EmdError::Configuration(_))));
}
#[test]
fn raised_interrupt_abandons_solve() {
    let (p, q, ref ground) = cycling();
    let flag = AtomicBool::new(true);
    let result = Simplex::from((&p, &q, ground)).interrupt(&flag).minimize();
    assert!(matches!(result, Err(EmdError::Interrupted { iteration: 0 })));
}

// ============================================================================
// CONCURRENCY
// ============================================================================

#[test]
fn parallel_solves_agree_with_serial() {
    use rayon::prelude::*;
    let pairs = (0..TRIALS)
        .map(|_| (Signature::<Point>::random(), Signature::<Point>::random()))
        .collect::<Vec<_>>();
    let serial = pairs
        .iter()
        .map(|(p, q)| emd(p, q, &Metric::Euclidean).expect("solvable"))
        .collect::<Vec<_>>();
    let parallel = pairs
        .par_iter()
        .map(|(p, q)| emd(p, q, &Metric::Euclidean).expect("solvable"))
        .collect::<Vec<_>>();
    assert!(serial == parallel);
}
