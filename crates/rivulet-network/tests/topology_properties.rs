//! Property tests: arbitrary sequences of add / remove / set_downstream
//! keep the network acyclic and consistent, and failed rewires leave it
//! untouched.

use proptest::prelude::*;
use rivulet_core::RiverId;
use rivulet_network::{NetworkError, River, RiverNetwork};

#[derive(Clone, Debug)]
enum Op {
    Add { id: i64, downstream: i64 },
    Remove { id: i64 },
    SetDownstream { id: i64, downstream: i64 },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1i64..16, 0i64..16).prop_map(|(id, downstream)| Op::Add { id, downstream }),
        1 => (1i64..16).prop_map(|id| Op::Remove { id }),
        3 => (1i64..16, 0i64..16)
            .prop_map(|(id, downstream)| Op::SetDownstream { id, downstream }),
    ]
}

fn apply(net: &mut RiverNetwork, op: &Op) -> Result<(), NetworkError> {
    match *op {
        Op::Add { id, downstream } => net
            .add(River::new(RiverId(id)).with_downstream(RiverId(downstream), 100.0))
            .map(|_| ()),
        Op::Remove { id } => net.remove(RiverId(id)).map(|_| ()),
        Op::SetDownstream { id, downstream } => {
            net.set_downstream(RiverId(id), RiverId(downstream))
        }
    }
}

/// A forest where river `i` drains into a river below `i`, or nowhere.
/// River 2 always drains into river 1.
fn arb_forest(max: usize) -> impl Strategy<Value = Vec<(i64, i64)>> {
    (2..=max).prop_flat_map(|n| {
        prop::collection::vec(0.0f64..1.0, n).prop_map(|picks| {
            picks
                .into_iter()
                .enumerate()
                .map(|(i, p)| {
                    let id = i as i64 + 1;
                    let downstream = if id == 2 { 1 } else { (p * id as f64) as i64 };
                    (id, downstream)
                })
                .collect()
        })
    })
}

fn forest(links: &[(i64, i64)]) -> RiverNetwork {
    RiverNetwork::from_rivers(
        links
            .iter()
            .map(|&(id, ds)| River::new(RiverId(id)).with_downstream(RiverId(ds), 100.0)),
    )
    .unwrap()
}

/// Every structural invariant observable through the public API.
fn assert_consistent(net: &RiverNetwork) {
    assert!(!net.has_cycle());
    let ids: Vec<RiverId> = net.ids().collect();
    for &id in &ids {
        let ds = net.downstream(id).unwrap();
        assert_ne!(ds, id);
        if !ds.is_none() {
            assert!(net.contains(ds), "{id} drains into unregistered {ds}");
            assert!(net.upstreams(ds).unwrap().contains(&id));
        }
        for up in net.upstreams(id).unwrap() {
            assert_eq!(net.downstream(up).unwrap(), id);
        }
    }
    assert_eq!(net.topological_order().len(), net.len());
}

/// Snapshot of the topology: (id, downstream, upstreams) per river.
fn topology(net: &RiverNetwork) -> Vec<(RiverId, RiverId, Vec<RiverId>)> {
    net.ids()
        .map(|id| {
            (
                id,
                net.downstream(id).unwrap(),
                net.upstreams(id).unwrap(),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn mutations_never_create_cycles(ops in prop::collection::vec(arb_op(), 1..80)) {
        let mut net = RiverNetwork::new();
        for op in &ops {
            let _ = apply(&mut net, op);
            assert_consistent(&net);
        }
    }

    #[test]
    fn failed_mutations_leave_topology_unchanged(
        ops in prop::collection::vec(arb_op(), 1..80),
    ) {
        let mut net = RiverNetwork::new();
        for op in &ops {
            let before = topology(&net);
            if apply(&mut net, op).is_err() {
                prop_assert_eq!(topology(&net), before);
            }
        }
    }

    #[test]
    fn failed_rewire_between_registered_rivers_is_atomic(
        links in arb_forest(16),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let mut net = forest(&links);
        let ids: Vec<RiverId> = net.ids().collect();
        let a = ids[a.index(ids.len())];
        let b = ids[b.index(ids.len())];
        let before = topology(&net);
        match net.set_downstream(a, b) {
            Ok(()) => {
                prop_assert_eq!(net.downstream(a).unwrap(), b);
                assert_consistent(&net);
            }
            Err(NetworkError::SelfLoop { id }) => {
                prop_assert_eq!(id, a);
                prop_assert_eq!(topology(&net), before);
            }
            Err(NetworkError::WouldCycle { .. }) => {
                prop_assert_eq!(topology(&net), before);
            }
            Err(e) => prop_assert!(false, "unexpected error {}", e),
        }
    }

    #[test]
    fn rewire_into_own_upstream_rolls_back(
        links in arb_forest(16),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let mut net = forest(&links);
        // River 1 always has river 2 upstream, so this is never empty.
        let with_upstreams: Vec<RiverId> = net
            .ids()
            .filter(|&id| !net.upstreams(id).unwrap().is_empty())
            .collect();
        let a = with_upstreams[a.index(with_upstreams.len())];
        let mut closure = net.upstream_closure(a).unwrap();
        closure.pop();
        let b = closure[b.index(closure.len())];

        let before = topology(&net);
        let prev = net.downstream(a).unwrap();
        let prev_ups = if prev.is_none() {
            Vec::new()
        } else {
            net.upstreams(prev).unwrap()
        };
        let b_ups = net.upstreams(b).unwrap();

        prop_assert_eq!(
            net.set_downstream(a, b),
            Err(NetworkError::WouldCycle { id: a, downstream: b })
        );
        prop_assert_eq!(net.downstream(a).unwrap(), prev);
        if !prev.is_none() {
            prop_assert_eq!(net.upstreams(prev).unwrap(), prev_ups);
        }
        prop_assert_eq!(net.upstreams(b).unwrap(), b_ups);
        prop_assert_eq!(topology(&net), before);
        assert_consistent(&net);
    }
}

#[test]
fn headwater_to_outlet_rewire_is_rejected() {
    let mut net = RiverNetwork::from_rivers(
        (1..=10).map(|i| River::new(RiverId(i)).with_downstream(RiverId(i - 1), 0.0)),
    )
    .unwrap();
    assert_eq!(
        net.set_downstream(RiverId(1), RiverId(10)),
        Err(NetworkError::WouldCycle {
            id: RiverId(1),
            downstream: RiverId(10)
        })
    );
    assert_consistent(&net);
    assert_eq!(net.terminals(), vec![RiverId(1)]);
}
