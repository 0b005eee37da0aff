//! Integration tests for sl-graph.

use proptest::prelude::*;
use sl_core::CompId;
use sl_graph::{GraphError, Topology, hops_to_return, validate_closed_cycle};

/// Wire `n` components in list order and close the loop back to the first,
/// the same way a simulation closes its cycle.
fn closed_ring(n: usize) -> Topology {
    let mut topo = Topology::with_len(n);
    for i in 1..n {
        topo.attach(CompId::from_usize(i - 1), CompId::from_usize(i)).unwrap();
    }
    topo.attach(CompId::from_usize(n - 1), CompId::from_usize(0)).unwrap();
    topo
}

#[test]
fn six_component_loop() {
    // solar -> pipe -> pump -> pipe -> tank -> pipe -> (solar)
    let topo = closed_ring(6);
    assert!(validate_closed_cycle(&topo).is_ok());

    for id in topo.ids() {
        let next = topo.outlet(id).unwrap();
        assert_eq!(topo.inlet(next), Some(id));
    }
    let last = CompId::from_usize(5);
    assert_eq!(topo.outlet(last), Some(CompId::from_usize(0)));
}

#[test]
fn chain_without_closing_edge_is_open() {
    let mut topo = Topology::with_len(3);
    topo.attach(CompId::from_usize(0), CompId::from_usize(1)).unwrap();
    topo.attach(CompId::from_usize(1), CompId::from_usize(2)).unwrap();

    assert_eq!(
        validate_closed_cycle(&topo),
        Err(GraphError::OpenChain {
            comp: CompId::from_usize(2)
        })
    );
}

#[test]
fn rewiring_outlet_breaks_the_loop() {
    let mut topo = closed_ring(4);
    // skip component 2
    topo.attach(CompId::from_usize(1), CompId::from_usize(3)).unwrap();
    assert!(validate_closed_cycle(&topo).is_err());
}

proptest! {
    #[test]
    fn every_component_returns_after_len_hops(n in 1usize..40) {
        let topo = closed_ring(n);
        prop_assert!(validate_closed_cycle(&topo).is_ok());
        for id in topo.ids() {
            prop_assert_eq!(hops_to_return(&topo, id).unwrap(), n);
        }
    }

    #[test]
    fn traversal_order_follows_list_order(n in 2usize..40, start in 0usize..40) {
        let start = start % n;
        let topo = closed_ring(n);
        let order = topo.cycle_from(CompId::from_usize(start)).unwrap();
        for (k, id) in order.iter().enumerate() {
            prop_assert_eq!(id.as_usize(), (start + k) % n);
        }
    }
}
