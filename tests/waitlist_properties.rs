//! Property tests for the waitlist engine
//!
//! Random operation sequences check the queue and inventory rules that must
//! hold in every reachable state.

use proptest::prelude::*;
use seating_waitlist::waitlist::WaitlistEngine;
use seating_waitlist::WaitlistError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Add(u32),
    CallNext,
    Cancel(usize),
    Free(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..=8).prop_map(Op::Add),
        Just(Op::CallNext),
        (0usize..10).prop_map(Op::Cancel),
        (1u32..=8).prop_map(Op::Free),
    ]
}

fn tables_strategy() -> impl Strategy<Value = BTreeMap<u32, u32>> {
    prop::collection::btree_map(1u32..=8, 0u32..=3, 1..4)
}

fn free_counts(engine: &WaitlistEngine) -> BTreeMap<u32, u32> {
    engine
        .table_counts()
        .into_iter()
        .map(|count| (count.capacity, count.free))
        .collect()
}

fn expected_estimate(engine: &WaitlistEngine, party_size: u32, turnover: u64) -> u64 {
    let count = engine
        .waitlist_snapshot()
        .iter()
        .filter(|entry| entry.party_size <= party_size)
        .count() as i64;
    let free = free_counts(engine)
        .range(party_size..)
        .next()
        .map(|(_, free)| *free as i64)
        .unwrap_or(0);
    (count - free).max(0) as u64 * turnover
}

proptest! {
    #[test]
    fn served_in_arrival_order(sizes in prop::collection::vec(1u32..=6, 1..30)) {
        let n = sizes.len() as u32;
        let mut engine = WaitlistEngine::with_tables([(2, n), (4, n), (6, n)], 30).unwrap();
        for (i, size) in sizes.iter().enumerate() {
            engine.add_client(format!("client_{}", i), *size, "19:00").unwrap();
        }

        for i in 0..sizes.len() {
            let assignment = engine.call_next_table().unwrap();
            prop_assert_eq!(assignment.client.name, format!("client_{}", i));
        }
        prop_assert_eq!(engine.call_next_table(), Err(WaitlistError::EmptyQueue));
    }

    #[test]
    fn assigns_smallest_sufficient_capacity(
        capacities in prop::collection::btree_set(1u32..=10, 1..5),
        party_size in 1u32..=12,
    ) {
        let mut engine =
            WaitlistEngine::with_tables(capacities.iter().map(|c| (*c, 1)), 30).unwrap();
        engine.add_client("guest", party_size, "19:00").unwrap();

        let smallest = capacities.iter().copied().find(|c| *c >= party_size);
        match (engine.call_next_table(), smallest) {
            (Ok(assignment), Some(expected)) => {
                prop_assert!(assignment.capacity >= party_size);
                prop_assert_eq!(assignment.capacity, expected);
            }
            (Err(WaitlistError::NoTableAvailable { .. }), None) => {
                prop_assert_eq!(engine.len(), 1);
            }
            (other, expected) => {
                prop_assert!(false, "unexpected {:?} for expected {:?}", other, expected);
            }
        }
    }

    #[test]
    fn cancellation_preserves_order(
        sizes in prop::collection::vec(1u32..=6, 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut engine = WaitlistEngine::default();
        let names: Vec<String> = (0..sizes.len()).map(|i| format!("client_{}", i)).collect();
        for (name, size) in names.iter().zip(&sizes) {
            engine.add_client(name.clone(), *size, "19:00").unwrap();
        }

        let victim = pick.index(names.len());
        engine.cancel_reservation(&names[victim]).unwrap();

        let mut expected = names.clone();
        expected.remove(victim);
        let remaining: Vec<String> =
            engine.waitlist_snapshot().into_iter().map(|e| e.name).collect();
        prop_assert_eq!(remaining, expected);
    }

    #[test]
    fn inventory_and_estimates_stay_consistent(
        tables in tables_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let turnover = 30;
        let mut engine = WaitlistEngine::with_tables(tables.clone(), turnover).unwrap();
        let mut next_id = 0usize;

        for op in ops {
            let before = free_counts(&engine);
            let queue_before = engine.len();

            match op {
                Op::Add(size) => {
                    engine.add_client(format!("client_{}", next_id), size, "19:00").unwrap();
                    next_id += 1;
                    prop_assert_eq!(free_counts(&engine), before);
                }
                Op::CallNext => match engine.call_next_table() {
                    Ok(assignment) => {
                        prop_assert!(assignment.capacity >= assignment.client.party_size);
                        prop_assert!(before[&assignment.capacity] > 0);
                        prop_assert_eq!(
                            free_counts(&engine)[&assignment.capacity],
                            before[&assignment.capacity] - 1
                        );
                        prop_assert_eq!(engine.len(), queue_before - 1);
                    }
                    Err(_) => {
                        prop_assert_eq!(free_counts(&engine), before);
                        prop_assert_eq!(engine.len(), queue_before);
                    }
                },
                Op::Cancel(index) => {
                    let snapshot = engine.waitlist_snapshot();
                    let name = snapshot
                        .get(index)
                        .map(|entry| entry.name.clone())
                        .unwrap_or_else(|| "nobody".to_string());
                    let found = engine.cancel_reservation(&name).is_ok();
                    prop_assert_eq!(found, index < snapshot.len());
                    prop_assert_eq!(free_counts(&engine), before);
                }
                Op::Free(capacity) => {
                    let freed = engine.free_table(capacity);
                    prop_assert_eq!(freed, tables.contains_key(&capacity));
                    if freed {
                        prop_assert_eq!(free_counts(&engine)[&capacity], before[&capacity] + 1);
                    }
                }
            }

            for size in 1u32..=8 {
                prop_assert_eq!(
                    engine.estimate_wait_minutes(size),
                    expected_estimate(&engine, size, turnover)
                );
            }
        }
    }
}
