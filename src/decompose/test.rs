use proptest::prelude::*;
use similar_asserts::assert_eq;

use super::*;

fn events(alpha: &str, beta: &str) -> Vec<Event> {
    PermutationPair::from_str62(alpha, beta)
        .unwrap()
        .events()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn rendered(alpha: &str, beta: &str) -> String {
    events(alpha, beta).iter().join(" ")
}

/// 7-cycle and a transposition: they generate the full symmetric group.
fn seven() -> PermutationPair {
    PermutationPair::from_str62("1234560", "1023456").unwrap()
}

#[test]
fn test_empty() {
    assert_eq!(events("", ""), Vec::<Event>::new());
    assert_eq!(PermutationPair::id(0).component_degrees().unwrap(), Vec::<usize>::new());
}

#[test]
fn test_single_edge() {
    assert_eq!(
        events("0", "0"),
        vec![
            Event::Start(0),
            Event::Cycle(Side::Alpha, vec![0]),
            Event::Cycle(Side::Beta, vec![0]),
            Event::End(0),
        ]
    );
}

#[test]
fn test_two_fixed_edges() {
    insta::assert_snapshot!(rendered("01", "01"), @"S0 a(0) b(0) E0 S1 a(1) b(1) E1");
}

#[test]
fn test_swap() {
    assert_eq!(
        events("10", "10"),
        vec![
            Event::Start(0),
            Event::Cycle(Side::Alpha, vec![0, 1]),
            Event::Cycle(Side::Beta, vec![0, 1]),
            Event::End(0),
        ]
    );
}

#[test]
fn test_three_cycles() {
    assert_eq!(
        events("120", "201"),
        vec![
            Event::Start(0),
            Event::Cycle(Side::Alpha, vec![0, 1, 2]),
            Event::Cycle(Side::Beta, vec![0, 2, 1]),
            Event::End(0),
        ]
    );
}

#[test]
fn test_beta_identity() {
    assert_eq!(
        events("120", "012"),
        vec![
            Event::Start(0),
            Event::Cycle(Side::Alpha, vec![0, 1, 2]),
            Event::Cycle(Side::Beta, vec![0]),
            Event::Cycle(Side::Beta, vec![1]),
            Event::Cycle(Side::Beta, vec![2]),
            Event::End(0),
        ]
    );
}

#[test]
fn test_alpha_identity() {
    insta::assert_snapshot!(rendered("012", "201"), @"S0 a(0) b(0 2 1) a(1) a(2) E0");
}

#[test]
fn test_alternation_picks_smallest_outstanding() {
    // α = (0 3)(1)(2), β = (0)(1 3)(2): one component {0, 1, 3} and a loose edge 2.
    insta::assert_snapshot!(
        rendered("3120", "0321"),
        @"S0 a(0 3) b(0) b(3 1) a(1) E0 S1 a(2) b(2) E1"
    );
}

#[test]
fn test_product_of_sevens() {
    let a = seven();
    let aa = (&a * &a).unwrap();
    assert_eq!(aa.len(), 49);

    let components = aa.components().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(
        components.iter().map(Component::degree).collect::<Vec<_>>(),
        vec![7, 42]
    );
    // The diagonal is its own component.
    assert_eq!(
        components[0].edges(),
        (0..7).map(|i| i * 7 + i).collect::<Vec<_>>()
    );
    assert_eq!(components[1].seed, 1);
}

#[test]
fn test_early_abort() {
    let pair = PermutationPair::id(1000);
    let mut components = pair.components();
    let first = components.next().unwrap().unwrap();
    assert_eq!(first.edges(), vec![0]);
    assert_eq!(components.decomposer.component_count(), 1);
    assert_eq!(components.decomposer.seen().count_ones(), 1);
}

#[test]
fn test_protocol_misuse() {
    let pair = PermutationPair::from_str62("10", "10").unwrap();
    let mut decomposer = Decomposer::new(&pair);

    assert_eq!(
        decomposer.next_cycle(),
        Err(DessinError::State {
            expected: "cycle",
            found: "component"
        })
    );

    decomposer.next_component().unwrap().unwrap();
    assert!(matches!(
        decomposer.next_component(),
        Err(DessinError::State { .. })
    ));

    // Misuse does not disturb the run.
    assert_eq!(
        decomposer.next_cycle().unwrap(),
        Some((Side::Alpha, vec![0, 1]))
    );
    assert_eq!(
        decomposer.next_cycle().unwrap(),
        Some((Side::Beta, vec![0, 1]))
    );
    assert_eq!(decomposer.next_cycle().unwrap(), None);
    assert_eq!(decomposer.next_component().unwrap(), None);
    assert_eq!(decomposer.next_component().unwrap(), None);
}

#[test]
fn test_malformed_input_is_inconsistent() {
    let pair = PermutationPair::new(Permutation::from_map(vec![1, 1]), Permutation::id(2)).unwrap();
    let mut events = pair.events();

    assert_eq!(events.next(), Some(Ok(Event::Start(0))));
    assert!(matches!(
        events.next(),
        Some(Err(DessinError::StateInconsistency(_)))
    ));
    assert_eq!(events.next(), None);
}

#[test]
fn test_is_connected() {
    assert!(seven().is_connected().unwrap());
    assert!(!PermutationPair::id(2).is_connected().unwrap());
    assert!(PermutationPair::id(0).is_connected().unwrap());
}

fn perm(n: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..n).collect::<Vec<usize>>()).prop_shuffle()
}

prop_compose! {
    fn pair()(n in 0usize..16)(alpha in perm(n), beta in perm(n)) -> PermutationPair {
        PermutationPair::from_maps(alpha, beta).unwrap()
    }
}

proptest! {
    #[test]
    fn events_are_well_nested(pair in pair()) {
        let events = pair.events().collect::<Result<Vec<_>, _>>().unwrap();
        let mut open = None;
        let mut next_index = 0;
        for event in &events {
            match event {
                Event::Start(i) => {
                    prop_assert_eq!(open, None);
                    prop_assert_eq!(*i, next_index);
                    open = Some(*i);
                }
                Event::Cycle(..) => prop_assert!(open.is_some()),
                Event::End(i) => {
                    prop_assert_eq!(open, Some(*i));
                    open = None;
                    next_index += 1;
                }
            }
        }
        prop_assert_eq!(open, None);
    }

    #[test]
    fn every_edge_once_per_side(pair in pair()) {
        let mut counts = [vec![0; pair.len()], vec![0; pair.len()]];
        for event in pair.events() {
            if let Event::Cycle(side, cycle) = event.unwrap() {
                prop_assert_eq!(&pair.perm(side).cycle(cycle[0]).unwrap(), &cycle);
                for edge in cycle {
                    counts[side.index()][edge] += 1;
                }
            }
        }
        prop_assert!(counts.iter().flatten().all(|&c| c == 1));
    }

    #[test]
    fn components_are_closed(pair in pair()) {
        for component in pair.components() {
            let component = component.unwrap();
            let alpha_edges = component.edges();
            let beta_edges = component
                .cycles(Side::Beta)
                .iter()
                .flatten()
                .copied()
                .sorted()
                .collect::<Vec<_>>();
            prop_assert_eq!(&alpha_edges, &beta_edges);
            for &edge in &alpha_edges {
                prop_assert!(alpha_edges.binary_search(&pair.alpha(edge)).is_ok());
                prop_assert!(alpha_edges.binary_search(&pair.beta(edge)).is_ok());
            }
            prop_assert_eq!(alpha_edges.first().copied(), Some(component.seed));
        }
    }

    #[test]
    fn decomposition_is_deterministic(pair in pair()) {
        let first = pair.events().collect::<Vec<_>>();
        let second = pair.events().collect::<Vec<_>>();
        prop_assert_eq!(first, second);
    }
}
