use super::encoding::*;
use super::*;

#[test]
fn test_is_permutation() {
    // Every rearrangement of 0..n passes.
    for n in 0..5 {
        for item in (0..n).permutations(n) {
            assert!(is_permutation(&item), "{item:?}");
        }
    }

    assert!(!is_permutation(&[1]));
    assert!(!is_permutation(&[1, 1]));
    assert!(!is_permutation(&[0, 2]));
    assert!(is_permutation(&[]));
}

#[test]
fn test_try_from_map() {
    let p = Permutation::try_from_map(vec![2, 0, 1]).unwrap();
    assert_eq!(p.inv(), &[1, 2, 0]);

    assert_eq!(
        Permutation::try_from_map(vec![0, 0]),
        Err(DessinError::NotAPermutation(vec![0, 0]))
    );
    assert!(Permutation::try_from(vec![3, 0, 1]).is_err());
}

#[test]
fn test_cycle() {
    let p = Permutation::from_map(vec![1, 2, 0]);
    assert_eq!(p.cycle(0).unwrap(), vec![0, 1, 2]);
    assert_eq!(p.cycle(1).unwrap(), vec![1, 2, 0]);
    assert_eq!(p.cycle(2).unwrap(), vec![2, 0, 1]);

    assert_eq!(Permutation::id(1).cycle(0).unwrap(), vec![0]);
    assert!(matches!(
        Permutation::id(1).cycle(1),
        Err(DessinError::Domain { index: 1, max: 1 })
    ));
}

#[test]
fn test_cycle_infinite_loop_broken() {
    let p = Permutation::from_map(vec![1, 1]);
    assert_eq!(p.cycle(0), Err(DessinError::NotAPermutation(vec![1, 1])));
}

#[test]
fn test_find_cycles() {
    let p = Permutation::from_map(vec![2, 0, 1, 3]);
    assert_eq!(p.find_cycles(), vec![vec![0, 2, 1], vec![3]]);

    assert!(Permutation::id(0).find_cycles().is_empty());
}

#[test]
fn test_from_disjoint_cycles() {
    let cycles = vec![vec![0, 3, 2], vec![1, 4]];
    let p = Permutation::from_disjoint_cycles(&cycles).unwrap();
    assert_eq!(p.map(), &[3, 4, 0, 2, 1]);

    let cycles: Vec<Vec<usize>> = vec![];
    let p = Permutation::from_disjoint_cycles(&cycles).unwrap();
    assert!(p.map().is_empty());

    let p = Permutation::from_disjoint_cycles(&[vec![0]]).unwrap();
    assert_eq!(p.map(), &[0]);

    // Points missing from every cycle are fixed.
    let p = Permutation::from_disjoint_cycles(&[vec![3, 1]]).unwrap();
    assert_eq!(p.map(), &[0, 3, 2, 1]);
}

#[test]
fn test_find_cycles_round_trip_through_cycles() {
    let p = perm_from_str62("3214560").unwrap();
    let q = Permutation::from_disjoint_cycles(&p.find_cycles()).unwrap();
    assert_eq!(p, q);
}

#[test]
fn test_rebase_cycles() {
    assert_eq!(
        rebase_cycles(&[vec![9, 3, 7], vec![4]]),
        vec![vec![3, 0, 2], vec![1]]
    );
    let rebased = rebase_cycles(&[vec![10, 20], vec![15]]);
    let p = Permutation::from_disjoint_cycles(&rebased).unwrap();
    assert_eq!(p.map(), &[2, 1, 0]);
}

#[test]
fn test_compose_and_inverse() {
    let p = Permutation::from_map(vec![1, 2, 0]);
    let q = Permutation::from_map(vec![1, 0, 2]);
    assert_eq!(p.compose(&q).map(), &[2, 1, 0]);
    assert_eq!(q.compose(&p).map(), &[0, 2, 1]);
    assert!(p.compose(&p.inverse()).is_identity());
}

#[test]
fn test_cartesian_product() {
    let p = perm_from_str62("210").unwrap();
    let q = perm_from_str62("0123").unwrap();
    let pq = Permutation::cartesian_product(&[&p, &q]).unwrap();
    assert_eq!(str62_from_perm(&pq).unwrap(), "89ab45670123");

    // The identity of size one is a unit on either side.
    let one = Permutation::id(1);
    assert_eq!(Permutation::cartesian_product(&[&one, &p]).unwrap(), p);
    assert_eq!(Permutation::cartesian_product(&[&p, &one]).unwrap(), p);

    assert!(matches!(
        Permutation::cartesian_product(&[]),
        Err(DessinError::InvalidOperand(_))
    ));
}

#[test]
fn test_cartesian_product_three_factors() {
    let p = Permutation::from_map(vec![1, 0]);
    let q = Permutation::from_map(vec![1, 2, 0]);
    let r = Permutation::from_map(vec![1, 0]);
    let pqr = Permutation::cartesian_product(&[&p, &q, &r]).unwrap();

    assert_eq!(pqr.len(), 12);
    for (i, j, k) in itertools::iproduct!(0..2, 0..3, 0..2) {
        let image = pqr[i * 6 + j * 2 + k];
        assert_eq!(image, p[i] * 6 + q[j] * 2 + r[k]);
    }
    assert!(is_permutation(pqr.map()));
}

#[test]
fn test_radices() {
    assert_eq!(
        Permutation::radices(&[3, 4, 5]),
        Some((vec![20, 5, 1], 60))
    );
    assert_eq!(Permutation::radices(&[usize::MAX, 2]), None);
}

#[test]
fn test_display() {
    let p = Permutation::from_map(vec![2, 0, 1, 3]);
    insta::assert_snapshot!(p.to_string(), @"(0 2 1) [2 0 1 3]");
    insta::assert_snapshot!(Permutation::id(3).to_string(), @"() [0 1 2]");
}

#[test]
fn test_base62() {
    let seq = digits_from_str62("09azAZ").unwrap();
    assert_eq!(seq, vec![0, 9, 10, 35, 36, 61]);
    assert_eq!(str62_from_digits(&seq).unwrap(), "09azAZ");

    assert_eq!(
        digits_from_str62("abc$"),
        Err(DessinError::Decode {
            input: "abc$".to_string(),
            position: 3
        })
    );
    // No wraparound past the end of the alphabet.
    assert!(str62_from_digits(&[62]).is_err());
}

#[test]
fn test_base36() {
    let p = perm_from_str36("1230").unwrap();
    assert_eq!(p.map(), &[1, 2, 3, 0]);
    assert_eq!(str36_from_perm(&p).unwrap(), "1230");

    assert!(perm_from_str36("1230A").is_err());
    assert!(perm_from_str36("1231").is_err());
}
