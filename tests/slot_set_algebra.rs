use egui_annotate::SlotSet;

const DOMAIN: usize = 6;

// Every subset of 0..DOMAIN, as a bit mask and the matching set
fn all_subsets() -> Vec<(u32, SlotSet)> {
    (0..1u32 << DOMAIN)
        .map(|mask| {
            let slots = (0..DOMAIN).filter(|i| mask & (1 << i) != 0).collect();
            (mask, SlotSet::from_sorted(slots))
        })
        .collect()
}

fn from_mask(mask: u32) -> SlotSet {
    SlotSet::from_sorted((0..DOMAIN).filter(|i| mask & (1 << i) != 0).collect())
}

fn is_strictly_increasing(set: &SlotSet) -> bool {
    set.as_slice().windows(2).all(|w| w[0] < w[1])
}

#[test]
fn test_operations_match_bitwise_reference() {
    let subsets = all_subsets();
    for (ma, a) in &subsets {
        for (mb, b) in &subsets {
            let union = a.union(b);
            let intersection = a.intersection(b);
            let minus = a.minus(b);

            assert_eq!(union, from_mask(ma | mb), "{:?} | {:?}", a, b);
            assert_eq!(intersection, from_mask(ma & mb), "{:?} & {:?}", a, b);
            assert_eq!(minus, from_mask(ma & !mb), "{:?} - {:?}", a, b);

            assert!(is_strictly_increasing(&union));
            assert!(is_strictly_increasing(&intersection));
            assert!(is_strictly_increasing(&minus));
        }
    }
}

#[test]
fn test_complement_is_an_involution() {
    for (mask, set) in all_subsets() {
        let complement = set.complement(DOMAIN);
        assert_eq!(complement, from_mask(!mask & ((1 << DOMAIN) - 1)));
        assert_eq!(complement.complement(DOMAIN), set);
    }
}

#[test]
fn test_set_identities() {
    for (_, set) in all_subsets() {
        assert!(set.minus(&set).is_empty());
        assert_eq!(set.union(&SlotSet::new()), set);
        assert!(set.intersection(&SlotSet::new()).is_empty());
        assert_eq!(set.union(&set.complement(DOMAIN)), SlotSet::all(DOMAIN));
    }
}

#[test]
fn test_union_of_disjoint_runs() {
    let a = SlotSet::from_sorted(vec![0, 2, 4]);
    let b = SlotSet::from_sorted(vec![1, 3, 5, 7]);
    assert_eq!(a.union(&b).as_slice(), &[0, 1, 2, 3, 4, 5, 7]);
    assert_eq!(a.intersection(&b), SlotSet::new());
}

#[test]
fn test_from_unsorted_sorts_and_dedups() {
    let set = SlotSet::from_unsorted(vec![5, 1, 3, 1, 5]);
    assert_eq!(set.as_slice(), &[1, 3, 5]);
    assert_eq!(set.first(), Some(1));
    assert_eq!(set.last(), Some(5));
    assert!(set.contains(3));
    assert!(!set.contains(2));
}

#[test]
fn test_unsorted_input_is_rejected() {
    assert!(SlotSet::try_from(vec![2, 1]).is_err());
    assert!(SlotSet::try_from(vec![1, 1]).is_err());
    assert!(SlotSet::try_from(vec![1, 2]).is_ok());
}

#[test]
#[should_panic]
fn test_from_sorted_panics_on_duplicates() {
    let _ = SlotSet::from_sorted(vec![0, 3, 3]);
}

#[test]
#[should_panic]
fn test_complement_panics_on_stale_slot() {
    let _ = SlotSet::from_sorted(vec![1, 9]).complement(4);
}

#[test]
fn test_serde_rejects_unsorted_sequence() {
    let set: SlotSet = serde_json::from_str("[0, 4, 7]").unwrap();
    assert_eq!(set.as_slice(), &[0, 4, 7]);
    assert_eq!(serde_json::to_string(&set).unwrap(), "[0,4,7]");
    assert!(serde_json::from_str::<SlotSet>("[4, 0]").is_err());
}
