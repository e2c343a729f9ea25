use proptest::prelude::*;
use trellis_disclosure::{
    Change, Direction, Exclusivity, Group, GroupConfig, TriggerConfig, Variant,
};

const DEFAULT_PROPTEST_CASES: u32 = 256;

#[derive(Clone, Debug)]
enum Op {
    Activate(usize),
    Focus(usize),
    Blur,
    Key(usize, Direction),
    RawKey(usize, &'static str),
}

fn proptest_cases() -> u32 {
    std::env::var("TRELLIS_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_PROPTEST_CASES)
}

fn build(variant: Variant, n: usize) -> Group {
    Group::new(GroupConfig::new(
        "group",
        variant,
        (0..n)
            .map(|i| TriggerConfig::new(format!("trigger-{}", i), format!("panel-{}", i)))
            .collect(),
    ))
    .unwrap()
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Next),
        Just(Direction::Previous),
        Just(Direction::First),
        Just(Direction::Last),
    ]
}

// Indices deliberately run past the group size so InvalidIndex is exercised.
fn op_strategy(n: usize) -> impl Strategy<Value = Op> {
    let index = 0..n + 2;
    prop_oneof![
        index.clone().prop_map(Op::Activate),
        index.clone().prop_map(Op::Focus),
        Just(Op::Blur),
        (index.clone(), direction_strategy()).prop_map(|(i, d)| Op::Key(i, d)),
        (
            index,
            prop_oneof![
                Just("ArrowRight"),
                Just("ArrowDown"),
                Just("Home"),
                Just("Tab"),
            ]
        )
            .prop_map(|(i, k)| Op::RawKey(i, k)),
    ]
}

fn scenario_strategy() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (1usize..6).prop_flat_map(|n| (Just(n), proptest::collection::vec(op_strategy(n), 0..40)))
}

fn apply(group: &mut Group, op: &Op) -> Option<Vec<Change>> {
    let result = match op {
        Op::Activate(i) => group.activate(*i),
        Op::Focus(i) => group.focus(*i).map(|_| Vec::new()),
        Op::Blur => {
            group.blur();
            Ok(Vec::new())
        }
        Op::Key(i, d) => group.navigate(*i, *d),
        Op::RawKey(i, k) => group.handle_key(*i, k),
    };
    result.ok()
}

fn assert_panels_consistent(group: &Group) -> Result<(), TestCaseError> {
    for trigger in group.triggers() {
        prop_assert_eq!(trigger.is_selected(), trigger.is_panel_visible());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        .. ProptestConfig::default()
    })]

    #[test]
    fn tabs_always_have_exactly_one_selected((n, ops) in scenario_strategy()) {
        let mut group = build(Variant::Tabs, n);
        prop_assert_eq!(group.selected_indices().len(), 1);

        for op in &ops {
            apply(&mut group, op);
            prop_assert_eq!(group.selected_indices().len(), 1);
            for trigger in group.triggers() {
                prop_assert_eq!(trigger.focusable, trigger.is_selected());
            }
            assert_panels_consistent(&group)?;
        }
    }

    #[test]
    fn single_open_accordion_has_at_most_one_open((n, ops) in scenario_strategy()) {
        let mut group = build(Variant::accordion(Exclusivity::SingleOpen), n);

        for op in &ops {
            apply(&mut group, op);
            prop_assert!(group.selected_indices().len() <= 1);
            prop_assert!(group.triggers().iter().all(|t| t.focusable));
            assert_panels_consistent(&group)?;
        }
    }

    #[test]
    fn multi_open_activate_flips_one_membership(
        (n, ops) in scenario_strategy(),
        target in 0usize..6,
    ) {
        let mut group = build(Variant::accordion(Exclusivity::MultiOpen), n);
        for op in &ops {
            apply(&mut group, op);
        }

        let target = target % n;
        let mut expected = group.selected_indices();
        match expected.iter().position(|&i| i == target) {
            Some(pos) => {
                expected.remove(pos);
            }
            None => {
                expected.push(target);
                expected.sort_unstable();
            }
        }

        group.activate(target).unwrap();
        prop_assert_eq!(group.selected_indices(), expected);
        assert_panels_consistent(&group)?;
    }

    #[test]
    fn tabs_activate_is_idempotent((n, ops) in scenario_strategy(), k in 0usize..6) {
        let mut group = build(Variant::Tabs, n);
        for op in &ops {
            apply(&mut group, op);
        }

        let k = k % n;
        group.activate(k).unwrap();
        let once = group.triggers().to_vec();

        let changes = group.activate(k).unwrap();
        prop_assert!(changes.is_empty());
        prop_assert_eq!(group.triggers(), once.as_slice());
    }

    #[test]
    fn focused_key_lands_on_wrapped_index(n in 1usize..8, start in 0usize..8, d in direction_strategy()) {
        let start = start % n;
        let mut group = build(Variant::accordion(Exclusivity::SingleOpen), n);
        group.focus(start).unwrap();

        let changes = group.navigate(start, d).unwrap();
        let expected = match d {
            Direction::Next => (start + 1) % n,
            Direction::Previous => (start + n - 1) % n,
            Direction::First => 0,
            Direction::Last => n - 1,
        };
        prop_assert_eq!(group.focused(), Some(expected));
        prop_assert_eq!(changes.len(), 1);
        prop_assert!(group.selected_indices().is_empty());
    }
}

#[test]
fn test_wraparound_law() {
    let mut group = build(Variant::Tabs, 3);

    group.focus(2).unwrap();
    group.handle_key(2, "ArrowRight").unwrap();
    assert_eq!(group.focused(), Some(0));
    assert_eq!(group.selected_indices(), vec![0]);

    group.handle_key(0, "ArrowLeft").unwrap();
    assert_eq!(group.focused(), Some(2));
    assert_eq!(group.selected_indices(), vec![2]);
}

#[test]
fn test_toggle_law() {
    let mut group = build(Variant::accordion(Exclusivity::SingleOpen), 4);

    group.activate(1).unwrap();
    assert_eq!(group.selected_indices(), vec![1]);

    group.activate(1).unwrap();
    assert!(group.selected_indices().is_empty());
}

#[test]
fn test_changes_serialize_for_presentation() {
    let mut group = build(Variant::Tabs, 2);
    let changes = group.activate(1).unwrap();
    let json = serde_json::to_value(&changes).unwrap();

    assert_eq!(json[0]["type"], "trigger");
    assert_eq!(json[0]["selected"], false);
    assert_eq!(json[1]["type"], "panel");
    assert_eq!(json[1]["panel_id"], "panel-0");
}
