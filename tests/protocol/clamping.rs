use vpp_console::protocol::{Tag, VppRuntime};

#[test]
fn assumptions_clamp_to_zero() {
    let mut rt = VppRuntime::new();
    for n in [i64::MIN, -100, -1, 0, 1, 7, 4_000] {
        rt.set_assumptions(n);
        assert_eq!(i64::from(rt.state().assumptions()), n.max(0), "n = {n}");
    }
}

#[test]
fn assumptions_saturate_above_u32() {
    let mut rt = VppRuntime::new();
    rt.set_assumptions(i64::MAX);
    assert_eq!(rt.state().assumptions(), u32::MAX);
}

#[test]
fn next_in_cycle_is_monotonic() {
    let mut rt = VppRuntime::new();
    let mut previous = rt.state().cycle_index();
    for _ in 0..10 {
        rt.next_in_cycle();
        let current = rt.state().cycle_index();
        assert_eq!(current, previous + 1);
        previous = current;
    }
}

#[test]
fn cycle_runs_past_display_length() {
    let mut rt = VppRuntime::new();
    for _ in 0..4 {
        rt.next_in_cycle();
    }
    assert_eq!(rt.state().cycle_index(), 5);
    assert!(
        rt.make_footer(Default::default(), None)
            .contains("Cycle=5/3")
    );
}

#[test]
fn new_cycle_resets_from_any_state() {
    for tag in Tag::ALL {
        let mut rt = VppRuntime::new();
        rt.set_tag(tag);
        rt.next_in_cycle();
        rt.next_in_cycle();
        rt.set_assumptions(4);
        rt.new_cycle();
        assert_eq!(rt.state().current_tag(), Tag::G);
        assert_eq!(rt.state().cycle_index(), 1);
        assert_eq!(rt.state().assumptions(), 4);
    }
}
