use vpp_console::protocol::{ProtocolState, SourcesSummary, Tag, VppRuntime};

fn observed(rt: &VppRuntime) -> (Tag, u32, Option<String>) {
    let state = rt.state();
    (
        state.current_tag(),
        state.cycle_index(),
        state.locus().map(str::to_string),
    )
}

#[test]
fn footer_roundtrips_every_tag_and_cycle() {
    for tag in Tag::ALL {
        for cycle in 1..=5 {
            let mut source = VppRuntime::new();
            source.set_tag(tag);
            for _ in 1..cycle {
                source.next_in_cycle();
            }
            source.set_assumptions(cycle);
            let line = source.make_footer(SourcesSummary::Mixed, None);

            let mut fresh = VppRuntime::new();
            fresh.ingest_footer_line(&line);
            assert_eq!(observed(&fresh), observed(&source), "{line}");
            assert_eq!(fresh.state().assumptions(), 0);
        }
    }
}

#[test]
fn footer_roundtrips_custom_locus() {
    let mut source = VppRuntime::new();
    source.set_tag(Tag::OF);
    source.set_locus(Some("Release Notes".into()));
    let line = source.make_footer(SourcesSummary::None, None);

    let mut fresh = VppRuntime::new();
    fresh.ingest_footer_line(&line);
    assert_eq!(observed(&fresh), observed(&source));
}

#[test]
fn footer_without_locus_roundtrips_onto_blank_state() {
    let mut source = VppRuntime::new();
    source.set_tag(Tag::EO);
    source.set_locus(None);
    let line = source.make_footer(SourcesSummary::None, None);
    assert!(!line.contains("Locus="));

    let mut blank = VppRuntime::from_state(ProtocolState::new(0, None));
    blank.ingest_footer_line(&line);
    assert_eq!(observed(&blank), observed(&source));
}

#[test]
fn footer_roundtrips_awkward_loci() {
    let loci = [
        "A | B",
        "trailing]",
        "[bracketed]",
        "  padded  ",
        r"C:\work\vpp",
        "Line one\nLine two",
        "nil",
        "Version=v9 | Tag=<e_1>",
    ];
    for locus in loci {
        let mut source = VppRuntime::new();
        source.set_tag(Tag::C);
        source.next_in_cycle();
        source.set_locus(Some(locus.to_string()));
        let line = source.make_footer(SourcesSummary::Web, None);
        assert_eq!(line.lines().count(), 1, "{locus:?}");

        let mut fresh = VppRuntime::new();
        fresh.ingest_footer_line(&line);
        assert_eq!(observed(&fresh), observed(&source), "{locus:?} -> {line}");
    }
}

#[test]
fn finalized_reply_with_multiline_locus_validates() {
    let mut rt = VppRuntime::new();
    rt.set_locus(Some("Line one\nLine two".into()));
    let reply = rt.finalize_reply("<g>\nHi", SourcesSummary::None, None);
    let validation = rt.validate_assistant_reply(&reply);
    assert!(validation.is_valid, "{:?}", validation.issues);
}
