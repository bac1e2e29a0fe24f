use vpp_console::protocol::{
    Correctness, Modifiers, Severity, Tag, make_header, parse_header,
};

#[test]
fn escape_defaults_echo_to_g() {
    let header = make_header(Tag::E, &Modifiers::default());
    assert_eq!(header, "!<e> --<g>");
}

#[test]
fn escape_rejects_non_echoable_target() {
    for target in [Tag::E, Tag::EO, Tag::OF] {
        let header = make_header(Tag::E, &Modifiers::default().with_echo(target));
        assert!(header.ends_with("--<g>"), "{target}: {header}");
        assert!(!header.contains(&format!("--<{}>", target.raw())));
    }
}

#[test]
fn escape_keeps_echoable_target() {
    for target in Tag::ECHOABLE {
        let header = make_header(Tag::E, &Modifiers::default().with_echo(target));
        assert_eq!(header, format!("!<e> --<{}>", target.raw()));
    }
}

#[test]
fn modifiers_render_in_fixed_order() {
    let modifiers = Modifiers::new(Correctness::Correct, Severity::Major, None);
    assert_eq!(make_header(Tag::C, &modifiers), "!<c> --correct --major");
}

#[test]
fn parsed_header_matches_modifiers() {
    let modifiers = Modifiers::new(Correctness::Incorrect, Severity::Minor, Some(Tag::Q));
    let header = parse_header(&make_header(Tag::E, &modifiers)).unwrap();
    assert_eq!(header.tag, Tag::E);
    assert_eq!(header.modifiers, modifiers);
}
