use vpp_console::protocol::{
    SourceKind, SourceRef, SourcesSummary, format_sources_table, parse_sources_table,
};

fn web(reference: &str) -> SourceRef {
    SourceRef::new(SourceKind::Web, reference, None)
}

#[test]
fn summary_of_kind_sets() {
    assert_eq!(SourcesSummary::of(&[]), SourcesSummary::None);
    assert_eq!(
        SourcesSummary::of(&[web("https://a.test"), web("https://b.test")]),
        SourcesSummary::Web
    );
    let mixed = [
        web("https://a.test"),
        SourceRef::new(SourceKind::File, "notes.md", None),
    ];
    assert_eq!(SourcesSummary::of(&mixed), SourcesSummary::Mixed);
}

#[test]
fn summary_tokens() {
    assert_eq!(SourcesSummary::None.token(), "none");
    assert_eq!(SourcesSummary::Web.token(), "web");
    assert_eq!(SourcesSummary::Mixed.token(), "mixed");
}

#[test]
fn table_survives_pipes_and_missing_names() {
    let sources = vec![
        SourceRef::new(SourceKind::Ssh, "ops@box:/var/log", Some("a|b".into())),
        SourceRef::new(SourceKind::File, "src/lib.rs", None),
    ];
    let table = format_sources_table(&sources);
    assert!(table.contains(r"a\|b"));

    let parsed = parse_sources_table(&format!("intro\n\n{table}\n\ntrailer"));
    assert_eq!(parsed.len(), 2);
    for (parsed, original) in parsed.iter().zip(&sources) {
        assert!(parsed.same_entry(original));
        assert_ne!(parsed.id, original.id);
    }
}

#[test]
fn empty_list_has_no_table() {
    assert_eq!(format_sources_table(&[]), "");
    assert!(parse_sources_table("no table here").is_empty());
}
