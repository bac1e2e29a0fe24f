use vpp_console::protocol::{
    Modifiers, ProtocolState, SourceKind, SourceRef, SourcesSummary, Tag, VppRuntime,
    format_sources_table,
};

#[test]
fn question_on_second_cycle() {
    let mut rt = VppRuntime::new();
    assert_eq!(
        rt.state(),
        &ProtocolState::default(),
        "default state is g, 1, 0, VPPConsole"
    );

    rt.set_tag(Tag::Q);
    rt.next_in_cycle();
    assert_eq!(rt.state().cycle_index(), 2);
    assert_eq!(
        rt.make_footer(SourcesSummary::Web, None),
        "[Version=v1.4 | Tag=<q_2> | Sources=<web> | Assumptions=0 | Cycle=2/3 | Locus=VPPConsole]"
    );
}

#[test]
fn full_turn_user_to_assistant_and_back() {
    let mut user = VppRuntime::new();
    user.set_tag(Tag::O);
    let outbound = user.compose_outbound("Draft the summary.", &Modifiers::default());
    assert_eq!(outbound, "!<o>\nDraft the summary.");

    let sources = vec![
        SourceRef::new(SourceKind::Web, "https://docs.test/a", Some("Docs".into())),
        SourceRef::new(SourceKind::Repo, "acme/widget", None),
    ];
    let body = format!("<o>\nHere it is.\n\n{}", format_sources_table(&sources));
    let reply = user.finalize_reply(&body, SourcesSummary::of(&sources), None);

    let mut assistant_view = VppRuntime::new();
    let ingest = assistant_view.ingest_assistant_reply(&reply);
    assert!(ingest.validation.is_valid, "{:?}", ingest.validation.issues);
    assert_eq!(ingest.sources_token.as_deref(), Some("mixed"));
    assert_eq!(ingest.sources.len(), 2);
    assert!(ingest.sources[0].same_entry(&sources[0]));
    assert!(ingest.sources[1].same_entry(&sources[1]));
    assert_eq!(assistant_view.state().current_tag(), Tag::O);
}
