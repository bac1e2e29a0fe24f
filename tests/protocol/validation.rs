use vpp_console::protocol::{
    ISSUE_MISSING_FOOTER, ISSUE_MISSING_TAG_LINE, ISSUE_REPLY_EMPTY, validate_assistant_reply,
};

#[test]
fn empty_reply_single_issue() {
    let result = validate_assistant_reply("");
    assert!(!result.is_valid);
    assert_eq!(result.issues, vec![ISSUE_REPLY_EMPTY.to_string()]);
}

#[test]
fn well_formed_reply() {
    let result = validate_assistant_reply(
        "<g>\nHello\n[Version=v1.4 | Tag=<g_1> | Sources=<none> | Assumptions=0 | Cycle=1/3]",
    );
    assert!(result.is_valid);
    assert!(result.issues.is_empty());
}

#[test]
fn missing_leading_tag() {
    let result = validate_assistant_reply(
        "Hello\n[Version=v1.4 | Tag=<g_1> | Sources=<none> | Assumptions=0 | Cycle=1/3]",
    );
    assert!(!result.is_valid);
    assert!(result.issues.contains(&ISSUE_MISSING_TAG_LINE.to_string()));
    assert!(!result.issues.contains(&ISSUE_MISSING_FOOTER.to_string()));
}

#[test]
fn footer_must_be_last_line() {
    let result = validate_assistant_reply(
        "<q>\n[Version=v1.4 | Tag=<q_1> | Sources=<none> | Assumptions=0 | Cycle=1/3]\nP.S.",
    );
    assert_eq!(result.issues, vec![ISSUE_MISSING_FOOTER.to_string()]);
}
