//! Unit tests for interactive test sessions.

use rstest::{fixture, rstest};

use super::{
    AssertionLine, InteractiveTestSession, SessionStats, derive_target_class, normalize_assertion,
};
use crate::error::{ExpressionError, SessionError, TestShellError};
use crate::expression::expression_to_statement;

/// Fixture providing a session with no methods.
#[fixture]
fn fresh_session() -> InteractiveTestSession {
    InteractiveTestSession::new("CartTest", None)
}

/// Fixture providing a session with one selected method.
#[fixture]
fn session_with_method() -> InteractiveTestSession {
    let mut session = InteractiveTestSession::new("CartTest", Some("App\\Cart"));
    session.add_method("testAddsItem");
    session
}

#[rstest]
#[case("CartTest", "Cart")]
#[case("Cart", "Cart")]
#[case("Test", "Test")]
#[case("TestCartTest", "TestCart")]
fn target_class_is_derived_from_name(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(derive_target_class(name), expected);
    assert_eq!(InteractiveTestSession::new(name, None).target_class(), expected);
}

#[rstest]
fn explicit_target_class_wins(session_with_method: InteractiveTestSession) {
    assert_eq!(session_with_method.target_class(), "App\\Cart");
}

#[rstest]
fn set_target_class_overwrites(mut fresh_session: InteractiveTestSession) {
    fresh_session.set_target_class("App\\Basket");
    assert_eq!(fresh_session.target_class(), "App\\Basket");
}

#[rstest]
fn add_code_line_without_method_fails(mut fresh_session: InteractiveTestSession) {
    assert_eq!(
        fresh_session.add_code_line("$cart = new Cart();"),
        Err(SessionError::NoActiveMethod)
    );
    assert_eq!(fresh_session.stats(), SessionStats::default());
}

#[rstest]
fn add_assertion_on_fresh_session_leaves_stats_at_zero(
    mut fresh_session: InteractiveTestSession,
) {
    let result = fresh_session.add_assertion("assertTrue($ok)");
    assert!(matches!(
        result,
        Err(TestShellError::Session(SessionError::NoActiveMethod))
    ));
    assert_eq!(
        fresh_session.stats(),
        SessionStats {
            methods: 0,
            code_lines: 0,
            assertions: 0,
        }
    );
}

#[rstest]
fn add_code_lines_without_method_appends_nothing(mut fresh_session: InteractiveTestSession) {
    let result = fresh_session.add_code_lines(["$a = 1;", "$b = 2;"]);
    assert_eq!(result, Err(SessionError::NoActiveMethod));
    assert!(fresh_session.code_lines().is_empty());
}

#[rstest]
fn code_lines_keep_call_order(mut session_with_method: InteractiveTestSession) {
    let lines = ["$cart = new Cart();", "$cart->add('apple');", "$total = $cart->total();"];
    for line in lines {
        session_with_method
            .add_code_line(line)
            .expect("method is selected");
    }
    session_with_method
        .add_code_lines(["$cart->clear();", "$empty = $cart->isEmpty();"])
        .expect("method is selected");

    assert_eq!(
        session_with_method.code_lines(),
        vec![
            "$cart = new Cart();",
            "$cart->add('apple');",
            "$total = $cart->total();",
            "$cart->clear();",
            "$empty = $cart->isEmpty();",
        ]
    );
}

#[rstest]
fn re_adding_method_keeps_lines(mut session_with_method: InteractiveTestSession) {
    session_with_method
        .add_code_line("$cart = new Cart();")
        .expect("method is selected");
    session_with_method.add_method("testRemovesItem");
    session_with_method.add_method("testAddsItem");

    assert_eq!(session_with_method.current_method(), Some("testAddsItem"));
    assert_eq!(session_with_method.code_lines(), vec!["$cart = new Cart();"]);
    assert_eq!(
        session_with_method.method_names(),
        vec!["testAddsItem", "testRemovesItem"]
    );
}

#[rstest]
fn set_current_method_rejects_unknown_names(mut session_with_method: InteractiveTestSession) {
    assert_eq!(
        session_with_method.set_current_method("testMissing"),
        Err(SessionError::UnknownMethod {
            name: String::from("testMissing"),
        })
    );
    assert_eq!(session_with_method.current_method(), Some("testAddsItem"));
}

#[rstest]
fn set_current_method_switches_target_of_new_lines(
    mut session_with_method: InteractiveTestSession,
) {
    session_with_method.add_method("testRemovesItem");
    session_with_method
        .set_current_method("testAddsItem")
        .expect("method exists");
    session_with_method
        .add_code_line("$cart->add('pear');")
        .expect("method is selected");

    assert_eq!(
        session_with_method.method_code_lines("testAddsItem"),
        Ok(vec![String::from("$cart->add('pear');")])
    );
    assert_eq!(
        session_with_method.method_code_lines("testRemovesItem"),
        Ok(Vec::new())
    );
}

#[rstest]
#[case("assertTrue($ok)", "$this->assertTrue($ok);")]
#[case("$this->assertTrue($ok)", "$this->assertTrue($ok);")]
#[case("assertTrue($ok);", "$this->assertTrue($ok);")]
#[case("  $this->assertTrue($ok);  ", "$this->assertTrue($ok);")]
fn normalize_assertion_is_idempotent(#[case] input: &str, #[case] expected: &str) {
    let once = normalize_assertion(input).expect("input is not blank");
    assert_eq!(once, expected);
    assert_eq!(normalize_assertion(&once), Ok(once.clone()));
}

#[rstest]
fn blank_assertion_is_rejected_without_mutation(mut session_with_method: InteractiveTestSession) {
    let result = session_with_method.add_assertion("   ");
    assert!(matches!(
        result,
        Err(TestShellError::Expression(
            ExpressionError::InvalidExpressionFormat
        ))
    ));
    assert_eq!(session_with_method.stats().assertions, 0);
}

#[rstest]
fn assertions_mix_raw_text_and_statements(mut session_with_method: InteractiveTestSession) {
    session_with_method
        .add_assertion("assertCount(1, $cart)")
        .expect("method is selected");
    let statement = expression_to_statement("$cart->total() == 3").expect("not blank");
    session_with_method
        .add_statement(statement.clone())
        .expect("method is selected");

    assert_eq!(
        session_with_method.assertions(),
        vec![
            "$this->assertCount(1, $cart);",
            "$this->assertEquals(3, $cart->total());",
        ]
    );
    assert_eq!(
        session_with_method.method_assertion_lines("testAddsItem"),
        Ok(vec![
            AssertionLine::Raw(String::from("$this->assertCount(1, $cart);")),
            AssertionLine::Statement(statement),
        ])
    );
}

#[rstest]
fn read_accessors_return_copies(mut session_with_method: InteractiveTestSession) {
    session_with_method
        .add_code_line("$a = 1;")
        .expect("method is selected");
    let mut copy = session_with_method.code_lines();
    copy.push(String::from("$b = 2;"));
    copy.clear();

    assert_eq!(session_with_method.code_lines(), vec!["$a = 1;"]);
}

#[rstest]
fn stats_sum_across_methods(mut session_with_method: InteractiveTestSession) {
    session_with_method
        .add_code_lines(["$a = 1;", "$b = 2;"])
        .expect("method is selected");
    session_with_method
        .add_assertion("assertSame(1, $a)")
        .expect("method is selected");
    assert_eq!(
        session_with_method.stats(),
        SessionStats {
            methods: 1,
            code_lines: 2,
            assertions: 1,
        }
    );

    session_with_method.add_method("testOther");
    session_with_method
        .add_code_line("$c = 3;")
        .expect("method is selected");
    session_with_method
        .add_assertion("assertSame(3, $c)")
        .expect("method is selected");

    assert_eq!(
        session_with_method.stats(),
        SessionStats {
            methods: 2,
            code_lines: 3,
            assertions: 2,
        }
    );
}
