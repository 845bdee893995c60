//! Unit tests for the mock registry.

use rstest::{fixture, rstest};

use super::{CallPredicate, MockRegistry, SpyActivation};
use crate::error::MockError;
use crate::host::{MockTypeResolver, TypeCatalog};

/// Fixture providing a catalog that knows the application mailer.
#[fixture]
fn catalog() -> TypeCatalog {
    TypeCatalog::with_types(["App\\Mailer", "App\\Clock"])
}

/// Fixture providing a registry with a spying `$mailer` mock.
#[fixture]
fn spying_registry(catalog: TypeCatalog) -> MockRegistry {
    let mut registry = MockRegistry::new();
    registry
        .declare_mock("$mailer", "App\\Mailer", ["send"], false, &catalog)
        .expect("App\\Mailer is known");
    registry
        .enable_spy("$mailer")
        .expect("$mailer was declared");
    registry
}

#[rstest]
fn declare_mock_consults_the_type_resolver() {
    let mut resolver = MockTypeResolver::new();
    resolver
        .expect_type_exists()
        .withf(|name| name == "App\\Missing")
        .times(1)
        .return_const(false);

    let mut registry = MockRegistry::new();
    let error = registry
        .declare_mock("$missing", "App\\Missing", Vec::<String>::new(), false, &resolver)
        .expect_err("type is unknown");

    assert_eq!(
        error,
        MockError::UnknownType {
            name: String::from("App\\Missing")
        }
    );
    assert!(registry.is_empty());
}

#[rstest]
fn declare_mock_accepts_bare_variable_names(catalog: TypeCatalog) {
    let mut registry = MockRegistry::new();
    let mock = registry
        .declare_mock("clock", "App\\Clock", ["now"], true, &catalog)
        .expect("App\\Clock is known");

    assert_eq!(mock.variable(), "$clock");
    assert!(mock.is_partial());
    assert!(registry.get("$clock").is_some());
}

#[rstest]
fn redeclaring_replaces_the_mock_in_place(catalog: TypeCatalog) {
    let mut registry = MockRegistry::new();
    registry
        .declare_mock("$mailer", "App\\Mailer", ["send"], false, &catalog)
        .expect("known type");
    registry
        .declare_mock("$clock", "App\\Clock", ["now"], false, &catalog)
        .expect("known type");
    registry
        .record_expectation("$mailer", "send", "", "true")
        .expect("$mailer exists");
    registry
        .declare_mock("$mailer", "App\\Mailer", ["queue"], false, &catalog)
        .expect("known type");

    let variables: Vec<&str> = registry.iter().map(|mock| mock.variable()).collect();
    assert_eq!(variables, vec!["$mailer", "$clock"]);
    let mailer = registry.get("$mailer").expect("$mailer exists");
    assert!(mailer.expectations().is_empty());
    assert_eq!(mailer.mocked_methods().collect::<Vec<_>>(), vec!["queue"]);
}

#[rstest]
fn record_expectation_requires_a_declared_mock() {
    let mut registry = MockRegistry::new();
    let error = registry
        .record_expectation("$ghost", "boo", "", "")
        .expect_err("$ghost was never declared");
    assert_eq!(
        error,
        MockError::UnknownMock {
            variable: String::from("$ghost")
        }
    );
}

#[rstest]
fn setup_lines_render_full_mock_and_expectations(catalog: TypeCatalog) {
    let mut registry = MockRegistry::new();
    registry
        .declare_mock("$mailer", "App\\Mailer", ["send"], false, &catalog)
        .expect("known type");
    registry
        .record_expectation("$mailer", "send", "$this->equalTo('hi')", " true ")
        .expect("$mailer exists");
    registry
        .record_expectation("$mailer", "flush", "", "")
        .expect("$mailer exists");

    let lines = registry.get("$mailer").expect("$mailer exists").setup_lines();
    assert_eq!(
        lines,
        vec![
            "$mailer = $this->createMock(\\App\\Mailer::class);",
            "$mailer->method('send')->with($this->equalTo('hi'))->willReturn(true);",
            "$mailer->method('flush');",
        ]
    );
}

#[rstest]
fn setup_lines_render_partial_mock_methods_sorted(catalog: TypeCatalog) {
    let mut registry = MockRegistry::new();
    registry
        .declare_mock("$clock", "App\\Clock", ["today", "now"], true, &catalog)
        .expect("known type");

    let lines = registry.get("$clock").expect("$clock exists").setup_lines();
    assert_eq!(
        lines,
        vec!["$clock = $this->createPartialMock(\\App\\Clock::class, ['now', 'today']);"]
    );
}

#[rstest]
fn enable_spy_twice_reports_already_enabled(mut spying_registry: MockRegistry) {
    assert!(spying_registry.record_call("$mailer", "send", ["'a'"]));
    assert_eq!(
        spying_registry.enable_spy("mailer"),
        Ok(SpyActivation::AlreadyEnabled)
    );
    let mailer = spying_registry.get("$mailer").expect("$mailer exists");
    assert_eq!(mailer.calls().len(), 1);
}

#[rstest]
fn calls_are_ignored_until_spying(catalog: TypeCatalog) {
    let mut registry = MockRegistry::new();
    registry
        .declare_mock("$mailer", "App\\Mailer", ["send"], false, &catalog)
        .expect("known type");

    assert!(!registry.record_call("$mailer", "send", Vec::<String>::new()));
    assert!(!registry.record_call("$ghost", "send", Vec::<String>::new()));
    assert_eq!(registry.enable_spy("$mailer"), Ok(SpyActivation::Enabled));
    assert!(registry.record_call("$mailer", "send", ["'x'", "2"]));

    let call = registry
        .get("$mailer")
        .and_then(|mock| mock.calls().first())
        .expect("one call recorded");
    assert_eq!(call.method_name, "send");
    assert_eq!(call.arguments, vec!["'x'", "2"]);
}

#[rstest]
#[case(CallPredicate::CalledTimes(2), true)]
#[case(CallPredicate::CalledTimes(1), false)]
#[case(CallPredicate::CalledAtLeastOnce, true)]
#[case(CallPredicate::NeverCalled, false)]
fn verify_counts_calls_per_method(
    mut spying_registry: MockRegistry,
    #[case] predicate: CallPredicate,
    #[case] expected: bool,
) {
    spying_registry.record_call("$mailer", "send", ["'a'"]);
    spying_registry.record_call("$mailer", "queue", ["'b'"]);
    spying_registry.record_call("$mailer", "send", ["'c'"]);

    let verification = spying_registry.verify("$mailer", "send", predicate);
    assert_eq!(verification.success, expected, "{}", verification.details);
}

#[rstest]
fn verify_describes_the_check(mut spying_registry: MockRegistry) {
    spying_registry.record_call("$mailer", "send", Vec::<String>::new());
    let verification = spying_registry.verify("$mailer", "send", CallPredicate::NeverCalled);
    assert!(!verification.success);
    assert_eq!(
        verification.details,
        "$mailer->send() was called 1 time, expected neverCalled"
    );
}

#[rstest]
fn verify_reports_unknown_mock_without_failing() {
    let registry = MockRegistry::new();
    let verification = registry.verify("ghost", "boo", CallPredicate::NeverCalled);
    assert!(!verification.success);
    assert_eq!(verification.details, "no mock named $ghost");
}

#[rstest]
fn verify_notes_when_spy_is_disabled(catalog: TypeCatalog) {
    let mut registry = MockRegistry::new();
    registry
        .declare_mock("$mailer", "App\\Mailer", ["send"], false, &catalog)
        .expect("known type");
    let verification = registry.verify("$mailer", "send", CallPredicate::NeverCalled);
    assert!(verification.success);
    assert!(verification.details.ends_with("(spy not enabled, no calls recorded)"));
}

#[rstest]
#[case("calledTimes(3)", CallPredicate::CalledTimes(3))]
#[case(" calledtimes( 0 ) ", CallPredicate::CalledTimes(0))]
#[case("calledAtLeastOnce", CallPredicate::CalledAtLeastOnce)]
#[case("NEVERCALLED", CallPredicate::NeverCalled)]
fn call_predicate_parses(#[case] text: &str, #[case] expected: CallPredicate) {
    assert_eq!(text.parse::<CallPredicate>(), Ok(expected));
}

#[rstest]
#[case("calledTimes(-1)")]
#[case("calledTimes(2")]
#[case("often")]
#[case("")]
fn call_predicate_rejects_unknown_text(#[case] text: &str) {
    assert!(matches!(
        text.parse::<CallPredicate>(),
        Err(MockError::InvalidPredicate { .. })
    ));
}

#[rstest]
fn reset_discards_every_mock(mut spying_registry: MockRegistry) {
    spying_registry.reset();
    assert!(spying_registry.is_empty());
    assert!(spying_registry.get("$mailer").is_none());
}
