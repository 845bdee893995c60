//! Unit tests for expression analysis and assertion synthesis.

use rstest::rstest;

use super::{
    AssertionKind, ComparisonOperator, ExpressionShape, OperandRole, PredicateFunction, analyze,
    expression_to_statement, synthesize, text_to_assertion,
};
use crate::error::ExpressionError;

fn comparison(left: &str, operator: ComparisonOperator, right: &str) -> ExpressionShape {
    ExpressionShape::Comparison {
        left: String::from(left),
        operator,
        right: String::from(right),
    }
}

fn statement_parts(expression: &str) -> (AssertionKind, Vec<String>) {
    let statement = expression_to_statement(expression).expect("expression should classify");
    let texts = statement
        .operand_texts()
        .into_iter()
        .map(String::from)
        .collect();
    (statement.kind(), texts)
}

// =============================================================================
// Analysis
// =============================================================================

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn analyze_rejects_blank_input(#[case] input: &str) {
    assert_eq!(analyze(input), Err(ExpressionError::InvalidExpressionFormat));
}

#[rstest]
fn analyze_identity_with_null() {
    assert_eq!(
        analyze("$a === null"),
        Ok(comparison("$a", ComparisonOperator::Identical, "null"))
    );
}

#[rstest]
#[case("$a == $b", comparison("$a", ComparisonOperator::Equal, "$b"))]
#[case("$a != $b", comparison("$a", ComparisonOperator::NotEqual, "$b"))]
#[case("$a !== $b", comparison("$a", ComparisonOperator::NotIdentical, "$b"))]
#[case("$a >= 3", comparison("$a", ComparisonOperator::GreaterOrEqual, "3"))]
#[case("$a <= 3", comparison("$a", ComparisonOperator::LessOrEqual, "3"))]
#[case("$a > 3", comparison("$a", ComparisonOperator::GreaterThan, "3"))]
#[case("$a < 3", comparison("$a", ComparisonOperator::LessThan, "3"))]
fn analyze_comparisons_match_whole_operator(
    #[case] input: &str,
    #[case] expected: ExpressionShape,
) {
    assert_eq!(analyze(input), Ok(expected));
}

#[rstest]
fn analyze_ignores_arrow_when_looking_for_ordering() {
    assert_eq!(
        analyze("$cart->count() > 2"),
        Ok(comparison(
            "$cart->count()",
            ComparisonOperator::GreaterThan,
            "2"
        ))
    );
}

#[rstest]
fn analyze_ignores_operators_nested_in_calls_and_strings() {
    assert_eq!(
        analyze("max($a, $b >= 1) == '=='"),
        Ok(comparison(
            "max($a, $b >= 1)",
            ComparisonOperator::Equal,
            "'=='"
        ))
    );
}

#[rstest]
fn analyze_prefers_identity_over_ordering() {
    assert_eq!(
        analyze("$a > 1 === true"),
        Ok(comparison("$a > 1", ComparisonOperator::Identical, "true"))
    );
}

#[rstest]
fn analyze_instanceof_takes_precedence() {
    assert_eq!(
        analyze("$obj instanceof Foo"),
        Ok(ExpressionShape::InstanceOf {
            object: String::from("$obj"),
            class: String::from("Foo"),
        })
    );
}

#[rstest]
fn analyze_does_not_treat_variable_named_instanceof_as_keyword() {
    assert_eq!(
        analyze("$instanceof"),
        Ok(ExpressionShape::Boolean {
            raw: String::from("$instanceof"),
        })
    );
}

#[rstest]
#[case("is_array($x)", PredicateFunction::IsArray, "$x")]
#[case("empty($list)", PredicateFunction::Empty, "$list")]
#[case("isset($map['key'])", PredicateFunction::Isset, "$map['key']")]
#[case("IS_NULL( $value )", PredicateFunction::IsNull, "$value")]
#[case("is_int(count($items))", PredicateFunction::IsInt, "count($items)")]
fn analyze_recognises_predicates(
    #[case] input: &str,
    #[case] function: PredicateFunction,
    #[case] argument: &str,
) {
    assert_eq!(
        analyze(input),
        Ok(ExpressionShape::Predicate {
            function,
            argument: String::from(argument),
        })
    );
}

#[rstest]
#[case("is_array($x) && is_int($y)")]
#[case("is_numeric($x)")]
#[case("is_array()")]
fn analyze_falls_back_for_non_predicate_calls(#[case] input: &str) {
    assert_eq!(
        analyze(input),
        Ok(ExpressionShape::Boolean {
            raw: String::from(input),
        })
    );
}

#[rstest]
fn analyze_negation() {
    assert_eq!(
        analyze("!$flag"),
        Ok(ExpressionShape::Negation {
            inner: String::from("$flag"),
        })
    );
}

#[rstest]
#[case("!")]
#[case("$x")]
#[case("$user->isActive()")]
fn analyze_boolean_fallback(#[case] input: &str) {
    assert_eq!(
        analyze(input),
        Ok(ExpressionShape::Boolean {
            raw: String::from(input),
        })
    );
}

#[rstest]
fn analyze_requires_text_on_both_sides() {
    assert_eq!(
        analyze("== $b"),
        Ok(ExpressionShape::Boolean {
            raw: String::from("== $b"),
        })
    );
}

// =============================================================================
// Synthesis
// =============================================================================

#[rstest]
#[case("$a === null", AssertionKind::Null, &["$a"])]
#[case("$a === true", AssertionKind::True, &["$a"])]
#[case("$a === FALSE", AssertionKind::False, &["$a"])]
#[case("null === $a", AssertionKind::Null, &["$a"])]
#[case("$a === $b", AssertionKind::Same, &["$b", "$a"])]
#[case("$a == $b", AssertionKind::Equals, &["$b", "$a"])]
#[case("$a != $b", AssertionKind::NotEquals, &["$b", "$a"])]
#[case("$a !== $b", AssertionKind::NotEquals, &["$b", "$a"])]
#[case("$a > $b", AssertionKind::GreaterThan, &["$b", "$a"])]
#[case("$a < $b", AssertionKind::LessThan, &["$b", "$a"])]
#[case("$a >= $b", AssertionKind::GreaterOrEqual, &["$b", "$a"])]
#[case("$a <= $b", AssertionKind::LessOrEqual, &["$b", "$a"])]
#[case("$obj instanceof Foo", AssertionKind::InstanceOf, &["Foo", "$obj"])]
#[case("is_array($x)", AssertionKind::IsArray, &["$x"])]
#[case("is_null($x)", AssertionKind::Null, &["$x"])]
#[case("empty($x)", AssertionKind::Empty, &["$x"])]
#[case("is_object($x)", AssertionKind::IsObject, &["$x"])]
#[case("is_string($x)", AssertionKind::IsString, &["$x"])]
#[case("is_int($x)", AssertionKind::IsInt, &["$x"])]
#[case("is_bool($x)", AssertionKind::IsBool, &["$x"])]
#[case("isset($x)", AssertionKind::True, &["isset($x)"])]
#[case("!$flag", AssertionKind::False, &["$flag"])]
#[case("$x", AssertionKind::True, &["$x"])]
fn synthesize_follows_translation_rules(
    #[case] input: &str,
    #[case] kind: AssertionKind,
    #[case] operands: &[&str],
) {
    let (actual_kind, actual_operands) = statement_parts(input);
    assert_eq!(actual_kind, kind);
    assert_eq!(actual_operands, operands);
}

#[rstest]
fn synthesize_tags_expected_then_actual() {
    let statement = synthesize(&comparison("$a", ComparisonOperator::Equal, "$b"));
    let roles: Vec<OperandRole> = statement.operands().iter().map(|o| o.role()).collect();
    assert_eq!(roles, vec![OperandRole::Expected, OperandRole::Actual]);
}

#[rstest]
#[case("Foo", true)]
#[case("App\\Models\\User", false)]
#[case("$className", false)]
fn synthesize_marks_bare_class_names_as_class_references(
    #[case] class: &str,
    #[case] class_reference: bool,
) {
    let statement = synthesize(&ExpressionShape::InstanceOf {
        object: String::from("$obj"),
        class: String::from(class),
    });
    let first = statement.operands().first().expect("instanceof has operands");
    assert_eq!(first.is_class_reference(), class_reference);
}

#[rstest]
#[case("$a === null", "$this->assertNull($a);")]
#[case("$a == $b", "$this->assertEquals($b, $a);")]
#[case("$obj instanceof Foo", "$this->assertInstanceOf(Foo::class, $obj);")]
#[case(
    "$obj instanceof App\\Foo",
    "$this->assertInstanceOf(App\\Foo, $obj);"
)]
#[case("$total >= 10", "$this->assertGreaterThanOrEqual(10, $total);")]
#[case("isset($row['id'])", "$this->assertTrue(isset($row['id']));")]
#[case("!$cart->isEmpty()", "$this->assertFalse($cart->isEmpty());")]
fn text_to_assertion_renders_statements(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(text_to_assertion(input).as_deref(), Ok(expected));
}

#[rstest]
#[case("$a")]
#[case("$a = 5")]
#[case("foo(")]
#[case(")))")]
#[case("'unterminated")]
#[case("$a <=> $b")]
#[case("fn($x) => $x > 1")]
#[case("ü === ö")]
fn synthesis_is_total_for_non_empty_input(#[case] input: &str) {
    let statement = expression_to_statement(input).expect("non-empty input always classifies");
    assert!(!statement.operands().is_empty());
}
