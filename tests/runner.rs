use std::{cell::RefCell, rc::Rc};

use cuke::{
    error::{CoercionError, ParseError, RegistrationError},
    Error, Runner, World,
};

/// State recording what handlers and hooks have seen.
type Log = Vec<String>;

fn quiet() -> Runner<Log> {
    Runner::new().quiet()
}

#[test]
fn strips_step_keywords_before_matching() {
    let mut runner = quiet()
        .step("^the first setup$", |_: &mut World, log: &mut Log| {
            log.push("setup".into());
        })
        .unwrap();
    let mut log = Log::new();

    let report = runner
        .execute(
            "Feature: My Feature
    Scenario: Scenario 1
        Given the first setup
        When   the first setup  
        Then the first setup
        And the first setup
        But the first setup
        * the first setup",
            &mut log,
        )
        .unwrap();

    assert_eq!(log.len(), 6);
    assert_eq!(report.passed, 6);
}

#[test]
fn first_registered_match_wins() {
    let mut runner = quiet()
        .step("cukes", |_: &mut World, log: &mut Log| log.push("first".into()))
        .unwrap()
        .step("I have cukes", |_: &mut World, log: &mut Log| {
            log.push("second".into());
        })
        .unwrap();
    let mut log = Log::new();

    runner
        .execute("Scenario:\n  Given I have cukes", &mut log)
        .unwrap();

    assert_eq!(log, ["first"]);
}

#[test]
fn pending_step_skips_the_rest() {
    let mut runner = quiet()
        .step("^pending$", |w: &mut World, _: &mut Log| w.pending())
        .unwrap()
        .step("^step (\\d)$", |_: &mut World, log: &mut Log, n: i8| {
            log.push(n.to_string());
        })
        .unwrap();
    let mut log = Log::new();

    let report = runner
        .execute(
            "Scenario: pending
        Given step 1
        When pending
        Then step 2
        And step 3",
            &mut log,
        )
        .unwrap();

    assert_eq!(log, ["1"]);
    assert_eq!(report.passed, 1);
    assert_eq!(report.pending, 1);
    assert_eq!(report.skipped, 2);
}

#[test]
fn pending_does_not_leak_into_next_scenario() {
    let mut runner = quiet()
        .step("^pending$", |w: &mut World, _: &mut Log| w.pending())
        .unwrap()
        .step("^run$", |_: &mut World, log: &mut Log| log.push("run".into()))
        .unwrap();
    let mut log = Log::new();

    let report = runner
        .execute(
            "Scenario: first
        Given pending
        Then run
    Scenario: second
        Given run",
            &mut log,
        )
        .unwrap();

    assert_eq!(log, ["run"]);
    assert_eq!(report.to_string(), "2 scenarios\n3 steps(1 skipped, 1 passed, 1 pending)");
}

#[test]
fn undefined_steps_keep_running() {
    let mut runner = quiet()
        .step("^known$", |_: &mut World, log: &mut Log| log.push("known".into()))
        .unwrap();
    let mut log = Log::new();

    let report = runner
        .execute("Scenario:\n Given unknown\n Then known", &mut log)
        .unwrap();

    assert_eq!(log, ["known"]);
    assert_eq!(report.undefined, 1);
    assert_eq!(report.passed, 1);
}

#[test]
fn failing_step_records_failure_and_continues() {
    let mut runner = quiet()
        .step("^(\\d+) equals (\\d+)$", |w: &mut World, _: &mut Log, a: i32, b: i32| {
            w.check(a == b, format!("{a} != {b}"));
        })
        .unwrap();

    let report = runner
        .execute(
            "Scenario:
        Then 1 equals 2
        And 2 equals 2",
            &mut Log::new(),
        )
        .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.passed, 1);
    assert!(report.has_failures());
}

#[test]
fn background_runs_before_every_scenario_unreported() {
    let mut runner = quiet()
        .step("^background$", |_: &mut World, log: &mut Log| {
            log.push("background".into());
        })
        .unwrap()
        .step("^scenario (\\d)$", |_: &mut World, log: &mut Log, n: i32| {
            log.push(format!("scenario {n}"));
        })
        .unwrap();
    let mut log = Log::new();

    let report = runner
        .execute(
            "Feature: background
    Background:
        Given background
    Scenario: one
        Then scenario 1
    Scenario: two
        Then scenario 2",
            &mut log,
        )
        .unwrap();

    assert_eq!(
        log,
        ["background", "scenario 1", "background", "scenario 2"],
    );
    assert_eq!(report.scenarios, 2);
    assert_eq!(report.total_steps(), 2);
}

#[test]
fn pending_background_starts_afresh_for_every_scenario() {
    let mut runner = quiet()
        .step("^wait$", |w: &mut World, log: &mut Log| {
            log.push("wait".into());
            w.pending();
        })
        .unwrap()
        .step("^bgafter$", |_: &mut World, log: &mut Log| {
            log.push("bgafter".into());
        })
        .unwrap()
        .step(r"^(s\d)$", |_: &mut World, log: &mut Log, text: String| {
            log.push(text);
        })
        .unwrap();
    let mut log = Log::new();

    let report = runner
        .execute(
            "Background:
        Given wait
        Then bgafter
    Scenario: one
        Given s1
    Scenario: two
        Given s2",
            &mut log,
        )
        .unwrap();

    assert_eq!(log, ["wait", "s1", "wait", "s2"]);
    assert_eq!(report.scenarios, 2);
    assert_eq!(report.passed, 2);
    assert_eq!(report.pending, 0);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.total_steps(), 2);
}

#[test]
fn background_alone_runs_nothing() {
    let mut runner = quiet()
        .step(".", |_: &mut World, log: &mut Log| log.push("ran".into()))
        .unwrap();
    let mut log = Log::new();

    let report = runner
        .execute("Background:\n  Given something", &mut log)
        .unwrap();

    assert!(log.is_empty());
    assert_eq!(report.to_string(), "0 scenarios\n0 steps");
}

#[test]
fn hooks_bracket_background_and_steps() {
    let mut runner = quiet()
        .before(|log: &mut Log| log.push("set up".into()))
        .after(|log: &mut Log| log.push("tear down".into()))
        .step("^(.*)$", |_: &mut World, log: &mut Log, text: String| {
            log.push(text);
        })
        .unwrap();
    let mut log = Log::new();

    runner
        .execute(
            "Background:
        Given bg
    Scenario:
        Given step",
            &mut log,
        )
        .unwrap();

    assert_eq!(log, ["set up", "bg", "step", "tear down"]);
}

#[test]
fn tear_down_runs_after_failed_and_pending_steps() {
    let mut runner = quiet()
        .after(|log: &mut Log| log.push("tear down".into()))
        .step("fail", |w: &mut World, _: &mut Log| w.fail())
        .unwrap()
        .step("wait", |w: &mut World, _: &mut Log| w.pending())
        .unwrap();
    let mut log = Log::new();

    runner
        .execute(
            "Scenario: a\n Given fail\nScenario: b\n Given wait\n Then fail",
            &mut log,
        )
        .unwrap();

    assert_eq!(log, ["tear down", "tear down"]);
}

#[test]
fn hooks_skip_printable_and_outline_nodes() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut runner = Runner::new()
        .quiet()
        .before(move |_: &mut ()| *counter.borrow_mut() += 1);

    runner
        .execute(
            "Feature: nothing to run
    Scenario Outline: never instantiated
        Given <x>
    Some trailing prose",
            &mut (),
        )
        .unwrap();

    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn handler_sees_step_table() {
    let mut runner = quiet()
        .step("^the people$", |w: &mut World, log: &mut Log| {
            for row in w.rows() {
                log.push(format!("{} <{}>", row["name"], row["email"]));
            }
        })
        .unwrap();
    let mut log = Log::new();

    runner
        .execute(
            "Scenario:
        Given the people
            |name|email|
            |Bob|bob@bob.com|",
            &mut log,
        )
        .unwrap();

    assert_eq!(log, ["Bob <bob@bob.com>"]);
}

#[test]
fn ragged_table_aborts_before_running() {
    let mut runner = quiet()
        .step(".", |_: &mut World, log: &mut Log| log.push("ran".into()))
        .unwrap();
    let mut log = Log::new();

    let err = runner
        .execute(
            "Scenario: first
        Given ok
    Scenario: second
        Given table
            |name|addr|
            |bob|",
            &mut log,
        )
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Parse(ParseError::TableWidth { expected: 2, found: 1, .. }),
    ));
    assert!(log.is_empty());
}

#[test]
fn outline_runs_once_per_example() {
    let mut runner = quiet()
        .step("^(\\d+) pops$", |_: &mut World, log: &mut Log, n: i64| {
            log.push(format!("{n} pops"));
        })
        .unwrap()
        .step("^I eat (\\d+) (.*)$", |_: &mut World, log: &mut Log, n: i16, what: String| {
            log.push(format!("eat {n} {what}"));
        })
        .unwrap();
    let mut log = Log::new();

    let report = runner
        .execute(
            "Feature: outlines
    Scenario Outline: eating
        Given <count> pops
        When I eat <eat> <name>
    Examples:
        | count | eat | name |
        | 5     | 2   | pops |
        | 12    | 7   | cukes |",
            &mut log,
        )
        .unwrap();

    assert_eq!(
        log,
        ["5 pops", "eat 2 pops", "12 pops", "eat 7 cukes"],
    );
    assert_eq!(report.scenarios, 2);
    assert_eq!(report.passed, 4);
}

#[test]
fn outline_example_values_reach_step_tables() {
    let mut runner = quiet()
        .step("^sizes$", |w: &mut World, log: &mut Log| {
            log.extend(w.table().into_iter().flat_map(|t| t.column("size")).map(str::to_owned));
        })
        .unwrap();
    let mut log = Log::new();

    runner
        .execute(
            "Scenario Outline:
        Given sizes
            | size |
            | <s>  |
    Examples:
        | s |
        | S |
        | M |",
            &mut log,
        )
        .unwrap();

    assert_eq!(log, ["S", "M"]);
}

#[test]
fn coerces_every_supported_kind() {
    type Seen = (bool, i8, i16, i32, i64, isize, f32, f64);
    let seen = Rc::new(RefCell::new(None::<Seen>));
    let sink = Rc::clone(&seen);
    let mut runner = Runner::new()
        .quiet()
        .step(
            "^(.*),(.*),(.*),(.*),(.*),(.*),(.*),(.*)$",
            move |_: &mut World,
                  _: &mut (),
                  a: bool,
                  b: i8,
                  c: i16,
                  d: i32,
                  e: i64,
                  f: isize,
                  g: f32,
                  h: f64| {
                *sink.borrow_mut() = Some((a, b, c, d, e, f, g, h));
            },
        )
        .unwrap();

    runner
        .execute(
            "Scenario:\n  Given true,127,255,255,255,255,0.3,0.4",
            &mut (),
        )
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        Some((true, 127, 255, 255, 255, 255, 0.3, 0.4)),
    );
}

#[test]
fn coerces_bool_and_int() {
    let mut runner = quiet()
        .step("(.*),(.*)", |_: &mut World, log: &mut Log, b: bool, n: i32| {
            log.push(format!("{b}/{n}"));
        })
        .unwrap();
    let mut log = Log::new();

    runner.execute("Scenario:\n  Given true,42", &mut log).unwrap();

    assert_eq!(log, ["true/42"]);
}

#[test]
fn overflowing_argument_is_fatal() {
    let mut runner = quiet()
        .step("^(\\d+)$", |_: &mut World, _: &mut Log, _: i8| {})
        .unwrap();

    let err = runner
        .execute("Scenario:\n  Given 300", &mut Log::new())
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Coercion(CoercionError::Invalid { index: 1, .. }),
    ));
}

#[test]
fn unparsable_argument_is_fatal() {
    let mut runner = quiet()
        .step("^I have (.*) cukes$", |_: &mut World, _: &mut Log, _: f64| {})
        .unwrap();

    let err = runner
        .execute("Scenario:\n  Given I have many cukes", &mut Log::new())
        .unwrap_err();

    assert!(err.to_string().contains("`many` is not a valid f64"));
}

#[test]
fn too_few_parameters_is_rejected_at_registration() {
    let err = quiet()
        .step("^(.*),(.*)$", |_: &mut World, _: &mut Log, _: bool| {})
        .unwrap_err();

    assert!(matches!(
        err,
        RegistrationError::Arity { params: 1, groups: 2, .. },
    ));
}

#[test]
fn too_many_parameters_is_rejected_at_registration() {
    let err = quiet()
        .step(
            r"^(\d+)$",
            |_: &mut World, _: &mut Log, _: i32, _: String| {},
        )
        .unwrap_err();

    assert!(matches!(
        err,
        RegistrationError::Arity { params: 2, groups: 1, .. },
    ));
}

#[test]
fn context_only_handler_with_groups_is_rejected() {
    let err = quiet()
        .step("^(.*)$", |_: &mut World, _: &mut Log| {})
        .unwrap_err();

    assert!(matches!(
        err,
        RegistrationError::Arity { params: 0, groups: 1, .. },
    ));
}

#[test]
fn invalid_pattern_is_rejected() {
    let err = quiet()
        .step("(unclosed", |_: &mut World, _: &mut Log| {})
        .unwrap_err();

    assert!(matches!(err, RegistrationError::Pattern { .. }));
}

#[test]
fn reports_every_category_in_order() {
    let mut runner = quiet()
        .step("^pass$", |_: &mut World, _: &mut Log| {})
        .unwrap()
        .step("^fail$", |w: &mut World, _: &mut Log| w.error("failed"))
        .unwrap()
        .step("^wait$", |w: &mut World, _: &mut Log| w.pending())
        .unwrap();

    let report = runner
        .execute(
            "Scenario: all
        Given pass
        And fail
        And what
        And wait
        And pass",
            &mut Log::new(),
        )
        .unwrap();

    assert_eq!(
        report.to_string(),
        "1 scenarios\n5 steps(1 skipped, 1 passed, 1 failed, 1 pending, \
         1 undefined)",
    );
}

#[test]
fn registration_aliases_share_one_registry() {
    let mut runner = quiet()
        .given("^a$", |_: &mut World, log: &mut Log| log.push("a".into()))
        .unwrap()
        .when("^b$", |_: &mut World, log: &mut Log| log.push("b".into()))
        .unwrap()
        .then("^c$", |_: &mut World, log: &mut Log| log.push("c".into()))
        .unwrap();
    let mut log = Log::new();

    runner
        .execute("Scenario:\n Then a\n Given b\n When c", &mut log)
        .unwrap();

    assert_eq!(log, ["a", "b", "c"]);
    assert_eq!(runner.steps().definitions().len(), 3);
}
