//! Architecture contract tests.
//!
//! The pipeline is only testable because the layering holds: steps talk to
//! ports, ports know nothing about adapters, and the domain stays free of
//! host concerns. These tests keep refactors honest.

mod support;

use support::architecture::find_lines_containing;

#[test]
fn steps_reach_the_host_only_through_ports() {
    let hits = find_lines_containing("src/app/step", &["crate::adapter"]);

    assert!(
        hits.is_empty(),
        "found direct adapter imports in provisioning steps: {hits:#?}"
    );
}

#[test]
fn ports_do_not_depend_on_adapters_or_orchestration() {
    let hits = find_lines_containing("src/port", &["crate::adapter", "crate::app"]);

    assert!(
        hits.is_empty(),
        "found outer-layer imports in port definitions: {hits:#?}"
    );
}

#[test]
fn domain_is_free_of_host_concerns() {
    let hits = find_lines_containing(
        "src/domain",
        &["crate::adapter", "crate::app", "reqwest::", "std::process"],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn testkit_fakes_never_shell_out() {
    let hits = find_lines_containing("src/testkit", &["std::process", "tokio::process"]);

    assert!(
        hits.is_empty(),
        "found process spawning in testkit fakes: {hits:#?}"
    );
}
