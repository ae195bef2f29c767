// Unit tests for the public API, grouped by module under tests/unit/

mod unit {
    mod config_tests;
    mod directive_tests;
    mod service_tests;
    mod uri_tests;
}
