mod fake_host;

mod classifier_tests;
mod watchdog_tests;
