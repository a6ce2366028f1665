mod logging_tests;
mod support;
