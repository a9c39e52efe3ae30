mod service_tests;
mod lifecycle_tests;
