mod drop_tests;
mod growth_tests;
