mod gamelist_tests;
mod integration_tests;
