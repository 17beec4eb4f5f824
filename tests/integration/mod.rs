/// Integration tests against on-disk databases and the menu session
mod persistence_tests;
mod menu_tests;
