/// Unit tests for the public domain and registry API
mod domain_tests;
mod registry_tests;
