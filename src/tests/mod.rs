pub mod resource_tests;
