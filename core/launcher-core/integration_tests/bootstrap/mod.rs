mod bootstrap_tests;
mod shell_installer;
