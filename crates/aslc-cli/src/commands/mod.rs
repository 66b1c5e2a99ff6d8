pub mod check;
pub mod dump;
pub mod input;

#[cfg(test)]
mod dump_tests;
