// Background worker functionality.

pub mod reporter;

#[cfg(test)]
mod reporter_test;
