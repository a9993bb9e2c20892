#[cfg(test)]
pub mod fixtures;
