pub mod loader;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;
