pub mod merger;
pub mod pipeline;
pub mod prices;
pub mod ranks;

#[cfg(test)]
pub(crate) mod testing;
