pub mod effects;
pub mod reservation;

#[cfg(test)]
pub(crate) mod support;
