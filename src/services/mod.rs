pub mod glotpress;
pub mod index;
pub mod package;
pub mod sync;

#[cfg(test)]
pub mod testing;
