mod window;
pub use window::Window;

#[cfg(test)]
pub(crate) mod testing;
