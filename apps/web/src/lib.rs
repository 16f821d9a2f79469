pub mod delivery;
pub mod routing;
pub mod settings;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
