//! Cross-crate test suite for the tab shell glue layer.

#[cfg(test)]
mod coalescing;

#[cfg(test)]
mod shell;
