mod run;
pub(crate) mod summary;

#[cfg(test)]
mod tests;

pub(crate) use run::{build_dispatch_config, run_check};
