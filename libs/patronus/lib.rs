//! Partial-update structs for document records.
//!
//! `#[patronus(name = "BusinessUpdate", derives = "Debug, Default, Serialize")]`
//! placed on a struct generates a sibling struct where every field is an
//! `Option`, plus `set_*`, `set_opt_*` and `unset_*` builder methods. When the
//! update derives `Serialize`, unset fields are skipped so the serialized value
//! only carries the fields being written.
pub use patronus_macros::patronus;
