//! # modgen
//!
//! Generates hierarchical module libraries from typed API resource catalogs.
//!
//! Given a catalog of resource kinds addressed by group → version → kind,
//! modgen assembles one output unit per API group plus a consolidated
//! hidden unit and an aggregate entry-point unit, as trees of
//! [`nodes`](crate::nodes) ready for a target-language printer.
//!
//! Parsing the source API specification into records and serializing the
//! finished trees both live outside this crate, behind the
//! [`Catalog`](crate::gen::Catalog), [`NodeBuilder`](crate::gen::NodeBuilder)
//! and [`Printer`](crate::gen::Printer) seams.

pub mod gen;
pub mod nodes;
