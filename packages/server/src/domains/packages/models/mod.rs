pub mod package;

pub use package::{
    CreatePackage, Package, PackageFilter, PackageWithDestination, UpdatePackage, DEFAULT_CURRENCY,
};
