//! Package manifest (package.xml) reading and writing

mod reader;
mod writer;

pub use reader::XmlManifestReader;
pub use writer::{write_package_xml, PackageXml};
