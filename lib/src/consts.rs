//! Namespace and term IRIs for the RDF, RDFS, OWL and XML Schema vocabularies.

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

// rdf
pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
// rdfs
pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
// owl
pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
pub const IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";

/// Prefixes registered on every graph built with `default_namespaces` enabled.
pub const DEFAULT_NAMESPACES: [(&str, &str); 4] = [
    ("rdf", RDF_NS),
    ("rdfs", RDFS_NS),
    ("owl", OWL_NS),
    ("xsd", XSD_NS),
];

/// Expands to the full XML Schema IRI for a local name.
#[macro_export]
macro_rules! xsd {
    ($local:literal) => {
        concat!("http://www.w3.org/2001/XMLSchema#", $local)
    };
}
