pub mod fasta;
pub mod sequence;
pub mod vocabulary;

pub use sequence::{Label, Representation, Sequence};
pub use vocabulary::Vocabulary;
