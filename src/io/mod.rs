/*!
# IO utilities

Corpus writing for the harvester ([Corpus]) and staged output for the annotator ([PendingOutput]).
!*/
mod corpus;
mod output;

pub use corpus::{Corpus, ROOT};
pub use output::{tagged_path, PendingOutput, TAGGED_SUFFIX};
