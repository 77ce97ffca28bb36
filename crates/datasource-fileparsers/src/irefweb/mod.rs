//! iRefWeb interaction files.

pub mod interactor;
pub mod mitab;

pub use interactor::{
    IRefWebInteractor, IRefWebInteractorOrganism, INTERACTOR_SCHEMA, ORGANISM_SCHEMA,
};
pub use mitab::{IRefWebInteractionRecord, IRefWebMitabReader, INTERACTION_SCHEMA};
